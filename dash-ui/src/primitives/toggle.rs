use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::{Circle, Primitive, PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::Drawable;

/// Pill shaped on/off switch. The knob sits right when checked.
pub struct Toggle {
    bounds: Rectangle,
    checked: bool,
    track: Rgb565,
    indicator: Rgb565,
    knob: Rgb565,
}

impl Toggle {
    pub fn new(bounds: Rectangle, checked: bool, track: Rgb565, indicator: Rgb565, knob: Rgb565) -> Self {
        Self {
            bounds,
            checked,
            track,
            indicator,
            knob,
        }
    }

    pub fn knob_bounds(&self) -> Rectangle {
        let height = self.bounds.size.height;
        let diameter = height.saturating_sub(8);
        let inset = (height - diameter) as i32 / 2;
        let x = if self.checked {
            self.bounds.size.width as i32 - inset - diameter as i32
        } else {
            inset
        };
        Rectangle::new(
            self.bounds.top_left + Point::new(x, inset),
            Size::new(diameter, diameter),
        )
    }
}

impl Drawable for Toggle {
    type Color = Rgb565;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let radius = self.bounds.size.height / 2;
        let fill = if self.checked { self.indicator } else { self.track };
        RoundedRectangle::with_equal_corners(self.bounds, Size::new(radius, radius))
            .into_styled(PrimitiveStyle::with_fill(fill))
            .draw(target)?;

        let knob = self.knob_bounds();
        Circle::new(knob.top_left, knob.size.width)
            .into_styled(PrimitiveStyle::with_fill(self.knob))
            .draw(target)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toggle(checked: bool) -> Toggle {
        Toggle::new(
            Rectangle::new(Point::new(60, 147), Size::new(180, 70)),
            checked,
            Rgb565::new(0, 0, 0),
            Rgb565::new(1, 1, 1),
            Rgb565::new(2, 2, 2),
        )
    }

    #[test]
    fn knob_moves_right_when_checked() {
        assert_eq!(toggle(false).knob_bounds().top_left, Point::new(64, 151));
        assert_eq!(toggle(true).knob_bounds().top_left, Point::new(60 + 180 - 4 - 62, 151));
    }
}
