use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{AngleUnit, Point, Size};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::{
    Arc, Circle, Primitive, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment,
};
use embedded_graphics::Drawable;

use crate::widgets::ArcData;

/// Colours and widths of the three parts of an arc gauge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaugeStyle {
    pub track: Option<(Rgb565, u32)>,
    pub indicator: Option<(Rgb565, u32)>,
    pub knob: Option<Rgb565>,
}

/// An arc gauge: background track, value indicator and an optional knob at
/// the value end. Angles are clockwise with 0 at three o'clock.
pub struct Gauge {
    bounds: Rectangle,
    data: ArcData,
    style: GaugeStyle,
}

impl Gauge {
    pub fn new(bounds: Rectangle, data: ArcData, style: GaugeStyle) -> Self {
        Self {
            bounds,
            data,
            style,
        }
    }

    /// Angular length of the background, 360 for a full circle.
    pub fn sweep(&self) -> u32 {
        let start = self.data.bg_start as u32;
        let end = self.data.bg_end as u32;
        if end >= start {
            end - start
        } else {
            end + 360 - start
        }
    }

    /// Sweep of the indicator for the current value.
    pub fn value_sweep(&self) -> u32 {
        let range = (self.data.max - self.data.min).max(1) as i64;
        let value = (self.data.value - self.data.min).clamp(0, range as i32) as i64;
        (value * self.sweep() as i64 / range) as u32
    }

    fn start_angle(&self) -> f32 {
        ((self.data.bg_start + self.data.rotation) % 360) as f32
    }

    fn diameter(&self) -> u32 {
        self.bounds.size.width.min(self.bounds.size.height)
    }

    fn stroke(color: Rgb565, width: u32) -> PrimitiveStyle<Rgb565> {
        PrimitiveStyleBuilder::new()
            .stroke_alignment(StrokeAlignment::Inside)
            .stroke_width(width)
            .stroke_color(color)
            .build()
    }

    fn arc(&self, sweep: u32) -> Arc {
        let top_left = self.bounds.center() - Size::new(self.diameter(), self.diameter()) / 2;
        Arc::new(
            top_left,
            self.diameter(),
            self.start_angle().deg(),
            (sweep as f32).deg(),
        )
    }

    fn knob_center(&self, width: u32) -> Point {
        let angle = (self.start_angle() + self.value_sweep() as f32).to_radians();
        let radius = (self.diameter() as f32 - width as f32) / 2.0;
        let (sin, cos) = (micromath::F32Ext::sin(angle), micromath::F32Ext::cos(angle));
        self.bounds.center() + Point::new((cos * radius) as i32, (sin * radius) as i32)
    }
}

impl Drawable for Gauge {
    type Color = Rgb565;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        if let Some((color, width)) = self.style.track {
            self.arc(self.sweep())
                .into_styled(Self::stroke(color, width))
                .draw(target)?;
        }

        let indicator_width = self.style.indicator.map(|(_, w)| w).unwrap_or(0);
        if let Some((color, width)) = self.style.indicator {
            let sweep = self.value_sweep();
            if sweep > 0 {
                self.arc(sweep)
                    .into_styled(Self::stroke(color, width))
                    .draw(target)?;
            }
        }

        if let Some(color) = self.style.knob {
            let size = indicator_width.max(4) + 4;
            Circle::with_center(self.knob_center(indicator_width), size)
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(target)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::pixelcolor::RgbColor;

    fn gauge(value: i32, bg_start: u16, bg_end: u16) -> Gauge {
        Gauge::new(
            Rectangle::new(Point::zero(), Size::new(40, 40)),
            ArcData {
                min: 0,
                max: 100,
                value,
                bg_start,
                bg_end,
                rotation: 90,
            },
            GaugeStyle {
                track: Some((Rgb565::BLUE, 4)),
                indicator: Some((Rgb565::WHITE, 4)),
                knob: None,
            },
        )
    }

    #[test]
    fn sweeps() {
        assert_eq!(gauge(0, 0, 360).sweep(), 360);
        assert_eq!(gauge(0, 135, 45).sweep(), 270);
        assert_eq!(gauge(50, 0, 360).value_sweep(), 180);
        assert_eq!(gauge(150, 0, 90).value_sweep(), 90);
        assert_eq!(gauge(-3, 0, 90).value_sweep(), 0);
    }

    #[test]
    fn indicator_covers_track() {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        gauge(100, 0, 360).draw(&mut display).unwrap();
        // rotation 90 puts the start at six o'clock, a full value hides the track
        assert_eq!(display.get_pixel(Point::new(20, 38)), Some(Rgb565::WHITE));
        assert_eq!(display.get_pixel(Point::new(20, 20)), None);
    }
}
