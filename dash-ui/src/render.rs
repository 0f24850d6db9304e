//! Draws the active screen.

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::{
    Circle, Primitive, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle,
    StrokeAlignment,
};
use embedded_graphics::Drawable;
use log::warn;
use u8g2_fonts::types::{FontColor, VerticalPosition};

use crate::config::{COLOR_BACKGROUND, COLOR_KNOB, COLOR_TEXT, COLOR_TRACK};
use crate::fonts::DEFAULT_FONT;
use crate::images::Recolor;
use crate::layout;
use crate::primitives::{Gauge, GaugeStyle, Toggle};
use crate::styles::Part;
use crate::widgets::{Flags, Kind, State, WidgetId, Widgets};
use crate::AppDrawTarget;

fn visible(widgets: &Widgets, id: WidgetId, part: Part) -> bool {
    widgets.style_prop(id, part, |s| s.opa) != Some(0)
}

fn bg(widgets: &Widgets, id: WidgetId, part: Part) -> Option<Rgb565> {
    if widgets.style_prop(id, part, |s| s.bg_opa) == Some(0) {
        return None;
    }
    widgets.style_prop(id, part, |s| s.bg_color)
}

/// Clears the display with the screen background and draws every visible
/// widget of the active screen, parents before children.
pub fn draw<D, E>(widgets: &Widgets, display: &mut D) -> Result<(), E>
where
    D: AppDrawTarget<E>,
{
    let Some(root) = widgets.active() else {
        return Ok(());
    };

    display.clear(bg(widgets, root, Part::Main).unwrap_or(COLOR_BACKGROUND))?;
    if let Ok(widget) = widgets.get(root) {
        for child in widget.children() {
            draw_widget(widgets, *child, display)?;
        }
    }
    display.hint_refresh();
    Ok(())
}

fn draw_widget<D, E>(widgets: &Widgets, id: WidgetId, display: &mut D) -> Result<(), E>
where
    D: AppDrawTarget<E>,
{
    let Ok(widget) = widgets.get(id) else {
        return Ok(());
    };
    if widget.has_flag(Flags::HIDDEN) || !visible(widgets, id, Part::Main) {
        return Ok(());
    }
    let Ok(rect) = layout::rect(widgets, id) else {
        return Ok(());
    };

    match widget.kind() {
        Kind::Container | Kind::Button => draw_box(widgets, id, rect, display)?,
        Kind::Label(text) => draw_label(widgets, id, text, rect, display)?,
        Kind::Arc(data) => {
            let part = |part: Part| {
                let color = widgets.style_prop(id, part, |s| s.arc_color)?;
                let width = widgets.style_prop(id, part, |s| s.arc_width).unwrap_or(10);
                Some((color, width as u32))
            };
            let knob = visible(widgets, id, Part::Knob)
                .then(|| bg(widgets, id, Part::Knob).unwrap_or(COLOR_KNOB));
            let style = GaugeStyle {
                track: part(Part::Main),
                indicator: part(Part::Indicator),
                knob,
            };
            Gauge::new(rect, *data, style).draw(display)?;
        }
        Kind::Switch => {
            Toggle::new(
                rect,
                widget.has_state(State::CHECKED),
                bg(widgets, id, Part::Main).unwrap_or(COLOR_TRACK),
                bg(widgets, id, Part::Indicator).unwrap_or(widgets.theme().primary),
                bg(widgets, id, Part::Knob).unwrap_or(COLOR_KNOB),
            )
            .draw(display)?;
        }
        Kind::Slider(data) => {
            let radius = Size::new(rect.size.height / 2, rect.size.height / 2);
            RoundedRectangle::with_equal_corners(rect, radius)
                .into_styled(PrimitiveStyle::with_fill(
                    bg(widgets, id, Part::Main).unwrap_or(COLOR_TRACK),
                ))
                .draw(display)?;

            let range = (data.max - data.min).max(1);
            let filled = rect.size.width as i32 * (data.value - data.min) / range;
            let indicator = Rectangle::new(rect.top_left, Size::new(filled.max(0) as u32, rect.size.height));
            RoundedRectangle::with_equal_corners(indicator, radius)
                .into_styled(PrimitiveStyle::with_fill(
                    bg(widgets, id, Part::Indicator).unwrap_or(widgets.theme().primary),
                ))
                .draw(display)?;

            let knob = rect.size.height + 8;
            Circle::with_center(
                Point::new(rect.top_left.x + filled, rect.center().y),
                knob,
            )
            .into_styled(PrimitiveStyle::with_fill(
                bg(widgets, id, Part::Knob).unwrap_or(COLOR_KNOB),
            ))
            .draw(display)?;
        }
        Kind::Image(Some(src)) => {
            let color = widgets
                .style_prop(id, Part::Main, |s| s.img_recolor)
                .unwrap_or(COLOR_TEXT);
            Recolor::new(display, color).draw_image(*src, rect.top_left)?;
        }
        Kind::Image(None) => {}
    }

    for child in widget.children() {
        draw_widget(widgets, *child, display)?;
    }
    Ok(())
}

fn draw_box<D, E>(widgets: &Widgets, id: WidgetId, rect: Rectangle, display: &mut D) -> Result<(), E>
where
    D: AppDrawTarget<E>,
{
    let radius = widgets.style_prop(id, Part::Main, |s| s.radius).unwrap_or(0) as u32;
    let shape = RoundedRectangle::with_equal_corners(rect, Size::new(radius, radius));

    if let Some(color) = bg(widgets, id, Part::Main) {
        shape
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(display)?;
    }

    let border = widgets.style_prop(id, Part::Main, |s| s.border_width).unwrap_or(0);
    if border > 0 {
        shape
            .into_styled(
                PrimitiveStyleBuilder::new()
                    .stroke_alignment(StrokeAlignment::Inside)
                    .stroke_width(border as u32)
                    .stroke_color(widgets.theme().primary)
                    .build(),
            )
            .draw(display)?;
    }
    Ok(())
}

fn draw_label<D, E>(
    widgets: &Widgets,
    id: WidgetId,
    text: &str,
    rect: Rectangle,
    display: &mut D,
) -> Result<(), E>
where
    D: AppDrawTarget<E>,
{
    let font = widgets
        .style_prop(id, Part::Main, |s| s.text_font)
        .unwrap_or(DEFAULT_FONT);
    let color = widgets
        .style_prop(id, Part::Main, |s| s.text_color)
        .unwrap_or(COLOR_TEXT);
    let pad_top = widgets.style_prop(id, Part::Main, |s| s.pad_top).unwrap_or(0) as i32;

    match font.renderer().render(
        text,
        rect.top_left + Point::new(0, pad_top),
        VerticalPosition::Top,
        FontColor::Transparent(color),
        display,
    ) {
        Ok(_) => Ok(()),
        Err(u8g2_fonts::Error::DisplayError(e)) => Err(e),
        Err(u8g2_fonts::Error::GlyphNotFound(c)) => {
            warn!("label {text:?}: no glyph for {c:?}");
            Ok(())
        }
        Err(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::hex;
    use crate::widgets::Length;
    use crate::HintRefresh;
    use embedded_graphics::draw_target::DrawTarget;
    use embedded_graphics::geometry::OriginDimensions;
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::Pixel;

    /// MockDisplay that counts refresh hints.
    struct Panel {
        display: MockDisplay<Rgb565>,
        refreshed: usize,
    }

    impl Panel {
        fn new() -> Self {
            let mut display = MockDisplay::new();
            // cleared background is painted over by the widgets
            display.set_allow_overdraw(true);
            Self {
                display,
                refreshed: 0,
            }
        }

        fn at(&self, x: i32, y: i32) -> Option<Rgb565> {
            self.display.get_pixel(Point::new(x, y))
        }
    }

    impl OriginDimensions for Panel {
        fn size(&self) -> Size {
            self.display.size()
        }
    }

    impl DrawTarget for Panel {
        type Color = Rgb565;
        type Error = core::convert::Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            self.display.draw_iter(pixels)
        }
    }

    impl HintRefresh for Panel {
        fn hint_refresh(&mut self) {
            self.refreshed += 1;
        }
    }

    #[test]
    fn hidden_and_transparent_widgets_are_skipped() {
        let mut widgets = Widgets::new();
        let root = widgets.create_container(None).unwrap();
        widgets.load(root).unwrap();

        let red = hex(0xff0000);
        let boxes: [WidgetId; 3] = core::array::from_fn(|i| {
            let id = widgets.create_container(Some(root)).unwrap();
            widgets.set_pos(id, i as i32 * 20, 0).unwrap();
            widgets.set_size(id, Length::Px(10), Length::Px(10)).unwrap();
            widgets
                .set_local_style(id, Part::Main, |s| s.bg_color = Some(red))
                .unwrap();
            id
        });
        widgets.add_flag(boxes[1], Flags::HIDDEN).unwrap();
        widgets
            .set_local_style(boxes[2], Part::Main, |s| s.opa = Some(0))
            .unwrap();

        let mut panel = Panel::new();
        draw(&widgets, &mut panel).unwrap();

        assert_eq!(panel.refreshed, 1);
        assert_eq!(panel.at(5, 5), Some(red));
        assert_eq!(panel.at(25, 5), Some(COLOR_BACKGROUND));
        assert_eq!(panel.at(45, 5), Some(COLOR_BACKGROUND));
    }

    #[test]
    fn nothing_loaded_draws_nothing() {
        let widgets = Widgets::new();
        let mut panel = Panel::new();
        draw(&widgets, &mut panel).unwrap();
        assert_eq!(panel.refreshed, 0);
        assert_eq!(panel.at(0, 0), None);
    }
}
