//! Resolves widget geometry. Positions are relative to the parent; flex rows
//! and centre alignment override them.

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use u8g2_fonts::types::VerticalPosition;

use crate::fonts::DEFAULT_FONT;
use crate::styles::{Align, FlexAlign, Layout, Part};
use crate::widgets::{Flags, Kind, Length, WidgetId, Widgets};
use crate::UiError;

fn pad(widgets: &Widgets, id: WidgetId) -> (i32, i32) {
    let top = widgets.style_prop(id, Part::Main, |s| s.pad_top).unwrap_or(0);
    let bottom = widgets.style_prop(id, Part::Main, |s| s.pad_bottom).unwrap_or(0);
    (top as i32, bottom as i32)
}

fn is_hidden(widgets: &Widgets, id: WidgetId) -> bool {
    widgets.has_flag(id, Flags::HIDDEN).unwrap_or(true)
}

/// Width and height of the text as the label draws it.
pub fn text_size(widgets: &Widgets, id: WidgetId, text: &str) -> Size {
    let font = widgets
        .style_prop(id, Part::Main, |s| s.text_font)
        .unwrap_or(DEFAULT_FONT)
        .renderer();

    match font.get_rendered_dimensions(text, Point::zero(), VerticalPosition::Top) {
        Ok(dims) => {
            let height = dims
                .bounding_box
                .map(|b| b.top_left.y + b.size.height as i32)
                .unwrap_or(0);
            Size::new(dims.advance.x.max(0) as u32, height.max(0) as u32)
        }
        Err(_) => Size::zero(),
    }
}

pub fn content_size(widgets: &Widgets, id: WidgetId) -> Result<Size, UiError> {
    let widget = widgets.get(id)?;
    let size = match widget.kind() {
        Kind::Label(text) => {
            let (top, bottom) = pad(widgets, id);
            let text = text_size(widgets, id, text);
            Size::new(text.width, (text.height as i32 + top + bottom).max(0) as u32)
        }
        Kind::Image(Some(src)) => src.size(),
        Kind::Container | Kind::Button => {
            let layout = widgets.style_prop(id, Part::Main, |s| s.layout);
            let gap = widgets.style_prop(id, Part::Main, |s| s.pad_column).unwrap_or(0) as i32;
            let mut width = 0i32;
            let mut height = 0i32;
            let mut count = 0;

            for child in widget.children() {
                if is_hidden(widgets, *child) {
                    continue;
                }
                let child_size = size(widgets, *child)?;
                if layout == Some(Layout::FlexRow) {
                    width += child_size.width as i32 + if count > 0 { gap } else { 0 };
                    height = height.max(child_size.height as i32);
                } else {
                    let centered = widgets.style_prop(*child, Part::Main, |s| s.align)
                        == Some(Align::Center);
                    let pos = if centered {
                        Point::zero()
                    } else {
                        widgets.get(*child)?.pos()
                    };
                    width = width.max(pos.x + child_size.width as i32);
                    height = height.max(pos.y + child_size.height as i32);
                }
                count += 1;
            }
            Size::new(width.max(0) as u32, height.max(0) as u32)
        }
        _ => Size::zero(),
    };
    Ok(size)
}

pub fn size(widgets: &Widgets, id: WidgetId) -> Result<Size, UiError> {
    let widget = widgets.get(id)?;
    match (widget.width(), widget.height()) {
        (Length::Px(w), Length::Px(h)) => Ok(Size::new(w, h)),
        (width, height) => {
            let content = content_size(widgets, id)?;
            Ok(Size::new(
                match width {
                    Length::Px(w) => w,
                    Length::Content => content.width,
                },
                match height {
                    Length::Px(h) => h,
                    Length::Content => content.height,
                },
            ))
        }
    }
}

fn offset_in_parent(
    widgets: &Widgets,
    parent: WidgetId,
    parent_size: Size,
    id: WidgetId,
    own_size: Size,
) -> Result<Point, UiError> {
    if widgets.style_prop(parent, Part::Main, |s| s.layout) == Some(Layout::FlexRow) {
        let gap = widgets
            .style_prop(parent, Part::Main, |s| s.pad_column)
            .unwrap_or(0) as i32;
        let mut x = 0;
        let mut total = 0;
        let mut count = 0;
        for child in widgets.get(parent)?.children() {
            if is_hidden(widgets, *child) {
                continue;
            }
            let step = size(widgets, *child)?.width as i32 + if count > 0 { gap } else { 0 };
            if *child == id {
                x = total + if count > 0 { gap } else { 0 };
            }
            total += step;
            count += 1;
        }

        let start = match widgets.style_prop(parent, Part::Main, |s| s.flex_main_place) {
            Some(FlexAlign::End) => parent_size.width as i32 - total,
            _ => 0,
        };
        return Ok(Point::new(start + x, 0));
    }

    let pos = widgets.get(id)?.pos();
    match widgets.style_prop(id, Part::Main, |s| s.align) {
        Some(Align::Center) => Ok(Point::new(
            (parent_size.width as i32 - own_size.width as i32) / 2 + pos.x,
            (parent_size.height as i32 - own_size.height as i32) / 2 + pos.y,
        )),
        _ => Ok(pos),
    }
}

/// Absolute screen rectangle of a widget.
pub fn rect(widgets: &Widgets, id: WidgetId) -> Result<Rectangle, UiError> {
    let own_size = size(widgets, id)?;
    match widgets.get(id)?.parent() {
        None => Ok(Rectangle::new(widgets.get(id)?.pos(), own_size)),
        Some(parent) => {
            let parent_rect = rect(widgets, parent)?;
            let offset = offset_in_parent(widgets, parent, parent_rect.size, id, own_size)?;
            Ok(Rectangle::new(parent_rect.top_left + offset, own_size))
        }
    }
}

/// Top-most visible clickable widget of the active screen under `point`.
pub fn hit_test(widgets: &Widgets, point: Point) -> Option<WidgetId> {
    fn hit(widgets: &Widgets, id: WidgetId, point: Point) -> Option<WidgetId> {
        if is_hidden(widgets, id) {
            return None;
        }
        let widget = widgets.get(id).ok()?;
        if let Some(found) = widget
            .children()
            .iter()
            .rev()
            .find_map(|child| hit(widgets, *child, point))
        {
            return Some(found);
        }
        let inside = rect(widgets, id).ok()?.contains(point);
        (inside && widget.has_flag(Flags::CLICKABLE)).then_some(id)
    }

    hit(widgets, widgets.active()?, point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::ImageId;

    fn screen() -> (Widgets, WidgetId) {
        let mut widgets = Widgets::new();
        let root = widgets.create_container(None).unwrap();
        widgets
            .set_size(root, Length::Px(800), Length::Px(480))
            .unwrap();
        widgets.load(root).unwrap();
        (widgets, root)
    }

    fn image(widgets: &mut Widgets, parent: WidgetId) -> WidgetId {
        let id = widgets.create_image(parent).unwrap();
        widgets.image_set_src(id, ImageId::Power).unwrap();
        id
    }

    #[test]
    fn positions_are_relative() {
        let (mut widgets, root) = screen();
        let container = widgets.create_container(Some(root)).unwrap();
        widgets.set_pos(container, 480, 0).unwrap();
        widgets
            .set_size(container, Length::Px(300), Length::Px(480))
            .unwrap();
        let icon = image(&mut widgets, container);
        widgets.set_pos(icon, 79, 110).unwrap();

        assert_eq!(
            rect(&widgets, icon).unwrap(),
            Rectangle::new(Point::new(559, 110), Size::new(24, 24))
        );
    }

    #[test]
    fn center_alignment_uses_parent_size() {
        let (mut widgets, root) = screen();
        let arc = widgets.create_arc(root).unwrap();
        widgets.set_pos(arc, 60, 255).unwrap();
        widgets.set_size(arc, Length::Px(180), Length::Px(180)).unwrap();
        let icon = image(&mut widgets, arc);
        widgets
            .set_local_style(icon, Part::Main, |s| s.align = Some(Align::Center))
            .unwrap();
        widgets.set_pos(icon, 0, -10).unwrap();

        assert_eq!(
            rect(&widgets, icon).unwrap().top_left,
            Point::new(60 + 78, 255 + 78 - 10)
        );
    }

    #[test]
    fn flex_row_packs_children() {
        let (mut widgets, root) = screen();
        let row = widgets.create_container(Some(root)).unwrap();
        widgets.set_pos(row, 10, 20).unwrap();
        widgets
            .set_local_style(row, Part::Main, |s| {
                s.layout = Some(Layout::FlexRow);
                s.pad_column = Some(8);
            })
            .unwrap();
        let a = image(&mut widgets, row);
        let hidden = image(&mut widgets, row);
        let b = image(&mut widgets, row);
        widgets.set_pos(b, 300, 300).unwrap();
        widgets.add_flag(hidden, Flags::HIDDEN).unwrap();

        assert_eq!(size(&widgets, row).unwrap(), Size::new(24 + 8 + 24, 24));
        assert_eq!(rect(&widgets, a).unwrap().top_left, Point::new(10, 20));
        assert_eq!(rect(&widgets, b).unwrap().top_left, Point::new(42, 20));

        widgets
            .set_size(row, Length::Px(120), Length::Content)
            .unwrap();
        widgets
            .set_local_style(row, Part::Main, |s| s.flex_main_place = Some(FlexAlign::End))
            .unwrap();
        assert_eq!(rect(&widgets, b).unwrap().top_left, Point::new(10 + 120 - 24, 20));
    }

    #[test]
    fn hit_test_prefers_top_most_clickable() {
        let (mut widgets, root) = screen();
        let button = widgets.create_button(root).unwrap();
        widgets.set_pos(button, 700, 400).unwrap();
        widgets.set_size(button, Length::Px(80), Length::Px(60)).unwrap();
        let icon = image(&mut widgets, button);
        widgets.set_pos(icon, 28, 18).unwrap();

        assert_eq!(hit_test(&widgets, Point::new(730, 420)), Some(button));
        assert_eq!(hit_test(&widgets, Point::new(10, 10)), Some(root));

        widgets.clear_flag(root, Flags::CLICKABLE).unwrap();
        assert_eq!(hit_test(&widgets, Point::new(10, 10)), None);

        widgets.add_flag(button, Flags::HIDDEN).unwrap();
        assert_eq!(hit_test(&widgets, Point::new(730, 420)), None);
    }
}
