//! Touch input: a single pointer that presses, drags and releases.

use embedded_graphics::geometry::Point;
use log::trace;

use super::{EventCode, Kind, State, WidgetId, Widgets};
use crate::layout;
use crate::UiError;

impl Widgets {
    /// Presses the widget under `point`. Switches toggle and sliders jump to
    /// the touched position, both reporting a value change.
    pub fn press(&mut self, point: Point) -> Result<Option<WidgetId>, UiError> {
        self.release()?;

        let Some(id) = layout::hit_test(self, point) else {
            return Ok(None);
        };
        trace!("press at {point:?}");

        self.pressed = Some(id);
        self.get_mut(id)?.state.insert(State::PRESSED);

        if matches!(self.get(id)?.kind, Kind::Switch) {
            if self.has_state(id, State::CHECKED)? {
                self.clear_state(id, State::CHECKED)?;
            } else {
                self.add_state(id, State::CHECKED)?;
            }
        } else if matches!(self.get(id)?.kind, Kind::Slider(_)) {
            self.slide_to(id, point)?;
        }

        self.emit(EventCode::Pressed, id, Some(point))?;
        Ok(Some(id))
    }

    /// Drags the pressed slider.
    pub fn press_move(&mut self, point: Point) -> Result<(), UiError> {
        let Some(id) = self.pressed else {
            return Ok(());
        };
        if matches!(self.get(id)?.kind, Kind::Slider(_)) {
            self.slide_to(id, point)?;
        }
        Ok(())
    }

    pub fn release(&mut self) -> Result<(), UiError> {
        let Some(id) = self.pressed.take() else {
            return Ok(());
        };
        // Widget may have been deleted by a press handler
        if let Ok(widget) = self.get_mut(id) {
            widget.state.remove(State::PRESSED);
            self.emit(EventCode::Released, id, None)?;
        }
        Ok(())
    }

    pub fn pressed(&self) -> Option<WidgetId> {
        self.pressed
    }

    fn slide_to(&mut self, id: WidgetId, point: Point) -> Result<(), UiError> {
        let Some(slider) = self.slider(id)?.copied() else {
            return Ok(());
        };
        let rect = layout::rect(self, id)?;
        let width = rect.size.width.max(1) as i32;
        let offset = (point.x - rect.top_left.x).clamp(0, width);
        let value = slider.min + (slider.max - slider.min) * offset / width;
        self.slider_set_value(id, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Flags, Length};

    fn screen() -> (Widgets, WidgetId) {
        let mut widgets = Widgets::new();
        let root = widgets.create_container(None).unwrap();
        widgets
            .set_size(root, Length::Px(800), Length::Px(480))
            .unwrap();
        widgets.clear_flag(root, Flags::CLICKABLE).unwrap();
        widgets.load(root).unwrap();
        (widgets, root)
    }

    #[test]
    fn switch_toggles_on_press() {
        let (mut widgets, root) = screen();
        let switch = widgets.create_switch(root).unwrap();
        widgets.set_pos(switch, 60, 147).unwrap();
        widgets
            .set_size(switch, Length::Px(180), Length::Px(70))
            .unwrap();

        assert_eq!(widgets.press(Point::new(100, 170)), Ok(Some(switch)));
        assert!(widgets.has_state(switch, State::CHECKED).unwrap());
        assert!(widgets.has_state(switch, State::PRESSED).unwrap());
        // value changed then pressed
        assert_eq!(widgets.pending_events(), 2);

        widgets.release().unwrap();
        assert!(!widgets.has_state(switch, State::PRESSED).unwrap());
        assert_eq!(widgets.pending_events(), 3);

        widgets.press(Point::new(100, 170)).unwrap();
        assert!(!widgets.has_state(switch, State::CHECKED).unwrap());
    }

    #[test]
    fn slider_follows_the_pointer() {
        let (mut widgets, root) = screen();
        let slider = widgets.create_slider(root).unwrap();
        widgets.set_pos(slider, 100, 100).unwrap();
        widgets
            .set_size(slider, Length::Px(290), Length::Px(20))
            .unwrap();
        widgets.slider_set_range(slider, 10, 300).unwrap();

        widgets.press(Point::new(100 + 145, 110)).unwrap();
        assert_eq!(widgets.slider_value(slider), Ok(155));

        widgets.press_move(Point::new(1000, 0)).unwrap();
        assert_eq!(widgets.slider_value(slider), Ok(300));

        widgets.release().unwrap();
        widgets.press_move(Point::new(100, 110)).unwrap();
        assert_eq!(widgets.slider_value(slider), Ok(300));
    }

    #[test]
    fn press_outside_hits_nothing() {
        let (mut widgets, root) = screen();
        let label = widgets.create_label(root).unwrap();
        widgets.label_set_text(label, "SOLAR").unwrap();
        assert_eq!(widgets.press(Point::new(5, 5)), Ok(None));
        assert_eq!(widgets.pending_events(), 0);
    }
}
