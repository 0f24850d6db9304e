use embedded_graphics::geometry::Point;
use log::warn;

use super::{Flags, WidgetId, Widgets};
use crate::actions::{UiEventQueue, UiObject};
use crate::flow::{FlowEngine, FlowState};
use crate::UiError;

pub const MAX_CALLBACKS: usize = 24;
pub const EVENT_QUEUE_LEN: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventCode {
    Pressed,
    Released,
    ValueChanged,
}

impl EventCode {
    fn bubbles(self) -> bool {
        matches!(self, Self::Pressed | Self::Released)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventFilter {
    All,
    Only(EventCode),
}

impl EventFilter {
    fn matches(self, code: EventCode) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == code,
        }
    }
}

/// Value handed to a callback along with the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserData {
    None,
    Flow(FlowState),
    Object(UiObject),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event {
    pub code: EventCode,
    /// Widget the event originated from.
    pub target: WidgetId,
    /// Widget whose callbacks are running, differs from `target` while bubbling.
    pub current: WidgetId,
    /// Set when the target was changed by a tick, not by the user.
    pub external_update: bool,
    pub point: Option<Point>,
}

pub struct EventContext<'a> {
    pub widgets: &'a Widgets,
    pub flow: &'a mut dyn FlowEngine,
    pub ui_events: &'a mut UiEventQueue,
}

pub type EventCallback = fn(&Event, UserData, &mut EventContext<'_>);

#[derive(Clone, Copy)]
pub(super) struct Registration {
    pub(super) widget: WidgetId,
    filter: EventFilter,
    callback: EventCallback,
    user_data: UserData,
}

impl Widgets {
    pub fn add_event_cb(
        &mut self,
        id: WidgetId,
        filter: EventFilter,
        callback: EventCallback,
        user_data: UserData,
    ) -> Result<(), UiError> {
        self.get(id)?;
        self.callbacks
            .push(Registration {
                widget: id,
                filter,
                callback,
                user_data,
            })
            .map_err(|_| UiError::TooManyCallbacks)
    }

    pub fn callback_count(&self, id: WidgetId) -> usize {
        self.callbacks.iter().filter(|r| r.widget == id).count()
    }

    pub(crate) fn emit(
        &mut self,
        code: EventCode,
        target: WidgetId,
        point: Option<Point>,
    ) -> Result<(), UiError> {
        let external_update = self.get(target)?.applying_external;
        let event = Event {
            code,
            target,
            current: target,
            external_update,
            point,
        };
        self.events.push_back(event).map_err(|_| {
            warn!("Dropping {event:?}, queue full");
            UiError::EventQueueFull
        })
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Runs the callbacks of every queued event, bubbling input events up to
    /// ancestors while `EVENT_BUBBLE` is set. Returns the number of callbacks run.
    pub fn dispatch_events(
        &mut self,
        flow: &mut dyn FlowEngine,
        ui_events: &mut UiEventQueue,
    ) -> usize {
        let mut handled = 0;

        while let Some(event) = self.events.pop_front() {
            let mut current = Some(event.target);

            while let Some(id) = current {
                // Deleted since it was queued
                let Ok(widget) = self.get(id) else {
                    break;
                };
                let next = widget
                    .parent
                    .filter(|_| event.code.bubbles() && widget.has_flag(Flags::EVENT_BUBBLE));

                let event = Event {
                    current: id,
                    ..event
                };
                for registration in self
                    .callbacks
                    .iter()
                    .filter(|r| r.widget == id && r.filter.matches(event.code))
                {
                    let mut ctx = EventContext {
                        widgets: &*self,
                        flow: &mut *flow,
                        ui_events: &mut *ui_events,
                    };
                    (registration.callback)(&event, registration.user_data, &mut ctx);
                    handled += 1;
                }

                current = next;
            }
        }

        handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::UiEvent;
    use crate::flow::tests::RecordingFlow;
    use crate::widgets::State;

    fn on_value_changed(event: &Event, user_data: UserData, ctx: &mut EventContext<'_>) {
        if let UserData::Flow(state) = user_data {
            if !event.external_update {
                let value = ctx.widgets.has_state(event.target, State::CHECKED).unwrap_or(false);
                ctx.flow.assign_boolean_property(state, 3, 3, value, "assign failed");
            }
        }
    }

    fn on_pressed(_event: &Event, user_data: UserData, ctx: &mut EventContext<'_>) {
        if let UserData::Object(object) = user_data {
            let _ = ctx.ui_events.push_back(UiEvent::Pressed(object));
        }
    }

    #[test]
    fn external_updates_are_not_fed_back() {
        let mut widgets = Widgets::new();
        let mut flow = RecordingFlow::default();
        let mut ui_events = UiEventQueue::new();
        let root = widgets.create_container(None).unwrap();
        let switch = widgets.create_switch(root).unwrap();
        let state = flow.get_flow_state(0, 0);
        widgets
            .add_event_cb(switch, EventFilter::All, on_value_changed, UserData::Flow(state))
            .unwrap();

        widgets
            .apply_external(switch, |w| w.add_state(switch, State::CHECKED))
            .unwrap();
        assert_eq!(widgets.dispatch_events(&mut flow, &mut ui_events), 1);
        assert!(flow.assigned_bools.is_empty());

        widgets.clear_state(switch, State::CHECKED).unwrap();
        widgets.dispatch_events(&mut flow, &mut ui_events);
        assert_eq!(flow.assigned_bools.as_slice(), &[(3, 3, false)]);
    }

    #[test]
    fn pressed_bubbles_to_flagged_ancestors() {
        let mut widgets = Widgets::new();
        let mut flow = RecordingFlow::default();
        let mut ui_events = UiEventQueue::new();
        let root = widgets.create_container(None).unwrap();
        let container = widgets.create_container(Some(root)).unwrap();
        let button = widgets.create_button(container).unwrap();
        widgets
            .add_event_cb(
                root,
                EventFilter::Only(EventCode::Pressed),
                on_pressed,
                UserData::Object(UiObject::MainScreen),
            )
            .unwrap();

        widgets.emit(EventCode::Pressed, button, None).unwrap();
        widgets.dispatch_events(&mut flow, &mut ui_events);
        assert!(ui_events.is_empty());

        widgets.add_flag(button, Flags::EVENT_BUBBLE).unwrap();
        widgets.add_flag(container, Flags::EVENT_BUBBLE).unwrap();
        widgets.emit(EventCode::Pressed, button, None).unwrap();
        widgets.emit(EventCode::ValueChanged, button, None).unwrap();
        widgets.dispatch_events(&mut flow, &mut ui_events);
        assert_eq!(ui_events.pop_front(), Some(UiEvent::Pressed(UiObject::MainScreen)));
        assert!(ui_events.is_empty());
    }

    #[test]
    fn callbacks_go_with_their_widget() {
        let mut widgets = Widgets::new();
        let root = widgets.create_container(None).unwrap();
        let button = widgets.create_button(root).unwrap();
        widgets
            .add_event_cb(button, EventFilter::All, on_pressed, UserData::None)
            .unwrap();
        assert_eq!(widgets.callback_count(button), 1);
        widgets.delete(root).unwrap();
        assert_eq!(widgets.callback_count(button), 0);
        assert_eq!(
            widgets.add_event_cb(button, EventFilter::All, on_pressed, UserData::None),
            Err(UiError::StaleHandle)
        );
    }

    #[test]
    fn queue_overflow_is_reported() {
        let mut widgets = Widgets::new();
        let root = widgets.create_container(None).unwrap();
        for _ in 0..EVENT_QUEUE_LEN {
            widgets.emit(EventCode::Pressed, root, None).unwrap();
        }
        assert_eq!(
            widgets.emit(EventCode::Pressed, root, None),
            Err(UiError::EventQueueFull)
        );
    }
}
