//! Owner of the widget tree, the flow engine and the screen handles.

use embedded_graphics::geometry::Point;
use log::{error, info};

use crate::actions::{on_object_pressed, UiEvent, UiEventQueue, UiObject};
use crate::config::{Theme, THEME_NAMES};
use crate::flow::{FlowEngine, NameTables};
use crate::render;
use crate::screens::{
    self, Objects, Screen, ScreenContext, ScreenId, OBJECT_NAMES, SCREENS, SCREEN_NAMES,
};
use crate::styles::STYLE_NAMES;
use crate::widgets::{EventCode, EventFilter, UserData, WidgetId, Widgets};
use crate::{AppDrawTarget, UiError};

pub const NAMES: NameTables = NameTables {
    screens: &SCREEN_NAMES,
    objects: &OBJECT_NAMES,
    styles: &STYLE_NAMES,
    themes: &THEME_NAMES,
};

pub struct Dashboard<F: FlowEngine> {
    widgets: Widgets,
    flow: F,
    objects: Objects,
    ui_events: UiEventQueue,
    current: ScreenId,
}

impl<F: FlowEngine> Dashboard<F> {
    /// Empty dashboard, call [`Dashboard::create_screens`] before use.
    pub fn new(flow: F) -> Self {
        Self {
            widgets: Widgets::new(),
            flow,
            objects: Objects::default(),
            ui_events: UiEventQueue::new(),
            current: ScreenId::Main,
        }
    }

    fn ctx(&mut self) -> ScreenContext<'_> {
        ScreenContext {
            widgets: &mut self.widgets,
            flow: &mut self.flow,
            objects: &mut self.objects,
        }
    }

    /// Registers the name tables, applies the theme, builds every screen and
    /// shows the main one.
    pub fn create_screens(&mut self) -> Result<(), UiError> {
        self.flow.init_names(&NAMES);
        self.widgets.set_theme(Theme::default());

        for index in 0..SCREENS.len() {
            self.create_screen(index)?;
        }
        self.load_screen(ScreenId::Main)
    }

    //---------
    // Screens
    //---------
    pub fn create_screen(&mut self, index: usize) -> Result<(), UiError> {
        screens::create_screen(index, &mut self.ctx())?;
        self.subscribe_ui_events(index)
    }

    pub fn create_screen_by_id(&mut self, id: u8) -> Result<(), UiError> {
        let index = screens::screen_by_id(id)?.id().index();
        self.create_screen(index)
    }

    pub fn delete_screen(&mut self, index: usize) -> Result<(), UiError> {
        screens::delete_screen(index, &mut self.ctx())
    }

    pub fn delete_screen_by_id(&mut self, id: u8) -> Result<(), UiError> {
        screens::delete_screen_by_id(id, &mut self.ctx())
    }

    pub fn tick_screen(&mut self, index: usize) -> Result<(), UiError> {
        screens::tick_screen(index, &mut self.ctx())
    }

    pub fn tick_screen_by_id(&mut self, id: u8) -> Result<(), UiError> {
        screens::tick_screen_by_id(id, &mut self.ctx())
    }

    /// Routes presses of the navigation objects into the UI event queue.
    fn subscribe_ui_events(&mut self, index: usize) -> Result<(), UiError> {
        let o = &self.objects;
        let subscriptions = match ScreenId::from_index(index) {
            Some(ScreenId::Main) => [
                (o.main, UiObject::MainScreen),
                (o.go_config, UiObject::GoConfig),
            ],
            Some(ScreenId::Config) => [(o.go_main, UiObject::GoMain), (o.wifi_btn, UiObject::WifiBtn)],
            None => return Err(UiError::UnknownScreen(index)),
        };

        for (object, ui_object) in subscriptions {
            if let Some(id) = object {
                self.widgets.add_event_cb(
                    id,
                    EventFilter::Only(EventCode::Pressed),
                    on_object_pressed,
                    UserData::Object(ui_object),
                )?;
            }
        }
        Ok(())
    }

    /// Shows a screen, creating it first if it was deleted.
    pub fn load_screen(&mut self, id: ScreenId) -> Result<(), UiError> {
        let screen = screens::screen(id.index())?;
        let root = match screen.root(&self.objects) {
            Some(root) => root,
            None => {
                self.create_screen(id.index())?;
                screen
                    .root(&self.objects)
                    .ok_or(UiError::UnknownScreen(id.index()))?
            }
        };
        self.widgets.load(root)?;
        self.current = id;
        info!("Loaded screen {}", id.name());
        Ok(())
    }

    pub fn current_screen(&self) -> ScreenId {
        self.current
    }

    //---------
    // Runtime
    //---------
    /// Synchronises the displayed screen with the flow engine and runs the
    /// callbacks of everything that changed.
    pub fn tick(&mut self) -> Result<(), UiError> {
        let result = self.tick_screen(self.current.index());
        self.dispatch();
        result
    }

    fn dispatch(&mut self) {
        self.widgets
            .dispatch_events(&mut self.flow, &mut self.ui_events);
    }

    pub fn press(&mut self, point: Point) -> Result<Option<WidgetId>, UiError> {
        let pressed = self.widgets.press(point);
        self.dispatch();
        pressed
    }

    pub fn press_move(&mut self, point: Point) -> Result<(), UiError> {
        let moved = self.widgets.press_move(point);
        self.dispatch();
        moved
    }

    pub fn release(&mut self) -> Result<(), UiError> {
        let released = self.widgets.release();
        self.dispatch();
        released
    }

    /// Redraws when anything changed since the last draw. Returns whether it
    /// drew.
    pub fn draw<D, E>(&mut self, display: &mut D) -> Result<bool, E>
    where
        D: AppDrawTarget<E>,
    {
        if !self.widgets.is_dirty() {
            return Ok(false);
        }
        render::draw(&self.widgets, display)?;
        self.widgets.take_dirty();
        Ok(true)
    }

    pub fn poll_ui_event(&mut self) -> Option<UiEvent> {
        self.ui_events.pop_front()
    }

    pub fn push_ui_event(&mut self, event: UiEvent) {
        if self.ui_events.push_back(event).is_err() {
            error!("Dropping {event:?}, queue full");
        }
    }

    pub fn flow(&self) -> &F {
        &self.flow
    }

    pub fn flow_mut(&mut self) -> &mut F {
        &mut self.flow
    }

    pub fn widgets(&self) -> &Widgets {
        &self.widgets
    }

    pub fn objects(&self) -> &Objects {
        &self.objects
    }
}
