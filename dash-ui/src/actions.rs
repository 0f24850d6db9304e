//! Navigation and side effects of UI presses.
//!
//! Widgets only queue [`UiEvent`]s. The host drains the queue and hands
//! each event to the [`Controller`], which switches screens and drives the
//! radios and the backlight through [`Services`].

use core::fmt::Write;

use heapless::Deque;
use log::{error, info};

use dash_core::config::HOSTNAME;
use dash_core::{Backlight, BacklightChange, Instant};

use crate::bindings::NativeFlow;
use crate::dashboard::Dashboard;
use crate::screens::ScreenId;
use crate::widgets::{Event, EventContext, UserData};
use crate::LabelText;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum UiObject {
    WifiBtn,
    MainScreen,
    GoMain,
    GoConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    BacklightOn,
    Pressed(UiObject),
}

pub const UI_EVENT_QUEUE_LEN: usize = 8;

pub type UiEventQueue = Deque<UiEvent, UI_EVENT_QUEUE_LEN>;

/// Queues a press of the object named by the user data.
pub(crate) fn on_object_pressed(_event: &Event, user_data: UserData, ctx: &mut EventContext<'_>) {
    if let UserData::Object(object) = user_data {
        let event = UiEvent::Pressed(object);
        if ctx.ui_events.push_back(event).is_err() {
            error!("Dropping {event:?}, queue full");
        }
    }
}

/// Hardware the controller drives.
pub trait Services {
    type Error: core::fmt::Debug;

    /// Brings up the access point and returns its address.
    fn start_wifi(&mut self) -> Result<[u8; 4], Self::Error>;

    fn stop_wifi(&mut self) -> Result<(), Self::Error>;

    /// Returns true if scanning was not running before.
    fn start_scanning(&mut self) -> Result<bool, Self::Error>;

    /// Returns true if scanning was running before.
    fn stop_scanning(&mut self) -> Result<bool, Self::Error>;

    fn set_backlight(&mut self, on: bool);
}

pub struct Controller {
    backlight: Backlight,
}

impl Controller {
    pub fn new(now: Instant) -> Self {
        Self {
            backlight: Backlight::new(now),
        }
    }

    pub fn backlight(&self) -> &Backlight {
        &self.backlight
    }

    pub fn handle<S: Services>(
        &mut self,
        event: UiEvent,
        now: Instant,
        dashboard: &mut Dashboard<NativeFlow>,
        services: &mut S,
    ) {
        info!("UI event {event:?}");

        match event {
            UiEvent::BacklightOn => {
                if let Ok(true) = services.start_scanning() {
                    info!("Start scan after backlight on");
                }
            }
            UiEvent::Pressed(UiObject::MainScreen) => {
                // Keeps the backlight on
                self.backlight.touch(now);
            }
            UiEvent::Pressed(UiObject::WifiBtn) => match services.start_wifi() {
                Ok(ip) => dashboard.flow_mut().vars_mut().set_ip_addr(HOSTNAME, ip),
                Err(e) => {
                    error!("Failed to start wifi, {e:?}");
                    let mut message = LabelText::new();
                    let _ = write!(message, "Failed to start wifi, {e:?}");
                    dashboard.flow_mut().vars_mut().set_ip_message(&message);
                }
            },
            UiEvent::Pressed(UiObject::GoMain) => {
                if let Err(e) = dashboard.load_screen(ScreenId::Main) {
                    error!("Failed to load main screen, {e}");
                }
                let delay = dashboard.flow().vars().backlight_delay;
                self.backlight.set_delay_secs(delay.max(0) as u64);
                self.backlight.touch(now);

                if let Err(e) = services.stop_wifi() {
                    error!("Failed to stop wifi, {e:?}");
                }
                if let Ok(true) = services.start_scanning() {
                    info!("Start scan on return to main screen");
                }
            }
            UiEvent::Pressed(UiObject::GoConfig) => {
                if let Err(e) = dashboard.load_screen(ScreenId::Config) {
                    error!("Failed to load config screen, {e}");
                }
                // Stops the timeout while configuring
                self.backlight.suspend();
                services.set_backlight(true);

                if let Ok(true) = services.stop_scanning() {
                    info!("Stop scan in config screen");
                }
            }
        }
    }

    /// Switches the backlight when the timeout says so. Turning it back on
    /// yields [`UiEvent::BacklightOn`] for the host to handle.
    pub fn poll<S: Services>(&mut self, now: Instant, services: &mut S) -> Option<UiEvent> {
        match self.backlight.poll(now)? {
            BacklightChange::Off => {
                services.set_backlight(false);
                None
            }
            BacklightChange::On => {
                services.set_backlight(true);
                Some(UiEvent::BacklightOn)
            }
        }
    }
}
