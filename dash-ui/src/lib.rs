#![no_std]

pub mod actions;
pub mod bindings;
pub mod config;
mod dashboard;
mod error;
pub mod flow;
pub mod fonts;
mod format;
pub mod images;
pub mod layout;
pub mod panic;
mod primitives;
mod render;
pub mod screens;
pub mod styles;
pub mod widgets;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::Rgb565;

pub use actions::{Controller, Services, UiEvent, UiObject};
pub use bindings::NativeFlow;
pub use dashboard::{Dashboard, NAMES};
pub use error::UiError;
pub use flow::{FlowEngine, FlowState};
pub use screens::{ScreenId, SCREENS};
pub use widgets::{LabelText, WidgetId, Widgets};

pub trait HintRefresh {
    fn hint_refresh(&mut self);
}

pub trait AppDrawTarget<E>: DrawTarget<Color = Rgb565, Error = E> + HintRefresh {}
impl<E, D: DrawTarget<Color = Rgb565, Error = E> + HintRefresh> AppDrawTarget<E> for D {}
