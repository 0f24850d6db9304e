//! Generated screens.
//!
//! Each screen builds its widget tree, subscribes its widgets to the flow
//! engine and on every tick pushes the engine's current values into the
//! widgets whose value differs.

pub mod config;
pub mod main;

use enum_dispatch::enum_dispatch;
use log::info;

pub use config::ConfigScreen;
pub use main::MainScreen;

use crate::flow::{FlowEngine, FlowState, PROP_HIDDEN, PROP_SRC, PROP_VALUE};
use crate::fonts::FontId;
use crate::images::ImageId;
use crate::styles::{add_style, Align, FlexAlign, Layout, Part, StyleIndex};
use crate::widgets::{Flags, Length, State, WidgetId, Widgets};
use crate::UiError;

pub const PAGE_MAIN: u16 = 0;
pub const PAGE_CONFIG: u16 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ScreenId {
    Main = 1,
    Config = 2,
}

impl ScreenId {
    pub const ALL: [ScreenId; 2] = [Self::Main, Self::Config];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Screen ids start at 1.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::from_index((id as usize).checked_sub(1)?)
    }

    pub fn index(self) -> usize {
        self as usize - 1
    }

    pub fn name(self) -> &'static str {
        SCREEN_NAMES[self.index()]
    }
}

pub const SCREEN_NAMES: [&str; 2] = ["Main", "Config"];

/// Handles of every named widget. A field is `None` while its screen does
/// not exist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Objects {
    pub main: Option<WidgetId>,
    pub inverter_container: Option<WidgetId>,
    pub inv_switch: Option<WidgetId>,
    pub ac_watts_arc: Option<WidgetId>,
    pub ac_watts: Option<WidgetId>,
    pub inv_mode: Option<WidgetId>,
    pub inv_error: Option<WidgetId>,
    pub solar_container: Option<WidgetId>,
    pub solar_arc: Option<WidgetId>,
    pub soc_arc: Option<WidgetId>,
    pub batt_indicator_image: Option<WidgetId>,
    pub soc_unknown_container: Option<WidgetId>,
    pub soc_container: Option<WidgetId>,
    pub batt_soc: Option<WidgetId>,
    pub batt_volt: Option<WidgetId>,
    pub batt_amp: Option<WidgetId>,
    pub batt_temp: Option<WidgetId>,
    pub batt_alarm: Option<WidgetId>,
    pub solar_watts: Option<WidgetId>,
    pub solar_yield: Option<WidgetId>,
    pub solar_mode: Option<WidgetId>,
    pub solar_error: Option<WidgetId>,
    pub go_config: Option<WidgetId>,

    pub config: Option<WidgetId>,
    pub wifi_btn: Option<WidgetId>,
    pub ip_addr: Option<WidgetId>,
    pub backlight_delay: Option<WidgetId>,
    pub backlight_delay_text: Option<WidgetId>,
    pub inv_mac: Option<WidgetId>,
    pub inv_key: Option<WidgetId>,
    pub inv_pin: Option<WidgetId>,
    pub mppt_mac: Option<WidgetId>,
    pub mppt_key: Option<WidgetId>,
    pub bmv_mac: Option<WidgetId>,
    pub bmv_key: Option<WidgetId>,
    pub go_main: Option<WidgetId>,
}

pub const OBJECT_NAMES: [&str; 36] = [
    "main",
    "inverter_container",
    "inv_switch",
    "ac_watts_arc",
    "ac_watts",
    "inv_mode",
    "inv_error",
    "solar_container",
    "solar_arc",
    "soc_arc",
    "batt_indicator_image",
    "soc_unknown_container",
    "soc_container",
    "batt_soc",
    "batt_volt",
    "batt_amp",
    "batt_temp",
    "batt_alarm",
    "solar_watts",
    "solar_yield",
    "solar_mode",
    "solar_error",
    "go_config",
    "config",
    "wifi_btn",
    "ip_addr",
    "backlight_delay",
    "backlight_delay_text",
    "inv_mac",
    "inv_key",
    "inv_pin",
    "mppt_mac",
    "mppt_key",
    "bmv_mac",
    "bmv_key",
    "go_main",
];

pub struct ScreenContext<'a> {
    pub widgets: &'a mut Widgets,
    pub flow: &'a mut dyn FlowEngine,
    pub objects: &'a mut Objects,
}

#[enum_dispatch(Screens)]
pub trait Screen {
    fn id(&self) -> ScreenId;

    /// Root widget of the screen, if created.
    fn root(&self, objects: &Objects) -> Option<WidgetId>;

    /// Builds the widget tree and synchronises it once.
    fn create(&self, ctx: &mut ScreenContext<'_>) -> Result<(), UiError>;

    /// Deletes the tree, forgets its handles and the page's flow state.
    fn delete(&self, ctx: &mut ScreenContext<'_>) -> Result<(), UiError>;

    fn tick(&self, ctx: &mut ScreenContext<'_>) -> Result<(), UiError>;
}

#[enum_dispatch]
#[derive(Clone, Copy, Debug)]
pub enum Screens {
    Main(MainScreen),
    Config(ConfigScreen),
}

/// Screens by index, `ScreenId::index` order.
pub static SCREENS: [Screens; 2] = [Screens::Main(MainScreen), Screens::Config(ConfigScreen)];

pub fn screen(index: usize) -> Result<&'static Screens, UiError> {
    SCREENS.get(index).ok_or(UiError::UnknownScreen(index))
}

pub fn screen_by_id(id: u8) -> Result<&'static Screens, UiError> {
    let index = ScreenId::from_id(id)
        .map(ScreenId::index)
        .ok_or(UiError::UnknownScreen(id as usize))?;
    screen(index)
}

pub fn create_screen(index: usize, ctx: &mut ScreenContext<'_>) -> Result<(), UiError> {
    let screen = screen(index)?;
    screen.create(ctx)?;
    info!("Created screen {}", screen.id().name());
    Ok(())
}

pub fn create_screen_by_id(id: u8, ctx: &mut ScreenContext<'_>) -> Result<(), UiError> {
    create_screen(screen_by_id(id)?.id().index(), ctx)
}

pub fn delete_screen(index: usize, ctx: &mut ScreenContext<'_>) -> Result<(), UiError> {
    let screen = screen(index)?;
    screen.delete(ctx)?;
    info!("Deleted screen {}", screen.id().name());
    Ok(())
}

pub fn delete_screen_by_id(id: u8, ctx: &mut ScreenContext<'_>) -> Result<(), UiError> {
    delete_screen(screen_by_id(id)?.id().index(), ctx)
}

pub fn tick_screen(index: usize, ctx: &mut ScreenContext<'_>) -> Result<(), UiError> {
    screen(index)?.tick(ctx)
}

pub fn tick_screen_by_id(id: u8, ctx: &mut ScreenContext<'_>) -> Result<(), UiError> {
    screen_by_id(id)?.tick(ctx)
}

//----------
// Builders
//----------

/// Transparent, borderless, unpadded container that passes presses on to
/// its parent.
pub(crate) fn container(
    widgets: &mut Widgets,
    parent: WidgetId,
    x: i32,
    y: i32,
) -> Result<WidgetId, UiError> {
    let obj = widgets.create_container(Some(parent))?;
    widgets.set_pos(obj, x, y)?;
    widgets.set_local_style(obj, Part::Main, |s| {
        s.pad_left = Some(0);
        s.pad_top = Some(0);
        s.pad_right = Some(0);
        s.pad_bottom = Some(0);
        s.bg_opa = Some(0);
        s.border_width = Some(0);
        s.radius = Some(0);
    })?;
    widgets.clear_flag(obj, Flags::SCROLLABLE)?;
    widgets.add_flag(obj, Flags::EVENT_BUBBLE)?;
    Ok(obj)
}

/// Container laying its children out in a row.
pub(crate) fn flex_row(
    widgets: &mut Widgets,
    parent: WidgetId,
    x: i32,
    y: i32,
    gap: i16,
    place: FlexAlign,
) -> Result<WidgetId, UiError> {
    let obj = container(widgets, parent, x, y)?;
    widgets.set_local_style(obj, Part::Main, |s| {
        s.layout = Some(Layout::FlexRow);
        s.flex_main_place = Some(place);
        s.pad_column = Some(gap);
    })?;
    Ok(obj)
}

pub(crate) fn center(widgets: &mut Widgets, obj: WidgetId) -> Result<(), UiError> {
    widgets.set_local_style(obj, Part::Main, |s| s.align = Some(Align::Center))
}

pub(crate) fn label(
    widgets: &mut Widgets,
    parent: WidgetId,
    x: i32,
    y: i32,
    font: FontId,
    text: &str,
) -> Result<WidgetId, UiError> {
    let obj = widgets.create_label(parent)?;
    widgets.set_pos(obj, x, y)?;
    add_style(widgets, obj, StyleIndex::Labels)?;
    widgets.set_local_style(obj, Part::Main, |s| s.text_font = Some(font))?;
    widgets.label_set_text(obj, text)?;
    Ok(obj)
}

/// Unit label next to a value, shifted down to share its baseline.
pub(crate) fn unit(
    widgets: &mut Widgets,
    parent: WidgetId,
    font: FontId,
    text: &str,
    pad_top: i16,
) -> Result<WidgetId, UiError> {
    let obj = label(widgets, parent, 0, 0, font, text)?;
    widgets.set_local_style(obj, Part::Main, |s| s.pad_top = Some(pad_top))?;
    Ok(obj)
}

pub(crate) fn image(
    widgets: &mut Widgets,
    parent: WidgetId,
    x: i32,
    y: i32,
    src: ImageId,
) -> Result<WidgetId, UiError> {
    let obj = widgets.create_image(parent)?;
    widgets.set_pos(obj, x, y)?;
    widgets.image_set_src(obj, src)?;
    add_style(widgets, obj, StyleIndex::Images)?;
    Ok(obj)
}

pub(crate) fn arc(
    widgets: &mut Widgets,
    parent: WidgetId,
    (x, y, size): (i32, i32, u32),
    (min, max): (i32, i32),
    (bg_start, bg_end, rotation): (u16, u16, u16),
) -> Result<WidgetId, UiError> {
    let obj = widgets.create_arc(parent)?;
    widgets.set_pos(obj, x, y)?;
    widgets.set_size(obj, Length::Px(size), Length::Px(size))?;
    widgets.arc_set_range(obj, min, max)?;
    widgets.arc_set_bg_angles(obj, bg_start, bg_end)?;
    widgets.arc_set_rotation(obj, rotation)?;
    widgets.clear_flag(obj, Flags::CLICKABLE)?;
    add_style(widgets, obj, StyleIndex::Arcs)?;
    Ok(obj)
}

/// Deletes a screen's tree if it was created.
pub(crate) fn delete_root(widgets: &mut Widgets, root: Option<WidgetId>) -> Result<(), UiError> {
    match root {
        Some(root) => widgets.delete(root),
        None => Ok(()),
    }
}

//---------
// Syncing
//---------

pub(crate) const EVAL_CHECKED: &str = "Failed to evaluate Checked state";
pub(crate) const ASSIGN_CHECKED: &str = "Failed to assign Checked state";
pub(crate) const EVAL_ARC_VALUE: &str = "Failed to evaluate Value in Arc widget";
pub(crate) const ASSIGN_ARC_VALUE: &str = "Failed to assign Value in Arc widget";
pub(crate) const EVAL_SLIDER_VALUE: &str = "Failed to evaluate Value in Slider widget";
pub(crate) const ASSIGN_SLIDER_VALUE: &str = "Failed to assign Value in Slider widget";
pub(crate) const EVAL_LABEL_TEXT: &str = "Failed to evaluate Text in Label widget";
pub(crate) const EVAL_HIDDEN: &str = "Failed to evaluate Hidden flag";
pub(crate) const EVAL_IMAGE: &str = "Failed to evaluate Image in Image widget";

/// Which widget property a binding drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Prop {
    Checked,
    ArcValue,
    SliderValue,
    Text,
    Hidden,
    Image,
}

/// One bound property of a screen.
pub(crate) type Bound = (fn(&Objects) -> Option<WidgetId>, u16, Prop);

/// Evaluates every binding and applies the values that differ, flagged as
/// external updates so their change events are not assigned back.
pub(crate) fn sync_all(
    ctx: &mut ScreenContext<'_>,
    state: FlowState,
    bindings: &[Bound],
) -> Result<(), UiError> {
    for (object, component, prop) in bindings {
        if let Some(id) = object(ctx.objects) {
            sync_one(ctx.widgets, &mut *ctx.flow, state, id, *component, *prop)?;
        }
    }
    Ok(())
}

fn sync_one(
    widgets: &mut Widgets,
    flow: &mut dyn FlowEngine,
    state: FlowState,
    id: WidgetId,
    component: u16,
    prop: Prop,
) -> Result<(), UiError> {
    match prop {
        Prop::Checked => {
            let new = flow.eval_boolean_property(state, component, PROP_VALUE, EVAL_CHECKED);
            if new != widgets.has_state(id, State::CHECKED)? {
                widgets.apply_external(id, |w| {
                    if new {
                        w.add_state(id, State::CHECKED)
                    } else {
                        w.clear_state(id, State::CHECKED)
                    }
                })?;
            }
        }
        Prop::ArcValue => {
            let new = flow.eval_integer_property(state, component, PROP_VALUE, EVAL_ARC_VALUE);
            if new != widgets.arc_value(id)? {
                widgets.apply_external(id, |w| w.arc_set_value(id, new))?;
            }
        }
        Prop::SliderValue => {
            let new = flow.eval_integer_property(state, component, PROP_VALUE, EVAL_SLIDER_VALUE);
            if new != widgets.slider_value(id)? {
                widgets.apply_external(id, |w| w.slider_set_value(id, new))?;
            }
        }
        Prop::Text => {
            let new = flow.eval_text_property(state, component, PROP_VALUE, EVAL_LABEL_TEXT);
            if new.as_str() != widgets.label_text(id)? {
                widgets.apply_external(id, |w| w.label_set_text(id, &new))?;
            }
        }
        Prop::Hidden => {
            let new = flow.eval_boolean_property(state, component, PROP_HIDDEN, EVAL_HIDDEN);
            if new != widgets.has_flag(id, Flags::HIDDEN)? {
                widgets.apply_external(id, |w| {
                    if new {
                        w.add_flag(id, Flags::HIDDEN)
                    } else {
                        w.clear_flag(id, Flags::HIDDEN)
                    }
                })?;
            }
        }
        Prop::Image => {
            let index = flow.eval_integer_property(state, component, PROP_SRC, EVAL_IMAGE);
            if let Some(new) = ImageId::from_index(index) {
                if Some(new) != widgets.image_src(id)? {
                    widgets.apply_external(id, |w| w.image_set_src(id, new))?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_one_based() {
        assert_eq!(ScreenId::from_id(1), Some(ScreenId::Main));
        assert_eq!(ScreenId::from_id(2), Some(ScreenId::Config));
        assert_eq!(ScreenId::from_id(0), None);
        assert_eq!(ScreenId::from_id(3), None);
        assert_eq!(ScreenId::Config.index(), 1);
        assert_eq!(ScreenId::Config.name(), "Config");
    }

    #[test]
    fn dispatch_tables_line_up() {
        for (index, id) in ScreenId::ALL.into_iter().enumerate() {
            assert_eq!(screen(index).unwrap().id(), id);
            assert_eq!(screen_by_id(id as u8).unwrap().id(), id);
        }
        assert!(matches!(screen(2), Err(UiError::UnknownScreen(2))));
        assert!(matches!(screen_by_id(0), Err(UiError::UnknownScreen(0))));
    }
}
