//! Config screen: wifi for the configuration page, backlight delay and the
//! configured devices.

use dash_core::config::{MAX_BACKLIGHT_DELAY_SECS, MIN_BACKLIGHT_DELAY_SECS};

use crate::config::COLOR_BACKGROUND;
use crate::flow::{FlowState, PROP_VALUE};
use crate::fonts::FontId;
use crate::styles::Part;
use crate::widgets::{
    Event, EventCode, EventContext, EventFilter, Flags, Length, UserData, WidgetId, Widgets,
};
use crate::UiError;

use super::{
    center, delete_root, label, sync_all, Bound, Objects, Prop, Screen, ScreenContext, ScreenId,
    ASSIGN_SLIDER_VALUE, PAGE_CONFIG,
};

/// Flow component indices of the config page.
pub mod components {
    pub const IP_ADDR: u16 = 2;
    pub const BACKLIGHT_SLIDER: u16 = 4;
    pub const BACKLIGHT_TEXT: u16 = 5;
    pub const INV_MAC: u16 = 8;
    pub const INV_KEY: u16 = 9;
    pub const INV_PIN: u16 = 10;
    pub const MPPT_MAC: u16 = 12;
    pub const MPPT_KEY: u16 = 13;
    pub const BMV_MAC: u16 = 15;
    pub const BMV_KEY: u16 = 16;
}

use components::*;

static BINDINGS: [Bound; 10] = [
    (|o: &Objects| o.ip_addr, IP_ADDR, Prop::Text),
    (|o: &Objects| o.backlight_delay, BACKLIGHT_SLIDER, Prop::SliderValue),
    (|o: &Objects| o.backlight_delay_text, BACKLIGHT_TEXT, Prop::Text),
    (|o: &Objects| o.inv_mac, INV_MAC, Prop::Text),
    (|o: &Objects| o.inv_key, INV_KEY, Prop::Text),
    (|o: &Objects| o.inv_pin, INV_PIN, Prop::Text),
    (|o: &Objects| o.mppt_mac, MPPT_MAC, Prop::Text),
    (|o: &Objects| o.mppt_key, MPPT_KEY, Prop::Text),
    (|o: &Objects| o.bmv_mac, BMV_MAC, Prop::Text),
    (|o: &Objects| o.bmv_key, BMV_KEY, Prop::Text),
];

fn on_backlight_delay(event: &Event, user_data: UserData, ctx: &mut EventContext<'_>) {
    if event.code != EventCode::ValueChanged || event.external_update {
        return;
    }
    if let UserData::Flow(state) = user_data {
        let value = ctx.widgets.slider_value(event.target).unwrap_or(0);
        ctx.flow.assign_integer_property(
            state,
            BACKLIGHT_SLIDER,
            PROP_VALUE,
            value,
            ASSIGN_SLIDER_VALUE,
        );
    }
}

fn button(
    w: &mut Widgets,
    parent: WidgetId,
    (x, y, width, height): (i32, i32, u32, u32),
    text: &str,
) -> Result<WidgetId, UiError> {
    let obj = w.create_button(parent)?;
    w.set_pos(obj, x, y)?;
    w.set_size(obj, Length::Px(width), Length::Px(height))?;
    w.set_local_style(obj, Part::Main, |s| {
        s.bg_opa = Some(0);
        s.border_width = Some(2);
        s.radius = Some(8);
    })?;
    let text = label(w, obj, 0, 0, FontId::RobotoMed18, text)?;
    center(w, text)?;
    Ok(obj)
}

/// Header plus MAC and key labels of one device row.
fn device_row(
    w: &mut Widgets,
    parent: WidgetId,
    y: i32,
    name: &str,
) -> Result<(WidgetId, WidgetId), UiError> {
    label(w, parent, 40, y, FontId::RobotoMed18, name)?;
    let mac = label(w, parent, 160, y + 2, FontId::RobotoReg14, "")?;
    let key = label(w, parent, 340, y + 2, FontId::RobotoReg14, "")?;
    Ok((mac, key))
}

fn build(w: &mut Widgets, o: &mut Objects, state: FlowState) -> Result<(), UiError> {
    let obj = w.create_container(None)?;
    o.config = Some(obj);
    w.set_size(obj, Length::Px(800), Length::Px(480))?;
    w.clear_flag(obj, Flags::SCROLLABLE)?;
    w.set_local_style(obj, Part::Main, |s| s.bg_color = Some(COLOR_BACKGROUND))?;
    let parent = obj;

    label(w, parent, 40, 30, FontId::RobotoReg48, "SETTINGS")?;
    o.go_main = Some(button(w, parent, (680, 30, 100, 50), "Back")?);

    o.wifi_btn = Some(button(w, parent, (40, 120, 200, 50), "Start WiFi")?);
    o.ip_addr = Some(label(w, parent, 260, 136, FontId::RobotoReg14, "")?);

    label(w, parent, 40, 200, FontId::RobotoReg14, "Backlight delay")?;
    let obj = w.create_slider(parent)?;
    o.backlight_delay = Some(obj);
    w.set_pos(obj, 40, 240)?;
    w.set_size(obj, Length::Px(400), Length::Px(16))?;
    w.slider_set_range(obj, MIN_BACKLIGHT_DELAY_SECS, MAX_BACKLIGHT_DELAY_SECS)?;
    w.add_event_cb(obj, EventFilter::All, on_backlight_delay, UserData::Flow(state))?;
    o.backlight_delay_text = Some(label(w, parent, 470, 234, FontId::RobotoMed18, "")?);

    let (mac, key) = device_row(w, parent, 300, "Inverter")?;
    o.inv_mac = Some(mac);
    o.inv_key = Some(key);
    o.inv_pin = Some(label(w, parent, 680, 302, FontId::RobotoReg14, "")?);

    let (mac, key) = device_row(w, parent, 340, "MPPT")?;
    o.mppt_mac = Some(mac);
    o.mppt_key = Some(key);

    let (mac, key) = device_row(w, parent, 380, "BMV")?;
    o.bmv_mac = Some(mac);
    o.bmv_key = Some(key);
    Ok(())
}

fn clear(o: &mut Objects) {
    o.config = None;
    o.wifi_btn = None;
    o.ip_addr = None;
    o.backlight_delay = None;
    o.backlight_delay_text = None;
    o.inv_mac = None;
    o.inv_key = None;
    o.inv_pin = None;
    o.mppt_mac = None;
    o.mppt_key = None;
    o.bmv_mac = None;
    o.bmv_key = None;
    o.go_main = None;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ConfigScreen;

impl Screen for ConfigScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Config
    }

    fn root(&self, objects: &Objects) -> Option<WidgetId> {
        objects.config
    }

    fn create(&self, ctx: &mut ScreenContext<'_>) -> Result<(), UiError> {
        let state = ctx.flow.get_flow_state(PAGE_CONFIG, 0);
        if let Err(e) = build(ctx.widgets, ctx.objects, state) {
            let _ = self.delete(ctx);
            return Err(e);
        }
        self.tick(ctx)
    }

    fn delete(&self, ctx: &mut ScreenContext<'_>) -> Result<(), UiError> {
        let result = delete_root(ctx.widgets, ctx.objects.config);
        clear(ctx.objects);
        ctx.flow.delete_page_flow_state(PAGE_CONFIG);
        result
    }

    fn tick(&self, ctx: &mut ScreenContext<'_>) -> Result<(), UiError> {
        let state = ctx.flow.get_flow_state(PAGE_CONFIG, 0);
        sync_all(ctx, state, &BINDINGS)
    }
}
