//! Main screen: inverter on the right, solar and battery on the left.

use crate::config::{hex, COLOR_BACKGROUND};
use crate::flow::{FlowState, PROP_VALUE};
use crate::fonts::FontId;
use crate::images::ImageId;
use crate::styles::{add_style, FlexAlign, Part, StyleIndex};
use crate::widgets::{
    Event, EventCode, EventContext, EventFilter, Flags, Length, State, UserData, WidgetId, Widgets,
};
use crate::UiError;

use super::{
    arc, center, container, delete_root, flex_row, image, label, sync_all, unit, Bound, Objects,
    Prop, Screen, ScreenContext, ScreenId, ASSIGN_ARC_VALUE, ASSIGN_CHECKED, PAGE_MAIN,
};

/// Flow component indices of the main page.
pub mod components {
    pub const INV_SWITCH: u16 = 3;
    pub const AC_WATTS_ARC: u16 = 4;
    pub const AC_WATTS_TEXT: u16 = 6;
    pub const INV_MODE: u16 = 7;
    pub const INV_ERROR: u16 = 8;
    pub const SOLAR_ARC: u16 = 11;
    pub const SOC_ARC: u16 = 12;
    pub const BATT_IMAGE: u16 = 14;
    pub const SOC_UNKNOWN: u16 = 16;
    pub const SOC_CONTAINER: u16 = 18;
    pub const SOC_TEXT: u16 = 19;
    pub const BATT_VOLT: u16 = 23;
    pub const BATT_AMP: u16 = 26;
    pub const BATT_TEMP: u16 = 30;
    pub const SOLAR_YIELD: u16 = 32;
    pub const SOLAR_MODE: u16 = 33;
    pub const BATT_ALARM: u16 = 34;
    pub const SOLAR_WATTS_TEXT: u16 = 35;
    pub const SOLAR_ERROR: u16 = 36;
}

use components::*;

static BINDINGS: [Bound; 22] = [
    (|o: &Objects| o.inv_switch, INV_SWITCH, Prop::Checked),
    (|o: &Objects| o.ac_watts_arc, AC_WATTS_ARC, Prop::ArcValue),
    (|o: &Objects| o.ac_watts, AC_WATTS_TEXT, Prop::Text),
    (|o: &Objects| o.solar_arc, SOLAR_ARC, Prop::ArcValue),
    (|o: &Objects| o.soc_arc, SOC_ARC, Prop::ArcValue),
    (|o: &Objects| o.batt_soc, SOC_TEXT, Prop::Text),
    (|o: &Objects| o.batt_volt, BATT_VOLT, Prop::Text),
    (|o: &Objects| o.batt_amp, BATT_AMP, Prop::Text),
    (|o: &Objects| o.batt_temp, BATT_TEMP, Prop::Text),
    (|o: &Objects| o.solar_watts, SOLAR_WATTS_TEXT, Prop::Text),
    (|o: &Objects| o.inv_mode, INV_MODE, Prop::Text),
    (|o: &Objects| o.inv_error, INV_ERROR, Prop::Text),
    (|o: &Objects| o.inv_error, INV_ERROR, Prop::Hidden),
    (|o: &Objects| o.batt_indicator_image, BATT_IMAGE, Prop::Image),
    (|o: &Objects| o.soc_unknown_container, SOC_UNKNOWN, Prop::Hidden),
    (|o: &Objects| o.soc_container, SOC_CONTAINER, Prop::Hidden),
    (|o: &Objects| o.solar_yield, SOLAR_YIELD, Prop::Text),
    (|o: &Objects| o.solar_mode, SOLAR_MODE, Prop::Text),
    (|o: &Objects| o.batt_alarm, BATT_ALARM, Prop::Text),
    (|o: &Objects| o.batt_alarm, BATT_ALARM, Prop::Hidden),
    (|o: &Objects| o.solar_error, SOLAR_ERROR, Prop::Text),
    (|o: &Objects| o.solar_error, SOLAR_ERROR, Prop::Hidden),
];

fn on_inv_switch(event: &Event, user_data: UserData, ctx: &mut EventContext<'_>) {
    if event.code != EventCode::ValueChanged || event.external_update {
        return;
    }
    if let UserData::Flow(state) = user_data {
        let value = ctx
            .widgets
            .has_state(event.target, State::CHECKED)
            .unwrap_or(false);
        ctx.flow
            .assign_boolean_property(state, INV_SWITCH, PROP_VALUE, value, ASSIGN_CHECKED);
    }
}

fn assign_arc(event: &Event, user_data: UserData, ctx: &mut EventContext<'_>, component: u16) {
    if event.code != EventCode::ValueChanged || event.external_update {
        return;
    }
    if let UserData::Flow(state) = user_data {
        let value = ctx.widgets.arc_value(event.target).unwrap_or(0);
        ctx.flow
            .assign_integer_property(state, component, PROP_VALUE, value, ASSIGN_ARC_VALUE);
    }
}

fn on_ac_watts_arc(event: &Event, user_data: UserData, ctx: &mut EventContext<'_>) {
    assign_arc(event, user_data, ctx, AC_WATTS_ARC)
}

fn on_solar_arc(event: &Event, user_data: UserData, ctx: &mut EventContext<'_>) {
    assign_arc(event, user_data, ctx, SOLAR_ARC)
}

fn on_soc_arc(event: &Event, user_data: UserData, ctx: &mut EventContext<'_>) {
    assign_arc(event, user_data, ctx, SOC_ARC)
}

/// Value label followed by its unit, as one row.
fn value_with_unit(
    w: &mut Widgets,
    row: WidgetId,
    value_font: FontId,
    unit_font: FontId,
    unit_text: &str,
    unit_pad: i16,
) -> Result<WidgetId, UiError> {
    let value = label(w, row, 0, 0, value_font, "")?;
    unit(w, row, unit_font, unit_text, unit_pad)?;
    Ok(value)
}

fn build_inverter(
    w: &mut Widgets,
    o: &mut Objects,
    root: WidgetId,
    state: FlowState,
) -> Result<(), UiError> {
    let obj = container(w, root, 480, 0)?;
    o.inverter_container = Some(obj);
    w.set_size(obj, Length::Px(300), Length::Px(480))?;
    let parent = obj;

    label(w, parent, 40, 60, FontId::RobotoReg48, "INVERTER")?;

    let obj = w.create_switch(parent)?;
    o.inv_switch = Some(obj);
    w.set_pos(obj, 60, 147)?;
    w.set_size(obj, Length::Px(180), Length::Px(70))?;
    w.add_flag(obj, Flags::EVENT_BUBBLE)?;
    w.add_event_cb(obj, EventFilter::All, on_inv_switch, UserData::Flow(state))?;
    w.set_local_style(obj, Part::Indicator, |s| s.bg_color = Some(hex(0x4789d0)))?;
    w.set_local_style(obj, Part::Knob, |s| s.bg_color = Some(hex(0xf2f2f2)))?;
    w.set_local_style(obj, Part::Main, |s| s.bg_color = Some(hex(0x222629)))?;

    o.inv_mode = Some(label(w, parent, 60, 226, FontId::RobotoReg14, "")?);

    let obj = arc(w, parent, (60, 255, 180), (0, 1500), (0, 360, 90))?;
    o.ac_watts_arc = Some(obj);
    w.add_event_cb(obj, EventFilter::All, on_ac_watts_arc, UserData::Flow(state))?;
    {
        let row = flex_row(w, obj, 0, 0, 1, FlexAlign::Start)?;
        center(w, row)?;
        o.ac_watts = Some(value_with_unit(
            w,
            row,
            FontId::RobotoMed48,
            FontId::RobotoReg32,
            "W",
            9,
        )?);
        image(w, obj, 79, 110, ImageId::Power)?;
    }

    let obj = label(w, parent, 20, 440, FontId::RobotoMed18, "")?;
    add_style(w, obj, StyleIndex::LabelsError)?;
    w.set_local_style(obj, Part::Main, |s| s.text_font = Some(FontId::RobotoMed18))?;
    w.add_flag(obj, Flags::HIDDEN)?;
    o.inv_error = Some(obj);
    Ok(())
}

fn build_battery(w: &mut Widgets, o: &mut Objects, soc_arc: WidgetId) -> Result<(), UiError> {
    let parent = soc_arc;

    let obj = container(w, parent, 0, -65)?;
    center(w, obj)?;
    o.batt_indicator_image = Some(image(w, obj, 0, 0, ImageId::Batt90)?);
    label(w, obj, 25, 11, FontId::RobotoReg14, "Battery")?;

    let obj = container(w, parent, 0, 0)?;
    o.soc_unknown_container = Some(obj);
    w.add_flag(obj, Flags::HIDDEN)?;
    center(w, obj)?;
    label(w, obj, 0, 0, FontId::RobotoMed48, "~")?;

    let obj = flex_row(w, parent, 0, 0, 1, FlexAlign::Start)?;
    o.soc_container = Some(obj);
    center(w, obj)?;
    o.batt_soc = Some(value_with_unit(
        w,
        obj,
        FontId::RobotoMed48,
        FontId::RobotoReg32,
        "%",
        8,
    )?);

    let obj = flex_row(w, parent, 0, 55, 8, FlexAlign::Start)?;
    center(w, obj)?;
    {
        let volts = flex_row(w, obj, 0, 0, 1, FlexAlign::Start)?;
        o.batt_volt = Some(value_with_unit(
            w,
            volts,
            FontId::RobotoMed22,
            FontId::RobotoReg14,
            "V",
            5,
        )?);
        let amps = flex_row(w, obj, 0, 0, 1, FlexAlign::Start)?;
        o.batt_amp = Some(value_with_unit(
            w,
            amps,
            FontId::RobotoMed22,
            FontId::RobotoReg14,
            "A",
            5,
        )?);
    }

    let obj = flex_row(w, parent, 0, 100, 1, FlexAlign::Start)?;
    center(w, obj)?;
    image(w, obj, 0, 0, ImageId::Temp)?;
    o.batt_temp = Some(value_with_unit(
        w,
        obj,
        FontId::RobotoMed18,
        FontId::RobotoReg14,
        "C",
        6,
    )?);
    if let Some(temp) = o.batt_temp {
        w.set_local_style(temp, Part::Main, |s| s.pad_top = Some(4))?;
    }
    Ok(())
}

fn build_solar(
    w: &mut Widgets,
    o: &mut Objects,
    root: WidgetId,
    state: FlowState,
) -> Result<(), UiError> {
    let obj = container(w, root, 20, 0)?;
    o.solar_container = Some(obj);
    w.set_size(obj, Length::Px(500), Length::Px(480))?;
    let parent = obj;

    label(w, parent, 176, 60, FontId::RobotoReg48, "SOLAR")?;

    let obj = arc(w, parent, (75, 80, 350), (0, 400), (0, 90, 135))?;
    o.solar_arc = Some(obj);
    w.add_event_cb(obj, EventFilter::All, on_solar_arc, UserData::Flow(state))?;

    let obj = arc(w, parent, (120, 125, 260), (0, 100), (0, 360, 90))?;
    o.soc_arc = Some(obj);
    w.add_event_cb(obj, EventFilter::All, on_soc_arc, UserData::Flow(state))?;
    build_battery(w, o, obj)?;

    let obj = container(w, parent, 5, 361)?;
    {
        image(w, obj, 89, 9, ImageId::Solar)?;
        let row = flex_row(w, obj, 0, 35, 1, FlexAlign::End)?;
        w.set_size(row, Length::Px(120), Length::Content)?;
        o.solar_watts = Some(value_with_unit(
            w,
            row,
            FontId::RobotoMed48,
            FontId::RobotoReg32,
            "W",
            9,
        )?);
    }

    let obj = container(w, parent, 375, 361)?;
    {
        image(w, obj, 0, 9, ImageId::Sun)?;
        o.solar_yield = Some(label(w, obj, 0, 35, FontId::RobotoMed22, "")?);
        o.solar_mode = Some(label(w, obj, 0, 65, FontId::RobotoReg14, "")?);
    }

    for (y, field) in [(400, &mut o.solar_error), (440, &mut o.batt_alarm)] {
        let obj = label(w, parent, 150, y, FontId::RobotoMed18, "")?;
        add_style(w, obj, StyleIndex::LabelsError)?;
        w.set_local_style(obj, Part::Main, |s| s.text_font = Some(FontId::RobotoMed18))?;
        w.add_flag(obj, Flags::HIDDEN)?;
        *field = Some(obj);
    }
    Ok(())
}

fn build(w: &mut Widgets, o: &mut Objects, state: FlowState) -> Result<(), UiError> {
    let obj = w.create_container(None)?;
    o.main = Some(obj);
    w.set_size(obj, Length::Px(800), Length::Px(480))?;
    w.clear_flag(obj, Flags::SCROLLABLE)?;
    w.set_local_style(obj, Part::Main, |s| s.bg_color = Some(COLOR_BACKGROUND))?;
    let root = obj;

    build_inverter(w, o, root, state)?;
    build_solar(w, o, root, state)?;

    let obj = w.create_button(root)?;
    o.go_config = Some(obj);
    w.set_pos(obj, 744, 8)?;
    w.set_size(obj, Length::Px(48), Length::Px(48))?;
    w.set_local_style(obj, Part::Main, |s| {
        s.bg_opa = Some(0);
        s.border_width = Some(0);
    })?;
    let icon = image(w, obj, 0, 0, ImageId::Settings)?;
    center(w, icon)?;
    Ok(())
}

fn clear(o: &mut Objects) {
    o.main = None;
    o.inverter_container = None;
    o.inv_switch = None;
    o.ac_watts_arc = None;
    o.ac_watts = None;
    o.inv_mode = None;
    o.inv_error = None;
    o.solar_container = None;
    o.solar_arc = None;
    o.soc_arc = None;
    o.batt_indicator_image = None;
    o.soc_unknown_container = None;
    o.soc_container = None;
    o.batt_soc = None;
    o.batt_volt = None;
    o.batt_amp = None;
    o.batt_temp = None;
    o.batt_alarm = None;
    o.solar_watts = None;
    o.solar_yield = None;
    o.solar_mode = None;
    o.solar_error = None;
    o.go_config = None;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MainScreen;

impl Screen for MainScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Main
    }

    fn root(&self, objects: &Objects) -> Option<WidgetId> {
        objects.main
    }

    fn create(&self, ctx: &mut ScreenContext<'_>) -> Result<(), UiError> {
        let state = ctx.flow.get_flow_state(PAGE_MAIN, 0);
        if let Err(e) = build(ctx.widgets, ctx.objects, state) {
            let _ = self.delete(ctx);
            return Err(e);
        }
        self.tick(ctx)
    }

    fn delete(&self, ctx: &mut ScreenContext<'_>) -> Result<(), UiError> {
        let result = delete_root(ctx.widgets, ctx.objects.main);
        clear(ctx.objects);
        ctx.flow.delete_page_flow_state(PAGE_MAIN);
        result
    }

    fn tick(&self, ctx: &mut ScreenContext<'_>) -> Result<(), UiError> {
        let state = ctx.flow.get_flow_state(PAGE_MAIN, 0);
        sync_all(ctx, state, &BINDINGS)
    }
}
