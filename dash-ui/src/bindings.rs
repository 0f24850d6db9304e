//! [`FlowEngine`] backed by the dashboard variables.
//!
//! A static table maps each bound `(page, component, property)` to a native
//! variable expression. Evaluation formats the variable the way the panel
//! shows it; assignment writes back only the variables the user can change.

use heapless::Vec;
use log::{debug, error};
use ufmt::uwrite;

use dash_core::config::{MAX_BACKLIGHT_DELAY_SECS, MIN_BACKLIGHT_DELAY_SECS};
use dash_core::vars::text_or_empty;
use dash_core::{DashboardVars, DeviceType};

use crate::flow::{FlowEngine, FlowState, NameTables, PROP_HIDDEN, PROP_SRC, PROP_VALUE};
use crate::format::{write_fixed, write_kwh};
use crate::images::battery_image;
use crate::screens::{config, main, PAGE_CONFIG, PAGE_MAIN};
use crate::widgets::LabelText;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Native {
    InvSwitch,
    InvMode,
    InvError,
    InvErrorHidden,
    AcWatts,
    AcWattsText,
    SolarWatts,
    SolarWattsText,
    SolarYieldText,
    SolarMode,
    SolarError,
    SolarErrorHidden,
    BattSoc,
    BattSocText,
    BattImage,
    SocKnown,
    SocUnknown,
    BattVoltText,
    BattAmpText,
    BattTempText,
    BattAlarm,
    BattAlarmHidden,
    IpAddr,
    BacklightDelay,
    BacklightDelayText,
    ConfigMac(DeviceType),
    ConfigKey(DeviceType),
    ConfigPin,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NativeValue {
    Bool(bool),
    Int(i32),
    Text(LabelText),
}

impl NativeValue {
    fn text(s: &str) -> Self {
        Self::Text(dash_core::util::truncated(s))
    }

    pub fn as_bool(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Text(s) => !s.is_empty(),
        }
    }

    pub fn as_int(&self) -> i32 {
        match self {
            Self::Bool(b) => *b as i32,
            Self::Int(i) => *i,
            Self::Text(s) => s.parse().unwrap_or(0),
        }
    }

    pub fn into_text(self) -> LabelText {
        let mut text = LabelText::new();
        match self {
            Self::Bool(b) => {
                let _ = text.push_str(if b { "true" } else { "false" });
            }
            Self::Int(i) => {
                let _ = uwrite!(text, "{}", i);
            }
            Self::Text(s) => text = s,
        }
        text
    }
}

fn fixed(value: f32, decimals: u8) -> NativeValue {
    let mut text = LabelText::new();
    let _ = write_fixed(&mut text, value, decimals);
    NativeValue::Text(text)
}

fn int_text(value: i32, unit: &str) -> NativeValue {
    let mut text = LabelText::new();
    let _ = uwrite!(text, "{}{}", value, unit);
    NativeValue::Text(text)
}

impl Native {
    pub fn eval(self, vars: &DashboardVars) -> NativeValue {
        match self {
            Self::InvSwitch => NativeValue::Bool(vars.inv_switch()),
            Self::InvMode => NativeValue::text(text_or_empty(&vars.inv_mode)),
            Self::InvError => NativeValue::text(text_or_empty(&vars.inv_error)),
            Self::InvErrorHidden => NativeValue::Bool(vars.inv_error.is_none()),
            Self::AcWatts => NativeValue::Int(vars.ac_watts),
            Self::AcWattsText => int_text(vars.ac_watts, ""),
            Self::SolarWatts => NativeValue::Int(vars.solar_watts),
            Self::SolarWattsText => int_text(vars.solar_watts, ""),
            Self::SolarYieldText => {
                let mut text = LabelText::new();
                let _ = write_kwh(&mut text, vars.solar_yield);
                NativeValue::Text(text)
            }
            Self::SolarMode => NativeValue::text(text_or_empty(&vars.solar_mode)),
            Self::SolarError => NativeValue::text(text_or_empty(&vars.solar_error)),
            Self::SolarErrorHidden => NativeValue::Bool(vars.solar_error.is_none()),
            Self::BattSoc => NativeValue::Int(vars.batt_soc.map(|soc| soc as i32).unwrap_or(0)),
            Self::BattSocText => fixed(vars.batt_soc.unwrap_or(0.0), 1),
            Self::BattImage => NativeValue::Int(battery_image(vars.batt_soc) as i32),
            // Hidden flags of the SoC value and the "~" placeholder
            Self::SocKnown => NativeValue::Bool(vars.batt_soc.is_some()),
            Self::SocUnknown => NativeValue::Bool(vars.batt_soc.is_none()),
            Self::BattVoltText => fixed(vars.batt_volt, 2),
            Self::BattAmpText => fixed(vars.batt_amp, 2),
            Self::BattTempText => int_text(vars.batt_temp, ""),
            Self::BattAlarm => NativeValue::text(text_or_empty(&vars.batt_alarm)),
            Self::BattAlarmHidden => NativeValue::Bool(vars.batt_alarm.is_none()),
            Self::IpAddr => NativeValue::text(text_or_empty(&vars.ip_addr)),
            Self::BacklightDelay => NativeValue::Int(vars.backlight_delay),
            Self::BacklightDelayText => int_text(vars.backlight_delay, " s"),
            Self::ConfigMac(device_type) => NativeValue::text(&vars.device_config(device_type).mac),
            Self::ConfigKey(device_type) => NativeValue::text(&vars.device_config(device_type).key),
            Self::ConfigPin => NativeValue::text(&vars.config_inv.pin),
        }
    }

    /// Writes `value` back; false for read-only expressions.
    pub fn assign(self, vars: &mut DashboardVars, value: &NativeValue) -> bool {
        match self {
            Self::InvSwitch => vars.set_inv_switch(value.as_bool()),
            Self::BacklightDelay => vars.set_backlight_delay(
                value
                    .as_int()
                    .clamp(MIN_BACKLIGHT_DELAY_SECS, MAX_BACKLIGHT_DELAY_SECS),
            ),
            _ => return false,
        }
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    pub page: u16,
    pub component: u16,
    pub property: u16,
    pub native: Native,
}

const fn bind(page: u16, component: u16, property: u16, native: Native) -> Binding {
    Binding {
        page,
        component,
        property,
        native,
    }
}

pub static BINDINGS: [Binding; 32] = [
    bind(PAGE_MAIN, main::components::INV_SWITCH, PROP_VALUE, Native::InvSwitch),
    bind(PAGE_MAIN, main::components::AC_WATTS_ARC, PROP_VALUE, Native::AcWatts),
    bind(PAGE_MAIN, main::components::AC_WATTS_TEXT, PROP_VALUE, Native::AcWattsText),
    bind(PAGE_MAIN, main::components::INV_MODE, PROP_VALUE, Native::InvMode),
    bind(PAGE_MAIN, main::components::INV_ERROR, PROP_VALUE, Native::InvError),
    bind(PAGE_MAIN, main::components::INV_ERROR, PROP_HIDDEN, Native::InvErrorHidden),
    bind(PAGE_MAIN, main::components::SOLAR_ARC, PROP_VALUE, Native::SolarWatts),
    bind(PAGE_MAIN, main::components::SOC_ARC, PROP_VALUE, Native::BattSoc),
    bind(PAGE_MAIN, main::components::BATT_IMAGE, PROP_SRC, Native::BattImage),
    bind(PAGE_MAIN, main::components::SOC_UNKNOWN, PROP_HIDDEN, Native::SocKnown),
    bind(PAGE_MAIN, main::components::SOC_CONTAINER, PROP_HIDDEN, Native::SocUnknown),
    bind(PAGE_MAIN, main::components::SOC_TEXT, PROP_VALUE, Native::BattSocText),
    bind(PAGE_MAIN, main::components::BATT_VOLT, PROP_VALUE, Native::BattVoltText),
    bind(PAGE_MAIN, main::components::BATT_AMP, PROP_VALUE, Native::BattAmpText),
    bind(PAGE_MAIN, main::components::BATT_TEMP, PROP_VALUE, Native::BattTempText),
    bind(PAGE_MAIN, main::components::SOLAR_YIELD, PROP_VALUE, Native::SolarYieldText),
    bind(PAGE_MAIN, main::components::SOLAR_MODE, PROP_VALUE, Native::SolarMode),
    bind(PAGE_MAIN, main::components::BATT_ALARM, PROP_VALUE, Native::BattAlarm),
    bind(PAGE_MAIN, main::components::BATT_ALARM, PROP_HIDDEN, Native::BattAlarmHidden),
    bind(PAGE_MAIN, main::components::SOLAR_WATTS_TEXT, PROP_VALUE, Native::SolarWattsText),
    bind(PAGE_MAIN, main::components::SOLAR_ERROR, PROP_VALUE, Native::SolarError),
    bind(PAGE_MAIN, main::components::SOLAR_ERROR, PROP_HIDDEN, Native::SolarErrorHidden),
    bind(PAGE_CONFIG, config::components::IP_ADDR, PROP_VALUE, Native::IpAddr),
    bind(PAGE_CONFIG, config::components::BACKLIGHT_SLIDER, PROP_VALUE, Native::BacklightDelay),
    bind(PAGE_CONFIG, config::components::BACKLIGHT_TEXT, PROP_VALUE, Native::BacklightDelayText),
    bind(PAGE_CONFIG, config::components::INV_MAC, PROP_VALUE, Native::ConfigMac(DeviceType::Inverter)),
    bind(PAGE_CONFIG, config::components::INV_KEY, PROP_VALUE, Native::ConfigKey(DeviceType::Inverter)),
    bind(PAGE_CONFIG, config::components::INV_PIN, PROP_VALUE, Native::ConfigPin),
    bind(PAGE_CONFIG, config::components::MPPT_MAC, PROP_VALUE, Native::ConfigMac(DeviceType::Mppt)),
    bind(PAGE_CONFIG, config::components::MPPT_KEY, PROP_VALUE, Native::ConfigKey(DeviceType::Mppt)),
    bind(PAGE_CONFIG, config::components::BMV_MAC, PROP_VALUE, Native::ConfigMac(DeviceType::Bmv)),
    bind(PAGE_CONFIG, config::components::BMV_KEY, PROP_VALUE, Native::ConfigKey(DeviceType::Bmv)),
];

pub fn binding(page: u16, component: u16, property: u16) -> Option<Native> {
    BINDINGS
        .iter()
        .find(|b| b.page == page && b.component == component && b.property == property)
        .map(|b| b.native)
}

const MAX_LIVE_PAGES: usize = 4;

/// The dashboard's flow engine.
pub struct NativeFlow {
    vars: DashboardVars,
    live_pages: Vec<u16, MAX_LIVE_PAGES>,
    names: Option<NameTables>,
    last_error: Option<&'static str>,
    error_count: u32,
}

impl NativeFlow {
    pub fn new(vars: DashboardVars) -> Self {
        Self {
            vars,
            live_pages: Vec::new(),
            names: None,
            last_error: None,
            error_count: 0,
        }
    }

    pub fn vars(&self) -> &DashboardVars {
        &self.vars
    }

    pub fn vars_mut(&mut self) -> &mut DashboardVars {
        &mut self.vars
    }

    pub fn names(&self) -> Option<&NameTables> {
        self.names.as_ref()
    }

    pub fn last_error(&self) -> Option<&'static str> {
        self.last_error
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn is_live(&self, page: u16) -> bool {
        self.live_pages.contains(&page)
    }

    fn report(&mut self, message: &'static str) {
        error!("{}", message);
        self.last_error = Some(message);
        self.error_count = self.error_count.saturating_add(1);
    }

    fn lookup(
        &mut self,
        state: FlowState,
        component: u16,
        property: u16,
        error: &'static str,
    ) -> Option<Native> {
        if !self.is_live(state.page()) {
            self.report(error);
            return None;
        }
        let native = binding(state.page(), component, property);
        if native.is_none() {
            self.report(error);
        }
        native
    }

    fn eval(
        &mut self,
        state: FlowState,
        component: u16,
        property: u16,
        error: &'static str,
    ) -> Option<NativeValue> {
        self.lookup(state, component, property, error)
            .map(|native| native.eval(&self.vars))
    }

    fn assign(
        &mut self,
        state: FlowState,
        component: u16,
        property: u16,
        value: NativeValue,
        error: &'static str,
    ) {
        if let Some(native) = self.lookup(state, component, property, error) {
            if !native.assign(&mut self.vars, &value) {
                debug!("{native:?} is read-only, dropping {value:?}");
            }
        }
    }
}

impl Default for NativeFlow {
    fn default() -> Self {
        Self::new(DashboardVars::default())
    }
}

impl FlowEngine for NativeFlow {
    fn init_names(&mut self, names: &NameTables) {
        debug!(
            "{} screens, {} objects, {} styles",
            names.screens.len(),
            names.objects.len(),
            names.styles.len()
        );
        self.names = Some(*names);
    }

    fn get_flow_state(&mut self, page: u16, flow_index: u16) -> FlowState {
        if !self.is_live(page) && self.live_pages.push(page).is_err() {
            error!("No room for the flow state of page {}", page);
        }
        FlowState::new(page, flow_index)
    }

    fn eval_boolean_property(
        &mut self,
        state: FlowState,
        component: u16,
        property: u16,
        error: &'static str,
    ) -> bool {
        self.eval(state, component, property, error)
            .map(|v| v.as_bool())
            .unwrap_or(false)
    }

    fn eval_integer_property(
        &mut self,
        state: FlowState,
        component: u16,
        property: u16,
        error: &'static str,
    ) -> i32 {
        self.eval(state, component, property, error)
            .map(|v| v.as_int())
            .unwrap_or(0)
    }

    fn eval_text_property(
        &mut self,
        state: FlowState,
        component: u16,
        property: u16,
        error: &'static str,
    ) -> LabelText {
        self.eval(state, component, property, error)
            .map(NativeValue::into_text)
            .unwrap_or_default()
    }

    fn assign_boolean_property(
        &mut self,
        state: FlowState,
        component: u16,
        property: u16,
        value: bool,
        error: &'static str,
    ) {
        self.assign(state, component, property, NativeValue::Bool(value), error);
    }

    fn assign_integer_property(
        &mut self,
        state: FlowState,
        component: u16,
        property: u16,
        value: i32,
        error: &'static str,
    ) {
        self.assign(state, component, property, NativeValue::Int(value), error);
    }

    fn delete_page_flow_state(&mut self, page: u16) {
        self.live_pages.retain(|p| *p != page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::ImageId;

    const ERR: &str = "Failed to evaluate Text in Label widget";

    fn flow() -> (NativeFlow, FlowState) {
        let mut flow = NativeFlow::default();
        let state = flow.get_flow_state(PAGE_MAIN, 0);
        (flow, state)
    }

    fn text(flow: &mut NativeFlow, state: FlowState, component: u16) -> LabelText {
        flow.eval_text_property(state, component, PROP_VALUE, ERR)
    }

    #[test]
    fn bindings_are_unique() {
        for (i, a) in BINDINGS.iter().enumerate() {
            for b in &BINDINGS[i + 1..] {
                assert!(
                    (a.page, a.component, a.property) != (b.page, b.component, b.property),
                    "{a:?} and {b:?}"
                );
            }
        }
    }

    #[test]
    fn readings_are_formatted_for_display() {
        let (mut flow, state) = flow();
        let vars = flow.vars_mut();
        vars.batt_soc = Some(87.5);
        vars.batt_volt = 13.45;
        vars.batt_amp = -2.1;
        vars.batt_temp = 21;
        vars.ac_watts = 350;
        vars.solar_yield = 1250;

        assert_eq!(text(&mut flow, state, main::components::SOC_TEXT), "87.5");
        assert_eq!(text(&mut flow, state, main::components::BATT_VOLT), "13.45");
        assert_eq!(text(&mut flow, state, main::components::BATT_AMP), "-2.10");
        assert_eq!(text(&mut flow, state, main::components::BATT_TEMP), "21");
        assert_eq!(text(&mut flow, state, main::components::AC_WATTS_TEXT), "350");
        assert_eq!(text(&mut flow, state, main::components::SOLAR_YIELD), "1.25 kWh");
        assert_eq!(
            flow.eval_integer_property(state, main::components::SOC_ARC, PROP_VALUE, ERR),
            87
        );
        assert_eq!(flow.last_error(), None);
    }

    #[test]
    fn unknown_soc_swaps_containers() {
        let (mut flow, state) = flow();
        let hidden = |flow: &mut NativeFlow, component| {
            flow.eval_boolean_property(state, component, PROP_HIDDEN, ERR)
        };

        assert!(!hidden(&mut flow, main::components::SOC_UNKNOWN));
        assert!(hidden(&mut flow, main::components::SOC_CONTAINER));
        assert_eq!(
            flow.eval_integer_property(state, main::components::BATT_IMAGE, PROP_SRC, ERR),
            ImageId::BattUnknown as i32
        );

        flow.vars_mut().batt_soc = Some(96.0);
        assert!(hidden(&mut flow, main::components::SOC_UNKNOWN));
        assert!(!hidden(&mut flow, main::components::SOC_CONTAINER));
        assert_eq!(
            flow.eval_integer_property(state, main::components::BATT_IMAGE, PROP_SRC, ERR),
            ImageId::BattFull as i32
        );
    }

    #[test]
    fn only_writable_variables_accept_assignments() {
        let mut flow = NativeFlow::default();
        let main_state = flow.get_flow_state(PAGE_MAIN, 0);
        let config_state = flow.get_flow_state(PAGE_CONFIG, 0);

        flow.assign_boolean_property(main_state, main::components::INV_SWITCH, PROP_VALUE, true, ERR);
        assert!(flow.vars().inv_switch());

        flow.assign_integer_property(main_state, main::components::AC_WATTS_ARC, PROP_VALUE, 900, ERR);
        assert_eq!(flow.vars().ac_watts, 0);

        flow.assign_integer_property(
            config_state,
            config::components::BACKLIGHT_SLIDER,
            PROP_VALUE,
            5000,
            ERR,
        );
        assert_eq!(flow.vars().backlight_delay, MAX_BACKLIGHT_DELAY_SECS);
        assert_eq!(flow.last_error(), None);
    }

    #[test]
    fn failures_report_the_callers_message() {
        let (mut flow, state) = flow();
        assert_eq!(flow.eval_integer_property(state, 99, PROP_VALUE, "no such component"), 0);
        assert_eq!(flow.last_error(), Some("no such component"));

        flow.delete_page_flow_state(PAGE_MAIN);
        assert!(!flow.is_live(PAGE_MAIN));
        assert_eq!(text(&mut flow, state, main::components::SOC_TEXT), "");
        assert_eq!(flow.last_error(), Some(ERR));
        assert_eq!(flow.error_count(), 2);
    }
}
