//! Decoded device readings and how they land in [`DashboardVars`].
//!
//! Advertisement decryption happens before this point; the input is the
//! already decoded device state.

use core::fmt::{self, Display, Write};

use crate::util::{digits, truncated};
use crate::vars::{DashboardVars, Text};
use crate::Instant;

const VICTRON: [u8; 2] = [0xE1, 0x02];
const PRODUCT_ADVERTISEMENT: u8 = 0x10;

/// Returns the record part of Victron "instant readout" manufacturer data.
pub fn victron_record(man_data: &[u8]) -> Option<&[u8]> {
    match man_data {
        [a, b, record, ..] if [*a, *b] == VICTRON && *record == PRODUCT_ADVERTISEMENT => {
            Some(&man_data[2..])
        }
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Off,
    LowPower,
    Fault,
    Bulk,
    Absorption,
    Float,
    Storage,
    Equalize,
    Inverting,
    PowerSupply,
    StartingUp,
    RepeatedAbsorption,
    AutoEqualize,
    BatterySafe,
    ExternalControl,
    NotApplicable,
}

impl Mode {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Off,
            1 => Self::LowPower,
            2 => Self::Fault,
            3 => Self::Bulk,
            4 => Self::Absorption,
            5 => Self::Float,
            6 => Self::Storage,
            7 => Self::Equalize,
            9 => Self::Inverting,
            11 => Self::PowerSupply,
            245 => Self::StartingUp,
            246 => Self::RepeatedAbsorption,
            247 => Self::AutoEqualize,
            248 => Self::BatterySafe,
            252 => Self::ExternalControl,
            _ => Self::NotApplicable,
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "Off",
            Self::LowPower => "Low power",
            Self::Fault => "Fault",
            Self::Bulk => "Bulk",
            Self::Absorption => "Absorption",
            Self::Float => "Float",
            Self::Storage => "Storage",
            Self::Equalize => "Equalize",
            Self::Inverting => "Inverting",
            Self::PowerSupply => "Power supply",
            Self::StartingUp => "Starting up",
            Self::RepeatedAbsorption => "Repeated absorption",
            Self::AutoEqualize => "Auto equalize",
            Self::BatterySafe => "Battery safe",
            Self::ExternalControl => "External control",
            Self::NotApplicable => "N/A",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorState {
    NoError,
    BatteryVoltageTooHigh,
    ChargerTemperatureTooHigh,
    ChargerOverCurrent,
    ChargerCurrentReversed,
    BulkTimeLimitExceeded,
    CurrentSensorIssue,
    TerminalsOverheated,
    ConverterIssue,
    InputVoltageTooHigh,
    InputCurrentTooHigh,
    InputShutdownBatteryVoltage,
    InputShutdownCurrentFlow,
    LostCommunication,
    BmsConnectionLost,
    NetworkMisconfigured,
    Other(u8),
    NotApplicable,
}

impl ErrorState {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::NoError,
            2 => Self::BatteryVoltageTooHigh,
            17 => Self::ChargerTemperatureTooHigh,
            18 => Self::ChargerOverCurrent,
            19 => Self::ChargerCurrentReversed,
            20 => Self::BulkTimeLimitExceeded,
            21 => Self::CurrentSensorIssue,
            26 => Self::TerminalsOverheated,
            28 => Self::ConverterIssue,
            33 => Self::InputVoltageTooHigh,
            34 => Self::InputCurrentTooHigh,
            38 => Self::InputShutdownBatteryVoltage,
            39 => Self::InputShutdownCurrentFlow,
            65 => Self::LostCommunication,
            67 => Self::BmsConnectionLost,
            68 => Self::NetworkMisconfigured,
            255 => Self::NotApplicable,
            other => Self::Other(other),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Self::NoError | Self::NotApplicable)
    }
}

impl Display for ErrorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NoError => "No error",
            Self::BatteryVoltageTooHigh => "Battery voltage too high",
            Self::ChargerTemperatureTooHigh => "Charger temperature too high",
            Self::ChargerOverCurrent => "Charger over current",
            Self::ChargerCurrentReversed => "Charger current reversed",
            Self::BulkTimeLimitExceeded => "Bulk time limit exceeded",
            Self::CurrentSensorIssue => "Current sensor issue",
            Self::TerminalsOverheated => "Terminals overheated",
            Self::ConverterIssue => "Converter issue",
            Self::InputVoltageTooHigh => "Input voltage too high",
            Self::InputCurrentTooHigh => "Input current too high",
            Self::InputShutdownBatteryVoltage => "Input shutdown (battery voltage)",
            Self::InputShutdownCurrentFlow => "Input shutdown (current flow)",
            Self::LostCommunication => "Lost communication",
            Self::BmsConnectionLost => "BMS connection lost",
            Self::NetworkMisconfigured => "Network misconfigured",
            Self::Other(code) => return write!(f, "Error {code}"),
            Self::NotApplicable => "N/A",
        };
        f.write_str(text)
    }
}

/// Battery monitor alarm bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlarmReason(pub u16);

impl AlarmReason {
    pub const LOW_VOLTAGE: u16 = 1 << 0;
    pub const HIGH_VOLTAGE: u16 = 1 << 1;
    pub const LOW_SOC: u16 = 1 << 2;
    pub const LOW_STARTER_VOLTAGE: u16 = 1 << 3;
    pub const HIGH_STARTER_VOLTAGE: u16 = 1 << 4;
    pub const LOW_TEMPERATURE: u16 = 1 << 5;
    pub const HIGH_TEMPERATURE: u16 = 1 << 6;
    pub const MID_VOLTAGE: u16 = 1 << 7;
    pub const OVERLOAD: u16 = 1 << 8;
    pub const DC_RIPPLE: u16 = 1 << 9;
    pub const LOW_V_AC_OUT: u16 = 1 << 10;
    pub const HIGH_V_AC_OUT: u16 = 1 << 11;
    pub const SHORT_CIRCUIT: u16 = 1 << 12;
    pub const BMS_LOCKOUT: u16 = 1 << 13;

    const NAMES: [(u16, &'static str); 14] = [
        (Self::LOW_VOLTAGE, "Low voltage"),
        (Self::HIGH_VOLTAGE, "High voltage"),
        (Self::LOW_SOC, "Low SoC"),
        (Self::LOW_STARTER_VOLTAGE, "Low starter voltage"),
        (Self::HIGH_STARTER_VOLTAGE, "High starter voltage"),
        (Self::LOW_TEMPERATURE, "Low temperature"),
        (Self::HIGH_TEMPERATURE, "High temperature"),
        (Self::MID_VOLTAGE, "Mid voltage"),
        (Self::OVERLOAD, "Overload"),
        (Self::DC_RIPPLE, "DC ripple"),
        (Self::LOW_V_AC_OUT, "Low AC out voltage"),
        (Self::HIGH_V_AC_OUT, "High AC out voltage"),
        (Self::SHORT_CIRCUIT, "Short circuit"),
        (Self::BMS_LOCKOUT, "BMS lockout"),
    ];

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl Display for AlarmReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (bit, name) in Self::NAMES {
            if self.0 & bit != 0 {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolarChargerState {
    pub mode: Mode,
    pub error_state: ErrorState,
    pub battery_voltage_v: Option<f32>,
    pub battery_current_a: Option<f32>,
    pub yield_today_kwh: Option<f32>,
    pub pv_power_w: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VeBusState {
    pub mode: Mode,
    pub error: ErrorState,
    pub ac_out_power_w: Option<f32>,
    pub battery_temperature_c: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BatteryMonitorState {
    pub state_of_charge_pct: Option<f32>,
    pub battery_voltage_v: Option<f32>,
    pub battery_current_a: Option<f32>,
    pub alarm_reason: AlarmReason,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeviceState {
    SolarCharger(SolarChargerState),
    VeBus(VeBusState),
    BatteryMonitor(BatteryMonitorState),
}

fn display_text<T: Display>(value: &T) -> Text {
    let mut text = Text::new();
    if write!(text, "{value}").is_err() {
        // Longer than the label can hold; keep what fits.
        let mut buf = heapless::String::<128>::new();
        let _ = write!(buf, "{value}");
        text = truncated(&buf);
    }
    text
}

fn set_error(slot: &mut Option<Text>, error: &ErrorState) {
    if error.is_error() {
        *slot = Some(display_text(error));
    } else if slot.is_some() {
        slot.take();
    }
}

impl DashboardVars {
    /// Folds a decoded reading into the variables.
    pub fn apply_device_state(&mut self, state: &DeviceState, now: Instant) {
        match state {
            DeviceState::SolarCharger(state) => {
                log::debug!("Read mppt: {state:?}");

                self.solar_watts = state.pv_power_w.unwrap_or(0_f32) as i32;
                self.solar_yield = (state.yield_today_kwh.unwrap_or(0_f32) * 1_000.0) as i32;

                if state.mode != Mode::NotApplicable {
                    self.solar_mode = Some(display_text(&state.mode));
                }
                set_error(&mut self.solar_error, &state.error_state);
            }
            DeviceState::VeBus(state) => {
                log::debug!("Read VeBus: {state:?}");

                // Give it a few seconds after switching the inverter before reading state again
                if !self.inverter.debounce_active(now) {
                    match state.mode {
                        Mode::Off => {
                            self.inverter.report(false);
                            self.inv_mode = None;
                        }
                        Mode::Inverting => {
                            self.inverter.report(true);
                            self.inv_mode = None;
                        }
                        mode => self.inv_mode = Some(display_text(&mode)),
                    }
                    self.inverter.clear_debounce();
                }

                self.batt_temp = state.battery_temperature_c.unwrap_or(0_f32) as i32;
                self.ac_watts = state.ac_out_power_w.unwrap_or(0_f32) as i32;
                set_error(&mut self.inv_error, &state.error);
            }
            DeviceState::BatteryMonitor(state) => {
                log::debug!("Read Batt: {state:?}");

                self.batt_soc = state.state_of_charge_pct.map(|soc| digits(soc, false));
                self.batt_volt = digits(state.battery_voltage_v.unwrap_or(0_f32), true);
                self.batt_amp = digits(state.battery_current_a.unwrap_or(0_f32), true);

                if !state.alarm_reason.is_empty() {
                    self.batt_alarm = Some(display_text(&state.alarm_reason));
                } else if self.batt_alarm.is_some() {
                    self.batt_alarm.take();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vars::text_or_empty;

    fn at(ms: u64) -> Instant {
        Instant::from_ticks(ms)
    }

    fn ve_bus(mode: Mode) -> DeviceState {
        DeviceState::VeBus(VeBusState {
            mode,
            error: ErrorState::NoError,
            ac_out_power_w: Some(230.7),
            battery_temperature_c: Some(21.9),
        })
    }

    #[test]
    fn recognises_victron_records() {
        assert_eq!(victron_record(&[0xE1, 0x02, 0x10, 0xAA]), Some(&[0x10, 0xAA][..]));
        assert_eq!(victron_record(&[0xE1, 0x02, 0x11, 0xAA]), None);
        assert_eq!(victron_record(&[0x4C, 0x00, 0x10]), None);
        assert_eq!(victron_record(&[0xE1]), None);
    }

    #[test]
    fn solar_charger_updates_and_clears_error() {
        let mut vars = DashboardVars::default();
        let mut state = SolarChargerState {
            mode: Mode::Bulk,
            error_state: ErrorState::ChargerTemperatureTooHigh,
            battery_voltage_v: Some(13.2),
            battery_current_a: Some(4.0),
            yield_today_kwh: Some(1.234),
            pv_power_w: Some(187.6),
        };
        vars.apply_device_state(&DeviceState::SolarCharger(state), at(0));
        assert_eq!(vars.solar_watts, 187);
        assert_eq!(vars.solar_yield, 1234);
        assert_eq!(text_or_empty(&vars.solar_mode), "Bulk");
        assert_eq!(text_or_empty(&vars.solar_error), "Charger temperature too high");

        state.mode = Mode::NotApplicable;
        state.error_state = ErrorState::NoError;
        state.pv_power_w = None;
        vars.apply_device_state(&DeviceState::SolarCharger(state), at(10));
        assert_eq!(vars.solar_watts, 0);
        assert_eq!(text_or_empty(&vars.solar_mode), "Bulk");
        assert_eq!(vars.solar_error, None);
    }

    #[test]
    fn ve_bus_mode_drives_switch_outside_debounce() {
        let mut vars = DashboardVars::default();
        vars.apply_device_state(&ve_bus(Mode::Inverting), at(0));
        assert!(vars.inv_switch());
        assert_eq!(vars.inverter.pending_command(), None);
        assert_eq!(vars.ac_watts, 230);
        assert_eq!(vars.batt_temp, 21);

        // user switched off, command written, link dropped
        vars.set_inv_switch(false);
        vars.inverter.command_written();
        vars.inverter.disconnected(at(1_000));

        // stale advertisement still says inverting
        vars.apply_device_state(&ve_bus(Mode::Inverting), at(2_000));
        assert!(!vars.inv_switch());

        vars.apply_device_state(&ve_bus(Mode::Off), at(5_000));
        assert!(!vars.inv_switch());
        assert!(!vars.inverter.debounce_active(at(5_001)));

        vars.apply_device_state(&ve_bus(Mode::Fault), at(6_000));
        assert_eq!(text_or_empty(&vars.inv_mode), "Fault");
    }

    #[test]
    fn off_or_inverting_clears_mode_text() {
        let mut vars = DashboardVars::default();
        vars.apply_device_state(&ve_bus(Mode::Fault), at(0));
        assert_eq!(text_or_empty(&vars.inv_mode), "Fault");

        vars.apply_device_state(&ve_bus(Mode::Off), at(1_000));
        assert_eq!(vars.inv_mode, None);

        vars.apply_device_state(&ve_bus(Mode::LowPower), at(2_000));
        vars.apply_device_state(&ve_bus(Mode::Inverting), at(3_000));
        assert_eq!(vars.inv_mode, None);
    }

    #[test]
    fn battery_monitor_truncates_and_reports_alarm() {
        let mut vars = DashboardVars::default();
        assert_eq!(vars.batt_soc, None);

        let mut state = BatteryMonitorState {
            state_of_charge_pct: Some(87.56),
            battery_voltage_v: Some(13.456),
            battery_current_a: Some(-2.349),
            alarm_reason: AlarmReason(AlarmReason::LOW_VOLTAGE | AlarmReason::LOW_SOC),
        };
        vars.apply_device_state(&DeviceState::BatteryMonitor(state), at(0));
        assert_eq!(vars.batt_soc, Some(87.5));
        assert_eq!(vars.batt_volt, 13.45);
        assert_eq!(vars.batt_amp, -2.34);
        assert_eq!(text_or_empty(&vars.batt_alarm), "Low voltage | Low SoC");

        state.alarm_reason = AlarmReason::default();
        state.state_of_charge_pct = None;
        vars.apply_device_state(&DeviceState::BatteryMonitor(state), at(10));
        assert_eq!(vars.batt_alarm, None);
        assert_eq!(vars.batt_soc, None);
    }

    #[test]
    fn unknown_codes_fall_back() {
        assert_eq!(Mode::from_code(200), Mode::NotApplicable);
        assert_eq!(ErrorState::from_code(99), ErrorState::Other(99));
        assert!(!ErrorState::from_code(255).is_error());
    }
}
