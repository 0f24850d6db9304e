//! Native variables the screens are bound to.
//!
//! Telemetry, the device registry and the controller write here; the flow
//! bindings read from here on every tick.

use heapless::String;

use crate::config::DEFAULT_BACKLIGHT_DELAY_SECS;
use crate::devices::{Device, DeviceType};
use crate::inverter::InverterSwitch;
use crate::util::{format_key, format_mac, format_pin, truncated};

pub type Text = String<64>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceConfigText {
    pub mac: String<17>,
    pub key: String<32>,
    pub pin: String<6>,
}

#[derive(Clone, Debug)]
pub struct DashboardVars {
    pub inverter: InverterSwitch,
    pub inv_mode: Option<Text>,
    pub inv_error: Option<Text>,
    pub ac_watts: i32,

    /// `None` until a battery monitor reported a state of charge.
    pub batt_soc: Option<f32>,
    pub batt_volt: f32,
    pub batt_amp: f32,
    pub batt_temp: i32,
    pub batt_alarm: Option<Text>,

    pub solar_watts: i32,
    /// Watt hours harvested today.
    pub solar_yield: i32,
    pub solar_mode: Option<Text>,
    pub solar_error: Option<Text>,

    pub ip_addr: Option<Text>,
    pub backlight_delay: i32,

    pub config_inv: DeviceConfigText,
    pub config_mppt: DeviceConfigText,
    pub config_bmv: DeviceConfigText,
}

impl Default for DashboardVars {
    fn default() -> Self {
        Self {
            inverter: InverterSwitch::default(),
            inv_mode: None,
            inv_error: None,
            ac_watts: 0,
            batt_soc: None,
            batt_volt: 0.0,
            batt_amp: 0.0,
            batt_temp: 0,
            batt_alarm: None,
            solar_watts: 0,
            solar_yield: 0,
            solar_mode: None,
            solar_error: None,
            ip_addr: None,
            backlight_delay: DEFAULT_BACKLIGHT_DELAY_SECS as i32,
            config_inv: DeviceConfigText::default(),
            config_mppt: DeviceConfigText::default(),
            config_bmv: DeviceConfigText::default(),
        }
    }
}

/// Empty string for unset text variables.
pub fn text_or_empty(value: &Option<Text>) -> &str {
    value.as_ref().map(|s| s.as_str()).unwrap_or("")
}

impl DashboardVars {
    pub fn inv_switch(&self) -> bool {
        self.inverter.is_on()
    }

    pub fn set_inv_switch(&mut self, on: bool) {
        self.inverter.request(on);
    }

    pub fn set_backlight_delay(&mut self, secs: i32) {
        self.backlight_delay = secs;
    }

    /// `" vicmon.local (192.168.71.1)"`
    pub fn set_ip_addr(&mut self, hostname: &str, ip: [u8; 4]) {
        let mut text = Text::new();
        let _ = ufmt::uwrite!(
            text,
            " {}.local ({}.{}.{}.{})",
            hostname,
            ip[0],
            ip[1],
            ip[2],
            ip[3]
        );
        self.ip_addr = Some(text);
    }

    pub fn set_ip_message(&mut self, message: &str) {
        self.ip_addr = Some(truncated(message));
    }

    pub fn clear_ip_addr(&mut self) {
        self.ip_addr = None;
    }

    pub fn device_config(&self, device_type: DeviceType) -> &DeviceConfigText {
        match device_type {
            DeviceType::Inverter => &self.config_inv,
            DeviceType::Mppt => &self.config_mppt,
            DeviceType::Bmv => &self.config_bmv,
        }
    }

    /// Publishes a device's address, key and (inverter only) PIN for the config screen.
    pub fn config_device(&mut self, device: &Device) {
        let config = match device.device_type() {
            DeviceType::Inverter => &mut self.config_inv,
            DeviceType::Mppt => &mut self.config_mppt,
            DeviceType::Bmv => &mut self.config_bmv,
        };
        config.mac = format_mac(device.addr());
        config.key = format_key(device.key());
        config.pin = match device.device_type() {
            DeviceType::Inverter => format_pin(device.pin().unwrap_or(0)),
            _ => String::new(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_text_matches_hostname_format() {
        let mut vars = DashboardVars::default();
        vars.set_ip_addr("vicmon", [192, 168, 71, 1]);
        assert_eq!(text_or_empty(&vars.ip_addr), " vicmon.local (192.168.71.1)");
        vars.clear_ip_addr();
        assert_eq!(text_or_empty(&vars.ip_addr), "");
    }

    #[test]
    fn config_device_publishes_strings() {
        let mut vars = DashboardVars::default();
        let device = Device::new(
            DeviceType::Inverter,
            [1, 2, 3, 4, 5, 6],
            [0xab; 16],
            Some(42),
        );
        vars.config_device(&device);
        assert_eq!(vars.config_inv.mac.as_str(), "01:02:03:04:05:06");
        assert_eq!(vars.config_inv.key.as_str(), "ABABABABABABABABABABABABABABABAB");
        assert_eq!(vars.config_inv.pin.as_str(), "000042");

        let mppt = Device::new(DeviceType::Mppt, [9; 6], [0; 16], None);
        vars.config_device(&mppt);
        assert_eq!(vars.device_config(DeviceType::Mppt).pin.as_str(), "");
    }
}
