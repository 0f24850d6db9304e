//! Configuration form posted by the setup page while the access point is up.

use alloc::string::String;
use core::fmt::Write;

use log::info;
use serde::Deserialize;

use crate::config::MAX_FORM_LEN;
use crate::devices::{Device, DeviceType, Devices, Key, Mac, EMPTY_ADDR};
use crate::storage::KeyValueStorage;
use crate::util::{parse_key, parse_mac};
use crate::vars::DashboardVars;
use crate::Error;

#[derive(Deserialize, Debug, PartialEq, Eq)]
pub struct ConfigForm<'a> {
    pub mppt_mac: &'a str,
    pub mppt_key: &'a str,
    pub bmv_mac: &'a str,
    pub bmv_key: &'a str,
    pub inv_mac: &'a str,
    pub inv_key: &'a str,
    pub inv_pin: u32,
}

impl<'a> ConfigForm<'a> {
    pub fn parse(body: &'a [u8]) -> Result<Self, Error> {
        if body.len() > MAX_FORM_LEN {
            return Err(Error::PayloadTooLarge(body.len()));
        }
        serde_json::from_slice(body).map_err(|e| {
            info!("Parse error {e:?}");
            Error::Json
        })
    }

    /// Inverter, MPPT and BMV records, in that order. A blank MAC yields an
    /// unconfigured device, which the registry ignores.
    pub fn devices(&self) -> Result<[Device; 3], Error> {
        Ok([
            Device::new(
                DeviceType::Inverter,
                mac_or_empty(self.inv_mac)?,
                key_or_empty(self.inv_key)?,
                Some(self.inv_pin),
            ),
            Device::new(
                DeviceType::Mppt,
                mac_or_empty(self.mppt_mac)?,
                key_or_empty(self.mppt_key)?,
                None,
            ),
            Device::new(
                DeviceType::Bmv,
                mac_or_empty(self.bmv_mac)?,
                key_or_empty(self.bmv_key)?,
                None,
            ),
        ])
    }
}

fn mac_or_empty(s: &str) -> Result<Mac, Error> {
    if s.trim().is_empty() {
        Ok(EMPTY_ADDR)
    } else {
        parse_mac(s)
    }
}

fn key_or_empty(s: &str) -> Result<Key, Error> {
    if s.trim().is_empty() {
        Ok([0; 16])
    } else {
        parse_key(s)
    }
}

/// Applies a posted form to the registry. The response lists one outcome per
/// device, e.g. `"inv added, mppt has 0 mac, ignoring, bmv updated"`.
pub fn handle_config_post<S: KeyValueStorage>(
    body: &[u8],
    devices: &mut Devices<S>,
    vars: &mut DashboardVars,
) -> Result<String, Error> {
    let form = ConfigForm::parse(body)?;
    let parsed = form.devices()?;

    let mut resp = String::new();
    for (index, device) in parsed.into_iter().enumerate() {
        let outcome = devices.add_device(device, vars);
        if index > 0 {
            resp.push_str(", ");
        }
        let _ = write!(resp, "{} {}", device.device_type(), outcome);
    }
    info!("Config post: {resp}");
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    const FORM: &str = r#"{
        "mppt_mac": "",
        "mppt_key": "",
        "bmv_mac": "aa:bb:cc:dd:ee:ff",
        "bmv_key": "00112233445566778899aabbccddeeff",
        "inv_mac": "01-02-03-04-05-06",
        "inv_key": "ffeeddccbbaa99887766554433221100",
        "inv_pin": 123456
    }"#;

    #[test]
    fn parses_borrowed_fields() {
        let form = ConfigForm::parse(FORM.as_bytes()).unwrap();
        assert_eq!(form.inv_pin, 123456);
        assert_eq!(form.bmv_mac, "aa:bb:cc:dd:ee:ff");

        let [inv, mppt, bmv] = form.devices().unwrap();
        assert_eq!(inv.addr(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(inv.pin(), Some(123456));
        assert!(!mppt.is_configured());
        assert_eq!(bmv.pin(), None);
    }

    #[test]
    fn rejects_oversized_and_malformed_bodies() {
        let big = [b' '; MAX_FORM_LEN + 1];
        assert!(matches!(
            ConfigForm::parse(&big),
            Err(Error::PayloadTooLarge(1025))
        ));
        assert!(matches!(ConfigForm::parse(b"{\"inv_pin\": 1}"), Err(Error::Json)));

        let bad_mac = FORM.replace("aa:bb:cc:dd:ee:ff", "aa:bb");
        let form = ConfigForm::parse(bad_mac.as_bytes()).unwrap();
        assert!(matches!(form.devices(), Err(Error::InvalidMac)));
    }

    #[test]
    fn post_reports_each_device() {
        let mut devices = Devices::new();
        let mut vars = DashboardVars::default();
        devices.load(MemoryStorage::new(), &mut vars);

        let resp = handle_config_post(FORM.as_bytes(), &mut devices, &mut vars).unwrap();
        assert_eq!(resp, "inv added, mppt has 0 mac, ignoring, bmv added");
        assert_eq!(devices.num_devices(), 2);
        assert_eq!(vars.config_bmv.key.as_str(), "00112233445566778899AABBCCDDEEFF");

        let resp = handle_config_post(FORM.as_bytes(), &mut devices, &mut vars).unwrap();
        assert_eq!(
            resp,
            "inv already exists, not updated, mppt has 0 mac, ignoring, bmv already exists, not updated"
        );
    }
}
