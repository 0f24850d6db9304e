use core::fmt::{self, Display};

use heapless::FnvIndexMap;
use log::{error, info};
use postcard::{from_bytes, to_slice};
use serde::{Deserialize, Serialize};

use crate::config::DEVICE_RECORD_LEN;
use crate::storage::KeyValueStorage;
use crate::util::{format_key, format_mac};
use crate::vars::DashboardVars;
use crate::Error;

pub type Mac = [u8; 6];
pub type Key = [u8; 16];

pub const EMPTY_ADDR: Mac = [0; 6];

//------------
// Device Type
//------------
#[derive(Serialize, Deserialize, Eq, PartialEq, Clone, Copy, Debug, Hash)]
#[repr(u8)]
pub enum DeviceType {
    Inverter,
    Mppt,
    Bmv,
}

impl DeviceType {
    pub const ALL: [DeviceType; 3] = [DeviceType::Inverter, DeviceType::Mppt, DeviceType::Bmv];

    /// Storage key of the device record.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Inverter => "inv",
            Self::Mppt => "mppt",
            Self::Bmv => "bmv",
        }
    }
}

impl Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

//-------
// Device
//-------
#[derive(Serialize, Deserialize, Eq, PartialEq, Clone, Copy, Debug)]
pub struct Device {
    device_type: DeviceType,
    addr: Mac,
    key: Key,
    pin: Option<u32>,
}

impl Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Device {{ device: {} addr: {}, key: {}, pin: {:?} }}",
            self.device_type,
            format_mac(&self.addr),
            format_key(&self.key),
            self.pin
        )
    }
}

impl Device {
    pub fn new(device_type: DeviceType, addr: Mac, key: Key, pin: Option<u32>) -> Self {
        Self {
            device_type,
            addr,
            key,
            pin,
        }
    }

    pub const fn empty(device_type: DeviceType) -> Self {
        Self {
            device_type,
            addr: EMPTY_ADDR,
            key: [0; 16],
            pin: None,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.addr != EMPTY_ADDR
    }

    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    pub fn addr(&self) -> &Mac {
        &self.addr
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn pin(&self) -> Option<u32> {
        self.pin
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    IgnoredEmptyAddr,
    Unchanged,
    Updated,
    Added,
    NotSaved,
}

impl Display for AddOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::IgnoredEmptyAddr => "has 0 mac, ignoring",
            Self::Unchanged => "already exists, not updated",
            Self::Updated => "updated",
            Self::Added => "added",
            Self::NotSaved => "not saved to storage",
        })
    }
}

//---------
// Devices
//---------
/// The set of devices to get advertisement data from, one per type. Some
/// may be unconfigured (empty address).
pub struct Devices<S> {
    devices: [Device; 3],
    addr_to_device: FnvIndexMap<Mac, DeviceType, 4>,
    storage: Option<S>,
}

impl<S> Default for Devices<S> {
    fn default() -> Self {
        Self {
            devices: DeviceType::ALL.map(Device::empty),
            addr_to_device: FnvIndexMap::new(),
            storage: None,
        }
    }
}

impl<S: KeyValueStorage> Devices<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device(&self, device_type: DeviceType) -> &Device {
        &self.devices[device_type as usize]
    }

    pub fn get_key(&self, addr: &Mac) -> Option<&Key> {
        self.addr_to_device
            .get(addr)
            .map(|device_type| self.device(*device_type).key())
    }

    pub fn get_pin(&self, addr: &Mac) -> Option<u32> {
        self.addr_to_device
            .get(addr)
            .and_then(|device_type| self.device(*device_type).pin())
    }

    pub fn num_devices(&self) -> usize {
        self.addr_to_device.len()
    }

    pub fn add_device(&mut self, device: Device, vars: &mut DashboardVars) -> AddOutcome {
        // Only add a device if the addr is not 'empty'
        if !device.is_configured() {
            info!("Not adding device with invalid addr, {device}");
            return AddOutcome::IgnoredEmptyAddr;
        }

        let existing = self.devices[device.device_type as usize];
        if existing == device {
            info!("{device} already exists");
            return AddOutcome::Unchanged;
        }

        let diff_addr = existing.addr != device.addr;
        if diff_addr {
            self.addr_to_device.remove(&existing.addr);
        }
        // Capacity covers one entry per device type.
        let _ = self.addr_to_device.insert(device.addr, device.device_type);

        let outcome = match self.store_device(&device) {
            Ok(()) if diff_addr => AddOutcome::Added,
            Ok(()) => AddOutcome::Updated,
            Err(e) => {
                error!("Failed to store {device}: {e}");
                AddOutcome::NotSaved
            }
        };

        vars.config_device(&device);
        self.devices[device.device_type as usize] = device;
        info!("Added {device}");

        outcome
    }

    /// Loads whatever records the storage holds. A missing or corrupt record
    /// leaves that slot empty; saving a new configuration recovers it.
    pub fn load(&mut self, storage: S, vars: &mut DashboardVars) {
        let mut buf = [0u8; DEVICE_RECORD_LEN];

        for device_type in DeviceType::ALL {
            match Self::load_device(&storage, device_type, &mut buf) {
                Ok(Some(device)) => {
                    let _ = self.addr_to_device.insert(device.addr, device.device_type);
                    vars.config_device(&device);
                    self.devices[device_type as usize] = device;
                    info!("Loaded device {} {}", device.device_type, format_mac(&device.addr));
                }
                Ok(None) => info!("Device {device_type} not found in storage"),
                Err(e) => error!("{e}"),
            }
            buf.fill(0);
        }

        self.storage = Some(storage);
    }

    pub fn storage(&self) -> Option<&S> {
        self.storage.as_ref()
    }

    fn load_device(
        storage: &S,
        device_type: DeviceType,
        buf: &mut [u8; DEVICE_RECORD_LEN],
    ) -> Result<Option<Device>, Error> {
        match storage.get_raw(device_type.key(), buf)? {
            Some(bytes) => from_bytes::<Device>(bytes)
                .map(Some)
                .map_err(|_| Error::Deserialize(device_type)),
            None => Ok(None),
        }
    }

    fn store_device(&mut self, device: &Device) -> Result<(), Error> {
        let storage = self
            .storage
            .as_mut()
            .ok_or(Error::Storage("storage not set"))?;

        let mut buf = [0u8; DEVICE_RECORD_LEN];
        let bytes =
            to_slice(device, &mut buf).map_err(|_| Error::Serialize(device.device_type))?;
        storage.set_raw(device.device_type.key(), bytes)?;
        info!("Added '{}' to storage {device}", device.device_type);
        Ok(())
    }
}
