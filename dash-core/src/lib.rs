#![no_std]

extern crate alloc;

pub mod backlight;
pub mod config;
pub mod devices;
mod error;
pub mod form;
pub mod inverter;
pub mod storage;
pub mod telemetry;
pub mod util;
pub mod vars;

pub use backlight::{Backlight, BacklightChange};
pub use devices::{AddOutcome, Device, DeviceType, Devices, Key, Mac};
pub use error::Error;
pub use inverter::{InverterCommand, InverterSwitch};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use telemetry::{AlarmReason, BatteryMonitorState, DeviceState, ErrorState, Mode, SolarChargerState, VeBusState};
pub use vars::DashboardVars;

/// Monotonic millisecond clock shared by every timeout in the dashboard.
pub type Instant = fugit::TimerInstantU64<1000>;
pub type Duration = fugit::MillisDurationU64;
