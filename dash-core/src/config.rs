use crate::Duration;

/// Seconds the backlight stays on after the last touch unless configured otherwise.
pub const DEFAULT_BACKLIGHT_DELAY_SECS: u64 = 30;
pub const MIN_BACKLIGHT_DELAY_SECS: i32 = 10;
pub const MAX_BACKLIGHT_DELAY_SECS: i32 = 300;

/// Quiet period after an inverter switch during which reported modes are ignored.
pub const INVERTER_SWITCH_DEBOUNCE: Duration = Duration::secs(3);

/// Buffer size for a serialized device record.
pub const DEVICE_RECORD_LEN: usize = 100;

/// Max payload accepted by the configuration form handler.
pub const MAX_FORM_LEN: usize = 1024;

pub const NVS_NAMESPACE: &str = "vicmon_ns";
pub const WIFI_SSID: &str = "VICMON";
pub const HOSTNAME: &str = "vicmon";
