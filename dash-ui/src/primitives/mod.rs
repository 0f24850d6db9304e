mod gauge;
mod toggle;

pub use gauge::{Gauge, GaugeStyle};
pub use toggle::Toggle;
