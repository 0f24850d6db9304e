use crate::devices::DeviceType;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("storage error: {0}")]
    Storage(&'static str),
    #[error("failed to serialize {0}")]
    Serialize(DeviceType),
    #[error("failed to deserialize {0}")]
    Deserialize(DeviceType),
    #[error("invalid mac address")]
    InvalidMac,
    #[error("invalid key, expected 32 hex digits")]
    InvalidKey,
    #[error("request too big ({0} bytes)")]
    PayloadTooLarge(usize),
    #[error("json error")]
    Json,
}
