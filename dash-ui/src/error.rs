#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UiError {
    #[error("widget arena is full")]
    OutOfWidgets,
    #[error("stale widget handle")]
    StaleHandle,
    #[error("too many children")]
    TooManyChildren,
    #[error("too many event callbacks")]
    TooManyCallbacks,
    #[error("event queue is full")]
    EventQueueFull,
    #[error("unknown screen {0}")]
    UnknownScreen(usize),
}
