use crate::config::INVERTER_SWITCH_DEBOUNCE;
use crate::Instant;

/// VE.Bus control frames written to the inverter control characteristic.
pub const TURN_ON_INVERTER: [u8; 8] = [0x06, 0x03, 0x82, 0x19, 0x02, 0x00, 0x41, 0x03];
pub const TURN_OFF_INVERTER: [u8; 8] = [0x06, 0x03, 0x82, 0x19, 0x02, 0x00, 0x41, 0x04];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InverterCommand {
    On,
    Off,
}

impl InverterCommand {
    pub fn frame(&self) -> &'static [u8; 8] {
        match self {
            Self::On => &TURN_ON_INVERTER,
            Self::Off => &TURN_OFF_INVERTER,
        }
    }
}

/// Desired vs. last confirmed inverter state.
///
/// The switch on screen writes `on`; `prev` follows once the command was
/// written (or the inverter reported its mode). While they differ a command
/// is pending.
#[derive(Clone, Copy, Debug, Default)]
pub struct InverterSwitch {
    on: bool,
    prev: bool,
    debounce_since: Option<Instant>,
}

impl InverterSwitch {
    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn request(&mut self, on: bool) {
        if on != self.on {
            log::info!("Inverter switch requested {}", if on { "on" } else { "off" });
        }
        self.on = on;
    }

    pub fn pending_command(&self) -> Option<InverterCommand> {
        match (self.on, self.prev) {
            (true, false) => Some(InverterCommand::On),
            (false, true) => Some(InverterCommand::Off),
            _ => None,
        }
    }

    pub fn command_written(&mut self) {
        log::info!("Setting prev to current {}", self.on);
        self.prev = self.on;
    }

    /// The control connection dropped; ignore reported modes for a while so
    /// a stale advertisement doesn't flip the switch back.
    pub fn disconnected(&mut self, now: Instant) {
        self.debounce_since = Some(now);
    }

    pub fn debounce_active(&self, now: Instant) -> bool {
        self.debounce_since
            .and_then(|since| now.checked_duration_since(since))
            .is_some_and(|elapsed| elapsed <= INVERTER_SWITCH_DEBOUNCE)
    }

    pub fn clear_debounce(&mut self) {
        self.debounce_since = None;
    }

    /// State reported by the inverter itself.
    pub fn report(&mut self, on: bool) {
        self.on = on;
        self.prev = on;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Instant {
        Instant::from_ticks(ms)
    }

    #[test]
    fn toggle_creates_pending_command_until_written() {
        let mut switch = InverterSwitch::default();
        assert_eq!(switch.pending_command(), None);

        switch.request(true);
        assert_eq!(switch.pending_command(), Some(InverterCommand::On));
        assert_eq!(switch.pending_command().unwrap().frame()[7], 0x03);

        switch.command_written();
        assert_eq!(switch.pending_command(), None);

        switch.request(false);
        assert_eq!(switch.pending_command(), Some(InverterCommand::Off));
    }

    #[test]
    fn debounce_lasts_three_seconds() {
        let mut switch = InverterSwitch::default();
        assert!(!switch.debounce_active(at(0)));

        switch.disconnected(at(1_000));
        assert!(switch.debounce_active(at(2_000)));
        assert!(switch.debounce_active(at(4_000)));
        assert!(!switch.debounce_active(at(4_001)));

        switch.clear_debounce();
        assert!(!switch.debounce_active(at(2_000)));
    }
}
