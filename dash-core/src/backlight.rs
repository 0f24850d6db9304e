use crate::config::DEFAULT_BACKLIGHT_DELAY_SECS;
use crate::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BacklightChange {
    On,
    Off,
}

/// Turns the panel off after a period without touches.
///
/// The host polls this every ~20 ms and switches the backlight according to
/// the returned change. While suspended (config screen) the light stays on.
#[derive(Clone, Debug)]
pub struct Backlight {
    on_duration: Duration,
    last_touch: Option<Instant>,
    on: bool,
}

impl Backlight {
    /// Starts with the backlight on, as if just touched.
    pub fn new(now: Instant) -> Self {
        Self {
            on_duration: Duration::secs(DEFAULT_BACKLIGHT_DELAY_SECS),
            last_touch: Some(now),
            on: true,
        }
    }

    pub fn on_duration(&self) -> Duration {
        self.on_duration
    }

    pub fn set_delay_secs(&mut self, secs: u64) {
        if secs != self.on_duration.to_secs() {
            log::info!("Backlight delay set to {secs}s");
            self.on_duration = Duration::secs(secs);
        }
    }

    pub fn touch(&mut self, now: Instant) {
        self.last_touch = Some(now);
    }

    /// Stops the timeout; returns true if the light has to be switched back on.
    pub fn suspend(&mut self) -> bool {
        self.last_touch = None;
        let was_off = !self.on;
        self.on = true;
        was_off
    }

    pub fn is_suspended(&self) -> bool {
        self.last_touch.is_none()
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn recent_touch(&self, now: Instant) -> bool {
        self.last_touch
            .and_then(|last| now.checked_duration_since(last))
            .is_some_and(|elapsed| elapsed < self.on_duration)
    }

    pub fn poll(&mut self, now: Instant) -> Option<BacklightChange> {
        if self.is_suspended() {
            return None;
        }

        let touched_recently = self.recent_touch(now);
        if !touched_recently && self.on {
            self.on = false;
            log::debug!("Backlight off");
            Some(BacklightChange::Off)
        } else if touched_recently && !self.on {
            self.on = true;
            log::debug!("Backlight on");
            Some(BacklightChange::On)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: u64) -> Instant {
        Instant::from_ticks(secs * 1_000)
    }

    #[test]
    fn turns_off_after_delay_and_on_after_touch() {
        let mut backlight = Backlight::new(at(0));
        assert_eq!(backlight.poll(at(10)), None);
        assert_eq!(backlight.poll(at(30)), Some(BacklightChange::Off));
        assert_eq!(backlight.poll(at(31)), None);

        backlight.touch(at(40));
        assert_eq!(backlight.poll(at(40)), Some(BacklightChange::On));
        assert!(backlight.is_on());
    }

    #[test]
    fn suspended_backlight_never_times_out() {
        let mut backlight = Backlight::new(at(0));
        assert_eq!(backlight.poll(at(31)), Some(BacklightChange::Off));

        assert!(backlight.suspend());
        assert_eq!(backlight.poll(at(500)), None);
        assert!(backlight.is_on());
        assert!(!backlight.recent_touch(at(500)));
    }

    #[test]
    fn delay_is_configurable() {
        let mut backlight = Backlight::new(at(0));
        backlight.set_delay_secs(60);
        assert_eq!(backlight.poll(at(45)), None);
        assert_eq!(backlight.poll(at(61)), Some(BacklightChange::Off));
    }
}
