use crate::{animation::ease::Ease, foundation::core::Millis};

/// A timed `0 -> 1` animation anchored at a start time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tween {
    pub start: Millis,
    pub duration: Millis,
    pub ease: Ease,
}

impl Tween {
    pub fn new(start: Millis, duration: Millis, ease: Ease) -> Self {
        Self {
            start,
            duration,
            ease,
        }
    }

    /// Time at which the tween reaches 1.
    pub fn end(&self) -> Millis {
        self.start + self.duration
    }

    /// Linear progress in `[0, 1]`.
    pub fn raw(&self, now: Millis) -> f64 {
        now.since(self.start).fraction_of(self.duration)
    }

    /// Eased progress in `[0, 1]`; non-decreasing in `now`.
    pub fn value(&self, now: Millis) -> f64 {
        self.ease.apply(self.raw(now))
    }

    /// Eased `1 -> 0` fade; non-increasing in `now` and exactly 0 once the tween ends.
    pub fn fade_out(&self, now: Millis) -> f64 {
        1.0 - self.value(now)
    }

    pub fn is_done(&self, now: Millis) -> bool {
        now >= self.end()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
