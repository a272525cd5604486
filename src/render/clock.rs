use std::time::{Duration, Instant};

/// Source of "next frame" ticks. The loop's only suspension point.
pub trait FrameClock {
    /// Block until the next frame is due.
    fn wait_for_frame(&mut self);
}

/// Fixed-interval stand-in for display refresh.
#[derive(Clone, Debug)]
pub struct IntervalClock {
    interval: Duration,
    next: Option<Instant>,
}

impl IntervalClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }

    /// Clock ticking `fps` times per second. Non-positive or non-finite rates tick as fast as
    /// possible.
    pub fn from_fps(fps: f64) -> Self {
        let interval = if fps.is_finite() && fps > 0.0 {
            Duration::from_secs_f64(1.0 / fps)
        } else {
            Duration::ZERO
        };
        Self::new(interval)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl FrameClock for IntervalClock {
    fn wait_for_frame(&mut self) {
        let now = Instant::now();
        let due = self.next.unwrap_or(now);
        if due > now {
            std::thread::sleep(due - now);
        }
        // Schedule from the due time, not from wake-up, so the cadence does not drift; if we
        // fell behind by more than a frame, resync instead of bursting.
        let next = due + self.interval;
        self.next = Some(if next < now { now + self.interval } else { next });
    }
}

/// Ticks immediately. For headless rendering and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateClock;

impl FrameClock for ImmediateClock {
    fn wait_for_frame(&mut self) {}
}

#[cfg(test)]
#[path = "../../tests/unit/render/clock.rs"]
mod tests;
