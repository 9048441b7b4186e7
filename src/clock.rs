use std::time::{Duration, Instant};

/// Fixed-rate frame pacer.
///
/// Sleeps away whatever is left of the frame budget since the previous tick.
/// A frame that overruns its budget is not caught up: the next tick simply
/// starts late.
#[derive(Debug)]
pub struct FrameClock {
    budget: Duration,
    last_tick: Instant,
    fps: u32,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        Self {
            budget: Duration::from_secs(1) / target_fps.max(1),
            last_tick: Instant::now(),
            fps: 0,
        }
    }

    /// Frame rate measured over the last tick
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Time left to sleep after `elapsed` of the frame has been spent
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.budget.saturating_sub(elapsed)
    }

    /// Waits out the rest of the frame and starts the next one
    pub fn tick(&mut self) {
        let pause = self.remaining(self.last_tick.elapsed());
        if !pause.is_zero() {
            std::thread::sleep(pause);
        }

        let now = Instant::now();
        let frame_time = now.duration_since(self.last_tick);
        self.last_tick = now;
        if frame_time.as_micros() > 0 {
            self.fps = (1_000_000 / frame_time.as_micros()) as u32;
        }
    }
}
