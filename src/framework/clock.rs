use std::time::{Duration, Instant};

use log::debug;

#[derive(Clone, Debug)]
pub struct Tick {
    pub order: u64,
    pub time:  Instant,
    pub delta: Duration,
}

/// Clock is a helper struct to perform ticks at a given frequency
///  - it can measure time between ticks
///  - it provides frame timestamps relative to its creation, the way a display refresh callback does
///  - it can measure ticks (updates) per second, not necessarily the same as frames per second
pub struct Clock {
    started:             Instant,
    update_time_window:  Duration,
    next_tick_scheduled: Instant,
    current_tick:        Tick,

    // ticks per second measurement
    elapsed_seconds: f32,
    tick_counter:    u32,
}

impl Clock {
    pub fn now(tick_per_seconds: u32) -> Self {
        Self::starting_at(Instant::now(), tick_per_seconds)
    }

    pub fn starting_at(time: Instant, tick_per_seconds: u32) -> Self {
        Self {
            started:             time,
            update_time_window:  Duration::from_secs_f64(1.0 / f64::from(tick_per_seconds.max(1))),
            next_tick_scheduled: time,
            current_tick: Tick {
                order: 0,
                time,
                delta: Duration::ZERO,
            },
            elapsed_seconds: 0.0,
            tick_counter: 0,
        }
    }

    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Returns true if tick was performed
    /// Tick is performed when `time` reached the next scheduled tick, which is then moved one window ahead
    pub fn tick_at(&mut self, time: Instant) -> bool {
        if self.next_tick_scheduled > time {
            return false;
        }

        // lateness of this tick is subtracted from the next window to keep the frequency
        let lateness = (time - self.next_tick_scheduled).min(self.update_time_window);

        self.current_tick.order += 1;
        self.current_tick.delta = time - self.current_tick.time;
        self.current_tick.time  = time;

        self.next_tick_scheduled = time + self.update_time_window - lateness;

        self.elapsed_seconds += self.current_tick.delta.as_secs_f32();
        self.tick_counter += 1;
        if self.elapsed_seconds > 1.0 {
            debug!("Ticks per second: {}", self.tick_counter);
            self.elapsed_seconds -= 1.0;
            self.tick_counter = 0;
        }
        true
    }

    pub fn current_tick(&self) -> &Tick {
        &self.current_tick
    }

    pub fn next_scheduled_tick(&self) -> &Instant {
        &self.next_tick_scheduled
    }

    /// Milliseconds elapsed since the clock started, used as frame timestamp.
    pub fn elapsed_ms(&self, time: Instant) -> f64 {
        time.saturating_duration_since(self.started).as_secs_f64() * 1000.0
    }
}
