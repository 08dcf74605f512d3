use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds (clamped).
    pub dt: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,

    /// Average frames per second over the last report interval; set only on
    /// the tick that closes the interval.
    pub rate: Option<f32>,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped so a stall (debugger, minimized window) does not
/// produce a pathological `dt`. Frames are also counted per report interval
/// so the app can log a frame rate periodically.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,

    interval: Duration,
    interval_start: Instant,
    interval_frames: u32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            last: now,
            frame_index: 0,
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
            interval: Duration::from_secs(1),
            interval_start: now,
            interval_frames: 0,
        }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        self.interval_frames += 1;
        let elapsed = now.saturating_duration_since(self.interval_start);
        let rate = (elapsed >= self.interval).then(|| {
            let rate = self.interval_frames as f32 / elapsed.as_secs_f32();
            self.interval_start = now;
            self.interval_frames = 0;
            rate
        });

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            frame_index: self.frame_index,
            rate,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
