use std::time::Instant;

/// Frame time bookkeeping.
///
/// The last frame timestamp starts at construction time, so the first delta
/// is the time since the owner was created.
#[derive(Debug, Clone)]
pub struct TimeInfo {
    last_frame: Instant,
    dt: f32,
    display_update_interval: f32, // in seconds
    accumulator: f32,
    frame_count: u32,
    display_fps_value: f32,
}

impl Default for TimeInfo {
    fn default() -> Self {
        Self::new(500)
    }
}

impl TimeInfo {
    /// Creates a new TimeInfo with a specified display FPS update interval in milliseconds.
    pub fn new(display_interval_ms: u64) -> Self {
        Self::starting_at(Instant::now(), display_interval_ms)
    }

    pub fn starting_at(start: Instant, display_interval_ms: u64) -> Self {
        Self {
            last_frame: start,
            dt: 0.0,
            display_update_interval: display_interval_ms as f32 / 1000.0,
            accumulator: 0.0,
            frame_count: 0,
            display_fps_value: 0.0,
        }
    }

    /// Advances the clock to `now`.
    ///
    /// This method:
    /// - Computes dt since the last update, an earlier `now` gives a dt of zero.
    /// - Accumulates frames so a smoothed display FPS can be
    ///   published once per display update interval.
    pub fn update_at(&mut self, now: Instant) {
        self.dt = now.saturating_duration_since(self.last_frame).as_secs_f32();
        if now > self.last_frame {
            self.last_frame = now;
        }

        self.accumulator += self.dt;
        self.frame_count += 1;

        if self.accumulator >= self.display_update_interval {
            self.display_fps_value = self.frame_count as f32 / self.accumulator;
            self.accumulator = 0.0;
            self.frame_count = 0;
        }
    }

    /// Returns the delta time (dt) of the last frame in seconds.
    pub fn delta_time(&self) -> f32 {
        self.dt
    }

    #[cfg(test)]
    pub fn last_frame(&self) -> Instant {
        self.last_frame
    }

    /// Returns the instantaneous (raw) frames per second,
    /// calculated as the reciprocal of the last delta time.
    #[cfg(test)]
    pub fn raw_fps(&self) -> f32 {
        if self.dt > 0.0 {
            1.0 / self.dt
        } else {
            0.0
        }
    }

    /// Returns the FPS calculated for display, which is updated
    /// every x milliseconds (as set in the constructor).
    pub fn display_fps(&self) -> f32 {
        self.display_fps_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_first_delta_is_time_since_start() {
        let start = Instant::now();
        let mut time = TimeInfo::starting_at(start, 500);
        assert_eq!(time.delta_time(), 0.0);

        time.update_at(start + Duration::from_millis(250));
        assert!((time.delta_time() - 0.25).abs() < 1e-6);
        assert_eq!(time.last_frame(), start + Duration::from_millis(250));
    }

    #[test]
    fn test_delta_is_never_negative() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut time = TimeInfo::starting_at(start, 500);

        time.update_at(start - Duration::from_millis(100));
        assert_eq!(time.delta_time(), 0.0);
        // the clock does not move backwards either
        assert_eq!(time.last_frame(), start);

        time.update_at(start + Duration::from_millis(100));
        assert!((time.delta_time() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_display_fps_published_per_interval() {
        let start = Instant::now();
        let mut time = TimeInfo::starting_at(start, 100);

        for frame in 1..=11 {
            time.update_at(start + Duration::from_millis(10 * frame));
        }
        assert!((time.display_fps() - 100.0).abs() < 1.0);
        assert!((time.raw_fps() - 100.0).abs() < 1.0);
    }
}
