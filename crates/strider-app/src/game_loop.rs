//! Fixed-timestep loop implementing the "Fix Your Timestep" pattern.
//!
//! Decouples simulation (fixed rate) from presentation (variable rate) using an
//! accumulator. The caller supplies each frame's elapsed time, so the same
//! loop drives a wall-clock window and a headless replay alike.

use tracing::warn;

/// Fixed-timestep accumulator state.
#[derive(Debug, Clone)]
pub struct FixedStepLoop {
    fixed_dt: f64,
    max_frame_time: f64,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl FixedStepLoop {
    /// Creates a loop ticking at `tick_rate` Hz that never catches up on more
    /// than `max_frame_time` seconds per frame.
    #[must_use]
    pub fn new(tick_rate: u32, max_frame_time: f64) -> Self {
        Self {
            fixed_dt: 1.0 / f64::from(tick_rate.max(1)),
            max_frame_time,
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Runs one frame of `frame_time` seconds.
    ///
    /// `update_fn(fixed_dt, tick_index)` is called zero or more times at the
    /// fixed rate. Returns the interpolation alpha in `[0.0, 1.0)`.
    pub fn advance(&mut self, frame_time: f64, mut update_fn: impl FnMut(f64, u64)) -> f64 {
        let mut frame_time = frame_time.max(0.0);
        // Clamp frame time to prevent spiral of death
        if frame_time > self.max_frame_time {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                self.max_frame_time * 1000.0
            );
            frame_time = self.max_frame_time;
        }

        self.accumulator += frame_time;

        while self.accumulator >= self.fixed_dt {
            update_fn(self.fixed_dt, self.update_count);
            self.total_sim_time += self.fixed_dt;
            self.accumulator -= self.fixed_dt;
            self.update_count += 1;
        }

        self.frame_count += 1;
        self.alpha()
    }

    /// Returns the current interpolation alpha without running a frame.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / self.fixed_dt
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    /// Returns the total number of frames advanced.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the total number of simulation update steps executed.
    #[must_use]
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Returns the total simulation time in seconds.
    #[must_use]
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    fn loop_60() -> FixedStepLoop {
        FixedStepLoop::new(60, 0.25)
    }

    #[test]
    fn test_fixed_dt_value() {
        assert!((loop_60().fixed_dt() - DT).abs() < f64::EPSILON * 10.0);
    }

    #[test]
    fn test_accumulator_single_step() {
        let mut l = loop_60();
        let mut updates = 0u32;
        l.advance(DT, |_, _| updates += 1);
        assert_eq!(updates, 1);
        assert!(l.accumulator.abs() < 1e-12);
    }

    #[test]
    fn test_accumulator_multiple_steps() {
        let mut l = loop_60();
        let mut ticks = Vec::new();
        l.advance(3.0 * DT + 1e-9, |_, tick| ticks.push(tick));
        assert_eq!(ticks, vec![0, 1, 2]);
        assert!((l.total_sim_time() - 3.0 * DT).abs() < 1e-12);
    }

    #[test]
    fn test_accumulator_partial() {
        let mut l = loop_60();
        let mut updates = 0u32;
        let alpha = l.advance(0.5 * DT, |_, _| updates += 1);
        assert_eq!(updates, 0);
        assert!((alpha - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_max_frame_time_clamp() {
        let mut l = loop_60();
        let mut updates = 0u32;
        l.advance(1.0, |_, _| updates += 1);
        let max_updates = (0.25 / DT).ceil() as u32;
        assert!(
            updates <= max_updates,
            "Expected at most {max_updates} updates, got {updates}"
        );
        assert!(updates > 0);
    }

    #[test]
    fn test_faster_frames_than_ticks() {
        // 144 Hz presentation over a 60 Hz simulation for one second
        let mut l = loop_60();
        for _ in 0..144 {
            l.advance(1.0 / 144.0, |_, _| {});
        }
        assert_eq!(l.frame_count(), 144);
        assert!((59..=60).contains(&l.update_count()));
    }

    #[test]
    fn test_negative_frame_time_is_ignored() {
        let mut l = loop_60();
        let mut updates = 0u32;
        let alpha = l.advance(-1.0, |_, _| updates += 1);
        assert_eq!(updates, 0);
        assert_eq!(alpha, 0.0);
        assert_eq!(l.frame_count(), 1);
    }

    #[test]
    fn test_total_sim_time_tracks_updates() {
        let mut l = loop_60();
        for _ in 0..10 {
            l.advance(DT * 2.0, |_, _| {});
        }
        let expected = l.update_count() as f64 * DT;
        assert!((l.total_sim_time() - expected).abs() < 1e-10);
    }

    #[test]
    fn test_zero_tick_rate_uses_one_hz() {
        let l = FixedStepLoop::new(0, 2.0);
        assert_eq!(l.fixed_dt(), 1.0);
    }
}
