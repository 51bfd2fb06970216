//! SpeedEstimator converts tick-counter deltas sampled at a fixed cadence into angular speed
//! (degrees/second) and accumulates the travelled angle between distance queries.
use super::tick_counter::TickCounter;
use crate::config::EncoderConfig;
use crate::error::ConfigError;

/// Largest per-sample tick delta accepted as a real measurement.
/// Anything at or beyond it is treated as sensor noise or counter rollover.
pub const MAX_TICKS_PER_SAMPLE: u32 = 100_000;

pub struct SpeedEstimator<'a> {
    counter: &'a TickCounter, // Shared counter written by the edge interrupt
    deg_per_tick: f32,        // 360 / ticks per revolution
    intervals: f32,           // Sampling intervals per second
    delta_time_us: u32,       // Sampling interval
    last_count: i32,          // Counter snapshot of the previous sample
    total_ticks: i32,         // Ticks accumulated since the last distance query
    speed: f32,               // Last known good speed
}

impl<'a> SpeedEstimator<'a> {
    /// Create new speed estimator. The current count becomes the baseline of the first sample.
    pub fn new(counter: &'a TickCounter, config: EncoderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            counter,
            deg_per_tick: config.deg_per_tick(),
            intervals: config.intervals_per_sec(),
            delta_time_us: config.delta_time_us,
            last_count: counter.snapshot(),
            total_ticks: 0,
            speed: 0.0,
        })
    }

    /// Math call. Must run exactly every `delta_time_us`; returns the speed in degrees/second.
    pub fn sample(&mut self) -> f32 {
        // Atomic snapshot, the edge interrupt may preempt us at any point
        let count = self.counter.snapshot();

        // Ticks passed since the previous sample, rollover of the counter cancels out here
        let count_diff = count.wrapping_sub(self.last_count);
        self.last_count = count;

        // Distance keeps every tick, plausible or not
        self.total_ticks = self.total_ticks.wrapping_add(count_diff);

        if count_diff.unsigned_abs() < MAX_TICKS_PER_SAMPLE {
            let ticks_per_sec = count_diff as f32 * self.intervals;
            self.speed = ticks_per_sec * self.deg_per_tick;
        } else {
            log_warn!(
                "encoder: implausible delta of {} ticks, holding {} deg/s",
                count_diff,
                self.speed
            );
        }

        self.speed
    }

    /// Degrees travelled since the previous call. Resets the accumulator, so a second call
    /// without new ticks returns zero. Call often enough for the accumulator not to wrap.
    pub fn get_distance(&mut self) -> f32 {
        let distance = self.total_ticks as f32 * self.deg_per_tick;
        self.total_ticks = 0;
        distance
    }

    // Getter for the last known good speed, does not sample
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn deg_per_tick(&self) -> f32 {
        self.deg_per_tick
    }

    pub fn delta_time_us(&self) -> u32 {
        self.delta_time_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_SECOND: u32 = 1_000_000;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn rejects_zero_ticks_per_revolution() {
        let counter = TickCounter::new();
        let estimator = SpeedEstimator::new(&counter, EncoderConfig::new(0, ONE_SECOND));
        assert!(matches!(estimator, Err(ConfigError::ZeroTicksPerRevolution)));
    }

    #[test]
    fn keeps_sample_period_of_its_config() {
        let counter = TickCounter::new();
        let estimator = SpeedEstimator::new(&counter, EncoderConfig::new(1200, 10_000)).unwrap();
        assert_eq!(estimator.delta_time_us(), 10_000);
        assert!(close(estimator.deg_per_tick(), 0.3));
    }

    #[test]
    fn ten_ticks_per_second_at_100_ticks_per_rev() {
        let counter = TickCounter::new();
        let mut estimator = SpeedEstimator::new(&counter, EncoderConfig::new(100, ONE_SECOND)).unwrap();
        assert!(close(estimator.deg_per_tick(), 3.6));

        counter.preset(10);
        assert!(close(estimator.sample(), 36.0));
    }

    #[test]
    fn speed_is_signed() {
        let counter = TickCounter::new();
        let mut estimator = SpeedEstimator::new(&counter, EncoderConfig::new(360, 10_000)).unwrap();

        counter.preset(-5);
        // 5 ticks in 10 ms is 500 ticks/s, one degree each
        assert!(close(estimator.sample(), -500.0));
    }

    #[test]
    fn first_sample_starts_from_construction_count() {
        let counter = TickCounter::new();
        counter.preset(5_000);
        let mut estimator = SpeedEstimator::new(&counter, EncoderConfig::new(100, ONE_SECOND)).unwrap();

        assert!(close(estimator.sample(), 0.0));
        assert!(close(estimator.get_distance(), 0.0));
    }

    #[test]
    fn implausible_delta_holds_previous_speed() {
        let counter = TickCounter::new();
        let mut estimator = SpeedEstimator::new(&counter, EncoderConfig::new(100, ONE_SECOND)).unwrap();

        counter.preset(10);
        let good = estimator.sample();

        counter.preset(10 + 100_000);
        assert_eq!(estimator.sample(), good);

        counter.preset(10 + 100_000 - 250_000);
        assert_eq!(estimator.sample(), good);
        assert_eq!(estimator.speed(), good);
    }

    #[test]
    fn implausible_first_delta_holds_zero() {
        let counter = TickCounter::new();
        let mut estimator = SpeedEstimator::new(&counter, EncoderConfig::new(100, ONE_SECOND)).unwrap();

        counter.preset(-100_000);
        assert_eq!(estimator.sample(), 0.0);
        assert_eq!(estimator.speed(), 0.0);

        // The next plausible delta is measured from the rejected count
        counter.preset(-100_000 + 10);
        assert!(close(estimator.sample(), 36.0));
    }

    #[test]
    fn counter_rollover_is_a_small_delta() {
        let counter = TickCounter::new();
        counter.preset(i32::MAX - 4);
        let mut estimator = SpeedEstimator::new(&counter, EncoderConfig::new(100, ONE_SECOND)).unwrap();

        for _ in 0..10 {
            counter.step(1);
        }
        assert_eq!(counter.snapshot(), i32::MIN + 5);
        assert!(close(estimator.sample(), 36.0));
    }

    #[test]
    fn distance_is_consumed_on_read() {
        let counter = TickCounter::new();
        let mut estimator = SpeedEstimator::new(&counter, EncoderConfig::new(100, ONE_SECOND)).unwrap();

        counter.preset(25);
        estimator.sample();
        counter.preset(50);
        estimator.sample();

        let first = estimator.get_distance();
        assert!(close(first, 180.0));
        assert_eq!(estimator.get_distance(), 0.0);
    }

    #[test]
    fn distance_includes_rejected_samples() {
        let counter = TickCounter::new();
        let mut estimator = SpeedEstimator::new(&counter, EncoderConfig::new(360, ONE_SECOND)).unwrap();

        counter.preset(-150_000);
        estimator.sample();
        assert!(close(estimator.get_distance(), -150_000.0));
    }
}
