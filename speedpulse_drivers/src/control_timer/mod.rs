use hal::{
    clocks::Clocks,
    pac::TIM3,
    timer::{Timer, TimerConfig, TimerInterrupt},
};

use speedpulse_algo::EncoderConfig;

/// Periodic interrupt source of the control loop (TIM3 update).
///
/// The frequency is derived from the encoder configuration, so the loop runs at exactly the
/// cadence the speed conversion assumes.
pub struct ControlTimer {
    tim: Timer<TIM3>,
}

impl ControlTimer {
    pub fn new(tim3: TIM3, clock_cfg: &Clocks, encoder: &EncoderConfig) -> Self {
        let mut timer = Timer::new_tim3(
            tim3,
            encoder.sample_frequency_hz(),
            TimerConfig::default(),
            clock_cfg,
        );
        // Enable update interrupt for the timer
        timer.enable_interrupt(TimerInterrupt::Update);

        ControlTimer { tim: timer }
    }

    pub fn start(&mut self) {
        self.tim.enable();
    }

    /// Acknowledges the update interrupt; call first thing in the handler.
    #[inline(always)]
    pub fn clear(&mut self) {
        self.tim.clear_interrupt(TimerInterrupt::Update);
    }
}
