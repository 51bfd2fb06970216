use hal::{
    clocks::Clocks,
    gpio::Pin,
    pac::TIM2,
    timer::{Alignment, CountDir, OutputCompare, TimChannel, Timer, TimerConfig, UpdateReqSrc},
};

use speedpulse_algo::{MotorDriver, Rotation};

use super::pinout;

/// Dual H-bridge: TIM2 CH1/CH2 carry the PWM of motor 1/2, two GPIOs per motor set the rotation.
pub struct DualMotorPwm {
    tim: Timer<TIM2>,
    in1: [Pin; 2],
    in2: [Pin; 2],
    enable: Pin,
}

impl DualMotorPwm {
    pub fn new(tim2: TIM2, clock_cfg: &Clocks, freq: u32) -> Self {
        // Edge-aligned PWM, no update interrupt needed
        let timer = Timer::new_tim2(
            tim2,
            freq as f32,
            TimerConfig {
                one_pulse_mode: false,
                update_request_source: UpdateReqSrc::Any,
                auto_reload_preload: true,
                alignment: Alignment::Edge,
                direction: CountDir::Up,
                ..Default::default()
            },
            clock_cfg,
        );

        DualMotorPwm {
            tim: timer,
            in1: [pinout::driver::M1_IN1.init(), pinout::driver::M2_IN1.init()],
            in2: [pinout::driver::M1_IN2.init(), pinout::driver::M2_IN2.init()],
            enable: pinout::driver::ENABLE.init(),
        }
    }

    pub fn begin(&mut self) {
        // Both motors coast with zero duty until the first command
        for ch in 0..2 {
            self.in1[ch].set_low();
            self.in2[ch].set_low();
        }

        self.tim
            .enable_pwm_output(TimChannel::C1, OutputCompare::Pwm1, 0.0);
        self.tim
            .enable_pwm_output(TimChannel::C2, OutputCompare::Pwm1, 0.0);

        pinout::driver::PWM_M1.init();
        pinout::driver::PWM_M2.init();

        self.tim.enable();
        self.enable.set_high();
    }

    fn tim_channel(channel: usize) -> Option<TimChannel> {
        match channel {
            0 => Some(TimChannel::C1),
            1 => Some(TimChannel::C2),
            _ => None,
        }
    }

    fn duty2period(duty: u8, period: u32) -> u32 {
        // Scale 0..=255 onto the timer period
        (duty as u32 * period) / u8::MAX as u32
    }
}

impl MotorDriver for DualMotorPwm {
    fn set_pwm(&mut self, channel: usize, duty: u8) {
        if let Some(tim_ch) = Self::tim_channel(channel) {
            let period = self.tim.get_max_duty();
            self.tim.set_duty(tim_ch, Self::duty2period(duty, period));
        }
    }

    fn set_direction(&mut self, channel: usize, rotation: Rotation) {
        if channel >= self.in1.len() {
            return;
        }
        match rotation {
            Rotation::Forward => {
                self.in2[channel].set_low();
                self.in1[channel].set_high();
            }
            Rotation::Backward => {
                self.in1[channel].set_low();
                self.in2[channel].set_high();
            }
        }
    }

    fn stop(&mut self, channel: usize) {
        if channel >= self.in1.len() {
            return;
        }
        self.in1[channel].set_low();
        self.in2[channel].set_low();
    }
}
