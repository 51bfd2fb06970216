//! Open-loop motor test: both motors forward, stop, backward, stop, at a fixed duty.
//! Checks the bridge wiring and that Forward/Backward match the encoder sign convention.

#![no_main]
#![no_std]

use cortex_m::delay::Delay;
use cortex_m_rt::entry;
use hal::{clocks::Clocks, pac};

use defmt_rtt as _; // global logger
use panic_probe as _;

use speedpulse_algo::{MotorDriver, Rotation};
use speedpulse_drivers::motor_pwm::DualMotorPwm;

const PWM_FREQ: u32 = 20_000;
const TEST_DUTY: u8 = 128;
const STEP_MS: u32 = 2000;

#[entry]
fn main() -> ! {
    // Set up CPU peripherals
    let cp = cortex_m::Peripherals::take().unwrap();
    // Set up microcontroller peripherals
    let dp = pac::Peripherals::take().unwrap();

    let clock_cfg = Clocks::default();
    clock_cfg.setup().unwrap();

    let mut delay = Delay::new(cp.SYST, clock_cfg.systick());

    let mut motors = DualMotorPwm::new(dp.TIM2, &clock_cfg, PWM_FREQ);
    motors.begin();

    defmt::println!("Basic motor test: duty {}", TEST_DUTY);

    loop {
        for rotation in [Rotation::Forward, Rotation::Backward] {
            defmt::println!("{}", rotation);
            for ch in 0..2 {
                motors.set_direction(ch, rotation);
                motors.set_pwm(ch, TEST_DUTY);
            }
            delay.delay_ms(STEP_MS);

            defmt::println!("stop");
            for ch in 0..2 {
                motors.stop(ch);
                motors.set_pwm(ch, 0);
            }
            delay.delay_ms(STEP_MS);
        }
    }
}

// same panicking *behavior* as `panic-probe` but doesn't print a panic message
// this prevents the panic message being printed *twice* when `defmt::panic` is invoked
#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}
