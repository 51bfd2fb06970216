#![no_main]
#![no_std]

use defmt_rtt as _;
use panic_probe as _;

use hal::{self, clocks::Clocks, pac};

use speedpulse_algo::{
    config::DEF_MIN_SPEED, DualSpeedControl, EncoderConfig, MotorCommand, PidGains,
    QuadratureDecoder, SpeedControlConfig, SpeedEstimator, TickCounter,
};
use speedpulse_drivers::{encoder_input::EncoderPin, motor_pwm::DualMotorPwm};

use cortex_m;

// Encoder geometry and control cadence
const TICKS_PER_REV: u32 = 1200;
const DELTA_TIME_US: u32 = 10_000; // 100 Hz control loop
const ENCODER: EncoderConfig = EncoderConfig::new(TICKS_PER_REV, DELTA_TIME_US);

const PWM_FREQ: u32 = 20_000;

const GAINS: [PidGains; 2] = [PidGains::new(0.02, 0.001, 0.005); 2];
const INITIAL_SPEED: [i32; 2] = [3600, -3600]; // deg/s, one revolution per 100 ms

// Control periods between two telemetry reports (1 s)
const TELEMETRY_PERIOD: u32 = 100;

// Only written by the EXTI handlers
static M1_TICKS: TickCounter = TickCounter::new();
static M2_TICKS: TickCounter = TickCounter::new();

type Decoder = QuadratureDecoder<'static, EncoderPin, EncoderPin>;
type Control = DualSpeedControl<'static, DualMotorPwm>;

#[derive(Clone, Copy, defmt::Format)]
pub struct Telemetry {
    speed: [f32; 2],          // deg/s
    distance: [f32; 2],       // deg since previous report
    command: [MotorCommand; 2],
}

#[rtic::app(device = pac, peripherals = true, dispatchers = [TIM7])]
mod app {
    use super::*;

    use speedpulse_drivers::{control_timer::ControlTimer, encoder_input, pinout};

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        decoder_m1: Decoder,
        decoder_m2: Decoder,
        control: Control,
        control_timer: ControlTimer,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local) {
        let dp = ctx.device;
        let clock_cfg = Clocks::default();
        clock_cfg.setup().unwrap();

        let sysclk_freq = clock_cfg.sysclk(); // System clock frequency in Hz
        defmt::debug!("SYSTEM: Clock frequency is {} MHz", sysclk_freq / 1000000);

        let mut motors = DualMotorPwm::new(dp.TIM2, &clock_cfg, PWM_FREQ);
        motors.begin();

        // Both channels of one encoder raise the same EXTI handler.
        // With B edges counted too, a full Gray cycle nets zero ticks and the loop reads ~0 deg/s.
        // Only channel A edges carry direction (see "Decoding resolution" in DESIGN.md).
        let decoder_m1 = QuadratureDecoder::new(
            EncoderPin::new(&pinout::encoder::M1_A),
            EncoderPin::new(&pinout::encoder::M1_B),
            &M1_TICKS,
        );
        let decoder_m2 = QuadratureDecoder::new(
            EncoderPin::new(&pinout::encoder::M2_A),
            EncoderPin::new(&pinout::encoder::M2_B),
            &M2_TICKS,
        );

        // A board with a broken encoder configuration must not start
        let estimators = [
            defmt::unwrap!(SpeedEstimator::new(&M1_TICKS, ENCODER)),
            defmt::unwrap!(SpeedEstimator::new(&M2_TICKS, ENCODER)),
        ];

        let mut control = Control::new(
            motors,
            estimators,
            SpeedControlConfig {
                min_speed: DEF_MIN_SPEED,
                gains: PidGains::default(),
            },
        );
        control.set_all_gains(GAINS);
        for (channel, speed) in INITIAL_SPEED.iter().enumerate() {
            defmt::unwrap!(control.set_speed(channel, *speed));
        }

        let mut control_timer = ControlTimer::new(dp.TIM3, &clock_cfg, &ENCODER);
        control_timer.start();
        defmt::info!(
            "CONTROL: {} Hz, {} ticks/rev, targets {} deg/s",
            ENCODER.sample_frequency_hz(),
            TICKS_PER_REV,
            INITIAL_SPEED
        );

        (
            Shared {},
            Local {
                decoder_m1,
                decoder_m2,
                control,
                control_timer,
            },
        )
    }

    // Edge tasks preempt the control task, the counter is read with an atomic load there
    #[task(binds = EXTI9_5, local = [decoder_m1], priority = 3)]
    fn encoder_m1(cx: encoder_m1::Context) {
        encoder_input::clear_edges(&pinout::encoder::M1_A, &pinout::encoder::M1_B);
        cx.local.decoder_m1.on_edge();
    }

    #[task(binds = EXTI15_10, local = [decoder_m2], priority = 3)]
    fn encoder_m2(cx: encoder_m2::Context) {
        encoder_input::clear_edges(&pinout::encoder::M2_A, &pinout::encoder::M2_B);
        cx.local.decoder_m2.on_edge();
    }

    #[task(binds = TIM3, local = [control_timer, control, ticker: u32 = 0], priority = 2)]
    fn control_tick(cx: control_tick::Context) {
        // Clear the update interrupt flag
        cx.local.control_timer.clear();

        let control = cx.local.control;
        control.correct_all();

        *cx.local.ticker += 1;
        if *cx.local.ticker < TELEMETRY_PERIOD {
            return;
        }
        *cx.local.ticker = 0;

        // Reading the distance also keeps its accumulator far from overflowing
        let mut telemetry = Telemetry {
            speed: [0.0; 2],
            distance: [0.0; 2],
            command: [MotorCommand::default(); 2],
        };
        for ch in 0..2 {
            telemetry.speed[ch] = control.speed(ch).unwrap_or_default();
            telemetry.distance[ch] = control.distance(ch).unwrap_or_default();
            telemetry.command[ch] = control.command(ch).unwrap_or_default();
        }
        report::spawn(telemetry).ok();
    }

    #[task(priority = 1)]
    async fn report(_cx: report::Context, telemetry: Telemetry) {
        defmt::info!("{}", telemetry);
    }
}

#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}
