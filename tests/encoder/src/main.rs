//! Encoder bring-up: turn motor 1 by hand and watch ticks, speed and distance over RTT.

#![no_main]
#![no_std]

use core::cell::RefCell;

use cortex_m::{delay::Delay, interrupt::Mutex, peripheral::NVIC};
use cortex_m_rt::entry;
use hal::{
    clocks::Clocks,
    pac::{self, interrupt},
};

use defmt_rtt as _; // global logger
use panic_probe as _;

use speedpulse_algo::{EncoderConfig, QuadratureDecoder, SpeedEstimator, TickCounter};
use speedpulse_drivers::{
    encoder_input::{self, EncoderPin},
    pinout,
};

const ENCODER: EncoderConfig = EncoderConfig::new(1200, 100_000); // 10 Hz readout

type Decoder = QuadratureDecoder<'static, EncoderPin, EncoderPin>;

static TICKS: TickCounter = TickCounter::new();
static DECODER: Mutex<RefCell<Option<Decoder>>> = Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    let cp = cortex_m::Peripherals::take().unwrap();
    let _dp = pac::Peripherals::take().unwrap();

    let clock_cfg = Clocks::default();
    clock_cfg.setup().unwrap();
    defmt::println!("Starting encoder test, {} Hz", clock_cfg.sysclk());

    let decoder = QuadratureDecoder::new(
        EncoderPin::new(&pinout::encoder::M1_A),
        EncoderPin::new(&pinout::encoder::M1_B),
        &TICKS,
    );
    cortex_m::interrupt::free(|cs| DECODER.borrow(cs).replace(Some(decoder)));
    unsafe { NVIC::unmask(pac::Interrupt::EXTI9_5) };

    let mut estimator = defmt::unwrap!(SpeedEstimator::new(&TICKS, ENCODER));
    let mut delay = Delay::new(cp.SYST, clock_cfg.systick());

    loop {
        // Busy-wait cadence, good enough for a readout
        delay.delay_us(estimator.delta_time_us());
        let speed = estimator.sample();
        let distance = estimator.get_distance();

        defmt::println!(
            "ticks:{} speed:{} deg/s distance:{} deg",
            TICKS.snapshot(),
            speed,
            distance
        );
    }
}

#[interrupt]
fn EXTI9_5() {
    encoder_input::clear_edges(&pinout::encoder::M1_A, &pinout::encoder::M1_B);
    cortex_m::interrupt::free(|cs| {
        if let Some(decoder) = DECODER.borrow(cs).borrow_mut().as_mut() {
            decoder.on_edge();
        }
    });
}

// same panicking *behavior* as panic-probe but doesn't print a panic message
// this prevents the panic message being printed *twice* when defmt::panic is invoked
#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}
