//! Samples P10.0 (SAR0) and P10.2 (SAR1) together on every TCPWM overflow,
//! drives their scaled product out of P9.2 and prints both inputs on the
//! debug UART.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use psoc6_sar_multiplier::adc::{self, ChannelConfig, CommonConfig, Sar, SarConfig, SCAN_FLAGS};
use psoc6_sar_multiplier::app::Pipeline;
use psoc6_sar_multiplier::ctb::{Ctb, OpampConfig};
use psoc6_sar_multiplier::ctdac::{self, Ctdac};
use psoc6_sar_multiplier::peripherals::{SAR0, SAR1};
use psoc6_sar_multiplier::tcpwm::{Counter, CounterConfig};
use psoc6_sar_multiplier::time::Hertz;
use psoc6_sar_multiplier::trigger::{self, trig, TriggerKind};
use psoc6_sar_multiplier::uart::{self, Uart};
use psoc6_sar_multiplier::{aref, bind_interrupts, console, power};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    PASS_SAR0 => adc::InterruptHandler<SAR0>;
    PASS_SAR1 => adc::InterruptHandler<SAR1>;
});

const COUNTER_CLOCK: Hertz = Hertz::mhz(1);
const SAMPLE_RATE: Hertz = Hertz::hz(10);

#[entry]
fn main() -> ! {
    let p = psoc6_sar_multiplier::init(Default::default());

    let mut uart = unwrap!(Uart::new_blocking(p.SCB2, p.P3_0, p.P3_1, uart::Config::default()));
    unwrap!(console::write_banner(&mut uart).ok());

    aref::init(&aref::Config::default());
    aref::enable();

    unwrap!(adc::init_common(&CommonConfig::default()));

    let mut sar0 = unwrap!(Sar::new(p.SAR0, Irqs, SarConfig::default()));
    let mut sar1 = unwrap!(Sar::new(p.SAR1, Irqs, SarConfig::default()));
    let mut in0 = p.P10_0;
    let mut in1 = p.P10_2;
    unwrap!(sar0.configure_channel(0, &mut in0, ChannelConfig::default()));
    unwrap!(sar1.configure_channel(0, &mut in1, ChannelConfig::default()));
    unwrap!(sar0.enable());
    unwrap!(sar1.enable());
    sar0.set_interrupt_mask(adc::intr::EOS);
    sar1.set_interrupt_mask(adc::intr::EOS);
    info!("SARs up");

    let mut ctb = Ctb::new(p.CTBM0, false);
    unwrap!(ctb.dac_follower(p.P9_2, OpampConfig::default()));
    let mut dac = unwrap!(Ctdac::new(p.CTDAC0, ctdac::Config::default()));
    dac.enable();
    ctb.enable();
    info!("CTDAC buffered on P9.2");

    unwrap!(trigger::connect(
        trig::GROUP_PASS,
        trig::IN_TCPWM0_OVERFLOW0,
        trig::OUT_PASS_SAR_IN0,
        TriggerKind::Edge,
    ));

    let counter_config = unwrap!(CounterConfig::for_rate(COUNTER_CLOCK, SAMPLE_RATE));
    let mut counter = unwrap!(Counter::new(p.TCPWM0_CNT0, COUNTER_CLOCK, counter_config));
    counter.enable();

    unsafe { cortex_m::interrupt::enable() };
    counter.trigger_start();
    info!("sampling at {} Hz", SAMPLE_RATE.0);

    let mut pipeline = Pipeline::new(
        unwrap!(sar0.into_input(0)),
        unwrap!(sar1.into_input(0)),
        dac,
        uart,
    );

    loop {
        match pipeline.run_cycle(&SCAN_FLAGS, power::cpu_sleep) {
            Ok(reading) => debug!("product {} V, code {}", reading.product, reading.code),
            Err(_) => warn!("console write failed"),
        }
    }
}
