#![no_std]
#![no_main]

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Flex, Pull as RpPull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Duration, Ticker};
use joystick_rp2040::{Polarity, RpPins, Sampler, SerialConsole};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

#[cfg(feature = "serial-plotter")]
use joystick_rp2040::{Console, Plotter};

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// Button count and pin table (pull-up wiring, active low).
const BUTTONS: usize = 3;
const BUTTON_PINS: [u8; BUTTONS] = [2, 3, 4];

/// Potentiometer count and pin table (ADC-capable GPIOs).
const POTS: usize = 2;
const POT_PINS: [u8; POTS] = [26, 27];

/// Sample and emit period.
const SAMPLE_PERIOD: Duration = Duration::from_millis(20);

static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 16]> = StaticCell::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("joystick sampler starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- UART Setup: frames and diagnostics share one port ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = 115_200;

    let tx_buf = TX_BUF.init([0; 64]);
    let rx_buf = RX_BUF.init([0; 16]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let mut console = SerialConsole::new(uart);

    // --- Pin registration ---
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let mut pins = RpPins::new(adc);
    pins.add_digital(2, Flex::new(p.PIN_2));
    pins.add_digital(3, Flex::new(p.PIN_3));
    pins.add_digital(4, Flex::new(p.PIN_4));
    pins.add_analog(26, Channel::new_pin(p.PIN_26, RpPull::None));
    pins.add_analog(27, Channel::new_pin(p.PIN_27, RpPull::None));

    // --- Sampler ---
    // No table supplied: configure() runs the interactive calibration
    // over the UART. Paste the reported values into with_calibration()
    // to skip it on later builds.
    let mut sampler: Sampler<BUTTONS, POTS> =
        Sampler::new(BUTTON_PINS, Polarity::PullUp, POT_PINS);

    sampler.configure(&mut pins, &mut console);
    info!(
        "configured: {} buttons, {} pots, frame length {}",
        BUTTONS,
        POTS,
        Sampler::<BUTTONS, POTS>::FRAME_LEN
    );

    #[cfg(feature = "serial-plotter")]
    let mut plotter = Plotter::new(BUTTONS, POTS);

    let mut ticker = Ticker::every(SAMPLE_PERIOD);
    loop {
        sampler.sample(&mut pins);

        #[cfg(feature = "serial-plotter")]
        {
            while let Some(byte) = console.poll_byte() {
                plotter.handle_byte(byte, BUTTONS, POTS, &mut console);
            }
            plotter.print(&sampler, &mut console);
        }

        #[cfg(not(feature = "serial-plotter"))]
        if let Err(e) = sampler.emit_frame_io(console.port_mut()) {
            error!("frame emission failed: {:?}", e);
        }

        ticker.next().await;
    }
}
