#![no_std]
#![no_main]

use defmt::{error, info, trace};
use defmt_rtt as _;
use deskmixer_firmware::config::{
    self, BAUD_RATE, STARTUP_DELAY_MS, UART_RX_BUFFER, UART_TX_BUFFER,
};
use deskmixer_firmware::{IoSerial, MixerController, PanelInputs};
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Instant, Timer};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// UART ring buffers.
static TX_BUF: StaticCell<[u8; UART_TX_BUFFER]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; UART_RX_BUFFER]> = StaticCell::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("DeskMixer controller starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BAUD_RATE;

    let tx_buf = TX_BUF.init([0u8; UART_TX_BUFFER]);
    let rx_buf = RX_BUF.init([0u8; UART_RX_BUFFER]);

    let uart = Uart::new_blocking(
        p.UART0,
        p.PIN_0, // TX
        p.PIN_1, // RX
        uart_config,
    );
    let serial = IoSerial::new(uart.into_buffered(Irqs, tx_buf, rx_buf));

    // --- Panel Setup ---
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let sliders = [
        Channel::new_pin(p.PIN_26, Pull::None),
        Channel::new_pin(p.PIN_27, Pull::None),
        Channel::new_pin(p.PIN_28, Pull::None),
        Channel::new_pin(p.PIN_29, Pull::None),
    ];
    let buttons = [
        Input::new(p.PIN_2, Pull::Up),
        Input::new(p.PIN_3, Pull::Up),
        Input::new(p.PIN_4, Pull::Up),
        Input::new(p.PIN_5, Pull::Up),
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
    ];
    let panel = PanelInputs::new(adc, sliders, buttons);

    let descriptor = config::descriptor();
    info!("Panel: {}", descriptor);

    let mut controller = match MixerController::new(panel, serial, descriptor) {
        Ok(controller) => controller,
        Err(e) => {
            error!("Invalid board configuration: {}", e);
            return;
        }
    };

    // Give the host time to open the port before the first line
    Timer::after_millis(STARTUP_DELAY_MS).await;

    if let Err(e) = controller.announce() {
        error!("Handshake line not sent: {}", e);
    }
    info!("DeskMixer controller ready at {} baud", BAUD_RATE);

    loop {
        let activity = controller.tick(Instant::now().as_millis());
        if !activity.is_idle() {
            trace!("tick: {}", activity);
        }
        yield_now().await;
    }
}
