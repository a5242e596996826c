#![no_std]
#![no_main]

use core::fmt::Write as _;

use defmt::{error, info, warn};
use defmt_rtt as _;
use embassy_embedded_hal::shared_bus::asynch::spi::SpiDevice;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{self, Spi};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Delay, Duration, Instant, Ticker};
use heapless::String;
use module_firmware::{
    discover, CharacterLcd, CharacterPattern, Color, CustomCharacter, DurationMode, ModuleId,
    ReadySignal, SevenSegmentDisplay, Socket, Sockets, SpiTransport,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

type SpiBus = Spi<'static, SPI0, spi::Async>;
type ModuleSpi = SpiDevice<'static, CriticalSectionRawMutex, SpiBus, Output<'static>>;
type ModuleTransport = SpiTransport<'static, ModuleSpi, Delay>;

/// Module SPI clock.
const SPI_FREQUENCY: u32 = 500_000;

/// Shared SPI bus; each module gets its own chip select on it.
static SPI_BUS: StaticCell<Mutex<CriticalSectionRawMutex, SpiBus>> = StaticCell::new();

/// Ready latches, raised from the edge tasks below.
static SEGMENT_READY: ReadySignal = ReadySignal::new();
static LCD_READY: ReadySignal = ReadySignal::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Module host starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- SPI Setup ---
    let mut spi_config = spi::Config::default();
    spi_config.frequency = SPI_FREQUENCY;

    let spi = Spi::new(
        p.SPI0,
        p.PIN_18, // SCK
        p.PIN_19, // MOSI
        p.PIN_16, // MISO
        p.DMA_CH0,
        p.DMA_CH1,
        spi_config,
    );
    let bus: &'static Mutex<CriticalSectionRawMutex, SpiBus> = SPI_BUS.init(Mutex::new(spi));

    // --- Socket 1: seven-segment display ---
    let segment_cs = Output::new(p.PIN_17, Level::High);
    let segment_irq = Input::new(p.PIN_20, Pull::Up);
    let segment = SpiTransport::new(SpiDevice::new(bus, segment_cs), Delay, &SEGMENT_READY);

    // --- Socket 2: character LCD ---
    let lcd_cs = Output::new(p.PIN_21, Level::High);
    let lcd_irq = Input::new(p.PIN_22, Pull::Up);
    let lcd = SpiTransport::new(SpiDevice::new(bus, lcd_cs), Delay, &LCD_READY);

    let mut sockets = Sockets::new([
        Socket::new(ModuleId::SEVEN_SEGMENT, segment),
        Socket::new(ModuleId::CHARACTER_LCD, lcd),
    ]);

    // Ready lines must be watched before the first read request goes out
    spawner.spawn(ready_task(segment_irq, &SEGMENT_READY).unwrap());
    spawner.spawn(ready_task(lcd_irq, &LCD_READY).unwrap());

    match discover::<SevenSegmentDisplay<_>, _>(&mut sockets) {
        Some(display) => spawner.spawn(clock_task(display).unwrap()),
        None => error!("No seven-segment display fitted"),
    }
    match discover::<CharacterLcd<_>, _>(&mut sockets) {
        Some(lcd) => spawner.spawn(status_task(lcd).unwrap()),
        None => error!("No character LCD fitted"),
    }

    info!("Module host initialized, {} socket(s) unused", sockets.unbound());
}

/// Edge task - latches a module's ready line on its falling edge.
#[embassy_executor::task(pool_size = 2)]
async fn ready_task(mut line: Input<'static>, ready: &'static ReadySignal) {
    loop {
        line.wait_for_falling_edge().await;
        ready.on_signal();
    }
}

/// Clock task - shows uptime as a duration, once a second.
#[embassy_executor::task]
async fn clock_task(mut display: SevenSegmentDisplay<ModuleTransport>) {
    if let Ok(false) = display.set_brightness(0.25).await {
        warn!("Brightness not confirmed");
    }

    let mut ticker = Ticker::every(Duration::from_secs(1));
    loop {
        let uptime = Instant::now().as_secs() as i32;
        match display.set_duration(uptime, DurationMode::Automatic).await {
            Ok(true) => {}
            Ok(false) => warn!("Uptime not confirmed, display content unknown"),
            Err(e) => {
                // Past 99:59 the display cannot follow; show dashes and stop.
                error!("Uptime out of range: {}", e);
                let _ = display.set_text("----").await;
                return;
            }
        }
        ticker.next().await;
    }
}

/// Status task - title line and a heartbeat on the LCD.
#[embassy_executor::task]
async fn status_task(mut lcd: CharacterLcd<ModuleTransport>) {
    let heart = CharacterPattern([0x00, 0x0A, 0x1F, 0x1F, 0x0E, 0x04, 0x00, 0x00]);

    let setup = [
        lcd.set_color(Color::new(0, 64, 255)).await,
        lcd.set_custom_character(CustomCharacter::C1, heart).await,
        lcd.set_line(1, "Module host").await,
    ];
    if setup.iter().any(|r| !matches!(r, Ok(true))) {
        warn!("LCD setup incomplete");
    }

    let mut ticker = Ticker::every(Duration::from_secs(5));
    loop {
        let mut line: String<16> = String::new();
        let _ = write!(
            line,
            "{} up {}s",
            CustomCharacter::C1.as_char(),
            Instant::now().as_secs()
        );
        if let Ok(false) = lcd.set_line(2, &line).await {
            let stats = lcd.channel().stats();
            warn!(
                "Status line not confirmed ({} sets failed)",
                stats.sets_failed
            );
        }
        ticker.next().await;
    }
}
