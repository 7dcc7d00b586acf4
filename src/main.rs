#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Level, Output, OutputDrive, Pin},
    interrupt::{self, InterruptExt},
    peripherals::SPI2,
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel};
use embassy_time::{Duration, Timer};
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use canyon_watchface::{
    services::{Clock, MinuteTicker},
    ui::{CanyonWatchface, Window, WindowEvent, COLOR_BACKGROUND},
};
use peripherals::{backlight::Backlight, display::Display};
use system::{
    bluetooth::{self, BleConnection, Server},
    config::{SystemConfig, APP_INTERRUPT_PRIORITY, BACKLIGHT_LEVEL, TRANSITION_FRAME_MS},
    time::{SystemClock, TimeManager},
    EventSender, EVENT_QUEUE_LEN,
};

// Others
use chrono::Timelike;

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

// Communication channels
static EVENTS: Channel<ThreadModeRawMutex, WindowEvent, EVENT_QUEUE_LEN> = Channel::new();

/// Post a minute tick whenever the wall-clock minute changes.
#[embassy_executor::task(pool_size = 1)]
async fn update_time(events: EventSender) {
    let clock = SystemClock;
    let mut ticker = MinuteTicker::new();
    // The load refresh already showed the current minute
    ticker.poll(clock.now());

    loop {
        // Wake just after the next minute boundary
        let second = clock.now().second().min(59) as u64;
        Timer::after(Duration::from_secs(60 - second)).await;

        if ticker.poll(clock.now()) {
            events.send(WindowEvent::MinuteTick).await;
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(SystemConfig::new());
    defmt::info!("Initializing");

    interrupt::SPIM2_SPIS2_SPI2.set_priority(APP_INTERRUPT_PRIORITY);

    // Initialize clock
    TimeManager::init(UTC_EPOCH);

    // Initialize Backlight
    let mut backlight = Backlight::init(
        Output::new(p.P0_14.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_22.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_23.degrade(), Level::High, OutputDrive::Standard),
    );

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new_txonly(p.SPI2, Irqs, p.P0_02, p.P0_03, spim_config);

    // Initialize LCD
    let mut display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25.degrade(), Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18.degrade(), Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26.degrade(), Level::Low, OutputDrive::Standard),
    ));
    unwrap!(display.clear(COLOR_BACKGROUND));
    unwrap!(backlight.set(BACKLIGHT_LEVEL));

    // Initialize Bluetooth
    static SERVER: StaticCell<Server> = StaticCell::new();
    let sd = Softdevice::enable(&bluetooth::softdevice_config());
    let server: &'static Server = SERVER.init(unwrap!(Server::new(sd)));
    let sd: &'static Softdevice = sd;

    // Schedule tasks
    unwrap!(spawner.spawn(bluetooth::softdevice_task(sd)));
    unwrap!(spawner.spawn(bluetooth::bluetooth(sd, server, EVENTS.sender())));
    unwrap!(spawner.spawn(update_time(EVENTS.sender())));

    // Show the watchface
    let clock = SystemClock;
    let connection = BleConnection;
    let mut window: Window<CanyonWatchface> = Window::new(display.bounds(), COLOR_BACKGROUND);
    let transition = unwrap!(window.push(true, &clock, &connection));
    for offset in transition {
        if let Err(e) = display.show_at(&window, offset) {
            defmt::warn!("Transition frame failed: {}", e);
        }
        Timer::after(Duration::from_millis(TRANSITION_FRAME_MS)).await;
    }

    defmt::info!("Initialization finished");

    // Handle window events one at a time
    loop {
        let event = EVENTS.receive().await;
        if let Err(e) = window.handle(event, &clock, &connection) {
            defmt::warn!("Event {} failed: {}", event, e);
            continue;
        }
        if let Err(e) = display.show(&window) {
            defmt::warn!("Redraw failed: {}", e);
        }
    }
}
