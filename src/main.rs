//! hidscript firmware for nRF52840.
//!
//! At power-up the trigger inputs pick a boot mode: run one of the stored
//! payload scripts, jiggle the mouse, or stay idle in setup mode. Scripts
//! live in internal flash and are typed through a composite USB HID device.
//!
//! Task layout:
//!
//! ```text
//! main ─► Engine (Mutex) ─► NrfBoard ─► HID_REPORTS ─► hid_writer_task ─► USB
//!                                                     keyboard_led_task ◄─ USB
//!                                                            usb_task ◄─► USB
//! ```

#![no_std]
#![no_main]

extern crate alloc;

mod device;
mod storage;
mod ui;
mod usb;

use core::mem::MaybeUninit;

use defmt::{error, info, unwrap};
use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::rng::{self, Rng};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::Timer;
use embedded_alloc::LlffHeap as Heap;
use hidscript::config::TRIGGER_SLOTS;
use hidscript::{BootMode, Engine, Settings, Slot, StatusDisplay};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::device::NrfBoard;
use crate::storage::FlashStore;
use crate::ui::display::OledDisplay;
use crate::usb::hid_device::{self, UsbDriver, HID_REPORTS};

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    RNG => rng::InterruptHandler<peripherals::RNG>;
});

const HEAP_SIZE: usize = 64 * 1024;

#[global_allocator]
static HEAP: Heap = Heap::empty();

type FirmwareEngine = Engine<
    NrfBoard,
    OledDisplay<Twim<'static, peripherals::TWISPI0>>,
    FlashStore<BlockingAsync<Nvmc<'static>>>,
>;

static ENGINE: StaticCell<Mutex<CriticalSectionRawMutex, FirmwareEngine>> = StaticCell::new();

#[embassy_executor::task]
async fn usb_task(device: embassy_usb::UsbDevice<'static, UsbDriver>) -> ! {
    hid_device::run_usb_device(device).await
}

#[embassy_executor::task]
async fn keyboard_led_task(
    reader: embassy_usb::class::hid::HidReader<'static, UsbDriver, 1>,
) -> ! {
    hid_device::keyboard_led_task(reader).await
}

#[embassy_executor::task]
async fn hid_writer_task(
    keyboard: embassy_usb::class::hid::HidWriter<'static, UsbDriver, 8>,
    mouse: embassy_usb::class::hid::HidWriter<'static, UsbDriver, 8>,
    consumer: embassy_usb::class::hid::HidWriter<'static, UsbDriver, 8>,
) -> ! {
    hid_device::hid_writer_task(keyboard, mouse, consumer, HID_REPORTS.receiver()).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    {
        static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
        // SAFETY: runs once, before any allocation.
        unsafe { HEAP.init(core::ptr::addr_of_mut!(HEAP_MEM) as usize, HEAP_SIZE) }
    }

    let p = embassy_nrf::init(Default::default());
    info!("hidscript starting");

    // Sample the trigger inputs before anything else touches the pins.
    let triggers = [
        Input::new(p.P0_02, Pull::Up),
        Input::new(p.P0_03, Pull::Up),
        Input::new(p.P0_04, Pull::Up),
        Input::new(p.P0_05, Pull::Up),
        Input::new(p.P0_28, Pull::Up),
        Input::new(p.P0_29, Pull::Up),
        Input::new(p.P0_30, Pull::Up),
    ];
    Timer::after_millis(5).await; // pull-ups settle
    let mut grounded = [false; TRIGGER_SLOTS];
    for (slot, pin) in triggers.iter().enumerate() {
        grounded[slot] = pin.is_low();
    }
    let mode = BootMode::select(grounded);
    drop(triggers);

    let usb = hid_device::init(p.USBD);
    unwrap!(spawner.spawn(usb_task(usb.device)));
    unwrap!(spawner.spawn(keyboard_led_task(usb.keyboard_leds)));
    unwrap!(spawner.spawn(hid_writer_task(
        usb.keyboard_writer,
        usb.mouse_writer,
        usb.consumer_writer
    )));

    let led = Output::new(p.P0_13, Level::High, OutputDrive::Standard);
    let board = NrfBoard::new(HID_REPORTS.sender(), led);

    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let mut display = OledDisplay::new(i2c);
    display.render("hidscript", Slot::Top, true);
    if mode == BootMode::Setup {
        display.render("setup mode", Slot::Bottom, false);
    }

    let store = FlashStore::new(BlockingAsync::new(Nvmc::new(p.NVMC)));

    let mut seed = [0u8; 8];
    Rng::new(p.RNG, Irqs).blocking_fill_bytes(&mut seed);
    let seed = u64::from_le_bytes(seed);
    let engine = match Engine::new(board, display, store, Settings::default(), seed) {
        Ok(engine) => engine,
        Err(e) => {
            error!("engine setup failed: {}", e);
            return;
        }
    };
    let engine = ENGINE.init(Mutex::new(engine));

    let mut engine = engine.lock().await;
    if let Err(e) = engine.boot(mode).await {
        error!("boot {} failed: {}", mode, e);
    }
}
