//! USB HID composite device: keyboard + mouse + consumer control.

use core::sync::atomic::{AtomicU8, Ordering};

use defmt::{info, warn};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};
use embassy_usb::class::hid::{
    Config as HidConfig, HidReader, HidReaderWriter, HidWriter, ReportId, RequestHandler, State,
};
use embassy_usb::control::OutResponse;
use embassy_usb::{Builder, Config, UsbDevice};
use hidscript::config;
use hidscript::hid::consumer::CONSUMER_REPORT_DESCRIPTOR;
use hidscript::hid::keyboard::KEYBOARD_REPORT_DESCRIPTOR;
use hidscript::hid::mouse::MOUSE_REPORT_DESCRIPTOR;
use hidscript::HidReport;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

/// Reports queued by the interpreter, drained by [`hid_writer_task`].
pub const HID_QUEUE_DEPTH: usize = 16;
pub static HID_REPORTS: Channel<CriticalSectionRawMutex, HidReport, HID_QUEUE_DEPTH> =
    Channel::new();

/// Last keyboard LED output report from the host.
static LOCK_LEDS: AtomicU8 = AtomicU8::new(0);

static KB_STATE: StaticCell<State> = StaticCell::new();
static MOUSE_STATE: StaticCell<State> = StaticCell::new();
static CONSUMER_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 128]> = StaticCell::new();

/// Current lock LED byte (NUM_LOCK = bit 0, CAPS_LOCK = bit 1, ...).
pub fn lock_leds() -> u8 {
    LOCK_LEDS.load(Ordering::Relaxed)
}

/// Stores the keyboard LED output report.
struct LedReportHandler;

impl RequestHandler for LedReportHandler {
    fn set_report(&mut self, _id: ReportId, data: &[u8]) -> OutResponse {
        if let Some(&leds) = data.first() {
            LOCK_LEDS.store(leds, Ordering::Relaxed);
        }
        OutResponse::Accepted
    }
}

pub struct UsbHidDevice {
    pub device: UsbDevice<'static, UsbDriver>,
    pub keyboard_leds: HidReader<'static, UsbDriver, 1>,
    pub keyboard_writer: HidWriter<'static, UsbDriver, 8>,
    pub mouse_writer: HidWriter<'static, UsbDriver, 8>,
    pub consumer_writer: HidWriter<'static, UsbDriver, 8>,
}

/// Initialise the USB stack and create the composite HID device.
///
/// Must be called exactly once. All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> UsbHidDevice {
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    let mut builder = Builder::new(
        driver,
        usb_config,
        USB_CONFIG_DESC.init([0u8; 256]),
        USB_BOS_DESC.init([0u8; 256]),
        USB_MSOS_DESC.init([0u8; 256]),
        USB_CTRL_BUF.init([0u8; 128]),
    );

    let keyboard = HidReaderWriter::<_, 1, 8>::new(
        &mut builder,
        KB_STATE.init(State::new()),
        hid_config(KEYBOARD_REPORT_DESCRIPTOR),
    );
    let (keyboard_leds, keyboard_writer) = keyboard.split();

    let mouse_writer = HidWriter::new(
        &mut builder,
        MOUSE_STATE.init(State::new()),
        hid_config(MOUSE_REPORT_DESCRIPTOR),
    );
    let consumer_writer = HidWriter::new(
        &mut builder,
        CONSUMER_STATE.init(State::new()),
        hid_config(CONSUMER_REPORT_DESCRIPTOR),
    );

    let device = builder.build();
    info!("USB HID composite device initialised (keyboard + mouse + consumer)");

    UsbHidDevice {
        device,
        keyboard_leds,
        keyboard_writer,
        mouse_writer,
        consumer_writer,
    }
}

fn hid_config(report_descriptor: &'static [u8]) -> HidConfig<'static> {
    HidConfig {
        report_descriptor,
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 8,
    }
}

/// Run the USB device stack (enumeration, suspend/resume, endpoints).
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Track the host's keyboard LED state for `WAITFORLED`.
pub async fn keyboard_led_task(reader: HidReader<'static, UsbDriver, 1>) -> ! {
    let mut handler = LedReportHandler;
    reader.run(false, &mut handler).await
}

/// Forward queued reports to the matching HID endpoint.
pub async fn hid_writer_task(
    mut keyboard: HidWriter<'static, UsbDriver, 8>,
    mut mouse: HidWriter<'static, UsbDriver, 8>,
    mut consumer: HidWriter<'static, UsbDriver, 8>,
    reports: Receiver<'static, CriticalSectionRawMutex, HidReport, HID_QUEUE_DEPTH>,
) -> ! {
    info!("HID writer task started");
    let mut buf = [0u8; 8];

    loop {
        let report = reports.receive().await;
        let n = report.serialize(&mut buf);
        let written = match report {
            HidReport::Keyboard(_) => keyboard.write(&buf[..n]).await,
            HidReport::Mouse(_) => mouse.write(&buf[..n]).await,
            HidReport::Consumer(_) => consumer.write(&buf[..n]).await,
        };
        if written.is_err() {
            warn!("USB write failed: {}", report);
        }
    }
}
