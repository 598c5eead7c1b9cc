//! nRF52840 implementation of the interpreter's hardware capabilities.

use alloc::vec::Vec;
use core::time::Duration;

use embassy_nrf::gpio::Output;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Instant, Timer};
use hidscript::hid::LockLed;
use hidscript::{
    AccessPoint, Clock, Console, HidReport, HidTransport, LockLeds, StatusLed, WifiScanner,
};

use crate::usb::hid_device::{self, HID_QUEUE_DEPTH};

pub struct NrfBoard {
    reports: Sender<'static, CriticalSectionRawMutex, HidReport, HID_QUEUE_DEPTH>,
    /// Active-low on the nRF52840-DK.
    led: Output<'static>,
    led_on: bool,
}

impl NrfBoard {
    pub fn new(
        reports: Sender<'static, CriticalSectionRawMutex, HidReport, HID_QUEUE_DEPTH>,
        led: Output<'static>,
    ) -> Self {
        let mut board = Self {
            reports,
            led,
            led_on: false,
        };
        board.set_status_led(false);
        board
    }
}

impl HidTransport for NrfBoard {
    async fn send(&mut self, report: HidReport) {
        self.reports.send(report).await;
    }
}

impl Clock for NrfBoard {
    fn now(&self) -> Duration {
        Duration::from_micros(Instant::now().as_micros())
    }

    async fn sleep(&mut self, duration: Duration) {
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
        Timer::after(embassy_time::Duration::from_micros(micros)).await;
    }
}

impl Console for NrfBoard {
    fn print(&mut self, line: &str) {
        defmt::println!("{=str}", line);
    }
}

impl StatusLed for NrfBoard {
    fn status_led(&self) -> bool {
        self.led_on
    }

    fn set_status_led(&mut self, on: bool) {
        self.led_on = on;
        if on {
            self.led.set_low();
        } else {
            self.led.set_high();
        }
    }
}

impl LockLeds for NrfBoard {
    fn lock_led_on(&self, led: LockLed) -> bool {
        led.is_set(hid_device::lock_leds())
    }
}

/// The nRF52840 has no Wi-Fi radio: every scan comes back empty, so
/// `WAITFORWIFI` waits until reset.
impl WifiScanner for NrfBoard {
    async fn scan(&mut self) -> Vec<AccessPoint> {
        Vec::new()
    }
}
