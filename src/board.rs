//! Hardware capabilities the interpreter consumes.
//!
//! Each trait is one narrow seam to the outside world. The firmware binary
//! implements them on top of Embassy peripherals; the test suite implements
//! them with recorders and a virtual clock.

use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use crate::hid::{HidTransport, LockLed};

/// Monotonic time source and cooperative sleep.
#[allow(async_fn_in_trait)]
pub trait Clock {
    /// Time since an arbitrary fixed origin.
    fn now(&self) -> Duration;

    /// Suspend the caller for `duration`.
    async fn sleep(&mut self, duration: Duration);
}

/// Operator console (RTT on target).
pub trait Console {
    fn print(&mut self, line: &str);
}

/// The on-board status LED.
pub trait StatusLed {
    fn status_led(&self) -> bool;
    fn set_status_led(&mut self, on: bool);
}

/// Keyboard indicator LEDs, as last reported by the host.
pub trait LockLeds {
    fn lock_led_on(&self, led: LockLed) -> bool;
}

/// One access point seen during a scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessPoint {
    pub ssid: String,
    pub bssid: [u8; 6],
    pub rssi: i8,
}

#[allow(async_fn_in_trait)]
pub trait WifiScanner {
    /// Run one scan pass.
    async fn scan(&mut self) -> Vec<AccessPoint>;
}

/// Everything a script run needs from the device.
pub trait Board: HidTransport + Clock + Console + StatusLed + LockLeds + WifiScanner {}

impl<T> Board for T where T: HidTransport + Clock + Console + StatusLed + LockLeds + WifiScanner {}

/// Status display line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Slot {
    Top = 1,
    Bottom = 2,
}

/// Two-line status display.
pub trait StatusDisplay {
    /// Show `text` on `slot`, optionally clearing the whole screen first.
    fn render(&mut self, text: &str, slot: Slot, clear: bool);
}

/// Stand-in for boards without a display.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDisplay;

impl StatusDisplay for NoDisplay {
    fn render(&mut self, _text: &str, _slot: Slot, _clear: bool) {}
}
