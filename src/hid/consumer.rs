//! Consumer Control HID support - media keys, volume, etc.
//!
//! Consumer Control is a separate HID usage page (0x0C) that handles:
//! - Volume Up/Down/Mute
//! - Play/Pause/Stop/Next/Previous/Record/Eject
//! - Display brightness
//!
//! This is transmitted as a separate USB HID report alongside
//! keyboard and mouse reports.

use super::{HidReport, HidTransport};

/// Consumer control report size (2 bytes for usage ID).
pub const CONSUMER_REPORT_SIZE: usize = 2;

/// Consumer control usage codes (Usage Page 0x0C) reachable from scripts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum ConsumerCode {
    BrightnessIncrement = 0x006F,
    BrightnessDecrement = 0x0070,
    Record = 0x00B2,
    FastForward = 0x00B3,
    Rewind = 0x00B4,
    ScanNextTrack = 0x00B5,
    ScanPreviousTrack = 0x00B6,
    Stop = 0x00B7,
    Eject = 0x00B8,
    PlayPause = 0x00CD,
    Mute = 0x00E2,
    VolumeIncrement = 0x00E9,
    VolumeDecrement = 0x00EA,
}

/// Script names for consumer codes (the `CC SEND <NAME>` vocabulary).
const COMMANDS: &[(&str, ConsumerCode)] = &[
    ("BRIGHTNESS_DECREMENT", ConsumerCode::BrightnessDecrement),
    ("BRIGHTNESS_INCREMENT", ConsumerCode::BrightnessIncrement),
    ("EJECT", ConsumerCode::Eject),
    ("FAST_FORWARD", ConsumerCode::FastForward),
    ("MUTE", ConsumerCode::Mute),
    ("PLAY_PAUSE", ConsumerCode::PlayPause),
    ("RECORD", ConsumerCode::Record),
    ("REWIND", ConsumerCode::Rewind),
    ("SCAN_NEXT_TRACK", ConsumerCode::ScanNextTrack),
    ("SCAN_PREVIOUS_TRACK", ConsumerCode::ScanPreviousTrack),
    ("STOP", ConsumerCode::Stop),
    ("VOLUME_DECREMENT", ConsumerCode::VolumeDecrement),
    ("VOLUME_INCREMENT", ConsumerCode::VolumeIncrement),
];

impl ConsumerCode {
    /// Look up a code by (upper-case) script name.
    pub fn from_name(name: &str) -> Option<Self> {
        COMMANDS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, code)| code)
    }

    pub const fn usage(self) -> u16 {
        self as u16
    }
}

/// Consumer Control HID report.
///
/// Simple 2-byte report containing a single usage code.
/// Multiple simultaneous keys are not supported in this implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsumerReport {
    /// Active consumer control usage (little-endian u16).
    pub usage: u16,
}

impl ConsumerReport {
    /// Create an empty (no keys pressed) report.
    pub const fn empty() -> Self {
        Self { usage: 0 }
    }

    /// Create a report with a single usage.
    pub const fn new(code: ConsumerCode) -> Self {
        Self {
            usage: code.usage(),
        }
    }

    /// Serialize to USB HID report bytes.
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < CONSUMER_REPORT_SIZE {
            return 0;
        }
        let bytes = self.usage.to_le_bytes();
        buf[0] = bytes[0];
        buf[1] = bytes[1];
        CONSUMER_REPORT_SIZE
    }

    /// Check if any key is pressed.
    pub fn is_empty(&self) -> bool {
        self.usage == 0
    }
}

/// Host-facing consumer control state. At most one code is held.
#[derive(Debug, Default)]
pub struct ConsumerControl {
    held: Option<ConsumerCode>,
}

impl ConsumerControl {
    pub const fn new() -> Self {
        Self { held: None }
    }

    /// Press and immediately release `code`.
    pub async fn send<H: HidTransport>(&mut self, hid: &mut H, code: ConsumerCode) {
        self.press(hid, code).await;
        self.release(hid).await;
    }

    /// Hold `code`, replacing whatever was held before.
    pub async fn press<H: HidTransport>(&mut self, hid: &mut H, code: ConsumerCode) {
        self.held = Some(code);
        hid.send(HidReport::Consumer(ConsumerReport::new(code))).await;
    }

    /// Release the held code, whichever it is.
    pub async fn release<H: HidTransport>(&mut self, hid: &mut H) {
        self.held = None;
        hid.send(HidReport::Consumer(ConsumerReport::empty())).await;
    }

    pub fn held(&self) -> Option<ConsumerCode> {
        self.held
    }
}

/// USB HID Report Descriptor for Consumer Control.
///
/// This is a minimal descriptor for a single 16-bit usage.
pub const CONSUMER_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x0C, // Usage Page (Consumer)
    0x09, 0x01, // Usage (Consumer Control)
    0xA1, 0x01, // Collection (Application)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x03, //   Logical Maximum (1023)
    0x19, 0x00, //   Usage Minimum (0)
    0x2A, 0xFF, 0x03, //   Usage Maximum (1023)
    0x75, 0x10, //   Report Size (16)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x00, //   Input (Data, Array, Absolute)
    0xC0, // End Collection
];
