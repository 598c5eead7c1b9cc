//! USB HID keyboard report (boot protocol compatible) and the keyboard
//! device state the interpreter drives.
//!
//! Layout (8 bytes):
//! ```text
//! Byte 0: Modifier keys (bitfield)
//!         Bit 0 = Left Ctrl,  Bit 1 = Left Shift,
//!         Bit 2 = Left Alt,   Bit 3 = Left GUI,
//!         Bit 4 = Right Ctrl, Bit 5 = Right Shift,
//!         Bit 6 = Right Alt,  Bit 7 = Right GUI
//! Byte 1: Reserved (0x00)
//! Byte 2-7: Up to 6 simultaneous key codes (USB HID usage codes)
//! ```

use super::{HidReport, HidTransport};

/// A USB HID keyboard usage ID (usage page 0x07).
pub type Keycode = u8;

/// Keyboard report size in bytes.
pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// First and last modifier usage (Left Ctrl .. Right GUI).
const MODIFIER_FIRST: Keycode = 0xE0;
const MODIFIER_LAST: Keycode = 0xE7;

/// Standard USB HID boot-protocol keyboard report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// Modifier key bitfield.
    pub modifier: u8,
    /// Reserved byte (always 0x00 per HID spec).
    pub reserved: u8,
    /// Up to 6 simultaneously pressed key codes.
    pub keycodes: [u8; 6],
}

impl KeyboardReport {
    /// Create an empty (all-keys-released) report.
    pub const fn empty() -> Self {
        Self {
            modifier: 0,
            reserved: 0,
            keycodes: [0; 6],
        }
    }

    /// Mark `code` as held.
    ///
    /// Modifier usages set their bit in byte 0; any other usage takes the
    /// first free slot. Returns `false` if all six slots are taken.
    pub fn add(&mut self, code: Keycode) -> bool {
        if (MODIFIER_FIRST..=MODIFIER_LAST).contains(&code) {
            self.modifier |= 1 << (code - MODIFIER_FIRST);
            return true;
        }
        if self.keycodes.contains(&code) {
            return true;
        }
        match self.keycodes.iter_mut().find(|slot| **slot == 0) {
            Some(slot) => {
                *slot = code;
                true
            }
            None => false,
        }
    }

    /// Serialise into a byte slice for USB HID transmission.
    /// Returns the number of bytes written (always 8).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < KEYBOARD_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.modifier;
        buf[1] = self.reserved;
        buf[2..8].copy_from_slice(&self.keycodes);
        KEYBOARD_REPORT_SIZE
    }

    /// Returns `true` if no keys are pressed (release event).
    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.keycodes.iter().all(|&k| k == 0)
    }
}

/// Keyboard indicator LEDs the host reports back in its output report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockLed {
    NumLock,
    CapsLock,
    ScrollLock,
    Compose,
    Kana,
}

impl LockLed {
    /// Bit of this LED in the 1-byte output report.
    pub const fn mask(self) -> u8 {
        match self {
            LockLed::NumLock => 0x01,
            LockLed::CapsLock => 0x02,
            LockLed::ScrollLock => 0x04,
            LockLed::Compose => 0x08,
            LockLed::Kana => 0x10,
        }
    }

    /// Look up an LED by its script name (`CAPS_LOCK`, `NUM_LOCK`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "NUM_LOCK" => Some(LockLed::NumLock),
            "CAPS_LOCK" => Some(LockLed::CapsLock),
            "SCROLL_LOCK" => Some(LockLed::ScrollLock),
            "COMPOSE" => Some(LockLed::Compose),
            "KANA" => Some(LockLed::Kana),
            _ => None,
        }
    }

    /// Is this LED lit in the given output report byte?
    pub const fn is_set(self, output_report: u8) -> bool {
        output_report & self.mask() != 0
    }
}

/// Host-facing keyboard state.
///
/// Every change emits one report, so the host sees keys go down one at a
/// time and come up together.
#[derive(Debug, Default)]
pub struct Keyboard {
    report: KeyboardReport,
}

impl Keyboard {
    pub const fn new() -> Self {
        Self {
            report: KeyboardReport::empty(),
        }
    }

    /// Hold `code` down.
    pub async fn press<H: HidTransport>(&mut self, hid: &mut H, code: Keycode) {
        if !self.report.add(code) {
            warn!("Keyboard: more than six keys held, dropping {}", code);
            return;
        }
        hid.send(HidReport::Keyboard(self.report)).await;
    }

    /// Release every held key and modifier.
    pub async fn release_all<H: HidTransport>(&mut self, hid: &mut H) {
        self.report = KeyboardReport::empty();
        hid.send(HidReport::Keyboard(self.report)).await;
    }

    /// Press every code in order, then release them all at once.
    pub async fn chord<H: HidTransport>(&mut self, hid: &mut H, codes: &[Keycode]) {
        for &code in codes {
            self.press(hid, code).await;
        }
        self.release_all(hid).await;
    }

    /// Current report (what the host believes is held).
    pub fn report(&self) -> &KeyboardReport {
        &self.report
    }
}

// USB HID report descriptor for a boot-protocol keyboard

/// USB HID Report Descriptor for a standard keyboard.
///
/// This descriptor tells the USB host that we are a keyboard with:
///   - 8 modifier key bits (input)
///   - 1 reserved byte
///   - 5 LED indicators (output)
///   - 6 key code bytes (input)
pub const KEYBOARD_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x06, // Usage (Keyboard)
    0xA1, 0x01, // Collection (Application)
    //
    //   - Modifier keys (8 bits) -
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0xE0, //   Usage Minimum (Left Control)
    0x29, 0xE7, //   Usage Maximum (Right GUI)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x08, //   Report Count (8)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    //   - Reserved byte -
    0x95, 0x01, //   Report Count (1)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x01, //   Input (Constant) - padding
    //
    //   - LED output (5 bits + 3 padding) -
    0x05, 0x08, //   Usage Page (LEDs)
    0x19, 0x01, //   Usage Minimum (Num Lock)
    0x29, 0x05, //   Usage Maximum (Kana)
    0x95, 0x05, //   Report Count (5)
    0x75, 0x01, //   Report Size (1)
    0x91, 0x02, //   Output (Data, Variable, Absolute)
    0x95, 0x01, //   Report Count (1)
    0x75, 0x03, //   Report Size (3)
    0x91, 0x01, //   Output (Constant) - padding
    //
    //   - Key codes (6 bytes) -
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0x00, //   Usage Minimum (0)
    0x29, 0xFF, //   Usage Maximum (255)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, // Logical Maximum (255)
    0x95, 0x06, //   Report Count (6)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x00, //   Input (Data, Array)
    //
    0xC0, // End Collection
];
