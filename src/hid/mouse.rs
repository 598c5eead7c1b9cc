//! USB HID mouse report (boot protocol compatible) and the mouse device
//! state the interpreter drives.
//!
//! Layout (4 bytes):
//! ```text
//! Byte 0: Button bitfield
//!         Bit 0 = Left, Bit 1 = Right, Bit 2 = Middle,
//!         Bit 3 = Back, Bit 4 = Forward
//! Byte 1: X displacement (signed, -127..127)
//! Byte 2: Y displacement (signed, -127..127)
//! Byte 3: Scroll wheel  (signed, -127..127)
//! ```

use super::{HidReport, HidTransport};

/// Mouse report size in bytes.
pub const MOUSE_REPORT_SIZE: usize = 4;

/// Largest displacement a single report can carry.
const MAX_STEP: i32 = 127;

pub const LEFT_BUTTON: u8 = 0x01;
pub const RIGHT_BUTTON: u8 = 0x02;
pub const MIDDLE_BUTTON: u8 = 0x04;
pub const BACK_BUTTON: u8 = 0x08;
pub const FORWARD_BUTTON: u8 = 0x10;

/// Script button names and their bits.
const BUTTONS: &[(&str, u8)] = &[
    ("LEFT", LEFT_BUTTON),
    ("RIGHT", RIGHT_BUTTON),
    ("MIDDLE", MIDDLE_BUTTON),
    ("BACK", BACK_BUTTON),
    ("FORWARD", FORWARD_BUTTON),
];

/// Look up a button bit by (upper-case) script name.
pub fn button_from_name(name: &str) -> Option<u8> {
    BUTTONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, bit)| bit)
}

/// Standard USB HID boot-protocol mouse report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport {
    /// Button bitfield (bit 0 = left, bit 1 = right, bit 2 = middle).
    pub buttons: u8,
    /// Relative X movement (signed).
    pub x: i8,
    /// Relative Y movement (signed).
    pub y: i8,
    /// Scroll wheel delta (signed).
    pub wheel: i8,
}

impl MouseReport {
    /// Create an idle (no movement, no buttons) report.
    pub const fn empty() -> Self {
        Self {
            buttons: 0,
            x: 0,
            y: 0,
            wheel: 0,
        }
    }

    /// Serialise into a byte slice for USB HID transmission.
    /// Returns the number of bytes written (always 4).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < MOUSE_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.buttons;
        buf[1] = self.x as u8;
        buf[2] = self.y as u8;
        buf[3] = self.wheel as u8;
        MOUSE_REPORT_SIZE
    }

    /// Returns `true` when no buttons are pressed and there is no movement.
    pub fn is_idle(&self) -> bool {
        self.buttons == 0 && self.x == 0 && self.y == 0 && self.wheel == 0
    }
}

fn step(remaining: i32) -> i8 {
    remaining.clamp(-MAX_STEP, MAX_STEP) as i8
}

/// Host-facing mouse state: which buttons are currently held.
#[derive(Debug, Default)]
pub struct Mouse {
    buttons: u8,
}

impl Mouse {
    pub const fn new() -> Self {
        Self { buttons: 0 }
    }

    /// Move the pointer and/or wheel by arbitrary amounts.
    ///
    /// Motions beyond ±127 are split into as many reports as needed.
    pub async fn move_by<H: HidTransport>(&mut self, hid: &mut H, x: i32, y: i32, wheel: i32) {
        let (mut x, mut y, mut wheel) = (x, y, wheel);
        while x != 0 || y != 0 || wheel != 0 {
            let report = MouseReport {
                buttons: self.buttons,
                x: step(x),
                y: step(y),
                wheel: step(wheel),
            };
            x -= i32::from(report.x);
            y -= i32::from(report.y);
            wheel -= i32::from(report.wheel);
            hid.send(HidReport::Mouse(report)).await;
        }
    }

    pub async fn press<H: HidTransport>(&mut self, hid: &mut H, buttons: u8) {
        self.buttons |= buttons;
        self.send_buttons(hid).await;
    }

    pub async fn release<H: HidTransport>(&mut self, hid: &mut H, buttons: u8) {
        self.buttons &= !buttons;
        self.send_buttons(hid).await;
    }

    pub async fn release_all<H: HidTransport>(&mut self, hid: &mut H) {
        self.buttons = 0;
        self.send_buttons(hid).await;
    }

    pub async fn click<H: HidTransport>(&mut self, hid: &mut H, buttons: u8) {
        self.press(hid, buttons).await;
        self.release(hid, buttons).await;
    }

    /// Buttons currently held.
    pub fn buttons(&self) -> u8 {
        self.buttons
    }

    async fn send_buttons<H: HidTransport>(&mut self, hid: &mut H) {
        let report = MouseReport {
            buttons: self.buttons,
            ..MouseReport::empty()
        };
        hid.send(HidReport::Mouse(report)).await;
    }
}

// USB HID report descriptor for a boot-protocol mouse

/// USB HID Report Descriptor for a 5-button mouse with scroll wheel.
pub const MOUSE_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x02, // Usage (Mouse)
    0xA1, 0x01, // Collection (Application)
    0x09, 0x01, //   Usage (Pointer)
    0xA1, 0x00, //   Collection (Physical)
    //
    //   - Buttons (5 bits + 3 padding) -
    0x05, 0x09, //     Usage Page (Buttons)
    0x19, 0x01, //     Usage Minimum (Button 1)
    0x29, 0x05, //     Usage Maximum (Button 5)
    0x15, 0x00, //     Logical Minimum (0)
    0x25, 0x01, //     Logical Maximum (1)
    0x95, 0x05, //     Report Count (5)
    0x75, 0x01, //     Report Size (1)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0x95, 0x01, //     Report Count (1)
    0x75, 0x03, //     Report Size (3)
    0x81, 0x01, //     Input (Constant) - padding
    //
    //   - X, Y displacement -
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x15, 0x81, //     Logical Minimum (-127)
    0x25, 0x7F, //     Logical Maximum (127)
    0x75, 0x08, //     Report Size (8)
    0x95, 0x02, //     Report Count (2)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    //
    //   - Scroll wheel -
    0x09, 0x38, //     Usage (Wheel)
    0x15, 0x81, //     Logical Minimum (-127)
    0x25, 0x7F, //     Logical Maximum (127)
    0x75, 0x08, //     Report Size (8)
    0x95, 0x01, //     Report Count (1)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    //
    0xC0, //   End Collection (Physical)
    0xC0, // End Collection (Application)
];
