//! HID report types, host-facing device state, and the transport seam.
//!
//! The interpreter never touches USB directly. It mutates the device
//! emulators in this module ([`keyboard::Keyboard`], [`mouse::Mouse`],
//! [`consumer::ConsumerControl`]), which turn each change into a
//! [`HidReport`] and hand it to a [`HidTransport`].

pub mod consumer;
pub mod keyboard;
pub mod mouse;


pub use consumer::{ConsumerCode, ConsumerControl, ConsumerReport};
pub use keyboard::{Keyboard, KeyboardReport, Keycode, LockLed};
pub use mouse::{Mouse, MouseReport};

/// One report for one of the three HID interfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidReport {
    Keyboard(KeyboardReport),
    Mouse(MouseReport),
    Consumer(ConsumerReport),
}

impl HidReport {
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        match self {
            HidReport::Keyboard(k) => k.serialize(buf),
            HidReport::Mouse(m) => m.serialize(buf),
            HidReport::Consumer(c) => c.serialize(buf),
        }
    }

    pub fn is_keyboard(&self) -> bool {
        matches!(self, HidReport::Keyboard(_))
    }

    pub fn is_mouse(&self) -> bool {
        matches!(self, HidReport::Mouse(_))
    }

    pub fn is_consumer(&self) -> bool {
        matches!(self, HidReport::Consumer(_))
    }
}

/// Physical HID emission.
///
/// Sending is assumed to succeed at this layer; retries and error recovery
/// belong to the transport implementation.
#[allow(async_fn_in_trait)]
pub trait HidTransport {
    async fn send(&mut self, report: HidReport);
}
