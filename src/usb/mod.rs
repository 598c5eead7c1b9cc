//! USB device subsystem: a composite HID device on the nRF52840's
//! full-speed controller, driven by `embassy-usb`.
//!
//! - Interface 0: keyboard (boot protocol, with LED output report)
//! - Interface 1: mouse (boot protocol, 5 buttons + wheel)
//! - Interface 2: consumer control
//!
//! The interpreter pushes [`hidscript::HidReport`]s into [`hid_device::HID_REPORTS`];
//! the writer task forwards each one to its endpoint.

pub mod hid_device;
