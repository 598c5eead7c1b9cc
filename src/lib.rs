//! Script interpreter for a USB HID injection device.
//!
//! The library holds everything that does not touch hardware: the HID
//! report layer, keyboard locales, the line dispatcher and the run engine.
//! It is `no_std` + `alloc` on target and runs its tests on the host.
//!
//! Usage: `cargo test` (host) or `cargo build --release --features embedded`
//! for the nRF52840 firmware in `main.rs`.
//!
//! ```text
//! script text ─► runtime::Engine ─► dispatch ─► action / typing ─► hid ─► Board
//!                      │                                                  ▲
//!                      └──── ExecutionLog + Console ◄──── echo ───────────┘
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

// Must come first so the logging macros are visible below.
#[macro_use]
mod fmt;

pub mod action;
pub mod board;
pub mod boot;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod exec_log;
pub mod hid;
pub mod jiggler;
pub mod keycode;
pub mod locale;
pub mod remote;
pub mod runtime;
pub mod state;
pub mod store;
pub mod typing;

pub use board::{AccessPoint, Board, Clock, Console, LockLeds, NoDisplay, Slot, StatusDisplay, StatusLed, WifiScanner};
pub use boot::BootMode;
pub use config::Settings;
pub use error::{Error, LineError, Result};
pub use exec_log::ExecutionLog;
pub use hid::{HidReport, HidTransport};
pub use locale::Locale;
pub use remote::FilelessRun;
pub use runtime::Engine;
pub use store::{MemoryStore, ScriptStore};
