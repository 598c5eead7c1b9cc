//! Application-wide constants and boot-time settings.
//!
//! All timing parameters, protocol constants, and interpreter defaults
//! live here so they can be tuned in one place.

use core::time::Duration;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "hidscript";
pub const USB_PRODUCT: &str = "HID Keyboard";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 1;

// Interpreter timing

/// One `DEFAULTDELAY` unit. `DEFAULTDELAY 5` means 50 ms after every line,
/// while `DELAY 5` means 5 ms.
pub const DEFAULT_DELAY_UNIT_MS: u64 = 10;

/// `BLINK_LED` without arguments: on/off phase length and repetitions.
pub const BLINK_DEFAULT_MS: u64 = 200;
pub const BLINK_DEFAULT_REPEATS: u32 = 1;

/// Pause between two Wi-Fi scans while waiting in `WAITFORWIFI`.
pub const WIFI_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Pause between two lock-LED checks while waiting in `WAITFORLED`.
pub const LED_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Deepest chain of nested `IMPORT`s before the run aborts.
pub const MAX_IMPORT_DEPTH: usize = 8;

/// Execution log size cap (bytes). Lines past it are dropped.
pub const MAX_LOG_BYTES: usize = 16 * 1024;

/// `STRING` echoes at most this many characters of its text.
pub const STRING_ECHO_CHARS: usize = 32;

// Psycho-mouse

/// Characters typed between two pointer jitters.
pub const PSYCHO_CHUNK_SIZE: usize = 5;

/// Maximum jitter (pixels) in either direction.
pub const PSYCHO_JITTER_RANGE: i32 = 250;

/// Number of random offsets precomputed per `STRING`.
pub const PSYCHO_JITTER_SAMPLES: usize = 10;

// Mouse jiggler

pub const JIGGLER_DELAY_MIN_SECS: u32 = 1;
pub const JIGGLER_DELAY_MAX_SECS: u32 = 15;
pub const JIGGLER_MOVEMENT: i32 = 10;
pub const JIGGLER_BLINK_MS: u64 = 150;
pub const JIGGLER_STARTUP_BLINK_MS: u64 = 80;
pub const JIGGLER_STARTUP_BLINK_REPEATS: u32 = 6;

// Trigger pins
//
// Grounding one of these at boot selects the run mode (active-low with
// internal pull-up). Logical slots; concrete pins are chosen in `main.rs`.
//
//   Slot 0..=5  → run payload 0..=5
//   Slot 6      → mouse jiggler
//   none        → setup mode (remote API only)

/// Number of payload trigger slots.
pub const PAYLOAD_SLOTS: usize = 6;

/// Trigger slot that starts the mouse jiggler.
pub const JIGGLER_SLOT: usize = 6;

/// Total number of trigger inputs sampled at boot.
pub const TRIGGER_SLOTS: usize = 7;

/// Time given to the host to enumerate the device before anything is typed.
pub const INITIAL_SLEEP_MS: u64 = 500;

// Script storage

/// Flash page index where script storage starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 192;

/// Number of flash pages reserved for script storage.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 32;

/// Maximum number of stored scripts.
pub const MAX_STORED_SCRIPTS: usize = 16;

/// Largest script the flash store accepts (bytes).
pub const MAX_SCRIPT_SIZE: usize = 4000;

/// Psycho-mouse parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PsychoSettings {
    pub chunk_size: usize,
    pub jitter_range: i32,
    pub jitter_samples: usize,
}

impl Default for PsychoSettings {
    fn default() -> Self {
        Self {
            chunk_size: PSYCHO_CHUNK_SIZE,
            jitter_range: PSYCHO_JITTER_RANGE,
            jitter_samples: PSYCHO_JITTER_SAMPLES,
        }
    }
}

/// Mouse jiggler parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JigglerSettings {
    pub delay_min_secs: u32,
    pub delay_max_secs: u32,
    pub movement: i32,
    /// Blink after each jiggle (`None` disables).
    pub blink_ms: Option<u64>,
    /// Startup blink as (phase ms, repetitions) (`None` disables).
    pub startup_blink: Option<(u64, u32)>,
}

impl Default for JigglerSettings {
    fn default() -> Self {
        Self {
            delay_min_secs: JIGGLER_DELAY_MIN_SECS,
            delay_max_secs: JIGGLER_DELAY_MAX_SECS,
            movement: JIGGLER_MOVEMENT,
            blink_ms: Some(JIGGLER_BLINK_MS),
            startup_blink: Some((JIGGLER_STARTUP_BLINK_MS, JIGGLER_STARTUP_BLINK_REPEATS)),
        }
    }
}

/// Boot-time settings handed to the engine.
///
/// The firmware builds these once at startup; nothing here changes while a
/// script runs (the interpreter keeps its own mutable copy).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Initial keyboard locale.
    pub locale: &'static str,
    /// Initial delay after every line (ms).
    pub default_delay_ms: u64,
    pub psycho: PsychoSettings,
    pub jiggler: JigglerSettings,
    /// Script run for each payload trigger slot.
    pub payloads: [&'static str; PAYLOAD_SLOTS],
    pub initial_sleep_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: "US",
            default_delay_ms: 0,
            psycho: PsychoSettings::default(),
            jiggler: JigglerSettings::default(),
            payloads: [
                "payload1.dd",
                "payload2.dd",
                "payload3.dd",
                "payload4.dd",
                "payload5.dd",
                "payload6.dd",
            ],
            initial_sleep_ms: INITIAL_SLEEP_MS,
        }
    }
}
