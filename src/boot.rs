//! Boot mode selection.
//!
//! At power-up the firmware samples [`TRIGGER_SLOTS`] inputs (active-low).
//! The first grounded one decides what the device does until reset.

use alloc::format;
use core::time::Duration;

use crate::board::{Board, StatusDisplay};
use crate::config::{JIGGLER_SLOT, PAYLOAD_SLOTS, TRIGGER_SLOTS};
use crate::error::{Error, Result};
use crate::runtime::Engine;
use crate::store::ScriptStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootMode {
    /// Run the payload configured for this slot.
    Payload(usize),
    /// Keep the host awake.
    Jiggler,
    /// Nothing grounded: serve the remote API only.
    Setup,
}

impl BootMode {
    /// `grounded[i]` is true when trigger input `i` reads low.
    pub fn select(grounded: [bool; TRIGGER_SLOTS]) -> Self {
        match grounded.iter().position(|&g| g) {
            Some(slot) if slot < PAYLOAD_SLOTS => BootMode::Payload(slot),
            Some(JIGGLER_SLOT) => BootMode::Jiggler,
            _ => BootMode::Setup,
        }
    }
}

impl<B: Board, D: StatusDisplay, S: ScriptStore> Engine<B, D, S> {
    /// Act on the selected boot mode.
    ///
    /// Payload mode returns once the script finishes. Jiggler mode never
    /// returns. Setup mode returns immediately.
    pub async fn boot(&mut self, mode: BootMode) -> Result<()> {
        info!("boot mode: {}", mode);
        match mode {
            BootMode::Payload(slot) => {
                let settle = Duration::from_millis(self.settings.initial_sleep_ms);
                self.board.sleep(settle).await;
                let name = self.settings.payloads.get(slot).copied();
                match name {
                    Some(name) => self.run_script(name).await,
                    None => Err(Error::ScriptNotFound(format!("payload slot {}", slot))),
                }
            }
            BootMode::Jiggler => {
                self.run_jiggler().await;
                Ok(())
            }
            BootMode::Setup => Ok(()),
        }
    }
}
