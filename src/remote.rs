//! Operations the network layer calls.
//!
//! Payloads and logs cross the wire base64-encoded (standard alphabet,
//! padded). Each operation borrows the engine mutably, so a remote run
//! can never overlap a pin-triggered one.

use alloc::string::String;
use alloc::vec::Vec;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::board::{Board, StatusDisplay};
use crate::error::{Error, Result};
use crate::runtime::Engine;
use crate::store::ScriptStore;

/// Label used for scripts that never touched the store.
pub const FILELESS_LABEL: &str = "<fileless script>";

/// Extension of scripts the listing reports.
pub const SCRIPT_EXTENSION: &str = ".dd";

/// Result of a remote run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilelessRun {
    /// Base64 of the full execution log (also on failure).
    pub log: String,
    /// Why the run stopped early, if it did.
    pub error: Option<Error>,
}

/// Base64 text to UTF-8 script source.
pub fn decode_payload(payload: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|_| Error::InvalidPayload)?;
    String::from_utf8(bytes).map_err(|_| Error::InvalidPayload)
}

pub fn encode_payload(text: &str) -> String {
    STANDARD.encode(text)
}

impl<B: Board, D: StatusDisplay, S: ScriptStore> Engine<B, D, S> {
    /// Decode and run a script sent over the network.
    pub async fn run_fileless(&mut self, payload: &str) -> FilelessRun {
        let result = match decode_payload(payload) {
            Ok(source) => self.run_source(FILELESS_LABEL, &source).await,
            Err(err) => {
                self.log.clear();
                self.report_abort(&err);
                Err(err)
            }
        };
        FilelessRun {
            log: encode_payload(self.log.as_str()),
            error: result.err(),
        }
    }

    /// Stored script names ending in `.dd`.
    pub async fn list_scripts(&mut self) -> Vec<String> {
        self.store
            .names()
            .await
            .into_iter()
            .filter(|name| name.ends_with(SCRIPT_EXTENSION))
            .collect()
    }

    /// Base64 text of a stored script.
    pub async fn load_script(&mut self, name: &str) -> Option<String> {
        self.store
            .load(name)
            .await
            .map(|text| encode_payload(&text))
    }

    /// Decode `payload` and store it as `name`.
    pub async fn save_script(&mut self, name: &str, payload: &str) -> Result<()> {
        let text = decode_payload(payload)?;
        info!("saving {} ({} bytes)", name, text.len());
        self.store.save(name, &text).await
    }
}
