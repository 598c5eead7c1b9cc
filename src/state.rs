//! Interpreter-global state shared by every line of a run (and by nested
//! imports).

use core::time::Duration;

use crate::config::{PsychoSettings, Settings, DEFAULT_DELAY_UNIT_MS};
use crate::error::Result;
use crate::locale::Locale;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterpreterState {
    /// Suspension applied after every line.
    pub default_delay: Duration,
    pub psycho_enabled: bool,
    pub psycho: PsychoSettings,
    /// Active layout. Replaced as a whole by `LOCALE`.
    pub locale: Locale,
    /// Sum of every suspension since the current top-level run began.
    pub cumulative_delay: Duration,
}

impl InterpreterState {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            default_delay: Duration::from_millis(settings.default_delay_ms),
            psycho_enabled: false,
            psycho: settings.psycho,
            locale: Locale::load(settings.locale)?,
            cumulative_delay: Duration::ZERO,
        })
    }

    pub fn set_locale(&mut self, name: &str) -> Result<()> {
        self.locale = Locale::load(name)?;
        Ok(())
    }

    /// `DEFAULTDELAY n`: n units of [`DEFAULT_DELAY_UNIT_MS`].
    pub fn set_default_delay_units(&mut self, units: u64) {
        self.default_delay = Duration::from_millis(units.saturating_mul(DEFAULT_DELAY_UNIT_MS));
    }

    /// `PSYCHOMOUSE chars [range]`. Values are clamped into a usable range.
    pub fn configure_psycho(&mut self, chunk_size: usize, jitter_range: Option<i32>) {
        self.psycho.chunk_size = chunk_size.max(1);
        if let Some(range) = jitter_range {
            self.psycho.jitter_range = range.saturating_abs();
        }
        self.psycho.jitter_samples = self.psycho.jitter_samples.max(1);
    }

    pub fn add_delay(&mut self, delay: Duration) {
        self.cumulative_delay = self.cumulative_delay.saturating_add(delay);
    }
}
