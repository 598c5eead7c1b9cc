//! Per-line command dispatch.
//!
//! A line's first space-separated token is upper-cased and looked up in
//! [`KEYWORDS`]. A hit runs that keyword's handler; a miss treats the whole
//! line as a key combination. Handlers report per-line problems as
//! [`LineError`](crate::error::LineError), which is logged here and does not
//! stop the run. Every other error propagates to the top-level caller.

use alloc::string::String;
use alloc::vec::Vec;
use core::str::SplitWhitespace;
use core::time::Duration;

use crate::action::{self, translate_consumer, translate_mouse};
use crate::board::{Board, Slot, StatusDisplay};
use crate::config::{
    BLINK_DEFAULT_MS, BLINK_DEFAULT_REPEATS, LED_POLL_INTERVAL, STRING_ECHO_CHARS,
    WIFI_POLL_INTERVAL,
};
use crate::error::{Error, LineError, Result};
use crate::exec_log::Elapsed;
use crate::hid::LockLed;
use crate::runtime::Engine;
use crate::store::ScriptStore;
use crate::typing::{jitter_offsets, Typist};

/// Interpreter keywords.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Keyword {
    Rem,
    Delay,
    String,
    StringLn,
    Print,
    DefaultDelay,
    Led,
    BlinkLed,
    Import,
    Locale,
    Mouse,
    Cc,
    PsychoMouse,
    WaitForWifi,
    WaitForLed,
    Repeat,
}

pub const KEYWORDS: &[(&str, Keyword)] = &[
    ("REM", Keyword::Rem),
    ("DELAY", Keyword::Delay),
    ("STRING", Keyword::String),
    ("STRINGLN", Keyword::StringLn),
    ("PRINT", Keyword::Print),
    ("DEFAULTDELAY", Keyword::DefaultDelay),
    ("DEFAULT_DELAY", Keyword::DefaultDelay),
    ("LED", Keyword::Led),
    ("BLINK_LED", Keyword::BlinkLed),
    ("IMPORT", Keyword::Import),
    ("LOCALE", Keyword::Locale),
    ("MOUSE", Keyword::Mouse),
    ("CC", Keyword::Cc),
    ("PSYCHOMOUSE", Keyword::PsychoMouse),
    ("WAITFORWIFI", Keyword::WaitForWifi),
    ("WAITFORLED", Keyword::WaitForLed),
    ("REPEAT", Keyword::Repeat),
];

impl Keyword {
    /// Look up an upper-cased command token.
    pub fn lookup(command: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(name, _)| *name == command)
            .map(|&(_, kw)| kw)
    }
}

/// One tokenized script line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line<'a> {
    pub raw: &'a str,
    /// First token, upper-cased.
    pub command: String,
    /// Everything after the first space, untouched.
    pub rest: &'a str,
}

impl<'a> Line<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let (first, rest) = raw.split_once(' ').unwrap_or((raw, ""));
        Self {
            raw,
            command: first.to_uppercase(),
            rest,
        }
    }

    pub fn keyword(&self) -> Option<Keyword> {
        Keyword::lookup(&self.command)
    }

    /// Whitespace-separated arguments after the command.
    pub fn args(&self) -> SplitWhitespace<'a> {
        self.rest.split_whitespace()
    }

    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.args().nth(index)
    }

    fn required(&self, index: usize) -> Result<&'a str> {
        self.arg(index)
            .ok_or_else(|| Error::missing_argument(&self.command))
    }

    fn number<T: core::str::FromStr>(&self, index: usize) -> Result<Option<T>> {
        self.arg(index)
            .map(|arg| {
                arg.parse()
                    .map_err(|_| Error::invalid_number(&self.command, arg))
            })
            .transpose()
    }

    /// Fractional milliseconds, as accepted by `DELAY` and `BLINK_LED`.
    /// Rounded to whole microseconds so integer arguments stay exact.
    fn millis(&self, index: usize) -> Result<Option<Duration>> {
        let Some(ms) = self.number::<f64>(index)? else {
            return Ok(None);
        };
        // +0.5 then truncate: round-half-up without `f64::round` (std only).
        let micros = ms * 1000.0 + 0.5;
        if !(0.5..u64::MAX as f64).contains(&micros) {
            let arg = self.arg(index).unwrap_or_default();
            return Err(Error::invalid_number(&self.command, arg));
        }
        Ok(Some(Duration::from_micros(micros as u64)))
    }
}

/// Colon-separated lower-case hex, e.g. `de:ad:be:ef:00:01`.
fn format_bssid(bssid: &[u8; 6]) -> String {
    let mut out = String::with_capacity(17);
    for (i, byte) in bssid.iter().enumerate() {
        if i > 0 {
            out.push(':');
        }
        out.push_str(&alloc::format!("{:02x}", byte));
    }
    out
}

impl<B: Board, D: StatusDisplay, S: ScriptStore> Engine<B, D, S> {
    /// Execute one line. Empty lines do nothing.
    pub(crate) async fn dispatch(&mut self, raw: &str) -> Result<()> {
        if raw.is_empty() {
            return Ok(());
        }
        let line = Line::parse(raw);
        trace!("line: {}", raw);
        let outcome = match line.keyword() {
            Some(Keyword::Rem) | Some(Keyword::Repeat) => Ok(()),
            Some(Keyword::Delay) => self.delay(&line).await,
            Some(Keyword::String) => {
                self.type_string(line.rest).await;
                Ok(())
            }
            Some(Keyword::StringLn) => {
                self.type_string(line.rest).await;
                self.press_keys("ENTER").await;
                Ok(())
            }
            Some(Keyword::Print) => {
                self.echo_fmt(format_args!("[SCRIPT]: {}", line.rest));
                Ok(())
            }
            Some(Keyword::DefaultDelay) => self.default_delay(&line),
            Some(Keyword::Led) => {
                self.led(&line);
                Ok(())
            }
            Some(Keyword::BlinkLed) => self.blink_led(&line).await,
            Some(Keyword::Import) => {
                let name = line.required(0)?;
                self.import(name).await
            }
            Some(Keyword::Locale) => {
                let name = line.required(0)?;
                self.state.set_locale(name)?;
                debug!("locale: {}", self.state.locale.name());
                Ok(())
            }
            Some(Keyword::Mouse) => self.mouse(&line).await,
            Some(Keyword::Cc) => self.consumer(&line).await,
            Some(Keyword::PsychoMouse) => self.psycho_mouse(&line),
            Some(Keyword::WaitForWifi) => {
                self.wait_for_wifi(line.rest).await;
                Ok(())
            }
            Some(Keyword::WaitForLed) => self.wait_for_led(&line).await,
            None => {
                self.press_keys(raw).await;
                Ok(())
            }
        };
        match outcome {
            Err(Error::Line(err)) => {
                self.skip_line(&err);
                Ok(())
            }
            other => other,
        }
    }

    fn skip_line(&mut self, err: &LineError) {
        warn!("line skipped: {}", err);
        self.echo_fmt(format_args!("{}", err));
    }

    async fn delay(&mut self, line: &Line<'_>) -> Result<()> {
        line.required(0)?;
        if let Some(duration) = line.millis(0)? {
            self.suspend(duration).await;
        }
        Ok(())
    }

    fn default_delay(&mut self, line: &Line<'_>) -> Result<()> {
        line.required(0)?;
        if let Some(units) = line.number::<u64>(0)? {
            self.state.set_default_delay_units(units);
        }
        Ok(())
    }

    fn led(&mut self, line: &Line<'_>) {
        let on = match line.arg(0) {
            None => !self.board.status_led(),
            Some(state) => state.eq_ignore_ascii_case("ON"),
        };
        self.board.set_status_led(on);
    }

    async fn blink_led(&mut self, line: &Line<'_>) -> Result<()> {
        let phase = line
            .millis(0)?
            .unwrap_or(Duration::from_millis(BLINK_DEFAULT_MS));
        let repeats = line.number::<u32>(1)?.unwrap_or(BLINK_DEFAULT_REPEATS);
        self.blink(phase, repeats).await;
        Ok(())
    }

    /// On for `phase`, off for `phase`, `repeats` times.
    pub(crate) async fn blink(&mut self, phase: Duration, repeats: u32) {
        for _ in 0..repeats {
            self.board.set_status_led(true);
            self.suspend(phase).await;
            self.board.set_status_led(false);
            self.suspend(phase).await;
        }
    }

    /// Raw key line: resolve every token and press them as one chord.
    async fn press_keys(&mut self, raw: &str) {
        let action = action::translate_keys(raw, &self.state.locale);
        for token in &action.unknown {
            self.echo_fmt(format_args!("Unknown key: <{}>", token));
        }
        self.echo_fmt(format_args!("{} {}", raw, action));
        action.execute(&mut self.keyboard, &mut self.board).await;
    }

    async fn type_string(&mut self, text: &str) {
        let length = text.chars().count();
        let prefix: String = text.chars().take(STRING_ECHO_CHARS).collect();
        let ellipsis = if length > STRING_ECHO_CHARS { "..." } else { "" };
        self.echo_fmt(format_args!("STRING {}{}", prefix, ellipsis));

        let jitter = if self.state.psycho_enabled {
            Some(jitter_offsets(&mut self.rng, &self.state.psycho))
        } else {
            None
        };
        let chunk_size = self.state.psycho.chunk_size;

        let started = self.board.now();
        let mut typist = Typist {
            locale: &self.state.locale,
            keyboard: &mut self.keyboard,
            mouse: &mut self.mouse,
            hid: &mut self.board,
        };
        let unsupported: Vec<char> = match &jitter {
            Some(offsets) => typist.write_jittered(text, chunk_size, offsets).await,
            None => typist.write(text).await,
        };
        let elapsed = self.board.now().saturating_sub(started);

        for c in unsupported {
            self.echo_fmt(format_args!("Unsupported character: <{}>", c));
        }
        self.echo_fmt(format_args!(
            " -> {} characters in {}",
            length,
            Elapsed(elapsed)
        ));
    }

    async fn mouse(&mut self, line: &Line<'_>) -> Result<()> {
        let action = translate_mouse(line.rest)?;
        self.echo_fmt(format_args!("MOUSE {}{}", line.rest, action));
        action.execute(&mut self.mouse, &mut self.board).await;
        Ok(())
    }

    async fn consumer(&mut self, line: &Line<'_>) -> Result<()> {
        let action = translate_consumer(line.rest)?;
        self.echo_fmt(format_args!("CC {}{}", line.rest, action));
        action.execute(&mut self.consumer, &mut self.board).await;
        Ok(())
    }

    /// `PSYCHOMOUSE` enables, `PSYCHOMOUSE OFF` disables,
    /// `PSYCHOMOUSE chars [range]` enables and reconfigures.
    fn psycho_mouse(&mut self, line: &Line<'_>) -> Result<()> {
        match line.arg(0) {
            Some(arg) if arg.eq_ignore_ascii_case("OFF") => {
                self.state.psycho_enabled = false;
            }
            Some(_) => {
                let chunk_size = line.number::<usize>(0)?.unwrap_or_default();
                let range = line.number::<i32>(1)?;
                self.state.configure_psycho(chunk_size, range);
                self.state.psycho_enabled = true;
            }
            None => self.state.psycho_enabled = true,
        }
        Ok(())
    }

    /// Block until an access point named `ssid` (case-insensitive) shows up.
    async fn wait_for_wifi(&mut self, ssid: &str) {
        self.echo("");
        self.echo_fmt(format_args!("Waiting for Wifi AP \"{}\"...", ssid));
        self.echo("--------------------------------------------------");
        self.display.render("waiting for wifi", Slot::Bottom, false);

        let started = self.board.now();
        loop {
            let found = self
                .board
                .scan()
                .await
                .into_iter()
                .find(|ap| ap.ssid.to_lowercase() == ssid.to_lowercase());
            if let Some(ap) = found {
                let waited = self.board.now().saturating_sub(started).as_secs_f32();
                self.echo_fmt(format_args!(
                    " --> Access Point present after {:.2} seconds",
                    waited
                ));
                self.echo_fmt(format_args!("     * SSID:  {}", ap.ssid));
                self.echo_fmt(format_args!("     * BSSID: {}", format_bssid(&ap.bssid)));
                self.echo_fmt(format_args!("     * RSSI:  {}", ap.rssi));
                break;
            }
            self.suspend(WIFI_POLL_INTERVAL).await;
        }
        self.display.render("... running ...", Slot::Bottom, false);
    }

    /// `WAITFORLED name ON|OFF`: poll the host-driven lock LED.
    async fn wait_for_led(&mut self, line: &Line<'_>) -> Result<()> {
        let name = line.required(0)?.to_uppercase();
        let led = LockLed::from_name(&name).ok_or_else(|| LineError::UnknownLed(name.clone()))?;
        let state = line.required(1)?;
        let want = state.eq_ignore_ascii_case("ON");

        self.echo_fmt(format_args!(
            "Waiting for {} LED to be {}...",
            name,
            state.to_lowercase()
        ));
        let status = alloc::format!("waiting for {}", name);
        self.display.render(&status, Slot::Bottom, false);
        while self.board.lock_led_on(led) != want {
            self.suspend(LED_POLL_INTERVAL).await;
        }
        self.display.render("... running ...", Slot::Bottom, false);
        Ok(())
    }
}
