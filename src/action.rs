//! Action translators and executors.
//!
//! Translators are pure: they turn the text after a keyword into a typed
//! action (or a [`LineError`]). Executors replay an action on the device
//! emulators. Keeping the two apart lets the dispatcher log exactly what a
//! line resolved to before anything reaches the host.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::error::{Error, LineError, Result};
use crate::hid::{mouse, ConsumerCode, ConsumerControl, HidTransport, Keyboard, Keycode, Mouse};
use crate::keycode;
use crate::locale::Locale;

/// A keystroke chord: every code is pressed in order, then all released.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyAction {
    pub codes: Vec<Keycode>,
    /// Upper-cased tokens that resolved to nothing.
    pub unknown: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MouseAction {
    Move { dx: i32, dy: i32 },
    Wheel(i32),
    Click(u8),
    Press(u8),
    Release(u8),
    ReleaseAll,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsumerAction {
    Send(ConsumerCode),
    Press(ConsumerCode),
    Release,
}

/// Resolve every whitespace-separated token of a raw key line.
pub fn translate_keys(line: &str, locale: &Locale) -> KeyAction {
    let mut action = KeyAction::default();
    for token in line.split_whitespace() {
        let token = token.to_uppercase();
        match keycode::resolve(&token, locale) {
            Some(code) => action.codes.push(code),
            None => action.unknown.push(token),
        }
    }
    action
}

/// `MOUSE <MOVE dx dy | WHEEL n | CLICK|PRESS|RELEASE buttons.. | RELEASEALL>`
pub fn translate_mouse(rest: &str) -> Result<MouseAction> {
    let mut args = rest.split_whitespace();
    let sub = args.next().unwrap_or_default().to_uppercase();
    let action = match sub.as_str() {
        "MOVE" => MouseAction::Move {
            dx: int_arg("MOUSE MOVE", args.next())?,
            dy: int_arg("MOUSE MOVE", args.next())?,
        },
        "WHEEL" => MouseAction::Wheel(int_arg("MOUSE WHEEL", args.next())?),
        "CLICK" => MouseAction::Click(buttons("MOUSE CLICK", args)?),
        "PRESS" => MouseAction::Press(buttons("MOUSE PRESS", args)?),
        "RELEASE" => MouseAction::Release(buttons("MOUSE RELEASE", args)?),
        "RELEASEALL" => MouseAction::ReleaseAll,
        _ => return Err(LineError::UnknownMouseCommand(sub).into()),
    };
    Ok(action)
}

/// `CC <SEND name | PRESS name | RELEASE>`
pub fn translate_consumer(rest: &str) -> Result<ConsumerAction> {
    let rest = rest.trim_start();
    let (sub, name) = rest.split_once(' ').unwrap_or((rest, ""));
    let sub = sub.to_uppercase();
    let code = || {
        let name = name.trim().to_uppercase();
        ConsumerCode::from_name(&name).ok_or(LineError::UnknownConsumerCode(name))
    };
    let action = match sub.as_str() {
        "SEND" => ConsumerAction::Send(code()?),
        "PRESS" => ConsumerAction::Press(code()?),
        "RELEASE" => ConsumerAction::Release,
        _ => return Err(LineError::UnknownConsumerCommand(sub).into()),
    };
    Ok(action)
}

fn int_arg(command: &str, arg: Option<&str>) -> Result<i32> {
    let arg = arg.ok_or_else(|| Error::missing_argument(command))?;
    arg.parse()
        .map_err(|_| Error::invalid_number(command, arg))
}

fn buttons<'a>(command: &str, names: impl Iterator<Item = &'a str>) -> Result<u8> {
    let mut mask = None;
    for name in names {
        let name = name.to_uppercase();
        let bit = mouse::button_from_name(&name).ok_or(LineError::UnknownMouseButton(name))?;
        mask = Some(mask.unwrap_or(0) | bit);
    }
    mask.ok_or_else(|| Error::missing_argument(command))
}

impl KeyAction {
    pub async fn execute<H: HidTransport>(&self, keyboard: &mut Keyboard, hid: &mut H) {
        keyboard.chord(hid, &self.codes).await;
    }
}

impl MouseAction {
    pub async fn execute<H: HidTransport>(self, m: &mut Mouse, hid: &mut H) {
        match self {
            MouseAction::Move { dx, dy } => m.move_by(hid, dx, dy, 0).await,
            MouseAction::Wheel(amount) => m.move_by(hid, 0, 0, amount).await,
            MouseAction::Click(b) => m.click(hid, b).await,
            MouseAction::Press(b) => m.press(hid, b).await,
            MouseAction::Release(b) => m.release(hid, b).await,
            MouseAction::ReleaseAll => m.release_all(hid).await,
        }
    }
}

impl ConsumerAction {
    pub async fn execute<H: HidTransport>(self, cc: &mut ConsumerControl, hid: &mut H) {
        match self {
            ConsumerAction::Send(code) => cc.send(hid, code).await,
            ConsumerAction::Press(code) => cc.press(hid, code).await,
            ConsumerAction::Release => cc.release(hid).await,
        }
    }
}

impl fmt::Display for KeyAction {
    /// `(keycodes = [..])` echo for the run log.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(keycodes = [")?;
        for (i, code) in self.codes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", code)?;
        }
        f.write_str("])")
    }
}

impl fmt::Display for MouseAction {
    /// Echo suffix for the run log (empty where there is nothing to add).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MouseAction::Move { dx, dy } => write!(f, " (x={}, y={})", dx, dy),
            MouseAction::Click(b) | MouseAction::Press(b) | MouseAction::Release(b) => {
                write!(f, " (buttons = {})", b)
            }
            MouseAction::Wheel(_) | MouseAction::ReleaseAll => Ok(()),
        }
    }
}

impl fmt::Display for ConsumerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsumerAction::Send(code) | ConsumerAction::Press(code) => {
                write!(f, " (code = {})", code.usage())
            }
            ConsumerAction::Release => Ok(()),
        }
    }
}
