//! Keyboard locales.
//!
//! A [`Locale`] bundles the two things that change with the host's
//! keyboard layout: the key-name table used by raw keystroke lines and the
//! character map used to type literal text. Both are swapped together.
//!
//! Locales are compiled in and looked up by name in [`LOCALES`]; there is no
//! runtime loading.

mod de;
mod uk;
mod us;

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::hid::{HidTransport, Keyboard, Keycode};
use crate::keycode;

/// How to produce one character: a key plus the modifiers held with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stroke {
    pub key: Keycode,
    pub shift: bool,
    pub altgr: bool,
    /// Dead key: the host waits for a second key, so a SPACE follows.
    pub dead: bool,
}

impl Stroke {
    pub const fn plain(key: Keycode) -> Self {
        Self {
            key,
            shift: false,
            altgr: false,
            dead: false,
        }
    }

    pub const fn shifted(key: Keycode) -> Self {
        Self {
            shift: true,
            ..Self::plain(key)
        }
    }

    pub const fn altgr(key: Keycode) -> Self {
        Self {
            altgr: true,
            ..Self::plain(key)
        }
    }

    pub const fn dead(self) -> Self {
        Self { dead: true, ..self }
    }
}

/// One compiled-in keyboard layout.
#[derive(Clone, Copy)]
pub struct Locale {
    name: &'static str,
    keycode: fn(&str) -> Option<Keycode>,
    stroke: fn(char) -> Option<Stroke>,
}

/// Every locale the interpreter knows.
pub static LOCALES: &[Locale] = &[us::LOCALE, de::LOCALE, uk::LOCALE];

impl Locale {
    /// Find a locale by name (case-insensitive).
    pub fn load(name: &str) -> Result<Self> {
        LOCALES
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| Error::LocaleNotFound(name.into()))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Key name lookup for this layout (no synonyms).
    pub fn keycode(&self, name: &str) -> Option<Keycode> {
        (self.keycode)(name)
    }

    /// Keystroke that produces `c`, if the layout can type it.
    pub fn stroke(&self, c: char) -> Option<Stroke> {
        match c {
            '\n' => Some(Stroke::plain(keycode::ENTER)),
            '\t' => Some(Stroke::plain(keycode::TAB)),
            ' ' => Some(Stroke::plain(keycode::SPACE)),
            _ => (self.stroke)(c),
        }
    }

    /// Type `text` as individual keystrokes.
    ///
    /// Returns the characters this layout could not produce; they are
    /// skipped.
    pub async fn write<H: HidTransport>(
        &self,
        keyboard: &mut Keyboard,
        hid: &mut H,
        text: &str,
    ) -> Vec<char> {
        let mut unsupported = Vec::new();
        for c in text.chars() {
            let Some(stroke) = self.stroke(c) else {
                unsupported.push(c);
                continue;
            };
            if stroke.shift {
                keyboard.press(hid, keycode::LEFT_SHIFT).await;
            }
            if stroke.altgr {
                keyboard.press(hid, keycode::RIGHT_ALT).await;
            }
            keyboard.press(hid, stroke.key).await;
            keyboard.release_all(hid).await;
            if stroke.dead {
                keyboard.chord(hid, &[keycode::SPACE]).await;
            }
        }
        unsupported
    }
}

impl core::fmt::Debug for Locale {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Locale").field(&self.name).finish()
    }
}

impl PartialEq for Locale {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Locale {}

/// Lower-case ASCII letter `c` at its US position.
pub(crate) const fn letter_key(c: char) -> Keycode {
    keycode::A + (c as u8 - b'a')
}

/// Digit `c` (`'0'..='9'`) at its (layout-independent) position.
pub(crate) const fn digit_key(c: char) -> Keycode {
    match c {
        '0' => keycode::ZERO,
        _ => keycode::ONE + (c as u8 - b'1'),
    }
}
