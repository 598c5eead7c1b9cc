//! Key name resolution.
//!
//! A script token resolves in two steps: the fixed synonym table first
//! (`ENTER`, `GUI`, `CTRL`, ...), then the active locale's own key names.
//! Synonyms are layout independent, so they always win.

use crate::hid::Keycode;
use crate::locale::Locale;

// USB HID usage IDs (usage page 0x07) for keys whose position does not
// depend on the keyboard layout.

pub const A: Keycode = 0x04;
pub const ONE: Keycode = 0x1E;
pub const ZERO: Keycode = 0x27;
pub const ENTER: Keycode = 0x28;
pub const ESCAPE: Keycode = 0x29;
pub const BACKSPACE: Keycode = 0x2A;
pub const TAB: Keycode = 0x2B;
pub const SPACE: Keycode = 0x2C;
pub const CAPS_LOCK: Keycode = 0x39;
pub const F1: Keycode = 0x3A;
pub const PRINT_SCREEN: Keycode = 0x46;
pub const SCROLL_LOCK: Keycode = 0x47;
pub const PAUSE: Keycode = 0x48;
pub const INSERT: Keycode = 0x49;
pub const HOME: Keycode = 0x4A;
pub const PAGE_UP: Keycode = 0x4B;
pub const DELETE: Keycode = 0x4C;
pub const END: Keycode = 0x4D;
pub const PAGE_DOWN: Keycode = 0x4E;
pub const RIGHT_ARROW: Keycode = 0x4F;
pub const LEFT_ARROW: Keycode = 0x50;
pub const DOWN_ARROW: Keycode = 0x51;
pub const UP_ARROW: Keycode = 0x52;
pub const KEYPAD_NUMLOCK: Keycode = 0x53;
pub const KEYPAD_ONE: Keycode = 0x59;
pub const KEYPAD_ZERO: Keycode = 0x62;
pub const NON_US_BACKSLASH: Keycode = 0x64;
pub const APPLICATION: Keycode = 0x65;
pub const POWER: Keycode = 0x66;
pub const F13: Keycode = 0x68;
pub const LEFT_CONTROL: Keycode = 0xE0;
pub const LEFT_SHIFT: Keycode = 0xE1;
pub const LEFT_ALT: Keycode = 0xE2;
pub const LEFT_GUI: Keycode = 0xE3;
pub const RIGHT_CONTROL: Keycode = 0xE4;
pub const RIGHT_SHIFT: Keycode = 0xE5;
pub const RIGHT_ALT: Keycode = 0xE6;
pub const RIGHT_GUI: Keycode = 0xE7;

/// Friendly names accepted on raw keystroke lines.
const SYNONYMS: &[(&str, Keycode)] = &[
    ("WINDOWS", LEFT_GUI),
    ("GUI", LEFT_GUI),
    ("APP", APPLICATION),
    ("MENU", APPLICATION),
    ("SHIFT", LEFT_SHIFT),
    ("ALT", LEFT_ALT),
    ("CONTROL", LEFT_CONTROL),
    ("CTRL", LEFT_CONTROL),
    ("DOWNARROW", DOWN_ARROW),
    ("DOWN", DOWN_ARROW),
    ("LEFTARROW", LEFT_ARROW),
    ("LEFT", LEFT_ARROW),
    ("RIGHTARROW", RIGHT_ARROW),
    ("RIGHT", RIGHT_ARROW),
    ("UPARROW", UP_ARROW),
    ("UP", UP_ARROW),
    ("BREAK", PAUSE),
    ("PAUSE", PAUSE),
    ("CAPSLOCK", CAPS_LOCK),
    ("DELETE", DELETE),
    ("END", END),
    ("ESC", ESCAPE),
    ("ESCAPE", ESCAPE),
    ("HOME", HOME),
    ("INSERT", INSERT),
    ("NUMLOCK", KEYPAD_NUMLOCK),
    ("PAGEUP", PAGE_UP),
    ("PAGEDOWN", PAGE_DOWN),
    ("PRINTSCREEN", PRINT_SCREEN),
    ("ENTER", ENTER),
    ("SCROLLLOCK", SCROLL_LOCK),
    ("SPACE", SPACE),
    ("TAB", TAB),
    ("BACKSPACE", BACKSPACE),
    ("F1", F1),
    ("F2", F1 + 1),
    ("F3", F1 + 2),
    ("F4", F1 + 3),
    ("F5", F1 + 4),
    ("F6", F1 + 5),
    ("F7", F1 + 6),
    ("F8", F1 + 7),
    ("F9", F1 + 8),
    ("F10", F1 + 9),
    ("F11", F1 + 10),
    ("F12", F1 + 11),
];

/// Key names every layout shares (same physical position everywhere).
const COMMON: &[(&str, Keycode)] = &[
    ("ONE", ONE),
    ("TWO", ONE + 1),
    ("THREE", ONE + 2),
    ("FOUR", ONE + 3),
    ("FIVE", ONE + 4),
    ("SIX", ONE + 5),
    ("SEVEN", ONE + 6),
    ("EIGHT", ONE + 7),
    ("NINE", ONE + 8),
    ("ZERO", ZERO),
    ("ENTER", ENTER),
    ("RETURN", ENTER),
    ("ESCAPE", ESCAPE),
    ("BACKSPACE", BACKSPACE),
    ("TAB", TAB),
    ("SPACEBAR", SPACE),
    ("SPACE", SPACE),
    ("CAPS_LOCK", CAPS_LOCK),
    ("PRINT_SCREEN", PRINT_SCREEN),
    ("SCROLL_LOCK", SCROLL_LOCK),
    ("PAUSE", PAUSE),
    ("INSERT", INSERT),
    ("HOME", HOME),
    ("PAGE_UP", PAGE_UP),
    ("DELETE", DELETE),
    ("END", END),
    ("PAGE_DOWN", PAGE_DOWN),
    ("RIGHT_ARROW", RIGHT_ARROW),
    ("LEFT_ARROW", LEFT_ARROW),
    ("DOWN_ARROW", DOWN_ARROW),
    ("UP_ARROW", UP_ARROW),
    ("KEYPAD_NUMLOCK", KEYPAD_NUMLOCK),
    ("KEYPAD_FORWARD_SLASH", 0x54),
    ("KEYPAD_ASTERISK", 0x55),
    ("KEYPAD_MINUS", 0x56),
    ("KEYPAD_PLUS", 0x57),
    ("KEYPAD_ENTER", 0x58),
    ("KEYPAD_ONE", KEYPAD_ONE),
    ("KEYPAD_TWO", KEYPAD_ONE + 1),
    ("KEYPAD_THREE", KEYPAD_ONE + 2),
    ("KEYPAD_FOUR", KEYPAD_ONE + 3),
    ("KEYPAD_FIVE", KEYPAD_ONE + 4),
    ("KEYPAD_SIX", KEYPAD_ONE + 5),
    ("KEYPAD_SEVEN", KEYPAD_ONE + 6),
    ("KEYPAD_EIGHT", KEYPAD_ONE + 7),
    ("KEYPAD_NINE", KEYPAD_ONE + 8),
    ("KEYPAD_ZERO", KEYPAD_ZERO),
    ("KEYPAD_PERIOD", 0x63),
    ("KEYPAD_EQUALS", 0x67),
    ("APPLICATION", APPLICATION),
    ("POWER", POWER),
    ("LEFT_CONTROL", LEFT_CONTROL),
    ("CONTROL", LEFT_CONTROL),
    ("LEFT_SHIFT", LEFT_SHIFT),
    ("SHIFT", LEFT_SHIFT),
    ("LEFT_ALT", LEFT_ALT),
    ("ALT", LEFT_ALT),
    ("OPTION", LEFT_ALT),
    ("LEFT_GUI", LEFT_GUI),
    ("GUI", LEFT_GUI),
    ("WINDOWS", LEFT_GUI),
    ("COMMAND", LEFT_GUI),
    ("RIGHT_CONTROL", RIGHT_CONTROL),
    ("RIGHT_SHIFT", RIGHT_SHIFT),
    ("RIGHT_ALT", RIGHT_ALT),
    ("ALTGR", RIGHT_ALT),
    ("RIGHT_GUI", RIGHT_GUI),
];

fn lookup(table: &[(&str, Keycode)], name: &str) -> Option<Keycode> {
    table
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, code)| code)
}

/// Synonym table lookup.
pub fn synonym(name: &str) -> Option<Keycode> {
    lookup(SYNONYMS, name)
}

/// Layout-independent key names, including `F1`..`F24`.
pub fn common(name: &str) -> Option<Keycode> {
    lookup(COMMON, name).or_else(|| function_key(name))
}

/// US position of a single letter name `A`..`Z`.
pub fn letter(name: &str) -> Option<Keycode> {
    match name.as_bytes() {
        [c @ b'A'..=b'Z'] => Some(A + (c - b'A')),
        _ => None,
    }
}

fn function_key(name: &str) -> Option<Keycode> {
    let n: u8 = name.strip_prefix('F')?.parse().ok()?;
    match n {
        1..=12 => Some(F1 + n - 1),
        13..=24 => Some(F13 + n - 13),
        _ => None,
    }
}

/// Resolve one upper-cased token: synonyms first, then the locale.
pub fn resolve(token: &str, locale: &Locale) -> Option<Keycode> {
    synonym(token).or_else(|| locale.keycode(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonyms_map_to_physical_codes() {
        assert_eq!(synonym("CTRL"), Some(LEFT_CONTROL));
        assert_eq!(synonym("WINDOWS"), Some(LEFT_GUI));
        assert_eq!(synonym("F12"), Some(0x45));
        assert_eq!(synonym("A"), None);
    }

    #[test]
    fn function_keys_cover_f1_to_f24() {
        assert_eq!(common("F1"), Some(0x3A));
        assert_eq!(common("F13"), Some(0x68));
        assert_eq!(common("F24"), Some(0x73));
        assert_eq!(common("F25"), None);
        assert_eq!(common("F"), None);
        assert_eq!(common("F0"), None);
    }

    #[test]
    fn letters_are_single_upper_case_ascii() {
        assert_eq!(letter("A"), Some(0x04));
        assert_eq!(letter("Z"), Some(0x1D));
        assert_eq!(letter("a"), None);
        assert_eq!(letter("AB"), None);
    }

    #[test]
    fn resolve_prefers_synonyms_then_locale() {
        let us = Locale::load("US").unwrap();
        assert_eq!(resolve("ENTER", &us), Some(ENTER));
        assert_eq!(resolve("KEYPAD_PLUS", &us), Some(0x57));
        assert_eq!(resolve("Q", &us), Some(0x14));
        assert_eq!(resolve("NOPE", &us), None);
    }

    #[test]
    fn resolve_letters_through_the_active_locale() {
        let us = Locale::load("US").unwrap();
        let de = Locale::load("DE").unwrap();
        assert_eq!(resolve("Z", &us), Some(0x1D));
        assert_eq!(resolve("Z", &de), Some(0x1C));
        assert_eq!(resolve("Y", &de), Some(0x1D));
    }
}
