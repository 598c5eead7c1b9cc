//! US English (ANSI) layout.

use super::{digit_key, letter_key, Locale, Stroke};
use crate::hid::Keycode;
use crate::keycode;

pub(super) const LOCALE: Locale = Locale {
    name: "US",
    keycode: key_by_name,
    stroke,
};

pub(super) fn key_by_name(name: &str) -> Option<Keycode> {
    if let Some(code) = keycode::letter(name) {
        return Some(code);
    }
    let code = match name {
        "MINUS" => 0x2D,
        "EQUALS" => 0x2E,
        "LEFT_BRACKET" => 0x2F,
        "RIGHT_BRACKET" => 0x30,
        "BACKSLASH" => 0x31,
        "POUND" => 0x32,
        "SEMICOLON" => 0x33,
        "QUOTE" => 0x34,
        "GRAVE_ACCENT" => 0x35,
        "COMMA" => 0x36,
        "PERIOD" => 0x37,
        "FORWARD_SLASH" => 0x38,
        _ => return keycode::common(name),
    };
    Some(code)
}

pub(super) fn stroke(c: char) -> Option<Stroke> {
    let s = match c {
        'a'..='z' => Stroke::plain(letter_key(c)),
        'A'..='Z' => Stroke::shifted(letter_key(c.to_ascii_lowercase())),
        '0'..='9' => Stroke::plain(digit_key(c)),
        '!' => Stroke::shifted(digit_key('1')),
        '@' => Stroke::shifted(digit_key('2')),
        '#' => Stroke::shifted(digit_key('3')),
        '$' => Stroke::shifted(digit_key('4')),
        '%' => Stroke::shifted(digit_key('5')),
        '^' => Stroke::shifted(digit_key('6')),
        '&' => Stroke::shifted(digit_key('7')),
        '*' => Stroke::shifted(digit_key('8')),
        '(' => Stroke::shifted(digit_key('9')),
        ')' => Stroke::shifted(digit_key('0')),
        '-' => Stroke::plain(0x2D),
        '_' => Stroke::shifted(0x2D),
        '=' => Stroke::plain(0x2E),
        '+' => Stroke::shifted(0x2E),
        '[' => Stroke::plain(0x2F),
        '{' => Stroke::shifted(0x2F),
        ']' => Stroke::plain(0x30),
        '}' => Stroke::shifted(0x30),
        '\\' => Stroke::plain(0x31),
        '|' => Stroke::shifted(0x31),
        ';' => Stroke::plain(0x33),
        ':' => Stroke::shifted(0x33),
        '\'' => Stroke::plain(0x34),
        '"' => Stroke::shifted(0x34),
        '`' => Stroke::plain(0x35),
        '~' => Stroke::shifted(0x35),
        ',' => Stroke::plain(0x36),
        '<' => Stroke::shifted(0x36),
        '.' => Stroke::plain(0x37),
        '>' => Stroke::shifted(0x37),
        '/' => Stroke::plain(0x38),
        '?' => Stroke::shifted(0x38),
        _ => return None,
    };
    Some(s)
}
