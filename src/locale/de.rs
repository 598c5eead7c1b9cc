//! German (ISO, QWERTZ) layout.

use super::{digit_key, letter_key, Locale, Stroke};
use crate::hid::Keycode;
use crate::keycode::{self, NON_US_BACKSLASH};

pub(super) const LOCALE: Locale = Locale {
    name: "DE",
    keycode: key_by_name,
    stroke,
};

const SHARP_S: Keycode = 0x2D;
const ACUTE: Keycode = 0x2E;
const U_UMLAUT: Keycode = 0x2F;
const PLUS: Keycode = 0x30;
const HASH: Keycode = 0x32;
const O_UMLAUT: Keycode = 0x33;
const A_UMLAUT: Keycode = 0x34;
const CIRCUMFLEX: Keycode = 0x35;

/// Y and Z trade places on a QWERTZ keyboard.
fn letter(c: char) -> Keycode {
    match c {
        'y' => letter_key('z'),
        'z' => letter_key('y'),
        _ => letter_key(c),
    }
}

fn key_by_name(name: &str) -> Option<Keycode> {
    let code = match name {
        "Y" => letter('y'),
        "Z" => letter('z'),
        "SHARP_S" => SHARP_S,
        "ACUTE" => ACUTE,
        "U_UMLAUT" => U_UMLAUT,
        "PLUS" => PLUS,
        "HASH" => HASH,
        "O_UMLAUT" => O_UMLAUT,
        "A_UMLAUT" => A_UMLAUT,
        "CIRCUMFLEX" => CIRCUMFLEX,
        "COMMA" => 0x36,
        "PERIOD" => 0x37,
        "MINUS" => 0x38,
        "LESS_THAN" => NON_US_BACKSLASH,
        _ => return keycode::letter(name).or_else(|| keycode::common(name)),
    };
    Some(code)
}

fn stroke(c: char) -> Option<Stroke> {
    let s = match c {
        'a'..='z' => Stroke::plain(letter(c)),
        'A'..='Z' => Stroke::shifted(letter(c.to_ascii_lowercase())),
        '0'..='9' => Stroke::plain(digit_key(c)),
        '!' => Stroke::shifted(digit_key('1')),
        '"' => Stroke::shifted(digit_key('2')),
        '§' => Stroke::shifted(digit_key('3')),
        '$' => Stroke::shifted(digit_key('4')),
        '%' => Stroke::shifted(digit_key('5')),
        '&' => Stroke::shifted(digit_key('6')),
        '/' => Stroke::shifted(digit_key('7')),
        '(' => Stroke::shifted(digit_key('8')),
        ')' => Stroke::shifted(digit_key('9')),
        '=' => Stroke::shifted(digit_key('0')),
        '²' => Stroke::altgr(digit_key('2')),
        '³' => Stroke::altgr(digit_key('3')),
        '{' => Stroke::altgr(digit_key('7')),
        '[' => Stroke::altgr(digit_key('8')),
        ']' => Stroke::altgr(digit_key('9')),
        '}' => Stroke::altgr(digit_key('0')),
        'ß' => Stroke::plain(SHARP_S),
        '?' => Stroke::shifted(SHARP_S),
        '\\' => Stroke::altgr(SHARP_S),
        '´' => Stroke::plain(ACUTE).dead(),
        '`' => Stroke::shifted(ACUTE).dead(),
        'ü' => Stroke::plain(U_UMLAUT),
        'Ü' => Stroke::shifted(U_UMLAUT),
        '+' => Stroke::plain(PLUS),
        '*' => Stroke::shifted(PLUS),
        '~' => Stroke::altgr(PLUS),
        '#' => Stroke::plain(HASH),
        '\'' => Stroke::shifted(HASH),
        'ö' => Stroke::plain(O_UMLAUT),
        'Ö' => Stroke::shifted(O_UMLAUT),
        'ä' => Stroke::plain(A_UMLAUT),
        'Ä' => Stroke::shifted(A_UMLAUT),
        '^' => Stroke::plain(CIRCUMFLEX).dead(),
        '°' => Stroke::shifted(CIRCUMFLEX),
        ',' => Stroke::plain(0x36),
        ';' => Stroke::shifted(0x36),
        '.' => Stroke::plain(0x37),
        ':' => Stroke::shifted(0x37),
        '-' => Stroke::plain(0x38),
        '_' => Stroke::shifted(0x38),
        '<' => Stroke::plain(NON_US_BACKSLASH),
        '>' => Stroke::shifted(NON_US_BACKSLASH),
        '|' => Stroke::altgr(NON_US_BACKSLASH),
        '@' => Stroke::altgr(letter('q')),
        '€' => Stroke::altgr(letter('e')),
        'µ' => Stroke::altgr(letter('m')),
        _ => return None,
    };
    Some(s)
}
