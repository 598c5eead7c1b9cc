//! British English (ISO) layout.

use super::{digit_key, us, Locale, Stroke};
use crate::hid::Keycode;
use crate::keycode::NON_US_BACKSLASH;

pub(super) const LOCALE: Locale = Locale {
    name: "UK",
    keycode: key_by_name,
    stroke,
};

const HASH: Keycode = 0x32;

fn key_by_name(name: &str) -> Option<Keycode> {
    match name {
        "HASH" | "POUND" => Some(HASH),
        "BACKSLASH" => Some(NON_US_BACKSLASH),
        _ => us::key_by_name(name),
    }
}

fn stroke(c: char) -> Option<Stroke> {
    let s = match c {
        '"' => Stroke::shifted(digit_key('2')),
        '£' => Stroke::shifted(digit_key('3')),
        '€' => Stroke::altgr(digit_key('4')),
        '@' => Stroke::shifted(0x34),
        '#' => Stroke::plain(HASH),
        '~' => Stroke::shifted(HASH),
        '¬' => Stroke::shifted(0x35),
        '\\' => Stroke::plain(NON_US_BACKSLASH),
        '|' => Stroke::shifted(NON_US_BACKSLASH),
        _ => return us::stroke(c),
    };
    Some(s)
}
