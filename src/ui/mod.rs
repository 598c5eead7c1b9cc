//! User interface: SSD1306 128×64 OLED over I²C showing the two status
//! lines the interpreter renders (script name on top, progress below).

pub mod display;
