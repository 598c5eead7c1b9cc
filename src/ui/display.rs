//! SSD1306 OLED display wrapper.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use hidscript::{Slot, StatusDisplay};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Characters per line with a 6 px font on 128 px.
const LINE_CHARS: usize = 21;

type Driver<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

fn baseline(slot: Slot) -> Point {
    match slot {
        Slot::Top => Point::new(0, 10),
        Slot::Bottom => Point::new(0, 30),
    }
}

/// Two-line status screen. Keeps both lines so either can be redrawn alone.
pub struct OledDisplay<I2C> {
    driver: Driver<I2C>,
    top: heapless::String<LINE_CHARS>,
    bottom: heapless::String<LINE_CHARS>,
}

impl<I2C> OledDisplay<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the SSD1306 and clear the screen.
    pub fn new(i2c: I2C) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let mut driver = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        let _ = driver.init();
        driver.clear_buffer();
        let _ = driver.flush();
        Self {
            driver,
            top: heapless::String::new(),
            bottom: heapless::String::new(),
        }
    }

    fn redraw(&mut self) {
        self.driver.clear_buffer();
        for (slot, line) in [(Slot::Top, &self.top), (Slot::Bottom, &self.bottom)] {
            let _ = Text::new(line.as_str(), baseline(slot), text_style()).draw(&mut self.driver);
        }
        let _ = self.driver.flush();
    }
}

impl<I2C> StatusDisplay for OledDisplay<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn render(&mut self, text: &str, slot: Slot, clear: bool) {
        if clear {
            self.top.clear();
            self.bottom.clear();
        }
        let line = match slot {
            Slot::Top => &mut self.top,
            Slot::Bottom => &mut self.bottom,
        };
        line.clear();
        // Truncate to what fits.
        for c in text.chars() {
            if line.push(c).is_err() {
                break;
            }
        }
        self.redraw();
    }
}
