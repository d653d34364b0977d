//! OLED display
//!
//! Owns the SSD1306 and renders every view the consumers queue, in order. The
//! I2C transfer happens here, never under the state lock.

use crate::system::resources::{DisplayResources, DISPLAY_ADDRESS, DISPLAY_I2C_FREQUENCY};
use crate::system::view;
use defmt::{debug, error, info, Debug2Format};
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::I2C1;
use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle, MonoTextStyleBuilder},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use occupancy_core::TextSink;
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, I2CDisplayInterface, Ssd1306};

type Oled = Ssd1306<
    I2CInterface<I2c<'static, I2C1, Blocking>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

/// Buffered OLED with the text style every view uses
pub struct Panel {
    oled: Oled,
    style: MonoTextStyle<'static, BinaryColor>,
}

/// Brings up the I2C bus and the OLED.
///
/// Panics if the display does not answer. Called from main before any task is
/// spawned, so a dead display halts startup.
pub fn init(r: DisplayResources) -> Panel {
    let mut config = i2c::Config::default();
    config.frequency = DISPLAY_I2C_FREQUENCY;
    let bus = I2c::new_blocking(r.i2c, r.scl, r.sda, config);

    let interface = I2CDisplayInterface::new_custom_address(bus, DISPLAY_ADDRESS);
    let mut oled = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();

    if let Err(e) = oled.init() {
        defmt::panic!("Display initialization failed: {}", Debug2Format(&e));
    }

    let style = MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build();

    Panel { oled, style }
}

impl TextSink for Panel {
    type Error = <Oled as DrawTarget>::Error;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.oled.clear_buffer();
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) -> Result<(), Self::Error> {
        Text::with_baseline(text, Point::new(x, y), self.style, Baseline::Top).draw(&mut self.oled)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.oled.flush()
    }
}

/// Display task
#[embassy_executor::task]
pub async fn display(mut panel: Panel) {
    info!("Display task started");

    loop {
        let view = view::next().await;
        debug!("Rendering {}", view);

        if let Err(e) = view.render(&mut panel) {
            error!("Display update failed: {}", Debug2Format(&e));
        }
    }
}
