//! Display control module for PineTime

use display_interface_spi::SPIInterface;
use embassy_nrf::{
    gpio::{AnyPin, Output},
    peripherals::SPI2,
    spim::Spim,
};
use embassy_time::Delay;
use embedded_graphics::{
    draw_target::{DrawTarget, DrawTargetExt},
    geometry::{Point, Size},
    primitives::Rectangle,
};
use mipidsi::{models::ST7789, Builder, Orientation};

use canyon_watchface::ui::{ColorMode, WatchFace, Window};

const LCD_W: u16 = 240;
const LCD_H: u16 = 240;

type Lcd = mipidsi::Display<
    SPIInterface<Spim<'static, SPI2>, Output<'static, AnyPin>, Output<'static, AnyPin>>,
    ST7789,
    Output<'static, AnyPin>,
>;

/// ST7789 LCD on the SPI bus
pub struct Display {
    lcd: Lcd,
}

impl Display {
    /// Reset and configure the LCD
    pub fn init(
        spim: Spim<'static, SPI2>,
        cs: Output<'static, AnyPin>,
        dc: Output<'static, AnyPin>,
        rst: Output<'static, AnyPin>,
    ) -> Result<Self, Error> {
        let lcd = Builder::st7789(SPIInterface::new(spim, dc, cs))
            .with_display_size(LCD_W, LCD_H)
            .with_orientation(Orientation::Portrait(false))
            .init(&mut Delay, Some(rst))
            .map_err(|_| Error::Init)?;

        Ok(Self { lcd })
    }

    /// Whole screen
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(LCD_W as u32, LCD_H as u32))
    }

    pub fn clear(&mut self, color: ColorMode) -> Result<(), Error> {
        self.lcd.clear(color).map_err(|_| Error::Draw)
    }

    /// Draw `window` in place
    pub fn show<F: WatchFace>(&mut self, window: &Window<F>) -> Result<(), Error> {
        self.show_at(window, Point::zero())
    }

    /// Draw `window` shifted by `offset`, clipped to the screen
    pub fn show_at<F: WatchFace>(&mut self, window: &Window<F>, offset: Point) -> Result<(), Error> {
        let screen = self.bounds();
        window
            .draw(&mut self.lcd.clipped(&screen).translated(offset))
            .map_err(|_| Error::Draw)
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    /// LCD did not accept its init sequence
    Init,
    /// SPI transfer failed while drawing
    Draw,
}
