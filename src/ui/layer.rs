//! Positioned display elements
//!
//! A layer owns a frame inside the window and clips all of its drawing to
//! that frame. Text layers keep their own bounded text buffer; bitmap layers
//! keep the bitmap they display.

use embedded_graphics::{
    draw_target::{DrawTarget, DrawTargetExt},
    geometry::Point,
    image::Image,
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::RgbColor,
    primitives::{Primitive, PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
    Drawable,
};
use heapless::{String, Vec};
use profont::PROFONT_14_POINT;

use super::{
    resources::{Bitmap, ResourceId},
    ColorMode,
};

/// Capacity of a text layer buffer in bytes
pub const TEXT_CAPACITY: usize = 16;

/// Most elements a single window creates
pub const MAX_ELEMENTS: usize = 8;

/// Text layer
pub struct TextLayer {
    frame: Rectangle,
    font: &'static MonoFont<'static>,
    text_color: ColorMode,
    background: ColorMode,
    alignment: Alignment,
    text: String<TEXT_CAPACITY>,
}

impl TextLayer {
    /// Create an empty text layer: black on white, left aligned
    pub fn new(frame: Rectangle) -> Self {
        Self {
            frame,
            font: &PROFONT_14_POINT,
            text_color: ColorMode::BLACK,
            background: ColorMode::WHITE,
            alignment: Alignment::Left,
            text: String::new(),
        }
    }

    pub fn set_font(&mut self, font: &'static MonoFont<'static>) {
        self.font = font;
    }

    pub fn set_text_color(&mut self, color: ColorMode) {
        self.text_color = color;
    }

    pub fn set_background_color(&mut self, color: ColorMode) {
        self.background = color;
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    /// Replace the displayed text.
    ///
    /// Text longer than [`TEXT_CAPACITY`] is rejected and the previous text
    /// stays in place.
    pub fn set_text(&mut self, text: &str) -> Result<(), Error> {
        if text.len() > TEXT_CAPACITY {
            return Err(Error::TextTooLong);
        }
        self.text.clear();
        self.text.push_str(text).map_err(|_| Error::TextTooLong)
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn frame(&self) -> Rectangle {
        self.frame
    }

    pub fn font(&self) -> &'static MonoFont<'static> {
        self.font
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Fill the frame with the background color and draw the text on top
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        let mut target = target.clipped(&self.frame);

        self.frame
            .into_styled(PrimitiveStyle::with_fill(self.background))
            .draw(&mut target)?;

        if self.text.is_empty() {
            return Ok(());
        }

        let width = self.frame.size.width as i32;
        let x = match self.alignment {
            Alignment::Left => self.frame.top_left.x,
            Alignment::Center => self.frame.top_left.x + width / 2,
            Alignment::Right => self.frame.top_left.x + width - 1,
        };

        let character_style = MonoTextStyle::new(self.font, self.text_color);
        let text_style = TextStyleBuilder::new()
            .alignment(self.alignment)
            .baseline(Baseline::Top)
            .build();

        Text::with_text_style(
            self.text.as_str(),
            Point::new(x, self.frame.top_left.y),
            character_style,
            text_style,
        )
        .draw(&mut target)?;

        Ok(())
    }

    /// Release the layer
    pub fn destroy(self, log: &mut ReleaseLog) {
        log.record(Element::TextLayer);
    }
}

/// Bitmap layer
pub struct BitmapLayer {
    frame: Rectangle,
    bitmap: Option<Bitmap>,
}

impl BitmapLayer {
    pub fn new(frame: Rectangle) -> Self {
        Self {
            frame,
            bitmap: None,
        }
    }

    pub fn set_bitmap(&mut self, bitmap: Bitmap) {
        self.bitmap = Some(bitmap);
    }

    pub fn bitmap(&self) -> Option<&Bitmap> {
        self.bitmap.as_ref()
    }

    pub fn frame(&self) -> Rectangle {
        self.frame
    }

    /// Draw the bitmap at the top left corner of the frame
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        if let Some(bitmap) = &self.bitmap {
            Image::new(bitmap.image(), self.frame.top_left).draw(&mut target.clipped(&self.frame))?;
        }
        Ok(())
    }

    /// Release the layer, then the bitmap it displayed
    pub fn destroy(mut self, log: &mut ReleaseLog) {
        let bitmap = self.bitmap.take();
        drop(self);
        log.record(Element::BitmapLayer);

        if let Some(bitmap) = bitmap {
            let id = bitmap.id();
            drop(bitmap);
            log.record(Element::Bitmap(id));
        }
    }
}

/// Kind of released element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Element {
    TextLayer,
    BitmapLayer,
    Bitmap(ResourceId),
}

/// Elements released during teardown, in release order
#[derive(Default, Debug)]
pub struct ReleaseLog {
    released: Vec<Element, MAX_ELEMENTS>,
}

impl ReleaseLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, element: Element) {
        if self.released.push(element).is_err() {
            warn!("release log full");
        }
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.released
    }

    pub fn len(&self) -> usize {
        self.released.len()
    }

    pub fn is_empty(&self) -> bool {
        self.released.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    TextTooLong,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::{blank_display, count, touched_in};
    use embedded_graphics::geometry::Size;

    const DISPLAY: Size = Size::new(100, 60);

    fn frame() -> Rectangle {
        Rectangle::new(Point::new(10, 10), Size::new(60, 30))
    }

    #[test]
    fn set_text_replaces_previous_text() {
        let mut layer = TextLayer::new(frame());
        layer.set_text("00:").unwrap();
        layer.set_text("12:").unwrap();
        assert_eq!(layer.text(), "12:");
    }

    #[test]
    fn overlong_text_is_rejected() {
        let mut layer = TextLayer::new(frame());
        layer.set_text("09:").unwrap();

        let too_long = "Wednesday      /12";
        assert!(too_long.len() > TEXT_CAPACITY);
        assert_eq!(layer.set_text(too_long), Err(Error::TextTooLong));
        assert_eq!(layer.text(), "09:");
    }

    #[test]
    fn text_fits_capacity_exactly() {
        let mut layer = TextLayer::new(frame());
        let full = "0123456789abcdef";
        assert_eq!(full.len(), TEXT_CAPACITY);
        layer.set_text(full).unwrap();
        assert_eq!(layer.text(), full);
    }

    #[test]
    fn drawing_stays_inside_frame() {
        let mut display = blank_display(DISPLAY);
        let mut layer = TextLayer::new(frame());
        layer.set_background_color(ColorMode::BLUE);
        layer.set_text_color(ColorMode::RED);
        layer.set_text("a long line that overflows").ok();
        layer.set_text("overflowing!").unwrap();

        layer.draw(&mut display).unwrap();

        let screen = Rectangle::new(Point::zero(), DISPLAY);
        assert_eq!(touched_in(&display, &screen), touched_in(&display, &frame()));
        assert!(count(&display, &frame(), ColorMode::RED) > 0);
        assert!(count(&display, &frame(), ColorMode::BLUE) > 0);
    }

    #[test]
    fn empty_text_only_fills_background() {
        let mut display = blank_display(DISPLAY);
        let mut layer = TextLayer::new(frame());
        layer.set_background_color(ColorMode::GREEN);

        layer.draw(&mut display).unwrap();

        let area = frame().size.width * frame().size.height;
        assert_eq!(count(&display, &frame(), ColorMode::GREEN), area as usize);
    }

    #[test]
    fn bitmap_layer_releases_layer_before_bitmap() {
        let bitmap = Bitmap::from_resource(ResourceId::LogoCanyon).unwrap();
        let mut layer = BitmapLayer::new(Rectangle::new(Point::zero(), bitmap.size()));
        layer.set_bitmap(bitmap);

        let mut log = ReleaseLog::new();
        layer.destroy(&mut log);

        assert_eq!(
            log.as_slice(),
            &[Element::BitmapLayer, Element::Bitmap(ResourceId::LogoCanyon)]
        );
    }

    #[test]
    fn empty_bitmap_layer_draws_nothing() {
        let mut display = blank_display(DISPLAY);
        BitmapLayer::new(frame()).draw(&mut display).unwrap();
        let screen = Rectangle::new(Point::zero(), DISPLAY);
        assert_eq!(touched_in(&display, &screen), 0);
    }
}
