//! Canyon watchface
//!
//! Large hour and minute fields split across the vertical center, a date row
//! with the day of month set in the blank run of the weekday/month string,
//! a connection indicator in front of the date and the canyon logo on top.

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    mono_font::{iso_8859_1::FONT_9X18_BOLD, MonoFont},
    primitives::Rectangle,
    text::Alignment,
};
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

use super::{
    clock_text::FaceText,
    layer::{BitmapLayer, ReleaseLog, TextLayer},
    resources::{Bitmap, ResourceId},
    window, ColorMode, WatchFace, WatchFaceState, COLOR_BACKGROUND, COLOR_FOREGROUND,
};

const TIME_FONT: &MonoFont<'static> = &PROFONT_24_POINT;
const DATE_FONT: &MonoFont<'static> = &PROFONT_18_POINT;
/// Day of month and connection indicator stand out from the date row
const DAY_FONT: &MonoFont<'static> = &FONT_9X18_BOLD;

/// Time fields start this far above the vertical center
const TIME_CENTER_OFFSET: i32 = 21;
const TIME_FIELD_HEIGHT: u32 = TIME_FONT.character_size.height;

const DATE_ROW_Y: i32 = 140;
const DATE_ROW_HEIGHT: u32 = 50;
const DATE_X: i32 = 20;
/// Column of the date string where the day of month starts
const DAY_COLUMN: u32 = 5;
const DAY_COLUMNS: u32 = 2;

const CONNECTION_WIDTH: u32 = 20;

const LOGO_Y: i32 = 20;

/// Indicator text for the Bluetooth connection state
pub fn connection_glyph(connected: bool) -> &'static str {
    if connected {
        " "
    } else {
        "!"
    }
}

/// Canyon watchface
pub struct CanyonWatchface {
    /// Hour label
    hour: TextLayer,
    /// Minute label
    minute: TextLayer,
    /// Weekday and month label
    date: TextLayer,
    /// Day of month label
    day: TextLayer,
    /// Bluetooth indicator label
    connection: TextLayer,
    /// Logo
    logo: BitmapLayer,
}

impl CanyonWatchface {
    pub fn hour(&self) -> &TextLayer {
        &self.hour
    }

    pub fn minute(&self) -> &TextLayer {
        &self.minute
    }

    pub fn date(&self) -> &TextLayer {
        &self.date
    }

    pub fn day(&self) -> &TextLayer {
        &self.day
    }

    pub fn connection(&self) -> &TextLayer {
        &self.connection
    }

    pub fn logo(&self) -> &BitmapLayer {
        &self.logo
    }
}

/// Orange on black text layer
fn label(frame: Rectangle, font: &'static MonoFont<'static>, alignment: Alignment) -> TextLayer {
    let mut layer = TextLayer::new(frame);
    layer.set_background_color(COLOR_BACKGROUND);
    layer.set_text_color(COLOR_FOREGROUND);
    layer.set_font(font);
    layer.set_alignment(alignment);
    layer
}

impl WatchFace for CanyonWatchface {
    fn load(bounds: Rectangle) -> Result<Self, window::Error> {
        let origin = bounds.top_left;
        let Size { width, height } = bounds.size;
        let time_y = height as i32 / 2 - TIME_CENTER_OFFSET;

        // Time
        let mut hour = label(
            Rectangle::new(
                origin + Point::new(0, time_y),
                Size::new(width / 2, TIME_FIELD_HEIGHT),
            ),
            TIME_FONT,
            Alignment::Right,
        );
        hour.set_text("00:")?;

        let mut minute = label(
            Rectangle::new(
                origin + Point::new(width as i32 / 2, time_y),
                Size::new(width / 2, TIME_FIELD_HEIGHT),
            ),
            TIME_FONT,
            Alignment::Left,
        );
        minute.set_text("00")?;

        // Date
        let date = label(
            Rectangle::new(
                origin + Point::new(DATE_X, DATE_ROW_Y),
                Size::new(width.saturating_sub(DATE_X as u32), DATE_ROW_HEIGHT),
            ),
            DATE_FONT,
            Alignment::Left,
        );

        let advance = DATE_FONT.character_size.width + DATE_FONT.character_spacing;
        let day = label(
            Rectangle::new(
                origin + Point::new(DATE_X + (DAY_COLUMN * advance) as i32, DATE_ROW_Y),
                Size::new(DAY_COLUMNS * advance, DATE_ROW_HEIGHT),
            ),
            DAY_FONT,
            Alignment::Center,
        );

        // Bluetooth
        let connection = label(
            Rectangle::new(
                origin + Point::new(0, DATE_ROW_Y),
                Size::new(CONNECTION_WIDTH, DATE_ROW_HEIGHT),
            ),
            DAY_FONT,
            Alignment::Center,
        );

        // Logo
        let bitmap = Bitmap::from_resource(ResourceId::LogoCanyon)?;
        let logo_size = bitmap.size();
        let mut logo = BitmapLayer::new(Rectangle::new(
            origin + Point::new(width.saturating_sub(logo_size.width) as i32 / 2, LOGO_Y),
            logo_size,
        ));
        logo.set_bitmap(bitmap);

        info!("Canyon watchface loaded");

        Ok(Self {
            hour,
            minute,
            date,
            day,
            connection,
            logo,
        })
    }

    fn update(&mut self, state: &WatchFaceState) -> Result<(), window::Error> {
        let text = FaceText::new(&state.time, state.hour_format)?;

        self.hour.set_text(&text.hour)?;
        self.minute.set_text(&text.minute)?;
        self.date.set_text(&text.date)?;
        self.day.set_text(&text.day)?;

        self.set_connected(state.connected)
    }

    fn set_connected(&mut self, connected: bool) -> Result<(), window::Error> {
        self.connection.set_text(connection_glyph(connected))?;
        Ok(())
    }

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        self.hour.draw(target)?;
        self.minute.draw(target)?;
        self.date.draw(target)?;
        // Day goes over the blank run of the date string
        self.day.draw(target)?;
        self.connection.draw(target)?;
        self.logo.draw(target)
    }

    fn unload(self) -> ReleaseLog {
        let mut log = ReleaseLog::new();
        self.hour.destroy(&mut log);
        self.minute.destroy(&mut log);
        self.date.destroy(&mut log);
        self.day.destroy(&mut log);
        self.connection.destroy(&mut log);
        self.logo.destroy(&mut log);
        log
    }
}
