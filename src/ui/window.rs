//! Top level window and its lifecycle
//!
//! The window owns the loaded watchface. Host events are dispatched one at a
//! time through [`Window::handle`]; each handler checks the lifecycle state
//! it needs before touching any element.

use core::mem;

use embedded_graphics::{
    draw_target::DrawTarget,
    primitives::{Primitive, PrimitiveStyle, Rectangle},
    Drawable,
};

use super::{
    clock_text,
    layer::{self, ReleaseLog},
    resources,
    transition::Transition,
    ColorMode, WatchFace, WatchFaceState,
};
use crate::services::{Clock, ConnectionService};

/// Events delivered by the host event loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WindowEvent {
    Load,
    Unload,
    MinuteTick,
    ConnectionChanged(bool),
}

/// Lifecycle state of the window
pub enum Lifecycle<F> {
    Unloaded,
    Loaded(F),
}

pub struct Window<F: WatchFace> {
    bounds: Rectangle,
    background: ColorMode,
    lifecycle: Lifecycle<F>,
}

impl<F: WatchFace> Window<F> {
    /// Create an unloaded window covering `bounds`
    pub fn new(bounds: Rectangle, background: ColorMode) -> Self {
        Self {
            bounds,
            background,
            lifecycle: Lifecycle::Unloaded,
        }
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Loaded(_))
    }

    /// The loaded watchface
    pub fn face(&self) -> Option<&F> {
        match &self.lifecycle {
            Lifecycle::Loaded(face) => Some(face),
            Lifecycle::Unloaded => None,
        }
    }

    /// Show the window: load it and return the transition to animate
    pub fn push<C, S>(&mut self, animated: bool, clock: &C, connection: &S) -> Result<Transition, Error>
    where
        C: Clock,
        S: ConnectionService,
    {
        self.handle(WindowEvent::Load, clock, connection)?;
        Ok(Transition::push(self.bounds.size.width, animated))
    }

    /// Dispatch a host event to its handler
    pub fn handle<C, S>(&mut self, event: WindowEvent, clock: &C, connection: &S) -> Result<(), Error>
    where
        C: Clock,
        S: ConnectionService,
    {
        trace!("Window event {}", event);
        match event {
            WindowEvent::Load => self.load(clock, connection),
            WindowEvent::Unload => self.unload().map(|_| ()),
            WindowEvent::MinuteTick => self.refresh(clock, connection),
            WindowEvent::ConnectionChanged(connected) => self.connection_changed(connected),
        }
    }

    fn load<C, S>(&mut self, clock: &C, connection: &S) -> Result<(), Error>
    where
        C: Clock,
        S: ConnectionService,
    {
        if self.is_loaded() {
            return Err(Error::AlreadyLoaded);
        }
        self.lifecycle = Lifecycle::Loaded(F::load(self.bounds)?);

        // Make sure the time is displayed from the start
        self.refresh(clock, connection)
    }

    /// Release every element of the loaded watchface
    pub fn unload(&mut self) -> Result<ReleaseLog, Error> {
        match mem::replace(&mut self.lifecycle, Lifecycle::Unloaded) {
            Lifecycle::Loaded(face) => {
                let log = face.unload();
                debug!("Window unloaded, released {} elements", log.len());
                Ok(log)
            }
            Lifecycle::Unloaded => Err(Error::NotLoaded),
        }
    }

    /// Push the current time, date and connection status into the watchface
    pub fn refresh<C, S>(&mut self, clock: &C, connection: &S) -> Result<(), Error>
    where
        C: Clock,
        S: ConnectionService,
    {
        let face = self.face_mut()?;
        let state = WatchFaceState {
            time: clock.now(),
            hour_format: clock.hour_format(),
            connected: connection.is_connected(),
        };
        face.update(&state)
    }

    fn connection_changed(&mut self, connected: bool) -> Result<(), Error> {
        debug!("Connection changed: {}", connected);
        self.face_mut()?.set_connected(connected)
    }

    fn face_mut(&mut self) -> Result<&mut F, Error> {
        match &mut self.lifecycle {
            Lifecycle::Loaded(face) => Ok(face),
            Lifecycle::Unloaded => Err(Error::NotLoaded),
        }
    }

    /// Fill the window with its background and draw the watchface
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(self.background))
            .draw(target)?;

        match &self.lifecycle {
            Lifecycle::Loaded(face) => face.draw(target),
            Lifecycle::Unloaded => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Event needs a loaded window
    NotLoaded,
    /// Window is already loaded
    AlreadyLoaded,
    Layer(layer::Error),
    Resource(resources::Error),
    Format(clock_text::Error),
}

impl From<layer::Error> for Error {
    fn from(err: layer::Error) -> Self {
        Error::Layer(err)
    }
}

impl From<resources::Error> for Error {
    fn from(err: resources::Error) -> Self {
        Error::Resource(err)
    }
}

impl From<clock_text::Error> for Error {
    fn from(err: clock_text::Error) -> Self {
        Error::Format(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::HourFormat,
        ui::{
            layer::Element,
            testing::{blank_display, count, CountingClock, FixedConnection, UNTOUCHED},
            CanyonWatchface, COLOR_BACKGROUND, COLOR_FOREGROUND,
        },
    };
    use chrono::{NaiveDate, NaiveDateTime};
    use embedded_graphics::{
        geometry::{Point, Size},
        pixelcolor::RgbColor,
    };

    const SCREEN: Size = Size::new(240, 240);

    fn tuesday(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 4)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn window() -> Window<CanyonWatchface> {
        Window::new(Rectangle::new(Point::zero(), SCREEN), COLOR_BACKGROUND)
    }

    #[test]
    fn push_loads_and_refreshes_before_first_tick() {
        let clock = CountingClock::new(tuesday(9, 5), HourFormat::H24);
        let mut window = window();

        window.push(true, &clock, &FixedConnection(true)).unwrap();

        assert!(window.is_loaded());
        assert_eq!(clock.reads(), 1);
        let face = window.face().unwrap();
        assert_eq!(face.hour().text(), "09:");
        assert_eq!(face.minute().text(), "05");
        assert_eq!(face.date().text(), "Tue      /03");
        assert_eq!(face.day().text(), "04");
        assert_eq!(face.connection().text(), " ");
    }

    #[test]
    fn each_minute_tick_refreshes_once() {
        let clock = CountingClock::new(tuesday(9, 5), HourFormat::H24);
        let connection = FixedConnection(true);
        let mut window = window();
        window.push(false, &clock, &connection).unwrap();

        clock.set(tuesday(9, 6));
        window.handle(WindowEvent::MinuteTick, &clock, &connection).unwrap();
        clock.set(tuesday(9, 7));
        window.handle(WindowEvent::MinuteTick, &clock, &connection).unwrap();

        assert_eq!(clock.reads(), 3);
        assert_eq!(window.face().unwrap().minute().text(), "07");
    }

    #[test]
    fn hour_format_comes_from_the_clock() {
        let clock = CountingClock::new(tuesday(21, 30), HourFormat::H12);
        let mut window = window();
        window.push(false, &clock, &FixedConnection(true)).unwrap();
        assert_eq!(window.face().unwrap().hour().text(), "09:");
    }

    #[test]
    fn connection_event_updates_indicator_only() {
        let clock = CountingClock::new(tuesday(9, 5), HourFormat::H24);
        let connection = FixedConnection(true);
        let mut window = window();
        window.push(false, &clock, &connection).unwrap();

        window
            .handle(WindowEvent::ConnectionChanged(false), &clock, &connection)
            .unwrap();

        let face = window.face().unwrap();
        assert_eq!(face.connection().text(), "!");
        assert_eq!(face.minute().text(), "05");
        assert_eq!(clock.reads(), 1);
    }

    #[test]
    fn refresh_queries_connection_status() {
        let clock = CountingClock::new(tuesday(9, 5), HourFormat::H24);
        let mut window = window();
        window.push(false, &clock, &FixedConnection(true)).unwrap();

        window
            .handle(WindowEvent::MinuteTick, &clock, &FixedConnection(false))
            .unwrap();
        assert_eq!(window.face().unwrap().connection().text(), "!");
    }

    #[test]
    fn events_before_load_are_rejected() {
        let clock = CountingClock::new(tuesday(9, 5), HourFormat::H24);
        let connection = FixedConnection(true);
        let mut window = window();

        assert_eq!(
            window.handle(WindowEvent::MinuteTick, &clock, &connection),
            Err(Error::NotLoaded)
        );
        assert_eq!(
            window.handle(WindowEvent::ConnectionChanged(true), &clock, &connection),
            Err(Error::NotLoaded)
        );
        assert_eq!(
            window.handle(WindowEvent::Unload, &clock, &connection),
            Err(Error::NotLoaded)
        );
        assert_eq!(clock.reads(), 0);
    }

    #[test]
    fn second_load_is_rejected() {
        let clock = CountingClock::new(tuesday(9, 5), HourFormat::H24);
        let connection = FixedConnection(true);
        let mut window = window();
        window.push(false, &clock, &connection).unwrap();

        assert_eq!(
            window.handle(WindowEvent::Load, &clock, &connection),
            Err(Error::AlreadyLoaded)
        );
        assert_eq!(clock.reads(), 1);
    }

    #[test]
    fn unload_releases_everything_once() {
        let clock = CountingClock::new(tuesday(9, 5), HourFormat::H24);
        let mut window = window();
        window.push(false, &clock, &FixedConnection(true)).unwrap();

        let log = window.unload().unwrap();
        assert_eq!(log.len(), 7);
        let bitmap_layer = log
            .as_slice()
            .iter()
            .position(|e| *e == Element::BitmapLayer)
            .unwrap();
        let bitmap = log
            .as_slice()
            .iter()
            .position(|e| matches!(e, Element::Bitmap(_)))
            .unwrap();
        assert!(bitmap_layer < bitmap);

        assert!(!window.is_loaded());
        assert!(matches!(window.unload(), Err(Error::NotLoaded)));
    }

    #[test]
    fn window_can_be_loaded_again_after_unload() {
        let clock = CountingClock::new(tuesday(9, 5), HourFormat::H24);
        let connection = FixedConnection(false);
        let mut window = window();
        window.push(false, &clock, &connection).unwrap();
        window.handle(WindowEvent::Unload, &clock, &connection).unwrap();
        window.handle(WindowEvent::Load, &clock, &connection).unwrap();

        assert_eq!(window.face().unwrap().connection().text(), "!");
        assert_eq!(clock.reads(), 2);
    }

    #[test]
    fn draw_fills_background_and_face() {
        let clock = CountingClock::new(tuesday(9, 5), HourFormat::H24);
        let mut window = window();
        let mut display = blank_display(SCREEN);

        window.draw(&mut display).unwrap();
        let full = (SCREEN.width * SCREEN.height) as usize;
        assert_eq!(count(&display, &window.bounds(), COLOR_BACKGROUND), full);

        window.push(false, &clock, &FixedConnection(true)).unwrap();
        window.draw(&mut display).unwrap();
        assert!(count(&display, &window.bounds(), COLOR_FOREGROUND) > 0);
        assert_eq!(count(&display, &window.bounds(), ColorMode::WHITE), 0);
        assert_eq!(count(&display, &window.bounds(), UNTOUCHED), 0);
    }
}
