use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Sender};

use canyon_watchface::ui::WindowEvent;

pub(crate) mod bluetooth;
pub(crate) mod config;
pub(crate) mod time;

/// Pending window events before senders have to wait
pub(crate) const EVENT_QUEUE_LEN: usize = 4;

/// Producer side of the window event queue
pub(crate) type EventSender = Sender<'static, ThreadModeRawMutex, WindowEvent, EVENT_QUEUE_LEN>;
