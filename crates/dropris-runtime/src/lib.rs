//! Single-threaded terminal frame loop.
//!
//! [`Runtime`] produces a tick at a fixed frame rate, each carrying the time
//! elapsed since the previous one, redraws after every tick or input, and
//! forwards key presses. Applications are usually a [`ScreenStack`] of
//! [`Screen`]s.

pub use self::{
    app::App,
    clock::FrameClock,
    runtime::Runtime,
    screen::{Screen, ScreenStack, ScreenTransition},
};

mod app;
mod clock;
mod event_loop;
mod runtime;
mod screen;
