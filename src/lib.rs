//! Analog "portal" watchface.
//!
//! The hour and minute pointers are drawn as rings which are lit from
//! 12 o'clock up to the current time and masked for the rest of the turn.
//! Both rings sit on a background image, below a logo and a digital `HH:MM`
//! readout. A host window system drives the face through
//! [`WindowHandlers`] and draws it on any [`DrawTarget`] using `Rgb565`.
//!
//! [`DrawTarget`]: embedded_graphics::draw_target::DrawTarget
#![no_std]

mod fmt;

pub mod angle;
pub mod clock;
pub mod face;
pub mod hand;
pub mod lifecycle;
pub mod wedge;

#[cfg(test)]
mod testing;

pub use clock::{ClockTime, DisplayMode, MinuteTicker};
pub use face::{DigitalReadout, FaceCompositor, FaceConfig, FaceLayout, FacePalette, FaceVariant, Layer, Layers};
pub use hand::HandRenderer;
pub use lifecycle::{FaceState, Host, ResourceId, Watchface, WindowHandlers};
pub use wedge::PointerKind;
