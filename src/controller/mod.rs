//! Device state tracking for keyboard and gamepad input
//!
//! ```text
//! key signal ──► KeyboardTracker ──► KeyEdge
//! gilrs ──► GamepadSource ──► GamepadFrame ──► GamepadTracker ──► ButtonEdge
//! ```
//!
//! Both trackers are edge detectors: they report a control only when the
//! physical input it is bound to changes state.

pub mod event_collector;
pub mod gamepad;
pub mod keyboard;

pub use event_collector::{CollectorError, GamepadSource, GilrsSource};
pub use gamepad::{ButtonEdge, GamepadFrame, GamepadTracker};
pub use keyboard::{KeyEdge, KeyTransition, KeyboardTracker};
