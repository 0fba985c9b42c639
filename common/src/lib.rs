//! Status display for split-keyboard dongles.
//!
//! The dongle is the central half of a split keyboard with a small monochrome
//! screen. This crate keeps one status widget per screen up to date from
//! firmware events and renders it into an off-screen 1bpp canvas:
//!
//! - [`events`]: firmware event payloads and typed extraction
//! - [`host`]: queries answered by the keyboard firmware
//! - [`snapshot`]: last-known battery, layer, modifier and output state
//! - [`listeners`]: rules folding events into snapshots
//! - [`render`]: snapshot to pixels, with optional rotation
//! - [`widget`] / [`registry`]: widget lifecycle and fan-out
//! - [`display`] / [`screen`]: host-facing entry points
//!
//! # Usage
//!
//! ```ignore
//! let mut display = StatusDisplay::new(DisplayConfig::DEFAULT);
//! display.init();
//! let screen = build_screen(&mut display, SurfaceId(0), &keyboard)?;
//! for surface in display.dispatch(&event, &keyboard) {
//!     present(surface, screen.frame(&display));
//! }
//! ```
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` and never allocates. Logging goes through
//! `defmt-or-log`: the `log` feature (default) for hosts, `defmt` for
//! firmware builds.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod canvas;
pub mod colors;
pub mod config;
pub mod display;
pub mod events;
pub mod host;
pub mod layer;
pub mod listeners;
pub mod modifiers;
pub mod output;
pub mod registry;
pub mod render;
pub mod screen;
pub mod snapshot;
pub mod styles;
pub mod widget;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use canvas::Canvas;
pub use config::*;
pub use display::StatusDisplay;
pub use events::{Event, EventKind};
pub use host::{BatteryQueryError, KeyboardState};
pub use modifiers::ModFlags;
pub use output::Endpoint;
pub use registry::{Redraws, RegistryError, WidgetId};
pub use screen::{Screen, build_screen};
pub use widget::{StatusWidget, SurfaceId};
