//! Queries answered by the keyboard firmware.
//!
//! The pipeline never owns keyboard state. Listeners re-read the current value
//! through [`KeyboardState`] whenever an event says something changed, and a
//! new widget fills its snapshot the same way.

use core::fmt;

use crate::modifiers::ModFlags;
use crate::output::Endpoint;

/// Why a peripheral battery level could not be read.
#[defmt_or_log::derive_format_or_debug]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum BatteryQueryError {
    /// The peripheral is not connected to the central.
    NotConnected,
    /// Connected, but no level has been reported yet.
    NotReported,
    /// Source id beyond the peripherals the central knows about.
    UnknownSource,
}

impl fmt::Display for BatteryQueryError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::NotConnected => f.write_str("peripheral not connected"),
            Self::NotReported => f.write_str("no level reported yet"),
            Self::UnknownSource => f.write_str("unknown peripheral"),
        }
    }
}

/// Current-value queries against the keyboard firmware.
pub trait KeyboardState {
    /// Modifiers physically held right now (not sticky or one-shot ones).
    fn explicit_modifiers(&self) -> ModFlags;

    /// Index of the highest active keymap layer.
    fn highest_active_layer(&self) -> u8;

    /// Configured display name of `index`, if the keymap gives one.
    fn layer_name(
        &self,
        index: u8,
    ) -> Option<&str>;

    /// Last state of charge (0-100) reported by peripheral `source`.
    fn peripheral_battery_level(
        &self,
        source: u8,
    ) -> Result<u8, BatteryQueryError>;

    /// Endpoint HID reports go to. Dongles without BLE output always report USB.
    fn selected_endpoint(&self) -> Endpoint { Endpoint::Usb }
}
