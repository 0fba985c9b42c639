//! Last-known displayable state of one widget.
//!
//! Each mutator reports whether the snapshot was touched. The caller redraws
//! on `true`; there is no dirty flag and no batching, a listener that touches
//! the snapshot redraws right away.
//!
//! | Mutator                  | Returns `true` when                  |
//! |--------------------------|--------------------------------------|
//! | [`set_battery`]          | `source` is a known peripheral       |
//! | [`set_battery_unavailable`] | `source` is a known peripheral    |
//! | [`set_top_layer`]        | always                               |
//! | [`set_modifiers`]        | the mask differs from the stored one |
//! | [`set_output`]           | the endpoint differs                 |
//!
//! [`set_battery`]: StatusSnapshot::set_battery
//! [`set_battery_unavailable`]: StatusSnapshot::set_battery_unavailable
//! [`set_top_layer`]: StatusSnapshot::set_top_layer
//! [`set_modifiers`]: StatusSnapshot::set_modifiers
//! [`set_output`]: StatusSnapshot::set_output

use core::fmt::Write;

use heapless::String;

use crate::config::{BATTERY_LINE_LEN, BATTERY_SLOT_LEN, PERIPHERAL_COUNT};
use crate::layer::LayerLabel;
use crate::modifiers::ModFlags;
use crate::output::Endpoint;

/// Fixed-width battery text for one peripheral.
pub type BatteryText = String<BATTERY_SLOT_LEN>;

/// All battery slots joined in source-id order.
pub type BatteryLine = String<BATTERY_LINE_LEN>;

/// Shown in a battery slot when the level cannot be read.
pub const BATTERY_PLACEHOLDER: &str = "  ... ";

/// Format a state of charge as `"{:>3} % "`. Levels above 100 clamp to 100.
pub fn format_battery(level: u8) -> BatteryText {
    let mut text = BatteryText::new();
    let _ = write!(text, "{:>3} % ", level.min(100));
    text
}

/// Status facets shown by one widget.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StatusSnapshot {
    batteries: [BatteryText; PERIPHERAL_COUNT],
    top_layer: LayerLabel,
    modifiers: ModFlags,
    output: Endpoint,
}

impl StatusSnapshot {
    /// Empty snapshot: blank batteries and layer, nothing held, USB output.
    pub const fn new() -> Self {
        Self {
            batteries: [const { BatteryText::new() }; PERIPHERAL_COUNT],
            top_layer: LayerLabel::new(),
            modifiers: ModFlags::NONE,
            output: Endpoint::Usb,
        }
    }

    /// Store the level of peripheral `source`. Unknown sources are dropped.
    pub fn set_battery(
        &mut self,
        source: u8,
        level: u8,
    ) -> bool {
        match self.batteries.get_mut(usize::from(source)) {
            Some(slot) => {
                *slot = format_battery(level);
                true
            }
            None => false,
        }
    }

    /// Show the placeholder for peripheral `source`. Unknown sources are dropped.
    pub fn set_battery_unavailable(
        &mut self,
        source: u8,
    ) -> bool {
        match self.batteries.get_mut(usize::from(source)) {
            Some(slot) => {
                slot.clear();
                let _ = slot.push_str(BATTERY_PLACEHOLDER);
                true
            }
            None => false,
        }
    }

    pub fn set_top_layer(
        &mut self,
        label: &str,
    ) -> bool {
        self.top_layer.clear();
        for c in label.chars() {
            if self.top_layer.push(c).is_err() {
                break;
            }
        }
        true
    }

    pub fn set_modifiers(
        &mut self,
        mods: ModFlags,
    ) -> bool {
        if self.modifiers == mods {
            return false;
        }
        self.modifiers = mods;
        true
    }

    pub fn set_output(
        &mut self,
        endpoint: Endpoint,
    ) -> bool {
        if self.output == endpoint {
            return false;
        }
        self.output = endpoint;
        true
    }

    /// Battery text of `source`, `None` for unknown sources.
    pub fn battery(
        &self,
        source: u8,
    ) -> Option<&str> {
        self.batteries.get(usize::from(source)).map(BatteryText::as_str)
    }

    /// Every battery slot concatenated left to right.
    pub fn battery_line(&self) -> BatteryLine {
        let mut line = BatteryLine::new();
        for slot in &self.batteries {
            let _ = line.push_str(slot);
        }
        line
    }

    #[inline]
    pub fn top_layer(&self) -> &str { &self.top_layer }

    #[inline]
    pub const fn modifiers(&self) -> ModFlags { self.modifiers }

    #[inline]
    pub const fn output(&self) -> Endpoint { self.output }
}

impl Default for StatusSnapshot {
    fn default() -> Self { Self::new() }
}
