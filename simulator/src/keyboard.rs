//! Fake keyboard driven by the desktop keyboard.
//!
//! | Key              | Effect                                         |
//! |------------------|------------------------------------------------|
//! | `B` / `N`        | Drain peripheral 0 / 1 by 7 % (wraps to 100 %) |
//! | `L`              | Cycle through the keymap layers                |
//! | `S` `C` `G` `A`  | Toggle Shift, Ctrl, GUI, Alt                   |
//! | `O`              | Cycle USB, BLE profile 1, BLE profile 2 (lost) |
//!
//! Peripheral 1 starts without a reported level, so the placeholder is shown
//! until `N` is first pressed.

use dongle_common::PERIPHERAL_COUNT;
use dongle_common::events::{
    BleProfileChanged,
    EndpointChanged,
    Event,
    KeycodeStateChanged,
    LayerStateChanged,
    PeripheralBatteryChanged,
};
use dongle_common::host::{BatteryQueryError, KeyboardState};
use dongle_common::modifiers::ModFlags;
use dongle_common::output::Endpoint;
use embedded_graphics_simulator::sdl2::Keycode;
use heapless::Vec;

/// Events raised by one key press.
pub type Raised = Vec<Event, 2>;

/// Keymap layer names, `None` for layers shown by index.
const LAYER_NAMES: [Option<&str>; 4] = [Some("Base"), Some("Nav"), Some("Symbols"), None];

/// Percent drained per key press.
const DRAIN_STEP: u8 = 7;

/// HID usage page of keyboard keys.
const USAGE_PAGE_KEYBOARD: u16 = 0x07;

pub struct SimKeyboard {
    mods: ModFlags,
    layer: u8,
    batteries: [Option<u8>; PERIPHERAL_COUNT],
    endpoint: Endpoint,
}

impl SimKeyboard {
    pub fn new() -> Self {
        let mut batteries = [None; PERIPHERAL_COUNT];
        batteries[0] = Some(100);
        Self {
            mods: ModFlags::NONE,
            layer: 0,
            batteries,
            endpoint: Endpoint::Usb,
        }
    }

    /// Apply a key press and return the firmware events it raises.
    pub fn press(
        &mut self,
        keycode: Keycode,
    ) -> Raised {
        let mut raised = Raised::new();
        match keycode {
            Keycode::B | Keycode::N => {
                let source = if keycode == Keycode::B { 0 } else { 1 };
                if let Some(event) = self.drain(source) {
                    let _ = raised.push(event);
                }
            }
            Keycode::L => {
                let _ = raised.push(self.next_layer());
            }
            Keycode::S => {
                let _ = raised.push(self.toggle(ModFlags::LSFT, 0xE1));
            }
            Keycode::C => {
                let _ = raised.push(self.toggle(ModFlags::LCTL, 0xE0));
            }
            Keycode::G => {
                let _ = raised.push(self.toggle(ModFlags::LGUI, 0xE3));
            }
            Keycode::A => {
                let _ = raised.push(self.toggle(ModFlags::LALT, 0xE2));
            }
            Keycode::O => {
                for event in self.next_endpoint() {
                    let _ = raised.push(event);
                }
            }
            _ => {}
        }
        raised
    }

    /// Lower the level of `source`. Sources beyond the peripheral count raise
    /// nothing.
    fn drain(
        &mut self,
        source: u8,
    ) -> Option<Event> {
        let slot = self.batteries.get_mut(usize::from(source))?;
        let level = match *slot {
            None => 100,
            Some(level) if level < DRAIN_STEP => 100,
            Some(level) => level - DRAIN_STEP,
        };
        *slot = Some(level);
        log::debug!("peripheral {source} at {level} %");
        Some(
            PeripheralBatteryChanged {
                source,
                state_of_charge: level,
            }
            .into(),
        )
    }

    fn next_layer(&mut self) -> Event {
        let previous = self.layer;
        self.layer = (self.layer + 1) % LAYER_NAMES.len() as u8;
        // Wrapping back to the base layer deactivates the previous one.
        let (layer, active) = if self.layer == 0 { (previous, false) } else { (self.layer, true) };
        log::debug!("layer {} active", self.layer);
        LayerStateChanged { layer, active }.into()
    }

    fn toggle(
        &mut self,
        modifier: ModFlags,
        keycode: u32,
    ) -> Event {
        let pressed = !self.mods.intersects(modifier);
        self.mods = if pressed { self.mods.union(modifier) } else { self.mods.difference(modifier) };
        KeycodeStateChanged {
            usage_page: USAGE_PAGE_KEYBOARD,
            keycode,
            pressed,
        }
        .into()
    }

    fn next_endpoint(&mut self) -> Raised {
        let mut raised = Raised::new();
        self.endpoint = match self.endpoint {
            Endpoint::Usb => {
                let _ = raised.push(EndpointChanged.into());
                Endpoint::Ble {
                    profile: 0,
                    connected: true,
                }
            }
            Endpoint::Ble { profile: 0, .. } => {
                let _ = raised.push(BleProfileChanged { profile: 1 }.into());
                Endpoint::Ble {
                    profile: 1,
                    connected: false,
                }
            }
            Endpoint::Ble { .. } => {
                let _ = raised.push(EndpointChanged.into());
                Endpoint::Usb
            }
        };
        log::debug!("output {:?}", self.endpoint);
        raised
    }
}

impl KeyboardState for SimKeyboard {
    fn explicit_modifiers(&self) -> ModFlags { self.mods }

    fn highest_active_layer(&self) -> u8 { self.layer }

    fn layer_name(
        &self,
        index: u8,
    ) -> Option<&str> {
        LAYER_NAMES.get(usize::from(index)).copied().flatten()
    }

    fn peripheral_battery_level(
        &self,
        source: u8,
    ) -> Result<u8, BatteryQueryError> {
        match self.batteries.get(usize::from(source)) {
            Some(Some(level)) => Ok(*level),
            Some(None) => Err(BatteryQueryError::NotReported),
            None => Err(BatteryQueryError::UnknownSource),
        }
    }

    fn selected_endpoint(&self) -> Endpoint { self.endpoint }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_unknown_peripheral_is_ignored() {
        let mut keyboard = SimKeyboard::new();
        let before = keyboard.batteries;
        assert!(keyboard.drain(PERIPHERAL_COUNT as u8).is_none());
        assert!(keyboard.drain(u8::MAX).is_none());
        assert_eq!(keyboard.batteries, before, "Levels must not change");
    }

    #[test]
    fn test_drain_wraps_below_one_step() {
        let mut keyboard = SimKeyboard::new();
        let source = PERIPHERAL_COUNT as u8 - 1;
        if source != 0 {
            assert_eq!(keyboard.peripheral_battery_level(source), Err(BatteryQueryError::NotReported));
        }
        keyboard.batteries[usize::from(source)] = Some(DRAIN_STEP - 1);
        let event = keyboard.drain(source);
        assert_eq!(
            event,
            Some(Event::from(PeripheralBatteryChanged {
                source,
                state_of_charge: 100,
            })),
            "Below one step wraps back to full"
        );
        assert_eq!(keyboard.peripheral_battery_level(source), Ok(100));
    }
}
