//! In-memory keyboard for unit tests.

use crate::config::PERIPHERAL_COUNT;
use crate::host::{BatteryQueryError, KeyboardState};
use crate::modifiers::ModFlags;
use crate::output::Endpoint;

pub struct FakeKeyboard {
    pub mods: ModFlags,
    pub layer: u8,
    pub layer_names: [Option<&'static str>; 8],
    pub batteries: [Result<u8, BatteryQueryError>; PERIPHERAL_COUNT],
    pub endpoint: Endpoint,
}

impl FakeKeyboard {
    /// Base layer, nothing held, USB output, every peripheral unreported.
    pub fn new() -> Self {
        Self {
            mods: ModFlags::NONE,
            layer: 0,
            layer_names: [None; 8],
            batteries: [Err(BatteryQueryError::NotReported); PERIPHERAL_COUNT],
            endpoint: Endpoint::Usb,
        }
    }
}

impl KeyboardState for FakeKeyboard {
    fn explicit_modifiers(&self) -> ModFlags { self.mods }

    fn highest_active_layer(&self) -> u8 { self.layer }

    fn layer_name(
        &self,
        index: u8,
    ) -> Option<&str> {
        self.layer_names.get(usize::from(index)).copied().flatten()
    }

    fn peripheral_battery_level(
        &self,
        source: u8,
    ) -> Result<u8, BatteryQueryError> {
        self.batteries
            .get(usize::from(source))
            .copied()
            .unwrap_or(Err(BatteryQueryError::UnknownSource))
    }

    fn selected_endpoint(&self) -> Endpoint { self.endpoint }
}
