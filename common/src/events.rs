//! Firmware events the status display reacts to.
//!
//! The firmware's event bus hands listeners an opaque [`Event`]. A listener
//! pulls out the payload it understands with [`FromEvent::from_event`] and
//! ignores everything else.

use crate::modifiers::ModFlags;

/// Tag used to route an [`Event`] to its subscribers.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    PeripheralBatteryChanged,
    LayerStateChanged,
    KeycodeStateChanged,
    ModifiersStateChanged,
    EndpointChanged,
    BleProfileChanged,
}

/// A split peripheral reported a new state of charge.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeripheralBatteryChanged {
    pub source: u8,
    pub state_of_charge: u8,
}

/// A keymap layer was activated or deactivated.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerStateChanged {
    pub layer: u8,
    pub active: bool,
}

/// Any key went down or up.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeycodeStateChanged {
    pub usage_page: u16,
    pub keycode: u32,
    pub pressed: bool,
}

/// Modifiers were registered or unregistered outside a plain key press
/// (mod-morph, hold-tap, macros).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModifiersStateChanged {
    pub modifiers: ModFlags,
    pub active: bool,
}

/// Output switched between USB and BLE.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EndpointChanged;

/// The active BLE profile changed or its connection state did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BleProfileChanged {
    pub profile: u8,
}

/// Event as delivered by the firmware event bus.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    PeripheralBatteryChanged(PeripheralBatteryChanged),
    LayerStateChanged(LayerStateChanged),
    KeycodeStateChanged(KeycodeStateChanged),
    ModifiersStateChanged(ModifiersStateChanged),
    EndpointChanged(EndpointChanged),
    BleProfileChanged(BleProfileChanged),
}

impl Event {
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::PeripheralBatteryChanged(_) => EventKind::PeripheralBatteryChanged,
            Self::LayerStateChanged(_) => EventKind::LayerStateChanged,
            Self::KeycodeStateChanged(_) => EventKind::KeycodeStateChanged,
            Self::ModifiersStateChanged(_) => EventKind::ModifiersStateChanged,
            Self::EndpointChanged(_) => EventKind::EndpointChanged,
            Self::BleProfileChanged(_) => EventKind::BleProfileChanged,
        }
    }
}

/// Typed payload extraction from an opaque [`Event`].
pub trait FromEvent: Sized {
    /// Kind of event carrying this payload.
    const KIND: EventKind;

    /// The payload, or `None` if `event` is of another kind.
    fn from_event(event: &Event) -> Option<Self>;
}

impl FromEvent for PeripheralBatteryChanged {
    const KIND: EventKind = EventKind::PeripheralBatteryChanged;

    fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::PeripheralBatteryChanged(payload) => Some(*payload),
            _ => None,
        }
    }
}

impl FromEvent for LayerStateChanged {
    const KIND: EventKind = EventKind::LayerStateChanged;

    fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::LayerStateChanged(payload) => Some(*payload),
            _ => None,
        }
    }
}

impl FromEvent for KeycodeStateChanged {
    const KIND: EventKind = EventKind::KeycodeStateChanged;

    fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::KeycodeStateChanged(payload) => Some(*payload),
            _ => None,
        }
    }
}

impl FromEvent for ModifiersStateChanged {
    const KIND: EventKind = EventKind::ModifiersStateChanged;

    fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::ModifiersStateChanged(payload) => Some(*payload),
            _ => None,
        }
    }
}

impl FromEvent for EndpointChanged {
    const KIND: EventKind = EventKind::EndpointChanged;

    fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::EndpointChanged(payload) => Some(*payload),
            _ => None,
        }
    }
}

impl FromEvent for BleProfileChanged {
    const KIND: EventKind = EventKind::BleProfileChanged;

    fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::BleProfileChanged(payload) => Some(*payload),
            _ => None,
        }
    }
}

impl From<PeripheralBatteryChanged> for Event {
    fn from(payload: PeripheralBatteryChanged) -> Self { Self::PeripheralBatteryChanged(payload) }
}

impl From<LayerStateChanged> for Event {
    fn from(payload: LayerStateChanged) -> Self { Self::LayerStateChanged(payload) }
}

impl From<KeycodeStateChanged> for Event {
    fn from(payload: KeycodeStateChanged) -> Self { Self::KeycodeStateChanged(payload) }
}

impl From<ModifiersStateChanged> for Event {
    fn from(payload: ModifiersStateChanged) -> Self { Self::ModifiersStateChanged(payload) }
}

impl From<EndpointChanged> for Event {
    fn from(payload: EndpointChanged) -> Self { Self::EndpointChanged(payload) }
}

impl From<BleProfileChanged> for Event {
    fn from(payload: BleProfileChanged) -> Self { Self::BleProfileChanged(payload) }
}
