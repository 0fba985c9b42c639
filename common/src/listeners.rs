//! Event rules folding firmware events into every widget's snapshot.
//!
//! | Event kind                 | Rule             | Redraws when          |
//! |----------------------------|------------------|-----------------------|
//! | `PeripheralBatteryChanged` | [`on_battery`]   | source is known       |
//! | `LayerStateChanged`        | [`on_layer`]     | always                |
//! | `KeycodeStateChanged`      | [`on_modifiers`] | explicit mask changed |
//! | `ModifiersStateChanged`    | [`on_modifiers`] | explicit mask changed |
//! | `EndpointChanged`          | [`on_output`]    | endpoint changed      |
//! | `BleProfileChanged`        | [`on_output`]    | endpoint changed      |
//!
//! Apart from the battery level, rules ignore the payload and re-read the
//! current value from the keyboard. Only the highest active layer matters, and
//! the explicit modifier mask already folds in every key that changed.

use defmt_or_log as log;

use crate::config::PERIPHERAL_COUNT;
use crate::events::{Event, EventKind, FromEvent, PeripheralBatteryChanged};
use crate::host::KeyboardState;
use crate::layer::LayerState;
use crate::registry::{Redraws, WidgetRegistry};

/// Rule signature: fold `event` into the registry, return redrawn surfaces.
pub type Handler = fn(&Event, &dyn KeyboardState, &mut WidgetRegistry) -> Redraws;

/// One row of the routing table.
#[derive(Clone, Copy)]
pub struct Subscription {
    pub kind: EventKind,
    pub handler: Handler,
}

impl Subscription {
    const fn new(
        kind: EventKind,
        handler: Handler,
    ) -> Self {
        Self { kind, handler }
    }
}

/// Routing table installed by the first widget registration.
pub const SUBSCRIPTIONS: [Subscription; 6] = [
    Subscription::new(EventKind::PeripheralBatteryChanged, on_battery),
    Subscription::new(EventKind::LayerStateChanged, on_layer),
    Subscription::new(EventKind::KeycodeStateChanged, on_modifiers),
    Subscription::new(EventKind::ModifiersStateChanged, on_modifiers),
    Subscription::new(EventKind::EndpointChanged, on_output),
    Subscription::new(EventKind::BleProfileChanged, on_output),
];

pub const MAX_SUBSCRIPTIONS: usize = SUBSCRIPTIONS.len();

pub fn on_battery(
    event: &Event,
    _host: &dyn KeyboardState,
    registry: &mut WidgetRegistry,
) -> Redraws {
    let Some(payload) = PeripheralBatteryChanged::from_event(event) else {
        return Redraws::new();
    };
    if usize::from(payload.source) >= PERIPHERAL_COUNT {
        log::warn!("battery report from unknown peripheral {}", payload.source);
        return Redraws::new();
    }
    registry.update_all(|snapshot| snapshot.set_battery(payload.source, payload.state_of_charge))
}

pub fn on_layer(
    _event: &Event,
    host: &dyn KeyboardState,
    registry: &mut WidgetRegistry,
) -> Redraws {
    let label = LayerState::current(host).label();
    registry.update_all(|snapshot| snapshot.set_top_layer(&label))
}

pub fn on_modifiers(
    _event: &Event,
    host: &dyn KeyboardState,
    registry: &mut WidgetRegistry,
) -> Redraws {
    let mods = host.explicit_modifiers();
    registry.update_all(|snapshot| snapshot.set_modifiers(mods))
}

pub fn on_output(
    _event: &Event,
    host: &dyn KeyboardState,
    registry: &mut WidgetRegistry,
) -> Redraws {
    let endpoint = host.selected_endpoint();
    registry.update_all(|snapshot| snapshot.set_output(endpoint))
}
