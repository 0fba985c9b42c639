//! Process-wide status display: routing table plus widget registry.
//!
//! The host owns one [`StatusDisplay`], calls [`init`](StatusDisplay::init)
//! once at boot, registers a widget per physical display and feeds every
//! firmware event to [`dispatch`](StatusDisplay::dispatch). The surfaces
//! returned by `dispatch` are the ones whose frame must be presented again.

use defmt_or_log as log;
use heapless::Vec;

use crate::config::DisplayConfig;
use crate::events::Event;
use crate::host::KeyboardState;
use crate::listeners::{MAX_SUBSCRIPTIONS, SUBSCRIPTIONS, Subscription};
use crate::registry::{Redraws, RegistryError, WidgetId, WidgetRegistry};
use crate::widget::{StatusWidget, SurfaceId};

pub struct StatusDisplay {
    config: DisplayConfig,
    initialized: bool,
    listeners_active: bool,
    subscriptions: Vec<Subscription, MAX_SUBSCRIPTIONS>,
    registry: WidgetRegistry,
}

impl StatusDisplay {
    pub fn new(config: DisplayConfig) -> Self {
        Self {
            config,
            initialized: false,
            listeners_active: false,
            subscriptions: Vec::new(),
            registry: WidgetRegistry::new(config),
        }
    }

    /// Prepare the display. Returns `false` if it was already initialized.
    pub fn init(&mut self) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;
        log::info!(
            "status display ready: rotation {:?}, layout {:?}, inverted {}",
            self.config.rotation,
            self.config.layout(),
            self.config.inverted
        );
        true
    }

    /// Drop every widget and subscription, back to the state after `new`.
    pub fn teardown(&mut self) {
        self.registry.clear();
        self.subscriptions.clear();
        self.listeners_active = false;
        self.initialized = false;
        log::info!("status display torn down");
    }

    /// Attach a widget to `surface` and draw its first frame.
    ///
    /// The first successful registration installs the routing table. Calling
    /// this before [`init`](Self::init) initializes implicitly.
    pub fn register_widget(
        &mut self,
        surface: SurfaceId,
        host: &dyn KeyboardState,
    ) -> Result<WidgetId, RegistryError> {
        self.init();
        let id = self.registry.insert(surface).inspect_err(|err| {
            log::warn!("cannot add status widget on surface {}: {}", surface.0, err);
        })?;
        if !self.listeners_active {
            self.activate_listeners();
        }
        self.registry.activate(id, host);
        Ok(id)
    }

    fn activate_listeners(&mut self) {
        for subscription in SUBSCRIPTIONS {
            let _ = self.subscriptions.push(subscription);
        }
        self.listeners_active = true;
        log::debug!("{} event subscriptions active", self.subscriptions.len());
    }

    /// Run every rule subscribed to `event` and collect the redrawn surfaces.
    ///
    /// A surface touched by more than one rule is listed once.
    pub fn dispatch(
        &mut self,
        event: &Event,
        host: &dyn KeyboardState,
    ) -> Redraws {
        let mut redrawn = Redraws::new();
        let kind = event.kind();
        for subscription in self.subscriptions.iter().filter(|s| s.kind == kind) {
            for surface in (subscription.handler)(event, host, &mut self.registry) {
                if !redrawn.contains(&surface) {
                    let _ = redrawn.push(surface);
                }
            }
        }
        redrawn
    }

    #[inline]
    pub fn widget(
        &self,
        id: WidgetId,
    ) -> Option<&StatusWidget> {
        self.registry.get(id)
    }

    #[inline]
    pub const fn registry(&self) -> &WidgetRegistry { &self.registry }

    #[inline]
    pub const fn config(&self) -> &DisplayConfig { &self.config }

    #[inline]
    pub const fn is_initialized(&self) -> bool { self.initialized }

    #[inline]
    pub const fn listeners_active(&self) -> bool { self.listeners_active }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_WIDGETS, PERIPHERAL_COUNT};
    use crate::events::{KeycodeStateChanged, LayerStateChanged, ModifiersStateChanged, PeripheralBatteryChanged};
    use crate::host::BatteryQueryError;
    use crate::modifiers::ModFlags;
    use crate::render::StatusText;
    use crate::testing::FakeKeyboard;

    fn display() -> StatusDisplay { StatusDisplay::new(DisplayConfig::DEFAULT) }

    fn battery(
        source: u8,
        state_of_charge: u8,
    ) -> Event {
        PeripheralBatteryChanged {
            source,
            state_of_charge,
        }
        .into()
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    #[test]
    fn test_init_is_idempotent() {
        let mut display = display();
        assert!(display.init());
        assert!(!display.init(), "Second init must be a no-op");
        assert!(display.is_initialized());
        assert!(!display.listeners_active(), "Listeners wait for the first widget");
    }

    #[test]
    fn test_first_widget_activates_listeners_once() {
        let keyboard = FakeKeyboard::new();
        let mut display = display();
        display.init();
        display.register_widget(SurfaceId(0), &keyboard).unwrap();
        display.register_widget(SurfaceId(1), &keyboard).unwrap();
        assert!(display.listeners_active());
        assert_eq!(display.subscriptions.len(), SUBSCRIPTIONS.len(), "Table installed once");
    }

    #[test]
    fn test_registry_full() {
        let keyboard = FakeKeyboard::new();
        let mut display = display();
        for n in 0..MAX_WIDGETS {
            display.register_widget(SurfaceId(n as u8), &keyboard).unwrap();
        }
        let result = display.register_widget(SurfaceId(99), &keyboard);
        assert_eq!(result, Err(RegistryError::Full));
        assert_eq!(display.registry().len(), MAX_WIDGETS);
    }

    #[test]
    fn test_teardown_resets_everything() {
        let keyboard = FakeKeyboard::new();
        let mut display = display();
        display.register_widget(SurfaceId(0), &keyboard).unwrap();
        display.teardown();

        assert!(!display.is_initialized());
        assert!(!display.listeners_active());
        assert!(display.registry().is_empty());
        assert!(display.dispatch(&battery(0, 50), &keyboard).is_empty());
        assert!(display.init(), "Init works again after teardown");
    }

    #[test]
    fn test_query_failure_shows_placeholder() {
        let mut keyboard = FakeKeyboard::new();
        keyboard.batteries = [Err(BatteryQueryError::NotReported), Ok(70)];
        let mut display = display();
        let id = display.register_widget(SurfaceId(0), &keyboard).unwrap();

        let widget = display.widget(id).unwrap();
        assert_eq!(widget.snapshot().battery_line().as_str(), "  ...  70 % ");
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    #[test]
    fn test_events_before_registration_are_ignored() {
        let keyboard = FakeKeyboard::new();
        let mut display = display();
        display.init();
        assert!(display.dispatch(&battery(0, 50), &keyboard).is_empty());
    }

    #[test]
    fn test_shared_event_redraws_every_widget() {
        let keyboard = FakeKeyboard::new();
        let mut display = display();
        for n in 0..3 {
            display.register_widget(SurfaceId(n), &keyboard).unwrap();
        }

        let redrawn = display.dispatch(&battery(0, 64), &keyboard);

        assert_eq!(redrawn.as_slice(), &[SurfaceId(0), SurfaceId(1), SurfaceId(2)]);
        for widget in display.registry().iter() {
            assert_eq!(widget.snapshot().battery(0), Some(" 64 % "));
            assert_eq!(widget.redraw_count(), 2);
        }
    }

    #[test]
    fn test_unknown_battery_source_changes_nothing() {
        let keyboard = FakeKeyboard::new();
        let mut display = display();
        let id = display.register_widget(SurfaceId(0), &keyboard).unwrap();
        let frame_before = display.widget(id).unwrap().frame().clone();

        let redrawn = display.dispatch(&battery(PERIPHERAL_COUNT as u8, 10), &keyboard);

        assert!(redrawn.is_empty());
        assert_eq!(display.widget(id).unwrap().frame(), &frame_before);
    }

    #[test]
    fn test_modifier_events_redraw_on_change_only() {
        let mut keyboard = FakeKeyboard::new();
        let mut display = display();
        let id = display.register_widget(SurfaceId(0), &keyboard).unwrap();

        keyboard.mods = ModFlags::LALT;
        let press: Event = KeycodeStateChanged {
            usage_page: 0x07,
            keycode: 0xE2,
            pressed: true,
        }
        .into();
        let registered: Event = ModifiersStateChanged {
            modifiers: ModFlags::LALT,
            active: true,
        }
        .into();

        assert_eq!(display.dispatch(&press, &keyboard).len(), 1);
        assert!(display.dispatch(&registered, &keyboard).is_empty(), "Same mask, no redraw");
        assert_eq!(display.widget(id).unwrap().redraw_count(), 2);
    }

    #[test]
    fn test_end_to_end_status_text() {
        let mut keyboard = FakeKeyboard::new();
        let mut display = display();
        let id = display.register_widget(SurfaceId(0), &keyboard).unwrap();

        display.dispatch(&battery(0, 85), &keyboard);
        display.dispatch(&battery(1, 42), &keyboard);

        keyboard.layer = 3;
        keyboard.layer_names[3] = Some("Nav");
        let layer: Event = LayerStateChanged {
            layer: 3,
            active: true,
        }
        .into();
        display.dispatch(&layer, &keyboard);

        keyboard.mods = ModFlags::LSFT.union(ModFlags::RCTL);
        let key: Event = KeycodeStateChanged {
            usage_page: 0x07,
            keycode: 0xE4,
            pressed: true,
        }
        .into();
        display.dispatch(&key, &keyboard);

        let text = StatusText::compose(display.widget(id).unwrap().snapshot());
        assert_eq!(text.battery_line.as_str(), " 85 %  42 % ");
        assert_eq!(text.layer_label.as_str(), "Nav");
        assert_eq!(text.modifier_block.as_str(), "SHIFT\nCTRL\n   \n   ");
        assert_eq!(text.output_label.as_str(), "USB");
    }
}
