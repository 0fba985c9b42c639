//! Every live status widget, one per attached surface.
//!
//! Listeners never know how many displays exist. They hand the registry a
//! snapshot mutator and the registry applies it to each active widget,
//! redrawing the ones that report a change.

use core::fmt;

use defmt_or_log as log;
use heapless::Vec;

use crate::colors::Palette;
use crate::config::{DisplayConfig, MAX_WIDGETS};
use crate::host::KeyboardState;
use crate::snapshot::StatusSnapshot;
use crate::styles::StatusStyles;
use crate::widget::{StatusWidget, SurfaceId, WidgetState};

/// Surfaces redrawn by one update, in registration order.
pub type Redraws = Vec<SurfaceId, MAX_WIDGETS>;

/// Index of a widget in its registry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WidgetId(pub usize);

#[defmt_or_log::derive_format_or_debug]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// All [`MAX_WIDGETS`] slots are taken.
    Full,
    /// A widget already draws for this surface.
    DuplicateSurface,
}

impl fmt::Display for RegistryError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Full => write!(f, "widget registry full ({MAX_WIDGETS} widgets)"),
            Self::DuplicateSurface => f.write_str("surface already has a status widget"),
        }
    }
}

/// Fixed-capacity set of status widgets sharing one configuration.
pub struct WidgetRegistry {
    widgets: Vec<StatusWidget, MAX_WIDGETS>,
    styles: StatusStyles,
    config: DisplayConfig,
}

impl WidgetRegistry {
    pub fn new(config: DisplayConfig) -> Self {
        Self {
            widgets: Vec::new(),
            styles: StatusStyles::new(Palette::new(config.inverted)),
            config,
        }
    }

    /// Create and attach a widget for `surface`.
    pub fn insert(
        &mut self,
        surface: SurfaceId,
    ) -> Result<WidgetId, RegistryError> {
        if self.by_surface(surface).is_some() {
            return Err(RegistryError::DuplicateSurface);
        }
        let mut widget = StatusWidget::new(surface);
        widget.attach(&self.config, &self.styles);
        let id = WidgetId(self.widgets.len());
        self.widgets.push(widget).map_err(|_| RegistryError::Full)?;
        log::debug!("status widget {} attached to surface {}", id.0, surface.0);
        Ok(id)
    }

    /// Fill widget `id` from the keyboard and draw its first frame.
    pub fn activate(
        &mut self,
        id: WidgetId,
        host: &dyn KeyboardState,
    ) {
        if let Some(widget) = self.widgets.get_mut(id.0) {
            widget.activate(host, &self.styles, &self.config);
        }
    }

    /// Apply `update` to every active widget and redraw those it touched.
    pub fn update_all<F>(
        &mut self,
        mut update: F,
    ) -> Redraws
    where
        F: FnMut(&mut StatusSnapshot) -> bool,
    {
        let mut redrawn = Redraws::new();
        for widget in self.widgets.iter_mut().filter(|w| w.state() == WidgetState::Active) {
            if update(widget.snapshot_mut()) {
                widget.redraw(&self.styles, &self.config);
                let _ = redrawn.push(widget.surface());
            }
        }
        redrawn
    }

    #[inline]
    pub fn get(
        &self,
        id: WidgetId,
    ) -> Option<&StatusWidget> {
        self.widgets.get(id.0)
    }

    pub fn by_surface(
        &self,
        surface: SurfaceId,
    ) -> Option<&StatusWidget> {
        self.widgets.iter().find(|w| w.surface() == surface)
    }

    #[inline]
    pub fn len(&self) -> usize { self.widgets.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.widgets.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &StatusWidget> { self.widgets.iter() }

    /// Drop every widget.
    pub fn clear(&mut self) { self.widgets.clear(); }

    #[inline]
    pub const fn styles(&self) -> &StatusStyles { &self.styles }

    #[inline]
    pub const fn config(&self) -> &DisplayConfig { &self.config }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::ModFlags;
    use crate::testing::FakeKeyboard;

    fn registry() -> WidgetRegistry { WidgetRegistry::new(DisplayConfig::DEFAULT) }

    #[test]
    fn test_insert_until_full() {
        let mut registry = registry();
        for n in 0..MAX_WIDGETS {
            let id = registry.insert(SurfaceId(n as u8));
            assert_eq!(id, Ok(WidgetId(n)));
        }
        assert_eq!(registry.insert(SurfaceId(200)), Err(RegistryError::Full));
        assert_eq!(registry.len(), MAX_WIDGETS);
    }

    #[test]
    fn test_duplicate_surface_rejected() {
        let mut registry = registry();
        registry.insert(SurfaceId(0)).unwrap();
        assert_eq!(registry.insert(SurfaceId(0)), Err(RegistryError::DuplicateSurface));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_update_skips_inactive_widgets() {
        let keyboard = FakeKeyboard::new();
        let mut registry = registry();
        let active = registry.insert(SurfaceId(0)).unwrap();
        registry.insert(SurfaceId(1)).unwrap();
        registry.activate(active, &keyboard);

        let redrawn = registry.update_all(|s| s.set_modifiers(ModFlags::LCTL));
        assert_eq!(redrawn.as_slice(), &[SurfaceId(0)], "Attached but inactive widget skipped");
        assert_eq!(registry.by_surface(SurfaceId(1)).unwrap().redraw_count(), 0);
    }

    #[test]
    fn test_update_redraws_only_touched_widgets() {
        let keyboard = FakeKeyboard::new();
        let mut registry = registry();
        for n in 0..2 {
            let id = registry.insert(SurfaceId(n)).unwrap();
            registry.activate(id, &keyboard);
        }

        let redrawn = registry.update_all(|s| s.set_modifiers(ModFlags::NONE));
        assert!(redrawn.is_empty(), "Unchanged mask must not redraw");
        for widget in registry.iter() {
            assert_eq!(widget.redraw_count(), 1, "Only the activation frame");
        }

        let redrawn = registry.update_all(|s| s.set_modifiers(ModFlags::LGUI));
        assert_eq!(redrawn.as_slice(), &[SurfaceId(0), SurfaceId(1)]);
    }

    #[test]
    fn test_clear_empties_registry() {
        let mut registry = registry();
        registry.insert(SurfaceId(0)).unwrap();
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.get(WidgetId(0)).is_none());
    }
}
