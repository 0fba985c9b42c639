//! One status widget: a surface, its canvas and its snapshot.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──attach()──▶ Initialized ──activate()──▶ Active
//! ```
//!
//! - [`attach`](StatusWidget::attach) sizes the canvas for the surface.
//! - [`activate`](StatusWidget::activate) fills the snapshot from the keyboard
//!   and draws the first frame.
//!
//! There is no teardown state; widgets live as long as the display.

use defmt_or_log as log;

use crate::canvas::Canvas;
use crate::config::{DisplayConfig, PERIPHERAL_COUNT};
use crate::host::KeyboardState;
use crate::layer::LayerState;
use crate::render::render;
use crate::snapshot::StatusSnapshot;
use crate::styles::StatusStyles;

/// Handle of the physical display a widget draws for.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SurfaceId(pub u8);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WidgetState {
    Uninitialized,
    Initialized,
    Active,
}

/// Status widget bound to one surface.
#[derive(Clone, Debug)]
pub struct StatusWidget {
    surface: SurfaceId,
    state: WidgetState,
    snapshot: StatusSnapshot,
    canvas: Canvas,
    scratch: Canvas,
    redraws: u32,
}

impl StatusWidget {
    pub const fn new(surface: SurfaceId) -> Self {
        Self {
            surface,
            state: WidgetState::Uninitialized,
            snapshot: StatusSnapshot::new(),
            canvas: Canvas::empty(),
            scratch: Canvas::empty(),
            redraws: 0,
        }
    }

    /// Give the widget a blank canvas of the configured size.
    pub fn attach(
        &mut self,
        config: &DisplayConfig,
        styles: &StatusStyles,
    ) {
        if self.state != WidgetState::Uninitialized {
            return;
        }
        self.canvas.reset(config.canvas_size(), styles.palette.background);
        self.state = WidgetState::Initialized;
    }

    /// Load the current keyboard state and draw the first frame.
    pub fn activate(
        &mut self,
        host: &dyn KeyboardState,
        styles: &StatusStyles,
        config: &DisplayConfig,
    ) {
        if self.state != WidgetState::Initialized {
            return;
        }
        self.refresh(host);
        self.redraw(styles, config);
        self.state = WidgetState::Active;
        log::info!("status widget on surface {} active", self.surface.0);
    }

    /// Re-read every facet from the keyboard.
    ///
    /// A battery that cannot be read shows the placeholder instead of
    /// failing the whole refresh.
    pub fn refresh(
        &mut self,
        host: &dyn KeyboardState,
    ) {
        for source in 0..PERIPHERAL_COUNT as u8 {
            match host.peripheral_battery_level(source) {
                Ok(level) => {
                    self.snapshot.set_battery(source, level);
                }
                Err(err) => {
                    log::debug!("battery of peripheral {} unavailable: {}", source, err);
                    self.snapshot.set_battery_unavailable(source);
                }
            }
        }
        self.snapshot.set_top_layer(&LayerState::current(host).label());
        self.snapshot.set_modifiers(host.explicit_modifiers());
        self.snapshot.set_output(host.selected_endpoint());
    }

    /// Render the snapshot into the canvas.
    pub fn redraw(
        &mut self,
        styles: &StatusStyles,
        config: &DisplayConfig,
    ) {
        render(&mut self.canvas, &mut self.scratch, &self.snapshot, styles, config);
        self.redraws = self.redraws.wrapping_add(1);
    }

    #[inline]
    pub const fn surface(&self) -> SurfaceId { self.surface }

    #[inline]
    pub const fn state(&self) -> WidgetState { self.state }

    #[inline]
    pub const fn snapshot(&self) -> &StatusSnapshot { &self.snapshot }

    #[inline]
    pub fn snapshot_mut(&mut self) -> &mut StatusSnapshot { &mut self.snapshot }

    /// Last rendered frame, rotated and ready to present.
    #[inline]
    pub const fn frame(&self) -> &Canvas { &self.canvas }

    /// Number of renders since creation.
    #[inline]
    pub const fn redraw_count(&self) -> u32 { self.redraws }
}
