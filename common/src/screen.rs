//! Screen composition.
//!
//! A screen is one status widget drawing every facet into a single canvas.
//! [`build_screen`] is the only way to get one.

use crate::canvas::Canvas;
use crate::display::StatusDisplay;
use crate::host::KeyboardState;
use crate::registry::{RegistryError, WidgetId};
use crate::widget::SurfaceId;

/// Handle to a composed status screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Screen {
    surface: SurfaceId,
    widget: WidgetId,
}

/// Register a status widget for `surface` and return its screen.
pub fn build_screen(
    display: &mut StatusDisplay,
    surface: SurfaceId,
    host: &dyn KeyboardState,
) -> Result<Screen, RegistryError> {
    let widget = display.register_widget(surface, host)?;
    Ok(Screen { surface, widget })
}

impl Screen {
    /// Frame to present, `None` if `display` was torn down since.
    pub fn frame<'a>(
        &self,
        display: &'a StatusDisplay,
    ) -> Option<&'a Canvas> {
        display.widget(self.widget).filter(|w| w.surface() == self.surface).map(|w| w.frame())
    }

    #[inline]
    pub const fn surface(&self) -> SurfaceId { self.surface }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::prelude::*;

    use super::*;
    use crate::config::DisplayConfig;
    use crate::testing::FakeKeyboard;

    #[test]
    fn test_screen_presents_widget_frame() {
        let keyboard = FakeKeyboard::new();
        let mut display = StatusDisplay::new(DisplayConfig::DEFAULT);
        let screen = build_screen(&mut display, SurfaceId(7), &keyboard).unwrap();

        assert_eq!(screen.surface(), SurfaceId(7));
        let frame = screen.frame(&display).unwrap();
        assert_eq!(frame.size(), display.config().frame_size());
        assert!(
            frame.pixels().any(|Pixel(_, c)| c != display.registry().styles().palette.background),
            "First frame must already show the status"
        );
    }

    #[test]
    fn test_screen_gone_after_teardown() {
        let keyboard = FakeKeyboard::new();
        let mut display = StatusDisplay::new(DisplayConfig::DEFAULT);
        let screen = build_screen(&mut display, SurfaceId(0), &keyboard).unwrap();
        display.teardown();
        assert!(screen.frame(&display).is_none());
    }

    #[test]
    fn test_second_screen_same_surface_fails() {
        let keyboard = FakeKeyboard::new();
        let mut display = StatusDisplay::new(DisplayConfig::DEFAULT);
        build_screen(&mut display, SurfaceId(0), &keyboard).unwrap();
        let again = build_screen(&mut display, SurfaceId(0), &keyboard);
        assert_eq!(again, Err(RegistryError::DuplicateSurface));
    }
}
