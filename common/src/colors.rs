//! Color pair for the monochrome status canvas.
//!
//! The panel is one bit per pixel, so the only color decision is which of the
//! two [`BinaryColor`] states paints text. The `inverted` flag of
//! [`DisplayConfig`](crate::config::DisplayConfig) swaps them:
//!
//! | `inverted` | Foreground          | Background          |
//! |------------|---------------------|---------------------|
//! | `false`    | [`BinaryColor::On`] | [`BinaryColor::Off`]|
//! | `true`     | [`BinaryColor::Off`]| [`BinaryColor::On`] |

use embedded_graphics::pixelcolor::BinaryColor;

/// Foreground and background for one display.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Palette {
    pub foreground: BinaryColor,
    pub background: BinaryColor,
}

impl Palette {
    /// Lit text on a dark background.
    pub const NORMAL: Self = Self {
        foreground: BinaryColor::On,
        background: BinaryColor::Off,
    };

    /// Dark text on a lit background.
    pub const INVERTED: Self = Self {
        foreground: BinaryColor::Off,
        background: BinaryColor::On,
    };

    #[inline]
    pub const fn new(inverted: bool) -> Self { if inverted { Self::INVERTED } else { Self::NORMAL } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_swaps_colors() {
        let normal = Palette::new(false);
        let inverted = Palette::new(true);
        assert_eq!(normal.foreground, inverted.background);
        assert_eq!(normal.background, inverted.foreground);
    }

    #[test]
    fn test_foreground_differs_from_background() {
        for palette in [Palette::NORMAL, Palette::INVERTED] {
            assert_ne!(palette.foreground, palette.background, "Text must be visible");
        }
    }
}
