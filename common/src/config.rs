//! Build-time display configuration.
//!
//! Canvas geometry, peripheral count and text ceilings are compile-time
//! constants so every buffer in the pipeline has a fixed size. Orientation,
//! rotation and color inversion come from cargo features and are resolved
//! once into [`DisplayConfig::DEFAULT`]. The text layout is not configured on
//! its own: it follows the canvas orientation ([`TextLayout::for_canvas`]).
//!
//! | Feature      | Effect                                              |
//! |--------------|-----------------------------------------------------|
//! | `landscape`  | 160x68 canvas, side-by-side [`TextLayout::Split`]   |
//! | `rotate-90`  | Rotate the finished canvas 90 degrees clockwise     |
//! | `rotate-180` | Rotate the finished canvas 180 degrees              |
//! | `rotate-270` | Rotate the finished canvas 270 degrees clockwise    |
//! | `inverted`   | Swap foreground and background colors               |

use embedded_graphics::geometry::Size;

// =============================================================================
// Keyboard Configuration
// =============================================================================

/// Number of split peripherals reporting battery levels to the dongle.
pub const PERIPHERAL_COUNT: usize = 2;

/// Maximum number of displays driven at the same time.
pub const MAX_WIDGETS: usize = 4;

// =============================================================================
// Canvas Configuration
// =============================================================================

/// Canvas width in pixels (portrait nice!view style panel).
#[cfg(not(feature = "landscape"))]
pub const CANVAS_WIDTH: u32 = 68;

/// Canvas height in pixels.
#[cfg(not(feature = "landscape"))]
pub const CANVAS_HEIGHT: u32 = 160;

/// Canvas width in pixels (landscape panel).
#[cfg(feature = "landscape")]
pub const CANVAS_WIDTH: u32 = 160;

/// Canvas height in pixels.
#[cfg(feature = "landscape")]
pub const CANVAS_HEIGHT: u32 = 68;

/// Pixel count of one canvas. Identical for both orientations.
pub const CANVAS_PIXELS: usize = (CANVAS_WIDTH * CANVAS_HEIGHT) as usize;

/// Bytes needed to store one canvas at one bit per pixel.
pub const CANVAS_BYTES: usize = CANVAS_PIXELS.div_ceil(8);

// =============================================================================
// Text Ceilings
// =============================================================================

/// Width of one battery slot: `"{:>3} % "`.
pub const BATTERY_SLOT_LEN: usize = 6;

/// Width of the joined battery line.
pub const BATTERY_LINE_LEN: usize = BATTERY_SLOT_LEN * PERIPHERAL_COUNT;

/// Longest layer label shown; longer names are truncated.
pub const MAX_LAYER_LABEL_LEN: usize = 10;

/// Capacity of the four-line modifier block (labels plus separators).
pub const MODIFIER_BLOCK_LEN: usize = 24;

/// Capacity of the output endpoint label (`"USB"`, `"BT5?"`).
pub const OUTPUT_LABEL_LEN: usize = 8;

// =============================================================================
// Layout Spacing
// =============================================================================

/// Distance between the canvas edge and the outermost text.
pub const MARGIN: i32 = 2;

/// Vertical gap between stacked text blocks, and the horizontal gap around
/// the split line in the side-by-side layout.
pub const GAP: i32 = 4;

// =============================================================================
// Runtime View of the Build Flags
// =============================================================================

/// Rotation applied to the canvas after drawing, about its center, no zoom.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    #[default]
    None,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Whether the rotated frame has width and height exchanged.
    #[inline]
    pub const fn swaps_axes(self) -> bool { matches!(self, Self::Deg90 | Self::Deg270) }

    /// Size of the presented frame for a canvas of `canvas` size.
    pub const fn frame_size(
        self,
        canvas: Size,
    ) -> Size {
        if self.swaps_axes() { Size::new(canvas.height, canvas.width) } else { canvas }
    }
}

/// How the layer label and battery line share the canvas.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextLayout {
    /// Blocks stacked top to bottom, each centered horizontally, the whole
    /// stack centered vertically.
    #[default]
    Stacked,
    /// Width split in two halves: layer right-aligned in the left half,
    /// battery left-aligned in the right half.
    Split,
}

impl TextLayout {
    /// Layout used on a canvas of `size`: side by side when wider than tall.
    pub const fn for_canvas(size: Size) -> Self { if size.width > size.height { Self::Split } else { Self::Stacked } }
}

/// Display options resolved from cargo features.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    pub rotation: Rotation,
    pub inverted: bool,
}

impl DisplayConfig {
    /// Configuration selected by the enabled cargo features.
    pub const DEFAULT: Self = Self {
        rotation: if cfg!(feature = "rotate-90") {
            Rotation::Deg90
        } else if cfg!(feature = "rotate-180") {
            Rotation::Deg180
        } else if cfg!(feature = "rotate-270") {
            Rotation::Deg270
        } else {
            Rotation::None
        },
        inverted: cfg!(feature = "inverted"),
    };

    /// Logical drawing area before rotation.
    #[inline]
    pub const fn canvas_size(&self) -> Size { Size::new(CANVAS_WIDTH, CANVAS_HEIGHT) }

    /// Text layout of the canvas, fixed by its orientation.
    #[inline]
    pub const fn layout(&self) -> TextLayout { TextLayout::for_canvas(self.canvas_size()) }

    /// Size of the frame handed to the host after rotation.
    #[inline]
    pub const fn frame_size(&self) -> Size { self.rotation.frame_size(self.canvas_size()) }
}

impl Default for DisplayConfig {
    fn default() -> Self { Self::DEFAULT }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_bytes_cover_all_pixels() {
        assert!(CANVAS_BYTES * 8 >= CANVAS_PIXELS, "Bit buffer must hold every pixel");
        assert!((CANVAS_BYTES - 1) * 8 < CANVAS_PIXELS, "Bit buffer should not waste a whole byte");
    }

    #[test]
    fn test_battery_line_fits_peripherals() {
        assert_eq!(BATTERY_LINE_LEN, 12, "Two peripherals at six chars each");
    }

    #[test]
    fn test_frame_size_swaps_for_quarter_turns() {
        let canvas = Size::new(68, 160);
        assert_eq!(Rotation::None.frame_size(canvas), canvas);
        assert_eq!(Rotation::Deg180.frame_size(canvas), canvas);
        assert_eq!(Rotation::Deg90.frame_size(canvas), Size::new(160, 68));
        assert_eq!(Rotation::Deg270.frame_size(canvas), Size::new(160, 68));
    }

    #[test]
    fn test_layout_follows_orientation() {
        assert_eq!(TextLayout::for_canvas(Size::new(68, 160)), TextLayout::Stacked);
        assert_eq!(TextLayout::for_canvas(Size::new(160, 68)), TextLayout::Split);
        assert_eq!(TextLayout::for_canvas(Size::new(64, 64)), TextLayout::Stacked, "Square stacks");

        let expected = if cfg!(feature = "landscape") { TextLayout::Split } else { TextLayout::Stacked };
        assert_eq!(DisplayConfig::DEFAULT.layout(), expected, "Canvas and layout must agree");
    }

    #[test]
    fn test_default_matches_const() {
        assert_eq!(DisplayConfig::default(), DisplayConfig::DEFAULT);
    }
}
