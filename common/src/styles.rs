//! Text styles shared by every status widget.
//!
//! Alignment styles are `const` and cost nothing at runtime. Character styles
//! carry a color, which depends on the display's inversion flag, so they are
//! built once per display in [`StatusStyles::new`] and reused for every redraw.
//!
//! All styles use [`Baseline::Top`] so a text position is the top-left (or
//! top-center, top-right) corner of its bounding box, which keeps the layout
//! arithmetic in [`crate::render`] free of font ascent details.
//!
//! Character styles paint their background color behind every glyph cell.
//! Blank padding in the modifier block therefore erases whatever was drawn
//! there before.

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::PROFONT_9_POINT;

use crate::colors::Palette;

// =============================================================================
// Text Alignment Styles (const - zero runtime cost)
// =============================================================================

/// Left-aligned, top baseline. Battery line in the split layout, modifier block.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

/// Centered, top baseline. Every block in the stacked layout.
pub const TOP_CENTER: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Top)
    .build();

/// Right-aligned, top baseline. Layer label in the split layout, output label.
pub const TOP_RIGHT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Right)
    .baseline(Baseline::Top)
    .build();

// =============================================================================
// Fonts
// =============================================================================

/// Layer label font (`ProFont` 9pt). The label is the most glanced-at facet.
pub const LAYER_FONT: &MonoFont<'static> = &PROFONT_9_POINT;

/// Font for the battery line, modifier block and output label.
pub const SMALL_FONT: &MonoFont<'static> = &FONT_5X8;

// =============================================================================
// Per-display Character Styles
// =============================================================================

/// Character styles for one display, built once from its palette.
#[derive(Clone, Copy, Debug)]
pub struct StatusStyles {
    pub palette: Palette,
    pub layer: MonoTextStyle<'static, BinaryColor>,
    pub small: MonoTextStyle<'static, BinaryColor>,
}

impl StatusStyles {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            layer: text_style(LAYER_FONT, palette),
            small: text_style(SMALL_FONT, palette),
        }
    }

    /// Height of one line of small text in pixels.
    #[inline]
    pub fn small_line_height(&self) -> u32 { SMALL_FONT.character_size.height }

    /// Height of the layer label in pixels.
    #[inline]
    pub fn layer_line_height(&self) -> u32 { LAYER_FONT.character_size.height }

    /// Horizontal advance of `chars` small glyphs, spacing included.
    #[inline]
    pub fn small_text_width(
        &self,
        chars: u32,
    ) -> u32 {
        if chars == 0 {
            return 0;
        }
        chars * SMALL_FONT.character_size.width + (chars - 1) * SMALL_FONT.character_spacing
    }
}

fn text_style(
    font: &'static MonoFont<'static>,
    palette: Palette,
) -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(font)
        .text_color(palette.foreground)
        .background_color(palette.background)
        .build()
}
