//! Canvas renderer: snapshot in, finished frame out.
//!
//! A redraw always repaints the whole canvas:
//!
//! 1. Reshape the canvas to the logical size and clear it to the background.
//! 2. Compose the text blocks from the snapshot ([`StatusText::compose`]).
//! 3. Draw layer label and battery line at the positions of the canvas's
//!    [`TextLayout`].
//! 4. Clear the fixed modifier region and draw the four-line block into it.
//! 5. Draw the output label.
//! 6. Rotate through the scratch canvas if a rotation is configured.
//!
//! Nothing here allocates and nothing depends on the previous frame, so two
//! renders of the same snapshot produce the same bytes.
//!
//! # Layouts
//!
//! ```text
//!  Stacked (portrait)        Split (landscape)
//! ┌──────────┐             ┌─────────────┬──────────────┐
//! │   Nav    │             │         Nav │  85 %  42 %  │
//! │ 85 % 42 %│             │ SHIFT       │              │
//! │  SHIFT   │             │ CTRL        │              │
//! │  CTRL    │             │             │              │
//! │          │             │             │          USB │
//! │   USB    │             └─────────────┴──────────────┘
//! └──────────┘
//! ```

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Text, TextStyle};

use crate::canvas::Canvas;
use crate::config::{DisplayConfig, GAP, MARGIN, TextLayout};
use crate::layer::LayerLabel;
use crate::modifiers::{Modifier, ModifierBlock, compose_modifier_block};
use crate::output::OutputLabel;
use crate::snapshot::{BatteryLine, StatusSnapshot};
use crate::styles::{StatusStyles, TOP_CENTER, TOP_LEFT, TOP_RIGHT};

// =============================================================================
// Text Composition
// =============================================================================

/// Every text block drawn for one snapshot.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StatusText {
    pub battery_line: BatteryLine,
    pub layer_label: LayerLabel,
    pub modifier_block: ModifierBlock,
    pub output_label: OutputLabel,
}

impl StatusText {
    pub fn compose(snapshot: &StatusSnapshot) -> Self {
        let mut layer_label = LayerLabel::new();
        let _ = layer_label.push_str(snapshot.top_layer());
        Self {
            battery_line: snapshot.battery_line(),
            layer_label,
            modifier_block: compose_modifier_block(snapshot.modifiers()),
            output_label: snapshot.output().label(),
        }
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Anchor points of every text block for one configuration.
///
/// Positions are in logical canvas coordinates, before rotation. All anchors
/// use a top baseline.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Layout {
    pub layer: (Point, TextStyle),
    pub battery: (Point, TextStyle),
    pub output: (Point, TextStyle),
    /// Fixed region holding the modifier block.
    pub modifiers: Rectangle,
}

impl Layout {
    /// Anchors for a canvas of `size`, in the layout its orientation selects.
    pub fn new(
        size: Size,
        styles: &StatusStyles,
    ) -> Self {
        let width = size.width as i32;
        let height = size.height as i32;
        let small = styles.small_line_height() as i32;
        let layer_height = styles.layer_line_height() as i32;

        let widest = Modifier::DISPLAY_ORDER
            .iter()
            .map(|m| m.label().len() as u32)
            .max()
            .unwrap_or(0);
        let block_size = Size::new(
            styles.small_text_width(widest),
            styles.small_line_height() * Modifier::DISPLAY_ORDER.len() as u32,
        );
        let block_height = block_size.height as i32;

        match TextLayout::for_canvas(size) {
            TextLayout::Stacked => {
                let center_x = width / 2;
                let stack = layer_height + GAP + small + GAP + block_height + GAP + small;
                let top = ((height - stack) / 2).max(0);

                let battery_y = top + layer_height + GAP;
                let block_y = battery_y + small + GAP;
                let output_y = block_y + block_height + GAP;
                let block_x = center_x - block_size.width as i32 / 2;

                Self {
                    layer: (Point::new(center_x, top), TOP_CENTER),
                    battery: (Point::new(center_x, battery_y), TOP_CENTER),
                    output: (Point::new(center_x, output_y), TOP_CENTER),
                    modifiers: Rectangle::new(Point::new(block_x, block_y), block_size),
                }
            }
            TextLayout::Split => {
                let split_x = width / 2;
                Self {
                    layer: (Point::new(split_x - GAP, MARGIN), TOP_RIGHT),
                    battery: (Point::new(split_x + GAP, MARGIN), TOP_LEFT),
                    output: (Point::new(width - MARGIN, height - MARGIN - small), TOP_RIGHT),
                    modifiers: Rectangle::new(
                        Point::new(MARGIN, MARGIN + layer_height + GAP),
                        block_size,
                    ),
                }
            }
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Redraw `canvas` from `snapshot`. `scratch` is only used for rotation.
pub fn render(
    canvas: &mut Canvas,
    scratch: &mut Canvas,
    snapshot: &StatusSnapshot,
    styles: &StatusStyles,
    config: &DisplayConfig,
) {
    let palette = styles.palette;
    canvas.reset(config.canvas_size(), palette.background);

    let text = StatusText::compose(snapshot);
    let layout = Layout::new(config.canvas_size(), styles);

    let (position, alignment) = layout.layer;
    Text::with_text_style(&text.layer_label, position, styles.layer, alignment)
        .draw(canvas)
        .ok();

    let (position, alignment) = layout.battery;
    Text::with_text_style(&text.battery_line, position, styles.small, alignment)
        .draw(canvas)
        .ok();

    layout
        .modifiers
        .into_styled(PrimitiveStyle::with_fill(palette.background))
        .draw(canvas)
        .ok();
    Text::with_text_style(&text.modifier_block, layout.modifiers.top_left, styles.small, TOP_LEFT)
        .draw(canvas)
        .ok();

    let (position, alignment) = layout.output;
    Text::with_text_style(&text.output_label, position, styles.small, alignment)
        .draw(canvas)
        .ok();

    canvas.rotate(config.rotation, scratch);
}
