//! One-bit-per-pixel off-screen buffer.
//!
//! [`Canvas`] owns a fixed [`CANVAS_BYTES`] array and implements
//! [`DrawTarget`], so every `embedded-graphics` primitive draws straight into
//! it. Pixels are stored row-major, most significant bit first, `1` for
//! [`BinaryColor::On`].
//!
//! The storage never changes size. Rotating by a quarter turn only swaps the
//! logical width and height, which is why a canvas and its rotated frame fit
//! the same array.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::{CANVAS_BYTES, CANVAS_PIXELS, Rotation};

/// Off-screen pixel buffer of at most [`CANVAS_PIXELS`] pixels.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    bits: [u8; CANVAS_BYTES],
}

impl Canvas {
    /// Zero-sized canvas, before a surface is attached.
    pub const fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            bits: [0; CANVAS_BYTES],
        }
    }

    /// Blank canvas of `size`. Sizes larger than the storage collapse to zero.
    pub const fn new(size: Size) -> Self {
        let mut canvas = Self::empty();
        if (size.width as usize) * (size.height as usize) <= CANVAS_PIXELS {
            canvas.width = size.width;
            canvas.height = size.height;
        }
        canvas
    }

    /// Reshape to `size` and blank every pixel to `color`.
    pub fn reset(
        &mut self,
        size: Size,
        color: BinaryColor,
    ) {
        *self = Self::new(size);
        self.fill_all(color);
    }

    /// Color at `point`, `None` outside the canvas.
    pub fn pixel(
        &self,
        point: Point,
    ) -> Option<BinaryColor> {
        let (byte, mask) = self.locate(point.x, point.y)?;
        Some(BinaryColor::from(self.bits[byte] & mask != 0))
    }

    /// Every pixel in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel<BinaryColor>> + '_ {
        let width = self.width as i32;
        let height = self.height as i32;
        (0..height).flat_map(move |y| {
            (0..width).filter_map(move |x| {
                self.pixel(Point::new(x, y)).map(|color| Pixel(Point::new(x, y), color))
            })
        })
    }

    /// Rotate the image about its center.
    ///
    /// The current image is copied into `scratch` first, then written back
    /// rotated. Quarter turns swap width and height.
    pub fn rotate(
        &mut self,
        rotation: Rotation,
        scratch: &mut Canvas,
    ) {
        if rotation == Rotation::None {
            return;
        }

        scratch.clone_from(self);
        let (w, h) = (scratch.width as i32, scratch.height as i32);
        if rotation.swaps_axes() {
            core::mem::swap(&mut self.width, &mut self.height);
        }
        self.fill_all(BinaryColor::Off);

        for y in 0..h {
            for x in 0..w {
                if scratch.pixel(Point::new(x, y)) != Some(BinaryColor::On) {
                    continue;
                }
                let (rx, ry) = match rotation {
                    Rotation::None => (x, y),
                    Rotation::Deg90 => (h - 1 - y, x),
                    Rotation::Deg180 => (w - 1 - x, h - 1 - y),
                    Rotation::Deg270 => (y, w - 1 - x),
                };
                self.set_pixel(rx, ry, BinaryColor::On);
            }
        }
    }

    /// Byte index and bit mask of `(x, y)`, `None` outside the canvas.
    #[inline]
    fn locate(
        &self,
        x: i32,
        y: i32,
    ) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        Some((idx / 8, 0x80 >> (idx % 8)))
    }

    #[inline]
    fn set_pixel(
        &mut self,
        x: i32,
        y: i32,
        color: BinaryColor,
    ) {
        if let Some((byte, mask)) = self.locate(x, y) {
            if color.is_on() {
                self.bits[byte] |= mask;
            } else {
                self.bits[byte] &= !mask;
            }
        }
    }

    /// Fill the whole storage, including bytes past the current size, so two
    /// canvases holding the same image always compare equal.
    fn fill_all(
        &mut self,
        color: BinaryColor,
    ) {
        self.bits.fill(if color.is_on() { 0xFF } else { 0x00 });
    }
}

impl Default for Canvas {
    fn default() -> Self { Self::empty() }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size { Size::new(self.width, self.height) }
}

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let drawable_area = area.intersection(&self.bounding_box());
        if drawable_area.size == Size::zero() {
            return Ok(());
        }
        for y in drawable_area.rows() {
            for x in drawable_area.columns() {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.fill_all(color);
        Ok(())
    }
}
