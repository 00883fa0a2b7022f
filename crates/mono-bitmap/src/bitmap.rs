//! In-memory 1bpp bitmap.

use alloc::vec;
use alloc::vec::Vec;

use crate::row_bytes;

/// 1bpp bitmap of arbitrary size.
///
/// A set bit is ink (black), a cleared bit is paper (white).
/// Bit mapping within one row byte: bit 7 is the first pixel in that byte.
/// Rows are padded to a whole byte; padding bits stay cleared.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    line_bytes: usize,
    bytes: Vec<u8>,
}

impl Bitmap {
    /// Creates a new white bitmap.
    pub fn new(width: usize, height: usize) -> Self {
        let line_bytes = row_bytes(width);
        Self {
            width,
            height,
            line_bytes,
            bytes: vec![0u8; line_bytes * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the underlying row-major bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Sets a pixel state.
    ///
    /// Returns `true` when pixel is in bounds, `false` otherwise.
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }

        let byte_index = y * self.line_bytes + (x / 8);
        let bit_mask = 1u8 << (7 - (x % 8));

        if on {
            self.bytes[byte_index] |= bit_mask;
        } else {
            self.bytes[byte_index] &= !bit_mask;
        }

        true
    }

    /// Sets a pixel addressed with signed coordinates, ignoring anything off-canvas.
    pub fn set_pixel_signed(&mut self, x: isize, y: isize, on: bool) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.set_pixel(x as usize, y as usize, on)
    }

    /// Reads a pixel state.
    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let byte_index = y * self.line_bytes + (x / 8);
        let bit_mask = 1u8 << (7 - (x % 8));
        Some((self.bytes[byte_index] & bit_mask) != 0)
    }

    /// Number of ink pixels.
    pub fn ink_count(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_bit_mapping_is_msb_first_within_byte() {
        let mut bitmap = Bitmap::new(16, 2);

        assert!(bitmap.set_pixel(0, 0, true));
        assert!(bitmap.set_pixel(7, 0, true));
        assert!(bitmap.set_pixel(8, 0, true));

        assert_eq!(bitmap.bytes(), &[0b1000_0001, 0b1000_0000, 0, 0]);
    }

    #[test]
    fn out_of_bounds_pixel_is_ignored() {
        let mut bitmap = Bitmap::new(10, 3);

        assert!(!bitmap.set_pixel(10, 0, true));
        assert!(!bitmap.set_pixel(0, 3, true));
        assert!(!bitmap.set_pixel_signed(-1, 0, true));
        assert!(!bitmap.set_pixel_signed(0, -4, true));
        assert_eq!(bitmap.ink_count(), 0);
    }

    #[test]
    fn set_and_read_last_pixel() {
        let mut bitmap = Bitmap::new(13, 5);

        assert!(bitmap.set_pixel(12, 4, true));
        assert_eq!(bitmap.pixel(12, 4), Some(true));
        assert_eq!(bitmap.pixel(13, 4), None);
        assert_eq!(&bitmap.bytes()[8..], &[0x00, 0b0000_1000]);
    }

    #[test]
    fn clearing_a_pixel_keeps_its_neighbours() {
        let mut bitmap = Bitmap::new(8, 1);
        assert!(bitmap.set_pixel(3, 0, true));
        assert!(bitmap.set_pixel(4, 0, true));

        assert!(bitmap.set_pixel(3, 0, false));
        assert_eq!(bitmap.bytes(), &[0b0000_1000]);
        assert_eq!(bitmap.ink_count(), 1);
    }

    #[test]
    fn odd_width_rows_are_padded() {
        let mut bitmap = Bitmap::new(9, 4);
        for y in 0..4 {
            for x in 0..9 {
                assert!(bitmap.set_pixel(x, y, true));
            }
        }

        assert_eq!(bitmap.bytes().len(), 8);
        assert_eq!(&bitmap.bytes()[..2], &[0xFF, 0x80]);
        assert_eq!(bitmap.ink_count(), 36);
    }

    #[test]
    fn zero_sized_bitmap_is_empty() {
        let bitmap = Bitmap::new(0, 0);

        assert!(bitmap.bytes().is_empty());
        assert_eq!(bitmap.pixel(0, 0), None);
    }
}
