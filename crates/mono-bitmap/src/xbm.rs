//! XBM pixel packing.
//!
//! XBM stores rows top to bottom, each padded to a whole byte, with the
//! leftmost pixel in the least significant bit and a set bit meaning ink.
//! [`Bitmap`] keeps the leftmost pixel in the most significant bit, so
//! converting between the two is a per-byte bit reversal.

use alloc::vec::Vec;

use crate::Bitmap;

/// Converts one bitmap byte to its XBM counterpart (and back).
#[inline]
pub const fn swap_bit_order(byte: u8) -> u8 {
    byte.reverse_bits()
}

/// Packs a bitmap into XBM byte order.
pub fn pack(bitmap: &Bitmap) -> Vec<u8> {
    bitmap.bytes().iter().copied().map(swap_bit_order).collect()
}
