#![cfg_attr(not(test), no_std)]

//! 1bpp bitmap primitives shared by the glyph generator and its XBM packing.

extern crate alloc;

mod bitmap;
pub mod xbm;

pub use bitmap::Bitmap;

/// Number of bytes needed to hold one row of `width` pixels.
#[inline]
pub const fn row_bytes(width: usize) -> usize {
    width.div_ceil(8)
}
