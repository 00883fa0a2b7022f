//! ASCII rendering of a bitmap for log inspection.

use mono_bitmap::Bitmap;

pub const INK_CHAR: char = '#';
pub const PAPER_CHAR: char = '.';

pub fn ascii_art(bitmap: &Bitmap) -> String {
    let mut out = String::with_capacity((bitmap.width() + 1) * bitmap.height());
    for y in 0..bitmap.height() {
        for x in 0..bitmap.width() {
            out.push(match bitmap.pixel(x, y) {
                Some(true) => INK_CHAR,
                _ => PAPER_CHAR,
            });
        }
        out.push('\n');
    }
    out
}
