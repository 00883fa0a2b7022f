//! Glyph rasterization into 1bpp canvases.

use fontdue::{Font, FontSettings};
use mono_bitmap::Bitmap;
use thiserror::Error;

/// Coverage at or above this value becomes ink.
pub const INK_THRESHOLD: u8 = 128;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("font could not be parsed: {0}")]
    FontParse(&'static str),
    #[error("pixel size must be greater than zero")]
    ZeroPixelSize,
}

/// Coverage map of one glyph, positioned relative to the drawing origin.
///
/// The origin is the top-left corner of the line box: `y = 0` is the
/// ascender line, `x = 0` is the pen position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RasterGlyph {
    pub left: i32,
    pub top: i32,
    pub width: usize,
    pub height: usize,
    /// Row-major, one byte of coverage (0..=255) per pixel.
    pub coverage: Vec<u8>,
}

impl RasterGlyph {
    pub fn empty() -> Self {
        Self {
            left: 0,
            top: 0,
            width: 0,
            height: 0,
            coverage: Vec::new(),
        }
    }

    /// Right edge of the bounding box, measured from the origin.
    pub fn right(&self) -> i32 {
        self.left + self.width as i32
    }

    /// Bottom edge of the bounding box, measured from the origin.
    pub fn bottom(&self) -> i32 {
        self.top + self.height as i32
    }
}

/// Source of glyph coverage maps.
pub trait GlyphRasterizer {
    /// Whether the font maps `character` to a real glyph rather than a fallback.
    fn covers(&self, character: char) -> bool;

    fn rasterize(&self, character: char) -> RasterGlyph;
}

/// TrueType/OpenType rasterizer at a fixed pixel size.
pub struct FontRasterizer {
    font: Font,
    px: f32,
}

impl FontRasterizer {
    pub fn from_bytes(data: &[u8], pixel_size: u32) -> Result<Self, RasterError> {
        if pixel_size == 0 {
            return Err(RasterError::ZeroPixelSize);
        }

        let settings = FontSettings {
            scale: pixel_size as f32,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(data, settings).map_err(RasterError::FontParse)?;

        Ok(Self {
            font,
            px: pixel_size as f32,
        })
    }

    pub fn font_name(&self) -> Option<&str> {
        self.font.name()
    }

    fn ascent(&self) -> Option<i32> {
        self.font
            .horizontal_line_metrics(self.px)
            .map(|line| line.ascent.round() as i32)
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn covers(&self, character: char) -> bool {
        self.font.lookup_glyph_index(character) != 0
    }

    fn rasterize(&self, character: char) -> RasterGlyph {
        let (metrics, coverage) = self.font.rasterize(character, self.px);
        let glyph_top = metrics.ymin + metrics.height as i32;
        // Without line metrics the glyph is pinned to the top of the canvas.
        let ascent = self.ascent().unwrap_or(glyph_top);

        RasterGlyph {
            left: metrics.xmin,
            top: ascent - glyph_top,
            width: metrics.width,
            height: metrics.height,
            coverage,
        }
    }
}

/// Canvas dimensions for a glyph: its bounding box, floored at `min_size` on both axes.
pub fn canvas_size(glyph: &RasterGlyph, min_size: u32) -> (usize, usize) {
    let min_size = min_size as usize;
    let width = glyph.right().max(0) as usize;
    let height = glyph.bottom().max(0) as usize;

    (width.max(min_size), height.max(min_size))
}

/// Draws `glyph` in ink onto `canvas` at the origin. Off-canvas pixels are dropped.
pub fn draw_glyph(canvas: &mut Bitmap, glyph: &RasterGlyph) {
    if glyph.width == 0 {
        return;
    }

    for (row, coverage) in glyph.coverage.chunks_exact(glyph.width).enumerate() {
        let y = glyph.top as isize + row as isize;
        for (col, &value) in coverage.iter().enumerate() {
            if value >= INK_THRESHOLD {
                let x = glyph.left as isize + col as isize;
                let _ = canvas.set_pixel_signed(x, y, true);
            }
        }
    }
}

/// Rasterizes `character` onto a fresh white canvas sized by [`canvas_size`].
pub fn render_glyph<R: GlyphRasterizer + ?Sized>(
    rasterizer: &R,
    character: char,
    min_size: u32,
) -> Bitmap {
    let glyph = rasterizer.rasterize(character);
    let (width, height) = canvas_size(&glyph, min_size);

    let mut canvas = Bitmap::new(width, height);
    draw_glyph(&mut canvas, &glyph);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEJAVU_SANS_BOLD: &[u8] = include_bytes!("../tests/fixtures/DejaVuSans-Bold.ttf");

    fn dejavu(pixel_size: u32) -> FontRasterizer {
        FontRasterizer::from_bytes(DEJAVU_SANS_BOLD, pixel_size).unwrap()
    }

    fn solid(left: i32, top: i32, width: usize, height: usize) -> RasterGlyph {
        RasterGlyph {
            left,
            top,
            width,
            height,
            coverage: vec![255; width * height],
        }
    }

    struct Fixed(RasterGlyph);

    impl GlyphRasterizer for Fixed {
        fn covers(&self, _: char) -> bool {
            true
        }

        fn rasterize(&self, _: char) -> RasterGlyph {
            self.0.clone()
        }
    }

    #[test]
    fn small_glyph_is_floored_to_min_size() {
        assert_eq!(canvas_size(&solid(2, 3, 10, 12), 64), (64, 64));
        assert_eq!(canvas_size(&RasterGlyph::empty(), 64), (64, 64));
    }

    #[test]
    fn large_glyph_keeps_its_extent() {
        assert_eq!(canvas_size(&solid(4, 6, 70, 62), 64), (74, 68));
        assert_eq!(canvas_size(&solid(0, 0, 70, 10), 16), (70, 16));
    }

    #[test]
    fn negative_offsets_do_not_underflow() {
        assert_eq!(canvas_size(&solid(-8, -8, 4, 4), 0), (0, 0));
    }

    #[test]
    fn coverage_is_thresholded() {
        let glyph = RasterGlyph {
            left: 1,
            top: 1,
            width: 3,
            height: 1,
            coverage: vec![INK_THRESHOLD - 1, INK_THRESHOLD, 255],
        };
        let mut canvas = Bitmap::new(8, 4);
        draw_glyph(&mut canvas, &glyph);

        assert_eq!(canvas.pixel(1, 1), Some(false));
        assert_eq!(canvas.pixel(2, 1), Some(true));
        assert_eq!(canvas.pixel(3, 1), Some(true));
        assert_eq!(canvas.ink_count(), 2);
    }

    #[test]
    fn off_canvas_pixels_are_clipped() {
        let mut canvas = Bitmap::new(4, 4);
        draw_glyph(&mut canvas, &solid(-2, -2, 4, 4));

        assert_eq!(canvas.ink_count(), 4);
        assert_eq!(canvas.pixel(0, 0), Some(true));
        assert_eq!(canvas.pixel(2, 2), Some(false));
    }

    #[test]
    fn render_places_glyph_at_origin() {
        let rasterizer = Fixed(solid(3, 5, 2, 2));
        let canvas = render_glyph(&rasterizer, '강', 8);

        assert_eq!((canvas.width(), canvas.height()), (8, 8));
        assert_eq!(canvas.ink_count(), 4);
        assert_eq!(canvas.pixel(3, 5), Some(true));
        assert_eq!(canvas.pixel(4, 6), Some(true));
        assert_eq!(canvas.pixel(2, 5), Some(false));
    }

    #[test]
    fn rejects_garbage_font() {
        assert!(matches!(
            FontRasterizer::from_bytes(b"definitely not a font", 64),
            Err(RasterError::FontParse(_))
        ));
        assert!(matches!(
            FontRasterizer::from_bytes(&[], 0),
            Err(RasterError::ZeroPixelSize)
        ));
    }

    #[test]
    fn font_reports_missing_code_points() {
        let font = dejavu(64);

        assert!(font.covers('A'));
        assert!(font.covers('g'));
        assert!(!font.covers('강'));
        assert!(font.font_name().is_some());
    }

    #[test]
    fn capital_rests_on_the_baseline() {
        let font = dejavu(64);
        let glyph = font.rasterize('A');

        assert!(glyph.top > 0);
        assert_eq!(Some(glyph.bottom()), font.ascent());

        let canvas = render_glyph(&font, 'A', 64);
        assert_eq!((canvas.width(), canvas.height()), (64, 64));
        let inked = glyph
            .coverage
            .iter()
            .filter(|&&value| value >= INK_THRESHOLD)
            .count();
        assert!(inked > 0);
        assert_eq!(canvas.ink_count(), inked);
    }

    #[test]
    fn descender_grows_the_canvas() {
        let font = dejavu(64);
        let capital = font.rasterize('A');
        let glyph = font.rasterize('g');

        assert!(glyph.bottom() > capital.bottom());

        let canvas = render_glyph(&font, 'g', 64);
        assert_eq!(canvas.width(), 64);
        assert!(canvas.height() > 64);
        assert_eq!(canvas.height(), glyph.bottom() as usize);
    }
}
