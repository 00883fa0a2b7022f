//! Hangeul glyph export: rasterize syllables with a TrueType font and emit
//! XBM bitmap sources for e-paper firmware.

pub mod config;
pub mod convert;
pub mod export;
pub mod glyph_map;
pub mod index;
pub mod preview;
pub mod raster;

pub use config::ExportConfig;
pub use convert::{BitmapConverter, BuiltinXbm, ConvertError, ExternalConverter};
pub use export::{ExportError, ExportReport, ExportedGlyph, GlyphExporter};
pub use glyph_map::{GlyphEntry, GlyphMap, GlyphMapError};
pub use raster::{FontRasterizer, GlyphRasterizer, RasterError};
