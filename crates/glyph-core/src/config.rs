//! Export configuration.

use std::path::{Path, PathBuf};

pub const DEFAULT_FONT_PATH: &str = "include/NanumGothicCoding-Bold.ttf";
pub const DEFAULT_OUT_DIR: &str = "include";
pub const DEFAULT_PIXEL_SIZE: u32 = 64;
pub const DEFAULT_CONVERTER_PROGRAM: &str = "convert";
/// Upper bound accepted for the pixel size and the canvas floor.
pub const MAX_CANVAS_SIZE: u32 = 4096;

/// Extension of the final bitmap-source artifact.
pub const SOURCE_EXTENSION: &str = "xbm";
/// Extension of the transient raster handed to an external converter.
pub const RASTER_EXTENSION: &str = "png";
/// Extension of the transient output an external converter writes.
pub const SCRATCH_EXTENSION: &str = "xbm.tmp";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExportConfig {
    /// Receives the final `.xbm` files and any transient rasters.
    pub out_dir: PathBuf,
    /// Font size in pixels.
    pub pixel_size: u32,
    /// Lower bound for both canvas dimensions.
    pub min_size: u32,
    /// File name of the optional `#include` index written next to the glyphs.
    pub index_header: Option<String>,
    /// Log an ASCII rendering of every glyph.
    pub preview: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new(DEFAULT_OUT_DIR, DEFAULT_PIXEL_SIZE)
    }
}

impl ExportConfig {
    /// Canvas floor defaults to the pixel size, so every glyph gets at least a square canvas.
    pub fn new(out_dir: impl Into<PathBuf>, pixel_size: u32) -> Self {
        Self {
            out_dir: out_dir.into(),
            pixel_size,
            min_size: pixel_size,
            index_header: None,
            preview: false,
        }
    }

    pub fn with_min_size(mut self, min_size: u32) -> Self {
        self.min_size = min_size;
        self
    }

    pub fn with_index_header(mut self, index_header: Option<String>) -> Self {
        self.index_header = index_header;
        self
    }

    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    pub fn source_path(&self, identifier: &str) -> PathBuf {
        artifact_path(&self.out_dir, identifier, SOURCE_EXTENSION)
    }

    pub fn raster_path(&self, identifier: &str) -> PathBuf {
        artifact_path(&self.out_dir, identifier, RASTER_EXTENSION)
    }

    pub fn scratch_path(&self, identifier: &str) -> PathBuf {
        artifact_path(&self.out_dir, identifier, SCRATCH_EXTENSION)
    }
}

fn artifact_path(dir: &Path, identifier: &str, extension: &str) -> PathBuf {
    dir.join(format!("{identifier}.{extension}"))
}
