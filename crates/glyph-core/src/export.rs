//! Glyph export pipeline: rasterize, convert, write.

use std::{fs, io, path::PathBuf};

use log::{debug, error, info, warn};
use thiserror::Error;

use crate::{
    config::ExportConfig,
    convert::{BitmapConverter, ConvertError, ConvertJob, declaration},
    glyph_map::{GlyphEntry, GlyphMap},
    index, preview,
    raster::{self, GlyphRasterizer},
};


#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("converter `{converter}` produced a mutable declaration for {identifier}")]
    MutableDeclaration {
        converter: String,
        identifier: String,
    },
}

/// A glyph that made it to disk.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExportedGlyph {
    pub character: char,
    pub identifier: String,
    pub path: PathBuf,
    pub width: usize,
    pub height: usize,
}

#[derive(Debug)]
pub struct GlyphFailure {
    pub entry: GlyphEntry,
    pub error: ExportError,
}

/// Outcome of one batch.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub exported: Vec<ExportedGlyph>,
    pub failed: Vec<GlyphFailure>,
}

impl ExportReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.exported.len() + self.failed.len()
    }
}

/// Turns every entry of a [`GlyphMap`] into `<out_dir>/<id>.xbm`.
///
/// Glyphs are processed strictly one after another; nothing carries over
/// between them.
pub struct GlyphExporter<R, C> {
    rasterizer: R,
    converter: C,
    config: ExportConfig,
}

impl<R, C> GlyphExporter<R, C>
where
    R: GlyphRasterizer,
    C: BitmapConverter,
{
    pub fn new(rasterizer: R, converter: C, config: ExportConfig) -> Self {
        Self {
            rasterizer,
            converter,
            config,
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Rasterizes one glyph and writes its bitmap source.
    ///
    /// `<id>.xbm` is only written once the converted text declares
    /// `const uint8_t`; a failed glyph leaves it untouched. Transient files are
    /// gone when this returns, on success and on error.
    pub fn export_glyph(&self, entry: &GlyphEntry) -> Result<ExportedGlyph, ExportError> {
        let character = entry.character;
        let identifier = entry.identifier.as_str();

        if !self.rasterizer.covers(character) {
            warn!("font has no glyph for {character:?}; rendering fallback id={identifier}");
        }

        let bitmap = raster::render_glyph(&self.rasterizer, character, self.config.min_size);
        debug!(
            "rendered glyph={} id={} width={} height={} ink={}",
            character,
            identifier,
            bitmap.width(),
            bitmap.height(),
            bitmap.ink_count()
        );
        if self.config.preview {
            debug!(
                "preview glyph={}\n{}",
                character,
                preview::ascii_art(&bitmap)
            );
        }

        let raster_path = self.config.raster_path(identifier);
        let scratch_path = self.config.scratch_path(identifier);
        let job = ConvertJob {
            identifier,
            bitmap: &bitmap,
            raster_path: &raster_path,
            scratch_path: &scratch_path,
        };

        let text = self.converter.convert(&job)?;
        if !declaration::declares_immutable(&text) {
            return Err(ExportError::MutableDeclaration {
                converter: self.converter.name().to_owned(),
                identifier: identifier.to_owned(),
            });
        }

        let source_path = self.config.source_path(identifier);
        fs::write(&source_path, text).map_err(|source| ExportError::Write {
            path: source_path.clone(),
            source,
        })?;

        info!(
            "exported glyph={} id={} width={} height={} path={}",
            character,
            identifier,
            bitmap.width(),
            bitmap.height(),
            source_path.display()
        );

        Ok(ExportedGlyph {
            character,
            identifier: identifier.to_owned(),
            path: source_path,
            width: bitmap.width(),
            height: bitmap.height(),
        })
    }

    /// Exports every glyph in map order.
    ///
    /// The converter is probed once up front and a failed probe aborts the
    /// batch before anything is written. After that, a failing glyph is
    /// logged, recorded in the report and skipped. An empty map does no work
    /// at all, not even the probe.
    pub fn export_all(&self, map: &GlyphMap) -> Result<ExportReport, ExportError> {
        let mut report = ExportReport::default();
        if map.is_empty() {
            info!("glyph map is empty; nothing to export");
            return Ok(report);
        }

        self.converter.probe()?;
        info!(
            "exporting {} glyphs converter={} out_dir={}",
            map.len(),
            self.converter.name(),
            self.config.out_dir.display()
        );

        for entry in map {
            match self.export_glyph(entry) {
                Ok(exported) => report.exported.push(exported),
                Err(err) => {
                    error!(
                        "glyph export failed glyph={} id={}: {}",
                        entry.character,
                        entry.identifier,
                        error_chain(&err)
                    );
                    report.failed.push(GlyphFailure {
                        entry: entry.clone(),
                        error: err,
                    });
                }
            }
        }

        info!(
            "export finished exported={} failed={}",
            report.exported.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Writes the configured index header for the glyphs in `report`.
    ///
    /// Returns the header path, or `None` when no header is configured or
    /// nothing was exported.
    pub fn write_index_header(
        &self,
        report: &ExportReport,
    ) -> Result<Option<PathBuf>, ExportError> {
        let Some(name) = self.config.index_header.as_deref() else {
            return Ok(None);
        };
        if report.exported.is_empty() {
            debug!("no exported glyphs; skipping index header {name}");
            return Ok(None);
        }

        let path = self.config.out_dir.join(name);
        fs::write(&path, index::index_header(&report.exported)).map_err(|source| {
            ExportError::Write {
                path: path.clone(),
                source,
            }
        })?;

        info!(
            "wrote index header path={} glyphs={}",
            path.display(),
            report.exported.len()
        );
        Ok(Some(path))
    }
}

/// `outer: inner: innermost`, for one-line log messages.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
