//! Raster to bitmap-source conversion.
//!
//! The exporter only needs `convert(bitmap) -> text`. [`builtin::BuiltinXbm`]
//! does that in-process; [`external::ExternalConverter`] shells out to an
//! image tool and patches its declaration afterwards.

pub mod builtin;
pub mod declaration;
pub mod external;

use std::{
    io,
    path::{Path, PathBuf},
    process::ExitStatus,
};

use mono_bitmap::Bitmap;
use thiserror::Error;

pub use builtin::BuiltinXbm;
pub use external::ExternalConverter;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("converter `{program}` is not available")]
    Unavailable {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to run converter `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("converter `{program}` exited with {status}")]
    Failed { program: String, status: ExitStatus },
    #[error("failed to encode raster {}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("i/o error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("converter output {} has no `static char` declaration", .path.display())]
    MissingDeclaration { path: PathBuf },
}

impl ConvertError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// One glyph's conversion request.
#[derive(Clone, Copy, Debug)]
pub struct ConvertJob<'a> {
    /// Symbol prefix for `<id>_width`, `<id>_height` and `<id>_bits`.
    pub identifier: &'a str,
    pub bitmap: &'a Bitmap,
    /// Where a converter may park the transient raster. Must not outlive the call.
    pub raster_path: &'a Path,
    /// Scratch output for converters that write files. Must not outlive the call.
    ///
    /// Converters never touch the final `<id>.xbm`; the exporter writes it
    /// once the returned text has been checked.
    pub scratch_path: &'a Path,
}

pub trait BitmapConverter {
    /// Checks that the converter can run at all. Called once before a batch.
    fn probe(&self) -> Result<(), ConvertError>;

    /// Produces bitmap-source text with an immutable `const uint8_t` declaration.
    fn convert(&self, job: &ConvertJob<'_>) -> Result<String, ConvertError>;

    fn name(&self) -> &str;
}

impl<T: BitmapConverter + ?Sized> BitmapConverter for Box<T> {
    fn probe(&self) -> Result<(), ConvertError> {
        (**self).probe()
    }

    fn convert(&self, job: &ConvertJob<'_>) -> Result<String, ConvertError> {
        (**self).convert(job)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
