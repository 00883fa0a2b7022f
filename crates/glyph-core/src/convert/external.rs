//! Conversion through an external image tool (ImageMagick `convert` by default).

use std::{
    fs, io,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use image::{GrayImage, ImageFormat, Luma};
use log::{debug, warn};
use mono_bitmap::Bitmap;

use super::{BitmapConverter, ConvertError, ConvertJob, declaration};

const INK: Luma<u8> = Luma([0]);
const PAPER: Luma<u8> = Luma([255]);

/// Runs `<program> <raster.png> <out.xbm>` and rewrites the declaration it emits.
#[derive(Clone, Debug)]
pub struct ExternalConverter {
    program: PathBuf,
}

impl ExternalConverter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn program_label(&self) -> String {
        self.program.display().to_string()
    }

    fn run(&self, raster: &Path, output: &Path) -> Result<(), ConvertError> {
        debug!(
            "running converter program={} input={} output={}",
            self.program.display(),
            raster.display(),
            output.display()
        );

        let status = Command::new(&self.program)
            .arg(raster)
            .arg(output)
            .stdin(Stdio::null())
            .status()
            .map_err(|source| ConvertError::Spawn {
                program: self.program_label(),
                source,
            })?;

        if !status.success() {
            return Err(ConvertError::Failed {
                program: self.program_label(),
                status,
            });
        }

        Ok(())
    }
}

impl BitmapConverter for ExternalConverter {
    fn probe(&self) -> Result<(), ConvertError> {
        let status = Command::new(&self.program)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| ConvertError::Unavailable {
                program: self.program_label(),
                source,
            })?;

        if !status.success() {
            warn!(
                "converter probe returned {} program={}; continuing",
                status,
                self.program.display()
            );
        }

        Ok(())
    }

    fn convert(&self, job: &ConvertJob<'_>) -> Result<String, ConvertError> {
        let raster = TempFile::raster(job.raster_path, job.bitmap)?;
        // Claimed before the run so a stale or half-written output goes too.
        let output = TempFile::claim(job.scratch_path);
        self.run(raster.path(), output.path())?;
        drop(raster);

        let path = output.path();
        let text = fs::read_to_string(path).map_err(|err| ConvertError::io(path, err))?;
        let Some(patched) = declaration::retype_storage_class(&text) else {
            return Err(ConvertError::MissingDeclaration {
                path: path.to_path_buf(),
            });
        };

        Ok(patched)
    }

    fn name(&self) -> &str {
        "external"
    }
}

/// File that is removed when dropped, whatever happened in between.
#[derive(Debug)]
pub struct TempFile {
    path: PathBuf,
}

impl TempFile {
    /// Takes ownership of `path` without touching it.
    pub fn claim(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Encodes `bitmap` as an 8-bit grayscale PNG at `path`.
    pub fn raster(path: &Path, bitmap: &Bitmap) -> Result<Self, ConvertError> {
        let image = to_gray_image(bitmap);
        // Own the path before saving so a half-written file is still cleaned up.
        let raster = Self::claim(path);

        image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| ConvertError::Encode {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(raster)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path)
            && err.kind() != io::ErrorKind::NotFound
        {
            warn!(
                "failed to remove temporary file path={}: {}",
                self.path.display(),
                err
            );
        }
    }
}

/// Expands a 1bpp bitmap to black-on-white grayscale.
pub fn to_gray_image(bitmap: &Bitmap) -> GrayImage {
    GrayImage::from_fn(bitmap.width() as u32, bitmap.height() as u32, |x, y| {
        match bitmap.pixel(x as usize, y as usize) {
            Some(true) => INK,
            _ => PAPER,
        }
    })
}
