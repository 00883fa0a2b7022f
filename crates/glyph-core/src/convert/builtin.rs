//! In-process XBM writer.

use std::fmt::Write as _;

use mono_bitmap::{Bitmap, xbm};

use super::{BitmapConverter, ConvertError, ConvertJob, declaration::IMMUTABLE_STORAGE};

/// Hex values per output line.
pub const BYTES_PER_LINE: usize = 12;

/// Writes XBM text straight from the packed pixels; touches no files.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinXbm;

impl BuiltinXbm {
    pub const fn new() -> Self {
        Self
    }
}

impl BitmapConverter for BuiltinXbm {
    fn probe(&self) -> Result<(), ConvertError> {
        Ok(())
    }

    fn convert(&self, job: &ConvertJob<'_>) -> Result<String, ConvertError> {
        Ok(xbm_source(job.identifier, job.bitmap))
    }

    fn name(&self) -> &str {
        "builtin"
    }
}

/// Renders `bitmap` as an XBM fragment declaring `const uint8_t <identifier>_bits[]`.
pub fn xbm_source(identifier: &str, bitmap: &Bitmap) -> String {
    let packed = xbm::pack(bitmap);
    let lines = packed.len().div_ceil(BYTES_PER_LINE);
    // " 0xNN," per byte, plus line breaks and the header.
    let mut out = String::with_capacity(packed.len() * 6 + lines * 2 + 128);

    let _ = writeln!(out, "#define {identifier}_width {}", bitmap.width());
    let _ = writeln!(out, "#define {identifier}_height {}", bitmap.height());
    let _ = writeln!(out, "{IMMUTABLE_STORAGE} {identifier}_bits[] = {{");

    for chunk in packed.chunks(BYTES_PER_LINE) {
        out.push(' ');
        for byte in chunk {
            let _ = write!(out, " 0x{byte:02X},");
        }
        out.push('\n');
    }
    out.push_str("};\n");

    out
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::convert::declaration::declares_immutable;

    #[test]
    fn writes_header_and_rows() {
        let mut bitmap = Bitmap::new(10, 2);
        assert!(bitmap.set_pixel(0, 0, true));
        assert!(bitmap.set_pixel(9, 1, true));

        let text = xbm_source("gang", &bitmap);

        assert_eq!(
            text,
            "#define gang_width 10\n\
             #define gang_height 2\n\
             const uint8_t gang_bits[] = {\n  0x01, 0x00, 0x00, 0x02,\n};\n"
        );
    }

    #[test]
    fn wraps_every_twelve_bytes() {
        let bitmap = Bitmap::new(64, 2);
        let text = xbm_source("nam", &bitmap);
        let rows: Vec<_> = text.lines().skip(3).collect();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].matches("0x").count(), 12);
        assert_eq!(rows[1].matches("0x").count(), 4);
        assert_eq!(rows[2], "};");
    }

    #[test]
    fn never_declares_mutable_storage() {
        let bitmap = Bitmap::new(64, 64);
        let text = xbm_source("go", &bitmap);

        assert!(!text.contains("static char"));
        assert!(declares_immutable(&text));
        assert_eq!(text.matches("0x").count(), 8 * 64);
    }

    #[test]
    fn converter_ignores_paths() {
        let bitmap = Bitmap::new(8, 8);
        let job = ConvertJob {
            identifier: "mi",
            bitmap: &bitmap,
            raster_path: Path::new("/nonexistent/mi.png"),
            scratch_path: Path::new("/nonexistent/mi.xbm.tmp"),
        };

        assert!(BuiltinXbm::new().probe().is_ok());
        assert_eq!(
            BuiltinXbm::new().convert(&job).unwrap(),
            xbm_source("mi", &bitmap)
        );
    }
}
