use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use glyph_core::{
    BitmapConverter, BuiltinXbm, ExportConfig, ExternalConverter, GlyphEntry, GlyphMap,
    GlyphMapError,
    config::{
        DEFAULT_CONVERTER_PROGRAM, DEFAULT_FONT_PATH, DEFAULT_OUT_DIR, DEFAULT_PIXEL_SIZE,
        MAX_CANVAS_SIZE,
    },
};
use log::LevelFilter;

/// Renders Hangeul syllables to XBM sources for the e-paper firmware.
#[derive(Debug, Parser)]
#[command(name = "hangeul-glyphs", version)]
pub(super) struct Args {
    /// TrueType/OpenType font used for rendering.
    #[arg(long, short = 'f', default_value = DEFAULT_FONT_PATH)]
    pub(super) font: PathBuf,

    /// Directory receiving `<id>.xbm` files.
    #[arg(long, short = 'o', default_value = DEFAULT_OUT_DIR)]
    pub(super) out_dir: PathBuf,

    /// Font size in pixels.
    #[arg(
        long,
        short = 's',
        default_value_t = DEFAULT_PIXEL_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_CANVAS_SIZE)),
    )]
    pub(super) size: u32,

    /// Minimum canvas width and height [default: --size].
    #[arg(long, value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_CANVAS_SIZE)))]
    pub(super) min_size: Option<u32>,

    #[arg(long, value_enum, default_value_t = ConverterKind::Builtin)]
    pub(super) converter: ConverterKind,

    /// Program run by `--converter external` as `<program> <in.png> <out.xbm>`.
    #[arg(long, default_value = DEFAULT_CONVERTER_PROGRAM)]
    pub(super) converter_program: PathBuf,

    /// Glyph to export as `<char>=<identifier>`; replaces the built-in set. Repeatable.
    #[arg(long = "glyph", short = 'g', value_name = "CHAR=ID")]
    pub(super) glyphs: Vec<String>,

    /// Also write an `#include` index with this file name into the output directory.
    #[arg(long, value_name = "FILE")]
    pub(super) index_header: Option<String>,

    /// Log every rendered glyph as ASCII art (shown with -v).
    #[arg(long)]
    pub(super) preview: bool,

    /// More output; repeat for trace logging.
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub(super) verbose: u8,

    /// Only report errors.
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub(super) quiet: bool,
}

/// How raster glyphs become XBM text.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(super) enum ConverterKind {
    /// Encode in-process.
    Builtin,
    /// Shell out to ImageMagick-compatible `convert`.
    External,
}

impl Args {
    pub(super) fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }

        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub(super) fn glyph_map(&self) -> Result<GlyphMap, GlyphMapError> {
        if self.glyphs.is_empty() {
            return Ok(GlyphMap::builtin());
        }

        let entries = self
            .glyphs
            .iter()
            .map(|definition| GlyphEntry::parse(definition))
            .collect::<Result<Vec<_>, _>>()?;
        GlyphMap::new(entries)
    }

    pub(super) fn export_config(&self) -> ExportConfig {
        ExportConfig::new(&self.out_dir, self.size)
            .with_min_size(self.min_size.unwrap_or(self.size))
            .with_index_header(self.index_header.clone())
            .with_preview(self.preview)
    }

    pub(super) fn converter(&self) -> Box<dyn BitmapConverter> {
        match self.converter {
            ConverterKind::Builtin => Box::new(BuiltinXbm::new()),
            ConverterKind::External => Box::new(ExternalConverter::new(&self.converter_program)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_match_original_constants() {
        let args = Args::try_parse_from(["hangeul-glyphs"]).unwrap();

        assert_eq!(args.font, Path::new("include/NanumGothicCoding-Bold.ttf"));
        assert_eq!(args.converter, ConverterKind::Builtin);
        assert_eq!(args.log_level(), LevelFilter::Info);
        assert_eq!(args.glyph_map().unwrap(), GlyphMap::builtin());

        let config = args.export_config();
        assert_eq!(config, ExportConfig::default());
    }

    #[test]
    fn glyph_flags_replace_builtin_set() {
        let args = Args::try_parse_from([
            "hangeul-glyphs",
            "-g",
            "강=gang",
            "--glyph",
            "2=num2",
            "--min-size",
            "32",
            "-vv",
        ])
        .unwrap();

        let map = args.glyph_map().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get('2').unwrap().identifier, "num2");
        assert_eq!(args.export_config().min_size, 32);
        assert_eq!(args.log_level(), LevelFilter::Trace);
    }

    #[test]
    fn bad_glyph_definition_is_an_error() {
        let args = Args::try_parse_from(["hangeul-glyphs", "-g", "강-gang"]).unwrap();

        assert!(matches!(
            args.glyph_map(),
            Err(GlyphMapError::MalformedPair(_))
        ));
    }

    #[test]
    fn external_converter_is_selectable() {
        let args = Args::try_parse_from([
            "hangeul-glyphs",
            "--converter",
            "external",
            "--converter-program",
            "magick-convert",
            "-q",
        ])
        .unwrap();

        assert_eq!(args.converter().name(), "external");
        assert_eq!(args.log_level(), LevelFilter::Error);
    }

    #[test]
    fn sizes_are_bounded() {
        for argv in [
            ["hangeul-glyphs", "--size", "0"],
            ["hangeul-glyphs", "--size", "4097"],
            ["hangeul-glyphs", "--min-size", "4000000000"],
        ] {
            let err = Args::try_parse_from(argv).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        }

        let args = Args::try_parse_from(["hangeul-glyphs", "-s", "4096", "--min-size", "0"]);
        assert_eq!(args.unwrap().export_config().min_size, 0);
    }
}
