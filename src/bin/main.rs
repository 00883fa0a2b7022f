use std::{fs, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use glyph_core::{ExportReport, FontRasterizer, GlyphExporter};
use log::{error, info, warn};

use cli::Args;

#[path = "main/cli.rs"]
mod cli;
#[path = "main/logging.rs"]
mod logging;

/// Some glyphs failed but the batch ran to the end.
const EXIT_PARTIAL: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.log_level());

    match run(&args) {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(report) => {
            let failed: Vec<String> = report.failed.iter().map(|f| f.entry.to_string()).collect();
            warn!(
                "{} glyphs not exported: {}",
                failed.len(),
                failed.join(", ")
            );
            ExitCode::from(EXIT_PARTIAL)
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExportReport> {
    let map = args.glyph_map().context("invalid glyph definition")?;
    if map.is_empty() {
        info!("glyph map is empty; nothing to export");
        return Ok(ExportReport::default());
    }

    let config = args.export_config();
    fs::create_dir_all(&config.out_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.out_dir.display()
        )
    })?;

    let font_data = fs::read(&args.font)
        .with_context(|| format!("failed to read font {}", args.font.display()))?;
    let rasterizer = FontRasterizer::from_bytes(&font_data, config.pixel_size)
        .with_context(|| format!("failed to load font {}", args.font.display()))?;
    info!(
        "font loaded path={} name={} size={}px min_size={}",
        args.font.display(),
        rasterizer.font_name().unwrap_or("?"),
        config.pixel_size,
        config.min_size
    );

    let exporter = GlyphExporter::new(rasterizer, args.converter(), config);
    let report = exporter
        .export_all(&map)
        .context("converter is not usable; no glyphs were exported")?;

    if let Some(path) = exporter
        .write_index_header(&report)
        .context("failed to write index header")?
    {
        info!("index header ready path={}", path.display());
    }

    info!(
        "done exported={} failed={}",
        report.exported.len(),
        report.failed.len()
    );
    Ok(report)
}
