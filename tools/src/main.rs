//
// font2c: Convert a scalable font into a C glyph table usable on small
// grayscale displays.
//

use anyhow::Context;
use clap::Parser;
use font2c::{build_table, emit, preview, Bpp, FontdueSource, TableConfig};
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(version, about = "Generate a C bitmap font from a TTF/OTF file", long_about = None)]
struct Args {
    /// Path to the .ttf/.otf font file
    #[arg(long, value_name = "FILE")]
    font: PathBuf,
    /// Font size in pixels
    #[arg(long)]
    size: u32,
    /// First character code
    #[arg(long, default_value_t = 32)]
    first: u32,
    /// Last character code, inclusive
    #[arg(long, default_value_t = 126)]
    last: u32,
    /// Bits per pixel (1, 2 or 4)
    #[arg(long, default_value_t = Bpp::Two)]
    bpp: Bpp,
    /// Font symbol name
    #[arg(long, default_value = "font")]
    name: String,
    /// Output filename base; writes <OUT>.c and <OUT>.h
    #[arg(long, default_value = "font")]
    out: PathBuf,
    /// Also write a PNG contact sheet of the quantized glyphs
    #[arg(long, value_name = "PNG")]
    preview: Option<PathBuf>,
    /// Log each glyph as it is packed
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = TableConfig::new(args.first, args.last, args.bpp)?;
    emit::check_symbol_name(&args.name)?;

    let source = FontdueSource::load(&args.font, args.size)?;
    let table = build_table(&source, &config)
        .with_context(|| format!("building table from {}", args.font.display()))?;

    let paths = emit::write_files(&table, &args.name, &args.out)?;
    if let Some(path) = &args.preview {
        preview::write_preview(&table, path)?;
    }

    info!(
        source = %paths.source.display(),
        header = %paths.header.display(),
        "font generation complete"
    );
    Ok(())
}
