use anyhow::{Context, Result};
use clap::Parser;

use std::path::PathBuf;

use shrink_img::{guess_image_format, shrink_image_buffer};

#[derive(Parser)]
#[command(name = "shrink-img-cli")]
#[command(about = "Shrink an image to fit within a bounding box", long_about = None)]
#[command(version)]
struct Args {
    /// Input image file
    #[arg(value_name = "SRC")]
    src: PathBuf,

    /// Maximum output size as WxH (e.g. 1280x720)
    #[arg(value_name = "MAX_SIZE")]
    max_size: String,

    /// Output image file
    #[arg(value_name = "DEST")]
    dest: PathBuf,

    /// Verbose output
    #[arg(short, long, default_value_t)]
    verbose: bool,

    /// Quiet mode (minimal output)
    #[arg(short, long, default_value_t)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.verbose, args.quiet);

    let (max_width, max_height) = parse_max_size(&args.max_size)?;

    let src_data = std::fs::read(&args.src)
        .with_context(|| format!("Failed to read `{}`", args.src.display()))?;

    let mime_type = guess_image_format(&src_data)
        .with_context(|| format!("Failed to identify `{}`", args.src.display()))?;
    println!("mime type: {mime_type}");

    let dest_data = shrink_image_buffer(&src_data, max_width, max_height)
        .with_context(|| format!("Failed to shrink `{}`", args.src.display()))?;

    std::fs::write(&args.dest, &dest_data)
        .with_context(|| format!("Failed to write `{}`", args.dest.display()))?;

    if !args.quiet {
        log::info!(
            "Done: {} ({} -> {} bytes)",
            args.dest.display(),
            src_data.len(),
            dest_data.len()
        );
    }

    Ok(())
}

/// Parse a `WxH` size argument, e.g. `1280x720`.
///
/// Dimension validity (a zero width or height) is the engine's call, not
/// ours; only the shape of the string is checked here.
fn parse_max_size(s: &str) -> Result<(u32, u32)> {
    let (width, height) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("Invalid size `{s}`: expected WxH, e.g. 1280x720"))?;

    let width = width
        .parse()
        .with_context(|| format!("Invalid width in `{s}`"))?;
    let height = height
        .parse()
        .with_context(|| format!("Invalid height in `{s}`"))?;

    Ok((width, height))
}

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}
