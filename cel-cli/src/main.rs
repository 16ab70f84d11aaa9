//! celinfo
//!
//! Command-line interface for inspecting FLI/FLC/CEL animation files.

use anyhow::{Context, Result};
use cel_core::{inspect_path, FileHeader, FormatTag, FrameSelection, FrameSummary, Inspection};
use clap::Parser;
use log::{debug, LevelFilter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "celinfo")]
#[command(about = "Read FLI/FLC/CEL animation headers and frame chunk tables")]
#[command(version)]
struct Cli {
    /// Path to the CEL/FLC file
    #[arg(short = 'f', long = "file", value_name = "FILE", required_unless_present = "path")]
    file: Option<PathBuf>,

    /// Path to the CEL/FLC file, given positionally
    #[arg(value_name = "PATH", conflicts_with = "file")]
    path: Option<PathBuf>,

    /// Also walk the chunk table of the second frame
    #[arg(long)]
    second_frame: bool,

    /// Only decode the file header
    #[arg(long, conflicts_with = "second_frame")]
    header_only: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let input = cli
        .file
        .or(cli.path)
        .context("Specify the CEL file to read")?;

    let selection = if cli.header_only {
        FrameSelection::HeaderOnly
    } else if cli.second_frame {
        FrameSelection::FirstAndSecond
    } else {
        FrameSelection::First
    };

    debug!("Reading {}", input.display());
    let inspection = inspect_path(&input, selection)
        .with_context(|| format!("Could not read CEL file {}", input.display()))?;

    if cli.json {
        let json = inspection
            .to_json()
            .context("Failed to serialize inspection")?;
        println!("{}", json);
    } else {
        print_inspection(&inspection);
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn print_inspection(inspection: &Inspection) {
    print_header(&inspection.header);
    for frame in &inspection.frames {
        print_frame(frame);
    }
}

fn print_header(header: &FileHeader) {
    println!("File size: {}", header.declared_size);
    match header.format {
        FormatTag::Fli => println!("FLI file detected."),
        FormatTag::Flc => println!("FLC/CEL file detected."),
    }
    println!("Frames: {}", header.frame_count);
    println!("WxH@bpp: {}x{}@{}", header.width, header.height, header.depth);
    println!("Flags: {:04x}", header.flags);
    match header.format {
        FormatTag::Fli => println!(
            "Delay: {} (1/70s, {} ms)",
            header.speed,
            header.frame_delay().as_millis()
        ),
        FormatTag::Flc => println!("Delay: {}ms", header.speed),
    }

    match header.frame_offsets {
        Some(offsets) => {
            println!("Offset to first frame: {}", offsets.first);
            println!("Offset to second frame: {}", offsets.second);
        }
        None => println!("FLI frame decoding not implemented."),
    }
}

fn print_frame(frame: &FrameSummary) {
    println!("\n=== Frame at {} ===", frame.record.offset);
    println!("Frame chunk size: {}", frame.record.size);
    println!("Found {} chunks.", frame.record.chunk_count);
    for chunk in &frame.chunks {
        match chunk.kind.name() {
            Some(name) => println!("Found {} chunk of size {}", name, chunk.size),
            None => debug!(
                "Skipped chunk type {} of size {} at {}",
                chunk.kind.code(),
                chunk.size,
                chunk.offset
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_flag() {
        let cli = Cli::try_parse_from(["celinfo", "-f", "anim.cel"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("anim.cel")));
        assert!(!cli.second_frame);
    }

    #[test]
    fn test_header_only_conflicts_with_second_frame() {
        let err = Cli::try_parse_from(["celinfo", "-f", "a.cel", "--header-only", "--second-frame"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_positional_path() {
        let cli = Cli::try_parse_from(["celinfo", "anim.flc", "--second-frame", "-vv"]).unwrap();
        assert_eq!(cli.path, Some(PathBuf::from("anim.flc")));
        assert!(cli.second_frame);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_missing_file_is_usage_error() {
        let err = Cli::try_parse_from(["celinfo"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
