use clap::Parser;
use std::path::PathBuf;

// Build version with target info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"),
    "\n",
    "Target: ",
    std::env::consts::ARCH,
    "-",
    std::env::consts::OS
);

/// Scroll-driven image sequence player
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Folder containing the numbered frames (ezgif-frame-001.webp ...)
    #[arg(value_name = "FRAMES_DIR")]
    pub frames_dir: Option<PathBuf>,

    /// Number of frames in the sequence
    #[arg(short = 'n', long = "frames", value_name = "N", default_value = "90")]
    pub frame_count: usize,

    /// Frame image extension (webp, png, jpg)
    #[arg(short = 'e', long = "ext", value_name = "EXT", default_value = "webp")]
    pub ext: String,

    /// Load a custom archive (JSON array of thought categories)
    #[arg(short = 'A', long = "archive", value_name = "FILE")]
    pub archive: Option<PathBuf>,

    /// Scroll span height as a multiple of the viewport height
    #[arg(long = "span", value_name = "MULT", default_value = "3.0")]
    pub span_multiplier: f32,

    /// Maximum concurrent frame decodes (0 = auto from CPU count)
    #[arg(long = "max-concurrent", value_name = "N", default_value = "0")]
    pub max_concurrent: usize,

    /// Extra load attempts per frame after a failure
    #[arg(long = "retries", value_name = "N", default_value = "1")]
    pub retry_count: u32,

    /// Start in fullscreen mode
    #[arg(short = 'F', long = "fullscreen")]
    pub fullscreen: bool,

    /// Enable debug logging to file (default: bloomscroll.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}
