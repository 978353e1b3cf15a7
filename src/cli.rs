use clap::Parser;
use std::path::PathBuf;

// Build version with target info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Component lifecycle visualizer
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Strict-mode double invocation on startup (overrides saved setting)
    #[arg(short = 's', long = "strict", value_name = "0|1")]
    pub strict: Option<u8>,

    /// Mount the probe component on startup (default: 1)
    #[arg(short = 'm', long = "mounted", value_name = "0|1")]
    pub mounted: Option<u8>,

    /// Enable debug logging to file (default: lifescope.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}
