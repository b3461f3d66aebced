use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Dental clinic patient roster
#[derive(Parser, Debug, Clone)]
#[command(name = "patient_roster")]
#[command(about = "Terminal admin screen for the clinic's patient roster")]
pub struct Args {
    /// Base URL of the backend serving /clinicadental/pacientes
    #[arg(short, long, default_value = "http://127.0.0.1:8080")]
    pub base_url: String,

    /// Give up on a request after this many seconds (default: wait forever)
    #[arg(short, long)]
    pub timeout_secs: Option<u64>,

    /// File that receives the log output
    #[arg(long, default_value = "patient_roster.log")]
    pub log_file: PathBuf,

    /// Capacity of the roster service mailbox
    #[arg(long, default_value = "100")]
    pub mailbox_size: usize,

    /// Run against an in-memory roster with sample patients
    #[arg(long)]
    pub demo: bool,
}

impl Args {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
