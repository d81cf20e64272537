use clap::Parser;
use clinic_queue_core::estimate::DEFAULT_CONSULTATION_MINUTES;
use clinic_queue_core::QueueConfig;

use crate::render::OutputFormat;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Minutes assumed per consultation when estimating remaining wait.
    #[arg(short, long, default_value_t = DEFAULT_CONSULTATION_MINUTES)]
    pub consultation_minutes: u32,

    /// Print one JSON object per response instead of text.
    #[arg(long)]
    pub json: bool,
}

impl Args {
    pub fn config(&self) -> QueueConfig {
        QueueConfig {
            consultation_minutes: self.consultation_minutes,
        }
    }

    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}
