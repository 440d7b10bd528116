use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use bp_tracker_data::storage::{StorageConfig, StorageError};
use bp_tracker_domain::entities::{ReadingForm, TrendWindow};

#[derive(Debug, Parser)]
#[command(
    name = "bp-tracker",
    version,
    about = "Track blood pressure readings on this machine",
    long_about = "bp-tracker records blood pressure readings in local storage.\n\n\
        Commands:\n  \
        add      Record a new reading\n  \
        edit     Change an existing reading\n  \
        delete   Remove a reading\n  \
        list     Show all readings, newest first\n  \
        latest   Show the most recent reading and its category\n  \
        trend    Compare this week's readings with the week before\n  \
        chart    Show daily averages over the last 7 or 30 days"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Storage backend: file, sqlite or memory (overrides STORAGE_BACKEND)
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Directory for local data (overrides DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Storage configuration from the environment with command-line overrides applied
    pub fn storage_config(&self) -> Result<StorageConfig, StorageError> {
        let mut config = StorageConfig::from_env()?;
        self.apply_overrides(&mut config)?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut StorageConfig) -> Result<(), StorageError> {
        if let Some(backend) = &self.backend {
            config.backend = backend.parse()?;
        }
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        Ok(())
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new reading
    Add(ReadingArgs),
    /// Change an existing reading
    Edit(EditArgs),
    /// Remove a reading
    Delete(DeleteArgs),
    /// Show all readings, newest first
    List(ListArgs),
    /// Show the most recent reading and its category
    Latest,
    /// Compare this week's readings with the week before
    Trend,
    /// Show daily averages for a trailing window
    Chart(ChartArgs),
}

/// Reading fields as typed. Values are checked by the validator, not by clap.
#[derive(Debug, Clone, Default, Args)]
pub struct ReadingArgs {
    /// Systolic pressure in mmHg
    #[arg(long)]
    pub systolic: Option<String>,

    /// Diastolic pressure in mmHg
    #[arg(long)]
    pub diastolic: Option<String>,

    /// Pulse in beats per minute
    #[arg(long)]
    pub pulse: Option<String>,

    /// Date taken, YYYY-MM-DD (defaults to today when adding)
    #[arg(long)]
    pub date: Option<String>,
}

impl ReadingArgs {
    /// Fill `base` with every field given on the command line
    pub fn apply_to(&self, mut base: ReadingForm) -> ReadingForm {
        if let Some(systolic) = &self.systolic {
            base.systolic = systolic.clone();
        }
        if let Some(diastolic) = &self.diastolic {
            base.diastolic = diastolic.clone();
        }
        if let Some(pulse) = &self.pulse {
            base.pulse = pulse.clone();
        }
        if let Some(date) = &self.date {
            base.date = date.clone();
        }
        base
    }
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Id of the reading to change
    pub id: String,

    #[command(flatten)]
    pub fields: ReadingArgs,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Id of the reading to remove
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Print readings as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Window in days: 7 or 30
    #[arg(short, long, default_value = "7", value_parser = parse_window)]
    pub window: TrendWindow,
}

fn parse_window(value: &str) -> Result<TrendWindow, String> {
    let days: u32 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number of days", value))?;
    TrendWindow::try_from(days)
}
