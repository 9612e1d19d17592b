//! CLI interface for Haul.
//!
//! Each subcommand is non-interactive: transport JSON files in, activities
//! out. Plain text goes to stdout by default; `--json` switches to pretty
//! JSON for scripts.
//!
//! All files of one invocation share an activity cache, so a transport
//! listed twice is derived once.

mod format;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::warn;

use haul::cache::ActivityCache;
use haul::config::Config;
use haul::derive::{DeriveOptions, sequence_sites};
use haul::model::{Activity, ActivityType, MeansGroup, Transport};

use format::{format_activity, format_means, format_site};

/// Haul: derive driver activities from transports.
#[derive(Debug, Parser)]
#[command(name = "haul", version, after_long_help = USAGE_HELP)]
pub struct Cli {
    /// Config file to use instead of `~/.haul/config.toml`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

const USAGE_HELP: &str = r"Examples:
  haul activities transport.json
  haul activities --for-trucker --omit bulking-break-start --omit bulking-break-end t1.json t2.json
  haul activities --json --out activities.json transport.json
  haul means transport.json
  haul sites transport.json

Logging:
  HAUL_LOG=debug haul activities transport.json";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Derive the ordered activities of each transport.
    Activities {
        /// Transport JSON files.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        derive: DeriveArgs,

        /// Print pretty JSON instead of one line per activity.
        #[arg(long)]
        json: bool,

        /// Write the JSON to this file instead of stdout. Implies `--json`.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Derive activities and split them into runs by trucker and equipment.
    Means {
        /// Transport JSON files.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        derive: DeriveArgs,

        /// Print pretty JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Show the sequenced sites of a transport.
    Sites {
        /// Transport JSON file.
        file: PathBuf,
    },
}

/// Derivation flags shared by `activities` and `means`.
#[derive(Debug, Args)]
pub struct DeriveArgs {
    /// Evaluate eligibility for the driver's app.
    #[arg(long)]
    for_trucker: bool,

    /// Activity type to leave out. Can be specified multiple times.
    /// Adds to the configured `omit` list.
    #[arg(long, value_enum)]
    omit: Vec<ActivityTypeArg>,
}

/// CLI-facing activity type, mapped to the domain `ActivityType`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ActivityTypeArg {
    Loading,
    Unloading,
    BulkingBreakStart,
    BulkingBreakEnd,
}

impl ActivityTypeArg {
    fn to_domain(self) -> ActivityType {
        match self {
            Self::Loading => ActivityType::Loading,
            Self::Unloading => ActivityType::Unloading,
            Self::BulkingBreakStart => ActivityType::BulkingBreakStart,
            Self::BulkingBreakEnd => ActivityType::BulkingBreakEnd,
        }
    }
}

impl DeriveArgs {
    /// Merge flags over the configured defaults.
    fn to_options(&self, config: &Config) -> DeriveOptions {
        let mut omit: BTreeSet<ActivityType> = config.omit.iter().copied().collect();
        omit.extend(self.omit.iter().map(|a| a.to_domain()));
        DeriveOptions {
            activity_types_to_omit: omit,
            for_trucker: self.for_trucker || config.for_trucker,
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(cli: Cli, config: &Config) -> Result<(), String> {
    match cli.command {
        Command::Activities {
            files,
            derive,
            json,
            out,
        } => cmd_activities(config, &files, &derive.to_options(config), json, out),
        Command::Means {
            files,
            derive,
            json,
        } => cmd_means(config, &files, &derive.to_options(config), json),
        Command::Sites { file } => cmd_sites(&file),
    }
}

/// JSON shape of one transport's derivation.
#[derive(Debug, Serialize)]
struct TransportReport<'a, T: Serialize> {
    transport: &'a str,
    #[serde(flatten)]
    body: T,
}

#[derive(Debug, Serialize)]
struct ActivitiesBody<'a> {
    activities: &'a [Activity],
}

#[derive(Debug, Serialize)]
struct MeansBody<'a> {
    groups: &'a [MeansGroup],
}

fn cmd_activities(
    config: &Config,
    files: &[PathBuf],
    options: &DeriveOptions,
    json: bool,
    out: Option<PathBuf>,
) -> Result<(), String> {
    let mut cache = ActivityCache::new(config.cache_capacity);
    let mut derived: Vec<(String, Arc<[Activity]>)> = Vec::with_capacity(files.len());

    for path in files {
        let transport = read_transport(path)?;
        let activities = cache
            .activities(&transport, options)
            .map_err(|e| format!("failed to derive {}: {e}", path.display()))?;
        derived.push((transport.uid, activities));
    }

    if json || out.is_some() {
        let reports: Vec<_> = derived
            .iter()
            .map(|(uid, activities)| TransportReport {
                transport: uid,
                body: ActivitiesBody { activities },
            })
            .collect();
        let json = serde_json::to_string_pretty(&reports)
            .map_err(|e| format!("failed to serialize activities: {e}"))?;

        match out {
            Some(path) => {
                fs::write(&path, &json)
                    .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
                let total: usize = derived.iter().map(|(_, a)| a.len()).sum();
                eprintln!(
                    "Derived {total} activities from {} transport(s) → {}",
                    derived.len(),
                    path.display()
                );
            }
            None => println!("{json}"),
        }
        return Ok(());
    }

    for (uid, activities) in &derived {
        println!("transport {uid}");
        if activities.is_empty() {
            println!("  No activities");
        }
        for activity in activities.iter() {
            println!("  {}", format_activity(activity));
        }
    }
    Ok(())
}

fn cmd_means(
    config: &Config,
    files: &[PathBuf],
    options: &DeriveOptions,
    json: bool,
) -> Result<(), String> {
    let mut cache = ActivityCache::new(config.cache_capacity);
    let mut derived: Vec<(String, Vec<MeansGroup>)> = Vec::with_capacity(files.len());

    for path in files {
        let transport = read_transport(path)?;
        let groups = cache
            .activities_by_means(&transport, options)
            .map_err(|e| format!("failed to derive {}: {e}", path.display()))?;
        derived.push((transport.uid, groups));
    }

    if json {
        let reports: Vec<_> = derived
            .iter()
            .map(|(uid, groups)| TransportReport {
                transport: uid,
                body: MeansBody { groups },
            })
            .collect();
        let json = serde_json::to_string_pretty(&reports)
            .map_err(|e| format!("failed to serialize means groups: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    for (uid, groups) in &derived {
        println!("transport {uid}");
        for group in groups {
            println!("  {}", format_means(group));
            for activity in &group.activities {
                println!("    {}", format_activity(activity));
            }
        }
    }
    Ok(())
}

fn cmd_sites(file: &Path) -> Result<(), String> {
    let transport = read_transport(file)?;
    let sequence = sequence_sites(&transport)
        .map_err(|e| format!("failed to sequence {}: {e}", file.display()))?;

    println!("transport {}", transport.uid);
    for site in sequence.sites() {
        println!(
            "  {}",
            format_site(
                site,
                sequence.incoming(&site.uid),
                sequence.outgoing(&site.uid),
                sequence.deliveries_at(&site.uid),
            )
        );
    }
    Ok(())
}

/// Read and parse one transport JSON file.
fn read_transport(path: &Path) -> Result<Transport, String> {
    let contents =
        fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let transport: Transport = serde_json::from_str(&contents)
        .map_err(|e| format!("invalid transport in {}: {e}", path.display()))?;
    if transport.deleted {
        warn!(transport = %transport.uid, path = %path.display(), "transport is deleted");
    }
    Ok(transport)
}
