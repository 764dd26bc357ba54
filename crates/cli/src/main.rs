mod csv;
mod scenario;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use grist_core::config::{GenerationConfig, Seed};
use grist_inject::run_generation;
use grist_verify::FindingSeverity;

// Generation is O(rows) in memory; the library itself has no ceiling,
// so the CLI imposes one before a typo allocates a few gigabytes.
const MAX_VENDORS: usize = 50_000;
const MAX_POS: usize = 200_000;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Grist procure-to-pay dataset synthesizer.
#[derive(Parser)]
#[command(name = "grist", version, about = "Grist procure-to-pay dataset synthesizer")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ConfigArgs {
    /// Run seed (integer or string)
    #[arg(long)]
    seed: Option<String>,

    /// Number of vendors to generate
    #[arg(long)]
    vendors: Option<usize>,

    /// Number of purchase orders to generate
    #[arg(long)]
    pos: Option<usize>,

    /// Built-in scenario pack to start from
    #[arg(long)]
    pack: Option<String>,

    /// TOML configuration file to start from
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a dataset and write CSV files plus manifest
    Generate {
        #[command(flatten)]
        config: ConfigArgs,

        /// Output directory for CSV files and manifest.json
        #[arg(long, default_value = "out")]
        out: PathBuf,
    },

    /// Regenerate deterministically in memory and audit the result
    Verify {
        #[command(flatten)]
        config: ConfigArgs,

        /// Exit nonzero when any check reports a warning
        #[arg(long)]
        strict: bool,
    },

    /// List built-in scenario packs
    Packs,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { config, out } => {
            cmd_generate(&config, &out, cli.output, cli.quiet);
        }
        Commands::Verify { config, strict } => {
            cmd_verify(&config, strict, cli.output, cli.quiet);
        }
        Commands::Packs => {
            cmd_packs(cli.output);
        }
    }
}

fn parse_seed(raw: &str) -> Seed {
    match raw.parse::<i64>() {
        Ok(n) => Seed::Int(n),
        Err(_) => Seed::Text(raw.to_string()),
    }
}

/// Resolve pack/file/flag layers into one validated config. Usage and
/// validation problems exit 2 before any generation work starts.
fn resolve_config(args: &ConfigArgs) -> GenerationConfig {
    if args.pack.is_some() && args.config.is_some() {
        eprintln!("error: --pack and --config are mutually exclusive");
        process::exit(2);
    }

    let mut config = if let Some(ref name) = args.pack {
        match scenario::resolve(name) {
            Some(config) => config,
            None => {
                eprintln!("error: unknown pack '{}' (see `grist packs`)", name);
                process::exit(2);
            }
        }
    } else if let Some(ref path) = args.config {
        match scenario::load_toml(path) {
            Ok(config) => config,
            Err(message) => {
                eprintln!("error: {}", message);
                process::exit(2);
            }
        }
    } else {
        GenerationConfig::default()
    };

    if let Some(ref raw) = args.seed {
        config.seed = parse_seed(raw);
    }
    if let Some(vendors) = args.vendors {
        config.vendor_count = vendors;
    }
    if let Some(pos) = args.pos {
        config.po_count = pos;
    }

    if config.vendor_count > MAX_VENDORS {
        eprintln!("error: vendor_count {} exceeds the limit of {}", config.vendor_count, MAX_VENDORS);
        process::exit(2);
    }
    if config.po_count > MAX_POS {
        eprintln!("error: po_count {} exceeds the limit of {}", config.po_count, MAX_POS);
        process::exit(2);
    }
    if let Err(e) = config.validate() {
        eprintln!("error: {}", e);
        process::exit(2);
    }
    config
}

fn cmd_generate(args: &ConfigArgs, out: &Path, output: OutputFormat, quiet: bool) {
    let config = resolve_config(args);

    let run = match run_generation(&config) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("Generation error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = fs::create_dir_all(out) {
        eprintln!("error: cannot create {}: {}", out.display(), e);
        process::exit(1);
    }
    if let Err(e) = csv::write_dataset(out, &run.dataset) {
        eprintln!("error: writing dataset CSVs: {}", e);
        process::exit(1);
    }
    if let Err(e) = csv::write_truth(out, &run.truth_records) {
        eprintln!("error: writing anomaly_truth.csv: {}", e);
        process::exit(1);
    }
    let manifest_json = match serde_json::to_string_pretty(&run.manifest) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("error: serializing manifest: {}", e);
            process::exit(1);
        }
    };
    if let Err(e) = fs::write(out.join("manifest.json"), manifest_json) {
        eprintln!("error: writing manifest.json: {}", e);
        process::exit(1);
    }

    for key in &run.skipped {
        eprintln!("warning: anomaly key '{}' has no taxonomy mapping; skipped", key);
    }

    match output {
        OutputFormat::Json => {
            // The manifest is the machine-readable run summary.
            match serde_json::to_string_pretty(&run.manifest) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("error: {}", e);
                    process::exit(1);
                }
            }
        }
        OutputFormat::Text => {
            if !quiet {
                println!("seed: {}", run.manifest.seed);
                for (name, count) in run.dataset.row_counts() {
                    println!("  {:<18} {:>8}", name, count);
                }
                println!("  {:<18} {:>8}", "anomaly_truth", run.truth_records.len());
                println!("etag: {}", run.manifest.etag);
                println!("wrote {}", out.display());
            }
        }
    }
}

fn cmd_verify(args: &ConfigArgs, strict: bool, output: OutputFormat, quiet: bool) {
    let config = resolve_config(args);

    let run = match run_generation(&config) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("Generation error: {}", e);
            process::exit(1);
        }
    };
    let report = grist_verify::verify(&run.dataset, &config);

    match output {
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                process::exit(1);
            }
        },
        OutputFormat::Text => {
            if !quiet {
                println!(
                    "checks run: {} | violations: {}",
                    report.checks_run.join(","),
                    report.total_violations()
                );
                for finding in &report.findings {
                    let tag = match finding.severity {
                        FindingSeverity::Info => "info",
                        FindingSeverity::Warning => "warning",
                    };
                    println!("  [{}] {}: {}", tag, finding.check, finding.message);
                }
            }
        }
    }

    if strict && report.has_warnings() {
        process::exit(1);
    }
}

fn cmd_packs(output: OutputFormat) {
    match output {
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = scenario::PACKS
                .iter()
                .map(|p| {
                    let anomalies = scenario::resolve(p.name)
                        .map(|c| c.anomalies)
                        .unwrap_or_default();
                    serde_json::json!({
                        "name": p.name,
                        "description": p.description,
                        "vendor_count": p.vendor_count,
                        "po_count": p.po_count,
                        "anomalies": anomalies,
                    })
                })
                .collect();
            match serde_json::to_string_pretty(&rows) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("error: {}", e);
                    process::exit(1);
                }
            }
        }
        OutputFormat::Text => {
            for p in &scenario::PACKS {
                println!(
                    "{:<16} {:>6} vendors {:>7} POs  {}",
                    p.name, p.vendor_count, p.po_count, p.description
                );
                if let Some(config) = scenario::resolve(p.name) {
                    for (key, pct) in &config.anomalies {
                        println!("    {:<32} {:>5.1}%", key, pct);
                    }
                }
            }
        }
    }
}
