//! CLI command implementations

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use exmap::midi::note_name;
use exmap::{DocumentWriter, InstrumentGroup, InstrumentGroups, Pipeline, ScanResult, Skipped};
use exmapconf::{ConfigSources, ExmapConfig};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, warn};

use crate::listing::list_filenames;
use crate::settings;
use crate::VariantArg;

pub struct GenerateArgs {
    pub folder: PathBuf,
    pub output: Option<PathBuf>,
    pub instruments: Vec<String>,
    pub variant: Option<VariantArg>,
    pub recursive: bool,
}

struct Failure {
    instrument: String,
    variant: exmap::Variant,
    error: exmap::Error,
}

fn scan_folder(
    pipeline: &Pipeline,
    folder: &Path,
    recursive: bool,
) -> Result<(usize, ScanResult<InstrumentGroups>)> {
    let filenames = list_filenames(folder, recursive)?;
    debug!("Listed {} files in {}", filenames.len(), folder.display());
    let scanned = pipeline.scan(&filenames)?;
    Ok((filenames.len(), scanned))
}

/// Scan a folder, then build and save every requested (instrument, variant) map.
///
/// A failed build is reported and the run moves on; only a run that was asked
/// for maps and wrote none fails as a whole.
pub fn generate(config: &ExmapConfig, args: GenerateArgs) -> Result<()> {
    let pipeline = Pipeline::new(&settings::pipeline_config(config)?)?;
    let variants = settings::variants(config, args.variant)?;
    let output_dir = args.output.unwrap_or_else(|| config.output.dir.clone());
    let writer = DocumentWriter::new(output_dir).with_extension(&config.output.extension);

    let (file_count, scanned) = scan_folder(&pipeline, &args.folder, args.recursive)?;
    let groups = &scanned.value;

    let instruments: Vec<String> = if args.instruments.is_empty() {
        groups.instruments().map(str::to_string).collect()
    } else {
        args.instruments
            .iter()
            .map(|name| match pipeline.lexicon().resolve(name) {
                Some(entry) => entry.match_token.clone(),
                None => name.clone(),
            })
            .collect()
    };

    let mut written = Vec::new();
    let mut failures = Vec::new();

    for instrument in &instruments {
        for &variant in &variants {
            let result = pipeline
                .build(groups, instrument, variant)
                .and_then(|doc| writer.write(&doc));
            match result {
                Ok(path) => written.push(path),
                Err(error) => {
                    warn!("Failed to build {} ({}): {}", instrument, variant, error);
                    failures.push(Failure {
                        instrument: instrument.clone(),
                        variant,
                        error,
                    });
                }
            }
        }
    }

    print_summary(file_count, &scanned, &failures);

    let requested = instruments.len() * variants.len();
    if requested == 0 {
        println!("{}", "No instruments found; nothing written.".yellow());
        return Ok(());
    }

    println!(
        "Wrote {} of {} expression maps to {}",
        written.len().to_string().bright_green(),
        requested,
        writer.output_dir().display()
    );

    if written.is_empty() {
        bail!("No expression maps were written");
    }
    Ok(())
}

fn print_summary(
    file_count: usize,
    scanned: &ScanResult<InstrumentGroups>,
    failures: &[Failure],
) {
    let groups = &scanned.value;
    println!(
        "Scanned {} files: {} instruments, {} articulations ({} ignored)",
        file_count,
        groups.len(),
        groups.articulation_count(),
        scanned.ignored
    );

    for group in groups.iter() {
        println!(
            "  {} ({}): {} articulations",
            group.instrument.bright_cyan(),
            group.display_name,
            group.len()
        );
    }

    if scanned.has_skipped() {
        println!("{} {} files:", "Skipped".yellow(), scanned.skipped.len());
        for Skipped { filename, reason } in &scanned.skipped {
            println!("  {} ({})", filename, reason);
        }
    }

    if !failures.is_empty() {
        println!("{} {} builds:", "Failed".bright_red(), failures.len());
        for failure in failures {
            println!(
                "  {} {}: {}",
                failure.instrument, failure.variant, failure.error
            );
        }
    }
}

#[derive(Serialize)]
struct ListedArticulation<'a> {
    name: &'a str,
    category: exmap::Category,
    trigger: u32,
    channel: u8,
    port: u32,
    note: String,
    source_filename: &'a str,
}

#[derive(Serialize)]
struct ListedInstrument<'a> {
    instrument: &'a str,
    display_name: &'a str,
    articulations: Vec<ListedArticulation<'a>>,
}

#[derive(Serialize)]
struct Listing<'a> {
    instruments: Vec<ListedInstrument<'a>>,
    skipped: &'a [Skipped],
    ignored: usize,
}

fn listed(group: &InstrumentGroup) -> ListedInstrument<'_> {
    ListedInstrument {
        instrument: &group.instrument,
        display_name: &group.display_name,
        articulations: group
            .articulations
            .iter()
            .map(|a| {
                let cp = a.channel_port();
                ListedArticulation {
                    name: a.name(),
                    category: a.record.category,
                    trigger: a.trigger,
                    channel: cp.channel,
                    port: cp.port,
                    note: note_name(a.trigger),
                    source_filename: &a.source_filename,
                }
            })
            .collect(),
    }
}

/// Print each instrument's slot layout.
pub fn list(config: &ExmapConfig, folder: &Path, json: bool, recursive: bool) -> Result<()> {
    let pipeline = Pipeline::new(&settings::pipeline_config(config)?)?;
    let (_, scanned) = scan_folder(&pipeline, folder, recursive)?;

    let listing = Listing {
        instruments: scanned.value.iter().map(listed).collect(),
        skipped: &scanned.skipped,
        ignored: scanned.ignored,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    for instrument in &listing.instruments {
        println!(
            "{} ({})",
            instrument.instrument.bright_cyan().bold(),
            instrument.display_name
        );
        for a in &instrument.articulations {
            println!(
                "  {:>4}  ch {:>2}  port {}  {:<5} {:<9} {}",
                a.trigger,
                a.channel,
                a.port,
                a.note,
                a.category.label(),
                a.name
            );
        }
    }

    for skipped in listing.skipped {
        println!("{} {} ({})", "skipped".yellow(), skipped.filename, skipped.reason);
    }

    Ok(())
}

/// Print the effective configuration. Sources go in TOML comments so the
/// output can be saved as a config file.
pub fn show_config(config: &ExmapConfig, sources: &ConfigSources) {
    if sources.files.is_empty() {
        println!("# Loaded from: compiled defaults");
    } else {
        for file in &sources.files {
            println!("# Loaded from: {}", file.display());
        }
    }
    for var in &sources.env_overrides {
        println!("# Overridden by: {}", var);
    }
    println!();
    print!("{}", config.to_toml());
}
