//! `amsync status [ROOT]`: table (or JSON) of manifest sync state.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use amsync_core::SyncConfig;
use amsync_renderer::Renderer;
use amsync_sync::{renderer_for, status::check, ManifestSignal};

use super::{display_path, RootArgs};

/// Arguments for `amsync status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub root: RootArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let config = self.root.load_config()?;
        let root = self.root.root.as_path();
        let renderer = renderer_for(root, &config).context("failed to load manifest template")?;

        let descriptors = self.root.descriptors(&config)?;
        let rows: Vec<ManifestStatus> = descriptors
            .iter()
            .map(|d| build_row(d, root, &config, &renderer))
            .collect();

        if self.json {
            return print_json(rows);
        }
        print_table(root, rows);
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct ManifestStatus {
    descriptor: String,
    manifest: String,
    /// `None` when the descriptor itself could not be processed.
    signal: Option<ManifestSignal>,
    detail: String,
}

impl ManifestStatus {
    fn key(&self) -> &'static str {
        self.signal.as_ref().map_or("error", ManifestSignal::label)
    }

    fn needs_sync(&self) -> bool {
        self.signal.as_ref().map_or(true, ManifestSignal::needs_attention)
    }
}

fn build_row(
    descriptor: &Path,
    root: &Path,
    config: &SyncConfig,
    renderer: &Renderer,
) -> ManifestStatus {
    let manifest = display_path(&config.manifest_path(descriptor), root);
    let descriptor_shown = display_path(descriptor, root);
    match check(descriptor, config, renderer) {
        Ok(signal) => ManifestStatus {
            descriptor: descriptor_shown,
            manifest,
            detail: signal_detail(&signal),
            signal: Some(signal),
        },
        Err(err) => ManifestStatus {
            descriptor: descriptor_shown,
            manifest,
            signal: None,
            detail: err.to_string(),
        },
    }
}

#[derive(Serialize)]
struct StatusReportJson {
    summary: StatusSummaryJson,
    manifests: Vec<ManifestStatusJson>,
}

#[derive(Serialize)]
struct StatusSummaryJson {
    descriptors: usize,
    current: usize,
    needs_sync: usize,
}

#[derive(Serialize)]
struct ManifestStatusJson {
    descriptor: String,
    manifest: String,
    status: &'static str,
    detail: String,
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "")]
    indicator: String,
    #[tabled(rename = "Descriptor")]
    descriptor: String,
    #[tabled(rename = "Manifest")]
    manifest: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Detail")]
    detail: String,
}

fn print_json(rows: Vec<ManifestStatus>) -> Result<()> {
    let needs_sync = rows.iter().filter(|r| r.needs_sync()).count();
    let payload = StatusReportJson {
        summary: StatusSummaryJson {
            descriptors: rows.len(),
            current: rows.len() - needs_sync,
            needs_sync,
        },
        manifests: rows
            .into_iter()
            .map(|row| ManifestStatusJson {
                status: row.key(),
                descriptor: row.descriptor,
                manifest: row.manifest,
                detail: row.detail,
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
    );
    Ok(())
}

fn print_table(root: &Path, rows: Vec<ManifestStatus>) {
    let needs_sync = rows.iter().filter(|r| r.needs_sync()).count();
    println!(
        "amsync v{} | {} descriptors | {} need sync",
        env!("CARGO_PKG_VERSION"),
        rows.len(),
        needs_sync,
    );

    if rows.is_empty() {
        println!("No descriptors found under '{}'.", root.display());
        return;
    }

    let table_rows: Vec<StatusTableRow> = rows
        .into_iter()
        .map(|row| StatusTableRow {
            indicator: indicator(row.signal.as_ref()),
            status: row.key().to_uppercase(),
            descriptor: row.descriptor,
            manifest: row.manifest,
            detail: row.detail,
        })
        .collect();
    let mut table = Table::new(table_rows);
    table.with(Style::rounded());
    println!("{table}");

    if needs_sync > 0 {
        println!("Run 'amsync sync {}' to update stale manifests.", root.display());
    }
}

fn indicator(signal: Option<&ManifestSignal>) -> String {
    match signal {
        Some(ManifestSignal::Current) => "■".green().bold().to_string(),
        Some(ManifestSignal::Missing) => "■".bright_black().bold().to_string(),
        Some(ManifestSignal::Stale { .. }) => "■".yellow().bold().to_string(),
        Some(ManifestSignal::Malformed { .. }) | None => "■".red().bold().to_string(),
    }
}

fn signal_detail(signal: &ManifestSignal) -> String {
    match signal {
        ManifestSignal::Missing => "manifest will be created".to_string(),
        ManifestSignal::Current => "up to date".to_string(),
        ManifestSignal::Stale { blocks } => {
            let names: Vec<&str> = blocks.iter().map(|b| b.as_str()).collect();
            format!("{} out of date", names.join(", "))
        }
        ManifestSignal::Malformed { keyword, line } => {
            format!("{keyword} block at line {line} is unterminated")
        }
    }
}
