//! Resolve command - show where an identifier points

use crate::cli::args::{OutputFormat, ResolveArgs};
use crate::error::ReslocResult;
use crate::names::NamedResource;
use crate::resolve::{ResolvedLocation, Resolver};
use crate::ui::{self, UiContext};
use serde::Serialize;

/// Serializable view of a resolved location
#[derive(Debug, Serialize)]
struct LocationReport {
    kind: &'static str,
    location: String,
    directory: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    archive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource: Option<String>,
}

impl LocationReport {
    /// Archive entries are looked up so a missing entry or closed handle
    /// fails the report instead of guessing the directory flag.
    fn new(location: &ResolvedLocation) -> ReslocResult<Self> {
        let mut report = Self {
            kind: location.kind(),
            location: location.to_string(),
            directory: false,
            archive: None,
            entry: None,
            module: None,
            resource: None,
        };

        match location {
            ResolvedLocation::Native(_) => report.directory = location.is_directory(),
            ResolvedLocation::Archive { archive, entry } => {
                report.directory = archive.entry(entry)?.is_directory;
                report.archive = Some(archive.path().display().to_string());
                report.entry = Some(entry.clone());
            }
            ResolvedLocation::RuntimeImage { info, .. } => {
                report.directory = location.is_directory();
                report.module = info.module_name().map(str::to_string);
                report.resource = Some(info.resource().to_string());
            }
        }

        Ok(report)
    }
}

/// Execute the resolve command
pub fn execute(args: ResolveArgs, resolver: &Resolver) -> ReslocResult<()> {
    let location = resolver.resolve(&args.identifier)?;
    let report = LocationReport::new(&location)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Plain => print_plain(&report),
    }

    Ok(())
}

fn print_plain(report: &LocationReport) {
    let ctx = UiContext::detect();

    ui::key_value(&ctx, "kind", report.kind);
    ui::key_value(&ctx, "location", &report.location);
    ui::key_value(&ctx, "directory", &report.directory.to_string());
    for (key, value) in [
        ("archive", &report.archive),
        ("entry", &report.entry),
        ("module", &report.module),
        ("resource", &report.resource),
    ] {
        if let Some(value) = value {
            ui::key_value(&ctx, key, value);
        }
    }
}
