use std::env;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};

use carefinder_core::catalog::{JsonCatalog, SampleCatalog};
use carefinder_core::config::Settings;
use carefinder_core::error::Error;
use carefinder_core::intent::{Action, Intent};
use carefinder_core::traits::{Clock, IntentSink, RecordSource};
use carefinder_core::types::{Locale, Record};
use carefinder_discovery::DiscoveryEngine;

use crate::args::{ActionArg, CategoryArgs, Cli, Command, QueryArgs, Scope};
use crate::render;

pub const MISSING_LOCATION_HINT: &str = "enter a location to sort by distance (--near <lat,lon>)";

/// Everything `run` needs besides the parsed command line.
pub struct RunContext<'a> {
    pub settings: &'a Settings,
    pub clock: &'a dyn Clock,
    pub sink: &'a dyn IntentSink,
}

pub fn run(cli: &Cli, ctx: &RunContext<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
    let locale = cli.locale.unwrap_or(ctx.settings.display.locale);
    let records = source_for(cli, ctx.settings, locale)?.records()?;
    let engine = DiscoveryEngine::from_settings(&ctx.settings.engine)?;
    tracing::debug!(
        records = records.len(),
        locale = locale.code(),
        speed_kmh = engine.travel_model().average_speed_kmh(),
        "catalog loaded"
    );

    match &cli.command {
        Command::Camps(args) => query(&engine, &records, Scope::Camps, args, locale, ctx.clock, out),
        Command::Campaigns(args) => query(&engine, &records, Scope::Campaigns, args, locale, ctx.clock, out),
        Command::Doctors(args) => query(&engine, &records, Scope::Doctors, args, locale, ctx.clock, out),
        Command::Hospitals(args) => query(&engine, &records, Scope::Hospitals, args, locale, ctx.clock, out),
        Command::All(args) => query(&engine, &records, Scope::All, args, locale, ctx.clock, out),
        Command::Categories(args) => categories(&engine, &records, args, out),
        Command::Act { id, action } => act(&records, id, *action, locale, ctx.sink, out),
    }
}

fn source_for(cli: &Cli, settings: &Settings, locale: Locale) -> anyhow::Result<Box<dyn RecordSource>> {
    let dir: Option<PathBuf> = match &cli.catalog {
        Some(dir) => Some(dir.clone()),
        None => {
            let cwd = env::current_dir().context("Failed to read current directory")?;
            settings.catalog_dir(&cwd)
        }
    };
    Ok(match dir {
        Some(dir) => {
            let catalog = JsonCatalog::new(dir);
            tracing::debug!(dir = %catalog.dir().display(), "using json catalog");
            Box::new(catalog)
        }
        None => Box::new(SampleCatalog::new(locale)),
    })
}

fn scoped(records: &[Record], scope: Scope) -> Vec<Record> {
    records.iter().filter(|record| scope.includes(record)).cloned().collect()
}

fn query(
    engine: &DiscoveryEngine,
    records: &[Record],
    scope: Scope,
    args: &QueryArgs,
    locale: Locale,
    clock: &dyn Clock,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let records = scoped(records, scope);
    let criteria = args.criteria(locale, clock);
    let hits = match engine.query(&records, &criteria) {
        Ok(hits) => hits,
        Err(Error::MissingReferenceLocation) => bail!(MISSING_LOCATION_HINT),
        Err(e) => return Err(e.into()),
    };
    if args.json {
        writeln!(out, "{}", render::json(&hits)?)?;
    } else {
        write!(out, "{}", render::text(&hits, locale))?;
    }
    Ok(())
}

fn categories(engine: &DiscoveryEngine, records: &[Record], args: &CategoryArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let records = scoped(records, args.scope);
    let counts = engine.category_counts(&records, &args.search);
    let chips: Vec<(String, usize)> = args
        .scope
        .chips()
        .into_iter()
        .map(|chip| {
            let count = counts.iter().find(|(key, _)| key == chip.key()).map_or(0, |(_, n)| *n);
            (chip.key().to_string(), count)
        })
        .collect();
    write!(out, "{}", render::counts(&chips))?;
    Ok(())
}

fn act(
    records: &[Record],
    id: &str,
    action: ActionArg,
    locale: Locale,
    sink: &dyn IntentSink,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let record = records
        .iter()
        .find(|record| record.id == id)
        .ok_or_else(|| anyhow!("no record with id '{id}'"))?;
    let intent = Intent::for_record(record, Action::from(action))
        .ok_or_else(|| anyhow!("{} '{}' does not support {:?}", record.kind_name(), id, action))?;
    sink.dispatch(&intent)?;
    writeln!(out, "{}", render::intent_confirmation(&intent, locale))?;
    Ok(())
}
