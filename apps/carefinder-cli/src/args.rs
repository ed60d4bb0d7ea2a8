use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand, ValueEnum};

use carefinder_core::intent::{Action, ConsultationMode};
use carefinder_core::traits::Clock;
use carefinder_core::types::{
    CampType, Category, CategoryFilter, Coordinates, Locale, Ownership, QueryCriteria, Record, RecordDetails, SortKey,
    Specialty,
};

#[derive(Debug, Parser)]
#[command(name = "carefinder", version, about = "Find health camps, campaigns, doctors and hospitals")]
pub struct Cli {
    /// Display locale (en or hi). Defaults to display.locale from config.
    #[arg(long, global = true, value_parser = parse_locale)]
    pub locale: Option<Locale>,

    /// Directory of JSON record files. Defaults to data.catalog_dir, else the bundled sample data.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Health camps near you
    Camps(QueryArgs),
    /// Upcoming health campaigns
    Campaigns(QueryArgs),
    /// Doctor directory
    Doctors(QueryArgs),
    /// Hospital directory
    Hospitals(QueryArgs),
    /// Every record kind at once
    All(QueryArgs),
    /// Match counts per category for the filter row
    Categories(CategoryArgs),
    /// Trigger an action (call, directions, ...) on one record
    Act {
        id: String,
        #[arg(value_enum)]
        action: ActionArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scope {
    Camps,
    Campaigns,
    Doctors,
    Hospitals,
    All,
}

impl Scope {
    pub fn includes(self, record: &Record) -> bool {
        matches!(
            (self, &record.details),
            (Scope::All, _)
                | (Scope::Camps, RecordDetails::Camp(_))
                | (Scope::Campaigns, RecordDetails::Campaign(_))
                | (Scope::Doctors, RecordDetails::Provider(_))
                | (Scope::Hospitals, RecordDetails::Hospital(_))
        )
    }

    /// Filter chips offered for this scope, in display order.
    pub fn chips(self) -> Vec<Category> {
        let camps = CampType::ALL.into_iter().map(Category::Camp);
        let specialties = Specialty::ALL.into_iter().map(Category::Specialty);
        let ownerships = Ownership::ALL.into_iter().map(Category::Ownership);
        match self {
            Scope::Camps | Scope::Campaigns => camps.collect(),
            Scope::Doctors => specialties.collect(),
            Scope::Hospitals => ownerships.collect(),
            Scope::All => camps.chain(specialties).chain(ownerships).collect(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Free-text search over name, location and category
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Category key, or "all"
    #[arg(short, long, default_value = "all")]
    pub category: CategoryFilter,

    /// distance, date or none
    #[arg(long, default_value = "none", value_parser = parse_sort)]
    pub sort: SortKey,

    /// Your location as "lat,lon"
    #[arg(long, value_parser = parse_coordinates)]
    pub near: Option<Coordinates>,

    /// Evaluate status as of this moment (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
    #[arg(long, value_parser = parse_now)]
    pub now: Option<NaiveDateTime>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl QueryArgs {
    /// The clock is consulted only when `--now` is absent.
    pub fn criteria(&self, locale: Locale, clock: &dyn Clock) -> QueryCriteria {
        let mut criteria = QueryCriteria::new()
            .with_text(self.search.clone())
            .with_category(self.category.clone())
            .sorted_by(self.sort)
            .at(self.now.unwrap_or_else(|| clock.now()))
            .in_locale(locale);
        criteria.reference_location = self.near;
        criteria
    }
}

#[derive(Debug, Clone, Args)]
pub struct CategoryArgs {
    #[arg(short, long, default_value = "")]
    pub search: String,

    #[arg(long, value_enum, default_value_t = Scope::All)]
    pub scope: Scope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ActionArg {
    Call,
    Directions,
    Register,
    BookInPerson,
    BookVideo,
    BookChat,
    Share,
}

impl From<ActionArg> for Action {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Call => Action::Call,
            ActionArg::Directions => Action::Directions,
            ActionArg::Register => Action::Register,
            ActionArg::BookInPerson => Action::Book(ConsultationMode::InPerson),
            ActionArg::BookVideo => Action::Book(ConsultationMode::Video),
            ActionArg::BookChat => Action::Book(ConsultationMode::Chat),
            ActionArg::Share => Action::Share,
        }
    }
}

fn parse_locale(raw: &str) -> Result<Locale, String> {
    raw.parse().map_err(|e: carefinder_core::error::Error| e.to_string())
}

fn parse_sort(raw: &str) -> Result<SortKey, String> {
    raw.parse().map_err(|e: carefinder_core::error::Error| e.to_string())
}

pub fn parse_coordinates(raw: &str) -> Result<Coordinates, String> {
    let (lat, lon) = raw.split_once(',').ok_or_else(|| format!("expected \"lat,lon\", got '{raw}'"))?;
    let latitude: f64 = lat.trim().parse().map_err(|_| format!("bad latitude '{}'", lat.trim()))?;
    let longitude: f64 = lon.trim().parse().map_err(|_| format!("bad longitude '{}'", lon.trim()))?;
    Coordinates::new(latitude, longitude).map_err(|e| e.to_string())
}

pub fn parse_now(raw: &str) -> Result<NaiveDateTime, String> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)))
        .ok_or_else(|| format!("expected YYYY-MM-DD or YYYY-MM-DDTHH:MM, got '{raw}'"))
}
