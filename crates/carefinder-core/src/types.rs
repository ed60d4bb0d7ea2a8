//! Domain types shared by the matching, geo, schedule and discovery crates.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::traits::Discoverable;

pub type RecordId = String;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let coordinates = Self { latitude, longitude };
        coordinates.validate()?;
        Ok(coordinates)
    }

    /// Latitude must lie in [-90, 90], longitude in [-180, 180], both finite.
    pub fn validate(&self) -> Result<()> {
        let latitude_ok = self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude);
        let longitude_ok = self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude);
        if latitude_ok && longitude_ok {
            Ok(())
        } else {
            Err(Error::InvalidCoordinate { latitude: self.latitude, longitude: self.longitude })
        }
    }
}

/// Camp and campaign type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CampType {
    BloodDonation,
    Checkup,
    Vaccination,
}

impl CampType {
    pub const ALL: [CampType; 3] = [CampType::BloodDonation, CampType::Checkup, CampType::Vaccination];

    pub fn key(self) -> &'static str {
        match self {
            CampType::BloodDonation => "blood-donation",
            CampType::Checkup => "checkup",
            CampType::Vaccination => "vaccination",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Specialty {
    General,
    Cardiology,
    Pediatrics,
    Gynecology,
    Orthopedics,
}

impl Specialty {
    pub const ALL: [Specialty; 5] = [
        Specialty::General,
        Specialty::Cardiology,
        Specialty::Pediatrics,
        Specialty::Gynecology,
        Specialty::Orthopedics,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Specialty::General => "general",
            Specialty::Cardiology => "cardiology",
            Specialty::Pediatrics => "pediatrics",
            Specialty::Gynecology => "gynecology",
            Specialty::Orthopedics => "orthopedics",
        }
    }
}

/// Hospital ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ownership {
    Government,
    Private,
}

impl Ownership {
    pub const ALL: [Ownership; 2] = [Ownership::Government, Ownership::Private];

    pub fn key(self) -> &'static str {
        match self {
            Ownership::Government => "government",
            Ownership::Private => "private",
        }
    }
}

/// The closed tag set of a record, one enum per record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Camp(CampType),
    Specialty(Specialty),
    Ownership(Ownership),
}

impl Category {
    pub fn key(self) -> &'static str {
        match self {
            Category::Camp(t) => t.key(),
            Category::Specialty(s) => s.key(),
            Category::Ownership(o) => o.key(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampDetails {
    pub camp_type: CampType,
    pub landmark: String,
    pub contact: String,
    pub participants: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignDetails {
    pub campaign_type: CampType,
    pub participants: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDetails {
    pub specialty: Specialty,
    pub experience_years: u32,
    pub rating: f32,
    pub consultation_fee: u32,
    pub verified: bool,
    pub available: bool,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalDetails {
    pub ownership: Ownership,
    pub beds: u32,
    pub available_beds: u32,
    pub rating: f32,
    pub emergency: bool,
    #[serde(default)]
    pub services: Vec<String>,
    pub phone: String,
}

/// Kind-specific payload. The engine never looks inside; presentation code
/// matches on it for display-only fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RecordDetails {
    Camp(CampDetails),
    Campaign(CampaignDetails),
    Provider(ProviderDetails),
    Hospital(HospitalDetails),
}

impl RecordDetails {
    pub fn kind_name(&self) -> &'static str {
        match self {
            RecordDetails::Camp(_) => "camp",
            RecordDetails::Campaign(_) => "campaign",
            RecordDetails::Provider(_) => "provider",
            RecordDetails::Hospital(_) => "hospital",
        }
    }
}

/// A discoverable camp, campaign, provider or hospital.
///
/// - `id`: unique within a collection
/// - `name`/`location`/`category_label`: already resolved for the display locale
/// - `coordinates`: present only for distance-capable records
/// - `scheduled_at`: present only for camps and campaigns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub category_label: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<NaiveDateTime>,
    pub details: RecordDetails,
}

impl Record {
    pub fn category(&self) -> Category {
        match &self.details {
            RecordDetails::Camp(d) => Category::Camp(d.camp_type),
            RecordDetails::Campaign(d) => Category::Camp(d.campaign_type),
            RecordDetails::Provider(d) => Category::Specialty(d.specialty),
            RecordDetails::Hospital(d) => Category::Ownership(d.ownership),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        self.details.kind_name()
    }
}

impl Discoverable for Record {
    fn id(&self) -> &str {
        &self.id
    }

    fn category_key(&self) -> &str {
        self.category().key()
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.location.as_str(), self.category_label.as_str()]
    }

    fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    fn scheduled_at(&self) -> Option<NaiveDateTime> {
        self.scheduled_at
    }
}

/// Display locale. Only the absolute-date format depends on it.
///
/// Config values and `--locale` go through the same `FromStr`, so `en-US`
/// and `hi-IN` are accepted in both places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Locale {
    #[default]
    En,
    Hi,
}

impl Locale {
    /// `en` renders as en-US (`9/20/2025`), `hi` as hi-IN (`20/9/2025`).
    pub fn format_date(self, date: NaiveDate) -> String {
        match self {
            Locale::En => format!("{}/{}/{}", date.month(), date.day(), date.year()),
            Locale::Hi => format!("{}/{}/{}", date.day(), date.month(), date.year()),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Hi => "hi",
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" => Ok(Locale::En),
            "hi" | "hi-in" => Ok(Locale::Hi),
            other => Err(Error::InvalidConfig(format!("unsupported locale '{other}'"))),
        }
    }
}

/// Lifecycle of a scheduled record relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Upcoming,
    Completed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Active => "active",
            Status::Upcoming => "upcoming",
            Status::Completed => "completed",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateLabel {
    Today,
    Tomorrow,
    /// Absolute date already formatted for the requested locale.
    On(String),
}

impl fmt::Display for DateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateLabel::Today => f.write_str("today"),
            DateLabel::Tomorrow => f.write_str("tomorrow"),
            DateLabel::On(date) => f.write_str(date),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Distance,
    Date,
    #[default]
    #[serde(rename = "none")]
    Unsorted,
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(SortKey::Distance),
            "date" => Ok(SortKey::Date),
            "none" | "" => Ok(SortKey::Unsorted),
            other => Err(Error::InvalidConfig(format!("unknown sort key '{other}'"))),
        }
    }
}

/// Category selection. `All` is the "no filter" sentinel; any other key is
/// compared verbatim, so an unknown key simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Key(String),
}

impl CategoryFilter {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Key(trimmed.to_string())
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Infallible> {
        Ok(Self::parse(s))
    }
}

/// User-chosen parameters for one query. Rebuilt on every interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryCriteria {
    pub text: String,
    pub category: CategoryFilter,
    pub sort_key: SortKey,
    pub reference_location: Option<Coordinates>,
    pub now: Option<NaiveDateTime>,
    pub locale: Locale,
}

impl QueryCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn sorted_by(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    #[must_use]
    pub fn near(mut self, reference: Coordinates) -> Self {
        self.reference_location = Some(reference);
        self
    }

    #[must_use]
    pub fn at(mut self, now: NaiveDateTime) -> Self {
        self.now = Some(now);
        self
    }

    #[must_use]
    pub fn in_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

/// Values computed per query, never stored on the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Derived {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_label: Option<DateLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_minutes: Option<u32>,
}

/// One entry of a query result: the record as supplied plus its derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hit<'a, R> {
    pub record: &'a R,
    pub derived: Derived,
}

pub type QueryResult<'a, R> = Vec<Hit<'a, R>>;
