//! carefinder-discovery
//!
//! Filters, enriches and orders a record collection for one set of criteria.
//! `query` is a pure function of its arguments: it reads no clock, performs no
//! I/O and never reorders or mutates the input slice.

use std::cmp::Ordering;

use carefinder_core::config::EngineSettings;
use carefinder_core::error::{Error, Result};
use carefinder_core::traits::Discoverable;
use carefinder_core::types::{Derived, Hit, QueryCriteria, QueryResult, SortKey};
use carefinder_geo::{distance_km, TravelModel};
use carefinder_match::{matches_category, TextQuery};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DiscoveryEngine {
    travel: TravelModel,
}

impl DiscoveryEngine {
    pub fn new(travel: TravelModel) -> Self {
        Self { travel }
    }

    pub fn from_settings(settings: &EngineSettings) -> Result<Self> {
        Ok(Self::new(TravelModel::from_settings(settings)?))
    }

    pub fn travel_model(&self) -> TravelModel {
        self.travel
    }

    /// Category filter, text filter, enrichment, then a stable sort.
    ///
    /// Fails with `MissingReferenceLocation` when sorting by distance without a
    /// reference point, and with `InvalidCoordinate` when a distance has to be
    /// computed from an out-of-range point.
    pub fn query<'a, R: Discoverable>(&self, records: &'a [R], criteria: &QueryCriteria) -> Result<QueryResult<'a, R>> {
        if criteria.sort_key == SortKey::Distance && criteria.reference_location.is_none() {
            return Err(Error::MissingReferenceLocation);
        }
        if let Some(reference) = &criteria.reference_location {
            reference.validate()?;
        }

        let in_category: Vec<&R> = records
            .iter()
            .filter(|record| matches_category(*record, &criteria.category))
            .collect();
        let after_category = in_category.len();

        let text = TextQuery::new(&criteria.text);
        let matched: Vec<&R> = in_category.into_iter().filter(|record| text.matches(*record)).collect();

        let mut hits = matched
            .into_iter()
            .map(|record| -> Result<Hit<'a, R>> { Ok(Hit { record, derived: self.enrich(record, criteria)? }) })
            .collect::<Result<Vec<_>>>()?;
        sort_hits(&mut hits, criteria.sort_key);

        tracing::debug!(
            total = records.len(),
            after_category,
            returned = hits.len(),
            text = text.as_str(),
            sort = ?criteria.sort_key,
            "discovery query"
        );
        Ok(hits)
    }

    /// Per-category match counts for `text`, keyed in first-seen order. Feeds
    /// filter chips; the category filter itself is not applied.
    pub fn category_counts<R: Discoverable>(&self, records: &[R], text: &str) -> Vec<(String, usize)> {
        let text = TextQuery::new(text);
        let mut counts: Vec<(String, usize)> = Vec::new();
        for record in records.iter().filter(|record| text.matches(*record)) {
            let key = record.category_key();
            match counts.iter_mut().find(|(k, _)| k == key) {
                Some((_, count)) => *count += 1,
                None => counts.push((key.to_string(), 1)),
            }
        }
        counts
    }

    fn enrich<R: Discoverable>(&self, record: &R, criteria: &QueryCriteria) -> Result<Derived> {
        let mut derived = Derived::default();
        if let Some(now) = criteria.now {
            let (status, date_label) = carefinder_schedule::annotate(record.scheduled_at(), now, criteria.locale);
            derived.status = status;
            derived.date_label = date_label;
        }
        if let (Some(at), Some(reference)) = (record.coordinates(), criteria.reference_location) {
            let km = distance_km(reference, at)?;
            derived.distance_km = Some(km);
            derived.travel_minutes = Some(self.travel.travel_minutes(km)?);
        }
        Ok(derived)
    }
}

/// Stable: ties and records missing the sort field keep their filtered order,
/// with the missing ones after everything else.
fn sort_hits<R: Discoverable>(hits: &mut [Hit<'_, R>], sort_key: SortKey) {
    match sort_key {
        SortKey::Distance => {
            hits.sort_by(|a, b| missing_last(a.derived.distance_km, b.derived.distance_km, f64::total_cmp));
        }
        SortKey::Date => {
            hits.sort_by(|a, b| missing_last(a.record.scheduled_at(), b.record.scheduled_at(), Ord::cmp));
        }
        SortKey::Unsorted => {}
    }
}

fn missing_last<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(&a, &b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
