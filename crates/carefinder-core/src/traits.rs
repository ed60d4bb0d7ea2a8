use chrono::NaiveDateTime;

use crate::intent::Intent;
use crate::types::{Coordinates, Record};

/// The shared shape the discovery engine operates on. Kind-specific data stays
/// behind the implementor.
pub trait Discoverable {
    fn id(&self) -> &str;
    fn category_key(&self) -> &str;
    /// Ordered fields consulted by free-text matching.
    fn searchable_fields(&self) -> Vec<&str>;
    fn coordinates(&self) -> Option<Coordinates>;
    fn scheduled_at(&self) -> Option<NaiveDateTime>;
}

pub trait RecordSource: Send + Sync {
    fn records(&self) -> anyhow::Result<Vec<Record>>;
}

pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

pub trait IntentSink {
    fn dispatch(&self, intent: &Intent) -> anyhow::Result<()>;
}
