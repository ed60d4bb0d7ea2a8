//! Side-effecting user actions, expressed as values.
//!
//! Views build an `Intent` from a record and hand it to an `IntentSink`.
//! Nothing in the discovery path constructs or dispatches these.

use serde::{Deserialize, Serialize};

use crate::types::{Coordinates, Record, RecordDetails, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsultationMode {
    InPerson,
    Video,
    Chat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Call,
    Directions,
    Register,
    Book(ConsultationMode),
    Share,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "kebab-case")]
pub enum Intent {
    Call { phone: String },
    Directions { record_id: RecordId, coordinates: Coordinates },
    Register { record_id: RecordId },
    BookConsultation { record_id: RecordId, mode: ConsultationMode },
    Share { record_id: RecordId, name: String, location: String },
}

impl Intent {
    /// Returns `None` when the record cannot support the action, e.g.
    /// directions to a record without coordinates.
    pub fn for_record(record: &Record, action: Action) -> Option<Self> {
        let record_id = record.id.clone();
        match action {
            Action::Call => phone_of(&record.details).map(|phone| Intent::Call { phone: phone.to_string() }),
            Action::Directions => record
                .coordinates
                .map(|coordinates| Intent::Directions { record_id, coordinates }),
            Action::Register => match record.details {
                RecordDetails::Camp(_) | RecordDetails::Campaign(_) => Some(Intent::Register { record_id }),
                _ => None,
            },
            Action::Book(mode) => match &record.details {
                RecordDetails::Provider(_) => Some(Intent::BookConsultation { record_id, mode }),
                _ => None,
            },
            Action::Share => Some(Intent::Share {
                record_id,
                name: record.name.clone(),
                location: record.location.clone(),
            }),
        }
    }
}

fn phone_of(details: &RecordDetails) -> Option<&str> {
    match details {
        RecordDetails::Camp(d) => Some(d.contact.as_str()),
        RecordDetails::Provider(d) => Some(d.phone.as_str()),
        RecordDetails::Hospital(d) => Some(d.phone.as_str()),
        RecordDetails::Campaign(_) => None,
    }
}
