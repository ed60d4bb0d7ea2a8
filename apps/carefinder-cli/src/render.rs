//! Text and JSON rendering of query results, category counts and intents.
use std::fmt::Write as _;

use carefinder_core::intent::{ConsultationMode, Intent};
use carefinder_core::types::{DateLabel, Derived, Hit, Locale, Record, RecordDetails, Status};

pub fn no_records(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "no records found",
        Locale::Hi => "कोई रिकॉर्ड नहीं मिला",
    }
}

pub fn status_text(status: Status, locale: Locale) -> &'static str {
    match (status, locale) {
        (Status::Active, Locale::En) => "Active Now",
        (Status::Upcoming, Locale::En) => "Upcoming",
        (Status::Completed, Locale::En) => "Completed",
        (Status::Active, Locale::Hi) => "अभी सक्रिय",
        (Status::Upcoming, Locale::Hi) => "आगामी",
        (Status::Completed, Locale::Hi) => "पूर्ण",
    }
}

pub fn date_text(label: &DateLabel, locale: Locale) -> String {
    match (label, locale) {
        (DateLabel::Today, Locale::En) => "Today".to_string(),
        (DateLabel::Tomorrow, Locale::En) => "Tomorrow".to_string(),
        (DateLabel::Today, Locale::Hi) => "आज".to_string(),
        (DateLabel::Tomorrow, Locale::Hi) => "कल".to_string(),
        (DateLabel::On(date), _) => date.clone(),
    }
}

fn travel_text(derived: &Derived, locale: Locale) -> Option<String> {
    let km = derived.distance_km?;
    let minutes = derived.travel_minutes?;
    Some(match locale {
        Locale::En => format!("{km:.1} km away · ~{minutes} min"),
        Locale::Hi => format!("{km:.1} किमी दूर · ~{minutes} मिनट"),
    })
}

fn details_text(record: &Record, locale: Locale) -> String {
    let hi = locale == Locale::Hi;
    match &record.details {
        RecordDetails::Camp(d) => {
            let participants = if hi { "प्रतिभागी" } else { "participants" };
            format!("👥 {} {participants} · ☎ {} · {}", d.participants, d.contact, d.landmark)
        }
        RecordDetails::Campaign(d) => {
            let registered = if hi { "पंजीकृत" } else { "registered" };
            format!("👥 {} {registered}", d.participants)
        }
        RecordDetails::Provider(d) => {
            let years = if hi { "वर्ष अनुभव" } else { "yrs experience" };
            let mut line = format!("⭐ {:.1} · {} {years} · ₹{} · ☎ {}", d.rating, d.experience_years, d.consultation_fee, d.phone);
            if d.verified {
                line.push_str(" · ✔");
            }
            if !d.available {
                line.push_str(if hi { " · अनुपलब्ध" } else { " · unavailable" });
            }
            line
        }
        RecordDetails::Hospital(d) => {
            let beds = if hi { "बिस्तर उपलब्ध" } else { "beds available" };
            let mut line = format!("⭐ {:.1} · {}/{} {beds} · ☎ {}", d.rating, d.available_beds, d.beds, d.phone);
            if d.emergency {
                line.push_str(if hi { " · 🚑 आपातकालीन" } else { " · 🚑 emergency" });
            }
            line
        }
    }
}

/// Numbered, human-readable listing. Empty input yields the localized
/// "no records found" line.
pub fn text(hits: &[Hit<'_, Record>], locale: Locale) -> String {
    if hits.is_empty() {
        return format!("{}\n", no_records(locale));
    }
    let mut out = String::new();
    for (i, hit) in hits.iter().enumerate() {
        let record = hit.record;
        let _ = write!(out, "{}. {} [{}]", i + 1, record.name, record.category_label);
        if let Some(status) = hit.derived.status {
            let _ = write!(out, " · {}", status_text(status, locale));
        }
        out.push('\n');
        let _ = writeln!(out, "   📍 {}", record.location);
        if let (Some(label), Some(at)) = (&hit.derived.date_label, record.scheduled_at) {
            let _ = writeln!(out, "   🗓  {} {}", date_text(label, locale), at.format("%H:%M"));
        }
        if let Some(travel) = travel_text(&hit.derived, locale) {
            let _ = writeln!(out, "   🚗 {travel}");
        }
        let _ = writeln!(out, "   {}", details_text(record, locale));
        let _ = writeln!(out, "   id={}", record.id);
    }
    out
}

pub fn json(hits: &[Hit<'_, Record>]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(hits)
}

pub fn counts(counts: &[(String, usize)]) -> String {
    let mut out = String::new();
    for (key, count) in counts {
        let _ = writeln!(out, "{key}: {count}");
    }
    out
}

/// One-line confirmation shown after an intent is handed to the sink.
pub fn intent_confirmation(intent: &Intent, locale: Locale) -> String {
    let hi = locale == Locale::Hi;
    match intent {
        Intent::Call { phone } => {
            if hi { format!("📞 {phone} पर कॉल किया जा रहा है") } else { format!("📞 Calling {phone}") }
        }
        Intent::Directions { record_id, coordinates } => format!(
            "🧭 {} {record_id} ({:.4}, {:.4})",
            if hi { "दिशा-निर्देश:" } else { "Directions to" },
            coordinates.latitude,
            coordinates.longitude
        ),
        Intent::Register { record_id } => {
            if hi { format!("✅ {record_id} के लिए पंजीकरण शुरू हुआ") } else { format!("✅ Registration for {record_id} initiated") }
        }
        Intent::BookConsultation { record_id, mode } => {
            let mode = match (mode, hi) {
                (ConsultationMode::InPerson, false) => "In-person",
                (ConsultationMode::Video, false) => "Video",
                (ConsultationMode::Chat, false) => "Chat",
                (ConsultationMode::InPerson, true) => "व्यक्तिगत",
                (ConsultationMode::Video, true) => "वीडियो",
                (ConsultationMode::Chat, true) => "चैट",
            };
            if hi { format!("📅 {record_id} के साथ {mode} परामर्श बुक हुआ") } else { format!("📅 {mode} consultation booked with {record_id}") }
        }
        Intent::Share { name, location, .. } => format!("🔗 {name}, {location}"),
    }
}
