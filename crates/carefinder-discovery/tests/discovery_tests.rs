use approx::assert_relative_eq;
use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;

use carefinder_core::catalog::SampleCatalog;
use carefinder_core::config::EngineSettings;
use carefinder_core::error::Error;
use carefinder_core::traits::RecordSource;
use carefinder_core::types::{
    CampDetails, CampType, CategoryFilter, Coordinates, DateLabel, Locale, QueryCriteria, Record, RecordDetails,
    SortKey, Status,
};
use carefinder_discovery::DiscoveryEngine;
use carefinder_geo::TravelModel;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
}

fn camp(id: &str, name: &str, camp_type: CampType, coordinates: Option<(f64, f64)>, scheduled_at: Option<NaiveDateTime>) -> Record {
    Record {
        id: id.to_string(),
        name: name.to_string(),
        category_label: camp_type.key().to_string(),
        location: format!("{name} grounds"),
        coordinates: coordinates.map(|(latitude, longitude)| Coordinates { latitude, longitude }),
        scheduled_at,
        details: RecordDetails::Camp(CampDetails {
            camp_type,
            landmark: String::new(),
            contact: "+91 0000000000".to_string(),
            participants: 0,
            description: String::new(),
        }),
    }
}

fn reference() -> Coordinates {
    Coordinates::new(28.6139, 77.2090).unwrap()
}

fn ids<R>(hits: &[carefinder_core::types::Hit<'_, R>]) -> Vec<String>
where
    R: carefinder_core::traits::Discoverable,
{
    hits.iter().map(|h| h.record.id().to_string()).collect()
}

fn sample() -> Vec<Record> {
    SampleCatalog::new(Locale::En).records().expect("sample catalog")
}

#[test]
fn two_camp_scenario() {
    let records = vec![
        camp("camp-b", "Camp B", CampType::Vaccination, Some((28.6389, 77.2190)), Some(at(2025, 9, 20, 0, 0))),
        camp("camp-a", "Camp A", CampType::Checkup, Some((28.6189, 77.2050)), Some(at(2025, 9, 15, 0, 0))),
    ];
    let criteria = QueryCriteria::new()
        .with_category(CategoryFilter::parse("all"))
        .sorted_by(SortKey::Distance)
        .near(reference())
        .at(at(2025, 9, 15, 0, 0));

    let hits = DiscoveryEngine::default().query(&records, &criteria).unwrap();
    assert_eq!(ids(&hits), vec!["camp-a", "camp-b"]);
    assert_eq!(hits[0].derived.status, Some(Status::Active));
    assert_eq!(hits[1].derived.status, Some(Status::Upcoming));
    assert_eq!(hits[0].derived.date_label, Some(DateLabel::Today));
    assert_eq!(hits[1].derived.date_label, Some(DateLabel::On("9/20/2025".to_string())));
    assert_relative_eq!(hits[0].derived.distance_km.unwrap(), 0.68, epsilon = 0.01);
    assert_eq!(hits[0].derived.travel_minutes, Some(1));
    assert_eq!(hits[1].derived.travel_minutes, Some(6));
}

#[test]
fn distance_sort_without_reference_fails() {
    let records = sample();
    let criteria = QueryCriteria::new().sorted_by(SortKey::Distance);
    assert_eq!(DiscoveryEngine::default().query(&records, &criteria), Err(Error::MissingReferenceLocation));
}

#[test]
fn invalid_reference_location_fails() {
    let records = sample();
    let criteria = QueryCriteria::new().near(Coordinates { latitude: 95.0, longitude: 0.0 });
    assert_eq!(
        DiscoveryEngine::default().query(&records, &criteria),
        Err(Error::InvalidCoordinate { latitude: 95.0, longitude: 0.0 })
    );
}

#[test]
fn record_with_invalid_coordinates_fails_distance_enrichment() {
    let records = vec![camp("bad", "Bad", CampType::Checkup, Some((12.0, 200.0)), None)];
    let criteria = QueryCriteria::new().near(reference());
    assert!(matches!(
        DiscoveryEngine::default().query(&records, &criteria),
        Err(Error::InvalidCoordinate { .. })
    ));
    // Without a reference point no distance is computed, so the record is returned as is.
    let hits = DiscoveryEngine::default().query(&records, &QueryCriteria::new()).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].derived.distance_km, None);
}

#[test]
fn unsorted_preserves_input_order() {
    let records = sample();
    let hits = DiscoveryEngine::default().query(&records, &QueryCriteria::new()).unwrap();
    let expected: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids(&hits), expected);
    assert!(hits.iter().all(|h| h.derived.status.is_none()));
}

#[test]
fn category_then_text_filter() {
    let records = sample();
    let criteria = QueryCriteria::new().with_category(CategoryFilter::parse("checkup")).with_text("  CAMP ");
    let hits = DiscoveryEngine::default().query(&records, &criteria).unwrap();
    // Free Health Checkup (camp-2) matches only on "Health Checkup", not "camp".
    assert_eq!(ids(&hits), vec!["camp-4", "camp-5"]);
}

#[test]
fn text_matches_location_and_category_label() {
    let records = sample();
    let engine = DiscoveryEngine::default();
    let by_location = engine.query(&records, &QueryCriteria::new().with_text("district hospital")).unwrap();
    assert_eq!(ids(&by_location), vec!["camp-3", "campaign-3", "doctor-2"]);
    let by_label = engine.query(&records, &QueryCriteria::new().with_text("cardio")).unwrap();
    assert_eq!(ids(&by_label), vec!["doctor-3"]);
}

#[test]
fn unknown_category_is_an_empty_result() {
    let records = sample();
    let criteria = QueryCriteria::new().with_category(CategoryFilter::parse("dermatology"));
    let hits = DiscoveryEngine::default().query(&records, &criteria).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn distance_sort_puts_records_without_coordinates_last_in_input_order() {
    let records = sample();
    let criteria = QueryCriteria::new().sorted_by(SortKey::Distance).near(reference());
    let hits = DiscoveryEngine::default().query(&records, &criteria).unwrap();
    let order = ids(&hits);
    assert_eq!(&order[..5], &["camp-1", "camp-4", "camp-5", "camp-2", "camp-3"]);
    let tail: Vec<String> = records.iter().filter(|r| r.coordinates.is_none()).map(|r| r.id.clone()).collect();
    assert_eq!(&order[5..], tail.as_slice());
    assert_eq!(hits[0].derived.distance_km, Some(0.0));
}

#[test]
fn date_sort_puts_unscheduled_last() {
    let records = sample();
    let criteria = QueryCriteria::new().sorted_by(SortKey::Date).at(at(2025, 9, 15, 12, 0));
    let hits = DiscoveryEngine::default().query(&records, &criteria).unwrap();
    let order = ids(&hits);
    // camp-1 and campaign-1 share a date and time; input order breaks the tie.
    assert_eq!(
        &order[..8],
        &["camp-4", "camp-1", "campaign-1", "camp-2", "campaign-2", "camp-3", "campaign-3", "camp-5"]
    );
    assert!(hits[8..].iter().all(|h| h.derived.status.is_none() && h.derived.date_label.is_none()));
    assert_eq!(hits[0].derived.status, Some(Status::Active));
    assert_eq!(hits[1].derived.date_label, Some(DateLabel::Tomorrow));
}

#[test]
fn date_sort_works_without_now() {
    let records = sample();
    let hits = DiscoveryEngine::default().query(&records, &QueryCriteria::new().sorted_by(SortKey::Date)).unwrap();
    assert_eq!(hits[0].record.id, "camp-4");
    assert!(hits.iter().all(|h| h.derived.status.is_none()));
}

#[test]
fn travel_speed_comes_from_the_engine() {
    let records = vec![camp("far", "Far", CampType::Checkup, Some((28.7039, 77.2090)), None)];
    let criteria = QueryCriteria::new().near(reference());
    let slow = DiscoveryEngine::default().query(&records, &criteria).unwrap();
    let fast = DiscoveryEngine::new(TravelModel::new(60.0).unwrap()).query(&records, &criteria).unwrap();
    let slow_minutes = slow[0].derived.travel_minutes.unwrap();
    let fast_minutes = fast[0].derived.travel_minutes.unwrap();
    assert_eq!(slow_minutes, 20);
    assert_eq!(fast_minutes, 10);
}

#[test]
fn engine_takes_speed_from_settings() {
    let settings = EngineSettings { average_speed_kmh: 45.0 };
    let engine = DiscoveryEngine::from_settings(&settings).unwrap();
    assert_relative_eq!(engine.travel_model().average_speed_kmh(), 45.0);
    assert_relative_eq!(DiscoveryEngine::default().travel_model().average_speed_kmh(), 30.0);
    assert_eq!(
        DiscoveryEngine::from_settings(&EngineSettings { average_speed_kmh: -1.0 }),
        Err(Error::InvalidConfig("average speed must be a positive number, got -1".to_string()))
    );
}

#[test]
fn unrepresentable_travel_time_is_an_error() {
    let records = vec![camp("far", "Far", CampType::Checkup, Some((-28.6139, -102.7910)), None)];
    let engine = DiscoveryEngine::new(TravelModel::new(0.0001).unwrap());
    let err = engine.query(&records, &QueryCriteria::new().near(reference())).unwrap_err();
    assert!(matches!(err, Error::InvalidDistance(_)));
}

#[test]
fn hindi_locale_formats_absolute_dates() {
    let records = SampleCatalog::new(Locale::Hi).records().unwrap();
    let criteria = QueryCriteria::new()
        .with_text("टीकाकरण")
        .at(at(2025, 9, 15, 9, 0))
        .in_locale(Locale::Hi);
    let hits = DiscoveryEngine::default().query(&records, &criteria).unwrap();
    assert_eq!(ids(&hits), vec!["camp-3", "campaign-3"]);
    assert_eq!(hits[0].derived.date_label, Some(DateLabel::On("20/9/2025".to_string())));
}

#[test]
fn category_counts_follow_text_query() {
    let records = sample();
    let engine = DiscoveryEngine::default();
    let counts = engine.category_counts(&records, "");
    assert_eq!(counts[0], ("blood-donation".to_string(), 2));
    assert_eq!(counts[1], ("checkup".to_string(), 4));
    assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), records.len());

    let health = engine.category_counts(&records, "health");
    assert!(health.iter().all(|(_, n)| *n > 0));
    assert!(engine.category_counts(&records, "no such place").is_empty());
}

#[test]
fn repeated_queries_serialize_identically() {
    let records = sample();
    let criteria = QueryCriteria::new()
        .with_text("health")
        .sorted_by(SortKey::Distance)
        .near(reference())
        .at(at(2025, 9, 16, 7, 0));
    let engine = DiscoveryEngine::default();
    let first = serde_json::to_string(&engine.query(&records, &criteria).unwrap()).unwrap();
    let second = serde_json::to_string(&engine.query(&records, &criteria).unwrap()).unwrap();
    assert_eq!(first, second);
}

fn arb_camp_type() -> impl Strategy<Value = CampType> {
    prop_oneof![Just(CampType::BloodDonation), Just(CampType::Checkup), Just(CampType::Vaccination)]
}

fn arb_records() -> impl Strategy<Value = Vec<Record>> {
    let coordinates = proptest::option::of((-90.0f64..=90.0, -180.0f64..=180.0));
    let scheduled = proptest::option::of((0i64..60, 0u32..24).prop_map(|(day, hour)| {
        at(2025, 9, 1, 0, 0) + chrono::Duration::days(day) + chrono::Duration::hours(i64::from(hour))
    }));
    prop::collection::vec(("[a-z ]{1,10}", arb_camp_type(), coordinates, scheduled), 0..24).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, camp_type, coordinates, scheduled_at))| {
                camp(&format!("r{i}"), &name, camp_type, coordinates, scheduled_at)
            })
            .collect()
    })
}

fn arb_criteria() -> impl Strategy<Value = QueryCriteria> {
    (
        "[a-z ]{0,3}",
        prop_oneof![Just("all"), Just("checkup"), Just("vaccination"), Just("unknown")],
        prop_oneof![Just(SortKey::Distance), Just(SortKey::Date), Just(SortKey::Unsorted)],
        (-90.0f64..=90.0, -180.0f64..=180.0),
        0i64..60,
    )
        .prop_map(|(text, category, sort_key, (latitude, longitude), day)| {
            QueryCriteria::new()
                .with_text(text)
                .with_category(CategoryFilter::parse(category))
                .sorted_by(sort_key)
                .near(Coordinates { latitude, longitude })
                .at(at(2025, 9, 1, 12, 0) + chrono::Duration::days(day))
        })
}

proptest! {
    #[test]
    fn results_never_exceed_input(records in arb_records(), criteria in arb_criteria()) {
        let hits = DiscoveryEngine::default().query(&records, &criteria).unwrap();
        prop_assert!(hits.len() <= records.len());
    }

    #[test]
    fn identical_inputs_give_identical_output(records in arb_records(), criteria in arb_criteria()) {
        let engine = DiscoveryEngine::default();
        let a = serde_json::to_string(&engine.query(&records, &criteria).unwrap()).unwrap();
        let b = serde_json::to_string(&engine.query(&records, &criteria).unwrap()).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn distance_sorted_results_are_ascending(records in arb_records(), criteria in arb_criteria()) {
        let criteria = criteria.sorted_by(SortKey::Distance);
        let hits = DiscoveryEngine::default().query(&records, &criteria).unwrap();
        for pair in hits.windows(2) {
            match (pair[0].derived.distance_km, pair[1].derived.distance_km) {
                (Some(a), Some(b)) => prop_assert!(a <= b),
                (None, Some(_)) => prop_assert!(false, "record without coordinates sorted first"),
                _ => {}
            }
        }
    }

    #[test]
    fn date_sorted_results_are_ascending(records in arb_records(), criteria in arb_criteria()) {
        let criteria = criteria.sorted_by(SortKey::Date);
        let hits = DiscoveryEngine::default().query(&records, &criteria).unwrap();
        for pair in hits.windows(2) {
            match (pair[0].record.scheduled_at, pair[1].record.scheduled_at) {
                (Some(a), Some(b)) => prop_assert!(a <= b),
                (None, Some(_)) => prop_assert!(false, "unscheduled record sorted first"),
                _ => {}
            }
        }
    }

    #[test]
    fn unsorted_results_keep_input_order(records in arb_records(), criteria in arb_criteria()) {
        let criteria = criteria.sorted_by(SortKey::Unsorted);
        let hits = DiscoveryEngine::default().query(&records, &criteria).unwrap();
        let positions: Vec<usize> = hits
            .iter()
            .map(|h| records.iter().position(|r| r.id == h.record.id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
