//! Record sources: the bundled sample catalog and JSON files on disk.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDateTime;

use crate::error::{Error, Result};
use crate::traits::RecordSource;
use crate::types::{
    CampDetails, CampType, CampaignDetails, Coordinates, HospitalDetails, Locale, Ownership, ProviderDetails,
    Record, RecordDetails, Specialty,
};

/// Enforce collection invariants: unique ids and in-range coordinates.
pub fn validate_collection(records: &[Record]) -> Result<()> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.id.as_str()) {
            return Err(Error::DuplicateId(record.id.clone()));
        }
        if let Some(coordinates) = &record.coordinates {
            coordinates.validate()?;
        }
    }
    Ok(())
}

/// Loads every `*.json` file under `dir` (recursively, sorted by path); each
/// file holds a JSON array of records.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    dir: PathBuf,
}

impl JsonCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn list_json_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(&self.dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("json"))
            .map(|e| e.path().to_path_buf())
            .collect();
        files.sort();
        files
    }
}

impl RecordSource for JsonCatalog {
    fn records(&self) -> anyhow::Result<Vec<Record>> {
        if !self.dir.is_dir() {
            anyhow::bail!("catalog directory {} does not exist", self.dir.display());
        }
        let files = self.list_json_files();
        if files.is_empty() {
            tracing::warn!(dir = %self.dir.display(), "no .json files found in catalog directory");
        }
        let mut records = Vec::new();
        for path in &files {
            let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            let mut batch: Vec<Record> =
                serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
            tracing::debug!(file = %path.display(), count = batch.len(), "loaded catalog file");
            records.append(&mut batch);
        }
        validate_collection(&records)?;
        tracing::info!(files = files.len(), records = records.len(), "loaded json catalog");
        Ok(records)
    }
}

/// The portal's built-in mock data, resolved for one locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleCatalog {
    locale: Locale,
}

impl SampleCatalog {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl RecordSource for SampleCatalog {
    fn records(&self) -> anyhow::Result<Vec<Record>> {
        let l = self.locale;
        let mut records = camps(l)?;
        records.extend(campaigns(l)?);
        records.extend(providers(l));
        records.extend(hospitals(l));
        validate_collection(&records)?;
        tracing::info!(locale = l.code(), records = records.len(), "loaded sample catalog");
        Ok(records)
    }
}

fn pick(locale: Locale, en: &str, hi: &str) -> String {
    match locale {
        Locale::En => en.to_string(),
        Locale::Hi => hi.to_string(),
    }
}

fn at(date: &str, time: &str) -> anyhow::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %I:%M %p")
        .with_context(|| format!("bad sample schedule '{date} {time}'"))
}

fn camp_type_label(camp_type: CampType, l: Locale) -> String {
    match camp_type {
        CampType::BloodDonation => pick(l, "Blood Donation", "रक्तदान"),
        CampType::Checkup => pick(l, "Health Checkup", "स्वास्थ्य जांच"),
        CampType::Vaccination => pick(l, "Vaccination", "टीकाकरण"),
    }
}

fn specialty_label(specialty: Specialty, l: Locale) -> String {
    match specialty {
        Specialty::General => pick(l, "General Medicine", "सामान्य चिकित्सा"),
        Specialty::Cardiology => pick(l, "Cardiology", "हृदय रोग"),
        Specialty::Pediatrics => pick(l, "Pediatrics", "बाल रोग"),
        Specialty::Gynecology => pick(l, "Gynecology", "स्त्री रोग"),
        Specialty::Orthopedics => pick(l, "Orthopedics", "हड्डी रोग"),
    }
}

fn ownership_label(ownership: Ownership, l: Locale) -> String {
    match ownership {
        Ownership::Government => pick(l, "Government Hospital", "सरकारी अस्पताल"),
        Ownership::Private => pick(l, "Private Hospital", "निजी अस्पताल"),
    }
}

struct CampSeed {
    id: u32,
    name: (&'static str, &'static str),
    camp_type: CampType,
    address: (&'static str, &'static str),
    landmark: (&'static str, &'static str),
    coordinates: (f64, f64),
    date: &'static str,
    time: &'static str,
    contact: &'static str,
    participants: u32,
    description: (&'static str, &'static str),
}

const CAMP_SEEDS: [CampSeed; 5] = [
    CampSeed {
        id: 1,
        name: ("Blood Donation Drive", "रक्तदान अभियान"),
        camp_type: CampType::BloodDonation,
        address: ("Community Center, Main Road", "सामुदायिक केंद्र, मुख्य सड़क"),
        landmark: ("Near Post Office", "डाकघर के पास"),
        coordinates: (28.6139, 77.2090),
        date: "2025-09-16",
        time: "09:00 AM",
        contact: "+91 9876543210",
        participants: 45,
        description: ("Help save lives by donating blood", "रक्तदान करके जीवन बचाने में सहायता करें"),
    },
    CampSeed {
        id: 2,
        name: ("Free Health Checkup", "मुफ्त स्वास्थ्य जांच"),
        camp_type: CampType::Checkup,
        address: ("Village Health Center, Block-A", "ग्राम स्वास्थ्य केंद्र, ब्लॉक-ए"),
        landmark: ("Opposite Primary School", "प्राथमिक विद्यालय के सामने"),
        coordinates: (28.6289, 77.2145),
        date: "2025-09-18",
        time: "10:00 AM",
        contact: "+91 9876543211",
        participants: 23,
        description: ("Comprehensive health screening for all ages", "सभी उम्र के लिए व्यापक स्वास्थ्य जांच"),
    },
    CampSeed {
        id: 3,
        name: ("COVID Vaccination", "कोविड टीकाकरण"),
        camp_type: CampType::Vaccination,
        address: ("District Hospital, Emergency Wing", "जिला अस्पताल, आपातकालीन विंग"),
        landmark: ("Main Hospital Complex", "मुख्य अस्पताल परिसर"),
        coordinates: (28.6389, 77.2190),
        date: "2025-09-20",
        time: "08:30 AM",
        contact: "+91 9876543212",
        participants: 67,
        description: ("Free COVID vaccination for eligible candidates", "योग्य उम्मीदवारों के लिए मुफ्त कोविड टीकाकरण"),
    },
    CampSeed {
        id: 4,
        name: ("Eye Checkup Camp", "आंख जांच शिविर"),
        camp_type: CampType::Checkup,
        address: ("Community Hall, Village Square", "सामुदायिक हॉल, गांव चौक"),
        landmark: ("Near Temple", "मंदिर के पास"),
        coordinates: (28.6189, 77.2050),
        date: "2025-09-15",
        time: "11:00 AM",
        contact: "+91 9876543213",
        participants: 32,
        description: ("Free eye examination and glasses distribution", "मुफ्त आंख की जांच और चश्मा वितरण"),
    },
    CampSeed {
        id: 5,
        name: ("Maternal Health Camp", "मातृ स्वास्थ्य शिविर"),
        camp_type: CampType::Checkup,
        address: ("Women's Health Center", "महिला स्वास्थ्य केंद्र"),
        landmark: ("Behind Market Area", "बाजार क्षेत्र के पीछे"),
        coordinates: (28.6089, 77.1990),
        date: "2025-09-22",
        time: "09:30 AM",
        contact: "+91 9876543214",
        participants: 18,
        description: ("Prenatal and postnatal care for mothers", "माताओं के लिए प्रसवपूर्व और प्रसवोत्तर देखभाल"),
    },
];

fn camps(l: Locale) -> anyhow::Result<Vec<Record>> {
    CAMP_SEEDS
        .iter()
        .map(|seed| -> anyhow::Result<Record> {
            let coordinates = Coordinates::new(seed.coordinates.0, seed.coordinates.1)?;
            Ok(Record {
                id: format!("camp-{}", seed.id),
                name: pick(l, seed.name.0, seed.name.1),
                category_label: camp_type_label(seed.camp_type, l),
                location: pick(l, seed.address.0, seed.address.1),
                coordinates: Some(coordinates),
                scheduled_at: Some(at(seed.date, seed.time)?),
                details: RecordDetails::Camp(CampDetails {
                    camp_type: seed.camp_type,
                    landmark: pick(l, seed.landmark.0, seed.landmark.1),
                    contact: seed.contact.to_string(),
                    participants: seed.participants,
                    description: pick(l, seed.description.0, seed.description.1),
                }),
            })
        })
        .collect()
}

fn campaigns(l: Locale) -> anyhow::Result<Vec<Record>> {
    let seeds = [
        (1, ("Blood Donation Drive", "रक्तदान अभियान"), "2025-09-16", "09:00 AM", ("Community Center", "सामुदायिक केंद्र"), CampType::BloodDonation, 45),
        (2, ("Free Health Checkup", "मुफ्त स्वास्थ्य जांच"), "2025-09-18", "10:00 AM", ("Village Health Center", "ग्राम स्वास्थ्य केंद्र"), CampType::Checkup, 23),
        (3, ("COVID Vaccination", "कोविड टीकाकरण"), "2025-09-20", "08:30 AM", ("District Hospital", "जिला अस्पताल"), CampType::Vaccination, 67),
    ];
    seeds
        .into_iter()
        .map(|(id, title, date, time, location, campaign_type, participants)| -> anyhow::Result<Record> {
            Ok(Record {
                id: format!("campaign-{id}"),
                name: pick(l, title.0, title.1),
                category_label: camp_type_label(campaign_type, l),
                location: pick(l, location.0, location.1),
                coordinates: None,
                scheduled_at: Some(at(date, time)?),
                details: RecordDetails::Campaign(CampaignDetails { campaign_type, participants }),
            })
        })
        .collect()
}

fn providers(l: Locale) -> Vec<Record> {
    let seeds = [
        (1, ("Dr. Rajesh Kumar", "डॉ. राजेश कुमार"), Specialty::General, 15, 4.8, ("Village Health Center", "ग्राम स्वास्थ्य केंद्र"), "+91 9876543210", true, 200),
        (2, ("Dr. Priya Sharma", "डॉ. प्रिया शर्मा"), Specialty::Pediatrics, 12, 4.9, ("District Hospital", "जिला अस्पताल"), "+91 9876543211", false, 300),
        (3, ("Dr. Amit Patel", "डॉ. अमित पटेल"), Specialty::Cardiology, 20, 4.7, ("Regional Medical Center", "क्षेत्रीय चिकित्सा केंद्र"), "+91 9876543212", true, 500),
        (4, ("Dr. Sunita Singh", "डॉ. सुनीता सिंह"), Specialty::Gynecology, 18, 4.6, ("Women's Health Clinic", "महिला स्वास्थ्य क्लिनिक"), "+91 9876543213", true, 400),
    ];
    seeds
        .into_iter()
        .map(|(id, name, specialty, experience_years, rating, location, phone, available, consultation_fee)| Record {
            id: format!("doctor-{id}"),
            name: pick(l, name.0, name.1),
            category_label: specialty_label(specialty, l),
            location: pick(l, location.0, location.1),
            coordinates: None,
            scheduled_at: None,
            details: RecordDetails::Provider(ProviderDetails {
                specialty,
                experience_years,
                rating,
                consultation_fee,
                verified: true,
                available,
                phone: phone.to_string(),
            }),
        })
        .collect()
}

fn hospitals(l: Locale) -> Vec<Record> {
    let seeds: [(u32, (&str, &str), Ownership, (&str, &str), &str, bool, u32, u32, f32, &[&str]); 3] = [
        (1, ("District General Hospital", "जिला सामान्य अस्पताल"), Ownership::Government, ("Main Road, District Center", "मुख्य सड़क, जिला केंद्र"), "+91 1234567890", true, 150, 23, 4.2, &["Emergency", "Surgery", "ICU", "Maternity"]),
        (2, ("Rural Health Center", "ग्रामीण स्वास्थ्य केंद्र"), Ownership::Government, ("Village Square", "ग्राम चौक"), "+91 1234567891", false, 20, 8, 4.0, &["General Medicine", "Pediatrics", "Pharmacy"]),
        (3, ("Sunrise Medical Center", "सनराइज मेडिकल सेंटर"), Ownership::Private, ("Medical Complex, City", "मेडिकल कॉम्प्लेक्स, शहर"), "+91 1234567892", true, 80, 12, 4.5, &["Cardiology", "Orthopedics", "Radiology", "Lab"]),
    ];
    seeds
        .into_iter()
        .map(|(id, name, ownership, location, phone, emergency, beds, available_beds, rating, services)| Record {
            id: format!("hospital-{id}"),
            name: pick(l, name.0, name.1),
            category_label: ownership_label(ownership, l),
            location: pick(l, location.0, location.1),
            coordinates: None,
            scheduled_at: None,
            details: RecordDetails::Hospital(HospitalDetails {
                ownership,
                beds,
                available_beds,
                rating,
                emergency,
                services: services.iter().map(|s| (*s).to_string()).collect(),
                phone: phone.to_string(),
            }),
        })
        .collect()
}
