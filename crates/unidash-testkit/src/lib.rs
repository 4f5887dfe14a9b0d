// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::PathBuf;
use unidash_app::{Dataset, UniversityRecord};

const PROVINCES: [&str; 10] = [
    "Ontario",
    "Quebec",
    "British Columbia",
    "Alberta",
    "Manitoba",
    "Saskatchewan",
    "Nova Scotia",
    "New Brunswick",
    "Newfoundland and Labrador",
    "Prince Edward Island",
];

const NAME_PATTERNS: [&str; 8] = [
    "University of {city}",
    "{city} University",
    "{city} Polytechnic",
    "{adjective} University",
    "{adjective} College of {city}",
    "Université de {city}",
    "{city} Institute of Technology",
    "{adjective} {city} University",
];

const NAME_ADJECTIVES: [&str; 12] = [
    "Northern",
    "Royal",
    "Western",
    "Eastern",
    "Lakehead",
    "Coastal",
    "Prairie",
    "Highland",
    "Maple",
    "Laurentian",
    "Harbour",
    "Boreal",
];

const DEFAULT_CITIES: [&str; 3] = ["Riverside", "Northfield", "Lakeview"];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator of synthetic enrolment records. Equal seeds produce
/// equal sequences.
#[derive(Debug, Clone)]
pub struct EnrolmentFaker {
    rng: DeterministicRng,
}

impl EnrolmentFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn province(&mut self) -> &'static str {
        self.pick(&PROVINCES)
    }

    pub fn university_name(&mut self, province: &str) -> String {
        let city = self.pick(cities_for(province));
        let adjective = self.pick(&NAME_ADJECTIVES);
        self.pick(&NAME_PATTERNS)
            .replace("{city}", city)
            .replace("{adjective}", adjective)
    }

    /// Full-time graduate counts stay below undergraduate counts, as in the
    /// embedded table.
    pub fn record(&mut self, province: &str) -> UniversityRecord {
        let ft_undergrad = self.int_range_u32(1_500, 65_000);
        let ft_grad = self.int_range_u32(ft_undergrad / 20, ft_undergrad / 3);
        let pt_undergrad = self.int_range_u32(ft_undergrad / 25, ft_undergrad / 4);
        UniversityRecord::new(
            self.university_name(province),
            province,
            ft_undergrad,
            ft_grad,
            pt_undergrad,
        )
    }

    /// `count` records with random provinces; names are unique within a
    /// province.
    pub fn records(&mut self, count: usize) -> Vec<UniversityRecord> {
        let mut used = HashSet::new();
        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            let province = self.province();
            let mut record = self.record(province);
            let base = record.name.clone();
            let mut campus = 2;
            while !used.insert((record.province.clone(), record.name.clone())) {
                record.name = format!("{base} (campus {campus})");
                campus += 1;
            }
            records.push(record);
        }
        records
    }

    pub fn dataset(&mut self, count: usize) -> Dataset {
        Dataset::from_records(self.records(count))
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range_u32(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (self.rng.next_u64() % span) as u32
    }
}

/// Two Ontario records then one Quebec record.
pub fn two_province_dataset() -> Dataset {
    Dataset::from_records(vec![
        UniversityRecord::new("University of Waterloo", "ON", 36_420, 6_180, 1_930),
        UniversityRecord::new("University of Guelph", "ON", 22_760, 2_410, 1_240),
        UniversityRecord::new("Université de Sherbrooke", "QC", 14_380, 5_720, 6_010),
    ])
}

pub fn five_record_dataset() -> Dataset {
    Dataset::from_records(vec![
        UniversityRecord::new("University of Regina", "SK", 13_120, 2_060, 1_880),
        UniversityRecord::new("University of Winnipeg", "MB", 8_940, 410, 1_520),
        UniversityRecord::new("Thompson Rivers University", "BC", 9_870, 610, 2_330),
        UniversityRecord::new("University of Lethbridge", "AB", 7_640, 720, 690),
        UniversityRecord::new("Mount Allison University", "NB", 2_210, 40, 110),
    ])
}

pub fn empty_dataset() -> Dataset {
    Dataset::from_records(Vec::new())
}

/// Writes `records` as a dataset JSON file inside a fresh temp dir.
pub fn write_dataset_json(records: &[UniversityRecord]) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("universities.json");
    let raw = serde_json::to_string_pretty(records).context("encode dataset")?;
    std::fs::write(&path, raw).with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}

pub fn provinces() -> &'static [&'static str] {
    &PROVINCES
}

fn cities_for(province: &str) -> &'static [&'static str] {
    match province {
        "Ontario" => &["Toronto", "Ottawa", "Hamilton", "Kingston", "Sudbury"],
        "Quebec" => &["Montréal", "Québec", "Sherbrooke", "Trois-Rivières"],
        "British Columbia" => &["Vancouver", "Victoria", "Kelowna", "Kamloops"],
        "Alberta" => &["Edmonton", "Calgary", "Lethbridge", "Red Deer"],
        "Manitoba" => &["Winnipeg", "Brandon"],
        "Saskatchewan" => &["Saskatoon", "Regina"],
        "Nova Scotia" => &["Halifax", "Wolfville", "Antigonish"],
        "New Brunswick" => &["Fredericton", "Moncton", "Saint John"],
        "Newfoundland and Labrador" => &["St. John's", "Corner Brook"],
        "Prince Edward Island" => &["Charlottetown", "Summerside"],
        _ => &DEFAULT_CITIES,
    }
}
