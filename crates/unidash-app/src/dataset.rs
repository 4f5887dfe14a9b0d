// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::{ProvinceFilter, UniversityRecord};

// (name, province, ft_undergrad, ft_grad, pt_undergrad); counts are synthetic.
const EMBEDDED_RECORDS: [(&str, &str, u32, u32, u32); 20] = [
    ("University of Toronto", "Ontario", 64_310, 20_880, 7_420),
    ("York University", "Ontario", 42_150, 6_030, 8_960),
    ("University of Ottawa", "Ontario", 33_740, 6_910, 4_380),
    ("McMaster University", "Ontario", 29_860, 5_270, 3_110),
    ("Queen's University", "Ontario", 24_390, 4_960, 1_870),
    ("McGill University", "Quebec", 27_540, 10_120, 3_640),
    ("Université de Montréal", "Quebec", 31_260, 11_480, 9_870),
    ("Université Laval", "Quebec", 25_930, 9_210, 8_420),
    ("Concordia University", "Quebec", 30_470, 7_350, 9_150),
    ("University of British Columbia", "British Columbia", 49_870, 10_640, 5_930),
    ("Simon Fraser University", "British Columbia", 26_720, 5_180, 4_760),
    ("University of Victoria", "British Columbia", 18_460, 3_420, 2_310),
    ("University of Alberta", "Alberta", 33_520, 7_890, 2_940),
    ("University of Calgary", "Alberta", 28_140, 6_470, 2_580),
    ("Dalhousie University", "Nova Scotia", 15_230, 4_120, 1_760),
    ("Saint Mary's University", "Nova Scotia", 5_940, 890, 1_020),
    ("University of Manitoba", "Manitoba", 24_310, 3_960, 3_470),
    ("University of Saskatchewan", "Saskatchewan", 20_180, 3_850, 2_060),
    ("University of New Brunswick", "New Brunswick", 7_620, 1_540, 1_180),
    ("Université de Moncton", "New Brunswick", 3_870, 560, 740),
];

/// Immutable list of university records shared between the controller and
/// every rendered snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    records: Arc<[UniversityRecord]>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self::embedded()
    }
}

impl Dataset {
    pub fn embedded() -> Self {
        let records = EMBEDDED_RECORDS
            .iter()
            .map(|(name, province, ft_undergrad, ft_grad, pt_undergrad)| {
                UniversityRecord::new(*name, *province, *ft_undergrad, *ft_grad, *pt_undergrad)
            })
            .collect::<Vec<_>>();
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<UniversityRecord>) -> Self {
        warn_on_duplicate_names(&records);
        Self {
            records: records.into(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let records: Vec<UniversityRecord> =
            serde_json::from_str(raw).context("decode dataset JSON array of university records")?;
        Ok(Self::from_records(records))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read dataset file {}", path.display()))?;
        let dataset = Self::from_json(&raw)
            .with_context(|| format!("parse dataset file {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            records = dataset.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    pub fn records(&self) -> &[UniversityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn province_options(&self) -> Vec<ProvinceFilter> {
        compute_province_options(&self.records)
    }

    pub fn filtered(&self, filter: &ProvinceFilter) -> Vec<&UniversityRecord> {
        compute_filtered_list(&self.records, filter)
    }
}

/// `All` followed by each distinct province in the order it first appears.
pub fn compute_province_options(records: &[UniversityRecord]) -> Vec<ProvinceFilter> {
    let mut seen = HashSet::new();
    let mut options = vec![ProvinceFilter::All];
    for record in records {
        if seen.insert(record.province.as_str()) {
            options.push(ProvinceFilter::Province(record.province.clone()));
        }
    }
    options
}

pub fn compute_filtered_list<'a>(
    records: &'a [UniversityRecord],
    filter: &ProvinceFilter,
) -> Vec<&'a UniversityRecord> {
    records
        .iter()
        .filter(|record| filter.matches(record))
        .collect()
}

fn warn_on_duplicate_names(records: &[UniversityRecord]) {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert((record.province.as_str(), record.name.as_str())) {
            tracing::warn!(
                province = %record.province,
                name = %record.name,
                "duplicate university name within province"
            );
        }
    }
}
