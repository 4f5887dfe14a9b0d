// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

/// Sentinel filter value shown before the distinct provinces.
pub const ALL_PROVINCES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UniversityRecord {
    pub name: String,
    pub province: String,
    pub ft_undergrad: u32,
    pub ft_grad: u32,
    pub pt_undergrad: u32,
}

impl UniversityRecord {
    pub fn new(
        name: impl Into<String>,
        province: impl Into<String>,
        ft_undergrad: u32,
        ft_grad: u32,
        pt_undergrad: u32,
    ) -> Self {
        Self {
            name: name.into(),
            province: province.into(),
            ft_undergrad,
            ft_grad,
            pt_undergrad,
        }
    }

    /// Bar value: full-time undergraduate plus full-time graduate.
    pub fn full_time_total(&self) -> u64 {
        u64::from(self.ft_undergrad) + u64::from(self.ft_grad)
    }

    /// Pie slices in display order.
    pub fn breakdown(&self) -> [u32; 3] {
        [self.ft_undergrad, self.ft_grad, self.pt_undergrad]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ProvinceFilter {
    #[default]
    All,
    Province(String),
}

impl ProvinceFilter {
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_PROVINCES,
            Self::Province(name) => name,
        }
    }

    /// Any value other than the sentinel is taken as a province name as-is.
    pub fn parse(value: &str) -> Self {
        if value == ALL_PROVINCES {
            Self::All
        } else {
            Self::Province(value.to_owned())
        }
    }

    pub fn matches(&self, record: &UniversityRecord) -> bool {
        match self {
            Self::All => true,
            Self::Province(name) => record.province == *name,
        }
    }
}

impl From<&str> for ProvinceFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    pub const ALL: [Self; 2] = [Self::En, Self::Fr];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }

    /// Name of the language in that language, as shown on the switcher.
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Fr => "Français",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::En => Self::Fr,
            Self::Fr => Self::En,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Locale, ProvinceFilter, UniversityRecord};

    #[test]
    fn full_time_total_does_not_overflow_u32() {
        let record = UniversityRecord::new("Big", "ON", u32::MAX, u32::MAX, 0);
        assert_eq!(record.full_time_total(), u64::from(u32::MAX) * 2);
    }

    #[test]
    fn province_filter_parse_round_trips_sentinel_and_names() {
        assert_eq!(ProvinceFilter::parse("All"), ProvinceFilter::All);
        assert_eq!(ProvinceFilter::All.as_str(), "All");

        let quebec = ProvinceFilter::parse("Quebec");
        assert_eq!(quebec, ProvinceFilter::Province("Quebec".to_owned()));
        assert_eq!(quebec.as_str(), "Quebec");
    }

    #[test]
    fn province_filter_accepts_unknown_values_verbatim() {
        let filter = ProvinceFilter::parse("Atlantis");
        assert_eq!(filter.as_str(), "Atlantis");
        let record = UniversityRecord::new("McGill University", "Quebec", 1, 1, 1);
        assert!(!filter.matches(&record));
        assert!(ProvinceFilter::All.matches(&record));
    }

    #[test]
    fn locale_parse_is_case_insensitive_and_rejects_unknown_tags() {
        assert_eq!(Locale::parse("EN"), Some(Locale::En));
        assert_eq!(Locale::parse(" fr "), Some(Locale::Fr));
        assert_eq!(Locale::parse("de"), None);
    }

    #[test]
    fn locale_toggle_alternates() {
        assert_eq!(Locale::En.toggled(), Locale::Fr);
        assert_eq!(Locale::Fr.toggled(), Locale::En);
        assert_eq!(Locale::ALL.len(), 2);
    }
}
