// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Chart-ready projections of [`SelectionState`] over a [`Dataset`].
//!
//! Views are rebuilt from scratch after every state change and never cached
//! between changes, so they cannot drift from the dataset or the filter.

use serde::Serialize;
use std::sync::Arc;

use crate::i18n::{TextId, text, translate};
use crate::{Dataset, Locale, ProvinceFilter, SelectionState, UniversityRecord, province_label};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvinceOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl ProvinceOption {
    pub fn filter(&self) -> ProvinceFilter {
        ProvinceFilter::parse(&self.value)
    }
}

/// Filtered list a frame is drawn from. Bar `i` is `records[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ViewSnapshot {
    pub generation: u64,
    pub province: String,
    pub records: Arc<[UniversityRecord]>,
}

impl ViewSnapshot {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&UniversityRecord> {
        self.records.get(index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarSpec {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarChartSpec {
    pub title: String,
    pub series_label: String,
    pub bars: Vec<BarSpec>,
}

impl BarChartSpec {
    pub fn max_value(&self) -> u64 {
        self.bars.iter().map(|bar| bar.value).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: u32,
}

impl PieSlice {
    /// Percentage of `total`, zero when the pie is empty.
    pub fn share(&self, total: u64) -> f64 {
        if total == 0 {
            0.0
        } else {
            f64::from(self.value) * 100.0 / total as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieChartSpec {
    pub title: String,
    pub slices: [PieSlice; 3],
}

impl PieChartSpec {
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|slice| u64::from(slice.value)).sum()
    }

    pub fn values(&self) -> [u32; 3] {
        [
            self.slices[0].value,
            self.slices[1].value,
            self.slices[2].value,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub locale: Locale,
    pub title: String,
    pub subtitle: String,
    pub controls_title: String,
    pub province_label: String,
    pub options: Vec<ProvinceOption>,
    pub bar_chart: BarChartSpec,
    pub instruction: String,
    pub pie_chart: Option<PieChartSpec>,
    pub footer: String,
    pub snapshot: ViewSnapshot,
}

impl DashboardView {
    pub fn selected_option_index(&self) -> Option<usize> {
        self.options.iter().position(|option| option.selected)
    }
}

pub fn build_view(dataset: &Dataset, state: &SelectionState) -> DashboardView {
    let locale = state.locale;
    let records = state
        .filtered_list(dataset)
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();
    let snapshot = ViewSnapshot {
        generation: state.generation(),
        province: state.province.as_str().to_owned(),
        records: records.into(),
    };

    DashboardView {
        locale,
        title: text(locale, TextId::DashboardTitle).to_owned(),
        subtitle: text(locale, TextId::DashboardSubtitle).to_owned(),
        controls_title: text(locale, TextId::ControlsTitle).to_owned(),
        province_label: text(locale, TextId::ProvinceSelectLabel).to_owned(),
        options: province_options(dataset, state),
        bar_chart: bar_chart_spec(&snapshot, state),
        instruction: text(locale, TextId::ClickForDetails).to_owned(),
        pie_chart: state
            .drill_down
            .as_ref()
            .map(|record| pie_chart_spec(record, locale)),
        footer: text(locale, TextId::FooterNote).to_owned(),
        snapshot,
    }
}

fn province_options(dataset: &Dataset, state: &SelectionState) -> Vec<ProvinceOption> {
    state
        .province_options(dataset)
        .into_iter()
        .map(|filter| ProvinceOption {
            value: filter.as_str().to_owned(),
            label: province_label(state.locale, &filter),
            selected: filter == state.province,
        })
        .collect()
}

pub fn bar_chart_spec(snapshot: &ViewSnapshot, state: &SelectionState) -> BarChartSpec {
    let province = state.province_label();
    BarChartSpec {
        title: translate(
            state.locale,
            TextId::BarChartTitle,
            &[("province", &province)],
        ),
        series_label: text(state.locale, TextId::FullTimeTotal).to_owned(),
        bars: snapshot
            .records
            .iter()
            .map(|record| BarSpec {
                label: record.name.clone(),
                value: record.full_time_total(),
            })
            .collect(),
    }
}

pub fn pie_chart_spec(record: &UniversityRecord, locale: Locale) -> PieChartSpec {
    let slice = |id: TextId, value: u32| PieSlice {
        label: text(locale, id).to_owned(),
        value,
    };
    let [ft_undergrad, ft_grad, pt_undergrad] = record.breakdown();
    PieChartSpec {
        title: translate(
            locale,
            TextId::PieChartTitle,
            &[("university", &record.name)],
        ),
        slices: [
            slice(TextId::FullTimeUndergrad, ft_undergrad),
            slice(TextId::FullTimeGrad, ft_grad),
            slice(TextId::PartTimeUndergrad, pt_undergrad),
        ],
    }
}
