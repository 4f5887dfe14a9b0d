// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::i18n::{TextId, text, translate};
use crate::{Dataset, Locale, ProvinceFilter, UniversityRecord, ViewSnapshot};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    pub province: ProvinceFilter,
    pub drill_down: Option<UniversityRecord>,
    pub locale: Locale,
    pub status_line: Option<String>,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    SetProvince(ProvinceFilter),
    SelectByIndex(usize),
    /// Click path: `snapshot` is the list the clicked frame was drawn from.
    SelectInSnapshot { snapshot: ViewSnapshot, index: usize },
    SetLocale(Locale),
    ToggleLocale,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ProvinceChanged(ProvinceFilter),
    DrillDownSelected(UniversityRecord),
    DrillDownCleared,
    LocaleChanged(Locale),
    StatusUpdated(String),
    StatusCleared,
}

impl SelectionState {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    /// Bumped whenever the filtered list may have changed.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dispatch(&mut self, dataset: &Dataset, command: AppCommand) -> Vec<AppEvent> {
        tracing::debug!(?command, "dispatch");
        match command {
            AppCommand::SetProvince(province) => self.set_province(dataset, province),
            AppCommand::SelectByIndex(index) => self.select_by_index(dataset, index),
            AppCommand::SelectInSnapshot { snapshot, index } => {
                self.select_in_snapshot(&snapshot, index)
            }
            AppCommand::SetLocale(locale) => self.set_locale(locale),
            AppCommand::ToggleLocale => self.set_locale(self.locale.toggled()),
            AppCommand::SetStatus(message) => vec![self.set_status(message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    pub fn set_province(&mut self, dataset: &Dataset, province: ProvinceFilter) -> Vec<AppEvent> {
        if let ProvinceFilter::Province(name) = &province
            && !dataset.records().iter().any(|record| record.province == *name)
        {
            tracing::debug!(province = %name, "province not present in dataset");
        }

        self.province = province.clone();
        self.generation = self.generation.wrapping_add(1);

        let mut events = vec![AppEvent::ProvinceChanged(province)];
        if self.drill_down.take().is_some() {
            events.push(AppEvent::DrillDownCleared);
        }
        let label = self.province_label();
        events.push(self.set_status(translate(
            self.locale,
            TextId::StatusProvince,
            &[("province", &label)],
        )));
        events
    }

    pub fn select_by_index(&mut self, dataset: &Dataset, index: usize) -> Vec<AppEvent> {
        let Some(record) = self.filtered_list(dataset).get(index).map(|record| (*record).clone())
        else {
            tracing::debug!(index, province = %self.province.as_str(), "selection out of range");
            return Vec::new();
        };
        self.select_record(record)
    }

    /// Resolves `index` against the drawn list itself, provided no province
    /// change happened since it was built.
    pub fn select_in_snapshot(&mut self, snapshot: &ViewSnapshot, index: usize) -> Vec<AppEvent> {
        if snapshot.generation != self.generation {
            tracing::debug!(
                generation = snapshot.generation,
                current = self.generation,
                "ignoring selection from a stale frame"
            );
            return Vec::new();
        }
        let Some(record) = snapshot.get(index).cloned() else {
            tracing::debug!(index, len = snapshot.len(), "selection outside drawn snapshot");
            return Vec::new();
        };
        self.select_record(record)
    }

    fn select_record(&mut self, record: UniversityRecord) -> Vec<AppEvent> {
        let status = translate(
            self.locale,
            TextId::StatusUniversity,
            &[("university", &record.name)],
        );
        self.drill_down = Some(record.clone());
        vec![
            AppEvent::DrillDownSelected(record),
            self.set_status(status),
        ]
    }

    pub fn set_locale(&mut self, locale: Locale) -> Vec<AppEvent> {
        self.locale = locale;
        let status = translate(
            locale,
            TextId::StatusLocale,
            &[("language", locale.native_name())],
        );
        vec![AppEvent::LocaleChanged(locale), self.set_status(status)]
    }

    pub fn filtered_list<'a>(&self, dataset: &'a Dataset) -> Vec<&'a UniversityRecord> {
        dataset.filtered(&self.province)
    }

    pub fn province_options(&self, dataset: &Dataset) -> Vec<ProvinceFilter> {
        dataset.province_options()
    }

    /// Localized label for the active filter; province names pass through.
    pub fn province_label(&self) -> String {
        province_label(self.locale, &self.province)
    }

    fn set_status(&mut self, message: impl Into<String>) -> AppEvent {
        let message = message.into();
        self.status_line = Some(message.clone());
        AppEvent::StatusUpdated(message)
    }
}

pub fn province_label(locale: Locale, province: &ProvinceFilter) -> String {
    match province {
        ProvinceFilter::All => text(locale, TextId::AllProvinces).to_owned(),
        ProvinceFilter::Province(name) => name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, SelectionState};
    use crate::{Dataset, Locale, ProvinceFilter, UniversityRecord, build_view};

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            UniversityRecord::new("Western University", "ON", 30_000, 5_000, 2_000),
            UniversityRecord::new("Bishop's University", "QC", 2_500, 100, 300),
            UniversityRecord::new("Carleton University", "ON", 25_000, 4_000, 3_000),
        ])
    }

    #[test]
    fn set_province_clears_drill_down_and_reports_it() {
        let dataset = dataset();
        let mut state = SelectionState::default();
        state.dispatch(&dataset, AppCommand::SelectByIndex(1));
        assert!(state.drill_down.is_some());

        let events = state.dispatch(&dataset, AppCommand::SetProvince("ON".into()));
        assert_eq!(state.province, ProvinceFilter::parse("ON"));
        assert_eq!(state.drill_down, None);
        assert_eq!(
            events,
            vec![
                AppEvent::ProvinceChanged(ProvinceFilter::parse("ON")),
                AppEvent::DrillDownCleared,
                AppEvent::StatusUpdated("showing ON".to_owned()),
            ]
        );
    }

    #[test]
    fn set_province_without_drill_down_skips_cleared_event() {
        let dataset = dataset();
        let mut state = SelectionState::default();
        let events = state.dispatch(&dataset, AppCommand::SetProvince(ProvinceFilter::All));
        assert_eq!(
            events,
            vec![
                AppEvent::ProvinceChanged(ProvinceFilter::All),
                AppEvent::StatusUpdated("showing All Provinces".to_owned()),
            ]
        );
    }

    #[test]
    fn set_province_accepts_values_missing_from_dataset() {
        let dataset = dataset();
        let mut state = SelectionState::default();
        state.dispatch(&dataset, AppCommand::SetProvince("Nunavut".into()));
        assert_eq!(state.province.as_str(), "Nunavut");
        assert!(state.filtered_list(&dataset).is_empty());
    }

    #[test]
    fn select_by_index_uses_the_filtered_list() {
        let dataset = dataset();
        let mut state = SelectionState::default();
        state.dispatch(&dataset, AppCommand::SetProvince("ON".into()));

        let events = state.dispatch(&dataset, AppCommand::SelectByIndex(1));
        let expected = dataset.records()[2].clone();
        assert_eq!(state.drill_down, Some(expected.clone()));
        assert_eq!(
            events,
            vec![
                AppEvent::DrillDownSelected(expected),
                AppEvent::StatusUpdated("details for Carleton University".to_owned()),
            ]
        );
    }

    #[test]
    fn select_by_index_out_of_range_is_a_silent_no_op() {
        let dataset = dataset();
        let mut state = SelectionState::default();
        state.dispatch(&dataset, AppCommand::SelectByIndex(0));
        let before = state.clone();

        assert!(state.dispatch(&dataset, AppCommand::SelectByIndex(3)).is_empty());
        assert!(
            state
                .dispatch(&dataset, AppCommand::SelectByIndex(usize::MAX))
                .is_empty()
        );
        assert_eq!(state, before);
    }

    #[test]
    fn stale_snapshot_selection_is_ignored() {
        let dataset = dataset();
        let mut state = SelectionState::default();
        let drawn = build_view(&dataset, &state).snapshot;

        state.dispatch(&dataset, AppCommand::SetProvince("QC".into()));
        let events = state.dispatch(
            &dataset,
            AppCommand::SelectInSnapshot {
                snapshot: drawn,
                index: 0,
            },
        );
        assert!(events.is_empty());
        assert_eq!(state.drill_down, None);

        let current = build_view(&dataset, &state).snapshot;
        state.dispatch(
            &dataset,
            AppCommand::SelectInSnapshot {
                snapshot: current,
                index: 0,
            },
        );
        assert_eq!(
            state.drill_down.as_ref().map(|record| record.name.as_str()),
            Some("Bishop's University")
        );
    }

    #[test]
    fn snapshot_selection_resolves_against_the_drawn_records() {
        let dataset = dataset();
        let mut state = SelectionState::default();
        state.dispatch(&dataset, AppCommand::SetProvince("ON".into()));
        let drawn = build_view(&dataset, &state).snapshot;

        // The drawn list decides the record, not a fresh filter of the data
        // passed alongside the command.
        let unrelated = Dataset::from_records(Vec::new());
        let events = state.dispatch(
            &unrelated,
            AppCommand::SelectInSnapshot {
                snapshot: drawn.clone(),
                index: 1,
            },
        );
        assert_eq!(state.drill_down.as_ref(), Some(&drawn.records[1]));
        assert_eq!(
            events.first(),
            Some(&AppEvent::DrillDownSelected(drawn.records[1].clone()))
        );

        let before = state.clone();
        let events = state.dispatch(
            &dataset,
            AppCommand::SelectInSnapshot {
                snapshot: drawn.clone(),
                index: drawn.len(),
            },
        );
        assert!(events.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn locale_switch_leaves_selection_untouched() {
        let dataset = dataset();
        let mut state = SelectionState::default();
        state.dispatch(&dataset, AppCommand::SetProvince("ON".into()));
        state.dispatch(&dataset, AppCommand::SelectByIndex(0));
        let province = state.province.clone();
        let drill_down = state.drill_down.clone();
        let generation = state.generation();

        let events = state.dispatch(&dataset, AppCommand::ToggleLocale);
        assert_eq!(state.locale, Locale::Fr);
        assert_eq!(state.province, province);
        assert_eq!(state.drill_down, drill_down);
        assert_eq!(state.generation(), generation);
        assert_eq!(
            events,
            vec![
                AppEvent::LocaleChanged(Locale::Fr),
                AppEvent::StatusUpdated("langue : Français".to_owned()),
            ]
        );
    }

    #[test]
    fn province_label_is_localized_only_for_the_sentinel() {
        let mut state = SelectionState::new(Locale::Fr);
        assert_eq!(state.province_label(), "Toutes les provinces");
        state.province = ProvinceFilter::parse("Quebec");
        assert_eq!(state.province_label(), "Quebec");
    }

    #[test]
    fn status_set_and_clear() {
        let dataset = dataset();
        let mut state = SelectionState::default();
        state.dispatch(&dataset, AppCommand::SetStatus("hello".to_owned()));
        assert_eq!(state.status_line.as_deref(), Some("hello"));
        let events = state.dispatch(&dataset, AppCommand::ClearStatus);
        assert_eq!(state.status_line, None);
        assert_eq!(events, vec![AppEvent::StatusCleared]);
    }
}
