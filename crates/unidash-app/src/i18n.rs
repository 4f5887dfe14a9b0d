// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextId {
    DashboardTitle,
    DashboardSubtitle,
    ProvinceSelectLabel,
    AllProvinces,
    BarChartTitle,
    PieChartTitle,
    FullTimeUndergrad,
    FullTimeGrad,
    PartTimeUndergrad,
    FullTimeTotal,
    FooterNote,
    ControlsTitle,
    ClickForDetails,
    LanguageLabel,
    HelpTitle,
    HelpBody,
    KeyHints,
    StatusProvince,
    StatusUniversity,
    StatusLocale,
}

impl TextId {
    pub const ALL: [Self; 20] = [
        Self::DashboardTitle,
        Self::DashboardSubtitle,
        Self::ProvinceSelectLabel,
        Self::AllProvinces,
        Self::BarChartTitle,
        Self::PieChartTitle,
        Self::FullTimeUndergrad,
        Self::FullTimeGrad,
        Self::PartTimeUndergrad,
        Self::FullTimeTotal,
        Self::FooterNote,
        Self::ControlsTitle,
        Self::ClickForDetails,
        Self::LanguageLabel,
        Self::HelpTitle,
        Self::HelpBody,
        Self::KeyHints,
        Self::StatusProvince,
        Self::StatusUniversity,
        Self::StatusLocale,
    ];
}

/// Raw table entry; placeholders such as `{province}` are left in place.
pub const fn text(locale: Locale, id: TextId) -> &'static str {
    match locale {
        Locale::En => english(id),
        Locale::Fr => french(id),
    }
}

/// Looks up `id` and substitutes each `{key}` with its value verbatim.
pub fn translate(locale: Locale, id: TextId, params: &[(&str, &str)]) -> String {
    substitute(text(locale, id), params)
}

/// One left-to-right pass over `template`; inserted values are never
/// scanned again.
fn substitute(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            params
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

const fn english(id: TextId) -> &'static str {
    match id {
        TextId::DashboardTitle => "Canadian University Enrolment Dashboard",
        TextId::DashboardSubtitle => {
            "An interactive look at student enrolment data across Canada."
        }
        TextId::ProvinceSelectLabel => "Select a Province",
        TextId::AllProvinces => "All Provinces",
        TextId::BarChartTitle => "Full-Time Enrolment in {province}",
        TextId::PieChartTitle => "Enrolment Breakdown for {university}",
        TextId::FullTimeUndergrad => "FT Undergrad",
        TextId::FullTimeGrad => "FT Graduate",
        TextId::PartTimeUndergrad => "PT Undergrad",
        TextId::FullTimeTotal => "Full-Time Enrolment",
        TextId::FooterNote => {
            "Note: All data is synthetically generated for demonstration purposes only."
        }
        TextId::ControlsTitle => "Dashboard Controls",
        TextId::ClickForDetails => "Click a bar to see details",
        TextId::LanguageLabel => "Language",
        TextId::HelpTitle => "help",
        TextId::HelpBody => {
            "province: j/k or up/down\n\
bars: h/l or left/right | enter/space details | mouse click details\n\
language: L toggle | e English | f French | click a language name\n\
global: ? help | esc close help | q or ctrl+q quit"
        }
        TextId::KeyHints => "j/k province | h/l bar | enter details | L language | ? help | q quit",
        TextId::StatusProvince => "showing {province}",
        TextId::StatusUniversity => "details for {university}",
        TextId::StatusLocale => "language: {language}",
    }
}

const fn french(id: TextId) -> &'static str {
    match id {
        TextId::DashboardTitle => "Tableau de Bord des Inscriptions Universitaires",
        TextId::DashboardSubtitle => {
            "Aperçu interactif des données sur les inscriptions étudiantes."
        }
        TextId::ProvinceSelectLabel => "Sélectionnez une province",
        TextId::AllProvinces => "Toutes les provinces",
        TextId::BarChartTitle => "Inscriptions à temps plein en {province}",
        TextId::PieChartTitle => "Répartition des inscriptions pour {university}",
        TextId::FullTimeUndergrad => "1er cycle TP",
        TextId::FullTimeGrad => "Cycles sup. TP",
        TextId::PartTimeUndergrad => "1er cycle TPartiel",
        TextId::FullTimeTotal => "Inscriptions à temps plein",
        TextId::FooterNote => {
            "Note : Toutes les données sont générées synthétiquement à des fins de démonstration."
        }
        TextId::ControlsTitle => "Contrôles du tableau de bord",
        TextId::ClickForDetails => "Cliquez sur une barre pour voir les détails",
        TextId::LanguageLabel => "Langue",
        TextId::HelpTitle => "aide",
        TextId::HelpBody => {
            "province : j/k ou haut/bas\n\
barres : h/l ou gauche/droite | entrée/espace détails | clic de souris détails\n\
langue : L basculer | e anglais | f français | cliquez sur une langue\n\
général : ? aide | échap fermer l'aide | q ou ctrl+q quitter"
        }
        TextId::KeyHints => {
            "j/k province | h/l barre | entrée détails | L langue | ? aide | q quitter"
        }
        TextId::StatusProvince => "affichage : {province}",
        TextId::StatusUniversity => "détails pour {university}",
        TextId::StatusLocale => "langue : {language}",
    }
}
