use super::DictionaryKind;

/// Curated dictionary tables compiled into the crate.
pub(super) const EMBEDDED: &[(DictionaryKind, &str)] = &[
    (DictionaryKind::Institutes, include_str!("../../data/dictionaries/dict03.txt")),
    (DictionaryKind::ReferenceTypes, include_str!("../../data/dictionaries/dict04.txt")),
    (DictionaryKind::Journals, include_str!("../../data/dictionaries/dict05.txt")),
    (DictionaryKind::ConferencesAndBooks, include_str!("../../data/dictionaries/dict07.txt")),
    (DictionaryKind::Compounds, include_str!("../../data/dictionaries/dict09.txt")),
    (DictionaryKind::History, include_str!("../../data/dictionaries/dict15.txt")),
    (DictionaryKind::Status, include_str!("../../data/dictionaries/dict16.txt")),
    (DictionaryKind::RelRef, include_str!("../../data/dictionaries/dict17.txt")),
    (DictionaryKind::Facility, include_str!("../../data/dictionaries/dict18.txt")),
    (DictionaryKind::IncidentSource, include_str!("../../data/dictionaries/dict19.txt")),
    (DictionaryKind::AdditionalResults, include_str!("../../data/dictionaries/dict20.txt")),
    (DictionaryKind::Method, include_str!("../../data/dictionaries/dict21.txt")),
    (DictionaryKind::Detectors, include_str!("../../data/dictionaries/dict22.txt")),
    (DictionaryKind::Analysis, include_str!("../../data/dictionaries/dict23.txt")),
    (DictionaryKind::DataHeadings, include_str!("../../data/dictionaries/dict24.txt")),
    (DictionaryKind::Process, include_str!("../../data/dictionaries/dict30.txt")),
    (DictionaryKind::Particles, include_str!("../../data/dictionaries/dict33.txt")),
    (DictionaryKind::Modifiers, include_str!("../../data/dictionaries/dict34.txt")),
    (DictionaryKind::DataType, include_str!("../../data/dictionaries/dict35.txt")),
    (DictionaryKind::Quantities, include_str!("../../data/dictionaries/dict36.txt")),
    (DictionaryKind::Result, include_str!("../../data/dictionaries/dict37.txt")),
];
