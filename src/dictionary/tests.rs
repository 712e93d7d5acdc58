use super::*;
use tempfile::tempdir;

const SMALL: &str = "Title = Journals\nNumFields = 2\nFieldBreaks = [12]\nNIM         Nuclear Instrum.and Methods in Physics Res.\n\nPR/C        Physical Review, Part C, Nuclear Physics\n";

#[test]
fn test_parse_dictionary_rows() -> Result<(), Box<dyn std::error::Error>> {
    let dict = parse_dictionary(DictionaryKind::Journals, SMALL)?;
    assert_eq!(dict.title(), "Journals");
    assert_eq!(dict.len(), 2);
    assert_eq!(
        dict.description("NIM"),
        Some("Nuclear Instrum.and Methods in Physics Res.")
    );
    assert_eq!(
        dict.description("PR/C"),
        Some("Physical Review, Part C, Nuclear Physics")
    );
    assert!(!dict.contains("PRL"));
    Ok(())
}

#[test]
fn test_parse_three_field_rows() -> Result<(), Box<dyn std::error::Error>> {
    let text = "Title = ReferenceTypes\nNumFields = 3\nFieldBreaks = [5,19]\nP    Prog.Rep.     Progress report\nJ    Journal       Journal\n";
    let dict = parse_dictionary(DictionaryKind::ReferenceTypes, text)?;
    assert_eq!(dict.field("P", 0), Some("Prog.Rep."));
    assert_eq!(dict.field("P", 1), Some("Progress report"));
    assert_eq!(dict.field("P", 2), None);
    Ok(())
}

#[test]
fn test_short_rows_leave_empty_fields() -> Result<(), Box<dyn std::error::Error>> {
    let text = "Title = Status\nNumFields = 3\nFieldBreaks = [7,20]\nCURVE\n";
    let dict = parse_dictionary(DictionaryKind::Status, text)?;
    assert_eq!(dict.get("CURVE"), Some(&["".to_string(), "".to_string()][..]));
    Ok(())
}

#[test]
fn test_malformed_header() {
    let text = "Title = Journals\nNumFields = 3\nFieldBreaks = [12]\n";
    let result = parse_dictionary(DictionaryKind::Journals, text);
    assert!(matches!(result, Err(DictionaryError::MalformedHeader { .. })));

    let text = "Title = Journals\nNumFields = two\nFieldBreaks = [12]\n";
    assert!(parse_dictionary(DictionaryKind::Journals, text).is_err());
    assert!(parse_dictionary(DictionaryKind::Journals, "").is_err());
}

#[test]
fn test_kind_lookup() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!("Quantities".parse::<DictionaryKind>()?, DictionaryKind::Quantities);
    assert_eq!("36".parse::<DictionaryKind>()?, DictionaryKind::Quantities);
    assert_eq!("rel_ref".parse::<DictionaryKind>()?, DictionaryKind::RelRef);
    assert!("Nope".parse::<DictionaryKind>().is_err());
    assert!("8".parse::<DictionaryKind>().is_err());
    assert_eq!(DictionaryKind::Institutes.file_name(), "dict03.txt");
    assert_eq!(DictionaryKind::ALL.len(), 21);
    for (position, kind) in DictionaryKind::ALL.iter().enumerate() {
        assert_eq!(*kind as usize, position);
    }
    Ok(())
}

#[test]
fn test_embedded_tables() -> Result<(), Box<dyn std::error::Error>> {
    let dicts = Dictionaries::embedded()?;
    assert_eq!(dicts.iter().count(), 21);
    for dict in dicts.iter() {
        assert!(!dict.is_empty(), "{} is empty", dict.kind());
        assert_eq!(dict.title(), dict.kind().name());
    }
    assert_eq!(
        dicts.lookup(DictionaryKind::Institutes, "ANL"),
        Some("Argonne National Laboratory, Argonne, IL")
    );
    assert_eq!(dicts.lookup(DictionaryKind::Quantities, ",SIG"), Some("Cross section"));
    assert_eq!(
        dicts.lookup(DictionaryKind::Modifiers, "MXW"),
        Some("Maxwellian average")
    );
    assert_eq!(
        dicts.lookup(DictionaryKind::Compounds, "19-K-CMP"),
        Some("Potassium compound")
    );
    assert_eq!(
        dicts.get(DictionaryKind::ReferenceTypes).field("P", 1),
        Some("Progress report")
    );
    Ok(())
}

#[test]
fn test_load_dir_skips_missing_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("dict05.txt"), SMALL)?;

    let dicts = Dictionaries::load_dir(dir.path())?;
    assert_eq!(dicts.get(DictionaryKind::Journals).len(), 2);
    assert!(dicts.get(DictionaryKind::Institutes).is_empty());
    assert_eq!(dicts.iter().count(), 21);
    Ok(())
}

#[test]
fn test_global_is_shared() {
    let first = Dictionaries::global() as *const Dictionaries;
    let second = dictionaries() as *const Dictionaries;
    assert_eq!(first, second);
    assert!(Dictionaries::global().get(DictionaryKind::Particles).contains("N"));
    assert!(matches!(
        Dictionaries::install_global(Dictionaries::empty()),
        Err(DictionaryError::AlreadyInitialized)
    ));
}
