//! Loading the rule catalog from files on disk and from the bundled copy.

use pretty_assertions::assert_eq;

use paye_rules::{RuleLibrary, RuleLibraryError, TagKind};

const BUNDLED_CSV: &str = include_str!("../data/rules.csv");

#[test]
fn bundled_matches_shipped_csv() {
    let from_file = RuleLibrary::from_reader(BUNDLED_CSV.as_bytes()).expect("parse csv");
    let bundled = RuleLibrary::bundled().expect("bundled rules");

    assert_eq!(bundled, from_file);
}

#[test]
fn cra_card_describes_relief_formula() {
    let library = RuleLibrary::bundled().expect("bundled rules");
    let cra = library.get(1).expect("CRA card");

    assert!(cra.description.contains("₦200,000 or 1% of gross income"));
    assert_eq!(cra.tags[0].label, "Personal Income Tax");
    assert_eq!(cra.tags[0].kind, TagKind::Primary);
}

#[test]
fn every_bundled_title_is_distinct() {
    let library = RuleLibrary::bundled().expect("bundled rules");
    let mut titles: Vec<&str> = library.cards().iter().map(|c| c.title.as_str()).collect();
    titles.sort_unstable();
    titles.dedup();

    assert_eq!(titles.len(), library.len());
}

#[test]
fn duplicate_ids_anywhere_in_file_are_rejected() {
    let mut input = BUNDLED_CSV.to_string();
    input.push_str("3,Another Small Company Rule,Text,Company Tax,\n");

    let result = RuleLibrary::from_reader(input.as_bytes());

    assert_eq!(result, Err(RuleLibraryError::DuplicateId(3)));
}

#[test]
fn tag_filter_spans_primary_and_secondary() {
    let input = "id,title,description,primary_tag,secondary_tags\n\
                 1,A,Text,Relief,\n\
                 2,B,Text,Other,relief;Extra\n\
                 3,C,Text,Other,Extra\n";

    let library = RuleLibrary::from_reader(input.as_bytes()).expect("load");
    let ids: Vec<u32> = library.filter_by_tag("RELIEF").iter().map(|c| c.id).collect();

    assert_eq!(ids, vec![1, 2]);
}
