use super::*;
use crate::region::ClassifyOptions;
use crate::types::FileDescriptor;

fn file(name: &str) -> FileInfo {
    FileInfo::new(FileDescriptor::from_file_name(name), &ClassifyOptions::default())
}

#[test]
fn aliases_are_keyed_by_canonical_form() {
    let mut rules = CollectionRules::new();
    rules.add_alias("Mega Man", "Rockman");
    rules.add_alias("Mega Man 2", "Rockman 2: Dr. Wily no Nazo");

    assert_eq!(rules.canonical_title("ROCKMAN"), Some("Mega Man"));
    assert_eq!(rules.canonical_title("Rockman II - Dr Wily no Nazo"), Some("Mega Man 2"));
    assert_eq!(rules.canonical_title("Rockman X"), None);
    assert_eq!(rules.foreign_titles("Mega Man"), Some(&["Rockman".to_string()][..]));
    assert_eq!(rules.foreign_titles("Rockman"), None);
}

#[test]
fn foreign_titles_match_spelling_variants() {
    let mut rules = CollectionRules::new();
    rules.add_alias("Final Fantasy VII", "Fainaru Fantaji VII");
    let expected = Some(&["Fainaru Fantaji VII".to_string()][..]);
    assert_eq!(rules.foreign_titles("Final Fantasy 7"), expected);
    assert_eq!(rules.foreign_titles("FINAL FANTASY VII"), expected);
}

#[test]
fn foreign_titles_are_not_duplicated() {
    let mut rules = CollectionRules::new();
    rules.add_alias("Mega Man", "Rockman");
    rules.add_alias("Mega Man", "Rockman");
    rules.add_alias("Mega Man", "Rock Man");
    assert_eq!(
        rules.foreign_titles("Mega Man").map(<[String]>::to_vec),
        Some(vec!["Rockman".to_string(), "Rock Man".to_string()])
    );
}

#[test]
fn skip_by_tag_is_case_insensitive() {
    let mut rules = CollectionRules::new();
    rules.add_skip_tag("Program");
    assert_eq!(
        rules.skip_reason(&file("Tools (USA) (program).zip")),
        Some(SkipReason::Tag("program".to_string()))
    );
    assert_eq!(rules.skip_reason(&file("Tools (USA).zip")), None);
}

#[test]
fn skip_by_title_prefix() {
    let mut rules = CollectionRules::new();
    rules.add_skip_title_prefix("[BIOS]");
    rules.add_skip_title_prefix("Test Program");
    rules.add_skip_title_prefix("");

    let reason = rules.skip_reason(&file("Test Program Cartridge (USA).zip"));
    assert_eq!(reason, Some(SkipReason::TitlePrefix("testprogram".to_string())));
    assert_eq!(rules.skip_reason(&file("Tetris (USA).zip")), None);
}

#[test]
fn removed_titles_match_whole_title() {
    let mut rules = CollectionRules::new();
    rules.add_removed_title("Pokemon Mini Demo");
    assert_eq!(
        rules.skip_reason(&file("Pokemon Mini Demo (USA).zip")),
        Some(SkipReason::Removed)
    );
    assert_eq!(rules.skip_reason(&file("Pokemon Mini Demo 2 (USA).zip")), None);
}

#[test]
fn tag_checked_before_prefix_and_removal() {
    let mut rules = CollectionRules::new();
    rules.add_skip_tag("Demo");
    rules.add_skip_title_prefix("Sonic");
    rules.add_removed_title("Sonic");

    assert_eq!(
        rules.skip_reason(&file("Sonic (Europe) (Demo).zip")),
        Some(SkipReason::Tag("demo".to_string()))
    );
    assert_eq!(
        rules.skip_reason(&file("Sonic (Europe).zip")),
        Some(SkipReason::TitlePrefix("sonic".to_string()))
    );
}

#[test]
fn merge_combines_rule_sets() {
    let mut base = CollectionRules::new();
    base.add_alias("Mega Man", "Rockman");
    base.add_skip_tag("BIOS");

    let mut other = CollectionRules::new();
    other.add_alias("Mega Man", "Rock Man");
    other.add_alias("Street Fighter II", "Street Fighter 2 Turbo");
    other.add_removed_title("Kiosk Demo");
    other.add_skip_title_prefix("Test");

    base.merge(other);

    assert_eq!(base.canonical_title("Rock Man"), Some("Mega Man"));
    assert_eq!(base.canonical_title("Rockman"), Some("Mega Man"));
    assert_eq!(
        base.canonical_title("Street Fighter II Turbo"),
        Some("Street Fighter II")
    );
    assert_eq!(
        base.skip_reason(&file("Kiosk Demo (USA).zip")),
        Some(SkipReason::Removed)
    );
    assert!(base.skip_reason(&file("Testing (USA).zip")).is_some());
    assert_eq!(base.foreign_titles("Mega Man").map(<[String]>::len), Some(2));
}

#[test]
fn skip_reason_display() {
    assert_eq!(SkipReason::Tag("beta".into()).to_string(), "skipped tag \"beta\"");
    assert_eq!(SkipReason::Removed.to_string(), "removed by clone list");
}
