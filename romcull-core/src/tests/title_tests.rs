use super::*;
use crate::region::ClassifyOptions;
use crate::tags::extract_tags;
use crate::types::FileDescriptor;

fn files(names: &[&str]) -> Vec<FileInfo> {
    names
        .iter()
        .map(|n| FileInfo::new(FileDescriptor::from_file_name(*n), &ClassifyOptions::default()))
        .collect()
}

fn title_of(file: &str) -> String {
    extract_title(file, &extract_tags(file))
}

#[test]
fn title_stops_at_region_group() {
    assert_eq!(title_of("Final Fantasy VII (USA) (Disc 1).zip"), "Final Fantasy VII");
    assert_eq!(title_of("6-in-1 (Micro Genius) (Asia).zip"), "6-in-1 (Micro Genius)");
}

#[test]
fn title_without_tags_stops_at_extension() {
    assert_eq!(title_of("Batman.zip"), "Batman");
    assert_eq!(title_of("Dr. Mario.nes"), "Dr. Mario");
    assert_eq!(title_of("README"), "README");
}

#[test]
fn title_without_region_stops_at_first_group() {
    assert_eq!(title_of("Batman [T-En by Gikkman v1.01].zip"), "Batman");
}

#[test]
fn titlefy_roman_numerals() {
    assert_eq!(titlefy("Final Fantasy 7"), "finalfantasyvii");
    assert_eq!(titlefy("Final Fantasy VII"), "finalfantasyvii");
    assert_eq!(titlefy("Mega Man 25"), "megamanxxv");
    assert_eq!(titlefy("Mega Man 26"), "megaman26");
    assert_eq!(titlefy("Tetris 0"), "tetris0");
}

#[test]
fn titlefy_strips_punctuation_and_case() {
    assert_eq!(
        titlefy("Legend of Zelda, The - A Link to the Past"),
        "legendofzeldathealinktothepast"
    );
    assert_eq!(titlefy("Pokémon Red"), "pokémonred");
}

#[test]
fn groups_by_title() {
    let groups = group_by_title(
        files(&[
            "Final Fantasy VII (USA) (Disc 1).zip",
            "Final Fantasy VII (USA) (Disc 2).zip",
            "Final Fantasy Tactics (Japan).zip",
        ]),
        None,
    );
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].title, "Final Fantasy VII");
    assert_eq!(groups[0].files.len(), 2);
    assert_eq!(groups[1].title, "Final Fantasy Tactics");
    assert_eq!(groups[1].files.len(), 1);
}

#[test]
fn files_that_form_no_groups() {
    let groups = group_by_title(
        files(&[
            "Final Fantasy VII (USA) (Disc 1).zip",
            "Final Fantasy VIII (USA) (Disc 2).zip",
            "Final Fantasy Tactics (Japan).zip",
        ]),
        None,
    );
    assert_eq!(groups.len(), 3);
    assert!(groups.iter().all(|g| g.files.len() == 1));
}

#[test]
fn numerals_and_digits_merge() {
    let groups = group_by_title(
        files(&["Final Fantasy 7 (Japan).zip", "Final Fantasy VII (USA).zip"]),
        None,
    );
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].title, "Final Fantasy 7");
    assert_eq!(groups[0].key, "finalfantasyvii");
}

#[test]
fn empty_input() {
    assert!(group_by_title(Vec::new(), None).is_empty());
}

#[test]
fn aliases_substitute_before_grouping() {
    let mut aliases = HashMap::new();
    aliases.insert(titlefy("Rockman"), "Mega Man".to_string());

    let groups = group_by_title(
        files(&["Rockman (Japan).zip", "Mega Man (USA).zip", "Rockman X (Japan).zip"]),
        Some(&aliases),
    );
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].title, "Mega Man");
    assert_eq!(groups[0].files.len(), 2);
    assert_eq!(groups[0].files[0].game_title, "Rockman");
    assert_eq!(groups[1].title, "Rockman X");
}
