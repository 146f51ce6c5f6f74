//! Property tests over generated filenames.

use proptest::prelude::*;

use romcull_core::{
    ClassifyOptions, CollectionRules, CurateOptions, FileDescriptor, FileInfo, GameVersion,
    extract_tags, extract_title, group_by_title, resolve_discs,
};

/// Filenames shaped like real collection entries: a title followed by
/// bracketed groups drawn from a realistic vocabulary.
fn filename() -> impl Strategy<Value = String> {
    let title = prop_oneof![
        Just("Final Fantasy VII".to_string()),
        Just("Final Fantasy 7".to_string()),
        Just("Ghostbusters".to_string()),
        Just("6-in-1 (Micro Genius)".to_string()),
        "[A-Za-z][A-Za-z0-9 ]{0,12}".prop_map(String::from),
    ];
    let group = prop_oneof![
        Just("(USA)".to_string()),
        Just("(Japan)".to_string()),
        Just("(USA, Europe)".to_string()),
        Just("(En,Fr,De)".to_string()),
        Just("(Disc 1)".to_string()),
        Just("(Disc 2)".to_string()),
        Just("(Rev A)".to_string()),
        Just("(1M, 2M)".to_string()),
        Just("[T-En by Someone]".to_string()),
        Just("[!]".to_string()),
        Just("()".to_string()),
        "\\([a-zA-Z ,]{0,8}\\)".prop_map(String::from),
    ];
    let ext = prop_oneof![Just(".zip"), Just(".7z"), Just(".chd"), Just("")];
    (title, prop::collection::vec(group, 0..5), ext)
        .prop_map(|(title, groups, ext)| format!("{} {}{}", title, groups.join(" "), ext))
}

fn arbitrary_string() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..200).prop_map(|chars| chars.into_iter().collect())
}

fn infos(names: &[String]) -> Vec<FileInfo> {
    names
        .iter()
        .map(|n| FileInfo::new(FileDescriptor::from_file_name(n.as_str()), &ClassifyOptions::default()))
        .collect()
}

proptest! {
    #[test]
    fn tag_set_is_never_empty(name in arbitrary_string()) {
        let tags = extract_tags(&name);
        prop_assert!(!tags.is_empty());
        if let Some(boundary) = tags.title_boundary() {
            prop_assert!(name.is_char_boundary(boundary));
        }
        let _ = extract_title(&name, &tags);
    }

    #[test]
    fn realistic_names_yield_tags(name in filename()) {
        prop_assert!(!extract_tags(&name).is_empty());
    }

    #[test]
    fn grouping_partitions_exactly(names in prop::collection::vec(filename(), 0..20)) {
        let groups = group_by_title(infos(&names), None);
        let mut grouped: Vec<String> = groups
            .iter()
            .flat_map(|g| g.files.iter().map(|f| f.file_name().to_string()))
            .collect();
        let mut expected = names.clone();
        grouped.sort();
        expected.sort();
        prop_assert_eq!(grouped, expected);

        let mut keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        let before = keys.len();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), before);
    }

    #[test]
    fn disc_resolution_is_idempotent(names in prop::collection::vec(filename(), 1..12)) {
        for group in group_by_title(infos(&names), None) {
            let first = resolve_discs(&group);
            prop_assert!(!first.versions.is_empty());
            prop_assert_eq!(first, resolve_discs(&group));
        }
    }

    #[test]
    fn disc_sets_never_repeat_an_index(names in prop::collection::vec(filename(), 1..12)) {
        let doubled: Vec<String> = names.iter().chain(names.iter()).cloned().collect();
        for group in group_by_title(infos(&doubled), None) {
            for version in resolve_discs(&group).versions {
                if let GameVersion::MultiFile(multi) = version {
                    let mut indices: Vec<&str> =
                        multi.files.iter().map(|d| d.index.as_str()).collect();
                    let before = indices.len();
                    indices.sort();
                    indices.dedup();
                    prop_assert_eq!(indices.len(), before);
                }
            }
        }
    }

    #[test]
    fn best_index_is_in_range(names in prop::collection::vec(filename(), 1..12)) {
        let curation = romcull_core::curate(
            names.iter().map(|n| FileDescriptor::from_file_name(n.as_str())),
            &CollectionRules::new(),
            &CurateOptions::default(),
        );
        for game in &curation.games {
            prop_assert!(game.best_index < game.versions.len());
        }
    }
}
