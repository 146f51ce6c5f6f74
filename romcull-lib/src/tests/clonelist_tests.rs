use super::*;

use romcull_core::{FileDescriptor, FileInfo, SkipReason};

fn parse(json: &str) -> Result<CollectionRules, ConfigError> {
    parse_clonelist(json, Path::new("test.json"))
}

#[test]
fn renames_accept_plain_and_numbered_entries() {
    let rules = parse(
        r#"{
            "renames": {
                "Mega Man": ["Rockman", ["Rock Man", 2], ""],
                "Pulseman": []
            }
        }"#,
    )
    .unwrap();

    assert_eq!(rules.canonical_title("Rockman"), Some("Mega Man"));
    assert_eq!(rules.canonical_title("Rock Man"), Some("Mega Man"));
    assert_eq!(
        rules.foreign_titles("Mega Man").map(<[String]>::to_vec),
        Some(vec!["Rockman".to_string(), "Rock Man".to_string()])
    );
    assert_eq!(rules.foreign_titles("Pulseman"), None);
}

#[test]
fn removes_drop_titles() {
    let rules = parse(r#"{"removes": {"Kiosk Demo Disc": {}, "Test Cart": 1}}"#).unwrap();
    let file = FileInfo::new(
        FileDescriptor::from_file_name("Kiosk Demo Disc (USA).iso"),
        &Default::default(),
    );
    assert_eq!(rules.skip_reason(&file), Some(SkipReason::Removed));
}

#[test]
fn empty_object_is_valid() {
    let rules = parse("{}").unwrap();
    assert_eq!(rules, CollectionRules::new());
}

#[test]
fn malformed_json_reports_the_file() {
    let err = parse(r#"{"renames": {"Mega Man": [1]}}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json { ref path, .. } if path == "test.json"));

    let err = parse("not json").unwrap_err();
    assert!(err.to_string().starts_with("JSON parse error in test.json"));
}
