use std::fs;
use std::path::Path;

use tempfile::TempDir;

use romcull_lib::{
    Config, ConfigError, execute_copies, mover::BEST_JSON, plan_copies, run_collection,
    write_best_json,
};

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, path.file_name().unwrap().to_string_lossy().as_bytes()).unwrap();
}

/// Lay out a config dir with a clone list and an input tree.
fn setup() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    fs::write(
        root.join("collections.toml"),
        r#"
input_root = "in"
output_root = "out"
skip_file_extensions = ["txt"]
skip_file_tags = ["Program"]

[[collection]]
platform = "PlayStation"
output = "psx"
input = ["Sony - PlayStation"]
clonelists = ["psx.json"]
"#,
    )
    .unwrap();

    fs::create_dir_all(root.join("clonelists")).unwrap();
    fs::write(
        root.join("clonelists/psx.json"),
        r#"{"renames": {"Mega Man 8": ["Rockman 8"]}, "removes": {"Demo Disc": 1}}"#,
    )
    .unwrap();

    let input = root.join("in/Sony - PlayStation");
    for name in [
        "Rockman 8 (Japan).chd",
        "Mega Man 8 (USA).chd",
        "Mega Man 8 (USA) (Program).chd",
        "Demo Disc (USA).chd",
        "notes.txt",
        "FF7/Final Fantasy VII (USA) (Disc 2).chd",
        "FF7/Final Fantasy VII (USA) (Disc 1).chd",
        "FF7/Final Fantasy VII (Japan) (Disc 1).chd",
        "FF7/Final Fantasy VII (Japan) (Disc 2).chd",
    ] {
        touch(&input.join(name));
    }
    tmp
}

#[test]
fn runs_and_syncs_a_collection() {
    let tmp = setup();
    let config = Config::load(&tmp.path().join("collections.toml")).unwrap();
    let collection = config.collection("playstation").unwrap();

    let run = run_collection(&config, collection).unwrap();
    assert_eq!(run.files_scanned, 8);
    assert_eq!(run.files_skipped(), 2);
    assert_eq!(run.group_count(), 2);
    assert_eq!(run.output_dir, tmp.path().join("out/psx"));

    let titles: Vec<&str> = run.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Final Fantasy VII", "Mega Man 8"]);
    assert_eq!(run.records[1].aliases, Some(vec!["Rockman 8".to_string()]));

    let plan = plan_copies(&run.records, &run.output_dir, &run.placement);
    let summary = execute_copies(&plan, &|_| {});
    assert_eq!(summary.copied, 3);
    assert!(summary.errors.is_empty());

    let out = tmp.path().join("out/psx");
    assert!(out.join("FF7/Final Fantasy VII (USA) (Disc 1).chd").is_file());
    assert!(out.join("FF7/Final Fantasy VII (USA) (Disc 2).chd").is_file());
    assert!(out.join("Mega Man 8 (USA).chd").is_file());
    assert!(!out.join("Rockman 8 (Japan).chd").exists());

    let best = write_best_json(&run.output_dir, &summary.entries).unwrap();
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(best).unwrap()).unwrap();
    assert_eq!(
        json[0]["files"],
        serde_json::json!([
            "FF7/Final Fantasy VII (USA) (Disc 1).chd",
            "FF7/Final Fantasy VII (USA) (Disc 2).chd"
        ])
    );

    // a second sync finds everything in place
    let again = execute_copies(
        &plan_copies(&run.records, &run.output_dir, &run.placement),
        &|_| {},
    );
    assert_eq!(again.copied, 0);
    assert_eq!(again.already_present, 3);
    assert!(out.join(BEST_JSON).is_file());
}

#[test]
fn missing_clone_list_aborts_the_run() {
    let tmp = setup();
    fs::remove_file(tmp.path().join("clonelists/psx.json")).unwrap();
    let config = Config::load(&tmp.path().join("collections.toml")).unwrap();

    let err = run_collection(&config, &config.collections[0]).unwrap_err();
    assert!(matches!(err, ConfigError::Io { ref path, .. } if path.ends_with("psx.json")));
}

#[test]
fn missing_input_directory_is_not_fatal() {
    let tmp = setup();
    fs::remove_dir_all(tmp.path().join("in")).unwrap();
    let config = Config::load(&tmp.path().join("collections.toml")).unwrap();

    let run = run_collection(&config, &config.collections[0]).unwrap();
    assert_eq!(run.files_scanned, 0);
    assert!(run.records.is_empty());
}

#[test]
fn missing_config_file_is_an_io_error() {
    let tmp = TempDir::new().unwrap();
    let err = Config::load(&tmp.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
