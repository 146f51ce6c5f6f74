use super::*;

use tempfile::TempDir;

#[test]
fn guesses_disc_system_from_platform_name() {
    assert_eq!(
        BizhawkSystem::from_platform("Sony - PlayStation"),
        Some(BizhawkSystem::Playstation)
    );
    assert_eq!(BizhawkSystem::from_platform("PS1"), Some(BizhawkSystem::Playstation));
    assert_eq!(BizhawkSystem::from_platform("Sega Saturn"), Some(BizhawkSystem::Saturn));
    assert_eq!(BizhawkSystem::from_platform("NEC - PC-FX"), Some(BizhawkSystem::PcFx));
    assert_eq!(BizhawkSystem::from_platform("Sega - Mega-CD"), Some(BizhawkSystem::SegaCd));
    assert_eq!(
        BizhawkSystem::from_platform("NEC - PC Engine CD"),
        Some(BizhawkSystem::Tg16Cd)
    );
    assert_eq!(
        BizhawkSystem::from_platform("TurboGrafx-16 CD"),
        Some(BizhawkSystem::Tg16Cd)
    );
    assert_eq!(BizhawkSystem::from_platform("Nintendo - Game Boy"), None);
}

#[test]
fn only_disc_descriptors_become_assets() {
    let files = vec![
        "Policenauts (Japan) (Disc 1)/Policenauts (Japan) (Disc 1).cue".to_string(),
        "Policenauts (Japan) (Disc 1)/Policenauts (Japan) (Disc 1).bin".to_string(),
        "Policenauts (Japan) (Disc 2).CCD".to_string(),
        "Policenauts (Japan) (Disc 2).img".to_string(),
    ];
    assert_eq!(
        disc_assets(&files),
        vec![
            "Policenauts (Japan) (Disc 1)/Policenauts (Japan) (Disc 1).cue",
            "Policenauts (Japan) (Disc 2).CCD",
        ]
    );
}

#[test]
fn xml_escapes_names_and_paths() {
    let xml = bizhawk_xml(
        "Tom & Jerry's \"Disc\" <Set>",
        BizhawkSystem::Saturn,
        &["Tom & Jerry (Disc 1).cue"],
    );
    assert_eq!(
        xml,
        "<BizHawk-XMLGame System=\"SAT\" Name=\"Tom &amp; Jerry&apos;s &quot;Disc&quot; &lt;Set&gt;\">\n\
         \x20 <LoadAssets>\n\
         \x20   <Asset FileName=\"Tom &amp; Jerry (Disc 1).cue\" />\n\
         \x20 </LoadAssets>\n\
         </BizHawk-XMLGame>\n"
    );
}

#[test]
fn writes_file_named_after_title() {
    let out = TempDir::new().unwrap();
    let files = vec![
        "Final Fantasy VII (USA) (Disc 1).cue".to_string(),
        "Final Fantasy VII (USA) (Disc 2).cue".to_string(),
    ];

    let name = write_bizhawk_xml(out.path(), "Final Fantasy VII", BizhawkSystem::Playstation, &files)
        .unwrap();
    assert_eq!(name.as_deref(), Some("Final Fantasy VII.xml"));

    let xml = fs::read_to_string(out.path().join("Final Fantasy VII.xml")).unwrap();
    assert!(xml.starts_with("<BizHawk-XMLGame System=\"PSX\" Name=\"Final Fantasy VII\">"));
    assert_eq!(xml.matches("<Asset ").count(), 2);
}

#[test]
fn no_descriptors_means_no_file() {
    let out = TempDir::new().unwrap();
    let files = vec!["Ridge Racer (Disc 1).chd".to_string()];
    let name = write_bizhawk_xml(out.path(), "Ridge Racer", BizhawkSystem::Playstation, &files)
        .unwrap();
    assert_eq!(name, None);
    assert!(!out.path().join("Ridge Racer.xml").exists());
}

#[test]
fn file_name_replaces_path_separators() {
    assert_eq!(xml_file_name("Fate/stay night"), "Fate-stay night.xml");
}
