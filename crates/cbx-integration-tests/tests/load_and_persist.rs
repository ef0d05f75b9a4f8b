//! # Load, Mark, Save, Reload
//!
//! Drives a four-section project through the whole lifecycle: configuration
//! load, tag overrides, database replay, mutation and persistence.

use std::path::{Path, PathBuf};

use cbx_core::{ControlState, PLACEHOLDER};
use cbx_empire::{Empire, EmpireError, MarkOutcome, StateDatabase, StateRecord, NOT_REQUIRED_STATEMENT};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Write a configuration covering every format into `dir`.
fn write_config(dir: &Path, extra: &str) -> PathBuf {
    let config = format!(
        r#"project = "Webshop"
database_file = "state.toml"

[sections.asvs]
name = "Web application"
prefix = "ASVS"
description = "Level 2 review"
file_type = "ASVS_JSON"
data_file = {asvs:?}

[sections.isvs]
name = "Firmware"
prefix = "I"
description = "Device review"
file_type = "OWASP_ISVS_JSON"
data_file = {isvs:?}

[sections.masvs]
name = "Mobile"
prefix = "M"
description = "Companion app"
file_type = "MASVS_YAML"
data_file = {masvs:?}

[sections.wstg]
name = "Testing"
prefix = "W"
description = "Pentest"
file_type = "WSTG_JSON"
data_file = {wstg:?}

{extra}
"#,
        asvs = fixture("asvs.json").display().to_string(),
        isvs = fixture("isvs.json").display().to_string(),
        masvs = fixture("masvs.yaml").display().to_string(),
        wstg = fixture("checklist.json").display().to_string(),
    );
    let path = dir.join("config.toml");
    std::fs::write(&path, config).unwrap();
    path
}

fn state(empire: &Empire, uid: &str) -> ControlState {
    empire.find_by_uid(uid).unwrap().state()
}

#[test]
fn sections_load_in_configuration_order() {
    let dir = tempfile::tempdir().unwrap();
    let empire = Empire::load_config(&write_config(dir.path(), "")).unwrap();
    let prefixes: Vec<_> = empire.sections().iter().map(|s| s.manual_prefix()).collect();
    assert_eq!(prefixes, ["ASVS", "I", "M", "W"]);
    assert_eq!(empire.controls().count(), 3 + 2 + 3 + 3);
    assert!(empire.duplicate_uids().is_empty());
}

#[test]
fn asvs_field_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let empire = Empire::load_config(&write_config(dir.path(), "")).unwrap();
    let control = empire.find_by_uid("ASVS-V1.1.1").unwrap();
    assert_eq!(control.cwe, vec![79]);
    assert_eq!(control.nist, vec!["SC-1".to_string()]);
    assert_eq!(control.state(), ControlState::Unchecked);
    assert_eq!(control.levels, vec!["L2".to_string(), "L3".to_string()]);

    let section = &empire.sections()[0];
    assert_eq!(section.data_shortname(), "ASVS");
    assert_eq!(section.data_version(), "4.0.3");
}

#[test]
fn isvs_is_flattened_under_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    let empire = Empire::load_config(&write_config(dir.path(), "")).unwrap();
    let section = &empire.sections()[1];
    assert_eq!(section.groups().len(), 1);
    let group = &section.groups()[0];
    assert_eq!(group.shortcode, PLACEHOLDER);
    assert_eq!(group.items.len(), 1);
    assert_eq!(group.items[0].controls.len(), 2);
    assert!(empire.find_by_uid("I-1.1.2").unwrap().cwe.is_empty());
}

#[test]
fn masvs_statement_is_seeded() {
    let dir = tempfile::tempdir().unwrap();
    let empire = Empire::load_config(&write_config(dir.path(), "")).unwrap();
    let control = empire.find_by_uid("M-MASVS-STORAGE-1").unwrap();
    assert_eq!(control.statement(), Some("The app securely stores sensitive data."));
    assert_eq!(control.state(), ControlState::Unchecked);
    assert_eq!(empire.sections()[2].data_version(), "v2.0.0");
}

#[test]
fn wstg_shortcodes_are_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "");
    let first = Empire::load_config(&config).unwrap();
    let second = Empire::load_config(&config).unwrap();
    let uids = |empire: &Empire| -> Vec<String> {
        empire.sections()[3].controls().map(|c| c.uid()).collect()
    };
    assert_eq!(uids(&first), uids(&second));

    let objective = "Identify the third-party sources of information leakage.";
    let uid = format!("W-{}", cbx_core::sha256_hex(objective));
    assert!(first.find_by_uid(&uid).is_some());

    let groups: Vec<_> = first.sections()[3].groups().iter().map(|g| g.shortcode.as_str()).collect();
    assert_eq!(groups, ["WSTG-INFO", "WSTG-CONF"]);
}

#[test]
fn round_trip_through_database() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "");
    let mut empire = Empire::load_config(&config).unwrap();
    assert_eq!(
        empire.mark("ASVS-V2.1.1", "checked", "ok"),
        MarkOutcome::Applied(ControlState::Checked)
    );
    assert!(empire.save_database().unwrap());

    let reloaded = Empire::load_config(&config).unwrap();
    let control = reloaded.find_by_uid("ASVS-V2.1.1").unwrap();
    assert_eq!(control.state(), ControlState::Checked);
    assert_eq!(control.statement(), Some("ok"));
    assert_eq!(state(&reloaded, "ASVS-V2.1.2"), ControlState::Unchecked);
}

#[test]
fn tag_override_without_database_entry() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "[project_tags]\nhas_login = false\n");
    let empire = Empire::load_config(&config).unwrap();
    for uid in ["ASVS-V2.1.1", "ASVS-V2.1.2"] {
        let control = empire.find_by_uid(uid).unwrap();
        assert_eq!(control.state(), ControlState::NotRelevant);
        assert_eq!(control.statement(), Some(NOT_REQUIRED_STATEMENT));
    }
    assert_eq!(state(&empire, "ASVS-V1.1.1"), ControlState::Unchecked);
}

#[test]
fn database_overrides_tag_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "[project_tags]\nhas_login = false\n");
    StateDatabase {
        controls: vec![StateRecord {
            uid: "ASVS-V2.1.1".to_string(),
            state: "checked".to_string(),
            statement: "login is in scope after all".to_string(),
        }],
    }
    .save(&dir.path().join("state.toml"))
    .unwrap();

    let empire = Empire::load_config(&config).unwrap();
    assert_eq!(state(&empire, "ASVS-V2.1.1"), ControlState::Checked);
    assert_eq!(state(&empire, "ASVS-V2.1.2"), ControlState::NotRelevant);
}

#[test]
fn true_tag_has_no_effect() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "[project_tags]\nhas_login = true\nis_mobile_app = false\n");
    let empire = Empire::load_config(&config).unwrap();
    assert_eq!(state(&empire, "ASVS-V2.1.1"), ControlState::Unchecked);
    assert_eq!(state(&empire, "M-MASVS-CRYPTO-1"), ControlState::NotRelevant);
}

#[test]
fn project_tag_patterns_extend_builtin_table() {
    let dir = tempfile::tempdir().unwrap();
    let extra = "[project_tags]\nis_iot = false\n\n[tag_patterns]\nis_iot = [\"I-*\"]\n";
    let empire = Empire::load_config(&write_config(dir.path(), extra)).unwrap();
    assert_eq!(state(&empire, "I-1.1.1"), ControlState::NotRelevant);
    assert_eq!(state(&empire, "I-1.1.2"), ControlState::NotRelevant);
}

#[test]
fn unknown_uid_mark_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut empire = Empire::load_config(&write_config(dir.path(), "")).unwrap();
    let before = empire.to_representation();
    assert_eq!(empire.mark("NOPE-1.1.1", "checked", "x"), MarkOutcome::UnknownUid);
    assert_eq!(empire.to_representation(), before);
}

#[test]
fn invalid_state_leaves_control_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut empire = Empire::load_config(&write_config(dir.path(), "")).unwrap();
    empire.mark("ASVS-V1.1.1", "not_relevant", "");
    let outcome = empire.mark("ASVS-V1.1.1", "bogus", "x");
    assert!(matches!(outcome, MarkOutcome::Rejected(_)));
    assert_eq!(state(&empire, "ASVS-V1.1.1"), ControlState::NotRelevant);
}

#[test]
fn stale_database_entries_are_dropped_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "");
    let db_path = dir.path().join("state.toml");
    StateDatabase {
        controls: vec![StateRecord {
            uid: "ASVS-V99.1.1".to_string(),
            state: "checked".to_string(),
            statement: String::new(),
        }],
    }
    .save(&db_path)
    .unwrap();

    let empire = Empire::load_config(&config).unwrap();
    empire.save_database().unwrap();
    let saved = StateDatabase::load(&db_path).unwrap().unwrap();
    assert_eq!(saved.controls.len(), empire.controls().count());
    assert!(saved.controls.iter().all(|r| r.uid != "ASVS-V99.1.1"));
}

#[test]
fn representation_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let empire = Empire::load_config(&write_config(dir.path(), "")).unwrap();
    assert_eq!(empire.to_representation(), empire.to_representation());
}

#[test]
fn missing_data_file_names_the_section() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        "project = \"p\"\n[sections.web]\nname = \"n\"\nprefix = \"P\"\ndescription = \"d\"\n\
         file_type = \"ASVS_JSON\"\ndata_file = \"absent.json\"\n",
    )
    .unwrap();
    let err = Empire::load_config(&config).unwrap_err();
    assert!(matches!(err, EmpireError::SectionLoad { ref key, .. } if key == "web"));
    assert!(format!("{err}").contains("absent.json"));
}

#[test]
fn config_missing_required_key_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "project = \"p\"\n").unwrap();
    let err = Empire::load_config(&config).unwrap_err();
    assert!(matches!(err, EmpireError::ConfigParse { .. }));
    assert!(format!("{err}").contains("sections"));
}

#[test]
fn unknown_file_type_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        "project = \"p\"\n[sections.web]\nname = \"n\"\nprefix = \"P\"\ndescription = \"d\"\n\
         file_type = \"PDF\"\ndata_file = \"x.pdf\"\n",
    )
    .unwrap();
    assert!(matches!(
        Empire::load_config(&config).unwrap_err(),
        EmpireError::ConfigParse { .. }
    ));
}
