//! End-to-end tests for the `exmap` binary
//!
//! Each test builds a throwaway library folder of empty sample containers and
//! an empty config file so that local or user settings cannot leak in.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const LIBRARY: &[&str] = &[
    "Iconica_Iconica_SP_Violins1_Staccato.vstsound",
    "Iconica_Iconica_SP_Violins1_Legato.vstsound",
    "Iconica_Iconica_SP_Violins1_Tremolo.vstsound",
    "Iconica_Iconica_SP_Horns_Long.vstsound",
    "Iconica_Iconica_SP_Kazoo_Long.vstsound",
    "Iconica_Other_Violins1_Legato.vstsound",
    "readme.txt",
];

struct Fixture {
    _temp: TempDir,
    library: PathBuf,
    output: PathBuf,
    config: PathBuf,
}

fn fixture(files: &[&str], config: &str) -> Fixture {
    let temp = TempDir::new().unwrap();
    let library = temp.path().join("library");
    fs::create_dir(&library).unwrap();
    for name in files {
        fs::write(library.join(name), b"").unwrap();
    }
    let config_path = temp.path().join("exmap.toml");
    fs::write(&config_path, config).unwrap();

    Fixture {
        output: temp.path().join("maps"),
        library,
        config: config_path,
        _temp: temp,
    }
}

fn exmap(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("exmap").unwrap();
    for var in [
        "RUST_LOG",
        "EXMAP_MARKER",
        "EXMAP_EXTENSION",
        "EXMAP_OUTPUT_DIR",
        "EXMAP_OUTPUT_EXTENSION",
        "EXMAP_ORDERING",
        "EXMAP_LOG_LEVEL",
    ] {
        cmd.env_remove(var);
    }
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn generate_writes_both_variants() {
    let fx = fixture(LIBRARY, "");

    exmap(&fx.config)
        .arg("generate")
        .arg(&fx.library)
        .arg("-o")
        .arg(&fx.output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Violins1"))
        .stdout(predicate::str::contains(
            "Kazoo_Long.vstsound (no known instrument after marker)",
        ))
        .stderr(predicate::str::contains("Saved:"));

    for name in [
        "Violins1_directional.expressionmap",
        "Violins1_attribute.expressionmap",
        "Horns_directional.expressionmap",
        "Horns_attribute.expressionmap",
    ] {
        assert!(fx.output.join(name).is_file(), "missing {}", name);
    }

    let xml =
        fs::read_to_string(fx.output.join("Violins1_directional.expressionmap")).unwrap();
    assert!(xml.contains("Violins1 Expression Map (Directional)"));
    let legato = xml.find("value=\"Legato\"").unwrap();
    let staccato = xml.find("value=\"Staccato\"").unwrap();
    assert!(legato < staccato);
}

#[test]
fn generate_single_variant_and_instrument() {
    let fx = fixture(LIBRARY, "");

    exmap(&fx.config)
        .arg("generate")
        .arg(&fx.library)
        .arg("-o")
        .arg(&fx.output)
        .arg("--variant")
        .arg("attribute")
        .arg("-i")
        .arg("Violins I")
        .assert()
        .success();

    assert!(fx.output.join("Violins1_attribute.expressionmap").is_file());
    assert!(!fx.output.join("Violins1_directional.expressionmap").exists());
    assert!(!fx.output.join("Horns_attribute.expressionmap").exists());
}

#[test]
fn generate_continues_past_missing_instrument() {
    let fx = fixture(LIBRARY, "");

    exmap(&fx.config)
        .arg("generate")
        .arg(&fx.library)
        .arg("-o")
        .arg(&fx.output)
        .arg("-i")
        .arg("Celli")
        .arg("-i")
        .arg("Horns")
        .assert()
        .success()
        .stdout(predicate::str::contains("instrument not found: Celli"));

    assert!(fx.output.join("Horns_directional.expressionmap").is_file());
}

#[test]
fn generate_fails_when_nothing_written() {
    let fx = fixture(LIBRARY, "");

    exmap(&fx.config)
        .arg("generate")
        .arg(&fx.library)
        .arg("-o")
        .arg(&fx.output)
        .arg("-i")
        .arg("Celli")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No expression maps were written"));
}

#[test]
fn generate_missing_folder_fails() {
    let fx = fixture(&[], "");

    exmap(&fx.config)
        .arg("generate")
        .arg(fx.library.join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read folder"));
}

#[test]
fn generate_uses_configured_library() {
    let fx = fixture(
        &[
            "X_Series_SP_Celli_Pizzicato.ext",
            "X_Series_SP_Celli_Sustain.ext",
        ],
        r#"
[library]
marker = "_Series_SP_"
extension = "ext"

[output]
extension = "xml"
variants = ["directional"]
"#,
    );

    exmap(&fx.config)
        .arg("generate")
        .arg(&fx.library)
        .arg("-o")
        .arg(&fx.output)
        .assert()
        .success();

    assert!(fx.output.join("Celli_directional.xml").is_file());
    assert!(!fx.output.join("Celli_attribute.xml").exists());
}

#[test]
fn list_shows_triggers_and_notes() {
    let fx = fixture(LIBRARY, "");

    exmap(&fx.config)
        .arg("list")
        .arg(&fx.library)
        .assert()
        .success()
        .stdout(predicate::str::contains("Violins I"))
        .stdout(predicate::str::contains("C-2"))
        .stdout(predicate::str::contains("Legato"));

    assert!(!fx.output.exists());
}

#[test]
fn list_json() {
    let fx = fixture(LIBRARY, "");

    let output = exmap(&fx.config)
        .arg("list")
        .arg(&fx.library)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let instruments = listing["instruments"].as_array().unwrap();
    assert_eq!(instruments.len(), 2);

    let violins = instruments
        .iter()
        .find(|i| i["instrument"] == "Violins1")
        .unwrap();
    let first = &violins["articulations"][0];
    assert_eq!(first["name"], "Legato");
    assert_eq!(first["trigger"], 0);
    assert_eq!(first["category"], "long");
    assert_eq!(first["note"], "C-2");

    assert_eq!(listing["skipped"].as_array().unwrap().len(), 2);
    assert_eq!(listing["ignored"], 1);
}

#[test]
fn list_applies_configured_phrases() {
    let fx = fixture(
        &[
            "Iconica_Iconica_SP_Celli_Legato.vstsound",
            "Iconica_Iconica_SP_Celli_Chops.vstsound",
        ],
        r#"
[classify.phrases]
Legato = "ornament"
Chop = "short"
"#,
    );

    let output = exmap(&fx.config)
        .arg("list")
        .arg(&fx.library)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let articulations = listing["instruments"][0]["articulations"].as_array().unwrap();
    let category = |name: &str| {
        articulations
            .iter()
            .find(|a| a["name"] == name)
            .map(|a| a["category"].clone())
            .unwrap()
    };
    assert_eq!(category("Legato"), "ornament");
    assert_eq!(category("Chops"), "short");
}

#[test]
fn config_prints_effective_toml() {
    let fx = fixture(&[], "[ordering]\npolicy = \"lexicographic\"\n");

    exmap(&fx.config)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Loaded from:"))
        .stdout(predicate::str::contains("policy = \"lexicographic\""))
        .stdout(predicate::str::contains("[output]"));
}

#[test]
fn config_rejects_bad_file() {
    let fx = fixture(&[], "[ordering]\npolicy = \"random\"\n");

    exmap(&fx.config)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}
