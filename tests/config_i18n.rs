use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use hydraulics_toolbox::config::{self, Config, ConfigError, UnitSystem};
use hydraulics_toolbox::format::DecimalSeparator;
use hydraulics_toolbox::i18n::{keys, resolve_language, Language, Translator};
use hydraulics_toolbox::quantity::QuantityKind;
use hydraulics_toolbox::solver::{EquationMode, Regime};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

#[test]
fn missing_config_is_created_with_defaults() {
    let dir = unique_temp_dir("hydraulics_config_default");
    let path = dir.join("config.toml");
    let cfg = config::load_or_default(&path).expect("load");
    assert_eq!(cfg, Config::default());
    assert!(path.exists());

    let again = config::load_or_default(&path).expect("reload");
    assert_eq!(again, cfg);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn saved_config_round_trips() {
    let dir = unique_temp_dir("hydraulics_config_save");
    let path = dir.join("config.toml");
    let mut cfg = Config::default();
    cfg.set_unit_system(UnitSystem::Imperial);
    cfg.language = "de".to_string();
    cfg.decimal_separator = Some(DecimalSeparator::Comma);
    cfg.gravity = 9.80665;
    cfg.save(&path).expect("save");

    let loaded = config::load_or_default(&path).expect("load");
    assert_eq!(loaded, cfg);
    assert_eq!(loaded.unit_for(QuantityKind::Length), "ft");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn partial_config_fills_defaults() {
    let dir = unique_temp_dir("hydraulics_config_partial");
    fs::create_dir_all(&dir).expect("dir");
    let path = dir.join("config.toml");
    fs::write(&path, "language = \"ko\"\n").expect("write");
    let cfg = config::load_or_default(&path).expect("load");
    assert_eq!(cfg.language, "ko");
    assert_eq!(cfg.gravity, config::DEFAULT_GRAVITY);
    assert_eq!(cfg.unit_for(QuantityKind::Pressure), "Pa");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn non_positive_gravity_is_rejected() {
    let dir = unique_temp_dir("hydraulics_config_gravity");
    fs::create_dir_all(&dir).expect("dir");
    let path = dir.join("config.toml");
    fs::write(&path, "gravity = 0.0\n").expect("write");
    assert!(matches!(
        config::load_or_default(&path),
        Err(ConfigError::Invalid(_))
    ));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn explicit_language_wins() {
    assert_eq!(resolve_language("ko", Some("de")), "ko-kr");
    assert_eq!(resolve_language("auto", Some("de")), "de-de");
    assert_eq!(resolve_language("EN", None), "en-us");
}

#[test]
fn translator_uses_pack_and_falls_back() {
    let de = Translator::new("de-de");
    assert_eq!(de.language(), Language::De);
    assert_eq!(de.language().decimal_separator(), DecimalSeparator::Comma);
    assert_ne!(de.t(keys::MAIN_MENU_EXIT), keys::MAIN_MENU_EXIT);

    let unknown = Translator::new("xx");
    assert_eq!(unknown.language(), Language::En);
    assert_eq!(unknown.t("no.such.key"), "no.such.key");
}

#[test]
fn every_pack_covers_the_english_keys() {
    let en = Translator::new("en");
    for code in ["ko", "de"] {
        let tr = Translator::new(code);
        for mode in EquationMode::ALL {
            assert_ne!(tr.mode_name(*mode), en.mode_name(*mode), "{code} {mode}");
            for field in mode.spec().fields {
                assert_ne!(tr.field_label(*mode, field.id), field.id, "{code} {mode} {}", field.id);
            }
        }
    }
}

#[test]
fn field_labels_prefer_mode_specific_names() {
    let tr = Translator::new("en");
    assert_eq!(tr.field_label(EquationMode::Froude, "T"), "Top width T");
    assert_eq!(tr.field_label(EquationMode::BernoulliCavitation, "T"), "Water temperature T");
    assert_eq!(tr.field_label(EquationMode::Continuity, "V1"), "Velocity V1");
    assert_eq!(tr.field_label(EquationMode::Continuity, "zz"), "zz");
    assert_eq!(tr.regime_name(Regime::Supercritical), "Supercritical");
    assert_eq!(tr.output_label("Q"), "Flow rate Q");
}

#[test]
fn placeholders_are_filled() {
    let tr = Translator::new("en");
    let prompt = tr.t_with(
        keys::PROMPT_FIELD,
        &[("label", "Velocity V1"), ("unit", "m/s"), ("current", "")],
    );
    assert_eq!(prompt, "Velocity V1 [m/s]: ");
}
