use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use hydraulics_toolbox::app::{self, AppError, Session};
use hydraulics_toolbox::config::Config;
use hydraulics_toolbox::i18n::keys;
use hydraulics_toolbox::solver::EquationMode;

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn session(prefix: &str, lang: &str) -> (Session, PathBuf) {
    let dir = unique_temp_dir(prefix);
    let cfg = Config {
        data_dir: dir.join("data"),
        ..Config::default()
    };
    (Session::new(cfg, dir.join("config.toml"), lang), dir)
}

fn fill(mode: EquationMode, s: &Session, values: &[(&str, &str)]) -> Vec<hydraulics_toolbox::field::Field> {
    let mut fields = s.blank_fields(mode);
    for (id, v) in values {
        app::apply_assignment(mode, &mut fields, id, v, None).expect("assign");
    }
    fields
}

#[test]
fn blank_fields_carry_defaults() {
    let (s, _) = session("hydraulics_session_defaults", "en");
    let fields = s.blank_fields(EquationMode::BernoulliIdeal);
    let raw = |id: &str| fields.iter().find(|f| f.id == id).map(|f| f.raw_value.clone());
    assert_eq!(raw("g").as_deref(), Some("9.81"));
    assert_eq!(raw("alpha1").as_deref(), Some("1"));
    assert_eq!(raw("P1").as_deref(), Some(""));
    assert_eq!(fields[0].unit, "Pa");
}

#[test]
fn field_assignments_parse() {
    let (id, value, unit) = app::parse_field_assignment("V1=2,5:ft/s").expect("parse");
    assert_eq!((id.as_str(), value.as_str(), unit.as_deref()), ("V1", "2,5", Some("ft/s")));

    let (_, value, unit) = app::parse_field_assignment("A1 = 3").expect("parse");
    assert_eq!((value.as_str(), unit), ("3", None));

    assert!(matches!(
        app::parse_field_assignment("A1"),
        Err(AppError::InvalidArgument(_))
    ));
    assert!(app::parse_field_assignment("=3").is_err());
}

#[test]
fn interactive_input_splits_unit() {
    assert_eq!(app::parse_field_input(" 2,5 ft "), ("2,5".to_string(), Some("ft".to_string())));
    assert_eq!(app::parse_field_input("7"), ("7".to_string(), None));
}

#[test]
fn assignment_rejects_unknown_field_and_unit() {
    let (s, _) = session("hydraulics_session_assign", "en");
    let mode = EquationMode::Continuity;
    let mut fields = s.blank_fields(mode);
    assert!(matches!(
        app::apply_assignment(mode, &mut fields, "Q", "1", None),
        Err(AppError::UnknownField { .. })
    ));
    assert!(matches!(
        app::apply_assignment(mode, &mut fields, "V1", "1", Some("kg")),
        Err(AppError::Conversion(_))
    ));
    app::apply_assignment(mode, &mut fields, "V1", "1", Some("ft/s")).expect("assign");
    assert_eq!(fields[1].unit, "ft/s");
}

#[test]
fn render_and_record_continuity() {
    let (s, dir) = session("hydraulics_session_render", "en");
    let mode = EquationMode::Continuity;
    let fields = fill(mode, &s, &[("A1", "2"), ("V1", "3"), ("A2", "1")]);
    let result = app::calculate(mode, &fields).expect("solve");

    let lines = s.render(&result, &fields);
    assert_eq!(lines[0], "Calculated: Velocity V2 = 6 m/s");
    assert_eq!(lines[1], "Flow rate Q = 6 m³/s");
    assert_eq!(app::summary(&result), "V2=6; Q=6");

    let notice = s.record(&s.history, &fields, &result, keys::CALC_SAVED);
    assert_eq!(notice, s.tr.t(keys::CALC_SAVED));
    let records = s.history.list().expect("list");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].calculation_type, "continuity");
    assert_eq!(records[0].result, "V2=6; Q=6");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn german_output_uses_decimal_comma() {
    let (s, _) = session("hydraulics_session_de", "de");
    let mode = EquationMode::Continuity;
    let fields = fill(mode, &s, &[("A1", "1"), ("V1", "1,5"), ("A2", "1")]);
    let result = app::calculate(mode, &fields).expect("solve");
    assert_eq!(result.value_display, "1.5");
    let lines = s.render(&result, &fields);
    assert!(lines[0].contains("= 1,5 m/s"), "{lines:?}");
}

#[test]
fn render_reports_missing_fields_and_risk() {
    let (s, _) = session("hydraulics_session_missing", "en");
    let mode = EquationMode::Continuity;
    let fields = fill(mode, &s, &[("A1", "2")]);
    let result = app::calculate(mode, &fields).expect("solve");
    let lines = s.render(&result, &fields);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with(&s.tr.t(keys::CALC_INSUFFICIENT)));
    assert!(lines[0].contains("Velocity V1"));

    let mode = EquationMode::BernoulliCavitation;
    let fields = fill(
        mode,
        &s,
        &[("Pabs", "101325"), ("z", "-5"), ("Pv", "2339"), ("hL", "1"), ("rho", "1000"), ("NPSHr", "4")],
    );
    let result = app::calculate(mode, &fields).expect("solve");
    let lines = s.render(&result, &fields);
    assert!(lines.contains(&s.tr.t(keys::CALC_CAVITATION_RISK)), "{lines:?}");
}

#[test]
fn failed_save_does_not_lose_result() {
    let dir = unique_temp_dir("hydraulics_session_blocked");
    fs::create_dir_all(&dir).expect("dir");
    // 데이터 디렉터리 자리에 파일이 있으면 기록이 실패한다.
    let blocker = dir.join("data");
    fs::write(&blocker, "").expect("blocker");
    let cfg = Config {
        data_dir: blocker,
        ..Config::default()
    };
    let s = Session::new(cfg, dir.join("config.toml"), "en");

    let mode = EquationMode::Continuity;
    let fields = fill(mode, &s, &[("A1", "2"), ("V1", "3"), ("A2", "1")]);
    let result = app::calculate(mode, &fields).expect("solve");
    let notice = s.record(&s.history, &fields, &result, keys::CALC_SAVED);
    assert!(notice.starts_with(&s.tr.t(keys::CALC_SAVE_FAILED)), "{notice}");
    assert_eq!(result.value_display, "6");

    let _ = fs::remove_dir_all(&dir);
}
