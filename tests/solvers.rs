use hydraulics_toolbox::field::Field;
use hydraulics_toolbox::quantity::QuantityKind;
use hydraulics_toolbox::solver::continuity::{flow_area, CrossSection, Fill};
use hydraulics_toolbox::solver::{
    self, bernoulli, DomainError, EquationMode, Regime, SolveError, SolveStatus,
};
use proptest::prelude::*;

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual} (tol {tol})"
    );
}

fn f(id: &str, raw: &str, unit: &str, kind: QuantityKind) -> Field {
    Field::new(id, raw, unit, kind)
}

fn continuity(a1: &str, v1: &str, a2: &str, v2: &str) -> Vec<Field> {
    vec![
        f("A1", a1, "m²", QuantityKind::Area),
        f("V1", v1, "m/s", QuantityKind::Velocity),
        f("A2", a2, "m²", QuantityKind::Area),
        f("V2", v2, "m/s", QuantityKind::Velocity),
    ]
}

#[test]
fn continuity_solves_downstream_velocity() {
    let res = solver::solve(EquationMode::Continuity, &continuity("2", "3", "1", "")).expect("solve");
    assert_eq!(res.status, SolveStatus::Solved);
    assert_eq!(res.unknown_field_id.as_deref(), Some("V2"));
    assert_eq!(res.value_display, "6");
    assert_close(res.output("Q").expect("flow rate").value_si, 6.0, 1e-12);
}

#[test]
fn continuity_displays_unknown_in_field_unit() {
    let mut fields = continuity("2", "3", "1", "");
    fields[3].unit = "km/h".to_string();
    let res = solver::solve(EquationMode::Continuity, &fields).expect("solve");
    assert_close(res.value_si.expect("si"), 6.0, 1e-12);
    let shown: f64 = res.value_display.parse().expect("display");
    assert_close(shown, 21.6, 1e-9);
}

#[test]
fn continuity_accepts_comma_decimal() {
    let res = solver::solve(EquationMode::Continuity, &continuity("", "1,5", "0,5", "3")).expect("solve");
    assert_eq!(res.unknown_field_id.as_deref(), Some("A1"));
    assert_close(res.value_si.expect("si"), 1.0, 1e-12);
}

#[test]
fn continuity_two_missing_is_insufficient() {
    let res = solver::solve(EquationMode::Continuity, &continuity("2", "", "1", "abc")).expect("solve");
    assert_eq!(res.status, SolveStatus::InsufficientData);
    assert_eq!(res.invalid_field_ids, vec!["V1".to_string(), "V2".to_string()]);
    assert!(res.value_display.is_empty());
    assert!(!res.is_valid());
}

#[test]
fn continuity_all_filled_is_fully_determined() {
    let res = solver::solve(EquationMode::Continuity, &continuity("2", "3", "1", "6")).expect("solve");
    assert_eq!(res.status, SolveStatus::FullyDetermined);
    assert!(res.unknown_field_id.is_none());
    assert_close(res.output("Q").expect("flow rate").value_si, 6.0, 1e-12);
}

#[test]
fn continuity_zero_area_is_domain_error() {
    let res = solver::solve(EquationMode::Continuity, &continuity("2", "3", "0", "")).expect("solve");
    assert!(matches!(
        res.status,
        SolveStatus::Domain(DomainError::DivisionByZero { .. })
    ));
    assert!(res.value_display.is_empty());
}

#[test]
fn unknown_unit_is_hard_error() {
    let mut fields = continuity("2", "3", "1", "");
    fields[0].unit = "furlong²".to_string();
    let err = solver::solve(EquationMode::Continuity, &fields).unwrap_err();
    assert!(matches!(err, SolveError::Conversion(_)));
}

#[test]
fn kind_mismatch_is_hard_error() {
    let mut fields = continuity("2", "3", "1", "");
    fields[1] = f("V1", "3", "m", QuantityKind::Length);
    let err = solver::solve(EquationMode::Continuity, &fields).unwrap_err();
    assert!(matches!(err, SolveError::KindMismatch { .. }));
}

fn froude(v: &str, a: &str, t: &str, dh: &str) -> Vec<Field> {
    vec![
        f("V", v, "m/s", QuantityKind::Velocity),
        f("g", "9.807", "m/s²", QuantityKind::Acceleration),
        f("A", a, "m²", QuantityKind::Area),
        f("T", t, "m", QuantityKind::Length),
        f("Dh", dh, "m", QuantityKind::Length),
    ]
}

#[test]
fn froude_regimes() {
    let sub = solver::solve(EquationMode::Froude, &froude("2", "", "3", "1")).expect("solve");
    assert_eq!(sub.unknown_field_id.as_deref(), Some("A"));
    assert_close(sub.value_si.expect("area"), 3.0, 1e-12);
    assert_close(sub.output("Fr").expect("Fr").value_si, 0.638649, 1e-5);
    assert_eq!(sub.regime, Some(Regime::Subcritical));

    let critical = solver::solve(EquationMode::Froude, &froude("3.13", "3", "3", "")).expect("solve");
    assert_eq!(critical.unknown_field_id.as_deref(), Some("Dh"));
    assert_eq!(critical.regime, Some(Regime::Critical));

    let sup = solver::solve(EquationMode::Froude, &froude("5", "3", "", "1")).expect("solve");
    assert_eq!(sup.unknown_field_id.as_deref(), Some("T"));
    assert_close(sup.output("Fr").expect("Fr").value_si, 1.596621, 1e-5);
    assert_eq!(sup.regime, Some(Regime::Supercritical));
}

#[test]
fn froude_missing_velocity_is_insufficient() {
    let res = solver::solve(EquationMode::Froude, &froude("", "3", "3", "1")).expect("solve");
    assert_eq!(res.status, SolveStatus::InsufficientData);
    assert_eq!(res.invalid_field_ids, vec!["V".to_string()]);
}

#[test]
fn froude_negative_depth_is_negative_radicand() {
    let res = solver::solve(EquationMode::Froude, &froude("2", "", "3", "-1")).expect("solve");
    assert!(matches!(
        res.status,
        SolveStatus::Domain(DomainError::NegativeRadicand { .. })
    ));
}

fn energy(values: [&str; 8]) -> Vec<Field> {
    let ids = ["P1", "V1", "z1", "alpha1", "P2", "V2", "z2", "alpha2"];
    let mut fields: Vec<Field> = ids
        .iter()
        .zip(values)
        .map(|(id, v)| match *id {
            "P1" | "P2" => f(id, v, "Pa", QuantityKind::Pressure),
            "V1" | "V2" => f(id, v, "m/s", QuantityKind::Velocity),
            "z1" | "z2" => f(id, v, "m", QuantityKind::Length),
            _ => f(id, v, "", QuantityKind::Dimensionless),
        })
        .collect();
    fields.push(f("rho", "1000", "kg/m³", QuantityKind::Density));
    fields.push(f("g", "9.81", "m/s²", QuantityKind::Acceleration));
    fields
}

#[test]
fn bernoulli_ideal_solves_downstream_pressure() {
    let fields = energy(["200000", "2", "0", "1", "", "4", "1", "1"]);
    let res = solver::solve(EquationMode::BernoulliIdeal, &fields).expect("solve");
    assert_eq!(res.unknown_field_id.as_deref(), Some("P2"));
    assert_close(res.value_si.expect("P2"), 184_190.0, 1e-6);
    let e1 = res.output("E1").expect("E1").value_si;
    let e2 = res.output("E2").expect("E2").value_si;
    assert_close(e1, e2, 1e-9);
}

#[test]
fn bernoulli_ideal_solves_velocity_and_alpha() {
    let fields = energy(["200000", "2", "0", "1", "184190", "", "1", "1"]);
    let res = solver::solve(EquationMode::BernoulliIdeal, &fields).expect("solve");
    assert_eq!(res.unknown_field_id.as_deref(), Some("V2"));
    assert_close(res.value_si.expect("V2"), 4.0, 1e-9);

    let fields = energy(["200000", "2", "0", "", "184190", "4", "1", "1"]);
    let res = solver::solve(EquationMode::BernoulliIdeal, &fields).expect("solve");
    assert_eq!(res.unknown_field_id.as_deref(), Some("alpha1"));
    assert_close(res.value_si.expect("alpha1"), 1.0, 1e-9);
}

#[test]
fn bernoulli_ideal_negative_radicand() {
    let fields = energy(["100000", "0", "0", "1", "200000", "", "0", "1"]);
    let res = solver::solve(EquationMode::BernoulliIdeal, &fields).expect("solve");
    assert!(matches!(
        res.status,
        SolveStatus::Domain(DomainError::NegativeRadicand { .. })
    ));
}

#[test]
fn bernoulli_ideal_needs_fluid_properties() {
    let mut fields = energy(["200000", "2", "0", "1", "", "4", "1", "1"]);
    fields[8].raw_value.clear();
    let res = solver::solve(EquationMode::BernoulliIdeal, &fields).expect("solve");
    assert_eq!(res.status, SolveStatus::InsufficientData);
    assert_eq!(res.invalid_field_ids, vec!["rho".to_string()]);
}

fn with_losses(mut fields: Vec<Field>, f_: &str, l: &str, d: &str, k: &str, hl: &str) -> Vec<Field> {
    fields.push(f("f", f_, "", QuantityKind::Dimensionless));
    fields.push(f("L", l, "m", QuantityKind::Length));
    fields.push(f("D", d, "m", QuantityKind::Length));
    fields.push(f("K", k, "", QuantityKind::Dimensionless));
    fields.push(f("hL", hl, "m", QuantityKind::Length));
    fields
}

#[test]
fn bernoulli_losses_direct_head_loss() {
    let fields = with_losses(energy(["200000", "2", "0", "1", "", "4", "1", "1"]), "", "", "", "", "2");
    let res = solver::solve(EquationMode::BernoulliLosses, &fields).expect("solve");
    assert_eq!(res.unknown_field_id.as_deref(), Some("P2"));
    assert_close(res.value_si.expect("P2"), 164_570.0, 1e-6);
    assert_close(res.output("hL").expect("hL").value_si, 2.0, 1e-12);
}

#[test]
fn bernoulli_losses_coefficient_on_unknown_velocity() {
    let fields = with_losses(
        energy(["300000", "2", "0", "1", "200000", "", "0", "1"]),
        "0.02",
        "100",
        "0.1",
        "",
        "",
    );
    let res = solver::solve(EquationMode::BernoulliLosses, &fields).expect("solve");
    assert_eq!(res.unknown_field_id.as_deref(), Some("V2"));
    let v2 = res.value_si.expect("V2");
    assert_close(v2, (204.0_f64 / 21.0).sqrt(), 1e-9);

    let hl = res.output("hL").expect("hL").value_si;
    assert_close(hl, bernoulli::head_loss(0.02, 100.0, 0.1, 0.0, v2, 9.81).expect("hL"), 1e-12);
    let e1 = res.output("E1").expect("E1").value_si;
    let e2 = res.output("E2").expect("E2").value_si;
    assert_close(e1, e2 + hl, 1e-9);
}

#[test]
fn bernoulli_losses_without_loss_data_solves_head_loss() {
    let fields = with_losses(
        energy(["200000", "2", "0", "1", "164570", "4", "1", "1"]),
        "",
        "",
        "",
        "",
        "",
    );
    let res = solver::solve(EquationMode::BernoulliLosses, &fields).expect("solve");
    assert_eq!(res.unknown_field_id.as_deref(), Some("hL"));
    assert_close(res.value_si.expect("hL"), 2.0, 1e-9);
}

#[test]
fn bernoulli_losses_missing_loss_data_is_insufficient() {
    let fields = with_losses(energy(["200000", "2", "0", "1", "", "4", "1", "1"]), "0.02", "", "", "", "");
    let res = solver::solve(EquationMode::BernoulliLosses, &fields).expect("solve");
    assert_eq!(res.status, SolveStatus::InsufficientData);
    assert!(res.invalid_field_ids.contains(&"hL".to_string()));
    assert!(res.invalid_field_ids.contains(&"L".to_string()));
}

fn cavitation(pv: &str, t: &str, npshr: &str) -> Vec<Field> {
    vec![
        f("Pabs", "101325", "Pa", QuantityKind::Pressure),
        f("z", "2", "m", QuantityKind::Length),
        f("Pv", pv, "Pa", QuantityKind::Pressure),
        f("T", t, "°C", QuantityKind::Temperature),
        f("hL", "0.5", "m", QuantityKind::Length),
        f("rho", "1000", "kg/m³", QuantityKind::Density),
        f("g", "9.81", "m/s²", QuantityKind::Acceleration),
        f("NPSHr", npshr, "m", QuantityKind::Length),
    ]
}

#[test]
fn vapor_pressure_at_twenty_celsius() {
    assert_close(bernoulli::water_vapor_pressure(20.0), 2329.6, 1.0);
    assert_eq!(bernoulli::water_vapor_pressure(120.0), 0.0);
}

#[test]
fn cavitation_fills_vapor_pressure_from_temperature() {
    let res = solver::solve(EquationMode::BernoulliCavitation, &cavitation("", "20", "3")).expect("solve");
    assert_eq!(res.unknown_field_id.as_deref(), Some("Pv"));
    let pv = res.value_si.expect("Pv");
    assert_close(pv, bernoulli::water_vapor_pressure(20.0), 1e-9);

    let npsha = res.output("NPSHa").expect("NPSHa").value_si;
    assert_close(npsha, (101_325.0 - pv) / 9810.0 + 2.0 - 0.5, 1e-9);
    assert_close(res.output("margin").expect("margin").value_si, npsha / 3.0, 1e-12);
}

#[test]
fn cavitation_with_given_vapor_pressure() {
    let res = solver::solve(EquationMode::BernoulliCavitation, &cavitation("2339", "", "")).expect("solve");
    assert_eq!(res.status, SolveStatus::Solved);
    assert!(res.unknown_field_id.is_none());
    assert!(res.output("margin").is_none());
    assert_close(
        res.output("NPSHa").expect("NPSHa").value_si,
        (101_325.0 - 2339.0) / 9810.0 + 1.5,
        1e-9,
    );
}

#[test]
fn cavitation_without_vapor_data_is_insufficient() {
    let res = solver::solve(EquationMode::BernoulliCavitation, &cavitation("", "", "")).expect("solve");
    assert_eq!(res.status, SolveStatus::InsufficientData);
    assert_eq!(res.invalid_field_ids, vec!["Pv".to_string(), "T".to_string()]);
}

fn reynolds(v: &str, rho: &str, mu: &str, nu: &str) -> Vec<Field> {
    vec![
        f("V", v, "m/s", QuantityKind::Velocity),
        f("D", "0.1", "m", QuantityKind::Length),
        f("rho", rho, "kg/m³", QuantityKind::Density),
        f("mu", mu, "Pa·s", QuantityKind::DynamicViscosity),
        f("nu", nu, "m²/s", QuantityKind::KinematicViscosity),
    ]
}

#[test]
fn reynolds_fills_kinematic_viscosity() {
    let res = solver::solve(EquationMode::Reynolds, &reynolds("1", "1000", "0.001", "")).expect("solve");
    assert_eq!(res.unknown_field_id.as_deref(), Some("nu"));
    assert_close(res.value_si.expect("nu"), 1e-6, 1e-15);
    assert_close(res.output("Re").expect("Re").value_si, 1e5, 1e-6);
    assert_eq!(res.regime, Some(Regime::Turbulent));
}

#[test]
fn reynolds_fills_density_and_classifies() {
    let res = solver::solve(EquationMode::Reynolds, &reynolds("0.01", "", "0.001", "0.000001")).expect("solve");
    assert_eq!(res.unknown_field_id.as_deref(), Some("rho"));
    assert_close(res.value_si.expect("rho"), 1000.0, 1e-9);
    assert_close(res.output("Re").expect("Re").value_si, 1000.0, 1e-9);
    assert_eq!(res.regime, Some(Regime::Laminar));

    let res = solver::solve(EquationMode::Reynolds, &reynolds("0.03", "1000", "", "1e-6")).expect("solve");
    assert_eq!(res.unknown_field_id.as_deref(), Some("mu"));
    assert_eq!(res.regime, Some(Regime::Transitional));
}

#[test]
fn reynolds_needs_two_properties() {
    let res = solver::solve(EquationMode::Reynolds, &reynolds("1", "", "", "1e-6")).expect("solve");
    assert_eq!(res.status, SolveStatus::InsufficientData);
    assert_eq!(res.invalid_field_ids, vec!["rho".to_string(), "mu".to_string()]);
}

#[test]
fn flow_area_shapes() {
    let full = flow_area(CrossSection::Circular { diameter: 2.0 }, Fill::Total).expect("area");
    assert_close(full, std::f64::consts::PI, 1e-12);

    let half = flow_area(CrossSection::Circular { diameter: 2.0 }, Fill::Partial { height: 1.0 })
        .expect("area");
    assert_close(half, std::f64::consts::FRAC_PI_2, 1e-12);

    let clamped = flow_area(CrossSection::Square { side: 2.0 }, Fill::Partial { height: 5.0 })
        .expect("area");
    assert_close(clamped, 4.0, 1e-12);

    let rect = flow_area(
        CrossSection::Rectangular { width: 3.0, height: 2.0 },
        Fill::Partial { height: 0.5 },
    )
    .expect("area");
    assert_close(rect, 1.5, 1e-12);

    assert!(flow_area(CrossSection::Circular { diameter: -1.0 }, Fill::Total).is_err());
}

#[test]
fn mode_keys_round_trip() {
    for mode in EquationMode::ALL {
        let parsed: EquationMode = mode.key().parse().expect("mode");
        assert_eq!(parsed, *mode);
    }
    assert_eq!("npsh".parse::<EquationMode>().expect("alias"), EquationMode::BernoulliCavitation);
    assert!("manning".parse::<EquationMode>().is_err());
}

proptest! {
    #[test]
    fn continuity_conserves_flow(a1 in 0.01_f64..100.0, v1 in 0.01_f64..50.0, a2 in 0.01_f64..100.0) {
        let fields = continuity(&a1.to_string(), &v1.to_string(), &a2.to_string(), "");
        let res = solver::solve(EquationMode::Continuity, &fields).expect("solve");
        let v2 = res.value_si.expect("V2");
        prop_assert!((a2 * v2 - a1 * v1).abs() <= 1e-9 * (a1 * v1).max(1.0));
    }
}
