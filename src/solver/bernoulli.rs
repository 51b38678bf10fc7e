//! 일반 에너지 방정식(베르누이).
//!
//! 단면마다 `E = P/γ + α·V²/(2g) + z` 이고, 이상 유동은 `E1 = E2`,
//! 손실 모드는 `E1 = E2 + hL` 이다. 캐비테이션 모드는 흡입측 유효 NPSH 를
//! 계산한다.

use super::{
    divide, sqrt_checked, DomainError, EquationMode, EquationSpec, FieldDefault, FieldSpec,
    Knowns, Resolution, Solved, Unsolved,
};
use crate::quantity::QuantityKind;

pub const PRESSURE_1: &str = "P1";
pub const VELOCITY_1: &str = "V1";
pub const ELEVATION_1: &str = "z1";
pub const ALPHA_1: &str = "alpha1";
pub const PRESSURE_2: &str = "P2";
pub const VELOCITY_2: &str = "V2";
pub const ELEVATION_2: &str = "z2";
pub const ALPHA_2: &str = "alpha2";
pub const DENSITY: &str = "rho";
pub const GRAVITY: &str = "g";

pub const FRICTION_FACTOR: &str = "f";
pub const PIPE_LENGTH: &str = "L";
pub const DIAMETER: &str = "D";
pub const MINOR_LOSS: &str = "K";
pub const HEAD_LOSS: &str = "hL";

pub const ABSOLUTE_PRESSURE: &str = "Pabs";
pub const SUCTION_ELEVATION: &str = "z";
pub const VAPOR_PRESSURE: &str = "Pv";
pub const TEMPERATURE: &str = "T";
pub const NPSH_REQUIRED: &str = "NPSHr";

pub const TOTAL_HEAD_1: &str = "E1";
pub const TOTAL_HEAD_2: &str = "E2";
pub const NPSH_AVAILABLE: &str = "NPSHa";
pub const NPSH_MARGIN: &str = "margin";

/// NPSHa/NPSHr 가 이 값보다 작으면 캐비테이션 위험으로 본다.
pub const MIN_NPSH_MARGIN: f64 = 1.1;

const ENERGY_IDS: [&str; 8] = [
    PRESSURE_1,
    VELOCITY_1,
    ELEVATION_1,
    ALPHA_1,
    PRESSURE_2,
    VELOCITY_2,
    ELEVATION_2,
    ALPHA_2,
];

const IDEAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(PRESSURE_1, QuantityKind::Pressure),
    FieldSpec::new(VELOCITY_1, QuantityKind::Velocity),
    FieldSpec::new(ELEVATION_1, QuantityKind::Length),
    FieldSpec::new(ALPHA_1, QuantityKind::Dimensionless).with_default(FieldDefault::Unity),
    FieldSpec::new(PRESSURE_2, QuantityKind::Pressure),
    FieldSpec::new(VELOCITY_2, QuantityKind::Velocity),
    FieldSpec::new(ELEVATION_2, QuantityKind::Length),
    FieldSpec::new(ALPHA_2, QuantityKind::Dimensionless).with_default(FieldDefault::Unity),
    FieldSpec::new(DENSITY, QuantityKind::Density),
    FieldSpec::new(GRAVITY, QuantityKind::Acceleration).with_default(FieldDefault::Gravity),
];

const LOSSES_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(PRESSURE_1, QuantityKind::Pressure),
    FieldSpec::new(VELOCITY_1, QuantityKind::Velocity),
    FieldSpec::new(ELEVATION_1, QuantityKind::Length),
    FieldSpec::new(ALPHA_1, QuantityKind::Dimensionless).with_default(FieldDefault::Unity),
    FieldSpec::new(PRESSURE_2, QuantityKind::Pressure),
    FieldSpec::new(VELOCITY_2, QuantityKind::Velocity),
    FieldSpec::new(ELEVATION_2, QuantityKind::Length),
    FieldSpec::new(ALPHA_2, QuantityKind::Dimensionless).with_default(FieldDefault::Unity),
    FieldSpec::new(DENSITY, QuantityKind::Density),
    FieldSpec::new(GRAVITY, QuantityKind::Acceleration).with_default(FieldDefault::Gravity),
    FieldSpec::new(FRICTION_FACTOR, QuantityKind::Dimensionless),
    FieldSpec::new(PIPE_LENGTH, QuantityKind::Length),
    FieldSpec::new(DIAMETER, QuantityKind::Length),
    FieldSpec::new(MINOR_LOSS, QuantityKind::Dimensionless),
    FieldSpec::new(HEAD_LOSS, QuantityKind::Length),
];

const CAVITATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(ABSOLUTE_PRESSURE, QuantityKind::Pressure),
    FieldSpec::new(SUCTION_ELEVATION, QuantityKind::Length),
    FieldSpec::new(VAPOR_PRESSURE, QuantityKind::Pressure),
    FieldSpec::new(TEMPERATURE, QuantityKind::Temperature),
    FieldSpec::new(HEAD_LOSS, QuantityKind::Length),
    FieldSpec::new(DENSITY, QuantityKind::Density),
    FieldSpec::new(GRAVITY, QuantityKind::Acceleration).with_default(FieldDefault::Gravity),
    FieldSpec::new(NPSH_REQUIRED, QuantityKind::Length),
];

pub(crate) static IDEAL_SPEC: EquationSpec =
    EquationSpec::new(EquationMode::BernoulliIdeal, IDEAL_FIELDS, solve_ideal);
pub(crate) static LOSSES_SPEC: EquationSpec =
    EquationSpec::new(EquationMode::BernoulliLosses, LOSSES_FIELDS, solve_losses);
pub(crate) static CAVITATION_SPEC: EquationSpec =
    EquationSpec::new(EquationMode::BernoulliCavitation, CAVITATION_FIELDS, solve_cavitation);

/// 한 단면의 전수두 [m].
pub fn total_head(pressure: f64, velocity: f64, elevation: f64, alpha: f64, gamma: f64, g: f64) -> f64 {
    pressure / gamma + alpha * velocity * velocity / (2.0 * g) + elevation
}

/// 마찰·국부 손실수두 `hL = (f·L/D + K)·V²/(2g)` [m].
pub fn head_loss(friction: f64, length: f64, diameter: f64, k_minor: f64, velocity: f64, g: f64) -> Result<f64, DomainError> {
    let coeff = loss_coefficient(friction, length, diameter, k_minor)?;
    Ok(coeff * velocity * velocity / (2.0 * g))
}

fn loss_coefficient(friction: f64, length: f64, diameter: f64, k_minor: f64) -> Result<f64, DomainError> {
    Ok(friction * divide(length, diameter, HEAD_LOSS)? + k_minor)
}

/// Antoine 식으로 물의 포화증기압(Pa, 절대)을 구한다.
///
/// 0~100 °C 범위에서만 유효하며 범위 밖이면 0 을 돌려준다.
pub fn water_vapor_pressure(temp_c: f64) -> f64 {
    if !(0.0..=100.0).contains(&temp_c) {
        return 0.0;
    }
    let log10_p_mmhg = 8.07131 - 1730.63 / (233.426 + temp_c);
    let p_mmhg = 10_f64.powf(log10_p_mmhg);
    p_mmhg * 101_325.0 / 760.0
}

/// 단면 하나를 구성하는 필드 id.
struct SectionIds {
    pressure: &'static str,
    velocity: &'static str,
    elevation: &'static str,
    alpha: &'static str,
}

static SECTION_1: SectionIds = SectionIds {
    pressure: PRESSURE_1,
    velocity: VELOCITY_1,
    elevation: ELEVATION_1,
    alpha: ALPHA_1,
};

static SECTION_2: SectionIds = SectionIds {
    pressure: PRESSURE_2,
    velocity: VELOCITY_2,
    elevation: ELEVATION_2,
    alpha: ALPHA_2,
};

/// γ = ρg 와 g.
#[derive(Clone, Copy)]
struct Fluid {
    gamma: f64,
    g: f64,
}

impl Fluid {
    fn from_knowns(k: &Knowns) -> Result<Self, Unsolved> {
        let base = k.classify(&[DENSITY, GRAVITY]);
        if !base.is_complete() {
            return Err(Unsolved::InsufficientData(base.missing_ids));
        }
        let rho = k.require(DENSITY)?;
        let g = k.require(GRAVITY)?;
        if rho * g == 0.0 {
            return Err(DomainError::DivisionByZero { what: "gamma" }.into());
        }
        Ok(Self { gamma: rho * g, g })
    }
}

/// 값이 모두 주어진 단면의 전수두.
fn section_head(k: &Knowns, ids: &SectionIds, fluid: Fluid) -> Result<f64, Unsolved> {
    Ok(total_head(
        k.require(ids.pressure)?,
        k.require(ids.velocity)?,
        k.require(ids.elevation)?,
        k.require(ids.alpha)?,
        fluid.gamma,
        fluid.g,
    ))
}

/// 단면의 빠진 항 하나를 `target` 전수두에 맞춰 푼다.
///
/// `extra_velocity_coeff` 는 속도수두에 더해지는 손실계수(fL/D + K)로,
/// 손실이 이 단면의 속도에 걸려 있고 그 속도가 미지수일 때만 0 이 아니다.
fn solve_term(
    k: &Knowns,
    ids: &SectionIds,
    missing: &str,
    target: f64,
    fluid: Fluid,
    extra_velocity_coeff: f64,
) -> Result<(&'static str, f64), Unsolved> {
    let Fluid { gamma, g } = fluid;
    if missing == ids.pressure {
        let v = k.require(ids.velocity)?;
        let kinetic = k.require(ids.alpha)? * v * v / (2.0 * g);
        let p = gamma * (target - kinetic - k.require(ids.elevation)?);
        Ok((ids.pressure, p))
    } else if missing == ids.elevation {
        let v = k.require(ids.velocity)?;
        let kinetic = k.require(ids.alpha)? * v * v / (2.0 * g);
        let z = target - k.require(ids.pressure)? / gamma - kinetic;
        Ok((ids.elevation, z))
    } else if missing == ids.velocity {
        let residual = target - k.require(ids.pressure)? / gamma - k.require(ids.elevation)?;
        let coeff = k.require(ids.alpha)? + extra_velocity_coeff;
        let v_squared = divide(residual * 2.0 * g, coeff, ids.velocity)?;
        Ok((ids.velocity, sqrt_checked(v_squared, ids.velocity)?))
    } else {
        let residual = target - k.require(ids.pressure)? / gamma - k.require(ids.elevation)?;
        let v = k.require(ids.velocity)?;
        let alpha = divide(residual * 2.0 * g, v * v, ids.alpha)?;
        Ok((ids.alpha, alpha))
    }
}

/// 손실수두를 정하는 방법.
#[derive(Clone, Copy)]
enum LossModel {
    /// hL 직접 입력
    Direct(f64),
    /// V2 속도수두에 곱할 계수 fL/D + K
    Coefficient(f64),
}

impl LossModel {
    fn from_knowns(k: &Knowns) -> Result<Self, Unsolved> {
        if let Some(h) = k.get(HEAD_LOSS) {
            return Ok(LossModel::Direct(h));
        }
        let params = k.classify(&[FRICTION_FACTOR, PIPE_LENGTH, DIAMETER]);
        if !params.is_complete() {
            let mut missing = vec![HEAD_LOSS.to_string()];
            missing.extend(params.missing_ids);
            return Err(Unsolved::InsufficientData(missing));
        }
        let coeff = loss_coefficient(
            k.require(FRICTION_FACTOR)?,
            k.require(PIPE_LENGTH)?,
            k.require(DIAMETER)?,
            k.get(MINOR_LOSS).unwrap_or(0.0),
        )?;
        Ok(LossModel::Coefficient(coeff))
    }

    fn head(self, velocity_2: f64, g: f64) -> f64 {
        match self {
            LossModel::Direct(h) => h,
            LossModel::Coefficient(c) => c * velocity_2 * velocity_2 / (2.0 * g),
        }
    }
}

/// 풀린 값을 반영한 입력 사본.
fn with_solved(k: &Knowns, id: &'static str, value: f64) -> Knowns {
    k.clone().with(id, value)
}

fn solve_ideal(k: &Knowns) -> Resolution {
    let fluid = Fluid::from_knowns(k)?;
    let energy = k.classify(&ENERGY_IDS);
    if energy.is_insufficient() {
        return Err(Unsolved::InsufficientData(energy.missing_ids));
    }

    let (solved, full) = match energy.unique_missing.as_deref() {
        None => (Solved::complete(), k.clone()),
        Some(missing) => {
            let (ids, other) = if SECTION_1.owns(missing) {
                (&SECTION_1, &SECTION_2)
            } else {
                (&SECTION_2, &SECTION_1)
            };
            let target = section_head(k, other, fluid)?;
            let (id, value) = solve_term(k, ids, missing, target, fluid, 0.0)?;
            (Solved::unknown(id, value), with_solved(k, id, value))
        }
    };

    Ok(solved
        .output(TOTAL_HEAD_1, QuantityKind::Length, section_head(&full, &SECTION_1, fluid)?)
        .output(TOTAL_HEAD_2, QuantityKind::Length, section_head(&full, &SECTION_2, fluid)?))
}

fn solve_losses(k: &Knowns) -> Resolution {
    let fluid = Fluid::from_knowns(k)?;
    let energy = k.classify(&ENERGY_IDS);
    if energy.is_insufficient() {
        return Err(Unsolved::InsufficientData(energy.missing_ids));
    }

    let Some(missing) = energy.unique_missing.as_deref() else {
        let e1 = section_head(k, &SECTION_1, fluid)?;
        let e2 = section_head(k, &SECTION_2, fluid)?;
        let solved = match LossModel::from_knowns(k) {
            Ok(model) => Solved::complete()
                .output(HEAD_LOSS, QuantityKind::Length, model.head(k.require(VELOCITY_2)?, fluid.g)),
            // 손실 정보가 없으면 두 단면의 에너지 차이가 곧 손실수두이다.
            Err(Unsolved::InsufficientData(_)) => Solved::unknown(HEAD_LOSS, e1 - e2),
            Err(other) => return Err(other),
        };
        return Ok(solved
            .output(TOTAL_HEAD_1, QuantityKind::Length, e1)
            .output(TOTAL_HEAD_2, QuantityKind::Length, e2));
    };

    let model = LossModel::from_knowns(k)?;
    let (id, value) = if SECTION_1.owns(missing) {
        let loss = model.head(k.require(VELOCITY_2)?, fluid.g);
        let target = section_head(k, &SECTION_2, fluid)? + loss;
        solve_term(k, &SECTION_1, missing, target, fluid, 0.0)?
    } else {
        let e1 = section_head(k, &SECTION_1, fluid)?;
        match (model, missing == VELOCITY_2) {
            (LossModel::Coefficient(c), true) => solve_term(k, &SECTION_2, missing, e1, fluid, c)?,
            _ => {
                let loss = model.head(k.get(VELOCITY_2).unwrap_or(0.0), fluid.g);
                solve_term(k, &SECTION_2, missing, e1 - loss, fluid, 0.0)?
            }
        }
    };

    let full = with_solved(k, id, value);
    let loss = model.head(full.require(VELOCITY_2)?, fluid.g);
    Ok(Solved::unknown(id, value)
        .output(HEAD_LOSS, QuantityKind::Length, loss)
        .output(TOTAL_HEAD_1, QuantityKind::Length, section_head(&full, &SECTION_1, fluid)?)
        .output(TOTAL_HEAD_2, QuantityKind::Length, section_head(&full, &SECTION_2, fluid)?))
}

impl SectionIds {
    fn owns(&self, id: &str) -> bool {
        [self.pressure, self.velocity, self.elevation, self.alpha].contains(&id)
    }
}

/// 유효 흡입수두 `NPSHa = Pabs/γ + z - Pv/γ - hL`.
pub fn npsh_available(
    absolute_pressure: f64,
    elevation: f64,
    vapor_pressure: f64,
    head_loss: f64,
    gamma: f64,
) -> Result<f64, DomainError> {
    let pressure_head = divide(absolute_pressure - vapor_pressure, gamma, NPSH_AVAILABLE)?;
    Ok(pressure_head + elevation - head_loss)
}

fn solve_cavitation(k: &Knowns) -> Resolution {
    let required = k.classify(&[ABSOLUTE_PRESSURE, SUCTION_ELEVATION, HEAD_LOSS, DENSITY, GRAVITY]);
    let vapor_known = k.has(VAPOR_PRESSURE) || k.has(TEMPERATURE);
    if !required.is_complete() || !vapor_known {
        let mut missing = required.missing_ids;
        if !vapor_known {
            missing.push(VAPOR_PRESSURE.to_string());
            missing.push(TEMPERATURE.to_string());
        }
        return Err(Unsolved::InsufficientData(missing));
    }
    let fluid = Fluid::from_knowns(k)?;

    let (solved, pv) = match k.get(VAPOR_PRESSURE) {
        Some(pv) => (Solved::computed(), pv),
        None => {
            // 온도 필드의 SI 값은 K 이다.
            let temp_c = k.require(TEMPERATURE)? - 273.15;
            let pv = water_vapor_pressure(temp_c);
            (Solved::unknown(VAPOR_PRESSURE, pv), pv)
        }
    };

    let npsha = npsh_available(
        k.require(ABSOLUTE_PRESSURE)?,
        k.require(SUCTION_ELEVATION)?,
        pv,
        k.require(HEAD_LOSS)?,
        fluid.gamma,
    )?;
    let mut solved = solved.output(NPSH_AVAILABLE, QuantityKind::Length, npsha);
    if let Some(npshr) = k.get(NPSH_REQUIRED).filter(|v| *v > 0.0) {
        solved = solved.output(NPSH_MARGIN, QuantityKind::Dimensionless, npsha / npshr);
    }
    Ok(solved)
}
