//! Colebrook-White 마찰계수.
//!
//! `1/√f = -2·log10(ε/D/3.7 + 2.51/(Re·√f))` 는 음함수이므로 Swamee-Jain
//! 근사를 초기값으로 Newton-Raphson 반복한다.

use tracing::warn;

use super::{
    divide, DomainError, EquationMode, EquationSpec, FieldSpec, Knowns, Resolution, Solved,
    Unsolved,
};
use crate::quantity::QuantityKind;
use crate::solver::reynolds;

pub const REYNOLDS_NUMBER: &str = "Re";
pub const ROUGHNESS: &str = "eps";
pub const DIAMETER: &str = "D";
pub const RELATIVE_ROUGHNESS: &str = "rr";
pub const FRICTION_FACTOR: &str = "f";

pub const MAX_ITERATIONS: usize = 100;
/// 연속 반복값 차이 허용치.
pub const TOLERANCE: f64 = 1e-20;
/// 반복값이 0 이하가 되면 이 값으로 되돌린다.
const RESET_GUESS: f64 = 0.02;
/// 반복값 하한.
const MIN_FRICTION: f64 = 0.001;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new(REYNOLDS_NUMBER, QuantityKind::Dimensionless),
    FieldSpec::new(ROUGHNESS, QuantityKind::Length),
    FieldSpec::new(DIAMETER, QuantityKind::Length),
    FieldSpec::new(RELATIVE_ROUGHNESS, QuantityKind::Dimensionless),
];

pub(crate) static SPEC: EquationSpec = EquationSpec::new(EquationMode::Colebrook, FIELDS, solve);

/// Swamee-Jain 명시 근사식.
pub fn swamee_jain(reynolds: f64, relative_roughness: f64) -> f64 {
    0.25 / (relative_roughness / 3.7 + 5.74 / reynolds.powf(0.9)).log10().powi(2)
}

/// Colebrook 식의 잔차 `g(f) = 1/√f + 2·log10(ε/D/3.7 + 2.51/(Re·√f))`.
pub fn colebrook_residual(f: f64, reynolds: f64, relative_roughness: f64) -> f64 {
    let s = f.sqrt();
    1.0 / s + 2.0 * (relative_roughness / 3.7 + 2.51 / (reynolds * s)).log10()
}

fn colebrook_derivative(f: f64, reynolds: f64, relative_roughness: f64) -> f64 {
    let s = f.sqrt();
    let arg = relative_roughness / 3.7 + 2.51 / (reynolds * s);
    let f_pow = f.powf(-1.5);
    -0.5 * f_pow - 2.51 / (reynolds * std::f64::consts::LN_10 * arg) * f_pow
}

/// Darcy 마찰계수를 구한다.
///
/// 도함수가 허용치 아래로 떨어지거나 반복 한도에 도달하면 그 시점의
/// 추정값을 돌려준다.
pub fn solve_friction_factor(reynolds: f64, relative_roughness: f64) -> Result<f64, DomainError> {
    if !(reynolds.is_finite() && reynolds > 0.0) {
        return Err(DomainError::OutOfDomain { what: REYNOLDS_NUMBER });
    }
    if !(relative_roughness.is_finite() && relative_roughness >= 0.0) {
        return Err(DomainError::OutOfDomain { what: RELATIVE_ROUGHNESS });
    }

    let mut f = swamee_jain(reynolds, relative_roughness);
    for _ in 0..MAX_ITERATIONS {
        if f.is_nan() || f <= 0.0 {
            f = RESET_GUESS;
        }
        let g = colebrook_residual(f, reynolds, relative_roughness);
        let dg = colebrook_derivative(f, reynolds, relative_roughness);
        if dg.abs() < TOLERANCE {
            warn!(reynolds, relative_roughness, f, "colebrook derivative underflow");
            return Ok(f);
        }
        let next = (f - g / dg).max(MIN_FRICTION);
        if (next - f).abs() < TOLERANCE {
            return Ok(next);
        }
        f = next;
    }
    warn!(reynolds, relative_roughness, f, "colebrook iteration limit reached");
    Ok(f)
}

fn solve(k: &Knowns) -> Resolution {
    let base = k.classify(&[REYNOLDS_NUMBER]);
    let roughness = k.classify(&[ROUGHNESS, DIAMETER, RELATIVE_ROUGHNESS]);
    if !base.is_complete() || roughness.is_insufficient() {
        let mut missing = base.missing_ids;
        if roughness.is_insufficient() {
            missing.extend(roughness.missing_ids);
        }
        return Err(Unsolved::InsufficientData(missing));
    }

    let (rr, solved) = match roughness.unique_missing.as_deref() {
        None => (k.require(RELATIVE_ROUGHNESS)?, Solved::computed()),
        Some(ROUGHNESS) => {
            let rr = k.require(RELATIVE_ROUGHNESS)?;
            (rr, Solved::unknown(ROUGHNESS, rr * k.require(DIAMETER)?))
        }
        Some(DIAMETER) => {
            let rr = k.require(RELATIVE_ROUGHNESS)?;
            let d = divide(k.require(ROUGHNESS)?, rr, DIAMETER)?;
            (rr, Solved::unknown(DIAMETER, d))
        }
        Some(_) => {
            let rr = divide(k.require(ROUGHNESS)?, k.require(DIAMETER)?, RELATIVE_ROUGHNESS)?;
            (rr, Solved::unknown(RELATIVE_ROUGHNESS, rr))
        }
    };

    let re = k.require(REYNOLDS_NUMBER)?;
    let f = solve_friction_factor(re, rr).map_err(Unsolved::from)?;
    Ok(solved
        .output(FRICTION_FACTOR, QuantityKind::Dimensionless, f)
        .regime(reynolds::regime(re)))
}
