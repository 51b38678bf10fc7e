//! 레이놀즈 수 `Re = ρVD/μ = VD/ν`.

use super::{
    divide, DomainError, EquationMode, EquationSpec, FieldSpec, Knowns, Regime, Resolution,
    Solved, Unsolved,
};
use crate::quantity::QuantityKind;

pub const VELOCITY: &str = "V";
pub const DIAMETER: &str = "D";
pub const DENSITY: &str = "rho";
pub const DYNAMIC_VISCOSITY: &str = "mu";
pub const KINEMATIC_VISCOSITY: &str = "nu";
pub const REYNOLDS_NUMBER: &str = "Re";

/// 층류 상한.
pub const LAMINAR_LIMIT: f64 = 2300.0;
/// 천이 구간 상한.
pub const TURBULENT_LIMIT: f64 = 4000.0;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new(VELOCITY, QuantityKind::Velocity),
    FieldSpec::new(DIAMETER, QuantityKind::Length),
    FieldSpec::new(DENSITY, QuantityKind::Density),
    FieldSpec::new(DYNAMIC_VISCOSITY, QuantityKind::DynamicViscosity),
    FieldSpec::new(KINEMATIC_VISCOSITY, QuantityKind::KinematicViscosity),
];

pub(crate) static SPEC: EquationSpec = EquationSpec::new(EquationMode::Reynolds, FIELDS, solve);

/// 점도 형태로 레이놀즈 수를 구한다.
pub fn reynolds_dynamic(density: f64, velocity: f64, diameter: f64, viscosity: f64) -> Result<f64, DomainError> {
    divide(density * velocity * diameter, viscosity, REYNOLDS_NUMBER)
}

/// 동점성계수 형태로 레이놀즈 수를 구한다.
pub fn reynolds_kinematic(velocity: f64, diameter: f64, kinematic_viscosity: f64) -> Result<f64, DomainError> {
    divide(velocity * diameter, kinematic_viscosity, REYNOLDS_NUMBER)
}

/// 관 유동 영역 판정.
pub fn regime(reynolds: f64) -> Regime {
    let re = reynolds.abs();
    if re < LAMINAR_LIMIT {
        Regime::Laminar
    } else if re <= TURBULENT_LIMIT {
        Regime::Transitional
    } else {
        Regime::Turbulent
    }
}

fn solve(k: &Knowns) -> Resolution {
    let base = k.classify(&[VELOCITY, DIAMETER]);
    let props = k.classify(&[DENSITY, DYNAMIC_VISCOSITY, KINEMATIC_VISCOSITY]);
    if !base.is_complete() || props.is_insufficient() {
        let mut missing = base.missing_ids;
        if props.is_insufficient() {
            missing.extend(props.missing_ids);
        }
        return Err(Unsolved::InsufficientData(missing));
    }

    let velocity = k.require(VELOCITY)?;
    let diameter = k.require(DIAMETER)?;

    // ν = μ/ρ 관계로 빠진 물성 하나를 채운다.
    let solved = match props.unique_missing.as_deref() {
        None => Solved::computed(),
        Some(DENSITY) => Solved::unknown(
            DENSITY,
            divide(k.require(DYNAMIC_VISCOSITY)?, k.require(KINEMATIC_VISCOSITY)?, DENSITY)?,
        ),
        Some(DYNAMIC_VISCOSITY) => Solved::unknown(
            DYNAMIC_VISCOSITY,
            k.require(KINEMATIC_VISCOSITY)? * k.require(DENSITY)?,
        ),
        Some(_) => Solved::unknown(
            KINEMATIC_VISCOSITY,
            divide(k.require(DYNAMIC_VISCOSITY)?, k.require(DENSITY)?, KINEMATIC_VISCOSITY)?,
        ),
    };

    // 밀도와 점도가 모두 입력된 경우 점도 형태를 우선한다.
    let re = match (k.get(DENSITY), k.get(DYNAMIC_VISCOSITY)) {
        (Some(rho), Some(mu)) => reynolds_dynamic(rho, velocity, diameter, mu)?,
        _ => {
            let nu = match solved.unknown {
                Some((KINEMATIC_VISCOSITY, v)) => v,
                _ => k.require(KINEMATIC_VISCOSITY)?,
            };
            reynolds_kinematic(velocity, diameter, nu)?
        }
    };

    Ok(solved
        .output(REYNOLDS_NUMBER, QuantityKind::Dimensionless, re)
        .regime(regime(re)))
}
