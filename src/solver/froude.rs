//! 개수로 프루드 수. `Fr = V / sqrt(g * D_h)`.
//!
//! 수리수심 `D_h = A / T` 는 면적, 수면폭, 수리수심 중 둘이 주어지면
//! 나머지 하나를 먼저 구한다.

use super::{
    divide, sqrt_checked, DomainError, EquationMode, EquationSpec, FieldDefault, FieldSpec,
    Knowns, Regime, Resolution, Solved, Unsolved,
};
use crate::quantity::QuantityKind;

pub const VELOCITY: &str = "V";
pub const GRAVITY: &str = "g";
pub const AREA: &str = "A";
pub const TOP_WIDTH: &str = "T";
pub const HYDRAULIC_DEPTH: &str = "Dh";
pub const FROUDE_NUMBER: &str = "Fr";

/// |Fr - 1| 이 이 값 이하이면 한계류로 본다.
pub const CRITICAL_BAND: f64 = 1e-3;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new(VELOCITY, QuantityKind::Velocity),
    FieldSpec::new(GRAVITY, QuantityKind::Acceleration).with_default(FieldDefault::Gravity),
    FieldSpec::new(AREA, QuantityKind::Area),
    FieldSpec::new(TOP_WIDTH, QuantityKind::Length),
    FieldSpec::new(HYDRAULIC_DEPTH, QuantityKind::Length),
];

pub(crate) static SPEC: EquationSpec = EquationSpec::new(EquationMode::Froude, FIELDS, solve);

/// 프루드 수를 계산한다.
pub fn froude_number(velocity: f64, gravity: f64, hydraulic_depth: f64) -> Result<f64, DomainError> {
    let wave_speed = sqrt_checked(gravity * hydraulic_depth, FROUDE_NUMBER)?;
    divide(velocity, wave_speed, FROUDE_NUMBER)
}

/// 프루드 수로 흐름 상태를 판정한다.
pub fn regime(froude: f64) -> Regime {
    let fr = froude.abs();
    if (fr - 1.0).abs() <= CRITICAL_BAND {
        Regime::Critical
    } else if fr < 1.0 {
        Regime::Subcritical
    } else {
        Regime::Supercritical
    }
}

fn solve(k: &Knowns) -> Resolution {
    let base = k.classify(&[VELOCITY, GRAVITY]);
    let geometry = k.classify(&[AREA, TOP_WIDTH, HYDRAULIC_DEPTH]);
    if !base.is_complete() || geometry.is_insufficient() {
        let mut missing = base.missing_ids;
        if geometry.is_insufficient() {
            missing.extend(geometry.missing_ids);
        }
        return Err(Unsolved::InsufficientData(missing));
    }

    let (depth, auto) = match geometry.unique_missing.as_deref() {
        Some(AREA) => {
            let depth = k.require(HYDRAULIC_DEPTH)?;
            let area = k.require(TOP_WIDTH)? * depth;
            (depth, Some((AREA, area)))
        }
        Some(TOP_WIDTH) => {
            let depth = k.require(HYDRAULIC_DEPTH)?;
            let width = divide(k.require(AREA)?, depth, TOP_WIDTH)?;
            (depth, Some((TOP_WIDTH, width)))
        }
        Some(_) => {
            let depth = divide(k.require(AREA)?, k.require(TOP_WIDTH)?, HYDRAULIC_DEPTH)?;
            (depth, Some((HYDRAULIC_DEPTH, depth)))
        }
        None => (k.require(HYDRAULIC_DEPTH)?, None),
    };

    let fr = froude_number(k.require(VELOCITY)?, k.require(GRAVITY)?, depth)?;
    let solved = match auto {
        Some((id, value)) => Solved::unknown(id, value),
        None => Solved::computed(),
    };
    Ok(solved
        .output(FROUDE_NUMBER, QuantityKind::Dimensionless, fr)
        .regime(regime(fr)))
}
