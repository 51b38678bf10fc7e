//! 연속 방정식 `A1·V1 = A2·V2` 와 단면별 유수 단면적 계산.

use serde::{Deserialize, Serialize};

use super::{
    divide, DomainError, EquationMode, EquationSpec, FieldSpec, Knowns, Resolution, Solved,
    Unsolved,
};
use crate::quantity::QuantityKind;

pub const AREA_1: &str = "A1";
pub const VELOCITY_1: &str = "V1";
pub const AREA_2: &str = "A2";
pub const VELOCITY_2: &str = "V2";
pub const FLOW_RATE: &str = "Q";

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new(AREA_1, QuantityKind::Area),
    FieldSpec::new(VELOCITY_1, QuantityKind::Velocity),
    FieldSpec::new(AREA_2, QuantityKind::Area),
    FieldSpec::new(VELOCITY_2, QuantityKind::Velocity),
];

pub(crate) static SPEC: EquationSpec = EquationSpec::new(EquationMode::Continuity, FIELDS, solve);

fn solve(k: &Knowns) -> Resolution {
    let cls = k.classify(&[AREA_1, VELOCITY_1, AREA_2, VELOCITY_2]);
    if cls.is_insufficient() {
        return Err(Unsolved::InsufficientData(cls.missing_ids));
    }

    let solved = match cls.unique_missing.as_deref() {
        None => Solved::complete(),
        Some(AREA_1) => Solved::unknown(
            AREA_1,
            divide(k.require(AREA_2)? * k.require(VELOCITY_2)?, k.require(VELOCITY_1)?, AREA_1)?,
        ),
        Some(VELOCITY_1) => Solved::unknown(
            VELOCITY_1,
            divide(k.require(AREA_2)? * k.require(VELOCITY_2)?, k.require(AREA_1)?, VELOCITY_1)?,
        ),
        Some(AREA_2) => Solved::unknown(
            AREA_2,
            divide(k.require(AREA_1)? * k.require(VELOCITY_1)?, k.require(VELOCITY_2)?, AREA_2)?,
        ),
        Some(_) => Solved::unknown(
            VELOCITY_2,
            divide(k.require(AREA_1)? * k.require(VELOCITY_1)?, k.require(AREA_2)?, VELOCITY_2)?,
        ),
    };

    // 유량은 풀린 값까지 포함해 단면 1 기준으로 보고한다.
    let area_1 = match solved.unknown {
        Some((AREA_1, v)) => v,
        _ => k.require(AREA_1)?,
    };
    let velocity_1 = match solved.unknown {
        Some((VELOCITY_1, v)) => v,
        _ => k.require(VELOCITY_1)?,
    };
    Ok(solved.output(FLOW_RATE, QuantityKind::FlowRate, area_1 * velocity_1))
}

/// 관로/수로 단면 형상. 치수는 모두 m.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossSection {
    Circular { diameter: f64 },
    Square { side: f64 },
    Rectangular { width: f64, height: f64 },
}

impl CrossSection {
    /// 단면의 전체 높이.
    pub fn height(&self) -> f64 {
        match *self {
            CrossSection::Circular { diameter } => diameter,
            CrossSection::Square { side } => side,
            CrossSection::Rectangular { height, .. } => height,
        }
    }
}

/// 만관/부분 충수 여부. 부분 충수 높이는 m.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    Total,
    Partial { height: f64 },
}

/// 유수 단면적을 구한다. 부분 충수 높이는 `[0, 단면 높이]` 로 자른다.
pub fn flow_area(section: CrossSection, fill: Fill) -> Result<f64, DomainError> {
    let dims_ok = match section {
        CrossSection::Circular { diameter } => diameter >= 0.0,
        CrossSection::Square { side } => side >= 0.0,
        CrossSection::Rectangular { width, height } => width >= 0.0 && height >= 0.0,
    };
    if !dims_ok {
        return Err(DomainError::OutOfDomain { what: "cross-section" });
    }

    let h = match fill {
        Fill::Total => section.height(),
        Fill::Partial { height } => height.clamp(0.0, section.height()),
    };

    let area = match section {
        CrossSection::Circular { diameter } => {
            let r = diameter / 2.0;
            if r == 0.0 {
                0.0
            } else {
                let theta = 2.0 * ((r - h) / r).acos();
                r * r / 2.0 * (theta - theta.sin())
            }
        }
        CrossSection::Square { side } => side * h,
        CrossSection::Rectangular { width, .. } => width * h,
    };
    Ok(area)
}
