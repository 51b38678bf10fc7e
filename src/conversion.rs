//! 물리량 종류와 단위 기호 문자열로 값을 환산하는 진입점.
//!
//! 단위 표는 `units` 모듈의 enum 들이 정적으로 보관하며 변경되지 않는다.

use thiserror::Error;

use crate::quantity::QuantityKind;
use crate::units::*;

/// 단위 변환 시 발생 가능한 오류. 모두 정적 설정 오류에 해당한다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// 해당 물리량 표에 없는 단위 문자열
    #[error("unknown unit '{unit}' for {kind:?}")]
    UnknownUnit { kind: QuantityKind, unit: String },
    /// 배율 하나로 표현할 수 없는 변환
    #[error("unsupported conversion for {kind:?}: {from} -> {to}")]
    UnsupportedConversion {
        kind: QuantityKind,
        from: String,
        to: String,
    },
}

/// 무차원량이 허용하는 기호. 빈 문자열이 기본이다.
const DIMENSIONLESS_SYMBOLS: &[&str] = &["", "-", "1"];

fn unknown(kind: QuantityKind, unit: &str) -> ConversionError {
    ConversionError::UnknownUnit {
        kind,
        unit: unit.to_string(),
    }
}

fn parse_linear<U: LinearUnit>(kind: QuantityKind, unit: &str) -> Result<U, ConversionError> {
    U::parse(unit).ok_or_else(|| unknown(kind, unit))
}

fn parse_temperature(unit: &str) -> Result<TemperatureUnit, ConversionError> {
    TemperatureUnit::parse(unit).ok_or_else(|| unknown(QuantityKind::Temperature, unit))
}

/// 단위 하나의 크기를 SI 기준 단위로 나타낸 배율을 돌려준다.
///
/// 온도는 아핀 변환이므로 `UnsupportedConversion` 을 돌려준다.
pub fn factor(kind: QuantityKind, unit: &str) -> Result<f64, ConversionError> {
    match kind {
        QuantityKind::Length => Ok(parse_linear::<LengthUnit>(kind, unit)?.factor()),
        QuantityKind::Area => Ok(parse_linear::<AreaUnit>(kind, unit)?.factor()),
        QuantityKind::Velocity => Ok(parse_linear::<VelocityUnit>(kind, unit)?.factor()),
        QuantityKind::Pressure => Ok(parse_linear::<PressureUnit>(kind, unit)?.factor()),
        QuantityKind::Density => Ok(parse_linear::<DensityUnit>(kind, unit)?.factor()),
        QuantityKind::Acceleration => Ok(parse_linear::<AccelerationUnit>(kind, unit)?.factor()),
        QuantityKind::DynamicViscosity => {
            Ok(parse_linear::<DynamicViscosityUnit>(kind, unit)?.factor())
        }
        QuantityKind::KinematicViscosity => {
            Ok(parse_linear::<KinematicViscosityUnit>(kind, unit)?.factor())
        }
        QuantityKind::FlowRate => Ok(parse_linear::<FlowRateUnit>(kind, unit)?.factor()),
        QuantityKind::Dimensionless => {
            if DIMENSIONLESS_SYMBOLS.contains(&unit.trim()) {
                Ok(1.0)
            } else {
                Err(unknown(kind, unit))
            }
        }
        QuantityKind::Temperature => {
            parse_temperature(unit)?;
            Err(ConversionError::UnsupportedConversion {
                kind,
                from: unit.to_string(),
                to: kind.si_symbol().to_string(),
            })
        }
    }
}

/// 단위가 해당 물리량 표에 존재하는지 확인한다.
pub fn check_unit(kind: QuantityKind, unit: &str) -> Result<(), ConversionError> {
    match kind {
        QuantityKind::Temperature => parse_temperature(unit).map(|_| ()),
        _ => factor(kind, unit).map(|_| ()),
    }
}

/// 값을 `from_unit` 에서 `to_unit` 으로 환산한다.
///
/// 온도 이외의 물리량은 `v * factor(from) / factor(to)` 로 계산한다.
pub fn convert(
    value: f64,
    kind: QuantityKind,
    from_unit: &str,
    to_unit: &str,
) -> Result<f64, ConversionError> {
    match kind {
        QuantityKind::Temperature => {
            let from = parse_temperature(from_unit)?;
            let to = parse_temperature(to_unit)?;
            Ok(convert_temperature(value, from, to))
        }
        _ => Ok(value * factor(kind, from_unit)? / factor(kind, to_unit)?),
    }
}

/// 표시 단위의 값을 SI 기준 값으로 환산한다.
pub fn to_si(value: f64, kind: QuantityKind, unit: &str) -> Result<f64, ConversionError> {
    convert(value, kind, unit, kind.si_symbol())
}

/// SI 기준 값을 표시 단위로 환산한다.
pub fn from_si(value_si: f64, kind: QuantityKind, unit: &str) -> Result<f64, ConversionError> {
    convert(value_si, kind, kind.si_symbol(), unit)
}

fn symbols<U: LinearUnit>() -> Vec<&'static str> {
    U::ALL.iter().map(|u| u.symbol()).collect()
}

/// 물리량별로 선택 가능한 단위 기호 목록. 첫 항목이 SI 기준 단위이다.
pub fn units_of(kind: QuantityKind) -> Vec<&'static str> {
    match kind {
        QuantityKind::Length => symbols::<LengthUnit>(),
        QuantityKind::Area => symbols::<AreaUnit>(),
        QuantityKind::Velocity => symbols::<VelocityUnit>(),
        QuantityKind::Pressure => symbols::<PressureUnit>(),
        QuantityKind::Density => symbols::<DensityUnit>(),
        QuantityKind::Acceleration => symbols::<AccelerationUnit>(),
        QuantityKind::DynamicViscosity => symbols::<DynamicViscosityUnit>(),
        QuantityKind::KinematicViscosity => symbols::<KinematicViscosityUnit>(),
        QuantityKind::FlowRate => symbols::<FlowRateUnit>(),
        QuantityKind::Temperature => {
            let mut v: Vec<&'static str> = TemperatureUnit::ALL.iter().map(|u| u.symbol()).collect();
            // SI 기준(K)을 맨 앞에 둔다.
            v.rotate_right(1);
            v
        }
        QuantityKind::Dimensionless => vec![""],
    }
}
