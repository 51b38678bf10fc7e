use serde::{Deserialize, Serialize};

use super::LinearUnit;

/// 압력 단위. 내부 기준은 Pa이며 게이지/절대 구분 없이 배율만 적용한다.
/// 절대압이 필요한 계산(NPSHa 등)은 입력 자체를 절대압으로 받는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    Pascal,
    KiloPascal,
    MegaPascal,
    Bar,
    Atm,
    Psi,
    KgPerCm2,
    MmHg,
    MeterWaterColumn,
}

const PA_PER_ATM: f64 = 101_325.0;

impl LinearUnit for PressureUnit {
    const ALL: &'static [Self] = &[
        PressureUnit::Pascal,
        PressureUnit::KiloPascal,
        PressureUnit::MegaPascal,
        PressureUnit::Bar,
        PressureUnit::Atm,
        PressureUnit::Psi,
        PressureUnit::KgPerCm2,
        PressureUnit::MmHg,
        PressureUnit::MeterWaterColumn,
    ];

    fn symbol(self) -> &'static str {
        match self {
            PressureUnit::Pascal => "Pa",
            PressureUnit::KiloPascal => "kPa",
            PressureUnit::MegaPascal => "MPa",
            PressureUnit::Bar => "bar",
            PressureUnit::Atm => "atm",
            PressureUnit::Psi => "psi",
            PressureUnit::KgPerCm2 => "kgf/cm²",
            PressureUnit::MmHg => "mmHg",
            PressureUnit::MeterWaterColumn => "mH2O",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            PressureUnit::Pascal => &["pascal", "n/m2"],
            PressureUnit::KgPerCm2 => &["kgf/cm2", "kg/cm2"],
            PressureUnit::MmHg => &["torr"],
            PressureUnit::MeterWaterColumn => &["mca", "mwc"],
            _ => &[],
        }
    }

    fn factor(self) -> f64 {
        match self {
            PressureUnit::Pascal => 1.0,
            PressureUnit::KiloPascal => 1_000.0,
            PressureUnit::MegaPascal => 1_000_000.0,
            PressureUnit::Bar => 100_000.0,
            PressureUnit::Atm => PA_PER_ATM,
            PressureUnit::Psi => 6_894.757_293_168,
            PressureUnit::KgPerCm2 => 98_066.5,
            PressureUnit::MmHg => PA_PER_ATM / 760.0,
            PressureUnit::MeterWaterColumn => 9_806.65,
        }
    }
}
