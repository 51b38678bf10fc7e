use serde::{Deserialize, Serialize};

use super::LinearUnit;

/// 밀도 단위. 내부 기준은 kg/m³이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DensityUnit {
    KgPerCubicMeter,
    GramPerCubicCentimeter,
    PoundPerCubicFoot,
}

impl LinearUnit for DensityUnit {
    const ALL: &'static [Self] = &[
        DensityUnit::KgPerCubicMeter,
        DensityUnit::GramPerCubicCentimeter,
        DensityUnit::PoundPerCubicFoot,
    ];

    fn symbol(self) -> &'static str {
        match self {
            DensityUnit::KgPerCubicMeter => "kg/m³",
            DensityUnit::GramPerCubicCentimeter => "g/cm³",
            DensityUnit::PoundPerCubicFoot => "lb/ft³",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            DensityUnit::KgPerCubicMeter => &["kg/m3", "kg/m^3", "g/l"],
            DensityUnit::GramPerCubicCentimeter => &["g/cm3", "g/ml"],
            DensityUnit::PoundPerCubicFoot => &["lb/ft3", "lbm/ft3"],
        }
    }

    fn factor(self) -> f64 {
        match self {
            DensityUnit::KgPerCubicMeter => 1.0,
            DensityUnit::GramPerCubicCentimeter => 1_000.0,
            DensityUnit::PoundPerCubicFoot => 16.018_463_373_960_14,
        }
    }
}
