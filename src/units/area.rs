use serde::{Deserialize, Serialize};

use super::LinearUnit;

/// 면적 단위. 내부 기준은 m²이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaUnit {
    SquareMeter,
    SquareCentimeter,
    SquareMillimeter,
    SquareInch,
    SquareFoot,
}

impl LinearUnit for AreaUnit {
    const ALL: &'static [Self] = &[
        AreaUnit::SquareMeter,
        AreaUnit::SquareCentimeter,
        AreaUnit::SquareMillimeter,
        AreaUnit::SquareInch,
        AreaUnit::SquareFoot,
    ];

    fn symbol(self) -> &'static str {
        match self {
            AreaUnit::SquareMeter => "m²",
            AreaUnit::SquareCentimeter => "cm²",
            AreaUnit::SquareMillimeter => "mm²",
            AreaUnit::SquareInch => "in²",
            AreaUnit::SquareFoot => "ft²",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            AreaUnit::SquareMeter => &["m2", "m^2", "sqm"],
            AreaUnit::SquareCentimeter => &["cm2", "cm^2"],
            AreaUnit::SquareMillimeter => &["mm2", "mm^2"],
            AreaUnit::SquareInch => &["in2", "in^2", "sqin"],
            AreaUnit::SquareFoot => &["ft2", "ft^2", "sqft"],
        }
    }

    fn factor(self) -> f64 {
        match self {
            AreaUnit::SquareMeter => 1.0,
            AreaUnit::SquareCentimeter => 1e-4,
            AreaUnit::SquareMillimeter => 1e-6,
            AreaUnit::SquareInch => 0.000_645_16,
            AreaUnit::SquareFoot => 0.092_903_04,
        }
    }
}
