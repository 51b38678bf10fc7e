use serde::{Deserialize, Serialize};

use super::LinearUnit;

/// 가속도 단위. 내부 기준은 m/s²이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccelerationUnit {
    MeterPerSecondSquared,
    FootPerSecondSquared,
    StandardGravity,
}

impl LinearUnit for AccelerationUnit {
    const ALL: &'static [Self] = &[
        AccelerationUnit::MeterPerSecondSquared,
        AccelerationUnit::FootPerSecondSquared,
        AccelerationUnit::StandardGravity,
    ];

    fn symbol(self) -> &'static str {
        match self {
            AccelerationUnit::MeterPerSecondSquared => "m/s²",
            AccelerationUnit::FootPerSecondSquared => "ft/s²",
            AccelerationUnit::StandardGravity => "g₀",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            AccelerationUnit::MeterPerSecondSquared => &["m/s2", "m/s^2"],
            AccelerationUnit::FootPerSecondSquared => &["ft/s2", "ft/s^2"],
            AccelerationUnit::StandardGravity => &["g0", "gn"],
        }
    }

    fn factor(self) -> f64 {
        match self {
            AccelerationUnit::MeterPerSecondSquared => 1.0,
            AccelerationUnit::FootPerSecondSquared => 0.3048,
            AccelerationUnit::StandardGravity => 9.806_65,
        }
    }
}
