use serde::{Deserialize, Serialize};

use super::LinearUnit;

/// 체적 유량 단위. 내부 기준은 m³/s이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowRateUnit {
    CubicMeterPerSecond,
    CubicMeterPerHour,
    LiterPerSecond,
    LiterPerMinute,
    CubicFootPerSecond,
    UsGallonPerMinute,
}

impl LinearUnit for FlowRateUnit {
    const ALL: &'static [Self] = &[
        FlowRateUnit::CubicMeterPerSecond,
        FlowRateUnit::CubicMeterPerHour,
        FlowRateUnit::LiterPerSecond,
        FlowRateUnit::LiterPerMinute,
        FlowRateUnit::CubicFootPerSecond,
        FlowRateUnit::UsGallonPerMinute,
    ];

    fn symbol(self) -> &'static str {
        match self {
            FlowRateUnit::CubicMeterPerSecond => "m³/s",
            FlowRateUnit::CubicMeterPerHour => "m³/h",
            FlowRateUnit::LiterPerSecond => "L/s",
            FlowRateUnit::LiterPerMinute => "L/min",
            FlowRateUnit::CubicFootPerSecond => "ft³/s",
            FlowRateUnit::UsGallonPerMinute => "gpm",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            FlowRateUnit::CubicMeterPerSecond => &["m3/s", "m^3/s"],
            FlowRateUnit::CubicMeterPerHour => &["m3/h", "m^3/h"],
            FlowRateUnit::LiterPerSecond => &["lps"],
            FlowRateUnit::LiterPerMinute => &["lpm"],
            FlowRateUnit::CubicFootPerSecond => &["ft3/s", "cfs"],
            _ => &[],
        }
    }

    fn factor(self) -> f64 {
        match self {
            FlowRateUnit::CubicMeterPerSecond => 1.0,
            FlowRateUnit::CubicMeterPerHour => 1.0 / 3600.0,
            FlowRateUnit::LiterPerSecond => 0.001,
            FlowRateUnit::LiterPerMinute => 0.001 / 60.0,
            FlowRateUnit::CubicFootPerSecond => 0.028_316_846_592,
            FlowRateUnit::UsGallonPerMinute => 0.003_785_411_784 / 60.0,
        }
    }
}
