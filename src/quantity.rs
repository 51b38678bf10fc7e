use serde::{Deserialize, Serialize};

/// 다루는 물리량 종류를 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityKind {
    Length,
    Area,
    Velocity,
    Pressure,
    Density,
    Acceleration,
    DynamicViscosity,
    KinematicViscosity,
    Temperature,
    FlowRate,
    Dimensionless,
}

impl QuantityKind {
    pub const ALL: &'static [QuantityKind] = &[
        QuantityKind::Length,
        QuantityKind::Area,
        QuantityKind::Velocity,
        QuantityKind::Pressure,
        QuantityKind::Density,
        QuantityKind::Acceleration,
        QuantityKind::DynamicViscosity,
        QuantityKind::KinematicViscosity,
        QuantityKind::Temperature,
        QuantityKind::FlowRate,
        QuantityKind::Dimensionless,
    ];

    /// 내부 계산에 쓰는 SI 기준 단위 기호.
    pub fn si_symbol(self) -> &'static str {
        match self {
            QuantityKind::Length => "m",
            QuantityKind::Area => "m²",
            QuantityKind::Velocity => "m/s",
            QuantityKind::Pressure => "Pa",
            QuantityKind::Density => "kg/m³",
            QuantityKind::Acceleration => "m/s²",
            QuantityKind::DynamicViscosity => "Pa·s",
            QuantityKind::KinematicViscosity => "m²/s",
            QuantityKind::Temperature => "K",
            QuantityKind::FlowRate => "m³/s",
            QuantityKind::Dimensionless => "",
        }
    }

    /// CLI 인자 등에서 쓰는 키.
    pub fn key(self) -> &'static str {
        match self {
            QuantityKind::Length => "length",
            QuantityKind::Area => "area",
            QuantityKind::Velocity => "velocity",
            QuantityKind::Pressure => "pressure",
            QuantityKind::Density => "density",
            QuantityKind::Acceleration => "acceleration",
            QuantityKind::DynamicViscosity => "dynamic_viscosity",
            QuantityKind::KinematicViscosity => "kinematic_viscosity",
            QuantityKind::Temperature => "temperature",
            QuantityKind::FlowRate => "flow_rate",
            QuantityKind::Dimensionless => "dimensionless",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let k = key.trim().to_lowercase().replace('-', "_");
        Self::ALL.iter().copied().find(|q| q.key() == k)
    }
}
