use serde::{Deserialize, Serialize};

use super::LinearUnit;

/// 점도(동점성계수가 아닌 절대점도) 단위. 내부 기준은 Pa·s이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DynamicViscosityUnit {
    PascalSecond,
    MilliPascalSecond,
    Poise,
    Centipoise,
}

impl LinearUnit for DynamicViscosityUnit {
    const ALL: &'static [Self] = &[
        DynamicViscosityUnit::PascalSecond,
        DynamicViscosityUnit::MilliPascalSecond,
        DynamicViscosityUnit::Poise,
        DynamicViscosityUnit::Centipoise,
    ];

    fn symbol(self) -> &'static str {
        match self {
            DynamicViscosityUnit::PascalSecond => "Pa·s",
            DynamicViscosityUnit::MilliPascalSecond => "mPa·s",
            DynamicViscosityUnit::Poise => "P",
            DynamicViscosityUnit::Centipoise => "cP",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            DynamicViscosityUnit::PascalSecond => &["pa.s", "pas", "n·s/m²"],
            DynamicViscosityUnit::MilliPascalSecond => &["mpa.s", "mpas"],
            DynamicViscosityUnit::Poise => &["poise"],
            DynamicViscosityUnit::Centipoise => &["cps", "centipoise"],
        }
    }

    fn factor(self) -> f64 {
        match self {
            DynamicViscosityUnit::PascalSecond => 1.0,
            DynamicViscosityUnit::MilliPascalSecond => 0.001,
            DynamicViscosityUnit::Poise => 0.1,
            DynamicViscosityUnit::Centipoise => 0.001,
        }
    }
}

/// 동점성계수 단위. 내부 기준은 m²/s이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KinematicViscosityUnit {
    SquareMeterPerSecond,
    Stokes,
    Centistokes,
    SquareFootPerSecond,
}

impl LinearUnit for KinematicViscosityUnit {
    const ALL: &'static [Self] = &[
        KinematicViscosityUnit::SquareMeterPerSecond,
        KinematicViscosityUnit::Stokes,
        KinematicViscosityUnit::Centistokes,
        KinematicViscosityUnit::SquareFootPerSecond,
    ];

    fn symbol(self) -> &'static str {
        match self {
            KinematicViscosityUnit::SquareMeterPerSecond => "m²/s",
            KinematicViscosityUnit::Stokes => "St",
            KinematicViscosityUnit::Centistokes => "cSt",
            KinematicViscosityUnit::SquareFootPerSecond => "ft²/s",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            KinematicViscosityUnit::SquareMeterPerSecond => &["m2/s", "m^2/s"],
            KinematicViscosityUnit::Stokes => &["stokes"],
            KinematicViscosityUnit::Centistokes => &["centistokes"],
            KinematicViscosityUnit::SquareFootPerSecond => &["ft2/s", "ft^2/s"],
        }
    }

    fn factor(self) -> f64 {
        match self {
            KinematicViscosityUnit::SquareMeterPerSecond => 1.0,
            KinematicViscosityUnit::Stokes => 1e-4,
            KinematicViscosityUnit::Centistokes => 1e-6,
            KinematicViscosityUnit::SquareFootPerSecond => 0.092_903_04,
        }
    }
}
