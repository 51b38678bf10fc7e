use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::format::DecimalSeparator;
use crate::quantity::QuantityKind;
use crate::units::*;

/// 기본 설정 파일 이름.
pub const CONFIG_FILE: &str = "config.toml";

/// 표준 중력가속도 [m/s²]. 계산기 화면의 g 기본값으로 쓴다.
pub const DEFAULT_GRAVITY: f64 = 9.81;

/// 사용 가능한 단위 시스템 프리셋을 정의한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitSystem {
    /// SI 기준. 내부 계산 기본값.
    SI,
    /// 영국식/야드파운드법
    Imperial,
}

/// 각 물리량별 기본 표시 단위 설정을 담는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultUnits {
    pub length: LengthUnit,
    pub area: AreaUnit,
    pub velocity: VelocityUnit,
    pub pressure: PressureUnit,
    pub density: DensityUnit,
    pub acceleration: AccelerationUnit,
    pub dynamic_viscosity: DynamicViscosityUnit,
    pub kinematic_viscosity: KinematicViscosityUnit,
    pub temperature: TemperatureUnit,
    pub flow_rate: FlowRateUnit,
}

impl Default for DefaultUnits {
    fn default() -> Self {
        Self::for_system(UnitSystem::SI)
    }
}

impl DefaultUnits {
    /// 프리셋에 맞는 단위 묶음을 만든다.
    pub fn for_system(system: UnitSystem) -> Self {
        match system {
            UnitSystem::SI => Self {
                length: LengthUnit::Meter,
                area: AreaUnit::SquareMeter,
                velocity: VelocityUnit::MeterPerSecond,
                pressure: PressureUnit::Pascal,
                density: DensityUnit::KgPerCubicMeter,
                acceleration: AccelerationUnit::MeterPerSecondSquared,
                dynamic_viscosity: DynamicViscosityUnit::PascalSecond,
                kinematic_viscosity: KinematicViscosityUnit::SquareMeterPerSecond,
                temperature: TemperatureUnit::Celsius,
                flow_rate: FlowRateUnit::CubicMeterPerSecond,
            },
            UnitSystem::Imperial => Self {
                length: LengthUnit::Foot,
                area: AreaUnit::SquareFoot,
                velocity: VelocityUnit::FootPerSecond,
                pressure: PressureUnit::Psi,
                density: DensityUnit::PoundPerCubicFoot,
                acceleration: AccelerationUnit::FootPerSecondSquared,
                dynamic_viscosity: DynamicViscosityUnit::Centipoise,
                kinematic_viscosity: KinematicViscosityUnit::SquareFootPerSecond,
                temperature: TemperatureUnit::Fahrenheit,
                flow_rate: FlowRateUnit::CubicFootPerSecond,
            },
        }
    }

    /// 물리량의 표시 단위 기호.
    pub fn symbol(&self, kind: QuantityKind) -> &'static str {
        match kind {
            QuantityKind::Length => self.length.symbol(),
            QuantityKind::Area => self.area.symbol(),
            QuantityKind::Velocity => self.velocity.symbol(),
            QuantityKind::Pressure => self.pressure.symbol(),
            QuantityKind::Density => self.density.symbol(),
            QuantityKind::Acceleration => self.acceleration.symbol(),
            QuantityKind::DynamicViscosity => self.dynamic_viscosity.symbol(),
            QuantityKind::KinematicViscosity => self.kinematic_viscosity.symbol(),
            QuantityKind::Temperature => self.temperature.symbol(),
            QuantityKind::FlowRate => self.flow_rate.symbol(),
            QuantityKind::Dimensionless => "",
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub unit_system: UnitSystem,
    /// 언어 코드(ko/en/de). "auto" 면 시스템 로케일을 따른다.
    pub language: String,
    /// 지정하지 않으면 언어 기본값을 따른다.
    pub decimal_separator: Option<DecimalSeparator>,
    /// 이력/즐겨찾기 파일 디렉터리
    pub data_dir: PathBuf,
    /// g 필드 기본값 [m/s²]
    pub gravity: f64,
    pub default_units: DefaultUnits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::SI,
            language: "auto".to_string(),
            decimal_separator: None,
            data_dir: PathBuf::from("data"),
            gravity: DEFAULT_GRAVITY,
            default_units: DefaultUnits::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// 값 범위 오류
    #[error("invalid config value: {0}")]
    Invalid(&'static str),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        info!(path = %path.display(), "default config created");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            return Err(ConfigError::Invalid("gravity must be a positive number"));
        }
        Ok(())
    }

    /// 프리셋을 바꾸고 표시 단위를 그에 맞춘다.
    pub fn set_unit_system(&mut self, system: UnitSystem) {
        self.unit_system = system;
        self.default_units = DefaultUnits::for_system(system);
    }

    /// 물리량의 표시 단위 기호.
    pub fn unit_for(&self, kind: QuantityKind) -> String {
        self.default_units.symbol(kind).to_string()
    }
}
