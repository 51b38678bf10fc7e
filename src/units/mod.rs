//! 단위 정의 및 변환 모듈 모음.
//!
//! 온도를 제외한 모든 물리량은 SI 기준 단위에 대한 배율 하나로 표현되므로
//! [`LinearUnit`] 트레이트를 공유한다. 온도는 아핀 변환이라 별도로 다룬다.

pub mod acceleration;
pub mod area;
pub mod density;
pub mod flow_rate;
pub mod length;
pub mod pressure;
pub mod temperature;
pub mod velocity;
pub mod viscosity;

pub use acceleration::AccelerationUnit;
pub use area::AreaUnit;
pub use density::DensityUnit;
pub use flow_rate::FlowRateUnit;
pub use length::LengthUnit;
pub use pressure::PressureUnit;
pub use temperature::{convert_temperature, TemperatureUnit};
pub use velocity::VelocityUnit;
pub use viscosity::{DynamicViscosityUnit, KinematicViscosityUnit};

/// SI 기준 단위에 곱셈 배율 하나로 환산되는 단위.
pub trait LinearUnit: Copy + Sized + 'static {
    /// 표에 등록된 모든 단위. 첫 번째 항목이 SI 기준 단위이다.
    const ALL: &'static [Self];

    /// 화면 표시용 기호.
    fn symbol(self) -> &'static str;

    /// 기호 외에 입력으로 허용하는 별칭(소문자).
    fn aliases(self) -> &'static [&'static str] {
        &[]
    }

    /// 이 단위 1의 크기를 SI 기준 단위로 나타낸 값.
    fn factor(self) -> f64;

    /// 기호나 별칭으로 단위를 찾는다. 대소문자는 구분하지 않는다.
    fn parse(s: &str) -> Option<Self> {
        let key = s.trim().to_lowercase();
        Self::ALL.iter().copied().find(|u| {
            u.symbol().to_lowercase() == key || u.aliases().iter().any(|a| *a == key)
        })
    }
}
