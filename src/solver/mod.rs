//! 미지수 하나를 찾아 푸는 계산기 공통 구동부.
//!
//! 각 식(`EquationSpec`)은 필드 목록과 순수 풀이 함수를 정적으로 가진다.
//! 구동부는 필드 스냅샷을 SI 로 환산해 풀이 함수에 넘기고, 결과를 다시
//! 사용자가 고른 표시 단위로 돌려 `SolveResult` 를 만든다. 호출 사이에
//! 상태를 남기지 않는다.

pub mod bernoulli;
pub mod colebrook;
pub mod continuity;
pub mod froude;
pub mod reynolds;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::conversion::{self, ConversionError};
use crate::field::{Classification, Field};
use crate::format::format_result;
use crate::quantity::QuantityKind;

/// 계산기 종류(식 모드).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquationMode {
    Froude,
    Continuity,
    #[serde(rename = "bernoulli")]
    BernoulliIdeal,
    BernoulliLosses,
    BernoulliCavitation,
    Reynolds,
    Colebrook,
}

impl EquationMode {
    pub const ALL: &'static [EquationMode] = &[
        EquationMode::Froude,
        EquationMode::Continuity,
        EquationMode::BernoulliIdeal,
        EquationMode::BernoulliLosses,
        EquationMode::BernoulliCavitation,
        EquationMode::Reynolds,
        EquationMode::Colebrook,
    ];

    /// CLI 인자, 이력 레코드의 `calculation_type` 에 쓰는 키.
    pub fn key(self) -> &'static str {
        match self {
            EquationMode::Froude => "froude",
            EquationMode::Continuity => "continuity",
            EquationMode::BernoulliIdeal => "bernoulli",
            EquationMode::BernoulliLosses => "bernoulli-losses",
            EquationMode::BernoulliCavitation => "bernoulli-cavitation",
            EquationMode::Reynolds => "reynolds",
            EquationMode::Colebrook => "colebrook",
        }
    }

    pub fn spec(self) -> &'static EquationSpec {
        match self {
            EquationMode::Froude => &froude::SPEC,
            EquationMode::Continuity => &continuity::SPEC,
            EquationMode::BernoulliIdeal => &bernoulli::IDEAL_SPEC,
            EquationMode::BernoulliLosses => &bernoulli::LOSSES_SPEC,
            EquationMode::BernoulliCavitation => &bernoulli::CAVITATION_SPEC,
            EquationMode::Reynolds => &reynolds::SPEC,
            EquationMode::Colebrook => &colebrook::SPEC,
        }
    }
}

impl fmt::Display for EquationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown calculator '{0}'")]
pub struct UnknownModeError(pub String);

impl FromStr for EquationMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('_', "-");
        let alias = match key.as_str() {
            "energy" | "bernoulli-ideal" => "bernoulli",
            "losses" => "bernoulli-losses",
            "cavitation" | "npsh" => "bernoulli-cavitation",
            other => other,
        };
        EquationMode::ALL
            .iter()
            .copied()
            .find(|m| m.key() == alias)
            .ok_or_else(|| UnknownModeError(s.to_string()))
    }
}

/// 필드를 새로 만들 때 채울 기본값.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Empty,
    /// 설정된 중력가속도
    Gravity,
    /// 1 (운동에너지 보정계수 α)
    Unity,
}

/// 식에 속한 필드 하나의 정적 정의.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub id: &'static str,
    pub kind: QuantityKind,
    pub default: FieldDefault,
}

impl FieldSpec {
    pub const fn new(id: &'static str, kind: QuantityKind) -> Self {
        Self {
            id,
            kind,
            default: FieldDefault::Empty,
        }
    }

    pub const fn with_default(mut self, default: FieldDefault) -> Self {
        self.default = default;
        self
    }
}

pub(crate) type Resolution = Result<Solved, Unsolved>;

/// 물리 법칙 하나. 필드 선언 순서가 미지수 선택의 우선순위가 된다.
pub struct EquationSpec {
    pub mode: EquationMode,
    pub fields: &'static [FieldSpec],
    solve: fn(&Knowns) -> Resolution,
}

impl EquationSpec {
    pub(crate) const fn new(
        mode: EquationMode,
        fields: &'static [FieldSpec],
        solve: fn(&Knowns) -> Resolution,
    ) -> Self {
        Self {
            mode,
            fields,
            solve,
        }
    }

    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// 화면 진입 시점의 빈 필드 목록을 만든다.
    ///
    /// `unit_for` 는 물리량별 표시 단위를 돌려준다.
    pub fn blank_fields<F>(&self, gravity_si: f64, unit_for: F) -> Vec<Field>
    where
        F: Fn(QuantityKind) -> String,
    {
        self.fields
            .iter()
            .map(|spec| {
                let unit = unit_for(spec.kind);
                let raw = match spec.default {
                    FieldDefault::Empty => String::new(),
                    FieldDefault::Unity => "1".to_string(),
                    FieldDefault::Gravity => conversion::from_si(gravity_si, spec.kind, &unit)
                        .map(format_result)
                        .unwrap_or_default(),
                };
                Field::new(spec.id, raw, unit, spec.kind)
            })
            .collect()
    }
}

/// SI 로 환산된 유효 입력값 모음.
#[derive(Debug, Clone, Default)]
pub struct Knowns {
    values: BTreeMap<&'static str, f64>,
}

impl Knowns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: &'static str, value_si: f64) -> Self {
        self.insert(id, value_si);
        self
    }

    pub fn insert(&mut self, id: &'static str, value_si: f64) {
        self.values.insert(id, value_si);
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.values.get(id).copied()
    }

    pub fn has(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    /// 값이 없으면 `InsufficientData` 로 실패한다.
    pub(crate) fn require(&self, id: &'static str) -> Result<f64, Unsolved> {
        self.get(id)
            .ok_or_else(|| Unsolved::InsufficientData(vec![id.to_string()]))
    }

    /// 주어진 id 목록(선언 순서)을 분류한다.
    pub fn classify(&self, ids: &[&'static str]) -> Classification {
        Classification::from_presence(ids.iter().map(|id| (*id, self.has(id))))
    }
}

/// 수학적으로 계산할 수 없는 입력 조합.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
pub enum DomainError {
    #[error("negative value under square root while solving {what}")]
    NegativeRadicand { what: &'static str },
    #[error("division by zero while solving {what}")]
    DivisionByZero { what: &'static str },
    #[error("{what} is outside the valid domain")]
    OutOfDomain { what: &'static str },
    #[error("{what} did not produce a finite value")]
    NonFinite { what: &'static str },
}

pub(crate) fn divide(num: f64, den: f64, what: &'static str) -> Result<f64, DomainError> {
    if den == 0.0 {
        return Err(DomainError::DivisionByZero { what });
    }
    Ok(num / den)
}

pub(crate) fn sqrt_checked(radicand: f64, what: &'static str) -> Result<f64, DomainError> {
    if radicand < 0.0 {
        return Err(DomainError::NegativeRadicand { what });
    }
    Ok(radicand.sqrt())
}

/// 유동 영역 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    Subcritical,
    Critical,
    Supercritical,
    Laminar,
    Transitional,
    Turbulent,
}

impl Regime {
    pub fn key(self) -> &'static str {
        match self {
            Regime::Subcritical => "subcritical",
            Regime::Critical => "critical",
            Regime::Supercritical => "supercritical",
            Regime::Laminar => "laminar",
            Regime::Transitional => "transitional",
            Regime::Turbulent => "turbulent",
        }
    }
}

/// 미지수 외에 함께 보고하는 파생 결과값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Output {
    pub id: &'static str,
    pub kind: QuantityKind,
    pub value_si: f64,
}

impl Output {
    pub fn new(id: &'static str, kind: QuantityKind, value_si: f64) -> Self {
        Self { id, kind, value_si }
    }

    /// 지정 단위로 환산해 정규 문자열로 돌려준다.
    pub fn display_in(&self, unit: &str) -> Result<String, ConversionError> {
        conversion::from_si(self.value_si, self.kind, unit).map(format_result)
    }
}

/// 풀이 함수가 성공했을 때의 결과.
#[derive(Debug, Clone, Default)]
pub(crate) struct Solved {
    pub unknown: Option<(&'static str, f64)>,
    pub outputs: Vec<Output>,
    pub regime: Option<Regime>,
    pub nothing_missing: bool,
}

impl Solved {
    pub fn unknown(id: &'static str, value_si: f64) -> Self {
        Self {
            unknown: Some((id, value_si)),
            ..Self::default()
        }
    }

    /// 주요 결과만 계산하고 채울 필드는 없는 경우.
    pub fn computed() -> Self {
        Self::default()
    }

    /// 모든 필드가 이미 채워져 풀 대상이 없는 경우.
    pub fn complete() -> Self {
        Self {
            nothing_missing: true,
            ..Self::default()
        }
    }

    pub fn output(mut self, id: &'static str, kind: QuantityKind, value_si: f64) -> Self {
        self.outputs.push(Output::new(id, kind, value_si));
        self
    }

    pub fn regime(mut self, regime: Regime) -> Self {
        self.regime = Some(regime);
        self
    }
}

/// 풀이 함수가 값을 내지 못한 이유.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Unsolved {
    InsufficientData(Vec<String>),
    Domain(DomainError),
}

impl From<DomainError> for Unsolved {
    fn from(value: DomainError) -> Self {
        Unsolved::Domain(value)
    }
}

/// 한 번의 계산 결과 상태.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// 미지수를 풀었거나 주요 결과를 계산했다.
    Solved,
    /// 모든 필드가 채워져 풀 대상이 없다.
    FullyDetermined,
    /// 입력이 모자라 계산하지 않았다.
    InsufficientData,
    /// 계산이 수학적으로 불가능하다.
    Domain(DomainError),
}

/// "Calculate" 한 번의 결과 스냅샷. 매번 새로 만들어지며 수정하지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveResult {
    pub mode: EquationMode,
    pub status: SolveStatus,
    /// 자동 계산된(잠긴) 필드 id
    pub unknown_field_id: Option<String>,
    pub value_si: Option<f64>,
    /// 미지수를 해당 필드의 표시 단위로 환산한 정규 문자열
    pub value_display: String,
    pub invalid_field_ids: Vec<String>,
    pub outputs: Vec<Output>,
    pub regime: Option<Regime>,
}

impl SolveResult {
    pub fn is_valid(&self) -> bool {
        matches!(
            self.status,
            SolveStatus::Solved | SolveStatus::FullyDetermined
        )
    }

    pub fn output(&self, id: &str) -> Option<&Output> {
        self.outputs.iter().find(|o| o.id == id)
    }

    fn empty(mode: EquationMode, status: SolveStatus) -> Self {
        Self {
            mode,
            status,
            unknown_field_id: None,
            value_si: None,
            value_display: String::new(),
            invalid_field_ids: Vec::new(),
            outputs: Vec::new(),
            regime: None,
        }
    }
}

/// 정적 설정과 입력 필드가 어긋난 경우. 사용자 입력 문제가 아니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error("field '{id}' is declared as {found:?} but {mode} expects {expected:?}")]
    KindMismatch {
        mode: EquationMode,
        id: String,
        expected: QuantityKind,
        found: QuantityKind,
    },
}

/// 필드 스냅샷으로 해당 식을 푼다.
///
/// 식에 없는 필드는 무시하고, 넘어오지 않은 필드는 빈 값으로 본다.
pub fn solve(mode: EquationMode, fields: &[Field]) -> Result<SolveResult, SolveError> {
    let spec = mode.spec();
    let mut knowns = Knowns::new();

    for fs in spec.fields {
        let Some(field) = fields.iter().find(|f| f.id == fs.id) else {
            continue;
        };
        if field.kind != fs.kind {
            return Err(SolveError::KindMismatch {
                mode,
                id: field.id.clone(),
                expected: fs.kind,
                found: field.kind,
            });
        }
        conversion::check_unit(fs.kind, &field.unit)?;
        if let Some(v) = field.value() {
            knowns.insert(fs.id, conversion::to_si(v, fs.kind, &field.unit)?);
        }
    }

    let resolution = (spec.solve)(&knowns);
    let result = match resolution {
        Err(Unsolved::InsufficientData(missing)) => {
            let mut r = SolveResult::empty(mode, SolveStatus::InsufficientData);
            r.invalid_field_ids = missing;
            r
        }
        Err(Unsolved::Domain(err)) => SolveResult::empty(mode, SolveStatus::Domain(err)),
        Ok(solved) => finish(mode, fields, solved)?,
    };

    debug!(
        mode = %mode,
        status = ?result.status,
        unknown = ?result.unknown_field_id,
        "solve finished"
    );
    Ok(result)
}

fn finish(mode: EquationMode, fields: &[Field], solved: Solved) -> Result<SolveResult, SolveError> {
    if let Some((_, v)) = solved.unknown {
        if !v.is_finite() {
            return Ok(SolveResult::empty(
                mode,
                SolveStatus::Domain(DomainError::NonFinite { what: mode.key() }),
            ));
        }
    }
    if let Some(bad) = solved.outputs.iter().find(|o| !o.value_si.is_finite()) {
        return Ok(SolveResult::empty(
            mode,
            SolveStatus::Domain(DomainError::NonFinite { what: bad.id }),
        ));
    }

    let status = if solved.nothing_missing {
        SolveStatus::FullyDetermined
    } else {
        SolveStatus::Solved
    };
    let mut result = SolveResult::empty(mode, status);
    result.outputs = solved.outputs;
    result.regime = solved.regime;

    if let Some((id, value_si)) = solved.unknown {
        let spec = mode.spec();
        let kind = spec.field(id).map(|f| f.kind).unwrap_or(QuantityKind::Dimensionless);
        let unit = fields
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.unit.clone())
            .unwrap_or_else(|| kind.si_symbol().to_string());
        let display = conversion::from_si(value_si, kind, &unit)?;
        result.unknown_field_id = Some(id.to_string());
        result.value_si = Some(value_si);
        result.value_display = format_result(display);
    }
    Ok(result)
}
