use std::path::PathBuf;

use thiserror::Error;
use tracing::warn;

use crate::config::{Config, ConfigError};
use crate::conversion::{self, ConversionError};
use crate::field::Field;
use crate::format::{format_result, DecimalSeparator};
use crate::history::{HistoryError, RecordStore};
use crate::i18n::{self, keys, Translator};
use crate::solver::{self, bernoulli, DomainError, EquationMode, SolveError, SolveResult, SolveStatus};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// 단위 변환 오류
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),
    /// 계산기 정의와 입력이 맞지 않는 경우
    #[error("solver error: {0}")]
    Solve(#[from] SolveError),
    /// 이력 저장소 오류
    #[error("history error: {0}")]
    History(#[from] HistoryError),
    /// 단면적 등 보조 계산의 정의역 오류
    #[error("{0}")]
    Domain(#[from] DomainError),
    /// 결과 직렬화 오류
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    /// 계산기에 없는 필드 지정
    #[error("calculator '{mode}' has no field '{id}'")]
    UnknownField { mode: EquationMode, id: String },
    /// 잘못된 명령행 인자
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// 설정, 번역기, 저장소를 묶은 실행 문맥.
pub struct Session {
    pub config: Config,
    pub config_path: PathBuf,
    pub tr: Translator,
    pub history: RecordStore,
    pub favorites: RecordStore,
}

impl Session {
    pub fn new(config: Config, config_path: PathBuf, lang_arg: &str) -> Self {
        let lang = i18n::resolve_language(lang_arg, Some(config.language.as_str()));
        let tr = Translator::new_with_pack(&lang, None);
        let history = RecordStore::history(&config.data_dir);
        let favorites = RecordStore::favorites(&config.data_dir);
        Self {
            config,
            config_path,
            tr,
            history,
            favorites,
        }
    }

    pub fn save_config(&self) -> AppResult<()> {
        self.config.save(&self.config_path)?;
        Ok(())
    }

    /// 설정값이 우선이고, 없으면 언어 기본 소수점 기호를 쓴다.
    pub fn separator(&self) -> DecimalSeparator {
        self.config
            .decimal_separator
            .unwrap_or_else(|| self.tr.language().decimal_separator())
    }

    /// 계산기 진입 시의 기본 필드 목록.
    pub fn blank_fields(&self, mode: EquationMode) -> Vec<Field> {
        mode.spec()
            .blank_fields(self.config.gravity, |kind| self.config.unit_for(kind))
    }

    /// 화면에 보여줄 결과 문장들.
    pub fn render(&self, result: &SolveResult, fields: &[Field]) -> Vec<String> {
        let tr = &self.tr;
        let sep = self.separator();
        let mode = result.mode;
        let mut lines = Vec::new();

        match &result.status {
            SolveStatus::InsufficientData => {
                let labels: Vec<String> = result
                    .invalid_field_ids
                    .iter()
                    .map(|id| tr.field_label(mode, id))
                    .collect();
                lines.push(format!("{} {}", tr.t(keys::CALC_INSUFFICIENT), labels.join(", ")));
                return lines;
            }
            SolveStatus::Domain(err) => {
                lines.push(format!("{} {err}", tr.t(keys::CALC_DOMAIN)));
                return lines;
            }
            SolveStatus::FullyDetermined => lines.push(tr.t(keys::CALC_FULLY_DETERMINED)),
            SolveStatus::Solved => {}
        }

        if let Some(id) = &result.unknown_field_id {
            let unit = fields
                .iter()
                .find(|f| &f.id == id)
                .map(|f| f.unit.as_str())
                .unwrap_or_default();
            lines.push(
                format!(
                    "{}: {} = {} {unit}",
                    tr.t(keys::CALC_CALCULATED),
                    tr.field_label(mode, id),
                    sep.localize(&result.value_display)
                )
                .trim_end()
                .to_string(),
            );
        }

        for output in &result.outputs {
            let unit = self.config.unit_for(output.kind);
            let value = output
                .display_in(&unit)
                .unwrap_or_else(|_| format_result(output.value_si));
            lines.push(
                format!("{} = {} {unit}", tr.output_label(output.id), sep.localize(&value))
                    .trim_end()
                    .to_string(),
            );
        }

        if let Some(regime) = result.regime {
            lines.push(format!("{} {}", tr.t(keys::CALC_REGIME), tr.regime_name(regime)));
        }
        if result
            .output(bernoulli::NPSH_MARGIN)
            .is_some_and(|m| m.value_si < bernoulli::MIN_NPSH_MARGIN)
        {
            lines.push(tr.t(keys::CALC_CAVITATION_RISK));
        }
        lines
    }

    /// 계산 결과를 저장소에 남긴다. 실패해도 결과에는 영향을 주지 않으며
    /// 사용자에게 보여줄 알림 문장을 돌려준다.
    pub fn record(
        &self,
        store: &RecordStore,
        fields: &[Field],
        result: &SolveResult,
        saved_key: &str,
    ) -> String {
        match store.append(result.mode.key(), &fields, &summary(result)) {
            Ok(_) => self.tr.t(saved_key),
            Err(err) => {
                warn!(error = %err, "failed to persist calculation");
                format!("{} {err}", self.tr.t(keys::CALC_SAVE_FAILED))
            }
        }
    }
}

/// 이력에 남길 정규 결과 문자열. 소수점은 항상 `.` 이다.
pub fn summary(result: &SolveResult) -> String {
    let mut parts = Vec::new();
    if let Some(id) = &result.unknown_field_id {
        parts.push(format!("{id}={}", result.value_display));
    }
    for output in &result.outputs {
        parts.push(format!("{}={}", output.id, format_result(output.value_si)));
    }
    parts.join("; ")
}

/// 대화형 입력 한 줄을 값과 단위로 나눈다. `"2,5 ft"` → `("2,5", Some("ft"))`.
pub fn parse_field_input(input: &str) -> (String, Option<String>) {
    let trimmed = input.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((value, unit)) if !unit.trim().is_empty() => {
            (value.to_string(), Some(unit.trim().to_string()))
        }
        _ => (trimmed.to_string(), None),
    }
}

/// 명령행 필드 지정 `ID=VALUE[:UNIT]` 을 해석한다.
pub fn parse_field_assignment(arg: &str) -> AppResult<(String, String, Option<String>)> {
    let (id, rest) = arg
        .split_once('=')
        .ok_or_else(|| AppError::InvalidArgument(format!("expected ID=VALUE[:UNIT], got '{arg}'")))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::InvalidArgument(format!("missing field id in '{arg}'")));
    }
    let (value, unit) = match rest.split_once(':') {
        Some((v, u)) => (v.trim(), Some(u.trim().to_string())),
        None => (rest.trim(), None),
    };
    Ok((id.to_string(), value.to_string(), unit))
}

/// 필드 목록에 값을 덮어쓴다. 단위를 주면 그 단위가 해당 물리량 표에 있어야 한다.
pub fn apply_assignment(
    mode: EquationMode,
    fields: &mut [Field],
    id: &str,
    value: &str,
    unit: Option<&str>,
) -> AppResult<()> {
    let field = fields
        .iter_mut()
        .find(|f| f.id == id)
        .ok_or_else(|| AppError::UnknownField {
            mode,
            id: id.to_string(),
        })?;
    if let Some(unit) = unit {
        conversion::check_unit(field.kind, unit)?;
        field.unit = unit.to_string();
    }
    field.raw_value = value.to_string();
    Ok(())
}

/// 필드 목록으로 계산한다.
pub fn calculate(mode: EquationMode, fields: &[Field]) -> AppResult<SolveResult> {
    Ok(solver::solve(mode, fields)?)
}

/// 대화형 메인 루프를 실행한다.
pub fn run(session: &mut Session) -> AppResult<()> {
    loop {
        match ui_cli::main_menu(&session.tr)? {
            MenuChoice::Calculator(mode) => ui_cli::handle_calculator(session, mode)?,
            MenuChoice::UnitConversion => ui_cli::handle_unit_conversion(session)?,
            MenuChoice::FlowArea => ui_cli::handle_flow_area(session)?,
            MenuChoice::History => ui_cli::handle_records(&session.tr, &session.history)?,
            MenuChoice::Favorites => ui_cli::handle_records(&session.tr, &session.favorites)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(&session.tr, &mut session.config)?;
                session.save_config()?;
            }
            MenuChoice::Exit => {
                println!("{}", session.tr.t(keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
