use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

use crate::format::DecimalSeparator;
use crate::solver::{EquationMode, Regime};

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.title";

    pub const MAIN_MENU_UNIT_CONVERSION: &str = "main_menu.unit_conversion";
    pub const MAIN_MENU_FLOW_AREA: &str = "main_menu.flow_area";
    pub const MAIN_MENU_HISTORY: &str = "main_menu.history";
    pub const MAIN_MENU_FAVORITES: &str = "main_menu.favorites";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";

    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const PROMPT_FIELD: &str = "prompt.field";
    pub const PROMPT_VALUE: &str = "prompt.value";
    pub const PROMPT_SAVE_FAVORITE: &str = "prompt.confirm_save_favorite";

    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_INVALID_UNIT: &str = "error.invalid_unit";

    pub const CALC_INPUT_HINT: &str = "calc.input_hint";
    pub const CALC_CALCULATED: &str = "calc.calculated";
    pub const CALC_INSUFFICIENT: &str = "calc.insufficient";
    pub const CALC_DOMAIN: &str = "calc.domain";
    pub const CALC_FULLY_DETERMINED: &str = "calc.fully_determined";
    pub const CALC_REGIME: &str = "calc.regime";
    pub const CALC_CAVITATION_RISK: &str = "calc.cavitation_risk";
    pub const CALC_SAVED: &str = "calc.saved";
    pub const CALC_SAVE_FAILED: &str = "calc.save_failed";
    pub const CALC_FAVORITE_SAVED: &str = "calc.favorite_saved";

    pub const UNIT_CONVERSION_HEADING: &str = "unit_conversion.heading";
    pub const UNIT_CONVERSION_PROMPT_KIND: &str = "unit_conversion.prompt_kind";
    pub const UNIT_CONVERSION_PROMPT_FROM_UNIT: &str = "unit_conversion.prompt_from_unit";
    pub const UNIT_CONVERSION_PROMPT_TO_UNIT: &str = "unit_conversion.prompt_to_unit";
    pub const UNIT_CONVERSION_RESULT: &str = "unit_conversion.result";
    pub const UNIT_CONVERSION_AVAILABLE: &str = "unit_conversion.available";

    pub const FLOW_AREA_HEADING: &str = "flow_area.heading";
    pub const FLOW_AREA_SHAPES: &str = "flow_area.shapes";
    pub const FLOW_AREA_PROMPT_DIAMETER: &str = "flow_area.prompt_diameter";
    pub const FLOW_AREA_PROMPT_SIDE: &str = "flow_area.prompt_side";
    pub const FLOW_AREA_PROMPT_WIDTH: &str = "flow_area.prompt_width";
    pub const FLOW_AREA_PROMPT_HEIGHT: &str = "flow_area.prompt_height";
    pub const FLOW_AREA_PROMPT_FILL: &str = "flow_area.prompt_fill";
    pub const FLOW_AREA_RESULT: &str = "flow_area.result";

    pub const HISTORY_HEADING: &str = "history.heading";
    pub const HISTORY_EMPTY: &str = "history.empty";
    pub const HISTORY_PROMPT_DELETE: &str = "history.prompt_delete";
    pub const HISTORY_DELETED: &str = "history.deleted";
    pub const HISTORY_NOT_FOUND: &str = "history.not_found";
    pub const HISTORY_CLEARED: &str = "history.cleared";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_UNIT_SYSTEM: &str = "settings.current_unit_system";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
    De,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else if c.starts_with("de") {
            Language::De
        } else {
            Language::En
        }
    }

    /// 언어별 기본 소수점 기호.
    pub fn decimal_separator(&self) -> DecimalSeparator {
        match self {
            Language::De => DecimalSeparator::Comma,
            Language::Ko | Language::En => DecimalSeparator::Dot,
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    pack: HashMap<String, String>,
    fallback: HashMap<String, String>,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en/de)에 따라 내장 언어팩만으로 번역기를 생성한다.
    /// 알 수 없는 코드는 en 으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        let lang = Language::from_code(lang_code);
        Self {
            lang,
            pack: built_in_pack(lang).unwrap_or_default(),
            fallback: built_in_pack(Language::En).unwrap_or_default(),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&Path>) -> Self {
        let mut tr = Self::new(lang_code);
        tr.overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides(Path::new("locales"), lang_code));
        tr
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 키를 조회해 문자열을 반환한다. 어느 언어팩에도 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.overrides
            .as_ref()
            .and_then(|m| m.get(key))
            .or_else(|| self.pack.get(key))
            .or_else(|| self.fallback.get(key))
            .map(String::as_str)
    }

    /// 번역을 가져온다. 없으면 키 자체를 돌려준다.
    pub fn t(&self, key: &str) -> String {
        self.lookup(key).unwrap_or(key).to_string()
    }

    /// `{name}` 자리표시자를 채운 번역.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut s = self.t(key);
        for (name, value) in args {
            s = s.replace(&format!("{{{name}}}"), value);
        }
        s
    }

    pub fn mode_name(&self, mode: EquationMode) -> String {
        self.t(&format!("mode.{}", mode.key()))
    }

    /// 필드 표시명. 모드별 이름이 있으면 우선한다.
    pub fn field_label(&self, mode: EquationMode, id: &str) -> String {
        self.lookup(&format!("field.{}.{id}", mode.key()))
            .or_else(|| self.lookup(&format!("field.{id}")))
            .unwrap_or(id)
            .to_string()
    }

    pub fn output_label(&self, id: &str) -> String {
        self.lookup(&format!("output.{id}")).unwrap_or(id).to_string()
    }

    pub fn regime_name(&self, regime: Regime) -> String {
        self.t(&format!("regime.{}", regime.key()))
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        "ko" | "ko-kr" => Some("ko-kr".into()),
        "en" | "en-us" | "en-uk" | "en-gb" => Some("en-us".into()),
        "de" | "de-de" => Some("de-de".into()),
        other if other.starts_with("ko") => Some("ko-kr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        other if other.starts_with("de") => Some("de-de".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    normalize_lang(&lang)
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: 중첩 테이블을 점으로 이은 플랫 맵.
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = dir.join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: Language) -> Option<HashMap<String, String>> {
    match lang {
        Language::En => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        Language::Ko => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        Language::De => parse_toml_to_map(include_str!("../locales/de-de.toml")),
    }
}
