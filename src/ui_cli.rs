use std::io::{self, Write};

use chrono::DateTime;

use crate::app::{self, AppError, Session};
use crate::config::{Config, UnitSystem};
use crate::conversion;
use crate::field::Field;
use crate::format::{format_result, parse_decimal};
use crate::history::RecordStore;
use crate::i18n::{keys, Translator};
use crate::quantity::QuantityKind;
use crate::solver::continuity::{self, CrossSection, Fill};
use crate::solver::EquationMode;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculator(EquationMode),
    UnitConversion,
    FlowArea,
    History,
    Favorites,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::APP_TITLE));
    for (i, mode) in EquationMode::ALL.iter().enumerate() {
        println!("{}) {}", i + 1, tr.mode_name(*mode));
    }
    let base = EquationMode::ALL.len();
    println!("{}) {}", base + 1, tr.t(keys::MAIN_MENU_UNIT_CONVERSION));
    println!("{}) {}", base + 2, tr.t(keys::MAIN_MENU_FLOW_AREA));
    println!("{}) {}", base + 3, tr.t(keys::MAIN_MENU_HISTORY));
    println!("{}) {}", base + 4, tr.t(keys::MAIN_MENU_FAVORITES));
    println!("{}) {}", base + 5, tr.t(keys::MAIN_MENU_SETTINGS));
    println!("0) {}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        if let Some(choice) = sel.trim().parse::<usize>().ok().and_then(map_menu) {
            return Ok(choice);
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    }
}

fn map_menu(n: usize) -> Option<MenuChoice> {
    let base = EquationMode::ALL.len();
    match n {
        0 => Some(MenuChoice::Exit),
        n if n <= base => Some(MenuChoice::Calculator(EquationMode::ALL[n - 1])),
        n => match n - base {
            1 => Some(MenuChoice::UnitConversion),
            2 => Some(MenuChoice::FlowArea),
            3 => Some(MenuChoice::History),
            4 => Some(MenuChoice::Favorites),
            5 => Some(MenuChoice::Settings),
            _ => None,
        },
    }
}

/// 계산기 한 개를 처리한다. 필드를 차례로 입력받은 뒤 미지수를 구한다.
pub fn handle_calculator(session: &Session, mode: EquationMode) -> Result<(), AppError> {
    let tr = &session.tr;
    println!("\n-- {} --", tr.mode_name(mode));
    println!("{}", tr.t(keys::CALC_INPUT_HINT));

    let mut fields = session.blank_fields(mode);
    for field in fields.iter_mut() {
        read_field(session, mode, field)?;
    }

    let result = app::calculate(mode, &fields)?;
    for line in session.render(&result, &fields) {
        println!("{line}");
    }
    if !result.is_valid() {
        return Ok(());
    }

    println!(
        "{}",
        session.record(&session.history, &fields, &result, keys::CALC_SAVED)
    );
    let answer = read_line(&tr.t(keys::PROMPT_SAVE_FAVORITE))?;
    if answer.trim().eq_ignore_ascii_case("y") {
        println!(
            "{}",
            session.record(&session.favorites, &fields, &result, keys::CALC_FAVORITE_SAVED)
        );
    }
    Ok(())
}

/// 필드 하나를 입력받는다. 빈 입력은 현재 값 유지, `-` 는 값 지우기.
fn read_field(session: &Session, mode: EquationMode, field: &mut Field) -> Result<(), AppError> {
    let tr = &session.tr;
    let label = tr.field_label(mode, &field.id);
    let unit_hint = if field.unit.is_empty() { "-" } else { field.unit.as_str() };
    loop {
        let current = if field.raw_value.is_empty() {
            String::new()
        } else {
            format!(" ({})", session.separator().localize(&field.raw_value))
        };
        let prompt = tr.t_with(
            keys::PROMPT_FIELD,
            &[("label", label.as_str()), ("unit", unit_hint), ("current", current.as_str())],
        );
        let input = read_line(&prompt)?;
        let input = input.trim();
        if input.is_empty() {
            return Ok(());
        }
        if input == "-" {
            field.raw_value.clear();
            return Ok(());
        }

        let (value, unit) = app::parse_field_input(input);
        if parse_decimal(&value).is_none() {
            println!("{}", tr.t(keys::ERROR_INVALID_NUMBER));
            continue;
        }
        if let Some(unit) = unit {
            if conversion::check_unit(field.kind, &unit).is_err() {
                let units = conversion::units_of(field.kind).join(", ");
                println!("{}", tr.t_with(keys::ERROR_INVALID_UNIT, &[("units", units.as_str())]));
                continue;
            }
            field.unit = unit;
        }
        field.raw_value = value;
        return Ok(());
    }
}

/// 단위 변환 메뉴를 처리한다.
pub fn handle_unit_conversion(session: &Session) -> Result<(), AppError> {
    let tr = &session.tr;
    println!("{}", tr.t(keys::UNIT_CONVERSION_HEADING));
    let kinds: Vec<QuantityKind> = QuantityKind::ALL
        .iter()
        .copied()
        .filter(|k| *k != QuantityKind::Dimensionless)
        .collect();
    for (i, kind) in kinds.iter().enumerate() {
        println!("{}) {}", i + 1, kind.key());
    }
    let kind = loop {
        let sel = read_line(&tr.t(keys::UNIT_CONVERSION_PROMPT_KIND))?;
        if let Some(kind) = sel
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| kinds.get(i))
        {
            break *kind;
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    };
    println!(
        "{} {}",
        tr.t(keys::UNIT_CONVERSION_AVAILABLE),
        conversion::units_of(kind).join(", ")
    );
    let value = read_f64(tr, &tr.t(keys::PROMPT_VALUE))?;
    let from_unit = read_line(&tr.t(keys::UNIT_CONVERSION_PROMPT_FROM_UNIT))?;
    let to_unit = read_line(&tr.t(keys::UNIT_CONVERSION_PROMPT_TO_UNIT))?;
    let result = conversion::convert(value, kind, from_unit.trim(), to_unit.trim())?;
    println!(
        "{} {} {}",
        tr.t(keys::UNIT_CONVERSION_RESULT),
        session.separator().localize(&format_result(result)),
        to_unit.trim()
    );
    Ok(())
}

/// 단면 형상과 충수 높이로 유수 단면적을 구한다.
pub fn handle_flow_area(session: &Session) -> Result<(), AppError> {
    let tr = &session.tr;
    println!("{}", tr.t(keys::FLOW_AREA_HEADING));
    println!("{}", tr.t(keys::FLOW_AREA_SHAPES));
    let section = loop {
        let sel = read_line(&tr.t(keys::PROMPT_SELECT))?;
        match sel.trim() {
            "1" => {
                let diameter = read_f64(tr, &tr.t(keys::FLOW_AREA_PROMPT_DIAMETER))?;
                break CrossSection::Circular { diameter };
            }
            "2" => {
                let side = read_f64(tr, &tr.t(keys::FLOW_AREA_PROMPT_SIDE))?;
                break CrossSection::Square { side };
            }
            "3" => {
                let width = read_f64(tr, &tr.t(keys::FLOW_AREA_PROMPT_WIDTH))?;
                let height = read_f64(tr, &tr.t(keys::FLOW_AREA_PROMPT_HEIGHT))?;
                break CrossSection::Rectangular { width, height };
            }
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    };
    let fill = loop {
        let s = read_line(&tr.t(keys::FLOW_AREA_PROMPT_FILL))?;
        if s.trim().is_empty() {
            break Fill::Total;
        }
        match parse_decimal(&s) {
            Some(height) => break Fill::Partial { height },
            None => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    };
    let area = continuity::flow_area(section, fill)?;
    println!(
        "{} {}",
        tr.t(keys::FLOW_AREA_RESULT),
        session.separator().localize(&format_result(area))
    );
    Ok(())
}

/// 이력/즐겨찾기 목록을 보여주고 삭제 요청을 처리한다.
pub fn handle_records(tr: &Translator, store: &RecordStore) -> Result<(), AppError> {
    println!("{}", tr.t(keys::HISTORY_HEADING));
    let records = store.list()?;
    if records.is_empty() {
        println!("{}", tr.t(keys::HISTORY_EMPTY));
        return Ok(());
    }
    for record in &records {
        let when = DateTime::from_timestamp_millis(record.timestamp)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        println!(
            "#{} [{when}] {}: {}",
            record.id, record.calculation_type, record.result
        );
    }

    let sel = read_line(&tr.t(keys::HISTORY_PROMPT_DELETE))?;
    let sel = sel.trim();
    if sel.is_empty() {
        return Ok(());
    }
    if sel.eq_ignore_ascii_case("all") {
        store.clear()?;
        println!("{}", tr.t(keys::HISTORY_CLEARED));
        return Ok(());
    }
    match sel.parse::<u64>() {
        Ok(id) if store.delete(id)? => println!("{}", tr.t(keys::HISTORY_DELETED)),
        _ => println!("{}", tr.t(keys::HISTORY_NOT_FOUND)),
    }
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {:?}", tr.t(keys::SETTINGS_CURRENT_UNIT_SYSTEM), cfg.unit_system);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(&tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if sel.trim().is_empty() {
        return Ok(());
    }
    match sel.trim() {
        "1" => cfg.set_unit_system(UnitSystem::SI),
        "2" => cfg.set_unit_system(UnitSystem::Imperial),
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    }
    println!("{} {:?}", tr.t(keys::SETTINGS_SAVED), cfg.unit_system);
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match parse_decimal(&s) {
            Some(v) => return Ok(v),
            None => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
