//! 계산 결과 문자열화. 로케일과 무관한 정규 표현을 만든 뒤
//! 필요할 때만 소수점 기호를 바꿔 보여준다.

use serde::{Deserialize, Serialize};

/// 고정 소수 자릿수.
const FIXED_DIGITS: usize = 15;

/// 결과값을 소수 15자리로 찍은 뒤 뒤쪽 0과 소수점을 제거한다.
///
/// NaN(및 무한대)은 "결과 없음"으로 보고 빈 문자열을 돌려준다.
pub fn format_result(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let fixed = format!("{:.*}", FIXED_DIGITS, value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// 사용자가 입력한 숫자 문자열을 해석한다. 소수점 쉼표를 허용한다.
///
/// 비어 있거나 유한한 수가 아니면 `None`.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    s.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// 화면에 표시할 소수점 기호.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecimalSeparator {
    #[default]
    Dot,
    Comma,
}

impl DecimalSeparator {
    /// 정규 문자열(`.` 소수점)을 표시용으로 바꾼다. 값의 의미는 바뀌지 않는다.
    pub fn localize(self, canonical: &str) -> String {
        match self {
            DecimalSeparator::Dot => canonical.to_string(),
            DecimalSeparator::Comma => canonical.replace('.', ","),
        }
    }
}
