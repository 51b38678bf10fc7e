//! 입력 필드 스냅샷과 유효성 분류기.

use serde::{Deserialize, Serialize};

use crate::format::parse_decimal;
use crate::quantity::QuantityKind;

/// 사용자가 입력한 물리량 하나.
///
/// `raw_value` 는 입력 문자열 그대로이며 소수점 쉼표를 허용한다.
/// `unit` 은 `kind` 의 단위 표에 있는 기호여야 한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: String,
    pub raw_value: String,
    pub unit: String,
    pub kind: QuantityKind,
}

impl Field {
    pub fn new(
        id: impl Into<String>,
        raw_value: impl Into<String>,
        unit: impl Into<String>,
        kind: QuantityKind,
    ) -> Self {
        Self {
            id: id.into(),
            raw_value: raw_value.into(),
            unit: unit.into(),
            kind,
        }
    }

    /// 값이 비어 있지 않고 유한한 수로 해석되면 그 값을 돌려준다.
    pub fn value(&self) -> Option<f64> {
        parse_decimal(&self.raw_value)
    }

    pub fn is_valid(&self) -> bool {
        self.value().is_some()
    }
}

/// 분류 결과. id 순서는 항상 선언 순서를 따른다.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    pub valid_ids: Vec<String>,
    pub missing_ids: Vec<String>,
    /// 정확히 하나만 빠졌을 때 그 필드 id
    pub unique_missing: Option<String>,
}

impl Classification {
    /// (id, 유효 여부) 목록에서 분류 결과를 만든다.
    pub fn from_presence<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut out = Classification::default();
        for (id, valid) in entries {
            if valid {
                out.valid_ids.push(id.to_string());
            } else {
                out.missing_ids.push(id.to_string());
            }
        }
        if out.missing_ids.len() == 1 {
            out.unique_missing = out.missing_ids.first().cloned();
        }
        out
    }

    /// 빠진 필드가 없다. 풀 대상이 없는 상태이다.
    pub fn is_complete(&self) -> bool {
        self.missing_ids.is_empty()
    }

    /// 둘 이상 빠져서 풀 수 없는 상태이다.
    pub fn is_insufficient(&self) -> bool {
        self.missing_ids.len() > 1
    }
}

/// 필드 목록을 선언 순서대로 분류한다.
///
/// 정확히 하나가 빠졌으면 `unique_missing` 이 채워지고, 둘 이상이면
/// `None` 과 함께 빠진 id 전체를 돌려준다.
pub fn classify(fields: &[Field]) -> Classification {
    Classification::from_presence(fields.iter().map(|f| (f.id.as_str(), f.is_valid())))
}
