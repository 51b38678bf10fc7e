//! 수리학 계산기 핵심 로직. 미지수 하나를 자동으로 판별해 풀어내며,
//! CLI 는 이 라이브러리 위에 얇게 올라간다.

pub mod app;
pub mod config;
pub mod conversion;
pub mod field;
pub mod format;
pub mod history;
pub mod i18n;
pub mod quantity;
pub mod solver;
pub mod ui_cli;
pub mod units;
