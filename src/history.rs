//! 계산 이력과 즐겨찾기 저장소.
//!
//! 레코드는 한 줄에 하나씩 JSON 으로 기록한다(JSON lines). 파일이 없으면
//! 빈 저장소로 취급하고 첫 기록 시 만든다.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub const HISTORY_FILE: &str = "history.jsonl";
pub const FAVORITES_FILE: &str = "favorites.jsonl";

/// 저장소 입출력 오류.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("history record error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type HistoryResult<T> = Result<T, HistoryError>;

/// 계산 한 건의 기록.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: u64,
    pub calculation_type: String,
    /// 입력 필드 스냅샷(JSON 문자열)
    pub inputs: String,
    pub result: String,
    /// epoch ms
    pub timestamp: i64,
}

/// 추가 전용 레코드 저장소.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/history.jsonl`
    pub fn history(dir: &Path) -> Self {
        Self::open(dir.join(HISTORY_FILE))
    }

    /// `<dir>/favorites.jsonl`
    pub fn favorites(dir: &Path) -> Self {
        Self::open(dir.join(FAVORITES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> HistoryResult<Vec<CalculationRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let mut records = Vec::new();
        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            records.push(serde_json::from_str(line)?);
        }
        Ok(records)
    }

    fn store(&self, records: &[CalculationRecord]) -> HistoryResult<()> {
        self.ensure_parent()?;
        let mut content = String::new();
        for record in records {
            content.push_str(&serde_json::to_string(record)?);
            content.push('\n');
        }
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn ensure_parent(&self) -> HistoryResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    /// 레코드를 추가하고 부여된 id 와 함께 돌려준다.
    pub fn append(
        &self,
        calculation_type: &str,
        inputs: &impl Serialize,
        result: &str,
    ) -> HistoryResult<CalculationRecord> {
        let next_id = self.load()?.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let record = CalculationRecord {
            id: next_id,
            calculation_type: calculation_type.to_string(),
            inputs: serde_json::to_string(inputs)?,
            result: result.to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        };

        self.ensure_parent()?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", serde_json::to_string(&record)?)?;
        info!(id = record.id, calculation_type, path = %self.path.display(), "record appended");
        Ok(record)
    }

    /// 최신 기록이 먼저 오도록 돌려준다.
    pub fn list(&self) -> HistoryResult<Vec<CalculationRecord>> {
        let mut records = self.load()?;
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(records)
    }

    pub fn list_by_type_prefix(&self, prefix: &str) -> HistoryResult<Vec<CalculationRecord>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| r.calculation_type.starts_with(prefix))
            .collect())
    }

    /// id 로 삭제한다. 삭제했으면 true.
    pub fn delete(&self, id: u64) -> HistoryResult<bool> {
        let records = self.load()?;
        let before = records.len();
        let kept: Vec<_> = records.into_iter().filter(|r| r.id != id).collect();
        if kept.len() == before {
            return Ok(false);
        }
        self.store(&kept)?;
        Ok(true)
    }

    /// `calculation_type` 이 접두어로 시작하는 기록을 모두 지우고 개수를 돌려준다.
    pub fn delete_by_type_prefix(&self, prefix: &str) -> HistoryResult<usize> {
        let records = self.load()?;
        let before = records.len();
        let kept: Vec<_> = records
            .into_iter()
            .filter(|r| !r.calculation_type.starts_with(prefix))
            .collect();
        let removed = before - kept.len();
        if removed > 0 {
            self.store(&kept)?;
        }
        Ok(removed)
    }

    pub fn clear(&self) -> HistoryResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
