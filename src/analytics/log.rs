//! Persistent log of per-search analytics summaries.
//!
//! The file is a JSON array of 4-element arrays, one per top-level search:
//!
//! ```text
//! [
//! [meanActionEval,meanScoreEvolution,pearsonR,meanRankCorrelation],
//! ...
//! ]
//! ```
//!
//! Undefined statistics (`NaN`) are written as `null` and read back as `NaN`.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::AnalyticsError;

use super::recorder::AnalyticsSummary;

/// Growing list of `[meanActionEval, meanScoreEvolution, pearsonR, meanRankCorrelation]`.
#[derive(Clone, Debug, Default)]
pub struct AnalyticsLog {
    records: Vec<[f32; 4]>,
}

impl AnalyticsLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a previously written log; a missing file yields an empty log.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AnalyticsError> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No analytics log at {}, starting empty", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };
        Self::from_json(&text)
    }

    /// Parse the JSON array-of-arrays format.
    pub fn from_json(text: &str) -> Result<Self, AnalyticsError> {
        let raw: Vec<[Option<f32>; 4]> = serde_json::from_str(text)?;
        let records = raw
            .into_iter()
            .map(|r| r.map(|v| v.unwrap_or(f32::NAN)))
            .collect();
        Ok(Self { records })
    }

    /// Append the tuple of one search summary.
    pub fn push(&mut self, summary: &AnalyticsSummary) {
        self.records.push(summary.to_record());
    }

    /// Append a raw tuple.
    pub fn push_record(&mut self, record: [f32; 4]) {
        self.records.push(record);
    }

    #[must_use]
    pub fn records(&self) -> &[[f32; 4]] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render the whole log, one tuple per line.
    pub fn to_json(&self) -> Result<String, AnalyticsError> {
        let rows = self
            .records
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;
        if rows.is_empty() {
            return Ok("[]".to_string());
        }
        Ok(format!("[\n{}\n]", rows.join(",\n")))
    }

    /// Overwrite `path` with the whole log.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        debug!("Wrote {} analytics records to {}", self.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_log_json() {
        let log = AnalyticsLog::new();
        assert_eq!(log.to_json().unwrap(), "[]");
    }

    #[test]
    fn test_json_shape() {
        let mut log = AnalyticsLog::new();
        log.push_record([1.0, 0.5, 0.25, -1.0]);
        log.push_record([2.0, 0.0, 1.0, 0.5]);

        let json = log.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let outer = value.as_array().unwrap();

        assert_eq!(outer.len(), 2);
        assert!(outer.iter().all(|row| row.as_array().map(Vec::len) == Some(4)));
        assert_eq!(outer[0][3].as_f64(), Some(-1.0));
    }

    #[test]
    fn test_nan_written_as_null_and_read_back() {
        let mut log = AnalyticsLog::new();
        log.push_record([1.0, 2.0, f32::NAN, 0.5]);

        let json = log.to_json().unwrap();
        assert!(json.contains("null"));

        let restored = AnalyticsLog::from_json(&json).unwrap();
        assert_eq!(restored.len(), 1);
        assert!(restored.records()[0][2].is_nan());
        assert_eq!(restored.records()[0][3], 0.5);
    }

    #[test]
    fn test_write_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analytics.json");

        let mut log = AnalyticsLog::new();
        log.push_record([0.1, 0.2, 0.3, 0.4]);
        log.write(&path).unwrap();

        let mut loaded = AnalyticsLog::load(&path).unwrap();
        assert_eq!(loaded.records(), &[[0.1, 0.2, 0.3, 0.4]]);

        loaded.push_record([1.0, 1.0, 1.0, 1.0]);
        loaded.write(&path).unwrap();
        assert_eq!(AnalyticsLog::load(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = AnalyticsLog::load(dir.path().join("missing.json")).unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn test_load_malformed_file() {
        let result = AnalyticsLog::from_json("[[1.0, 2.0]]");
        assert!(matches!(result, Err(AnalyticsError::Json(_))));
    }
}
