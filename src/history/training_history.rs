use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PlotError, Result};
use crate::history::curve_series::CurveSeries;
use crate::history::finetune_record::FinetuneRecord;

/// Key holding the list of quick fine-tune outcomes.
pub const FINETUNE_RESULTS_KEY: &str = "quick_finetune_results";

const EPOCHS_KEY: &str = "epochs";
const ACCURACIES_KEY: &str = "accuracies";
const CE_LOSSES_KEY: &str = "ce_losses";
const HW_PENALTIES_KEY: &str = "hw_penalties";
const TOTAL_LOSSES_KEY: &str = "total_losses";

/// Free-form training history as written by the trainer.
///
/// The trainer stores whatever it likes under string keys; this type only
/// interprets the few keys the charts need and preserves everything else
/// untouched when saved back to disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainingHistory {
    entries: Map<String, Value>,
}

impl TrainingHistory {
    pub fn new() -> Self {
        TrainingHistory::default()
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serializes the history to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a history from a JSON file. The top level must be an object.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Stores `value` under `key`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Reads the fine-tune result list.
    ///
    /// Returns `Ok(None)` when the key is missing or holds an empty value
    /// (`null`, `false`, `0`, `""`, `[]`, `{}`). A non-empty list is decoded
    /// entry by entry so that a bad entry is reported with its index; any other
    /// value is a `Json` error.
    pub fn finetune_results(&self) -> Result<Option<Vec<FinetuneRecord>>> {
        let list = match self.entries.get(FINETUNE_RESULTS_KEY) {
            None => return Ok(None),
            Some(value) if is_empty_value(value) => return Ok(None),
            Some(Value::Array(list)) => list,
            Some(other) => {
                return Err(PlotError::Json(serde::de::Error::custom(format!(
                    "`{FINETUNE_RESULTS_KEY}` must be a list, found {other}"
                ))))
            }
        };

        list.iter()
            .enumerate()
            .map(|(index, entry)| {
                FinetuneRecord::deserialize(entry)
                    .map_err(|source| PlotError::MalformedRecord { index, source })
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    pub fn set_finetune_results(&mut self, records: &[FinetuneRecord]) -> Result<()> {
        self.entries
            .insert(FINETUNE_RESULTS_KEY.to_owned(), serde_json::to_value(records)?);
        Ok(())
    }

    /// Reads the per-epoch curve series, if the trainer recorded all of them.
    ///
    /// Lengths are not checked here; plotting validates them.
    pub fn training_curves(&self) -> Result<Option<CurveSeries>> {
        let keys = [
            EPOCHS_KEY,
            ACCURACIES_KEY,
            CE_LOSSES_KEY,
            HW_PENALTIES_KEY,
            TOTAL_LOSSES_KEY,
        ];
        if !keys.iter().all(|k| self.entries.contains_key(*k)) {
            return Ok(None);
        }

        let series = |key: &str| -> Result<Vec<f64>> {
            match self.entries.get(key) {
                Some(value) => Ok(Vec::<f64>::deserialize(value)?),
                None => Ok(Vec::new()),
            }
        };

        Ok(Some(CurveSeries {
            epochs: series(EPOCHS_KEY)?,
            accuracies: series(ACCURACIES_KEY)?,
            ce_losses: series(CE_LOSSES_KEY)?,
            hw_penalties: series(HW_PENALTIES_KEY)?,
            total_losses: series(TOTAL_LOSSES_KEY)?,
        }))
    }

    pub fn set_training_curves(&mut self, curves: &CurveSeries) -> Result<()> {
        self.insert(EPOCHS_KEY, serde_json::to_value(&curves.epochs)?);
        self.insert(ACCURACIES_KEY, serde_json::to_value(&curves.accuracies)?);
        self.insert(CE_LOSSES_KEY, serde_json::to_value(&curves.ce_losses)?);
        self.insert(HW_PENALTIES_KEY, serde_json::to_value(&curves.hw_penalties)?);
        self.insert(TOTAL_LOSSES_KEY, serde_json::to_value(&curves.total_losses)?);
        Ok(())
    }
}

/// Values a trainer writes to mean "nothing recorded".
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(list) => list.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_or_null_results_read_as_none() {
        let history = TrainingHistory::new();
        assert!(history.finetune_results().unwrap().is_none());

        let history = TrainingHistory::from_json_str(r#"{"quick_finetune_results": null}"#).unwrap();
        assert!(history.finetune_results().unwrap().is_none());
    }

    #[test]
    fn empty_values_read_as_absent() {
        for raw in ["[]", "false", "0", "0.0", r#""""#, "{}"] {
            let json = format!(r#"{{"quick_finetune_results": {raw}}}"#);
            let history = TrainingHistory::from_json_str(&json).unwrap();
            assert_eq!(history.finetune_results().unwrap(), None, "{raw}");
        }
    }

    #[test]
    fn records_round_trip_through_the_map() {
        let records = vec![
            FinetuneRecord::new(1.0, 80.0, 82.0),
            FinetuneRecord::new(2.0, 85.0, 84.0),
        ];
        let mut history = TrainingHistory::new();
        history.set_finetune_results(&records).unwrap();
        assert!(history.contains_key(FINETUNE_RESULTS_KEY));
        assert_eq!(history.finetune_results().unwrap(), Some(records));
    }

    #[test]
    fn missing_field_reports_record_index() {
        let history = TrainingHistory::from_json_str(
            r#"{"quick_finetune_results": [
                {"epoch": 1, "validation_acc": 80.0, "test_acc_after_finetune": 82.0},
                {"epoch": 2, "validation_acc": 85.0}
            ]}"#,
        )
        .unwrap();
        match history.finetune_results() {
            Err(PlotError::MalformedRecord { index, source }) => {
                assert_eq!(index, 1);
                assert!(source.to_string().contains("test_acc_after_finetune"));
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn non_list_results_are_rejected() {
        for raw in ["3", "true", r#""none""#, r#"{"epoch": 1}"#] {
            let json = format!(r#"{{"quick_finetune_results": {raw}}}"#);
            let history = TrainingHistory::from_json_str(&json).unwrap();
            assert!(matches!(history.finetune_results(), Err(PlotError::Json(_))), "{raw}");
        }
    }

    #[test]
    fn unrelated_keys_are_preserved() {
        let mut history = TrainingHistory::from_json_str(r#"{"best_acc": 91.5}"#).unwrap();
        history.set_finetune_results(&[FinetuneRecord::new(1.0, 1.0, 2.0)]).unwrap();
        assert_eq!(history.get("best_acc"), Some(&json!(91.5)));
    }

    #[test]
    fn curves_require_every_series() {
        let mut history = TrainingHistory::new();
        history.insert("epochs", json!([1, 2]));
        history.insert("accuracies", json!([10.0, 20.0]));
        assert!(history.training_curves().unwrap().is_none());

        let curves = CurveSeries {
            epochs: vec![1.0, 2.0],
            accuracies: vec![10.0, 20.0],
            ce_losses: vec![2.3, 1.9],
            hw_penalties: vec![0.5, 0.4],
            total_losses: vec![2.8, 2.3],
        };
        history.set_training_curves(&curves).unwrap();
        assert_eq!(history.training_curves().unwrap(), Some(curves));
    }

    #[test]
    fn json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut history = TrainingHistory::new();
        history.insert("run", json!("int8"));
        history.set_finetune_results(&[FinetuneRecord::new(4.0, 60.0, 61.5)]).unwrap();
        history.save_json(&path).unwrap();

        assert_eq!(TrainingHistory::load_json(&path).unwrap(), history);
    }
}
