use serde::{Deserialize, Serialize};

/// Outcome of one quick fine-tune pass, keyed by the main-training epoch it
/// started from.
///
/// Field names match the JSON keys written by the trainer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinetuneRecord {
    pub epoch: f64,
    /// Validation accuracy (percent) before fine-tuning.
    pub validation_acc: f64,
    /// Test accuracy (percent) after fine-tuning.
    pub test_acc_after_finetune: f64,
}

impl FinetuneRecord {
    pub fn new(epoch: f64, validation_acc: f64, test_acc_after_finetune: f64) -> Self {
        FinetuneRecord { epoch, validation_acc, test_acc_after_finetune }
    }

    /// Accuracy gained by fine-tuning; negative when it hurt.
    pub fn improvement(&self) -> f64 {
        self.test_acc_after_finetune - self.validation_acc
    }
}
