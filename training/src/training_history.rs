use std::fmt;

/// Error measurements recorded during training.
///
/// Errors are mean absolute errors over the normalized dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingHistory {
    /// Error before the first epoch
    pub initial_error: f64,
    /// `(epoch, error)` pairs, epochs counted from 1
    pub checkpoints: Vec<(u32, f64)>,
    /// Lowest error seen, including the initial one
    pub best_error: f64,
    /// Epoch where the lowest error was seen, 0 for the initial error
    pub best_epoch: u32,
}

impl TrainingHistory {
    pub fn new(initial_error: f64) -> Self {
        Self {
            initial_error,
            checkpoints: Vec::new(),
            best_error: initial_error,
            best_epoch: 0,
        }
    }

    pub fn record_checkpoint(&mut self, epoch: u32, error: f64) {
        self.checkpoints.push((epoch, error));

        if error < self.best_error {
            self.best_error = error;
            self.best_epoch = epoch;
        }
    }

    /// Error at the last checkpoint, or the initial error if none was recorded.
    pub fn final_error(&self) -> f64 {
        self.checkpoints
            .last()
            .map_or(self.initial_error, |&(_, error)| error)
    }

    /// Number of epochs completed at the last checkpoint.
    pub fn epochs(&self) -> u32 {
        self.checkpoints.last().map_or(0, |&(epoch, _)| epoch)
    }
}

impl fmt::Display for TrainingHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Training History Summary:")?;
        writeln!(f, "------------------------")?;
        writeln!(f, "Initial error: {:.6}", self.initial_error)?;
        writeln!(
            f,
            "Best error: {:.6} (epoch {})",
            self.best_error, self.best_epoch
        )?;
        writeln!(f, "Final error: {:.6}", self.final_error())?;

        if !self.checkpoints.is_empty() {
            writeln!(f, "\nError progression:")?;
            for (epoch, error) in &self.checkpoints {
                writeln!(f, "Epoch {epoch}: {error:.6}")?;
            }
        }
        Ok(())
    }
}
