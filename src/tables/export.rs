//! Settings for exporting ranked trees into tables.

/// Configuration of [RankTree::export](crate::RankTree::export).
///
/// Leaves are placed at time `0`, each internal node `time_step` above its
/// oldest child; every edge spans `[0, sequence_length)`.
///
/// # Example
/// ```
/// use treerank::TableExport;
///
/// let config = TableExport::new().with_sequence_length(100.0).with_time_step(0.5);
/// assert_eq!(config.sequence_length(), 100.0);
/// assert_eq!(config.time_step(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableExport {
    sequence_length: f64,
    time_step: f64,
}

impl TableExport {
    /// Creates the default configuration (unit sequence length and time step).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sequence length spanned by every edge.
    ///
    /// # Panics
    /// Panics if `sequence_length` is not positive and finite.
    pub fn with_sequence_length(mut self, sequence_length: f64) -> Self {
        assert!(
            sequence_length.is_finite() && sequence_length > 0.0,
            "Sequence length must be positive, got {sequence_length}"
        );
        self.sequence_length = sequence_length;
        self
    }

    /// Sets the time between a node and its oldest child.
    ///
    /// # Panics
    /// Panics if `time_step` is not positive and finite.
    pub fn with_time_step(mut self, time_step: f64) -> Self {
        assert!(
            time_step.is_finite() && time_step > 0.0,
            "Time step must be positive, got {time_step}"
        );
        self.time_step = time_step;
        self
    }

    pub fn sequence_length(&self) -> f64 {
        self.sequence_length
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }
}

impl Default for TableExport {
    fn default() -> Self {
        TableExport {
            sequence_length: 1.0,
            time_step: 1.0,
        }
    }
}
