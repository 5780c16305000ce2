//! Model serving wire format

use serde::{Deserialize, Serialize};

/// Request body: a batch holding a single row of features
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictRequest {
    pub inputs: Vec<Vec<f64>>,
}

/// Response body: a batch of rows, each with one output column
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub outputs: Vec<Vec<f64>>,
}

impl PredictResponse {
    /// The single probability, if the batch is exactly one row by one column
    pub fn single(&self) -> Option<f64> {
        match self.outputs.as_slice() {
            [row] => match row.as_slice() {
                [p] => Some(*p),
                _ => None,
            },
            _ => None,
        }
    }
}
