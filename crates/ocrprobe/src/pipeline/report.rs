use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AssertionError;
use crate::matcher::{DecimalMatch, ExpectedDecimal};
use crate::pipeline::scenario::FlowKind;

/// Files a flow produced inside its work directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowArtifacts {
    /// The generated PNG or PDF.
    pub fixture: PathBuf,
    /// The bitmap handed to OCR; equal to `fixture` for the image flow.
    pub ocr_input: PathBuf,
}

/// Outcome of one flow whose tools all ran successfully.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowReport {
    pub kind: FlowKind,
    pub fixture_text: String,
    pub expected: ExpectedDecimal,
    pub artifacts: FlowArtifacts,
    pub ocr_text: String,
    pub matched: Option<DecimalMatch>,
    pub duration_ms: u64,
    pub finished_at: DateTime<Utc>,
}

impl FlowReport {
    pub fn is_match(&self) -> bool {
        self.matched.is_some()
    }

    pub fn ensure_matched(&self) -> Result<&DecimalMatch, AssertionError> {
        self.matched.as_ref().ok_or_else(|| AssertionError::NotFound {
            expected: self.expected.to_string(),
            ocr_text: self.ocr_text.clone(),
        })
    }
}
