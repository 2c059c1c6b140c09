use std::fmt;

use serde::{Deserialize, Serialize};

use crate::matcher::{DecimalParseError, ExpectedDecimal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    /// Text drawn on a bitmap, read back by OCR.
    Image,
    /// Text set in a PDF, rasterized, then read back by OCR.
    Pdf,
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowKind::Image => write!(f, "image"),
            FlowKind::Pdf => write!(f, "pdf"),
        }
    }
}

/// Fixture text plus the numeral OCR has to recover from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub kind: FlowKind,
    pub text: String,
    pub expected: ExpectedDecimal,
}

impl Scenario {
    pub fn new(kind: FlowKind, text: impl Into<String>, expected: ExpectedDecimal) -> Self {
        Self {
            kind,
            text: text.into(),
            expected,
        }
    }

    /// `"Total: 123.45"` as an image.
    pub fn image_total() -> Result<Self, DecimalParseError> {
        Ok(Self::new(
            FlowKind::Image,
            "Total: 123.45",
            ExpectedDecimal::from_hundredths(12345)?,
        ))
    }

    /// `"Amount: 987.65"` as a PDF.
    pub fn pdf_amount() -> Result<Self, DecimalParseError> {
        Ok(Self::new(
            FlowKind::Pdf,
            "Amount: 987.65",
            ExpectedDecimal::from_hundredths(98765)?,
        ))
    }

    pub fn builtin() -> Result<Vec<Self>, DecimalParseError> {
        Ok(vec![Self::image_total()?, Self::pdf_amount()?])
    }
}
