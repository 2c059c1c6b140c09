pub mod config;
pub mod error;
pub mod fixture;
pub mod logging;
pub mod matcher;
pub mod pipeline;
pub mod tools;

pub use config::{load_config, load_config_from_str, ProbeConfig};
pub use error::{
    AssertionError, ConfigError, FixtureError, ProbeError, Result, ToolError,
};
pub use fixture::{create_test_image, create_test_pdf, ImageFixture, PdfFixture};
pub use matcher::{assert_decimal_present, DecimalMatch, DecimalParseError, ExpectedDecimal};
pub use pipeline::{FlowKind, FlowReport, Probe, Scenario};
pub use tools::{ExternalTool, PdfRasterizer, TesseractCli};
