use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fixture error: {0}")]
    Fixture(#[from] FixtureError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Assertion failed: {0}")]
    Assertion(#[from] AssertionError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Failed to load font: {0}")]
    Font(String),

    #[error("Failed to encode image '{path}': {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to build PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Failed to write fixture '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Character {ch:?} cannot be drawn with the {font} base font")]
    UnsupportedText { ch: char, font: String },
}

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Failed to launch {tool} ('{program}'): {source}. Make sure it is installed and on PATH.")]
    Spawn {
        tool: &'static str,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    Failed {
        tool: &'static str,
        status: ExitStatus,
        stderr: String,
    },

    #[error("{tool} finished but '{path}' was not produced")]
    MissingOutput { tool: &'static str, path: PathBuf },

    #[error("Failed to remove previous {tool} output '{path}': {source}")]
    StaleOutput {
        tool: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum AssertionError {
    #[error("expected {expected} (with '.' or ',' separator) in OCR output:\n{ocr_text}")]
    NotFound { expected: String, ocr_text: String },
}

pub type Result<T> = std::result::Result<T, ProbeError>;
