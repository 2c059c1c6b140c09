use std::path::Path;

use regex::Regex;

use crate::config::schema::{ProbeConfig, CONFIG_VERSION};
use crate::error::ConfigError;

/// Highest `--oem` value tesseract accepts.
const MAX_ENGINE_MODE: u8 = 3;

/// Highest `--psm` value tesseract accepts.
const MAX_PAGE_SEGMENTATION_MODE: u8 = 13;

const LANGUAGE_PATTERN: &str = r"^[A-Za-z_]+(\+[A-Za-z_]+)*$";

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ProbeConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<ProbeConfig, ConfigError> {
    let config: ProbeConfig = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

pub fn validate_config(config: &ProbeConfig) -> Result<(), ConfigError> {
    if config.version != CONFIG_VERSION {
        return invalid(format!("Unsupported config version: {}", config.version));
    }

    if config.ocr.program.trim().is_empty() {
        return invalid("ocr.program must not be empty");
    }
    if config.rasterizer.program.trim().is_empty() {
        return invalid("rasterizer.program must not be empty");
    }

    let language = Regex::new(LANGUAGE_PATTERN).map_err(|e| ConfigError::Validation {
        message: format!("Invalid language pattern: {}", e),
    })?;
    if !language.is_match(&config.ocr.language) {
        return invalid(format!(
            "ocr.language '{}' must look like 'eng' or 'eng+deu'",
            config.ocr.language
        ));
    }

    if config.ocr.engine_mode > MAX_ENGINE_MODE {
        return invalid(format!(
            "ocr.engine_mode must be between 0 and {}, got {}",
            MAX_ENGINE_MODE, config.ocr.engine_mode
        ));
    }
    if config.ocr.page_segmentation_mode > MAX_PAGE_SEGMENTATION_MODE {
        return invalid(format!(
            "ocr.page_segmentation_mode must be between 0 and {}, got {}",
            MAX_PAGE_SEGMENTATION_MODE, config.ocr.page_segmentation_mode
        ));
    }

    if config.rasterizer.resolution == Some(0) {
        return invalid("rasterizer.resolution must be positive");
    }

    let image = &config.image;
    if image.width == 0 || image.height == 0 {
        return invalid(format!(
            "image size must be positive, got {}x{}",
            image.width, image.height
        ));
    }
    if !is_positive(image.font_size) {
        return invalid("image.font_size must be positive");
    }
    if image.text_x < 0
        || image.text_y < 0
        || i64::from(image.text_x) >= i64::from(image.width)
        || i64::from(image.text_y) >= i64::from(image.height)
    {
        return invalid(format!(
            "image text origin ({}, {}) lies outside the {}x{} canvas",
            image.text_x, image.text_y, image.width, image.height
        ));
    }

    let pdf = &config.pdf;
    if !is_positive(pdf.page_width) || !is_positive(pdf.page_height) {
        return invalid(format!(
            "pdf page size must be positive, got {}x{}",
            pdf.page_width, pdf.page_height
        ));
    }
    if !is_positive(pdf.font_size) {
        return invalid("pdf.font_size must be positive");
    }
    if pdf.text_x < 0.0
        || pdf.text_y < 0.0
        || pdf.text_x > pdf.page_width
        || pdf.text_y > pdf.page_height
    {
        return invalid(format!(
            "pdf text origin ({}, {}) lies outside the page",
            pdf.text_x, pdf.text_y
        ));
    }
    if pdf.font.trim().is_empty() || pdf.font.contains(char::is_whitespace) {
        return invalid(format!("pdf.font '{}' is not a valid font name", pdf.font));
    }

    Ok(())
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn invalid<T>(message: impl Into<String>) -> Result<T, ConfigError> {
    Err(ConfigError::Validation {
        message: message.into(),
    })
}
