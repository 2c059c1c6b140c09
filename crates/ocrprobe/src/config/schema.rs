use serde::{Deserialize, Serialize};

pub const CONFIG_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub rasterizer: RasterizerConfig,
    #[serde(default)]
    pub image: ImageFixtureConfig,
    #[serde(default)]
    pub pdf: PdfFixtureConfig,
}

fn default_version() -> String {
    CONFIG_VERSION.to_string()
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            ocr: OcrConfig::default(),
            rasterizer: RasterizerConfig::default(),
            image: ImageFixtureConfig::default(),
            pdf: PdfFixtureConfig::default(),
        }
    }
}

/// Settings passed to the `tesseract` command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    #[serde(default = "default_ocr_program")]
    pub program: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// `--oem`; 1 selects the LSTM engine.
    #[serde(default = "default_engine_mode")]
    pub engine_mode: u8,
    /// `--psm`; 6 assumes a single uniform block of text.
    #[serde(default = "default_page_segmentation_mode")]
    pub page_segmentation_mode: u8,
}

fn default_ocr_program() -> String {
    "tesseract".to_string()
}

fn default_language() -> String {
    "eng".to_string()
}

fn default_engine_mode() -> u8 {
    1
}

fn default_page_segmentation_mode() -> u8 {
    6
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            program: default_ocr_program(),
            language: default_language(),
            engine_mode: default_engine_mode(),
            page_segmentation_mode: default_page_segmentation_mode(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterizerConfig {
    #[serde(default = "default_rasterizer_program")]
    pub program: String,
    /// Passed as `-r`; the tool's own default is used when unset.
    #[serde(default)]
    pub resolution: Option<u32>,
}

fn default_rasterizer_program() -> String {
    "pdftoppm".to_string()
}

impl Default for RasterizerConfig {
    fn default() -> Self {
        Self {
            program: default_rasterizer_program(),
            resolution: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageFixtureConfig {
    #[serde(default = "default_image_width")]
    pub width: u32,
    #[serde(default = "default_image_height")]
    pub height: u32,
    #[serde(default = "default_image_text_x")]
    pub text_x: i32,
    #[serde(default = "default_image_text_y")]
    pub text_y: i32,
    /// Glyph height in pixels.
    #[serde(default = "default_image_font_size")]
    pub font_size: f32,
}

fn default_image_width() -> u32 {
    200
}

fn default_image_height() -> u32 {
    60
}

fn default_image_text_x() -> i32 {
    10
}

fn default_image_text_y() -> i32 {
    20
}

fn default_image_font_size() -> f32 {
    16.0
}

impl Default for ImageFixtureConfig {
    fn default() -> Self {
        Self {
            width: default_image_width(),
            height: default_image_height(),
            text_x: default_image_text_x(),
            text_y: default_image_text_y(),
            font_size: default_image_font_size(),
        }
    }
}

/// Page geometry in PDF points. Defaults describe an A4 page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfFixtureConfig {
    #[serde(default = "default_page_width")]
    pub page_width: f32,
    #[serde(default = "default_page_height")]
    pub page_height: f32,
    #[serde(default = "default_pdf_text_x")]
    pub text_x: f32,
    #[serde(default = "default_pdf_text_y")]
    pub text_y: f32,
    /// One of the standard 14 base fonts.
    #[serde(default = "default_pdf_font")]
    pub font: String,
    #[serde(default = "default_pdf_font_size")]
    pub font_size: f32,
}

fn default_page_width() -> f32 {
    595.28
}

fn default_page_height() -> f32 {
    841.89
}

fn default_pdf_text_x() -> f32 {
    100.0
}

fn default_pdf_text_y() -> f32 {
    750.0
}

fn default_pdf_font() -> String {
    "Helvetica".to_string()
}

fn default_pdf_font_size() -> f32 {
    12.0
}

impl Default for PdfFixtureConfig {
    fn default() -> Self {
        Self {
            page_width: default_page_width(),
            page_height: default_page_height(),
            text_x: default_pdf_text_x(),
            text_y: default_pdf_text_y(),
            font: default_pdf_font(),
            font_size: default_pdf_font_size(),
        }
    }
}
