use std::ffi::OsString;
use std::path::Path;

use crate::config::OcrConfig;
use crate::error::ToolError;
use crate::tools::ExternalTool;

/// Runs the `tesseract` command line and returns the recognized text.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    tool: ExternalTool,
    language: String,
    engine_mode: u8,
    page_segmentation_mode: u8,
}

impl TesseractCli {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            tool: ExternalTool::new("tesseract", config.program.clone()),
            language: config.language.clone(),
            engine_mode: config.engine_mode,
            page_segmentation_mode: config.page_segmentation_mode,
        }
    }

    pub fn tool(&self) -> &ExternalTool {
        &self.tool
    }

    /// `<image> stdout -l <lang> --oem <mode> --psm <mode>`
    pub fn args(&self, image_path: &Path) -> Vec<OsString> {
        vec![
            image_path.as_os_str().to_os_string(),
            "stdout".into(),
            "-l".into(),
            self.language.clone().into(),
            "--oem".into(),
            self.engine_mode.to_string().into(),
            "--psm".into(),
            self.page_segmentation_mode.to_string().into(),
        ]
    }

    pub fn recognize(&self, image_path: &Path) -> Result<String, ToolError> {
        let _span = tracing::info_span!("tools.ocr").entered();

        let output = self.tool.run(&self.args(image_path))?;
        let text = String::from_utf8_lossy(&output.stdout).into_owned();

        tracing::debug!(chars = text.chars().count(), "ocr text captured");
        Ok(text)
    }

    pub fn version(&self) -> Result<String, ToolError> {
        self.tool.version("--version")
    }
}
