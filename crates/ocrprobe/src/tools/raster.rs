use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::RasterizerConfig;
use crate::error::ToolError;
use crate::tools::ExternalTool;

/// Renders the first page of a PDF to a PNG with `pdftoppm` (poppler-utils).
#[derive(Debug, Clone)]
pub struct PdfRasterizer {
    tool: ExternalTool,
    resolution: Option<u32>,
}

impl PdfRasterizer {
    pub fn new(config: &RasterizerConfig) -> Self {
        Self {
            tool: ExternalTool::new("pdftoppm", config.program.clone()),
            resolution: config.resolution,
        }
    }

    pub fn tool(&self) -> &ExternalTool {
        &self.tool
    }

    /// `-png -singlefile [-r <dpi>] <pdf> <prefix>`
    pub fn args(&self, pdf_path: &Path, prefix: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-png".into(), "-singlefile".into()];
        if let Some(dpi) = self.resolution {
            args.push("-r".into());
            args.push(dpi.to_string().into());
        }
        args.push(pdf_path.as_os_str().to_os_string());
        args.push(prefix.as_os_str().to_os_string());
        args
    }

    /// `-singlefile` makes the tool write exactly `<prefix>.png` instead of
    /// numbering pages.
    pub fn output_path(prefix: &Path) -> PathBuf {
        let mut path = prefix.as_os_str().to_os_string();
        path.push(".png");
        PathBuf::from(path)
    }

    /// Any `<prefix>.png` left from an earlier run is removed first, so an
    /// existing file afterwards was written by this invocation.
    pub fn rasterize(&self, pdf_path: &Path, prefix: &Path) -> Result<PathBuf, ToolError> {
        let _span = tracing::info_span!("tools.raster").entered();

        let image_path = Self::output_path(prefix);
        self.clear_output(&image_path)?;

        self.tool.run(&self.args(pdf_path, prefix))?;

        if !image_path.exists() {
            return Err(ToolError::MissingOutput {
                tool: self.tool.name(),
                path: image_path,
            });
        }

        tracing::debug!(image = %image_path.display(), "pdf rasterized");
        Ok(image_path)
    }

    pub fn version(&self) -> Result<String, ToolError> {
        self.tool.version("-v")
    }

    fn clear_output(&self, image_path: &Path) -> Result<(), ToolError> {
        match fs::remove_file(image_path) {
            Ok(()) => {
                tracing::debug!(image = %image_path.display(), "removed previous raster");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ToolError::StaleOutput {
                tool: self.tool.name(),
                path: image_path.to_path_buf(),
                source: e,
            }),
        }
    }
}
