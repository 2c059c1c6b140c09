//! Blocking wrappers around the external command-line tools.

pub mod ocr;
pub mod raster;

use std::ffi::OsString;
use std::process::{Command, Output, Stdio};

use crate::error::ToolError;

pub use ocr::TesseractCli;
pub use raster::PdfRasterizer;

/// A named external program.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    name: &'static str,
    program: String,
}

impl ExternalTool {
    pub fn new(name: &'static str, program: impl Into<String>) -> Self {
        Self {
            name,
            program: program.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Runs the program to completion and returns its captured output.
    ///
    /// The call blocks the current thread until the child exits. There is no
    /// timeout: a tool that never exits blocks the caller indefinitely. Stdin
    /// is closed so a tool waiting for input fails instead of hanging.
    ///
    /// Launch failures and non-zero exit statuses are errors; nothing is
    /// retried.
    pub fn run(&self, args: &[OsString]) -> Result<Output, ToolError> {
        let _span = tracing::info_span!("tool.run", tool = self.name).entered();
        tracing::debug!(program = %self.program, ?args, "invoking");

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ToolError::Spawn {
                tool: self.name,
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::warn!(status = %output.status, %stderr, "tool failed");
            return Err(ToolError::Failed {
                tool: self.name,
                status: output.status,
                stderr,
            });
        }

        Ok(output)
    }

    /// Runs the program with `flag` and returns the first non-empty line it
    /// prints on stdout or stderr. Used to check that the tool is installed.
    pub fn version(&self, flag: &str) -> Result<String, ToolError> {
        let output = self.run(&[OsString::from(flag)])?;
        Ok(first_line(&output.stdout, &output.stderr))
    }
}

fn first_line(stdout: &[u8], stderr: &[u8]) -> String {
    let stdout = String::from_utf8_lossy(stdout);
    let stderr = String::from_utf8_lossy(stderr);

    stdout
        .lines()
        .chain(stderr.lines())
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}
