//! Shared helpers for the ocrprobe integration tests.
//!
//! `ProbeHarness` owns a temporary directory with a `bin/` folder for
//! stand-in tool scripts and a `work/` folder for flow artifacts.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use ocrprobe::config::ProbeConfig;

pub struct ProbeHarness {
    temp_dir: TempDir,
    pub bin_dir: PathBuf,
    pub work_dir: PathBuf,
}

impl ProbeHarness {
    pub fn new() -> Self {
        ocrprobe::logging::init_for_tests();

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let bin_dir = temp_dir.path().join("bin");
        let work_dir = temp_dir.path().join("work");
        fs::create_dir_all(&bin_dir).expect("Failed to create bin dir");
        fs::create_dir_all(&work_dir).expect("Failed to create work dir");

        Self {
            temp_dir,
            bin_dir,
            work_dir,
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes an executable `/bin/sh` script named `name` into `bin/`.
    #[cfg(unix)]
    pub fn fake_tool(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin_dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to mark script executable");
        path
    }

    /// A tesseract stand-in that records its arguments one per line in
    /// `bin/tesseract.args` and prints `output`.
    #[cfg(unix)]
    pub fn fake_tesseract(&self, output: &str) -> PathBuf {
        let body = format!(
            "[ -f \"$1\" ] || {{ echo \"missing image $1\" >&2; exit 2; }}\n\
             printf '%s\\n' \"$@\" > \"$(dirname \"$0\")/tesseract.args\"\n\
             printf '%s\\n' '{output}'"
        );
        self.fake_tool("tesseract", &body)
    }

    /// A pdftoppm stand-in that records its arguments and copies `image`
    /// to `<prefix>.png`, the prefix being the last argument.
    #[cfg(unix)]
    pub fn fake_pdftoppm(&self, image: &Path) -> PathBuf {
        let body = format!(
            "printf '%s\\n' \"$@\" > \"$(dirname \"$0\")/pdftoppm.args\"\n\
             for last; do :; done\n\
             cp '{}' \"$last.png\"",
            image.display()
        );
        self.fake_tool("pdftoppm", &body)
    }

    pub fn recorded_args(&self, tool: &str) -> Vec<String> {
        let content = fs::read_to_string(self.bin_dir.join(format!("{tool}.args")))
            .expect("tool was not invoked");
        content.lines().map(str::to_string).collect()
    }

    pub fn config(&self, tesseract: &Path, pdftoppm: &Path) -> ProbeConfig {
        let mut config = ProbeConfig::default();
        config.ocr.program = tesseract.display().to_string();
        config.rasterizer.program = pdftoppm.display().to_string();
        config
    }

    pub fn write_config(&self, config: &ProbeConfig) -> PathBuf {
        let path = self.root().join("ocrprobe.json");
        let json = serde_json::to_string_pretty(config).expect("Failed to serialize config");
        fs::write(&path, json).expect("Failed to write config");
        path
    }
}

impl Default for ProbeHarness {
    fn default() -> Self {
        Self::new()
    }
}
