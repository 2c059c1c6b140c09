use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, info_span, warn};

use crate::config::{validate_config, ProbeConfig};
use crate::error::{FixtureError, Result};
use crate::fixture::{ImageFixture, PdfFixture};
use crate::matcher::ExpectedDecimal;
use crate::tools::{PdfRasterizer, TesseractCli};

use super::report::{FlowArtifacts, FlowReport};
use super::scenario::{FlowKind, Scenario};

/// File name of the image flow's fixture inside the work directory.
pub const IMAGE_FIXTURE_NAME: &str = "decimal.png";

/// File name of the PDF flow's fixture inside the work directory.
pub const PDF_FIXTURE_NAME: &str = "decimal.pdf";

/// Prefix handed to the rasterizer; it writes `<prefix>.png`.
pub const RASTER_PREFIX: &str = "pdf_image";

/// Runs the image and PDF verification flows.
///
/// Every flow is synchronous: fixture generation, then each external tool in
/// turn, then the match. Tool invocations block without a timeout.
pub struct Probe {
    config: ProbeConfig,
    image: ImageFixture,
    pdf: PdfFixture,
    ocr: TesseractCli,
    rasterizer: PdfRasterizer,
}

impl Probe {
    pub fn new(config: ProbeConfig) -> Result<Self> {
        validate_config(&config)?;

        let image = ImageFixture::new(config.image.clone())?;
        let pdf = PdfFixture::new(config.pdf.clone());
        let ocr = TesseractCli::new(&config.ocr);
        let rasterizer = PdfRasterizer::new(&config.rasterizer);

        Ok(Self {
            config,
            image,
            pdf,
            ocr,
            rasterizer,
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(ProbeConfig::default())
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn ocr(&self) -> &TesseractCli {
        &self.ocr
    }

    pub fn rasterizer(&self) -> &PdfRasterizer {
        &self.rasterizer
    }

    pub fn run(&self, work_dir: &Path, scenario: &Scenario) -> Result<FlowReport> {
        match scenario.kind {
            FlowKind::Image => self.run_image(work_dir, &scenario.text, &scenario.expected),
            FlowKind::Pdf => self.run_pdf(work_dir, &scenario.text, &scenario.expected),
        }
    }

    /// Draws `text` into `<work_dir>/decimal.png` and reads it back with OCR.
    pub fn run_image(
        &self,
        work_dir: &Path,
        text: &str,
        expected: &ExpectedDecimal,
    ) -> Result<FlowReport> {
        let _flow = info_span!("flow", kind = %FlowKind::Image).entered();
        let started = Instant::now();
        prepare_work_dir(work_dir)?;

        let image_path = work_dir.join(IMAGE_FIXTURE_NAME);
        {
            let _step = info_span!("generate_fixture").entered();
            self.image.create(&image_path, text)?;
        }

        let ocr_text = {
            let _step = info_span!("recognize").entered();
            self.ocr.recognize(&image_path)?
        };

        let artifacts = FlowArtifacts {
            fixture: image_path.clone(),
            ocr_input: image_path,
        };
        Ok(finish(FlowKind::Image, text, expected, artifacts, ocr_text, started))
    }

    /// Sets `text` in `<work_dir>/decimal.pdf`, rasterizes it to
    /// `<work_dir>/pdf_image.png` and reads that back with OCR.
    pub fn run_pdf(
        &self,
        work_dir: &Path,
        text: &str,
        expected: &ExpectedDecimal,
    ) -> Result<FlowReport> {
        let _flow = info_span!("flow", kind = %FlowKind::Pdf).entered();
        let started = Instant::now();
        prepare_work_dir(work_dir)?;

        let pdf_path = work_dir.join(PDF_FIXTURE_NAME);
        {
            let _step = info_span!("generate_fixture").entered();
            self.pdf.create(&pdf_path, text)?;
        }

        let image_path = {
            let _step = info_span!("rasterize").entered();
            self.rasterizer
                .rasterize(&pdf_path, &work_dir.join(RASTER_PREFIX))?
        };

        let ocr_text = {
            let _step = info_span!("recognize").entered();
            self.ocr.recognize(&image_path)?
        };

        let artifacts = FlowArtifacts {
            fixture: pdf_path,
            ocr_input: image_path,
        };
        Ok(finish(FlowKind::Pdf, text, expected, artifacts, ocr_text, started))
    }
}

fn prepare_work_dir(work_dir: &Path) -> std::result::Result<(), FixtureError> {
    std::fs::create_dir_all(work_dir).map_err(|e| FixtureError::Write {
        path: work_dir.to_path_buf(),
        source: e,
    })
}

fn finish(
    kind: FlowKind,
    text: &str,
    expected: &ExpectedDecimal,
    artifacts: FlowArtifacts,
    ocr_text: String,
    started: Instant,
) -> FlowReport {
    let matched = expected.find_in(&ocr_text);
    match matched {
        Some(ref found) => info!(%expected, matched = %found.matched, "numeral recovered"),
        None => warn!(%expected, ocr_text = %ocr_text.trim(), "numeral missing from OCR output"),
    }

    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    debug!(duration_ms, "flow finished");

    FlowReport {
        kind,
        fixture_text: text.to_string(),
        expected: expected.clone(),
        artifacts,
        ocr_text,
        matched,
        duration_ms,
        finished_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ProbeError, ToolError};
    use tempfile::TempDir;

    fn probe_without_tools() -> Probe {
        let mut config = ProbeConfig::default();
        config.ocr.program = "/nonexistent/tesseract".to_string();
        config.rasterizer.program = "/nonexistent/pdftoppm".to_string();
        Probe::new(config).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ProbeConfig::default();
        config.ocr.page_segmentation_mode = 42;
        assert!(matches!(Probe::new(config), Err(ProbeError::Config(_))));
    }

    #[test]
    fn test_image_origin_off_canvas_rejected() {
        let mut config = ProbeConfig::default();
        config.image.text_x = 5000;
        assert!(matches!(Probe::new(config), Err(ProbeError::Config(_))));
    }

    #[test]
    fn test_image_flow_without_ocr_fails_after_fixture() {
        let dir = TempDir::new().unwrap();
        let probe = probe_without_tools();
        let expected = ExpectedDecimal::parse("123.45").unwrap();

        let result = probe.run_image(dir.path(), "Total: 123.45", &expected);

        assert!(matches!(
            result,
            Err(ProbeError::Tool(ToolError::Spawn {
                tool: "tesseract",
                ..
            }))
        ));
        assert!(dir.path().join(IMAGE_FIXTURE_NAME).exists());
    }

    #[test]
    fn test_pdf_flow_without_rasterizer_fails_before_ocr() {
        let dir = TempDir::new().unwrap();
        let probe = probe_without_tools();

        let result = probe.run(dir.path(), &Scenario::pdf_amount().unwrap());

        assert!(matches!(
            result,
            Err(ProbeError::Tool(ToolError::Spawn {
                tool: "pdftoppm",
                ..
            }))
        ));
        assert!(dir.path().join(PDF_FIXTURE_NAME).exists());
        assert!(!dir.path().join("pdf_image.png").exists());
    }

    #[test]
    fn test_fixture_error_aborts_flow() {
        let dir = TempDir::new().unwrap();
        let probe = probe_without_tools();
        let expected = ExpectedDecimal::parse("12.50").unwrap();

        let result = probe.run_pdf(dir.path(), "Summe: 12,50 €", &expected);

        assert!(matches!(
            result,
            Err(ProbeError::Fixture(FixtureError::UnsupportedText { .. }))
        ));
    }

    #[test]
    fn test_work_dir_is_created() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let probe = probe_without_tools();

        let _ = probe.run(&nested, &Scenario::image_total().unwrap());

        assert!(nested.join(IMAGE_FIXTURE_NAME).exists());
    }
}
