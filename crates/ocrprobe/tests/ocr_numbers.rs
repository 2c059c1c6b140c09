//! End-to-end checks against the real tesseract and pdftoppm.
//!
//! These need both tools and the `eng` traineddata on PATH. A missing or
//! broken tool fails them with the launch error; they are never skipped.

mod common;

use common::ProbeHarness;
use ocrprobe::{assert_decimal_present, Probe, Scenario};

#[test]
fn test_image_ocr_decimal() {
    let harness = ProbeHarness::new();
    let probe = Probe::with_defaults().unwrap();

    let report = probe
        .run(&harness.work_dir, &Scenario::image_total().unwrap())
        .unwrap_or_else(|e| panic!("{e}"));

    let found = report.ensure_matched().unwrap();
    assert!(found.matched == "123.45" || found.matched == "123,45");
}

#[test]
fn test_pdf_ocr_decimal() {
    let harness = ProbeHarness::new();
    let probe = Probe::with_defaults().unwrap();

    let report = probe
        .run(&harness.work_dir, &Scenario::pdf_amount().unwrap())
        .unwrap_or_else(|e| panic!("{e}"));

    assert!(harness.work_dir.join("pdf_image.png").exists());
    assert_decimal_present(&report.ocr_text, &report.expected).unwrap();
}

#[test]
fn test_flows_are_repeatable() {
    let harness = ProbeHarness::new();
    let probe = Probe::with_defaults().unwrap();

    for scenario in Scenario::builtin().unwrap() {
        for _ in 0..2 {
            let report = probe
                .run(&harness.work_dir, &scenario)
                .unwrap_or_else(|e| panic!("{e}"));
            report.ensure_matched().unwrap();
        }
    }
}
