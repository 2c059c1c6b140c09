//! Deterministic input artifacts with known text content.

pub mod image;
pub mod pdf;

pub use self::image::{create_test_image, ImageFixture};
pub use self::pdf::{create_test_pdf, PdfFixture};
