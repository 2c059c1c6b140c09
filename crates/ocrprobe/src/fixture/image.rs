use std::path::Path;

use ab_glyph::{FontRef, PxScale};
use image::{ImageError, Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};

use crate::config::ImageFixtureConfig;
use crate::error::FixtureError;

const FONT_DATA: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);

/// Renders black text on a white bitmap of fixed size.
pub struct ImageFixture {
    config: ImageFixtureConfig,
    font: FontRef<'static>,
}

impl ImageFixture {
    pub fn new(config: ImageFixtureConfig) -> Result<Self, FixtureError> {
        let font =
            FontRef::try_from_slice(FONT_DATA).map_err(|e| FixtureError::Font(e.to_string()))?;
        Ok(Self { config, font })
    }

    pub fn config(&self) -> &ImageFixtureConfig {
        &self.config
    }

    pub fn render(&self, text: &str) -> RgbImage {
        let mut canvas = RgbImage::from_pixel(self.config.width, self.config.height, BACKGROUND);
        let scale = PxScale::from(self.config.font_size);

        let (text_width, text_height) = text_size(scale, &self.font, text);
        let right = self.config.text_x as i64 + text_width as i64;
        let bottom = self.config.text_y as i64 + text_height as i64;
        if right > self.config.width as i64 || bottom > self.config.height as i64 {
            tracing::warn!(
                text_width,
                text_height,
                width = self.config.width,
                height = self.config.height,
                "fixture text does not fit the canvas and will be clipped"
            );
        }

        draw_text_mut(
            &mut canvas,
            INK,
            self.config.text_x,
            self.config.text_y,
            scale,
            &self.font,
            text,
        );
        canvas
    }

    /// Renders `text` and saves it to `path`; the extension picks the format.
    pub fn create(&self, path: &Path, text: &str) -> Result<(), FixtureError> {
        let _span = tracing::info_span!("fixture.image", path = %path.display()).entered();

        let canvas = self.render(text);
        canvas.save(path).map_err(|e| match e {
            ImageError::IoError(source) => FixtureError::Write {
                path: path.to_path_buf(),
                source,
            },
            other => FixtureError::Encode {
                path: path.to_path_buf(),
                source: other,
            },
        })?;

        tracing::debug!(
            width = canvas.width(),
            height = canvas.height(),
            "image fixture written"
        );
        Ok(())
    }
}

/// Writes a 200x60 white PNG with `text` drawn in black at (10, 20).
pub fn create_test_image(path: &Path, text: &str) -> Result<(), FixtureError> {
    ImageFixture::new(ImageFixtureConfig::default())?.create(path, text)
}
