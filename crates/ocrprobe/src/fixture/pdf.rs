use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::config::PdfFixtureConfig;
use crate::error::FixtureError;

/// Resource name the content stream uses for the text font.
const FONT_RESOURCE: &str = "F1";

/// Builds single-page PDFs with one line of text set in a base-14 font.
pub struct PdfFixture {
    config: PdfFixtureConfig,
}

impl PdfFixture {
    pub fn new(config: PdfFixtureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PdfFixtureConfig {
        &self.config
    }

    pub fn build(&self, text: &str) -> Result<Document, FixtureError> {
        // Base fonts are used with WinAnsiEncoding; keep to printable ASCII.
        if let Some(ch) = text.chars().find(|c| !(' '..='~').contains(c)) {
            return Err(FixtureError::UnsupportedText {
                ch,
                font: self.config.font.clone(),
            });
        }

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.new_object_id();
        let resources_id = doc.new_object_id();
        let content_id = doc.new_object_id();
        let page_id = doc.new_object_id();

        doc.objects.insert(
            font_id,
            Object::Dictionary(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => Object::Name(self.config.font.as_bytes().to_vec()),
                "Encoding" => "WinAnsiEncoding",
            }),
        );

        doc.objects.insert(
            resources_id,
            Object::Dictionary(dictionary! {
                "Font" => dictionary! {
                    FONT_RESOURCE => font_id,
                },
            }),
        );

        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![
                        Object::Name(FONT_RESOURCE.as_bytes().to_vec()),
                        self.config.font_size.into(),
                    ],
                ),
                Operation::new(
                    "Td",
                    vec![self.config.text_x.into(), self.config.text_y.into()],
                ),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_stream = Stream::new(dictionary! {}, content.encode()?);
        doc.objects
            .insert(content_id, Object::Stream(content_stream));

        doc.objects.insert(
            page_id,
            Object::Dictionary(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    self.config.page_width.into(),
                    self.config.page_height.into(),
                ],
                "Resources" => resources_id,
                "Contents" => content_id,
            }),
        );

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        Ok(doc)
    }

    pub fn create(&self, path: &Path, text: &str) -> Result<(), FixtureError> {
        let _span = tracing::info_span!("fixture.pdf", path = %path.display()).entered();

        let mut doc = self.build(text)?;
        doc.save(path).map_err(|e| FixtureError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(font = %self.config.font, "pdf fixture written");
        Ok(())
    }
}

/// Writes a one-page A4 PDF with `text` in 12pt Helvetica at (100, 750).
pub fn create_test_pdf(path: &Path, text: &str) -> Result<(), FixtureError> {
    PdfFixture::new(PdfFixtureConfig::default()).create(path, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn shown_text(doc: &Document) -> Vec<Vec<u8>> {
        let pages = doc.get_pages();
        let page_id = *pages.values().next().unwrap();
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();

        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_create_writes_single_page_pdf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("decimal.pdf");

        create_test_pdf(&path, "Amount: 987.65").unwrap();

        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
        assert_eq!(shown_text(&doc), vec![b"Amount: 987.65".to_vec()]);
    }

    #[test]
    fn test_text_position_and_font() {
        let doc = PdfFixture::new(PdfFixtureConfig::default())
            .build("Amount: 987.65")
            .unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();

        let td = content
            .operations
            .iter()
            .find(|op| op.operator == "Td")
            .unwrap();
        assert_eq!(td.operands[0].as_float().unwrap(), 100.0);
        assert_eq!(td.operands[1].as_float().unwrap(), 750.0);

        let tf = content
            .operations
            .iter()
            .find(|op| op.operator == "Tf")
            .unwrap();
        assert_eq!(tf.operands[1].as_float().unwrap(), 12.0);
    }

    #[test]
    fn test_page_is_a4() {
        let doc = PdfFixture::new(PdfFixtureConfig::default())
            .build("x")
            .unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let page = doc.get_dictionary(page_id).unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();

        let width = media_box[2].as_float().unwrap();
        let height = media_box[3].as_float().unwrap();
        assert!((width - 595.28).abs() < 0.01);
        assert!((height - 841.89).abs() < 0.01);
    }

    #[test]
    fn test_parentheses_and_backslashes_survive() {
        let text = r"Total (net): 1\2.50)";
        let doc = PdfFixture::new(PdfFixtureConfig::default())
            .build(text)
            .unwrap();
        assert_eq!(shown_text(&doc), vec![text.as_bytes().to_vec()]);
    }

    #[test]
    fn test_non_ascii_text_rejected() {
        let result = PdfFixture::new(PdfFixtureConfig::default()).build("Summe: 12,50 €");
        match result {
            Err(FixtureError::UnsupportedText { ch, font }) => {
                assert_eq!(ch, '€');
                assert_eq!(font, "Helvetica");
            }
            other => panic!("Expected UnsupportedText, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_create_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("decimal.pdf");

        let result = create_test_pdf(&path, "Amount: 987.65");
        match result {
            Err(FixtureError::Write { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("Expected Write error, got {:?}", other),
        }
    }
}
