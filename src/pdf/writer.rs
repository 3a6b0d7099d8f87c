//! Serialises laid-out pages into a PDF file with `lopdf`.

use std::io::Write;

use chrono::{DateTime, Utc};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::error::Result;
use crate::render::PageGeometry;

use super::encoding::to_win_ansi;
use super::layout::{DrawOp, PageLayout};
use super::metrics::StandardFont;

/// Values written to the document information dictionary.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    /// Document title
    pub title: Option<String>,
    /// Producing application
    pub producer: String,
    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: None,
            producer: format!("docbind {}", crate::VERSION),
            created: Utc::now(),
        }
    }
}

impl DocumentInfo {
    fn to_dictionary(&self) -> Dictionary {
        let mut info = dictionary! {
            "Producer" => text_string(&self.producer),
            "CreationDate" => Object::string_literal(
                self.created.format("D:%Y%m%d%H%M%SZ").to_string(),
            ),
        };
        if let Some(title) = &self.title {
            info.set("Title", text_string(title));
        }
        info
    }
}

fn text_string(text: &str) -> Object {
    Object::String(to_win_ansi(text), StringFormat::Literal)
}

/// Builds the PDF object graph page by page.
pub struct PdfWriter {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    media_box: Vec<Object>,
}

impl PdfWriter {
    /// Create a writer with the catalog, page tree and shared font resources.
    pub fn new(geometry: &PageGeometry) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();

        let mut fonts = Dictionary::new();
        for font in StandardFont::ALL {
            let font_id = document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), font_id);
        }
        document.objects.insert(
            resources_id,
            Object::Dictionary(dictionary! { "Font" => fonts }),
        );
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0,
            }),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        Self {
            document,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            media_box: vec![
                0.into(),
                0.into(),
                geometry.width().into(),
                geometry.height().into(),
            ],
        }
    }

    /// Append one page.
    pub fn add_page(&mut self, page: &PageLayout) -> Result<()> {
        let content = page_content(page);

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&content.encode()?)?;
        let compressed = encoder.finish()?;
        let stream = Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed);
        let content_id = self.document.add_object(stream);

        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => self.media_box.clone(),
            "Contents" => content_id,
            "Resources" => self.resources_id,
        });
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Fix up the page tree, attach the info dictionary and serialise.
    pub fn finish(mut self, info: &DocumentInfo) -> Result<Vec<u8>> {
        if let Some(Object::Dictionary(pages)) = self.document.objects.get_mut(&self.pages_id) {
            let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
            pages.set("Kids", kids);
            pages.set("Count", self.page_ids.len() as i64);
        }

        let info_id = self.document.add_object(info.to_dictionary());
        self.document.trailer.set("Info", info_id);

        let mut buffer = Vec::new();
        self.document.save_to(&mut buffer)?;
        Ok(buffer)
    }
}

fn page_content(page: &PageLayout) -> Content {
    let mut operations = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::Text { x, y, fragments } => {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
                for fragment in fragments {
                    operations.push(Operation::new(
                        "Tf",
                        vec![fragment.font.resource_name().into(), fragment.size.into()],
                    ));
                    operations.push(Operation::new(
                        "Tj",
                        vec![Object::string_literal(to_win_ansi(&fragment.text))],
                    ));
                }
                operations.push(Operation::new("ET", vec![]));
            }
            DrawOp::Rule {
                x1,
                x2,
                y,
                thickness,
            } => {
                operations.push(Operation::new("w", vec![(*thickness).into()]));
                operations.push(Operation::new("m", vec![(*x1).into(), (*y).into()]));
                operations.push(Operation::new("l", vec![(*x2).into(), (*y).into()]));
                operations.push(Operation::new("S", vec![]));
            }
        }
    }

    Content { operations }
}

/// Serialise pages into a complete PDF file.
pub fn write_pdf(pages: &[PageLayout], geometry: &PageGeometry, info: &DocumentInfo) -> Result<Vec<u8>> {
    let mut writer = PdfWriter::new(geometry);
    for page in pages {
        writer.add_page(page)?;
    }
    writer.finish(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::layout::Fragment;

    fn text_page(text: &str) -> PageLayout {
        PageLayout {
            ops: vec![DrawOp::Text {
                x: 56.0,
                y: 780.0,
                fragments: vec![Fragment {
                    font: StandardFont::Helvetica,
                    size: 10.0,
                    text: text.to_string(),
                }],
            }],
        }
    }

    #[test]
    fn test_writes_pdf_header_and_trailer() {
        let bytes = write_pdf(
            &[text_page("Hello")],
            &PageGeometry::default(),
            &DocumentInfo::default(),
        )
        .unwrap();

        assert!(bytes.starts_with(b"%PDF-1.7"));
        let tail = String::from_utf8_lossy(&bytes[bytes.len().saturating_sub(32)..]).to_string();
        assert!(tail.contains("%%EOF"));
    }

    #[test]
    fn test_page_tree_and_info() {
        let info = DocumentInfo {
            title: Some("Guide".to_string()),
            ..Default::default()
        };
        let pages = vec![text_page("one"), text_page("two")];
        let bytes = write_pdf(&pages, &PageGeometry::default(), &info).unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);

        let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info_dict = doc.get_dictionary(info_id).unwrap();
        assert_eq!(info_dict.get(b"Title").unwrap().as_str().unwrap(), b"Guide");
    }

    #[test]
    fn test_rule_operations() {
        let page = PageLayout {
            ops: vec![DrawOp::Rule {
                x1: 10.0,
                x2: 100.0,
                y: 50.0,
                thickness: 0.5,
            }],
        };
        let operators: Vec<String> = page_content(&page)
            .operations
            .into_iter()
            .map(|op| op.operator)
            .collect();
        assert_eq!(operators, vec!["w", "m", "l", "S"]);
    }
}
