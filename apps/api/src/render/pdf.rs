//! `lopdf`-backed writer: US Letter, 1" margins, Helvetica 11pt.

use std::io::Write;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::render::layout::{paginate, wrap_text};
use crate::render::{PdfError, PdfWriter};

const PAGE_WIDTH_PT: i64 = 612;
const PAGE_HEIGHT_PT: i64 = 792;
const MARGIN_PT: i64 = 72;
const FONT_SIZE_PT: i64 = 11;
const LEADING_PT: i64 = 14;
/// Average Helvetica glyph is ~0.5em, so 468pt of text width holds about 85 characters.
const MAX_LINE_CHARS: usize = 85;
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT_PT - 2 * MARGIN_PT) / LEADING_PT) as usize;

/// Writes plain text as a paginated PDF using the base-14 Helvetica font.
#[derive(Debug, Clone, Default)]
pub struct LopdfWriter {
    title: Option<String>,
}

impl LopdfWriter {
    /// Sets the document `/Title` metadata.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }

    fn build_document(&self, text: &str) -> Result<Document, PdfError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let pages = paginate(wrap_text(text, MAX_LINE_CHARS), LINES_PER_PAGE);
        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());

        for lines in &pages {
            let content_id = doc.add_object(Stream::new(dictionary! {}, page_content(lines)?));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => Object::Integer(page_count),
                "Resources" => resources_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(PAGE_WIDTH_PT),
                    Object::Integer(PAGE_HEIGHT_PT),
                ],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if let Some(title) = &self.title {
            let info_id = doc.add_object(dictionary! {
                "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
            });
            doc.trailer.set("Info", info_id);
        }

        doc.compress();
        debug!("Built PDF with {} page(s)", pages.len());
        Ok(doc)
    }
}

impl PdfWriter for LopdfWriter {
    /// Renders into a temp file beside `path`, then renames it into place.
    /// On any error the temp file is dropped (and deleted), so `path` is never partial.
    fn write(&self, text: &str, path: &Path) -> Result<(), PdfError> {
        let dir = path
            .parent()
            .ok_or_else(|| PdfError::NoParent(path.display().to_string()))?;

        let mut doc = self.build_document(text)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        doc.save_to(&mut tmp)
            .map_err(|e| PdfError::Render(e.to_string()))?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| PdfError::Io(e.error))?;

        Ok(())
    }
}

/// Content stream for one page: text object starting at the top-left margin.
fn page_content(lines: &[String]) -> Result<Vec<u8>, PdfError> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), Object::Integer(FONT_SIZE_PT)]),
        Operation::new("TL", vec![Object::Integer(LEADING_PT)]),
        Operation::new(
            "Td",
            vec![
                Object::Integer(MARGIN_PT),
                Object::Integer(PAGE_HEIGHT_PT - MARGIN_PT - FONT_SIZE_PT),
            ],
        ),
    ];

    for line in lines {
        if !line.is_empty() {
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(line), StringFormat::Literal)],
            ));
        }
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));

    Content { operations }
        .encode()
        .map_err(|e| PdfError::Render(e.to_string()))
}

/// Encodes text for a WinAnsi base-14 font. Typographic punctuation maps to ASCII,
/// Latin-1 passes through, and anything else becomes `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => out.push(b'\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => out.push(b'"'),
            '\u{2010}'..='\u{2015}' | '\u{2212}' => out.push(b'-'),
            '\u{2026}' => out.extend_from_slice(b"..."),
            '\u{2022}' => out.push(b'*'),
            '\u{00A0}' | '\t' => out.push(b' '),
            c if (' '..='~').contains(&c) => out.push(c as u8),
            c if ('\u{00A1}'..='\u{00FF}').contains(&c) => out.push(c as u32 as u8),
            _ => out.push(b'?'),
        }
    }
    out
}
