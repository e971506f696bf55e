//! PDF export of a roster message.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

/// Title printed at the top of the first page.
pub const PDF_TITLE: &str = "Messaggio CWL";

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 12.0;
/// Line advance for body text, in mm.
const LINE_HEIGHT: f32 = 6.0;
/// Millimetres per typographic point.
const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Errore nella generazione del PDF: {0}")]
    Render(String),
}

/// Render `message` into a PDF document and return its bytes.
///
/// A4, centered title, then the message at 12pt. Lines that do not fit the width are
/// wrapped on word boundaries; text continues on new pages as needed.
pub fn export_pdf(message: &str) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) = PdfDocument::new(PDF_TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Render(format!("{e:?}")))?;

    let mut layer = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT - MARGIN;

    let title_width = text_width(PDF_TITLE, TITLE_SIZE);
    layer.use_text(
        PDF_TITLE,
        TITLE_SIZE,
        Mm((PAGE_WIDTH - title_width) / 2.0),
        Mm(y),
        &font,
    );
    y -= LINE_HEIGHT * 2.0;

    for line in wrap_lines(message, max_chars_per_line()) {
        if y < MARGIN {
            layer = new_page(&doc);
            y = PAGE_HEIGHT - MARGIN;
        }
        if !line.is_empty() {
            write_body_line(&layer, &line, y, &font);
        }
        y -= LINE_HEIGHT;
    }

    doc.save_to_bytes()
        .map_err(|e| ExportError::Render(format!("{e:?}")))
}

fn new_page(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    doc.get_page(page).get_layer(layer)
}

fn write_body_line(layer: &PdfLayerReference, line: &str, y: f32, font: &IndirectFontRef) {
    layer.use_text(line, BODY_SIZE, Mm(MARGIN), Mm(y), font);
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_GLYPH_WIDTH * PT_TO_MM
}

fn max_chars_per_line() -> usize {
    let usable = PAGE_WIDTH - 2.0 * MARGIN;
    (usable / (BODY_SIZE * AVG_GLYPH_WIDTH * PT_TO_MM)) as usize
}

/// Split `text` into printable lines no longer than `width` characters.
///
/// Blank lines are kept (they separate clans in the roster). A single word longer than
/// `width` is hard-split.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for raw in text.lines() {
        if raw.chars().count() <= width {
            lines.push(raw.to_string());
            continue;
        }
        let mut current = String::new();
        for word in raw.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                lines.push(word.drain(..width).collect());
            }
            let word: String = word.into_iter().collect();
            if word.is_empty() {
                continue;
            }
            let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}
