//! A4 PDF renderer on top of `printpdf` using the built-in Helvetica faces.
//!
//! Built-in fonts only cover WinAnsi, so text is folded to ASCII first.

use bytes::Bytes;
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::render::font_metrics::{FontWeight, HELVETICA, MM_PER_PT};
use crate::render::formatter::QuestionDocument;
use crate::render::{DocumentRenderer, RenderError};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const TEXT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
const LINE_SPACING: f32 = 1.5;
const LAYER_NAME: &str = "Layer 1";

const TITLE_PT: f32 = 20.0;
const HEADING_PT: f32 = 15.0;
const LABEL_PT: f32 = 9.5;
const BODY_PT: f32 = 11.0;
const CITATION_PT: f32 = 9.5;

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl DocumentRenderer for PdfRenderer {
    fn render(&self, document: &QuestionDocument) -> Result<Bytes, RenderError> {
        if document.sections.is_empty() {
            return Err(RenderError::EmptyDocument);
        }

        let (doc, page, layer) = PdfDocument::new(
            to_ascii(&document.title),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            LAYER_NAME,
        );
        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(pdf_error)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(pdf_error)?,
            oblique: doc
                .add_builtin_font(BuiltinFont::HelveticaOblique)
                .map_err(pdf_error)?,
        };

        {
            let mut cursor = PageCursor {
                doc: &doc,
                layer: doc.get_page(page).get_layer(layer),
                y: PAGE_HEIGHT_MM - MARGIN_MM,
            };

            cursor.paragraph(&document.title, TITLE_PT, &fonts.bold, FontWeight::Bold);
            cursor.gap(4.0);

            for section in &document.sections {
                cursor.keep_together(HEADING_PT * 3.0 * MM_PER_PT);
                cursor.gap(6.0);
                cursor.paragraph(&section.heading, HEADING_PT, &fonts.bold, FontWeight::Bold);

                for block in &section.blocks {
                    cursor.gap(3.0);
                    cursor.keep_together((LABEL_PT + BODY_PT) * 2.0 * MM_PER_PT);
                    cursor.paragraph(
                        &block.label.to_uppercase(),
                        LABEL_PT,
                        &fonts.bold,
                        FontWeight::Bold,
                    );
                    for paragraph in &block.paragraphs {
                        cursor.paragraph(paragraph, BODY_PT, &fonts.regular, FontWeight::Regular);
                        cursor.gap(1.5);
                    }
                }

                cursor.gap(3.0);
                cursor.paragraph(
                    &section.citation,
                    CITATION_PT,
                    &fonts.oblique,
                    FontWeight::Regular,
                );
            }
        }

        let bytes = doc.save_to_bytes().map_err(pdf_error)?;
        Ok(Bytes::from(bytes))
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

/// Tracks the current page and the baseline of the next line.
struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl PageCursor<'_> {
    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    /// Starts a new page unless `height_mm` still fits on this one.
    fn keep_together(&mut self, height_mm: f32) {
        if self.y - height_mm < MARGIN_MM {
            self.new_page();
        }
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn paragraph(&mut self, text: &str, size_pt: f32, font: &IndirectFontRef, weight: FontWeight) {
        let line_height = size_pt * MM_PER_PT * LINE_SPACING;
        let max_width_em = TEXT_WIDTH_MM / (size_pt * MM_PER_PT);

        for line in HELVETICA.wrap(&to_ascii(text), max_width_em, weight) {
            if self.y - line_height < MARGIN_MM {
                self.new_page();
            }
            self.y -= line_height;
            self.layer
                .use_text(line, size_pt, Mm(MARGIN_MM), Mm(self.y), font);
        }
    }
}

fn pdf_error<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Pdf(e.to_string())
}

/// Folds typographic punctuation to ASCII and replaces anything else non-ASCII with `?`.
pub fn to_ascii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{2033}' => out.push('"'),
            '\u{2013}' | '\u{2014}' | '\u{2212}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{2022}' | '\u{00B7}' => out.push('*'),
            '\u{2192}' => out.push_str("->"),
            '\u{00D7}' => out.push('x'),
            '\u{2264}' => out.push_str("<="),
            '\u{2265}' => out.push_str(">="),
            '\t' | '\u{00A0}' => out.push(' '),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            c if c.is_control() => {}
            _ => out.push('?'),
        }
    }
    out
}
