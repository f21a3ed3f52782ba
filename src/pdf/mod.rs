//! # PDF Serializer
//!
//! The drawing primitive provider used for real output. [`PdfSurface`]
//! records the primitives painted on each page; [`PdfWriter`] turns those
//! pages into a PDF file once layout is complete.
//!
//! This is a from-scratch PDF 1.7 writer. The subset needed here is small:
//! standard Type1 fonts, filled and stroked paths, and single-line text.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- objects (fonts, pages, content streams, etc.)
//! 2 0 obj ... endobj
//! ...
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! Layout works in millimetres with y growing down the page. The writer
//! converts to points and flips y here and nowhere else.

use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::draw::{DrawCommand, Rect, Stroke, Surface};
use crate::error::FolioError;
use crate::font::{Font, FontContext, FontFamily, FontKey, FontWeight};
use crate::model::Metadata;
use crate::style::Color;
use crate::text::{Measure, PT_TO_MM};

/// Millimetres to points.
const MM_TO_PT: f64 = 72.0 / 25.4;

/// Everything painted on one page, in paint order.
#[derive(Debug, Clone)]
pub struct LayoutPage {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

/// A surface that records pages and writes them as PDF on `finish`.
pub struct PdfSurface {
    fonts: FontContext,
    pages: Vec<LayoutPage>,
}

impl Default for PdfSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfSurface {
    pub fn new() -> Self {
        Self::with_fonts(FontContext::new())
    }

    pub fn with_fonts(fonts: FontContext) -> Self {
        Self {
            fonts,
            pages: Vec::new(),
        }
    }

    /// The pages recorded so far.
    pub fn pages(&self) -> &[LayoutPage] {
        &self.pages
    }
}

impl Measure for PdfSurface {
    fn text_width(&self, text: &str, font: &Font) -> Result<f64, FolioError> {
        self.fonts.text_width(text, font)
    }
}

impl Surface for PdfSurface {
    fn begin_page(&mut self, width: f64, height: f64) -> Result<(), FolioError> {
        self.pages.push(LayoutPage {
            width,
            height,
            commands: Vec::new(),
        });
        Ok(())
    }

    fn draw(&mut self, command: DrawCommand) -> Result<(), FolioError> {
        if let DrawCommand::Text { run, .. } = &command {
            self.fonts.resolve(&run.font)?;
        }
        let page = self
            .pages
            .last_mut()
            .ok_or_else(|| FolioError::Render("draw called before the first page".to_string()))?;
        page.commands.push(command);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn finish(&mut self, metadata: &Metadata) -> Result<Vec<u8>, FolioError> {
        PdfWriter::new().write(&self.pages, metadata, &self.fonts)
    }
}

pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
    /// Font keys in resource order: /F0, /F1, ...
    font_objects: Vec<(FontKey, usize)>,
}

struct PdfObject {
    data: Vec<u8>,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write recorded pages to a PDF byte vector.
    pub fn write(
        &self,
        pages: &[LayoutPage],
        metadata: &Metadata,
        font_context: &FontContext,
    ) -> Result<Vec<u8>, FolioError> {
        let mut builder = PdfBuilder {
            objects: Vec::new(),
            font_objects: Vec::new(),
        };

        // Reserve object IDs:
        // 0 = placeholder (PDF objects are 1-indexed)
        // 1 = Catalog
        // 2 = Pages (page tree root)
        // 3+ = fonts, then content streams and page objects
        builder.objects.push(PdfObject { data: vec![] });
        builder.objects.push(PdfObject { data: vec![] });
        builder.objects.push(PdfObject { data: vec![] });

        self.register_fonts(&mut builder, pages, font_context)?;

        let mut page_obj_ids: Vec<usize> = Vec::new();
        let font_resources = self.build_font_resource_dict(&builder.font_objects);

        for page in pages {
            let content = self.build_content_stream(page, &builder.font_objects)?;
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let content_obj_id = builder.objects.len();
            let mut content_data: Vec<u8> = Vec::new();
            let _ = write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            builder.objects.push(PdfObject { data: content_data });

            let page_obj_id = builder.objects.len();
            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << /Font << {} >> >> >>",
                page.width * MM_TO_PT,
                page.height * MM_TO_PT,
                content_obj_id,
                font_resources
            );
            builder.objects.push(PdfObject {
                data: page_dict.into_bytes(),
            });
            page_obj_ids.push(page_obj_id);
        }

        builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        let info_obj_id = builder.objects.len();
        let mut info = String::from("<< ");
        if let Some(ref title) = metadata.title {
            let _ = write!(info, "/Title ({}) ", Self::encode_text(title));
        }
        if let Some(ref author) = metadata.author {
            let _ = write!(info, "/Author ({}) ", Self::encode_text(author));
        }
        if let Some(ref subject) = metadata.subject {
            let _ = write!(info, "/Subject ({}) ", Self::encode_text(subject));
        }
        let _ = write!(info, "/Producer (Folio 0.1) /Creator (Folio) >>");
        builder.objects.push(PdfObject {
            data: info.into_bytes(),
        });

        Ok(self.serialize(&builder, info_obj_id))
    }

    /// Build the PDF content stream for a single page.
    fn build_content_stream(
        &self,
        page: &LayoutPage,
        font_objects: &[(FontKey, usize)],
    ) -> Result<String, FolioError> {
        let mut stream = String::new();
        for command in &page.commands {
            self.write_command(&mut stream, command, page.height, font_objects)?;
        }
        Ok(stream)
    }

    /// Write a single primitive as PDF operators.
    fn write_command(
        &self,
        stream: &mut String,
        command: &DrawCommand,
        page_height: f64,
        font_objects: &[(FontKey, usize)],
    ) -> Result<(), FolioError> {
        match command {
            DrawCommand::Rect { rect, fill, stroke } => {
                self.write_rect(stream, rect, *fill, *stroke, page_height);
            }

            DrawCommand::Line { from, to, stroke } => {
                let (r, g, b) = stroke.color.unit();
                let _ = write!(
                    stream,
                    "q\n{:.3} {:.3} {:.3} RG\n{:.2} w\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
                    r,
                    g,
                    b,
                    stroke.width * MM_TO_PT,
                    from.0 * MM_TO_PT,
                    (page_height - from.1) * MM_TO_PT,
                    to.0 * MM_TO_PT,
                    (page_height - to.1) * MM_TO_PT
                );
            }

            DrawCommand::Text {
                x,
                y,
                height,
                run,
                color,
            } => {
                let idx = self.font_index(run.font.key(), font_objects).ok_or_else(|| {
                    FolioError::Font(format!("font {:?} was not registered", run.font.key()))
                })?;
                let size_mm = run.font.size * PT_TO_MM;
                let baseline = y + (height + size_mm * 0.7) / 2.0;
                let (r, g, b) = color.unit();
                let _ = write!(
                    stream,
                    "BT\n{:.3} {:.3} {:.3} rg\n/F{} {:.1} Tf\n{:.2} {:.2} Td\n({}) Tj\nET\n",
                    r,
                    g,
                    b,
                    idx,
                    run.font.size,
                    x * MM_TO_PT,
                    (page_height - baseline) * MM_TO_PT,
                    Self::encode_text(&run.text)
                );
            }
        }
        Ok(())
    }

    fn write_rect(
        &self,
        stream: &mut String,
        rect: &Rect,
        fill: Option<Color>,
        stroke: Option<Stroke>,
        page_height: f64,
    ) {
        if fill.is_none() && stroke.is_none() {
            return;
        }
        let _ = write!(stream, "q\n");
        if let Some(fill) = fill {
            let (r, g, b) = fill.unit();
            let _ = write!(stream, "{:.3} {:.3} {:.3} rg\n", r, g, b);
        }
        if let Some(stroke) = stroke {
            let (r, g, b) = stroke.color.unit();
            let _ = write!(
                stream,
                "{:.3} {:.3} {:.3} RG\n{:.2} w\n",
                r,
                g,
                b,
                stroke.width * MM_TO_PT
            );
        }
        let _ = write!(
            stream,
            "{:.2} {:.2} {:.2} {:.2} re\n",
            rect.x * MM_TO_PT,
            (page_height - rect.y - rect.height) * MM_TO_PT,
            rect.width * MM_TO_PT,
            rect.height * MM_TO_PT
        );
        let op = match (fill, stroke) {
            (Some(_), Some(_)) => "B",
            (Some(_), None) => "f",
            _ => "S",
        };
        let _ = write!(stream, "{}\nQ\n", op);
    }

    /// Register fonts used across all pages. Each unique family + weight gets
    /// its own PDF font object.
    fn register_fonts(
        &self,
        builder: &mut PdfBuilder,
        pages: &[LayoutPage],
        font_context: &FontContext,
    ) -> Result<(), FolioError> {
        let mut keys: Vec<FontKey> = pages
            .iter()
            .flat_map(|page| page.commands.iter())
            .filter_map(|command| match command {
                DrawCommand::Text { run, .. } => Some(run.font.key()),
                _ => None,
            })
            .collect();

        // Sort for deterministic ordering, then dedup
        keys.sort();
        keys.dedup();

        if keys.is_empty() {
            keys.push(FontKey {
                family: FontFamily::Sans,
                weight: FontWeight::Regular,
            });
        }

        for key in keys {
            let font = Font {
                family: key.family,
                weight: key.weight,
                size: 0.0,
            };
            let std_font = font_context.resolve(&font)?;
            let obj_id = builder.objects.len();
            let font_dict = format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} \
                 /Encoding /WinAnsiEncoding >>",
                std_font.pdf_name()
            );
            builder.objects.push(PdfObject {
                data: font_dict.into_bytes(),
            });
            builder.font_objects.push((key, obj_id));
        }
        Ok(())
    }

    fn build_font_resource_dict(&self, font_objects: &[(FontKey, usize)]) -> String {
        font_objects
            .iter()
            .enumerate()
            .map(|(i, (_, obj_id))| format!("/F{} {} 0 R", i, obj_id))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Look up the font index (/F0, /F1, etc.) for a family + weight.
    fn font_index(&self, key: FontKey, font_objects: &[(FontKey, usize)]) -> Option<usize> {
        font_objects.iter().position(|(k, _)| *k == key)
    }

    /// Encode text as the body of a PDF literal string in WinAnsiEncoding.
    ///
    /// Delimiters are escaped, bytes above 0x7E are written as octal escapes
    /// and characters WinAnsi cannot represent become `?`.
    fn encode_text(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for ch in s.chars() {
            let byte = Self::unicode_to_winansi(ch).unwrap_or(b'?');
            match byte {
                b'\\' => out.push_str("\\\\"),
                b'(' => out.push_str("\\("),
                b')' => out.push_str("\\)"),
                0x20..=0x7E => out.push(byte as char),
                _ => {
                    let _ = write!(out, "\\{:03o}", byte);
                }
            }
        }
        out
    }

    /// Map a Unicode codepoint to a WinAnsiEncoding byte value.
    ///
    /// WinAnsiEncoding is based on Windows-1252. Most codepoints in
    /// 0x20..=0x7E and 0xA0..=0xFF map directly. The 0x80..=0x9F range
    /// contains special mappings for smart quotes, bullets, dashes, etc.
    fn unicode_to_winansi(ch: char) -> Option<u8> {
        let cp = ch as u32;
        if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
            return Some(cp as u8);
        }
        match cp {
            0x20AC => Some(0x80), // Euro sign
            0x2026 => Some(0x85), // Horizontal ellipsis
            0x2018 => Some(0x91), // Left single quotation mark
            0x2019 => Some(0x92), // Right single quotation mark
            0x201C => Some(0x93), // Left double quotation mark
            0x201D => Some(0x94), // Right double quotation mark
            0x2022 => Some(0x95), // Bullet
            0x2013 => Some(0x96), // En dash
            0x2014 => Some(0x97), // Em dash
            0x2122 => Some(0x99), // Trade mark sign
            _ => None,
        }
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_obj_id: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let header = format!("{} 0 obj\n", i);
            output.extend_from_slice(header.as_bytes());
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            let _ = write!(output, "{:010} 00000 n \n", offset);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            info_obj_id,
            xref_offset
        );

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontRegistry;
    use crate::style::palette;
    use crate::text::TextRun;

    fn text(content: &str, font: Font) -> DrawCommand {
        DrawCommand::Text {
            x: 18.0,
            y: 20.0,
            height: 6.0,
            run: TextRun::new(content, font),
            color: palette::DARK,
        }
    }

    fn contains(bytes: &[u8], needle: &str) -> bool {
        bytes.windows(needle.len()).any(|w| w == needle.as_bytes())
    }

    #[test]
    fn test_encode_text_escapes_delimiters() {
        assert_eq!(PdfWriter::encode_text("Hello (World)"), "Hello \\(World\\)");
        assert_eq!(PdfWriter::encode_text("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_encode_text_winansi() {
        assert_eq!(PdfWriter::encode_text("\u{2022}"), "\\225");
        assert_eq!(PdfWriter::encode_text("\u{00B7}"), "\\267");
        assert_eq!(PdfWriter::encode_text("\u{2713}"), "?");
    }

    #[test]
    fn test_empty_document_produces_valid_pdf() {
        let mut surface = PdfSurface::new();
        surface.begin_page(210.0, 297.0).unwrap();
        let bytes = surface.finish(&Metadata::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(contains(&bytes, "%%EOF"));
        assert!(contains(&bytes, "/Count 1"));
        assert!(contains(&bytes, "/MediaBox [0 0 595.28 841.89]"));
    }

    #[test]
    fn test_metadata_in_pdf() {
        let metadata = Metadata {
            title: Some("Penetration Test Report".to_string()),
            author: Some("AutoRed.AI".to_string()),
            subject: None,
        };
        let mut surface = PdfSurface::new();
        surface.begin_page(210.0, 297.0).unwrap();
        let bytes = surface.finish(&metadata).unwrap();
        assert!(contains(&bytes, "/Title (Penetration Test Report)"));
        assert!(contains(&bytes, "/Author (AutoRed.AI)"));
    }

    #[test]
    fn test_bold_font_registered_separately() {
        let mut surface = PdfSurface::new();
        surface.begin_page(210.0, 297.0).unwrap();
        surface.draw(text("regular", Font::sans(9.0))).unwrap();
        surface.draw(text("bold", Font::sans_bold(9.0))).unwrap();
        surface.draw(text("code", Font::mono(8.0))).unwrap();
        let bytes = surface.finish(&Metadata::default()).unwrap();
        assert!(contains(&bytes, "/BaseFont /Helvetica "));
        assert!(contains(&bytes, "/BaseFont /Helvetica-Bold"));
        assert!(contains(&bytes, "/BaseFont /Courier"));
        assert!(contains(&bytes, "/F2"));
    }

    #[test]
    fn test_draw_before_page_is_an_error() {
        let mut surface = PdfSurface::new();
        let err = surface
            .draw(DrawCommand::fill(Rect::new(0.0, 0.0, 1.0, 1.0), palette::DARK))
            .unwrap_err();
        assert!(matches!(err, FolioError::Render(_)));
    }

    #[test]
    fn test_unavailable_font_fails_at_draw() {
        let mut registry = FontRegistry::empty();
        registry.register(
            FontKey {
                family: FontFamily::Sans,
                weight: FontWeight::Regular,
            },
            crate::font::StandardFont::Helvetica,
        );
        let mut surface = PdfSurface::with_fonts(FontContext::with_registry(registry));
        surface.begin_page(210.0, 297.0).unwrap();
        surface.draw(text("ok", Font::sans(9.0))).unwrap();
        let err = surface.draw(text("code", Font::mono(8.0))).unwrap_err();
        assert!(matches!(err, FolioError::Font(_)));
    }

    #[test]
    fn test_rect_operators() {
        let writer = PdfWriter::new();
        let mut stream = String::new();
        writer.write_rect(
            &mut stream,
            &Rect::new(0.0, 0.0, 25.4, 25.4),
            Some(palette::WHITE),
            Some(Stroke {
                color: palette::DARK,
                width: 0.5,
            }),
            25.4,
        );
        assert!(stream.contains("1.000 1.000 1.000 rg"));
        assert!(stream.contains("0.00 0.00 72.00 72.00 re"));
        assert!(stream.contains("B\nQ"));
    }
}
