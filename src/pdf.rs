use std::fmt::Write as _;

use crate::qr::WifiCode;

// A4 in points
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;

const CODE_EDGE: f32 = 360.0;
const QUIET_ZONE: usize = 4;

const TITLE_SIZE: f32 = 24.0;
const BODY_SIZE: f32 = 14.0;

pub struct PdfDocument<'a> {
    pub title: &'a str,
    pub subtitle: Option<&'a str>,
    pub code: &'a WifiCode,
}

impl PdfDocument<'_> {
    pub fn render(&self) -> Vec<u8> {
        let content = self.content_stream();
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                 /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
            ),
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                content.len(),
                content
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];

        let mut out: Vec<u8> = Vec::new();
        out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }

        let xref_offset = out.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            let _ = writeln!(xref, "{offset:010} 00000 n ");
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        );
        out.extend_from_slice(xref.as_bytes());

        out
    }

    fn content_stream(&self) -> String {
        let mut s = String::new();

        let top = PAGE_HEIGHT - 120.0;
        text_line(&mut s, self.title, TITLE_SIZE, top);
        if let Some(subtitle) = self.subtitle {
            text_line(&mut s, subtitle, BODY_SIZE, top - 32.0);
        }

        let modules = self.code.width() + 2 * QUIET_ZONE;
        let module = CODE_EDGE / modules as f32;
        let origin_x = (PAGE_WIDTH - CODE_EDGE) / 2.0;
        let origin_y = top - 80.0 - CODE_EDGE;

        s.push_str("0 g\n");
        for y in 0..self.code.width() {
            for x in 0..self.code.width() {
                if !self.code.is_dark(x, y) {
                    continue;
                }
                let px = origin_x + (x + QUIET_ZONE) as f32 * module;
                // PDF y axis grows upwards
                let py = origin_y + CODE_EDGE - (y + QUIET_ZONE + 1) as f32 * module;
                let _ = writeln!(s, "{px:.3} {py:.3} {module:.3} {module:.3} re");
            }
        }
        s.push('f');

        s
    }
}

fn text_line(s: &mut String, text: &str, size: f32, y: f32) {
    // Helvetica averages about half an em per glyph
    let width = text.chars().count() as f32 * size * 0.5;
    let x = ((PAGE_WIDTH - width) / 2.0).max(36.0);
    let _ = writeln!(
        s,
        "BT /F1 {size} Tf {x:.2} {y:.2} Td ({}) Tj ET",
        escape_text(text)
    );
}

/// Escape a string literal for a WinAnsi encoded base-14 font
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            '\u{a0}'..='\u{ff}' => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            _ => out.push('?'),
        }
    }
    out
}
