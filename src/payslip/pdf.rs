//! A minimal single-page PDF writer.
//!
//! Supports exactly what a payslip needs: the three Helvetica base-14 fonts,
//! bordered and filled cells with aligned text, and a top-down cursor. Cell
//! placement follows the usual report-writer model: a cell is drawn at the
//! cursor, the cursor then moves right, or to the start of the next line.
//!
//! Output is PDF 1.4 with an uncompressed content stream. Dimensions are in
//! millimetres; the writer converts to points.

use std::fmt::{self, Write as _};
use std::io::{self, Write};

const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// Horizontal padding inside a cell.
const CELL_PADDING_MM: f64 = 1.0;

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em.
/// Bold text is measured with these as well; the error is a few percent.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// A base-14 font face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    /// Helvetica.
    Regular,
    /// Helvetica-Bold.
    Bold,
    /// Helvetica-Oblique.
    Italic,
}

impl Font {
    fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Italic => "F3",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
            Font::Italic => "Helvetica-Oblique",
        }
    }

    const ALL: [Font; 3] = [Font::Regular, Font::Bold, Font::Italic];
}

/// Horizontal text alignment inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Flush left.
    Left,
    /// Centred.
    Center,
    /// Flush right.
    Right,
}

/// An RGB fill colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// How a cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    /// Draw a rectangle around the cell.
    pub border: bool,
    /// Text alignment.
    pub align: Align,
    /// Background fill, if any.
    pub fill: Option<Rgb>,
}

impl CellStyle {
    /// Unbordered, unfilled text.
    pub const fn plain(align: Align) -> Self {
        Self {
            border: false,
            align,
            fill: None,
        }
    }

    /// Bordered, unfilled text.
    pub const fn boxed(align: Align) -> Self {
        Self {
            border: true,
            align,
            fill: None,
        }
    }

    /// Bordered text on a coloured background.
    pub const fn shaded(align: Align, fill: Rgb) -> Self {
        Self {
            border: true,
            align,
            fill: Some(fill),
        }
    }
}

/// Reduces text to the printable ASCII the WinAnsi base fonts can show.
///
/// Accented and non-Latin characters are transliterated (`Nguyễn` becomes
/// `Nguyen`); anything left over becomes `?`.
pub fn to_printable_ascii(text: &str) -> String {
    deunicode::deunicode(text)
        .chars()
        .map(|c| if (' '..='~').contains(&c) { c } else { '?' })
        .collect()
}

fn escape_pdf_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '(' | ')') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Width of printable-ASCII `text` in millimetres at `size` points.
pub fn text_width_mm(text: &str, size: f64) -> f64 {
    let units: u32 = text
        .bytes()
        .map(|b| match b {
            32..=126 => u32::from(HELVETICA_WIDTHS[usize::from(b - 32)]),
            _ => 556,
        })
        .sum();
    f64::from(units) / 1000.0 * size / POINTS_PER_MM
}

/// A single page being laid out.
#[derive(Debug, Clone)]
pub struct PdfPage {
    width: f64,
    height: f64,
    margin: f64,
    x: f64,
    y: f64,
    font: Font,
    font_size: f64,
    content: String,
}

impl PdfPage {
    /// An A4 page in landscape orientation with 10 mm margins.
    pub fn a4_landscape() -> Self {
        Self::new(297.0, 210.0, 10.0)
    }

    /// A page of the given size in millimetres.
    pub fn new(width: f64, height: f64, margin: f64) -> Self {
        Self {
            width,
            height,
            margin,
            x: margin,
            y: margin,
            font: Font::Regular,
            font_size: 12.0,
            content: String::new(),
        }
    }

    /// Width between the left and right margins.
    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    /// Distance of the cursor from the top edge.
    pub fn cursor_y(&self) -> f64 {
        self.y
    }

    /// Selects the font for subsequent cells.
    pub fn set_font(&mut self, font: Font, size: f64) {
        self.font = font;
        self.font_size = size;
    }

    /// Moves the cursor to the start of the line `height` below.
    pub fn line_feed(&mut self, height: f64) {
        self.x = self.margin;
        self.y += height;
    }

    /// Draws a cell at the cursor.
    ///
    /// With `line_break` the cursor moves to the left margin below the cell,
    /// otherwise it moves to the cell's right edge.
    pub fn cell(&mut self, width: f64, height: f64, text: &str, style: CellStyle, line_break: bool) {
        // The content stream is a String, so the write cannot fail
        self.paint_cell(width, height, text, style).ok();

        if line_break {
            self.line_feed(height);
        } else {
            self.x += width;
        }
    }

    /// Appends the fill, border and text operators of a cell at the cursor.
    fn paint_cell(&mut self, width: f64, height: f64, text: &str, style: CellStyle) -> fmt::Result {
        let left = self.x * POINTS_PER_MM;
        let bottom = (self.height - self.y - height) * POINTS_PER_MM;
        let w = width * POINTS_PER_MM;
        let h = height * POINTS_PER_MM;

        if let Some(Rgb(r, g, b)) = style.fill {
            writeln!(
                self.content,
                "{:.3} {:.3} {:.3} rg {:.2} {:.2} {:.2} {:.2} re f",
                f64::from(r) / 255.0,
                f64::from(g) / 255.0,
                f64::from(b) / 255.0,
                left,
                bottom,
                w,
                h
            )?;
        }
        if style.border {
            writeln!(
                self.content,
                "0 G 0.57 w {:.2} {:.2} {:.2} {:.2} re S",
                left, bottom, w, h
            )?;
        }

        let text = to_printable_ascii(text);
        if text.is_empty() {
            return Ok(());
        }
        let text_width = text_width_mm(&text, self.font_size);
        let text_x = match style.align {
            Align::Left => self.x + CELL_PADDING_MM,
            Align::Center => self.x + (width - text_width) / 2.0,
            Align::Right => self.x + width - CELL_PADDING_MM - text_width,
        };
        // Baseline sits a third of the font size below the cell's middle.
        let font_size_mm = self.font_size / POINTS_PER_MM;
        let baseline = self.y + height / 2.0 + font_size_mm * 0.35;
        writeln!(
            self.content,
            "BT 0 g /{} {:.1} Tf {:.2} {:.2} Td ({}) Tj ET",
            self.font.resource_name(),
            self.font_size,
            text_x * POINTS_PER_MM,
            (self.height - baseline) * POINTS_PER_MM,
            escape_pdf_string(&text)
        )
    }

    /// The page's raw content stream.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Serializes a one-page document.
///
/// Produces a complete file: header, catalog, page tree, page, content
/// stream, fonts, info dictionary, cross-reference table and trailer.
pub fn write_document<W: Write>(page: &PdfPage, title: &str, out: &mut W) -> io::Result<()> {
    let mut buf: Vec<u8> = Vec::with_capacity(page.content.len() + 2048);
    let mut offsets: Vec<usize> = Vec::new();

    buf.write_all(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n")?;

    let mut object = |buf: &mut Vec<u8>, body: &[u8]| -> io::Result<()> {
        offsets.push(buf.len());
        writeln!(buf, "{} 0 obj", offsets.len())?;
        buf.write_all(body)?;
        buf.write_all(b"\nendobj\n")
    };

    object(&mut buf, b"<< /Type /Catalog /Pages 2 0 R >>")?;
    object(&mut buf, b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>")?;

    let page_dict = format!(
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
         /Resources << /Font << /F1 5 0 R /F2 6 0 R /F3 7 0 R >> >> /Contents 4 0 R >>",
        page.width * POINTS_PER_MM,
        page.height * POINTS_PER_MM
    );
    object(&mut buf, page_dict.as_bytes())?;

    let stream = format!(
        "<< /Length {} >>\nstream\n{}endstream",
        page.content.len(),
        page.content
    );
    object(&mut buf, stream.as_bytes())?;

    for font in Font::ALL {
        let dict = format!(
            "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
            font.base_font()
        );
        object(&mut buf, dict.as_bytes())?;
    }

    let info = format!(
        "<< /Title ({}) /Producer (payslip-engine {}) >>",
        escape_pdf_string(&to_printable_ascii(title)),
        env!("CARGO_PKG_VERSION")
    );
    object(&mut buf, info.as_bytes())?;

    let xref_offset = buf.len();
    write!(buf, "xref\n0 {}\n0000000000 65535 f \n", offsets.len() + 1)?;
    for offset in &offsets {
        writeln!(buf, "{:010} 00000 n ", offset)?;
    }
    write!(
        buf,
        "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
        offsets.len() + 1,
        offsets.len(),
        xref_offset
    )?;

    out.write_all(&buf)
}
