use pdf_writer::{Content, Finish, Name, Pdf, Rect as PdfRect, Ref, Str, TextStr};

use super::metrics::{encode_win_ansi, text_width};
use super::surface::{Rect, Stroke, Surface};
use crate::config::Rgb;
use crate::error::Result;
use crate::layout::{Align, FontWeight, TextStyle};

const PT_PER_MM: f32 = 72.0 / 25.4;
/// Control-point distance for a quarter circle drawn as one cubic Bézier.
const KAPPA: f32 = 0.552_284_8;

const REGULAR_FONT: Name<'static> = Name(b"F1");
const BOLD_FONT: Name<'static> = Name(b"F2");

fn mm(value: f32) -> f32 {
    value * PT_PER_MM
}

/// Single-page PDF backed by `pdf-writer`, using the built-in Helvetica faces.
///
/// Object ids are fixed and no dates are written, so identical input gives
/// identical bytes.
pub struct PdfSurface {
    width_pt: f32,
    height_pt: f32,
    title: Option<String>,
    content: Content,
}

impl PdfSurface {
    pub fn new() -> Self {
        Self {
            width_pt: mm(210.0),
            height_pt: mm(297.0),
            title: None,
            content: Content::new(),
        }
    }

    /// Document title written to the info dictionary.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Page-space x and y for a top-left-origin millimetre point.
    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (mm(x), self.height_pt - mm(y))
    }

    fn set_fill(&mut self, color: Rgb) {
        let (r, g, b) = color.unit();
        self.content.set_fill_rgb(r, g, b);
    }

    fn set_stroke(&mut self, stroke: Stroke) {
        let (r, g, b) = stroke.color.unit();
        self.content.set_stroke_rgb(r, g, b);
        self.content.set_line_width(mm(stroke.width));
    }

    /// Append the outline of `rect` to the current path.
    fn rect_path(&mut self, rect: Rect) {
        let (x0, top) = self.point(rect.x, rect.y);
        let w = mm(rect.width);
        let h = mm(rect.height);
        let y0 = top - h;

        let r = rect
            .radius
            .map(mm)
            .unwrap_or(0.0)
            .min(w.abs() / 2.0)
            .min(h.abs() / 2.0);
        if r <= 0.0 {
            self.content.rect(x0, y0, w, h);
            return;
        }

        let (x1, y1) = (x0 + w, y0 + h);
        let k = r * KAPPA;
        let c = &mut self.content;
        c.move_to(x0 + r, y0);
        c.line_to(x1 - r, y0);
        c.cubic_to(x1 - r + k, y0, x1, y0 + r - k, x1, y0 + r);
        c.line_to(x1, y1 - r);
        c.cubic_to(x1, y1 - r + k, x1 - r + k, y1, x1 - r, y1);
        c.line_to(x0 + r, y1);
        c.cubic_to(x0 + r - k, y1, x0, y1 - r + k, x0, y1 - r);
        c.line_to(x0, y0 + r);
        c.cubic_to(x0, y0 + r - k, x0 + r - k, y0, x0 + r, y0);
        c.close_path();
    }
}

impl Default for PdfSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for PdfSurface {
    fn set_page_size(&mut self, width: f32, height: f32) {
        self.width_pt = mm(width);
        self.height_pt = mm(height);
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, style: &TextStyle) {
        let encoded = encode_win_ansi(text);
        let (mut px, py) = self.point(x, y);
        let width = text_width(&encoded, style.weight, style.size);
        match style.align {
            Align::Left => {}
            Align::Center => px -= width / 2.0,
            Align::Right => px -= width,
        }
        let font = match style.weight {
            FontWeight::Normal => REGULAR_FONT,
            FontWeight::Bold => BOLD_FONT,
        };

        self.set_fill(style.color);
        self.content.begin_text();
        self.content.set_font(font, style.size);
        self.content.next_line(px, py);
        self.content.show(Str(&encoded));
        self.content.end_text();
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.content.save_state();
        self.set_fill(color);
        self.rect_path(rect);
        self.content.fill_nonzero();
        self.content.restore_state();
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.content.save_state();
        self.set_stroke(stroke);
        self.rect_path(rect);
        self.content.stroke();
        self.content.restore_state();
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Stroke) {
        let (x1, y1) = self.point(from.0, from.1);
        let (x2, y2) = self.point(to.0, to.1);
        self.content.save_state();
        self.set_stroke(stroke);
        self.content.move_to(x1, y1);
        self.content.line_to(x2, y2);
        self.content.stroke();
        self.content.restore_state();
    }

    fn finish(self) -> Result<Vec<u8>> {
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let page_id = Ref::new(3);
        let content_id = Ref::new(4);
        let regular_id = Ref::new(5);
        let bold_id = Ref::new(6);
        let info_id = Ref::new(7);

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id).kids([page_id]).count(1);

        let mut page = pdf.page(page_id);
        page.media_box(PdfRect::new(0.0, 0.0, self.width_pt, self.height_pt));
        page.parent(pages_id);
        page.contents(content_id);
        page.resources()
            .fonts()
            .pair(REGULAR_FONT, regular_id)
            .pair(BOLD_FONT, bold_id);
        page.finish();

        pdf.type1_font(regular_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        let data = self.content.finish();
        pdf.stream(content_id, &data);

        if let Some(title) = &self.title {
            pdf.document_info(info_id)
                .title(TextStr(title))
                .producer(TextStr("invoice-pdf"));
        }

        Ok(pdf.finish())
    }
}
