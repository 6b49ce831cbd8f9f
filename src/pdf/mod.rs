mod metrics;
mod surface;
mod writer;

pub use metrics::{encode_win_ansi, text_width};
pub use surface::{emit, Rect, Stroke, Surface};
pub use writer::PdfSurface;

use std::path::Path;

use tracing::{info, warn};

use crate::config::Style;
use crate::error::Result;
use crate::invoice::{invoice_filename, normalize, InvoiceDocument, RawInvoice};
use crate::layout::layout;

/// A finished document and the name it should be saved under.
#[derive(Debug, Clone)]
pub struct RenderedInvoice {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Lay out and serialize one invoice. Either the whole document is produced
/// or an error is returned.
pub fn generate_pdf(doc: &InvoiceDocument, style: &Style) -> Result<Vec<u8>> {
    let page = layout(doc, style);
    if page.overflows() {
        warn!(
            invoice = %doc.invoice_number,
            bottom = page.content_bottom,
            page_height = page.page_height,
            "content runs past the page; it will be clipped"
        );
    }

    let mut surface = PdfSurface::new().with_title(format!("Invoice {}", doc.invoice_number));
    emit(&page, &mut surface)?;
    let bytes = surface.finish()?;

    info!(
        invoice = %doc.invoice_number,
        commands = page.commands.len(),
        bytes = bytes.len(),
        "rendered invoice"
    );
    Ok(bytes)
}

/// Full pipeline from a raw record.
pub fn render_invoice(raw: &RawInvoice, style: &Style) -> Result<RenderedInvoice> {
    let doc = normalize(raw);
    render_document(&doc, style)
}

pub fn render_document(doc: &InvoiceDocument, style: &Style) -> Result<RenderedInvoice> {
    Ok(RenderedInvoice {
        filename: invoice_filename(&doc.invoice_number),
        bytes: generate_pdf(doc, style)?,
    })
}

/// Save a rendered invoice, creating parent directories as needed.
pub fn write_pdf(rendered: &RenderedInvoice, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &rendered.bytes)?;
    Ok(())
}
