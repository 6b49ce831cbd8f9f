pub mod config;
pub mod error;
pub mod invoice;
pub mod layout;
pub mod pdf;

pub use config::{Config, Rgb, Style};
pub use error::{FieldError, InvoiceError, Result};
pub use invoice::{normalize, InvoiceDocument, RawInvoice};
pub use layout::{layout, DrawCommand, Layout};
pub use pdf::{generate_pdf, render_document, render_invoice, RenderedInvoice};
