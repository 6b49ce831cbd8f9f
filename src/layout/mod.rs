//! Page layout: turns an [`InvoiceDocument`] into positioned draw commands.
//!
//! The page is a single vertical flow. Each band draws relative to the
//! cursor and then advances it; nothing is measured from content, so the
//! same document and style always produce the same command list.

mod bands;
mod command;
mod cursor;
mod summary;
mod table;

pub use command::{Align, DrawCommand, FontWeight, TextStyle};
pub use cursor::Cursor;
pub use table::{TableGeometry, COLUMN_TITLES, NO_ITEMS_TEXT};

pub const NO_CLIENT_TEXT: &str = bands::NO_CLIENT_TEXT;

use serde::Serialize;
use tracing::trace;

use crate::config::Style;
use crate::invoice::InvoiceDocument;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub page_width: f32,
    pub page_height: f32,
    pub commands: Vec<DrawCommand>,
    pub table: TableGeometry,
    /// Cursor position after the last band; may exceed the page height.
    pub content_bottom: f32,
}

impl Layout {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(DrawCommand::text)
    }

    pub fn overflows(&self) -> bool {
        self.content_bottom > self.page_height
    }
}

pub fn layout(doc: &InvoiceDocument, style: &Style) -> Layout {
    let mut cursor = Cursor::new(style);

    bands::header(&mut cursor, doc);
    trace!(y = cursor.y, "header band done");

    bands::bill_to(&mut cursor, doc.bill_to.as_ref());
    trace!(y = cursor.y, "bill-to band done");

    if let Some(text) = &doc.description {
        bands::description(&mut cursor, text);
        trace!(y = cursor.y, "description band done");
    }

    let table = table::items_table(&mut cursor, &doc.items);
    cursor.advance(style.section_gap);
    trace!(y = cursor.y, rows = table.rows.len(), "items table done");

    summary::bottom_section(&mut cursor, doc);
    let content_bottom = cursor.y;

    Layout {
        page_width: style.page_width,
        page_height: style.page_height,
        commands: cursor.into_commands(),
        table,
        content_bottom,
    }
}
