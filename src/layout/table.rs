use serde::Serialize;

use super::command::{Align, TextStyle};
use super::cursor::Cursor;
use crate::invoice::{format_currency, format_number, format_percent, LineItem};

pub const COLUMN_TITLES: [&str; 5] = ["Description", "Qty", "Unit Price", "Tax", "Amount"];
pub const NO_ITEMS_TEXT: &str = "No items found";

/// Where the items table landed on the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableGeometry {
    pub header_y: f32,
    /// Top of the first body row; row `i` starts at `body_top + i * row_height`.
    pub body_top: f32,
    pub row_height: f32,
    /// Top edge of every body row, including the single "no items" row.
    pub rows: Vec<f32>,
    pub striped_rows: Vec<usize>,
    pub empty: bool,
}

/// Text baseline inside a row, measured from the row top.
fn baseline(row_height: f32) -> f32 {
    row_height / 2.0 + 1.5
}

pub(super) fn items_table(cursor: &mut Cursor, items: &[LineItem]) -> TableGeometry {
    let style = cursor.style();
    let margin = style.margin;
    let width = style.content_width();
    let row_height = style.row_height;
    let columns = style.column_x();
    let text_y = baseline(row_height);

    let header_y = cursor.y;
    cursor.fill_rect(margin, 0.0, width, row_height, style.header_fill);
    cursor.stroke_rect(margin, 0.0, width, row_height);
    separators(cursor, &columns, row_height);
    for (x, title) in columns.iter().zip(COLUMN_TITLES) {
        cursor.text(
            x + style.cell_padding,
            text_y,
            title,
            TextStyle::new(style.body_size, style.text_color).bold(),
        );
    }
    cursor.advance(row_height);

    let body_top = cursor.y;
    let mut rows = Vec::with_capacity(items.len().max(1));
    let mut striped_rows = Vec::new();

    if items.is_empty() {
        rows.push(cursor.y);
        cursor.stroke_rect(margin, 0.0, width, row_height);
        cursor.text(
            margin + width / 2.0,
            text_y,
            NO_ITEMS_TEXT,
            TextStyle::new(style.body_size, style.muted_color).align(Align::Center),
        );
        cursor.advance(row_height);
    }

    for (i, item) in items.iter().enumerate() {
        rows.push(cursor.y);
        if i % 2 == 1 {
            cursor.fill_rect(margin, 0.0, width, row_height, style.stripe_fill);
            striped_rows.push(i);
        }
        cursor.stroke_rect(margin, 0.0, width, row_height);
        separators(cursor, &columns, row_height);

        let cells = [
            item.description.clone(),
            format_number(item.quantity),
            format_currency(item.unit_price, &style.currency_symbol),
            format_percent(item.tax_percent),
        ];
        for (x, cell) in columns.iter().zip(cells) {
            cursor.text(
                x + style.cell_padding,
                text_y,
                cell,
                TextStyle::new(style.body_size, style.text_color),
            );
        }
        cursor.text(
            columns[4] + style.cell_padding,
            text_y,
            format_currency(item.amount, &style.currency_symbol),
            TextStyle::new(style.body_size, style.text_color).bold(),
        );

        cursor.advance(row_height);
    }

    TableGeometry {
        header_y,
        body_top,
        row_height,
        rows,
        striped_rows,
        empty: items.is_empty(),
    }
}

/// Vertical rules on the inner column boundaries of one row.
fn separators(cursor: &mut Cursor, columns: &[f32; 5], row_height: f32) {
    for &x in &columns[1..] {
        cursor.line(x, 0.0, x, row_height);
    }
}
