use super::bands::text_block;
use super::command::{Align, TextStyle};
use super::cursor::Cursor;
use crate::config::Rgb;
use crate::invoice::{format_currency, format_percent, InvoiceDocument};

struct Panel {
    label: &'static str,
    value: String,
    fill: Option<Rgb>,
    value_size: f32,
}

/// Bank details and notes on the left, totals on the right, both starting at
/// the cursor. Leaves the cursor below whichever column ends lower.
pub(super) fn bottom_section(cursor: &mut Cursor, doc: &InvoiceDocument) {
    let top = cursor.y;

    if let Some(bank) = &doc.bank_details {
        text_block(cursor, "Bank Details", bank);
    }
    if let Some(notes) = &doc.notes {
        text_block(cursor, "Notes", notes);
    }
    let left_bottom = cursor.y;

    cursor.move_to(top);
    totals(cursor, doc);
    let right_bottom = cursor.y;

    cursor.move_to(left_bottom.max(right_bottom));
}

fn totals(cursor: &mut Cursor, doc: &InvoiceDocument) {
    let style = cursor.style();
    let symbol = style.currency_symbol.as_str();
    let x = style.summary_x();
    let width = style.summary_width;
    let height = style.summary_panel_height;

    let panels = [
        Panel {
            label: "Subtotal",
            value: format_currency(doc.subtotal, symbol),
            fill: Some(style.subtotal_fill),
            value_size: style.label_size,
        },
        Panel {
            label: "Shipping",
            value: format_currency(doc.shipping, symbol),
            fill: None,
            value_size: style.body_size,
        },
        Panel {
            label: "Discount",
            value: format_percent(doc.discount_percent),
            fill: None,
            value_size: style.body_size,
        },
        Panel {
            label: "Total",
            value: format_currency(doc.total, symbol),
            fill: Some(style.total_fill),
            value_size: style.total_size,
        },
    ];

    for (i, panel) in panels.into_iter().enumerate() {
        let dy = i as f32 * style.summary_spacing;
        cursor.panel(x, dy, width, height, panel.fill);
        cursor.text(
            x + 4.0,
            dy + 5.0,
            panel.label,
            TextStyle::new(style.small_size, style.muted_color),
        );
        cursor.text(
            x + width - 4.0,
            dy + height - 3.0,
            panel.value,
            TextStyle::new(panel.value_size, style.text_color)
                .bold()
                .align(Align::Right),
        );
    }

    cursor.advance(3.0 * style.summary_spacing + height);
}
