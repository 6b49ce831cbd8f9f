use super::command::{Align, TextStyle};
use super::cursor::Cursor;
use crate::invoice::{text_lines, InvoiceDocument, PartyInfo};

/// Baseline of a label relative to the band top, and of its underline rule.
const LABEL_BASELINE: f32 = 4.0;
const RULE_OFFSET: f32 = 6.0;

pub(super) const NO_CLIENT_TEXT: &str = "No client information available";

/// Issuer block on the left, title and invoice facts on the right.
pub(super) fn header(cursor: &mut Cursor, doc: &InvoiceDocument) {
    let style = cursor.style();
    let margin = style.margin;
    let right = style.right_edge();

    cursor.text(
        margin,
        8.0,
        doc.company.name.as_str(),
        TextStyle::new(style.company_name_size, style.text_color).bold(),
    );

    let contact = contact_lines(&doc.company);
    for (i, line) in contact.iter().enumerate() {
        cursor.text(
            margin,
            15.0 + i as f32 * style.line_height,
            line.as_str(),
            TextStyle::new(style.small_size, style.muted_color),
        );
    }
    let left_height = 15.0 + contact.len() as f32 * style.line_height;

    cursor.text(
        right,
        10.0,
        "INVOICE",
        TextStyle::new(style.title_size, style.text_color)
            .bold()
            .align(Align::Right),
    );

    let box_x = right - style.info_box_width;
    let box_top = 15.0;
    cursor.panel(box_x, box_top, style.info_box_width, style.info_box_height, None);
    let facts = [
        format!("Invoice #: {}", doc.invoice_number),
        format!("Issue Date: {}", doc.issue_date.display(&style.date_format)),
        format!("Due Date: {}", doc.due_date.display(&style.date_format)),
    ];
    for (i, fact) in facts.into_iter().enumerate() {
        cursor.text(
            box_x + 4.0,
            box_top + 6.0 + i as f32 * 6.0,
            fact,
            TextStyle::new(style.small_size, style.text_color),
        );
    }
    let right_height = box_top + style.info_box_height;

    cursor.advance(left_height.max(right_height) + style.section_gap);
}

fn contact_lines(company: &PartyInfo) -> Vec<String> {
    let mut lines = Vec::new();
    if !company.email.is_empty() {
        lines.push(company.email.clone());
    }
    if let Some(phone) = &company.phone {
        lines.push(phone.clone());
    }
    if let Some(address) = &company.address {
        lines.push(single_line(address));
    }
    if let Some(vat) = &company.vat_number {
        lines.push(format!("VAT: {vat}"));
    }
    lines
}

/// Addresses are stored multi-line but get one fixed row.
fn single_line(text: &str) -> String {
    text_lines(text)
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Bold label with a rule under it, spanning `width` from the left margin.
pub(super) fn section_label(cursor: &mut Cursor, title: &str, width: f32) {
    let style = cursor.style();
    let margin = style.margin;
    cursor.text(
        margin,
        LABEL_BASELINE,
        title,
        TextStyle::new(style.label_size, style.text_color).bold(),
    );
    cursor.line(margin, RULE_OFFSET, margin + width, RULE_OFFSET);
    cursor.advance(RULE_OFFSET + style.label_gap);
}

pub(super) fn bill_to(cursor: &mut Cursor, recipient: Option<&PartyInfo>) {
    let style = cursor.style();
    let margin = style.margin;
    let width = style.content_width();
    let height = style.bill_to_box_height;

    section_label(cursor, "Bill To", width);

    match recipient {
        Some(party) => {
            cursor.panel(margin, 0.0, width, height, Some(style.client_fill));
            let x = margin + 5.0;
            cursor.text(
                x,
                7.0,
                party.name.as_str(),
                TextStyle::new(style.body_size, style.text_color).bold(),
            );
            let rows = [
                Some(party.email.clone()).filter(|e| !e.is_empty()),
                party.phone.clone(),
                party.address.as_deref().map(single_line),
            ];
            for (i, row) in rows.into_iter().enumerate() {
                if let Some(text) = row {
                    cursor.text(
                        x,
                        13.0 + i as f32 * 6.0,
                        text,
                        TextStyle::new(style.small_size, style.muted_color),
                    );
                }
            }
        }
        None => {
            cursor.panel(margin, 0.0, width, height, Some(style.placeholder_fill));
            cursor.text(
                margin + 5.0,
                height / 2.0 + 1.5,
                NO_CLIENT_TEXT,
                TextStyle::new(style.body_size, style.muted_color),
            );
        }
    }

    cursor.advance(height + style.section_gap);
}

pub(super) fn description(cursor: &mut Cursor, text: &str) {
    let style = cursor.style();
    let margin = style.margin;
    let width = style.content_width();
    let height = style.description_box_height;

    section_label(cursor, "Description", width);
    cursor.panel(margin, 0.0, width, height, None);
    cursor.text(
        margin + 5.0,
        height / 2.0 + 1.5,
        single_line(text),
        TextStyle::new(style.body_size, style.text_color),
    );
    cursor.advance(height + style.section_gap);
}

/// Label plus a fixed-height box with one row per line of `text`.
///
/// Lines past the box capacity are still drawn and run over the border.
pub(super) fn text_block(cursor: &mut Cursor, title: &str, text: &str) {
    let style = cursor.style();
    let margin = style.margin;
    let width = style.left_box_width();
    let height = style.text_box_height;

    section_label(cursor, title, width);
    cursor.panel(margin, 0.0, width, height, None);
    for (i, line) in text_lines(text).into_iter().enumerate() {
        cursor.text(
            margin + 4.0,
            6.0 + i as f32 * style.line_height,
            line,
            TextStyle::new(style.small_size, style.text_color),
        );
    }
    cursor.advance(height + style.section_gap);
}
