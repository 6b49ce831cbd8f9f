mod format;
mod model;
mod normalize;

pub use format::{format_currency, format_number, format_percent, invoice_filename, to_fixed_2};
pub use model::{
    text_lines, InvoiceDate, InvoiceDocument, LineItem, PartyInfo, RawInvoice, RawLineItem,
    RawParty,
};
pub use normalize::{normalize, normalize_str, normalize_value, parse_nested_field, LineItemList};
