use serde::{Deserialize, Serialize};

/// An sRGB color as three 0-255 channels; `[r, g, b]` in TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn unit(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

/// Every constant the page layout reads.
///
/// Lengths are millimetres with the origin at the top-left corner; font sizes
/// are points. Any subset can be overridden from the `[style]` config table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Style {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,

    pub text_color: Rgb,
    pub muted_color: Rgb,
    pub border_color: Rgb,
    pub header_fill: Rgb,
    pub stripe_fill: Rgb,
    pub client_fill: Rgb,
    pub placeholder_fill: Rgb,
    pub subtotal_fill: Rgb,
    pub total_fill: Rgb,
    pub line_width: f32,
    pub corner_radius: f32,

    pub company_name_size: f32,
    pub title_size: f32,
    pub label_size: f32,
    pub body_size: f32,
    pub small_size: f32,
    pub total_size: f32,
    pub line_height: f32,

    pub info_box_width: f32,
    pub info_box_height: f32,
    pub section_gap: f32,
    pub label_gap: f32,
    pub bill_to_box_height: f32,
    pub description_box_height: f32,
    pub text_box_height: f32,

    pub row_height: f32,
    /// Left edge of Description, Qty, Unit Price, Tax and Amount, measured
    /// from the left margin.
    pub column_offsets: [f32; 5],
    pub cell_padding: f32,

    pub left_column_ratio: f32,
    pub column_gap: f32,
    pub summary_width: f32,
    pub summary_panel_height: f32,
    pub summary_spacing: f32,

    pub currency_symbol: String,
    /// chrono `strftime` pattern for issue and due dates.
    pub date_format: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin: 15.0,

            text_color: Rgb(33, 37, 41),
            muted_color: Rgb(108, 117, 125),
            border_color: Rgb(206, 212, 218),
            header_fill: Rgb(233, 236, 239),
            stripe_fill: Rgb(248, 249, 250),
            client_fill: Rgb(240, 246, 255),
            placeholder_fill: Rgb(245, 245, 245),
            subtotal_fill: Rgb(240, 246, 255),
            total_fill: Rgb(222, 235, 255),
            line_width: 0.3,
            corner_radius: 2.0,

            company_name_size: 20.0,
            title_size: 28.0,
            label_size: 11.0,
            body_size: 10.0,
            small_size: 9.0,
            total_size: 14.0,
            line_height: 5.0,

            info_box_width: 60.0,
            info_box_height: 22.0,
            section_gap: 8.0,
            label_gap: 4.0,
            bill_to_box_height: 28.0,
            description_box_height: 12.0,
            text_box_height: 30.0,

            row_height: 8.0,
            column_offsets: [0.0, 85.0, 105.0, 135.0, 152.0],
            cell_padding: 3.0,

            left_column_ratio: 0.65,
            column_gap: 5.0,
            summary_width: 63.0,
            summary_panel_height: 15.0,
            summary_spacing: 18.0,

            currency_symbol: "£".to_string(),
            date_format: "%d/%m/%Y".to_string(),
        }
    }
}

impl Style {
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    pub fn right_edge(&self) -> f32 {
        self.page_width - self.margin
    }

    pub fn left_column_width(&self) -> f32 {
        self.content_width() * self.left_column_ratio
    }

    /// Width of the bank details and notes boxes.
    pub fn left_box_width(&self) -> f32 {
        self.left_column_width() - self.column_gap
    }

    /// x of the summary panels: one margin past the left column.
    pub fn summary_x(&self) -> f32 {
        self.left_column_width() + self.margin
    }

    /// Absolute x of each column's left boundary.
    pub fn column_x(&self) -> [f32; 5] {
        self.column_offsets.map(|offset| self.margin + offset)
    }
}
