use serde::Serialize;

use crate::config::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Which point of the text run sits at the command's `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub color: Rgb,
    pub align: Align,
}

impl TextStyle {
    pub fn new(size: f32, color: Rgb) -> Self {
        Self {
            size,
            weight: FontWeight::Normal,
            color,
            align: Align::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// One drawing primitive in page coordinates (mm, origin top-left).
///
/// Text `y` is the baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Text {
        x: f32,
        y: f32,
        text: String,
        #[serde(flatten)]
        style: TextStyle,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
        radius: Option<f32>,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
        line_width: f32,
        radius: Option<f32>,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
        line_width: f32,
    },
}

impl DrawCommand {
    /// Short operator name, used by the `layout` listing.
    pub fn op(&self) -> &'static str {
        match self {
            DrawCommand::Text { .. } => "text",
            DrawCommand::FillRect { .. } => "fill_rect",
            DrawCommand::StrokeRect { .. } => "stroke_rect",
            DrawCommand::Line { .. } => "line",
        }
    }

    /// Anchor point of the primitive.
    pub fn origin(&self) -> (f32, f32) {
        match self {
            DrawCommand::Text { x, y, .. }
            | DrawCommand::FillRect { x, y, .. }
            | DrawCommand::StrokeRect { x, y, .. } => (*x, *y),
            DrawCommand::Line { x1, y1, .. } => (*x1, *y1),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            DrawCommand::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}
