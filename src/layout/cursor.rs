use super::command::{DrawCommand, TextStyle};
use crate::config::{Rgb, Style};

/// The running vertical position plus the commands emitted so far.
///
/// Drawing helpers take an absolute `x` and a `dy` relative to the cursor, so
/// a band reads as offsets from its own top edge. Only [`Cursor::advance`] and
/// [`Cursor::move_to`] change `y`.
pub struct Cursor<'a> {
    pub y: f32,
    style: &'a Style,
    commands: Vec<DrawCommand>,
}

impl<'a> Cursor<'a> {
    pub fn new(style: &'a Style) -> Self {
        Self {
            y: style.margin,
            style,
            commands: Vec::new(),
        }
    }

    pub fn style(&self) -> &'a Style {
        self.style
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    pub fn move_to(&mut self, y: f32) {
        self.y = y;
    }

    pub fn text(&mut self, x: f32, dy: f32, text: impl Into<String>, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            x,
            y: self.y + dy,
            text: text.into(),
            style,
        });
    }

    pub fn fill_rect(&mut self, x: f32, dy: f32, width: f32, height: f32, color: Rgb) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y: self.y + dy,
            width,
            height,
            color,
            radius: None,
        });
    }

    /// Border in the style's border color and line width.
    pub fn stroke_rect(&mut self, x: f32, dy: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            x,
            y: self.y + dy,
            width,
            height,
            color: self.style.border_color,
            line_width: self.style.line_width,
            radius: None,
        });
    }

    /// Rounded box: optional tint, then border.
    pub fn panel(&mut self, x: f32, dy: f32, width: f32, height: f32, fill: Option<Rgb>) {
        let radius = Some(self.style.corner_radius);
        if let Some(color) = fill {
            self.commands.push(DrawCommand::FillRect {
                x,
                y: self.y + dy,
                width,
                height,
                color,
                radius,
            });
        }
        self.commands.push(DrawCommand::StrokeRect {
            x,
            y: self.y + dy,
            width,
            height,
            color: self.style.border_color,
            line_width: self.style.line_width,
            radius,
        });
    }

    pub fn line(&mut self, x1: f32, dy1: f32, x2: f32, dy2: f32) {
        self.commands.push(DrawCommand::Line {
            x1,
            y1: self.y + dy1,
            x2,
            y2: self.y + dy2,
            color: self.style.border_color,
            line_width: self.style.line_width,
        });
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}
