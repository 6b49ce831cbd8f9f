use crate::config::Rgb;
use crate::error::{InvoiceError, Result};
use crate::layout::{DrawCommand, Layout, TextStyle};

/// Axis-aligned box in page millimetres, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub radius: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f32,
}

/// The drawing primitives a page needs. Any vector backend offering these
/// can stand in for [`super::PdfSurface`].
pub trait Surface {
    fn set_page_size(&mut self, width: f32, height: f32);
    fn draw_text(&mut self, x: f32, y: f32, text: &str, style: &TextStyle);
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);
    fn line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Stroke);
    fn finish(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}

/// Replay a layout onto a surface, rejecting geometry a backend cannot draw.
pub fn emit<S: Surface>(layout: &Layout, surface: &mut S) -> Result<()> {
    check_finite("page size", &[layout.page_width, layout.page_height])?;
    if layout.page_width <= 0.0 || layout.page_height <= 0.0 {
        return Err(InvoiceError::PdfGeneration(format!(
            "page size must be positive, got {}x{}",
            layout.page_width, layout.page_height
        )));
    }
    surface.set_page_size(layout.page_width, layout.page_height);

    for (idx, command) in layout.commands.iter().enumerate() {
        match command {
            DrawCommand::Text { x, y, text, style } => {
                check_finite(command.op(), &[*x, *y, style.size])?;
                if style.size <= 0.0 {
                    return Err(InvoiceError::PdfGeneration(format!(
                        "command {idx}: font size must be positive"
                    )));
                }
                surface.draw_text(*x, *y, text, style);
            }
            DrawCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
                radius,
            } => {
                check_finite(command.op(), &[*x, *y, *width, *height, radius.unwrap_or(0.0)])?;
                surface.fill_rect(
                    Rect {
                        x: *x,
                        y: *y,
                        width: *width,
                        height: *height,
                        radius: *radius,
                    },
                    *color,
                );
            }
            DrawCommand::StrokeRect {
                x,
                y,
                width,
                height,
                color,
                line_width,
                radius,
            } => {
                check_finite(
                    command.op(),
                    &[*x, *y, *width, *height, *line_width, radius.unwrap_or(0.0)],
                )?;
                surface.stroke_rect(
                    Rect {
                        x: *x,
                        y: *y,
                        width: *width,
                        height: *height,
                        radius: *radius,
                    },
                    Stroke {
                        color: *color,
                        width: *line_width,
                    },
                );
            }
            DrawCommand::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                line_width,
            } => {
                check_finite(command.op(), &[*x1, *y1, *x2, *y2, *line_width])?;
                surface.line(
                    (*x1, *y1),
                    (*x2, *y2),
                    Stroke {
                        color: *color,
                        width: *line_width,
                    },
                );
            }
        }
    }
    Ok(())
}

fn check_finite(what: &str, values: &[f32]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(InvoiceError::PdfGeneration(format!(
            "{what} has a non-finite coordinate"
        )))
    }
}
