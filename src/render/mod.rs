//! Draw-command surface.
//!
//! The core never touches pixels. It emits world-space boxes, lines and
//! circles (plus screen-space text) through the `Renderer` trait; the host
//! owns the coordinate mapping and the actual drawing. `DrawList` is the
//! buffering implementation handed to JS as JSON once per frame.

use serde::{Deserialize, Serialize};

/// Colors are packed `0xRRGGBB`.
pub type Color = u32;

pub trait Renderer {
    fn draw_box(&mut self, cx: f32, cy: f32, width: f32, height: f32, angle: f32, color: Color);
    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color);
    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);
    fn draw_text(&mut self, x: f32, y: f32, text: &str, color: Color);
}

/// A single recorded draw request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DrawCommand {
    Box {
        cx: f32,
        cy: f32,
        width: f32,
        height: f32,
        angle: f32,
        color: Color,
    },
    Line {
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        color: Color,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Color,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        color: Color,
    },
}

/// Renderer that records commands instead of drawing.
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.commands).unwrap_or_else(|_| "[]".to_string())
    }
}

impl Renderer for DrawList {
    fn draw_box(&mut self, cx: f32, cy: f32, width: f32, height: f32, angle: f32, color: Color) {
        self.commands.push(DrawCommand::Box {
            cx,
            cy,
            width,
            height,
            angle,
            color,
        });
    }

    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
        self.commands.push(DrawCommand::Line { x0, y0, x1, y1, color });
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            cx,
            cy,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            color,
        });
    }
}
