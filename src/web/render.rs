//! Canvas drawing. The context is scaled so one unit is one grid cell.

use wasm_bindgen::JsValue;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use crate::engine::{BoardEngine, Cell};

/// Colors for cell values 1..=7; index 0 (empty) is never drawn.
pub const PALETTE: [&str; 8] = [
    "",
    "#ff5252",
    "#76ff03",
    "#80d8ff",
    "#ffc400",
    "#ffff8d",
    "#ea80fc",
    "#f8bbd0",
];

const BACKGROUND_STOPS: [(f32, &str); 4] = [
    (0.0, "#448aff"),
    (0.5, "#3e2723"),
    (0.6, "#212121"),
    (1.0, "#212121"),
];

pub fn palette_color(value: Cell) -> Option<&'static str> {
    match value {
        1..=7 => Some(PALETTE[value as usize]),
        _ => None,
    }
}

pub struct Renderer {
    ctx: CanvasRenderingContext2d,
    background: CanvasGradient,
    cols: f64,
    rows: f64,
}

impl Renderer {
    pub fn new(
        ctx: CanvasRenderingContext2d,
        cell_size: f64,
        cols: usize,
        rows: usize,
    ) -> Result<Self, JsValue> {
        ctx.scale(cell_size, cell_size)?;
        let background = ctx.create_linear_gradient(0.0, 0.0, 0.0, rows as f64);
        for (offset, color) in BACKGROUND_STOPS {
            background.add_color_stop(offset, color)?;
        }
        Ok(Self {
            ctx,
            background,
            cols: cols as f64,
            rows: rows as f64,
        })
    }

    pub fn draw(&self, engine: &BoardEngine) {
        self.ctx.set_fill_style_canvas_gradient(&self.background);
        self.ctx.fill_rect(0.0, 0.0, self.cols, self.rows);

        for (y, row) in engine.grid().rows().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                self.block(x as f64, y as f64, value);
            }
        }
        for (x, y, value) in engine.piece().cells() {
            self.block(x as f64, y as f64, value);
        }
    }

    fn block(&self, x: f64, y: f64, value: Cell) {
        if let Some(color) = palette_color(value) {
            self.ctx.set_fill_style_str(color);
            self.ctx.fill_rect(x, y, 1.0, 1.0);
        }
    }
}
