use crate::{
    field::{flow::FlowField, prng::Generator},
    foundation::core::{BezPath, LayoutSize, Point},
    palette::resolve::Palette,
    render::surface::StrokeLayer,
    settings::model::Settings,
};

/// Fixed time advance per frame.
pub const BASE_DT: f64 = 0.002;
/// Additional time advance per frame at `speed == 1`.
pub const SPEED_DT: f64 = 0.010;

/// Time increment for one frame at the given settings.
pub fn time_step(settings: &Settings) -> f64 {
    BASE_DT + settings.speed * SPEED_DT
}

/// Sampling grid of one stroke layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub cols: usize,
    pub rows: usize,
}

impl Grid {
    pub fn for_density(density: f64) -> Self {
        let d = density.clamp(0.0, 1.0);
        Self {
            cols: (18.0 + d * 54.0).round() as usize,
            rows: (14.0 + d * 42.0).round() as usize,
        }
    }

    /// Field evaluations (and generator draws) for one layer.
    pub fn samples(self) -> usize {
        self.cols * self.rows
    }
}

/// Line width, in layout pixels, for a stroke weight.
pub fn stroke_width(stroke: f64) -> f64 {
    0.35 + stroke * 2.4
}

/// Opacity of layer `index`; layers are drawn back to front in decreasing opacity.
pub fn layer_opacity(stroke: f64, index: usize) -> f64 {
    let base = 0.3 + stroke * 0.6;
    (base * (1.0 - 0.14 * index as f64)).clamp(0.0, 1.0)
}

/// Build every stroke layer of one frame.
///
/// Traversal order is fixed: palette layer, then column, then row. Each grid intersection
/// consumes exactly one draw from `generator`, so the order decides which draw lands on which
/// cell and must not change.
pub fn build_layers(
    settings: &Settings,
    field: &FlowField,
    palette: &Palette,
    layout: LayoutSize,
    t: f64,
    generator: &mut Generator,
) -> Vec<StrokeLayer> {
    let grid = Grid::for_density(settings.density);
    let cell_w = layout.width / grid.cols as f64;
    let cell_h = layout.height / (grid.rows - 1) as f64;
    let width = stroke_width(settings.stroke);

    palette
        .iter()
        .enumerate()
        .map(|(layer, color)| {
            let amplitude = cell_w.min(cell_h) * (1.2 + 0.3 * layer as f64);
            // Layer `i` samples at `t + 0.15 * i`.
            let layer_t = t + layer as f64 * 0.15;
            let mut paths = Vec::with_capacity(grid.cols);
            for col in 0..grid.cols {
                let x0 = (col as f64 + 0.5) * cell_w;
                let x_norm = col as f64 / grid.cols as f64;
                let mut path = BezPath::new();
                for row in 0..grid.rows {
                    let y0 = row as f64 * cell_h;
                    let y_norm = row as f64 / (grid.rows - 1) as f64;
                    let v = field.sample(x_norm, y_norm, layer_t, generator.next_f64());
                    let (dx, dy) = FlowField::direction(v);
                    let p = Point::new(x0 + dx * amplitude, y0 + dy * amplitude);
                    if row == 0 {
                        path.move_to(p);
                    } else {
                        path.line_to(p);
                    }
                }
                paths.push(path);
            }
            StrokeLayer {
                color: color.with_alpha(layer_opacity(settings.stroke, layer)),
                width,
                paths,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
