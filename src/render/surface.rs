use crate::{
    foundation::core::{BezPath, LayoutSize, PixelSize, Rgba8},
    foundation::error::{DriftError, DriftResult},
    foundation::math::unpremul_u8,
};

/// Pixels read back from a surface: straight (non-premultiplied) RGBA8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Stable 64-bit digest of the pixel data, for determinism checks.
    pub fn fingerprint(&self) -> u64 {
        let mut bytes = Vec::with_capacity(self.data.len() + 8);
        bytes.extend_from_slice(&self.width.to_le_bytes());
        bytes.extend_from_slice(&self.height.to_le_bytes());
        bytes.extend_from_slice(&self.data);
        xxhash_rust::xxh3::xxh3_64(&bytes)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some(Rgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
    }
}

/// One stroke layer of a frame: every polyline shares color, alpha and width.
#[derive(Clone, Debug)]
pub struct StrokeLayer {
    pub color: Rgba8,
    /// Line width in layout pixels.
    pub width: f64,
    pub paths: Vec<BezPath>,
}

/// CPU raster backing store for the render loop.
///
/// Drawing happens in layout coordinates; the device pixel ratio is applied as a transform so
/// strokes stay crisp on high-density displays.
pub struct Surface {
    layout: LayoutSize,
    pixel_ratio: f64,
    size: PixelSize,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl Surface {
    /// Allocate a backing store for `layout` at `pixel_ratio`.
    ///
    /// Fails with [`DriftError::SurfaceUnavailable`] for empty layouts or sizes the rasterizer
    /// cannot address.
    pub fn acquire(layout: LayoutSize, pixel_ratio: f64) -> DriftResult<Self> {
        let size = PixelSize::from_layout(layout, pixel_ratio);
        let (width, height) = checked_dims(size)?;
        Ok(Self {
            layout,
            pixel_ratio: effective_ratio(pixel_ratio),
            size,
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    /// Match a new layout box/ratio. Returns whether the backing store was reallocated.
    pub fn resize(&mut self, layout: LayoutSize, pixel_ratio: f64) -> DriftResult<bool> {
        let size = PixelSize::from_layout(layout, pixel_ratio);
        self.layout = layout;
        self.pixel_ratio = effective_ratio(pixel_ratio);
        if size == self.size {
            return Ok(false);
        }
        let (width, height) = checked_dims(size)?;
        self.size = size;
        self.width = width;
        self.height = height;
        self.pixmap = vello_cpu::Pixmap::new(width, height);
        Ok(true)
    }

    pub fn layout(&self) -> LayoutSize {
        self.layout
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Replace the surface contents with `background` and the given stroke layers, in order.
    pub fn draw(&mut self, background: Rgba8, layers: &[StrokeLayer]) {
        clear_pixmap(&mut self.pixmap, background.to_premul());

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(to_cpu_color(background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));

        ctx.set_transform(vello_cpu::kurbo::Affine::scale(self.pixel_ratio));
        for layer in layers {
            if layer.color.a == 0 || layer.width <= 0.0 {
                continue;
            }
            ctx.set_paint(to_cpu_color(layer.color));
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(layer.width));
            for path in &layer.paths {
                ctx.stroke_path(&bezpath_to_cpu(path));
            }
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);

        // Source-over onto an opaque backdrop is opaque; the u8 blend can round alpha below 255.
        if background.a == 255 {
            force_opaque(&mut self.pixmap);
        }
    }

    /// Straight-alpha copy of the current contents.
    pub fn read_rgba8(&self) -> FrameRGBA {
        let mut data = self.pixmap.data_as_u8_slice().to_vec();
        for px in data.chunks_exact_mut(4) {
            let a = px[3];
            if a != 255 {
                px[0] = unpremul_u8(px[0], a);
                px[1] = unpremul_u8(px[1], a);
                px[2] = unpremul_u8(px[2], a);
            }
        }
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data,
        }
    }
}

fn effective_ratio(pixel_ratio: f64) -> f64 {
    if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
        pixel_ratio
    } else {
        1.0
    }
}

fn checked_dims(size: PixelSize) -> DriftResult<(u16, u16)> {
    if size.is_empty() {
        return Err(DriftError::surface(format!(
            "surface has no area ({}x{})",
            size.width, size.height
        )));
    }
    let width: u16 = size
        .width
        .try_into()
        .map_err(|_| DriftError::surface("surface width exceeds u16"))?;
    let height: u16 = size
        .height
        .try_into()
        .map_err(|_| DriftError::surface("surface height exceeds u16"))?;
    Ok((width, height))
}

fn to_cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn force_opaque(pixmap: &mut vello_cpu::Pixmap) {
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px[3] = 255;
    }
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
