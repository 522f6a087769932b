// File: crates/curve-render-skia/src/lib.rs
// Summary: Skia graphics provider: retains the curve scene and rasterizes it to PNG on a CPU surface.

use anyhow::Result;
use log::debug;
use skia_safe as skia;

use curve_core::backend::{FillHandle, Graphics, PathHandle, SceneEntry, SceneGraphics};
use curve_core::geometry::{at_fraction, PathData, PathEl, Point};
use curve_core::marker::{MarkerFrame, MARKER_RADIUS};
use curve_core::series::Rgba;
use curve_core::style::{Fill, LinearGradient, PathStyle};

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    /// Horizontal scroll offset of the content.
    pub scroll: f32,
    /// Screen x of content x = 0 before scrolling.
    pub origin: f32,
    pub background: skia::Color,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 300,
            scroll: 0.0,
            origin: 400.0,
            background: skia::Color::from_argb(255, 18, 18, 20), // near-black
        }
    }
}

impl RenderOptions {
    /// Options for a `width` x `height` surface with the first point centred.
    pub fn sized(width: i32, height: i32) -> Self {
        Self { width, height, origin: width as f32 / 2.0, ..Self::default() }
    }

    pub fn with_scroll(mut self, scroll: f64) -> Self {
        self.scroll = scroll as f32;
        self
    }
}

/// `Graphics` provider that keeps the scene in memory and draws it with Skia
/// on demand. Intersections are answered from the retained geometry.
#[derive(Clone, Debug, Default)]
pub struct SkiaGraphics {
    scene: SceneGraphics,
}

impl SkiaGraphics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene(&self) -> &SceneGraphics {
        &self.scene
    }

    /// Render the scene, plus `marker` when given, and return PNG bytes.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions, marker: Option<&MarkerFrame>) -> Result<Vec<u8>> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        let canvas = surface.canvas();
        canvas.clear(opts.background);

        canvas.save();
        canvas.translate((opts.origin - opts.scroll, 0.0));
        let mut drawn = 0usize;
        for (_, entry) in self.scene.entries() {
            if self.draw_entry(canvas, entry) {
                drawn += 1;
            }
        }
        if let Some(frame) = marker {
            draw_marker(canvas, frame);
        }
        canvas.restore();
        debug!("rendered {drawn} paths at scroll {}", opts.scroll);

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render to a PNG file at `output_png_path`, creating parent directories.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        marker: Option<&MarkerFrame>,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts, marker)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    fn draw_entry(&self, canvas: &skia::Canvas, entry: &SceneEntry) -> bool {
        let style = &entry.style;
        if style.stroke.is_none() && style.fill == Fill::None {
            return false;
        }
        let path = to_skia_path(&entry.data);

        if let Fill::Gradient(fill) = style.fill {
            if let Some(paint) = self.gradient_paint(fill, &entry.data) {
                canvas.draw_path(&path, &paint);
            }
        }
        if let Some(color) = style.stroke.filter(|_| style.stroke_width > 0.0) {
            canvas.draw_path(&path, &stroke_paint(color, style));
        }
        true
    }

    fn gradient_paint(&self, fill: FillHandle, data: &PathData) -> Option<skia::Paint> {
        let gradient = self.scene.gradient(fill)?;
        let bounds = data.bounds()?;
        let from = at_fraction(bounds, gradient.from.0, gradient.from.1);
        let to = at_fraction(bounds, gradient.to.0, gradient.to.1);
        let stops = gradient.sorted_stops();
        let colors: Vec<skia::Color> = stops.iter().map(|s| to_color(s.color)).collect();
        let positions: Vec<f32> = stops.iter().map(|s| s.offset as f32).collect();
        let shader = skia::Shader::linear_gradient(
            (to_point(from), to_point(to)),
            &colors[..],
            Some(&positions[..]),
            skia::TileMode::Clamp,
            None,
            None,
        )?;

        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Fill);
        paint.set_shader(shader);
        Some(paint)
    }
}

impl Graphics for SkiaGraphics {
    fn create_path(&mut self, data: &PathData) -> PathHandle {
        self.scene.create_path(data)
    }

    fn update_path(&mut self, path: PathHandle, data: &PathData) {
        self.scene.update_path(path, data)
    }

    fn remove_path(&mut self, path: PathHandle) {
        self.scene.remove_path(path)
    }

    fn linear_gradient(&mut self, gradient: &LinearGradient) -> FillHandle {
        self.scene.linear_gradient(gradient)
    }

    fn remove_gradient(&mut self, fill: FillHandle) {
        self.scene.remove_gradient(fill)
    }

    fn set_style(&mut self, path: PathHandle, style: &PathStyle) {
        self.scene.set_style(path, style)
    }

    fn intersection(&self, a: PathHandle, b: PathHandle) -> Vec<Point> {
        self.scene.intersection(a, b)
    }
}

// ---- helpers ----------------------------------------------------------------

fn to_point(p: Point) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

fn to_color(c: Rgba) -> skia::Color {
    skia::Color::from_argb(c.alpha_u8(), c.r, c.g, c.b)
}

/// Skia path for `data`, element by element.
fn to_skia_path(data: &PathData) -> skia::Path {
    let mut path = skia::Path::new();
    for el in data.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                path.move_to(to_point(p));
            }
            PathEl::LineTo(p) => {
                path.line_to(to_point(p));
            }
            PathEl::QuadTo(c, p) => {
                path.quad_to(to_point(c), to_point(p));
            }
            PathEl::CurveTo(c1, c2, p) => {
                path.cubic_to(to_point(c1), to_point(c2), to_point(p));
            }
            PathEl::ClosePath => {
                path.close();
            }
        }
    }
    path
}

fn stroke_paint(color: Rgba, style: &PathStyle) -> skia::Paint {
    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(style.stroke_width);
    stroke.set_color(to_color(color));
    if style.round_cap {
        stroke.set_stroke_cap(skia::paint::Cap::Round);
    }
    stroke
}

fn draw_marker(canvas: &skia::Canvas, frame: &MarkerFrame) {
    let centre = to_point(frame.point);
    let radius = (MARKER_RADIUS / 2.0) as f32;

    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_style(skia::paint::Style::Fill);
    fill.set_color(to_color(Rgba::WHITE));
    canvas.draw_circle(centre, radius, &fill);

    let mut ring = skia::Paint::default();
    ring.set_anti_alias(true);
    ring.set_style(skia::paint::Style::Stroke);
    ring.set_stroke_width(2.0);
    ring.set_color(to_color(frame.color));
    canvas.draw_circle(centre, radius, &ring);
}
