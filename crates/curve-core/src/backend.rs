// File: crates/curve-core/src/backend.rs
// Summary: Graphics and display capability traits, plus an in-memory retained graphics provider.

use std::collections::HashMap;

use crate::geometry::{intersect, PathData, Point};
use crate::marker::MarkerFrame;
use crate::style::{LinearGradient, PathStyle};

/// Opaque id of a drawable path owned by a `Graphics` provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathHandle(pub u32);

/// Opaque id of a fill (gradient) owned by a `Graphics` provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FillHandle(pub u32);

/// Vector-graphics capability the chart draws through.
pub trait Graphics {
    fn create_path(&mut self, data: &PathData) -> PathHandle;
    /// Replace the geometry of an existing path, keeping its style.
    fn update_path(&mut self, path: PathHandle, data: &PathData);
    fn remove_path(&mut self, path: PathHandle);
    fn linear_gradient(&mut self, gradient: &LinearGradient) -> FillHandle;
    /// Release a fill no path refers to any more.
    fn remove_gradient(&mut self, fill: FillHandle);
    fn set_style(&mut self, path: PathHandle, style: &PathStyle);
    /// Points where `a` crosses `b`, ordered along `a`. Empty when the paths
    /// do not meet or either handle is unknown.
    fn intersection(&self, a: PathHandle, b: PathHandle) -> Vec<Point>;
}

/// Host surface the chart is shown in: element metrics, scrolling and frame
/// scheduling.
pub trait Display {
    /// `offsetWidth` of the canvas container.
    fn container_width(&self) -> f64;
    /// `offsetHeight` of the canvas container; the drawing height.
    fn container_height(&self) -> f64;
    /// Distance from the top of the page to the container, used to bring
    /// pointer coordinates into canvas space.
    fn container_top(&self) -> f64;
    /// `offsetWidth` of the scrolling viewport.
    fn viewport_width(&self) -> f64;
    fn scroll_left(&self) -> f64;
    fn set_scroll_left(&mut self, offset: f64);
    /// Width of the scrollable content, which defines the scroll range.
    fn set_content_width(&mut self, width: f64);
    /// Shift the drawing horizontally (negative scroll offset).
    fn translate_canvas(&mut self, dx: f64);
    fn place_marker(&mut self, frame: &MarkerFrame);
    /// Ask for one callback on the next display frame.
    fn request_frame(&mut self);
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneEntry {
    pub data: PathData,
    pub style: PathStyle,
}

/// Retained, in-memory `Graphics` provider. Keeps every path with its style
/// and answers intersections with `geometry::intersect` (exact kurbo crossings).
#[derive(Clone, Debug, Default)]
pub struct SceneGraphics {
    paths: HashMap<PathHandle, SceneEntry>,
    order: Vec<PathHandle>,
    gradients: HashMap<FillHandle, LinearGradient>,
    next_path: u32,
    next_fill: u32,
    created: usize,
}

impl SceneGraphics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, path: PathHandle) -> Option<&SceneEntry> {
        self.paths.get(&path)
    }

    pub fn gradient(&self, fill: FillHandle) -> Option<&LinearGradient> {
        self.gradients.get(&fill)
    }

    /// Live paths in creation (paint) order.
    pub fn entries(&self) -> impl Iterator<Item = (PathHandle, &SceneEntry)> {
        self.order.iter().filter_map(move |h| self.paths.get(h).map(|e| (*h, e)))
    }

    pub fn live_paths(&self) -> usize {
        self.paths.len()
    }

    pub fn live_gradients(&self) -> usize {
        self.gradients.len()
    }

    /// Paths ever created, including removed ones.
    pub fn created_paths(&self) -> usize {
        self.created
    }
}

impl Graphics for SceneGraphics {
    fn create_path(&mut self, data: &PathData) -> PathHandle {
        let handle = PathHandle(self.next_path);
        self.next_path += 1;
        self.created += 1;
        self.paths.insert(handle, SceneEntry { data: data.clone(), style: PathStyle::INVISIBLE });
        self.order.push(handle);
        handle
    }

    fn update_path(&mut self, path: PathHandle, data: &PathData) {
        if let Some(entry) = self.paths.get_mut(&path) {
            entry.data = data.clone();
        }
    }

    fn remove_path(&mut self, path: PathHandle) {
        if self.paths.remove(&path).is_some() {
            self.order.retain(|h| *h != path);
        }
    }

    fn linear_gradient(&mut self, gradient: &LinearGradient) -> FillHandle {
        let handle = FillHandle(self.next_fill);
        self.next_fill += 1;
        self.gradients.insert(handle, gradient.clone());
        handle
    }

    fn remove_gradient(&mut self, fill: FillHandle) {
        self.gradients.remove(&fill);
    }

    fn set_style(&mut self, path: PathHandle, style: &PathStyle) {
        if let Some(entry) = self.paths.get_mut(&path) {
            entry.style = *style;
        }
    }

    fn intersection(&self, a: PathHandle, b: PathHandle) -> Vec<Point> {
        match (self.paths.get(&a), self.paths.get(&b)) {
            (Some(a), Some(b)) => intersect(&a.data, &b.data),
            _ => Vec::new(),
        }
    }
}
