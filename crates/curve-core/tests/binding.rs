// File: crates/curve-core/tests/binding.rs
// Purpose: Host event wiring through a recording Display: initial scroll, frame scheduling, clicks, teardown.

use curve_core::{ChartBinding, ChartConfig, Display, MarkerFrame, SceneGraphics};

#[derive(Debug, Default)]
struct RecordingDisplay {
    scroll: f64,
    content_width: f64,
    translations: Vec<f64>,
    frames_requested: usize,
    markers: Vec<MarkerFrame>,
}

impl Display for RecordingDisplay {
    fn container_width(&self) -> f64 {
        800.0
    }
    fn container_height(&self) -> f64 {
        300.0
    }
    fn container_top(&self) -> f64 {
        0.0
    }
    fn viewport_width(&self) -> f64 {
        400.0
    }
    fn scroll_left(&self) -> f64 {
        self.scroll
    }
    fn set_scroll_left(&mut self, offset: f64) {
        self.scroll = offset;
    }
    fn set_content_width(&mut self, width: f64) {
        self.content_width = width;
    }
    fn translate_canvas(&mut self, dx: f64) {
        self.translations.push(dx);
    }
    fn place_marker(&mut self, frame: &MarkerFrame) {
        self.markers.push(frame.clone());
    }
    fn request_frame(&mut self) {
        self.frames_requested += 1;
    }
}

const CONFIG: &str = r##"{
    "series": [
        { "name": "mentions", "data": [["Jan", 10], ["Feb", 40], ["Mar", 20]], "default": true, "color": "#3cf" },
        { "name": "twitter", "data": [["Jan", 4], ["Feb", 30], ["Mar", 12]], "parent": "mentions" }
    ]
}"##;

fn attach() -> ChartBinding<SceneGraphics, RecordingDisplay> {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = ChartConfig::from_json(CONFIG).unwrap();
    ChartBinding::attach(&config, SceneGraphics::new(), RecordingDisplay::default()).unwrap()
}

#[test]
fn attach_scrolls_to_the_latest_point() {
    let binding = attach();
    let display = binding.display();
    assert_eq!(display.content_width, 200.0);
    assert!((display.scroll - 199.9).abs() < 1e-9);
    assert_eq!(display.translations, vec![-display.scroll]);
    assert_eq!(display.frames_requested, 1);

    let marker = display.markers.last().unwrap();
    assert_eq!(marker.curve, "mentions");
    assert_eq!(marker.label, "Mar");
}

#[test]
fn scroll_bursts_share_one_frame() {
    let mut binding = attach();
    binding.on_frame();

    for offset in [120.0, 90.0, 60.0] {
        binding.display_mut().set_scroll_left(offset);
        binding.on_scroll();
    }
    assert_eq!(binding.display().frames_requested, 2);
    assert_eq!(binding.display().translations.last(), Some(&-60.0));

    binding.on_frame();
    let marker = binding.display().markers.last().unwrap().clone();
    assert_eq!(marker.nearest_index, 1);
    assert!((marker.point.x - 60.0).abs() < 1e-6);

    binding.display_mut().set_scroll_left(10.0);
    binding.on_scroll();
    assert_eq!(binding.display().frames_requested, 3);
}

#[test]
fn click_switches_the_marker_curve() {
    let mut binding = attach();
    binding.display_mut().set_scroll_left(100.0);
    binding.on_scroll();
    binding.on_frame();

    // twitter peaks at 30 of 40: 300 - 222 = 78 px; probe lands on content x 100
    let focused = binding.on_click(400.0, 80.0);
    let twitter = binding.chart().curve_by_name("twitter").unwrap().id;
    assert_eq!(focused, Some(twitter));
    assert_eq!(binding.display().markers.last().unwrap().curve, "twitter");

    assert_eq!(binding.on_click(400.0, 80.0), Some(twitter));
    assert_eq!(binding.on_click(2000.0, 80.0), None);
    assert_eq!(binding.chart().focused(), twitter);
}

#[test]
fn detach_releases_every_path() {
    let mut binding = attach();
    binding.on_click(400.0, 10.0);
    let (scene, display) = binding.detach();
    assert_eq!(scene.live_paths(), 0);
    assert!(scene.created_paths() > 0);
    assert!(!display.markers.is_empty());
}
