use airstroke::controls::{Control, UiElement, UiUpdate};
use airstroke::host::headless::{Camera, HeadlessRenderer, HeadlessSession, RecordingUi};
use airstroke::host::ArSession;
use airstroke::{DrawingConfig, StrokeColor, StrokeSession, WorldMap};
use glam::Vec2;
use std::rc::Rc;

fn strokes(ui: Rc<RecordingUi>) -> StrokeSession<HeadlessSession, HeadlessRenderer> {
	let config = DrawingConfig::default();
	StrokeSession::builder()
		.session(HeadlessSession::new(Camera::builder().build()))
		.renderer(HeadlessRenderer::new(config.marker_radius))
		.config(config)
		.ui(Box::new(ui))
		.build()
}

fn drag(
	strokes: &mut StrokeSession<HeadlessSession, HeadlessRenderer>,
	from: Vec2,
	to: Vec2,
	frames: usize,
) {
	strokes.touches_began(&[from]).unwrap();
	for i in 0..=frames {
		strokes.touches_moved(&[from.lerp(to, i as f32 / frames as f32)]);
		strokes.frame_updated();
	}
	strokes.touches_ended();
}

#[test]
fn fast_drag_has_no_gaps() {
	let mut strokes = strokes(Rc::new(RecordingUi::default()));
	// Two frames across most of the screen.
	drag(&mut strokes, Vec2::new(20.0, 400.0), Vec2::new(370.0, 420.0), 2);
	let id = strokes.registry().ids()[0];
	let points = strokes.stroke(id).unwrap().sphere_locations();
	assert!(points.len() > 50);
	let spacing = strokes.config().marker_spacing;
	for pair in points.windows(2) {
		assert!(pair[0].distance(pair[1]) <= spacing * 1.001);
	}
	assert_eq!(strokes.renderer().marker_count(), points.len());
}

#[test]
fn draw_undo_save_reload() {
	let ui = Rc::new(RecordingUi::default());
	let mut strokes = strokes(ui.clone());
	drag(&mut strokes, Vec2::new(100.0, 100.0), Vec2::new(200.0, 100.0), 10);
	strokes.apply(Control::PickColor);
	strokes.apply(Control::SelectColor(StrokeColor::Green));
	drag(&mut strokes, Vec2::new(100.0, 300.0), Vec2::new(200.0, 300.0), 10);
	drag(&mut strokes, Vec2::new(100.0, 500.0), Vec2::new(200.0, 500.0), 10);
	assert_eq!(strokes.registry().len(), 3);

	strokes.apply(Control::UndoLast);
	assert_eq!(strokes.registry().len(), 2);
	assert!(ui.updates().contains(&UiUpdate::show(UiElement::ColorPicker)));

	let json = strokes.save_world_map().to_json().unwrap();
	let mut reloaded = self::strokes(Rc::new(RecordingUi::default()));
	reloaded.load_world_map(WorldMap::from_json(&json).unwrap());
	assert_eq!(reloaded.registry().len(), 2);
	assert_eq!(reloaded.session().frame_anchors().len(), 2);
	assert_eq!(
		reloaded.renderer().marker_count(),
		strokes.renderer().marker_count()
	);
	let colors: Vec<StrokeColor> = reloaded
		.registry()
		.ids()
		.iter()
		.map(|id| reloaded.stroke(*id).unwrap().color())
		.collect();
	assert_eq!(colors.len(), 2);
	assert!(colors.contains(&StrokeColor::White));
	assert!(colors.contains(&StrokeColor::Green));

	reloaded.apply(Control::UndoAll);
	assert!(reloaded.registry().is_empty());
	assert_eq!(reloaded.renderer().node_count(), 0);
}
