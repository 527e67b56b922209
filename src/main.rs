use airstroke::controls::Control;
use airstroke::host::headless::{Camera, HeadlessRenderer, HeadlessSession, RecordingUi};
use airstroke::{DrawingConfig, StrokeColor, StrokeSession, WorldMap};
use glam::{Affine3A, Vec2, Vec3};
use std::rc::Rc;

fn configure_tracing() -> anyhow::Result<()> {
	let max_level = if cfg!(debug_assertions) {
		tracing::Level::TRACE
	} else {
		tracing::Level::INFO
	};
	tracing::subscriber::set_global_default(
		tracing_subscriber::FmtSubscriber::builder()
			.with_max_level(max_level)
			// Standard output carries the world map.
			.with_writer(std::io::stderr)
			.finish(),
	)?;
	Ok(())
}

fn configure_logging() -> anyhow::Result<()> {
	configure_tracing()?;

	// Redirect `log` to `tracing` for dependencies that use it.
	#[cfg(feature = "log")]
	tracing_log::LogTracer::init()?;
	Ok(())
}

type Strokes = StrokeSession<HeadlessSession, HeadlessRenderer>;

fn new_session(config: &DrawingConfig, camera: Camera, ui: Rc<RecordingUi>) -> Strokes {
	StrokeSession::builder()
		.session(HeadlessSession::new(camera))
		.renderer(HeadlessRenderer::new(config.marker_radius))
		.config(config.clone())
		.ui(Box::new(ui))
		.build()
}

/// Draws one stroke: a circle traced on screen while the device drifts sideways.
fn draw_circle(strokes: &mut Strokes, camera: Camera, center: Vec2, radius: f32, frames: usize) {
	let touch_at = |i: usize| {
		let angle = std::f32::consts::TAU * i as f32 / frames as f32;
		center + radius * Vec2::new(angle.cos(), angle.sin())
	};
	if strokes.touches_began(&[touch_at(0)]).is_none() {
		return;
	}
	for i in 0..=frames {
		let drift = Affine3A::from_translation(Vec3::new(0.0005 * i as f32, 0.0, 0.0));
		strokes
			.session_mut()
			.set_camera(Some(Camera {
				pose: drift * camera.pose,
				..camera
			}));
		strokes.touches_moved(&[touch_at(i)]);
		strokes.frame_updated();
	}
	strokes.touches_ended();
}

fn run() -> anyhow::Result<()> {
	let mut args = std::env::args().skip(1);
	let config = match args.next() {
		Some(path) => DrawingConfig::load(path)?,
		None => DrawingConfig::default(),
	};
	let output = args.next();

	let camera = Camera::builder().build();
	let ui = Rc::new(RecordingUi::default());
	let mut strokes = new_session(&config, camera, ui.clone());

	let center = camera.viewport / 2.0;
	draw_circle(&mut strokes, camera, center, 80.0, 90);
	strokes.apply(Control::PickColor);
	strokes.apply(Control::SelectColor(StrokeColor::Blue));
	draw_circle(&mut strokes, camera, center + Vec2::new(0.0, 150.0), 40.0, 60);
	strokes.apply(Control::SelectColor(StrokeColor::Red));
	draw_circle(&mut strokes, camera, center - Vec2::new(0.0, 150.0), 40.0, 60);
	strokes.apply(Control::UndoLast);

	let map = strokes.save_world_map();
	for anchor in &map.anchors {
		let size = anchor.bounds().size();
		tracing::info!(
			id = %anchor.id(),
			color = %anchor.color(),
			points = anchor.sphere_locations().len(),
			width = size.x,
			height = size.y,
			"stroke"
		);
	}
	let json = map.to_json()?;

	let mut reloaded = new_session(&config, camera, Rc::new(RecordingUi::default()));
	let restored = reloaded.load_world_map(WorldMap::from_json(&json)?);
	reloaded.set_relocalizing(false);
	tracing::info!(
		restored,
		markers = reloaded.renderer().marker_count(),
		ui_updates = ui.updates().len(),
		"reloaded world map"
	);

	match output {
		Some(path) => std::fs::write(path, json)?,
		None => println!("{json}"),
	}
	Ok(())
}

fn main() -> anyhow::Result<()> {
	if let Err(error) = configure_logging() {
		// We can technically continue without logging.
		tracing::error!(error = error.to_string());
	}

	run()
}
