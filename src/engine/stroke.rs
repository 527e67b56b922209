use super::{AnchorId, StrokeAnchor, StrokeAnchors, StrokeColor, StrokeRegistry, WorldMap};
use crate::config::DrawingConfig;
use crate::controls::{self, Control, UiElement, UiUpdate};
use crate::geom;
use crate::host::{ArSession, Clock, MarkerRenderer, NoUi, NodeId, SystemClock, UiSink};
use glam::{Vec2, Vec3};
use std::collections::HashMap;

/// The gesture currently drawing into a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveStroke {
	id: AnchorId,
	/// Latest touch location, re-projected every frame.
	touch: Vec2,
	/// Last recorded world position.
	previous_point: Option<Vec3>,
}

/// Creation time of a stroke the session still tracks.
fn creation_time<'a, S: ArSession>(
	session: &'a S,
	anchors: &'a StrokeAnchors,
) -> impl Fn(AnchorId) -> Option<f64> + 'a {
	move |id| {
		session
			.has_anchor(id)
			.then(|| anchors.get(id).map(|a| a.date_created()))
			.flatten()
	}
}

/// Owns the strokes of one AR session and turns touches and camera frames into markers.
///
/// Everything is driven from a single thread: touch events and frame updates arrive in order and
/// each takes `&mut self`.
pub struct StrokeSession<S, R> {
	config: DrawingConfig,
	session: S,
	renderer: R,
	ui: Box<dyn UiSink>,
	clock: Box<dyn Clock>,
	anchors: StrokeAnchors,
	registry: StrokeRegistry,
	nodes: HashMap<AnchorId, NodeId>,
	active: Option<ActiveStroke>,
	current_color: StrokeColor,
	relocalizing: bool,
}

#[bon::bon]
impl<S: ArSession, R: MarkerRenderer> StrokeSession<S, R> {
	#[builder]
	pub fn new(
		session: S,
		renderer: R,
		#[builder(default)] config: DrawingConfig,
		ui: Option<Box<dyn UiSink>>,
		clock: Option<Box<dyn Clock>>,
	) -> Self {
		let ui = ui.unwrap_or_else(|| Box::new(NoUi));
		for update in controls::hide_all() {
			ui.post(update);
		}
		Self {
			current_color: config.initial_color,
			config,
			session,
			renderer,
			ui,
			clock: clock.unwrap_or_else(|| Box::new(SystemClock)),
			anchors: Default::default(),
			registry: Default::default(),
			nodes: Default::default(),
			active: None,
			relocalizing: false,
		}
	}
}

impl<S: ArSession, R: MarkerRenderer> StrokeSession<S, R> {
	pub fn config(&self) -> &DrawingConfig {
		&self.config
	}

	pub fn session(&self) -> &S {
		&self.session
	}

	pub fn session_mut(&mut self) -> &mut S {
		&mut self.session
	}

	pub fn renderer(&self) -> &R {
		&self.renderer
	}

	pub fn registry(&self) -> &StrokeRegistry {
		&self.registry
	}

	pub fn anchors(&self) -> &StrokeAnchors {
		&self.anchors
	}

	pub fn stroke(&self, id: AnchorId) -> Option<&StrokeAnchor> {
		self.anchors.get(id)
	}

	pub fn current_color(&self) -> StrokeColor {
		self.current_color
	}

	pub fn active_stroke(&self) -> Option<AnchorId> {
		self.active.map(|a| a.id)
	}

	pub fn is_drawing(&self) -> bool {
		self.active.is_some()
	}

	pub fn is_relocalizing(&self) -> bool {
		self.relocalizing
	}

	/// While set, new strokes cannot be started.
	pub fn set_relocalizing(&mut self, relocalizing: bool) {
		self.relocalizing = relocalizing;
	}

	/// Starts a stroke at the first touch. Returns its id, or `None` if the touch was ignored.
	#[tracing::instrument(skip(self))]
	pub fn touches_began(&mut self, touches: &[Vec2]) -> Option<AnchorId> {
		if self.relocalizing {
			tracing::debug!("ignoring touch while relocalizing");
			return None;
		}
		let touch = *touches.first()?;
		let Some(position) = self
			.session
			.project_touch(touch, self.config.standoff_distance)
		else {
			tracing::debug!("touch has no world position");
			return None;
		};
		if let Some(previous) = self.active.take() {
			tracing::debug!(id = %previous.id, "gesture restarted without ending");
		}

		let anchor = StrokeAnchor::at_position(position, self.clock.now(), self.current_color);
		let id = anchor.id();
		self.session.add_anchor(anchor.platform_anchor());
		let node = self.renderer.create_node(id, anchor.transform());
		self.nodes.insert(id, node);
		self.anchors.insert(anchor);
		self.registry.append(id);
		self.active = Some(ActiveStroke {
			id,
			touch,
			previous_point: None,
		});
		tracing::debug!(%id, color = %self.current_color, "stroke started");
		Some(id)
	}

	pub fn touches_moved(&mut self, touches: &[Vec2]) {
		if let (Some(active), Some(touch)) = (self.active.as_mut(), touches.first()) {
			active.touch = *touch;
		}
	}

	pub fn touches_ended(&mut self) {
		if let Some(active) = self.active.take() {
			let points = self
				.anchors
				.get(active.id)
				.map_or(0, |a| a.sphere_locations().len());
			tracing::debug!(id = %active.id, points, "stroke ended");
		}
	}

	pub fn touches_cancelled(&mut self) {
		self.touches_ended()
	}

	/// Records the points for the current touch. Returns how many were added.
	pub fn frame_updated(&mut self) -> usize {
		let Some(active) = self.active else {
			return 0;
		};
		if !self.anchors.contains(active.id) || !self.session.has_anchor(active.id) {
			tracing::debug!(id = %active.id, "active stroke no longer exists");
			self.active = None;
			return 0;
		}
		let Some(current) = self
			.session
			.project_touch(active.touch, self.config.standoff_distance)
		else {
			return 0;
		};

		let positions = match active.previous_point {
			None => vec![current],
			Some(previous) => {
				if previous.distance(current) <= self.config.jitter_threshold {
					return 0;
				}
				let mut positions =
					geom::positions_between(previous, current, self.config.marker_spacing);
				positions.push(current);
				positions
			}
		};
		for position in &positions {
			self.record_point(active.id, *position);
		}
		if let Some(active) = self.active.as_mut() {
			active.previous_point = Some(current);
		}
		positions.len()
	}

	fn record_point(&mut self, id: AnchorId, world: Vec3) {
		let (Some(anchor), Some(node)) = (self.anchors.get_mut(id), self.nodes.get(&id)) else {
			return;
		};
		let local = anchor.push_world_point(world);
		let marker = self.renderer.clone_marker_template(anchor.color());
		self.renderer.attach_marker(marker, local, *node);
		tracing::trace!(%id, ?local, "point recorded");
	}

	pub fn apply(&mut self, control: Control) {
		match control {
			Control::PickColor => {
				self.ui.post(UiUpdate::hide(UiElement::SaveErrorLabel));
				self.ui.post(UiUpdate::show(UiElement::ColorPicker));
			}
			Control::SelectColor(color) => {
				self.current_color = color;
				self.ui.post(UiUpdate::hide(UiElement::ColorPicker));
			}
			Control::UndoLast => {
				self.ui.post(UiUpdate::hide(UiElement::SaveErrorLabel));
				self.undo_last();
			}
			Control::UndoAll => {
				self.undo_all();
			}
			Control::ReadMode | Control::Upload => {
				tracing::debug!(?control, "not implemented");
			}
		}
	}

	/// Sorts the registry oldest first, dropping strokes the session no longer tracks.
	pub fn sort_by_creation_time(&mut self) {
		self
			.registry
			.sort_by_creation_time(creation_time(&self.session, &self.anchors));
	}

	/// Deletes the most recently created stroke.
	pub fn undo_last(&mut self) -> Option<AnchorId> {
		let latest = self
			.registry
			.pop_latest(creation_time(&self.session, &self.anchors));
		let Some(id) = latest else {
			tracing::warn!("no stroke to remove");
			return None;
		};
		self.delete_stroke(id);
		Some(id)
	}

	/// Deletes every stroke. Returns how many were removed.
	pub fn undo_all(&mut self) -> usize {
		let ids = self.registry.take_all();
		for id in &ids {
			self.delete_stroke(*id);
		}
		tracing::debug!(removed = ids.len(), "removed all strokes");
		ids.len()
	}

	/// Removes a stroke from the session, the scene and the registry.
	pub fn delete_stroke(&mut self, id: AnchorId) {
		self.session.remove_anchor(id);
		self.forget(id);
	}

	/// The platform removed an anchor. Safe to call for strokes already deleted.
	pub fn anchor_removed(&mut self, id: AnchorId) {
		self.forget(id);
	}

	fn forget(&mut self, id: AnchorId) {
		self.registry.remove(id);
		self.anchors.remove(id);
		if let Some(node) = self.nodes.remove(&id) {
			self.renderer.remove_node(node);
		}
		if self.active.is_some_and(|a| a.id == id) {
			self.active = None;
		}
	}

	/// Snapshot of every live stroke, oldest first.
	pub fn save_world_map(&mut self) -> WorldMap {
		self.sort_by_creation_time();
		let map = WorldMap::capture(&self.registry, &self.anchors);
		tracing::info!(strokes = map.anchors.len(), "saved world map");
		map
	}

	/// Adds the strokes of a saved map and redraws their markers. Drawing stays disabled until
	/// [`Self::set_relocalizing`] clears it. Returns how many strokes were added.
	pub fn load_world_map(&mut self, map: WorldMap) -> usize {
		self.relocalizing = true;
		let mut loaded = 0;
		for anchor in map.anchors {
			let id = anchor.id();
			if self.anchors.contains(id) {
				tracing::debug!(%id, "stroke already loaded");
				continue;
			}
			self.session.add_anchor(anchor.platform_anchor());
			let node = self.renderer.create_node(id, anchor.transform());
			for local in anchor.sphere_locations() {
				let marker = self.renderer.clone_marker_template(anchor.color());
				self.renderer.attach_marker(marker, *local, node);
			}
			self.nodes.insert(id, node);
			self.anchors.insert(anchor);
			self.registry.append(id);
			loaded += 1;
		}
		self.sort_by_creation_time();
		tracing::info!(loaded, discarded = map.discarded, "loaded world map");
		loaded
	}
}
