//! In-memory host used by the demo binary and the integration tests.

use super::*;
use std::cell::RefCell;
use std::collections::HashMap;

/// A pinhole camera looking down its local -Z axis.
#[derive(Debug, Clone, Copy, PartialEq, bon::Builder)]
pub struct Camera {
	/// Camera-to-world transform.
	#[builder(default = Affine3A::IDENTITY)]
	pub pose: Affine3A,
	/// Screen size in points.
	#[builder(default = Vec2::new(390.0, 844.0))]
	pub viewport: Vec2,
	/// Vertical field of view in radians.
	#[builder(default = 1.0)]
	pub vertical_fov: f32,
}

impl Camera {
	pub fn project_touch(&self, touch: Vec2, standoff_distance: f32) -> Option<Vec3> {
		if !(self.viewport.x > 0.0 && self.viewport.y > 0.0) {
			return None;
		}
		let ndc = Vec2::new(
			2.0 * touch.x / self.viewport.x - 1.0,
			1.0 - 2.0 * touch.y / self.viewport.y,
		);
		let tan_half = (0.5 * self.vertical_fov).tan();
		let aspect = self.viewport.x / self.viewport.y;
		let direction = Vec3::new(ndc.x * tan_half * aspect, ndc.y * tan_half, -1.0);
		let world = self.pose.transform_point3(direction * standoff_distance);
		world.is_finite().then_some(world)
	}
}

#[derive(Debug, Default, Clone)]
pub struct HeadlessSession {
	camera: Option<Camera>,
	anchors: Vec<PlatformAnchor>,
}

impl HeadlessSession {
	pub fn new(camera: Camera) -> Self {
		Self {
			camera: Some(camera),
			anchors: Vec::new(),
		}
	}

	/// Delivers a new camera frame, or loses tracking with `None`.
	pub fn set_camera(&mut self, camera: Option<Camera>) {
		self.camera = camera;
	}
}

impl ArSession for HeadlessSession {
	fn project_touch(&self, touch: Vec2, standoff_distance: f32) -> Option<Vec3> {
		self.camera?.project_touch(touch, standoff_distance)
	}

	fn frame_anchors(&self) -> Vec<PlatformAnchor> {
		self.anchors.clone()
	}

	fn add_anchor(&mut self, anchor: PlatformAnchor) {
		self.anchors.retain(|a| a.id != anchor.id);
		self.anchors.push(anchor);
	}

	fn remove_anchor(&mut self, id: AnchorId) {
		self.anchors.retain(|a| a.id != id);
	}

	fn has_anchor(&self, id: AnchorId) -> bool {
		self.anchors.iter().any(|a| a.id == id)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessNode {
	pub anchor: AnchorId,
	pub transform: Affine3A,
	pub markers: Vec<(MarkerHandle, Vec3)>,
}

/// Template sphere for one color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereTemplate {
	pub radius: f32,
	pub rgba: glam::Vec4,
}

#[derive(Debug, Clone)]
pub struct HeadlessRenderer {
	marker_radius: f32,
	next_id: u64,
	templates: HashMap<StrokeColor, SphereTemplate>,
	nodes: HashMap<NodeId, HeadlessNode>,
}

impl HeadlessRenderer {
	pub fn new(marker_radius: f32) -> Self {
		Self {
			marker_radius,
			next_id: 0,
			templates: HashMap::new(),
			nodes: HashMap::new(),
		}
	}

	fn allocate(&mut self) -> u64 {
		self.next_id += 1;
		self.next_id
	}

	pub fn node_for_anchor(&self, anchor: AnchorId) -> Option<&HeadlessNode> {
		self.nodes.values().find(|n| n.anchor == anchor)
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn marker_count(&self) -> usize {
		self.nodes.values().map(|n| n.markers.len()).sum()
	}

	pub fn template(&self, color: StrokeColor) -> Option<&SphereTemplate> {
		self.templates.get(&color)
	}
}

impl MarkerRenderer for HeadlessRenderer {
	fn create_node(&mut self, anchor: AnchorId, transform: &Affine3A) -> NodeId {
		let node = NodeId(self.allocate());
		self.nodes.insert(
			node,
			HeadlessNode {
				anchor,
				transform: *transform,
				markers: Vec::new(),
			},
		);
		node
	}

	fn remove_node(&mut self, node: NodeId) {
		if self.nodes.remove(&node).is_none() {
			tracing::debug!(%node, "node already removed");
		}
	}

	fn clone_marker_template(&mut self, color: StrokeColor) -> MarkerHandle {
		let radius = self.marker_radius;
		self.templates.entry(color).or_insert_with(|| SphereTemplate {
			radius,
			rgba: color.rgba(),
		});
		MarkerHandle {
			id: self.allocate(),
			color,
		}
	}

	fn attach_marker(&mut self, marker: MarkerHandle, local_position: Vec3, node: NodeId) {
		match self.nodes.get_mut(&node) {
			Some(n) => n.markers.push((marker, local_position)),
			None => tracing::warn!(%node, "attaching marker to a missing node"),
		}
	}
}

/// Keeps every posted update, in order.
#[derive(Debug, Default)]
pub struct RecordingUi {
	updates: RefCell<Vec<UiUpdate>>,
}

impl RecordingUi {
	pub fn updates(&self) -> Vec<UiUpdate> {
		self.updates.borrow().clone()
	}

	pub fn clear(&self) {
		self.updates.borrow_mut().clear();
	}
}

impl UiSink for RecordingUi {
	fn post(&self, update: UiUpdate) {
		tracing::trace!(?update, "ui");
		self.updates.borrow_mut().push(update);
	}
}
