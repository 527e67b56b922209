//! The narrow interfaces through which the drawing core talks to the platform: the AR session that
//! tracks the device and its anchors, the scene graph that shows the markers, the UI chrome and the
//! wall clock.

use crate::controls::UiUpdate;
use crate::engine::{AnchorId, PlatformAnchor, StrokeColor};
use glam::{Affine3A, Vec2, Vec3};

pub mod headless;

pub trait ArSession {
	/// Projects a screen-space touch to the world position `standoff_distance` in front of the
	/// camera. `None` without a valid camera frame.
	fn project_touch(&self, touch: Vec2, standoff_distance: f32) -> Option<Vec3>;

	/// The anchors in the current camera frame.
	fn frame_anchors(&self) -> Vec<PlatformAnchor>;

	fn add_anchor(&mut self, anchor: PlatformAnchor);

	fn remove_anchor(&mut self, id: AnchorId);

	fn has_anchor(&self, id: AnchorId) -> bool {
		self.frame_anchors().iter().any(|a| a.id == id)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("node#{_0}")]
pub struct NodeId(pub u64);

/// A marker cloned from a color template, not yet placed in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle {
	pub id: u64,
	pub color: StrokeColor,
}

pub trait MarkerRenderer {
	/// Creates the scene node that follows `anchor`.
	fn create_node(&mut self, anchor: AnchorId, transform: &Affine3A) -> NodeId;

	/// Detaches a node along with its markers.
	fn remove_node(&mut self, node: NodeId);

	fn clone_marker_template(&mut self, color: StrokeColor) -> MarkerHandle;

	fn attach_marker(&mut self, marker: MarkerHandle, local_position: Vec3, node: NodeId);
}

/// Receives UI visibility changes. Posting never blocks drawing.
pub trait UiSink {
	fn post(&self, update: UiUpdate);
}

/// Discards every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoUi;

impl UiSink for NoUi {
	fn post(&self, _update: UiUpdate) {}
}

pub trait Clock {
	/// Seconds since the Unix epoch.
	fn now(&self) -> f64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> f64 {
		chrono::Utc::now().timestamp_micros() as f64 * 1e-6
	}
}

impl<T: UiSink + ?Sized> UiSink for std::rc::Rc<T> {
	fn post(&self, update: UiUpdate) {
		(**self).post(update)
	}
}

impl<T: Clock + ?Sized> Clock for std::rc::Rc<T> {
	fn now(&self) -> f64 {
		(**self).now()
	}
}
