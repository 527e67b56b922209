use super::StrokeColor;
use crate::geom::{self, AABox};
use glam::{Affine3A, Vec3};
use std::collections::HashMap;

#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	Hash,
	PartialOrd,
	Ord,
	serde::Serialize,
	serde::Deserialize,
	derive_more::Display,
)]
#[serde(transparent)]
pub struct AnchorId(uuid::Uuid);

impl AnchorId {
	pub fn new_v4() -> Self {
		Self(uuid::Uuid::new_v4())
	}
}

/// The part of an anchor the AR session knows about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformAnchor {
	pub id: AnchorId,
	pub transform: Affine3A,
}

/// One stroke: the points drawn so far, relative to the anchor placed at the first touch.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeAnchor {
	id: AnchorId,
	transform: Affine3A,
	sphere_locations: Vec<Vec3>,
	date_created: f64,
	color: StrokeColor,
}

impl StrokeAnchor {
	pub fn new(id: AnchorId, transform: Affine3A, date_created: f64, color: StrokeColor) -> Self {
		Self {
			id,
			transform,
			sphere_locations: Vec::new(),
			date_created,
			color,
		}
	}

	/// A fresh stroke whose anchor sits at `position`.
	pub fn at_position(position: Vec3, date_created: f64, color: StrokeColor) -> Self {
		Self::new(
			AnchorId::new_v4(),
			geom::anchor_transform_at(position),
			date_created,
			color,
		)
	}

	/// Rebuilds a saved stroke. The locations are already in the anchor's frame.
	pub fn restored(
		id: AnchorId,
		transform: Affine3A,
		sphere_locations: Vec<Vec3>,
		date_created: f64,
		color: StrokeColor,
	) -> Self {
		Self {
			id,
			transform,
			sphere_locations,
			date_created,
			color,
		}
	}

	pub fn id(&self) -> AnchorId {
		self.id
	}

	pub fn transform(&self) -> &Affine3A {
		&self.transform
	}

	pub fn platform_anchor(&self) -> PlatformAnchor {
		PlatformAnchor {
			id: self.id,
			transform: self.transform,
		}
	}

	pub fn sphere_locations(&self) -> &[Vec3] {
		&self.sphere_locations
	}

	pub fn date_created(&self) -> f64 {
		self.date_created
	}

	pub fn color(&self) -> StrokeColor {
		self.color
	}

	/// Appends a world-space point and returns it in the anchor's frame.
	pub(crate) fn push_world_point(&mut self, world: Vec3) -> Vec3 {
		let local = geom::world_to_local(&self.transform, world);
		self.sphere_locations.push(local);
		local
	}

	pub fn world_locations(&self) -> impl Iterator<Item = Vec3> + '_ {
		self
			.sphere_locations
			.iter()
			.map(|p| geom::local_to_world(&self.transform, *p))
	}

	pub fn bounds(&self) -> AABox {
		AABox::containing(self.world_locations())
	}
}

/// Side table holding the stroke data for anchors the AR session tracks by id.
#[derive(Debug, Default, Clone)]
pub struct StrokeAnchors {
	anchors: HashMap<AnchorId, StrokeAnchor>,
}

impl StrokeAnchors {
	pub fn insert(&mut self, anchor: StrokeAnchor) -> Option<StrokeAnchor> {
		self.anchors.insert(anchor.id(), anchor)
	}

	pub fn get(&self, id: AnchorId) -> Option<&StrokeAnchor> {
		self.anchors.get(&id)
	}

	pub(crate) fn get_mut(&mut self, id: AnchorId) -> Option<&mut StrokeAnchor> {
		self.anchors.get_mut(&id)
	}

	pub fn remove(&mut self, id: AnchorId) -> Option<StrokeAnchor> {
		self.anchors.remove(&id)
	}

	pub fn contains(&self, id: AnchorId) -> bool {
		self.anchors.contains_key(&id)
	}

	pub fn len(&self) -> usize {
		self.anchors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.anchors.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_abs_diff_eq;
	use glam::vec3;

	#[test]
	fn test_points_are_local() {
		let origin = vec3(0.0, 0.0, -0.2);
		let mut anchor = StrokeAnchor::at_position(origin, 1.0, StrokeColor::Blue);
		assert_eq!(anchor.push_world_point(origin), Vec3::ZERO);
		let local = anchor.push_world_point(vec3(0.01, 0.0, -0.2));
		assert_abs_diff_eq!(local.x, 0.01, epsilon = 1e-6);
		assert_abs_diff_eq!(local.z, 0.0, epsilon = 1e-6);
		assert_eq!(anchor.sphere_locations().len(), 2);

		let world: Vec<Vec3> = anchor.world_locations().collect();
		assert_abs_diff_eq!(world[1].z, -0.2, epsilon = 1e-6);
	}

	#[test]
	fn test_bounds() {
		let mut anchor = StrokeAnchor::at_position(vec3(1.0, 1.0, 1.0), 0.0, StrokeColor::Red);
		assert!(anchor.bounds().is_empty());
		anchor.push_world_point(vec3(1.0, 1.0, 1.0));
		anchor.push_world_point(vec3(1.5, 1.0, 0.5));
		let bounds = anchor.bounds();
		assert_abs_diff_eq!(bounds.min().z, 0.5, epsilon = 1e-6);
		assert_abs_diff_eq!(bounds.max().x, 1.5, epsilon = 1e-6);
	}

	#[test]
	fn test_side_table() {
		let mut anchors = StrokeAnchors::default();
		let anchor = StrokeAnchor::at_position(Vec3::ZERO, 2.0, StrokeColor::Green);
		let id = anchor.id();
		assert!(anchors.insert(anchor).is_none());
		assert!(anchors.contains(id));
		assert_eq!(anchors.get(id).map(|a| a.date_created()), Some(2.0));
		assert!(anchors.remove(id).is_some());
		assert!(anchors.is_empty());
	}
}
