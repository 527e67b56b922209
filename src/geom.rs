use glam::{Affine3A, Vec3};

pub struct AABox {
	min: Vec3,
	max: Vec3,
}

impl AABox {
	pub fn new(min: Vec3, max: Vec3) -> Self {
		Self { min, max }
	}

	pub fn empty() -> Self {
		Self::new(Vec3::MAX, Vec3::MIN)
	}

	pub fn is_empty(&self) -> bool {
		self.min.x > self.max.x && self.min.y > self.max.y && self.min.z > self.max.z
	}

	pub fn expanded_to_contain(self, point: Vec3) -> Self {
		Self::new(self.min.min(point), self.max.max(point))
	}

	pub fn containing(points: impl Iterator<Item = Vec3>) -> Self {
		points.fold(Self::empty(), |b, p| b.expanded_to_contain(p))
	}

	pub fn min(&self) -> Vec3 {
		self.min
	}

	pub fn max(&self) -> Vec3 {
		self.max
	}

	/// Zero for an empty box.
	pub fn size(&self) -> Vec3 {
		if self.is_empty() {
			Vec3::ZERO
		} else {
			self.max - self.min
		}
	}
}

/// Tolerance, in units of `spacing`, for treating the distance as an exact multiple of the
/// spacing. Such a multiple is rarely exact in `f32`.
const STEP_TOLERANCE: f32 = 1e-4;

/// Points strictly between `point1` and `point2`, `spacing` apart and ordered from `point1`.
///
/// Walks from `point1` toward `point2` in normalized steps of `spacing / distance`, stopping before
/// `point2`. Gives `floor(distance / spacing)` points, one fewer when the distance is an exact
/// multiple of the spacing. Empty when the points are closer than `spacing`.
pub fn positions_between(point1: Vec3, point2: Vec3, spacing: f32) -> Vec<Vec3> {
	if !(spacing > 0.0) || !spacing.is_finite() {
		return Vec::new();
	}
	let distance = point1.distance(point2);
	if !distance.is_finite() || distance < spacing {
		return Vec::new();
	}
	let count = ((distance / spacing) - STEP_TOLERANCE).ceil().max(1.0) as usize - 1;
	let step = spacing / distance;
	(1..=count)
		.map(|k| point1.lerp(point2, k as f32 * step))
		.collect()
}

/// The pose of an anchor placed at `position` with no rotation.
pub fn anchor_transform_at(position: Vec3) -> Affine3A {
	Affine3A::from_translation(position)
}

pub fn world_to_local(transform: &Affine3A, world: Vec3) -> Vec3 {
	transform.inverse().transform_point3(world)
}

pub fn local_to_world(transform: &Affine3A, local: Vec3) -> Vec3 {
	transform.transform_point3(local)
}
