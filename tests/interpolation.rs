use airstroke::geom::positions_between;
use glam::Vec3;
use proptest::prelude::*;

fn point() -> impl Strategy<Value = Vec3> {
	(-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
	#[test]
	fn prop_points_lie_between_endpoints(a in point(), b in point(), spacing in 0.01f32..0.5) {
		let points = positions_between(a, b, spacing);
		let segment = b - a;
		let mut last = 0.0;
		for p in &points {
			let along = (*p - a).dot(segment) / segment.length_squared();
			prop_assert!(along > last && along < 1.0);
			prop_assert!((a + segment * along).distance(*p) < 1e-4);
			last = along;
		}
	}

	#[test]
	fn prop_gaps_never_exceed_spacing(a in point(), b in point(), spacing in 0.01f32..0.5) {
		let points = positions_between(a, b, spacing);
		let chain: Vec<Vec3> = std::iter::once(a).chain(points).chain(std::iter::once(b)).collect();
		for pair in chain.windows(2) {
			prop_assert!(pair[0].distance(pair[1]) <= spacing * 1.001);
		}
	}

	#[test]
	fn prop_count_is_floor_of_distance_over_spacing(a in point(), b in point(), spacing in 0.01f32..0.5) {
		let count = positions_between(a, b, spacing).len();
		let ratio = a.distance(b) / spacing;
		let nearest = ratio.round();
		if ratio < 1.0 {
			prop_assert_eq!(count, 0);
		} else if (ratio - nearest).abs() < 1e-3 {
			// Exact multiples leave out the point that would land on `b`.
			prop_assert!(count + 1 == nearest as usize || count == nearest as usize);
		} else {
			prop_assert_eq!(count, ratio.floor() as usize);
		}
	}

	#[test]
	fn prop_points_sit_at_multiples_of_spacing(a in point(), b in point(), spacing in 0.01f32..0.5) {
		for (k, p) in positions_between(a, b, spacing).iter().enumerate() {
			let expected = (k + 1) as f32 * spacing;
			prop_assert!((a.distance(*p) - expected).abs() < 1e-4);
		}
	}

	#[test]
	fn prop_deterministic(a in point(), b in point(), spacing in 0.01f32..0.5) {
		prop_assert_eq!(positions_between(a, b, spacing), positions_between(a, b, spacing));
	}
}
