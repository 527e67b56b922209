//! Saved world maps: the strokes of a session as JSON, one record per anchor.
//!
//! A record carries the platform part of the anchor (`identifier`, `transform`) and the stroke part
//! (`sphereLocations`, `dateCreated`, `color`). Records are decoded independently, and a record with
//! any field missing or malformed is dropped whole.

use super::{AnchorId, StrokeAnchor, StrokeAnchors, StrokeColor, StrokeRegistry};
use crate::util::ResultExt;
use glam::{Affine3A, Mat4, Vec3};
use serde::{Deserialize, Serialize};

pub const WORLD_MAP_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
	#[error("malformed world map: {0}")]
	Document(#[source] serde_json::Error),

	#[error("unsupported world map version {0}")]
	Version(u32),

	#[error("stroke record {index} is unconstructible: {source}")]
	Record {
		index: usize,
		#[source]
		source: serde_json::Error,
	},

	#[error("stroke record {index} has a singular transform")]
	SingularTransform { index: usize },
}

static_assertions::assert_impl_all!(DecodeError: std::error::Error, Send, Sync);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct StrokeRecord {
	identifier: AnchorId,
	/// Column-major 4x4.
	transform: [f32; 16],
	sphere_locations: Vec<[f32; 3]>,
	date_created: f64,
	color: StrokeColor,
}

impl From<&StrokeAnchor> for StrokeRecord {
	fn from(anchor: &StrokeAnchor) -> Self {
		Self {
			identifier: anchor.id(),
			transform: Mat4::from(*anchor.transform()).to_cols_array(),
			sphere_locations: anchor
				.sphere_locations()
				.iter()
				.map(|p| p.to_array())
				.collect(),
			date_created: anchor.date_created(),
			color: anchor.color(),
		}
	}
}

impl StrokeRecord {
	fn into_anchor(self, index: usize) -> Result<StrokeAnchor, DecodeError> {
		let transform = Affine3A::from_mat4(Mat4::from_cols_array(&self.transform));
		if transform.matrix3.determinant().abs() <= f32::EPSILON {
			return Err(DecodeError::SingularTransform { index });
		}
		Ok(StrokeAnchor::restored(
			self.identifier,
			transform,
			self.sphere_locations.into_iter().map(Vec3::from_array).collect(),
			self.date_created,
			self.color,
		))
	}
}

#[derive(Debug, Serialize, Deserialize)]
struct Document<R> {
	version: u32,
	anchors: Vec<R>,
}

/// Decodes one stroke record.
pub fn decode_record(value: serde_json::Value, index: usize) -> Result<StrokeAnchor, DecodeError> {
	serde_json::from_value::<StrokeRecord>(value)
		.map_err(|source| DecodeError::Record { index, source })?
		.into_anchor(index)
}

#[derive(Debug, Default, Clone)]
pub struct WorldMap {
	/// Oldest first.
	pub anchors: Vec<StrokeAnchor>,
	/// Records dropped while decoding.
	pub discarded: usize,
}

impl WorldMap {
	/// Captures the strokes in registry order; ids without stroke data are skipped.
	pub fn capture(registry: &StrokeRegistry, anchors: &StrokeAnchors) -> Self {
		Self {
			anchors: registry
				.ids()
				.iter()
				.filter_map(|id| anchors.get(*id).cloned())
				.collect(),
			discarded: 0,
		}
	}

	pub fn to_json(&self) -> Result<String, serde_json::Error> {
		let document = Document {
			version: WORLD_MAP_VERSION,
			anchors: self.anchors.iter().map(StrokeRecord::from).collect(),
		};
		serde_json::to_string_pretty(&document)
	}

	/// Fails only if the document itself is unreadable; bad records are logged and counted.
	pub fn from_json(source: &str) -> Result<Self, DecodeError> {
		let document: Document<serde_json::Value> =
			serde_json::from_str(source).map_err(DecodeError::Document)?;
		if document.version != WORLD_MAP_VERSION {
			return Err(DecodeError::Version(document.version));
		}
		let total = document.anchors.len();
		let anchors: Vec<StrokeAnchor> = document
			.anchors
			.into_iter()
			.enumerate()
			.filter_map(|(index, value)| decode_record(value, index).ok_or_log())
			.collect();
		let discarded = total - anchors.len();
		tracing::info!(loaded = anchors.len(), discarded, "decoded world map");
		Ok(Self { anchors, discarded })
	}
}
