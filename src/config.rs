//! Drawing parameters, loadable from TOML. Every field is optional in the file.

use crate::engine::StrokeColor;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read config: {0}")]
	Io(#[from] std::io::Error),

	#[error("failed to parse config: {0}")]
	Parse(#[from] toml::de::Error),

	#[error("invalid config: {0}")]
	Invalid(String),
}

static_assertions::assert_impl_all!(ConfigError: std::error::Error, Send, Sync);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DrawingConfig {
	/// Distance in front of the camera at which touches are placed, in meters.
	pub standoff_distance: f32,
	/// Moves no longer than this add no points.
	pub jitter_threshold: f32,
	/// Largest gap left between neighbouring markers.
	pub marker_spacing: f32,
	/// Radius of the sphere templates.
	pub marker_radius: f32,
	pub initial_color: StrokeColor,
}

impl Default for DrawingConfig {
	fn default() -> Self {
		Self {
			standoff_distance: 0.2,
			jitter_threshold: 0.00104,
			marker_spacing: 0.001,
			marker_radius: 0.0015,
			initial_color: StrokeColor::White,
		}
	}
}

impl DrawingConfig {
	pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		Self::from_toml(&std::fs::read_to_string(path)?)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		let positive = |name: &str, value: f32| {
			if value > 0.0 && value.is_finite() {
				Ok(())
			} else {
				Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
			}
		};
		positive("standoff_distance", self.standoff_distance)?;
		positive("marker_spacing", self.marker_spacing)?;
		positive("marker_radius", self.marker_radius)?;
		// Single-frame moves must not record points closer than the spacing.
		if !(self.jitter_threshold >= self.marker_spacing) {
			return Err(ConfigError::Invalid(format!(
				"jitter_threshold ({}) must not be below marker_spacing ({})",
				self.jitter_threshold, self.marker_spacing
			)));
		}
		Ok(())
	}
}
