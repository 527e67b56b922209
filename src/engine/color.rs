use serde::{Deserialize, Serialize};

/// The fixed palette offered by the color picker.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum StrokeColor {
	#[default]
	#[display("white")]
	White,
	#[display("black")]
	Black,
	#[display("blue")]
	Blue,
	#[display("green")]
	Green,
	#[display("yellow")]
	Yellow,
	#[display("red")]
	Red,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown stroke color {0:?}")]
pub struct UnknownColor(pub String);

static_assertions::assert_impl_all!(UnknownColor: std::error::Error, Send, Sync);

impl StrokeColor {
	pub const ALL: [StrokeColor; 6] = [
		StrokeColor::White,
		StrokeColor::Black,
		StrokeColor::Blue,
		StrokeColor::Green,
		StrokeColor::Yellow,
		StrokeColor::Red,
	];

	/// The tag stored in saved world maps.
	pub fn tag(self) -> &'static str {
		match self {
			StrokeColor::White => "white",
			StrokeColor::Black => "black",
			StrokeColor::Blue => "blue",
			StrokeColor::Green => "green",
			StrokeColor::Yellow => "yellow",
			StrokeColor::Red => "red",
		}
	}

	pub fn from_tag(tag: &str) -> Result<Self, UnknownColor> {
		Self::ALL
			.into_iter()
			.find(|c| c.tag() == tag)
			.ok_or_else(|| UnknownColor(tag.to_owned()))
	}

	/// RGBA used for the sphere template material.
	pub fn rgba(self) -> glam::Vec4 {
		// Every tag is a CSS named color.
		match csscolorparser::parse(self.tag()) {
			Ok(color) => glam::Vec4::from_array(color.to_array()),
			Err(_) => glam::Vec4::ONE,
		}
	}
}

impl std::str::FromStr for StrokeColor {
	type Err = UnknownColor;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_tag(s)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_tags() {
		for color in StrokeColor::ALL {
			assert_eq!(StrokeColor::from_tag(color.tag()), Ok(color));
			assert_eq!(color.to_string(), color.tag());
		}
		assert_eq!(
			"purple".parse::<StrokeColor>(),
			Err(UnknownColor("purple".to_owned()))
		);
	}

	#[test]
	fn test_rgba() {
		assert_eq!(StrokeColor::White.rgba(), glam::Vec4::ONE);
		assert_eq!(StrokeColor::Black.rgba(), glam::vec4(0.0, 0.0, 0.0, 1.0));
		assert_eq!(StrokeColor::Red.rgba(), glam::vec4(1.0, 0.0, 0.0, 1.0));
	}

	#[test]
	fn test_serde_tag() {
		assert_eq!(
			serde_json::to_string(&StrokeColor::Yellow).unwrap(),
			"\"yellow\""
		);
		assert!(serde_json::from_str::<StrokeColor>("\"Yellow\"").is_err());
	}
}
