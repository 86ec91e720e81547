use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_DECADE_THRESHOLD: f64 = 1.2;
pub const DEFAULT_YEAR_THRESHOLD: f64 = 2.0;

/// Zoom scale boundaries between the three timeline resolutions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholds")]
pub struct ZoomThresholds {
	decade: f64,
	year: f64,
}

#[derive(Deserialize)]
struct RawThresholds {
	decade: f64,
	year: f64,
}

impl TryFrom<RawThresholds> for ZoomThresholds {
	type Error = ConfigError;

	fn try_from(raw: RawThresholds) -> Result<Self, Self::Error> {
		Self::new(raw.decade, raw.year)
	}
}

impl Default for ZoomThresholds {
	fn default() -> Self {
		Self {
			decade: DEFAULT_DECADE_THRESHOLD,
			year: DEFAULT_YEAR_THRESHOLD,
		}
	}
}

impl ZoomThresholds {
	pub fn new(decade: f64, year: f64) -> Result<Self, ConfigError> {
		for value in [decade, year] {
			if !value.is_finite() || value <= 0.0 {
				return Err(ConfigError::InvalidThreshold(value));
			}
		}
		if decade >= year {
			return Err(ConfigError::ThresholdOrder { decade, year });
		}
		Ok(Self { decade, year })
	}

	pub fn decade(&self) -> f64 {
		self.decade
	}

	pub fn year(&self) -> f64 {
		self.year
	}

	/// Resolution for a zoom scale. Anything that is not at least the decade
	/// threshold, NaN included, is treated as fully zoomed out.
	pub fn resolution(&self, zoom_scale: f64) -> Resolution {
		if zoom_scale >= self.year {
			Resolution::Individual
		} else if zoom_scale >= self.decade {
			Resolution::YearCategory
		} else {
			Resolution::Decade
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resolution {
	Decade,
	YearCategory,
	Individual,
}
