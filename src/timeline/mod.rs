//! Level-of-detail clustering for the timeline view.
//!
//! Zoomed out, nodes collapse into one cluster per decade. In the middle
//! band, nodes sharing a year and category collapse together and lone
//! nodes stay individual. Zoomed in, every node is its own item.

mod aggregate;
mod config;
mod palette;

pub use aggregate::{
	CLUSTER_ID_PREFIXES, DECADE_CLUSTER_CATEGORY, TimelineAggregator, TimelineItem, aggregate,
	decade_cluster_id, decade_of, year_category_cluster_id,
};
pub use config::{DEFAULT_DECADE_THRESHOLD, DEFAULT_YEAR_THRESHOLD, Resolution, ZoomThresholds};
pub use palette::{COLORS, CategoryPalette, FALLBACK_COLOR};
