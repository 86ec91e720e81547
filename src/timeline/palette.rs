use crate::data::Node;

pub const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// Color for categories the palette has never seen.
pub const FALLBACK_COLOR: &str = "#999999";

/// Category -> color table. The first category seen takes slot 0, the next
/// slot 1, wrapping around [`COLORS`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryPalette {
	categories: Vec<String>,
}

impl CategoryPalette {
	pub fn from_categories<I, S>(categories: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut palette = Self::default();
		for category in categories {
			palette.insert(category.into());
		}
		palette
	}

	pub fn from_nodes(nodes: &[Node]) -> Self {
		Self::from_categories(nodes.iter().map(|n| n.category.as_str()))
	}

	fn insert(&mut self, category: String) {
		if !self.categories.contains(&category) {
			self.categories.push(category);
		}
	}

	pub fn slot(&self, category: &str) -> Option<usize> {
		self.categories.iter().position(|c| c == category)
	}

	pub fn color(&self, category: &str) -> &'static str {
		self.slot(category)
			.map(|slot| COLORS[slot % COLORS.len()])
			.unwrap_or(FALLBACK_COLOR)
	}

	/// Categories with their colors, in slot order.
	pub fn legend(&self) -> impl Iterator<Item = (&str, &'static str)> + '_ {
		self.categories.iter().map(|c| (c.as_str(), self.color(c)))
	}

	pub fn len(&self) -> usize {
		self.categories.len()
	}

	pub fn is_empty(&self) -> bool {
		self.categories.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn first_seen_gets_first_slot() {
		let palette = CategoryPalette::from_categories(["b", "a", "b", "c"]);
		assert_eq!(palette.len(), 3);
		assert_eq!(palette.slot("b"), Some(0));
		assert_eq!(palette.slot("a"), Some(1));
		assert_eq!(palette.color("b"), COLORS[0]);
		assert_eq!(palette.color("c"), COLORS[2]);
	}

	#[test]
	fn wraps_and_falls_back() {
		let names: Vec<String> = (0..COLORS.len() + 1).map(|i| format!("cat{i}")).collect();
		let palette = CategoryPalette::from_categories(names.iter().cloned());
		assert_eq!(palette.color(&names[COLORS.len()]), COLORS[0]);
		assert_eq!(palette.color("never-seen"), FALLBACK_COLOR);
	}

	#[test]
	fn legend_order() {
		let palette = CategoryPalette::from_categories(["x", "y"]);
		let legend: Vec<_> = palette.legend().collect();
		assert_eq!(legend, vec![("x", COLORS[0]), ("y", COLORS[1])]);
	}
}
