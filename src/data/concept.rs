use serde::{Deserialize, Deserializer, Serialize, de};

/// One entry of the concept dataset, as loaded from the bundled snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
	pub id: String,
	pub name: String,
	#[serde(deserialize_with = "deserialize_year")]
	pub year: i32,
	#[serde(default)]
	pub description: String,
	pub category: String,
	/// Ids this concept builds on. Edges run dependency -> dependent.
	#[serde(default)]
	pub dependencies: Vec<String>,
}

/// Graph/timeline projection of a [`Concept`]. Positions and velocities are
/// owned by the renderers and never stored here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
	pub id: String,
	pub name: String,
	pub year: i32,
	pub description: String,
	pub category: String,
}

impl From<&Concept> for Node {
	fn from(concept: &Concept) -> Self {
		Self {
			id: concept.id.clone(),
			name: concept.name.clone(),
			year: concept.year,
			description: concept.description.clone(),
			category: concept.category.clone(),
		}
	}
}

/// Project a concept list onto nodes, preserving order.
pub fn to_nodes(concepts: &[Concept]) -> Vec<Node> {
	concepts.iter().map(Node::from).collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseYear {
	Int(i64),
	Float(f64),
	Text(String),
}

// Snapshots written by hand sometimes carry the year as a string or float.
fn deserialize_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
	D: Deserializer<'de>,
{
	let year = match LooseYear::deserialize(deserializer)? {
		LooseYear::Int(v) => v,
		LooseYear::Float(v) if v.is_finite() => v.floor() as i64,
		LooseYear::Float(v) => {
			return Err(de::Error::custom(format!("year is not finite: {v}")));
		}
		LooseYear::Text(s) => {
			let trimmed = s.trim();
			trimmed
				.parse::<i64>()
				.or_else(|_| trimmed.parse::<f64>().map(|f| f.floor() as i64))
				.map_err(|_| de::Error::custom(format!("year is not numeric: {s:?}")))?
		}
	};
	i32::try_from(year).map_err(|_| de::Error::custom(format!("year out of range: {year}")))
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn coerces_string_and_float_years() {
		let c: Concept = serde_json::from_value(json!({
			"id": "bp", "name": "Backpropagation", "year": "1986",
			"category": "algorithm"
		}))
		.unwrap();
		assert_eq!(c.year, 1986);
		assert!(c.dependencies.is_empty());
		assert_eq!(c.description, "");

		let c: Concept = serde_json::from_value(json!({
			"id": "x", "name": "X", "year": 1957.0, "category": "concept"
		}))
		.unwrap();
		assert_eq!(c.year, 1957);
	}

	#[test]
	fn rejects_non_numeric_year() {
		let err = serde_json::from_value::<Concept>(json!({
			"id": "x", "name": "X", "year": "nineteen", "category": "concept"
		}))
		.unwrap_err();
		assert!(err.to_string().contains("not numeric"));
	}

	#[test]
	fn ignores_unknown_fields() {
		let c: Concept = serde_json::from_value(json!({
			"id": "x", "name": "X", "year": 2000, "category": "concept",
			"impact": "high", "links": ["https://example.org"]
		}))
		.unwrap();
		assert_eq!(c.id, "x");
	}

	#[test]
	fn node_projection_keeps_fields() {
		let c = Concept {
			id: "a".into(),
			name: "A".into(),
			year: 1950,
			description: "first".into(),
			category: "X".into(),
			dependencies: vec!["z".into()],
		};
		let n = Node::from(&c);
		assert_eq!(n.id, "a");
		assert_eq!(n.year, 1950);
		assert_eq!(n.description, "first");
		assert_eq!(n.category, "X");
	}
}
