use leptos::prelude::*;

use crate::data::{Concept, Node};
use crate::timeline::TimelineItem;

/// What the user last clicked: one concept, or every member of a cluster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
	pub title: String,
	pub ids: Vec<String>,
}

impl Selection {
	pub fn concept(node: &Node) -> Self {
		Self {
			title: node.name.clone(),
			ids: vec![node.id.clone()],
		}
	}

	pub fn from_item(item: &TimelineItem) -> Self {
		Self {
			title: item.label.clone(),
			ids: item.members().iter().map(|n| n.id.clone()).collect(),
		}
	}
}

/// Display-ready view of one selected concept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConceptDetail {
	pub id: String,
	pub name: String,
	pub year: i32,
	pub category: String,
	pub description: String,
	/// Names of the concepts this one depends on; unknown ids are kept raw.
	pub builds_on: Vec<String>,
	/// Names of the concepts depending on this one.
	pub enables: Vec<String>,
}

pub fn describe(concepts: &[Concept], selection: &Selection) -> Vec<ConceptDetail> {
	let name_of = |id: &str| {
		concepts
			.iter()
			.find(|c| c.id == id)
			.map_or_else(|| id.to_string(), |c| c.name.clone())
	};
	selection
		.ids
		.iter()
		.filter_map(|id| concepts.iter().find(|c| c.id == *id))
		.map(|c| ConceptDetail {
			id: c.id.clone(),
			name: c.name.clone(),
			year: c.year,
			category: c.category.clone(),
			description: c.description.clone(),
			builds_on: c.dependencies.iter().map(|d| name_of(d.as_str())).collect(),
			enables: concepts
				.iter()
				.filter(|other| other.dependencies.contains(&c.id))
				.map(|other| other.name.clone())
				.collect(),
		})
		.collect()
}

#[component]
pub fn DetailPanel(
	#[prop(into)] concepts: Signal<Vec<Concept>>,
	selected: RwSignal<Option<Selection>>,
) -> impl IntoView {
	move || {
		selected.get().map(|selection| {
			let details = concepts.with(|all| describe(all, &selection));
			view! {
				<aside class="detail-panel">
					<header>
						<h2>{selection.title}</h2>
						<button class="close" on:click=move |_| selected.set(None)>
							"Close"
						</button>
					</header>
					{details
						.into_iter()
						.map(|detail| {
							let builds_on = (!detail.builds_on.is_empty())
								.then(|| {
									view! {
										<p class="relations">
											"Builds on: "{detail.builds_on.join(", ")}
										</p>
									}
								});
							let enables = (!detail.enables.is_empty())
								.then(|| {
									view! {
										<p class="relations">
											"Enables: "{detail.enables.join(", ")}
										</p>
									}
								});
							view! {
								<article class="concept-detail" data-id=detail.id>
									<h3>{detail.name}</h3>
									<p class="meta">
										{format!("{} / {}", detail.year, detail.category)}
									</p>
									<p>{detail.description}</p>
									{builds_on}
									{enables}
								</article>
							}
						})
						.collect_view()}
				</aside>
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::timeline::aggregate;

	fn concept(id: &str, year: i32, deps: &[&str]) -> Concept {
		Concept {
			id: id.into(),
			name: id.to_uppercase(),
			year,
			description: format!("about {id}"),
			category: "X".into(),
			dependencies: deps.iter().map(|d| d.to_string()).collect(),
		}
	}

	#[test]
	fn resolves_relations_by_name() {
		let concepts = vec![
			concept("a", 1950, &[]),
			concept("b", 1960, &["a", "ghost"]),
			concept("c", 1970, &["b"]),
		];
		let selection = Selection::concept(&Node::from(&concepts[1]));
		let details = describe(&concepts, &selection);
		assert_eq!(details.len(), 1);
		assert_eq!(details[0].builds_on, vec!["A", "ghost"]);
		assert_eq!(details[0].enables, vec!["C"]);
		assert_eq!(details[0].description, "about b");
	}

	#[test]
	fn cluster_selection_lists_members() {
		let concepts = vec![concept("a", 1950, &[]), concept("b", 1955, &[])];
		let nodes: Vec<Node> = concepts.iter().map(Node::from).collect();
		let items = aggregate(&nodes, 1.0);
		let selection = Selection::from_item(&items[0]);
		assert_eq!(selection.title, "1950s");
		assert_eq!(selection.ids, vec!["a", "b"]);
		assert_eq!(describe(&concepts, &selection).len(), 2);
	}

	#[test]
	fn unknown_ids_are_skipped() {
		let selection = Selection {
			title: "gone".into(),
			ids: vec!["missing".into()],
		};
		assert!(describe(&[concept("a", 1950, &[])], &selection).is_empty());
	}
}
