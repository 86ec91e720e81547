use leptos::prelude::*;

use crate::components::concept_graph::ConceptGraphCanvas;
use crate::components::detail_panel::{DetailPanel, Selection};
use crate::components::filter_bar::FilterBar;
use crate::components::timeline::TimelineCanvas;
use crate::data::{
	Concept, ConceptCache, ConceptFilter, categories, load_bundled, to_nodes, year_bounds,
};
use crate::graph::{GraphOptions, build_filtered_graph};
use crate::timeline::CategoryPalette;

thread_local! {
	static DATASET: ConceptCache = ConceptCache::new();
}

/// Bundled concepts, parsed on first use.
fn dataset() -> Vec<Concept> {
	DATASET.with(|cache| cache.get_or_load(load_bundled).to_vec())
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let stored = StoredValue::new(dataset());
	let concepts = Signal::derive(move || stored.get_value());

	let filter = RwSignal::new(ConceptFilter::default());
	let infer_links = RwSignal::new(false);
	let selected = RwSignal::new(None::<Selection>);

	// colors and axis come from the full dataset so filtering never reshuffles them
	let palette = Memo::new(move |_| {
		concepts.with(|all| CategoryPalette::from_categories(categories(all)))
	});
	let years = Memo::new(move |_| concepts.with(|all| year_bounds(all).unwrap_or((1950, 2020))));
	let nodes = Memo::new(move |_| concepts.with(|all| to_nodes(all)));
	let graph = Memo::new(move |_| {
		let options = GraphOptions {
			infer_links: infer_links.get(),
		};
		concepts.with(|all| filter.with(|f| build_filtered_graph(all, f, options)))
	});

	let status = move || {
		let total = concepts.with(Vec::len);
		graph.with(|g| format!("{} of {} concepts, {} links", g.nodes.len(), total, g.links.len()))
	};

	view! {
		<div class="app-shell">
			<header class="toolbar">
				<h1>"AI Concepts"</h1>
				<FilterBar filter=filter infer_links=infer_links palette=palette years=years />
				<p class="status">{status}</p>
			</header>
			<main class="views">
				<section class="graph-view">
					<ConceptGraphCanvas graph=graph palette=palette years=years selected=selected />
				</section>
				<section class="timeline-view">
					<TimelineCanvas nodes=nodes palette=palette selected=selected />
				</section>
			</main>
			<DetailPanel concepts=concepts selected=selected />
		</div>
	}
}
