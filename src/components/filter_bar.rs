use leptos::prelude::*;

use crate::data::ConceptFilter;
use crate::timeline::CategoryPalette;

/// Year field contents to a bound; blank or garbage clears the bound.
pub fn parse_year(input: &str) -> Option<i32> {
	input.trim().parse().ok()
}

#[component]
pub fn FilterBar(
	filter: RwSignal<ConceptFilter>,
	infer_links: RwSignal<bool>,
	#[prop(into)] palette: Signal<CategoryPalette>,
	#[prop(into)] years: Signal<(i32, i32)>,
) -> impl IntoView {
	let year_field = move |bound: fn(&ConceptFilter) -> Option<i32>| {
		move || filter.with(|f| bound(f).map(|y| y.to_string()).unwrap_or_default())
	};

	view! {
		<div class="filter-bar">
			<label class="year-range">
				"From "
				<input
					type="number"
					placeholder=move || years.get().0.to_string()
					prop:value=year_field(|f| f.year_min)
					on:change=move |ev| {
						let value = event_target_value(&ev);
						filter.update(|f| f.year_min = parse_year(&value));
					}
				/>
				" to "
				<input
					type="number"
					placeholder=move || years.get().1.to_string()
					prop:value=year_field(|f| f.year_max)
					on:change=move |ev| {
						let value = event_target_value(&ev);
						filter.update(|f| f.year_max = parse_year(&value));
					}
				/>
			</label>

			<div class="categories">
				{move || {
					palette
						.get()
						.legend()
						.map(|(category, color)| {
							let (shown, toggled) = (category.to_string(), category.to_string());
							view! {
								<label class="category-toggle">
									<input
										type="checkbox"
										prop:checked=move || {
											filter.with(|f| !f.hidden_categories.contains(&shown))
										}
										on:change=move |ev| {
											let visible = event_target_checked(&ev);
											filter.update(|f| f.toggle_category(&toggled, visible));
										}
									/>
									<span class="swatch" style:background-color=color></span>
									{category.to_string()}
								</label>
							}
						})
						.collect_view()
				}}
			</div>

			<label class="infer-toggle">
				<input
					type="checkbox"
					prop:checked=move || infer_links.get()
					on:change=move |ev| infer_links.set(event_target_checked(&ev))
				/>
				"Infer links"
			</label>

			<button
				class="reset"
				disabled=move || !filter.with(ConceptFilter::is_active)
				on:click=move |_| filter.set(ConceptFilter::default())
			>
				"Reset"
			</button>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn year_input_parsing() {
		assert_eq!(parse_year(" 1986 "), Some(1986));
		assert_eq!(parse_year("-300"), Some(-300));
		assert_eq!(parse_year(""), None);
		assert_eq!(parse_year("soon"), None);
	}
}
