use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::form::PairForm;
use crate::components::relation_canvas::{RelationCanvas, RelationRecord};

/// Default Home Page: the pair form above a fullscreen relation canvas.
#[component]
pub fn Home() -> impl IntoView {
	let records = RwSignal::new(Vec::<RelationRecord>::new());

	// Initial record set from the backing store; the form replaces it on
	// every successful submit.
	spawn_local(async move {
		match api::fetch_relations().await {
			Ok(initial) => records.set(initial),
			Err(err) => log::error!("loading pairs failed: {err}"),
		}
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<PairForm records=records />
			<RelationCanvas records=records fullscreen=true />
		</ErrorBoundary>
	}
}
