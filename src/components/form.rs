use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::relation_canvas::RelationRecord;

/// Two free-text fields posting a new pair. A successful submit replaces
/// the whole record set with the server's response; a failed one logs and
/// leaves the scene untouched.
#[component]
pub fn PairForm(records: RwSignal<Vec<RelationRecord>>) -> impl IntoView {
	let expectation = RwSignal::new(String::new());
	let experience = RwSignal::new(String::new());

	let on_submit = move |ev: leptos::ev::SubmitEvent| {
		ev.prevent_default();
		let (from, to) = (expectation.get(), experience.get());
		spawn_local(async move {
			match api::submit_pair(&from, &to).await {
				Ok(updated) => records.set(updated),
				Err(err) => log::error!("add pair failed: {err}"),
			}
		});
	};

	view! {
		<form class="pair-form" on:submit=on_submit>
			<label>
				"expectation"
				<input
					type="text"
					name="expectation"
					prop:value=move || expectation.get()
					on:input:target=move |ev| expectation.set(ev.target().value())
				/>
			</label>
			<label>
				"experience"
				<input
					type="text"
					name="experience"
					prop:value=move || experience.get()
					on:input:target=move |ev| experience.set(ev.target().value())
				/>
			</label>
			<button type="submit">"send"</button>
		</form>
	}
}
