use super::view_model::use_teachers_view_model;
use crate::components::{
    empty_state::EmptyState, error::InlineErrorMessage, layout::{Layout, LoadingSpinner},
};
use leptos::*;

#[component]
pub fn TeachersPage() -> impl IntoView {
    let vm = use_teachers_view_model();

    view! {
        <Layout>
            <div class="space-y-4">
                <h2 class="text-2xl font-bold text-fg">"Teachers"</h2>
                <input
                    type="search"
                    class="border rounded px-3 py-2 w-full md:w-96"
                    placeholder="Search by name or teacher ID"
                    prop:value=move || vm.search.get()
                    on:input=move |ev| vm.search.set(event_target_value(&ev))
                />
                <InlineErrorMessage error=vm.error />
                <Show when=move || !vm.loading.get() fallback=|| view! { <LoadingSpinner /> }>
                    <Show
                        when=move || !vm.teachers.get().is_empty()
                        fallback=|| view! { <EmptyState title="No teachers found" /> }
                    >
                        <table class="min-w-full text-sm">
                            <thead>
                                <tr>
                                    <th class="text-left">"ID"</th>
                                    <th class="text-left">"Name"</th>
                                    <th class="text-left">"Designation"</th>
                                    <th class="text-left">"Campus"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || vm.teachers.get()
                                    key=|teacher| teacher.id.clone()
                                    children=|teacher| view! {
                                        <tr>
                                            <td>{teacher.teacher_id.unwrap_or_default()}</td>
                                            <td>{teacher.name}</td>
                                            <td>{teacher.designation.unwrap_or_default()}</td>
                                            <td>{teacher.campus.map(|c| c.label()).unwrap_or_default()}</td>
                                        </tr>
                                    }
                                />
                            </tbody>
                        </table>
                    </Show>
                </Show>
            </div>
        </Layout>
    }
}
