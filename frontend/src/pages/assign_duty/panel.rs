use crate::{
    components::layout::Layout,
    pages::assign_duty::{
        components::{candidate_list::CandidateList, filter_panel::FilterPanel},
        view_model::use_assign_duty_view_model,
    },
};
use leptos::*;

#[component]
pub fn AssignDutyPage() -> impl IntoView {
    let vm = use_assign_duty_view_model();
    let on_assigned = Callback::new(move |_| vm.request_refresh());
    let on_retry = Callback::new(move |_| vm.retry_options());

    view! {
        <Layout>
            <div class="space-y-4">
                <h2 class="text-2xl font-bold text-fg">"Assign Duty"</h2>
                <FilterPanel filter=vm.filter options=vm.options on_retry=on_retry />
                <CandidateList
                    candidates=vm.candidates
                    loading=vm.loading
                    error=vm.list_error
                    target=vm.target
                    on_assigned=on_assigned
                />
            </div>
        </Layout>
    }
}
