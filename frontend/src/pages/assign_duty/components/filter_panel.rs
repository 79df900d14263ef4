use crate::{
    api::{ApiError, MasterDataRecord},
    components::error::InlineErrorMessage,
    pages::assign_duty::{filter::FilterState, repository::FilterOptions},
    utils::time::current_year,
};
use leptos::*;

#[derive(Clone, Copy)]
enum OptionList {
    Duties,
    Classes,
    Subjects,
}

fn records(options: &FilterOptions, list: OptionList) -> Vec<MasterDataRecord> {
    match list {
        OptionList::Duties => options.responsibility_types.clone(),
        OptionList::Classes => options.classes.clone(),
        OptionList::Subjects => options.subjects.clone(),
    }
}

const YEARS_BACK: i32 = 3;
const YEARS_AHEAD: i32 = 1;

/// Newest first; a selected year outside the window is kept so it stays visible.
fn year_options(current: i32, selected: &str) -> Vec<i32> {
    let mut years: Vec<i32> = ((current - YEARS_BACK)..=(current + YEARS_AHEAD)).rev().collect();
    if let Ok(selected) = selected.trim().parse::<i32>() {
        if !years.contains(&selected) {
            years.push(selected);
            years.sort_unstable_by(|a, b| b.cmp(a));
        }
    }
    years
}

#[component]
fn MasterSelect(
    label: &'static str,
    placeholder: &'static str,
    list: OptionList,
    selected: RwSignal<String>,
    options: Resource<u32, Result<FilterOptions, ApiError>>,
) -> impl IntoView {
    let option_views = move || match options.get() {
        None => view! { <option value="" disabled>"Loading..."</option> }.into_view(),
        Some(Err(_)) => view! { <option value="" disabled>"Unavailable"</option> }.into_view(),
        Some(Ok(loaded)) => records(&loaded, list)
            .into_iter()
            .map(|record| view! { <option value=record.id.clone()>{record.name}</option> })
            .collect_view(),
    };

    view! {
        <label class="flex flex-col gap-1 text-sm">
            <span class="font-medium text-fg">{label}</span>
            <select
                class="border rounded px-2 py-1"
                prop:value=move || selected.get()
                on:change=move |ev| selected.set(event_target_value(&ev))
            >
                <option value="">{placeholder}</option>
                {option_views}
            </select>
        </label>
    }
}

#[component]
pub fn FilterPanel(
    filter: FilterState,
    options: Resource<u32, Result<FilterOptions, ApiError>>,
    on_retry: Callback<()>,
) -> impl IntoView {
    let options_error = Signal::derive(move || options.get().and_then(Result::err));

    view! {
        <section class="bg-surface-elevated shadow rounded-lg p-4 space-y-3">
            <div class="grid grid-cols-1 md:grid-cols-4 gap-3">
                <label class="flex flex-col gap-1 text-sm">
                    <span class="font-medium text-fg">"Year"</span>
                    <select
                        class="border rounded px-2 py-1"
                        prop:value=move || filter.year.get()
                        on:change=move |ev| filter.year.set(event_target_value(&ev))
                    >
                        {move || {
                            year_options(current_year(), &filter.year.get())
                                .into_iter()
                                .map(|year| view! { <option value=year.to_string()>{year}</option> })
                                .collect_view()
                        }}
                    </select>
                </label>
                <MasterSelect
                    label="Duty"
                    placeholder="Select duty"
                    list=OptionList::Duties
                    selected=filter.responsibility_type_id
                    options=options
                />
                <MasterSelect
                    label="Class"
                    placeholder="Select class"
                    list=OptionList::Classes
                    selected=filter.class_id
                    options=options
                />
                <MasterSelect
                    label="Subject"
                    placeholder="Select subject"
                    list=OptionList::Subjects
                    selected=filter.subject_id
                    options=options
                />
            </div>
            <InlineErrorMessage error=options_error on_retry=on_retry />
            <button
                type="button"
                class="text-sm text-fg-muted underline"
                on:click=move |_| filter.reset()
            >
                "Clear filters"
            </button>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_options_cover_recent_and_next_year() {
        assert_eq!(year_options(2025, "2025"), vec![2026, 2025, 2024, 2023, 2022]);
    }

    #[test]
    fn out_of_window_selection_is_kept() {
        assert_eq!(
            year_options(2025, "2019"),
            vec![2026, 2025, 2024, 2023, 2022, 2019]
        );
        assert_eq!(year_options(2025, "").len(), 5);
    }
}
