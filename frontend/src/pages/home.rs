use crate::{
    components::layout::{visible_nav_links, Layout},
    state::session::use_session,
};
use leptos::*;

#[component]
pub fn HomePage() -> impl IntoView {
    let (session, _) = use_session();
    let links = move || visible_nav_links(&session.get());
    let greeting = move || format!("Welcome, {}", session.get().display_name().unwrap_or_default());

    view! {
        <Layout>
            <div class="max-w-3xl mx-auto py-12 space-y-6">
                <h1 class="text-3xl font-extrabold text-fg">{greeting}</h1>
                <Show
                    when=move || !links().is_empty()
                    fallback=|| view! {
                        <p class="text-fg-muted">"Your account can view reports only."</p>
                    }
                >
                    <div class="grid grid-cols-1 sm:grid-cols-2 gap-4">
                        <For
                            each=links
                            key=|link| link.href
                            children=|link| view! {
                                <a href=link.href class="block rounded-lg shadow p-6 bg-surface-elevated text-fg font-semibold">
                                    {link.label}
                                </a>
                            }
                        />
                    </div>
                </Show>
            </div>
        </Layout>
    }
}
