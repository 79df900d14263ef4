use crate::state::toast::use_toasts;
use leptos::*;

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = use_toasts();
    view! {
        <div class="fixed bottom-4 right-4 z-[80] space-y-2" aria-live="polite">
            <For
                each=move || toasts.toasts().get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.css_class() role="status">
                            <span>{toast.message}</span>
                            <button
                                type="button"
                                class="ml-3 text-xs underline"
                                on:click=move |_| toasts.dismiss(id)
                            >
                                "Dismiss"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
