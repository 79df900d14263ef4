use leptos::ev::KeyboardEvent;
use leptos::*;

fn label_or(text: String, fallback: &str) -> String {
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

#[component]
pub fn ConfirmDialog(
    #[prop(into)] is_open: Signal<bool>,
    #[prop(into)] title: MaybeSignal<String>,
    #[prop(into)] message: MaybeSignal<String>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(optional, into)] confirm_label: MaybeSignal<String>,
    #[prop(optional, into)] confirm_disabled: MaybeSignal<bool>,
    #[prop(optional)] destructive: bool,
) -> impl IntoView {
    let confirm_class = if destructive {
        "rounded-md px-4 py-2 text-sm font-semibold bg-action-danger-bg text-action-danger-text disabled:opacity-50"
    } else {
        "rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text disabled:opacity-50"
    };
    let confirm_text = Signal::derive(move || label_or(confirm_label.get(), "Confirm"));
    let title = Signal::derive(move || title.get());
    let message = Signal::derive(move || message.get());
    let confirm_disabled = Signal::derive(move || confirm_disabled.get());

    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Close"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| on_cancel.call(())
                ></button>
                <div
                    class="relative z-[71] w-full max-w-md rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            on_cancel.call(());
                        }
                    }
                >
                    <h2 class="text-lg font-semibold text-fg">{move || title.get()}</h2>
                    <p class="text-sm text-fg-muted">{move || message.get()}</p>
                    <div class="flex justify-end gap-2">
                        <button
                            type="button"
                            class="rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg"
                            on:click=move |_| on_cancel.call(())
                        >
                            "Cancel"
                        </button>
                        <button
                            type="button"
                            class=confirm_class
                            disabled=move || confirm_disabled.get()
                            on:click=move |_| on_confirm.call(())
                        >
                            {move || confirm_text.get()}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn confirm_dialog_renders_with_default_labels() {
        let html = render_to_string(move || {
            view! {
                <ConfirmDialog
                    is_open=Signal::derive(|| true)
                    title="Remove duty"
                    message="Remove this assignment?"
                    on_confirm=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                    destructive=true
                />
            }
        });
        assert!(html.contains("role=\"dialog\""));
        assert!(html.contains("Remove this assignment?"));
        assert!(html.contains("Confirm"));
        assert!(html.contains("Cancel"));
    }

    #[test]
    fn closed_dialog_renders_nothing() {
        let html = render_to_string(move || {
            view! {
                <ConfirmDialog
                    is_open=Signal::derive(|| false)
                    title="Remove duty"
                    message="hidden-message"
                    on_confirm=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                    confirm_label="Delete"
                />
            }
        });
        assert!(!html.contains("hidden-message"));
    }

    #[test]
    fn dialog_follows_signal_driven_text_and_disabled_state() {
        let html = render_to_string(move || {
            let (message, _) = create_signal("Remove Invigilator (Assigned)?".to_string());
            view! {
                <ConfirmDialog
                    is_open=Signal::derive(|| true)
                    title=Signal::derive(|| "Remove assignment".to_string())
                    message=message
                    on_confirm=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                    confirm_label="Remove"
                    confirm_disabled=true
                />
            }
        });
        assert!(html.contains("Remove assignment"));
        assert!(html.contains("Remove Invigilator (Assigned)?"));
        assert!(html.contains("disabled"));
    }
}
