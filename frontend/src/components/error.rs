use crate::api::ApiError;
use leptos::*;

/// Server-supplied validation messages, if the error carries any.
fn detail_messages(error: &ApiError) -> Vec<String> {
    error
        .details
        .as_ref()
        .and_then(|details| details.get("errors"))
        .and_then(|errors| errors.as_array())
        .map(|errors| {
            errors
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[component]
pub fn InlineErrorMessage(
    #[prop(into)] error: Signal<Option<ApiError>>,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2" role="alert">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                <ul class="list-disc list-inside text-sm">
                    {move || {
                        error
                            .get()
                            .map(|e| detail_messages(&e))
                            .unwrap_or_default()
                            .into_iter()
                            .map(|message| view! { <li>{message}</li> })
                            .collect_view()
                    }}
                </ul>
                {on_retry.map(|retry| view! {
                    <button
                        type="button"
                        class="text-sm underline"
                        on:click=move |_| retry.call(())
                    >
                        "Retry"
                    </button>
                })}
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;
    use serde_json::json;

    #[test]
    fn inline_error_renders_validation_details() {
        let html = render_to_string(move || {
            let error = ApiError {
                error: "Validation failed".into(),
                code: ApiError::VALIDATION_ERROR.into(),
                details: Some(json!({ "errors": ["Year is required", "Class is required"] })),
            };
            let signal = create_rw_signal(Some(error));
            view! { <InlineErrorMessage error=signal /> }
        });
        assert!(html.contains("Validation failed"));
        assert!(html.contains("Year is required"));
        assert!(html.contains("Class is required"));
        assert!(!html.contains("Retry"));
    }

    #[test]
    fn inline_error_offers_retry_when_given_callback() {
        let html = render_to_string(move || {
            let signal = create_rw_signal(Some(ApiError::request_failed("Network down")));
            view! { <InlineErrorMessage error=signal on_retry=Callback::new(|_| {}) /> }
        });
        assert!(html.contains("Network down"));
        assert!(html.contains("Retry"));
    }

    #[test]
    fn inline_error_hidden_without_error() {
        let html = render_to_string(move || {
            let signal = create_rw_signal(None::<ApiError>);
            view! { <InlineErrorMessage error=signal /> }
        });
        assert!(!html.contains("role=\"alert\""));
    }
}
