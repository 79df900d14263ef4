use super::view_model::use_login_view_model;
use crate::components::error::InlineErrorMessage;
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn LoginPanel() -> impl IntoView {
    let vm = use_login_view_model();
    let pending = vm.login_action.pending();
    let error = vm.error;

    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface-muted py-12 px-4">
            <div class="max-w-md w-full space-y-8">
                <div>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">"Sign in to DutyDesk"</h2>
                    <p class="mt-2 text-center text-sm text-fg-muted">"Duty assignment for teaching staff"</p>
                </div>
                <form
                    class="mt-8 space-y-6"
                    on:submit=move |ev: SubmitEvent| {
                        ev.prevent_default();
                        vm.submit();
                    }
                >
                    <div class="rounded-md shadow-sm space-y-2">
                        <label for="username" class="sr-only">"Username"</label>
                        <input
                            id="username"
                            name="username"
                            type="text"
                            autocomplete="username"
                            class="block w-full px-3 py-2 border border-border rounded-md"
                            placeholder="Username"
                            prop:value=move || vm.form.username.get()
                            on:input=move |ev| vm.form.username.set(event_target_value(&ev))
                        />
                        <label for="password" class="sr-only">"Password"</label>
                        <input
                            id="password"
                            name="password"
                            type="password"
                            autocomplete="current-password"
                            class="block w-full px-3 py-2 border border-border rounded-md"
                            placeholder="Password"
                            prop:value=move || vm.form.password.get()
                            on:input=move |ev| vm.form.password.set(event_target_value(&ev))
                        />
                    </div>
                    <InlineErrorMessage error=error />
                    <button
                        type="submit"
                        disabled=move || pending.get()
                        class="w-full flex justify-center py-2 px-4 rounded-md text-sm font-medium bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                    >
                        {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
