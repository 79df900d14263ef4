use crate::{
    components::layout::LoadingSpinner,
    state::session::{use_session, Capability, SessionState},
};
use leptos::*;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuardOutcome {
    Pending,
    Render,
    Redirect(&'static str),
}

fn auth_outcome(state: &SessionState) -> GuardOutcome {
    if state.loading {
        GuardOutcome::Pending
    } else if state.is_authenticated {
        GuardOutcome::Render
    } else {
        GuardOutcome::Redirect(LOGIN_PATH)
    }
}

fn capability_outcome(state: &SessionState, capability: Capability) -> GuardOutcome {
    match auth_outcome(state) {
        GuardOutcome::Render if !state.can(capability) => GuardOutcome::Redirect(HOME_PATH),
        other => other,
    }
}

fn redirect_to(target: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.location().set_href(target);
    }
}

fn guarded(outcome: Memo<GuardOutcome>, children: ChildrenFn) -> impl IntoView {
    create_effect(move |_| {
        if let GuardOutcome::Redirect(target) = outcome.get() {
            redirect_to(target);
        }
    });
    view! {
        <Show
            when=move || outcome.get() == GuardOutcome::Render
            fallback=move || {
                if outcome.get() == GuardOutcome::Pending {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (session, _) = use_session();
    let outcome = create_memo(move |_| auth_outcome(&session.get()));
    guarded(outcome, children)
}

#[component]
pub fn RequireCapability(capability: Capability, children: ChildrenFn) -> impl IntoView {
    let (session, _) = use_session();
    let outcome = create_memo(move |_| capability_outcome(&session.get(), capability));
    guarded(outcome, children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::user_with_role;

    fn state(role: Option<&str>, loading: bool) -> SessionState {
        SessionState {
            is_authenticated: role.is_some(),
            user: role.map(user_with_role),
            token_expires_at: None,
            loading,
        }
    }

    #[test]
    fn auth_guard_waits_then_redirects_anonymous_users() {
        assert_eq!(auth_outcome(&state(None, true)), GuardOutcome::Pending);
        assert_eq!(auth_outcome(&state(None, false)), GuardOutcome::Redirect(LOGIN_PATH));
        assert_eq!(auth_outcome(&state(Some("teacher"), false)), GuardOutcome::Render);
    }

    #[test]
    fn capability_guard_sends_unprivileged_users_home() {
        assert_eq!(
            capability_outcome(&state(Some("teacher"), false), Capability::AssignDuties),
            GuardOutcome::Redirect(HOME_PATH)
        );
        assert_eq!(
            capability_outcome(&state(Some("incharge"), false), Capability::AssignDuties),
            GuardOutcome::Render
        );
        assert_eq!(
            capability_outcome(&state(None, false), Capability::AssignDuties),
            GuardOutcome::Redirect(LOGIN_PATH)
        );
    }
}
