use crate::{
    components::toast::ToastHost,
    state::session::{self, use_session, Capability, SessionState},
};
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub requires: Capability,
}

pub const NAV_LINKS: &[NavLink] = &[
    NavLink {
        href: "/assign-duty",
        label: "Assign Duty",
        requires: Capability::AssignDuties,
    },
    NavLink {
        href: "/teachers",
        label: "Teachers",
        requires: Capability::ManageTeachers,
    },
];

/// Links the current session may follow, in menu order.
pub fn visible_nav_links(state: &SessionState) -> Vec<NavLink> {
    NAV_LINKS
        .iter()
        .copied()
        .filter(|link| state.can(link.requires))
        .collect()
}

#[component]
pub fn Header() -> impl IntoView {
    let (session, _) = use_session();
    let links = move || visible_nav_links(&session.get());
    let who = move || {
        let state = session.get();
        match (state.display_name(), state.role()) {
            (Some(name), Some(role)) => format!("{} ({})", name, role.label()),
            _ => String::new(),
        }
    };

    let logout_action = session::use_logout_action();
    let logout_pending = logout_action.pending();
    create_effect(move |_| {
        if logout_action.value().get().is_some() {
            if let Some(win) = web_sys::window() {
                let _ = win.location().set_href("/login");
            }
        }
    });
    let on_logout = move |_| {
        if !logout_pending.get_untracked() {
            logout_action.dispatch(());
        }
    };

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 flex justify-between items-center h-16">
                <h1 class="text-xl font-semibold text-fg">"Duty Desk"</h1>
                <nav class="flex items-center space-x-4">
                    <For
                        each=links
                        key=|link| link.href
                        children=move |link| view! {
                            <a href=link.href class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium">
                                {link.label}
                            </a>
                        }
                    />
                    <span class="text-sm text-fg-muted">{who}</span>
                    <button
                        on:click=on_logout
                        class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium disabled:opacity-50"
                        disabled=move || logout_pending.get()
                    >
                        "Log out"
                    </button>
                </nav>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                {children()}
            </main>
            <ToastHost/>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{provide_session, user_with_role};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn nav_links_follow_capabilities() {
        let admin = SessionState {
            user: Some(user_with_role("admin")),
            is_authenticated: true,
            ..SessionState::default()
        };
        assert_eq!(visible_nav_links(&admin).len(), 2);

        let teacher = SessionState {
            user: Some(user_with_role("teacher")),
            ..admin
        };
        assert!(visible_nav_links(&teacher).is_empty());
        assert!(visible_nav_links(&SessionState::default()).is_empty());
    }

    #[test]
    fn header_shows_links_and_user() {
        let html = render_to_string(move || {
            provide_session(Some(user_with_role("incharge")), false);
            view! { <Header /> }
        });
        assert!(html.contains("Assign Duty"));
        assert!(html.contains("Teachers"));
        assert!(html.contains("incharge user (In-charge)"));
    }

    #[test]
    fn layout_renders_children() {
        let html = render_to_string(move || {
            provide_session(Some(user_with_role("admin")), false);
            view! { <Layout><div>"child"</div></Layout> }
        });
        assert!(html.contains("child"));
    }

    #[test]
    fn renders_feedback_components() {
        let html = render_to_string(move || {
            view! {
                <div>
                    <LoadingSpinner />
                    <ErrorMessage message="Could not load duties" />
                </div>
            }
        });
        assert!(html.contains("animate-spin"));
        assert!(html.contains("Could not load duties"));
    }
}
