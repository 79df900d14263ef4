use crate::{
    api::{auth::stored_user, ApiClient, ApiError, LoginRequest, UserProfile},
    pages::login::repository::LoginRepository,
    utils::{storage, time},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use leptos::*;
use std::rc::Rc;

pub type SessionContext = (ReadSignal<SessionState>, WriteSignal<SessionState>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Incharge,
    Teacher,
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "incharge" | "in-charge" | "in_charge" => Role::Incharge,
            _ => Role::Teacher,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Incharge => "In-charge",
            Role::Teacher => "Teacher",
        }
    }

    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            Role::Admin => ADMIN_CAPABILITIES,
            Role::Incharge => INCHARGE_CAPABILITIES,
            Role::Teacher => TEACHER_CAPABILITIES,
        }
    }

    pub fn can(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    AssignDuties,
    DeleteAssignments,
    ManageTeachers,
    ManageMasterData,
    ManageLeaves,
    ViewReports,
    ManageUsers,
}

const ADMIN_CAPABILITIES: &[Capability] = &[
    Capability::AssignDuties,
    Capability::DeleteAssignments,
    Capability::ManageTeachers,
    Capability::ManageMasterData,
    Capability::ManageLeaves,
    Capability::ViewReports,
    Capability::ManageUsers,
];

const INCHARGE_CAPABILITIES: &[Capability] = &[
    Capability::AssignDuties,
    Capability::DeleteAssignments,
    Capability::ManageTeachers,
    Capability::ManageLeaves,
    Capability::ViewReports,
];

const TEACHER_CAPABILITIES: &[Capability] = &[Capability::ViewReports];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<UserProfile>,
    pub token_expires_at: Option<i64>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl SessionState {
    /// Rebuilds the session from persisted storage. An expired or malformed
    /// token is dropped along with the cached profile.
    pub fn restore(now_epoch_seconds: i64) -> Self {
        let Some(token) = storage::access_token() else {
            return Self::default();
        };
        match token_expiry(&token) {
            Some(exp) if exp > now_epoch_seconds => Self {
                user: stored_user(),
                token_expires_at: Some(exp),
                is_authenticated: true,
                loading: false,
            },
            _ => {
                log::info!("Discarding expired or unreadable session token");
                storage::clear_session();
                Self::default()
            }
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| Role::parse(&user.role))
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.is_authenticated && self.role().is_some_and(|role| role.can(capability))
    }

    pub fn display_name(&self) -> Option<String> {
        self.user.as_ref().map(|user| {
            user.name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| user.username.clone())
        })
    }

    fn signed_in(user: UserProfile, token: &str) -> Self {
        Self {
            user: Some(user),
            token_expires_at: token_expiry(token),
            is_authenticated: true,
            loading: false,
        }
    }
}

/// Reads `exp` from the payload segment of a JWT. The signature is not
/// checked; the server does that on every call.
pub fn token_expiry(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("exp")?.as_i64()
}

fn create_session_context() -> SessionContext {
    let restored = SessionState::restore(time::now_epoch_seconds());
    let needs_profile = restored.is_authenticated && restored.user.is_none();
    let (session, set_session) = create_signal(SessionState {
        loading: needs_profile,
        ..restored
    });

    if needs_profile {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        spawn_local(async move {
            match api.get_me().await {
                Ok(user) => set_session.update(|state| {
                    state.user = Some(user);
                    state.loading = false;
                }),
                Err(err) => {
                    log::warn!("Could not load the current user: {}", err);
                    set_session.set(SessionState::default());
                }
            }
        });
    }

    (session, set_session)
}

#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    provide_context::<SessionContext>(create_session_context());
    view! { <>{children()}</> }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_else(|| create_signal(SessionState::default()))
}

pub async fn login_request(
    request: LoginRequest,
    repo: &LoginRepository,
    set_session: WriteSignal<SessionState>,
) -> Result<(), ApiError> {
    set_session.update(|state| state.loading = true);
    match repo.login(request).await {
        Ok(response) => {
            set_session.set(SessionState::signed_in(response.user, &response.token));
            Ok(())
        }
        Err(err) => {
            set_session.update(|state| state.loading = false);
            Err(err)
        }
    }
}

pub async fn logout(
    repo: &LoginRepository,
    set_session: WriteSignal<SessionState>,
) -> Result<(), ApiError> {
    let result = repo.logout().await;
    set_session.set(SessionState::default());
    result
}

fn login_repository() -> LoginRepository {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    LoginRepository::new_with_client(Rc::new(api))
}

pub fn use_login_action() -> Action<LoginRequest, Result<(), ApiError>> {
    let (_, set_session) = use_session();
    let repo = login_repository();
    create_action(move |request: &LoginRequest| {
        let request = request.clone();
        let repo = repo.clone();
        async move { login_request(request, &repo, set_session).await }
    })
}

pub fn use_logout_action() -> Action<(), Result<(), ApiError>> {
    let (_, set_session) = use_session();
    let repo = login_repository();
    create_action(move |_: &()| {
        let repo = repo.clone();
        async move { logout(&repo, set_session).await }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{token_with_exp, user_with_role};

    #[test]
    fn role_parsing_defaults_to_teacher() {
        assert_eq!(Role::parse("Admin"), Role::Admin);
        assert_eq!(Role::parse(" incharge "), Role::Incharge);
        assert_eq!(Role::parse("principal"), Role::Teacher);
        assert_eq!(Role::parse(""), Role::Teacher);
    }

    #[test]
    fn capability_sets_follow_role() {
        assert!(Role::Admin.can(Capability::ManageUsers));
        assert!(Role::Admin.can(Capability::ManageMasterData));
        assert!(Role::Incharge.can(Capability::AssignDuties));
        assert!(Role::Incharge.can(Capability::DeleteAssignments));
        assert!(!Role::Incharge.can(Capability::ManageUsers));
        assert!(!Role::Incharge.can(Capability::ManageMasterData));
        assert_eq!(Role::Teacher.capabilities(), &[Capability::ViewReports]);
    }

    #[test]
    fn token_expiry_reads_exp_claim() {
        assert_eq!(token_expiry(&token_with_exp(1_900_000_000)), Some(1_900_000_000));
        assert_eq!(token_expiry("not-a-jwt"), None);
        assert_eq!(token_expiry("a.%%%.c"), None);
    }

    #[test]
    fn restore_accepts_live_token_and_drops_expired_one() {
        storage::clear_session();
        assert_eq!(SessionState::restore(1_000), SessionState::default());

        storage::set_item(storage::ACCESS_TOKEN_KEY, &token_with_exp(2_000)).unwrap();
        let profile = user_with_role("incharge");
        storage::set_item(
            storage::CURRENT_USER_KEY,
            &serde_json::to_string(&profile).unwrap(),
        )
        .unwrap();
        let live = SessionState::restore(1_000);
        assert!(live.is_authenticated);
        assert_eq!(live.token_expires_at, Some(2_000));
        assert_eq!(live.role(), Some(Role::Incharge));

        let expired = SessionState::restore(3_000);
        assert!(!expired.is_authenticated);
        assert!(storage::access_token().is_none());
        assert!(storage::get_item(storage::CURRENT_USER_KEY).is_none());
    }

    #[test]
    fn capabilities_require_authentication() {
        let state = SessionState {
            user: Some(user_with_role("admin")),
            is_authenticated: false,
            ..SessionState::default()
        };
        assert!(!state.can(Capability::AssignDuties));
        let signed_in = SessionState {
            is_authenticated: true,
            ..state
        };
        assert!(signed_in.can(Capability::AssignDuties));
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let mut user = user_with_role("teacher");
        user.name = Some("  ".into());
        let state = SessionState {
            user: Some(user),
            ..SessionState::default()
        };
        assert_eq!(state.display_name().as_deref(), Some("teacher-user"));
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers::token_with_exp, ssr::with_runtime};
    use httpmock::prelude::*;

    #[test]
    fn use_session_returns_default_without_context() {
        with_runtime(|| {
            let (session, _) = use_session();
            let snapshot = session.get_untracked();
            assert!(!snapshot.is_authenticated);
            assert!(snapshot.user.is_none());
        });
    }

    #[tokio::test]
    async fn login_and_logout_update_session_state() {
        storage::clear_session();
        let token = token_with_exp(4_000_000_000);
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(200).json_body(serde_json::json!({
                "token": token.as_str(),
                "user": { "_id": "u1", "username": "ayesha", "name": "Ayesha", "role": "admin" }
            }));
        });
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/logout");
            then.status(200).json_body(serde_json::json!({}));
        });

        let runtime = create_runtime();
        let (session, set_session) = create_signal(SessionState::default());
        let repo = LoginRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(
            server.url("/api"),
        )));

        login_request(
            LoginRequest {
                username: "ayesha".into(),
                password: "secret".into(),
            },
            &repo,
            set_session,
        )
        .await
        .unwrap();
        let snapshot = session.get_untracked();
        assert!(snapshot.is_authenticated);
        assert_eq!(snapshot.token_expires_at, Some(4_000_000_000));
        assert!(snapshot.can(Capability::ManageUsers));

        logout(&repo, set_session).await.unwrap();
        assert_eq!(session.get_untracked(), SessionState::default());
        assert!(storage::access_token().is_none());
        runtime.dispose();
    }

    #[tokio::test]
    async fn failed_login_keeps_session_signed_out() {
        storage::clear_session();
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(400)
                .json_body(serde_json::json!({ "message": "Invalid credentials" }));
        });

        let runtime = create_runtime();
        let (session, set_session) = create_signal(SessionState::default());
        let repo = LoginRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(
            server.url("/api"),
        )));
        let err = login_request(
            LoginRequest {
                username: "x".into(),
                password: "y".into(),
            },
            &repo,
            set_session,
        )
        .await
        .unwrap_err();
        assert_eq!(err.error, "Invalid credentials");
        let snapshot = session.get_untracked();
        assert!(!snapshot.is_authenticated);
        assert!(!snapshot.loading);
        runtime.dispose();
    }
}
