use super::utils::{validate_credentials, LoginFormState};
use crate::{
    api::{ApiError, LoginRequest},
    state::session,
};
use leptos::*;

pub const AFTER_LOGIN_PATH: &str = "/assign-duty";

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub error: RwSignal<Option<ApiError>>,
    pub login_action: Action<LoginRequest, Result<(), ApiError>>,
}

impl LoginViewModel {
    pub fn submit(&self) {
        if self.login_action.pending().get_untracked() {
            return;
        }
        let username = self.form.username.get_untracked();
        let password = self.form.password.get_untracked();
        if let Err(msg) = validate_credentials(&username, &password) {
            self.error.set(Some(ApiError::validation(msg)));
            return;
        }
        self.error.set(None);
        self.login_action.dispatch(LoginRequest {
            username: username.trim().to_string(),
            password,
        });
    }
}

pub fn use_login_view_model() -> LoginViewModel {
    let form = LoginFormState::default();
    let error = create_rw_signal(None::<ApiError>);
    let login_action = session::use_login_action();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(()) => {
                    error.set(None);
                    form.password.set(String::new());
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(AFTER_LOGIN_PATH);
                    }
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    LoginViewModel {
        form,
        error,
        login_action,
    }
}
