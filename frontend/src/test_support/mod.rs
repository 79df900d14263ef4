#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{
        Assignment, AssignmentStatus, Ref, ResponsibilityType, Teacher, UserProfile,
    };
    use crate::state::session::{SessionContext, SessionState};
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    use leptos::*;

    pub fn user_with_role(role: &str) -> UserProfile {
        UserProfile {
            id: format!("u-{}", role),
            username: format!("{}-user", role),
            name: Some(format!("{} user", role)),
            role: role.into(),
        }
    }

    /// Unsigned JWT whose payload carries only `exp`.
    pub fn token_with_exp(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp));
        format!("{}.{}.signature", header, payload)
    }

    pub fn provide_session(user: Option<UserProfile>, loading: bool) -> SessionContext {
        let ctx = create_signal(SessionState {
            is_authenticated: user.is_some(),
            user,
            token_expires_at: None,
            loading,
        });
        provide_context::<SessionContext>(ctx);
        ctx
    }

    pub fn teacher(id: &str, name: &str) -> Teacher {
        Teacher {
            id: id.into(),
            teacher_id: Some(format!("T-{}", id)),
            name: name.into(),
            phone: None,
            campus: None,
            designation: None,
            is_active: true,
        }
    }

    pub fn assignment(id: &str, duty_id: Option<&str>, duty_name: &str, status: &str) -> Assignment {
        Assignment {
            id: id.into(),
            teacher: None,
            responsibility_type: Some(Ref::Populated(ResponsibilityType {
                id: duty_id.unwrap_or_default().into(),
                name: duty_name.into(),
                category: Default::default(),
            })),
            target_class: None,
            target_subject: None,
            year: 2025,
            status: AssignmentStatus::from(status.to_string()),
        }
    }
}
