use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::guard::{RequireAuth, RequireCapability},
    pages::{
        assign_duty::AssignDutyPage, home::HomePage, login::LoginPage, teachers::TeachersPage,
    },
    state::{
        session::{Capability, SessionProvider},
        toast::provide_toasts,
    },
};

pub const ROUTE_PATHS: &[&str] = &["/", "/login", "/assign-duty", "/teachers"];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &["/", "/assign-duty", "/teachers"];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/login"];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(ApiClient::new());
    provide_toasts();
    provide_meta_context();
    view! {
        <Title text="DutyDesk"/>
        <SessionProvider>
            <Router>
                <Routes>
                    <Route path="/" view=ProtectedHome/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/assign-duty" view=ProtectedAssignDuty/>
                    <Route path="/teachers" view=ProtectedTeachers/>
                </Routes>
            </Router>
        </SessionProvider>
    }
}

#[component]
fn ProtectedHome() -> impl IntoView {
    view! { <RequireAuth><HomePage/></RequireAuth> }
}

#[component]
fn ProtectedAssignDuty() -> impl IntoView {
    view! {
        <RequireCapability capability=Capability::AssignDuties>
            <AssignDutyPage/>
        </RequireCapability>
    }
}

#[component]
fn ProtectedTeachers() -> impl IntoView {
    view! {
        <RequireCapability capability=Capability::ManageTeachers>
            <TeachersPage/>
        </RequireCapability>
    }
}
