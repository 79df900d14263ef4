pub mod panel;
pub mod repository;
pub mod view_model;

pub use panel::TeachersPage;
