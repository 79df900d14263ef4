pub mod components;
pub mod filter;
pub mod panel;
pub mod repository;
pub mod review;
pub mod view_model;

pub use panel::AssignDutyPage;
