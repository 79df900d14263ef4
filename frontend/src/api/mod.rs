mod assignments;
pub(crate) mod auth;
pub mod client;
mod leaves;
mod master_data;
mod reports;
mod routines;
mod teachers;
pub mod types;

pub use client::*;
pub use types::*;
