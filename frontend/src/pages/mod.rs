pub mod assign_duty;
pub mod home;
pub mod login;
pub mod teachers;
