pub mod delete;
pub mod detect;
pub mod doctor;
pub mod list;
pub mod patterns;
