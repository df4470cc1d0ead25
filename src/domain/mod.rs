pub mod course;
pub mod exam;
pub mod narration;
pub mod user;
