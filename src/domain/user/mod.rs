pub mod model;
pub mod password;

pub use model::User;
pub use password::{hash_password, verify_password};
