//! Authentication for Rolodex.
//!
//! bcrypt password hashing (on the blocking pool), JWT issuing and
//! validation, and a repository abstraction over user persistence.

pub mod error;
pub mod jwt;
pub mod password;
pub mod settings;
pub mod user_repo;

pub use error::{AuthError, AuthResult};
pub use settings::AuthSettings;
pub use jwt::{create_token, validate_token, Claims};
pub use password::{hash_password, validate_password, verify_password};
pub use user_repo::{StoreUserRepo, UserRepository};
