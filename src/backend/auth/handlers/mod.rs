//! Authentication Handlers Module
//!
//! HTTP handlers for the account endpoints, one submodule per operation.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs             - Module exports and documentation
//! ├── types.rs           - Request and response types
//! ├── register.rs        - POST /register
//! ├── login.rs           - POST /login
//! ├── refresh.rs         - POST /token/refresh
//! ├── logout.rs          - POST /logout
//! ├── update.rs          - PUT /update (JSON or multipart)
//! ├── delete.rs          - DELETE /delete
//! ├── detail.rs          - GET /detail
//! └── change_password.rs - PUT /change-password
//! ```
//!
//! Every handler except register, login and refresh sits behind
//! `auth_middleware` and reads the caller through the `AuthUser` extractor.

/// Request and response types
pub mod types;

pub mod register;
pub mod login;
pub mod refresh;
pub mod logout;
pub mod update;
pub mod delete;
pub mod detail;
pub mod change_password;

pub use change_password::change_password;
pub use delete::delete_account;
pub use detail::detail;
pub use login::login;
pub use logout::logout;
pub use refresh::refresh_token;
pub use register::register;
pub use update::update_profile;
