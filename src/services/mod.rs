//! Service layer for business logic and orchestration.
//!
//! Services sit between the repository layer and the HTTP handlers: the cart
//! admission policy, account management, catalog loading, and the
//! authentication primitives they share.

pub mod account;
pub mod auth;
pub mod cart;
pub mod catalog;

pub use account::{login, register, AccountError};
pub use auth::{hash_password, issue_token, verify_password, verify_token, AuthError, Claims};
pub use cart::{AdmissionError, CartPolicy, DEFAULT_CREDIT_CEILING};
pub use catalog::{load_catalog_file, parse_catalog_json_str};
