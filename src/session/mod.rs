//! Authentication and session lifecycle.
//!
//! This module provides Argon2 password hashing and the [`SessionStore`], which opens a
//! [`Session`] on login and closes it on logout or expiry.

mod credentials;
mod store;

pub use credentials::{Credentials, hash_password, validate_password_hash, verify_password};
pub use store::{Session, SessionStore};
