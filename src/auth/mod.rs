//! Authentication: password hashing, bearer-token issuance and
//! verification, and axum extractors that resolve the acting user.
//!
//! Tokens are stateless HS256 JWTs carrying the user id; every protected
//! request re-loads the user so deactivated accounts are cut off
//! immediately rather than at token expiry.

pub mod extract;
pub mod password;
pub mod token;

pub use extract::{AuthUser, MaybeAuthUser};
pub use token::TokenService;
