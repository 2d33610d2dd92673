//! Authentication adapters.
//!
//! - `JwtSessionValidator` - local HS256 validation of access tokens
//! - `SupabaseAuthClient` - email/password sign-in and sign-up
//! - `mock` - test implementations that need no identity service

mod jwt;
mod mock;
mod supabase;

pub use jwt::{AccessClaims, JwtSessionValidator, DEFAULT_AUDIENCE};
pub use mock::{MockAuthProvider, MockSessionValidator};
pub use supabase::SupabaseAuthClient;
