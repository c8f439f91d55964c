//! Middleware for cross-cutting request concerns.
//!
//! - [`auth`]: the bearer-token gate and the `AuthUser` extractor
//!
//! # Authentication Flow
//!
//! 1. Client sends a request with an `Authorization: Bearer <token>` header
//! 2. The `require_auth` middleware verifies the JWT on every route nested
//!    under the protected subtree and stores the claims in request
//!    extensions (fail closed: routes are protected unless they are
//!    registered on the public router)
//! 3. Handlers that need the identity take an [`auth::AuthUser`] argument,
//!    which reads the already-verified claims without a second lookup

pub mod auth;
