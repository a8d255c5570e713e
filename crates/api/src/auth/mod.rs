//! Authentication primitives: password hashing, JWT handling, and the token
//! service that ties refresh tokens to stored sessions.

pub mod jwt;
pub mod password;
pub mod tokens;
