//! Self-contained session keys: the signed credential, its codec, and the clock used for
//! expiry decisions.
//!
//! A [`SessionKey`] is an HS256-signed JWT whose claims are exactly a
//! [`TokenRecord`](crate::auth::TokenRecord). The [`SessionCodec`] is keyed by the client
//! secret, so any process holding the same configuration can verify keys minted by another
//! one without shared storage. Expiry is advisory: decoding never fails because a key is
//! stale, letting callers pull the refresh token out of an expired key.

pub mod clock;
pub mod codec;
pub mod key;

pub use clock::*;
pub use codec::*;
pub use key::*;
