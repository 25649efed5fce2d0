//! Client-side session: who is signed in and what that allows.
//!
//! - [`store`]: the credential store and its durable mirror
//! - [`claims`]: local, unverified decoding of the token's claims
//! - [`bootstrap`]: startup reconciliation of persisted credentials
//! - [`guard`]: protected-route gating
//! - [`navigator`]: the navigation seam used by the guard and the 401 handler
//! - [`nav`]: role-gated admin menu

pub mod bootstrap;
pub mod claims;
pub mod guard;
pub mod nav;
pub mod navigator;
pub mod store;

pub use bootstrap::{BootstrapOutcome, SessionBootstrap};
pub use claims::{TokenClaims, decode_claims};
pub use guard::{GuardPolicy, GuardState, Resolution, RouteGuard};
pub use nav::{AdminNav, NavEntry};
pub use navigator::{Navigator, Router};
pub use store::{CredentialStore, Session, SessionCommand};
