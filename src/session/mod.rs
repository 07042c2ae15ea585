//! Authentication state for the running application
//!
//! Sign-in is mocked: any credentials succeed after an artificial delay.
//! The resulting user and token are mirrored to durable storage and
//! restored on the next start.

pub mod model;
pub mod store;

pub use model::{LoginCredentials, RegisterCredentials, Session, SessionAction, User};
pub use store::SessionStore;
