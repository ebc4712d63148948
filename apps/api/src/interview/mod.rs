//! Interview session domain: the turn-taking flow state machine, the session
//! engine that executes its effects, the in-memory store, and the HTTP
//! surface.

pub mod flow;
pub mod handlers;
pub mod session;
pub mod sources;
pub mod store;

pub use flow::FlowPolicy;
pub use store::SessionStore;
