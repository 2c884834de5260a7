//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (main.rs) and the domain and
//! Open Library layers. It never calls Zellij itself.
//!
//! ```text
//! Keys / Web Results → Events → Event Handler → State Mutations → Actions → web_request
//!                                     ↑                                          ↓
//!                                     └──────────── SearchCompleted ─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Focus ring of the search controls
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::Focus;
pub use state::AppState;
