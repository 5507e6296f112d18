//! IS-IS configuration variable synthesis.
//!
//! Turns a device-agnostic IS-IS intent (one instance, or one interface
//! attached to an instance) into the flat `NAME = value` table a vendor
//! template consumes, and optionally renders that template.

pub mod config;
pub mod derive;
pub mod error;
pub mod flatten;
pub mod handlers;
pub mod intent;
pub mod inventory;
pub mod models;
pub mod render;
pub mod router;
pub mod secrets;
pub mod synth;
pub mod validate;

use config::Config;
use render::Renderer;
use secrets::SecretStore;

pub use error::{IsisError, Result};
pub use synth::{dispatch, synthesize_instance, synthesize_interface, SynthesisContext, Vendor};

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub secrets: SecretStore,
    /// `None` when no templates could be loaded; render endpoints answer 503
    pub renderer: Option<Renderer>,
}
