//! The classification pipeline facade.
//!
//! [`PlantIdentifier`] ties the model loader, image preprocessor, inference
//! engine adapter, and result decoder together behind a fire-and-forget
//! classify API with callback delivery.

mod cancel;
mod config;
mod identifier;

pub use cancel::CancelToken;
pub use config::PlantIdentifierConfig;
pub use identifier::PlantIdentifier;
