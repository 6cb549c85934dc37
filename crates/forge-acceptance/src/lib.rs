//! Acceptance suite for a forge repository service.
//!
//! Binds Gherkin step phrases to the forge REST API and to real git
//! operations against a scratch checkout, then cross-checks the state both
//! paths observe.

pub mod steps;
pub mod world;

pub use steps::registry;
pub use world::AcceptanceWorld;
