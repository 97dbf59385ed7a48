//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `onboarding_form`: Invite provider wizard

mod field_renderer;
mod onboarding_form;

pub use onboarding_form::draw_invite_provider;
