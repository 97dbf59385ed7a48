//! Application state module

mod app_state;
mod notices;
pub mod onboarding;
mod returns;
mod route;

pub use app_state::*;
pub use notices::*;
pub use returns::*;
pub use route::*;
