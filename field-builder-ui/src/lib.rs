pub mod api;
pub mod builder;
pub mod components;

pub use api::*;
pub use builder::*;
pub use components::*;
