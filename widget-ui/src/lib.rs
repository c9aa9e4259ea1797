pub mod api;
pub mod components;
pub mod config;
pub mod emphasis;
pub mod interop;
pub mod landing;
pub mod state;

pub use api::*;
pub use components::*;
pub use config::*;
pub use interop::*;
pub use landing::*;
pub use state::*;
