pub mod animation;
pub mod controller;
pub mod error;
pub mod session;
pub mod state;
pub mod traits;
