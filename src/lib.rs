pub mod config;
pub mod event;
pub mod http;
pub mod media;
pub mod studio;
pub mod ui;
pub mod util;
