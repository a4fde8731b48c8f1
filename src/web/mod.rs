pub mod handlers;
pub mod server;
pub mod template;

pub use server::{create_app, WebServer};
