pub mod api;
pub mod auth_handlers;
pub mod home;
pub mod slider_handlers;
