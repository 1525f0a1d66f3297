pub mod pagination;
pub mod slider;
pub mod user;
