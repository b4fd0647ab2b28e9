pub mod app;
pub mod configure;
pub mod input;
pub mod render;
