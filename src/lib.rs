pub mod app;
pub mod collision;
pub mod config;
pub mod entity;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod snake;
pub mod spawn;
pub mod terminal_runtime;
pub mod theme;
