pub mod animation;
pub mod bus;
pub mod camera;
pub mod color;
pub mod config;
pub mod demo;
pub mod error;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod node;
pub mod overlay;
pub mod pitch;
pub mod recognize;
pub mod selection;
pub mod session;
pub mod view;
