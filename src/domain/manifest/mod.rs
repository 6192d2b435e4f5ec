pub mod builder;
pub mod dto;
pub mod model;
pub mod render;
pub mod service;
pub mod validation;
