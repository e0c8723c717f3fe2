pub mod dto;
pub mod screen;
pub mod view;
