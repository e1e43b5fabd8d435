pub mod collision;
pub mod config;
pub mod entity;
pub mod game;
pub mod grid;
pub mod input;
pub mod snake;
pub mod term;

pub type TermInt = u16;
