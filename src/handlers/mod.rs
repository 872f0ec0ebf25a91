pub mod assets;
pub mod catalog;
