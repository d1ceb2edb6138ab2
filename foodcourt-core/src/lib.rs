pub mod board;
pub mod cart;
pub mod models;
pub mod pin;
pub mod status;
