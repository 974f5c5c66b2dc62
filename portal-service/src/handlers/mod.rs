pub mod admin;
pub mod auth;
pub mod members;
pub mod programs;
pub mod public;
