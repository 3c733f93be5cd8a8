// src/handlers/mod.rs

pub mod answers;
pub mod auth;
pub mod questions;
pub mod status;
pub mod students;
pub mod users;
