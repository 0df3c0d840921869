// src/lib.rs

//! Vacancies Library

pub mod error;
pub mod interaction;
pub mod models;
pub mod query;
pub mod services;
pub mod storage;
pub mod utils;
