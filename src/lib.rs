pub mod catalog;
pub mod cipher;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod policy;
pub mod startup;
pub mod types;
