//! Core translation engine module

pub mod config;
pub mod errors;
pub mod glossary;
pub mod injection;
pub mod mock;
pub mod models;
pub mod oracle;
pub mod stats;
pub mod tag;
pub mod translator;
pub mod whitespace;
