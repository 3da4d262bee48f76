#![forbid(unsafe_code)]

pub mod adapters;
pub mod config;
pub mod domain;
mod routes;
pub mod startup;
pub mod telemetry;
pub mod usecases;
mod utils;
