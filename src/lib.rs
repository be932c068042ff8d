// src/lib.rs — Library root for salonctl

pub mod api;
pub mod cli;
pub mod infra;
pub mod nav;
pub mod session;
pub mod workflow;
