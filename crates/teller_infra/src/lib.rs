#![forbid(unsafe_code)]

pub mod amlo;
pub mod client;
pub mod config;
pub mod journal;

pub fn infra_bootstrapped() -> bool {
    teller_core::crate_bootstrapped()
}
