#![no_std]

pub mod math;
pub mod provider;

pub use provider::{ContributionProvider, ContributionProviderClient, ProviderError};
