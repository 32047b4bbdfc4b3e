//! Persistence adapters for the repository ports.

mod memory;

pub use memory::{
    InMemoryActivityRepository, InMemoryContactRepository, InMemoryDealRepository,
    InMemoryIdentityRepository, InMemoryLeadRepository,
};
