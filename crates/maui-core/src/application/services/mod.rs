//! Application services - orchestrate use cases.
//!
//! `GeneratorService` plans a run against a staged tree;
//! `PostGenerationRunner` performs the queued side effects once the tree is
//! committed.

pub mod generator_service;
pub mod post_generation;
pub mod styling;

#[cfg(test)]
pub(crate) mod test_support;

pub use generator_service::{
    GeneratorService, LIBRARY_DEPENDENCIES, LIBRARY_DEV_DEPENDENCIES, TAILWIND_DEV_DEPENDENCIES,
    library_descriptor,
};
pub use post_generation::PostGenerationRunner;
