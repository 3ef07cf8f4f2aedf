//! maui Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers of the maui
//! generator: it adds an Angular component library to a monorepo and wires
//! Tailwind into an application, merging into files users may have edited.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             maui-cli (CLI)              │
//! │       (Implements Driving Ports)        │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │ (GeneratorService, PostGenerationRunner)│
//! │    Plan against a staged tree, then     │
//! │      run side effects after commit      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │ (Tree, ProjectRegistry, TemplateSource, │
//! │  PackageManifest, Formatter, Runner)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     maui-adapters (Infrastructure)      │
//! │ (MemoryTree, FsTree, JsonProjectRegistry│
//! │  BuiltinTemplates, ShellCommandRunner)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (config modules, stylesheet, root tags) │
//! │             No I/O at all               │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use maui_core::prelude::*;
//!
//! # fn run(
//! #     tree: &mut dyn Tree,
//! #     generator: GeneratorService,
//! #     runner: PostGenerationRunner,
//! # ) -> MauiResult<()> {
//! // 1. Plan: the tree is mutated, nothing touches disk yet
//! let plan = generator.generate_library(tree, &LibraryOptions::default())?;
//!
//! // 2. Commit staged writes
//! tree.commit()?;
//!
//! // 3. Install dependencies, run the component generator
//! runner.execute(tree.root(), &plan.pending_actions)?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GeneratorService, PostGenerationRunner,
        ports::{
            ChangeKind, CommandRunner, CommandSpec, CommandStatus, FileChange, Formatter,
            PackageManifest, ProjectRegistry, TemplateSource, Tree,
        },
    };
    pub use crate::domain::{
        ColorMode, ConfigDocument, GenerationPhase, GenerationPlan, GenerationReport,
        KnownCallables, LibraryOptions, PackageManager, PendingAction, ProjectConfiguration,
        TailwindOptions, ThemeColor,
    };
    pub use crate::error::{MauiError, MauiResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
