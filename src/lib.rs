// Keyport - Bulk realm and user export
// Copyright (c) 2025 Keyport Contributors
// Licensed under the MIT License

//! # Keyport - Bulk realm and user export
//!
//! Keyport exports every realm of an identity store, together with its
//! users, as a set of JSON artifacts. Large user populations are split into
//! fixed-size pages, each read in its own short transaction.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Enumerating** realms in a single read transaction
//! - **Exporting** realm metadata and user pages through injected writers
//! - **Recording** every artifact with a checksum in an export manifest
//! - **Verifying** an export directory against its manifest
//!
//! ## Architecture
//!
//! Keyport follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (export, verification)
//! - [`adapters`] - Transactional stores and artifact writers
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use keyport::adapters::sink::DirectoryWriter;
//! use keyport::adapters::store::FileStore;
//! use keyport::core::export::ExportCoordinator;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = keyport::config::load_config("keyport.toml")?;
//!
//!     let store = FileStore::open(&config.store.path)?;
//!     let writer = DirectoryWriter::new(&config.export.output_dir, false, false)?;
//!     let coordinator = ExportCoordinator::new(store, writer, config.export.paging());
//!
//!     let summary = coordinator.export_all()?;
//!     println!("Exported {} users", summary.total_users);
//!     Ok(())
//! }
//! ```
//!
//! ## Paging
//!
//! `users_per_file` selects how users are split:
//!
//! ```rust
//! use keyport::core::export::UserPaging;
//!
//! // Users embedded in the realm artifact
//! assert!(UserPaging::from_users_per_file(-1).users_into_same_file());
//!
//! // 250 users at 100 per file: pages of 100, 100 and 50
//! assert_eq!(UserPaging::from_users_per_file(100).page_size(250), Some(100));
//! ```
//!
//! ## Error Handling
//!
//! Keyport uses the [`domain::KeyportError`] type for all library errors.
//! A failed realm export names the realm and the page that was in progress.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
