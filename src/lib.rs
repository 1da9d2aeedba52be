// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Convert Postman collection exports to Markdown.
//!
//! This crate provides parsing and rendering functionality for transforming
//! Postman's JSON collection format into API documentation in Markdown,
//! ready to be published with Jekyll or another Liquid-based site generator.
//!
//! # Overview
//!
//! A Postman collection is a tree of folders and requests. This crate:
//!
//! 1. Parses the JSON structure into typed Rust representations
//! 2. Renders the tree as Markdown, one heading level per folder
//!
//! # Example
//!
//! ```no_run
//! use postman2md::{parser, renderer};
//!
//! let json = std::fs::read_to_string("api.postman_collection.json").unwrap();
//! let collection = parser::parse_collection(&json).unwrap();
//!
//! let opts = renderer::RenderOptions {
//!     skip_disabled: true,
//!     ..Default::default()
//! };
//!
//! let markdown = renderer::render_collection(&collection, &opts);
//! println!("{markdown}");
//! ```
//!
//! # Modules
//!
//! - [`parser`]: JSON parsing and type definitions for Postman collections
//! - [`renderer`]: Markdown generation with configurable output options

#![deny(missing_docs)]

pub mod parser;
pub mod renderer;
