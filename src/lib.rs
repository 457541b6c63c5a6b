//! OpenAPI Mock Generator - Mock data and MSW handlers from OpenAPI documents.
//!
//! This library turns the schemas of an OpenAPI 3.x document into sample data. It works in two
//! modes: **static**, where values are drawn once from a seeded random source, and **dynamic**,
//! where leaves become faker.js calls so every run of the generated TypeScript draws fresh data.
//!
//! # Architecture
//!
//! 1. [`document`] - Loads the document and resolves local `$ref`s
//! 2. [`special_rules`] - User overrides keyed by schema `title`/`description`
//! 3. [`classifier`] - Turns a raw schema into a [`classifier::SchemaNode`]
//! 4. [`generator`] - Walks a node and produces a [`value::GeneratedValue`]
//! 5. [`serializer`] - Renders generated values as TypeScript literals
//! 6. [`response`] - Normalizes operations and composes one response unit per status code
//! 7. [`writer`] - Renders and writes the output files
//!
//! # Example Usage
//!
//! ```
//! use openapi_mock_gen::generator::{GenerationOptions, Generator, Mode};
//! use openapi_mock_gen::serializer::serialize;
//! use openapi_mock_gen::special_rules::SpecialRules;
//! use serde_json::json;
//!
//! let options = GenerationOptions {
//!     mode: Mode::Dynamic,
//!     single_line: true,
//!     ..Default::default()
//! };
//! let mut generator = Generator::new(options.clone(), SpecialRules::default());
//!
//! let value = generator
//!     .generate_raw(&json!({
//!         "type": "object",
//!         "properties": { "active": { "type": "boolean" } }
//!     }))
//!     .unwrap();
//!
//! assert_eq!(serialize(&value, 0, &options), "{ active: faker.datatype.boolean() }");
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which provides a complete CLI application.

pub mod classifier;
pub mod cli;
pub mod document;
pub mod error;
pub mod generator;
pub mod random;
pub mod response;
pub mod serializer;
pub mod special_rules;
pub mod value;
pub mod writer;
