//! OpenAPI Mock Generator - Command-line tool for generating MSW mocks from OpenAPI documents.
//!
//! Reads an OpenAPI 3.x document and writes TypeScript mock data: one mock per component
//! schema, one response function per operation and status code, and MSW request handlers
//! serving those responses.
//!
//! # Usage
//!
//! ```bash
//! openapi-mock-gen [OPTIONS] <PATH>
//! ```
//!
//! # Examples
//!
//! Generate faker-backed mocks into `./mocks`:
//! ```bash
//! openapi-mock-gen ./openapi.yaml
//! ```
//!
//! Generate fixed sample values for two status codes only:
//! ```bash
//! openapi-mock-gen ./openapi.json --static --include-codes 200,201 -o src/mocks
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! openapi-mock-gen ./openapi.yaml -v
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use openapi_mock_gen::cli;

fn main() -> Result<()> {
    // Parse once to read the verbose flag, then validate after the logger is up
    let args_for_verbose = cli::CliArgs::parse();

    let mut builder = env_logger::Builder::from_default_env();
    let rust_log = std::env::var(env_logger::DEFAULT_FILTER_ENV).ok();
    if let Some(level) = cli::default_log_level(args_for_verbose.verbose, rust_log.as_deref()) {
        builder.filter_level(level);
    }
    builder.init();

    info!("OpenAPI Mock Generator starting...");

    let args = cli::parse_args_from_parsed(args_for_verbose)?;

    cli::run(args)?;

    info!("Mock generation completed successfully");

    Ok(())
}
