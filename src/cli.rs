use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info, warn, LevelFilter};
use std::path::PathBuf;

use crate::error::Error;
use crate::generator::{GenerationOptions, Mode, ARRAY_MAX_LENGTH, ARRAY_MIN_LENGTH, DEFAULT_LOCALE};
use crate::random::DEFAULT_SEED;
use crate::writer::WriterOptions;

/// OpenAPI Mock Generator - Generate faker-backed MSW mocks from an OpenAPI 3.x document
#[derive(Parser, Debug)]
#[command(name = "openapi-mock-gen")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the OpenAPI document (.json, .yaml or .yml)
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Base directory for the generated files
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = "mocks")]
    pub output_dir: PathBuf,

    /// Minimum length of generated arrays
    #[arg(long = "array-min", value_name = "N", default_value_t = ARRAY_MIN_LENGTH)]
    pub array_min: usize,

    /// Maximum length of generated arrays
    #[arg(long = "array-max", value_name = "N", default_value_t = ARRAY_MAX_LENGTH)]
    pub array_max: usize,

    /// Generate static values instead of faker calls
    #[arg(short = 's', long = "static")]
    pub is_static: bool,

    /// Only generate responses for these status codes
    #[arg(long = "include-codes", value_name = "CODES", value_delimiter = ',')]
    pub include_codes: Option<Vec<u16>>,

    /// Directory containing titles.json and descriptions.json overrides
    #[arg(long = "special", value_name = "DIR")]
    pub special_dir: Option<PathBuf>,

    /// Base URL prepended to every handler path
    #[arg(long = "handler-url", value_name = "URL", default_value = "")]
    pub handler_url: String,

    /// Comma-separated faker locales for the generated faker instance
    #[arg(long = "locales", value_name = "LOCALES", default_value = DEFAULT_LOCALE)]
    pub locales: String,

    /// What to generate
    #[arg(long = "target", value_enum, value_delimiter = ',', default_values = ["api", "schema"])]
    pub targets: Vec<Target>,

    /// Clear the response and handler directories before writing
    #[arg(long = "clear")]
    pub clear: bool,

    /// Randomly omit nullable properties in generated objects
    #[arg(long = "optional")]
    pub optional: bool,

    /// Render generated values on a single line
    #[arg(long = "single-line")]
    pub single_line: bool,

    /// Seed of the static-mode random source
    #[arg(long = "seed", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Generation targets
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Hash)]
pub enum Target {
    /// Response units and MSW handlers
    Api,
    /// Component schema mocks
    Schema,
}

impl CliArgs {
    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            mode: if self.is_static {
                Mode::Static
            } else {
                Mode::Dynamic
            },
            array_length_range: (self.array_min, self.array_max),
            nullable_optional: self.optional,
            single_line: self.single_line,
            locale: self.locales.clone(),
        }
    }

    pub fn writer_options(&self) -> WriterOptions {
        WriterOptions {
            base_dir: self.output_dir.clone(),
            handler_url: self.handler_url.clone(),
            clear: self.clear,
        }
    }

    pub fn wants(&self, target: Target) -> bool {
        self.targets.contains(&target)
    }
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.path.exists() {
        return Err(invalid(format!(
            "Document path does not exist: {}",
            args.path.display()
        )));
    }

    if !args.path.is_file() {
        return Err(invalid(format!(
            "Document path is not a file: {}",
            args.path.display()
        )));
    }

    if args.array_min > args.array_max {
        return Err(invalid(format!(
            "--array-min ({}) should not be greater than --array-max ({})",
            args.array_min, args.array_max
        )));
    }

    if args.targets.is_empty() {
        return Err(invalid("At least one target is required (api, schema)".to_string()));
    }

    info!("Document: {}", args.path.display());
    info!("Output directory: {}", args.output_dir.display());
    info!("Mode: {}", if args.is_static { "static" } else { "dynamic" });
    info!("Array length: {}..={}", args.array_min, args.array_max);
    if let Some(ref codes) = args.include_codes {
        info!("Status codes: {:?}", codes);
    }
    if let Some(ref special) = args.special_dir {
        info!("Special rules: {}", special.display());
    }

    Ok(args)
}

/// Level for the logger, or `None` when a non-empty `RUST_LOG` filter takes over.
pub fn default_log_level(verbose: bool, rust_log: Option<&str>) -> Option<LevelFilter> {
    if rust_log.is_some_and(|filter| !filter.trim().is_empty()) {
        return None;
    }
    Some(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    })
}

fn invalid(message: String) -> anyhow::Error {
    Error::InvalidArgument(message).into()
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::document::OpenApiDocument;
    use crate::generator::Generator;
    use crate::random::SeededRandom;
    use crate::response::{normalize_operations, ResponseComposer};
    use crate::special_rules::SpecialRules;
    use crate::writer::MockWriter;

    info!("Starting mock generation...");

    // Step 1: Load the document
    info!("Loading OpenAPI document...");
    let document = OpenApiDocument::load(&args.path)?;

    // Step 2: Load special rules
    let rules = match args.special_dir.as_deref() {
        Some(dir) => {
            let rules = SpecialRules::load(dir);
            if rules.is_empty() {
                warn!("No special rules found in {}", dir.display());
            }
            rules
        }
        None => SpecialRules::default(),
    };

    let options = args.generation_options();
    let mut generator =
        Generator::new(options.clone(), rules).with_random(SeededRandom::new(args.seed));
    let writer = MockWriter::new(args.writer_options(), options.clone());

    // Step 3: The faker instance every dynamic file imports
    if !options.is_static() {
        writer.write_fakers()?;
    }

    // Step 4: Component schemas
    if args.wants(Target::Schema) {
        info!("Generating schema mocks...");
        match document.schemas() {
            Some(schemas) => {
                let generated = generator.generate_schemas(schemas);
                info!("Generated {} schema mocks", generated.len());
                writer.write_schemas(&generated)?;
            }
            None => warn!("Skipping schema mocks"),
        }
    }

    // Step 5: Responses and handlers
    if args.wants(Target::Api) {
        info!("Generating response mocks and handlers...");
        match document.paths() {
            Some(paths) => {
                let operations = normalize_operations(
                    paths,
                    args.include_codes.as_deref(),
                    &mut generator,
                    &document,
                );
                info!("Found {} operations", operations.len());

                let groups = ResponseComposer::new(&mut generator, &document).compose_all(operations);
                writer.write_responses(&groups)?;
                writer.write_handlers(&groups)?;
            }
            None => warn!("Skipping responses and handlers"),
        }
    }

    Ok(())
}
