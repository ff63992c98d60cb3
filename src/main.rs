use clap::{Parser, Subcommand};
use drink_catalog::imaging::VariantConfig;
use drink_catalog::{config, output, thumbs, validate};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "drink-catalog")]
#[command(about = "Validate the drink catalog and generate its thumbnails")]
#[command(long_about = "\
Validate the drink catalog and generate its thumbnails

The catalog root holds the JSON documents the app downloads and the images
they reference:

  <root>/
  ├── catalog.toml                 # Optional config (paths, PNG compression)
  ├── drinks.json                  # Catalog: array of drink entries
  ├── flags.json                   # Optional feature flags
  └── drinks/                      # Source images (png, jpg, jpeg, webp)
      └── _thumbs/                 # Generated <stem>_512.png / <stem>_1024.png

File existence checks run when VALIDATE_IMAGE_FILES=true or with
--check-files. Set RUST_LOG=debug for diagnostic logging on stderr.

Run 'drink-catalog gen-config' to generate a documented catalog.toml.")]
#[command(version)]
struct Cli {
    /// Catalog root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct ValidateArgs {
    /// Print the result as JSON instead of a report
    #[arg(long)]
    json: bool,

    /// Check that every referenced image exists under the root
    #[arg(long)]
    check_files: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Validate drinks.json and flags.json
    Validate(ValidateArgs),
    /// Generate 512px and 1024px PNG thumbnails from the source images
    Thumbs,
    /// Print a stock catalog.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match cli.command {
        Command::Validate(args) => {
            let catalog_config = config::load_config(&cli.root)?;
            let check_files = args.check_files
                || config::image_checks_enabled(
                    std::env::var(config::IMAGE_CHECK_ENV).ok().as_deref(),
                );
            tracing::debug!(root = %cli.root.display(), check_files, "validating catalog");

            let result = validate::validate(&cli.root, &catalog_config, check_files)?;
            if args.json {
                println!("{}", output::format_validation_json(&result)?);
            } else {
                println!("==> Validating {}", cli.root.join(&catalog_config.catalog).display());
                output::print_validation_report(&result);
                if result.success() {
                    println!("==> Catalog is valid");
                } else {
                    println!("==> Catalog has errors");
                }
            }

            Ok(if result.success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Thumbs => {
            let catalog_config = config::load_config(&cli.root)?;
            let source_dir = cli.root.join(&catalog_config.assets.image_root);
            let thumb_dir = cli.root.join(&catalog_config.assets.thumb_root);
            let variant_config = VariantConfig {
                compression: catalog_config.thumbnails.compression,
                ..VariantConfig::default()
            };

            println!("==> Generating thumbnails → {}", thumb_dir.display());
            let report = thumbs::generate_thumbnails(
                &source_dir,
                &thumb_dir,
                &variant_config,
                output::print_thumb_event,
            )?;
            if report.sources > 0 {
                println!("Thumbnails: {}", report);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Diagnostic logging to stderr, `warn` unless `RUST_LOG` says otherwise.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
