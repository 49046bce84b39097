//! Binary entry point for the mockgen CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Scaffold a test (writes the file)
//! mockgen src/test/java/a/b/FooTest.java --source-root src/main/java
//!
//! # Preview as a unified diff
//! mockgen src/test/java/a/b/FooTest.java --dry-run --format diff
//!
//! # Subject lives in a library checkout
//! mockgen FooTest.java --library-root ../vendor/src --format json
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use mockgen::cli::run_generate;
use mockgen::config::GenerateOptions;
use mockgen_core::error::{MockgenError, OutputErrorCode};
use mockgen_core::output::{emit_response, ErrorResponse, GenerateResponse};

// ============================================================================
// CLI Structure
// ============================================================================

/// Generate Mockito scaffolding for a Java unit test.
///
/// Adds `@Mock` fields for each collaborator of the class under test, an
/// `@InjectMocks` field for the subject and a `setUp` method that builds it.
#[derive(Parser, Debug)]
#[command(name = "mockgen", version, about = "Mockito test scaffold generator")]
struct Cli {
    /// The test file to scaffold.
    test_file: PathBuf,

    /// Workspace root directory (default: current directory).
    #[arg(long)]
    workspace: Option<PathBuf>,

    /// Project source root; repeatable (default: the workspace).
    #[arg(long = "source-root", value_name = "DIR")]
    source_roots: Vec<PathBuf>,

    /// Library source root, searched for the subject only; repeatable.
    #[arg(long = "library-root", value_name = "DIR")]
    library_roots: Vec<PathBuf>,

    /// Compute the scaffold without writing the file.
    #[arg(long)]
    dry_run: bool,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Log level for tracing output.
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Output format for the generate command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary (default).
    #[default]
    Text,
    /// Full JSON response.
    Json,
    /// Unified diff of the insertions.
    Diff,
}

impl Cli {
    fn options(&self) -> Result<GenerateOptions, MockgenError> {
        let workspace = match &self.workspace {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(|e| {
                MockgenError::internal(format!("failed to get current directory: {}", e))
            })?,
        };
        if !workspace.is_dir() {
            return Err(MockgenError::invalid_args(format!(
                "workspace is not a directory: {}",
                workspace.display()
            )));
        }
        Ok(GenerateOptions {
            workspace,
            test_file: self.test_file.clone(),
            source_roots: self.source_roots.clone(),
            library_roots: self.library_roots.clone(),
            dry_run: self.dry_run,
        })
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.log_level);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let error_code = OutputErrorCode::from(&err);
            let response = ErrorResponse::from_error(&err);

            // Errors go to stdout as JSON
            let _ = emit_response(&response, &mut io::stdout());
            let _ = io::stdout().flush();

            ExitCode::from(error_code.code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Execute the CLI command.
fn execute(cli: &Cli) -> Result<(), MockgenError> {
    let options = cli.options()?;
    let response = run_generate(&options)?;
    let mut stdout = io::stdout();
    write_output(&response, cli.format, &mut stdout)
        .map_err(|e| MockgenError::internal(format!("failed to write output: {}", e)))
}

fn write_output(
    response: &GenerateResponse,
    format: OutputFormat,
    writer: &mut impl Write,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => emit_response(response, writer),
        OutputFormat::Text => writeln!(writer, "{}", response.summary()),
        OutputFormat::Diff => write!(writer, "{}", response.unified_diff),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod cli_parsing {
        use super::*;

        #[test]
        fn defaults() {
            let cli = Cli::try_parse_from(["mockgen", "FooTest.java"]).unwrap();
            assert_eq!(cli.test_file, PathBuf::from("FooTest.java"));
            assert!(cli.workspace.is_none());
            assert!(cli.source_roots.is_empty());
            assert!(!cli.dry_run);
            assert_eq!(cli.format, OutputFormat::Text);
            assert!(matches!(cli.log_level, LogLevel::Warn));
        }

        #[test]
        fn repeatable_roots() {
            let cli = Cli::try_parse_from([
                "mockgen",
                "FooTest.java",
                "--source-root",
                "src/main/java",
                "--source-root",
                "gen",
                "--library-root",
                "vendor",
                "--dry-run",
                "--format",
                "diff",
            ])
            .unwrap();
            assert_eq!(
                cli.source_roots,
                vec![PathBuf::from("src/main/java"), PathBuf::from("gen")]
            );
            assert_eq!(cli.library_roots, vec![PathBuf::from("vendor")]);
            assert!(cli.dry_run);
            assert_eq!(cli.format, OutputFormat::Diff);
        }

        #[test]
        fn test_file_is_required() {
            assert!(Cli::try_parse_from(["mockgen"]).is_err());
        }

        #[test]
        fn unknown_format_is_rejected() {
            assert!(Cli::try_parse_from(["mockgen", "A.java", "--format", "xml"]).is_err());
        }
    }

    #[test]
    fn missing_workspace_is_invalid_arguments() {
        let cli = Cli::try_parse_from([
            "mockgen",
            "FooTest.java",
            "--workspace",
            "/definitely/not/a/dir",
        ])
        .unwrap();
        let err = cli.options().unwrap_err();
        assert_eq!(err.error_code(), OutputErrorCode::InvalidArguments);
    }

    #[test]
    fn log_level_converts_to_tracing_level() {
        assert_eq!(LogLevel::Debug.to_tracing_level(), tracing::Level::DEBUG);
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
    }
}
