// crates/report-page-cli/src/main.rs
// ============================================================================
// Module: Report Page CLI Entry Point
// Description: Command dispatcher for report page validation and contract tasks.
// Purpose: Validate documents and manage contract artifacts from the shell.
// Dependencies: clap, report-page-config, report-page-contract, report-page-validator
// ============================================================================

//! ## Overview
//! `report-page` validates report page documents, replays the contract
//! fixture bundle, prints the published schema, and generates or checks the
//! contract artifacts. All user-facing strings are routed through the i18n
//! catalog.
//!
//! Exit codes: `0` when every document is valid, `1` when any document is
//! invalid, `2` for usage, configuration, or I/O failures. Inputs are
//! untrusted; reads are bounded by `input.max_document_bytes`.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use report_page_cli::i18n::Locale;
use report_page_cli::i18n::set_locale;
use report_page_cli::t;
use report_page_config::ReportPageConfig;
use report_page_contract::ContractBuilder;
use report_page_contract::ExpectedOutcome;
use report_page_contract::latest_report_page_schema;
use report_page_contract::report_page_schema;
use report_page_contract::test_cases;
use report_page_core::UnknownFieldPolicy;
use report_page_validator::ContractSchema;
use report_page_validator::DocumentValidator;
use report_page_validator::ValidationAuditEvent;
use report_page_validator::ValidationAuditSink;
use report_page_validator::ValidationReport;
use report_page_validator::ValidatorOptions;
use report_page_validator::Violation;
use report_page_validator::Warning;
use report_page_validator::audit_sink_from_config;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "REPORT_PAGE_LANG";
/// Input path that selects stdin.
const STDIN_MARKER: &str = "-";
/// Exit status for invalid documents or failed fixture cases.
const EXIT_INVALID: u8 = 1;
/// Exit status for usage, configuration, and I/O failures.
const EXIT_FAILURE: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "report-page", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `REPORT_PAGE_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate report page documents.
    Validate(ValidateCommand),
    /// Replay the contract fixture bundle against the validator.
    Fixtures(FixturesCommand),
    /// Print the published report page JSON Schema.
    Schema(SchemaCommand),
    /// Contract generation utilities.
    Contract {
        /// Selected contract subcommand.
        #[command(subcommand)]
        command: ContractCommand,
    },
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
struct ValidateCommand {
    /// Documents to validate (`-` reads stdin).
    #[arg(value_name = "FILE", required = true)]
    inputs: Vec<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Reject unknown members regardless of configuration.
    #[arg(long, action = ArgAction::SetTrue)]
    strict: bool,
    /// Also report what the published JSON Schema says about each document.
    #[arg(long = "schema-check", action = ArgAction::SetTrue)]
    schema_check: bool,
    /// Optional config file path (defaults to report-page.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for `fixtures`.
#[derive(Args, Debug)]
struct FixturesCommand {
    /// Print only failing cases and the summary.
    #[arg(long, action = ArgAction::SetTrue)]
    quiet: bool,
}

/// Arguments for `schema`.
#[derive(Args, Debug)]
struct SchemaCommand {
    /// Schema variant to print.
    #[arg(long, value_enum, default_value_t = SchemaVariant::Permissive)]
    variant: SchemaVariant,
}

/// Contract subcommands.
#[derive(Subcommand, Debug)]
enum ContractCommand {
    /// Generate report page contract artifacts.
    Generate(ContractGenerateCommand),
    /// Verify report page contract artifacts.
    Check(ContractCheckCommand),
}

/// Arguments for contract generation.
#[derive(Args, Debug)]
struct ContractGenerateCommand {
    /// Output directory for generated artifacts.
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,
}

/// Arguments for contract verification.
#[derive(Args, Debug)]
struct ContractCheckCommand {
    /// Output directory containing generated artifacts.
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a report page configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to report-page.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Output formats for validation results.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// One `path: reason` line per finding.
    Text,
    /// One canonical JSON object per document.
    Json,
}

/// Published schema variants.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum SchemaVariant {
    /// Version-pinned schema that tolerates unknown members.
    Permissive,
    /// Version-pinned schema that rejects unknown members.
    Strict,
    /// Permissive schema under the `latest` alias.
    Latest,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        write_stdout_line(&t!("main.version", version = env!("CARGO_PKG_VERSION")))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Validate(command) => command_validate(&command),
        Commands::Fixtures(command) => command_fixtures(&command),
        Commands::Schema(command) => command_schema(&command),
        Commands::Contract {
            command,
        } => command_contract(command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Validate Command
// ============================================================================

/// Result of validating one input, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum InputOutcome {
    /// The document is a legal report page.
    Valid,
    /// The document violates the contract.
    Invalid,
    /// The input could not be read or parsed.
    Failed,
}

impl InputOutcome {
    /// Maps the worst outcome of a run to the process exit code.
    fn exit_code(self) -> ExitCode {
        match self {
            Self::Valid => ExitCode::SUCCESS,
            Self::Invalid => ExitCode::from(EXIT_INVALID),
            Self::Failed => ExitCode::from(EXIT_FAILURE),
        }
    }
}

/// Machine-readable validation result for one document.
#[derive(Serialize)]
struct ValidateOutput<'a> {
    /// Input path, or `-` for stdin.
    source: &'a str,
    /// Whether the document is a legal report page.
    valid: bool,
    /// Violations in discovery order.
    violations: &'a [Violation],
    /// Warnings in discovery order.
    warnings: &'a [Warning],
    /// True when the violation cap was reached.
    truncated: bool,
    /// JSON Schema messages, present only with `--schema-check`.
    #[serde(skip_serializing_if = "Option::is_none")]
    schema_errors: Option<&'a [String]>,
}

/// Shared state for one `validate` run.
struct ValidateRun {
    /// Validator configured from the config file and flags.
    validator: DocumentValidator,
    /// Destination for audit events.
    audit: Box<dyn ValidationAuditSink>,
    /// Compiled schema for `--schema-check`.
    schema: Option<ContractSchema>,
    /// Output format.
    format: OutputFormat,
    /// Largest accepted input, in bytes.
    max_document_bytes: usize,
}

/// Executes `validate`.
fn command_validate(command: &ValidateCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let mut options = ValidatorOptions::from(&config.validation);
    if command.strict {
        options = options.with_unknown_fields(UnknownFieldPolicy::Strict);
    }
    let audit = audit_sink_from_config(&config.audit)
        .map_err(|err| CliError::new(t!("audit.init_failed", error = err)))?;
    let schema = if command.schema_check {
        let schema = ContractSchema::compile(options.unknown_fields)
            .map_err(|err| CliError::new(t!("validate.schema_compile_failed", error = err)))?;
        Some(schema)
    } else {
        None
    };
    let run = ValidateRun {
        validator: DocumentValidator::new(options),
        audit,
        schema,
        format: command.format,
        max_document_bytes: config.input.max_document_bytes,
    };

    let mut worst = InputOutcome::Valid;
    for input in &command.inputs {
        let outcome = match read_document(input, run.max_document_bytes) {
            Ok(document) => validate_document(&run, &source_label(input), &document)?,
            Err(err) => {
                write_stderr_line(&err.to_string())
                    .map_err(|err| CliError::new(output_error("stderr", &err)))?;
                InputOutcome::Failed
            }
        };
        worst = worst.max(outcome);
    }
    Ok(worst.exit_code())
}

/// Validates one parsed document, records it, and prints the result.
fn validate_document(run: &ValidateRun, source: &str, document: &Value) -> CliResult<InputOutcome> {
    let report = run.validator.validate(document);
    run.audit.record(&ValidationAuditEvent::for_document(
        source,
        document,
        &report,
        run.validator.options().unknown_fields,
    ));
    let schema_errors = run
        .schema
        .as_ref()
        .map(|schema| schema.check(document).err().unwrap_or_default());
    match run.format {
        OutputFormat::Text => {
            write_stdout_line(&render_report_text(
                source,
                &report,
                run.validator.options().max_violations,
                schema_errors.as_deref(),
            ))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        OutputFormat::Json => write_json_line(&ValidateOutput {
            source,
            valid: report.is_valid(),
            violations: report.violations(),
            warnings: report.warnings(),
            truncated: report.truncated,
            schema_errors: schema_errors.as_deref(),
        })?,
    }
    Ok(if report.is_valid() { InputOutcome::Valid } else { InputOutcome::Invalid })
}

/// Renders a report as `path: reason` lines under a verdict header.
fn render_report_text(
    source: &str,
    report: &ValidationReport,
    max_violations: usize,
    schema_errors: Option<&[String]>,
) -> String {
    let mut lines = Vec::new();
    if report.is_valid() {
        lines.push(t!("validate.valid", path = source));
    } else {
        lines.push(t!("validate.invalid", path = source, count = report.violations().len()));
    }
    for violation in report.violations() {
        lines.push(t!("validate.violation", violation = violation));
    }
    if report.truncated {
        lines.push(t!("validate.truncated", limit = max_violations));
    }
    for warning in report.warnings() {
        lines.push(t!("validate.warning", warning = warning));
    }
    for message in schema_errors.unwrap_or_default() {
        lines.push(t!("validate.schema_error", message = message));
    }
    lines.join("\n")
}

/// Returns the display label for an input path.
fn source_label(path: &Path) -> String {
    path.display().to_string()
}

/// Reads and parses one input document within the size limit.
fn read_document(path: &Path, max_bytes: usize) -> CliResult<Value> {
    let result = if path.as_os_str() == STDIN_MARKER {
        read_limited(std::io::stdin().lock(), None, max_bytes)
    } else {
        read_bytes_with_limit(path, max_bytes)
    };
    let bytes = result.map_err(|err| match err {
        ReadLimitError::Io(err) => {
            CliError::new(t!("input.read_failed", path = path.display(), error = err))
        }
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            path = path.display(),
            size = size,
            limit = limit
        )),
    })?;
    serde_json::from_slice(&bytes)
        .map_err(|err| CliError::new(t!("input.parse_failed", path = path.display(), error = err)))
}

// ============================================================================
// SECTION: Fixture Command
// ============================================================================

/// Executes `fixtures`: every case must reach its expected outcome.
fn command_fixtures(command: &FixturesCommand) -> CliResult<ExitCode> {
    let cases = test_cases();
    let mut passed = 0_usize;
    for case in &cases {
        let options = ValidatorOptions::default().with_unknown_fields(case.unknown_fields);
        let report = DocumentValidator::new(options).validate(&case.document);
        let actual = ExpectedOutcome {
            valid: report.is_valid(),
            violation_paths: report.violation_paths(),
            warning_kinds: report.warning_kinds(),
        };
        if actual == case.expected {
            passed += 1;
            if !command.quiet {
                write_stdout_line(&t!("fixtures.case_ok", name = case.name))
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            }
        } else {
            let message = t!(
                "fixtures.case_failed",
                name = case.name,
                expected = compact_json(&case.expected)?,
                actual = compact_json(&actual)?
            );
            write_stdout_line(&message).map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }
    write_stdout_line(&t!("fixtures.summary", passed = passed, total = cases.len()))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    if passed == cases.len() { Ok(ExitCode::SUCCESS) } else { Ok(ExitCode::from(EXIT_INVALID)) }
}

// ============================================================================
// SECTION: Schema Command
// ============================================================================

/// Executes `schema`: prints the selected schema as pretty JSON.
fn command_schema(command: &SchemaCommand) -> CliResult<ExitCode> {
    let schema = match command.variant {
        SchemaVariant::Permissive => report_page_schema(UnknownFieldPolicy::Permissive),
        SchemaVariant::Strict => report_page_schema(UnknownFieldPolicy::Strict),
        SchemaVariant::Latest => latest_report_page_schema(),
    };
    let rendered = serde_json::to_string_pretty(&schema)
        .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Contract Commands
// ============================================================================

/// Dispatches contract subcommands.
fn command_contract(command: ContractCommand) -> CliResult<ExitCode> {
    match command {
        ContractCommand::Generate(command) => command_contract_generate(command),
        ContractCommand::Check(command) => command_contract_check(command),
    }
}

/// Executes contract generation.
fn command_contract_generate(command: ContractGenerateCommand) -> CliResult<ExitCode> {
    let output_dir = command.out.unwrap_or_else(ContractBuilder::default_output_dir);
    let builder = ContractBuilder::new(output_dir.clone());
    builder
        .write_to(&output_dir)
        .map_err(|err| CliError::new(t!("contract.generate.failed", error = err)))?;
    write_stdout_line(&t!("contract.generate.ok", path = output_dir.display()))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes contract verification.
fn command_contract_check(command: ContractCheckCommand) -> CliResult<ExitCode> {
    let output_dir = command.out.unwrap_or_else(ContractBuilder::default_output_dir);
    let builder = ContractBuilder::new(output_dir.clone());
    builder
        .verify_output(&output_dir)
        .map_err(|err| CliError::new(t!("contract.check.failed", error = err)))?;
    write_stdout_line(&t!("contract.check.ok", path = output_dir.display()))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = load_config(command.config.as_deref())?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Loads configuration, mapping failures to a localized error.
fn load_config(path: Option<&Path>) -> CliResult<ReportPageConfig> {
    ReportPageConfig::load(path).map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded reads.
#[derive(Debug)]
enum ReadLimitError {
    /// I/O failure.
    Io(std::io::Error),
    /// Input size exceeds the configured limit.
    TooLarge {
        /// Actual (or observed) size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let size = file.metadata().map_err(ReadLimitError::Io)?.len();
    read_limited(file, Some(size), max_bytes)
}

/// Reads at most `max_bytes` from `reader`, failing once the limit is passed.
///
/// `declared_size` lets regular files fail before any byte is read.
fn read_limited(
    reader: impl Read,
    declared_size: Option<u64>,
    max_bytes: usize,
) -> Result<Vec<u8>, ReadLimitError> {
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX);
    if let Some(size) = declared_size
        && size > limit
    {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }
    let mut bytes = Vec::new();
    reader.take(limit.saturating_add(1)).read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        return Err(ReadLimitError::TooLarge {
            size: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

/// Converts CLI language selections into locales.
impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Renders `value` as compact JSON for inline messages.
fn compact_json<T: Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string(value).map_err(|err| CliError::new(t!("output.json_failed", error = err)))
}

/// Writes `value` as one line of canonical JSON to stdout.
fn write_json_line<T: Serialize>(value: &T) -> CliResult<()> {
    let mut bytes = serde_jcs::to_vec(value)
        .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?;
    bytes.push(b'\n');
    std::io::stdout()
        .write_all(&bytes)
        .map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns the failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::from(EXIT_FAILURE)
}
