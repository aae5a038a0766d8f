//! `vulpes` — the batch CLI surface for `vulpes-redact` (spec §6.4).
//!
//! Two subcommands: `redact` runs the full pipeline over a file and writes
//! the redacted output (and optionally a receipt); `verify` independently
//! checks a previously emitted `.red` bundle against the original and
//! redacted text it claims to describe. Exit codes follow §6.4 exactly:
//! `0` success, `2` invalid input, `3` invalid policy, `4` span budget
//! exceeded, `5` internal fault.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use vulpes_redact::policy::Policy;
use vulpes_redact::replacement::ReplacementRegistry;
use vulpes_redact::trust_bundle::{bundle, verify_receipt};
use vulpes_redact::{orchestrator, RedactError};

#[derive(Parser)]
#[command(name = "vulpes", version, about = "HIPAA Safe Harbor redaction for clinical free text")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Redact a document.
    Redact {
        /// Path to the input document (UTF-8 text).
        input: PathBuf,
        /// Path to a policy JSON file; defaults to HIPAA_STRICT, overridden
        /// by `VULPES_POLICY_DEFAULT` when `--policy` is not given.
        #[arg(long)]
        policy: Option<PathBuf>,
        /// Where to write the redacted text; defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Where to write the `.red` trust bundle; implies `emit_receipt`.
        #[arg(long)]
        receipt: Option<PathBuf>,
    },
    /// Verify a previously emitted `.red` bundle.
    Verify {
        /// Path to the `.red` bundle.
        receipt: PathBuf,
        /// Path to the original (pre-redaction) document.
        original: PathBuf,
        /// Path to the redacted document.
        redacted: PathBuf,
        #[arg(long)]
        policy: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    vulpes_redact::logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Redact { input, policy, output, receipt } => run_redact(input, policy, output, receipt),
        Command::Verify { receipt, original, redacted, policy } => run_verify(receipt, original, redacted, policy),
    };

    match result {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn load_policy(path: Option<PathBuf>) -> Result<Policy, ExitCode> {
    let path = path.or_else(vulpes_redact::config::policy_default_path);
    let Some(path) = path else { return Ok(Policy::hipaa_strict()) };

    let text = fs::read_to_string(&path).map_err(|e| {
        eprintln!("failed to read policy file {}: {e}", path.display());
        ExitCode::from(3)
    })?;

    let mut policy = Policy::from_json(&text).map_err(|e| {
        eprintln!("invalid policy: {e}");
        ExitCode::from(3)
    })?;

    if let Some(key) = vulpes_redact::config::hmac_key_override() {
        policy.hmac_key = Some(key);
    }
    Ok(policy)
}

fn run_redact(input: PathBuf, policy_path: Option<PathBuf>, output: Option<PathBuf>, receipt_path: Option<PathBuf>) -> Result<ExitCode, ExitCode> {
    let mut policy = load_policy(policy_path)?;
    if receipt_path.is_some() {
        policy.emit_receipt = true;
    }

    let text = fs::read_to_string(&input).map_err(|e| {
        eprintln!("failed to read input {}: {e}", input.display());
        ExitCode::from(2)
    })?;

    let registry = ReplacementRegistry::new();
    let redacted = match orchestrator::redact(&text, policy, None, &registry, None) {
        Ok(r) => r,
        Err(e) => return Err(exit_code_for_error(&e)),
    };

    for warning in &redacted.warnings {
        eprintln!("warning: {warning}");
    }

    match output {
        Some(path) => {
            fs::write(&path, &redacted.text).map_err(|e| {
                eprintln!("failed to write output {}: {e}", path.display());
                ExitCode::from(5)
            })?;
        }
        None => println!("{}", redacted.text),
    }

    if let Some(path) = receipt_path {
        let Some(receipt) = redacted.receipt else {
            eprintln!("receipt requested but was not produced (see warnings above)");
            return Ok(ExitCode::from(5));
        };
        let manifest: Vec<_> = redacted
            .spans
            .iter()
            .map(vulpes_redact::trust_bundle::ManifestEntry::from_span)
            .collect();
        let bytes = bundle::write(&receipt, &manifest, Some(&redacted.text)).map_err(|e| {
            eprintln!("failed to serialise receipt: {e}");
            ExitCode::from(5)
        })?;
        fs::write(&path, bytes).map_err(|e| {
            eprintln!("failed to write receipt {}: {e}", path.display());
            ExitCode::from(5)
        })?;
    }

    Ok(ExitCode::SUCCESS)
}

fn run_verify(receipt_path: PathBuf, original_path: PathBuf, redacted_path: PathBuf, policy_path: Option<PathBuf>) -> Result<ExitCode, ExitCode> {
    let policy = load_policy(policy_path)?;

    let bytes = fs::read(&receipt_path).map_err(|e| {
        eprintln!("failed to read receipt {}: {e}", receipt_path.display());
        ExitCode::from(2)
    })?;
    let parsed = bundle::read(&bytes).map_err(|e| {
        eprintln!("malformed receipt bundle: {e}");
        ExitCode::from(2)
    })?;

    let original = fs::read_to_string(&original_path).map_err(|e| {
        eprintln!("failed to read original {}: {e}", original_path.display());
        ExitCode::from(2)
    })?;
    let redacted = fs::read_to_string(&redacted_path).map_err(|e| {
        eprintln!("failed to read redacted {}: {e}", redacted_path.display());
        ExitCode::from(2)
    })?;

    let result = verify_receipt(&parsed.receipt, &original, &redacted, &parsed.manifest, &policy);
    if result.valid {
        println!("valid");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("invalid: {}", result.reason.unwrap_or_default());
        Ok(ExitCode::from(2))
    }
}

fn exit_code_for_error(err: &RedactError) -> ExitCode {
    match err {
        RedactError::InvalidPolicy(_) => ExitCode::from(3),
        RedactError::InputTooLarge { .. } | RedactError::NotUtf8(_) => ExitCode::from(2),
        RedactError::SpanBudgetExceeded { .. } => ExitCode::from(4),
        RedactError::CancelledBeforeReplacement | RedactError::Trust(_) => ExitCode::from(5),
    }
}
