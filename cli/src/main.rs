//! abidecoder CLI — decode EVM call data and event logs against an ABI.
//!
//! # Commands
//! ```text
//! abidecoder decode-call --abi <path.json> --calldata <hex> [--constructor]
//! abidecoder decode-log  --abi <path.json> --topics <hex>... [--data <hex>] [--address <hex>]
//! abidecoder decode-logs --abi <path.json> --logs <logs.json> [--keep-non-decoded]
//! abidecoder signatures  --abi <path.json>
//! ```

use abidecoder_core::{
    call::DecodedMethod,
    event::{DecodedLog, LogEntry},
    outcome::DecodeOutcome,
};
use abidecoder_evm::AbiDecoder;
use abidecoder_observability::init_tracing;
use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(
    name = "abidecoder",
    about = "Decode EVM call data and event logs against a contract ABI",
    version
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML or JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode function call data (or constructor arguments) using an ABI JSON file
    #[command(name = "decode-call")]
    DecodeCall {
        /// Path to the ABI JSON file
        #[arg(long)]
        abi: PathBuf,
        /// Raw call data (0x-prefixed hex)
        #[arg(long)]
        calldata: String,
        /// Treat the input as selector-less constructor arguments
        #[arg(long)]
        constructor: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode one EVM event log from raw topics + data
    #[command(name = "decode-log")]
    DecodeLog {
        /// Path to the ABI JSON file
        #[arg(long)]
        abi: PathBuf,
        /// topics[0] = event topic hash, topics[1..] = indexed params
        #[arg(long, num_args = 1..)]
        topics: Vec<String>,
        /// Non-indexed params (hex, 0x-prefixed)
        #[arg(long, default_value = "0x")]
        data: String,
        /// Emitting contract address
        #[arg(long, default_value = "0x0000000000000000000000000000000000000000")]
        address: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a JSON array of `{address, topics, data}` logs
    #[command(name = "decode-logs")]
    DecodeLogs {
        /// Path to the ABI JSON file
        #[arg(long)]
        abi: PathBuf,
        /// Path to the logs JSON file
        #[arg(long)]
        logs: PathBuf,
        /// Report logs that do not decode instead of dropping them
        #[arg(long)]
        keep_non_decoded: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List canonical signatures and selectors/topics of an ABI
    Signatures {
        /// Path to the ABI JSON file
        #[arg(long)]
        abi: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    }
    .with_verbose(cli.verbose);
    init_tracing(&config.log).map_err(|e| anyhow!("initialise logging: {e}"))?;

    match cli.command {
        Commands::DecodeCall { abi, calldata, constructor, json } => {
            cmd_decode_call(&abi, &calldata, constructor, json)
        }

        Commands::DecodeLog { abi, topics, data, address, json } => {
            cmd_decode_log(&abi, LogEntry::new(address, topics, data), json)
        }

        Commands::DecodeLogs { abi, logs, keep_non_decoded, json } => {
            cmd_decode_logs(&abi, &logs, keep_non_decoded || config.keep_non_decoded_logs, json)
        }

        Commands::Signatures { abi, json } => cmd_signatures(&abi, json),
    }
}

fn load_decoder(abi_path: &Path) -> Result<AbiDecoder> {
    let abi_json = std::fs::read_to_string(abi_path)
        .with_context(|| format!("read ABI file '{}'", abi_path.display()))?;
    let mut decoder = AbiDecoder::new();
    let count = decoder
        .add_abi_json(&abi_json)
        .with_context(|| format!("register ABI '{}'", abi_path.display()))?;
    tracing::debug!(items = count, path = %abi_path.display(), "ABI loaded");
    Ok(decoder)
}

// ─── Command implementations ─────────────────────────────────────────────────

fn cmd_decode_call(
    abi_path: &Path,
    calldata: &str,
    constructor: bool,
    as_json: bool,
) -> Result<()> {
    let decoder = load_decoder(abi_path)?;
    let outcome = if constructor {
        decoder.decode_constructor(calldata)
    } else {
        decoder.decode_method(calldata)
    };

    let call = match outcome {
        DecodeOutcome::Decoded(call) => call,
        DecodeOutcome::Unresolved if constructor => bail!("ABI has no constructor"),
        DecodeOutcome::Unresolved => bail!("no function or error in the ABI matches the selector"),
        DecodeOutcome::Failed(e) => return Err(e).context("decode call data"),
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&call)?);
    } else {
        print_method(&call);
    }
    Ok(())
}

fn cmd_decode_log(abi_path: &Path, entry: LogEntry, as_json: bool) -> Result<()> {
    let decoder = load_decoder(abi_path)?;
    let log = match decoder.decode_log(&entry) {
        None => bail!("log has no topics"),
        Some(DecodeOutcome::Decoded(log)) => log,
        Some(DecodeOutcome::Unresolved) => bail!("no event in the ABI matches topics[0]"),
        Some(DecodeOutcome::Failed(e)) => return Err(e).context("decode log"),
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&log)?);
    } else {
        print_log(&log);
    }
    Ok(())
}

fn cmd_decode_logs(abi_path: &Path, logs_path: &Path, keep: bool, as_json: bool) -> Result<()> {
    let mut decoder = load_decoder(abi_path)?;
    decoder.set_log_retention(keep);

    let logs_json = std::fs::read_to_string(logs_path)
        .with_context(|| format!("read logs file '{}'", logs_path.display()))?;
    let entries: Vec<LogEntry> = serde_json::from_str(&logs_json)
        .with_context(|| format!("parse logs file '{}'", logs_path.display()))?;

    let outcomes = decoder.decode_logs_par(&entries);

    if as_json {
        let out = outcomes.iter().map(outcome_json).collect::<Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let decoded = outcomes.iter().filter(|o| o.is_decoded()).count();
        println!("Decoded {decoded} of {} logs", entries.len());
        for outcome in &outcomes {
            match outcome {
                DecodeOutcome::Decoded(log) => print_log(log),
                DecodeOutcome::Unresolved => println!("(unresolved)"),
                DecodeOutcome::Failed(e) => println!("(failed: {e})"),
            }
        }
    }
    Ok(())
}

fn cmd_signatures(abi_path: &Path, as_json: bool) -> Result<()> {
    let decoder = load_decoder(abi_path)?;

    let mut rows = Vec::new();
    for item in decoder.interface_items() {
        let signature = item.signature()?;
        let key = item.signature_key()?.map(|k| k.to_string());
        rows.push((item.kind().to_string(), signature, key));
    }

    if as_json {
        let out: Vec<Value> = rows
            .iter()
            .map(|(kind, sig, key)| json!({ "kind": kind, "signature": sig, "key": key }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for (kind, sig, key) in &rows {
            println!(
                "{:<12} {:<68} {}",
                kind,
                key.as_deref().unwrap_or("-"),
                sig.as_deref().unwrap_or("-")
            );
        }
    }
    Ok(())
}

// ─── Output helpers ──────────────────────────────────────────────────────────

fn outcome_json(outcome: &DecodeOutcome<DecodedLog>) -> Result<Value> {
    Ok(match outcome {
        DecodeOutcome::Decoded(log) => serde_json::to_value(log)?,
        DecodeOutcome::Unresolved => Value::Null,
        DecodeOutcome::Failed(e) => json!({ "error": e.to_string() }),
    })
}

fn print_method(call: &DecodedMethod) {
    println!("Function:  {}", call.name);
    println!("Inputs:");
    for p in &call.params {
        println!("  {} ({}): {}", p.name, p.ty, p.value);
    }
}

fn print_log(log: &DecodedLog) {
    println!("Event:    {}", log.name);
    println!("Address:  {}", log.address);
    println!("Params:");
    for p in &log.params {
        println!("  {} ({}): {}", p.name, p.ty, p.value);
    }
}
