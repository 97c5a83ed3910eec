/*!
`build.rs`

Implements `shoestring-cmd build <operation>`: resolves the request from CLI
flags and the settings file, assembles the shoestring argument vector and
prints it. The command is never executed.

Resolution (per field): CLI flag > settings file. Required inputs:
  - destination + shoestring directories: always
  - CA key path: operations that need the CA key (setup, renew-certificates)
  - package: operations that pass overrides (setup, upgrade)

Setup creates `<destination>/node` unless `--dry-run` is given.

Output modes:
  default   box header + numbered argument table + shell-quoted command line
  --plain   shell-quoted command line only (script friendly)
  --json    {"status":"ok","operation":..,"program":[..],"args":[..],
             "command_line":"..","dry_run":false}
*/

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use tracing::debug;

use crate::cmd::format::{Role, StyleOptions, box_header, color, emoji, table};
use crate::cmd::output_error;
use shoestring_cmd::config::Settings;
use shoestring_cmd::shoestring::{CommandRequest, Operation};

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Operation to build the shoestring command for
    pub operation: Operation,

    /// Node destination directory (the node lives in <DIR>/node)
    #[arg(short = 'd', long = "destination", value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Directory holding shoestring.ini, overrides.ini and rest_overrides.json
    #[arg(short = 's', long = "shoestring-dir", value_name = "DIR")]
    pub shoestring_dir: Option<PathBuf>,

    /// CA private key (PEM); needed by setup and renew-certificates
    #[arg(long = "ca-key", value_name = "PATH")]
    pub ca_key: Option<PathBuf>,

    /// Target package identifier; needed by setup and upgrade
    #[arg(long, value_name = "PACKAGE")]
    pub package: Option<String>,

    /// Mark rest_overrides.json as user-customized
    #[arg(long)]
    pub custom_rest_overrides: bool,

    /// Assemble arguments only; do not create the node directory
    #[arg(long)]
    pub dry_run: bool,

    /// Output JSON
    #[arg(long, conflicts_with = "plain")]
    pub json: bool,

    /// Print only the shell-quoted command line
    #[arg(long)]
    pub plain: bool,
}

pub fn execute_build(args: BuildArgs, settings: &Settings) -> Result<()> {
    let req = match resolve_request(&args, settings) {
        Ok(r) => r,
        Err(e) => return output_error(args.json, "Build Error", &format!("{e:#}")),
    };

    let program = match settings.program_tokens() {
        Ok(p) => p,
        Err(e) => return output_error(args.json, "Build Error", &format!("{e:#}")),
    };

    let built = if args.dry_run { req.args() } else { req.build() };
    let shoestring_args = match built {
        Ok(a) => a,
        Err(e) => {
            let e = anyhow::Error::from(e);
            return output_error(args.json, "Build Error", &format!("{e:#}"));
        }
    };
    debug!(
        operation = %req.operation,
        dry_run = args.dry_run,
        count = shoestring_args.len(),
        "shoestring command built"
    );

    let line = command_line(&program, &shoestring_args);

    if args.json {
        let out = serde_json::json!({
            "status": "ok",
            "operation": req.operation,
            "program": program,
            "args": shoestring_args,
            "command_line": line,
            "dry_run": args.dry_run,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).unwrap_or_else(|_| out.to_string())
        );
        return Ok(());
    }

    if args.plain {
        println!("{line}");
        return Ok(());
    }

    let style = StyleOptions::detect();
    let mut subtitle = format!("{} args", shoestring_args.len());
    if args.dry_run {
        subtitle.push_str(" • dry run");
    }
    println!(
        "{}",
        box_header(
            format!("{} {}", emoji("success", &style), req.operation),
            Some(subtitle),
            &style,
        )
    );

    let rows: Vec<Vec<String>> = shoestring_args
        .iter()
        .enumerate()
        .map(|(i, a)| vec![i.to_string(), a.clone()])
        .collect();
    println!("{}", table(&["#", "ARG"], &rows, &style));
    println!();
    println!("{}", color(Role::Success, &line, &style));

    if req.operation == Operation::Setup && !args.dry_run {
        println!(
            "\n{} {}",
            emoji("folder", &style),
            color(
                Role::Dim,
                format!("node directory: {}", req.node_directory().display()),
                &style
            )
        );
    }
    Ok(())
}

/// Merge CLI flags over settings and check the inputs the operation needs.
pub fn resolve_request(args: &BuildArgs, settings: &Settings) -> Result<CommandRequest> {
    let op = args.operation;

    let Some(destination) = args
        .destination
        .clone()
        .or_else(|| settings.destination_directory.clone())
    else {
        bail!("no destination directory (use --destination or destination_directory in settings)");
    };

    let Some(shoestring_dir) = args
        .shoestring_dir
        .clone()
        .or_else(|| settings.shoestring_directory.clone())
    else {
        bail!("no shoestring directory (use --shoestring-dir or shoestring_directory in settings)");
    };

    let ca_key = args.ca_key.clone().or_else(|| settings.ca_pem_path.clone());
    if op.requires_ca_key() && ca_key.is_none() {
        bail!("operation '{op}' requires a CA key (use --ca-key or ca_pem_path in settings)");
    }

    let package = args.package.clone().or_else(|| settings.package.clone());
    if op.takes_overrides() && package.as_deref().is_none_or(|p| p.trim().is_empty()) {
        bail!("operation '{op}' requires a package (use --package or package in settings)");
    }

    let custom_rest_overrides =
        args.custom_rest_overrides || settings.has_custom_rest_overrides.unwrap_or(false);

    Ok(CommandRequest::new(
        op,
        destination,
        shoestring_dir,
        ca_key.unwrap_or_default(),
        package.unwrap_or_default(),
    )
    .with_custom_rest_overrides(custom_rest_overrides))
}

/// Shell-quoted `program args...`.
pub fn command_line(program: &[String], args: &[String]) -> String {
    shell_words::join(program.iter().chain(args))
}
