/*!
`get.rs`

Implements `shoestring-cmd get <operation>`: shows the shoestring command an
operation maps to and its argument layout, rendered with placeholder paths
(`<shoestring>/shoestring.ini`, `<destination>/node`, ...). Nothing is
created on disk.

JSON Output Shape:
{
  "status": "ok",
  "operation": "renew-certificates",
  "command": "renew-certificates",
  "requires_ca_key": true,
  "takes_overrides": false,
  "creates_node_directory": false,
  "template": ["renew-certificates", "--config", "<shoestring>/shoestring.ini", ...]
}
*/

use anyhow::Result;
use clap::Args;

use crate::cmd::format::{Role, StyleOptions, box_header, color, emoji, table};
use crate::cmd::output_error;
use shoestring_cmd::shoestring::{CommandRequest, Operation};

const PLACEHOLDER_DESTINATION: &str = "<destination>";
const PLACEHOLDER_SHOESTRING: &str = "<shoestring>";
const PLACEHOLDER_CA_KEY: &str = "<ca-key>";
const PLACEHOLDER_PACKAGE: &str = "<package>";

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Operation to describe
    pub operation: Operation,

    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

/// Argument layout with placeholder values.
pub fn template(operation: Operation) -> Result<Vec<String>> {
    let req = CommandRequest::new(
        operation,
        PLACEHOLDER_DESTINATION,
        PLACEHOLDER_SHOESTRING,
        PLACEHOLDER_CA_KEY,
        PLACEHOLDER_PACKAGE,
    );
    Ok(req.args()?)
}

pub fn execute_get(args: GetArgs) -> Result<()> {
    let op = args.operation;
    let tpl = match template(op) {
        Ok(t) => t,
        Err(e) => return output_error(args.json, "Unsupported Operation", &e.to_string()),
    };

    if args.json {
        let out = serde_json::json!({
            "status": "ok",
            "operation": op,
            "command": op.command_name(),
            "requires_ca_key": op.requires_ca_key(),
            "takes_overrides": op.takes_overrides(),
            "creates_node_directory": op == Operation::Setup,
            "template": tpl,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).unwrap_or_else(|_| out.to_string())
        );
        return Ok(());
    }

    let style = StyleOptions::detect();
    println!(
        "{}",
        box_header(
            format!("{} {op}", emoji("info", &style)),
            Some(format!("{} args", tpl.len())),
            &style,
        )
    );

    let rows: Vec<Vec<String>> = tpl
        .iter()
        .enumerate()
        .map(|(i, a)| vec![i.to_string(), a.clone()])
        .collect();
    println!("{}", table(&["#", "ARG"], &rows, &style));
    println!();

    if op.requires_ca_key() {
        println!(
            "{} {}",
            emoji("key", &style),
            color(Role::Warning, "requires the CA private key (--ca-key)", &style)
        );
    }
    if op == Operation::Setup {
        println!(
            "{} {}",
            emoji("folder", &style),
            color(Role::Dim, "creates <destination>/node if missing", &style)
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renew_certificates_template() {
        let tpl = template(Operation::RenewCertificates).unwrap();
        assert_eq!(tpl[0], "renew-certificates");
        assert!(tpl.contains(&"<ca-key>".to_string()));
        assert_eq!(tpl.last().unwrap(), "--retain-node-key");
    }

    #[test]
    fn template_does_not_create_directory() {
        template(Operation::Setup).unwrap();
        assert!(!std::path::Path::new(PLACEHOLDER_DESTINATION).exists());
    }

    #[test]
    fn import_bootstrap_has_no_template() {
        let err = template(Operation::ImportBootstrap).unwrap_err();
        assert!(err.to_string().contains("no shoestring command mapping"));
    }
}
