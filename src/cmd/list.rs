/*!
`list.rs`

Implements `shoestring-cmd list`: one row per operation with its shoestring
command name and which optional inputs it consumes.

JSON Output Shape:
{
  "status": "ok",
  "count": 6,
  "operations": [
    { "name": "setup", "command": "setup", "requires_ca_key": true,
      "takes_overrides": true, "supported": true },
    ...
  ]
}
*/

use anyhow::Result;
use clap::Args;

use crate::cmd::format::{Role, StyleOptions, box_header, color, emoji, table};
use shoestring_cmd::shoestring::{Operation, requires_ca_key};

/// CLI arguments for `shoestring-cmd list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

pub fn execute_list(args: ListArgs) -> Result<()> {
    let ops = Operation::variants();

    if args.json {
        println!("{}", operations_json(ops));
        return Ok(());
    }

    let style = StyleOptions::detect();
    println!(
        "{}",
        box_header(
            format!("{} Operations ({})", emoji("list", &style), ops.len()),
            Some("shoestring"),
            &style,
        )
    );

    let yes_no = |b: bool| (if b { "yes" } else { "-" }).to_string();
    let rows: Vec<Vec<String>> = ops
        .iter()
        .map(|op| {
            vec![
                op.to_string(),
                op.command_name().unwrap_or("(unsupported)").to_string(),
                yes_no(requires_ca_key(*op)),
                yes_no(op.takes_overrides()),
            ]
        })
        .collect();
    println!(
        "{}",
        table(
            &["OPERATION", "COMMAND", "CA KEY", "OVERRIDES"],
            &rows,
            &style
        )
    );
    println!(
        "\n{} {}",
        emoji("info", &style),
        color(
            Role::Dim,
            "Use `shoestring-cmd get <operation>` for the argument layout",
            &style
        )
    );
    Ok(())
}

fn operations_json(ops: &[Operation]) -> serde_json::Value {
    let items: Vec<_> = ops
        .iter()
        .map(|op| {
            serde_json::json!({
                "name": op,
                "command": op.command_name(),
                "requires_ca_key": requires_ca_key(*op),
                "takes_overrides": op.takes_overrides(),
                "supported": op.is_supported(),
            })
        })
        .collect();
    serde_json::json!({
        "status": "ok",
        "count": items.len(),
        "operations": items,
    })
}
