/*!
Command dispatcher module.

Layout:
  src/cmd/
    mod.rs     (this file: module declarations + re-exports)
    list.rs    (ListArgs  + execute_list)
    get.rs     (GetArgs   + execute_get)
    build.rs   (BuildArgs + execute_build)
    format.rs  (box / table / color helpers for human output)

Conventions:
  - Each subcommand module exposes one public `execute_*` function
    returning `anyhow::Result<()>`.
  - Argument structs derive `clap::Args`.
  - `--json` output never goes through `format.rs`.
*/

pub mod build;
pub mod format;
pub mod get;
pub mod list;

pub use build::{BuildArgs, execute_build};
pub use get::{GetArgs, execute_get};
pub use list::{ListArgs, execute_list};

use format::{Role, StyleOptions, box_header, color, emoji};

/// Print an error (JSON object or red box) and return it as `Err`.
pub(crate) fn output_error(json: bool, title: &str, msg: &str) -> anyhow::Result<()> {
    if json {
        let err = serde_json::json!({"status":"error","error":msg});
        println!(
            "{}",
            serde_json::to_string_pretty(&err).unwrap_or_else(|_| err.to_string())
        );
    } else {
        let style = StyleOptions::detect();
        let boxed = box_header(
            format!("{} {title}", emoji("error", &style)),
            Some(color(Role::Error, msg, &style)),
            &style,
        );
        eprintln!("{boxed}");
    }
    anyhow::bail!(msg.to_string())
}
