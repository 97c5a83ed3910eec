//! Argument assembly for a single shoestring invocation.
//!
//! `CommandRequest::args` is pure; `prepare_node_directory` is the only
//! filesystem effect (setup creates `<destination>/node`). `build` runs both.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::error::CommandError;
use super::operation::Operation;

/// Node working directory below the destination.
pub const NODE_DIRECTORY: &str = "node";
pub const SHOESTRING_CONFIG_FILE: &str = "shoestring.ini";
pub const OVERRIDES_FILE: &str = "overrides.ini";
pub const REST_OVERRIDES_FILE: &str = "rest_overrides.json";

/// Parameters of one shoestring invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub operation: Operation,
    pub destination_directory: PathBuf,
    pub shoestring_directory: PathBuf,
    /// Only read by operations that need the CA key.
    pub ca_pem_path: PathBuf,
    pub package: String,
    /// Accepted for callers that track it; does not change the arguments.
    pub has_custom_rest_overrides: bool,
}

impl CommandRequest {
    pub fn new(
        operation: Operation,
        destination_directory: impl Into<PathBuf>,
        shoestring_directory: impl Into<PathBuf>,
        ca_pem_path: impl Into<PathBuf>,
        package: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            destination_directory: destination_directory.into(),
            shoestring_directory: shoestring_directory.into(),
            ca_pem_path: ca_pem_path.into(),
            package: package.into(),
            has_custom_rest_overrides: false,
        }
    }

    #[must_use]
    pub fn with_custom_rest_overrides(mut self, has_custom_rest_overrides: bool) -> Self {
        self.has_custom_rest_overrides = has_custom_rest_overrides;
        self
    }

    /// `<destination_directory>/node`
    pub fn node_directory(&self) -> PathBuf {
        self.destination_directory.join(NODE_DIRECTORY)
    }

    fn shoestring_file(&self, name: &str) -> String {
        path_arg(&self.shoestring_directory.join(name))
    }

    /// Assemble the argument vector without touching the filesystem.
    pub fn args(&self) -> Result<Vec<String>, CommandError> {
        let op = self.operation;
        let command_name = op
            .command_name()
            .ok_or(CommandError::UnsupportedOperation(op))?;

        let mut args = vec![
            command_name.to_string(),
            "--config".to_string(),
            self.shoestring_file(SHOESTRING_CONFIG_FILE),
            "--directory".to_string(),
            path_arg(&self.node_directory()),
        ];

        if op.requires_ca_key() {
            args.extend(["--ca-key-path".to_string(), path_arg(&self.ca_pem_path)]);
        }

        if op.takes_overrides() {
            args.extend([
                "--overrides".to_string(),
                self.shoestring_file(OVERRIDES_FILE),
                "--rest-overrides".to_string(),
                self.shoestring_file(REST_OVERRIDES_FILE),
                "--package".to_string(),
                self.package.clone(),
            ]);
        }

        match op {
            Operation::Setup => args.extend(["--security".to_string(), "insecure".to_string()]),
            Operation::RenewCertificates => args.push("--retain-node-key".to_string()),
            Operation::Upgrade
            | Operation::ResetData
            | Operation::RenewVotingKeys
            | Operation::ImportBootstrap => {}
        }

        debug!(operation = %op, ?args, "assembled shoestring arguments");
        Ok(args)
    }

    /// Create the node directory for setup; no-op for every other operation.
    /// An existing directory is not an error.
    pub fn prepare_node_directory(&self) -> Result<(), CommandError> {
        if self.operation != Operation::Setup {
            return Ok(());
        }
        let path = self.node_directory();
        std::fs::create_dir_all(&path)
            .map_err(|source| CommandError::DirectoryCreation {
                path: path.clone(),
                source,
            })?;
        info!(path = %path.display(), "node directory ready");
        Ok(())
    }

    /// Assemble the arguments, then create the node directory for setup.
    pub fn build(&self) -> Result<Vec<String>, CommandError> {
        let args = self.args()?;
        self.prepare_node_directory()?;
        Ok(args)
    }
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

/// Build the shoestring arguments for `operation`, creating the node
/// directory when the operation is setup.
pub fn build_command(
    operation: Operation,
    destination_directory: impl AsRef<Path>,
    shoestring_directory: impl AsRef<Path>,
    ca_pem_path: impl AsRef<Path>,
    package: &str,
    has_custom_rest_overrides: bool,
) -> Result<Vec<String>, CommandError> {
    CommandRequest::new(
        operation,
        destination_directory.as_ref(),
        shoestring_directory.as_ref(),
        ca_pem_path.as_ref(),
        package,
    )
    .with_custom_rest_overrides(has_custom_rest_overrides)
    .build()
}

/* --------------------------------- Tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Fixture {
        _tmp: TempDir,
        dest: PathBuf,
        shoestring: PathBuf,
        ca: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let tmp = TempDir::new().unwrap();
            let dest = tmp.path().join("dest");
            let shoestring = tmp.path().join("shoestring");
            let ca = tmp.path().join("ca.key.pem");
            Self {
                _tmp: tmp,
                dest,
                shoestring,
                ca,
            }
        }

        fn build(&self, op: Operation) -> Result<Vec<String>, CommandError> {
            build_command(op, &self.dest, &self.shoestring, &self.ca, "mainnet", false)
        }

        fn config(&self) -> String {
            self.shoestring.join("shoestring.ini").display().to_string()
        }

        fn node(&self) -> String {
            self.dest.join("node").display().to_string()
        }
    }

    #[test]
    fn first_element_is_command_name() {
        let fx = Fixture::new();
        for op in Operation::variants().iter().filter(|op| op.is_supported()) {
            let args = fx.build(*op).unwrap();
            assert_eq!(Some(args[0].as_str()), op.command_name());
        }
    }

    #[test]
    fn setup_full_vector_and_directory() {
        let fx = Fixture::new();
        let args = fx.build(Operation::Setup).unwrap();
        let s = |name: &str| fx.shoestring.join(name).display().to_string();
        assert_eq!(
            args,
            vec![
                "setup".to_string(),
                "--config".into(),
                fx.config(),
                "--directory".into(),
                fx.node(),
                "--ca-key-path".into(),
                fx.ca.display().to_string(),
                "--overrides".into(),
                s("overrides.ini"),
                "--rest-overrides".into(),
                s("rest_overrides.json"),
                "--package".into(),
                "mainnet".into(),
                "--security".into(),
                "insecure".into(),
            ]
        );
        assert!(fx.dest.join("node").is_dir());
    }

    #[test]
    fn setup_twice_is_idempotent() {
        let fx = Fixture::new();
        let first = fx.build(Operation::Setup).unwrap();
        let second = fx.build(Operation::Setup).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn upgrade_has_overrides_without_ca_or_security() {
        let fx = Fixture::new();
        let args = fx.build(Operation::Upgrade).unwrap();
        assert_eq!(args[0], "upgrade");
        for flag in ["--overrides", "--rest-overrides", "--package"] {
            assert!(args.iter().any(|a| a == flag), "missing {flag}");
        }
        assert!(!args.iter().any(|a| a == "--ca-key-path"));
        assert!(!args.iter().any(|a| a == "--security" || a == "insecure"));
        assert!(!fx.dest.exists(), "only setup creates directories");
    }

    #[test]
    fn reset_data_is_minimal() {
        let fx = Fixture::new();
        let args = fx.build(Operation::ResetData).unwrap();
        assert_eq!(
            args,
            vec![
                "reset-data".to_string(),
                "--config".into(),
                fx.config(),
                "--directory".into(),
                fx.node(),
            ]
        );
    }

    #[test]
    fn renew_certificates_retains_node_key() {
        let fx = Fixture::new();
        let args = fx.build(Operation::RenewCertificates).unwrap();
        let ca_pos = args.iter().position(|a| a == "--ca-key-path").unwrap();
        assert_eq!(args[ca_pos + 1], fx.ca.display().to_string());
        assert_eq!(args.last().map(String::as_str), Some("--retain-node-key"));
        for flag in ["--overrides", "--rest-overrides", "--package"] {
            assert!(!args.iter().any(|a| a == flag), "unexpected {flag}");
        }
    }

    #[test]
    fn renew_voting_keys_is_minimal() {
        let fx = Fixture::new();
        let args = fx.build(Operation::RenewVotingKeys).unwrap();
        assert_eq!(
            args,
            vec![
                "renew-voting-keys".to_string(),
                "--config".into(),
                fx.config(),
                "--directory".into(),
                fx.node(),
            ]
        );
    }

    #[test]
    fn import_bootstrap_is_rejected_without_side_effects() {
        let fx = Fixture::new();
        let err = fx.build(Operation::ImportBootstrap).unwrap_err();
        assert!(matches!(
            err,
            CommandError::UnsupportedOperation(Operation::ImportBootstrap)
        ));
        assert!(!fx.dest.exists());
    }

    #[test]
    fn custom_rest_overrides_does_not_change_arguments() {
        let fx = Fixture::new();
        let base = CommandRequest::new(
            Operation::Upgrade,
            &fx.dest,
            &fx.shoestring,
            &fx.ca,
            "testnet",
        );
        let flagged = base.clone().with_custom_rest_overrides(true);
        assert_eq!(base.args().unwrap(), flagged.args().unwrap());
    }

    #[test]
    fn args_alone_never_creates_directory() {
        let fx = Fixture::new();
        let req = CommandRequest::new(Operation::Setup, &fx.dest, &fx.shoestring, &fx.ca, "p");
        req.args().unwrap();
        assert!(!fx.dest.exists());
        req.prepare_node_directory().unwrap();
        assert!(req.node_directory().is_dir());
    }

    #[test]
    fn directory_creation_failure_is_reported() {
        let fx = Fixture::new();
        // a regular file where the destination directory should be
        std::fs::write(&fx.dest, b"not a directory").unwrap();
        let err = fx.build(Operation::Setup).unwrap_err();
        match err {
            CommandError::DirectoryCreation { path, .. } => {
                assert_eq!(path, fx.dest.join("node"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
