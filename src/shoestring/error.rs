use std::path::PathBuf;

use thiserror::Error;

use super::operation::Operation;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown shoestring operation: '{0}'")]
    InvalidOperation(String),

    #[error("operation '{0}' has no shoestring command mapping")]
    UnsupportedOperation(Operation),

    #[error("failed to create node directory {}", path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
