//! Shoestring command construction.
//!
//! Operation -> ordered argv for the external `shoestring` tool.
//! Nothing here spawns processes; setup is the only operation with a
//! filesystem effect (node directory creation).

pub mod command;
pub mod error;
pub mod operation;

pub use command::{CommandRequest, build_command};
pub use error::CommandError;
pub use operation::{Operation, requires_ca_key};
