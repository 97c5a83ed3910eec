//! shoestring-cmd: build argument vectors for the `shoestring` node tool.

pub mod config;
pub mod shoestring;
pub mod utils;
