//! One module per subcommand.

pub mod add;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod generate;
pub mod get;
pub mod init;
pub mod list;
pub mod setting;
pub mod vaults;
