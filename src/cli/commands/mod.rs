//! One module per subcommand.

pub mod add;
pub mod delete;
pub mod generate;
pub mod get;
pub mod list;
pub mod update;
