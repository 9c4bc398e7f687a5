//! `passvault generate` — print a random password.

use crate::cli::{settings, GenerateArgs};
use crate::errors::Result;
use crate::generator;

/// Execute the `generate` command.
pub fn execute(args: &GenerateArgs) -> Result<()> {
    let config = args.apply(settings()?.generator);
    let password = generator::generate(&config)?;
    println!("{}", password.as_str());
    Ok(())
}
