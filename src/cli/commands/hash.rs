//! Hash command - digest the contents of a resource

use crate::cli::args::HashArgs;
use crate::config::Config;
use crate::digest::{self, DigestAlgorithm};
use crate::error::ReslocResult;
use crate::resolve::Resolver;

/// Execute the hash command
pub fn execute(args: HashArgs, resolver: &Resolver, config: &Config) -> ReslocResult<()> {
    let algorithm = select_algorithm(args.algorithm.as_deref(), config)?;
    let bytes = digest::digest_identifier(resolver, &args.identifier, algorithm)?;

    println!("{}  {}  {}", digest::to_hex(&bytes), algorithm, args.identifier);
    Ok(())
}

/// Flag wins over config, config over platform default
fn select_algorithm(flag: Option<&str>, config: &Config) -> ReslocResult<DigestAlgorithm> {
    match flag {
        Some(name) => name.parse(),
        None => config.digest.algorithm(),
    }
}
