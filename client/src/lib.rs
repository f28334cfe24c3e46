//! Off-chain companion to the `voting_dapp` program: reads and decodes its
//! accounts, builds its instructions, confirms submissions and tallies
//! results.

pub mod builder;
pub mod config;
pub mod error;
pub mod reader;
pub mod results;
pub mod retry;
pub mod submit;

#[cfg(test)]
mod testing;

pub use config::ClientConfig;
pub use error::{ClientError, ErrorClass};
pub use reader::{fetch_election_snapshot, resolve_role, LedgerReader, Role, RpcReader};
pub use results::{tally, Outcome, Standings};
pub use retry::RetryPolicy;
pub use submit::{confirm_or_refetch, Confirmation};
