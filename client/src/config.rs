use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use solana_sdk::pubkey::Pubkey;

use crate::retry::RetryPolicy;

/// Connection and identity settings, from flags or `VOTING_*` variables.
#[derive(Args, Clone, Debug)]
pub struct ClientConfig {
    /// JSON-RPC endpoint of the cluster
    #[arg(long, env = "VOTING_RPC_URL", default_value = "http://127.0.0.1:8899", global = true)]
    pub rpc_url: String,

    /// Address the voting program is deployed at
    #[arg(long, env = "VOTING_PROGRAM_ID", default_value_t = voting_dapp::ID, global = true)]
    pub program_id: Pubkey,

    /// Key that initialized the admin registry
    #[arg(long, env = "VOTING_SUPER_ADMIN", global = true, required = false)]
    pub super_admin: Pubkey,

    /// Keypair file used to sign transactions
    #[arg(long, env = "VOTING_KEYPAIR", global = true)]
    pub keypair: Option<PathBuf>,

    #[arg(long, default_value_t = 5, global = true)]
    pub max_attempts: u32,

    #[arg(long, default_value_t = 500, global = true)]
    pub initial_backoff_ms: u64,

    #[arg(long, default_value_t = 8_000, global = true)]
    pub max_backoff_ms: u64,
}

impl ClientConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
            ..RetryPolicy::default()
        }
    }
}
