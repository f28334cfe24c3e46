use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Signer};
use solana_sdk::transaction::Transaction;
use voting_dapp::pda;

use voting_client::reader;
use voting_client::submit::submit;
use voting_client::{
    builder, fetch_election_snapshot, resolve_role, tally, ClientConfig, Confirmation, ErrorClass,
    Outcome, Role, RpcReader,
};

#[derive(Parser, Debug)]
#[command(name = "voting-cli", about = "Inspect and vote in on-chain elections", author, version)]
struct Cli {
    #[command(flatten)]
    config: ClientConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every election
    Elections,
    /// Show standings for one election
    Results { election_id: u64 },
    /// Show what a wallet is allowed to do
    Role { wallet: Pubkey },
    /// Check whether a voter has a vote on record
    HasVoted { election_id: u64, voter: Pubkey },
    /// Cast a vote, signing with --keypair
    Vote { election_id: u64, candidate_id: u32 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.config;
    let rpc = RpcReader::new(config.rpc_url.clone(), config.program_id);
    let policy = config.retry_policy();

    match cli.command {
        Command::Elections => {
            for (address, election) in reader::list_elections(&rpc).await? {
                println!(
                    "#{} {:?} {:?} \"{}\" candidates={} votes={} ({})",
                    election.election_id,
                    election.status,
                    election.voter_registration_type,
                    election.title,
                    election.candidate_count,
                    election.total_votes,
                    address
                );
            }
        }
        Command::Results { election_id } => {
            let snapshot = fetch_election_snapshot(&rpc, &config.program_id, election_id, &policy)
                .await
                .with_context(|| format!("reading election {election_id}"))?;
            if !snapshot.consistent {
                eprintln!(
                    "warning: candidate counts ({}) differ from the election total ({})",
                    snapshot.candidate_votes(),
                    snapshot.election.total_votes
                );
            }
            let standings = tally(snapshot.candidates.iter().map(|(a, c)| (a, c)));
            println!("{} [{:?}]", snapshot.election.title, snapshot.election.status);
            for row in &standings.rows {
                println!(
                    "  {:>3}  {:<30} {:>8}  {:>5.1}%",
                    row.candidate_id,
                    row.name,
                    row.votes,
                    standings.share(row)
                );
            }
            match standings.outcome {
                Outcome::NoVotes => println!("no votes yet"),
                Outcome::Winner(id) => println!("leading: candidate {id}"),
                Outcome::Draw(ids) => println!("draw between candidates {ids:?}"),
            }
        }
        Command::Role { wallet } => match resolve_role(&config, &wallet, &rpc).await? {
            Role::SuperAdmin => println!("super admin"),
            Role::Admin { permissions } => println!("admin {permissions:?}"),
            Role::Voter => println!("voter"),
        },
        Command::HasVoted { election_id, voter } => {
            let election = pda::election_address(election_id, &config.program_id).0;
            let voted = reader::has_voted(&rpc, &config.program_id, &election, &voter).await?;
            println!("{voted}");
        }
        Command::Vote {
            election_id,
            candidate_id,
        } => {
            let path = config
                .keypair
                .as_ref()
                .context("--keypair is required to vote")?;
            let payer = read_keypair_file(path)
                .map_err(|e| anyhow!("reading keypair {}: {e}", path.display()))?;
            let voter = payer.pubkey();

            let (election_key, election) =
                reader::fetch_election(&rpc, &config.program_id, election_id).await?;
            if reader::has_voted(&rpc, &config.program_id, &election_key, &voter).await? {
                println!("already voted");
                return Ok(());
            }
            if candidate_id >= election.candidate_count {
                bail!("election {election_id} has no candidate {candidate_id}");
            }

            let ix = builder::cast_vote(
                &config.program_id,
                &voter,
                election_id,
                candidate_id,
                election.requires_registration(),
            );
            let blockhash = rpc.client().get_latest_blockhash().await?;
            let tx = Transaction::new_signed_with_payer(&[ix], Some(&voter), &[&payer], blockhash);
            let record = pda::vote_record_address(&election_key, &voter, &config.program_id).0;

            match submit(&rpc, &tx, &record, &policy).await? {
                Confirmation::Confirmed => println!("vote recorded ({})", tx.signatures[0]),
                Confirmation::Failed(ErrorClass::AlreadySatisfied) => println!("already voted"),
                Confirmation::Failed(class) => bail!("vote failed ({class:?})"),
                Confirmation::Unknown => {
                    bail!("vote not confirmed; run has-voted later to check")
                }
            }
        }
    }
    Ok(())
}
