//! Read side: fetching and decoding program accounts.
//!
//! Everything goes through [`LedgerReader`] so the same logic runs against a
//! live cluster or an in-memory ledger.

use anchor_lang::{AccountDeserialize, Discriminator};
use solana_account_decoder::UiAccountEncoding;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::TransactionError;
use voting_dapp::pda;
use voting_dapp::states::{
    Admin, AdminPermissions, AdminRegistry, Candidate, Election, VoteRecord, VoterRegistration,
};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::retry::RetryPolicy;

/// Byte comparison against raw account data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountFilter {
    pub offset: usize,
    pub bytes: Vec<u8>,
}

impl AccountFilter {
    /// Selects accounts of type `T`.
    pub fn discriminator<T: Discriminator>() -> Self {
        Self {
            offset: 0,
            bytes: T::DISCRIMINATOR.to_vec(),
        }
    }

    /// Selects accounts whose first field is `election`. Candidates, voter
    /// registrations and vote records all store it right after the
    /// discriminator.
    pub fn by_election(election: &Pubkey) -> Self {
        Self {
            offset: 8,
            bytes: election.to_bytes().to_vec(),
        }
    }

    pub fn matches(&self, data: &[u8]) -> bool {
        data.get(self.offset..self.offset + self.bytes.len()) == Some(self.bytes.as_slice())
    }

    fn to_rpc(&self) -> RpcFilterType {
        RpcFilterType::Memcmp(Memcmp::new_raw_bytes(self.offset, self.bytes.clone()))
    }
}

#[allow(async_fn_in_trait)]
pub trait LedgerReader {
    /// Raw data of one account, `None` when it does not exist.
    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, ClientError>;

    /// Every program account matching all `filters`.
    async fn program_accounts(
        &self,
        filters: &[AccountFilter],
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, ClientError>;
}

#[allow(async_fn_in_trait)]
pub trait SignatureTracker {
    /// `None` while the cluster has not processed the signature.
    async fn signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<Result<(), TransactionError>>, ClientError>;
}

pub struct RpcReader {
    client: RpcClient,
    program_id: Pubkey,
}

impl RpcReader {
    pub fn new(rpc_url: String, program_id: Pubkey) -> Self {
        Self {
            client: RpcClient::new_with_commitment(rpc_url, CommitmentConfig::confirmed()),
            program_id,
        }
    }

    pub fn client(&self) -> &RpcClient {
        &self.client
    }
}

impl LedgerReader for RpcReader {
    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, ClientError> {
        let response = self
            .client
            .get_account_with_commitment(address, self.client.commitment())
            .await?;
        Ok(response.value.map(|account| account.data))
    }

    async fn program_accounts(
        &self,
        filters: &[AccountFilter],
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, ClientError> {
        let config = RpcProgramAccountsConfig {
            filters: Some(filters.iter().map(AccountFilter::to_rpc).collect()),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.client.commitment()),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };
        let accounts = self
            .client
            .get_program_accounts_with_config(&self.program_id, config)
            .await?;
        Ok(accounts
            .into_iter()
            .map(|(address, account)| (address, account.data))
            .collect())
    }
}

impl SignatureTracker for RpcReader {
    async fn signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<Result<(), TransactionError>>, ClientError> {
        Ok(self.client.get_signature_status(signature).await?)
    }
}

pub fn decode<T: AccountDeserialize>(address: &Pubkey, data: &[u8]) -> Result<T, ClientError> {
    T::try_deserialize(&mut &data[..]).map_err(|e| ClientError::Decode(*address, e.to_string()))
}

pub async fn fetch<T, R>(reader: &R, address: &Pubkey) -> Result<Option<T>, ClientError>
where
    T: AccountDeserialize,
    R: LedgerReader,
{
    match reader.account_data(address).await? {
        Some(data) => decode(address, &data).map(Some),
        None => Ok(None),
    }
}

async fn fetch_all<T, R>(reader: &R, filters: &[AccountFilter]) -> Result<Vec<(Pubkey, T)>, ClientError>
where
    T: AccountDeserialize,
    R: LedgerReader,
{
    reader
        .program_accounts(filters)
        .await?
        .into_iter()
        .map(|(address, data)| decode(&address, &data).map(|account| (address, account)))
        .collect()
}

pub async fn fetch_registry<R: LedgerReader>(
    reader: &R,
    program_id: &Pubkey,
) -> Result<AdminRegistry, ClientError> {
    let address = pda::admin_registry_address(program_id).0;
    fetch(reader, &address)
        .await?
        .ok_or(ClientError::AccountNotFound(address))
}

pub async fn fetch_election<R: LedgerReader>(
    reader: &R,
    program_id: &Pubkey,
    election_id: u64,
) -> Result<(Pubkey, Election), ClientError> {
    let address = pda::election_address(election_id, program_id).0;
    let election = fetch(reader, &address)
        .await?
        .ok_or(ClientError::AccountNotFound(address))?;
    Ok((address, election))
}

/// All elections, oldest first.
pub async fn list_elections<R: LedgerReader>(reader: &R) -> Result<Vec<(Pubkey, Election)>, ClientError> {
    let mut elections: Vec<(Pubkey, Election)> =
        fetch_all(reader, &[AccountFilter::discriminator::<Election>()]).await?;
    elections.sort_by_key(|(_, e)| e.election_id);
    Ok(elections)
}

/// Candidates of one election in id order.
pub async fn list_candidates<R: LedgerReader>(
    reader: &R,
    election: &Pubkey,
) -> Result<Vec<(Pubkey, Candidate)>, ClientError> {
    let filters = [
        AccountFilter::discriminator::<Candidate>(),
        AccountFilter::by_election(election),
    ];
    let mut candidates: Vec<(Pubkey, Candidate)> = fetch_all(reader, &filters).await?;
    candidates.sort_by_key(|(_, c)| c.candidate_id);
    Ok(candidates)
}

/// Whitelist registrations filed against one election, in any status.
pub async fn list_registrations<R: LedgerReader>(
    reader: &R,
    election: &Pubkey,
) -> Result<Vec<(Pubkey, VoterRegistration)>, ClientError> {
    let filters = [
        AccountFilter::discriminator::<VoterRegistration>(),
        AccountFilter::by_election(election),
    ];
    let mut registrations: Vec<(Pubkey, VoterRegistration)> = fetch_all(reader, &filters).await?;
    registrations.sort_by_key(|(_, r)| r.requested_at);
    Ok(registrations)
}

pub async fn has_voted<R: LedgerReader>(
    reader: &R,
    program_id: &Pubkey,
    election: &Pubkey,
    voter: &Pubkey,
) -> Result<bool, ClientError> {
    let address = pda::vote_record_address(election, voter, program_id).0;
    let record: Option<VoteRecord> = fetch(reader, &address).await?;
    Ok(record.is_some_and(|r| r.has_voted()))
}

/// An election together with its candidates as read at one moment.
#[derive(Clone, Debug)]
pub struct ElectionSnapshot {
    pub address: Pubkey,
    pub election: Election,
    pub candidates: Vec<(Pubkey, Candidate)>,
    /// False when the candidate counts never added up to `total_votes`
    /// within the retry budget.
    pub consistent: bool,
}

impl ElectionSnapshot {
    pub fn candidate_votes(&self) -> u64 {
        self.candidates.iter().map(|(_, c)| c.vote_count).sum()
    }
}

/// Reads an election and its candidates. The two reads are separate requests,
/// so a vote landing in between shows up as a mismatch between the election
/// total and the candidate sum; such reads are repeated under `policy`.
pub async fn fetch_election_snapshot<R: LedgerReader>(
    reader: &R,
    program_id: &Pubkey,
    election_id: u64,
    policy: &RetryPolicy,
) -> Result<ElectionSnapshot, ClientError> {
    let mut attempt = 0;
    loop {
        let (address, election) = fetch_election(reader, program_id, election_id).await?;
        let candidates = list_candidates(reader, &address).await?;
        let mut snapshot = ElectionSnapshot {
            address,
            election,
            candidates,
            consistent: false,
        };
        snapshot.consistent = snapshot.candidate_votes() == snapshot.election.total_votes;
        if snapshot.consistent || !policy.pause(attempt).await {
            return Ok(snapshot);
        }
        attempt += 1;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    SuperAdmin,
    Admin { permissions: AdminPermissions },
    Voter,
}

/// Works out what `wallet` may do. The configured super admin is answered
/// without touching the network.
pub async fn resolve_role<R: LedgerReader>(
    config: &ClientConfig,
    wallet: &Pubkey,
    reader: &R,
) -> Result<Role, ClientError> {
    if *wallet == config.super_admin {
        return Ok(Role::SuperAdmin);
    }
    let address = pda::admin_address(wallet, &config.program_id).0;
    let admin: Option<Admin> = fetch(reader, &address).await?;
    Ok(match admin {
        Some(admin) if admin.is_active => Role::Admin {
            permissions: admin.permissions,
        },
        _ => Role::Voter,
    })
}
