use anchor_lang::prelude::*;

use crate::errors::VotingError;

pub const MAX_TITLE: usize = 64;
pub const MAX_DESC: usize = 500;
pub const MAX_NAME: usize = 50;
pub const MAX_IMAGE_URL: usize = 200;

/// Rejects blank names and names longer than `MAX_NAME` bytes.
pub fn validate_name(name: &str) -> Result<()> {
    require!(!name.trim().is_empty(), VotingError::InvalidInput);
    require!(name.len() <= MAX_NAME, VotingError::NameTooLong);
    Ok(())
}

#[account]
#[derive(Default, Debug)]
pub struct AdminRegistry {
    pub super_admin: Pubkey,
    /// Next election id. Only ever increases.
    pub election_count: u64,
    pub admin_count: u32,
    pub paused: bool,
    pub bump: u8,
}
impl AdminRegistry {
    pub const SPACE: usize = 8 + 32 + 8 + 4 + 1 + 1;

    pub fn initialize(&mut self, super_admin: Pubkey, bump: u8) {
        self.super_admin = super_admin;
        self.election_count = 0;
        self.admin_count = 0;
        self.paused = false;
        self.bump = bump;
    }

    pub fn ensure_not_paused(&self) -> Result<()> {
        require!(!self.paused, VotingError::SystemPaused);
        Ok(())
    }

    pub fn is_super_admin(&self, key: &Pubkey) -> bool {
        self.super_admin == *key
    }

    /// Hands out the current counter as the new election id and bumps it.
    pub fn allocate_election_id(&mut self) -> Result<u64> {
        let id = self.election_count;
        self.election_count = id.checked_add(1).ok_or(VotingError::MathOverflow)?;
        Ok(id)
    }

    pub fn admin_added(&mut self) -> Result<()> {
        self.admin_count = self
            .admin_count
            .checked_add(1)
            .ok_or(VotingError::MathOverflow)?;
        Ok(())
    }

    pub fn admin_removed(&mut self) {
        self.admin_count = self.admin_count.saturating_sub(1);
    }
}

/// Action categories an admin can be allowed to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Permission {
    ManageElections,
    ManageCandidates,
    ManageVoters,
    FinalizeResults,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdminPermissions {
    pub can_manage_elections: bool,
    pub can_manage_candidates: bool,
    pub can_manage_voters: bool,
    pub can_finalize_results: bool,
}

impl AdminPermissions {
    pub const SPACE: usize = 4;

    pub fn full() -> Self {
        Self {
            can_manage_elections: true,
            can_manage_candidates: true,
            can_manage_voters: true,
            can_finalize_results: true,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn allows(&self, permission: Permission) -> bool {
        match permission {
            Permission::ManageElections => self.can_manage_elections,
            Permission::ManageCandidates => self.can_manage_candidates,
            Permission::ManageVoters => self.can_manage_voters,
            Permission::FinalizeResults => self.can_finalize_results,
        }
    }
}

#[account]
#[derive(Default, Debug)]
pub struct Admin {
    pub authority: Pubkey,
    pub name: String,
    pub permissions: AdminPermissions,
    pub added_by: Pubkey,
    pub added_at: i64,
    pub is_active: bool,
    pub bump: u8,
}
impl Admin {
    pub const SPACE: usize =
        8 + 32 + (4 + MAX_NAME) + AdminPermissions::SPACE + 32 + 8 + 1 + 1;

    pub fn deactivate(&mut self) -> Result<()> {
        require!(self.is_active, VotingError::AdminNotActive);
        self.is_active = false;
        Ok(())
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ElectionStatus {
    #[default]
    Draft,
    Active,
    Ended,
    Cancelled,
    Finalized,
}

impl ElectionStatus {
    /// Lifecycle table. Moves are Draft -> Active -> Ended -> Finalized, plus
    /// Draft | Active -> Cancelled. Anything else is rejected with the error
    /// describing the precondition that failed.
    pub fn transition(self, to: ElectionStatus) -> Result<ElectionStatus> {
        use ElectionStatus::*;
        match (self, to) {
            (Draft, Active) | (Active, Ended) | (Ended, Finalized) => Ok(to),
            (Draft | Active, Cancelled) => Ok(to),
            (Finalized, _) => err!(VotingError::ElectionFinalized),
            (_, Active) => err!(VotingError::ElectionNotDraft),
            (_, Ended) => err!(VotingError::ElectionNotActive),
            (_, Finalized) => err!(VotingError::ElectionNotEnded),
            _ => err!(VotingError::ElectionClosed),
        }
    }

    /// Ended, Cancelled and Finalized elections accept no new participants.
    pub fn is_closed(self) -> bool {
        matches!(
            self,
            ElectionStatus::Ended | ElectionStatus::Cancelled | ElectionStatus::Finalized
        )
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VoterRegistrationType {
    #[default]
    Open,
    Whitelist,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct ElectionConfig {
    pub title: String,
    pub description: String,
    pub start_time: i64,
    pub end_time: i64,
    pub voter_registration_type: VoterRegistrationType,
}

impl ElectionConfig {
    pub fn validate(&self) -> Result<()> {
        require!(!self.title.trim().is_empty(), VotingError::InvalidInput);
        require!(self.title.len() <= MAX_TITLE, VotingError::TitleTooLong);
        require!(self.description.len() <= MAX_DESC, VotingError::DescriptionTooLong);
        require!(self.end_time > self.start_time, VotingError::InvalidTimeRange);
        Ok(())
    }
}

#[account]
#[derive(Default, Debug)]
pub struct Election {
    pub election_id: u64,
    pub authority: Pubkey,
    pub title: String,
    pub description: String,
    pub start_time: i64,
    pub end_time: i64,
    pub status: ElectionStatus,
    pub voter_registration_type: VoterRegistrationType,
    pub candidate_count: u32,
    pub total_votes: u64,
    pub bump: u8,
}
impl Election {
    pub const SPACE: usize = 8 + 8 + 32 + (4 + MAX_TITLE) + (4 + MAX_DESC)
        + 8 + 8 + 1 + 1 + 4 + 8 + 1;

    pub fn from_config(cfg: ElectionConfig, election_id: u64, authority: Pubkey, bump: u8) -> Self {
        Self {
            election_id,
            authority,
            title: cfg.title,
            description: cfg.description,
            start_time: cfg.start_time,
            end_time: cfg.end_time,
            status: ElectionStatus::Draft,
            voter_registration_type: cfg.voter_registration_type,
            candidate_count: 0,
            total_votes: 0,
            bump,
        }
    }

    pub fn start(&mut self) -> Result<()> {
        let next = self.status.transition(ElectionStatus::Active)?;
        require!(self.candidate_count > 0, VotingError::NoCandidates);
        self.status = next;
        Ok(())
    }

    /// No clock check: the status only moves when this is called.
    pub fn end(&mut self) -> Result<()> {
        self.status = self.status.transition(ElectionStatus::Ended)?;
        Ok(())
    }

    pub fn finalize(&mut self) -> Result<()> {
        self.status = self.status.transition(ElectionStatus::Finalized)?;
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<()> {
        self.status = self.status.transition(ElectionStatus::Cancelled)?;
        Ok(())
    }

    /// Reserves the next candidate id. Only drafts take new candidates.
    pub fn allocate_candidate_id(&mut self) -> Result<u32> {
        require!(
            self.status == ElectionStatus::Draft,
            VotingError::CannotModifyActiveElection
        );
        let id = self.candidate_count;
        self.candidate_count = id.checked_add(1).ok_or(VotingError::MathOverflow)?;
        Ok(id)
    }

    pub fn requires_registration(&self) -> bool {
        self.voter_registration_type == VoterRegistrationType::Whitelist
    }

    pub fn ensure_registration_open(&self) -> Result<()> {
        require!(self.requires_registration(), VotingError::RegistrationNotRequired);
        require!(!self.status.is_closed(), VotingError::ElectionClosed);
        Ok(())
    }

    /// Open elections never look at `registration`.
    pub fn check_eligibility(&self, registration: Option<&VoterRegistration>) -> Result<()> {
        if !self.requires_registration() {
            return Ok(());
        }
        match registration {
            Some(reg) if reg.status == RegistrationStatus::Approved => Ok(()),
            _ => err!(VotingError::VoterNotRegistered),
        }
    }
}

#[account]
#[derive(Default, Debug)]
pub struct Candidate {
    pub election: Pubkey,
    pub candidate_id: u32,
    pub name: String,
    pub description: String,
    /// Empty when the candidate has no picture.
    pub image_url: String,
    pub vote_count: u64,
    pub added_by: Pubkey,
    pub added_at: i64,
    pub bump: u8,
}
impl Candidate {
    pub const SPACE: usize = 8 + 32 + 4 + (4 + MAX_NAME) + (4 + MAX_DESC)
        + (4 + MAX_IMAGE_URL) + 8 + 32 + 8 + 1;
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct CandidateProfile {
    pub name: String,
    pub description: String,
    pub image_url: String,
}

impl CandidateProfile {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        require!(self.description.len() <= MAX_DESC, VotingError::DescriptionTooLong);
        require!(self.image_url.len() <= MAX_IMAGE_URL, VotingError::ImageUrlTooLong);
        Ok(())
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Revoked,
}

#[account]
#[derive(Default, Debug)]
pub struct VoterRegistration {
    pub election: Pubkey,
    pub voter: Pubkey,
    pub status: RegistrationStatus,
    pub requested_at: i64,
    pub approved_at: Option<i64>,
    pub approved_by: Option<Pubkey>,
    pub bump: u8,
}
impl VoterRegistration {
    pub const SPACE: usize = 8 + 32 + 32 + 1 + 8 + (1 + 8) + (1 + 32) + 1;

    /// A zeroed account has never been written.
    pub fn is_initialized(&self) -> bool {
        self.election != Pubkey::default()
    }

    /// Fills a fresh registration in `Pending`. A second request for the same
    /// (election, voter) lands on the existing account and leaves it as is.
    pub fn open(&mut self, election: Pubkey, voter: Pubkey, now: i64, bump: u8) -> Result<()> {
        require!(!self.is_initialized(), VotingError::AlreadyRegistered);
        self.election = election;
        self.voter = voter;
        self.status = RegistrationStatus::Pending;
        self.requested_at = now;
        self.approved_at = None;
        self.approved_by = None;
        self.bump = bump;
        Ok(())
    }

    pub fn approve(&mut self, approver: Pubkey, now: i64) -> Result<()> {
        require!(
            self.status == RegistrationStatus::Pending,
            VotingError::RegistrationNotPending
        );
        self.status = RegistrationStatus::Approved;
        self.approved_at = Some(now);
        self.approved_by = Some(approver);
        Ok(())
    }

    pub fn reject(&mut self) -> Result<()> {
        require!(
            self.status == RegistrationStatus::Pending,
            VotingError::RegistrationNotPending
        );
        self.status = RegistrationStatus::Rejected;
        Ok(())
    }

    /// Past votes stay counted; only future ballots are blocked.
    pub fn revoke(&mut self) -> Result<()> {
        require!(
            self.status == RegistrationStatus::Approved,
            VotingError::RegistrationNotApproved
        );
        self.status = RegistrationStatus::Revoked;
        Ok(())
    }
}

#[account]
#[derive(Default, Debug)]
pub struct VoteRecord {
    pub election: Pubkey,
    pub voter: Pubkey,
    pub candidate: Pubkey,
    pub voted_at: i64,
    pub bump: u8,
}
impl VoteRecord {
    // 8 discriminator + 32 + 32 + 32 + 8 + 1
    pub const SPACE: usize = 8 + 32 + 32 + 32 + 8 + 1;

    pub fn has_voted(&self) -> bool {
        self.election != Pubkey::default()
    }
}

/// One voter's choice, resolved to account addresses.
#[derive(Clone, Copy, Debug)]
pub struct Ballot {
    pub election: Pubkey,
    pub candidate: Pubkey,
    pub voter: Pubkey,
    pub voted_at: i64,
}

impl Ballot {
    /// Applies the vote to the three accounts it touches. Every check runs
    /// before the first write so a failure leaves all of them untouched.
    pub fn apply(
        &self,
        election: &mut Election,
        candidate: &mut Candidate,
        registration: Option<&VoterRegistration>,
        record: &mut VoteRecord,
        record_bump: u8,
    ) -> Result<()> {
        require!(
            election.status == ElectionStatus::Active,
            VotingError::ElectionNotActive
        );
        election.check_eligibility(registration)?;
        require_keys_eq!(candidate.election, self.election, VotingError::InvalidCandidate);
        require!(!record.has_voted(), VotingError::AlreadyVoted);

        let candidate_votes = candidate
            .vote_count
            .checked_add(1)
            .ok_or(VotingError::MathOverflow)?;
        let total_votes = election
            .total_votes
            .checked_add(1)
            .ok_or(VotingError::MathOverflow)?;

        record.election = self.election;
        record.voter = self.voter;
        record.candidate = self.candidate;
        record.voted_at = self.voted_at;
        record.bump = record_bump;
        candidate.vote_count = candidate_votes;
        election.total_votes = total_votes;
        Ok(())
    }
}

#[event]
pub struct RegistryInitialized {
    pub super_admin: Pubkey,
}

#[event]
pub struct SystemPauseChanged {
    pub paused: bool,
}

#[event]
pub struct AdminAdded {
    pub authority: Pubkey,
    pub added_by: Pubkey,
    pub permissions: AdminPermissions,
}

#[event]
pub struct AdminUpdated {
    pub authority: Pubkey,
    pub permissions: AdminPermissions,
    pub is_active: bool,
}

#[event]
pub struct ElectionCreated {
    pub election: Pubkey,
    pub election_id: u64,
    pub authority: Pubkey,
}

#[event]
pub struct ElectionStatusChanged {
    pub election: Pubkey,
    pub from: ElectionStatus,
    pub to: ElectionStatus,
}

#[event]
pub struct CandidateAdded {
    pub election: Pubkey,
    pub candidate: Pubkey,
    pub candidate_id: u32,
}

#[event]
pub struct VoterRegistrationChanged {
    pub election: Pubkey,
    pub voter: Pubkey,
    pub status: RegistrationStatus,
}

#[event]
pub struct VoteCast {
    pub election: Pubkey,
    pub voter: Pubkey,
    pub candidate: Pubkey,
    pub candidate_votes: u64,
    pub total_votes: u64,
}
