use anchor_lang::prelude::*;

#[error_code]
pub enum VotingError {
    // authorization
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Admin is not active")]
    AdminNotActive,
    #[msg("Admin lacks the permission for this action")]
    InsufficientPermissions,
    #[msg("System is paused")]
    SystemPaused,

    // lifecycle
    #[msg("Election is not active")]
    ElectionNotActive,
    #[msg("Candidates can only be changed while the election is a draft")]
    CannotModifyActiveElection,
    #[msg("Election is closed")]
    ElectionClosed,
    #[msg("Election is not a draft")]
    ElectionNotDraft,
    #[msg("Election has not ended")]
    ElectionNotEnded,
    #[msg("Election is finalized")]
    ElectionFinalized,
    #[msg("Election has no candidates")]
    NoCandidates,

    // uniqueness
    #[msg("Already voted")]
    AlreadyVoted,
    #[msg("Already registered for this election")]
    AlreadyRegistered,

    // registration
    #[msg("Voter is not registered for this election")]
    VoterNotRegistered,
    #[msg("Election does not use voter registration")]
    RegistrationNotRequired,
    #[msg("Voter registration is not pending")]
    RegistrationNotPending,
    #[msg("Voter registration is not approved")]
    RegistrationNotApproved,

    // validation
    #[msg("Title length exceeds maximum allowed")]
    TitleTooLong,
    #[msg("Name length exceeds maximum allowed")]
    NameTooLong,
    #[msg("Description length exceeds maximum allowed")]
    DescriptionTooLong,
    #[msg("Image URL length exceeds maximum allowed")]
    ImageUrlTooLong,
    #[msg("End time must be after start time")]
    InvalidTimeRange,
    #[msg("Invalid input")]
    InvalidInput,
    #[msg("Candidate does not belong to this election")]
    InvalidCandidate,

    #[msg("Math overflow")]
    MathOverflow,
}
