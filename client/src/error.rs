use solana_sdk::instruction::InstructionError;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::TransactionError;
use thiserror::Error;
use voting_dapp::errors::VotingError;

/// How a failed submission should be treated by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Network or congestion trouble. Retrying may succeed.
    Transient,
    /// The program refused the request. Retrying will fail the same way.
    Rejected,
    /// The desired state already holds, e.g. the vote is already on record.
    AlreadySatisfied,
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("rpc request failed: {0}")]
    Rpc(#[from] Box<solana_client::client_error::ClientError>),

    #[error("account {0} could not be decoded: {1}")]
    Decode(Pubkey, String),

    #[error("account {0} does not exist")]
    AccountNotFound(Pubkey),

    #[error("no confirmation for {0} after {1} attempts")]
    Timeout(Signature, u32),

    #[error("transaction failed: {0}")]
    Transaction(TransactionError),

    #[error("transaction carries no signature")]
    Unsigned,
}

impl From<solana_client::client_error::ClientError> for ClientError {
    fn from(e: solana_client::client_error::ClientError) -> Self {
        ClientError::Rpc(Box::new(e))
    }
}

impl ClientError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ClientError::Rpc(e) => match e.get_transaction_error() {
                Some(tx) => classify_transaction_error(&tx),
                None => ErrorClass::Transient,
            },
            ClientError::Timeout(..) => ErrorClass::Transient,
            ClientError::Transaction(tx) => classify_transaction_error(tx),
            ClientError::Decode(..) | ClientError::AccountNotFound(_) | ClientError::Unsigned => {
                ErrorClass::Rejected
            }
        }
    }
}

/// Maps a program error code to its class. Duplicate votes and duplicate
/// registration requests mean the caller already got what it asked for.
pub fn classify_program_error(code: u32) -> ErrorClass {
    if code == u32::from(VotingError::AlreadyVoted) || code == u32::from(VotingError::AlreadyRegistered) {
        ErrorClass::AlreadySatisfied
    } else {
        ErrorClass::Rejected
    }
}

/// `SystemError::AccountAlreadyInUse`, raised when `init` meets an existing PDA.
const ACCOUNT_ALREADY_IN_USE: u32 = 0;

pub fn classify_transaction_error(err: &TransactionError) -> ErrorClass {
    match err {
        TransactionError::InstructionError(
            _,
            InstructionError::Custom(ACCOUNT_ALREADY_IN_USE) | InstructionError::AccountAlreadyInitialized,
        ) => ErrorClass::AlreadySatisfied,
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => {
            classify_program_error(*code)
        }
        TransactionError::BlockhashNotFound
        | TransactionError::AccountInUse
        | TransactionError::WouldExceedMaxBlockCostLimit
        | TransactionError::WouldExceedMaxAccountCostLimit
        | TransactionError::WouldExceedAccountDataBlockLimit
        | TransactionError::TooManyAccountLocks => ErrorClass::Transient,
        _ => ErrorClass::Rejected,
    }
}
