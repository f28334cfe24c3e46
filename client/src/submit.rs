use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;

use crate::error::{classify_transaction_error, ClientError, ErrorClass};
use crate::reader::{LedgerReader, RpcReader, SignatureTracker};
use crate::retry::RetryPolicy;

/// What is known about a submitted transaction once polling stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Failed(ErrorClass),
    /// Neither the signature nor the target account showed up.
    Unknown,
}

/// Polls `signature` under `policy`. If it never resolves, the account the
/// transaction creates (`target`, e.g. the vote record) is fetched instead:
/// its presence proves success. Polling errors count as "not yet".
pub async fn confirm_or_refetch<R>(
    reader: &R,
    signature: &Signature,
    target: &Pubkey,
    policy: &RetryPolicy,
) -> Result<Confirmation, ClientError>
where
    R: LedgerReader + SignatureTracker,
{
    let mut attempt = 0;
    loop {
        match reader.signature_status(signature).await {
            Ok(Some(Ok(()))) => return Ok(Confirmation::Confirmed),
            Ok(Some(Err(e))) => return Ok(Confirmation::Failed(classify_transaction_error(&e))),
            Ok(None) | Err(_) => {}
        }
        if !policy.pause(attempt).await {
            break;
        }
        attempt += 1;
    }

    Ok(match reader.account_data(target).await? {
        Some(_) => Confirmation::Confirmed,
        None => Confirmation::Unknown,
    })
}

/// The fee payer's signature, which identifies the transaction on the cluster.
fn payer_signature(transaction: &Transaction) -> Result<Signature, ClientError> {
    match transaction.signatures.first() {
        Some(signature) if *signature != Signature::default() => Ok(*signature),
        _ => Err(ClientError::Unsigned),
    }
}

/// Sends a signed transaction and settles its outcome. A send that fails in
/// preflight is classified directly; any other send failure may still have
/// reached the cluster, so it falls through to confirmation.
pub async fn submit(
    rpc: &RpcReader,
    transaction: &Transaction,
    target: &Pubkey,
    policy: &RetryPolicy,
) -> Result<Confirmation, ClientError> {
    let signature = payer_signature(transaction)?;
    if let Err(e) = rpc.client().send_transaction(transaction).await {
        let err = ClientError::from(e);
        match err.class() {
            ErrorClass::Transient => {}
            class => return Ok(Confirmation::Failed(class)),
        }
    }
    confirm_or_refetch(rpc, &signature, target, policy).await
}
