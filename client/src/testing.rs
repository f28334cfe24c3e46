use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anchor_lang::AccountSerialize;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::TransactionError;

use crate::error::ClientError;
use crate::reader::{AccountFilter, LedgerReader, SignatureTracker};

type Status = Option<Result<(), TransactionError>>;

/// Account store standing in for a cluster.
#[derive(Default)]
pub struct MemoryLedger {
    accounts: Mutex<BTreeMap<Pubkey, Vec<u8>>>,
    // writes that land right after the next program_accounts scan
    after_scan: Mutex<VecDeque<(Pubkey, Vec<u8>)>>,
    // status reported on each poll, popped front to back; the last one sticks
    statuses: Mutex<HashMap<Signature, VecDeque<Status>>>,
    account_reads: AtomicUsize,
    scans: AtomicUsize,
    polls: AtomicUsize,
}

fn serialize<T: AccountSerialize>(account: &T) -> Vec<u8> {
    let mut data = Vec::new();
    account.try_serialize(&mut data).unwrap();
    data
}

impl MemoryLedger {
    pub fn put<T: AccountSerialize>(&self, address: Pubkey, account: &T) {
        self.put_raw(address, serialize(account));
    }

    pub fn put_raw(&self, address: Pubkey, data: Vec<u8>) {
        self.accounts.lock().unwrap().insert(address, data);
    }

    pub fn raw(&self, address: &Pubkey) -> Vec<u8> {
        self.accounts.lock().unwrap()[address].clone()
    }

    pub fn after_scan<T: AccountSerialize>(&self, address: Pubkey, account: &T) {
        self.after_scan
            .lock()
            .unwrap()
            .push_back((address, serialize(account)));
    }

    pub fn script_status(&self, signature: Signature, polls: Vec<Status>) {
        self.statuses
            .lock()
            .unwrap()
            .insert(signature, polls.into());
    }

    pub fn account_reads(&self) -> usize {
        self.account_reads.load(Ordering::SeqCst)
    }

    pub fn scans(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

impl LedgerReader for MemoryLedger {
    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, ClientError> {
        self.account_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.accounts.lock().unwrap().get(address).cloned())
    }

    async fn program_accounts(
        &self,
        filters: &[AccountFilter],
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, ClientError> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        let mut accounts = self.accounts.lock().unwrap();
        let found = accounts
            .iter()
            .filter(|(_, data)| filters.iter().all(|f| f.matches(data)))
            .map(|(address, data)| (*address, data.clone()))
            .collect();
        for (address, data) in self.after_scan.lock().unwrap().drain(..) {
            accounts.insert(address, data);
        }
        Ok(found)
    }
}

impl SignatureTracker for MemoryLedger {
    async fn signature_status(&self, signature: &Signature) -> Result<Status, ClientError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let mut statuses = self.statuses.lock().unwrap();
        let Some(polls) = statuses.get_mut(signature) else {
            return Ok(None);
        };
        if polls.len() > 1 {
            Ok(polls.pop_front().flatten())
        } else {
            Ok(polls.front().cloned().flatten())
        }
    }
}
