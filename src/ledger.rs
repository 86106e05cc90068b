//! Ledger-client collaborator boundary
//!
//! Everything network-shaped sits behind the [`LedgerClient`] trait: a
//! read-only minimum-funding query, an all-or-nothing atomic submission, and
//! a raw account read. The composer pipeline itself is synchronous; these are
//! the only suspension points.

use async_trait::async_trait;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::Transaction,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::RpcConfig;

/// Failures at the ledger boundary.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// Transport or query failure before any state change was attempted
    #[error("rpc error: {0}")]
    Rpc(String),

    /// The atomic bundle was rejected; nothing was applied
    #[error("submission rejected: {0}")]
    Rejected(String),

    /// Account read found nothing at the address
    #[error("account not found: {0}")]
    NotFound(Pubkey),
}

/// Collaborator contract consumed by the composer and the feature wrappers.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Minimum balance keeping an account of `byte_size` bytes alive
    /// indefinitely.
    async fn minimum_funding(&self, byte_size: usize) -> Result<u64, LedgerError>;

    /// Submit one all-or-nothing bundle signed by `signers` (fee payer
    /// first) and await confirmation. There is no partial-success state.
    async fn submit_atomic(
        &self,
        instructions: Vec<Instruction>,
        payer: &Pubkey,
        signers: &[&Keypair],
    ) -> Result<Signature, LedgerError>;

    /// Raw account bytes at `address`.
    async fn read_account(&self, address: &Pubkey) -> Result<Vec<u8>, LedgerError>;
}

/// Production ledger client over a nonblocking RPC connection.
pub struct RpcLedgerClient {
    rpc: solana_client::nonblocking::rpc_client::RpcClient,
}

impl RpcLedgerClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::from_config(&RpcConfig {
            endpoint: endpoint.into(),
            ..RpcConfig::default()
        })
    }

    pub fn from_config(config: &RpcConfig) -> Self {
        Self {
            rpc: solana_client::nonblocking::rpc_client::RpcClient::new_with_timeout_and_commitment(
                config.endpoint.clone(),
                std::time::Duration::from_secs(config.timeout_secs),
                config.commitment(),
            ),
        }
    }
}

#[async_trait]
impl LedgerClient for RpcLedgerClient {
    async fn minimum_funding(&self, byte_size: usize) -> Result<u64, LedgerError> {
        let lamports = self
            .rpc
            .get_minimum_balance_for_rent_exemption(byte_size)
            .await
            .map_err(|e| LedgerError::Rpc(e.to_string()))?;
        debug!(byte_size, lamports, "minimum funding query");
        Ok(lamports)
    }

    async fn submit_atomic(
        &self,
        instructions: Vec<Instruction>,
        payer: &Pubkey,
        signers: &[&Keypair],
    ) -> Result<Signature, LedgerError> {
        let blockhash = self
            .rpc
            .get_latest_blockhash()
            .await
            .map_err(|e| LedgerError::Rpc(e.to_string()))?;
        let signers: Vec<&Keypair> = signers.to_vec();
        let tx = Transaction::new_signed_with_payer(
            &instructions,
            Some(payer),
            &signers,
            blockhash,
        );
        self.rpc
            .send_and_confirm_transaction(&tx)
            .await
            .map_err(|e| {
                warn!(error = %e, "atomic submission rejected");
                LedgerError::Rejected(e.to_string())
            })
    }

    async fn read_account(&self, address: &Pubkey) -> Result<Vec<u8>, LedgerError> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.rpc.commitment())
            .await
            .map_err(|e| LedgerError::Rpc(e.to_string()))?;
        response
            .value
            .map(|account| account.data)
            .ok_or(LedgerError::NotFound(*address))
    }
}

/// Deterministic in-memory ledger for tests.
///
/// Funding is a fixed base fee plus a per-byte rate, so layouts map to
/// reproducible amounts; submissions are recorded for inspection instead of
/// being sent anywhere.
#[cfg(any(test, feature = "test_utils"))]
pub mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// Mutex access that survives poisoning. A panic in one test's assertion
    /// must not cascade into every other test sharing the ledger.
    fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// One recorded atomic submission.
    #[derive(Debug, Clone)]
    pub struct RecordedSubmission {
        pub instructions: Vec<Instruction>,
        pub payer: Pubkey,
        pub signer_keys: Vec<Pubkey>,
    }

    pub struct MockLedger {
        /// Flat component of the funding formula
        pub base_fee: u64,
        /// Per-byte component of the funding formula
        pub lamports_per_byte: u64,
        /// When set, every submission is rejected with this reason
        pub reject_with: Option<String>,
        accounts: Mutex<HashMap<Pubkey, Vec<u8>>>,
        submissions: Mutex<Vec<RecordedSubmission>>,
    }

    impl Default for MockLedger {
        fn default() -> Self {
            Self {
                base_fee: 890_880,
                lamports_per_byte: 6_960,
                reject_with: None,
                accounts: Mutex::new(HashMap::new()),
                submissions: Mutex::new(Vec::new()),
            }
        }
    }

    impl MockLedger {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn rejecting(reason: impl Into<String>) -> Self {
            Self {
                reject_with: Some(reason.into()),
                ..Self::default()
            }
        }

        /// Seed raw account bytes for `read_account`.
        pub fn put_account(&self, address: Pubkey, data: Vec<u8>) {
            lock(&self.accounts).insert(address, data);
        }

        pub fn submissions(&self) -> Vec<RecordedSubmission> {
            lock(&self.submissions).clone()
        }
    }

    #[async_trait]
    impl LedgerClient for MockLedger {
        async fn minimum_funding(&self, byte_size: usize) -> Result<u64, LedgerError> {
            Ok(self.base_fee + self.lamports_per_byte * byte_size as u64)
        }

        async fn submit_atomic(
            &self,
            instructions: Vec<Instruction>,
            payer: &Pubkey,
            signers: &[&Keypair],
        ) -> Result<Signature, LedgerError> {
            use solana_sdk::signature::Signer;
            if let Some(reason) = &self.reject_with {
                return Err(LedgerError::Rejected(reason.clone()));
            }
            lock(&self.submissions).push(RecordedSubmission {
                instructions,
                payer: *payer,
                signer_keys: signers.iter().map(|k| k.pubkey()).collect(),
            });
            Ok(Signature::new_unique())
        }

        async fn read_account(&self, address: &Pubkey) -> Result<Vec<u8>, LedgerError> {
            lock(&self.accounts)
                .get(address)
                .cloned()
                .ok_or(LedgerError::NotFound(*address))
        }
    }

}

#[cfg(test)]
mod tests {
    use super::mock::MockLedger;
    use super::*;
    use solana_sdk::signature::Signer;

    #[tokio::test]
    async fn mock_funding_is_deterministic_and_monotonic() {
        let ledger = MockLedger::new();
        let small = ledger.minimum_funding(100).await.unwrap();
        let large = ledger.minimum_funding(200).await.unwrap();
        assert!(large > small);
        assert_eq!(small, ledger.minimum_funding(100).await.unwrap());
    }

    #[tokio::test]
    async fn mock_records_submissions() {
        let ledger = MockLedger::new();
        let payer = Keypair::new();
        ledger
            .submit_atomic(vec![], &payer.pubkey(), &[&payer])
            .await
            .unwrap();
        let recorded = ledger.submissions();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].payer, payer.pubkey());
    }

    #[tokio::test]
    async fn mock_rejection_carries_reason_verbatim() {
        let ledger = MockLedger::rejecting("insufficient funds for rent");
        let payer = Keypair::new();
        let err = ledger
            .submit_atomic(vec![], &payer.pubkey(), &[&payer])
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "submission rejected: insufficient funds for rent"
        );
    }

    #[tokio::test]
    async fn missing_account_is_not_found() {
        let ledger = MockLedger::new();
        let addr = Pubkey::new_unique();
        assert!(matches!(
            ledger.read_account(&addr).await,
            Err(LedgerError::NotFound(a)) if a == addr
        ));
    }
}
