//! Node wallet backed by one Ed25519 key.

use shared_crypto::{CryptoError, Ed25519KeyPair};
use shared_types::{Decimal8, PendingTransaction, PublicKey, Solution, Vote};
use std::sync::atomic::{AtomicU64, Ordering};
use tc_02_mempool::{Result, Wallet};

/// Signs the transactions this node originates.
pub struct LocalWallet {
    keypair: Ed25519KeyPair,
    public_key: PublicKey,
    nonce: AtomicU64,
}

impl LocalWallet {
    pub fn new(keypair: Ed25519KeyPair) -> Self {
        let public_key = keypair.public_key().to_hex();
        Self {
            keypair,
            public_key,
            nonce: AtomicU64::new(0),
        }
    }

    /// Loads the configured seed, or generates a fresh key.
    pub fn from_config(private_key: Option<&str>) -> std::result::Result<Self, CryptoError> {
        let keypair = match private_key {
            Some(seed) => Ed25519KeyPair::from_hex_seed(seed)?,
            None => Ed25519KeyPair::generate(),
        };
        Ok(Self::new(keypair))
    }

    /// Hex seed, as the golden ticket signer expects it.
    pub fn private_key_hex(&self) -> String {
        self.keypair.to_hex_seed()
    }

    /// Transaction carrying a golden ticket this node solved.
    pub fn create_golden_ticket_transaction(&self, solution: Solution) -> PendingTransaction {
        let sig = self.sign(&format!("gt:{}", solution.sig));
        PendingTransaction::new(sig, self.public_key.clone(), Decimal8::ZERO).with_golden_ticket(solution)
    }

    /// Ordinary fee-paying transaction.
    pub fn create_transaction(&self, fee: Decimal8, preference: Vote) -> PendingTransaction {
        let nonce = self.next_nonce();
        let sig = self.sign(&format!("tx:{}:{}:{}", self.public_key, fee, nonce));
        PendingTransaction::new(sig, self.public_key.clone(), fee).with_paysplit_preference(preference)
    }

    fn next_nonce(&self) -> u64 {
        self.nonce.fetch_add(1, Ordering::Relaxed)
    }

    fn sign(&self, message: &str) -> String {
        self.keypair.sign(message.as_bytes()).to_hex()
    }
}

impl Wallet for LocalWallet {
    fn public_key(&self) -> PublicKey {
        self.public_key.clone()
    }

    fn create_fee_transaction(&self, amount: Decimal8) -> Result<PendingTransaction> {
        let nonce = self.next_nonce();
        let sig = self.sign(&format!("fee:{}:{}:{}", self.public_key, amount, nonce));
        Ok(PendingTransaction::new(sig, self.public_key.clone(), Decimal8::ZERO).with_fee_capture(amount))
    }
}
