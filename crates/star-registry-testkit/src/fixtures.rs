//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use serde_json::Value;
use star_registry::{Ledger, ManualClock, Registry, RegistryConfig, Result};
use star_registry_core::{Block, BlockDraft, Claim, Ed25519Verifier, Keypair};

/// Time every fixture clock starts at (2025-01-14T16:00:00Z).
pub const FIXTURE_EPOCH: i64 = 1_736_870_400;

/// A wallet, a manual clock, and a registry wired to that clock.
pub struct TestFixture {
    pub wallet: Keypair,
    pub clock: ManualClock,
    pub registry: Registry,
}

impl TestFixture {
    /// Create a new fixture with a random wallet.
    pub fn new() -> Self {
        Self::with_wallet(Keypair::generate())
    }

    /// Create with a deterministic wallet from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self::with_wallet(Keypair::from_seed(&seed))
    }

    fn with_wallet(wallet: Keypair) -> Self {
        let clock = ManualClock::new(FIXTURE_EPOCH);
        let registry = Registry::with_parts(
            RegistryConfig::default(),
            Arc::new(clock.clone()),
            Arc::new(Ed25519Verifier),
        )
        .expect("genesis append on an empty ledger");
        Self {
            wallet,
            clock,
            registry,
        }
    }

    /// The fixture wallet's address.
    pub fn address(&self) -> String {
        self.wallet.address()
    }

    /// Request a challenge for the fixture wallet.
    pub fn challenge(&self) -> String {
        self.registry
            .request_message_ownership_verification(&self.address())
    }

    /// Run the full challenge/sign/submit flow for the fixture wallet.
    pub async fn register(&self, star: Value) -> Result<Block> {
        self.register_as(&self.wallet, star).await
    }

    /// Run the full challenge/sign/submit flow for any wallet, one second
    /// after the challenge is issued.
    pub async fn register_as(&self, wallet: &Keypair, star: Value) -> Result<Block> {
        let address = wallet.address();
        let challenge = self.registry.request_message_ownership_verification(&address);
        self.clock.advance(1);
        self.registry
            .submit_star(&address, &challenge, &wallet.sign_hex(&challenge), star)
            .await
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic, distinct wallets for multi-party tests.
pub fn wallets(count: usize) -> Vec<Keypair> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            seed[1] = 0xa5;
            Keypair::from_seed(&seed)
        })
        .collect()
}

/// Build a ledger directly, one claim per entry of `claims`.
pub fn ledger_with_claims(claims: &[(String, Value)]) -> Ledger {
    let mut ledger =
        Ledger::new("Genesis Block", FIXTURE_EPOCH).expect("genesis append on an empty ledger");
    for (i, (owner, star)) in claims.iter().enumerate() {
        let draft = BlockDraft::for_claim(&Claim::new(owner.clone(), star.clone()))
            .expect("JSON values always encode");
        ledger
            .append(draft, FIXTURE_EPOCH + i as i64 + 1)
            .expect("append onto a valid ledger");
    }
    ledger
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fixture_register() {
        let fixture = TestFixture::with_seed([0x42; 32]);
        let block = fixture.register(json!({"dec": "68° 52' 56.9"})).await.unwrap();

        assert_eq!(block.height, 1);
        assert_eq!(block.timestamp, FIXTURE_EPOCH + 1);
        assert_eq!(block.decode_claim().unwrap().owner, fixture.address());
    }

    #[test]
    fn test_wallets_are_distinct() {
        let addresses: Vec<_> = wallets(3).iter().map(Keypair::address).collect();
        assert_ne!(addresses[0], addresses[1]);
        assert_ne!(addresses[1], addresses[2]);
        assert_ne!(addresses[0], addresses[2]);
    }

    #[test]
    fn test_ledger_with_claims() {
        let ledger = ledger_with_claims(&[("a".into(), json!(1)), ("b".into(), json!(2))]);
        assert_eq!(ledger.height(), 2);
        assert!(ledger.validate().is_empty());
    }
}
