//! # Core Domain Entities
//!
//! Records exchanged between the pool, the lottery and the node runtime.
//!
//! ## Clusters
//!
//! - **Pool**: `PendingTransaction`, `PendingBlock`, `CandidateBlock`
//! - **Chain**: `BlockHeader`, `BlockFees`, `ChainBlock`
//! - **Lottery**: `Solution`, `Vote`, `Slip`
//! - **Networking**: `PeerInfo`
//!
//! Keys, hashes and signatures travel as lowercase hex strings. Sizes are
//! never taken from the wire: they are the byte length of the JSON a record
//! was decoded from, or encodes to when built locally.

use crate::decimal::Decimal8;
use crate::errors::EntityError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hex-encoded public key.
pub type PublicKey = String;

/// Hex-encoded block hash.
pub type BlockHash = String;

/// Hex-encoded signature.
pub type Signature = String;

/// Timestamp in milliseconds since UNIX epoch.
pub type Timestamp = u64;

// =============================================================================
// CLUSTER A: VOTES AND SOLUTIONS
// =============================================================================

/// A per-block adjustment vote, `-1 | 0 | 1` on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Vote {
    /// Lower the voted parameter by one step.
    Decrease,
    /// Leave the voted parameter unchanged.
    #[default]
    Hold,
    /// Raise the voted parameter by one step.
    Increase,
}

impl Vote {
    /// Numeric form of the vote.
    pub fn as_i8(self) -> i8 {
        match self {
            Self::Decrease => -1,
            Self::Hold => 0,
            Self::Increase => 1,
        }
    }

    /// Whether a transaction preferring `preference` may ride in a block
    /// casting this vote. Opposite non-zero signs exclude each other.
    pub fn admits(self, preference: Vote) -> bool {
        !matches!(
            (self, preference),
            (Self::Decrease, Self::Increase) | (Self::Increase, Self::Decrease)
        )
    }
}

impl TryFrom<i8> for Vote {
    type Error = EntityError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Decrease),
            0 => Ok(Self::Hold),
            1 => Ok(Self::Increase),
            other => Err(EntityError::InvalidVote(other)),
        }
    }
}

impl From<Vote> for i8 {
    fn from(vote: Vote) -> Self {
        vote.as_i8()
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}

/// A golden ticket solution.
///
/// Created once per solving attempt and never mutated after `sig` is set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Hash of the block this ticket solves.
    pub target: BlockHash,
    pub difficulty: Decimal8,
    pub difficulty_vote: Vote,
    pub paysplit: Decimal8,
    pub paysplit_vote: Vote,
    /// Solver's public key.
    pub pubkey: PublicKey,
    /// Nonce hashed together with `pubkey`.
    pub random: String,
    pub miner_share: Decimal8,
    pub node_share: Decimal8,
    /// Signature over [`Solution::signature_source`] by `pubkey`.
    pub sig: Signature,
}

impl Solution {
    /// The exact byte string signed by the solver.
    ///
    /// Order is fixed: target, difficulty vote, paysplit vote, miner share,
    /// node share. Producer and validator must build it identically.
    pub fn signature_source(&self) -> String {
        format!(
            "{}{}{}{}{}",
            self.target, self.difficulty_vote, self.paysplit_vote, self.miner_share, self.node_share
        )
    }
}

/// A payout produced by the lottery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slip {
    pub address: PublicKey,
    pub amount: Decimal8,
}

// =============================================================================
// CLUSTER B: POOL RECORDS
// =============================================================================

/// A signed transaction waiting in the pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransaction {
    /// Unique signature; the pool's identity key.
    pub sig: Signature,
    /// Originating public key.
    pub from: PublicKey,
    /// Usable fee offered by this transaction.
    pub fee: Decimal8,
    #[serde(default, rename = "gt", skip_serializing_if = "Option::is_none")]
    pub golden_ticket: Option<Solution>,
    /// Fee-capture marker: the surplus claimed by a block creator.
    #[serde(default, rename = "ft", skip_serializing_if = "Option::is_none")]
    pub fee_capture: Option<Decimal8>,
    #[serde(default, rename = "ps")]
    pub paysplit_preference: Vote,
    /// Encoded byte size.
    #[serde(skip)]
    pub size: u64,
}

impl PendingTransaction {
    /// Builds an ordinary transaction and computes its size.
    pub fn new(sig: impl Into<Signature>, from: impl Into<PublicKey>, fee: Decimal8) -> Self {
        let mut tx = Self {
            sig: sig.into(),
            from: from.into(),
            fee,
            golden_ticket: None,
            fee_capture: None,
            paysplit_preference: Vote::Hold,
            size: 0,
        };
        tx.refresh_size();
        tx
    }

    pub fn with_golden_ticket(mut self, solution: Solution) -> Self {
        self.golden_ticket = Some(solution);
        self.refresh_size();
        self
    }

    pub fn with_fee_capture(mut self, amount: Decimal8) -> Self {
        self.fee_capture = Some(amount);
        self.refresh_size();
        self
    }

    pub fn with_paysplit_preference(mut self, preference: Vote) -> Self {
        self.paysplit_preference = preference;
        self.refresh_size();
        self
    }

    /// Recomputes `size` from the JSON encoding.
    pub fn refresh_size(&mut self) {
        self.size = serde_json::to_vec(self)
            .map(|bytes| bytes.len() as u64)
            .unwrap_or(0);
    }

    /// Decodes a transaction; `size` is the length of `bytes`.
    pub fn from_json(bytes: &[u8]) -> Result<Self, EntityError> {
        let mut tx: Self =
            serde_json::from_slice(bytes).map_err(|e| EntityError::Decode(e.to_string()))?;
        tx.size = bytes.len() as u64;
        Ok(tx)
    }

    pub fn is_golden_ticket(&self) -> bool {
        self.golden_ticket.is_some()
    }

    pub fn is_fee_capture(&self) -> bool {
        self.fee_capture.is_some()
    }

    /// Target of the embedded golden ticket, if any.
    pub fn golden_ticket_target(&self) -> Option<&str> {
        self.golden_ticket.as_ref().map(|gt| gt.target.as_str())
    }

    /// Structural validity: the checks every admission path applies first.
    pub fn is_well_formed(&self) -> bool {
        !self.sig.is_empty()
            && !self.from.is_empty()
            && self.size > 0
            && self.fee.is_within_supply()
            && self.fee_capture.map_or(true, Decimal8::is_within_supply)
            && self
                .golden_ticket
                .as_ref()
                .map_or(true, |gt| !gt.target.is_empty())
    }
}

// =============================================================================
// CLUSTER C: CHAIN RECORDS
// =============================================================================

/// Consensus header fields of a block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub id: u64,
    pub hash: BlockHash,
    /// Empty for the first block.
    #[serde(default)]
    pub prevhash: BlockHash,
    pub timestamp: Timestamp,
    pub creator: PublicKey,
    pub difficulty: Decimal8,
    pub paysplit: Decimal8,
    pub paysplit_vote: Vote,
    /// Fee required to produce the next block right after this one.
    pub burn_fee: Decimal8,
    /// Per-millisecond decay of `burn_fee`.
    pub fee_step: Decimal8,
    pub treasury: Decimal8,
    pub coinbase: Decimal8,
    pub reclaimed: Decimal8,
}

/// Fee figures the chain derives for an indexed block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockFees {
    /// Burn fee that had to be paid to produce this block.
    pub fees_needed: Decimal8,
    /// Surplus claimed by the block creator through its fee-capture transaction.
    pub creator_surplus: Decimal8,
    /// Usable fees above `fees_needed`.
    pub total_surplus: Decimal8,
}

/// An indexed block as seen by the pool and the lottery.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainBlock {
    pub header: BlockHeader,
    pub fees: BlockFees,
    /// Historical participants eligible for the node-share draw.
    pub contenders: Vec<PublicKey>,
}

impl ChainBlock {
    /// Stand-in for the latest block when the chain is empty.
    pub fn genesis_placeholder() -> Self {
        Self::default()
    }

    pub fn hash(&self) -> &str {
        &self.header.hash
    }

    pub fn id(&self) -> u64 {
        self.header.id
    }

    /// Whether this block has no predecessor.
    pub fn is_first(&self) -> bool {
        self.header.prevhash.is_empty()
    }
}

/// A block waiting in the pool's FIFO.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingBlock {
    pub header: BlockHeader,
    pub transactions: Vec<PendingTransaction>,
    #[serde(skip)]
    pub size: u64,
    /// Already validated by this node; commit skips re-validation.
    #[serde(skip)]
    pub prevalidated: bool,
    /// Peer the block was downloaded from.
    #[serde(skip)]
    pub originating_peer: Option<PublicKey>,
}

impl PendingBlock {
    /// Builds a block and computes its size.
    pub fn new(header: BlockHeader, transactions: Vec<PendingTransaction>) -> Self {
        let mut block = Self {
            header,
            transactions,
            size: 0,
            prevalidated: false,
            originating_peer: None,
        };
        block.size = serde_json::to_vec(&block)
            .map(|bytes| bytes.len() as u64)
            .unwrap_or(0);
        block
    }

    /// Decodes a block; `size` is the length of `bytes`.
    pub fn from_json(bytes: &[u8]) -> Result<Self, EntityError> {
        let mut block: Self =
            serde_json::from_slice(bytes).map_err(|e| EntityError::Decode(e.to_string()))?;
        block.size = bytes.len() as u64;
        for tx in &mut block.transactions {
            tx.refresh_size();
        }
        Ok(block)
    }

    pub fn hash(&self) -> &str {
        &self.header.hash
    }

    /// Validity flag: a hash, a size, and well-formed transactions.
    pub fn is_well_formed(&self) -> bool {
        !self.header.hash.is_empty()
            && self.size > 0
            && self.transactions.iter().all(PendingTransaction::is_well_formed)
    }

    /// The golden ticket carried by this block, if any.
    pub fn golden_ticket(&self) -> Option<&Solution> {
        self.transactions.iter().find_map(|tx| tx.golden_ticket.as_ref())
    }
}

/// A block assembled from the pool, before the block builder finalizes it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateBlock {
    pub creator: PublicKey,
    pub prevhash: BlockHash,
    pub paysplit_vote: Vote,
    pub transactions: Vec<PendingTransaction>,
}

// =============================================================================
// CLUSTER D: NETWORKING
// =============================================================================

/// Address and identity of a peer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerInfo {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub publickey: PublicKey,
}

impl PeerInfo {
    /// URL serving the block with `hash` on this peer.
    pub fn block_url(&self, hash: &str) -> String {
        format!("http://{}:{}/blocks/{}", self.host, self.port, hash)
    }
}
