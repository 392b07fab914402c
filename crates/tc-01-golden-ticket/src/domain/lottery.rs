//! Node-share draw over the historical contender set
//!
//! The last `N` hex digits of the solution signature, read as one integer,
//! pick `contenders[value mod N]`. The signature is fixed before the
//! contenders are known to the solver, so the draw is unpredictable yet
//! anyone can recompute it.

use shared_types::{PublicKey, Slip, Solution};

/// Index drawn from `signature` over `count` contenders.
///
/// Reads the leading hex digits of the signature's last `count` characters,
/// reducing modulo `count` as it goes so long suffixes never overflow.
/// Returns `None` when there are no contenders or no digits to read.
pub fn select_contender(signature: &str, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let bytes = signature.as_bytes();
    let tail = &bytes[bytes.len().saturating_sub(count)..];

    let modulus = count as u128;
    let mut value: Option<u128> = None;
    for digit in tail.iter().map_while(|b| char::from(*b).to_digit(16)) {
        value = Some((value.unwrap_or(0) * 16 + u128::from(digit)) % modulus);
    }
    value.map(|v| v as usize)
}

/// Payout slips for a solution: the solver takes the miner share, the
/// drawn contender the node share.
///
/// An empty draw (no contenders, blank address) pays the solver.
pub fn find_winners(solution: &Solution, contenders: &[PublicKey]) -> [Slip; 2] {
    let charlie = select_contender(&solution.sig, contenders.len())
        .and_then(|index| contenders.get(index))
        .filter(|address| !address.is_empty())
        .cloned()
        .unwrap_or_else(|| solution.pubkey.clone());

    [
        Slip {
            address: solution.pubkey.clone(),
            amount: solution.miner_share,
        },
        Slip {
            address: charlie,
            amount: solution.node_share,
        },
    ]
}
