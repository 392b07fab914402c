//! Domain layer: pure lottery logic, no I/O

pub mod difficulty;
pub mod lottery;
pub mod policy;
pub mod ticket;

pub use difficulty::{check_difficulty, fractional_threshold, meets_difficulty, DifficultyCheck};
pub use lottery::{find_winners, select_contender};
pub use policy::{
    apply_vote, calculate_difficulty, calculate_monetary_policy, calculate_paysplit,
    validate_monetary_policy, MonetaryPolicy,
};
pub use ticket::{calculate_shares, validate_solution, GoldenTicket, RevenueShares};
