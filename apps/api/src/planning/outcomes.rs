//! Assigns one or two learning outcomes to every lesson block.
//!
//! Outcomes are always taken in ascending complexity order (stable, so equal levels keep
//! their authored order). Which regime applies depends on how many outcomes there are
//! relative to the block count `N`:
//!
//! | outcomes        | policy                                                        |
//! |-----------------|---------------------------------------------------------------|
//! | 0               | placeholder "understand key concepts" outcome on every block  |
//! | fewer than `N`  | round-robin, each block also takes the next outcome           |
//! | more than `2N`  | two consecutive outcomes per block, the rest are dropped      |
//! | `N..=2N`        | sequential fill, empty blocks borrow from an earlier block    |

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::outcome::Outcome;

/// Maximum outcomes a single lesson carries.
pub const MAX_OUTCOMES_PER_LESSON: usize = 2;

/// Outcome assignment for each block, in block order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeDistribution {
    pub assignments: Vec<Vec<Outcome>>,
    /// Outcomes beyond `2N` that no block received.
    pub dropped_outcome_ids: Vec<String>,
}

/// Distributes `outcomes` over `block_count` lesson blocks.
pub fn distribute_outcomes(block_count: usize, outcomes: &[Outcome]) -> OutcomeDistribution {
    if block_count == 0 {
        return OutcomeDistribution {
            assignments: Vec::new(),
            dropped_outcome_ids: Vec::new(),
        };
    }

    if outcomes.is_empty() {
        return OutcomeDistribution {
            assignments: vec![vec![Outcome::placeholder()]; block_count],
            dropped_outcome_ids: Vec::new(),
        };
    }

    let mut sorted = outcomes.to_vec();
    sorted.sort_by_key(|o| o.complexity_level);

    if block_count > sorted.len() {
        OutcomeDistribution {
            assignments: round_robin(block_count, &sorted),
            dropped_outcome_ids: Vec::new(),
        }
    } else if sorted.len() > MAX_OUTCOMES_PER_LESSON * block_count {
        let capacity = MAX_OUTCOMES_PER_LESSON * block_count;
        let dropped_outcome_ids: Vec<String> =
            sorted[capacity..].iter().map(|o| o.id.clone()).collect();
        warn!(
            "{} outcomes exceed capacity of {} lessons and were not assigned",
            dropped_outcome_ids.len(),
            block_count
        );
        let assignments = sorted[..capacity]
            .chunks(MAX_OUTCOMES_PER_LESSON)
            .map(|pair| pair.to_vec())
            .collect();
        OutcomeDistribution {
            assignments,
            dropped_outcome_ids,
        }
    } else {
        OutcomeDistribution {
            assignments: sequential_fill(block_count, &sorted),
            dropped_outcome_ids: Vec::new(),
        }
    }
}

/// More blocks than outcomes: outcomes recur across lessons.
fn round_robin(block_count: usize, sorted: &[Outcome]) -> Vec<Vec<Outcome>> {
    let count = sorted.len();
    let has_distinct_pair = sorted.iter().any(|o| o.id != sorted[0].id);

    (0..block_count)
        .map(|i| {
            let first = &sorted[i % count];
            let mut assigned = vec![first.clone()];
            if has_distinct_pair {
                let second = &sorted[(i + 1) % count];
                if second.id != first.id {
                    assigned.push(second.clone());
                }
            }
            assigned
        })
        .collect()
}

/// Between `N` and `2N` outcomes: fill blocks in order, one per block when scarce.
fn sequential_fill(block_count: usize, sorted: &[Outcome]) -> Vec<Vec<Outcome>> {
    let per_block = if sorted.len() <= block_count {
        1
    } else {
        MAX_OUTCOMES_PER_LESSON
    };

    let mut assignments: Vec<Vec<Outcome>> = vec![Vec::new(); block_count];
    let mut current = 0usize;

    for outcome in sorted {
        if current >= block_count {
            break;
        }
        assignments[current].push(outcome.clone());
        if assignments[current].len() >= per_block {
            current += 1;
        }
    }

    // Never leave a block empty: borrow from the nearest earlier populated block.
    for i in 0..block_count {
        if assignments[i].is_empty() {
            let borrowed = assignments[..i]
                .iter()
                .rev()
                .find_map(|earlier| earlier.first().cloned())
                .or_else(|| sorted.first().cloned());
            if let Some(outcome) = borrowed {
                assignments[i].push(outcome);
            }
        }
    }

    assignments
}
