//! Closed-form solver for the bathroom stalls problem.
//!
//! Customers split the free stalls layer by layer: layer `n` holds
//! `2^(n-1)` customers, and a layer is complete once every group left by the
//! previous layer has been split exactly once. Because a split of a group of
//! size `g` leaves `(g-1)/2` and `g/2`, the groups entering any layer differ
//! in size by at most one. Knowing how many stalls and groups enter the last
//! layer is therefore enough to tell which group size the last customer
//! splits, without simulating any of the earlier choices.

use crate::error::{Result, StallsError};

/// One test case: `customers` people enter a row of `stalls` free stalls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Query {
    stalls: u64,
    customers: u64,
}

impl Query {
    pub(crate) fn new(stalls: u64, customers: u64) -> Result<Self> {
        let reason = if stalls == 0 {
            "there must be at least one stall"
        } else if customers == 0 {
            "there must be at least one customer"
        } else if customers > stalls {
            "more customers than stalls"
        } else {
            return Ok(Self { stalls, customers });
        };
        Err(StallsError::InvalidQuery {
            stalls,
            customers,
            reason,
        })
    }

    pub(crate) fn stalls(&self) -> u64 {
        self.stalls
    }

    pub(crate) fn customers(&self) -> u64 {
        self.customers
    }
}

/// Free stalls on either side of the last customer's stall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Answer {
    pub(crate) max_adjacent: u64,
    pub(crate) min_adjacent: u64,
}

impl Answer {
    fn from_split((left, right): (u64, u64)) -> Self {
        Self {
            max_adjacent: left.max(right),
            min_adjacent: left.min(right),
        }
    }
}

/// Number of the layer in which the `customers`-th customer chooses.
///
/// This is the smallest `L` with `2^L - 1 >= customers`.
pub(crate) fn last_layer(customers: u64) -> u32 {
    let mut layers = 1;
    let mut capacity: u64 = 1;
    while customers > capacity {
        layers += 1;
        capacity = (capacity << 1) | 1;
    }
    layers
}

/// Sizes of the groups left and right of the stall chosen in a group of
/// `group` free stalls. The right side gets the extra stall when `group` is even.
pub(crate) fn split(group: u64) -> (u64, u64) {
    debug_assert!(group > 0);
    ((group - 1) / 2, group / 2)
}

/// Answer for the last customer of `query`, in O(log customers).
pub(crate) fn solve(query: Query) -> Answer {
    let layer = last_layer(query.customers);
    let groups = 1u64 << (layer - 1);
    let cust_prev_layers = groups - 1;
    let stalls_last_layer = query.stalls - cust_prev_layers;

    let large_group = stalls_last_layer.div_ceil(groups);
    if large_group == 1 {
        return Answer {
            max_adjacent: 0,
            min_adjacent: 0,
        };
    }

    let small_group = large_group - 1;
    let large_groups =
        (stalls_last_layer - groups * small_group) / (large_group - small_group);
    let customers_last_layer = query.customers - cust_prev_layers;

    let group = if customers_last_layer <= large_groups {
        large_group
    } else {
        small_group
    };
    Answer::from_split(split(group))
}
