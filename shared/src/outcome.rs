use rand::Rng;
use std::collections::VecDeque;

use crate::quota::QuotaPolicy;
use crate::wheel::Wheel;

pub const HISTORY_LEN: usize = 2;

/// Last winning labels, most recent first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WinHistory {
    labels: VecDeque<String>,
}

impl WinHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: &str) {
        self.labels.push_front(label.to_string());
        self.labels.truncate(HISTORY_LEN);
    }

    pub fn last(&self) -> Option<&str> {
        self.labels.front().map(String::as_str)
    }

    pub fn get(&self, i: usize) -> Option<&str> {
        self.labels.get(i).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// True if `label` winning now would repeat the previous result (or make three in a row).
    pub fn would_repeat(&self, label: &str) -> bool {
        let prev1 = self.get(0);
        let prev2 = self.get(1);
        if prev1 == Some(label) {
            return true;
        }
        matches!((prev1, prev2), (Some(a), Some(b)) if a == label && b == label)
    }
}

impl<S: AsRef<str>> FromIterator<S> for WinHistory {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut labels: VecDeque<String> = iter.into_iter().map(|s| s.as_ref().to_string()).collect();
        labels.truncate(HISTORY_LEN);
        Self { labels }
    }
}

/// Which candidate tier a pick came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    /// Prize available and no repeat.
    Primary,
    /// Only non-exhausted prizes were left, repeats allowed.
    QuotaOnly,
    /// Everything is exhausted; the spin is feedback only.
    Unconstrained,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick {
    pub index: usize,
    pub pool: Pool,
}

pub fn candidate_pool<Q: QuotaPolicy + ?Sized>(wheel: &Wheel, history: &WinHistory, quota: &Q) -> (Vec<usize>, Pool) {
    let available: Vec<usize> = wheel
        .labels()
        .enumerate()
        .filter(|(_, label)| quota.remaining(label).is_available())
        .map(|(i, _)| i)
        .collect();

    let primary: Vec<usize> = available
        .iter()
        .copied()
        .filter(|&i| wheel.label(i).map_or(false, |label| !history.would_repeat(label)))
        .collect();

    if !primary.is_empty() {
        (primary, Pool::Primary)
    } else if !available.is_empty() {
        (available, Pool::QuotaOnly)
    } else {
        ((0..wheel.len()).collect(), Pool::Unconstrained)
    }
}

/// Uniformly picks the next winning segment. `None` only for an empty wheel.
pub fn pick<Q: QuotaPolicy + ?Sized, R: Rng + ?Sized>(
    wheel: &Wheel,
    history: &WinHistory,
    quota: &Q,
    rng: &mut R,
) -> Option<Pick> {
    let (pool, tier) = candidate_pool(wheel, history, quota);
    if pool.is_empty() {
        return None;
    }
    let index = pool[rng.gen_range(0..pool.len())];
    Some(Pick { index, pool: tier })
}
