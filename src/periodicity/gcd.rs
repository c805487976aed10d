//! GCD histogram of Kasiski distances

use super::KasiskiDistance;
use serde::Serialize;
use std::collections::BTreeMap;

pub fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Weighted count of pairwise distance GCDs, keyed by GCD
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GcdHistogram(BTreeMap<usize, f64>);

impl GcdHistogram {
    /// For every pair of distances whose GCD lies in `min..=max`, add the
    /// mean of the pair's weights to that GCD's bucket.
    pub fn from_distances(distances: &[KasiskiDistance], min: usize, max: usize) -> Self {
        let mut buckets = BTreeMap::new();
        for (i, a) in distances.iter().enumerate() {
            for b in &distances[i + 1..] {
                let g = gcd(a.distance, b.distance);
                if (min..=max).contains(&g) {
                    *buckets.entry(g).or_insert(0.0) += (a.weight + b.weight) / 2.0;
                }
            }
        }
        Self(buckets)
    }

    pub fn get(&self, g: usize) -> f64 {
        self.0.get(&g).copied().unwrap_or(0.0)
    }

    /// Largest bucket value, 0 when empty
    pub fn max_count(&self) -> f64 {
        self.0.values().copied().fold(0.0, f64::max)
    }

    /// GCD with the largest mass; ties go to the smaller GCD
    pub fn peak(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (&g, &count) in &self.0 {
            match best {
                Some((_, c)) if c >= count => {}
                _ => best = Some((g, count)),
            }
        }
        best.map(|(g, _)| g)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.0.iter().map(|(g, c)| (*g, *c))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
