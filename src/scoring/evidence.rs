//! Cipher-keyed score maps

use crate::models::CipherType;
use serde::Serialize;
use std::collections::BTreeMap;

/// Evidence per enabled cipher type. Iterates in `CipherType` order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EvidenceMap(BTreeMap<CipherType, f64>);

impl EvidenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, cipher: CipherType, evidence: f64) {
        self.0.insert(cipher, evidence);
    }

    pub fn get(&self, cipher: CipherType) -> Option<f64> {
        self.0.get(&cipher).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CipherType, f64)> + '_ {
        self.0.iter().map(|(c, e)| (*c, *e))
    }

    pub fn ciphers(&self) -> impl Iterator<Item = CipherType> + '_ {
        self.0.keys().copied()
    }

    pub fn values(&self) -> Vec<f64> {
        self.0.values().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(CipherType, f64)> for EvidenceMap {
    fn from_iter<I: IntoIterator<Item = (CipherType, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Softmax of an [`EvidenceMap`]: same keys, values in (0, 1) summing to 1
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProbabilityMap(BTreeMap<CipherType, f64>);

impl ProbabilityMap {
    pub fn get(&self, cipher: CipherType) -> Option<f64> {
        self.0.get(&cipher).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CipherType, &f64)> + '_ {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}

impl FromIterator<(CipherType, f64)> for ProbabilityMap {
    fn from_iter<I: IntoIterator<Item = (CipherType, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
