use crate::slot::{ParseNameError, impl_named};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A resource that ships cost to build and to maintain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resource {
    Alloy,
    Mineral,
    RareCrystal,
    ExoticGas,
    Mote,
    Energy,
    DarkMatter,
    Zro,
}

impl Resource {
    pub const ALL: [Resource; 8] = [
        Resource::Alloy,
        Resource::Mineral,
        Resource::RareCrystal,
        Resource::ExoticGas,
        Resource::Mote,
        Resource::Energy,
        Resource::DarkMatter,
        Resource::Zro,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Resource::Alloy => "alloy",
            Resource::Mineral => "mineral",
            Resource::RareCrystal => "rare-crystal",
            Resource::ExoticGas => "exotic-gas",
            Resource::Mote => "mote",
            Resource::Energy => "energy",
            Resource::DarkMatter => "dark-matter",
            Resource::Zro => "zro",
        }
    }
}

impl_named!(Resource, "resource");

/// A partial mapping from resource to quantity. An absent resource costs zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cost(BTreeMap<Resource, f64>);

impl Cost {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Quantity of `resource`, zero when absent.
    pub fn get(&self, resource: Resource) -> f64 {
        self.0.get(&resource).copied().unwrap_or(0.0)
    }

    /// Whether `resource` has an explicit entry (even a zero one).
    pub fn contains(&self, resource: Resource) -> bool {
        self.0.contains_key(&resource)
    }

    pub fn set(&mut self, resource: Resource, quantity: f64) {
        self.0.insert(resource, quantity);
    }

    /// Adds `quantity` on top of whatever is already recorded for `resource`.
    pub fn add(&mut self, resource: Resource, quantity: f64) {
        *self.0.entry(resource).or_insert(0.0) += quantity;
    }

    /// Adds every entry of `other` into `self`, resource by resource.
    pub fn add_cost(&mut self, other: &Cost) {
        for (resource, quantity) in other.iter() {
            self.add(resource, quantity);
        }
    }

    /// Returns a copy with every quantity multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Cost {
        self.iter().map(|(r, q)| (r, q * factor)).collect()
    }

    /// Sum of all quantities regardless of resource.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Resource, f64)> + '_ {
        self.0.iter().map(|(r, q)| (*r, *q))
    }
}

impl FromIterator<(Resource, f64)> for Cost {
    fn from_iter<I: IntoIterator<Item = (Resource, f64)>>(iter: I) -> Self {
        let mut cost = Cost::new();
        for (resource, quantity) in iter {
            cost.add(resource, quantity);
        }
        cost
    }
}

impl<const N: usize> From<[(Resource, f64); N]> for Cost {
    fn from(entries: [(Resource, f64); N]) -> Self {
        entries.into_iter().collect()
    }
}
