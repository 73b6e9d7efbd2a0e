// src/domain/article/services/mod.rs
use std::collections::BTreeSet;

use crate::domain::category::CategoryId;

/// Minimal add/remove diff between an article's current category ids and the
/// desired set. Ids present in both sets are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySync {
    pub attach: Vec<CategoryId>,
    pub detach: Vec<CategoryId>,
}

impl CategorySync {
    pub fn between(current: &[CategoryId], desired: &[CategoryId]) -> Self {
        let current: BTreeSet<CategoryId> = current.iter().copied().collect();
        let desired: BTreeSet<CategoryId> = desired.iter().copied().collect();

        Self {
            attach: desired.difference(&current).copied().collect(),
            detach: current.difference(&desired).copied().collect(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.attach.is_empty() && self.detach.is_empty()
    }
}

/// Sorted, de-duplicated copy of `ids`.
pub fn distinct_category_ids(ids: &[CategoryId]) -> Vec<CategoryId> {
    ids.iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
