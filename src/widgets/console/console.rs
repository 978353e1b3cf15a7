//! Expansion state for the lifecycle console.
//!
//! The console shows one collapsible section per phase group. The newest
//! group opens automatically as events stream in; older groups collapse so
//! the tail of the log stays readable. Toggles made by the user stick for
//! as long as the grouping itself does not change.

use std::collections::HashSet;

use uuid::Uuid;

use crate::core::PhaseGroup;

#[derive(Debug)]
pub struct ConsoleState {
    /// Ids of groups currently expanded.
    expanded: HashSet<Uuid>,
    last_group_count: usize,
}

impl ConsoleState {
    pub fn new() -> Self {
        Self { expanded: HashSet::new(), last_group_count: 0 }
    }

    /// Reconcile with the current grouping. When the number of groups
    /// changes, only the newest group stays expanded.
    pub fn sync_groups(&mut self, groups: &[PhaseGroup]) {
        if groups.len() == self.last_group_count {
            return;
        }
        self.expanded.clear();
        if let Some(last) = groups.last() {
            self.expanded.insert(last.id);
        }
        self.last_group_count = groups.len();
    }

    pub fn is_expanded(&self, id: Uuid) -> bool {
        self.expanded.contains(&id)
    }

    pub fn toggle(&mut self, id: Uuid) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self::new()
    }
}
