use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::filter::ChecklistFilter;
use crate::checklist::{Checklist, ChecklistSummary};

pub const STORE_VERSION: u32 = 1;

/// All saved checklists, as persisted in the store file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistStore {
    pub version: u32,
    #[serde(default)]
    pub checklists: Vec<Checklist>,
}

impl Default for ChecklistStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChecklistStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            version: STORE_VERSION,
            checklists: Vec::new(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Checklist> {
        self.checklists.iter().find(|c| c.id == id)
    }

    /// Insert or replace a checklist by id. Missing creation time and version
    /// are filled in and `updated_at` is set to now. Returns the id.
    pub fn save(&mut self, mut checklist: Checklist) -> String {
        checklist.touch();
        let id = checklist.id.clone();
        match self.checklists.iter_mut().find(|c| c.id == id) {
            Some(existing) => *existing = checklist,
            None => self.checklists.push(checklist),
        }
        id
    }

    /// Remove a checklist.
    /// Returns true if it was present, false otherwise
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.checklists.len();
        self.checklists.retain(|c| c.id != id);
        self.checklists.len() != before
    }

    /// Checklists matching every field set in `filter`.
    pub fn filtered<'a>(&'a self, filter: &'a ChecklistFilter) -> impl Iterator<Item = &'a Checklist> {
        self.checklists.iter().filter(move |c| filter.matches(c))
    }

    pub fn summaries(&self, filter: &ChecklistFilter) -> Vec<ChecklistSummary> {
        self.filtered(filter)
            .map(ChecklistSummary::from_checklist)
            .collect()
    }

    pub fn health_programs(&self) -> Vec<String> {
        self.distinct(|c| &c.health_program)
    }

    pub fn organizational_levels(&self) -> Vec<String> {
        self.distinct(|c| &c.organizational_level)
    }

    pub fn departments(&self) -> Vec<String> {
        self.distinct(|c| &c.department)
    }

    /// Sorted unique values of one checklist field.
    fn distinct<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&Checklist) -> &String,
    {
        self.checklists
            .iter()
            .map(field)
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
