//! The form-editing session over a [`ResumeData`].
//!
//! The only ordered concept is the active [`BuilderStep`]; it selects which form
//! is visible and never gates a mutation. Every effective mutation swaps in a
//! freshly allocated snapshot and bumps `version`, so a reader holding an older
//! `Arc<ResumeData>` keeps seeing exactly what it saw. No-op calls leave both
//! the snapshot and the version untouched.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::models::ProcessedResumeData;
use crate::resume::model::{
    EducationField, EducationItem, ExperienceField, ExperienceItem, ItemId, ListItem,
    PersonalField, PersonalInfo, ProjectField, ProjectItem, ResumeData,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuilderStep {
    #[default]
    Personal,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Preview,
}

impl BuilderStep {
    pub const ALL: [BuilderStep; 7] = [
        BuilderStep::Personal,
        BuilderStep::Summary,
        BuilderStep::Experience,
        BuilderStep::Education,
        BuilderStep::Skills,
        BuilderStep::Projects,
        BuilderStep::Preview,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    pub fn previous(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuilderSession {
    data: Arc<ResumeData>,
    version: u64,
    step: BuilderStep,
}

impl BuilderSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot. Cheap to clone and never mutated afterwards.
    pub fn snapshot(&self) -> Arc<ResumeData> {
        Arc::clone(&self.data)
    }

    pub fn data(&self) -> &ResumeData {
        &self.data
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn step(&self) -> BuilderStep {
        self.step
    }

    pub fn set_step(&mut self, step: BuilderStep) {
        self.step = step;
    }

    pub fn next_step(&mut self) -> BuilderStep {
        self.step = self.step.next();
        self.step
    }

    pub fn previous_step(&mut self) -> BuilderStep {
        self.step = self.step.previous();
        self.step
    }

    /// Applies `edit` to a copy of the current snapshot and commits it only if
    /// `edit` reports a change.
    fn commit(&mut self, edit: impl FnOnce(&mut ResumeData) -> bool) -> bool {
        let mut next = ResumeData::clone(&self.data);
        if !edit(&mut next) {
            return false;
        }
        self.data = Arc::new(next);
        self.version += 1;
        true
    }

    // ── personal info & summary ────────────────────────────────────────────

    pub fn set_personal_info(&mut self, info: PersonalInfo) -> bool {
        if self.data.personal_info == info {
            return false;
        }
        self.commit(|d| {
            d.personal_info = info;
            true
        })
    }

    pub fn update_personal_field(&mut self, field: PersonalField, value: String) -> bool {
        if self.data.personal_info.get(field) == value {
            return false;
        }
        self.commit(|d| {
            d.personal_info.set(field, value);
            true
        })
    }

    pub fn set_summary(&mut self, summary: String) -> bool {
        if self.data.summary == summary {
            return false;
        }
        self.commit(|d| {
            d.summary = summary;
            true
        })
    }

    // ── experience ─────────────────────────────────────────────────────────

    pub fn add_experience(&mut self) -> ItemId {
        let id = ItemId::mint();
        self.commit(|d| push_blank(&mut d.experience, id));
        debug!("Added experience item {id}");
        id
    }

    pub fn update_experience(&mut self, id: ItemId, field: ExperienceField, value: String) -> bool {
        if !contains(&self.data.experience, id) {
            return false;
        }
        self.commit(|d| update_by_id(&mut d.experience, id, field, value))
    }

    pub fn remove_experience(&mut self, id: ItemId) -> bool {
        if !contains(&self.data.experience, id) {
            return false;
        }
        self.commit(|d| remove_by_id(&mut d.experience, id))
    }

    // ── education ──────────────────────────────────────────────────────────

    pub fn add_education(&mut self) -> ItemId {
        let id = ItemId::mint();
        self.commit(|d| push_blank(&mut d.education, id));
        debug!("Added education item {id}");
        id
    }

    pub fn update_education(&mut self, id: ItemId, field: EducationField, value: String) -> bool {
        if !contains(&self.data.education, id) {
            return false;
        }
        self.commit(|d| update_by_id(&mut d.education, id, field, value))
    }

    pub fn remove_education(&mut self, id: ItemId) -> bool {
        if !contains(&self.data.education, id) {
            return false;
        }
        self.commit(|d| remove_by_id(&mut d.education, id))
    }

    // ── projects ───────────────────────────────────────────────────────────

    pub fn add_project(&mut self) -> ItemId {
        let id = ItemId::mint();
        self.commit(|d| push_blank(&mut d.projects, id));
        debug!("Added project item {id}");
        id
    }

    pub fn update_project(&mut self, id: ItemId, field: ProjectField, value: String) -> bool {
        if !contains(&self.data.projects, id) {
            return false;
        }
        self.commit(|d| update_by_id(&mut d.projects, id, field, value))
    }

    pub fn remove_project(&mut self, id: ItemId) -> bool {
        if !contains(&self.data.projects, id) {
            return false;
        }
        self.commit(|d| remove_by_id(&mut d.projects, id))
    }

    // ── skills ─────────────────────────────────────────────────────────────

    pub fn add_skill(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.data.skills.contains(trimmed) {
            return false;
        }
        self.commit(|d| d.skills.add(trimmed))
    }

    pub fn remove_skill(&mut self, text: &str) -> bool {
        if !self.data.skills.contains(text) {
            return false;
        }
        self.commit(|d| d.skills.remove(text))
    }

    // ── upload import ──────────────────────────────────────────────────────

    /// One-shot import: personal info, summary and skills are overwritten.
    pub fn import_processed(&mut self, processed: &ProcessedResumeData) {
        self.commit(|d| {
            d.personal_info = processed.personal_info.clone();
            d.summary = processed.summary.clone();
            d.skills = processed.skills.iter().collect();
            true
        });
    }
}

fn contains<T: ListItem>(list: &[T], id: ItemId) -> bool {
    list.iter().any(|item| item.id() == id)
}

fn push_blank<T: ListItem>(list: &mut Vec<T>, id: ItemId) -> bool {
    list.push(T::blank(id));
    true
}

fn update_by_id<T: ListItem>(list: &mut [T], id: ItemId, field: T::Field, value: String) -> bool {
    match list.iter_mut().find(|item| item.id() == id) {
        Some(item) => {
            item.set(field, value);
            true
        }
        None => false,
    }
}

fn remove_by_id<T: ListItem>(list: &mut Vec<T>, id: ItemId) -> bool {
    let before = list.len();
    list.retain(|item| item.id() != id);
    list.len() != before
}
