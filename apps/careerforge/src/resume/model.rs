//! Resume data model: the canonical in-memory resume edited by the builder and seeded by uploads.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Identifiers
// ────────────────────────────────────────────────────────────────────────────

/// Identifier of a list item. Minted from the wall clock in milliseconds and
/// always strictly greater than the previously minted id, so it is unique for
/// the lifetime of the process and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

static LAST_MINTED: AtomicU64 = AtomicU64::new(0);

impl ItemId {
    pub fn mint() -> Self {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let mut last = LAST_MINTED.load(Ordering::Relaxed);
        loop {
            let next = now.max(last + 1);
            match LAST_MINTED.compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return ItemId(next),
                Err(observed) => last = observed,
            }
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// List items
// ────────────────────────────────────────────────────────────────────────────

/// Shared shape of the id-keyed list fields (experience, education, projects).
pub trait ListItem: Clone {
    type Field: Copy;

    /// A new item with empty field values.
    fn blank(id: ItemId) -> Self;
    fn id(&self) -> ItemId;
    fn set(&mut self, field: Self::Field, value: String);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub website: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonalField {
    Name,
    Email,
    Phone,
    Location,
    Linkedin,
    Website,
}

impl PersonalInfo {
    pub fn get(&self, field: PersonalField) -> &str {
        match field {
            PersonalField::Name => &self.name,
            PersonalField::Email => &self.email,
            PersonalField::Phone => &self.phone,
            PersonalField::Location => &self.location,
            PersonalField::Linkedin => &self.linkedin,
            PersonalField::Website => &self.website,
        }
    }

    pub fn set(&mut self, field: PersonalField, value: String) {
        let slot = match field {
            PersonalField::Name => &mut self.name,
            PersonalField::Email => &mut self.email,
            PersonalField::Phone => &mut self.phone,
            PersonalField::Location => &mut self.location,
            PersonalField::Linkedin => &mut self.linkedin,
            PersonalField::Website => &mut self.website,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceItem {
    pub id: ItemId,
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceField {
    Title,
    Company,
    Duration,
    Description,
}

impl ListItem for ExperienceItem {
    type Field = ExperienceField;

    fn blank(id: ItemId) -> Self {
        Self {
            id,
            title: String::new(),
            company: String::new(),
            duration: String::new(),
            description: String::new(),
        }
    }

    fn id(&self) -> ItemId {
        self.id
    }

    fn set(&mut self, field: ExperienceField, value: String) {
        match field {
            ExperienceField::Title => self.title = value,
            ExperienceField::Company => self.company = value,
            ExperienceField::Duration => self.duration = value,
            ExperienceField::Description => self.description = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationItem {
    pub id: ItemId,
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub gpa: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationField {
    Degree,
    Institution,
    Year,
    Gpa,
}

impl ListItem for EducationItem {
    type Field = EducationField;

    fn blank(id: ItemId) -> Self {
        Self {
            id,
            degree: String::new(),
            institution: String::new(),
            year: String::new(),
            gpa: String::new(),
        }
    }

    fn id(&self) -> ItemId {
        self.id
    }

    fn set(&mut self, field: EducationField, value: String) {
        match field {
            EducationField::Degree => self.degree = value,
            EducationField::Institution => self.institution = value,
            EducationField::Year => self.year = value,
            EducationField::Gpa => self.gpa = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub technologies: String,
    pub link: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectField {
    Name,
    Description,
    Technologies,
    Link,
}

impl ListItem for ProjectItem {
    type Field = ProjectField;

    fn blank(id: ItemId) -> Self {
        Self {
            id,
            name: String::new(),
            description: String::new(),
            technologies: String::new(),
            link: String::new(),
        }
    }

    fn id(&self) -> ItemId {
        self.id
    }

    fn set(&mut self, field: ProjectField, value: String) {
        match field {
            ProjectField::Name => self.name = value,
            ProjectField::Description => self.description = value,
            ProjectField::Technologies => self.technologies = value,
            ProjectField::Link => self.link = value,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// Distinct skills in insertion order. Equality is case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(IndexSet<String>);

impl SkillSet {
    /// Trims and appends. Returns false for blank or already-present text.
    pub fn add(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.0.contains(trimmed) {
            return false;
        }
        self.0.insert(trimmed.to_string())
    }

    /// Exact-match removal; remaining skills keep their order.
    pub fn remove(&mut self, text: &str) -> bool {
        self.0.shift_remove(text)
    }

    pub fn contains(&self, text: &str) -> bool {
        self.0.contains(text)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::default();
        for skill in iter {
            set.add(skill.as_ref());
        }
        set
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Root
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub skills: SkillSet,
    pub projects: Vec<ProjectItem>,
}
