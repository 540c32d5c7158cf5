#![allow(dead_code)]

use chrono::Utc;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Section keys
// ────────────────────────────────────────────────────────────────────────────

/// The five resume sections. `Resume::section_order` is always a permutation
/// of exactly these keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Profile,
    Education,
    Skills,
    Experience,
    Projects,
}

impl SectionKey {
    pub const ALL: [SectionKey; 5] = [
        SectionKey::Profile,
        SectionKey::Education,
        SectionKey::Skills,
        SectionKey::Experience,
        SectionKey::Projects,
    ];

    /// Section title as rendered in headers (uppercasing happens at render time).
    pub fn title(&self) -> &'static str {
        match self {
            SectionKey::Profile => "Profile",
            SectionKey::Education => "Education",
            SectionKey::Skills => "Skills",
            SectionKey::Experience => "Experience",
            SectionKey::Projects => "Projects",
        }
    }
}

/// The default section order: profile, education, skills, experience, projects.
pub fn default_section_order() -> Vec<SectionKey> {
    SectionKey::ALL.to_vec()
}

/// Returns true if `order` is a permutation of exactly the five known keys.
pub fn is_valid_section_order(order: &[SectionKey]) -> bool {
    order.len() == SectionKey::ALL.len() && SectionKey::ALL.iter().all(|k| order.contains(k))
}

// ────────────────────────────────────────────────────────────────────────────
// Entry types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub dates: String,
    pub location: String,
    pub details: Vec<String>,
}

impl EducationEntry {
    pub fn blank() -> Self {
        Self {
            institution: String::new(),
            degree: String::new(),
            dates: String::new(),
            location: String::new(),
            details: vec![String::new()],
        }
    }
}

impl Default for EducationEntry {
    fn default() -> Self {
        Self::blank()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub dates: String,
    pub location: String,
    pub details: Vec<String>,
}

impl ExperienceEntry {
    pub fn blank() -> Self {
        Self {
            company: String::new(),
            position: String::new(),
            dates: String::new(),
            location: String::new(),
            details: vec![String::new()],
        }
    }
}

impl Default for ExperienceEntry {
    fn default() -> Self {
        Self::blank()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub title: String,
    pub dates: String,
    pub description: Vec<String>,
}

impl ProjectEntry {
    pub fn blank() -> Self {
        Self {
            title: String::new(),
            dates: String::new(),
            description: vec![String::new()],
        }
    }
}

impl Default for ProjectEntry {
    fn default() -> Self {
        Self::blank()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillEntry {
    pub skill: String,
}

impl SkillEntry {
    pub fn blank() -> Self {
        Self::default()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Root aggregate
// ────────────────────────────────────────────────────────────────────────────

/// The resume record. Wire shape matches the stored document: camelCase
/// timestamps and `sectionOrder`, section collections under their plain names.
///
/// Mutated only through the operations in [`crate::models::ops`]; held in
/// memory until explicitly persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resume {
    pub name: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    /// RFC 3339, set at creation and preserved across saves.
    pub created_at: Option<String>,
    /// RFC 3339, stamped on each persisted save.
    pub updated_at: Option<String>,
    pub section_order: Vec<SectionKey>,
}

impl Resume {
    /// A fresh resume: all-blank scalars, one blank entry per section list,
    /// default section order, creation timestamp set.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            location: String::new(),
            email: String::new(),
            phone: String::new(),
            linkedin: String::new(),
            github: String::new(),
            education: vec![EducationEntry::blank()],
            skills: vec![SkillEntry::blank()],
            experience: vec![ExperienceEntry::blank()],
            projects: vec![ProjectEntry::blank()],
            created_at: Some(Utc::now().to_rfc3339()),
            updated_at: None,
            section_order: default_section_order(),
        }
    }

    /// Number of entries in a list-backed section. Profile has no entry list.
    pub fn section_len(&self, section: SectionKey) -> Option<usize> {
        match section {
            SectionKey::Profile => None,
            SectionKey::Education => Some(self.education.len()),
            SectionKey::Skills => Some(self.skills.len()),
            SectionKey::Experience => Some(self.experience.len()),
            SectionKey::Projects => Some(self.projects.len()),
        }
    }

    /// Repairs a loaded record whose `section_order` is missing keys or
    /// carries duplicates (e.g. hand-edited documents). Valid orders pass
    /// through untouched.
    pub fn normalize_section_order(&mut self) {
        if !is_valid_section_order(&self.section_order) {
            self.section_order = default_section_order();
        }
    }
}

impl Default for Resume {
    fn default() -> Self {
        Self::new()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
