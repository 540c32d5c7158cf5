//! Resume mutation operations.
#![allow(dead_code)]
//!
//! Every operation is pure over `(current resume, args) -> new resume`: the
//! input is never modified, and a failed operation leaves no partial state
//! behind. Out-of-range indices and section/field mismatches fail fast with a
//! typed [`ModelError`] instead of silently corrupting the record.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::resume::{
    EducationEntry, ExperienceEntry, ProjectEntry, Resume, SectionKey, SkillEntry,
};

// ────────────────────────────────────────────────────────────────────────────
// Operation argument types
// ────────────────────────────────────────────────────────────────────────────

/// Top-level scalar fields of the resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarField {
    Name,
    Location,
    Email,
    Phone,
    Linkedin,
    Github,
}

/// Per-entry fields. Which fields apply depends on the section; a mismatch
/// (e.g. `Company` on an education entry) is a [`ModelError::UnknownField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryField {
    Institution,
    Degree,
    Company,
    Position,
    Title,
    Skill,
    Dates,
    Location,
}

/// Direction for [`move_section`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{section:?} has no entry {index} (len {len})")]
    EntryOutOfRange {
        section: SectionKey,
        index: usize,
        len: usize,
    },

    #[error("{section:?} entry {entry} has no bullet {index} (len {len})")]
    BulletOutOfRange {
        section: SectionKey,
        entry: usize,
        index: usize,
        len: usize,
    },

    #[error("{section:?} does not support {operation}")]
    UnsupportedSection {
        section: SectionKey,
        operation: &'static str,
    },

    #[error("{section:?} entries have no field {field:?}")]
    UnknownField {
        section: SectionKey,
        field: EntryField,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Scalar and entry field edits
// ────────────────────────────────────────────────────────────────────────────

/// Replaces one top-level scalar field.
pub fn set_field(resume: &Resume, field: ScalarField, value: &str) -> Resume {
    let mut next = resume.clone();
    let slot = match field {
        ScalarField::Name => &mut next.name,
        ScalarField::Location => &mut next.location,
        ScalarField::Email => &mut next.email,
        ScalarField::Phone => &mut next.phone,
        ScalarField::Linkedin => &mut next.linkedin,
        ScalarField::Github => &mut next.github,
    };
    *slot = value.to_string();
    next
}

/// Replaces one field of one entry in a list-backed section.
pub fn set_entry_field(
    resume: &Resume,
    section: SectionKey,
    index: usize,
    field: EntryField,
    value: &str,
) -> Result<Resume, ModelError> {
    let mut next = resume.clone();
    check_entry_index(&next, section, index, "set_entry_field")?;

    let unknown = ModelError::UnknownField { section, field };
    match section {
        SectionKey::Profile => {
            return Err(ModelError::UnsupportedSection {
                section,
                operation: "set_entry_field",
            })
        }
        SectionKey::Education => {
            let entry = &mut next.education[index];
            match field {
                EntryField::Institution => entry.institution = value.to_string(),
                EntryField::Degree => entry.degree = value.to_string(),
                EntryField::Dates => entry.dates = value.to_string(),
                EntryField::Location => entry.location = value.to_string(),
                _ => return Err(unknown),
            }
        }
        SectionKey::Experience => {
            let entry = &mut next.experience[index];
            match field {
                EntryField::Company => entry.company = value.to_string(),
                EntryField::Position => entry.position = value.to_string(),
                EntryField::Dates => entry.dates = value.to_string(),
                EntryField::Location => entry.location = value.to_string(),
                _ => return Err(unknown),
            }
        }
        SectionKey::Projects => {
            let entry = &mut next.projects[index];
            match field {
                EntryField::Title => entry.title = value.to_string(),
                EntryField::Dates => entry.dates = value.to_string(),
                _ => return Err(unknown),
            }
        }
        SectionKey::Skills => {
            let entry = &mut next.skills[index];
            match field {
                EntryField::Skill => entry.skill = value.to_string(),
                _ => return Err(unknown),
            }
        }
    }
    Ok(next)
}

// ────────────────────────────────────────────────────────────────────────────
// Entry add / remove
// ────────────────────────────────────────────────────────────────────────────

/// Appends a blank entry shaped for the section.
pub fn add_entry(resume: &Resume, section: SectionKey) -> Result<Resume, ModelError> {
    let mut next = resume.clone();
    match section {
        SectionKey::Profile => {
            return Err(ModelError::UnsupportedSection {
                section,
                operation: "add_entry",
            })
        }
        SectionKey::Education => next.education.push(EducationEntry::blank()),
        SectionKey::Skills => next.skills.push(SkillEntry::blank()),
        SectionKey::Experience => next.experience.push(ExperienceEntry::blank()),
        SectionKey::Projects => next.projects.push(ProjectEntry::blank()),
    }
    Ok(next)
}

/// Removes the entry at `index`. Defined even when it empties the list; the
/// renderer handles zero-entry sections.
pub fn remove_entry(resume: &Resume, section: SectionKey, index: usize) -> Result<Resume, ModelError> {
    let mut next = resume.clone();
    check_entry_index(&next, section, index, "remove_entry")?;
    match section {
        SectionKey::Profile => unreachable!("checked above"),
        SectionKey::Education => {
            next.education.remove(index);
        }
        SectionKey::Skills => {
            next.skills.remove(index);
        }
        SectionKey::Experience => {
            next.experience.remove(index);
        }
        SectionKey::Projects => {
            next.projects.remove(index);
        }
    }
    Ok(next)
}

// ────────────────────────────────────────────────────────────────────────────
// Bullet operations
// ────────────────────────────────────────────────────────────────────────────

/// Replaces the bullet at `bullet_index` within one entry.
pub fn set_bullet(
    resume: &Resume,
    section: SectionKey,
    index: usize,
    bullet_index: usize,
    value: &str,
) -> Result<Resume, ModelError> {
    let mut next = resume.clone();
    let bullets = bullets_mut(&mut next, section, index, "set_bullet")?;
    if bullet_index >= bullets.len() {
        return Err(ModelError::BulletOutOfRange {
            section,
            entry: index,
            index: bullet_index,
            len: bullets.len(),
        });
    }
    bullets[bullet_index] = value.to_string();
    Ok(next)
}

/// Inserts a blank bullet immediately after `after_index` (append when
/// `after_index` is the last position).
pub fn add_bullet(
    resume: &Resume,
    section: SectionKey,
    index: usize,
    after_index: usize,
) -> Result<Resume, ModelError> {
    let mut next = resume.clone();
    let bullets = bullets_mut(&mut next, section, index, "add_bullet")?;
    if after_index >= bullets.len() {
        return Err(ModelError::BulletOutOfRange {
            section,
            entry: index,
            index: after_index,
            len: bullets.len(),
        });
    }
    bullets.insert(after_index + 1, String::new());
    Ok(next)
}

/// Removes the bullet at `bullet_index`. May leave the list empty; the edit
/// form treats that as a transient state.
pub fn remove_bullet(
    resume: &Resume,
    section: SectionKey,
    index: usize,
    bullet_index: usize,
) -> Result<Resume, ModelError> {
    let mut next = resume.clone();
    let bullets = bullets_mut(&mut next, section, index, "remove_bullet")?;
    if bullet_index >= bullets.len() {
        return Err(ModelError::BulletOutOfRange {
            section,
            entry: index,
            index: bullet_index,
            len: bullets.len(),
        });
    }
    bullets.remove(bullet_index);
    Ok(next)
}

// ────────────────────────────────────────────────────────────────────────────
// Section reorder
// ────────────────────────────────────────────────────────────────────────────

/// Swaps `section` with its neighbor in `direction`. No-op at either
/// boundary, which preserves the permutation invariant unconditionally.
pub fn move_section(resume: &Resume, section: SectionKey, direction: Direction) -> Resume {
    let mut next = resume.clone();
    let Some(idx) = next.section_order.iter().position(|k| *k == section) else {
        return next;
    };
    let swap_idx = match direction {
        Direction::Up => {
            if idx == 0 {
                return next;
            }
            idx - 1
        }
        Direction::Down => {
            if idx + 1 >= next.section_order.len() {
                return next;
            }
            idx + 1
        }
    };
    next.section_order.swap(idx, swap_idx);
    next
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

fn check_entry_index(
    resume: &Resume,
    section: SectionKey,
    index: usize,
    operation: &'static str,
) -> Result<(), ModelError> {
    let len = resume
        .section_len(section)
        .ok_or(ModelError::UnsupportedSection { section, operation })?;
    if index >= len {
        return Err(ModelError::EntryOutOfRange {
            section,
            index,
            len,
        });
    }
    Ok(())
}

/// Resolves the bullet list of one entry. Only education, experience, and
/// projects carry bullets; skills and profile do not.
fn bullets_mut<'a>(
    resume: &'a mut Resume,
    section: SectionKey,
    index: usize,
    operation: &'static str,
) -> Result<&'a mut Vec<String>, ModelError> {
    check_entry_index(resume, section, index, operation)?;
    match section {
        SectionKey::Education => Ok(&mut resume.education[index].details),
        SectionKey::Experience => Ok(&mut resume.experience[index].details),
        SectionKey::Projects => Ok(&mut resume.projects[index].description),
        SectionKey::Skills | SectionKey::Profile => {
            Err(ModelError::UnsupportedSection { section, operation })
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
