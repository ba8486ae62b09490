//! Shared content types for Folio
//!
//! This crate contains the serializable records that describe the portfolio:
//! section descriptors, projects, and the biographical entries rendered by each
//! section. They are shared between the platform-independent core (folio-core)
//! and the WASM frontend (folio-ui).

use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Sections
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level content block of the page, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Home,
    About,
    Projects,
    Experience,
    Leadership,
    Education,
    Contact,
}

impl SectionId {
    /// Anchor id used for `href="#..."` links and scroll-position lookups
    pub fn anchor(&self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::About => "about",
            SectionId::Projects => "projects",
            SectionId::Experience => "experience",
            SectionId::Leadership => "leadership",
            SectionId::Education => "education",
            SectionId::Contact => "contact",
        }
    }

    /// All sections in document order (top to bottom)
    pub fn all() -> &'static [SectionId] {
        &[
            SectionId::Home,
            SectionId::About,
            SectionId::Projects,
            SectionId::Experience,
            SectionId::Leadership,
            SectionId::Education,
            SectionId::Contact,
        ]
    }

    /// Resolve an anchor (with or without the leading `#`)
    pub fn from_anchor(anchor: &str) -> Option<SectionId> {
        let anchor = anchor.trim_start_matches('#');
        Self::all().iter().copied().find(|s| s.anchor() == anchor)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor())
    }
}

/// Navigation entry: anchor target plus the label shown in the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    pub id: SectionId,
    pub name: String,
    /// Font Awesome icon name (without the `fa-` prefix)
    #[serde(default)]
    pub icon: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Projects
// ─────────────────────────────────────────────────────────────────────────────

pub type ProjectId = u32;

/// Category used by the gallery filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Web,
    Mobile,
    Ai,
}

impl ProjectCategory {
    pub fn key(&self) -> &'static str {
        match self {
            ProjectCategory::Web => "web",
            ProjectCategory::Mobile => "mobile",
            ProjectCategory::Ai => "ai",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectCategory::Web => "Web",
            ProjectCategory::Mobile => "Mobile",
            ProjectCategory::Ai => "AI",
        }
    }

    pub fn all() -> &'static [ProjectCategory] {
        &[ProjectCategory::Web, ProjectCategory::Mobile, ProjectCategory::Ai]
    }

    pub fn from_key(key: &str) -> Option<ProjectCategory> {
        Self::all().iter().copied().find(|c| c.key() == key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    pub category: ProjectCategory,
}

// ─────────────────────────────────────────────────────────────────────────────
// Biography
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub twitter: String,
    /// Path of the downloadable resume document
    #[serde(default)]
    pub resume: String,
    #[serde(default)]
    pub headshot: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub position: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub location: String,
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadershipRole {
    pub title: String,
    pub organization: String,
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub title: String,
    pub organization: String,
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Degree {
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(default)]
    pub relevant_courses: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnlineCourse {
    pub title: String,
    pub platform: String,
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_url: Option<String>,
}

/// Tag cloud of technologies shown under education
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnologyGroup {
    pub name: String,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency, 0-100
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub name: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

/// Everything the sections render, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Portfolio {
    pub personal: PersonalInfo,
    #[serde(default)]
    pub story: Vec<String>,
    #[serde(default)]
    pub skill_groups: Vec<SkillGroup>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub leadership: Vec<LeadershipRole>,
    #[serde(default)]
    pub awards: Vec<Award>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub education: Vec<Degree>,
    #[serde(default)]
    pub courses: Vec<OnlineCourse>,
    #[serde(default)]
    pub technology_groups: Vec<TechnologyGroup>,
}

impl Portfolio {
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}
