//! Program content table.
//!
//! A [`Catalog`] is built once at startup (built-in content or a JSON
//! file) and handed to whoever needs it. Nothing reads program content
//! from a global.
//!
//! Structure:
//! - Built-in content (the six programs)
//! - Construction: validated assembly, JSON load/export
//! - Lookup: by index and by title
//! - Audit: summary/detail relationship checks

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::icon_path;
use crate::types::{ProgramDetail, ProgramSummary};

// ============================================================================
// ERRORS AND ISSUES
// ============================================================================

/// Structural problems that make a catalog unusable.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON")]
    Parse(#[source] serde_json::Error),

    #[error("failed to serialize catalog")]
    Serialize(#[source] serde_json::Error),

    #[error("catalog has no programs")]
    Empty,

    #[error("program '{0}' is listed more than once")]
    DuplicateProgram(String),

    #[error("detail record for '{0}' is defined more than once")]
    DuplicateDetail(String),
}

/// Consistency findings that the UI can survive but authors should fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    /// A card has no detail record; the modal falls back to a generic panel.
    MissingDetail { title: String },
    /// A detail record that no card points at.
    OrphanDetail { title: String },
    /// A detail record with an empty checklist.
    EmptyFocusAreas { title: String },
    /// Accent colour token the theme does not know.
    UnknownAccent { title: String, color: String },
}

impl std::fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogIssue::MissingDetail { title } => {
                write!(f, "'{}' has no detail record", title)
            }
            CatalogIssue::OrphanDetail { title } => {
                write!(f, "detail record '{}' matches no program", title)
            }
            CatalogIssue::EmptyFocusAreas { title } => {
                write!(f, "'{}' lists no focus areas", title)
            }
            CatalogIssue::UnknownAccent { title, color } => {
                write!(f, "'{}' uses unknown accent colour '{}'", title, color)
            }
        }
    }
}

// ============================================================================
// CATALOG
// ============================================================================

/// On-disk shape of a catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub heading: String,
    pub intro: String,
    pub programs: Vec<ProgramSummary>,
    pub details: Vec<ProgramDetail>,
}

/// Immutable program content: section text, cards, and detail records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    heading: String,
    intro: String,
    programs: Vec<ProgramSummary>,
    details: BTreeMap<String, ProgramDetail>,
}

impl Catalog {
    /// Assemble a catalog, rejecting empty or ambiguous content.
    pub fn from_parts(
        heading: impl Into<String>,
        intro: impl Into<String>,
        programs: Vec<ProgramSummary>,
        details: Vec<ProgramDetail>,
    ) -> Result<Self, CatalogError> {
        if programs.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = BTreeSet::new();
        for program in &programs {
            if !seen.insert(program.title.as_str()) {
                return Err(CatalogError::DuplicateProgram(program.title.clone()));
            }
        }

        let mut by_title = BTreeMap::new();
        for detail in details {
            let title = detail.title.clone();
            if by_title.insert(title.clone(), detail).is_some() {
                return Err(CatalogError::DuplicateDetail(title));
            }
        }

        Ok(Catalog {
            heading: heading.into(),
            intro: intro.into(),
            programs,
            details: by_title,
        })
    }

    /// Parse a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json).map_err(CatalogError::Parse)?;
        Self::from_parts(file.heading, file.intro, file.programs, file.details)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The on-disk representation, cards first then details in card order.
    pub fn to_file(&self) -> CatalogFile {
        let mut details: Vec<ProgramDetail> = self
            .programs
            .iter()
            .filter_map(|p| self.details.get(&p.title).cloned())
            .collect();
        // Orphans last, so an export round-trips everything.
        details.extend(
            self.details
                .values()
                .filter(|d| self.position(&d.title).is_none())
                .cloned(),
        );

        CatalogFile {
            heading: self.heading.clone(),
            intro: self.intro.clone(),
            programs: self.programs.clone(),
            details,
        }
    }

    /// Pretty JSON, suitable as a starting point for a custom catalog.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        serde_json::to_string_pretty(&self.to_file()).map_err(CatalogError::Serialize)
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn intro(&self) -> &str {
        &self.intro
    }

    pub fn programs(&self) -> &[ProgramSummary] {
        &self.programs
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn program(&self, index: usize) -> Option<&ProgramSummary> {
        self.programs.get(index)
    }

    /// Index of the card with this title.
    pub fn position(&self, title: &str) -> Option<usize> {
        self.programs.iter().position(|p| p.title == title)
    }

    /// Detail record for a title. None means the modal must fall back.
    pub fn detail(&self, title: &str) -> Option<&ProgramDetail> {
        self.details.get(title)
    }

    /// Cross-check cards against detail records.
    ///
    /// `known_accent` decides whether an accent token is renderable; the
    /// theme owns that knowledge.
    pub fn audit(&self, known_accent: impl Fn(&str) -> bool) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        for program in &self.programs {
            if !self.details.contains_key(&program.title) {
                issues.push(CatalogIssue::MissingDetail {
                    title: program.title.clone(),
                });
            }
        }

        for detail in self.details.values() {
            if self.position(&detail.title).is_none() {
                issues.push(CatalogIssue::OrphanDetail {
                    title: detail.title.clone(),
                });
            }
            if detail.focus_areas.is_empty() {
                issues.push(CatalogIssue::EmptyFocusAreas {
                    title: detail.title.clone(),
                });
            }
            if !known_accent(&detail.accent_color) {
                issues.push(CatalogIssue::UnknownAccent {
                    title: detail.title.clone(),
                    color: detail.accent_color.clone(),
                });
            }
        }

        issues
    }
}

// ============================================================================
// BUILT-IN CONTENT
// ============================================================================

const HEADING: &str = "WANT TO KNOW MORE ABOUT THE GLOBAL FLAME YOUTH COMMUNITY?";

const INTRO: &str = "The Global Flame Youth Community also known as (House of Opera) is a \
youth-focused organization dedicated to developing the potential of young people through \
comprehensive programs in arts, education, sports, and community engagement. We empower \
young persons who can inspire talents waiting to be discovered and nurtured.";

struct BuiltinProgram {
    title: &'static str,
    blurb: &'static str,
    icon: &'static str,
    long_title: &'static str,
    description: &'static str,
    focus: &'static [&'static str],
    accent: &'static str,
}

const BUILTIN: [BuiltinProgram; 6] = [
    BuiltinProgram {
        title: "EVERYTHING EDUCATION",
        blurb: "We provide educational support and resources to help youth excel academically.",
        icon: "education",
        long_title: "Academic Excellence and Future Readiness",
        description: "Our **Education** pillar offers comprehensive academic support designed to \
close achievement gaps and prepare youth for post-secondary success. We focus on developing \
critical thinking, study skills, and fostering a lifelong love for learning, ensuring every \
participant has the resources to excel academically.",
        focus: &["Tutoring on involving God in academics", "Admissions Counseling"],
        accent: "blue-500",
    },
    BuiltinProgram {
        title: "EVERYTHING POETRY",
        blurb: "Express yourself through spoken word and explore the power of poetry.",
        icon: "poetry",
        long_title: "Spoken Word, Creative Writing, and Performance",
        description: "The **Poetry** program is a powerful platform for self-expression and vocal \
empowerment. This program builds confidence, strengthens literary skills, and helps participants \
explore complex emotions and social issues through the art of poetry.",
        focus: &[
            "Spoken Word Workshops",
            "Poetry",
            "Creative Writing Development",
            "Emotional Intelligence",
        ],
        accent: "pink-500",
    },
    BuiltinProgram {
        title: "EVERYTHING SPORTS",
        blurb: "Build character and teamwork through various sports activities.",
        icon: "sports",
        long_title: "Character and Faith Building Through Athletics and Fitness",
        description: "More than just games, our **Sports** pillar uses athletic activities\u{2014}\
including basketball, soccer, and fitness training\u{2014}as a vehicle for holistic development. \
Participants learn crucial life skills such as teamwork, discipline, leadership, and resilience.",
        focus: &[
            "Organized Leagues",
            "Teamwork & Leadership Skills",
            "Mentorship from Coaches",
        ],
        accent: "green-500",
    },
    BuiltinProgram {
        title: "EVERYTHING MOVIES",
        blurb: "Perform in youth-led movie productions and explore the art of filmmaking.",
        icon: "movies",
        long_title: "The Art and Craft of Youth Revival & Discipleship via media",
        description: "The **Movies** program is a hands-on exploration of cinematic arts. They \
learn industry-standard technical skills while collaborating to produce short films and \
documentaries, giving them practical experience and a creative outlet for visual storytelling.",
        focus: &[
            "Scriptwriting & Storyboarding",
            "Video Editing Software",
            "Youth-Led Film Productions",
        ],
        accent: "red-500",
    },
    BuiltinProgram {
        title: "EVERYTHING FASHION",
        blurb: "Explore fashion design and develop an appreciation for style and creativity.",
        icon: "fashion",
        long_title: "Design, Style, and Entrepreneurship",
        description: "The **Fashion** program introduces youth to the diverse world of design, \
style, and merchandising. We offer guidance on portfolio development and branding, culminating \
in annual youth fashion shows where members model and display their creations.",
        focus: &[
            "Design Sketching & Theory",
            "Sustainable Fashion Projects",
            "Portfolio Development",
        ],
        accent: "amber-500",
    },
    BuiltinProgram {
        title: "EVERYTHING POLITICS",
        blurb: "Comprehend key political concepts and learn how to make a difference.",
        icon: "politics",
        long_title: "Civic Literacy and Community Advocacy",
        description: "Our **Politics** program is dedicated to fostering informed and active \
citizens. The program connects participants with local leaders and encourages them to initiate \
and advocate for community change, turning theoretical knowledge into real-world impact.",
        focus: &[
            "Debate & Public Speaking",
            "Voter Education & Civic Literacy",
            "Community Advocacy Projects",
        ],
        accent: "indigo-500",
    },
];

impl Catalog {
    /// The organisation's six programs.
    pub fn builtin() -> Self {
        let programs = BUILTIN
            .iter()
            .map(|b| ProgramSummary {
                title: b.title.to_string(),
                short_description: b.blurb.to_string(),
                icon_path: icon_path(b.icon),
            })
            .collect();

        let details = BUILTIN
            .iter()
            .map(|b| {
                (
                    b.title.to_string(),
                    ProgramDetail {
                        title: b.title.to_string(),
                        long_title: b.long_title.to_string(),
                        long_description: b.description.to_string(),
                        focus_areas: b.focus.iter().map(|f| f.to_string()).collect(),
                        accent_color: b.accent.to_string(),
                    },
                )
            })
            .collect();

        Catalog {
            heading: HEADING.to_string(),
            intro: INTRO.to_string(),
            programs,
            details,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
