//! Portfolio content loading
//!
//! The biography, project list and every other record the sections render are
//! kept in `content/portfolio.toml`, compiled into the binary.

use folio_types::{Portfolio, ProjectId};

use crate::config::ConfigError;

const EMBEDDED_PORTFOLIO: &str = include_str!("../content/portfolio.toml");

/// Parse the portfolio compiled into the binary.
pub fn load_embedded() -> Result<Portfolio, ConfigError> {
    parse_portfolio(EMBEDDED_PORTFOLIO)
}

pub fn parse_portfolio(text: &str) -> Result<Portfolio, ConfigError> {
    let portfolio: Portfolio = toml::from_str(text).map_err(|source| ConfigError::Parse {
        document: "portfolio.toml",
        source,
    })?;

    if let Some(id) = first_duplicate_project(&portfolio) {
        // Modal lookup is by id; keep the first occurrence and say so.
        tracing::warn!(project_id = id, "duplicate project id in portfolio content");
    }

    tracing::debug!(
        projects = portfolio.projects.len(),
        experience = portfolio.experience.len(),
        "portfolio content loaded"
    );
    Ok(portfolio)
}

fn first_duplicate_project(portfolio: &Portfolio) -> Option<ProjectId> {
    let mut seen = Vec::with_capacity(portfolio.projects.len());
    for project in &portfolio.projects {
        if seen.contains(&project.id) {
            return Some(project.id);
        }
        seen.push(project.id);
    }
    None
}
