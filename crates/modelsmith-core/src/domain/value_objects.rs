//! Small immutable values shared by the services and the ports.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// Sentinel meaning "use the latest available version".
pub const LATEST: &str = "latest";

/// Which version of the artifact to use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum VersionRef {
    /// Resolve through the source's latest tag.
    #[default]
    Latest,
    /// A concrete tag or branch name.
    Named(String),
}

impl VersionRef {
    /// Parse user input; empty input and the sentinel both mean [`VersionRef::Latest`].
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(LATEST) {
            Self::Latest
        } else {
            Self::Named(trimmed.to_string())
        }
    }

    pub fn is_latest(&self) -> bool {
        matches!(self, Self::Latest)
    }

    /// The concrete name, if already resolved.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Latest => None,
            Self::Named(name) => Some(name),
        }
    }
}

impl fmt::Display for VersionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str(LATEST),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl From<&str> for VersionRef {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

/// Owner + repository name of the artifact source, e.g. `FINTmodels/fint-informasjonsmodell`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryCoordinate {
    owner: String,
    name: String,
}

impl RepositoryCoordinate {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, DomainError> {
        let owner = owner.into();
        let name = name.into();
        if owner.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "owner" });
        }
        if name.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "repo" });
        }
        Ok(Self { owner, name })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepositoryCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepositoryCoordinate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner, name) = s.split_once('/').ok_or_else(|| DomainError::InvalidValue {
            field: "repository",
            value: s.to_string(),
            reason: "expected OWNER/NAME".into(),
        })?;
        Self::new(owner, name)
    }
}

/// Commit authorship identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub email: String,
}

impl Signature {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_ref_sentinel_and_empty_mean_latest() {
        assert_eq!(VersionRef::parse("latest"), VersionRef::Latest);
        assert_eq!(VersionRef::parse("LATEST"), VersionRef::Latest);
        assert_eq!(VersionRef::parse("  "), VersionRef::Latest);
        assert_eq!(VersionRef::parse("v3.1.0"), VersionRef::Named("v3.1.0".into()));
    }

    #[test]
    fn version_ref_display_round_trips_sentinel() {
        assert_eq!(VersionRef::Latest.to_string(), "latest");
        assert_eq!(VersionRef::parse("master").to_string(), "master");
    }

    #[test]
    fn repository_coordinate_parses_owner_slash_name() {
        let repo: RepositoryCoordinate = "FINTmodels/fint-informasjonsmodell".parse().unwrap();
        assert_eq!(repo.owner(), "FINTmodels");
        assert_eq!(repo.name(), "fint-informasjonsmodell");
        assert_eq!(repo.to_string(), "FINTmodels/fint-informasjonsmodell");
    }

    #[test]
    fn repository_coordinate_rejects_missing_parts() {
        assert!("no-slash".parse::<RepositoryCoordinate>().is_err());
        assert!("/name".parse::<RepositoryCoordinate>().is_err());
        assert!(RepositoryCoordinate::new("owner", "").is_err());
    }

    #[test]
    fn signature_display() {
        let sig = Signature::new("modelsmith", "scaffold@modelsmith.dev");
        assert_eq!(sig.to_string(), "modelsmith <scaffold@modelsmith.dev>");
    }
}
