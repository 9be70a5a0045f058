use anyhow::{anyhow, bail, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let (owner, name) = trimmed
            .split_once('/')
            .ok_or_else(|| anyhow!("invalid github repository '{raw}', expected owner/repo"))?;
        let owner = owner.trim();
        let name = name.trim();
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            bail!("invalid github repository '{raw}', expected owner/repo");
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Resolve from an explicit value first, then the invocation's ambient
    /// repository (`GITHUB_REPOSITORY` on Actions runners).
    ///
    /// Blank values count as absent. A malformed explicit value is an error; a
    /// malformed ambient value is treated as absent.
    pub fn resolve(explicit: Option<&str>, ambient: Option<&str>) -> Result<Option<Self>> {
        if let Some(explicit) = explicit.filter(|value| !value.trim().is_empty()) {
            return Self::parse(explicit).map(Some);
        }
        Ok(ambient
            .filter(|value| !value.trim().is_empty())
            .and_then(|value| Self::parse(value).ok()))
    }

    pub fn as_slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}
