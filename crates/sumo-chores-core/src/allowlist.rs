use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Approved monitor tags for one run. Matching is exact and case-sensitive.
pub struct Allowlist {
    tags: BTreeSet<String>,
}

impl Allowlist {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a comma-separated allowlist, trimming entries and dropping blanks.
    pub fn parse(raw: &str) -> Self {
        Self::new(
            raw.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty()),
        )
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn as_set(&self) -> &BTreeSet<String> {
        &self.tags
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPartition {
    pub non_compliant: BTreeSet<String>,
    pub compliant: BTreeSet<String>,
}

impl TagPartition {
    pub fn is_compliant(&self) -> bool {
        self.non_compliant.is_empty()
    }
}

/// Split `tags` into `tags - allowlist` and `tags & allowlist`.
///
/// Callers skip monitors with no tags before evaluating: an untagged monitor is
/// unclassified, not a violation.
pub fn evaluate(tags: &BTreeSet<String>, allowlist: &Allowlist) -> TagPartition {
    let (compliant, non_compliant) = tags
        .iter()
        .cloned()
        .partition::<BTreeSet<_>, _>(|tag| allowlist.contains(tag));
    TagPartition {
        non_compliant,
        compliant,
    }
}
