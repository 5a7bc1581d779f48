//! Package-name selectors built from glob lists.

use globset::{Glob, GlobSet, GlobSetBuilder};

/// A compiled list of glob patterns, matched against scope names.
#[derive(Clone, Debug)]
pub struct GlobList {
    patterns: Vec<String>,
    set: GlobSet,
}

impl GlobList {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, globset::Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern.as_ref())?);
        }
        Ok(Self {
            patterns: patterns.iter().map(|p| p.as_ref().to_string()).collect(),
            set: builder.build()?,
        })
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn matches_any(&self, name: &str) -> bool {
        self.set.is_match(name)
    }
}

/// Which scopes an include or exclude list selects.
///
/// Absent lists are resolved at config time: an absent include list becomes
/// `Everything`, an absent exclude list becomes `Nothing`.
#[derive(Clone, Debug)]
pub enum PackageSelector {
    Everything,
    Nothing,
    Matching(GlobList),
}

impl PackageSelector {
    /// Build a selector from an optional pattern list, using `absent` when there is none.
    pub fn from_patterns<S: AsRef<str>>(
        patterns: Option<&[S]>,
        absent: PackageSelector,
    ) -> Result<Self, globset::Error> {
        match patterns {
            Some(patterns) => Ok(PackageSelector::Matching(GlobList::new(patterns)?)),
            None => Ok(absent),
        }
    }

    pub fn is_everything(&self) -> bool {
        matches!(self, PackageSelector::Everything)
    }
}
