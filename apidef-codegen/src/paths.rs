//! Collision-free output path allocation.
//!
//! Every generated file is placed through [`unique_path`]: the file
//! describes where it would like to go with a [`PathTemplate`], and the
//! allocator picks the first candidate that is not already in the
//! [`ReservedPaths`] set. Taking the set by `&mut` means two allocations can
//! never race for the same candidate.

use std::collections::BTreeMap;

use thiserror::Error;

/// Placeholder replaced by an attempt counter.
pub const PLACEHOLDER: &str = "{n}";

/// Numbered candidates tried before giving up.
pub const MAX_ATTEMPTS: usize = 10_000;

/// Errors from path allocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("path template '{template}' must contain exactly one {{n}} placeholder")]
    InvalidTemplate { template: String },

    #[error("no free path for '{template}' after {attempts} attempts")]
    Exhausted { template: String, attempts: usize },
}

/// A relative output path with one `{n}` placeholder.
///
/// ```
/// use apidef_codegen::paths::{PathTemplate, ReservedPaths, unique_path};
///
/// let template = PathTemplate::new("src/endpoints/divider{n}.rs")?.bare_first();
/// let mut reserved = ReservedPaths::new();
///
/// assert_eq!(unique_path(&template, &mut reserved)?, "src/endpoints/divider.rs");
/// assert_eq!(unique_path(&template, &mut reserved)?, "src/endpoints/divider0.rs");
/// # Ok::<(), apidef_codegen::paths::AllocationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    template: String,
    bare_first: bool,
}

impl PathTemplate {
    /// Create a template; fails unless `template` holds exactly one `{n}`.
    pub fn new(template: impl Into<String>) -> Result<Self, AllocationError> {
        let template = template.into();
        if template.matches(PLACEHOLDER).count() != 1 {
            return Err(AllocationError::InvalidTemplate { template });
        }
        Ok(Self {
            template,
            bare_first: false,
        })
    }

    /// Try the path with the placeholder removed before any numbered one.
    pub fn bare_first(mut self) -> Self {
        self.bare_first = true;
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// The candidate for `attempt`, or the bare path for `None`.
    pub fn candidate(&self, attempt: Option<usize>) -> String {
        match attempt {
            Some(n) => self.template.replacen(PLACEHOLDER, &n.to_string(), 1),
            None => self.template.replacen(PLACEHOLDER, "", 1),
        }
    }

    /// Candidates in the order they are tried.
    pub fn candidates(&self) -> impl Iterator<Item = String> + '_ {
        let bare = self.bare_first.then(|| self.candidate(None));
        bare.into_iter()
            .chain((0..MAX_ATTEMPTS).map(|n| self.candidate(Some(n))))
    }
}

/// Paths already taken in one generation run.
///
/// The flag records whether the path was handed out by [`unique_path`]
/// (`true`) or seeded by the caller (`false`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservedPaths {
    paths: BTreeMap<String, bool>,
}

impl ReservedPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a path that must not be allocated. Returns false if it was
    /// already present.
    pub fn reserve(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.paths.contains_key(&path) {
            return false;
        }
        self.paths.insert(path, false);
        true
    }

    pub fn is_reserved(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths handed out by the allocator, in sorted order.
    pub fn allocated(&self) -> impl Iterator<Item = &str> {
        self.paths
            .iter()
            .filter(|(_, allocated)| **allocated)
            .map(|(path, _)| path.as_str())
    }
}

impl<S: Into<String>> FromIterator<S> for ReservedPaths {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut reserved = Self::new();
        for path in iter {
            reserved.reserve(path);
        }
        reserved
    }
}

/// Allocate the first free candidate of `template` and mark it reserved.
pub fn unique_path(
    template: &PathTemplate,
    reserved: &mut ReservedPaths,
) -> Result<String, AllocationError> {
    for candidate in template.candidates() {
        if !reserved.is_reserved(&candidate) {
            tracing::trace!(path = %candidate, template = template.template(), "allocated path");
            reserved.paths.insert(candidate.clone(), true);
            return Ok(candidate);
        }
    }
    Err(AllocationError::Exhausted {
        template: template.template.clone(),
        attempts: MAX_ATTEMPTS,
    })
}
