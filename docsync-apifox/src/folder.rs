//! Folder reconciliation.
//!
//! Compares a desired folder path against a snapshot of the remote folder
//! tree and plans the creates needed to make the path exist. The snapshot is
//! fetched once per sync, so folders created concurrently by someone else
//! are not seen until the next run.

use std::fmt;

use crate::wire::RemoteFolder;

/// Id of the project root folder.
pub const ROOT_FOLDER_ID: i64 = 0;

/// A `/`-separated folder path.
///
/// Empty segments are dropped, so `""` and `"/"` both name the root.
/// Segments are otherwise kept as written and compared case-sensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FolderPath {
    segments: Vec<String>,
}

impl FolderPath {
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl From<&str> for FolderPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl<S: Into<String>> FromIterator<S> for FolderPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter
                .into_iter()
                .map(Into::into)
                .filter(|segment: &String| !segment.is_empty())
                .collect(),
        }
    }
}

impl fmt::Display for FolderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join("/"))
    }
}

/// Parent of a folder that is about to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentRef {
    /// A folder that already exists remotely.
    Existing(i64),
    /// The folder created by an earlier step of the same plan.
    Planned(usize),
}

/// One folder to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStep {
    pub name: String,
    pub parent: ParentRef,
}

/// Ordered creates that make a folder path exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderPlan {
    /// Deepest folder of the path that already exists.
    existing: i64,
    steps: Vec<CreateStep>,
}

impl FolderPlan {
    pub fn steps(&self) -> &[CreateStep] {
        &self.steps
    }

    /// True when every segment already exists.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Deepest existing folder the first create hangs off.
    pub fn deepest_existing(&self) -> i64 {
        self.existing
    }

    /// Leaf folder id, known without creating anything.
    pub fn resolved(&self) -> Option<i64> {
        self.is_empty().then_some(self.existing)
    }

    /// Real parent id of `step`, given the ids assigned to earlier steps.
    ///
    /// `assigned[i]` is the id the service returned for step `i`. Returns
    /// `None` when the parent is a step that has not been assigned yet.
    pub fn parent_id(&self, step: usize, assigned: &[i64]) -> Option<i64> {
        match self.steps.get(step)?.parent {
            ParentRef::Existing(id) => Some(id),
            ParentRef::Planned(index) => assigned.get(index).copied(),
        }
    }

    /// Leaf folder id once every step has been assigned.
    pub fn leaf_id(&self, assigned: &[i64]) -> Option<i64> {
        if self.is_empty() {
            Some(self.existing)
        } else if assigned.len() == self.steps.len() {
            assigned.last().copied()
        } else {
            None
        }
    }
}

/// Plan the creates needed for `path` given the remote `existing` folders.
///
/// A segment matches an existing folder when the names are equal and the
/// folder's `parentId` is the current parent id in decimal. The first
/// segment without a match, and every segment after it, becomes a create
/// step.
pub fn reconcile(path: &FolderPath, existing: &[RemoteFolder]) -> FolderPlan {
    let mut current = ROOT_FOLDER_ID;
    let mut segments = path.segments().iter();

    while let Some(segment) = segments.next() {
        let parent = current.to_string();
        match existing
            .iter()
            .find(|folder| folder.name == *segment && folder.parent_id == parent)
        {
            Some(folder) => current = folder.id,
            None => {
                let mut steps = vec![CreateStep {
                    name: segment.clone(),
                    parent: ParentRef::Existing(current),
                }];
                for name in segments.by_ref() {
                    let parent = ParentRef::Planned(steps.len() - 1);
                    steps.push(CreateStep {
                        name: name.clone(),
                        parent,
                    });
                }
                return FolderPlan {
                    existing: current,
                    steps,
                };
            }
        }
    }

    FolderPlan {
        existing: current,
        steps: Vec::new(),
    }
}
