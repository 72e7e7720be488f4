//! Parent-pointer bookkeeping for the migration history.
//!
//! Every migration module carries a [`Revision`] naming itself and the
//! revision it was generated against. The registered migrations must form a
//! single linear chain: one root, one head and no branches.

use std::collections::{HashMap, HashSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Revision {
    pub id: &'static str,
    pub down_revision: Option<&'static str>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RevisionError {
    #[error("Revision `{0}` is declared more than once")]
    Duplicate(&'static str),
    #[error("Revision chain has no root")]
    MissingRoot,
    #[error("Revision chain has multiple roots: {0:?}")]
    MultipleRoots(Vec<&'static str>),
    #[error("Revision `{revision}` points to unknown parent `{down_revision}`")]
    UnknownParent {
        revision: &'static str,
        down_revision: &'static str,
    },
    #[error("Revision `{parent}` branches into {children:?}")]
    Branch {
        parent: &'static str,
        children: Vec<&'static str>,
    },
    #[error("Revisions not reachable from the root: {0:?}")]
    Unreachable(Vec<&'static str>),
    #[error("Revision at position {position} is `{found}`, expected `{expected}`")]
    OrderMismatch {
        position: usize,
        expected: &'static str,
        found: &'static str,
    },
}

/// Orders revisions from the root to the head.
pub fn linearize(revisions: &[Revision]) -> Result<Vec<Revision>, RevisionError> {
    let mut by_id: HashMap<&'static str, Revision> = HashMap::new();
    for revision in revisions {
        if by_id.insert(revision.id, *revision).is_some() {
            return Err(RevisionError::Duplicate(revision.id));
        }
    }

    let mut roots = vec![];
    let mut children: HashMap<&'static str, Vec<&'static str>> = HashMap::new();
    for revision in revisions {
        match revision.down_revision {
            None => roots.push(revision.id),
            Some(parent) => {
                if !by_id.contains_key(parent) {
                    return Err(RevisionError::UnknownParent {
                        revision: revision.id,
                        down_revision: parent,
                    });
                }
                children.entry(parent).or_default().push(revision.id);
            }
        }
    }

    for revision in revisions {
        if let Some(next) = children.get(revision.id) {
            if next.len() > 1 {
                return Err(RevisionError::Branch {
                    parent: revision.id,
                    children: next.to_owned(),
                });
            }
        }
    }

    if roots.len() > 1 {
        return Err(RevisionError::MultipleRoots(roots));
    }
    let Some(root) = roots.first().copied() else {
        return if revisions.is_empty() {
            Ok(vec![])
        } else {
            Err(RevisionError::MissingRoot)
        };
    };

    let mut ordered = Vec::with_capacity(revisions.len());
    let mut current = Some(root);
    while let Some(id) = current {
        let Some(revision) = by_id.get(id) else {
            break;
        };
        ordered.push(*revision);
        current = children.get(id).and_then(|next| next.first().copied());
    }

    if ordered.len() != revisions.len() {
        let reached: HashSet<_> = ordered.iter().map(|revision| revision.id).collect();
        let unreachable = revisions
            .iter()
            .map(|revision| revision.id)
            .filter(|id| !reached.contains(id))
            .collect();
        return Err(RevisionError::Unreachable(unreachable));
    }

    Ok(ordered)
}

/// Checks that `revisions` is already listed in chain order.
pub fn verify_order(revisions: &[Revision]) -> Result<(), RevisionError> {
    let ordered = linearize(revisions)?;

    match ordered
        .iter()
        .zip(revisions)
        .enumerate()
        .find(|(_, (expected, found))| expected.id != found.id)
    {
        Some((position, (expected, found))) => Err(RevisionError::OrderMismatch {
            position,
            expected: expected.id,
            found: found.id,
        }),
        None => Ok(()),
    }
}
