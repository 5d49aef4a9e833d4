// Merging a new path into the accumulated path set

use crate::path::Path;
use tracing::trace;

/// What `register_path` did with a new path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRegistration {
    /// Already covered by a registered path
    Discarded,
    /// Replaced the less complete path at this index
    Replaced(usize),
    /// Added as a new path at this index
    Appended(usize),
}

impl Path {
    /// Whether this path's hops appear contiguously and in order within
    /// `other`'s hops, with the same direction and endpoint hosts.
    pub fn is_subset_of(&self, other: &Path) -> bool {
        if self.backward != other.backward {
            return false;
        }

        if let Some(host) = self.src_host
            && other.src_host != Some(host)
        {
            return false;
        }

        if let Some(host) = self.dst_host
            && other.dst_host != Some(host)
        {
            return false;
        }

        let subset = &self.hops;
        let target = &other.hops;

        for (i, hop) in subset.iter().enumerate() {
            let Some(index) = target.iter().position(|n| n == hop) else {
                return false;
            };

            if i > 0 && index > 0 && target[index - 1] != subset[i - 1] {
                return false;
            }

            if i + 1 < subset.len() && index + 1 < target.len() && target[index + 1] != subset[i + 1] {
                return false;
            }
        }

        true
    }
}

/// Merge `path` into `paths`. The first registered path related to it either
/// way decides the outcome; later candidates are not examined.
pub fn register_path(paths: &mut Vec<Path>, path: Path) -> PathRegistration {
    // (index, new path is the subset)
    let related = paths.iter().enumerate().find_map(|(idx, existing)| {
        if path.is_subset_of(existing) {
            Some((idx, true))
        } else if existing.is_subset_of(&path) {
            Some((idx, false))
        } else {
            None
        }
    });

    match related {
        Some((idx, true)) => {
            trace!("Path is a subset of path {}, discarding", idx);
            // Same walk seen again: resolution is the OR of both rows
            if path.resolved && paths[idx].nodes == path.nodes {
                paths[idx].resolved = true;
            }
            PathRegistration::Discarded
        }
        Some((idx, false)) => {
            trace!("Path expands path {}, replacing", idx);
            paths[idx] = path;
            PathRegistration::Replaced(idx)
        }
        None => {
            paths.push(path);
            PathRegistration::Appended(paths.len() - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeRef;

    fn path(hops: &[usize]) -> Path {
        let mut path = Path::new(true, false);
        path.hops = hops.iter().map(|&h| NodeRef(h)).collect();
        path.nodes = path.hops.clone();
        path
    }

    #[test]
    fn test_prefix_is_subset() {
        assert!(path(&[1, 2, 3]).is_subset_of(&path(&[1, 2, 3, 4])));
        assert!(!path(&[1, 2, 3, 4]).is_subset_of(&path(&[1, 2, 3])));
    }

    #[test]
    fn test_identical_hops_are_subsets_both_ways() {
        let a = path(&[1, 2, 3]);
        assert!(a.is_subset_of(&a.clone()));
    }

    #[test]
    fn test_empty_hops_are_subset() {
        assert!(path(&[]).is_subset_of(&path(&[1, 2])));
    }

    #[test]
    fn test_direction_mismatch_is_never_subset() {
        let forward = path(&[1, 2]);
        let mut backward = path(&[1, 2]);
        backward.backward = true;
        assert!(!forward.is_subset_of(&backward));
        assert!(!backward.is_subset_of(&forward));
    }

    #[test]
    fn test_reordered_hops_are_not_subset() {
        assert!(!path(&[1, 2, 3]).is_subset_of(&path(&[1, 3, 2])));
        assert!(!path(&[1, 3]).is_subset_of(&path(&[1, 2, 3])));
    }

    #[test]
    fn test_host_mismatch_is_not_subset() {
        let mut a = path(&[1]);
        a.src_host = Some(NodeRef(10));
        let mut b = path(&[1, 2]);
        assert!(!a.is_subset_of(&b));

        b.src_host = Some(NodeRef(11));
        assert!(!a.is_subset_of(&b));

        b.src_host = Some(NodeRef(10));
        assert!(a.is_subset_of(&b));

        // Only the candidate subset's hosts are checked
        assert!(path(&[1]).is_subset_of(&b));
    }

    #[test]
    fn test_dst_host_mismatch_is_not_subset() {
        let mut a = path(&[1]);
        a.dst_host = Some(NodeRef(10));
        let mut b = path(&[1, 2]);
        assert!(!a.is_subset_of(&b));

        b.dst_host = Some(NodeRef(11));
        assert!(!a.is_subset_of(&b));

        b.dst_host = Some(NodeRef(10));
        assert!(a.is_subset_of(&b));
        assert!(path(&[1]).is_subset_of(&b));
    }

    #[test]
    fn test_register_outcomes() {
        let mut paths = Vec::new();
        assert_eq!(register_path(&mut paths, path(&[1, 2])), PathRegistration::Appended(0));
        assert_eq!(register_path(&mut paths, path(&[5, 6])), PathRegistration::Appended(1));
        assert_eq!(register_path(&mut paths, path(&[1])), PathRegistration::Discarded);
        assert_eq!(register_path(&mut paths, path(&[5, 6, 7])), PathRegistration::Replaced(1));
        assert_eq!(register_path(&mut paths, path(&[1, 2])), PathRegistration::Discarded);

        assert_eq!(paths.len(), 2);
        assert_eq!(paths[1].hops, vec![NodeRef(5), NodeRef(6), NodeRef(7)]);
    }

    #[test]
    fn test_repeated_path_ors_resolution() {
        let mut unresolved = path(&[1, 2]);
        unresolved.resolved = false;
        let mut paths = vec![unresolved];

        assert_eq!(register_path(&mut paths, path(&[1, 2])), PathRegistration::Discarded);
        assert!(paths[0].resolved);

        // Same hops between other endpoints is a different walk
        let mut other = path(&[1, 2]);
        other.nodes.insert(0, NodeRef(20));
        let mut paths = vec![other];
        paths[0].resolved = false;
        assert_eq!(register_path(&mut paths, path(&[1, 2])), PathRegistration::Discarded);
        assert!(!paths[0].resolved);

        // A shorter resolved walk does not vouch for the longer one
        let mut longer = path(&[1, 2, 3]);
        longer.resolved = false;
        let mut paths = vec![longer];
        assert_eq!(register_path(&mut paths, path(&[1, 2])), PathRegistration::Discarded);
        assert!(!paths[0].resolved);
    }

    #[test]
    fn test_first_match_wins() {
        let mut paths = vec![path(&[1, 2]), path(&[1, 2, 3])];
        // Expands both registered paths; only the first is replaced
        assert_eq!(register_path(&mut paths, path(&[1, 2, 3, 4])), PathRegistration::Replaced(0));
        assert_eq!(paths[1].hops.len(), 3);
    }
}
