//! Ancestor enumeration, split points, and transfer frontiers
//!
//! All algorithms run over a commit-loader function instead of a concrete
//! store, so they work against the local repository, a filesystem peer, or
//! an in-memory graph in tests.
//!
//! - `ancestors`: transitive closure including the tip, following both
//!   parents of merge commits
//! - `split_point`: lowest common ancestor used as the merge base; when a
//!   criss-cross history has several candidates, the first one reached in
//!   breadth-first order from the second commit wins
//! - `frontier`: the commits that must be copied when advancing a ref,
//!   found by a depth-first walk pruned at the receiving side's head
//! - `history_reaches`: the push safety scan. It inspects the parents of
//!   each popped commit rather than the commit itself, so it does not
//!   detect the degenerate case where the target equals the starting head
//!   (preserved behavior).

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};

/// Parent links of one commit, the only data the walks need
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    pub id: ObjectId,
    pub parents: Vec<ObjectId>,
}

impl From<&Commit> for SlimCommit {
    fn from(commit: &Commit) -> Self {
        SlimCommit {
            id: commit.object_id().clone(),
            parents: commit
                .parent()
                .into_iter()
                .chain(commit.second_parent())
                .cloned()
                .collect(),
        }
    }
}

/// Commit graph walker over a commit-loader function
pub struct DagWalker<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    load: CommitLoaderFn,
}

impl<CommitLoaderFn> DagWalker<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(load: CommitLoaderFn) -> Self {
        Self { load }
    }

    /// All commits reachable from `tip`, including `tip` itself
    pub fn ancestors(&self, tip: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut visited = HashSet::new();
        let mut stack = vec![tip.clone()];

        while let Some(oid) = stack.pop() {
            if !visited.insert(oid.clone()) {
                continue;
            }

            stack.extend((self.load)(&oid)?.parents);
        }

        Ok(visited)
    }

    /// Whether `ancestor` is reachable from `tip` (a commit is its own
    /// ancestor)
    pub fn is_ancestor(&self, ancestor: &ObjectId, tip: &ObjectId) -> anyhow::Result<bool> {
        Ok(self.ancestors(tip)?.contains(ancestor))
    }

    /// Lowest common ancestor of two commits
    ///
    /// Collects the full ancestor set of `first`, then walks breadth-first
    /// from `second` and returns the first commit found in that set.
    pub fn split_point(
        &self,
        first: &ObjectId,
        second: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let first_ancestors = self.ancestors(first)?;

        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([second.clone()]);

        while let Some(oid) = queue.pop_front() {
            if !visited.insert(oid.clone()) {
                continue;
            }

            if first_ancestors.contains(&oid) {
                return Ok(Some(oid));
            }

            queue.extend((self.load)(&oid)?.parents);
        }

        Ok(None)
    }

    /// Commits to copy when advancing a ref from `from` to `to`
    ///
    /// Depth-first from `to`, pruning at `from` and at already-visited
    /// commits. The `from` commit itself is never part of the frontier.
    pub fn frontier(&self, from: &ObjectId, to: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut frontier = HashSet::new();
        let mut visited = HashSet::new();
        let mut stack = vec![to.clone()];

        while let Some(oid) = stack.pop() {
            if !visited.insert(oid.clone()) {
                continue;
            }

            if &oid == from {
                continue;
            }
            frontier.insert(oid.clone());

            stack.extend((self.load)(&oid)?.parents);
        }

        Ok(frontier)
    }

    /// Whether `target` appears in the parent links of `head`'s history
    ///
    /// Tests the parents of each popped commit, never the popped commit
    /// itself, so `history_reaches(x, x)` is false for any head without a
    /// self-referential history.
    pub fn history_reaches(&self, head: &ObjectId, target: &ObjectId) -> anyhow::Result<bool> {
        let mut visited = HashSet::new();
        let mut stack = vec![head.clone()];

        while let Some(oid) = stack.pop() {
            if !visited.insert(oid.clone()) {
                continue;
            }

            for parent in (self.load)(&oid)?.parents {
                if &parent == target {
                    return Ok(true);
                }
                stack.push(parent);
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use std::collections::HashMap;

    /// In-memory commit store for testing
    #[derive(Debug, Clone, Default)]
    struct InMemoryCommitStore {
        commits: HashMap<ObjectId, Vec<ObjectId>>,
    }

    impl InMemoryCommitStore {
        fn add_commit(&mut self, id: ObjectId, parents: Vec<ObjectId>) {
            self.commits.insert(id, parents);
        }

        fn slim_commit(&self, id: &ObjectId) -> anyhow::Result<SlimCommit> {
            let parents = self
                .commits
                .get(id)
                .ok_or_else(|| anyhow::anyhow!("commit {} not in test store", id))?;

            Ok(SlimCommit {
                id: id.clone(),
                parents: parents.clone(),
            })
        }

        fn walker(&'_ self) -> DagWalker<impl Fn(&ObjectId) -> anyhow::Result<SlimCommit> + '_> {
            DagWalker::new(move |oid| self.slim_commit(oid))
        }
    }

    fn create_oid(id: &str) -> ObjectId {
        let mut hex = id
            .as_bytes()
            .iter()
            .map(|byte| format!("{:02x}", byte))
            .collect::<String>();
        while hex.len() < 40 {
            hex.push('0');
        }
        hex.truncate(40);

        ObjectId::try_parse(hex).expect("invalid test object id")
    }

    #[fixture]
    fn linear_history() -> InMemoryCommitStore {
        // A <- B <- C <- D
        let mut store = InMemoryCommitStore::default();
        let (a, b, c, d) = (
            create_oid("a"),
            create_oid("b"),
            create_oid("c"),
            create_oid("d"),
        );

        store.add_commit(a.clone(), vec![]);
        store.add_commit(b.clone(), vec![a]);
        store.add_commit(c.clone(), vec![b]);
        store.add_commit(d, vec![c]);

        store
    }

    #[fixture]
    fn simple_divergence() -> InMemoryCommitStore {
        //     A
        //    / \
        //   B   C
        let mut store = InMemoryCommitStore::default();
        let (a, b, c) = (create_oid("a"), create_oid("b"), create_oid("c"));

        store.add_commit(a.clone(), vec![]);
        store.add_commit(b, vec![a.clone()]);
        store.add_commit(c, vec![a]);

        store
    }

    #[fixture]
    fn merged_history() -> InMemoryCommitStore {
        //     A
        //    / \
        //   B   C
        //    \ /
        //     D (merge, parents B then C)
        //     |
        //     E
        let mut store = InMemoryCommitStore::default();
        let (a, b, c, d, e) = (
            create_oid("a"),
            create_oid("b"),
            create_oid("c"),
            create_oid("d"),
            create_oid("e"),
        );

        store.add_commit(a.clone(), vec![]);
        store.add_commit(b.clone(), vec![a.clone()]);
        store.add_commit(c.clone(), vec![a]);
        store.add_commit(d.clone(), vec![b, c]);
        store.add_commit(e, vec![d]);

        store
    }

    #[rstest]
    fn test_ancestors_include_tip_and_root(linear_history: InMemoryCommitStore) {
        let walker = linear_history.walker();

        let ancestors = walker.ancestors(&create_oid("c")).unwrap();

        assert_eq!(
            ancestors,
            HashSet::from([create_oid("a"), create_oid("b"), create_oid("c")])
        );
    }

    #[rstest]
    fn test_ancestors_follow_both_parents(merged_history: InMemoryCommitStore) {
        let walker = merged_history.walker();

        let ancestors = walker.ancestors(&create_oid("e")).unwrap();

        assert_eq!(ancestors.len(), 5);
        assert!(ancestors.contains(&create_oid("b")));
        assert!(ancestors.contains(&create_oid("c")));
    }

    #[rstest]
    fn test_split_point_of_same_commit_is_itself(linear_history: InMemoryCommitStore) {
        let walker = linear_history.walker();

        let split = walker.split_point(&create_oid("c"), &create_oid("c")).unwrap();

        assert_eq!(split, Some(create_oid("c")));
    }

    #[rstest]
    fn test_split_point_of_linear_history_is_the_older_commit(
        linear_history: InMemoryCommitStore,
    ) {
        let walker = linear_history.walker();

        let split = walker.split_point(&create_oid("b"), &create_oid("d")).unwrap();
        assert_eq!(split, Some(create_oid("b")));

        let split = walker.split_point(&create_oid("d"), &create_oid("b")).unwrap();
        assert_eq!(split, Some(create_oid("b")));
    }

    #[rstest]
    fn test_split_point_of_divergent_branches_is_the_fork(
        simple_divergence: InMemoryCommitStore,
    ) {
        let walker = simple_divergence.walker();

        let split = walker.split_point(&create_oid("b"), &create_oid("c")).unwrap();

        assert_eq!(split, Some(create_oid("a")));
    }

    #[rstest]
    fn test_split_point_of_disconnected_roots_is_absent() {
        let mut store = InMemoryCommitStore::default();
        store.add_commit(create_oid("a"), vec![]);
        store.add_commit(create_oid("x"), vec![]);
        let walker = store.walker();

        let split = walker.split_point(&create_oid("a"), &create_oid("x")).unwrap();

        assert_eq!(split, None);
    }

    #[rstest]
    fn test_criss_cross_split_point_is_first_bfs_hit() {
        //     A
        //    / \
        //   B   C
        //   |\ /|
        //   | X |
        //   |/ \|
        //   D   E    D = merge(B, C), E = merge(C, B)
        //   |   |
        //   F   G
        let mut store = InMemoryCommitStore::default();
        let (a, b, c, d, e, f, g) = (
            create_oid("a"),
            create_oid("b"),
            create_oid("c"),
            create_oid("d"),
            create_oid("e"),
            create_oid("f"),
            create_oid("g"),
        );

        store.add_commit(a.clone(), vec![]);
        store.add_commit(b.clone(), vec![a.clone()]);
        store.add_commit(c.clone(), vec![a]);
        store.add_commit(d.clone(), vec![b.clone(), c.clone()]);
        store.add_commit(e.clone(), vec![c.clone(), b.clone()]);
        store.add_commit(f.clone(), vec![d]);
        store.add_commit(g.clone(), vec![e]);

        let walker = store.walker();
        let split = walker.split_point(&f, &g).unwrap().unwrap();

        // Both B and C are common ancestors one hop below E; the BFS from G
        // reaches C (E's first parent) before B.
        assert_eq!(split, c);
    }

    #[rstest]
    fn test_is_ancestor_implies_split_point(linear_history: InMemoryCommitStore) {
        let walker = linear_history.walker();
        let (b, d) = (create_oid("b"), create_oid("d"));

        assert!(walker.is_ancestor(&b, &d).unwrap());
        assert_eq!(walker.split_point(&b, &d).unwrap(), Some(b.clone()));
        assert!(!walker.is_ancestor(&d, &b).unwrap());
    }

    #[rstest]
    fn test_frontier_of_identical_endpoints_is_empty(linear_history: InMemoryCommitStore) {
        let walker = linear_history.walker();

        let frontier = walker.frontier(&create_oid("c"), &create_oid("c")).unwrap();

        assert!(frontier.is_empty());
    }

    #[rstest]
    fn test_frontier_excludes_the_receiving_head(linear_history: InMemoryCommitStore) {
        let walker = linear_history.walker();

        let frontier = walker.frontier(&create_oid("b"), &create_oid("d")).unwrap();

        assert_eq!(
            frontier,
            HashSet::from([create_oid("c"), create_oid("d")])
        );
    }

    #[rstest]
    fn test_frontier_from_unreachable_commit_covers_all_ancestors(
        simple_divergence: InMemoryCommitStore,
    ) {
        let walker = simple_divergence.walker();

        // c is not an ancestor of b, so nothing is pruned except c itself
        let frontier = walker.frontier(&create_oid("c"), &create_oid("b")).unwrap();

        assert_eq!(
            frontier,
            HashSet::from([create_oid("a"), create_oid("b")])
        );
    }

    #[rstest]
    fn test_frontier_crosses_merge_parents(merged_history: InMemoryCommitStore) {
        let walker = merged_history.walker();

        let frontier = walker.frontier(&create_oid("b"), &create_oid("e")).unwrap();

        assert_eq!(
            frontier,
            HashSet::from([
                create_oid("a"),
                create_oid("c"),
                create_oid("d"),
                create_oid("e")
            ])
        );
    }

    #[rstest]
    fn test_history_reaches_finds_proper_ancestors(linear_history: InMemoryCommitStore) {
        let walker = linear_history.walker();

        assert!(walker
            .history_reaches(&create_oid("d"), &create_oid("a"))
            .unwrap());
        assert!(!walker
            .history_reaches(&create_oid("b"), &create_oid("d"))
            .unwrap());
    }

    #[rstest]
    fn test_history_reaches_misses_the_head_itself(linear_history: InMemoryCommitStore) {
        let walker = linear_history.walker();

        // The scan inspects parents only, so the head is never matched.
        assert!(!walker
            .history_reaches(&create_oid("d"), &create_oid("d"))
            .unwrap());
    }

    #[rstest]
    fn test_history_reaches_follows_second_parents(merged_history: InMemoryCommitStore) {
        let walker = merged_history.walker();

        assert!(walker
            .history_reaches(&create_oid("e"), &create_oid("c"))
            .unwrap());
    }
}
