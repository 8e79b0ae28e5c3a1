use crate::utils::cmp_case_insensitive;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Every file the user has ticked, across all directories visited this session.
///
/// Membership is keyed by the exact absolute path and does not depend on which
/// directory is on screen.
#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    paths: HashSet<PathBuf>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `path` when `checked`, otherwise removes it. Removing an absent path is fine.
    pub fn toggle(&mut self, path: &Path, checked: bool) {
        if checked {
            self.paths.insert(path.to_path_buf());
        } else {
            self.paths.remove(path);
        }
    }

    pub fn select_all<'a, I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = &'a Path>,
    {
        self.paths
            .extend(paths.into_iter().map(Path::to_path_buf));
    }

    pub fn deselect_all<'a, I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = &'a Path>,
    {
        for path in paths {
            self.paths.remove(path);
        }
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn is_selected(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn count(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// All selected paths, sorted case-insensitively by the full path string.
    pub fn snapshot(&self) -> Vec<PathBuf> {
        let mut sorted: Vec<PathBuf> = self.paths.iter().cloned().collect();
        sorted.sort_by(|a, b| cmp_case_insensitive(&a.to_string_lossy(), &b.to_string_lossy()));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> &Path {
        Path::new(s)
    }

    #[test]
    fn last_toggle_wins() {
        let mut set = SelectionSet::new();
        set.toggle(p("/a/x.py"), true);
        set.toggle(p("/a/x.py"), true);
        assert_eq!(set.count(), 1);
        set.toggle(p("/a/x.py"), false);
        assert!(!set.is_selected(p("/a/x.py")));
        set.toggle(p("/a/x.py"), false);
        assert!(set.is_empty());
        set.toggle(p("/a/x.py"), true);
        assert!(set.is_selected(p("/a/x.py")));
    }

    #[test]
    fn bulk_operations_only_touch_given_paths() {
        let mut set = SelectionSet::new();
        set.toggle(p("/a/x.py"), true);

        let displayed = [p("/b/y.py"), p("/b/z.py")];
        set.select_all(displayed);
        assert_eq!(set.snapshot(), vec![
            PathBuf::from("/a/x.py"),
            PathBuf::from("/b/y.py"),
            PathBuf::from("/b/z.py"),
        ]);

        set.deselect_all(displayed);
        assert_eq!(set.snapshot(), vec![PathBuf::from("/a/x.py")]);
    }

    #[test]
    fn deselect_displayed_leaves_other_directories_alone() {
        let mut set = SelectionSet::new();
        set.toggle(p("/b/y.py"), true);
        set.toggle(p("/c/w.py"), true);

        let displayed = [p("/b/y.py"), p("/b/z.py")];
        set.select_all(displayed);
        set.deselect_all(displayed);

        // Deselect covers every displayed file, including ones ticked earlier.
        assert_eq!(set.snapshot(), vec![PathBuf::from("/c/w.py")]);
    }

    #[test]
    fn snapshot_is_case_insensitive() {
        let mut set = SelectionSet::new();
        for path in ["/src/b.rs", "/Src/a.rs", "/SRC/c.rs", "/docs/Z.md"] {
            set.toggle(p(path), true);
        }
        assert_eq!(set.snapshot(), vec![
            PathBuf::from("/docs/Z.md"),
            PathBuf::from("/Src/a.rs"),
            PathBuf::from("/src/b.rs"),
            PathBuf::from("/SRC/c.rs"),
        ]);
    }

    #[test]
    fn clear_empties_everything() {
        let mut set = SelectionSet::new();
        set.select_all([p("/a"), p("/b")]);
        set.clear();
        assert_eq!(set.count(), 0);
        assert!(set.snapshot().is_empty());
    }
}
