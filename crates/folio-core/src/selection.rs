//! Featured and top repository selection.

use std::{
    cmp::Reverse,
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use folio_github::RepoSummary;
use serde::Serialize;
use tracing::trace;

/// Number of repositories kept in the top selection.
pub const TOP_LIMIT: usize = 9;

/// The two repository grids shown on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Showcase {
    /// Repositories named in the featured allow-list, in allow-list order.
    pub featured: Vec<RepoSummary>,
    /// Everything else, most starred first, at most [`TOP_LIMIT`] entries.
    pub top: Vec<RepoSummary>,
}

/// Partitions `repos` into the featured and top selections.
///
/// Featured names that are not present in `repos` are skipped. The top
/// selection excludes every featured name, is sorted by descending
/// popularity and keeps input order among equal counts.
///
/// # Examples
///
/// ```
/// use folio_core::selection::derive;
/// use folio_github::RepoSummary;
///
/// let repo = |name: &str, popularity| RepoSummary {
///     id: 0,
///     name: name.into(),
///     description: None,
///     url: String::new(),
///     popularity,
///     forks: 0,
///     language: None,
///     updated: None,
/// };
///
/// let repos = vec![repo("alpha", 3), repo("beta", 10), repo("gamma", 1)];
/// let showcase = derive(&repos, &["alpha", "gamma"]);
///
/// let featured: Vec<_> = showcase.featured.iter().map(|r| r.name.as_str()).collect();
/// let top: Vec<_> = showcase.top.iter().map(|r| r.name.as_str()).collect();
/// assert_eq!(featured, ["alpha", "gamma"]);
/// assert_eq!(top, ["beta"]);
/// ```
pub fn derive<S: AsRef<str>>(repos: &[RepoSummary], featured_names: &[S]) -> Showcase {
    let by_name: HashMap<&str, &RepoSummary> =
        repos.iter().map(|repo| (repo.name.as_str(), repo)).collect();

    let featured = featured_names
        .iter()
        .filter_map(|name| by_name.get(name.as_ref()).map(|repo| (*repo).clone()))
        .collect();

    let excluded: HashSet<&str> = featured_names.iter().map(AsRef::as_ref).collect();
    let mut remaining: Vec<&RepoSummary> = repos
        .iter()
        .filter(|repo| !excluded.contains(repo.name.as_str()))
        .collect();

    // stable, so equal counts keep first-seen order
    remaining.sort_by_key(|repo| Reverse(repo.popularity));
    remaining.truncate(TOP_LIMIT);

    Showcase {
        featured,
        top: remaining.into_iter().cloned().collect(),
    }
}

/// Memoizes [`derive`] against a generation counter.
///
/// The showcase is recomputed only when asked for a generation other than
/// the one it was last computed for.
pub struct ShowcaseCache {
    featured_names: Vec<String>,
    cached: Mutex<Option<(u64, Arc<Showcase>)>>,
}

impl ShowcaseCache {
    pub fn new(featured_names: Vec<String>) -> Self {
        Self {
            featured_names,
            cached: Mutex::new(None),
        }
    }

    pub fn cached_generation(&self) -> Option<u64> {
        self.cached.lock().unwrap().as_ref().map(|(generation, _)| *generation)
    }

    pub fn get(&self, generation: u64, repos: &[RepoSummary]) -> Arc<Showcase> {
        let mut cached = self.cached.lock().unwrap();
        if let Some((cached_generation, showcase)) = cached.as_ref() {
            if *cached_generation == generation {
                return showcase.clone();
            }
        }

        trace!(generation, "deriving showcase");
        let showcase = Arc::new(derive(repos, &self.featured_names));
        *cached = Some((generation, showcase.clone()));
        showcase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, popularity: u64) -> RepoSummary {
        RepoSummary {
            id: 0,
            name: name.to_string(),
            description: None,
            url: format!("https://github.com/someone/{name}"),
            popularity,
            forks: 0,
            language: None,
            updated: None,
        }
    }

    fn names(repos: &[RepoSummary]) -> Vec<&str> {
        repos.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_empty_list_gives_empty_selections() {
        let showcase = derive(&[], &["alpha"]);
        assert!(showcase.featured.is_empty());
        assert!(showcase.top.is_empty());
    }

    #[test]
    fn test_no_featured_match_sorts_everything() {
        let repos = vec![repo("a", 1), repo("b", 5), repo("c", 3)];
        let showcase = derive(&repos, &["zeta"]);

        assert!(showcase.featured.is_empty());
        assert_eq!(names(&showcase.top), ["b", "c", "a"]);
    }

    #[test]
    fn test_featured_in_allow_list_order() {
        let repos = vec![repo("alpha", 3), repo("beta", 10), repo("gamma", 1)];
        let showcase = derive(&repos, &["alpha", "gamma"]);

        assert_eq!(names(&showcase.featured), ["alpha", "gamma"]);
        assert_eq!(names(&showcase.top), ["beta"]);
    }

    #[test]
    fn test_featured_order_follows_allow_list_not_input() {
        let repos = vec![repo("alpha", 3), repo("beta", 10), repo("gamma", 1)];
        let showcase = derive(&repos, &["gamma", "missing", "alpha"]);

        assert_eq!(names(&showcase.featured), ["gamma", "alpha"]);
    }

    #[test]
    fn test_top_truncated_to_nine_most_popular() {
        let repos: Vec<_> = (0..15).map(|i| repo(&format!("r{i}"), i)).collect();
        let showcase = derive::<&str>(&repos, &[]);

        assert_eq!(showcase.top.len(), TOP_LIMIT);
        assert_eq!(
            names(&showcase.top),
            ["r14", "r13", "r12", "r11", "r10", "r9", "r8", "r7", "r6"]
        );
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut repos: Vec<_> = (0..12).map(|i| repo(&format!("t{i}"), 5)).collect();
        repos.insert(4, repo("star", 50));
        let showcase = derive::<&str>(&repos, &[]);

        assert_eq!(
            names(&showcase.top),
            ["star", "t0", "t1", "t2", "t3", "t4", "t5", "t6", "t7"]
        );
    }

    #[test]
    fn test_featured_excluded_from_top_even_when_popular() {
        let repos: Vec<_> = (0..12).map(|i| repo(&format!("r{i}"), i)).collect();
        let showcase = derive(&repos, &["r11", "r10"]);

        assert_eq!(names(&showcase.featured), ["r11", "r10"]);
        assert_eq!(showcase.top.len(), TOP_LIMIT);
        assert_eq!(showcase.top[0].name, "r9");
        assert!(!names(&showcase.top).contains(&"r11"));
    }

    #[test]
    fn test_cache_reuses_same_generation() {
        let cache = ShowcaseCache::new(vec!["alpha".to_string()]);
        let repos = vec![repo("alpha", 1), repo("beta", 2)];

        let first = cache.get(1, &repos);
        let second = cache.get(1, &[]);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(names(&second.featured), ["alpha"]);
    }

    #[test]
    fn test_cache_recomputes_on_new_generation() {
        let cache = ShowcaseCache::new(vec!["alpha".to_string()]);

        let before = cache.get(0, &[]);
        let after = cache.get(1, &[repo("alpha", 1), repo("beta", 2)]);

        assert!(before.featured.is_empty());
        assert_eq!(names(&after.featured), ["alpha"]);
        assert_eq!(names(&after.top), ["beta"]);
    }
}
