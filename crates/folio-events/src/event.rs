/// All event types emitted while building a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolioEvent {
    /// The repository load for `account` has been issued.
    LoadStarted { account: String },
    /// The load settled with `count` repositories.
    LoadSucceeded { account: String, count: usize },
    /// The load settled with an error.
    LoadFailed { account: String, error: String },
    /// The load settled after the view was torn down; its result was dropped.
    LoadDiscarded { account: String },
    /// Featured and top selections were derived.
    ShowcaseDerived { featured: usize, top: usize },
    /// The page document was rendered.
    PageRendered { bytes: usize },
}
