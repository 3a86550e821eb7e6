use std::{fs, path::Path, sync::Arc};

use chrono::Datelike;
use folio_config::config::Config;
use folio_core::{
    error::{ErrorContext, FolioError},
    render::render_page,
    selection::Showcase,
    view::{ProjectsView, ViewState},
    FolioResult,
};
use folio_events::{EventSinkHandle, FolioEvent};
use folio_github::{Github, RepoSummary, RepositorySource};
use nu_ansi_term::Color::{Blue, Cyan, LightRed, Yellow};
use tracing::{debug, info, warn};

use crate::{events::create_sink, utils::Colored};

/// Waits for the view to settle, tearing it down if interrupted first.
async fn settle(view: &ProjectsView) -> FolioResult<ViewState> {
    tokio::select! {
        state = view.settled() => state.ok_or(FolioError::Interrupted),
        _ = tokio::signal::ctrl_c() => {
            view.teardown();
            warn!("Interrupted, discarding the pending repository load");
            Err(FolioError::Interrupted)
        }
    }
}

/// Runs the single repository load and derives the showcase.
///
/// The view, and with it the sink handle, is dropped before returning.
async fn load<S>(
    source: S,
    config: &Config,
    events: EventSinkHandle,
) -> FolioResult<(ViewState, Arc<Showcase>)>
where
    S: RepositorySource + 'static,
{
    let view = ProjectsView::mount(
        source,
        config.github_username(),
        config.featured(),
        events,
    );

    let state = settle(&view).await?;
    view.join().await?;
    let showcase = view.showcase();
    Ok((state, showcase))
}

struct Drained {
    state: ViewState,
    showcase: Arc<Showcase>,
    logged: usize,
}

/// Like [`load`], but also waits until every load event has been logged.
async fn load_drained<S>(source: S, config: &Config) -> FolioResult<Drained>
where
    S: RepositorySource + 'static,
{
    let (events, guard) = create_sink();
    let (state, showcase) = load(source, config, events).await?;
    let logged = guard.finish();

    Ok(Drained {
        state,
        showcase,
        logged,
    })
}

pub async fn build_page(config: &Config, output: Option<&str>) -> FolioResult<()> {
    let (events, guard) = create_sink();
    let source = Github::with_api_base(config.api_base());
    let (state, showcase) = load(source, config, events.clone()).await?;

    let year = chrono::Local::now().year();
    let page = render_page(config, &state, &showcase, year);
    events.emit(FolioEvent::PageRendered {
        bytes: page.len(),
    });
    drop(events);
    guard.finish();

    match output {
        Some(path) => {
            let path = Path::new(path);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating directory {}", parent.display()))?;
            }
            fs::write(path, &page)
                .with_context(|| format!("writing page to {}", path.display()))?;
            info!("Page written to {}", Colored(Cyan, path.display()));
        }
        None => print!("{page}"),
    }

    Ok(())
}

fn print_repo(idx: usize, repo: &RepoSummary) {
    let language = repo
        .language
        .as_deref()
        .map(|l| format!(" [{}]", Colored(Yellow, l)))
        .unwrap_or_default();

    info!(
        "[{}] {} | ★ {} | forks {}{}",
        idx + 1,
        Colored(Blue, &repo.name),
        Colored(LightRed, repo.popularity),
        repo.forks,
        language
    );
}

pub async fn list_repos(config: &Config, json: bool) -> FolioResult<()> {
    let source = Github::with_api_base(config.api_base());
    let Drained {
        state,
        showcase,
        logged,
    } = load_drained(source, config).await?;
    debug!("{logged} load events logged");

    if let Some(error) = state.error {
        return Err(FolioError::Custom(error));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&*showcase)?);
        return Ok(());
    }

    info!("Featured:");
    if showcase.featured.is_empty() {
        info!("  none of the configured featured repositories were found");
    }
    for (idx, repo) in showcase.featured.iter().enumerate() {
        print_repo(idx, repo);
    }

    info!("Top repositories:");
    for (idx, repo) in showcase.top.iter().enumerate() {
        print_repo(idx, repo);
    }
    if showcase.top.is_empty() {
        info!("  No repositories found. Make sure your GitHub username is correct.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use folio_github::FetchError;

    use super::*;

    struct FailingSource;

    impl RepositorySource for FailingSource {
        fn fetch_repositories(&self, account: &str) -> Result<Vec<RepoSummary>, FetchError> {
            Err(FetchError::HttpError {
                status: 503,
                url: format!("https://api.github.com/users/{account}/repos"),
            })
        }
    }

    struct StaticSource;

    impl RepositorySource for StaticSource {
        fn fetch_repositories(&self, account: &str) -> Result<Vec<RepoSummary>, FetchError> {
            Ok(vec![RepoSummary {
                id: 1,
                name: "streamlit-iris-app-aiml".to_string(),
                description: None,
                url: format!("https://github.com/{account}/streamlit-iris-app-aiml"),
                popularity: 2,
                forks: 0,
                language: Some("Python".to_string()),
                updated: None,
            }])
        }
    }

    #[tokio::test]
    async fn test_failed_load_is_logged_before_returning() {
        let drained = load_drained(FailingSource, &Config::default_config())
            .await
            .unwrap();

        assert_eq!(
            drained.state.error.as_deref(),
            Some("GitHub API error: 503")
        );
        // started + failed
        assert_eq!(drained.logged, 2);
    }

    #[tokio::test]
    async fn test_successful_load_logs_showcase() {
        let drained = load_drained(StaticSource, &Config::default_config())
            .await
            .unwrap();

        assert!(drained.state.error.is_none());
        assert_eq!(drained.showcase.featured.len(), 1);
        assert!(drained.showcase.top.is_empty());
        // started + succeeded + showcase derived
        assert_eq!(drained.logged, 3);
    }
}
