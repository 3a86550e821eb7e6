use std::{
    sync::{mpsc::Receiver, Arc},
    thread::JoinHandle,
};

use folio_events::{ChannelSink, EventSinkHandle, FolioEvent};
use nu_ansi_term::Color::{Cyan, Green, Red};
use tracing::{debug, info, warn};

use crate::utils::Colored;

/// Handle to the event logging thread.
///
/// Call [`finish`](EventLogGuard::finish) after every clone of the sink has
/// been dropped, otherwise it blocks waiting for more events.
pub struct EventLogGuard {
    handle: Option<JoinHandle<usize>>,
}

impl EventLogGuard {
    /// Waits for the logger to drain and returns how many events it logged.
    pub fn finish(mut self) -> usize {
        self.handle
            .take()
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default()
    }
}

pub fn create_sink() -> (EventSinkHandle, EventLogGuard) {
    let (sink, receiver) = ChannelSink::new();
    let guard = spawn_event_logger(receiver);
    (Arc::new(sink), guard)
}

fn spawn_event_logger(receiver: Receiver<FolioEvent>) -> EventLogGuard {
    let handle = std::thread::spawn(move || {
        let mut logged = 0;
        while let Ok(event) = receiver.recv() {
            log_event(&event);
            logged += 1;
        }
        logged
    });

    EventLogGuard {
        handle: Some(handle),
    }
}

fn log_event(event: &FolioEvent) {
    match event {
        FolioEvent::LoadStarted {
            account,
        } => info!("Fetching repositories for {}", Colored(Cyan, account)),
        FolioEvent::LoadSucceeded {
            account,
            count,
        } => {
            info!(
                "Loaded {} repositories for {}",
                Colored(Green, count),
                Colored(Cyan, account)
            )
        }
        FolioEvent::LoadFailed {
            account,
            error,
        } => {
            warn!(
                "Could not load repositories for {}: {}",
                Colored(Cyan, account),
                Colored(Red, error)
            )
        }
        FolioEvent::LoadDiscarded {
            account,
        } => debug!("Dropped late repository result for {account}"),
        FolioEvent::ShowcaseDerived {
            featured,
            top,
        } => debug!("Derived {featured} featured and {top} top repositories"),
        FolioEvent::PageRendered {
            bytes,
        } => debug!("Rendered page ({bytes} bytes)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_drains_every_event() {
        let (events, guard) = create_sink();
        events.emit(FolioEvent::LoadFailed {
            account: "someone".to_string(),
            error: "GitHub API error: 500".to_string(),
        });
        events.emit(FolioEvent::PageRendered {
            bytes: 10,
        });
        drop(events);
        assert_eq!(guard.finish(), 2);
    }
}
