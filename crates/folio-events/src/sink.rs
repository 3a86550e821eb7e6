use std::sync::{
    mpsc::{self, Receiver, Sender},
    Mutex,
};

use crate::FolioEvent;

/// Receives the lifecycle events of a page build.
///
/// Emitting never fails. A sink whose consumer has gone away drops events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: FolioEvent);
}

/// Forwards events to a consumer thread, such as the CLI's event logger.
///
/// The receiver sees end-of-stream once every clone of the sink handle is
/// dropped.
pub struct ChannelSink {
    sender: Sender<FolioEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, Receiver<FolioEvent>) {
        let (sender, receiver) = mpsc::channel();
        (
            Self {
                sender,
            },
            receiver,
        )
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: FolioEvent) {
        let _ = self.sender.send(event);
    }
}

/// Discards every event.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: FolioEvent) {}
}

/// Records events in emission order so a build can be inspected afterwards.
#[derive(Default)]
pub struct CollectorSink {
    events: Mutex<Vec<FolioEvent>>,
}

impl CollectorSink {
    pub fn events(&self) -> Vec<FolioEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn contains(&self, event: &FolioEvent) -> bool {
        self.events.lock().unwrap().contains(event)
    }

    /// Number of recorded events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&FolioEvent) -> bool) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| predicate(event))
            .count()
    }
}

impl EventSink for CollectorSink {
    fn emit(&self, event: FolioEvent) {
        self.events.lock().unwrap().push(event);
    }
}
