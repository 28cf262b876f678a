use crate::dataset::LoadHandle;
use crate::view::{LoadTicket, Page};

/// The in-flight load of the mounted page
pub struct PendingLoad {
    pub page: Page,
    pub ticket: LoadTicket,
    pub handle: LoadHandle,
}

#[derive(Default)]
pub struct BackgroundTasks {
    pub load: Option<PendingLoad>,
}

impl BackgroundTasks {
    /// Track a new load, cancelling the one it supersedes.
    pub fn replace_load(&mut self, load: PendingLoad) {
        if let Some(previous) = self.load.replace(load) {
            tracing::debug!(page = %previous.page, ticket = ?previous.ticket, "cancelling superseded load");
            previous.handle.cancel();
        }
    }

    /// Hand out the pending load once its task has finished.
    pub fn take_finished(&mut self) -> Option<PendingLoad> {
        match &self.load {
            Some(pending) if pending.handle.is_finished() => self.load.take(),
            _ => None,
        }
    }

    pub fn take_load(&mut self) -> Option<PendingLoad> {
        self.load.take()
    }

    pub async fn abort_all(&mut self) {
        if let Some(pending) = self.load.take() {
            pending.handle.cancel();
            // Let the task observe the cancellation before the handle drops
            let _ = pending.handle.join().await;
        }
    }
}
