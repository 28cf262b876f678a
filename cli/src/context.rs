use std::sync::Arc;

use casualty_core::context::{BackgroundTasks, DashboardConfig, DashboardConfigExt, PendingLoad};
use casualty_core::dataset::spawn_load;
use casualty_core::view::{LoadTicket, Page, PageView};
use tokio::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Holds all shared state for the CLI application.
/// This is a lightweight container - logic lives in the individual state types.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<DashboardConfig>>,
    /// The mounted page. None until `open` is run or after `close`.
    view: Arc<RwLock<Option<PageView>>>,
    pub tasks: Arc<Mutex<BackgroundTasks>>,
}

impl CliContext {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            view: Arc::new(RwLock::new(None)),
            tasks: Arc::new(Mutex::new(BackgroundTasks::default())),
        }
    }

    /// Mount `page` and start fetching its dataset. Unmounts the previous
    /// page and cancels its load if still in flight.
    pub async fn mount(&self, page: Page) -> LoadTicket {
        let config = self.config.read().await.clone();
        let kind = page.dataset_kind();
        let source = config.source_for(kind);

        let mut view = PageView::new(page, &config);
        let ticket = view.begin_load();
        *self.view.write().await = Some(view);

        tracing::info!(%page, source = %source, "mounting page");
        self.tasks.lock().await.replace_load(PendingLoad {
            page,
            ticket,
            handle: spawn_load(source, kind),
        });
        ticket
    }

    /// Deliver the pending load if it has finished. Returns true when a
    /// result was delivered.
    pub async fn settle_load(&self) -> bool {
        let finished = self.tasks.lock().await.take_finished();
        match finished {
            Some(pending) => {
                self.deliver(pending).await;
                true
            }
            None => false,
        }
    }

    /// Wait for the pending load, if any, and deliver it.
    pub async fn wait_for_load(&self) -> bool {
        let pending = self.tasks.lock().await.take_load();
        match pending {
            Some(pending) => {
                self.deliver(pending).await;
                true
            }
            None => false,
        }
    }

    async fn deliver(&self, pending: PendingLoad) {
        let result = pending.handle.join().await;
        let mut guard = self.view.write().await;
        match guard.as_mut() {
            Some(view) if view.page() == pending.page => {
                view.complete(pending.ticket, result);
            }
            _ => tracing::debug!(page = %pending.page, "discarding load for unmounted page"),
        }
    }

    /// Get the mounted page view, if one exists.
    pub async fn view(&self) -> RwLockReadGuard<'_, Option<PageView>> {
        self.view.read().await
    }

    pub async fn view_mut(&self) -> RwLockWriteGuard<'_, Option<PageView>> {
        self.view.write().await
    }

    /// Unmount the page and cancel its load.
    pub async fn close(&self) {
        self.tasks.lock().await.abort_all().await;
        *self.view.write().await = None;
    }
}
