/*
[INPUT]:  Task, user, and sector listings fetched through the API client
[OUTPUT]: AppState refresh helpers with clamped selection
[POS]:    TUI state refresh logic
[UPDATE]: When adding listings or changing refresh behavior
*/

use std::time::Instant;

use tracing::debug;

use myattire_adapter::Result as ApiResult;

use super::app::AppState;

impl AppState {
    pub(super) async fn refresh_all(&mut self) -> ApiResult<()> {
        self.refresh_tasks().await?;
        if self.is_admin() {
            self.refresh_users().await?;
            self.refresh_sectors().await?;
        }
        Ok(())
    }

    pub(super) async fn refresh_tasks(&mut self) -> ApiResult<()> {
        self.tasks = self.client.list_tasks().await?;
        // A staged optimistic change must survive a concurrent refresh until
        // the PUT settles, otherwise the listing would paint the old status.
        if let Some(pending) = &self.pending_status {
            let (id, applied) = (pending.task_id, pending.applied);
            self.apply_local_status(id, applied);
        }
        self.last_refresh = Instant::now();
        self.clamp_selection();
        debug!(count = self.tasks.len(), "task listing refreshed");
        Ok(())
    }

    pub(super) async fn refresh_users(&mut self) -> ApiResult<()> {
        self.users = self.client.list_users().await?;
        self.clamp_selection();
        Ok(())
    }

    pub(super) async fn refresh_sectors(&mut self) -> ApiResult<()> {
        self.sectors = self.client.list_sectors().await?;
        self.clamp_selection();
        Ok(())
    }
}
