use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;
use rusqlite::Connection;

use crate::errors::AppError;
use crate::services::notification::NotificationSender;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    /// `None` when no outbound channel is configured.
    pub notifier: Option<Arc<dyn NotificationSender>>,
}

impl AppState {
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.db
            .lock()
            .map_err(|_| AppError::Persistence(anyhow!("database connection lock poisoned")))
    }
}
