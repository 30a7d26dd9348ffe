/// Focus reminder switch backed by a preference store
///
/// The switch decides whether the night reminder collaborator may notify at
/// all. It defaults to enabled until the user turns it off.

use std::sync::Arc;
use async_trait::async_trait;
use futures::StreamExt;
use tokio_stream::wrappers::WatchStream;

use crate::repository::{FocusReminderStore, FocusReminderStream};
use crate::storage::{PreferenceStore, StorageError, FOCUS_REMINDER_ENABLED_KEY};

/// Value of the switch when the key was never written
pub const FOCUS_REMINDER_DEFAULT: bool = true;

fn read_enabled<S: PreferenceStore + ?Sized>(store: &S) -> Result<bool, StorageError> {
    Ok(store
        .get_bool(FOCUS_REMINDER_ENABLED_KEY)?
        .unwrap_or(FOCUS_REMINDER_DEFAULT))
}

/// [`FocusReminderStore`] over any [`PreferenceStore`]
pub struct PreferencesFocusReminder<S> {
    store: Arc<S>,
}

impl<S: PreferenceStore + 'static> PreferencesFocusReminder<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: PreferenceStore + 'static> FocusReminderStore for PreferencesFocusReminder<S> {
    fn observe_focus_reminder_enabled(&self) -> FocusReminderStream {
        let store = Arc::clone(&self.store);
        WatchStream::new(self.store.subscribe())
            .then(move |_generation| {
                let store = Arc::clone(&store);
                async move {
                    let enabled = tokio::task::spawn_blocking(move || read_enabled(store.as_ref())).await??;
                    Ok::<_, StorageError>(enabled)
                }
            })
            .boxed()
    }

    async fn is_focus_reminder_enabled(&self) -> Result<bool, StorageError> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || read_enabled(store.as_ref())).await?
    }

    async fn set_focus_reminder_enabled(&self, enabled: bool) -> Result<(), StorageError> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.set_bool(FOCUS_REMINDER_ENABLED_KEY, enabled)).await??;

        tracing::debug!("Focus reminder {}", if enabled { "enabled" } else { "disabled" });
        Ok(())
    }
}
