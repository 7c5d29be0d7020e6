use std::collections::VecDeque;
use thiserror::Error;

use crate::app::AppState;
use crate::storage::config::{Config, ConfigError};
use crate::sync::controller::{self, Command, Message, WriteOrigin};
use crate::sync::display::CalendarDisplay;
use crate::sync::grist_api::{Collection, GristClient, RecordStore};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),
}

/// Runs controller transitions and carries out the commands they return.
pub struct SyncEngine<S, D> {
    store: S,
    display: D,
    state: AppState,
}

impl<D: CalendarDisplay> SyncEngine<GristClient, D> {
    pub fn connect(config: &Config, display: D) -> Result<Self, SyncError> {
        config.validate()?;
        let client = GristClient::new(&config.store, config.tables.clone());
        Ok(Self::new(client, display))
    }
}

impl<S: RecordStore, D: CalendarDisplay> SyncEngine<S, D> {
    pub fn new(store: S, display: D) -> Self {
        Self {
            store,
            display,
            state: AppState::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handles `message` and everything it triggers before returning.
    pub async fn dispatch(&mut self, message: Message) {
        let mut pending = VecDeque::from([message]);

        while let Some(message) = pending.pop_front() {
            tracing::debug!("Dispatching {:?}", message);
            let state = std::mem::take(&mut self.state);
            let (state, commands) = controller::update(state, message);
            self.state = state;

            for command in commands {
                if let Some(follow_up) = self.execute(command).await {
                    pending.push_back(follow_up);
                }
            }
        }
    }

    async fn execute(&mut self, command: Command) -> Option<Message> {
        match command {
            Command::FetchTeams => {
                let result = self.store.list(Collection::Teams).await;
                Some(Message::TeamsFetched(result))
            }
            Command::FetchReservations => {
                let result = self.store.list(Collection::Reservations).await;
                Some(Message::ReservationsFetched(result))
            }
            Command::CreateReservation { fields } => {
                let result = self.store
                    .create(Collection::Reservations, fields)
                    .await
                    .map(|record| {
                        tracing::info!("Reservation {} created", record.id);
                    });
                Some(Message::WriteFinished {
                    origin: WriteOrigin::Submit,
                    result,
                })
            }
            Command::UpdateReservation { id, fields, origin } => {
                let result = self.store
                    .update(Collection::Reservations, id, fields)
                    .await
                    .map(|_| ());
                Some(Message::WriteFinished { origin, result })
            }
            Command::DeleteReservation { id } => {
                let result = self.store.delete(Collection::Reservations, id).await;
                Some(Message::WriteFinished {
                    origin: WriteOrigin::Delete,
                    result,
                })
            }
            Command::RefreshDisplay(events) => {
                self.display.refresh(&events);
                None
            }
            Command::RevertDisplay => {
                tracing::info!("Reverting last change on the display");
                self.display.revert_last_change();
                None
            }
        }
    }
}
