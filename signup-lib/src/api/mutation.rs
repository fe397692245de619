//! Create-user mutation handle with observable state

use std::sync::Arc;
use std::sync::RwLock;

use super::Created;
use crate::SignupClient;
use crate::error::Error;
use crate::model::Payload;

/// The state of a mutation.
#[derive(Debug, Clone, Default)]
pub enum MutationState<T> {
    /// Not triggered yet, or reset.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request succeeded.
    Success(T),
    /// The last request failed.
    Error(String),
}

impl<T> MutationState<T> {
    /// Check if the mutation is idle
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Check if a request is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check if the last request succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Check if the last request failed
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Get reference to the success value
    pub fn as_success(&self) -> Option<&T> {
        match self {
            Self::Success(v) => Some(v),
            _ => None,
        }
    }

    /// Get the error message if present
    pub fn as_error(&self) -> Option<&str> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// Invocable create-user action that tracks its own loading and error state.
///
/// Clones share state, so one clone can trigger while another observes.
///
/// # Example
///
/// ```ignore
/// let user_create = client.user_create();
///
/// let created = user_create.trigger(payload).await?;
/// assert!(user_create.state().is_success());
/// ```
#[derive(Clone)]
pub struct UserCreateMutation {
    client: SignupClient,
    state: Arc<RwLock<MutationState<Created>>>,
}

impl UserCreateMutation {
    /// Creates a mutation handle bound to a client.
    pub fn new(client: SignupClient) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(MutationState::Idle)),
        }
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> MutationState<Created> {
        self.read(MutationState::clone)
    }

    /// Returns `true` while a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.read(MutationState::is_loading)
    }

    /// Sends the payload and records the outcome.
    ///
    /// If the returned future is dropped before the request finishes, the
    /// state goes back to `Idle`.
    pub async fn trigger(&self, payload: Payload) -> Result<Created, Error> {
        let loading = LoadingGuard::start(&self.state);

        let result = self.client.create_user(payload).await;
        match &result {
            Ok(created) => loading.settle(MutationState::Success(created.clone())),
            Err(e) => loading.settle(MutationState::Error(e.to_string())),
        }

        result
    }

    /// Returns the state to idle.
    pub fn reset(&self) {
        self.set(MutationState::Idle);
    }

    fn set(&self, state: MutationState<Created>) {
        write_state(&self.state, state);
    }

    fn read<R>(&self, f: impl FnOnce(&MutationState<Created>) -> R) -> R {
        match self.state.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }
}

fn write_state(lock: &RwLock<MutationState<Created>>, state: MutationState<Created>) {
    match lock.write() {
        Ok(mut guard) => *guard = state,
        Err(poisoned) => *poisoned.into_inner() = state,
    }
}

/// Holds a mutation in `Loading` until settled; dropping it unsettled
/// returns a still-loading mutation to `Idle`.
struct LoadingGuard<'a> {
    state: &'a RwLock<MutationState<Created>>,
    settled: bool,
}

impl<'a> LoadingGuard<'a> {
    fn start(state: &'a RwLock<MutationState<Created>>) -> Self {
        write_state(state, MutationState::Loading);
        Self {
            state,
            settled: false,
        }
    }

    fn settle(mut self, outcome: MutationState<Created>) {
        write_state(self.state, outcome);
        self.settled = true;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut guard = match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if guard.is_loading() {
            log::debug!("Create-user mutation dropped while loading");
            *guard = MutationState::Idle;
        }
    }
}

impl SignupClient {
    /// Returns a create-user mutation handle bound to this client.
    pub fn user_create(&self) -> UserCreateMutation {
        UserCreateMutation::new(self.clone())
    }
}
