use std::{future::Future, sync::Arc};

use async_trait::async_trait;
use shared::{error::RequestFailure, protocol::ResponseEnvelope};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, warn};

pub mod http;
mod message;

pub use message::display_message;

/// Fallback shown when a failure carries no usable message of its own.
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred while processing your request.";

/// Strategy that performs the actual asynchronous work for a controller.
///
/// Implemented for plain async functions through the blanket impl below, or
/// by hand for backends that carry their own client state.
#[async_trait]
pub trait Requester<P, T>: Send + Sync {
    async fn send(&self, params: P) -> Result<ResponseEnvelope<T>, RequestFailure>;
}

#[async_trait]
impl<P, T, F, Fut> Requester<P, T> for F
where
    P: Send + 'static,
    T: Send + 'static,
    F: Fn(P) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ResponseEnvelope<T>, RequestFailure>> + Send + 'static,
{
    async fn send(&self, params: P) -> Result<ResponseEnvelope<T>, RequestFailure> {
        (self)(params).await
    }
}

/// Placeholder for wiring a controller into a UI before a backend exists.
pub struct MissingRequester;

#[async_trait]
impl<P, T> Requester<P, T> for MissingRequester
where
    P: Send + 'static,
    T: Send + 'static,
{
    async fn send(&self, _params: P) -> Result<ResponseEnvelope<T>, RequestFailure> {
        Err(RequestFailure::transport("request backend is unavailable"))
    }
}

pub type SuccessHook<T> = Arc<dyn Fn(&T) + Send + Sync>;
pub type ErrorHook = Arc<dyn Fn(&RequestFailure, &str) + Send + Sync>;

/// Configuration for a controller. Every field has a default; the hooks are
/// notification-only and never replace the `Result` returned by `execute`.
pub struct RequestOptions<T> {
    pub initial_data: T,
    pub error_message: String,
    on_success: Option<SuccessHook<T>>,
    on_error: Option<ErrorHook>,
}

impl<T> RequestOptions<T> {
    pub fn new(initial_data: T) -> Self {
        Self {
            initial_data,
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            on_success: None,
            on_error: None,
        }
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    /// Invoked with the payload after every successful `execute`.
    pub fn with_on_success(mut self, hook: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(hook));
        self
    }

    /// Invoked with the raw failure and the derived display message after
    /// every failed `execute`.
    pub fn with_on_error(
        mut self,
        hook: impl Fn(&RequestFailure, &str) + Send + Sync + 'static,
    ) -> Self {
        self.on_error = Some(Arc::new(hook));
        self
    }
}

impl<T: Default> Default for RequestOptions<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Observable snapshot a UI renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
}

/// Lifecycle notifications for render layers that live outside the task
/// calling `execute`.
#[derive(Debug, Clone)]
pub enum RequestEvent {
    Started,
    Succeeded,
    Failed { message: String },
    Reset,
}

/// Mediates between a UI and one asynchronous operation: holds the
/// `data`/`loading`/`error` triple, runs the injected requester, and
/// notifies the configured hooks.
///
/// State is private to one controller instance; share the controller itself
/// (e.g. behind an `Arc`) rather than its state.
pub struct RequestController<P, T> {
    requester: Arc<dyn Requester<P, T>>,
    options: RequestOptions<T>,
    state: RwLock<RequestState<T>>,
    events: broadcast::Sender<RequestEvent>,
}

impl<P, T> RequestController<P, T>
where
    P: Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn new(requester: Arc<dyn Requester<P, T>>) -> Self
    where
        T: Default,
    {
        Self::new_with_options(requester, RequestOptions::default())
    }

    pub fn new_with_options(
        requester: Arc<dyn Requester<P, T>>,
        options: RequestOptions<T>,
    ) -> Self {
        let (events, _) = broadcast::channel(32);
        let state = RequestState {
            data: options.initial_data.clone(),
            loading: false,
            error: None,
        };
        Self {
            requester,
            options,
            state: RwLock::new(state),
            events,
        }
    }

    /// Runs the requester once and mirrors its lifecycle into the state.
    ///
    /// `params` is forwarded to the requester verbatim. On success the
    /// payload is stored and returned; on failure the derived display
    /// message is stored and the original failure is propagated, never
    /// swallowed. `loading` is false again once this settles, regardless of
    /// outcome.
    ///
    /// Overlapping calls are not serialized or cancelled: both run, and
    /// whichever settles last owns the final state.
    pub async fn execute(&self, params: P) -> Result<T, RequestFailure> {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }
        let _ = self.events.send(RequestEvent::Started);
        debug!("request: started");

        let outcome = match self.requester.send(params).await {
            Ok(envelope) => {
                let data = envelope.data;
                self.state.write().await.data = data.clone();
                if let Some(hook) = &self.options.on_success {
                    hook(&data);
                }
                debug!("request: succeeded");
                let _ = self.events.send(RequestEvent::Succeeded);
                Ok(data)
            }
            Err(failure) => {
                let message = display_message(&failure, &self.options.error_message);
                self.state.write().await.error = Some(message.clone());
                if let Some(hook) = &self.options.on_error {
                    hook(&failure, &message);
                }
                warn!(error = %message, "request: failed");
                let _ = self.events.send(RequestEvent::Failed { message });
                Err(failure)
            }
        };

        self.state.write().await.loading = false;
        outcome
    }

    /// Returns the state to its configured initial shape. Does not cancel an
    /// in-flight send; a send that settles later will overwrite this.
    pub async fn reset(&self) {
        {
            let mut state = self.state.write().await;
            state.data = self.options.initial_data.clone();
            state.loading = false;
            state.error = None;
        }
        let _ = self.events.send(RequestEvent::Reset);
    }

    /// Direct assignment of `data`, bypassing the request pipeline. No
    /// validation, no hooks, `loading` and `error` untouched.
    pub async fn set_data(&self, value: T) {
        self.state.write().await.data = value;
    }

    pub async fn snapshot(&self) -> RequestState<T> {
        self.state.read().await.clone()
    }

    pub async fn data(&self) -> T {
        self.state.read().await.data.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<RequestEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
