use std::fmt::{Debug, Display};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Entity trait with lifecycle hooks)
// =============================================================================

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and Payload
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, String>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> { Ok(()) }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;
    fn on_delete(&self) -> Result<(), String> { Ok(()) }
}

/// Errors produced by the actor layer itself, independent of the entity type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Rejected by entity hook: {0}")]
    Rejected(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<T>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

type NextIdFn<T> = Box<dyn Fn(&[T]) -> <T as Entity>::Id + Send + Sync>;

/// Single owner of an ordered in-memory store.
///
/// Requests are handled one at a time in arrival order, so every
/// read-modify-write (id assignment, overlay, index removal) is atomic
/// with respect to all clients. Lookups are linear scans; the store keeps
/// insertion order.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Vec<T>,
    next_id_fn: NextIdFn<T>,
}

impl<T: Entity> ResourceActor<T> {
    /// Creates the actor and its client.
    ///
    /// # Arguments
    /// * `buffer_size` - Mailbox capacity
    /// * `seed` - Initial contents of the store, kept in the given order
    /// * `next_id_fn` - Computes the id for a new entity from the current contents
    pub fn new(
        buffer_size: usize,
        seed: Vec<T>,
        next_id_fn: impl Fn(&[T]) -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: seed,
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self), fields(entity = std::any::type_name::<T>()))]
    pub async fn run(mut self) {
        info!(seeded = self.store.len(), "ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let _ = respond_to.send(self.handle_create(payload));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(count = self.store.len(), "Processing list request");
                    let _ = respond_to.send(Ok(self.store.clone()));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(self.handle_get(id));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
            }
        }
        info!("ResourceActor stopped");
    }

    fn position(&self, id: &T::Id) -> Option<usize> {
        self.store.iter().position(|item| item.id() == id)
    }

    #[instrument(skip(self, payload))]
    fn handle_create(&mut self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        debug!("Processing create request");
        let id = (self.next_id_fn)(&self.store);
        let mut item = T::from_create(id.clone(), payload).map_err(FrameworkError::Rejected)?;
        item.on_create().map_err(FrameworkError::Rejected)?;
        self.store.push(item.clone());
        info!(id = %id, "Item created");
        Ok(item)
    }

    #[instrument(fields(item_id = %id), skip(self))]
    fn handle_get(&self, id: T::Id) -> Result<T, FrameworkError> {
        debug!("Processing get request");
        match self.position(&id) {
            Some(index) => Ok(self.store[index].clone()),
            None => {
                debug!("Item not found");
                Err(FrameworkError::NotFound(id.to_string()))
            }
        }
    }

    #[instrument(fields(item_id = %id), skip(self, patch))]
    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        debug!("Processing update request");
        let Some(index) = self.position(&id) else {
            warn!("Item not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        // Overlay onto a copy; the stored entry is replaced only on success.
        let mut updated = self.store[index].clone();
        updated.on_update(patch).map_err(FrameworkError::Rejected)?;
        self.store[index] = updated.clone();
        info!("Item updated");
        Ok(updated)
    }

    #[instrument(fields(item_id = %id), skip(self))]
    fn handle_delete(&mut self, id: T::Id) -> Result<T, FrameworkError> {
        debug!("Processing delete request");
        let Some(index) = self.position(&id) else {
            warn!("Item not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        self.store[index].on_delete().map_err(FrameworkError::Rejected)?;
        let removed = self.store.remove(index);
        info!(remaining = self.store.len(), "Item deleted");
        Ok(removed)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub(crate) fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(build(respond_to))
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
