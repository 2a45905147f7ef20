//! Bounded store connection pool.
//!
//! Connections are opened eagerly at startup and lent to one caller at a time.
//! A semaphore holding one permit per idle connection bounds borrowing, so the
//! number of connections out on loan can never exceed the number opened. The
//! idle list sits behind a std mutex that is never held across an `.await`.
//!
//! Borrowed connections come back through [`PooledConnection`]'s `Drop`, which
//! covers early `?` returns and panics as well as the happy path.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::Semaphore;

/// Default number of connections opened at startup.
pub const DEFAULT_POOL_CAPACITY: usize = 10;

/// Connection pool errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// The pool was drained; no further connections will be handed out.
    #[error("Connection pool is closed")]
    Closed,

    #[error("Failed to open connection: {0}")]
    Connect(String),

    #[error("Failed to close connection: {0}")]
    Close(String),
}

impl PoolError {
    pub fn connect(message: impl ToString) -> Self {
        Self::Connect(message.to_string())
    }

    pub fn close(message: impl ToString) -> Self {
        Self::Close(message.to_string())
    }
}

/// Opens and closes live store sessions for the pool.
#[async_trait]
pub trait StoreConnector: Send + Sync + 'static {
    type Connection: Send + 'static;

    async fn connect(&self) -> Result<Self::Connection, PoolError>;
    async fn close(&self, connection: Self::Connection) -> Result<(), PoolError>;
}

/// Fixed-capacity pool of live connections.
pub struct ConnectionPool<C: StoreConnector> {
    connector: C,
    capacity: usize,
    /// Connections successfully opened by `initialize`
    opened: usize,
    idle: Mutex<Vec<C::Connection>>,
    /// One permit per connection in `idle`
    permits: Semaphore,
}

impl<C: StoreConnector> ConnectionPool<C> {
    /// Open up to `capacity` connections.
    ///
    /// A connection that fails to open is logged and skipped, so the pool may
    /// start smaller than requested. Check [`has_connections`](Self::has_connections)
    /// to learn whether any connection succeeded.
    pub async fn initialize(connector: C, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut idle = Vec::with_capacity(capacity);

        for slot in 0..capacity {
            match connector.connect().await {
                Ok(connection) => idle.push(connection),
                Err(e) => {
                    tracing::warn!(slot, error = %e, "Failed to establish store connection");
                }
            }
        }

        let opened = idle.len();
        if opened > 0 {
            tracing::info!(opened, capacity, "Store connection pool established");
        } else {
            tracing::error!(capacity, "No store connection could be established");
        }

        Self {
            connector,
            capacity,
            opened,
            permits: Semaphore::new(opened),
            idle: Mutex::new(idle),
        }
    }

    /// Borrow a connection, waiting until one is free.
    ///
    /// There is no timeout: a caller waits for as long as every connection is
    /// out. Returns `PoolError::Closed` once the pool has been drained,
    /// including for callers that were already waiting.
    pub async fn acquire(&self) -> Result<PooledConnection<'_, C>, PoolError> {
        let permit = self.permits.acquire().await.map_err(|_| PoolError::Closed)?;
        permit.forget();

        // A drain between taking the permit and popping empties the list.
        let connection = lock(&self.idle).pop().ok_or(PoolError::Closed)?;
        tracing::trace!("Store connection retrieved from pool");

        Ok(PooledConnection {
            pool: self,
            connection: Some(connection),
        })
    }

    /// Return a connection to the idle set. `None` is a no-op.
    ///
    /// The connection is re-pooled as-is; liveness is not checked. After a
    /// drain, or if the pool is already full, the connection is dropped.
    pub fn release(&self, connection: Option<C::Connection>) {
        let Some(connection) = connection else {
            return;
        };

        let mut idle = lock(&self.idle);
        if self.permits.is_closed() {
            drop(idle);
            tracing::debug!("Pool already drained; dropping returned connection");
            return;
        }
        if idle.len() >= self.opened {
            drop(idle);
            tracing::warn!(opened = self.opened, "Pool is full; dropping foreign connection");
            return;
        }
        idle.push(connection);
        drop(idle);

        self.permits.add_permits(1);
        tracing::trace!("Store connection released back to pool");
    }

    /// Close every idle connection and refuse all future borrows.
    ///
    /// Connections currently on loan are not reached; callers are expected to
    /// be quiescent. Each close is attempted and logged independently.
    /// Returns the number of connections closed cleanly.
    pub async fn drain(&self) -> usize {
        self.permits.close();
        let idle = std::mem::take(&mut *lock(&self.idle));

        let mut closed = 0;
        for connection in idle {
            match self.connector.close(connection).await {
                Ok(()) => {
                    closed += 1;
                    tracing::debug!("Store connection closed");
                }
                Err(e) => tracing::warn!(error = %e, "Failed to close store connection"),
            }
        }

        tracing::info!(closed, opened = self.opened, "Store connection pool drained");
        closed
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn live_count(&self) -> usize {
        self.opened
    }

    pub fn has_connections(&self) -> bool {
        self.opened > 0
    }

    /// Connections currently idle in the pool.
    pub fn available(&self) -> usize {
        lock(&self.idle).len()
    }

    pub fn is_closed(&self) -> bool {
        self.permits.is_closed()
    }
}

impl<C: StoreConnector> fmt::Debug for ConnectionPool<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionPool")
            .field("capacity", &self.capacity)
            .field("opened", &self.opened)
            .field("available", &self.available())
            .field("closed", &self.is_closed())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // The critical sections only push/pop; a poisoned guard still holds a valid list.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A connection on loan from a [`ConnectionPool`].
///
/// Dereferences to the underlying connection and goes back to the pool when dropped.
pub struct PooledConnection<'a, C: StoreConnector> {
    pool: &'a ConnectionPool<C>,
    connection: Option<C::Connection>,
}

impl<C: StoreConnector> PooledConnection<'_, C> {
    /// Return the connection now rather than at end of scope.
    pub fn release(self) {
        drop(self);
    }
}

impl<C: StoreConnector> Deref for PooledConnection<'_, C> {
    type Target = C::Connection;

    fn deref(&self) -> &Self::Target {
        self.connection
            .as_ref()
            .expect("pooled connection is present until drop")
    }
}

impl<C: StoreConnector> DerefMut for PooledConnection<'_, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.connection
            .as_mut()
            .expect("pooled connection is present until drop")
    }
}

impl<C: StoreConnector> Drop for PooledConnection<'_, C> {
    fn drop(&mut self) {
        self.pool.release(self.connection.take());
    }
}

impl<C: StoreConnector> fmt::Debug for PooledConnection<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledConnection").finish_non_exhaustive()
    }
}
