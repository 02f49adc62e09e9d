// ntagi2c/src/demo/async_api.rs
//! Async facade over `Demo`. Every call runs the blocking transport work on
//! tokio's blocking pool.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::demo::{Demo, ReadReport, WriteReport};
use crate::ndef::NdefMessage;
use crate::product::TagProduct;
use crate::{Error, Result};

/// Async face of the demo operations.
#[async_trait]
pub trait AsyncTagIo {
    /// Product of the tag in the field.
    async fn product(&self) -> Result<TagProduct>;

    /// Write `text` as a text record once the board lets go.
    async fn write_text(&self, text: String) -> Result<WriteReport>;

    /// Run one read cycle.
    async fn read_once(&self) -> Result<ReadReport>;

    /// Read the NDEF message from user memory.
    async fn read_ndef(&self) -> Result<NdefMessage>;
}

/// Shareable handle to a `Demo`. Calls are serialized by a mutex.
#[derive(Debug, Clone)]
pub struct AsyncDemo {
    inner: Arc<Mutex<Demo>>,
}

impl AsyncDemo {
    /// Wrap `demo`; calls run on the blocking pool.
    pub fn new(demo: Demo) -> Self {
        Self {
            inner: Arc::new(Mutex::new(demo)),
        }
    }

    /// Take the demo back; `None` while other clones are alive.
    pub fn into_inner(self) -> Option<Demo> {
        Arc::try_unwrap(self.inner)
            .ok()
            .map(|m| m.into_inner().unwrap_or_else(PoisonError::into_inner))
    }

    async fn with_demo<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Demo) -> Result<T> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let mut demo = inner.lock().unwrap_or_else(PoisonError::into_inner);
            f(&mut demo)
        })
        .await
        .map_err(|e| Error::Transport(format!("blocking task failed: {}", e)))?
    }
}

#[async_trait]
impl AsyncTagIo for AsyncDemo {
    async fn product(&self) -> Result<TagProduct> {
        self.with_demo(|demo| demo.product()).await
    }

    async fn write_text(&self, text: String) -> Result<WriteReport> {
        self.with_demo(move |demo| demo.write_text(&text)).await
    }

    async fn read_once(&self) -> Result<ReadReport> {
        self.with_demo(|demo| demo.read_once()).await
    }

    async fn read_ndef(&self) -> Result<NdefMessage> {
        self.with_demo(|demo| demo.read_ndef()).await
    }
}
