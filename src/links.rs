// src/links.rs
//!
//! Background resolution of linked entries.
//!
//! Expanding a `<link;…>` calls [`LinkSink::request_entry`], which must not
//! wait. The request is stamped with the store generation and queued on a
//! bounded channel; worker tasks drain it and load the entry.
//!
//! ```text
//! Expander --try_send--> Channel --> Workers (N) --> ManualStore + ManualEvent
//! ```

use crate::store::ManualStore;
use async_channel::{Receiver, Sender, TrySendError};
use folio_traits::LinkSink;
use folio_types::EntryKey;
use log::{debug, trace, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::task::JoinHandle;

/// One queued entry load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRequest {
    pub key: EntryKey,
    pub generation: u64,
}

/// The sending half of the link queue.
#[derive(Debug)]
pub struct LinkQueue {
    tx: Sender<LinkRequest>,
    generation: Arc<AtomicU64>,
}

impl LinkQueue {
    /// Creates the queue; `generation` is the store's counter.
    pub fn new(capacity: usize, generation: Arc<AtomicU64>) -> (Self, Receiver<LinkRequest>) {
        let (tx, rx) = async_channel::bounded(capacity);
        (Self { tx, generation }, rx)
    }

    pub fn pending(&self) -> usize {
        self.tx.len()
    }
}

impl LinkSink for LinkQueue {
    fn request_entry(&self, key: &EntryKey) {
        let request = LinkRequest {
            key: key.clone(),
            generation: self.generation.load(Ordering::Acquire),
        };
        match self.tx.try_send(request) {
            Ok(()) => trace!("queued link target '{}'", key),
            Err(TrySendError::Full(request)) => {
                warn!("link queue full; dropping request for '{}'", request.key)
            }
            Err(TrySendError::Closed(request)) => {
                debug!("link queue closed; ignoring '{}'", request.key)
            }
        }
    }
}

/// Spawns `count` workers on the current tokio runtime.
///
/// Workers hold the store weakly and stop once it is dropped.
pub fn spawn_link_workers(
    store: &Arc<ManualStore>,
    rx: Receiver<LinkRequest>,
    count: usize,
) -> Vec<JoinHandle<()>> {
    (0..count)
        .map(|worker_id| {
            let rx = rx.clone();
            let store = Arc::downgrade(store);
            tokio::spawn(link_worker(worker_id, store, rx))
        })
        .collect()
}

async fn link_worker(worker_id: usize, store: Weak<ManualStore>, rx: Receiver<LinkRequest>) {
    debug!("[LINK-{}] worker started", worker_id);
    while let Ok(request) = rx.recv().await {
        let Some(strong) = store.upgrade() else {
            break;
        };
        trace!("[LINK-{}] resolving '{}'", worker_id, request.key);
        strong.handle_link_request(request).await;
    }
    debug!("[LINK-{}] worker stopped", worker_id);
}
