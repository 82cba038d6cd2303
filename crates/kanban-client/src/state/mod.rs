//! Explicit client-side state containers.
//!
//! Each store is a cheap-to-clone handle over a `tokio::sync::watch` channel:
//! reads return a snapshot, writes notify every subscriber.

pub mod active_board;
pub mod chat;
pub mod session;

pub use active_board::ActiveBoardStore;
pub use chat::{ChatState, ChatStore};
pub use session::{Session, SessionStore};

use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug)]
pub(crate) struct Observable<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Clone> Observable<T> {
    pub(crate) fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub(crate) fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    pub(crate) fn replace(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub(crate) fn modify(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}
