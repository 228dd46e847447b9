use crossterm::event::{Event as CrossTermEvent, KeyEventKind};
use futures::{FutureExt, StreamExt};
use tokio::{
    sync::mpsc::{self},
    sync::mpsc::{Receiver, Sender},
    task::JoinHandle,
};

use crate::error::PromptError;

use super::key::Key;
use super::Message;

const CHANNEL_SIZE: usize = 32;

/// Funnel for everything the prompt runner reacts to.
///
/// One channel carries both terminal keypresses and the search results that
/// spawned source tasks report back.  `start` attaches the crossterm reader;
/// tests skip it and push synthetic messages through a cloned sender instead.
pub struct EventLoop<T> {
    tx: Sender<Message<T>>,
    rx: Receiver<Message<T>>,
}

impl<T: Send + 'static> Default for EventLoop<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> EventLoop<T> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<Message<T>>(CHANNEL_SIZE);
        Self { tx, rx }
    }

    /// Sender used to feed messages into the loop; cloned into each spawned
    /// search task.
    pub fn sender(&self) -> Sender<Message<T>> {
        self.tx.clone()
    }

    /// Spawns the terminal reader task.  The task ends once the loop itself
    /// is dropped and the receiving side closes.
    pub fn start(&self) -> JoinHandle<()> {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            loop {
                let crossterm_event = reader.next().fuse();
                tokio::select! {
                    _ = tx.closed() => {
                        break;
                    }
                    Some(Ok(event)) = crossterm_event => {
                        if let CrossTermEvent::Key(key) = event {
                            if key.kind == KeyEventKind::Press {
                                if tx.send(Message::Input(Key::from(key))).await.is_err() {
                                    break;
                                }
                            }
                        }
                    }
                }
            }
        })
    }

    pub async fn next(&mut self) -> Result<Message<T>, PromptError> {
        self.rx.recv().await.ok_or(PromptError::ChannelClosed)
    }
}
