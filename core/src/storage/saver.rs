use crate::storage::StorageGateway;
use crate::{Error, Result};
use std::sync::mpsc::{channel, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

enum Job {
    Write(String),
    Flush(Sender<std::result::Result<(), String>>),
}

/// Background writer that persists collection snapshots off the caller's
/// thread. Queued snapshots coalesce down to the newest one, so a save that
/// is superseded while in flight is simply overwritten by the next write.
pub(crate) struct BackgroundSaver {
    tx: Option<Sender<Job>>,
    handle: Option<JoinHandle<()>>,
}

impl BackgroundSaver {
    pub fn spawn(gateway: Arc<dyn StorageGateway>, key: &'static str) -> Self {
        let (tx, rx) = channel::<Job>();
        let handle = thread::spawn(move || {
            while let Ok(first) = rx.recv() {
                let mut jobs = vec![first];
                while let Ok(more) = rx.try_recv() {
                    jobs.push(more);
                }

                let mut newest = None;
                let mut acks = Vec::new();
                for job in jobs {
                    match job {
                        Job::Write(blob) => newest = Some(blob),
                        Job::Flush(ack) => acks.push(ack),
                    }
                }

                let outcome = match newest {
                    Some(blob) => gateway.save(key, &blob),
                    None => Ok(()),
                };
                if let Err(err) = &outcome {
                    log::error!("background save of '{}' failed: {}", key, err);
                }

                let message = outcome.err().map(|e| e.to_string());
                for ack in acks {
                    let _ = ack.send(match &message {
                        None => Ok(()),
                        Some(msg) => Err(msg.clone()),
                    });
                }
            }
        });

        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    /// Queue a snapshot for persistence. Never blocks on I/O.
    pub fn enqueue(&self, blob: String) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(Job::Write(blob));
        }
    }

    /// Wait until every queued snapshot has been written, surfacing the
    /// outcome of the final write.
    pub fn flush(&self) -> Result<()> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| Error::Persistence("saver is shut down".to_string()))?;

        let (ack_tx, ack_rx) = channel();
        tx.send(Job::Flush(ack_tx))
            .map_err(|_| Error::Persistence("saver thread exited".to_string()))?;

        match ack_rx.recv() {
            Ok(Ok(())) => Ok(()),
            Ok(Err(msg)) => Err(Error::Persistence(msg)),
            Err(_) => Err(Error::Persistence("saver thread exited".to_string())),
        }
    }
}

impl Drop for BackgroundSaver {
    fn drop(&mut self) {
        // Disconnect the channel; the worker drains what is queued and exits.
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
