//! Subcommand implementations
//!
//! Each command writes its output to a caller-supplied writer so it can be
//! exercised without a terminal.

use super::cli::config::Settings;
use super::error::AppResult;
use crate::lifecycle::{repeat_while_active, LifecycleController};
use crate::producer::{DurableCell, DurableQueue, ProducerError};
use crate::store::{FileStore, KeyValueStore};
use colored::Colorize;
use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

pub type FileQueue = DurableQueue<FileStore>;

const PAUSE_COMMAND: &str = "/pause";
const RESUME_COMMAND: &str = "/resume";

/// Open the store named in `settings` and build the queue over it
pub async fn open_queue(settings: &Settings) -> AppResult<FileQueue> {
    let store = FileStore::open(settings.store.clone()).await?;
    let cell = DurableCell::new(Arc::new(store), settings.key.clone(), settings.codec);
    Ok(DurableQueue::durable(settings.capacity, cell))
}

/// Queue every message, then report how many are pending
pub async fn send<S, W>(queue: &DurableQueue<S>, messages: &[String], out: &mut W) -> AppResult<()>
where
    S: KeyValueStore,
    W: Write,
{
    for message in messages {
        queue.send(message.clone()).await?;
    }
    let pending = queue.snapshot().await?.len();
    writeln!(out, "{} pending", pending)?;
    Ok(())
}

pub async fn pending<S, W>(queue: &DurableQueue<S>, out: &mut W) -> AppResult<usize>
where
    S: KeyValueStore,
    W: Write,
{
    let state = queue.snapshot().await?;
    for message in &state {
        writeln!(out, "{}", message)?;
    }
    Ok(state.len())
}

/// Consume and print until the queue is empty; returns the number printed
pub async fn drain<S, W>(queue: &DurableQueue<S>, out: &mut W) -> AppResult<usize>
where
    S: KeyValueStore,
    W: Write,
{
    let mut count = 0;
    while let Some(message) = queue.consume().await? {
        writeln!(out, "{}", message)?;
        count += 1;
    }
    log::debug!("Drained {} message(s)", count);
    Ok(count)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEnd {
    EndOfInput,
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchSummary {
    pub end: WatchEnd,
    pub queued: usize,
    pub delivered: usize,
    pub pending: usize,
}

/// Queue input lines and print them as the consumer delivers them
///
/// Delivery runs under a lifecycle controller that `/pause` and `/resume`
/// lines toggle. At end of input the remaining messages are drained; when
/// `shutdown` resolves first they stay in the store for the next run. A
/// store failure during delivery ends the watch with that error.
pub async fn watch<S, R, W, F>(
    queue: Arc<DurableQueue<S>>,
    input: R,
    out: &mut W,
    delay: Duration,
    shutdown: F,
) -> AppResult<WatchSummary>
where
    S: KeyValueStore + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
    F: Future<Output = ()>,
{
    let controller = LifecycleController::new();
    let (delivered_tx, mut delivered_rx) = mpsc::unbounded_channel::<String>();
    let (failed_tx, mut failed_rx) = mpsc::unbounded_channel::<ProducerError>();

    let driver = {
        let queue = Arc::clone(&queue);
        tokio::spawn(repeat_while_active(controller.subscribe(), move || {
            let queue = Arc::clone(&queue);
            let delivered_tx = delivered_tx.clone();
            let failed_tx = failed_tx.clone();
            async move {
                let outcome = queue
                    .handle_elements(|message| {
                        let delivered_tx = delivered_tx.clone();
                        async move {
                            let _ = delivered_tx.send(message);
                            if !delay.is_zero() {
                                tokio::time::sleep(delay).await;
                            }
                        }
                    })
                    .await;
                if let Err(e) = outcome {
                    let _ = failed_tx.send(e);
                }
            }
        }))
    };

    controller.activate();

    let mut queued = 0;
    let mut delivered = 0;
    let mut lines = input.lines();
    tokio::pin!(shutdown);

    let end: AppResult<WatchEnd> = loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break Ok(WatchEnd::Interrupted),
            Some(message) = delivered_rx.recv() => {
                writeln!(out, "{}", message)?;
                delivered += 1;
            }
            Some(error) = failed_rx.recv() => {
                eprintln!("{}", format!("delivery failed: {}", error).red());
                break Err(error.into());
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break Ok(WatchEnd::EndOfInput);
                };
                match line.trim() {
                    "" => {}
                    PAUSE_COMMAND => {
                        controller.deactivate();
                        eprintln!("{}", "delivery paused".yellow());
                    }
                    RESUME_COMMAND => {
                        controller.activate();
                        eprintln!("{}", "delivery resumed".green());
                    }
                    message => {
                        queue.send(message.to_string()).await?;
                        queued += 1;
                    }
                }
            }
        }
    };

    drop(controller);
    if let Err(e) = driver.await {
        log::warn!("Delivery task failed: {}", e);
    }
    while let Some(message) = delivered_rx.recv().await {
        writeln!(out, "{}", message)?;
        delivered += 1;
    }

    let end = end?;
    if end == WatchEnd::EndOfInput {
        delivered += drain(&queue, out).await?;
    }
    let pending = queue.snapshot().await?.len();
    if pending > 0 {
        log::info!("{} message(s) left pending", pending);
    }

    Ok(WatchSummary {
        end,
        queued,
        delivered,
        pending,
    })
}
