// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event dispatch with per-user serialization and cross-user parallelism.
//!
//! A single intake loop pops decoded events from the channel and forwards
//! each to a per-user worker task over an mpsc queue. One worker exists per
//! active user id, so that user's events are processed strictly one at a
//! time and in arrival order, while different users' conversations advance
//! in parallel. Outbound commerce calls block only the one worker.
//!
//! A worker whose queue stays empty for the configured idle timeout closes
//! its queue, clears the user's session, and exits; the next event from
//! that user respawns it. Because expiry runs on the worker itself, it can
//! never race an event for the same user.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use kiosk_core::error::KioskError;
use kiosk_core::traits::ChatChannel;
use kiosk_core::types::{Inbound, UserId};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

use crate::machine::IntakeEngine;

/// Per-user queue depth. A user clicking faster than the engine processes
/// simply queues; only an overrun of this many unprocessed events makes the
/// intake loop wait on that user's worker.
const WORKER_QUEUE_DEPTH: usize = 32;

/// Routes inbound events to per-user workers.
pub struct IntakeDispatcher {
    engine: Arc<IntakeEngine>,
    channel: Arc<dyn ChatChannel>,
    workers: Arc<DashMap<UserId, mpsc::Sender<Inbound>>>,
    tracker: TaskTracker,
    /// Zero disables idle expiry.
    idle_timeout: Duration,
}

impl IntakeDispatcher {
    pub fn new(
        engine: Arc<IntakeEngine>,
        channel: Arc<dyn ChatChannel>,
        idle_timeout_secs: u64,
    ) -> Self {
        Self {
            engine,
            channel,
            workers: Arc::new(DashMap::new()),
            tracker: TaskTracker::new(),
            idle_timeout: Duration::from_secs(idle_timeout_secs),
        }
    }

    /// Runs the intake loop until the cancellation token is triggered.
    ///
    /// On shutdown the worker queues are dropped, letting each worker drain
    /// what it already accepted before exiting.
    pub async fn run(&self, cancel: CancellationToken) -> Result<(), KioskError> {
        info!("intake dispatcher running");

        loop {
            tokio::select! {
                inbound = self.channel.recv() => {
                    match inbound {
                        Ok(inbound) => self.route(inbound).await,
                        Err(e) => {
                            error!(error = %e, "channel receive error");
                            if e.to_string().contains("closed") {
                                break;
                            }
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping intake dispatcher");
                    break;
                }
            }
        }

        self.workers.clear();
        self.tracker.close();
        self.tracker.wait().await;

        info!("intake dispatcher stopped");
        Ok(())
    }

    /// Hands one event to its user's worker, spawning one if needed.
    async fn route(&self, inbound: Inbound) {
        let user_id = inbound.user_id;

        let sender = self.workers.get(&user_id).map(|entry| entry.clone());
        if let Some(sender) = sender {
            match sender.send(inbound).await {
                Ok(()) => return,
                Err(rejected) => {
                    // The worker expired between lookup and send; replace it.
                    self.workers
                        .remove_if(&user_id, |_, s| s.same_channel(&sender));
                    self.spawn_worker(rejected.0);
                    return;
                }
            }
        }

        self.spawn_worker(inbound);
    }

    fn spawn_worker(&self, inbound: Inbound) {
        let user_id = inbound.user_id;
        let (tx, mut rx) = mpsc::channel(WORKER_QUEUE_DEPTH);
        tx.try_send(inbound)
            .expect("fresh worker queue cannot be full");
        self.workers.insert(user_id, tx.clone());
        debug!(user_id = %user_id, "intake worker spawned");

        let engine = self.engine.clone();
        let channel = self.channel.clone();
        let workers = self.workers.clone();
        let idle_timeout = self.idle_timeout;

        self.tracker.spawn(async move {
            loop {
                let next = if idle_timeout.is_zero() {
                    rx.recv().await
                } else {
                    match tokio::time::timeout(idle_timeout, rx.recv()).await {
                        Ok(next) => next,
                        Err(_) => {
                            // Close the queue so late sends fail over to a
                            // respawn, then drain what already arrived.
                            rx.close();
                            let mut drained = false;
                            while let Some(inbound) = rx.recv().await {
                                drained = true;
                                handle_one(&engine, channel.as_ref(), inbound).await;
                            }
                            if !drained {
                                engine.expire(user_id);
                            }
                            break;
                        }
                    }
                };

                let Some(inbound) = next else { break };
                handle_one(&engine, channel.as_ref(), inbound).await;
            }

            workers.remove_if(&user_id, |_, s| s.same_channel(&tx));
            debug!(user_id = %user_id, "intake worker exited");
        });
    }
}

/// Runs one event through the engine and delivers the resulting prompt.
async fn handle_one(engine: &IntakeEngine, channel: &dyn ChatChannel, inbound: Inbound) {
    let user_id = inbound.user_id;
    let chat_id = inbound.chat_id;
    let prompt = engine.handle(user_id, chat_id, inbound.event).await;
    if let Err(e) = channel.send_prompt(chat_id, prompt).await {
        warn!(user_id = %user_id, error = %e, "failed to deliver prompt");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_config::model::IntakeConfig;
    use kiosk_core::types::{ChatId, Choice, Event};
    use kiosk_test_utils::{CaptureChannel, MockCommerce};
    use crate::store::SessionStore;

    fn dispatcher_with(
        commerce: MockCommerce,
        idle_timeout_secs: u64,
    ) -> (Arc<IntakeDispatcher>, Arc<CaptureChannel>) {
        let engine = Arc::new(IntakeEngine::new(
            Arc::new(commerce),
            SessionStore::new(),
            IntakeConfig::default(),
            10,
        ));
        let channel = Arc::new(CaptureChannel::new());
        let dispatcher = Arc::new(IntakeDispatcher::new(
            engine,
            channel.clone(),
            idle_timeout_secs,
        ));
        (dispatcher, channel)
    }

    fn inbound(user: i64, event: Event) -> Inbound {
        Inbound {
            user_id: UserId(user),
            chat_id: ChatId(user),
            event,
        }
    }

    #[tokio::test]
    async fn events_for_one_user_are_answered_in_arrival_order() {
        let (dispatcher, channel) = dispatcher_with(MockCommerce::new(), 0);
        let cancel = CancellationToken::new();
        let run = {
            let dispatcher = dispatcher.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move { dispatcher.run(cancel).await })
        };

        channel
            .inject(inbound(1, Event::MenuSelect(Choice::Contact)))
            .await;
        channel
            .inject(inbound(1, Event::MenuSelect(Choice::About)))
            .await;
        channel
            .inject(inbound(1, Event::MenuSelect(Choice::MainMenu)))
            .await;

        let sent = channel
            .wait_for_prompts(3, Duration::from_secs(5))
            .await;
        assert_eq!(sent.len(), 3);
        assert!(sent[0].1.text.contains("Contact information"));
        assert!(sent[1].1.text.contains("About"));
        assert!(sent[2].1.text.contains("Welcome"));

        cancel.cancel();
        run.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn idle_worker_expires_session_and_respawns_on_next_event() {
        let commerce = MockCommerce::with_products(vec![kiosk_core::types::Product {
            id: kiosk_core::types::ProductId(1),
            name: "Metal tile".into(),
            description: "Classic metal roof tile.".into(),
            unit_price: rust_decimal::Decimal::new(5200, 1),
            category: "Roofing".into(),
            image_url: None,
            specifications: None,
        }]);
        let (dispatcher, channel) = dispatcher_with(commerce, 60);
        let engine = dispatcher.engine.clone();
        let cancel = CancellationToken::new();
        let run = {
            let dispatcher = dispatcher.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move { dispatcher.run(cancel).await })
        };

        channel
            .inject(inbound(1, Event::MenuSelect(Choice::Catalog)))
            .await;
        channel.wait_for_prompts(1, Duration::from_secs(5)).await;
        assert!(engine.store().get(UserId(1)).is_some());

        // Let the idle timeout elapse; the worker clears the session.
        tokio::time::sleep(Duration::from_secs(61)).await;
        tokio::task::yield_now().await;
        assert!(engine.store().get(UserId(1)).is_none());

        // The next event respawns a worker and is processed normally.
        channel
            .inject(inbound(1, Event::MenuSelect(Choice::Catalog)))
            .await;
        let sent = channel
            .wait_for_prompts(2, Duration::from_secs(5))
            .await;
        assert!(sent[1].1.text.contains("Product catalog"));

        cancel.cancel();
        run.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn shutdown_stops_the_loop() {
        let (dispatcher, _channel) = dispatcher_with(MockCommerce::new(), 0);
        let cancel = CancellationToken::new();
        cancel.cancel();
        dispatcher.run(cancel).await.unwrap();
    }
}
