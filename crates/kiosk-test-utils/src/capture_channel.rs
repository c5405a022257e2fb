// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat channel for deterministic testing.
//!
//! `CaptureChannel` implements `ChatChannel` with injectable inbound events
//! and captured outbound prompts for assertion in tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use kiosk_core::error::KioskError;
use kiosk_core::traits::ChatChannel;
use kiosk_core::types::{ChatId, Inbound, Prompt};

/// A mock chat transport for testing.
///
/// Provides two queues:
/// - **inbound**: Events injected via `inject()` are returned by `recv()`
/// - **sent**: Prompts passed to `send_prompt()` are captured and
///   retrievable via `sent_prompts()`
pub struct CaptureChannel {
    inbound: Arc<Mutex<VecDeque<Inbound>>>,
    sent: Arc<Mutex<Vec<(ChatId, Prompt)>>>,
    inbound_notify: Arc<Notify>,
    sent_notify: Arc<Notify>,
}

impl CaptureChannel {
    pub fn new() -> Self {
        Self {
            inbound: Arc::new(Mutex::new(VecDeque::new())),
            sent: Arc::new(Mutex::new(Vec::new())),
            inbound_notify: Arc::new(Notify::new()),
            sent_notify: Arc::new(Notify::new()),
        }
    }

    /// Injects an inbound event; the next `recv()` call will return it.
    pub async fn inject(&self, inbound: Inbound) {
        self.inbound.lock().await.push_back(inbound);
        self.inbound_notify.notify_one();
    }

    /// All prompts delivered so far, in send order.
    pub async fn sent_prompts(&self) -> Vec<(ChatId, Prompt)> {
        self.sent.lock().await.clone()
    }

    /// Number of prompts delivered so far.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Clears the captured prompts.
    pub async fn clear_sent(&self) {
        self.sent.lock().await.clear();
    }

    /// Waits until at least `count` prompts have been delivered, or the
    /// timeout elapses, and returns whatever was captured.
    pub async fn wait_for_prompts(&self, count: usize, timeout: Duration) -> Vec<(ChatId, Prompt)> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            {
                let sent = self.sent.lock().await;
                if sent.len() >= count {
                    return sent.clone();
                }
            }
            if tokio::time::timeout_at(deadline, self.sent_notify.notified())
                .await
                .is_err()
            {
                return self.sent.lock().await.clone();
            }
        }
    }
}

impl Default for CaptureChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatChannel for CaptureChannel {
    async fn send_prompt(&self, chat: ChatId, prompt: Prompt) -> Result<(), KioskError> {
        self.sent.lock().await.push((chat, prompt));
        self.sent_notify.notify_one();
        Ok(())
    }

    async fn recv(&self) -> Result<Inbound, KioskError> {
        loop {
            {
                let mut queue = self.inbound.lock().await;
                if let Some(inbound) = queue.pop_front() {
                    return Ok(inbound);
                }
            }
            self.inbound_notify.notified().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiosk_core::types::{Event, UserId};

    fn make_inbound(user: i64, text: &str) -> Inbound {
        Inbound {
            user_id: UserId(user),
            chat_id: ChatId(user),
            event: Event::TextReply(text.to_string()),
        }
    }

    #[tokio::test]
    async fn recv_returns_injected_events_in_order() {
        let channel = CaptureChannel::new();
        channel.inject(make_inbound(1, "first")).await;
        channel.inject(make_inbound(1, "second")).await;

        let first = channel.recv().await.unwrap();
        let second = channel.recv().await.unwrap();
        assert_eq!(first.event, Event::TextReply("first".into()));
        assert_eq!(second.event, Event::TextReply("second".into()));
    }

    #[tokio::test]
    async fn recv_waits_for_injection() {
        let channel = Arc::new(CaptureChannel::new());
        let channel_clone = channel.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            channel_clone.inject(make_inbound(1, "delayed")).await;
        });

        let received = tokio::time::timeout(Duration::from_secs(2), channel.recv())
            .await
            .expect("recv timed out")
            .unwrap();
        assert_eq!(received.event, Event::TextReply("delayed".into()));
    }

    #[tokio::test]
    async fn send_prompt_captures_in_order() {
        let channel = CaptureChannel::new();
        channel
            .send_prompt(ChatId(1), Prompt::text("one"))
            .await
            .unwrap();
        channel
            .send_prompt(ChatId(2), Prompt::text("two"))
            .await
            .unwrap();

        let sent = channel.sent_prompts().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, ChatId(1));
        assert_eq!(sent[0].1.text, "one");
        assert_eq!(sent[1].1.text, "two");
    }

    #[tokio::test]
    async fn wait_for_prompts_returns_once_count_is_reached() {
        let channel = Arc::new(CaptureChannel::new());
        let channel_clone = channel.clone();

        tokio::spawn(async move {
            channel_clone
                .send_prompt(ChatId(1), Prompt::text("later"))
                .await
                .unwrap();
        });

        let sent = channel.wait_for_prompts(1, Duration::from_secs(2)).await;
        assert_eq!(sent.len(), 1);
    }

    #[tokio::test]
    async fn wait_for_prompts_times_out_with_partial_results() {
        let channel = CaptureChannel::new();
        channel
            .send_prompt(ChatId(1), Prompt::text("only one"))
            .await
            .unwrap();

        let sent = channel
            .wait_for_prompts(5, Duration::from_millis(50))
            .await;
        assert_eq!(sent.len(), 1);
    }
}
