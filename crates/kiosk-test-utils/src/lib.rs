// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Kiosk integration tests.
//!
//! Provides mock collaborators for fast, deterministic, CI-runnable tests
//! without a live backend or chat transport.
//!
//! # Components
//!
//! - [`MockCommerce`] - Scriptable commerce API with an order call log
//! - [`CaptureChannel`] - Chat channel with event injection and prompt capture

pub mod capture_channel;
pub mod mock_commerce;

pub use capture_channel::CaptureChannel;
pub use mock_commerce::MockCommerce;
