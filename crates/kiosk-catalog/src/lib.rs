// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the commerce backend API.
//!
//! Implements [`kiosk_core::CommerceApi`] over the backend's JSON contract:
//! product listing, single-product lookup, and order creation.

pub mod client;

pub use client::CommerceClient;
