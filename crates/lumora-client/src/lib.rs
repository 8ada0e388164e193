// SPDX-FileCopyrightText: 2026 Lumora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared HTTP layer for the Lumora SDK.
//!
//! Provides [`ApiClient`] (bearer attachment, timeout, multipart, error
//! normalization), the [`TokenSlot`] shared with the session store, and the
//! response envelope shapes.

pub mod client;
pub mod envelope;
pub mod token;

pub use client::{ApiClient, UnauthorizedHook};
pub use envelope::{ApiEnvelope, ApiFailure};
pub use token::TokenSlot;
