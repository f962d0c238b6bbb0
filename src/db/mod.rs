// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage layer (in-memory sessions).

pub mod memory;

pub use memory::{SessionInfo, SessionStore};
