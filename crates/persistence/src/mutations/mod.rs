// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `plans` — Plan insertion, description updates, deletion
//! - `responses` — Response insertion and deletion
//! - `identity` — Owner and session mutations
//!
//! Mutations use Diesel DSL with one backend-specific helper,
//! `get_last_insert_rowid()`, imported from the `sqlite` module.

pub mod identity;
pub mod plans;
pub mod responses;
