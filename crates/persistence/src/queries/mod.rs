// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `plans` — Plan lookups by slug and per-creator listings
//! - `responses` — Response lookups and orderings
//! - `identity` — Owner and session lookups
//!
//! All queries use Diesel DSL exclusively; SQLite-specific helpers live
//! in the `sqlite` module.

pub mod identity;
pub mod plans;
pub mod responses;
