// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for type safety across slotscan.
//!
//! This module provides newtype wrappers for various domain concepts:
//! - Calendar days and inclusive day ranges
//! - Slot counts and the per-day value map
//! - The service/location identity that scopes a cache
//! - Configuration values (request sizing, prefetch margins)

pub mod config;
pub mod day;
pub mod identity;
pub mod range;
pub mod slots;

// Note: Public types are re-exported from lib.rs, not here
