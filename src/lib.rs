// Copyright 2026 JobLens Contributors
// SPDX-License-Identifier: Apache-2.0

//! JobLens library — layered job-posting field detection.
//!
//! Exposes the detector, document handle, capture path and record sink
//! for integration testing and embedding.

pub mod capture;
pub mod config;
pub mod detect;
pub mod document;
pub mod fetch;
pub mod sink;
