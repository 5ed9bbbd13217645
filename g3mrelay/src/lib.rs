/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

pub mod config;
pub mod opts;
pub mod run;
pub mod stdlog;

mod export;
mod signal;
mod source;
