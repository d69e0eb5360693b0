// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for larder-cli
// ABOUTME: Provides access to scale, nutrition, audit and units commands

pub mod audit;
pub mod nutrition;
pub mod scale;
pub mod units;
