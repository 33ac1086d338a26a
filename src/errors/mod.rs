// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod facts;
mod gather;
mod graft;
mod target;

pub use config::{ConfigError, ValidationError};
pub use facts::FactsError;
pub use gather::GatherError;
pub use graft::GraftError;
pub use target::TargetError;
