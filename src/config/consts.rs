// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Default per-graft timeout for a gathering pass, in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
/// File the hostname graft falls back to
pub const HOSTNAME_PATH: &str = "/etc/hostname";
/// Environment variable the hostname graft checks first
pub const HOSTNAME_ENV_VAR: &str = "HOSTNAME";
