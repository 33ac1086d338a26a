// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod cpu;
pub mod env;
pub mod hostname;
pub mod os;
pub mod static_facts;
pub mod user;

pub use cpu::CpuGraft;
pub use env::EnvGraft;
pub use hostname::HostnameGraft;
pub use os::OsGraft;
pub use static_facts::StaticGraft;
pub use user::UserFactsGraft;
