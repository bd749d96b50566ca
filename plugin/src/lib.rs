//! This crate is the host-facing half of the angrylion RDP plugin for Mupen64Plus.
//!
//! The RDP core itself never talks to the emulator directly; it asks for RDRAM, DMEM,
//! the DP/VI registers and a few other bits through a table of function pointers. Everything
//! here exists to answer those requests from the `GFX_INFO` the host hands us, plus the one
//! thing the host can't provide (the RDRAM hidden bits).

pub mod adapter;
pub use adapter::{HostAdapter, DP_INTERRUPT};

pub mod config;
pub use config::PluginConfig;

pub mod context;
pub use context::PluginContext;

mod errors;
pub use errors::PluginError;

pub mod gfx_info;
pub use gfx_info::{CheckInterruptsFn, GfxInfo};

mod hidden_bits;
pub use hidden_bits::HiddenBits;

pub mod registers;
pub use registers::{DpRegister, DpRegisters, ViRegister, ViRegisters};

pub mod rom_name;

#[cfg(test)]
mod test_host;
