//! This module houses the `PluginContext`, the one object the host keeps alive between
//! `init` and `close`.
//!
//! The host holds a handle to it and every call over the C ABI is routed through that
//! handle, so there's no process-wide plugin state beyond the logger.

use std::os::raw::c_uint;

use m64p_logger::Log;

use crate::adapter::HostAdapter;
use crate::config::PluginConfig;
use crate::errors::PluginError;
use crate::hidden_bits::HiddenBits;
use crate::registers::{DpRegisters, ViRegisters};
use crate::rom_name;

#[derive(Debug)]
pub struct PluginContext {
    host: HostAdapter,
    config: PluginConfig,
    hidden_bits: HiddenBits,
}

impl PluginContext {
    /// Creates the context and allocates the hidden bits for the configured RDRAM size.
    pub fn new(host: HostAdapter, config: PluginConfig) -> Self {
        let hidden_bits = HiddenBits::new(config.rdram_size as usize, config.hidden_bits_fill);

        tracing::info!(
            target: Log::Plugin,
            rom = %rom_name::rom_name(host.rom_header()),
            rdram_size = config.rdram_size,
            "Starting angrylion RDP plugin"
        );

        Self {
            host,
            config,
            hidden_bits,
        }
    }

    pub fn sync_dp(&self) {
        self.host.sync_dp();
    }

    pub fn dp_registers(&self) -> &DpRegisters {
        self.host.dp_registers()
    }

    pub fn vi_registers(&self) -> &ViRegisters {
        self.host.vi_registers()
    }

    pub fn dp_register(&self, index: u32) -> Result<*mut c_uint, PluginError> {
        self.host.dp_register(index)
    }

    pub fn vi_register(&self, index: u32) -> Result<*mut c_uint, PluginError> {
        self.host.vi_register(index)
    }

    pub fn rdram(&self) -> *mut u8 {
        self.host.rdram()
    }

    pub fn rdram_hidden(&mut self) -> *mut u8 {
        self.hidden_bits.as_mut_ptr()
    }

    pub fn hidden_bits(&self) -> &HiddenBits {
        &self.hidden_bits
    }

    pub fn rdram_size(&self) -> u32 {
        self.config.rdram_size
    }

    pub fn dmem(&self) -> *mut u8 {
        self.host.dmem()
    }

    /// Writes the cartridge name into `out`; see `rom_name::extract_rom_name`.
    pub fn rom_name(&self, out: &mut [u8]) -> Result<usize, PluginError> {
        rom_name::extract_rom_name(self.host.rom_header(), out)
    }
}

impl Drop for PluginContext {
    fn drop(&mut self) {
        tracing::info!(target: Log::Plugin, "Shutting down angrylion RDP plugin");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::DP_INTERRUPT;
    use crate::config::{DEFAULT_HIDDEN_BITS_FILL, DEFAULT_RDRAM_SIZE};
    use crate::registers::{DpRegister, ViRegister};
    use crate::rom_name::MIN_NAME_CAPACITY;
    use crate::test_host::{check_interrupts_calls, FakeHost};

    fn context_for(host: &mut FakeHost, config: PluginConfig) -> PluginContext {
        let adapter = unsafe { HostAdapter::new(host.gfx_info()) }.unwrap();
        PluginContext::new(adapter, config)
    }

    #[test]
    fn hidden_bits_follow_the_config() {
        let mut host = FakeHost::new(b"SUPER MARIO 64", b"NSME");
        let config = PluginConfig {
            rdram_size: 0x2000,
            hidden_bits_fill: 1,
        };

        let mut ctx = context_for(&mut host, config);
        assert_eq!(ctx.rdram_size(), 0x2000);
        assert_eq!(ctx.hidden_bits().len(), 0x2000);
        assert!(ctx.hidden_bits().as_slice().iter().all(|&b| b == 1));
        assert_eq!(ctx.rdram_hidden(), ctx.hidden_bits().as_slice().as_ptr() as *mut u8);
    }

    #[test]
    fn default_config_uses_eight_megabytes_filled_with_three() {
        let mut host = FakeHost::new(b"SUPER MARIO 64", b"NSME");
        let adapter = unsafe { HostAdapter::new(host.gfx_info()) }.unwrap();
        let config = PluginConfig::from_host(&adapter);

        assert_eq!(config.rdram_size, DEFAULT_RDRAM_SIZE);
        assert_eq!(config.hidden_bits_fill, DEFAULT_HIDDEN_BITS_FILL);

        let ctx = PluginContext::new(adapter, config);
        assert_eq!(ctx.hidden_bits().len(), 0x80_0000);
        assert!(ctx.hidden_bits().as_slice().iter().all(|&b| b == 3));
    }

    #[test]
    fn host_reported_rdram_size_wins() {
        let mut host = FakeHost::new(b"SUPER MARIO 64", b"NSME");
        host.rdram_size = 0x40_0000;

        let mut info = host.gfx_info();
        info.version = 2;

        let adapter = unsafe { HostAdapter::from_raw(&info, true) }.unwrap();
        assert_eq!(PluginConfig::from_host(&adapter).rdram_size, 0x40_0000);
    }

    #[test]
    fn delegates_to_the_host() {
        let mut host = FakeHost::new(b"SUPER MARIO 64", b"NSME");
        let ctx = context_for(&mut host, PluginConfig::default());

        assert_eq!(ctx.rdram(), host.rdram.as_mut_ptr());
        assert_eq!(ctx.dmem(), host.dmem.as_mut_ptr());
        assert_eq!(ctx.dp_registers().get(DpRegister::End), ctx.dp_register(1).unwrap());
        assert_eq!(ctx.vi_registers().get(ViRegister::Width), ctx.vi_register(2).unwrap());

        let before = check_interrupts_calls();
        ctx.sync_dp();
        assert_eq!(check_interrupts_calls(), before + 1);
        assert_eq!(host.mi_intr & DP_INTERRUPT, DP_INTERRUPT);
    }

    #[test]
    fn reads_the_rom_name_from_the_host_header() {
        let mut host = FakeHost::new(b"SUPER MARIO 64", b"NSME");
        let ctx = context_for(&mut host, PluginConfig::default());

        let mut out = [0u8; MIN_NAME_CAPACITY];
        assert_eq!(ctx.rom_name(&mut out), Ok(14));
        assert_eq!(&out[..15], b"SUPER MARIO 64\0");

        let mut small = [0u8; MIN_NAME_CAPACITY - 1];
        assert!(ctx.rom_name(&mut small).is_err());
    }
}
