//! This module implements an adapter for interfacing with the host core over the FFI
//! boundary. It wraps `unsafe` operations and acts as a clean bridge where we can inject
//! our own logic as needed.
//!
//! (This is necessary as the plugin is loaded as a dylib, which means it can't "see" the
//! core's memory or functions - but the core _does_ pass in pointers to both.)

use std::mem::offset_of;
use std::os::raw::c_uint;
use std::ptr;
use std::slice;

use m64p_logger::Log;

use crate::errors::PluginError;
use crate::gfx_info::{CheckInterruptsFn, GfxInfo};
use crate::registers::{DpRegister, DpRegisters, ViRegister, ViRegisters};
use crate::rom_name::ROM_HEADER_LEN;

/// The DP bit in `MI_INTR_REG`.
pub const DP_INTERRUPT: c_uint = 0x20;

/// An adapter, of sorts, for interacting with the host core.
///
/// This holds the pointers from `GFX_INFO` and provides "safe" accessors to use throughout
/// this library. All of them have been null-checked once, up front, in `HostAdapter::new`.
#[derive(Clone, Debug)]
pub struct HostAdapter {
    info: GfxInfo,
    check_interrupts: CheckInterruptsFn,
    dp: DpRegisters,
    vi: ViRegisters,
}

impl HostAdapter {
    /// Validates `info` and wraps it.
    ///
    /// # Safety
    ///
    /// Every pointer in `info` must stay valid for as long as the returned adapter (and
    /// anything built from it) is alive, `HEADER` must cover at least `ROM_HEADER_LEN` bytes,
    /// and `CheckInterrupts` must be safe to call from the thread driving the plugin.
    pub unsafe fn new(info: GfxInfo) -> Result<Self, PluginError> {
        let required = [
            ("HEADER", info.HEADER.is_null()),
            ("RDRAM", info.RDRAM.is_null()),
            ("DMEM", info.DMEM.is_null()),
            ("MI_INTR_REG", info.MI_INTR_REG.is_null()),
        ];

        if let Some((name, _)) = required.into_iter().find(|(_, is_null)| *is_null) {
            return Err(PluginError::NullHostPointer(name));
        }

        let check_interrupts = info
            .CheckInterrupts
            .ok_or(PluginError::NullHostPointer("CheckInterrupts"))?;

        let dp = DpRegisters::from_gfx_info(&info);
        let vi = ViRegisters::from_gfx_info(&info);

        if let Some(name) = dp.first_missing().or_else(|| vi.first_missing()) {
            return Err(PluginError::NullHostPointer(name));
        }

        Ok(Self {
            info,
            check_interrupts,
            dp,
            vi,
        })
    }

    /// Copies a host `GFX_INFO` and wraps it.
    ///
    /// Only the fields the host actually has are read: the struct ends at `CheckInterrupts`
    /// unless `extended_info` is set, and `SP_STATUS_REG`/`RDRAM_SIZE` only exist from
    /// `version` 2 onwards.
    ///
    /// # Safety
    ///
    /// `info` must be null or point to a `GFX_INFO` laid out by the host as described above,
    /// and the pointers inside it must satisfy the contract of `HostAdapter::new`.
    pub unsafe fn from_raw(info: *const GfxInfo, extended_info: bool) -> Result<Self, PluginError> {
        if info.is_null() {
            return Err(PluginError::MissingGfxInfo);
        }

        let mut copy = GfxInfo::default();

        // Everything up to `version` is pointers and present on every core.
        ptr::copy_nonoverlapping(
            info as *const u8,
            ptr::addr_of_mut!(copy) as *mut u8,
            offset_of!(GfxInfo, version),
        );

        if extended_info {
            copy.version = ptr::addr_of!((*info).version).read();

            if copy.version >= 2 {
                copy.SP_STATUS_REG = ptr::addr_of!((*info).SP_STATUS_REG).read();
                copy.RDRAM_SIZE = ptr::addr_of!((*info).RDRAM_SIZE).read();
            }
        }

        Self::new(copy)
    }

    /// Raises the DP interrupt and asks the host to re-evaluate pending interrupts.
    pub fn sync_dp(&self) {
        tracing::trace!(target: Log::Plugin, "Raising DP interrupt");

        unsafe {
            *self.info.MI_INTR_REG |= DP_INTERRUPT;
            (self.check_interrupts)();
        }
    }

    pub fn dp_registers(&self) -> &DpRegisters {
        &self.dp
    }

    pub fn vi_registers(&self) -> &ViRegisters {
        &self.vi
    }

    /// Looks up a DP register by the index the RDP core uses for it.
    pub fn dp_register(&self, index: u32) -> Result<*mut c_uint, PluginError> {
        DpRegister::try_from(index).map(|register| self.dp.get(register))
    }

    /// Looks up a VI register by the index the RDP core uses for it.
    pub fn vi_register(&self, index: u32) -> Result<*mut c_uint, PluginError> {
        ViRegister::try_from(index).map(|register| self.vi.get(register))
    }

    pub fn rdram(&self) -> *mut u8 {
        self.info.RDRAM
    }

    pub fn dmem(&self) -> *mut u8 {
        self.info.DMEM
    }

    /// The first `ROM_HEADER_LEN` bytes of the cartridge, in host byte order.
    pub fn rom_header(&self) -> &[u8] {
        // `new` checked for null and its contract guarantees the length.
        unsafe { slice::from_raw_parts(self.info.HEADER, ROM_HEADER_LEN) }
    }

    /// The RDRAM size the host reports, if its `GFX_INFO` is recent enough to carry one.
    pub fn reported_rdram_size(&self) -> Option<u32> {
        if self.info.version < 2 || self.info.RDRAM_SIZE.is_null() {
            return None;
        }

        Some(unsafe { *self.info.RDRAM_SIZE })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_host::{check_interrupts_calls, FakeHost};

    #[test]
    fn rejects_missing_host_pointers() {
        let mut host = FakeHost::new(b"SUPER MARIO 64", b"NSME");

        let mut info = host.gfx_info();
        info.RDRAM = ptr::null_mut();
        assert_eq!(unsafe { HostAdapter::new(info) }.err(), Some(PluginError::NullHostPointer("RDRAM")));

        let mut info = host.gfx_info();
        info.CheckInterrupts = None;
        assert_eq!(
            unsafe { HostAdapter::new(info) }.err(),
            Some(PluginError::NullHostPointer("CheckInterrupts"))
        );

        let mut info = host.gfx_info();
        info.VI_LEAP_REG = ptr::null_mut();
        assert_eq!(
            unsafe { HostAdapter::new(info) }.err(),
            Some(PluginError::NullHostPointer("VI_LEAP_REG"))
        );

        assert_eq!(
            unsafe { HostAdapter::from_raw(ptr::null(), true) }.err(),
            Some(PluginError::MissingGfxInfo)
        );
    }

    #[test]
    fn sync_dp_sets_the_dp_bit_and_checks_interrupts() {
        let mut host = FakeHost::new(b"SUPER MARIO 64", b"NSME");
        host.mi_intr = 0x01;

        let adapter = unsafe { HostAdapter::new(host.gfx_info()) }.unwrap();
        let before = check_interrupts_calls();

        adapter.sync_dp();

        assert_eq!(host.mi_intr, 0x01 | DP_INTERRUPT);
        assert_eq!(check_interrupts_calls(), before + 1);
    }

    #[test]
    fn register_lookups_point_into_host_memory() {
        let mut host = FakeHost::new(b"SUPER MARIO 64", b"NSME");
        let adapter = unsafe { HostAdapter::new(host.gfx_info()) }.unwrap();

        let status = adapter.dp_register(DpRegister::Status as u32).unwrap();
        unsafe { *status = 0x81 };

        let origin = adapter.vi_register(ViRegister::Origin as u32).unwrap();
        unsafe { *origin = 0x0010_0000 };

        assert_eq!(host.dp[DpRegister::Status as usize], 0x81);
        assert_eq!(host.vi[ViRegister::Origin as usize], 0x0010_0000);
        assert!(adapter.vi_register(ViRegister::COUNT as u32).is_err());
    }

    #[test]
    fn only_reads_the_extended_fields_when_present() {
        let mut host = FakeHost::new(b"SUPER MARIO 64", b"NSME");
        host.rdram_size = 0x40_0000;

        let mut info = host.gfx_info();
        info.version = 2;

        let legacy = unsafe { HostAdapter::from_raw(&info, false) }.unwrap();
        assert_eq!(legacy.reported_rdram_size(), None);

        let extended = unsafe { HostAdapter::from_raw(&info, true) }.unwrap();
        assert_eq!(extended.reported_rdram_size(), Some(0x40_0000));

        info.version = 1;
        let old_extended = unsafe { HostAdapter::from_raw(&info, true) }.unwrap();
        assert_eq!(old_extended.reported_rdram_size(), None);
    }

    #[test]
    fn exposes_the_header_bytes() {
        let mut host = FakeHost::new(b"SUPER MARIO 64", b"NSME");
        let adapter = unsafe { HostAdapter::new(host.gfx_info()) }.unwrap();

        assert_eq!(adapter.rom_header().len(), ROM_HEADER_LEN);
        assert_eq!(adapter.rom_header(), &host.header[..]);
    }
}
