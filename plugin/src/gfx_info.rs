use std::os::raw::{c_uint, c_uchar};
use std::ptr;

/// The host's `CheckInterrupts` hook.
pub type CheckInterruptsFn = unsafe extern "C" fn();

/// Mirrors the Mupen64Plus `GFX_INFO` struct handed to video plugins in `InitiateGFX`.
///
/// Field order and types must match the C declaration exactly, hence the C-style names.
/// Everything after `CheckInterrupts` only exists on cores whose `GFX_INFO` carries a
/// `version`; see `HostAdapter::reported_rdram_size`.
#[repr(C)]
#[allow(non_snake_case)]
#[derive(Clone, Copy, Debug)]
pub struct GfxInfo {
    pub HEADER: *mut c_uchar,
    pub RDRAM: *mut c_uchar,
    pub DMEM: *mut c_uchar,
    pub IMEM: *mut c_uchar,

    pub MI_INTR_REG: *mut c_uint,

    pub DPC_START_REG: *mut c_uint,
    pub DPC_END_REG: *mut c_uint,
    pub DPC_CURRENT_REG: *mut c_uint,
    pub DPC_STATUS_REG: *mut c_uint,
    pub DPC_CLOCK_REG: *mut c_uint,
    pub DPC_BUFBUSY_REG: *mut c_uint,
    pub DPC_PIPEBUSY_REG: *mut c_uint,
    pub DPC_TMEM_REG: *mut c_uint,

    pub VI_STATUS_REG: *mut c_uint,
    pub VI_ORIGIN_REG: *mut c_uint,
    pub VI_WIDTH_REG: *mut c_uint,
    pub VI_INTR_REG: *mut c_uint,
    pub VI_V_CURRENT_LINE_REG: *mut c_uint,
    pub VI_TIMING_REG: *mut c_uint,
    pub VI_V_SYNC_REG: *mut c_uint,
    pub VI_H_SYNC_REG: *mut c_uint,
    pub VI_LEAP_REG: *mut c_uint,
    pub VI_H_START_REG: *mut c_uint,
    pub VI_V_START_REG: *mut c_uint,
    pub VI_V_BURST_REG: *mut c_uint,
    pub VI_X_SCALE_REG: *mut c_uint,
    pub VI_Y_SCALE_REG: *mut c_uint,

    pub CheckInterrupts: Option<CheckInterruptsFn>,

    pub version: c_uint,
    pub SP_STATUS_REG: *mut c_uint,
    pub RDRAM_SIZE: *const c_uint,
}

impl Default for GfxInfo {
    /// An all-null `GfxInfo`, mostly useful for building one up field by field.
    fn default() -> Self {
        Self {
            HEADER: ptr::null_mut(),
            RDRAM: ptr::null_mut(),
            DMEM: ptr::null_mut(),
            IMEM: ptr::null_mut(),
            MI_INTR_REG: ptr::null_mut(),
            DPC_START_REG: ptr::null_mut(),
            DPC_END_REG: ptr::null_mut(),
            DPC_CURRENT_REG: ptr::null_mut(),
            DPC_STATUS_REG: ptr::null_mut(),
            DPC_CLOCK_REG: ptr::null_mut(),
            DPC_BUFBUSY_REG: ptr::null_mut(),
            DPC_PIPEBUSY_REG: ptr::null_mut(),
            DPC_TMEM_REG: ptr::null_mut(),
            VI_STATUS_REG: ptr::null_mut(),
            VI_ORIGIN_REG: ptr::null_mut(),
            VI_WIDTH_REG: ptr::null_mut(),
            VI_INTR_REG: ptr::null_mut(),
            VI_V_CURRENT_LINE_REG: ptr::null_mut(),
            VI_TIMING_REG: ptr::null_mut(),
            VI_V_SYNC_REG: ptr::null_mut(),
            VI_H_SYNC_REG: ptr::null_mut(),
            VI_LEAP_REG: ptr::null_mut(),
            VI_H_START_REG: ptr::null_mut(),
            VI_V_START_REG: ptr::null_mut(),
            VI_V_BURST_REG: ptr::null_mut(),
            VI_X_SCALE_REG: ptr::null_mut(),
            VI_Y_SCALE_REG: ptr::null_mut(),
            CheckInterrupts: None,
            version: 0,
            SP_STATUS_REG: ptr::null_mut(),
            RDRAM_SIZE: ptr::null(),
        }
    }
}
