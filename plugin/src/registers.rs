//! Named register tables handed to the RDP core.
//!
//! The core indexes DP and VI registers by number. Instead of reinterpreting a run of
//! `GfxInfo` fields as an array, each table is its own `#[repr(C)]` struct and every index
//! maps to a field explicitly.

use std::os::raw::c_uint;

use crate::errors::PluginError;
use crate::gfx_info::GfxInfo;

/// Index of a DP command register, in the order the RDP core numbers them.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DpRegister {
    Start = 0,
    End,
    Current,
    Status,
    Clock,
    BufBusy,
    PipeBusy,
    Tmem,
}

impl DpRegister {
    pub const COUNT: usize = 8;
}

impl TryFrom<u32> for DpRegister {
    type Error = PluginError;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        use DpRegister::*;

        Ok(match index {
            0 => Start,
            1 => End,
            2 => Current,
            3 => Status,
            4 => Clock,
            5 => BufBusy,
            6 => PipeBusy,
            7 => Tmem,
            _ => return Err(PluginError::UnknownRegister { kind: "DP", index }),
        })
    }
}

/// Index of a video interface register, in the order the RDP core numbers them.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViRegister {
    Status = 0,
    Origin,
    Width,
    Intr,
    CurrentLine,
    Timing,
    VSync,
    HSync,
    Leap,
    HStart,
    VStart,
    VBurst,
    XScale,
    YScale,
}

impl ViRegister {
    pub const COUNT: usize = 14;
}

impl TryFrom<u32> for ViRegister {
    type Error = PluginError;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        use ViRegister::*;

        Ok(match index {
            0 => Status,
            1 => Origin,
            2 => Width,
            3 => Intr,
            4 => CurrentLine,
            5 => Timing,
            6 => VSync,
            7 => HSync,
            8 => Leap,
            9 => HStart,
            10 => VStart,
            11 => VBurst,
            12 => XScale,
            13 => YScale,
            _ => return Err(PluginError::UnknownRegister { kind: "VI", index }),
        })
    }
}

/// Pointers to the host's DP command registers.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct DpRegisters {
    pub start: *mut c_uint,
    pub end: *mut c_uint,
    pub current: *mut c_uint,
    pub status: *mut c_uint,
    pub clock: *mut c_uint,
    pub buf_busy: *mut c_uint,
    pub pipe_busy: *mut c_uint,
    pub tmem: *mut c_uint,
}

impl DpRegisters {
    pub fn from_gfx_info(info: &GfxInfo) -> Self {
        Self {
            start: info.DPC_START_REG,
            end: info.DPC_END_REG,
            current: info.DPC_CURRENT_REG,
            status: info.DPC_STATUS_REG,
            clock: info.DPC_CLOCK_REG,
            buf_busy: info.DPC_BUFBUSY_REG,
            pipe_busy: info.DPC_PIPEBUSY_REG,
            tmem: info.DPC_TMEM_REG,
        }
    }

    pub fn get(&self, register: DpRegister) -> *mut c_uint {
        match register {
            DpRegister::Start => self.start,
            DpRegister::End => self.end,
            DpRegister::Current => self.current,
            DpRegister::Status => self.status,
            DpRegister::Clock => self.clock,
            DpRegister::BufBusy => self.buf_busy,
            DpRegister::PipeBusy => self.pipe_busy,
            DpRegister::Tmem => self.tmem,
        }
    }

    /// Name of the first null register, if any.
    pub(crate) fn first_missing(&self) -> Option<&'static str> {
        [
            ("DPC_START_REG", self.start),
            ("DPC_END_REG", self.end),
            ("DPC_CURRENT_REG", self.current),
            ("DPC_STATUS_REG", self.status),
            ("DPC_CLOCK_REG", self.clock),
            ("DPC_BUFBUSY_REG", self.buf_busy),
            ("DPC_PIPEBUSY_REG", self.pipe_busy),
            ("DPC_TMEM_REG", self.tmem),
        ]
        .into_iter()
        .find(|(_, ptr)| ptr.is_null())
        .map(|(name, _)| name)
    }
}

/// Pointers to the host's video interface registers.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct ViRegisters {
    pub status: *mut c_uint,
    pub origin: *mut c_uint,
    pub width: *mut c_uint,
    pub intr: *mut c_uint,
    pub current_line: *mut c_uint,
    pub timing: *mut c_uint,
    pub v_sync: *mut c_uint,
    pub h_sync: *mut c_uint,
    pub leap: *mut c_uint,
    pub h_start: *mut c_uint,
    pub v_start: *mut c_uint,
    pub v_burst: *mut c_uint,
    pub x_scale: *mut c_uint,
    pub y_scale: *mut c_uint,
}

impl ViRegisters {
    pub fn from_gfx_info(info: &GfxInfo) -> Self {
        Self {
            status: info.VI_STATUS_REG,
            origin: info.VI_ORIGIN_REG,
            width: info.VI_WIDTH_REG,
            intr: info.VI_INTR_REG,
            current_line: info.VI_V_CURRENT_LINE_REG,
            timing: info.VI_TIMING_REG,
            v_sync: info.VI_V_SYNC_REG,
            h_sync: info.VI_H_SYNC_REG,
            leap: info.VI_LEAP_REG,
            h_start: info.VI_H_START_REG,
            v_start: info.VI_V_START_REG,
            v_burst: info.VI_V_BURST_REG,
            x_scale: info.VI_X_SCALE_REG,
            y_scale: info.VI_Y_SCALE_REG,
        }
    }

    pub fn get(&self, register: ViRegister) -> *mut c_uint {
        match register {
            ViRegister::Status => self.status,
            ViRegister::Origin => self.origin,
            ViRegister::Width => self.width,
            ViRegister::Intr => self.intr,
            ViRegister::CurrentLine => self.current_line,
            ViRegister::Timing => self.timing,
            ViRegister::VSync => self.v_sync,
            ViRegister::HSync => self.h_sync,
            ViRegister::Leap => self.leap,
            ViRegister::HStart => self.h_start,
            ViRegister::VStart => self.v_start,
            ViRegister::VBurst => self.v_burst,
            ViRegister::XScale => self.x_scale,
            ViRegister::YScale => self.y_scale,
        }
    }

    /// Name of the first null register, if any.
    pub(crate) fn first_missing(&self) -> Option<&'static str> {
        [
            ("VI_STATUS_REG", self.status),
            ("VI_ORIGIN_REG", self.origin),
            ("VI_WIDTH_REG", self.width),
            ("VI_INTR_REG", self.intr),
            ("VI_V_CURRENT_LINE_REG", self.current_line),
            ("VI_TIMING_REG", self.timing),
            ("VI_V_SYNC_REG", self.v_sync),
            ("VI_H_SYNC_REG", self.h_sync),
            ("VI_LEAP_REG", self.leap),
            ("VI_H_START_REG", self.h_start),
            ("VI_V_START_REG", self.v_start),
            ("VI_V_BURST_REG", self.v_burst),
            ("VI_X_SCALE_REG", self.x_scale),
            ("VI_Y_SCALE_REG", self.y_scale),
        ]
        .into_iter()
        .find(|(_, ptr)| ptr.is_null())
        .map(|(name, _)| name)
    }
}
