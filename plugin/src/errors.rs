use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    #[error("ROM name buffer holds {capacity} bytes, at least {} are required", crate::rom_name::MIN_NAME_CAPACITY)]
    InsufficientBuffer { capacity: usize },

    #[error("Host passed a null GFX_INFO")]
    MissingGfxInfo,

    #[error("Host passed a null pointer for GFX_INFO.{0}")]
    NullHostPointer(&'static str),

    #[error("No {kind} register with index {index}")]
    UnknownRegister { kind: &'static str, index: u32 },
}
