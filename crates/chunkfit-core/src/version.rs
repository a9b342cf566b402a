//! Library version accessors.

/// Major version of the allocator's public contract.
pub const VERSION_MAJOR: u32 = 0;

/// Minor version of the allocator's public contract.
pub const VERSION_MINOR: u32 = 1;

/// Packed version: major in the high byte, minor in the low byte.
pub const VERSION: u32 = (VERSION_MAJOR << 8) | VERSION_MINOR;

/// Major version number.
pub const fn major() -> u32 {
    VERSION_MAJOR
}

/// Minor version number.
pub const fn minor() -> u32 {
    VERSION_MINOR
}

/// Packed version number, `(major << 8) | minor`.
pub const fn version() -> u32 {
    VERSION
}
