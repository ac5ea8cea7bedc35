//! Host platform gate.
//!
//! The runtime is bundled with the MSVC archiver and the compiler embeds a
//! Windows-only runtime library, so only the Windows family is accepted.

use crate::error::PlatformUnsupported;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Platform {
    os: String,
    arch: String,
}

impl Platform {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    pub fn host() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }

    pub fn is_supported(&self) -> bool {
        self.os == "windows"
    }

    /// Directory name under `bin_include/` holding this platform's binaries.
    pub fn tag(&self) -> Option<&'static str> {
        self.is_supported().then_some("win64")
    }

    /// System libraries the runtime's static library needs at link time.
    ///
    /// Taken from `rustc --crate-type=staticlib --print=native-static-libs`
    /// for the runtime crate. If the runtime gains dependencies this list has
    /// to be regenerated, otherwise the compiler's link step ends up with
    /// unresolved symbols.
    pub fn system_libraries(&self) -> &'static [&'static str] {
        if self.is_supported() {
            WIN64_SYSTEM_LIBRARIES
        } else {
            &[]
        }
    }

    pub fn ensure_supported(&self) -> Result<(), PlatformUnsupported> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(PlatformUnsupported {
                os: self.os.clone(),
                arch: self.arch.clone(),
            })
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

const WIN64_SYSTEM_LIBRARIES: &[&str] = &[
    "kernel32.lib",
    "advapi32.lib",
    "bcrypt.lib",
    "ntdll.lib",
    "userenv.lib",
    "ws2_32.lib",
    "msvcrt.lib",
];
