//! Host identification captured once at startup

use std::ffi::CStr;

/// Operating system families with their own probing rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Linux,
    FreeBsd,
    OpenBsd,
    NetBsd,
    DragonFly,
    Other,
}

impl OsFamily {
    pub fn from_sysname(sysname: &str) -> Self {
        match sysname {
            "Linux" => OsFamily::Linux,
            "FreeBSD" | "GNU/kFreeBSD" => OsFamily::FreeBsd,
            "OpenBSD" => OsFamily::OpenBsd,
            "NetBSD" => OsFamily::NetBsd,
            "DragonFly" => OsFamily::DragonFly,
            _ => OsFamily::Other,
        }
    }

    pub fn is_bsd(self) -> bool {
        matches!(
            self,
            OsFamily::FreeBsd | OsFamily::OpenBsd | OsFamily::NetBsd | OsFamily::DragonFly
        )
    }
}

/// OS name, kernel release and machine architecture (`uname -srm`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostIdentity {
    pub os: String,
    pub kernel: String,
    pub machine: String,
}

impl HostIdentity {
    pub fn new(os: &str, kernel: &str, machine: &str) -> Self {
        HostIdentity {
            os: os.to_string(),
            kernel: kernel.to_string(),
            machine: machine.to_string(),
        }
    }

    /// Query the running kernel via `uname(2)`
    pub fn capture() -> Self {
        // SAFETY: utsname is plain old data and uname only writes into it.
        let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
        if unsafe { libc::uname(&mut uts) } != 0 {
            tracing::debug!(error = %std::io::Error::last_os_error(), "uname failed");
            return HostIdentity::new("Unknown", "", "");
        }

        let field = |raw: &[libc::c_char]| {
            // SAFETY: uname NUL-terminates every field it fills.
            unsafe { CStr::from_ptr(raw.as_ptr()) }
                .to_string_lossy()
                .into_owned()
        };

        HostIdentity {
            os: field(&uts.sysname),
            kernel: field(&uts.release),
            machine: field(&uts.machine),
        }
    }

    pub fn family(&self) -> OsFamily {
        OsFamily::from_sysname(&self.os)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bsd_detection_follows_sysname() {
        assert!(OsFamily::from_sysname("OpenBSD").is_bsd());
        assert!(OsFamily::from_sysname("DragonFly").is_bsd());
        assert!(!OsFamily::from_sysname("Linux").is_bsd());
        assert_eq!(OsFamily::from_sysname("Darwin"), OsFamily::Other);
    }

    #[test]
    fn capture_fills_os_name() {
        let host = HostIdentity::capture();
        assert!(!host.os.is_empty());
    }
}
