//! Platform and privilege preconditions.

use crate::{
    constants::SUPPORTED_OS,
    error::{MirrorlistError, Result},
};

/// Fails unless `os` is the operating system family pacman runs on.
pub fn require_platform(os: &str) -> Result<()> {
    if os == SUPPORTED_OS {
        Ok(())
    } else {
        Err(MirrorlistError::Platform {
            os: os.to_string(),
        })
    }
}

/// Fails unless `is_root` holds.
pub fn require_root(is_root: bool) -> Result<()> {
    if is_root {
        Ok(())
    } else {
        Err(MirrorlistError::Privilege)
    }
}

#[cfg(unix)]
fn running_as_root() -> bool {
    nix::unistd::geteuid().is_root()
}

#[cfg(not(unix))]
fn running_as_root() -> bool {
    false
}

/// Checks that the current process may rewrite the mirrorlist.
///
/// The platform is checked before privileges, and both before any network
/// activity.
pub fn preflight() -> Result<()> {
    require_platform(std::env::consts::OS)?;
    require_root(running_as_root())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_platform() {
        assert!(require_platform("linux").is_ok());

        for os in ["macos", "windows", "freebsd", "Linux"] {
            match require_platform(os) {
                Err(MirrorlistError::Platform {
                    os: reported,
                }) => assert_eq!(reported, os),
                other => panic!("expected platform error for {os}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_require_root() {
        assert!(require_root(true).is_ok());
        assert!(matches!(
            require_root(false),
            Err(MirrorlistError::Privilege)
        ));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_preflight_matches_euid() {
        let result = preflight();
        if nix::unistd::geteuid().is_root() {
            assert!(result.is_ok());
        } else {
            assert!(matches!(result, Err(MirrorlistError::Privilege)));
        }
    }
}
