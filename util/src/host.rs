//! Host platform (linux for example) utility functions

use std::env;
use std::path::PathBuf;

/// Name of the environment variable holding the software root directory.
pub const SW_ROOT_ENV_VAR: &str = "APPROACH_SW_ROOT";

/// Get the software root directory.
///
/// The root contains the `params` directory and is where session directories
/// are created.
pub fn get_sw_root() -> Result<PathBuf, env::VarError> {
    env::var(SW_ROOT_ENV_VAR).map(PathBuf::from)
}

/// Retrieve uname information about the machine the exec runs on.
pub fn get_uname() -> std::io::Result<uname::Info> {
    uname::uname()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_get_uname() {
        let info = get_uname().unwrap();
        assert!(!info.sysname.is_empty());
        assert!(!info.machine.is_empty());
    }
}
