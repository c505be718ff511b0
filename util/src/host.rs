//! Host platform utility functions

use std::env;
use std::path::PathBuf;

/// Environment variable pointing at the software root directory.
pub const SW_ROOT_ENV_VAR: &str = "DIFFDRIVE_SIM_ROOT";

/// Retrieve the software root, the directory containing `params` and
/// `sessions`.
///
/// If `DIFFDRIVE_SIM_ROOT` isn't set the current working directory is used.
pub fn get_sw_root() -> std::io::Result<PathBuf> {
    match env::var_os(SW_ROOT_ENV_VAR) {
        Some(root) => Ok(PathBuf::from(root)),
        None => env::current_dir()
    }
}
