pub mod check;
pub mod doctor;
pub mod edit;
pub mod inspect;
pub mod render;
pub mod scan;
pub mod split;

use color_eyre::eyre::{Result, WrapErr};
use std::fs;
use std::path::Path;

pub(crate) fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))
}
