//! `remove` command.

use std::fs;
use std::path::Path;

use crate::error::{PicflipError, Result};
use crate::image::background::{BackgroundRemover, select_remover};
use crate::logger::{PendingLine, status_error, status_success};

/// Remove the background of `input` and save the result to `output`.
///
/// Failures are printed and swallowed; the process still exits 0.
pub fn remove_background(input: &Path, output: &Path, model: Option<&Path>) {
    let result =
        select_remover(model).map_err(PicflipError::from).and_then(|mut remover| {
            remove_with(remover.as_mut(), input, output)
        });

    match result {
        Ok(()) => status_success(&format!(
            "Background removed! It's at {}",
            output.display()
        )),
        Err(e) => status_error(&format!("Couldn't remove background: {e}")),
    }
}

/// Read → remove → decode → save, with the given backend.
///
/// The saved format follows the extension of `output`.
pub fn remove_with(
    remover: &mut dyn BackgroundRemover,
    input: &Path,
    output: &Path,
) -> Result<()> {
    let data = fs::read(input).map_err(|e| PicflipError::io(input, e))?;
    crate::debug!("remove"; "read {} bytes from {}", data.len(), input.display());

    let pending = PendingLine::new("remove", &format!("running {}", remover.name()));
    let removed = remover.remove(&data);
    pending.clear();
    let removed = removed?;

    let img = image::load_from_memory(&removed)?;
    img.save(output)?;
    Ok(())
}
