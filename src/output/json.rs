use anyhow::Result;
use serde::Serialize;
use std::path::Path;

pub fn output_json<T: Serialize + ?Sized>(value: &T, output_file: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    crate::io::write_output(&json, output_file)?;
    Ok(())
}
