use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

pub fn read_file(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Write `content`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, content)
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

pub fn read_stdin() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;
    Ok(input)
}

/// Write to `path` when given, otherwise to stdout.
pub fn write_output(content: &str, path: Option<&Path>) -> io::Result<()> {
    match path {
        Some(path) => {
            write_file(path, content)?;
            log::info!("Wrote output to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_output_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("report.json");

        write_output("{}", Some(&nested)).unwrap();

        assert!(file_exists(&nested));
        assert_eq!(read_file(&nested).unwrap(), "{}");
    }

    #[test]
    fn test_ensure_dir_accepts_empty_path() {
        assert!(ensure_dir(Path::new("")).is_ok());
    }
}
