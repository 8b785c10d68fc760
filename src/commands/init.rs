use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# Lazymeter Configuration

[history]
# path = "~/.claude/history.jsonl"

[storage]
# database = "/path/to/scores.db"
retention_days = 365

[report]
days = 30
shame_limit = 5
fame_limit = 5
preview_chars = 80
session_gap_minutes = 30
max_session_positions = 15

# Replace the phrases of a signal family:
# [patterns.hedge]
# patterns = ["maybe", "perhaps", "i think"]
"#;

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");
    Ok(())
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    Ok(config_path)
}
