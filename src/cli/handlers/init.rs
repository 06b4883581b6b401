use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::config_io::atomic_write;
use crate::model::DEMO_CONFIG;

/// Write the demo config as a starting point.
pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    write_template(&args.path, args.force)?;
    println!("Wrote {}", args.path.display());
    Ok(())
}

fn write_template(path: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() && !force {
        return Err(format!("{} already exists (use --force to overwrite)", path.display()).into());
    }
    atomic_write(path, DEMO_CONFIG.as_bytes())
        .map_err(|e| format!("could not write {}: {}", path.display(), e))?;
    tracing::info!(path = %path.display(), "wrote config template");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("picker.toml");
        fs::write(&path, "# mine\n").unwrap();

        let err = write_template(&path, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\n");

        write_template(&path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), DEMO_CONFIG);
    }
}
