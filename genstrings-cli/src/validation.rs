use std::path::Path;

/// Validate config file path exists and is a readable file
pub fn validate_config_path(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Config file does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Config path is not a file: {}", path.display()));
    }

    if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
        return Err(format!(
            "Unsupported config file: {}. Expected a .toml file",
            path.display()
        ));
    }

    Ok(())
}

/// Validate the project directory exists
pub fn validate_project_dir(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!(
            "Project directory does not exist: {}",
            path.display()
        ));
    }

    if !path.is_dir() {
        return Err(format!(
            "Project path is not a directory: {}",
            path.display()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_validate_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("genstrings.toml");
        fs::write(&config, "").unwrap();
        let other = dir.path().join("genstrings.yaml");
        fs::write(&other, "").unwrap();

        assert!(validate_config_path(&config).is_ok());
        assert!(validate_config_path(&other).is_err());
        assert!(validate_config_path(dir.path()).is_err());
        assert!(validate_config_path(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_validate_project_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "").unwrap();

        assert!(validate_project_dir(dir.path()).is_ok());
        assert!(validate_project_dir(&file).is_err());
        assert!(validate_project_dir(&dir.path().join("missing")).is_err());
    }
}
