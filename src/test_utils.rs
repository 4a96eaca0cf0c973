#[cfg(test)]
pub mod fixtures {
    use std::fs;
    use tempfile::TempDir;

    /// Create a temp project. Entries are relative paths, optionally
    /// followed by `=content`; parent directories are created as needed.
    pub fn project_with(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for entry in files {
            let (name, content) = entry.split_once('=').unwrap_or((entry, ""));
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        dir
    }

    /// A runner base command that executes `script` with the selected
    /// targets available as `$@`.
    pub fn sh_runner(script: &str) -> Vec<String> {
        vec![
            "sh".to_string(),
            "-c".to_string(),
            script.to_string(),
            "sh".to_string(),
        ]
    }
}
