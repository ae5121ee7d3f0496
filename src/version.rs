use crate::settings::Settings;
use std::process::Command;

/// Commit of the working directory, if git can tell.
pub fn commit_hash() -> Option<String> {
    let output = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!hash.is_empty()).then_some(hash)
}

pub fn version_line(settings: &Settings, commit: Option<&str>) -> String {
    format!("Scaffold version {}, commit hash {}", settings.version, commit.unwrap_or("unknown"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line() {
        let settings = Settings { version: "1.0.0".to_string(), ..Settings::default() };
        assert_eq!(
            version_line(&settings, Some("abc123")),
            "Scaffold version 1.0.0, commit hash abc123"
        );
        assert_eq!(version_line(&settings, None), "Scaffold version 1.0.0, commit hash unknown");
    }
}
