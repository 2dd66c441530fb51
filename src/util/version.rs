use semver::Version;
use thiserror::Error;

pub const APP_NAME: &str = "JapBase Motor de Preços";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_TAG: Option<&str> = option_env!("GIT_TAG");

/// The git tag when built from a tagged checkout, otherwise `v<crate version>`.
pub const VERSION_LABEL: &str = match GIT_TAG {
    Some(tag) => tag,
    None => concat!("v", env!("CARGO_PKG_VERSION")),
};

#[derive(Error, Debug)]
pub enum VersionError {
    #[error("invalid version format: {0}")]
    InvalidVersion(String),
}

pub fn parse_version_str(input: &str) -> Result<Version, VersionError> {
    let trimmed = input.trim().trim_start_matches(|ch| ch == 'v' || ch == 'V');
    Version::parse(trimmed).map_err(|err| VersionError::InvalidVersion(err.to_string()))
}

/// Version of this build: the git tag when built from a tagged checkout,
/// otherwise the crate version.
pub fn current_version() -> Result<Version, VersionError> {
    if let Some(tag) = GIT_TAG {
        return parse_version_str(tag);
    }

    parse_version_str(APP_VERSION)
}

pub fn version_label() -> String {
    VERSION_LABEL.to_string()
}
