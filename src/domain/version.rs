use crate::domain::natural::natural_cmp_opt;
use crate::error::{MinVerError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The version calculated by MinVer.
///
/// Parsed from the last line MinVer writes to standard output, e.g.
/// `5.0.1-alpha.0.8` or `1.2.3-alpha.4+abcdefg`. The original text is kept in
/// `raw` and is what [`fmt::Display`] prints.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinVerVersion {
    raw: String,
    major: u32,
    minor: u32,
    patch: u32,
    pre_release: Option<String>,
    build_metadata: Option<String>,
}

impl MinVerVersion {
    /// Parse a version string of the form `major.minor.patch[-pre][+meta]`.
    ///
    /// The first `+` separates build metadata and the first `-` before it
    /// separates the pre-release, both kept verbatim. The numeric core must be
    /// exactly three dot-separated unsigned decimal integers.
    ///
    /// # Arguments
    /// * `text` - Version string to parse
    ///
    /// # Returns
    /// * `Ok(MinVerVersion)` - Successfully parsed version
    /// * `Err(MinVerError::Version)` - If the text is blank or malformed
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(invalid(text));
        }

        let (rest, build_metadata) = match text.split_once('+') {
            Some((rest, meta)) => (rest, Some(meta.to_string())),
            None => (text, None),
        };
        let (core, pre_release) = match rest.split_once('-') {
            Some((core, pre)) => (core, Some(pre.to_string())),
            None => (rest, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(invalid(text));
        }

        let major = parse_component(parts[0]).ok_or_else(|| invalid(text))?;
        let minor = parse_component(parts[1]).ok_or_else(|| invalid(text))?;
        let patch = parse_component(parts[2]).ok_or_else(|| invalid(text))?;

        Ok(MinVerVersion {
            raw: text.to_string(),
            major,
            minor,
            patch,
            pre_release,
            build_metadata,
        })
    }

    /// Parse the version from the captured standard output of a MinVer run.
    ///
    /// MinVer prints diagnostics first and the calculated version last, so the
    /// last non-blank line is taken (surrounding whitespace removed).
    pub fn from_output<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let last = lines
            .iter()
            .map(|line| line.as_ref().trim())
            .rev()
            .find(|line| !line.is_empty())
            .unwrap_or("");

        Self::parse(last)
    }

    /// The original, non-normalized version string
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn patch(&self) -> u32 {
        self.patch
    }

    /// The pre-release extension (text after the first `-`)
    pub fn pre_release(&self) -> Option<&str> {
        self.pre_release.as_deref()
    }

    /// The build metadata extension (text after the first `+`)
    pub fn build_metadata(&self) -> Option<&str> {
        self.build_metadata.as_deref()
    }

    /// `true` when the pre-release extension is present and non-empty
    pub fn is_pre_release(&self) -> bool {
        self.pre_release.as_deref().is_some_and(|pre| !pre.is_empty())
    }

    /// `{major}.0.0.0`
    pub fn assembly_version(&self) -> String {
        format!("{}.0.0.0", self.major)
    }

    /// `{major}.{minor}.{patch}.0`
    pub fn file_version(&self) -> String {
        format!("{}.{}.{}.0", self.major, self.minor, self.patch)
    }

    /// Same as [`MinVerVersion::raw`]
    pub fn informational_version(&self) -> &str {
        &self.raw
    }

    /// Same as [`MinVerVersion::raw`]
    pub fn package_version(&self) -> &str {
        &self.raw
    }

    /// Convert to a [`semver::Version`].
    ///
    /// Fails when the pre-release or build metadata are not valid SemVer 2.0
    /// identifiers (MinVer itself never emits such versions).
    pub fn to_semver(&self) -> Result<semver::Version> {
        let pre = match self.pre_release() {
            Some(pre) => semver::Prerelease::new(pre)
                .map_err(|e| MinVerError::version(format!("{}: {}", self.raw, e)))?,
            None => semver::Prerelease::EMPTY,
        };
        let build = match self.build_metadata() {
            Some(meta) => semver::BuildMetadata::new(meta)
                .map_err(|e| MinVerError::version(format!("{}: {}", self.raw, e)))?,
            None => semver::BuildMetadata::EMPTY,
        };

        Ok(semver::Version {
            major: u64::from(self.major),
            minor: u64::from(self.minor),
            patch: u64::from(self.patch),
            pre,
            build,
        })
    }
}

fn invalid(text: &str) -> MinVerError {
    MinVerError::version(format!("Version '{}' is not valid", text))
}

// Digits only: no sign, no whitespace, no leading zeros (so `raw` round-trips).
fn parse_component(component: &str) -> Option<u32> {
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if component.len() > 1 && component.starts_with('0') {
        return None;
    }
    component.parse().ok()
}

impl FromStr for MinVerVersion {
    type Err = MinVerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for MinVerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl Ord for MinVerVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
            .then_with(|| natural_cmp_opt(self.pre_release(), other.pre_release()))
            .then_with(|| natural_cmp_opt(self.build_metadata(), other.build_metadata()))
    }
}

impl PartialOrd for MinVerVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
