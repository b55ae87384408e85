use crate::error::{BumpError, Result};
use std::fmt;

/// A three-component version (major.minor.patch) kept in its written form.
///
/// Each component is a non-empty run of ASCII digits of any length. Major and
/// minor are never reinterpreted, so `01.02.3` keeps its leading zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    major: String,
    minor: String,
    patch: String,
}

impl Version {
    /// Parses a version string of exactly three dot-separated digit runs.
    ///
    /// # Returns
    /// * `Ok(Version)` - Successfully parsed version
    /// * `Err(BumpError::Version)` - Wrong component count or a non-digit component
    pub fn parse(version: &str) -> Result<Self> {
        let parts: Vec<&str> = version.split('.').collect();
        if parts.len() != 3 {
            return Err(BumpError::version(format!(
                "Version {} does not follow major.minor.patch format",
                version
            )));
        }

        let component = |name: &str, raw: &str| {
            if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
                Ok(raw.to_string())
            } else {
                Err(BumpError::version(format!(
                    "Invalid {} version component: '{}'",
                    name, raw
                )))
            }
        };

        Ok(Version {
            major: component("major", parts[0])?,
            minor: component("minor", parts[1])?,
            patch: component("patch", parts[2])?,
        })
    }

    pub fn major(&self) -> &str {
        &self.major
    }

    pub fn minor(&self) -> &str {
        &self.minor
    }

    pub fn patch(&self) -> &str {
        &self.patch
    }

    /// Returns the next patch release; major and minor are copied as written.
    ///
    /// The patch is incremented as a decimal string, so there is no upper
    /// bound. Leading zeros on the patch are dropped (`007` becomes `8`).
    pub fn bump_patch(&self) -> Self {
        Version {
            major: self.major.clone(),
            minor: self.minor.clone(),
            patch: increment_digits(&self.patch),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Adds one to a string of ASCII digits.
fn increment_digits(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    let mut bytes: Vec<u8> = trimmed.bytes().collect();

    let mut carry = true;
    for b in bytes.iter_mut().rev() {
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            carry = false;
            break;
        }
    }
    if carry {
        bytes.insert(0, b'1');
    }

    bytes.into_iter().map(char::from).collect()
}

/// Increments the patch component of a version string.
///
/// # Example
/// ```
/// # use bump_version::version::increment;
/// assert_eq!(increment("1.2.3").unwrap(), "1.2.4");
/// assert!(increment("1.2").is_err());
/// ```
pub fn increment(version: &str) -> Result<String> {
    Ok(Version::parse(version)?.bump_patch().to_string())
}
