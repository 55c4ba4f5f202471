//! Assembly identity for cross-assembly reference resolution.
//!
//! Referenced types live in other binaries, and the resolver keys its per-assembly lazy
//! loaders by the identity of the assembly that defines them. An identity combines the
//! simple name, the four-part version, the optional culture, and the optional public key
//! token, mirroring the ECMA-335 Assembly/AssemblyRef identity components.
//!
//! # Equality Semantics
//!
//! The [`public_key_token`](AssemblyIdentity::public_key_token) field is **excluded** from
//! equality comparison and hashing. Assemblies referenced with different strong-name
//! representations must still resolve to the same lazy loader, so two identities are equal
//! if and only if their `name`, `version`, and `culture` fields are equal. Compare the
//! token directly if strong-name verification is required.

use std::{
    fmt,
    fmt::Write as _,
    hash::{Hash, Hasher},
    str::FromStr,
};

use crate::{Error, Result};

/// Four-part assembly version number (major.minor.build.revision).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AssemblyVersion {
    /// Major version component
    pub major: u16,
    /// Minor version component
    pub minor: u16,
    /// Build number component
    pub build: u16,
    /// Revision number component
    pub revision: u16,
}

impl AssemblyVersion {
    /// Create a new version from its four components.
    #[must_use]
    pub fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        AssemblyVersion {
            major,
            minor,
            build,
            revision,
        }
    }
}

impl fmt::Display for AssemblyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

impl FromStr for AssemblyVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut components = [0u16; 4];
        let mut count = 0;

        for part in s.split('.') {
            if count >= 4 {
                return Err(malformed_error!(
                    "Version has more than four components: {}",
                    s
                ));
            }
            components[count] = part.parse::<u16>().map_err(|_| {
                malformed_error!("Invalid version component '{}' in '{}'", part, s)
            })?;
            count += 1;
        }

        Ok(AssemblyVersion {
            major: components[0],
            minor: components[1],
            build: components[2],
            revision: components[3],
        })
    }
}

/// Identity of a .NET assembly: simple name, version, culture, and public key token.
///
/// Used as the cache key for the resolver's per-assembly lazy loaders and as the handle
/// passed to the [`AssemblyLocator`](crate::resolver::AssemblyLocator) collaborator.
#[derive(Debug, Clone)]
pub struct AssemblyIdentity {
    /// Simple assembly name (e.g., "mscorlib", "System.Core")
    pub name: String,
    /// Four-part version number
    pub version: AssemblyVersion,
    /// Localization culture; `None` for culture-neutral assemblies
    pub culture: Option<String>,
    /// Strong-name public key token; excluded from equality and hashing
    pub public_key_token: Option<[u8; 8]>,
}

impl AssemblyIdentity {
    /// Create a new identity from its components.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        version: AssemblyVersion,
        culture: Option<String>,
        public_key_token: Option<[u8; 8]>,
    ) -> Self {
        AssemblyIdentity {
            name: name.into(),
            version,
            culture,
            public_key_token,
        }
    }

    /// Create a culture-neutral identity with only a name and version, no strong name.
    #[must_use]
    pub fn simple(name: impl Into<String>, version: AssemblyVersion) -> Self {
        AssemblyIdentity::new(name, version, None, None)
    }

    /// Compose the display name (`Name, Version=1.2.3.4, Culture=neutral, PublicKeyToken=…`).
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut result = String::new();
        write!(result, "{}, Version={}", self.name, self.version).ok();
        write!(
            result,
            ", Culture={}",
            self.culture.as_deref().unwrap_or("neutral")
        )
        .ok();
        if let Some(token) = &self.public_key_token {
            result.push_str(", PublicKeyToken=");
            for byte in token {
                write!(result, "{byte:02x}").ok();
            }
        }
        result
    }

    /// Parse an identity from its display-name form.
    ///
    /// Accepts the comma-separated `Key=Value` syntax produced by [`display_name`]
    /// (`Self::display_name`). The simple name is required; every other component is
    /// optional and defaults to a zero version, neutral culture, and no token.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] for an empty name, an invalid version component, an
    /// unknown key, or a token that is not exactly 16 hex digits (or `null`).
    pub fn parse(display_name: &str) -> Result<Self> {
        let mut parts = display_name.split(',');

        let name = parts
            .next()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| malformed_error!("Assembly display name is empty"))?;

        let mut version = AssemblyVersion::default();
        let mut culture = None;
        let mut public_key_token = None;

        for part in parts {
            let (key, value) = part.split_once('=').ok_or_else(|| {
                malformed_error!("Malformed component '{}' in '{}'", part, display_name)
            })?;
            let value = value.trim();

            match key.trim() {
                "Version" => version = value.parse()?,
                "Culture" => {
                    if !value.eq_ignore_ascii_case("neutral") {
                        culture = Some(value.to_string());
                    }
                }
                "PublicKeyToken" => {
                    if !value.eq_ignore_ascii_case("null") {
                        public_key_token = Some(parse_token(value)?);
                    }
                }
                other => {
                    return Err(malformed_error!(
                        "Unknown component '{}' in '{}'",
                        other,
                        display_name
                    ))
                }
            }
        }

        Ok(AssemblyIdentity {
            name: name.to_string(),
            version,
            culture,
            public_key_token,
        })
    }
}

fn parse_token(value: &str) -> Result<[u8; 8]> {
    if value.len() != 16 || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(malformed_error!("Invalid public key token '{}'", value));
    }

    fn nibble(digit: u8) -> u8 {
        match digit {
            b'0'..=b'9' => digit - b'0',
            b'a'..=b'f' => digit - b'a' + 10,
            _ => digit - b'A' + 10,
        }
    }

    let mut token = [0u8; 8];
    for (index, chunk) in value.as_bytes().chunks_exact(2).enumerate() {
        token[index] = (nibble(chunk[0]) << 4) | nibble(chunk[1]);
    }
    Ok(token)
}

impl PartialEq for AssemblyIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.version == other.version && self.culture == other.culture
    }
}

impl Eq for AssemblyIdentity {}

impl Hash for AssemblyIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.version.hash(state);
        self.culture.hash(state);
    }
}

impl fmt::Display for AssemblyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}
