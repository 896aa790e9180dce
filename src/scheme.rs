//! Identifier schemes and their textual decomposition
//!
//! Every identifier is classified exactly once into a [`Scheme`] when it is
//! parsed. The decomposition helpers below operate on the textual form:
//!
//! | Scheme | Form |
//! |--------|------|
//! | Plain | `file:<uri>` or a bare native path |
//! | Archive | `jar:<inner-uri>!<entry-path>` |
//! | RuntimeImage | `jrt:/<module>/<resource>` or `jrt:/<resource>` |

use crate::error::{ReslocError, ReslocResult};
use crate::names::{EXTENSION_IDENTIFIER, SEPARATOR};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

/// Separator between an archive location and the entry inside it
pub const ARCHIVE_ENTRY_SEPARATOR: char = '!';

/// Prefix of every canonical runtime-image URI
pub const RUNTIME_IMAGE_PREFIX: &str = "jrt:/";

const ARCHIVE_PREFIX: &str = "jar:";

/// Resolution strategy required by an identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Native filesystem path (`file:` or no scheme at all)
    Plain,
    /// Entry inside a zip/jar archive (`jar:`)
    Archive,
    /// Entry inside a linked runtime image (`jrt:`)
    RuntimeImage,
    /// Anything else; resolution fails
    Unsupported(String),
}

impl Scheme {
    fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "file" => Self::Plain,
            "jar" => Self::Archive,
            "jrt" => Self::RuntimeImage,
            other => Self::Unsupported(other.to_string()),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Plain => "file",
            Self::Archive => "jar",
            Self::RuntimeImage => "jrt",
            Self::Unsupported(name) => name.as_str(),
        };
        write!(f, "{}", name)
    }
}

/// A parsed resource identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    text: String,
    scheme: Scheme,
    url: Option<Url>,
}

impl Identifier {
    /// Parse an identifier, classifying its scheme.
    ///
    /// Text with a scheme prefix must be a valid URI. Text without one is
    /// taken as a native path. The trimmed text is kept as given; the parsed
    /// URI only decides the scheme and the native path of `file:` URIs.
    pub fn parse(text: &str) -> ReslocResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ReslocError::invalid_argument("identifier must not be blank"));
        }

        if scheme_prefix(trimmed).is_none() {
            return Ok(Self {
                text: trimmed.to_string(),
                scheme: Scheme::Plain,
                url: None,
            });
        }

        let url = Url::parse(trimmed).map_err(|source| ReslocError::MalformedIdentifier {
            identifier: trimmed.to_string(),
            source,
        })?;

        Ok(Self {
            text: trimmed.to_string(),
            scheme: Scheme::from_name(url.scheme()),
            url: Some(url),
        })
    }

    /// Textual form of the identifier
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Scheme the identifier was classified into
    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Native path named by a plain identifier
    pub fn native_path(&self) -> ReslocResult<PathBuf> {
        match (&self.scheme, &self.url) {
            (Scheme::Plain, None) => Ok(PathBuf::from(&self.text)),
            (Scheme::Plain, Some(url)) => file_url_to_path(url),
            (scheme, _) => Err(ReslocError::invalid_argument(format!(
                "{} identifier does not name a native path",
                scheme
            ))),
        }
    }

    /// Native path of the archive backing an archive identifier
    pub fn archive_path(&self) -> ReslocResult<PathBuf> {
        if self.scheme != Scheme::Archive {
            return Err(ReslocError::invalid_argument(format!(
                "{} identifier does not name an archive",
                self.scheme
            )));
        }

        let inner = decompose_archive_path(&self.text);
        let url = Url::parse(inner).map_err(|source| ReslocError::MalformedIdentifier {
            identifier: self.text.clone(),
            source,
        })?;

        match Scheme::from_name(url.scheme()) {
            Scheme::Plain => file_url_to_path(&url),
            _ => Err(ReslocError::UnsupportedScheme(url.scheme().to_string())),
        }
    }
}

impl FromStr for Identifier {
    type Err = ReslocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Scheme name at the start of `text`, if it has one.
///
/// Single letters are drive prefixes (`C:\`), not schemes.
fn scheme_prefix(text: &str) -> Option<&str> {
    let colon = text.find(':')?;
    let candidate = &text[..colon];
    if candidate.len() < 2 || !candidate.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }

    candidate
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        .then_some(candidate)
}

fn file_url_to_path(url: &Url) -> ReslocResult<PathBuf> {
    url.to_file_path()
        .map_err(|_| ReslocError::InvalidFileUri(url.to_string()))
}

/// Join an archive URI and an entry path into an archive identifier
pub fn compose_archive_identifier(archive_uri: &str, entry: &str) -> String {
    format!(
        "{}{}{}{}",
        ARCHIVE_PREFIX, archive_uri, ARCHIVE_ENTRY_SEPARATOR, entry
    )
}

/// Entry path of an archive identifier.
///
/// Everything after the last `!`; the archive root `/` when the marker is
/// absent or nothing follows it.
pub fn decompose_archive_location(identifier: &str) -> String {
    match identifier.rfind(ARCHIVE_ENTRY_SEPARATOR) {
        Some(idx) if idx + 1 < identifier.len() => identifier[idx + 1..].to_string(),
        _ => SEPARATOR.to_string(),
    }
}

/// Inner archive URI of an archive identifier (`jar:` prefix and entry removed)
pub fn decompose_archive_path(identifier: &str) -> &str {
    let inner = match identifier.get(..ARCHIVE_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(ARCHIVE_PREFIX) => {
            &identifier[ARCHIVE_PREFIX.len()..]
        }
        _ => identifier,
    };

    let end = inner
        .find("!/")
        .or_else(|| inner.rfind(ARCHIVE_ENTRY_SEPARATOR))
        .unwrap_or(inner.len());
    &inner[..end]
}

/// Decomposed runtime-image identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeImageInfo {
    resource: String,
    module_name: Option<String>,
}

impl RuntimeImageInfo {
    pub fn new(resource: impl Into<String>, module_name: Option<String>) -> Self {
        Self {
            resource: resource.into(),
            module_name,
        }
    }

    /// Resource path inside the module; may be empty
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Module name, when the identifier carried one
    pub fn module_name(&self) -> Option<&str> {
        self.module_name.as_deref()
    }
}

/// Split a runtime-image identifier into module name and resource path.
///
/// The second `/`-separated section is a module name when it is non-blank
/// and either has no `.` in it or is followed by more sections; otherwise
/// it is the start of the resource path. A dot-free resource without a
/// module (`jrt:/README`) is therefore read as a module name with an empty
/// resource.
pub fn decompose_runtime_image(identifier: &str) -> RuntimeImageInfo {
    let mut sections: Vec<&str> = identifier.split(SEPARATOR).collect();
    while sections.last().is_some_and(|section| section.is_empty()) {
        sections.pop();
    }

    let has_more = sections.len() > 2;
    let module_name = sections
        .get(1)
        .filter(|section| !section.trim().is_empty())
        .filter(|section| has_more || !section.contains(EXTENSION_IDENTIFIER))
        .map(|section| section.to_string());

    let from = if module_name.is_some() { 2 } else { 1 };
    let resource = sections
        .get(from..)
        .map(|rest| rest.join(&SEPARATOR.to_string()))
        .unwrap_or_default();

    RuntimeImageInfo::new(resource, module_name)
}

/// Rebuild the canonical `jrt:/` URI for decomposed parts
pub fn reconstruct_runtime_image_uri(info: &RuntimeImageInfo) -> String {
    let mut uri = RUNTIME_IMAGE_PREFIX.to_string();
    let resource = info.resource();
    let has_resource = !resource.trim().is_empty();

    if let Some(module) = info.module_name() {
        uri.push_str(module);
        if has_resource && !resource.starts_with(SEPARATOR) {
            uri.push(SEPARATOR);
        }
    }

    if has_resource {
        uri.push_str(resource);
    }
    uri
}
