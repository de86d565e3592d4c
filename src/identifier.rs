//! Feed identifiers
//!
//! Every feed carries a URN-form version-4 UUID of the shape
//! `urn:uuid:XXXXXXXX-XXXX-4XXX-8XXX-XXXXXXXXXXXX`. The variant nibble is
//! pinned to `8` for normal feeds. A feed rendered without italics shares
//! the identifier of its normal sibling except for a variant nibble of `9`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use uuid::Uuid;

/// Literal prefix of every feed identifier.
pub const URN_PREFIX: &str = "urn:uuid:";

/// Total length of a feed identifier including the prefix.
pub const IDENTIFIER_LEN: usize = 45;

/// File-name marker that selects the no-italics identifier.
pub const NOITALICS_MARKER: &str = "noitalics";

// Offsets into the full identifier string.
const VERSION_INDEX: usize = 23;
const VARIANT_INDEX: usize = 28;

static UUID_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)[0-9a-f]{8}-([0-9a-f]{4}-){3}[0-9a-f]{12}$").expect("static regex")
});

/// The grammar rule an identifier failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierRule {
    Length,
    Prefix,
    Grammar,
    Version,
    Variant,
}

impl fmt::Display for IdentifierRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IdentifierRule::Length => "must be exactly 45 characters",
            IdentifierRule::Prefix => "must start with 'urn:uuid:'",
            IdentifierRule::Grammar => "must be a hyphenated hexadecimal UUID after the prefix",
            IdentifierRule::Version => "version nibble must be '4'",
            IdentifierRule::Variant => "variant nibble must be '8'",
        };
        f.write_str(text)
    }
}

/// An identifier that failed validation, with the first rule it broke.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid identifier '{identifier}': {rule}")]
pub struct IdentifierError {
    pub identifier: String,
    pub rule: IdentifierRule,
}

/// Check `identifier` against the feed identifier grammar.
///
/// Rules are applied in order and the first failure is reported.
pub fn validate(identifier: &str) -> Result<(), IdentifierError> {
    let fail = |rule| {
        Err(IdentifierError {
            identifier: identifier.to_string(),
            rule,
        })
    };

    if identifier.chars().count() != IDENTIFIER_LEN {
        return fail(IdentifierRule::Length);
    }
    let Some(body) = identifier.strip_prefix(URN_PREFIX) else {
        return fail(IdentifierRule::Prefix);
    };
    if !UUID_BODY.is_match(body) {
        return fail(IdentifierRule::Grammar);
    }
    // The grammar check guarantees ASCII, so byte offsets are char offsets.
    let bytes = identifier.as_bytes();
    if bytes[VERSION_INDEX] != b'4' {
        return fail(IdentifierRule::Version);
    }
    if bytes[VARIANT_INDEX] != b'8' {
        return fail(IdentifierRule::Variant);
    }
    Ok(())
}

/// A validated feed identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedId(String);

impl FeedId {
    /// Validate and wrap `identifier`.
    pub fn parse(identifier: &str) -> Result<Self, IdentifierError> {
        validate(identifier)?;
        Ok(FeedId(identifier.to_string()))
    }

    /// Draw a fresh random identifier.
    pub fn generate() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Build an identifier from sixteen random bytes.
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self::from_uuid(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    fn from_uuid(uuid: Uuid) -> Self {
        // RFC 4122 variants span 8..b; this catalog pins the nibble to 8.
        let mut text = format!("{}{}", URN_PREFIX, uuid.hyphenated());
        text.replace_range(VARIANT_INDEX..VARIANT_INDEX + 1, "8");
        FeedId(text)
    }

    /// The sibling identifier for the no-italics rendering of the same feed.
    ///
    /// Only the variant nibble changes, from `8` to `9`.
    pub fn noitalics(&self) -> Self {
        let mut text = self.0.clone();
        text.replace_range(VARIANT_INDEX..VARIANT_INDEX + 1, "9");
        FeedId(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
