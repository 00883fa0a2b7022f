//! Glyph set definition: which syllables to export and under which names.

use std::fmt;

use thiserror::Error;

/// Syllables used by the e-paper firmware, paired with their output identifiers.
pub const DEFAULT_GLYPHS: &[(char, &str)] = &[
    ('강', "gang"),
    ('남', "nam"),
    ('고', "go"),
    ('석', "sok"),
    ('터', "to"),
    ('미', "mi"),
    ('널', "nol"),
    ('서', "seo"),
    ('초', "cho"),
    ('부', "bu"),
    ('호', "ho"),
    ('선', "son"),
];

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum GlyphMapError {
    #[error("glyph {0:?} is listed more than once")]
    DuplicateCharacter(char),
    #[error("identifier {0:?} is used by more than one glyph")]
    DuplicateIdentifier(String),
    #[error("identifier {0:?} is not a valid C identifier")]
    InvalidIdentifier(String),
    #[error("glyph definition {0:?} must look like <char>=<identifier>")]
    MalformedPair(String),
}

/// One exported glyph.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GlyphEntry {
    pub character: char,
    /// Base name for output files and the generated `<id>_bits` symbols.
    pub identifier: String,
}

impl GlyphEntry {
    pub fn new(character: char, identifier: impl Into<String>) -> Result<Self, GlyphMapError> {
        let identifier = identifier.into();
        if !is_c_identifier(&identifier) {
            return Err(GlyphMapError::InvalidIdentifier(identifier));
        }
        Ok(Self {
            character,
            identifier,
        })
    }

    /// Parses `강=gang`.
    pub fn parse(definition: &str) -> Result<Self, GlyphMapError> {
        let malformed = || GlyphMapError::MalformedPair(definition.to_owned());

        let (glyph, identifier) = definition.split_once('=').ok_or_else(malformed)?;
        let mut chars = glyph.trim().chars();
        let (Some(character), None) = (chars.next(), chars.next()) else {
            return Err(malformed());
        };

        Self::new(character, identifier.trim())
    }
}

impl fmt::Display for GlyphEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.character, self.identifier)
    }
}

/// Ordered, immutable glyph set.
///
/// Characters and identifiers are both unique.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GlyphMap {
    entries: Vec<GlyphEntry>,
}

impl GlyphMap {
    pub fn new(entries: Vec<GlyphEntry>) -> Result<Self, GlyphMapError> {
        for (i, entry) in entries.iter().enumerate() {
            let earlier = &entries[..i];
            if earlier.iter().any(|e| e.character == entry.character) {
                return Err(GlyphMapError::DuplicateCharacter(entry.character));
            }
            if earlier.iter().any(|e| e.identifier == entry.identifier) {
                return Err(GlyphMapError::DuplicateIdentifier(entry.identifier.clone()));
            }
        }

        Ok(Self { entries })
    }

    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (char, &'a str)>,
    ) -> Result<Self, GlyphMapError> {
        let entries = pairs
            .into_iter()
            .map(|(character, identifier)| GlyphEntry::new(character, identifier))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    /// The glyph set the firmware ships with.
    pub fn builtin() -> Self {
        Self {
            entries: DEFAULT_GLYPHS
                .iter()
                .map(|&(character, identifier)| GlyphEntry {
                    character,
                    identifier: identifier.to_owned(),
                })
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &GlyphEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, character: char) -> Option<&GlyphEntry> {
        self.entries.iter().find(|e| e.character == character)
    }
}

impl<'a> IntoIterator for &'a GlyphMap {
    type Item = &'a GlyphEntry;
    type IntoIter = std::slice::Iter<'a, GlyphEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_c_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    let Some(first) = bytes.next() else {
        return false;
    };

    (first.is_ascii_alphabetic() || first == b'_')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
