use crate::index::reader::IndexError;
use crate::utils::summary::DEFAULT_SUMMARY_LIMIT;
use crate::utils::Bigram;
use ahash::AHashMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// Bit position of a bigram inside every fingerprint
pub type BitPosition = u32;

/// Relevance weight of a bit position
pub type Weight = u32;

/// Number of results a search session keeps
pub const MAX_RESULTS: usize = 20;

/// Kind of a documentable object, resolved once when the corpus is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocKind {
    /// A module or class
    Container,
    /// A method or attribute of `parent`
    Member {
        parent: String,
        /// Class-level member (`Foo::bar`) rather than instance member (`Foo#bar`)
        #[serde(default)]
        singleton: bool,
        /// Parameter list as written, e.g. `(key, *args)`
        #[serde(default)]
        params: Option<String>,
        /// Member documents a call sequence instead of a parameter list
        #[serde(default)]
        call_seq: bool,
    },
}

/// A documentable object as supplied by the documentation extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocObject {
    /// Container: fully qualified name. Member: bare member name.
    pub name: String,
    pub url: String,
    /// Rendered HTML description
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub kind: DocKind,
}

impl DocObject {
    pub fn container(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            description: None,
            kind: DocKind::Container,
        }
    }

    pub fn member(parent: &str, name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            description: None,
            kind: DocKind::Member {
                parent: parent.to_string(),
                singleton: false,
                params: None,
                call_seq: false,
            },
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn is_member(&self) -> bool {
        matches!(self.kind, DocKind::Member { .. })
    }

    /// Fully qualified name, e.g. `Foo::Bar#baz` or `Foo::Bar::create`
    pub fn full_name(&self) -> String {
        match &self.kind {
            DocKind::Container => self.name.clone(),
            DocKind::Member { parent, singleton, .. } => {
                format!("{}{}{}", parent, member_sigil(*singleton), self.name)
            }
        }
    }

    /// Name shown for the owning container
    pub fn owner_name(&self) -> &str {
        match &self.kind {
            DocKind::Container => &self.name,
            DocKind::Member { parent, .. } => parent,
        }
    }

    /// Name shown for a member: sigil, name and parameter list
    pub fn member_display_name(&self) -> Option<String> {
        match &self.kind {
            DocKind::Container => None,
            DocKind::Member {
                singleton,
                params,
                call_seq,
                ..
            } => {
                let params = if *call_seq {
                    "(...)"
                } else {
                    params.as_deref().unwrap_or("")
                };
                Some(format!("{}{}{}", member_sigil(*singleton), self.name, params))
            }
        }
    }
}

fn member_sigil(singleton: bool) -> &'static str {
    if singleton { "::" } else { "#" }
}

/// Byte array whose set bits record which global bigrams an entry contains
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(pub Vec<u8>);

impl Fingerprint {
    /// Test a bit. Positions past the end of the array are unset.
    #[inline]
    pub fn contains(&self, position: BitPosition) -> bool {
        let byte = self.0.get((position / 8) as usize).copied().unwrap_or(0);
        byte & (1 << (position % 8)) != 0
    }

    /// Set bit positions in ascending order
    pub fn positions(&self) -> impl Iterator<Item = BitPosition> + '_ {
        self.0.iter().enumerate().flat_map(|(byte_idx, &byte)| {
            (0..8u32)
                .filter(move |bit| byte & (1 << bit) != 0)
                .map(move |bit| byte_idx as u32 * 8 + bit)
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Positional record used on the wire:
/// `[fingerprint, tiebreaker, url, owner, member, summary]`
type EntryRecord = (
    Fingerprint,
    f64,
    String,
    String,
    Option<String>,
    Option<String>,
);

/// One searchable entry of the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EntryRecord", into = "EntryRecord")]
pub struct Entry {
    pub fingerprint: Fingerprint,
    /// Favors short names; added once per matched bit
    pub tiebreaker_bonus: f64,
    pub url: String,
    pub owner_name: String,
    pub member_name: Option<String>,
    pub summary: Option<String>,
}

impl Entry {
    pub fn is_member(&self) -> bool {
        self.member_name.is_some()
    }
}

impl From<EntryRecord> for Entry {
    fn from(
        (fingerprint, tiebreaker_bonus, url, owner_name, member_name, summary): EntryRecord,
    ) -> Self {
        Self {
            fingerprint,
            tiebreaker_bonus,
            url,
            owner_name,
            member_name,
            summary,
        }
    }
}

impl From<Entry> for EntryRecord {
    fn from(entry: Entry) -> Self {
        (
            entry.fingerprint,
            entry.tiebreaker_bonus,
            entry.url,
            entry.owner_name,
            entry.member_name,
            entry.summary,
        )
    }
}

/// Bijection between bigrams and dense bit positions `0..len`.
///
/// Serialized as a JSON object in bit-position order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "HashMap<Bigram, BitPosition>")]
pub struct BigramTable {
    /// Bigram text by bit position
    bigrams: Vec<Bigram>,
    positions: AHashMap<Bigram, BitPosition>,
}

impl BigramTable {
    /// Build a table from bigrams already in rank order (rank = bit position).
    pub fn from_ranked(bigrams: Vec<Bigram>) -> Self {
        let positions = bigrams
            .iter()
            .enumerate()
            .map(|(position, bigram)| (bigram.clone(), position as BitPosition))
            .collect();
        Self { bigrams, positions }
    }

    #[inline]
    pub fn position(&self, bigram: &str) -> Option<BitPosition> {
        self.positions.get(bigram).copied()
    }

    pub fn bigram(&self, position: BitPosition) -> Option<&str> {
        self.bigrams.get(position as usize).map(String::as_str)
    }

    /// Bigrams in bit-position order
    pub fn iter(&self) -> impl Iterator<Item = (&str, BitPosition)> {
        self.bigrams
            .iter()
            .enumerate()
            .map(|(position, bigram)| (bigram.as_str(), position as BitPosition))
    }

    pub fn len(&self) -> usize {
        self.bigrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bigrams.is_empty()
    }
}

impl PartialEq for BigramTable {
    fn eq(&self, other: &Self) -> bool {
        self.bigrams == other.bigrams
    }
}

impl Eq for BigramTable {}

impl Serialize for BigramTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.bigrams.len()))?;
        for (bigram, position) in self.iter() {
            map.serialize_entry(bigram, &position)?;
        }
        map.end()
    }
}

impl TryFrom<HashMap<Bigram, BitPosition>> for BigramTable {
    type Error = IndexError;

    fn try_from(map: HashMap<Bigram, BitPosition>) -> Result<Self, Self::Error> {
        let mut slots: Vec<Option<Bigram>> = vec![None; map.len()];
        for (bigram, position) in map {
            match slots.get_mut(position as usize) {
                Some(slot @ None) => *slot = Some(bigram),
                _ => return Err(IndexError::SparseBigramTable { position }),
            }
        }
        // Every slot is filled: len entries landed on len distinct slots
        Ok(Self::from_ranked(slots.into_iter().flatten().collect()))
    }
}

/// The search index artifact consumed by the runtime
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchIndex {
    pub bigrams: BigramTable,
    /// Weight by bit position, parallel to `bigrams`
    pub weights: Vec<Weight>,
    pub entries: Vec<Entry>,
}

impl SearchIndex {
    #[inline]
    pub fn weight(&self, position: BitPosition) -> Weight {
        self.weights[position as usize]
    }
}

/// Configuration for the index builder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Character budget of entry summaries
    #[serde(default = "default_summary_limit")]
    pub summary_limit: usize,
}

fn default_summary_limit() -> usize {
    DEFAULT_SUMMARY_LIMIT
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            summary_limit: default_summary_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_names() {
        let container = DocObject::container("Foo::Bar", "/Foo/Bar.html");
        assert_eq!(container.full_name(), "Foo::Bar");
        assert_eq!(container.owner_name(), "Foo::Bar");
        assert_eq!(container.member_display_name(), None);

        let method = DocObject::member("Foo::Bar", "baz", "/Foo/Bar.html#baz");
        assert_eq!(method.full_name(), "Foo::Bar#baz");
        assert_eq!(method.owner_name(), "Foo::Bar");
        assert_eq!(method.member_display_name().as_deref(), Some("#baz"));
    }

    #[test]
    fn test_singleton_member_display() {
        let object = DocObject {
            name: "create".to_string(),
            url: "/Foo.html#create".to_string(),
            description: None,
            kind: DocKind::Member {
                parent: "Foo".to_string(),
                singleton: true,
                params: Some("(attrs)".to_string()),
                call_seq: false,
            },
        };
        assert_eq!(object.full_name(), "Foo::create");
        assert_eq!(object.member_display_name().as_deref(), Some("::create(attrs)"));
    }

    #[test]
    fn test_call_seq_display() {
        let mut object = DocObject::member("Foo", "each", "/Foo.html#each");
        if let DocKind::Member { call_seq, params, .. } = &mut object.kind {
            *call_seq = true;
            *params = Some("(&block)".to_string());
        }
        assert_eq!(object.member_display_name().as_deref(), Some("#each(...)"));
    }

    #[test]
    fn test_doc_object_json() {
        let json = r#"[
            {"kind": "container", "name": "Foo", "url": "/Foo.html"},
            {"kind": "member", "parent": "Foo", "name": "bar", "url": "/Foo.html#bar",
             "description": "<p>Bar.</p>"}
        ]"#;
        let objects: Vec<DocObject> = serde_json::from_str(json).unwrap();
        assert_eq!(objects[0], DocObject::container("Foo", "/Foo.html"));
        assert_eq!(
            objects[1],
            DocObject::member("Foo", "bar", "/Foo.html#bar").with_description("<p>Bar.</p>")
        );
    }

    #[test]
    fn test_fingerprint_bits() {
        let fingerprint = Fingerprint(vec![0b0000_0101, 0b1000_0000]);
        assert!(fingerprint.contains(0));
        assert!(!fingerprint.contains(1));
        assert!(fingerprint.contains(2));
        assert!(fingerprint.contains(15));
        assert!(!fingerprint.contains(16));
        assert!(!fingerprint.contains(1000));
        assert_eq!(fingerprint.positions().collect::<Vec<_>>(), vec![0, 2, 15]);
    }

    #[test]
    fn test_entry_wire_format() {
        let entry = Entry {
            fingerprint: Fingerprint(vec![3]),
            tiebreaker_bonus: 0.5,
            url: "/Foo.html".to_string(),
            owner_name: "Foo".to_string(),
            member_name: None,
            summary: None,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"[[3],0.5,"/Foo.html","Foo",null,null]"#);
        let back: Entry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_bigram_table_serializes_in_position_order() {
        let table = BigramTable::from_ranked(vec!["zz".to_string(), " a".to_string()]);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"zz":0," a":1}"#);
    }

    #[test]
    fn test_bigram_table_rejects_gaps() {
        let result: Result<BigramTable, _> = serde_json::from_str(r#"{"ab":0,"cd":2}"#);
        assert!(result.is_err());

        let result: Result<BigramTable, _> = serde_json::from_str(r#"{"ab":1,"cd":0}"#);
        let table = result.unwrap();
        assert_eq!(table.bigram(0), Some("cd"));
        assert_eq!(table.position("ab"), Some(1));
    }
}
