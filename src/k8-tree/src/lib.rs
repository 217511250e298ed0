//!
//! # Ordered manifest trees
//!
//! Building blocks for Kubernetes manifest output: mappings that remember
//! insertion order, lists, and scalars.  Mappings can be recursively sorted
//! by key so that repeated exports serialize identically.
//!

mod ser;

/// A single node of an output tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    List(Vec<Node>),
    Mapping(Mapping),
}

/// Leaf value of a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl Node {
    /// string scalar
    pub fn str(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Str(value.into()))
    }

    /// integer scalar
    pub fn int(value: i64) -> Self {
        Self::Scalar(Scalar::Int(value))
    }

    /// boolean scalar
    pub fn bool(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }

    /// list of string scalars
    pub fn str_list<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::List(values.into_iter().map(Self::str).collect())
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::Str(value)) => Some(value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Scalar(Scalar::Int(value)) => Some(*value),
            _ => None,
        }
    }

    /// Looks up `key` when this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping().and_then(|mapping| mapping.get(key))
    }

    /// Recursively sorts every mapping in this subtree by key.
    pub fn sort(&mut self) {
        match self {
            Self::Scalar(_) => {}
            Self::List(items) => {
                for item in items {
                    item.sort();
                }
            }
            Self::Mapping(mapping) => mapping.sort(),
        }
    }

    /// Sorting variant that consumes the node, for call chaining.
    pub fn sorted(mut self) -> Self {
        self.sort();
        self
    }
}

impl From<Mapping> for Node {
    fn from(mapping: Mapping) -> Self {
        Self::Mapping(mapping)
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

/// Mapping node that keeps entries in insertion order.
///
/// Keys are not forced to be unique.  Sorting is stable, so entries sharing
/// a key keep their relative order, and `get` returns the first match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Node)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// mapping with a single string entry
    pub fn with_str(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut mapping = Self::new();
        mapping.add_str(key, value);
        mapping
    }

    /// mapping with a single integer entry
    pub fn with_int(key: impl Into<String>, value: i64) -> Self {
        let mut mapping = Self::new();
        mapping.add_int(key, value);
        mapping
    }

    /// mapping with a single child node
    pub fn with_node(key: impl Into<String>, node: impl Into<Node>) -> Self {
        let mut mapping = Self::new();
        mapping.add_node(key, node);
        mapping
    }

    /// Appends a string entry.
    pub fn add_str(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), Node::str(value)));
    }

    /// Appends an integer entry.
    pub fn add_int(&mut self, key: impl Into<String>, value: i64) {
        self.entries.push((key.into(), Node::int(value)));
    }

    /// Appends a child node entry.
    pub fn add_node(&mut self, key: impl Into<String>, node: impl Into<Node>) {
        self.entries.push((key.into(), node.into()));
    }

    /// First entry stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, node)| node)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Recursively sorts this mapping and every mapping below it by key.
    pub fn sort(&mut self) {
        self.entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (_, node) in &mut self.entries {
            node.sort();
        }
    }
}

#[cfg(test)]
mod test {
    use super::Node;
    use super::Mapping;

    fn sample() -> Mapping {
        let mut inner = Mapping::with_str("zeta", "last");
        inner.add_int("alpha", 1);

        let mut mapping = Mapping::new();
        mapping.add_node("outer", inner);
        mapping.add_str("beta", "two");
        mapping.add_int("alpha", 1);
        mapping
    }

    #[test]
    fn test_insertion_order() {
        let mapping = sample();
        let keys: Vec<&str> = mapping.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["outer", "beta", "alpha"]);
    }

    #[test]
    fn test_get_and_accessors() {
        let mapping = sample();
        assert_eq!(mapping.get("beta").and_then(Node::as_str), Some("two"));
        assert_eq!(mapping.get("alpha").and_then(Node::as_int), Some(1));
        assert!(mapping.get("missing").is_none());

        let node = Node::from(mapping);
        let inner = node.get("outer").expect("outer");
        assert_eq!(inner.get("zeta").and_then(Node::as_str), Some("last"));
        assert!(inner.as_list().is_none());

        let list = Node::str_list(["a", "b"]);
        assert_eq!(list.as_list().expect("list").len(), 2);
    }

    #[test]
    fn test_recursive_sort() {
        let node = Node::from(sample()).sorted();

        let mapping = node.as_mapping().expect("mapping");
        let keys: Vec<&str> = mapping.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["alpha", "beta", "outer"]);

        let inner = node.get("outer").and_then(Node::as_mapping).expect("outer");
        let inner_keys: Vec<&str> = inner.iter().map(|(key, _)| key).collect();
        assert_eq!(inner_keys, ["alpha", "zeta"]);
    }

    #[test]
    fn test_sort_inside_lists() {
        let mut item = Mapping::with_str("b", "1");
        item.add_str("a", "2");
        let mut mapping = Mapping::new();
        mapping.add_node("items", Node::List(vec![item.into()]));
        mapping.sort();

        let items = mapping.get("items").and_then(Node::as_list).expect("items");
        let keys: Vec<&str> = items[0]
            .as_mapping()
            .expect("item")
            .iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn test_sort_is_stable_for_duplicate_keys() {
        let mut mapping = Mapping::with_str("b", "other");
        mapping.add_str("a", "first");
        mapping.add_str("a", "second");
        mapping.sort();

        let values: Vec<&str> = mapping
            .iter()
            .map(|(_, node)| node.as_str().expect("scalar"))
            .collect();
        assert_eq!(values, ["first", "second", "other"]);
        assert_eq!(mapping.get("a").and_then(Node::as_str), Some("first"));
    }

    #[test]
    fn test_sort_is_idempotent() {
        let once = Node::from(sample()).sorted();
        let twice = once.clone().sorted();
        assert_eq!(once, twice);
    }
}
