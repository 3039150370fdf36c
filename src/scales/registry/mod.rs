use super::*;
use std::collections::{HashMap, HashSet};
use std::collections::hash_map::Entry;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("scale name is empty")]
    EmptyName,
    #[error("unknown scale `{0}`")]
    UnknownScale(Name),
}

/// Every named scale, plus the order the names first appeared in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Registry {
    scales: HashMap<Name, Scale>,
    names: Vec<Name>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry {
            scales: HashMap::new(),
            names: Vec::new(),
        }
    }

    /// Last write wins, but an overwritten name keeps its original position.
    pub fn register(&mut self, name: Name, left: PanContent, right: PanContent) -> Result<(), Error> {
        if name.0.is_empty() {
            return Err(Error::EmptyName);
        }
        let scale = Scale::new(left, right);
        match self.scales.entry(name) {
            Entry::Occupied(mut entry) => {
                warn!(scale = %entry.key(), "record overwrites an earlier scale of the same name");
                entry.insert(scale);
            }
            Entry::Vacant(entry) => {
                self.names.push(entry.key().clone());
                entry.insert(scale);
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &Name) -> Option<&Scale> {
        self.scales.get(name)
    }

    pub fn lookup(&self, name: &Name) -> Result<&Scale, Error> {
        self.get(name)
            .ok_or_else(|| Error::UnknownScale(name.clone()))
    }

    pub fn contains(&self, name: &Name) -> bool {
        self.scales.contains_key(name)
    }

    pub fn names(&self) -> &[Name] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn records<'a>(&'a self) -> impl Iterator<Item = Record> + 'a {
        self.names.iter().filter_map(move |name| {
            self.scales.get(name).map(|scale| Record {
                name: name.clone(),
                left: scale.left.clone(),
                right: scale.right.clone(),
            })
        })
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            self.records()
                .map(|r| format!("{}", r))
                .collect::<Vec<_>>()
                .join("\n")
        )
    }
}

impl Arbitrary for Registry {
    fn arbitrary<G: Gen>(g: &mut G) -> Registry {
        let size = g.size();
        let mut seen = HashSet::new();
        let names: Vec<Name> = (0..g.gen_range(0, size + 1))
            .map(|_| Name::arbitrary(g))
            .filter(|name| seen.insert(name.clone()))
            .collect();

        // Pans only hang scales that come later in `names`, so the result is acyclic.
        let mut registry = Registry::new();
        for (i, name) in names.iter().enumerate() {
            let left = arbitrary_pan(g, &names[i + 1..]);
            let right = arbitrary_pan(g, &names[i + 1..]);
            registry.scales.insert(name.clone(), Scale::new(left, right));
            registry.names.push(name.clone());
        }
        registry
    }
}

fn arbitrary_pan<G: Gen>(g: &mut G, later: &[Name]) -> PanContent {
    match g.gen_range(0, 2) {
        0 => PanContent::Literal(u64::arbitrary(g)),
        1 => g.choose(later)
            .map(|name| PanContent::Reference(name.clone()))
            .unwrap_or_else(|| PanContent::Literal(u64::arbitrary(g))),
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_name(s: &str) -> Name {
        Name(s.to_string())
    }

    fn literals(left: u64, right: u64) -> Scale {
        Scale::new(PanContent::Literal(left), PanContent::Literal(right))
    }

    #[test]
    fn register_then_lookup() {
        let mut r = Registry::new();
        r.register(as_name("A"), PanContent::Literal(1), PanContent::Literal(2))
            .unwrap();
        assert_eq!(r.lookup(&as_name("A")), Ok(&literals(1, 2)));
        assert!(r.contains(&as_name("A")));
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn lookup_errors_if_unknown() {
        let r = Registry::new();
        assert_eq!(
            r.lookup(&as_name("X")),
            Err(Error::UnknownScale(as_name("X")))
        );
        assert_eq!(r.get(&as_name("X")), None);
        assert!(r.is_empty());
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut r = Registry::new();
        assert_eq!(
            r.register(as_name(""), PanContent::Literal(1), PanContent::Literal(1)),
            Err(Error::EmptyName)
        );
        assert!(r.is_empty());
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut r = Registry::new();
        r.register(as_name("A"), PanContent::Literal(1), PanContent::Literal(2))
            .unwrap();
        r.register(as_name("B"), PanContent::Literal(1), PanContent::Literal(1))
            .unwrap();
        r.register(as_name("A"), PanContent::Literal(5), PanContent::Literal(5))
            .unwrap();
        assert_eq!(r.names(), &[as_name("A"), as_name("B")][..]);
        assert_eq!(r.lookup(&as_name("A")), Ok(&literals(5, 5)));
    }

    #[test]
    fn displays_as_records() {
        let mut r = Registry::new();
        r.register(
            as_name("A"),
            PanContent::Reference(as_name("B")),
            PanContent::Literal(3),
        ).unwrap();
        r.register(as_name("B"), PanContent::Literal(1), PanContent::Literal(1))
            .unwrap();
        assert_eq!(format!("{}", r), "A,B,3\nB,1,1");
    }
}
