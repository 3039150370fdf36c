pub mod parser;
pub mod registry;
pub mod evaluator;

pub use self::evaluator::Evaluator;
pub use self::registry::Registry;

use std::fmt;
use std::iter;
use quickcheck::{Arbitrary, Gen};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    ParseError(parser::Error),
    #[error(transparent)]
    EvaluationError(evaluator::Error),
}

/// Parses `name,left,right` records and works out the correction every scale needs.
pub fn balance(s: &str) -> Result<Report, Error> {
    let registry = parser::parse(s).map_err(Error::ParseError)?;
    let report = evaluator::evaluate(&registry).map_err(Error::EvaluationError)?;
    return Ok(report);
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(pub String);

impl Name {
    pub fn new(s: &str) -> Name {
        Name(s.to_string())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Arbitrary for Name {
    fn arbitrary<G: Gen>(g: &mut G) -> Name {
        let size = g.size().max(1);
        let len = 0..g.gen_range(1, size + 1);
        Name(len.map(|i| {
            // Leading letter keeps a name from ever reading as a literal mass.
            let chars = match i {
                0 => "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ",
                _ => "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_",
            };
            *g.choose(chars.as_bytes()).unwrap() as char
        }).collect())
    }
}

/// What sits in one pan of a scale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PanContent {
    Literal(u64),
    Reference(Name),
}

impl fmt::Display for PanContent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PanContent::Literal(mass) => write!(f, "{}", mass),
            PanContent::Reference(ref name) => write!(f, "{}", name),
        }
    }
}

impl Arbitrary for PanContent {
    fn arbitrary<G: Gen>(g: &mut G) -> PanContent {
        match g.gen_range(0, 2) {
            0 => PanContent::Literal(u64::arbitrary(g)),
            1 => PanContent::Reference(Name::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scale {
    pub left: PanContent,
    pub right: PanContent,
}

impl Scale {
    pub fn new(left: PanContent, right: PanContent) -> Scale {
        Scale {
            left: left,
            right: right,
        }
    }

    pub fn pans(&self) -> [&PanContent; 2] {
        [&self.left, &self.right]
    }

    /// Names of the scales hung from either pan.
    pub fn references(&self) -> impl Iterator<Item = &Name> {
        iter::once(&self.left)
            .chain(iter::once(&self.right))
            .filter_map(|pan| match *pan {
                PanContent::Reference(ref name) => Some(name),
                PanContent::Literal(_) => None,
            })
    }
}

/// One input line, before it lands in a `Registry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: Name,
    pub left: PanContent,
    pub right: PanContent,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{},{}", self.name, self.left, self.right)
    }
}

/// Mass to add to each pan. At most one side is ever nonzero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Correction {
    pub left: u64,
    pub right: u64,
}

impl Correction {
    /// Puts the difference on the lighter pan.
    pub fn between(left_mass: u64, right_mass: u64) -> Correction {
        if left_mass < right_mass {
            Correction {
                left: right_mass - left_mass,
                right: 0,
            }
        } else {
            Correction {
                left: 0,
                right: left_mass - right_mass,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub name: Name,
    pub mass: u64,
    pub correction: Correction,
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            self.name, self.correction.left, self.correction.right
        )
    }
}

/// Corrections for every registered scale, in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report(pub Vec<Row>);

impl Report {
    pub fn get(&self, name: &Name) -> Option<&Row> {
        self.0.iter().find(|row| &row.name == name)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .iter()
                .map(|row| format!("{}", row))
                .collect::<Vec<_>>()
                .join("\n")
        )
    }
}
