mod record;

pub use self::record::*;

use super::*;
use nom::IResult;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("line {line}: {reason} in `{content}`")]
    MalformedRecord {
        line: usize,
        content: String,
        reason: Malformation,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Malformation {
    #[error("expected exactly three comma-separated fields")]
    FieldCount,
    #[error("empty scale name")]
    EmptyName,
    #[error("empty pan")]
    EmptyPan,
    #[error("mass does not fit in 64 bits")]
    MassOverflow,
}

/// Builds a registry from `name,left,right` lines. Blank lines and `#` comments
/// are skipped, and the first malformed record fails the whole input.
pub fn parse(s: &str) -> Result<Registry, Error> {
    let mut registry = Registry::new();
    for (index, line) in s.lines().enumerate() {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let record = parse_one(index + 1, line)?;
        registry
            .register(record.name, record.left, record.right)
            .map_err(|_| Error::MalformedRecord {
                line: index + 1,
                content: line.to_string(),
                reason: Malformation::EmptyName,
            })?;
    }
    Ok(registry)
}

pub fn parse_one(line: usize, s: &str) -> Result<Record, Error> {
    classify(s).map_err(|reason| Error::MalformedRecord {
        line: line,
        content: s.to_string(),
        reason: reason,
    })
}

fn classify(s: &str) -> Result<Record, Malformation> {
    let (name, left, right) = match record(s) {
        IResult::Done(_, fields) => fields,
        IResult::Error(_) | IResult::Incomplete(_) => return Err(Malformation::FieldCount),
    };
    Ok(Record {
        name: scale_name(name)?,
        left: pan_content(left)?,
        right: pan_content(right)?,
    })
}
