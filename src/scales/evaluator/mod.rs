mod mass;
mod imbalance;

use super::*;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Registry(#[from] registry::Error),
    #[error("scale `{0}` is part of a reference cycle")]
    CyclicReference(Name),
    #[error("total mass of scale `{0}` does not fit in 64 bits")]
    MassOverflow(Name),
}

pub fn evaluate(registry: &Registry) -> Result<Report, Error> {
    let mut evaluator = Evaluator::new(registry);
    evaluator.masses()?;
    evaluator.imbalances()?;
    evaluator.report()
}

/// Memo tables shared by the mass and imbalance passes over one registry.
#[derive(Debug, Clone)]
pub struct Evaluator<'a> {
    registry: &'a Registry,
    pub masses: HashMap<Name, u64>,
    pub imbalances: HashMap<Name, Correction>,
    expansions: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(registry: &'a Registry) -> Evaluator<'a> {
        Evaluator {
            registry: registry,
            masses: HashMap::new(),
            imbalances: HashMap::new(),
            expansions: 0,
        }
    }

    /// Fills the mass table for every registered scale.
    pub fn masses(&mut self) -> Result<(), Error> {
        let registry = self.registry;
        for name in registry.names() {
            self.scale_mass(name)?;
        }
        Ok(())
    }

    /// Fills the imbalance table for every registered scale. Run `masses` first.
    pub fn imbalances(&mut self) -> Result<(), Error> {
        let registry = self.registry;
        for name in registry.names() {
            self.measure(name)?;
        }
        Ok(())
    }

    pub fn report(&mut self) -> Result<Report, Error> {
        let registry = self.registry;
        let mut rows = Vec::new();
        for name in registry.names() {
            rows.push(Row {
                name: name.clone(),
                mass: self.scale_mass(name)?,
                correction: self.measure(name)?,
            });
        }
        Ok(Report(rows))
    }

    /// How many scales have had their mass worked out rather than read from the memo.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    fn resolve(&self, name: &Name) -> Result<&'a Scale, Error> {
        let registry = self.registry;
        Ok(registry.lookup(name)?)
    }
}
