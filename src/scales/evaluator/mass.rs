use super::*;
use std::collections::HashSet;
use tracing::{debug, trace};

enum Visit<'a> {
    Enter(Name),
    Exit(Name, &'a Scale),
}

impl<'a> Evaluator<'a> {
    /// Mass resting on a pan: a literal as-is, or a hung scale with everything
    /// beneath it plus one for the scale itself.
    pub fn total_mass(&mut self, content: &PanContent) -> Result<u64, Error> {
        match *content {
            PanContent::Literal(mass) => Ok(mass),
            PanContent::Reference(ref name) => self.scale_mass(name),
        }
    }

    /// Walks everything hanging beneath `name` on an explicit stack, settling
    /// children before their parent.
    pub(super) fn scale_mass(&mut self, name: &Name) -> Result<u64, Error> {
        if let Some(&mass) = self.masses.get(name) {
            trace!(scale = %name, mass, "memoized mass");
            return Ok(mass);
        }

        // Scales whose `Exit` is still on the stack, i.e. the current path.
        let mut open = HashSet::new();
        let mut stack = vec![Visit::Enter(name.clone())];
        let mut mass = 0;
        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(name) => {
                    if self.masses.contains_key(&name) {
                        continue;
                    }
                    if open.contains(&name) {
                        return Err(Error::CyclicReference(name));
                    }
                    let scale = self.resolve(&name)?;
                    open.insert(name.clone());
                    stack.push(Visit::Exit(name, scale));
                    for pan in scale.pans().iter().rev() {
                        if let PanContent::Reference(ref child) = **pan {
                            stack.push(Visit::Enter(child.clone()));
                        }
                    }
                }
                Visit::Exit(name, scale) => {
                    mass = self.settle(&name, scale)?;
                    open.remove(&name);
                }
            }
        }
        // The first scale entered is the last one to exit.
        Ok(mass)
    }

    fn settle(&mut self, name: &Name, scale: &Scale) -> Result<u64, Error> {
        let left = self.settled_mass(&scale.left)?;
        let right = self.settled_mass(&scale.right)?;
        let mass = 1u64
            .checked_add(left)
            .and_then(|mass| mass.checked_add(right))
            .ok_or_else(|| Error::MassOverflow(name.clone()))?;

        self.expansions += 1;
        debug!(scale = %name, mass, "computed mass");
        self.masses.insert(name.clone(), mass);
        Ok(mass)
    }

    // Children always exit before their parent, so references are memoized by now.
    fn settled_mass(&self, content: &PanContent) -> Result<u64, Error> {
        match *content {
            PanContent::Literal(mass) => Ok(mass),
            PanContent::Reference(ref name) => match self.masses.get(name) {
                Some(&mass) => Ok(mass),
                None => Err(registry::Error::UnknownScale(name.clone()).into()),
            },
        }
    }
}
