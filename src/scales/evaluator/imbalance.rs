use super::*;
use tracing::debug;

impl<'a> Evaluator<'a> {
    /// Works out the correction for `name` and every scale hanging beneath it.
    pub fn measure(&mut self, name: &Name) -> Result<Correction, Error> {
        if let Some(&correction) = self.imbalances.get(name) {
            return Ok(correction);
        }
        let (correction, scale) = self.measure_one(name)?;

        let mut pending: Vec<&'a Name> = scale.references().collect();
        while let Some(child) = pending.pop() {
            if self.imbalances.contains_key(child) {
                continue;
            }
            let (_, scale) = self.measure_one(child)?;
            pending.extend(scale.references());
        }
        Ok(correction)
    }

    fn measure_one(&mut self, name: &Name) -> Result<(Correction, &'a Scale), Error> {
        let scale = self.resolve(name)?;
        let left_mass = self.total_mass(&scale.left)?;
        let right_mass = self.total_mass(&scale.right)?;

        let correction = Correction::between(left_mass, right_mass);
        debug!(
            scale = %name,
            left_mass,
            right_mass,
            left = correction.left,
            right = correction.right,
            "measured imbalance"
        );
        self.imbalances.insert(name.clone(), correction);
        Ok((correction, scale))
    }
}
