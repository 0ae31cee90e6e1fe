//! The organism: a stochastic state machine driven by its genome.

use rand::Rng;

use super::labels::{Sensor, State};
use crate::genetics::{Gene, GeneticsError, Genome, unit};

/// A probabilistic state machine whose transition weights are genetic material.
///
/// Chromosome `i` of the genome holds the transitions out of state `i`; gene
/// `j` of that chromosome holds the weights for moving to state `j`. Each gene
/// has `1 + sensor_count` coefficients: a base weight followed by one weight
/// per sensor.
///
/// Shape changes are destructive. [`set_state_count`](Self::set_state_count)
/// and [`set_sensor_count`](Self::set_sensor_count) zero every transition, so
/// configure the shape first (states, then sensors) and the weights after.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Organism {
    states: Vec<State>,
    sensors: Vec<Sensor>,
    state_count: usize,
    sensor_count: usize,
    current_state: usize,
    genome: Genome,
}

impl Organism {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an organism with `states` states and `sensors` sensors, all weights zero.
    pub fn with_shape(states: usize, sensors: usize) -> Self {
        let mut organism = Self::default();
        organism.set_state_count(states);
        organism.set_sensor_count(sensors);
        organism
    }

    pub(crate) fn from_parts(
        states: Vec<State>,
        sensors: Vec<Sensor>,
        current_state: usize,
        genome: Genome,
    ) -> Self {
        Self {
            state_count: states.len(),
            sensor_count: sensors.len(),
            states,
            sensors,
            current_state,
            genome,
        }
    }

    #[inline]
    pub fn state_count(&self) -> usize {
        self.state_count
    }

    #[inline]
    pub fn sensor_count(&self) -> usize {
        self.sensor_count
    }

    /// Set the number of states and rebuild the genome as a zeroed square matrix.
    ///
    /// The state name table is only allocated on the first sizing; later calls
    /// keep it as is, so names beyond its original length are unavailable.
    pub fn set_state_count(&mut self, count: usize) {
        self.state_count = count;

        if self.states.is_empty() {
            self.states = vec![State::default(); count];
        }

        if self.current_state >= count {
            self.current_state = 0;
        }

        log::debug!("reshaping genome to {count} states, transition weights cleared");
        self.genome.reshape(count, 1 + self.sensor_count);

        self.set_sensor_count(self.sensor_count);
    }

    /// Set the number of sensors and resize every gene to `1 + count` zeros.
    ///
    /// Like the state table, the sensor table is only allocated once.
    pub fn set_sensor_count(&mut self, count: usize) {
        self.sensor_count = count;

        if count > 0 && self.sensors.is_empty() {
            self.sensors = vec![Sensor::default(); count];
        }

        self.genome.resize_genes(1 + count);
    }

    /// State labels addressable through this organism.
    pub fn states(&self) -> &[State] {
        let n = self.state_count.min(self.states.len());
        &self.states[..n]
    }

    /// Sensors addressable through this organism.
    pub fn sensors(&self) -> &[Sensor] {
        let n = self.sensor_count.min(self.sensors.len());
        &self.sensors[..n]
    }

    fn states_mut(&mut self) -> &mut [State] {
        let n = self.state_count.min(self.states.len());
        &mut self.states[..n]
    }

    fn sensors_mut(&mut self) -> &mut [Sensor] {
        let n = self.sensor_count.min(self.sensors.len());
        &mut self.sensors[..n]
    }

    pub fn state_name(&self, index: usize) -> Option<&str> {
        self.states().get(index).map(|s| s.name.as_str())
    }

    pub fn set_state_name(&mut self, index: usize, name: impl Into<String>) -> bool {
        match self.states_mut().get_mut(index) {
            Some(state) => {
                state.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn state_index(&self, name: &str) -> Option<usize> {
        self.states().iter().position(|s| s.name == name)
    }

    pub fn sensor_name(&self, index: usize) -> Option<&str> {
        self.sensors().get(index).map(|s| s.name.as_str())
    }

    pub fn set_sensor_name(&mut self, index: usize, name: impl Into<String>) -> bool {
        match self.sensors_mut().get_mut(index) {
            Some(sensor) => {
                sensor.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn sensor_index(&self, name: &str) -> Option<usize> {
        self.sensors().iter().position(|s| s.name == name)
    }

    /// Sensor reading at `index`, or `0.0` when there is no such sensor.
    #[inline]
    pub fn sensor_value(&self, index: usize) -> f32 {
        self.sensors().get(index).map_or(0.0, |s| s.value)
    }

    /// Reading of the first sensor named `name`, or `0.0`.
    pub fn sensor_value_by_name(&self, name: &str) -> f32 {
        self.sensor_index(name)
            .map_or(0.0, |index| self.sensor_value(index))
    }

    pub fn set_sensor_value(&mut self, index: usize, value: f32) -> bool {
        match self.sensors_mut().get_mut(index) {
            Some(sensor) => {
                sensor.value = value;
                true
            }
            None => false,
        }
    }

    pub fn set_sensor_value_by_name(&mut self, name: &str, value: f32) -> bool {
        match self.sensor_index(name) {
            Some(index) => self.set_sensor_value(index, value),
            None => false,
        }
    }

    #[inline]
    pub fn current_state(&self) -> usize {
        self.current_state
    }

    pub fn current_state_name(&self) -> Option<&str> {
        self.state_name(self.current_state)
    }

    pub fn set_current_state(&mut self, index: usize) -> bool {
        if index >= self.state_count {
            return false;
        }
        self.current_state = index;
        true
    }

    pub fn set_current_state_by_name(&mut self, name: &str) -> bool {
        match self.state_index(name) {
            Some(index) => self.set_current_state(index),
            None => false,
        }
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    pub fn genome_mut(&mut self) -> &mut Genome {
        &mut self.genome
    }

    /// Gene holding the weights of `from -> to`.
    pub fn transition(&self, from: usize, to: usize) -> Result<&Gene, GeneticsError> {
        self.genome.get_chromosome(from)?.get_gene(to)
    }

    /// Write the weights of `from -> to`: a base weight and one weight per sensor.
    ///
    /// Returns `false` when either state is out of range or fewer than
    /// `sensor_count` sensor weights are supplied. Extra weights are ignored.
    pub fn set_transition(
        &mut self,
        from: usize,
        to: usize,
        base_weight: f32,
        sensor_weights: &[f32],
    ) -> bool {
        if from >= self.state_count || to >= self.state_count {
            return false;
        }
        if sensor_weights.len() < self.sensor_count {
            return false;
        }

        let sensor_count = self.sensor_count;
        let Ok(gene) = self
            .genome
            .get_chromosome_mut(from)
            .and_then(|c| c.get_gene_mut(to))
        else {
            return false;
        };

        gene.set(0, base_weight);
        for (i, &weight) in sensor_weights[..sensor_count].iter().enumerate() {
            gene.set(1 + i, weight);
        }
        true
    }

    /// Cumulative transition distribution out of the current state.
    ///
    /// Each target's weight is its base weight plus the sensor-weighted sum of
    /// readings. Weights are divided by their total without any guard, so a
    /// zero or negative total yields infinities, NaNs or a non-monotonic
    /// sequence; sampling then falls back to staying put.
    pub fn transition_cdf(&self) -> Result<Vec<f32>, GeneticsError> {
        let chromosome = self.genome.get_chromosome(self.current_state)?;

        let mut total = 0.0f32;
        let mut prob = Vec::with_capacity(self.state_count);
        for i in 0..self.state_count {
            let gene = chromosome.get_gene(i)?;

            let mut weight = gene.get(0);
            total += weight;
            for j in 0..self.sensor_count {
                let term = gene.get(1 + j) * self.sensor_value(j);
                weight += term;
                total += term;
            }
            prob.push(weight);
        }

        if total == 0.0 || !total.is_finite() {
            log::debug!(
                "degenerate transition total {total} out of state {}",
                self.current_state
            );
        }

        for p in &mut prob {
            *p /= total;
        }

        // Descending so that every prefix read is still unaccumulated.
        for i in (0..prob.len()).rev() {
            let (head, tail) = prob.split_at_mut(i);
            tail[0] = head.iter().fold(tail[0], |acc, p| acc + p);
        }

        Ok(prob)
    }

    /// Move to the first state whose cumulative probability reaches `draw`.
    ///
    /// When no state qualifies the current state is kept.
    pub fn advance_with(&mut self, draw: f32) -> Result<usize, GeneticsError> {
        let cdf = self.transition_cdf()?;

        match cdf.iter().position(|&p| draw <= p) {
            Some(next) => self.current_state = next,
            None => log::debug!(
                "no transition selected for draw {draw}, staying in state {}",
                self.current_state
            ),
        }

        Ok(self.current_state)
    }

    /// Sample the next state and make it current.
    pub fn update_state<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, GeneticsError> {
        let draw = unit(rng);
        self.advance_with(draw)
    }

    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.genome.mutate(rng);
    }

    pub fn mutate_mutation_factors<R: Rng + ?Sized>(
        &mut self,
        trigger: f32,
        rate: f32,
        rng: &mut R,
    ) {
        self.genome.mutate_mutation_factors(trigger, rate, rng);
    }

    /// Breed with `other`.
    ///
    /// The offspring copies `self`'s labels and sensor readings, starts in
    /// state 0, carries the genome crossover, and is mutated once before it is
    /// returned. State or sensor count mismatches are faults.
    pub fn crossover<R: Rng + ?Sized>(
        &self,
        other: &Organism,
        rng: &mut R,
    ) -> Result<Organism, GeneticsError> {
        if self.state_count != other.state_count {
            return Err(GeneticsError::ShapeMismatch {
                what: "state count",
                left: self.state_count,
                right: other.state_count,
            });
        }
        if self.sensor_count != other.sensor_count {
            return Err(GeneticsError::ShapeMismatch {
                what: "sensor count",
                left: self.sensor_count,
                right: other.sensor_count,
            });
        }

        let genome = self.genome.crossover(&other.genome, rng)?;
        let mut child = Organism {
            states: self.states.clone(),
            sensors: self.sensors.clone(),
            state_count: self.state_count,
            sensor_count: self.sensor_count,
            current_state: 0,
            genome,
        };
        child.mutate(rng);

        Ok(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetics::GenomeRng;

    fn assert_shape(organism: &Organism, states: usize, sensors: usize) {
        let genome = organism.genome();
        assert_eq!(genome.len(), states);
        for chromosome in genome.chromosomes() {
            assert_eq!(chromosome.len(), states);
            for gene in chromosome.genes() {
                assert_eq!(gene.len(), 1 + sensors);
                assert!(gene.coefficients().iter().all(|&c| c == 0.0));
            }
        }
    }

    fn uniform(states: usize) -> Organism {
        let mut organism = Organism::with_shape(states, 1);
        for from in 0..states {
            for to in 0..states {
                assert!(organism.set_transition(from, to, 1.0, &[0.0]));
            }
        }
        organism
    }

    #[test]
    fn test_shape_states_then_sensors() {
        let organism = Organism::with_shape(3, 2);
        assert_shape(&organism, 3, 2);
        assert_eq!(organism.states().len(), 3);
        assert_eq!(organism.sensors().len(), 2);
    }

    #[test]
    fn test_shape_sensors_then_states_converges() {
        let mut organism = Organism::new();
        organism.set_sensor_count(2);
        organism.set_state_count(3);
        organism.set_sensor_count(2);
        assert_shape(&organism, 3, 2);
    }

    #[test]
    fn test_reshape_discards_weights() {
        let mut organism = Organism::with_shape(2, 1);
        assert!(organism.set_transition(0, 1, 5.0, &[2.0]));
        assert_eq!(organism.transition(0, 1).unwrap().get(0), 5.0);

        organism.set_sensor_count(1);
        assert_shape(&organism, 2, 1);
    }

    #[test]
    fn test_state_table_allocated_once() {
        let mut organism = Organism::with_shape(2, 0);
        assert!(organism.set_state_name(1, "b"));

        organism.set_state_count(3);
        assert_eq!(organism.state_count(), 3);
        assert_eq!(organism.states().len(), 2);
        assert_eq!(organism.state_name(1), Some("b"));
        assert!(!organism.set_state_name(2, "c"));
        assert_shape(&organism, 3, 0);
    }

    #[test]
    fn test_set_transition_bounds() {
        let mut organism = Organism::with_shape(2, 2);
        assert!(organism.set_transition(1, 0, 0.5, &[1.0, 2.0, 3.0]));
        assert_eq!(organism.transition(1, 0).unwrap().coefficients(), &[0.5, 1.0, 2.0]);

        assert!(!organism.set_transition(2, 0, 1.0, &[0.0, 0.0]));
        assert!(!organism.set_transition(0, 2, 1.0, &[0.0, 0.0]));
        assert!(!organism.set_transition(0, 0, 1.0, &[0.0]));
        assert!(organism.transition(2, 0).is_err());
    }

    #[test]
    fn test_names_and_sensors() {
        let mut organism = Organism::with_shape(2, 2);
        organism.set_state_name(0, "idle");
        organism.set_state_name(1, "flee");
        organism.set_sensor_name(0, "light");
        organism.set_sensor_name(1, "noise");

        assert_eq!(organism.state_index("flee"), Some(1));
        assert_eq!(organism.state_index("hunt"), None);
        assert_eq!(organism.sensor_index("noise"), Some(1));

        assert!(organism.set_sensor_value_by_name("noise", 0.75));
        assert!(!organism.set_sensor_value_by_name("heat", 1.0));
        assert!(!organism.set_sensor_value(2, 1.0));
        assert_eq!(organism.sensor_value(1), 0.75);
        assert_eq!(organism.sensor_value_by_name("noise"), 0.75);
        assert_eq!(organism.sensor_value_by_name("heat"), 0.0);
        assert_eq!(organism.sensor_value(5), 0.0);

        assert!(organism.set_current_state_by_name("flee"));
        assert_eq!(organism.current_state(), 1);
        assert_eq!(organism.current_state_name(), Some("flee"));
        assert!(!organism.set_current_state(2));
        assert!(!organism.set_current_state_by_name("hunt"));
        assert_eq!(organism.current_state(), 1);
    }

    #[test]
    fn test_identity_weights_stay_put() {
        let mut rng = GenomeRng::new(42);
        let mut organism = Organism::with_shape(2, 0);
        organism.set_transition(0, 0, 1.0, &[]);
        organism.set_transition(0, 1, 0.0, &[]);
        organism.set_transition(1, 0, 0.0, &[]);
        organism.set_transition(1, 1, 1.0, &[]);

        assert_eq!(organism.transition_cdf().unwrap(), vec![1.0, 1.0]);
        for _ in 0..100 {
            assert_eq!(organism.update_state(&mut rng).unwrap(), 0);
        }

        organism.set_current_state(1);
        assert_eq!(organism.transition_cdf().unwrap(), vec![0.0, 1.0]);
        for _ in 0..100 {
            assert_eq!(organism.update_state(&mut rng).unwrap(), 1);
        }
    }

    #[test]
    fn test_sensor_weights_shift_distribution() {
        let mut organism = Organism::with_shape(2, 1);
        organism.set_transition(0, 0, 1.0, &[0.0]);
        organism.set_transition(0, 1, 0.0, &[3.0]);
        organism.set_sensor_value(0, 1.0);

        let cdf = organism.transition_cdf().unwrap();
        assert!((cdf[0] - 0.25).abs() < 1e-6);
        assert!((cdf[1] - 1.0).abs() < 1e-6);

        assert_eq!(organism.advance_with(0.25).unwrap(), 0);
        assert_eq!(organism.advance_with(0.26).unwrap(), 1);
    }

    #[test]
    fn test_zero_total_keeps_state() {
        let mut rng = GenomeRng::new(1);
        let mut organism = Organism::with_shape(3, 0);
        organism.set_current_state(2);

        let cdf = organism.transition_cdf().unwrap();
        assert!(cdf.iter().all(|p| p.is_nan()));
        for _ in 0..20 {
            assert_eq!(organism.update_state(&mut rng).unwrap(), 2);
        }
    }

    #[test]
    fn test_negative_total_is_not_guarded() {
        let mut organism = Organism::with_shape(2, 0);
        organism.set_transition(0, 0, -1.0, &[]);
        organism.set_transition(0, 1, -3.0, &[]);

        // Dividing by a negative total still sums to one.
        let cdf = organism.transition_cdf().unwrap();
        assert!((cdf[0] - 0.25).abs() < 1e-6);
        assert!((cdf[1] - 1.0).abs() < 1e-6);

        organism.set_transition(0, 0, 2.0, &[]);
        organism.set_transition(0, 1, -3.0, &[]);
        let cdf = organism.transition_cdf().unwrap();
        assert!((cdf[0] + 2.0).abs() < 1e-6);
        assert!((cdf[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_draw_beyond_cdf_keeps_state() {
        let mut organism = uniform(2);
        organism.set_current_state(1);
        assert_eq!(organism.advance_with(1.5).unwrap(), 1);
    }

    #[test]
    fn test_empty_organism_faults() {
        let mut rng = GenomeRng::new(1);
        let mut organism = Organism::new();
        assert!(matches!(
            organism.update_state(&mut rng),
            Err(GeneticsError::IndexOutOfRange { what: "chromosome", .. })
        ));
    }

    #[test]
    fn test_uniform_weights_visit_uniformly() {
        let mut rng = GenomeRng::new(1234);
        let mut organism = uniform(3);
        organism.set_sensor_value(0, 0.0);

        let trials = 30_000;
        let mut visits = [0usize; 3];
        for _ in 0..trials {
            visits[organism.update_state(&mut rng).unwrap()] += 1;
        }

        let expected = trials as f32 / 3.0;
        for count in visits {
            assert!((count as f32 - expected).abs() / expected < 0.05);
        }
    }

    #[test]
    fn test_crossover_copies_labels_and_resets_state() {
        let mut rng = GenomeRng::new(42);
        let mut a = uniform(3);
        a.set_state_name(2, "rest");
        a.set_sensor_value(0, 0.5);
        a.set_current_state(2);
        let b = uniform(3);

        let child = a.crossover(&b, &mut rng).unwrap();
        assert_eq!(child.state_count(), 3);
        assert_eq!(child.sensor_count(), 1);
        assert_eq!(child.current_state(), 0);
        assert_eq!(child.state_name(2), Some("rest"));
        assert_eq!(child.sensor_value(0), 0.5);
        assert_eq!(child.genome().len(), 3);
    }

    #[test]
    fn test_crossover_mutates_offspring() {
        let mut rng = GenomeRng::new(42);
        let mut a = uniform(2);
        for chromosome in a.genome_mut().chromosomes_mut() {
            chromosome.set_recombination_enabled(true);
            chromosome.set_recombination_mutation_chance(0.0);
            for gene in chromosome.genes_mut() {
                gene.set_mutation_chance(1.0);
            }
        }
        let b = a.clone();

        // Parents are identical, so any difference comes from the mutation pass.
        let child = a.crossover(&b, &mut rng).unwrap();
        assert_ne!(child.genome(), a.genome());
    }

    #[test]
    fn test_crossover_shape_mismatch_faults() {
        let mut rng = GenomeRng::new(42);
        let a = Organism::with_shape(2, 1);
        let b = Organism::with_shape(3, 1);
        let c = Organism::with_shape(2, 2);

        assert!(matches!(
            a.crossover(&b, &mut rng),
            Err(GeneticsError::ShapeMismatch { what: "state count", .. })
        ));
        assert!(matches!(
            a.crossover(&c, &mut rng),
            Err(GeneticsError::ShapeMismatch { what: "sensor count", .. })
        ));
    }

    #[test]
    fn test_mutation_factors_reach_genes() {
        let mut rng = GenomeRng::new(3);
        let mut organism = uniform(2);
        organism.mutate_mutation_factors(1.0, 0.5, &mut rng);
        let changed = organism
            .genome()
            .chromosomes()
            .iter()
            .flat_map(|c| c.genes())
            .any(|g| g.mutation_rate() != crate::genetics::DEFAULT_MUTATION_RATE);
        assert!(changed);
    }
}
