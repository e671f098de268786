//! Particles and the swarm they form.

use rand::Rng;

use super::config::PsoConfig;
use crate::model::Problem;
use crate::runner::Candidate;
use crate::solution::Solution;

/// Snaps `target` to the nearest entry of the sorted `compatible` list.
///
/// Equidistant neighbours resolve to the larger index. Returns `None` for
/// an empty list.
pub fn snap_to_compatible(target: usize, compatible: &[usize]) -> Option<usize> {
    match compatible.binary_search(&target) {
        Ok(i) => Some(compatible[i]),
        Err(i) => {
            let below = i.checked_sub(1).map(|j| compatible[j]);
            let above = compatible.get(i).copied();
            match (below, above) {
                (Some(b), Some(a)) => Some(if target - b < a - target { b } else { a }),
                (b, a) => a.or(b),
            }
        }
    }
}

/// One particle: a position in assignment space plus a real-valued velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Solution,
    pub velocity: Vec<f64>,
    /// Personal best position and its evaluation.
    pub best: Candidate,
}

impl Particle {
    pub fn new(initial: Candidate, velocity: Vec<f64>) -> Self {
        Self {
            position: initial.solution.clone(),
            velocity,
            best: initial,
        }
    }

    pub fn best_cost(&self) -> f64 {
        self.best.evaluation.cost
    }

    /// `v = w·v + c1·r1·(pbest − pos) + c2·r2·(gbest − pos)·boost`, clamped
    /// to `[-limit, limit]`.
    pub fn update_velocity<R: Rng>(
        &mut self,
        global_best: &Solution,
        config: &PsoConfig,
        boost: f64,
        limit: f64,
        rng: &mut R,
    ) {
        for (task, v) in self.velocity.iter_mut().enumerate() {
            let pos = self.position[task] as f64;
            let personal = self.best.solution[task] as f64 - pos;
            let social = global_best[task] as f64 - pos;
            let r1: f64 = rng.random();
            let r2: f64 = rng.random();
            let next = config.inertia * *v
                + config.cognitive * r1 * personal
                + config.social * r2 * social * boost;
            *v = next.clamp(-limit, limit);
        }
    }

    /// Applies the rounded velocity to each position and snaps the result
    /// onto a compatible worker.
    ///
    /// Tasks with no compatible worker keep their position.
    pub fn move_position(&mut self, problem: &Problem) {
        let n = problem.num_workers() as i64;
        for (task, &v) in self.velocity.iter().enumerate() {
            let target = (self.position[task] as i64 + v.round() as i64).rem_euclid(n) as usize;
            if let Some(worker) = snap_to_compatible(target, problem.compatible_workers(task)) {
                self.position[task] = worker;
            }
        }
    }

    /// Replaces the personal best when `candidate` costs no more.
    pub fn offer_personal_best(&mut self, candidate: Candidate) -> bool {
        if candidate.evaluation.cost <= self.best_cost() {
            self.best = candidate;
            true
        } else {
            false
        }
    }

    pub fn heap_bytes(&self) -> usize {
        self.position.heap_bytes()
            + self.velocity.capacity() * std::mem::size_of::<f64>()
            + self.best.solution.heap_bytes()
    }
}

/// The particles plus the shared global best.
#[derive(Debug, Clone, Default)]
pub struct Swarm {
    pub particles: Vec<Particle>,
    pub global_best: Option<Candidate>,
    /// Iterations since the global best last improved.
    pub stagnation: usize,
}

impl Swarm {
    pub fn new(particles: Vec<Particle>) -> Self {
        let mut swarm = Self {
            particles,
            global_best: None,
            stagnation: 0,
        };
        swarm.refresh_global_best();
        swarm.stagnation = 0;
        swarm
    }

    pub fn global_best_cost(&self) -> f64 {
        self.global_best
            .as_ref()
            .map_or(f64::INFINITY, |c| c.evaluation.cost)
    }

    /// Adopts the cheapest personal best if it strictly improves the global
    /// best. Resets the stagnation counter on improvement and increments it
    /// otherwise.
    pub fn refresh_global_best(&mut self) -> bool {
        let cheapest = self
            .particles
            .iter()
            .map(|p| &p.best)
            .min_by(|a, b| a.evaluation.cost.total_cmp(&b.evaluation.cost));
        match cheapest {
            Some(c) if c.evaluation.cost < self.global_best_cost() => {
                self.global_best = Some(c.clone());
                self.stagnation = 0;
                true
            }
            _ => {
                self.stagnation += 1;
                false
            }
        }
    }

    /// Boost factor for the social term this iteration.
    pub fn boost<R: Rng>(&self, config: &PsoConfig, rng: &mut R) -> f64 {
        if self.stagnation > config.stagnation_limit {
            if config.boost_max > config.boost_min {
                rng.random_range(config.boost_min..=config.boost_max)
            } else {
                config.boost_min
            }
        } else {
            1.0
        }
    }

    pub fn heap_bytes(&self) -> usize {
        self.particles
            .iter()
            .map(|p| std::mem::size_of::<Particle>() + p.heap_bytes())
            .sum::<usize>()
            + self.global_best.as_ref().map_or(0, |c| c.solution.heap_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostModel;
    use crate::model::fixtures;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn candidate(problem: &Problem, assignment: Vec<usize>) -> Candidate {
        let solution = Solution::new(assignment);
        let evaluation = CostModel::default().evaluate(&solution, problem);
        Candidate {
            solution,
            evaluation,
        }
    }

    #[test]
    fn test_snap_exact_and_empty() {
        assert_eq!(snap_to_compatible(3, &[1, 3, 5]), Some(3));
        assert_eq!(snap_to_compatible(3, &[]), None);
    }

    #[test]
    fn test_snap_nearest_and_ties() {
        assert_eq!(snap_to_compatible(2, &[1, 5]), Some(1));
        assert_eq!(snap_to_compatible(4, &[1, 5]), Some(5));
        // equidistant: larger index wins
        assert_eq!(snap_to_compatible(3, &[1, 5]), Some(5));
        assert_eq!(snap_to_compatible(0, &[2, 4]), Some(2));
        assert_eq!(snap_to_compatible(9, &[2, 4]), Some(4));
    }

    #[test]
    fn test_velocity_is_clamped() {
        let problem = fixtures::team();
        let start = candidate(&problem, vec![0; problem.num_tasks()]);
        let mut particle = Particle::new(start, vec![100.0; problem.num_tasks()]);
        let global = Solution::uniform(problem.num_tasks(), 4);
        let config = PsoConfig::default().with_social(50.0);
        let mut rng = create_rng(3);
        particle.update_velocity(&global, &config, 1.5, 5.0, &mut rng);
        assert!(particle.velocity.iter().all(|v| (-5.0..=5.0).contains(v)));
    }

    #[test]
    fn test_single_worker_forces_index_zero() {
        let problem = fixtures::trivial();
        let start = candidate(&problem, vec![0]);
        let mut particle = Particle::new(start, vec![0.9]);
        for v in [-1.0, 0.4, 1.0, 7.0] {
            particle.velocity[0] = v;
            particle.move_position(&problem);
            assert_eq!(particle.position[0], 0);
        }
    }

    #[test]
    fn test_unsatisfiable_position_unchanged() {
        let problem = fixtures::unsatisfiable();
        let start = candidate(&problem, vec![1]);
        let mut particle = Particle::new(start, vec![1.0]);
        particle.move_position(&problem);
        assert_eq!(particle.position[0], 1);
    }

    #[test]
    fn test_personal_best_accepts_equal_cost() {
        let problem = fixtures::trivial();
        let mut particle = Particle::new(candidate(&problem, vec![0]), vec![0.0]);
        assert!(particle.offer_personal_best(candidate(&problem, vec![0])));
    }

    #[test]
    fn test_global_best_requires_strict_improvement() {
        let problem = fixtures::unsatisfiable();
        let p = Particle::new(candidate(&problem, vec![0]), vec![0.0]);
        let mut swarm = Swarm::new(vec![p.clone(), p]);
        assert!(swarm.global_best.is_some());
        assert_eq!(swarm.stagnation, 0);
        assert!(!swarm.refresh_global_best());
        assert!(!swarm.refresh_global_best());
        assert_eq!(swarm.stagnation, 2);
    }

    #[test]
    fn test_boost_only_after_stagnation() {
        let config = PsoConfig::default().with_stagnation_limit(2);
        let mut swarm = Swarm::default();
        let mut rng = create_rng(1);
        swarm.stagnation = 2;
        assert_eq!(swarm.boost(&config, &mut rng), 1.0);
        swarm.stagnation = 3;
        for _ in 0..50 {
            let b = swarm.boost(&config, &mut rng);
            assert!((1.0..=1.5).contains(&b));
        }
    }

    proptest! {
        #[test]
        fn prop_snap_returns_member(target in 0usize..20, mut list in prop::collection::vec(0usize..20, 1..8)) {
            list.sort_unstable();
            list.dedup();
            let snapped = snap_to_compatible(target, &list).unwrap();
            prop_assert!(list.contains(&snapped));
            let best = list.iter().map(|&w| w.abs_diff(target)).min().unwrap();
            prop_assert_eq!(snapped.abs_diff(target), best);
        }

        #[test]
        fn prop_positions_stay_in_range(seed in any::<u64>(), velocity in prop::collection::vec(-5.0f64..5.0, 12)) {
            let problem = fixtures::team();
            let mut rng = create_rng(seed);
            let start = Solution::random_compatible(&problem, &mut rng);
            let evaluation = CostModel::default().evaluate(&start, &problem);
            let mut particle = Particle::new(Candidate { solution: start, evaluation }, velocity);
            particle.move_position(&problem);
            for (task, &w) in particle.position.iter().enumerate() {
                prop_assert!(w < problem.num_workers());
                prop_assert!(problem.is_compatible(task, w));
            }
        }
    }
}
