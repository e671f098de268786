//! Criterion benchmarks for u-assign search strategies.
//!
//! Uses seeded synthetic teams so every strategy searches identical
//! problems; the cost evaluator is measured separately.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_assign::random::create_rng;
use u_assign::{
    AcoConfig, AntColonySearch, CostModel, GaConfig, GeneticSearch, ParticleSwarmSearch, Problem,
    PsoConfig, Solution, Solver, Task, Worker,
};

const SKILLS: [&str; 4] = ["backend", "frontend", "ops", "data"];

/// `tasks` tasks over `workers` workers with random skills and levels.
fn synthetic_problem(tasks: usize, workers: usize, seed: u64) -> Problem {
    let mut rng = create_rng(seed);
    let task_list = (0..tasks)
        .map(|i| {
            Task::new(
                i,
                format!("T{i}"),
                rng.random_range(1.0..6.0),
                rng.random_range(1..=4),
                rng.random_range(10.0..60.0),
                SKILLS[rng.random_range(0..SKILLS.len())],
            )
        })
        .collect();
    let worker_list = (0..workers)
        .map(|i| {
            let skills: Vec<&str> = SKILLS.iter().copied().filter(|_| rng.random_bool(0.5)).collect();
            Worker::new(
                i,
                format!("W{i}"),
                rng.random_range(20.0..40.0),
                rng.random_range(2..=5),
                skills,
            )
        })
        .collect();
    // synthetic lists are index-stable by construction
    Problem::new(task_list, worker_list).unwrap()
}

const SIZES: [(usize, usize); 3] = [(20, 5), (60, 12), (150, 25)];

fn bench_cost_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("cost_model");
    let model = CostModel::default();

    for (tasks, workers) in SIZES {
        let problem = synthetic_problem(tasks, workers, 7);
        let solution = Solution::random_compatible(&problem, &mut create_rng(1));
        group.bench_with_input(
            BenchmarkId::new(format!("t{tasks}_w{workers}"), tasks),
            &(problem, solution),
            |b, (p, s)| b.iter(|| black_box(model.evaluate(black_box(s), black_box(p)))),
        );
    }
    group.finish();
}

fn bench_genetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("genetic");
    group.sample_size(10);

    for (tasks, workers) in SIZES {
        let problem = synthetic_problem(tasks, workers, 7);
        let config = GaConfig::default()
            .with_population_size(50)
            .with_max_generations(30);
        group.bench_with_input(
            BenchmarkId::new(format!("t{tasks}_w{workers}"), tasks),
            &(problem, config),
            |b, (p, c)| {
                b.iter(|| {
                    let mut ga = GeneticSearch::seeded(p, c.clone(), 42).unwrap();
                    black_box(ga.run().unwrap())
                })
            },
        );
    }
    group.finish();
}

fn bench_ant_colony(c: &mut Criterion) {
    let mut group = c.benchmark_group("ant_colony");
    group.sample_size(10);

    for (tasks, workers) in SIZES {
        let problem = synthetic_problem(tasks, workers, 7);
        let config = AcoConfig::default().with_ant_count(30).with_max_iterations(30);
        group.bench_with_input(
            BenchmarkId::new(format!("t{tasks}_w{workers}"), tasks),
            &(problem, config),
            |b, (p, c)| {
                b.iter(|| {
                    let mut aco = AntColonySearch::seeded(p, c.clone(), 42).unwrap();
                    black_box(aco.run().unwrap())
                })
            },
        );
    }
    group.finish();
}

fn bench_particle_swarm(c: &mut Criterion) {
    let mut group = c.benchmark_group("particle_swarm");
    group.sample_size(10);

    for (tasks, workers) in SIZES {
        let problem = synthetic_problem(tasks, workers, 7);
        let config = PsoConfig::default().with_swarm_size(30).with_max_iterations(30);
        group.bench_with_input(
            BenchmarkId::new(format!("t{tasks}_w{workers}"), tasks),
            &(problem, config),
            |b, (p, c)| {
                b.iter(|| {
                    let mut pso = ParticleSwarmSearch::seeded(p, c.clone(), 42).unwrap();
                    black_box(pso.run().unwrap())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_cost_model,
    bench_genetic,
    bench_ant_colony,
    bench_particle_swarm
);
criterion_main!(benches);
