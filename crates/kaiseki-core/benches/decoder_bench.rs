use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kaiseki_core::events::{DefaultBuildContext, DefaultCheckContext, build_events, check_events};
use kaiseki_core::search::{BeamContextGenerator, BeamSearch, ScoringModel, Sequence};
use kaiseki_core::tree::ParseTree;

struct TagContext;

impl BeamContextGenerator for TagContext {
    type Input = String;
    type Extra = ();
    type Context = usize;

    fn context(&self, position: usize, _input: &[String], _outcomes: &Sequence, _extra: &()) -> usize {
        position
    }
}

/// A cheap stand-in model so the benchmark measures the search itself.
struct UniformModel {
    outcomes: Vec<String>,
    scores: Vec<f64>,
}

impl UniformModel {
    fn new(n: usize) -> Self {
        let outcomes: Vec<String> = (0..n).map(|i| format!("T{i}")).collect();
        let scores: Vec<f64> = (0..n).map(|i| 1.0 / (i + 1) as f64).collect();
        Self { outcomes, scores }
    }
}

impl ScoringModel for UniformModel {
    type Context = usize;

    fn eval(&self, _context: &usize) -> kaiseki_core::Result<Vec<f64>> {
        Ok(self.scores.clone())
    }

    fn outcome(&self, index: usize) -> Option<&str> {
        self.outcomes.get(index).map(String::as_str)
    }

    fn outcome_index(&self, outcome: &str) -> Option<usize> {
        self.outcomes.iter().position(|o| o == outcome)
    }

    fn num_outcomes(&self) -> usize {
        self.outcomes.len()
    }
}

fn bench_beam_search(c: &mut Criterion) {
    let input: Vec<String> = (0..40).map(|i| format!("w{i}")).collect();

    for width in [1usize, 3, 10] {
        let search = BeamSearch::new(width, TagContext, UniformModel::new(45));
        c.bench_function(&format!("beam_search_40_tokens_k{width}"), |b| {
            b.iter(|| search.best_sequence(black_box(&input), &()).unwrap());
        });
    }
}

fn bench_event_extraction(c: &mut Criterion) {
    let tree = ParseTree::parse(
        "(TOP (S (NP (DT the) (JJ quick) (JJ brown) (NN fox)) \
         (VP (VBZ jumps) (PP (IN over) (NP (DT the) (JJ lazy) (NN dog)))) (. .)))",
    )
    .unwrap();

    c.bench_function("build_events_sentence", |b| {
        b.iter(|| build_events(black_box(&tree), &DefaultBuildContext).unwrap());
    });

    c.bench_function("check_events_sentence", |b| {
        b.iter(|| check_events(black_box(&tree), &DefaultCheckContext).unwrap());
    });
}

criterion_group!(benches, bench_beam_search, bench_event_extraction);
criterion_main!(benches);
