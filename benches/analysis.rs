//! Performance benchmarks for tree analysis and atlas packing.
//!
//! Run with: `cargo bench --bench analysis`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::collections::BTreeMap;

use evolution_atlas::{
    ChainNode, DatasetPipeline, EvolutionDetails, EvolutionTreeAnalyzer, EvolutionTrigger,
    GridLayout, SpeciesId, SpeciesProfile, StatBlock,
};

/// Linear chain of `len` species starting at id `base`.
fn linear_chain(base: u32, len: u32) -> ChainNode {
    let last = base + len - 1;
    let mut node = ChainNode::new(SpeciesId::new(last), format!("species-{last}"));
    if len > 1 {
        node = node.with_details(level_up(36));
    }
    for id in (base..last).rev() {
        let mut parent = ChainNode::new(SpeciesId::new(id), format!("species-{id}"));
        if id > base {
            parent = parent.with_details(level_up(16));
        }
        node = parent.with_child(node);
    }
    node
}

/// Two-level chain where the root has `n` direct branches.
fn wide_chain(n: u32) -> ChainNode {
    let mut root = ChainNode::new(SpeciesId::new(1), "root");
    for i in 0..n {
        root = root.with_child(
            ChainNode::new(SpeciesId::new(2 + i), format!("branch-{i}")).with_details(
                EvolutionDetails {
                    trigger: EvolutionTrigger::UseItem,
                    item: Some("stone".to_string()),
                    ..Default::default()
                },
            ),
        );
    }
    root
}

fn level_up(min_level: u8) -> EvolutionDetails {
    EvolutionDetails {
        trigger: EvolutionTrigger::LevelUp,
        min_level: Some(min_level),
        ..Default::default()
    }
}

fn bench_analyzer(c: &mut Criterion) {
    let analyzer = EvolutionTreeAnalyzer::new();
    let mut group = c.benchmark_group("analyzer");

    for depth in [3u32, 16, 64] {
        let chain = linear_chain(1, depth);
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_with_input(BenchmarkId::new("linear", depth), &chain, |b, chain| {
            b.iter(|| analyzer.analyze(black_box(chain)).unwrap());
        });
    }

    for width in [8u32, 64] {
        let chain = wide_chain(width);
        group.throughput(Throughput::Elements(width as u64 + 1));
        group.bench_with_input(BenchmarkId::new("wide", width), &chain, |b, chain| {
            b.iter(|| analyzer.analyze(black_box(chain)).unwrap());
        });
    }

    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    c.bench_function("layout/1024_items", |b| {
        b.iter(|| {
            let layout = GridLayout::for_item_count(black_box(1024), 96);
            let mut acc = 0u32;
            for i in 0..1024 {
                let cell = layout.slot(i);
                acc = acc.wrapping_add(cell.col ^ cell.row);
            }
            acc
        });
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let profiles: Vec<SpeciesProfile> = (1..=64)
        .map(|id| SpeciesProfile {
            id: SpeciesId::new(id),
            name: format!("species-{id}"),
            types: vec!["normal".to_string()],
            egg_groups: vec!["monster".to_string()],
            capture_rate: 45,
            stats: StatBlock {
                hp: 50,
                atk: 50,
                def: 50,
                spa: 50,
                spd: 50,
                spe: 50,
            },
            gen: 1,
            height_decimetres: 10,
            weight_hectograms: 100,
            is_legendary: false,
            is_mythical: false,
            description: String::new(),
        })
        .collect();

    let chains: Vec<ChainNode> = (0..16).map(|i| linear_chain(i * 4 + 1, 4)).collect();

    c.bench_function("pipeline/64_species_no_art", |b| {
        let pipeline = DatasetPipeline::new(16).unwrap();
        b.iter(|| {
            pipeline
                .build(
                    black_box(profiles.clone()),
                    black_box(&chains),
                    &BTreeMap::new(),
                )
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_analyzer, bench_layout, bench_pipeline);
criterion_main!(benches);
