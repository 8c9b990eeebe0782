//! Benchmarks for manifest walking and declaration emission.

use std::fs;
use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use asset_decl::{emit_declaration, normalize_alias, walk_manifest, BuildManifest, DeclarationOptions, MemoryReporter};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("public")
}

/// A manifest with `bundles` bundles of `assets` untagged assets each.
fn synthetic_manifest(bundles: usize, assets: usize) -> String {
    let bundles: Vec<String> = (0..bundles)
        .map(|b| {
            let assets: Vec<String> = (0..assets)
                .map(|a| {
                    format!(
                        r#"{{"alias":["bundle{b}/sprites/item.{a}.png","item{b}_{a}"],"src":["bundle{b}/sprites/item.{a}.png"],"data":{{"tags":{{}}}}}}"#
                    )
                })
                .collect();
            format!(r#"{{"name":"bundle{b}","assets":[{}]}}"#, assets.join(","))
        })
        .collect();
    format!(r#"{{"bundles":[{}]}}"#, bundles.join(","))
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_alias", |b| {
        b.iter(|| normalize_alias(black_box("assets/ui/icons/large/star.highlight@2x.png")))
    });
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");

    let fixture = fs::read_to_string(fixtures_dir().join("manifest.json")).unwrap();
    let large = synthetic_manifest(20, 250);
    let reporter = MemoryReporter::new();

    group.bench_function("fixture", |b| {
        b.iter(|| {
            let mut manifest = BuildManifest::parse(black_box(&fixture)).unwrap();
            walk_manifest(&mut manifest, &fixtures_dir(), &reporter)
        })
    });

    group.bench_function("untagged_5000", |b| {
        b.iter(|| {
            let mut manifest = BuildManifest::parse(black_box(&large)).unwrap();
            walk_manifest(&mut manifest, &fixtures_dir(), &reporter)
        })
    });

    group.finish();
}

fn bench_emit(c: &mut Criterion) {
    let mut manifest = BuildManifest::parse(&synthetic_manifest(20, 250)).unwrap();
    let entries = walk_manifest(&mut manifest, &fixtures_dir(), &MemoryReporter::new());
    let options = DeclarationOptions::default();

    c.bench_function("emit_5000", |b| {
        b.iter(|| emit_declaration(black_box(&entries), &options))
    });
}

criterion_group!(benches, bench_normalize, bench_walk, bench_emit);
criterion_main!(benches);
