// Hierarchy construction and direct-relation resolution benchmarks.
//
// Run with: cargo bench
// View reports: target/criterion/report/index.html

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use skos_graph::{
    AnnotationProperty, Iri, OxigraphBackend, RelationshipStrategy, RootStrategy, Scope,
    SkosClass, SkosProperty, Thesaurus,
};
use std::sync::Arc;

/// Balanced taxonomy: `branching^depth` leaves, full transitive closure
/// asserted along each root-to-leaf path.
fn build_taxonomy(branching: usize, depth: usize) -> (Thesaurus, Iri) {
    let store = OxigraphBackend::new().unwrap();
    let scheme = Iri::new("http://bench.example/scheme");
    store.insert_kind(&scheme, SkosClass::ConceptScheme).unwrap();

    let root = Iri::new("http://bench.example/c0");
    store.insert_kind(&root, SkosClass::Concept).unwrap();
    store
        .insert_relation(&root, SkosProperty::TopConceptOf, &scheme)
        .unwrap();
    store
        .insert_annotation(&root, AnnotationProperty::PrefLabel, "root", Some("en"))
        .unwrap();

    // Each frontier entry carries its full ancestor chain so closure edges
    // can be asserted in one pass.
    let mut frontier: Vec<Vec<Iri>> = vec![vec![root.clone()]];
    let mut counter = 1usize;
    for _ in 0..depth {
        let mut next = Vec::new();
        for chain in &frontier {
            for _ in 0..branching {
                let node = Iri::new(format!("http://bench.example/c{counter}"));
                counter += 1;
                store.insert_kind(&node, SkosClass::Concept).unwrap();
                store
                    .insert_relation(&node, SkosProperty::InScheme, &scheme)
                    .unwrap();
                store
                    .insert_annotation(
                        &node,
                        AnnotationProperty::PrefLabel,
                        &format!("concept {counter}"),
                        Some("en"),
                    )
                    .unwrap();
                for ancestor in chain {
                    store
                        .insert_relation(ancestor, SkosProperty::NarrowerTransitive, &node)
                        .unwrap();
                    store
                        .insert_relation(&node, SkosProperty::BroaderTransitive, ancestor)
                        .unwrap();
                }
                let mut child_chain = chain.clone();
                child_chain.push(node);
                next.push(child_chain);
            }
        }
        frontier = next;
    }

    (Thesaurus::new(Arc::new(store)), scheme)
}

fn bench_hierarchy_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("hierarchy");
    for (branching, depth) in [(4, 3), (8, 2)] {
        let (thesaurus, scheme) = build_taxonomy(branching, depth);
        group.bench_with_input(
            BenchmarkId::new("build_forest", format!("b{branching}_d{depth}")),
            &(),
            |b, _| {
                b.iter(|| {
                    let forest = thesaurus
                        .concept_hierarchy(
                            &Scope::in_scheme(scheme.clone()),
                            RootStrategy::TopConcepts,
                            RelationshipStrategy::DirectNarrower,
                            Some("en"),
                        )
                        .unwrap();
                    black_box(forest)
                });
            },
        );
    }
    group.finish();
}

fn bench_direct_narrower(c: &mut Criterion) {
    let (thesaurus, scheme) = build_taxonomy(8, 2);
    let root = Iri::new("http://bench.example/c0");
    c.bench_function("direct_narrower/b8_d2_root", |b| {
        b.iter(|| {
            let narrower = thesaurus
                .direct_narrower_concepts(&root, &Scope::in_scheme(scheme.clone()))
                .unwrap();
            black_box(narrower)
        });
    });
}

criterion_group!(benches, bench_hierarchy_build, bench_direct_narrower);
criterion_main!(benches);
