use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use qlv_crypto::{LedgerTree, Sha256Digest, Verifier};
use qlv_types::HashValue;

fn make_tree(leaf_count: usize) -> LedgerTree {
    let leaves: Vec<HashValue> = (0..leaf_count as u64)
        .map(|i| Sha256Digest::hash(&i.to_le_bytes()))
        .collect();
    LedgerTree::from_leaves(leaves)
}

fn bench_verify(c: &mut Criterion) {
    let verifier = Verifier::sha256();
    let mut group = c.benchmark_group("verify_ion_proof");
    for &size in &[16usize, 1024, 65_536] {
        let tree = make_tree(size);
        let leaf = tree.leaf(size / 2).expect("leaf exists");
        let root = tree.root().expect("non-empty tree");
        let text = tree.proof(size / 2).expect("proof exists").to_ion_text();
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| verifier.verify(leaf, root, text).expect("well-formed proof"));
        });
    }
    group.finish();
}

fn bench_fold(c: &mut Criterion) {
    let verifier = Verifier::sha256();
    let tree = make_tree(1 << 20);
    let leaf = tree.leaf(12_345).expect("leaf exists");
    let proof = tree.proof(12_345).expect("proof exists");
    c.bench_function("fold_depth_20", |b| {
        b.iter(|| verifier.fold(&proof, leaf.as_bytes()).expect("well-formed proof"));
    });
}

criterion_group!(benches, bench_verify, bench_fold);
criterion_main!(benches);
