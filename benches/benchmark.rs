use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tanglegram::TangleTree;
use tanglegram::newick::parse_str;
use tanglegram::untangle::{UntangleConfig, Untangler};

/// Balanced binary tree over strains `lo..hi`, optionally with mirrored child order.
fn balanced_newick(lo: usize, hi: usize, mirrored: bool, newick: &mut String) {
    if hi - lo == 1 {
        newick.push_str(&format!("S{lo}"));
        return;
    }
    let mid = lo + (hi - lo) / 2;
    let (first, second) = if mirrored { ((mid, hi), (lo, mid)) } else { ((lo, mid), (mid, hi)) };
    newick.push('(');
    balanced_newick(first.0, first.1, mirrored, newick);
    newick.push(',');
    balanced_newick(second.0, second.1, mirrored, newick);
    newick.push(')');
}

/// Multifurcating tree with groups of `arity` strains under a
/// common root, groups listed in a rotated order.
fn star_of_groups_newick(num_groups: usize, arity: usize, rotation: usize) -> String {
    let groups: Vec<String> = (0..num_groups)
        .map(|g| {
            let group = (g + rotation) % num_groups;
            let leaves: Vec<String> = (0..arity)
                .map(|i| format!("S{}", group * arity + (i + rotation) % arity))
                .collect();
            format!("({})", leaves.join(","))
        })
        .collect();
    format!("({});", groups.join(","))
}

fn balanced_pair(num_leaves: usize) -> (TangleTree, TangleTree) {
    let mut left = String::new();
    balanced_newick(0, num_leaves, false, &mut left);
    left.push(';');
    let mut right = String::new();
    balanced_newick(0, num_leaves, true, &mut right);
    right.push(';');
    (parse_str(left).unwrap(), parse_str(right).unwrap())
}

fn untangle_binary(c: &mut Criterion) {
    let untangler = Untangler::new(UntangleConfig::default());
    for num_leaves in [64, 200] {
        let (left, right) = balanced_pair(num_leaves);
        c.bench_function(&format!("balanced-mirrored-n{num_leaves}"), |b| {
            b.iter(|| {
                let mut left = left.clone();
                let mut right = right.clone();
                black_box(untangler.untangle(&mut left, &mut right))
            });
        });
    }
}

fn untangle_multifurcating(c: &mut Criterion) {
    let untangler = Untangler::new(UntangleConfig::default());
    let left = parse_str(star_of_groups_newick(12, 6, 0)).unwrap();
    let right = parse_str(star_of_groups_newick(12, 6, 5)).unwrap();
    c.bench_function("groups-12x6", |b| {
        b.iter(|| {
            let mut left = left.clone();
            let mut right = right.clone();
            black_box(untangler.untangle(&mut left, &mut right))
        });
    });
}

criterion_group!(regression, untangle_binary);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = untangle_multifurcating
}
criterion_main!(regression, reporting);
