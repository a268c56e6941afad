use std::fmt::Write;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use newick_io::model::Tree;
use newick_io::newick::{NewickParser, NewickWriter};
use newick_io::parser::InMemoryTextSource;

// (name, leaves per tree, number of trees)
const GENERATED_SETS: &[(&str, usize, usize)] = &[
    ("n50-t1k", 50, 1_000),
    ("n129-t1k", 129, 1_000),
    ("n1k-t100", 1_000, 100),
];

const FIXTURE: &str = "tests/fixtures/newick_t3_n5.nwk";

/// Balanced tree over `leaves` taxa with branch lengths and integer support.
fn balanced_newick(out: &mut String, first: usize, leaves: usize) {
    if leaves == 1 {
        let _ = write!(out, "t{first}:0.{:05}", first * 37 % 100_000);
        return;
    }
    let left = leaves / 2;
    out.push('(');
    balanced_newick(out, first, left);
    out.push(',');
    balanced_newick(out, first + left, leaves - left);
    let _ = write!(out, "){}:0.{:05}", 50 + leaves % 50, leaves * 13 % 100_000);
}

fn generate(leaves: usize, trees: usize) -> String {
    let mut text = String::new();
    for _ in 0..trees {
        balanced_newick(&mut text, 0, leaves);
        text.push_str(";\n");
    }
    text
}

fn parse_text(text: &str) -> Vec<Tree> {
    NewickParser::new()
        .parse_all(InMemoryTextSource::from_string(text))
        .unwrap()
}

fn newick_parsing(c: &mut Criterion) {
    for (name, leaves, trees) in GENERATED_SETS {
        let text = generate(*leaves, *trees);
        c.bench_function(&format!("parse {name}"), |b| {
            b.iter(|| parse_text(black_box(&text)));
        });
    }

    c.bench_function("parse fixture file", |b| {
        b.iter(|| newick_io::parse_newick_file(black_box(FIXTURE)).unwrap());
    });
}

fn newick_writing(c: &mut Criterion) {
    let writer = NewickWriter::new();
    for (name, leaves, trees) in GENERATED_SETS {
        let parsed = parse_text(&generate(*leaves, *trees));
        c.bench_function(&format!("write {name}"), |b| {
            b.iter(|| {
                let mut out = Vec::new();
                writer.write(&mut out, parsed.iter().cloned()).unwrap();
                out
            });
        });
    }
}

criterion_group!(regression, newick_parsing, newick_writing);
criterion_main!(regression);
