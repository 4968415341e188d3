use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pgstmt::{Statement, UpdateBuilder, Value, stmt};

/// SELECT col0, col1, ... FROM t WHERE col0 = $1 AND col1 IS null ...
/// with every odd column compared against null.
fn build_select(n: usize) -> Statement {
    let mut q = stmt("SELECT ");
    for i in 0..n {
        if i > 0 {
            q.push(", ");
        }
        q.push(&format!("col{i}"));
    }
    q.push(" FROM t WHERE ");
    for i in 0..n {
        if i > 0 {
            q.push(" AND ");
        }
        let value = if i % 2 == 0 { Value::Int(i as i64) } else { Value::Null };
        q.null_aware_eq(&format!("col{i}"), value);
    }
    q
}

fn bench_null_aware_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement/null_aware_select");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_select(n)));
        });
    }

    group.finish();
}

fn bench_update_builder(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement/update_builder");

    for n in [1, 5, 20, 100] {
        let columns: Vec<(String, i64)> = (0..n).map(|i| (format!("col{i}"), i)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &columns, |b, columns| {
            b.iter(|| {
                let q = UpdateBuilder::new("t", "id", 1)
                    .add_columns(columns.iter().cloned())
                    .into_statement();
                black_box(q)
            });
        });
    }

    group.finish();
}

fn bench_coerce_booleans(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement/coerce_booleans");

    for n in [5, 20, 100, 500] {
        let params: Vec<Value> = (0..n)
            .map(|i| if i % 3 == 0 { Value::Bool(i % 2 == 0) } else { Value::Int(i) })
            .collect();
        let base = Statement::with_params("SELECT 1", params);
        group.bench_with_input(BenchmarkId::from_parameter(n), &base, |b, base| {
            b.iter(|| {
                let mut q = base.clone();
                q.coerce_booleans();
                black_box(q)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_null_aware_select,
    bench_update_builder,
    bench_coerce_booleans
);
criterion_main!(benches);
