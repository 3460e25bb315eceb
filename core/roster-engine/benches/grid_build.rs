//! FILENAME: core/roster-engine/benches/grid_build.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use roster_engine::{apply_filter, build_grid, derive_options, FilterAxis, FilterCriteria, ScheduleRecord};

const SHIFTS: [&str; 3] = ["Sáng", "Chiều", "Tối"];

fn roster(employees: usize, days: usize) -> Vec<ScheduleRecord> {
    let mut records = Vec::with_capacity(employees * days);
    for e in 0..employees {
        for d in 0..days {
            records.push(ScheduleRecord::new(
                format!("Nhân viên {:03}", e),
                SHIFTS[(e + d) % SHIFTS.len()],
                format!("2024-01-{:02}", d + 1),
                "Phục vụ",
            ));
        }
    }
    records
}

fn bench_grid(c: &mut Criterion) {
    let records = roster(200, 7);

    c.bench_function("build_grid 200x7", |b| {
        b.iter(|| build_grid(black_box(&records)))
    });

    c.bench_function("derive_options 200x7", |b| {
        b.iter(|| derive_options(black_box(&records)))
    });

    let criteria = FilterCriteria::all().with(FilterAxis::Shift, "Sáng");
    c.bench_function("filter+build 200x7", |b| {
        b.iter(|| build_grid(&apply_filter(black_box(&records), &criteria)))
    });
}

criterion_group!(benches, bench_grid);
criterion_main!(benches);
