use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

use grammatik_core::corpus::ValidatedCorpus;
use grammatik_core::model::{count_blanks, ChecklistItem, Level};
use grammatik_core::source::RawGroup;

fn make_record(level: Level, item: ChecklistItem, i: usize) -> Value {
    if i % 2 == 0 {
        json!({
            "id": format!("{}-{}-{i:04}", level.dir_name(), item),
            "level": level.as_str(),
            "verb": "helfen",
            "checklist_item": item.as_str(),
            "task_type": "multiple_choice",
            "sentence": "Ich helfe … Mann.",
            "solution": "dem",
            "choices": ["dem", "den", "der"]
        })
    } else {
        json!({
            "id": format!("{}-{}-{i:04}", level.dir_name(), item),
            "level": level.as_str(),
            "verb": "sehen",
            "checklist_item": item.as_str(),
            "task_type": "fill_blank",
            "sentence": "Ich ___ ein__ gut__ Film.",
            "solution": ["sehe", "einen", "guten"]
        })
    }
}

fn make_groups(per_group: usize) -> Vec<RawGroup> {
    let mut groups = Vec::new();
    for level in Level::ALL {
        for item in ChecklistItem::ALL {
            let records = (0..per_group).map(|i| make_record(level, item, i)).collect();
            groups.push(RawGroup::new(level, item, records));
        }
    }
    groups
}

fn bench_build_corpus(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_corpus");

    for per_group in [10, 100] {
        let groups = make_groups(per_group);
        group.bench_function(format!("{} records", groups.len() * per_group), |b| {
            b.iter(|| ValidatedCorpus::build(black_box(&groups)))
        });
    }

    group.finish();
}

fn bench_count_blanks(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_blanks");

    group.bench_function("three_blanks", |b| {
        b.iter(|| count_blanks(black_box("Ich ___ ein__ gut__ Film.")))
    });

    let long = "Wir ___ gestern mit dem Zug nach Berlin ___. ".repeat(20);
    group.bench_function("long_sentence", |b| {
        b.iter(|| count_blanks(black_box(&long)))
    });

    group.finish();
}

criterion_group!(benches, bench_build_corpus, bench_count_blanks);
criterion_main!(benches);
