use criterion::{criterion_group, criterion_main, Criterion};
use keynotes::document::{KeyDataDoc, KeyEntryDoc, NoteDoc};
use keynotes::layer::Layer;
use keynotes::layout::{KnownLayout, Layout};
use keynotes::model::KeyData;
use std::collections::BTreeMap;
use std::hint::black_box;

fn setup_source(layout: &Layout) -> KeyDataDoc {
    let mut source = BTreeMap::new();
    for (i, id) in layout.annotatable_ids().into_iter().enumerate() {
        let mut notes = BTreeMap::new();
        for (j, layer) in Layer::all().enumerate() {
            notes.insert(
                layer.to_string(),
                NoteDoc {
                    text: Some(format!("note {} {}", i, j)),
                    status: Some("used".to_string()),
                },
            );
        }
        source.insert(
            id.to_string(),
            KeyEntryDoc {
                label: Some(id.to_string()),
                notes,
            },
        );
    }
    // Stale entries from a board that no longer exists.
    for i in 0..40 {
        source.insert(format!("Ghost{}", i), KeyEntryDoc::default());
    }
    source
}

fn bench_reconcile(c: &mut Criterion) {
    let layout = KnownLayout::Full.layout();
    let source = setup_source(&layout);

    c.bench_function("empty_for_full_board", |b| {
        b.iter(|| KeyData::empty_for(black_box(&layout)))
    });

    c.bench_function("reconcile_full_board", |b| {
        b.iter(|| KeyData::reconcile(black_box(Some(&source)), black_box(&layout)))
    });

    let data = KeyData::reconcile(Some(&source), &layout);
    let compact = KnownLayout::Compact.layout();
    c.bench_function("rekey_full_to_compact", |b| {
        b.iter(|| black_box(&data).rekeyed_for(black_box(&compact)))
    });
}

criterion_group!(benches, bench_reconcile);
criterion_main!(benches);
