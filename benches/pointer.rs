use bjson::{build_from_events, Event, JsonPointer, Value};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn wide_document(width: usize, depth: usize) -> Value {
    let mut doc = Value::Null;
    for i in 0..width {
        let mut path = String::new();
        for level in 0..depth {
            path.push_str(&format!("/level{level}"));
        }
        path.push_str(&format!("/item{i}"));
        bjson::set(&mut doc, &path, i as u64).expect("seed write failed");
    }
    doc
}

fn event_stream(len: usize) -> Vec<Event<'static>> {
    let mut events = vec![Event::StartArray];
    for _ in 0..len {
        events.extend_from_slice(&[
            Event::StartObject,
            Event::Key("flag"),
            Event::Bool(true),
            Event::Key("count"),
            Event::Number("1234"),
            Event::Key("label"),
            Event::String("entry"),
            Event::EndObject,
        ]);
    }
    events.push(Event::EndArray);
    events
}

fn bench_pointer(c: &mut Criterion) {
    let doc = wide_document(64, 6);
    let ptr = JsonPointer::new("/level0/level1/level2/level3/level4/level5/item42");
    let events = event_stream(256);

    let mut group = c.benchmark_group("pointer");
    group.bench_function("resolve_deep", |b| {
        b.iter(|| {
            let found = ptr.resolve(black_box(&doc)).expect("resolve failed");
            black_box(found);
        });
    });
    group.bench_function("set_autovivify", |b| {
        b.iter(|| {
            let mut doc = Value::Null;
            bjson::set(&mut doc, black_box("/a/b/c/d/0"), 1u64).expect("set failed");
            black_box(doc);
        });
    });
    group.bench_function("set_overwrite", |b| {
        let mut target = doc.clone();
        b.iter(|| {
            ptr.set(black_box(&mut target), 7u64).expect("set failed");
        });
    });
    group.bench_function("build_events", |b| {
        b.iter(|| {
            let built = build_from_events(black_box(events.iter().copied()))
                .expect("build failed");
            black_box(built);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_pointer);
criterion_main!(benches);
