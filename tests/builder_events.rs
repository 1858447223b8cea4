use bjson::{build_from_events, ErrorKind, Event, TreeBuilder, Value};
use rstest::rstest;

/// The hand-constructed tree mirrored by `flattened_events`.
fn reference_tree() -> Value {
    let mut doc = Value::Null;
    let obj = doc.become_object();
    obj.insert("name".into(), Value::from("ada"));
    obj.insert("age".into(), Value::UInt(36));
    obj.insert("offset".into(), Value::Int(-5));
    obj.insert("ratio".into(), Value::Real(2.5));
    obj.insert(
        "tags".into(),
        Value::Array(vec![Value::from("a"), Value::Null, Value::Bool(true)]),
    );

    let mut nested = Value::Null;
    nested
        .become_object()
        .insert("deep".into(), Value::Array(vec![Value::UInt(1)]));
    obj.insert("meta".into(), nested);
    doc
}

fn flattened_events() -> Vec<Event<'static>> {
    vec![
        Event::StartObject,
        Event::Key("name"),
        Event::String("ada"),
        Event::Key("age"),
        Event::Number("36"),
        Event::Key("offset"),
        Event::Number("-5"),
        Event::Key("ratio"),
        Event::Number("2.5"),
        Event::Key("tags"),
        Event::StartArray,
        Event::String("a"),
        Event::Null,
        Event::Bool(true),
        Event::EndArray,
        Event::Key("meta"),
        Event::StartObject,
        Event::Key("deep"),
        Event::StartArray,
        Event::Number("1"),
        Event::EndArray,
        Event::EndObject,
        Event::EndObject,
    ]
}

#[rstest]
fn event_stream_rebuilds_the_reference_tree() {
    let built = build_from_events(flattened_events()).unwrap();
    assert_eq!(built, reference_tree());
}

#[rstest]
#[case(&[Event::Null], Value::Null)]
#[case(&[Event::Bool(false)], Value::Bool(false))]
#[case(&[Event::Number("7")], Value::UInt(7))]
#[case(&[Event::Number("-7")], Value::Int(-7))]
#[case(&[Event::Number("7.5")], Value::Real(7.5))]
#[case(&[Event::String("s")], Value::from("s"))]
#[case(&[Event::StartArray, Event::EndArray], Value::Array(vec![]))]
#[case(&[Event::StartObject, Event::EndObject], Value::Object(Default::default()))]
fn single_value_documents(#[case] events: &[Event<'static>], #[case] expected: Value) {
    let built = build_from_events(events.iter().copied()).unwrap();
    assert_eq!(built, expected);
}

#[rstest]
fn builder_reports_stack_underflow() {
    let mut builder = TreeBuilder::new();
    builder.event(Event::StartArray).unwrap();
    builder.event(Event::EndArray).unwrap();
    let err = builder.event(Event::EndArray).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedStructure);
}

#[rstest]
fn builder_rejects_values_after_the_document_closed() {
    let mut builder = TreeBuilder::new();
    builder.event(Event::StartObject).unwrap();
    builder.event(Event::EndObject).unwrap();
    let err = builder.event(Event::String("late")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedStructure);
}

#[rstest]
fn builder_session_is_reusable_after_reset() {
    let mut builder = TreeBuilder::new();
    builder.event(Event::StartObject).unwrap();
    builder.event(Event::Key("partial")).unwrap();

    builder.reset(Value::Null);
    builder.event(Event::Number("3")).unwrap();
    assert_eq!(builder.finish(), Value::UInt(3));
}

#[rstest]
fn number_events_route_through_the_classifier() {
    let oversized = "1".repeat(128);
    let mut builder = TreeBuilder::new();
    builder.event(Event::StartArray).unwrap();
    let err = builder.event(Event::Number(&oversized)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedNumber);

    // malformed but bounded tokens degrade to zero instead of failing
    builder.event(Event::Number("--5")).unwrap();
    builder.event(Event::Number("12x")).unwrap();
    builder.event(Event::EndArray).unwrap();
    let doc = builder.finish();
    assert_eq!(doc[0], Value::Int(0));
    assert_eq!(doc[1], Value::UInt(0));
}
