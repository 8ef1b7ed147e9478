use ordix::{
    Command, CommandError, CommandExecute, EngineKind, IndexEngine, KeyOrderKind, Reply,
    Settings, StatusCode,
};
use rstest::{fixture, rstest};

fn engine_with(
    kind: EngineKind,
    order: KeyOrderKind,
) -> IndexEngine {
    IndexEngine::initialize(&Settings {
        engine: kind,
        order,
        seed: Some(2025),
        ..Default::default()
    })
}

#[fixture]
fn fruits() -> Vec<&'static str> {
    vec![
        "SET banana yellow",
        "SET apple red",
        "SET cherry 'dark red'",
        "SET date brown",
    ]
}

fn entry(
    key: &str,
    value: &str,
) -> Reply {
    Reply::Entry {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn run(
    engine: &mut IndexEngine,
    line: &str,
) -> Result<Reply, ordix::StackError> {
    let command = Command::parse(line)?;
    command.execute(engine)
}

fn load(
    engine: &mut IndexEngine,
    script: &[&str],
) {
    for line in script {
        run(engine, line).unwrap();
    }
}

#[rstest]
fn test_point_commands(
    #[values(EngineKind::SkipList, EngineKind::RbTree)] kind: EngineKind,
    fruits: Vec<&'static str>,
) {
    let mut engine = engine_with(kind, KeyOrderKind::Natural);
    load(&mut engine, &fruits);

    assert_eq!(run(&mut engine, "GET cherry").unwrap(), Reply::Bulk("dark red".into()));
    assert_eq!(run(&mut engine, "EXISTS apple").unwrap(), Reply::Integer(1));
    assert_eq!(run(&mut engine, "exists kiwi").unwrap(), Reply::Integer(0));
    assert_eq!(run(&mut engine, "LEN").unwrap(), Reply::Integer(4));
    assert_eq!(run(&mut engine, "SET apple green").unwrap(), Reply::Integer(0));
    assert_eq!(run(&mut engine, "DEL apple").unwrap(), Reply::Bulk("green".into()));
    assert_eq!(run(&mut engine, "LEN").unwrap(), Reply::Integer(3));
    assert_eq!(run(&mut engine, "CHECK").unwrap(), Reply::Ok);
}

#[rstest]
fn test_ordered_commands(
    #[values(EngineKind::SkipList, EngineKind::RbTree)] kind: EngineKind,
    fruits: Vec<&'static str>,
) {
    let mut engine = engine_with(kind, KeyOrderKind::Natural);
    load(&mut engine, &fruits);

    assert_eq!(run(&mut engine, "FIRST").unwrap(), entry("apple", "red"));
    assert_eq!(run(&mut engine, "LAST").unwrap(), entry("date", "brown"));
    assert_eq!(
        run(&mut engine, "LOWER c").unwrap(),
        entry("cherry", "dark red")
    );
    assert_eq!(
        run(&mut engine, "UPPER cherry").unwrap(),
        entry("date", "brown")
    );
    assert_eq!(run(&mut engine, "UPPER date").unwrap(), Reply::Nil);
    assert_eq!(
        run(&mut engine, "RANGE b d").unwrap(),
        Reply::Entries(vec![
            ("banana".into(), "yellow".into()),
            ("cherry".into(), "dark red".into()),
        ])
    );
    assert_eq!(
        run(&mut engine, "SCAN 1").unwrap(),
        Reply::Entries(vec![("apple".into(), "red".into())])
    );
}

#[rstest]
fn test_reverse_order_commands(
    #[values(EngineKind::SkipList, EngineKind::RbTree)] kind: EngineKind,
    fruits: Vec<&'static str>,
) {
    let mut engine = engine_with(kind, KeyOrderKind::Reverse);
    load(&mut engine, &fruits);

    assert_eq!(run(&mut engine, "FIRST").unwrap(), entry("date", "brown"));
    let Reply::Entries(entries) = run(&mut engine, "SCAN").unwrap() else {
        panic!("SCAN must return entries");
    };
    let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["date", "cherry", "banana", "apple"]);
}

#[rstest]
#[case("GET nope", StatusCode::NotFound)]
#[case("DEL nope", StatusCode::NotFound)]
#[case("FROB", StatusCode::InvalidCommand)]
#[case("SET only_key", StatusCode::WrongArity)]
#[case("SCAN many", StatusCode::InvalidInteger)]
#[case("SET 'unclosed value", StatusCode::ParseError)]
fn test_error_status_codes(
    #[case] line: &str,
    #[case] status: StatusCode,
) {
    let mut engine = engine_with(EngineKind::RbTree, KeyOrderKind::Natural);

    let err = run(&mut engine, line).unwrap_err();
    assert_eq!(err.status_code(), status, "{line}: {err}");
}

#[test]
fn test_first_on_empty_index() {
    let mut engine = engine_with(EngineKind::SkipList, KeyOrderKind::Natural);

    let err = run(&mut engine, "FIRST").unwrap_err();
    assert_eq!(err.status_code(), StatusCode::EmptyStructure);
    assert_eq!(
        err.client_message(),
        "Operation 'FIRST' requires a non-empty structure"
    );
}

#[test]
fn test_parse_error_is_typed() {
    assert_eq!(
        Command::parse("RANGE a"),
        Err(CommandError::WrongArity {
            command: "RANGE",
            expected: "2",
            actual: 1
        })
    );
}

#[test]
fn test_clear_then_engine_summary() {
    let mut engine = engine_with(EngineKind::SkipList, KeyOrderKind::Natural);
    load(&mut engine, &["SET a 1", "SET b 2"]);

    assert_eq!(run(&mut engine, "CLEAR").unwrap(), Reply::Ok);
    assert_eq!(run(&mut engine, "SCAN").unwrap(), Reply::Entries(vec![]));

    let Reply::Text(summary) = run(&mut engine, "ENGINE").unwrap() else {
        panic!("ENGINE must return text");
    };
    assert!(summary.starts_with("skiplist: 0 nodes"), "{summary}");
}
