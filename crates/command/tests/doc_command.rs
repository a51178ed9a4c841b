use async_trait::async_trait;
use docbot_command::{
    CommandConfig, CommandError, CommandSource, DisplayMode, DocCommand, DocElement,
    ElementLoader, Invocation, LoadedElement, Outcome, QueryApi, QueryMatch, Reply,
};
use docbot_session::SessionMiss;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Canned query results plus a loader over a fixed element list
#[derive(Default)]
struct FakeIndex {
    results: HashMap<String, Vec<QueryMatch>>,
    elements: Vec<LoadedElement>,
    queries: Mutex<Vec<String>>,
}

impl FakeIndex {
    fn with_results(mut self, query: &str, matches: Vec<QueryMatch>) -> Self {
        self.results.insert(query.to_string(), matches);
        self
    }

    fn with_element(mut self, qualified_name: &str) -> Self {
        self.elements.push(LoadedElement {
            element: DocElement {
                qualified_name: qualified_name.to_string(),
                declaration: format!("class {qualified_name}"),
                summary: "Summary.".to_string(),
                description: None,
                tags: Vec::new(),
            },
            origin: "fake".to_string(),
        });
        self
    }

    fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ElementLoader for FakeIndex {
    async fn find_by_qualified_name(
        &self,
        qualified_name: &str,
    ) -> anyhow::Result<Vec<LoadedElement>> {
        Ok(self
            .elements
            .iter()
            .filter(|loaded| loaded.element.qualified_name == qualified_name)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl QueryApi for FakeIndex {
    async fn query(
        &self,
        _loader: &dyn ElementLoader,
        query: &str,
    ) -> anyhow::Result<Vec<QueryMatch>> {
        self.queries.lock().unwrap().push(query.to_string());
        if query == "explode" {
            anyhow::bail!("index offline");
        }
        if let Some(matches) = self.results.get(query) {
            return Ok(matches.clone());
        }
        // A qualified name always finds itself
        Ok(self
            .elements
            .iter()
            .filter(|loaded| loaded.element.qualified_name == query)
            .map(|loaded| QueryMatch::exact(loaded.element.qualified_name.clone()))
            .collect())
    }
}

struct RecordingSource {
    id: String,
    sent: Mutex<Vec<(bool, Reply)>>,
}

impl RecordingSource {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn last(&self) -> (bool, Reply) {
        self.sent.lock().unwrap().last().cloned().expect("a reply")
    }
}

#[async_trait]
impl CommandSource for RecordingSource {
    fn id(&self) -> &str {
        &self.id
    }

    async fn reply(&self, reply: Reply) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push((false, reply));
        Ok(())
    }

    async fn edit_or_reply(&self, reply: Reply) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push((true, reply));
        Ok(())
    }
}

fn command(index: FakeIndex) -> (DocCommand, Arc<FakeIndex>) {
    let index = Arc::new(index);
    let command = DocCommand::new(index.clone(), index.clone(), CommandConfig::default());
    (command, index)
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[tokio::test]
async fn single_match_resolves_without_session() {
    let index = FakeIndex::default()
        .with_results("Lis", vec![QueryMatch::fuzzy("java.util.List")])
        .with_element("java.util.List");
    let (command, _) = command(index);
    let source = RecordingSource::new("m1");

    let outcome = command
        .handle(&Invocation::typed("!doc Lis"), &source)
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        Outcome::Resolved { ref qualified_name } if qualified_name == "java.util.List"
    ));
    assert!(command.sessions().is_empty().await);
    match source.last() {
        (true, Reply::Element { element, options, .. }) => {
            assert_eq!(element.qualified_name, "java.util.List");
            assert_eq!(options.display, DisplayMode::Short);
        }
        other => panic!("unexpected reply {other:?}"),
    }
}

#[tokio::test]
async fn three_fuzzy_matches_open_a_session_in_input_order() {
    let index = FakeIndex::default().with_results(
        "List",
        vec![
            QueryMatch::fuzzy("java.util.List"),
            QueryMatch::fuzzy("java.awt.List"),
            QueryMatch::fuzzy("java.util.Lists"),
        ],
    );
    let (command, _) = command(index);
    let source = RecordingSource::new("m2");

    let outcome = command
        .handle(&Invocation::typed("!javadoc long List"), &source)
        .await
        .unwrap();

    let Outcome::AmbiguousSmall { session } = outcome else {
        panic!("expected choices");
    };
    assert_eq!(session.key, "m2");
    assert_eq!(session.size, 3);
    assert_eq!(command.sessions().len().await, 1);
    assert_eq!(
        command.sessions().candidates("m2").await,
        Some(names(&["java.util.List", "java.awt.List", "java.util.Lists"]))
    );

    let (edited, reply) = source.last();
    assert!(!edited);
    let Reply::Choices { rows, .. } = reply else {
        panic!("expected choices");
    };
    let flat: Vec<(String, String)> = rows
        .into_iter()
        .flatten()
        .map(|choice| (choice.label, choice.payload))
        .collect();
    assert_eq!(
        flat,
        vec![
            ("awt.List".to_string(), "long 1 m2".to_string()),
            ("util.List".to_string(), "long 0 m2".to_string()),
            ("Lists".to_string(), "long 2 m2".to_string()),
        ]
    );
}

#[tokio::test]
async fn no_match_is_unresolved() {
    let (command, _) = command(FakeIndex::default());
    let source = RecordingSource::new("m3");

    let outcome = command
        .handle(&Invocation::structured("Nothing"), &source)
        .await
        .unwrap();

    assert!(matches!(outcome, Outcome::Unresolved));
    assert!(command.sessions().is_empty().await);
    assert_eq!(
        source.last(),
        (
            true,
            Reply::notice("I couldn't find any result for 'Nothing'")
        )
    );
}

#[tokio::test]
async fn exact_match_among_many_resolves() {
    let index = FakeIndex::default()
        .with_results(
            "String",
            vec![
                QueryMatch::fuzzy("java.lang.StringBuilder"),
                QueryMatch::exact("java.lang.String"),
            ],
        )
        .with_element("java.lang.String");
    let (command, _) = command(index);

    let outcome = command
        .handle(&Invocation::typed("!doc String"), &RecordingSource::new("m4"))
        .await
        .unwrap();
    assert!(matches!(outcome, Outcome::Resolved { .. }));
}

#[tokio::test]
async fn many_matches_show_a_preview_only() {
    let matches: Vec<QueryMatch> = (0..30)
        .map(|i| QueryMatch::fuzzy(format!("p.Type{i}")))
        .collect();
    let index = FakeIndex::default().with_results("Type", matches);
    let (command, _) = command(index);
    let source = RecordingSource::new("m5");

    let outcome = command
        .handle(&Invocation::typed("!doc Type"), &source)
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        Outcome::AmbiguousLarge {
            shown: 10,
            total: 30
        }
    ));
    assert!(command.sessions().is_empty().await);
    let (_, Reply::Preview { names, .. }) = source.last() else {
        panic!("expected preview");
    };
    assert_eq!(names.first().map(String::as_str), Some("p.Type0"));
    assert_eq!(names.len(), 10);
}

#[tokio::test]
async fn follow_up_resolves_index_and_consumes_session() {
    let index = FakeIndex::default().with_element("B");
    let (command, index) = command(index);
    command
        .sessions()
        .create_session(Some("sess42".into()), names(&["A", "B", "C"]))
        .await;
    let source = RecordingSource::new("click1");

    let outcome = command
        .handle(&Invocation::follow_up("short 1 sess42"), &source)
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        Outcome::Resolved { ref qualified_name } if qualified_name == "B"
    ));
    assert_eq!(index.queries(), vec!["B"]);
    match source.last() {
        (true, Reply::Element { options, .. }) => {
            assert_eq!(options.display, DisplayMode::Short)
        }
        other => panic!("unexpected reply {other:?}"),
    }

    let again = command
        .handle(&Invocation::follow_up("short 1 sess42"), &source)
        .await
        .unwrap();
    assert!(matches!(
        again,
        Outcome::Failed(CommandError::Session(SessionMiss::UnknownSession { .. }))
    ));
    assert_eq!(
        source.last().1,
        Reply::notice("Couldn't find any stored choices for that message")
    );
}

#[tokio::test]
async fn follow_up_with_out_of_range_index_misses() {
    let (command, index) = command(FakeIndex::default());
    command
        .sessions()
        .create_session(Some("sess42".into()), names(&["A", "B", "C"]))
        .await;
    let source = RecordingSource::new("click2");

    let outcome = command
        .handle(&Invocation::follow_up("long 5 sess42"), &source)
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        Outcome::Failed(CommandError::Session(SessionMiss::InvalidChoice {
            index: 5,
            size: 3,
            ..
        }))
    ));
    assert!(index.queries().is_empty());
    assert_eq!(
        source.last(),
        (
            true,
            Reply::notice("Somehow you provided an invalid choice")
        )
    );
}

#[tokio::test]
async fn choice_round_trip_answers_in_requested_mode() {
    let index = FakeIndex::default()
        .with_results(
            "List",
            vec![
                QueryMatch::fuzzy("java.util.List"),
                QueryMatch::fuzzy("java.awt.List"),
            ],
        )
        .with_element("java.awt.List");
    let (command, _) = command(index);
    let menu_source = RecordingSource::new("menu");

    command
        .handle(&Invocation::typed("!doc long List"), &menu_source)
        .await
        .unwrap();
    let (_, Reply::Choices { rows, .. }) = menu_source.last() else {
        panic!("expected choices");
    };
    let awt = rows
        .iter()
        .flatten()
        .find(|choice| choice.label == "awt.List")
        .expect("awt choice")
        .payload
        .clone();

    let click = RecordingSource::new("click");
    let outcome = command
        .handle(&Invocation::follow_up(awt), &click)
        .await
        .unwrap();
    assert!(matches!(outcome, Outcome::Resolved { .. }));
    match click.last() {
        (true, Reply::Element { element, options, .. }) => {
            assert_eq!(element.qualified_name, "java.awt.List");
            assert_eq!(options.display, DisplayMode::Long);
        }
        other => panic!("unexpected reply {other:?}"),
    }
    assert!(command.sessions().is_empty().await);
}

#[tokio::test]
async fn malformed_follow_up_is_a_soft_failure() {
    let (command, _) = command(FakeIndex::default());
    let source = RecordingSource::new("click3");

    let outcome = command
        .handle(&Invocation::follow_up("long abc sess42"), &source)
        .await
        .unwrap();

    assert!(matches!(outcome, Outcome::Failed(CommandError::Parse(_))));
    assert_eq!(
        source.last().1,
        Reply::notice("I couldn't understand your input: Expected an integer")
    );
}

#[tokio::test]
async fn too_short_query_is_rejected() {
    let (command, index) = command(FakeIndex::default());
    let source = RecordingSource::new("m6");

    let outcome = command
        .handle(&Invocation::typed("!doc x"), &source)
        .await
        .unwrap();

    assert!(matches!(outcome, Outcome::Failed(CommandError::Parse(_))));
    assert!(index.queries().is_empty());
}

#[tokio::test]
async fn duplicate_loaded_elements_are_reported() {
    let index = FakeIndex::default()
        .with_results("Dup", vec![QueryMatch::exact("a.Dup")])
        .with_element("a.Dup")
        .with_element("a.Dup");
    let (command, _) = command(index);
    let source = RecordingSource::new("m7");

    let outcome = command
        .handle(&Invocation::typed("!doc Dup"), &source)
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        Outcome::Failed(CommandError::AmbiguousLoad { count: 2, .. })
    ));
    assert_eq!(
        source.last(),
        (
            false,
            Reply::notice("I found multiple elements for this qualified name")
        )
    );
}

#[tokio::test]
async fn index_failure_is_a_soft_failure() {
    let (command, _) = command(FakeIndex::default());
    let outcome = command
        .handle(&Invocation::typed("!doc explode"), &RecordingSource::new("m8"))
        .await
        .unwrap();
    assert!(matches!(outcome, Outcome::Failed(CommandError::Index(_))));
}

#[tokio::test]
async fn structured_options_carry_through() {
    let index = FakeIndex::default().with_element("java.util.Map");
    let (command, _) = command(index);
    let source = RecordingSource::new("slash");

    command
        .handle(
            &Invocation::Structured {
                query: "  java.util.Map ".to_string(),
                long: true,
                omit_tags: true,
            },
            &source,
        )
        .await
        .unwrap();

    match source.last() {
        (_, Reply::Element { options, .. }) => {
            assert_eq!(options.display, DisplayMode::Long);
            assert!(options.omit_tags);
        }
        other => panic!("unexpected reply {other:?}"),
    }
}

#[tokio::test]
async fn long_as_query_is_not_a_flag() {
    let (command, index) = command(FakeIndex::default());
    command
        .handle(&Invocation::typed("!doc long"), &RecordingSource::new("m9"))
        .await
        .unwrap();
    assert_eq!(index.queries(), vec!["long"]);
}

#[tokio::test]
async fn whitespace_in_source_id_gets_a_fresh_session_key() {
    let index = FakeIndex::default().with_results(
        "Map",
        vec![QueryMatch::fuzzy("a.Map"), QueryMatch::fuzzy("b.Map")],
    );
    let (command, _) = command(index);

    let outcome = command
        .handle(&Invocation::typed("!doc Map"), &RecordingSource::new("not a key"))
        .await
        .unwrap();

    let Outcome::AmbiguousSmall { session } = outcome else {
        panic!("expected choices");
    };
    assert!(!session.key.contains(' '));
    assert!(command.sessions().contains(&session.key).await);
}

#[tokio::test]
async fn overlong_source_id_falls_back_to_a_fresh_key() {
    let index = FakeIndex::default()
        .with_results(
            "Map",
            vec![QueryMatch::fuzzy("a.Map"), QueryMatch::fuzzy("b.Map")],
        )
        .with_element("b.Map");
    let (command, _) = command(index);
    let source = RecordingSource::new(&"x".repeat(95));

    let outcome = command
        .handle(&Invocation::typed("!doc Map"), &source)
        .await
        .unwrap();

    let Outcome::AmbiguousSmall { session } = outcome else {
        panic!("expected choices");
    };
    assert_ne!(session.key, source.id);
    assert_eq!(session.key.len(), 11);

    let Reply::Choices { rows, .. } = source.last().1 else {
        panic!("expected choices");
    };
    let payloads: Vec<String> = rows.into_iter().flatten().map(|c| c.payload).collect();
    assert_eq!(payloads.len(), 2);
    assert!(payloads.iter().all(|p| p.chars().count() <= 100));

    let outcome = command
        .handle(&Invocation::follow_up(&payloads[1]), &source)
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        Outcome::Resolved { ref qualified_name } if qualified_name == "b.Map"
    ));
}

#[tokio::test]
async fn payload_over_the_limit_stores_no_session() {
    let index = Arc::new(FakeIndex::default().with_results(
        "Map",
        vec![QueryMatch::fuzzy("a.Map"), QueryMatch::fuzzy("b.Map")],
    ));
    let config = CommandConfig {
        payload_max_chars: 8,
        ..CommandConfig::default()
    };
    let command = DocCommand::new(index.clone(), index, config);
    let source = RecordingSource::new("m9");

    let outcome = command
        .handle(&Invocation::typed("!doc Map"), &source)
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        Outcome::Failed(CommandError::PayloadTooLong { limit: 8, .. })
    ));
    assert!(command.sessions().is_empty().await);
    assert_eq!(
        source.last(),
        (
            false,
            Reply::notice(
                "I found several matches but can't offer them as choices, please be more specific"
            )
        )
    );
}

#[test]
fn matches_only_addressed_messages() {
    let (command, _) = command(FakeIndex::default());
    assert!(command.matches("!doc String"));
    assert!(command.matches("  !javadoc long String"));
    assert!(!command.matches("!docs String"));
    assert!(!command.matches("doc String"));
    assert!(!command.matches("!help"));
}
