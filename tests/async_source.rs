use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use chat_typeahead::compose::{message_options, ComposeCandidate, Directory};
use chat_typeahead::typeahead::{
    InputField, Responder, Source, Typeahead, TypeaheadOptions, TypeaheadRegistry,
    TypeaheadSettings,
};

const WAIT: Duration = Duration::from_secs(2);

fn delayed_widget(text: &str, delay: Duration) -> Typeahead<ComposeCandidate, InputField> {
    let options = message_options(
        Arc::new(Directory::default()),
        TypeaheadSettings::default(),
        Some(delay),
    );
    Typeahead::new(InputField::new().with_text(text), options)
}

fn shown_names(widget: &Typeahead<ComposeCandidate, InputField>) -> Vec<String> {
    widget
        .menu()
        .entries()
        .iter()
        .map(|entry| entry.value.name.clone())
        .collect()
}

#[tokio::test]
async fn streams_arrive_after_the_delay() {
    let mut widget = delayed_widget("#ge", Duration::from_millis(10));
    widget.lookup(false);
    assert!(!widget.is_shown());
    assert_eq!(widget.lookup_seq(), 1);

    let applied = timeout(WAIT, widget.next_reply()).await.unwrap();
    assert!(applied);
    assert!(widget.is_shown());
    assert_eq!(shown_names(&widget), ["general"]);
}

#[tokio::test]
async fn only_the_latest_lookup_is_rendered() {
    let mut widget = delayed_widget("#d", Duration::from_millis(20));
    widget.lookup(false);
    widget.field_mut().type_char('e');
    widget.lookup(false);
    assert_eq!(widget.lookup_seq(), 2);

    let first = timeout(WAIT, widget.next_reply()).await.unwrap();
    let second = timeout(WAIT, widget.next_reply()).await.unwrap();
    assert_eq!([first, second].iter().filter(|applied| **applied).count(), 1);

    assert_eq!(widget.query(), "#de");
    assert_eq!(shown_names(&widget), ["design", "devel"]);
}

#[tokio::test]
async fn mentions_stay_synchronous_with_a_delayed_stream_source() {
    let mut widget = delayed_widget("@car", Duration::from_millis(500));
    widget.lookup(false);
    assert!(widget.is_shown());
    assert_eq!(shown_names(&widget), ["carol"]);
}

#[tokio::test]
async fn pump_applies_replies_that_already_arrived() {
    let (held_tx, mut held_rx) = tokio::sync::mpsc::unbounded_channel::<Responder<String>>();
    let source = Source::provider(move |_query: &str, responder: Responder<String>| {
        let _ = held_tx.send(responder);
        None
    });
    let options = TypeaheadOptions::new(source, |name: &String| name.clone());
    let mut registry = TypeaheadRegistry::new();
    registry.create_typeahead("topic", InputField::new().with_text("an"), options);

    registry.trigger_lookup("topic").unwrap();
    registry.trigger_lookup("topic").unwrap();
    let stale = held_rx.recv().await.unwrap();
    let fresh = held_rx.recv().await.unwrap();
    assert_eq!((stale.seq(), fresh.seq()), (1, 2));

    fresh.respond(vec!["announce".to_string(), "random".to_string()]);
    stale.respond(vec!["stale".to_string()]);

    let widget = registry.get_mut("topic").unwrap();
    assert_eq!(widget.pump_replies(), 1);
    let names: Vec<&str> = widget
        .menu()
        .entries()
        .iter()
        .map(|entry| entry.value.as_str())
        .collect();
    assert_eq!(names, ["announce", "random"]);
}

#[tokio::test]
async fn destroyed_widget_ignores_late_replies() {
    let mut registry = TypeaheadRegistry::new();
    registry.create_typeahead(
        "compose",
        InputField::new().with_text("#g"),
        message_options(
            Arc::new(Directory::default()),
            TypeaheadSettings::default(),
            Some(Duration::from_millis(5)),
        ),
    );
    registry.trigger_lookup("compose").unwrap();
    let field = registry.destroy("compose").unwrap();
    assert_eq!(field.value(), "#g");
    assert!(registry.is_empty());

    // The background task finds the channel closed and just logs it.
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(registry.trigger_lookup("compose").is_err());
}
