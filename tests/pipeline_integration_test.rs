//! Splitter → decoder → reducer pipeline tests, independent of any client.

use bytes::Bytes;
use chatstream::conversation::{reduce, ConversationState};
use chatstream::models::Role;
use chatstream::ndjson::{decode_record, split_records, StreamEvent, TailPolicy};
use futures::stream::{self, StreamExt};

const BODY: &str = concat!(
    "{\"type\":\"conversation_id\",\"id\":\"c-7\"}\n",
    "{\"type\":\"content\",\"content\":\"Grüße, \"}\n",
    "{\"type\":\"function_call\",\"function\":\"weather\"}\r\n",
    "{\"type\":\"function_response\",\"content\":\"{\\\"temp\\\":21}\"}\n",
    "\n",
    "{\"type\":\"content\",\"content\":\"it is 21°C 🌤\"}\n",
);

/// Deterministic chunk sizes between 1 and 16 bytes
fn chunk_sizes(seed: u64) -> impl Iterator<Item = usize> {
    let mut state = seed;
    std::iter::from_fn(move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        Some((state >> 60) as usize + 1)
    })
}

fn chunked(body: &[u8], seed: u64) -> Vec<Bytes> {
    let mut chunks = Vec::new();
    let mut rest = body;
    for size in chunk_sizes(seed) {
        if rest.is_empty() {
            break;
        }
        let take = size.min(rest.len());
        chunks.push(Bytes::copy_from_slice(&rest[..take]));
        rest = &rest[take..];
    }
    chunks
}

async fn events_for(chunks: Vec<Bytes>) -> Vec<StreamEvent> {
    let source = stream::iter(chunks.into_iter().map(Ok::<_, std::io::Error>));
    split_records(source, TailPolicy::Discard)
        .map(|record| decode_record(&record.unwrap()))
        .filter_map(|decoded| async move { decoded.ok() })
        .collect()
        .await
}

#[tokio::test]
async fn test_event_sequence_independent_of_chunking() {
    let whole = events_for(vec![Bytes::from(BODY)]).await;
    assert_eq!(whole.len(), 5);

    for seed in 0..64 {
        let events = events_for(chunked(BODY.as_bytes(), seed)).await;
        assert_eq!(events, whole, "chunking with seed {} changed the events", seed);
    }
}

#[tokio::test]
async fn test_reduced_transcript() {
    let events = events_for(chunked(BODY.as_bytes(), 3)).await;

    let mut state = ConversationState::new();
    state.push_user("weather?");
    state.open_assistant();
    for event in &events {
        state = reduce(state, event).0;
    }

    assert_eq!(state.conversation_id(), Some("c-7"));
    assert_eq!(state.pending_function_call(), None);
    assert_eq!(state.count_role(Role::Assistant), 1);
    assert_eq!(
        state.transcript()[1].content,
        "Grüße, \n\n*Calling function: weather*\n\n\n\n*Function response:*\n```json\n{\"temp\":21}\n```\n\nit is 21°C 🌤"
    );
}

#[tokio::test]
async fn test_invalid_utf8_is_replaced_not_fatal() {
    let mut body = b"{\"type\":\"content\",\"content\":\"a".to_vec();
    body.push(0xFF);
    body.extend_from_slice(b"b\"}\n");

    let events = events_for(vec![Bytes::from(body)]).await;
    assert_eq!(
        events,
        vec![StreamEvent::Content {
            text: "a\u{FFFD}b".to_string()
        }]
    );
}
