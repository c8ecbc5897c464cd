//! Async consumption through `EventStream`.

use std::time::Duration;

use eventvisor::{event, Emitter};
use futures::StreamExt;

event!(Progress => "progress", u8);

#[tokio::test]
async fn stream_receives_emitted_payloads() {
    let emitter = Emitter::new();
    let (mut stream, sub) = emitter.stream::<Progress>();

    for pct in [10, 50, 100] {
        emitter.emit::<Progress>(&pct).unwrap();
    }
    sub.unsubscribe();

    let got: Vec<u8> = stream.by_ref().collect().await;
    assert_eq!(got, vec![10, 50, 100]);
}

#[tokio::test]
async fn stream_ends_when_event_is_cleared() {
    let emitter = Emitter::new();
    let (mut stream, _sub) = emitter.stream::<Progress>();
    emitter.emit::<Progress>(&1).unwrap();
    emitter.clear::<Progress>();

    assert_eq!(stream.recv().await, Some(1));
    assert_eq!(stream.recv().await, None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn stream_fed_from_blocking_producer() -> anyhow::Result<()> {
    let emitter = Emitter::new();
    let (mut stream, sub) = emitter.stream::<Progress>();

    let producer = emitter.clone();
    let handle = tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        for pct in 0..5u8 {
            producer.emit::<Progress>(&pct)?;
        }
        Ok(())
    });

    let mut got = Vec::new();
    while got.len() < 5 {
        let next = tokio::time::timeout(Duration::from_secs(1), stream.next()).await?;
        got.extend(next);
    }
    handle.await??;
    sub.unsubscribe();

    assert_eq!(got, vec![0, 1, 2, 3, 4]);
    Ok(())
}
