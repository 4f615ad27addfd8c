use super::*;
use std::collections::VecDeque;

/// Scripted channel: a queue of responses, plus call counters
struct FakeChannel {
    subscribe_calls: usize,
    fail_subscribe: bool,
    responses: VecDeque<Result<f32>>,
}

impl FakeChannel {
    fn with_values(values: &[f32]) -> Self {
        Self {
            subscribe_calls: 0,
            fail_subscribe: false,
            responses: values.iter().map(|v| Ok(*v)).collect(),
        }
    }
}

impl NumericChannel for FakeChannel {
    fn subscribe(&mut self) -> Result<()> {
        self.subscribe_calls += 1;
        if self.fail_subscribe {
            Err(SourceError::channel("proxy unavailable"))
        } else {
            Ok(())
        }
    }

    fn request(&mut self, _timeout: Duration) -> Result<f32> {
        self.responses
            .pop_front()
            .unwrap_or(Err(SourceError::channel("no pending response")))
    }
}

#[test]
fn test_open_subscribes_and_primes() {
    // First value is consumed by the priming request.
    let channel = FakeChannel::with_values(&[0.0, 42.5]);
    let mut source = ServiceChannelSource::new(Box::new(channel));

    source.open().unwrap();

    let mut line = String::new();
    assert!(source.read_line(&mut line).unwrap());
    assert_eq!(line, "42.5");
}

#[test]
fn test_float_rendering_uses_default_display() {
    let channel = FakeChannel::with_values(&[0.0, 80.0, 33.25]);
    let mut source = ServiceChannelSource::new(Box::new(channel));
    source.open().unwrap();

    let mut line = String::new();
    assert!(source.read_line(&mut line).unwrap());
    assert_eq!(line, "80");
    assert!(source.read_line(&mut line).unwrap());
    assert_eq!(line, "33.25");
}

#[test]
fn test_subscribe_failure_surfaces_from_open() {
    let mut channel = FakeChannel::with_values(&[]);
    channel.fail_subscribe = true;
    let mut source = ServiceChannelSource::new(Box::new(channel));

    assert!(source.open().is_err());
    assert_eq!(source.metrics().open_failures, 1);

    // Not open: reads must refuse rather than call through.
    let mut line = String::new();
    assert!(matches!(
        source.read_line(&mut line),
        Err(SourceError::NotOpen)
    ));
}

#[test]
fn test_request_failure_is_a_quiet_miss() {
    let mut channel = FakeChannel::with_values(&[0.0]);
    channel.responses.push_back(Err(SourceError::channel("timeout")));
    channel.responses.push_back(Ok(55.0));
    let mut source = ServiceChannelSource::new(Box::new(channel));
    source.open().unwrap();

    let mut line = String::new();
    // Failed request: no line, no error, source stays open.
    assert!(!source.read_line(&mut line).unwrap());
    // Next tick succeeds.
    assert!(source.read_line(&mut line).unwrap());
    assert_eq!(line, "55");
    assert_eq!(source.metrics().read_errors, 1);
}

#[test]
fn test_open_is_idempotent() {
    let channel = FakeChannel::with_values(&[0.0, 1.0]);
    let mut source = ServiceChannelSource::new(Box::new(channel));

    source.open().unwrap();
    source.open().unwrap();

    // Subscribe ran exactly once: second open consumed no responses,
    // so the single remaining value is still readable.
    let mut line = String::new();
    assert!(source.read_line(&mut line).unwrap());
    assert_eq!(line, "1");
}
