use crate::conversions::{EventRequest, EventsApi};
use anyhow::{bail, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Scripted events-API stand-in. Counts every call and captures the
/// requests it saw so tests can assert on the exact outbound shape.
#[derive(Default)]
pub struct MockEventsApi {
    pub behavior: String,
    calls: AtomicUsize,
    captured: Mutex<Vec<EventRequest>>,
}

impl MockEventsApi {
    pub fn new(behavior: &str) -> Self {
        Self {
            behavior: behavior.to_string(),
            calls: AtomicUsize::new(0),
            captured: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<EventRequest> {
        self.captured.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl EventsApi for MockEventsApi {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn send_events(&self, request: &EventRequest) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.captured.lock().unwrap().push(request.clone());

        match self.behavior.as_str() {
            "ALWAYS_FAILURE" => bail!("mock events API failure"),
            _ => Ok(()),
        }
    }
}
