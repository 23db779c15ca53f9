//! Scripted doubles for every port, shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{ApiClient, HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::clock::Clock;
use crate::session::navigator::HistoryNavigator;
use crate::session::storage::{MemoryStore, TokenStore};

/// Replays queued responses in order and records every request
#[derive(Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<HttpRequest>>,
    clock: RefCell<Option<Rc<FakeClock>>>,
    latency_ms: Cell<f64>,
    suspend: Cell<bool>,
}

impl ScriptedTransport {
    pub fn respond(&self, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub fn fail(&self, message: &str) {
        self.responses
            .borrow_mut()
            .push_back(Err(TransportError(message.to_string())));
    }

    /// Every request advances the fake clock by `ms`
    pub fn set_latency(&self, ms: f64) {
        self.latency_ms.set(ms);
    }

    /// Every request yields once before answering, letting joined futures observe it in flight
    pub fn set_suspend(&self, suspend: bool) {
        self.suspend.set(suspend);
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url.clone()).collect()
    }
}

#[async_trait(?Send)]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        if let Some(clock) = self.clock.borrow().as_ref() {
            clock.advance(self.latency_ms.get());
        }
        if self.suspend.get() {
            YieldOnce(false).await;
        }
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted response".to_string())))
    }
}

/// Manually driven clock; `sleep` advances time and yields once
#[derive(Default)]
pub struct FakeClock {
    now: Cell<f64>,
    sleeps: RefCell<Vec<Duration>>,
}

impl FakeClock {
    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Clock for FakeClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        self.advance(duration.as_millis() as f64);
        YieldOnce(false).await;
    }
}

/// Returns `Pending` exactly once so concurrently joined futures interleave
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// Fully wired client over in-memory ports
pub struct Harness {
    pub transport: Rc<ScriptedTransport>,
    pub tokens: TokenStore,
    pub navigator: Rc<HistoryNavigator>,
    pub clock: Rc<FakeClock>,
    pub api: Rc<ApiClient>,
}

impl Harness {
    pub fn new() -> Self {
        let transport = Rc::new(ScriptedTransport::default());
        let clock = Rc::new(FakeClock::default());
        *transport.clock.borrow_mut() = Some(clock.clone());

        let tokens = TokenStore::new(Rc::new(MemoryStore::new()));
        let navigator = Rc::new(HistoryNavigator::new());
        let api = Rc::new(ApiClient::new(
            "http://api.test",
            transport.clone(),
            tokens.clone(),
            navigator.clone(),
        ));

        Self {
            transport,
            tokens,
            navigator,
            clock,
            api,
        }
    }
}
