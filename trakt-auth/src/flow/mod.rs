//! Device authorization flow controller.
//!
//! One [`DeviceFlow`] per process owns the single active-flow slot. A flow is
//! driven either by a background task ([`DeviceFlow::begin_polling`] or
//! [`DeviceFlow::wait_for_token`]) or step by step by the caller
//! ([`DeviceFlow::poll_once`]), never both.
//!
//! A second [`DeviceFlow::start`] while a flow is live is rejected with
//! [`AuthError::FlowAlreadyActive`]; a flow whose device code has expired
//! locally no longer counts as live.

use crate::client::{OAuthApi, PollResult};
use crate::error::AuthError;
use crate::models::{AuthToken, DeviceCode};
use crate::session::AuthSession;
use std::fmt;
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;


pub const SLOW_DOWN_INCREMENT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_NETWORK_RETRIES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowId(Uuid);

impl FlowId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Lower bound on the spacing between polls, whatever Trakt advertises.
    pub poll_interval_floor: Duration,
    pub slow_down_increment: Duration,
    /// Consecutive transport failures tolerated before the flow gives up.
    pub max_network_retries: u32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            poll_interval_floor: Duration::from_secs(5),
            slow_down_increment: SLOW_DOWN_INCREMENT,
            max_network_retries: DEFAULT_MAX_NETWORK_RETRIES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Started,
    Polling,
    Granted,
    Denied,
    Expired,
    Cancelled,
    /// Ended by an error (network outage, storage failure).
    Failed,
}

impl FlowState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, FlowState::Idle | FlowState::Started | FlowState::Polling)
    }
}

#[derive(Debug, Clone)]
pub enum FlowOutcome {
    Granted(AuthToken),
    Denied,
    Expired,
    Cancelled,
}

impl FlowOutcome {
    pub fn state(&self) -> FlowState {
        match self {
            FlowOutcome::Granted(_) => FlowState::Granted,
            FlowOutcome::Denied => FlowState::Denied,
            FlowOutcome::Expired => FlowState::Expired,
            FlowOutcome::Cancelled => FlowState::Cancelled,
        }
    }
}

/// What the user needs to complete authorization in a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowTicket {
    pub id: FlowId,
    pub user_code: String,
    pub verification_url: String,
    /// Time left before the device code expires.
    pub expires_in: Duration,
    pub interval: Duration,
}

#[derive(Debug, Clone)]
pub enum FlowStatus {
    /// Called before the poll interval elapsed; Trakt was not contacted.
    TooEarly { retry_in: Duration },
    Pending { retry_in: Duration },
    Finished(FlowOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Driver {
    Caller,
    Background,
}

struct ActiveFlow {
    id: FlowId,
    code: Arc<DeviceCode>,
    deadline: Instant,
    interval: Duration,
    next_poll_at: Instant,
    network_failures: u32,
    driver: Driver,
    cancel: CancellationToken,
}

impl ActiveFlow {
    fn ticket(&self, now: Instant) -> FlowTicket {
        FlowTicket {
            id: self.id,
            user_code: self.code.user_code().to_string(),
            verification_url: self.code.verification_url().to_string(),
            expires_in: self.deadline.saturating_duration_since(now),
            interval: self.interval,
        }
    }
}

struct Slot {
    active: Option<ActiveFlow>,
    state: FlowState,
}

impl Slot {
    /// Fails if a flow is live. An expired flow is cleared instead.
    fn ensure_vacant(&mut self, now: Instant) -> Result<(), AuthError> {
        let Some(flow) = &self.active else {
            return Ok(());
        };

        if now < flow.deadline {
            return Err(AuthError::FlowAlreadyActive {
                user_code: flow.code.user_code().to_string(),
                verification_url: flow.code.verification_url().to_string(),
            });
        }

        tracing::info!(flow_id = %flow.id, "Clearing expired device authorization");
        self.finish(FlowOutcome::Expired);
        Ok(())
    }

    fn finish(&mut self, outcome: FlowOutcome) -> FlowOutcome {
        if let Some(flow) = self.active.take() {
            flow.cancel.cancel();
        }
        self.state = outcome.state();
        outcome
    }

    fn fail(&mut self) {
        self.active = None;
        self.state = FlowState::Failed;
    }

    /// The outcome reported to a driver whose flow is no longer in the slot.
    fn vanished_outcome(&self) -> FlowOutcome {
        match self.state {
            FlowState::Expired => FlowOutcome::Expired,
            FlowState::Denied => FlowOutcome::Denied,
            _ => FlowOutcome::Cancelled,
        }
    }
}

enum Step {
    Continue(Duration),
    Finished(FlowOutcome),
}

enum Applied {
    Step(Step),
    Install(AuthToken),
}

struct Inner {
    oauth: Arc<dyn OAuthApi>,
    session: Arc<AuthSession>,
    config: FlowConfig,
    slot: Mutex<Slot>,
}

/// Runs Trakt's OAuth device authorization and installs the resulting token
/// into the [`AuthSession`].
#[derive(Clone)]
pub struct DeviceFlow {
    inner: Arc<Inner>,
}

impl DeviceFlow {
    pub fn new(oauth: Arc<dyn OAuthApi>, session: Arc<AuthSession>, config: FlowConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                oauth,
                session,
                config,
                slot: Mutex::new(Slot {
                    active: None,
                    state: FlowState::Idle,
                }),
            }),
        }
    }

    pub fn state(&self) -> FlowState {
        self.slot().state
    }

    /// The ticket of the live flow, with its remaining lifetime.
    pub fn active_ticket(&self) -> Option<FlowTicket> {
        let now = Instant::now();
        let slot = self.slot();
        slot.active
            .as_ref()
            .filter(|flow| now < flow.deadline)
            .map(|flow| flow.ticket(now))
    }

    /// Requests a device code and makes it the active flow.
    pub async fn start(&self) -> Result<FlowTicket, AuthError> {
        self.slot().ensure_vacant(Instant::now())?;

        let code = self.inner.oauth.request_device_code().await?;
        self.install_flow(code)
    }

    fn install_flow(&self, code: DeviceCode) -> Result<FlowTicket, AuthError> {
        let now = Instant::now();
        let interval = code.interval().max(self.inner.config.poll_interval_floor);
        let flow = ActiveFlow {
            id: FlowId::new(),
            deadline: now + code.expires_in(),
            interval,
            next_poll_at: now + interval,
            network_failures: 0,
            driver: Driver::Caller,
            cancel: CancellationToken::new(),
            code: Arc::new(code),
        };
        let ticket = flow.ticket(now);

        let mut slot = self.slot();
        // Another start() may have won while the code was being requested
        slot.ensure_vacant(now)?;
        slot.active = Some(flow);
        slot.state = FlowState::Started;

        tracing::info!(
            flow_id = %ticket.id,
            user_code = %ticket.user_code,
            expires_in_secs = ticket.expires_in.as_secs(),
            interval_secs = ticket.interval.as_secs(),
            "Started device authorization"
        );
        Ok(ticket)
    }

    /// Spawns the polling loop on its own task.
    pub fn begin_polling(&self) -> Result<JoinHandle<Result<FlowOutcome, AuthError>>, AuthError> {
        let (id, cancel) = self.claim_background()?;
        let flow = self.clone();
        let span = tracing::info_span!("device_flow", flow_id = %id);

        Ok(tokio::spawn(
            async move { flow.run_polling(id, cancel).await }.instrument(span),
        ))
    }

    /// Polls until the flow reaches a terminal outcome.
    pub async fn wait_for_token(&self) -> Result<FlowOutcome, AuthError> {
        let (id, cancel) = self.claim_background()?;
        self.run_polling(id, cancel)
            .instrument(tracing::info_span!("device_flow", flow_id = %id))
            .await
    }

    /// A single caller-driven poll. Does not contact Trakt when called before
    /// the poll interval has elapsed.
    pub async fn poll_once(&self) -> Result<FlowStatus, AuthError> {
        let id = match self.caller_gate()? {
            ControlFlow::Continue(id) => id,
            ControlFlow::Break(status) => return Ok(status),
        };

        match self.poll_step(id).await? {
            Step::Continue(retry_in) => Ok(FlowStatus::Pending { retry_in }),
            Step::Finished(outcome) => Ok(FlowStatus::Finished(outcome)),
        }
    }

    /// Abandons the active flow and wakes a waiting poll loop. Returns whether
    /// there was a flow to cancel.
    pub fn cancel(&self) -> bool {
        let mut slot = self.slot();
        let Some(id) = slot.active.as_ref().map(|flow| flow.id) else {
            return false;
        };

        slot.finish(FlowOutcome::Cancelled);
        tracing::info!(flow_id = %id, "Cancelled device authorization");
        true
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.inner.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn claim_background(&self) -> Result<(FlowId, CancellationToken), AuthError> {
        let mut slot = self.slot();
        let flow = slot.active.as_mut().ok_or(AuthError::NoActiveFlow)?;
        if flow.driver == Driver::Background {
            return Err(AuthError::Validation(
                "the active authorization is already being polled".to_string(),
            ));
        }

        flow.driver = Driver::Background;
        Ok((flow.id, flow.cancel.clone()))
    }

    fn caller_gate(&self) -> Result<ControlFlow<FlowStatus, FlowId>, AuthError> {
        let now = Instant::now();
        let mut guard = self.slot();
        let slot = &mut *guard;

        let Some(flow) = slot.active.as_ref() else {
            return Err(AuthError::NoActiveFlow);
        };
        if now >= flow.deadline {
            let outcome = slot.finish(FlowOutcome::Expired);
            return Ok(ControlFlow::Break(FlowStatus::Finished(outcome)));
        }

        let retry_in = flow.next_poll_at.saturating_duration_since(now);
        if flow.driver == Driver::Background {
            return Ok(ControlFlow::Break(FlowStatus::Pending { retry_in }));
        }
        if !retry_in.is_zero() {
            return Ok(ControlFlow::Break(FlowStatus::TooEarly { retry_in }));
        }
        Ok(ControlFlow::Continue(flow.id))
    }

    async fn run_polling(&self, id: FlowId, cancel: CancellationToken) -> Result<FlowOutcome, AuthError> {
        loop {
            let wake_at = match self.next_wake(id) {
                ControlFlow::Continue(at) => at,
                ControlFlow::Break(outcome) => return Ok(outcome),
            };

            tokio::select! {
                _ = cancel.cancelled() => {
                    return Ok(self.slot().vanished_outcome());
                }
                _ = tokio::time::sleep_until(wake_at) => {}
            }

            if let Step::Finished(outcome) = self.poll_step(id).await? {
                return Ok(outcome);
            }
        }
    }

    fn next_wake(&self, id: FlowId) -> ControlFlow<FlowOutcome, Instant> {
        let slot = self.slot();
        match slot.active.as_ref() {
            Some(flow) if flow.id == id => ControlFlow::Continue(flow.next_poll_at.min(flow.deadline)),
            _ => ControlFlow::Break(slot.vanished_outcome()),
        }
    }

    async fn poll_step(&self, id: FlowId) -> Result<Step, AuthError> {
        let code = match self.begin_poll(id) {
            ControlFlow::Continue(code) => code,
            ControlFlow::Break(step) => return Ok(step),
        };

        let result = self.inner.oauth.poll_for_token(&code).await;

        match self.apply_poll_result(id, result)? {
            Applied::Step(step) => Ok(step),
            Applied::Install(token) => {
                let installed = self.inner.session.install(token.clone()).await;
                self.settle_grant(installed.is_ok());
                installed?;
                tracing::info!(flow_id = %id, "Device authorization granted");
                Ok(Step::Finished(FlowOutcome::Granted(token)))
            }
        }
    }

    fn begin_poll(&self, id: FlowId) -> ControlFlow<Step, Arc<DeviceCode>> {
        let now = Instant::now();
        let mut guard = self.slot();
        let slot = &mut *guard;

        let code = match slot.active.as_ref() {
            Some(flow) if flow.id == id => {
                if now >= flow.deadline {
                    tracing::info!(flow_id = %id, "Device code expired locally");
                    return ControlFlow::Break(Step::Finished(slot.finish(FlowOutcome::Expired)));
                }
                flow.code.clone()
            }
            _ => return ControlFlow::Break(Step::Finished(slot.vanished_outcome())),
        };

        slot.state = FlowState::Polling;
        ControlFlow::Continue(code)
    }

    fn apply_poll_result(&self, id: FlowId, result: Result<PollResult, AuthError>) -> Result<Applied, AuthError> {
        let now = Instant::now();
        let mut guard = self.slot();
        let slot = &mut *guard;

        let Some(flow) = slot.active.as_mut().filter(|flow| flow.id == id) else {
            tracing::debug!(flow_id = %id, "Flow ended while polling, discarding the response");
            return Ok(Applied::Step(Step::Finished(slot.vanished_outcome())));
        };

        let outcome = match result {
            Ok(PollResult::Pending) => {
                flow.network_failures = 0;
                flow.next_poll_at = now + flow.interval;
                return Ok(Applied::Step(Step::Continue(flow.interval)));
            }
            Ok(PollResult::SlowDown) => {
                flow.network_failures = 0;
                flow.interval += self.inner.config.slow_down_increment;
                flow.next_poll_at = now + flow.interval;
                tracing::debug!(flow_id = %id, interval_secs = flow.interval.as_secs(), "Trakt asked to slow down");
                return Ok(Applied::Step(Step::Continue(flow.interval)));
            }
            Ok(PollResult::Granted(token)) => {
                // Released before persisting so a concurrent cancel cannot race the install
                slot.active = None;
                return Ok(Applied::Install(token));
            }
            Ok(PollResult::Denied) => FlowOutcome::Denied,
            Ok(PollResult::Expired) => FlowOutcome::Expired,
            Err(e) if e.is_transient() && flow.network_failures < self.inner.config.max_network_retries => {
                flow.network_failures += 1;
                flow.next_poll_at = now + flow.interval;
                tracing::warn!(
                    flow_id = %id,
                    attempt = flow.network_failures,
                    error = %e,
                    "Token poll failed, retrying"
                );
                return Ok(Applied::Step(Step::Continue(flow.interval)));
            }
            Err(e) => {
                tracing::warn!(flow_id = %id, error = %e, "Device authorization failed");
                slot.fail();
                return Err(e);
            }
        };

        tracing::info!(flow_id = %id, outcome = ?outcome.state(), "Device authorization ended");
        Ok(Applied::Step(Step::Finished(slot.finish(outcome))))
    }

    fn settle_grant(&self, installed: bool) {
        let mut slot = self.slot();
        // A new flow may already have started while the token was being stored
        if slot.active.is_none() {
            slot.state = if installed {
                FlowState::Granted
            } else {
                FlowState::Failed
            };
        }
    }
}
