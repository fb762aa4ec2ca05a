//! # Calculator Controller
//!
//! Holds the calculator state, mirrors it onto the display and status
//! surfaces, and hands the final "equals" step to the remote arithmetic
//! service.
//!
//! Remote requests are tagged with tickets. Only the ticket of the latest
//! outstanding request is remembered; any input that changes the calculator
//! state in the meantime supersedes it, and a response whose ticket no longer
//! matches is dropped. The pending operation is consumed when the request is
//! issued, so it is resolved exactly once whatever the outcome.

use crate::calc::commands::CalculatorInput;
use crate::calc::models::{CalculatorModel, Operator, PendingOperation, StatusLine};
use crate::calc::services::{ArithmeticService, ComputeMessage, RemoteOutcome};
use crate::calc::views::{DisplaySurface, StatusSurface};
use anyhow::Result;

pub struct CalculatorController<V: DisplaySurface + StatusSurface> {
    model: CalculatorModel,
    status: StatusLine,
    view: V,
    service: ArithmeticService,
    next_ticket: u64,
    /// Ticket of the request whose response will be applied
    in_flight: Option<u64>,
}

impl<V: DisplaySurface + StatusSurface> CalculatorController<V> {
    pub fn new(view: V, service: ArithmeticService) -> Self {
        Self {
            model: CalculatorModel::new(),
            status: StatusLine::Idle,
            view,
            service,
            next_ticket: 1,
            in_flight: None,
        }
    }

    /// Text currently mirrored on the display surface
    pub fn display_text(&self) -> &str {
        self.model.display_text()
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn pending(&self) -> &PendingOperation {
        self.model.pending()
    }

    /// Whether a remote computation is outstanding
    pub fn is_computing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Push the whole state to both surfaces
    pub fn render(&mut self) -> Result<()> {
        self.render_display()?;
        self.render_status()
    }

    fn render_display(&mut self) -> Result<()> {
        self.view.show_value(self.model.display_text())
    }

    fn render_status(&mut self) -> Result<()> {
        self.view.show_status(&self.status.text())
    }

    fn set_status(&mut self, status: StatusLine) -> Result<()> {
        self.status = status;
        self.render_status()
    }

    /// Route one input surface trigger
    pub fn handle_input(&mut self, input: CalculatorInput) -> Result<()> {
        match input {
            CalculatorInput::Digit(d) => self.append_digit(d),
            CalculatorInput::Point => self.append_digit('.'),
            CalculatorInput::Operator(op) => self.choose_operator(op),
            CalculatorInput::Equals => self.equals().map(|_| ()),
            CalculatorInput::Clear => self.clear_all(),
            CalculatorInput::ToggleSign => self.toggle_sign(),
            CalculatorInput::Percent => self.percent(),
            CalculatorInput::Quit => Ok(()),
        }
    }

    /// Append a digit or `.` to the entry
    pub fn append_digit(&mut self, d: char) -> Result<()> {
        if !(d.is_ascii_digit() || d == '.') {
            anyhow::bail!("Not a digit: {d:?}");
        }
        if self.model.append(d) {
            self.supersede_in_flight()?;
        }
        self.render_display()
    }

    /// Start a new pending operation, collapsing a previous one locally
    pub fn choose_operator(&mut self, op: Operator) -> Result<()> {
        self.supersede_in_flight()?;
        self.model.choose_operator(op);
        self.render_display()
    }

    pub fn toggle_sign(&mut self) -> Result<()> {
        if self.model.toggle_sign() {
            self.supersede_in_flight()?;
        }
        self.render_display()
    }

    pub fn percent(&mut self) -> Result<()> {
        if self.model.percent() {
            self.supersede_in_flight()?;
        }
        self.render_display()
    }

    /// Reset the entry, drop any pending operation and blank the status line
    pub fn clear_all(&mut self) -> Result<()> {
        if let Some(ticket) = self.in_flight.take() {
            tracing::info!("Request {ticket} cancelled by clear");
        }
        self.model.clear();
        self.status = StatusLine::Idle;
        self.render()
    }

    /// Send the pending operation to the remote service.
    ///
    /// Returns false, without touching the network, when no operator is
    /// pending. The outcome is applied later by [`poll_remote`](Self::poll_remote)
    /// or [`wait_remote`](Self::wait_remote).
    pub fn equals(&mut self) -> Result<bool> {
        let Some(request) = self.model.take_remote_request() else {
            tracing::debug!("Equals with no pending operator");
            return Ok(false);
        };

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        if let Some(previous) = self.in_flight.replace(ticket) {
            tracing::info!("Request {previous} superseded by request {ticket}");
        }

        tracing::info!(
            "Request {ticket}: {} {} {}",
            request.operand1,
            request.operator,
            request.operand2
        );
        self.set_status(StatusLine::Computing)?;
        self.service.execute_async(ticket, request);
        Ok(true)
    }

    /// Apply every finished computation without blocking.
    ///
    /// Returns true if the outstanding request was resolved.
    pub fn poll_remote(&mut self) -> Result<bool> {
        let mut resolved = false;
        while let Some(message) = self.service.poll_response() {
            resolved |= self.apply_compute_message(message)?;
        }
        Ok(resolved)
    }

    /// Wait until the outstanding request is resolved.
    ///
    /// Returns false immediately when nothing is outstanding.
    pub async fn wait_remote(&mut self) -> Result<bool> {
        while self.in_flight.is_some() {
            match self.service.next_response().await {
                Some(message) => {
                    if self.apply_compute_message(message)? {
                        return Ok(true);
                    }
                }
                None => break,
            }
        }
        Ok(false)
    }

    fn apply_compute_message(&mut self, message: ComputeMessage) -> Result<bool> {
        if self.in_flight != Some(message.ticket) {
            tracing::warn!(
                "Discarding stale response for request {} ({} {} {})",
                message.ticket,
                message.request.operand1,
                message.request.operator,
                message.request.operand2
            );
            return Ok(false);
        }
        self.in_flight = None;

        let status = match message.outcome {
            RemoteOutcome::Success { result, request_id } => {
                self.model.set_result(result);
                StatusLine::RequestId(request_id)
            }
            RemoteOutcome::Rejected { message, .. } => {
                self.model.set_error();
                StatusLine::Error(message)
            }
            RemoteOutcome::CommunicationFailure { .. } => {
                self.model.set_error();
                StatusLine::CommunicationFailure
            }
        };
        self.status = status;
        self.render()?;
        Ok(true)
    }

    /// Forget the outstanding request; its response will be dropped
    fn supersede_in_flight(&mut self) -> Result<()> {
        if let Some(ticket) = self.in_flight.take() {
            tracing::info!("Request {ticket} superseded by new input");
            self.set_status(StatusLine::Idle)?;
        }
        Ok(())
    }
}
