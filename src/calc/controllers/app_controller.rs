//! # Application Controller
//!
//! Runs the terminal event loop: reads key events, maps them through the
//! command registry into calculator inputs, and applies finished remote
//! computations between events.

use crate::calc::{
    commands::{CalculatorInput, CommandRegistry},
    controllers::CalculatorController,
    io::{EventStream, RenderStream, TerminalEventStream, TerminalRenderStream},
    services::ArithmeticService,
    views::{TerminalRenderer, ViewRenderer},
};
use crate::cmd_args::CommandLineArgs;
use crate::config::{self, IniProfileStore, ServiceProfile};
use anyhow::Result;
use crossterm::event::{Event, KeyEvent};
use std::io::Stdout;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The main application controller
pub struct AppController<ES: EventStream, RS: RenderStream> {
    calculator: CalculatorController<TerminalRenderer<RS>>,
    command_registry: CommandRegistry,
    event_stream: ES,
    should_quit: bool,
}

impl AppController<TerminalEventStream, TerminalRenderStream<Stdout>> {
    /// Controller bound to the real terminal, configured from the command line
    pub fn new(cmd_args: &CommandLineArgs) -> Result<Self> {
        let store = IniProfileStore::new(&config::get_profile_path());
        let profile = resolve_profile(&store, cmd_args)?;
        Self::with_io_streams(
            &profile,
            TerminalEventStream::new(),
            TerminalRenderStream::new(),
        )
    }
}

/// Load the named profile, then apply command line overrides
fn resolve_profile(store: &IniProfileStore, cmd_args: &CommandLineArgs) -> Result<ServiceProfile> {
    tracing::debug!(
        "Loading profile '{}' from '{}'",
        cmd_args.profile(),
        store.path()
    );
    let profile = store.get_profile_or_blank(cmd_args.profile())?;

    Ok(match cmd_args.server() {
        Some(server) => profile.with_server(server),
        None => profile,
    })
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Create controller with injected I/O streams
    pub fn with_io_streams(
        profile: &ServiceProfile,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let service = ArithmeticService::new(profile)?;
        let mut view_renderer = TerminalRenderer::with_render_stream(render_stream)?;
        view_renderer.set_title(format!("calcline  {}", service.base_url()));

        Ok(Self {
            calculator: CalculatorController::new(view_renderer, service),
            command_registry: CommandRegistry::new(),
            event_stream,
            should_quit: false,
        })
    }

    pub fn calculator(&self) -> &CalculatorController<TerminalRenderer<RS>> {
        &self.calculator
    }

    pub fn calculator_mut(&mut self) -> &mut CalculatorController<TerminalRenderer<RS>> {
        &mut self.calculator
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        self.calculator.view_mut().initialize()?;
        let result = self.event_loop().await;

        // Restore the terminal even when the loop failed
        self.calculator.view_mut().cleanup()?;
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        self.calculator.render()?;

        while !self.should_quit {
            self.calculator.poll_remote()?;

            if self.event_stream.poll(POLL_INTERVAL)? {
                match self.event_stream.read()? {
                    Event::Key(key_event) => self.handle_key_event(key_event)?,
                    Event::Resize(width, height) => {
                        let view = self.calculator.view_mut();
                        view.update_size(width, height);
                        view.render_full()?;
                    }
                    _ => {}
                }
            } else if self.event_stream.is_exhausted() {
                // Scripted input ran out; let the last request land, then stop
                self.calculator.wait_remote().await?;
                break;
            }

            tokio::task::yield_now().await;
        }

        Ok(())
    }

    /// Translate a key event and apply it
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        tracing::debug!("Received key event: {:?}", key_event);
        match self.command_registry.process_event(&key_event) {
            Some(CalculatorInput::Quit) => self.should_quit = true,
            Some(input) => self.calculator.handle_input(input)?,
            None => {}
        }
        Ok(())
    }
}
