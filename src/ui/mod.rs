//! # Desktop host
//!
//! eframe/egui window that plays the part of the event loop for the input
//! session. Every frame it
//!
//! 1. drains inbound transport events (connection state, roster snapshots),
//! 2. feeds the frame's key events to the session,
//! 3. runs one gamepad tick,
//! 4. draws the binding editor, the input echo and the roster.
//!
//! The frame callback is the only caller of the session, which keeps the
//! pipeline single threaded without any locking. Repaints are requested
//! continuously so ticks follow the display refresh rate.

pub mod common;
pub mod mapping_menu;

use egui::{Event, Grid, RichText, ScrollArea, Ui};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::controller::{GamepadSource, KeyTransition};
use crate::mapping::InputConfig;
use crate::roster::{RosterPanel, RosterView};
use crate::session::{InputEcho, SessionSlot};
use crate::transport::{InboundEvent, TransportChannel};
use common::{create_frame, key_transitions, UiColors};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Connected,
    Lost(String),
}

/// Everything the host keeps between frames, independent of egui
pub struct HostState {
    pub config: InputConfig,
    session: Option<SessionSlot>,
    pub roster: RosterPanel,
    pub connection: ConnectionStatus,
}

impl HostState {
    pub fn new(config: InputConfig, transport: Box<dyn TransportChannel>) -> Self {
        Self {
            config,
            session: Some(SessionSlot::new(transport)),
            roster: RosterPanel::new(),
            connection: ConnectionStatus::default(),
        }
    }

    pub fn handle_inbound(&mut self, event: InboundEvent) {
        match event {
            InboundEvent::Connected => {
                info!("Remote peer reachable");
                self.connection = ConnectionStatus::Connected;
                self.session = self.session.take().map(SessionSlot::connect);
            }
            InboundEvent::Disconnected(reason) => {
                warn!("Remote peer lost: {}", reason);
                self.connection = ConnectionStatus::Lost(reason);
            }
            InboundEvent::Players(snapshot) => self.roster.render(snapshot),
        }
    }

    /// Runs the pipeline for one frame.
    ///
    /// While a text field has focus key presses belong to the field, but
    /// releases are still applied so no key stays held.
    pub fn handle_frame(
        &mut self,
        events: &[Event],
        typing: bool,
        gamepad: Option<&mut dyn GamepadSource>,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        for transition in key_transitions(events) {
            if typing && matches!(transition, KeyTransition::Down(_)) {
                continue;
            }
            session.on_key(&self.config, &transition);
        }

        if let Some(gamepad) = gamepad {
            session.on_tick(&self.config, gamepad);
        }
    }

    pub fn is_live(&self) -> bool {
        self.session.as_ref().is_some_and(SessionSlot::is_live)
    }

    pub fn last_input(&self) -> Option<&InputEcho> {
        self.session.as_ref().and_then(SessionSlot::last_input)
    }

    pub fn sent(&self) -> usize {
        self.session.as_ref().map_or(0, SessionSlot::sent)
    }
}

pub struct RemotepadUI {
    state: HostState,
    gamepad: Option<Box<dyn GamepadSource>>,
    inbound_rx: mpsc::Receiver<InboundEvent>,
    transport_label: String,
}

impl RemotepadUI {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: InputConfig,
        transport: Box<dyn TransportChannel>,
        inbound_rx: mpsc::Receiver<InboundEvent>,
        gamepad: Option<Box<dyn GamepadSource>>,
        transport_label: String,
    ) -> Self {
        Self {
            state: HostState::new(config, transport),
            gamepad,
            inbound_rx,
            transport_label,
        }
    }

    fn drain_inbound(&mut self) {
        while let Ok(event) = self.inbound_rx.try_recv() {
            self.state.handle_inbound(event);
        }
    }

    fn render_status(&self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading("remotepad");
            ui.separator();
            let (text, color) = match &self.state.connection {
                ConnectionStatus::Connecting => ("Connecting".to_string(), UiColors::INACTIVE),
                ConnectionStatus::Connected => ("Connected".to_string(), UiColors::ACTIVE),
                ConnectionStatus::Lost(reason) => (format!("Lost: {}", reason), UiColors::INACTIVE),
            };
            ui.colored_label(color, text);
            ui.label(&self.transport_label);
            ui.separator();
            ui.label(format!("Sent: {}", self.state.sent()));
            if self.gamepad.is_none() {
                ui.separator();
                ui.label("Gamepad unavailable");
            }
        });
    }

    fn render_echo(&self, ui: &mut Ui) {
        create_frame(UiColors::EXTREME_BG, UiColors::BORDER).show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            match self.state.last_input() {
                Some(echo) => {
                    ui.label(RichText::new(echo.control.as_str()).strong());
                    ui.label(format!("{}", echo.input));
                    let color = if echo.pressed {
                        UiColors::ACTIVE
                    } else {
                        UiColors::INACTIVE
                    };
                    ui.colored_label(color, echo.state_label());
                    ui.small(echo.timestamp.format("%H:%M:%S%.3f").to_string());
                }
                None if self.state.is_live() => {
                    ui.label("No input yet");
                }
                None => {
                    ui.label("Waiting for connection");
                }
            }
        });
    }

    fn render_roster(&self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading("Players");
            if let Some(updated_at) = self.state.roster.updated_at() {
                ui.small(format!("updated {}", updated_at.format("%H:%M:%S")));
            }
        });
        create_frame(UiColors::INNER_BG, UiColors::BORDER).show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            let entries = self.state.roster.entries();
            if entries.is_empty() {
                ui.label("No players");
                return;
            }
            ScrollArea::vertical().show(ui, |ui| {
                Grid::new("roster_grid")
                    .num_columns(3)
                    .striped(true)
                    .show(ui, |ui| {
                        ui.strong("Player");
                        ui.strong("Selection");
                        ui.strong("Vehicle");
                        ui.end_row();
                        for entry in entries {
                            ui.label(&entry.player_name);
                            ui.label(entry.selection.to_string());
                            ui.label(&entry.selection_name);
                            ui.end_row();
                        }
                    });
            });
        });
    }
}

impl eframe::App for RemotepadUI {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_inbound();

        let events = ctx.input(|i| i.events.clone());
        let typing = ctx.wants_keyboard_input();
        self.state
            .handle_frame(&events, typing, self.gamepad.as_mut().map(|g| g.as_mut() as &mut dyn GamepadSource));

        egui::TopBottomPanel::top("status_panel").show(ctx, |ui| {
            self.render_status(ui);
        });
        egui::SidePanel::left("mapping_panel").show(ctx, |ui| {
            mapping_menu::render(ui, &mut self.state.config);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Last input");
            self.render_echo(ui);
            ui.add_space(8.0);
            self.render_roster(ui);
        });

        ctx.request_repaint();
    }
}
