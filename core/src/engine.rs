//! The kiosk engine — the single owner of staffing and session state.
//!
//! RULES:
//!   - Every intent enters through apply(), one at a time, to completion.
//!   - Staffing edits are refused while a shift is active; the only way
//!     out of a shift is clock_out or change_staffing.
//!   - A rejected intent changes nothing and emits nothing.
//!   - clock_out always ends the session, whatever the sink does.
//!   - A failed event-log write is logged; the committed events are
//!     still returned.
//!   - The session ticker lives exactly as long as the session.

use crate::{
    assignment::{AssignmentState, RoleAssignment},
    clock::{Clock, SystemClock},
    command::KioskCommand,
    config::KioskConfig,
    directory::{Employee, StaffDirectory},
    error::{KioskError, KioskResult},
    event::{EventLogEntry, KioskEvent},
    readiness,
    role::Role,
    selection::{RoleSelectionState, StaffingMode},
    session::{format_elapsed, ShiftSession},
    sink::{CompletionSink, LogSink},
    snapshot::{online_label, KioskSnapshot, SessionView},
    store::KioskStore,
    ticker::SessionTicker,
    tips::TipRotation,
    types::SessionId,
};
use chrono::Duration;

pub struct KioskEngine {
    config:     KioskConfig,
    directory:  StaffDirectory,
    selection:  RoleSelectionState,
    assignment: AssignmentState,
    session:    Option<ShiftSession>,
    ticker:     Option<SessionTicker>,
    tips:       TipRotation,
    online:     bool,
    clock:      Box<dyn Clock>,
    sink:       Box<dyn CompletionSink>,
    store:      Option<KioskStore>,
}

impl KioskEngine {
    pub fn new(config: KioskConfig, clock: Box<dyn Clock>, sink: Box<dyn CompletionSink>) -> Self {
        Self {
            directory:  StaffDirectory::new(config.staff.clone()),
            tips:       TipRotation::new(config.tips.clone()),
            selection:  RoleSelectionState::new(),
            assignment: AssignmentState::new(),
            session:    None,
            ticker:     None,
            online:     true,
            clock,
            sink,
            store:      None,
            config,
        }
    }

    /// Production wiring: host clock, records written to the log.
    pub fn build(config: KioskConfig) -> Self {
        Self::new(config, Box::new(SystemClock), Box::new(LogSink))
    }

    /// Attach an event log. Events are appended from then on.
    pub fn with_store(mut self, store: KioskStore) -> Self {
        self.store = Some(store);
        self
    }

    // ── Intents ────────────────────────────────────────────────

    /// Process one intent. Returns the events it produced.
    pub fn apply(&mut self, command: KioskCommand) -> KioskResult<Vec<KioskEvent>> {
        let name = command.name();
        if command.mutates_staffing() && self.session.is_some() {
            log::warn!("{name} rejected: {}", KioskError::SessionActive);
            return Err(KioskError::SessionActive);
        }

        let result = match command {
            KioskCommand::SelectSolo                       => self.do_select_solo(),
            KioskCommand::ToggleRole { role }              => self.do_toggle_role(role),
            KioskCommand::AssignSolo { employee_id }       => self.do_assign_solo(&employee_id),
            KioskCommand::AssignRole { role, employee_id } => self.do_assign_role(role, &employee_id),
            KioskCommand::Reset                            => self.do_reset(),
            KioskCommand::Start                            => self.do_start(),
            KioskCommand::ChangeStaffing                   => Ok(self.do_change_staffing()),
            KioskCommand::ClockOut                         => self.do_clock_out(),
            KioskCommand::SetOnline { online }             => Ok(self.do_set_online(online)),
            KioskCommand::NextTip                          => Ok(self.do_next_tip()),
            KioskCommand::Tick                             => Ok(self.do_tick()),
        };

        match result {
            Ok(events) => {
                log::debug!("{name}: {} event(s), mode={}", events.len(), self.mode().tag());
                if let Err(e) = self.persist(&events) {
                    log::error!("{name}: event log write failed, transition kept: {e}");
                }
                Ok(events)
            }
            Err(e) => {
                if e.is_precondition() {
                    log::warn!("{name} rejected: {e}");
                } else {
                    log::error!("{name} failed: {e}");
                }
                Err(e)
            }
        }
    }

    pub fn select_solo(&mut self) -> KioskResult<Vec<KioskEvent>> {
        self.apply(KioskCommand::SelectSolo)
    }

    pub fn toggle_role(&mut self, role: Role) -> KioskResult<Vec<KioskEvent>> {
        self.apply(KioskCommand::ToggleRole { role })
    }

    pub fn assign_solo(&mut self, employee_id: &str) -> KioskResult<Vec<KioskEvent>> {
        self.apply(KioskCommand::AssignSolo { employee_id: employee_id.to_string() })
    }

    pub fn assign_role(&mut self, role: Role, employee_id: &str) -> KioskResult<Vec<KioskEvent>> {
        self.apply(KioskCommand::AssignRole { role, employee_id: employee_id.to_string() })
    }

    pub fn reset(&mut self) -> KioskResult<Vec<KioskEvent>> {
        self.apply(KioskCommand::Reset)
    }

    pub fn start(&mut self) -> KioskResult<Vec<KioskEvent>> {
        self.apply(KioskCommand::Start)
    }

    pub fn change_staffing(&mut self) -> KioskResult<Vec<KioskEvent>> {
        self.apply(KioskCommand::ChangeStaffing)
    }

    pub fn clock_out(&mut self) -> KioskResult<Vec<KioskEvent>> {
        self.apply(KioskCommand::ClockOut)
    }

    pub fn set_online(&mut self, online: bool) -> KioskResult<Vec<KioskEvent>> {
        self.apply(KioskCommand::SetOnline { online })
    }

    pub fn next_tip(&mut self) -> KioskResult<Vec<KioskEvent>> {
        self.apply(KioskCommand::NextTip)
    }

    pub fn tick(&mut self) -> KioskResult<Vec<KioskEvent>> {
        self.apply(KioskCommand::Tick)
    }

    // ── Queries ────────────────────────────────────────────────

    pub fn config(&self) -> &KioskConfig            { &self.config }
    pub fn directory(&self) -> &StaffDirectory      { &self.directory }
    pub fn mode(&self) -> &StaffingMode             { self.selection.mode() }
    pub fn assignment(&self) -> &RoleAssignment     { self.assignment.current() }
    pub fn session(&self) -> Option<&ShiftSession>  { self.session.as_ref() }
    pub fn tips(&self) -> &TipRotation              { &self.tips }
    pub fn is_online(&self) -> bool                 { self.online }
    pub fn has_ticker(&self) -> bool                { self.ticker.is_some() }
    pub fn store(&self) -> Option<&KioskStore>      { self.store.as_ref() }

    pub fn search(&self, query: &str) -> Vec<Employee> {
        self.directory.search(query)
    }

    pub fn is_ready(&self) -> bool {
        readiness::is_ready(self.selection.mode(), self.assignment.current())
    }

    /// Employee covering `role` right now, if any.
    pub fn assigned_to(&self, role: Role) -> Option<&Employee> {
        self.assignment.resolve(self.selection.mode(), role)
    }

    /// Time on shift so far; None with no active session.
    pub fn elapsed(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.session.as_ref().map(|s| s.elapsed(now))
    }

    pub fn snapshot(&self) -> KioskSnapshot {
        let mode = self.selection.mode();
        let current = self.assignment.current();
        let now = self.clock.now();
        KioskSnapshot {
            device_id:     self.config.device_id.clone(),
            location_id:   self.config.location_id.clone(),
            online:        self.online,
            online_label:  online_label(self.online).to_string(),
            mode:          mode.tag().to_string(),
            active_roles:  mode.active_roles(),
            solo:          current.solo.clone(),
            assignments:   current.roles.clone(),
            ready:         readiness::is_ready(mode, current),
            missing_roles: readiness::missing_roles(mode, current),
            session:       self.session.as_ref().map(|s| SessionView {
                session_id:  s.session_id.clone(),
                summary:     s.summary(),
                clock_in_at: s.clock_in_at,
                elapsed:     format_elapsed(s.elapsed(now)),
            }),
            tip:           self.tips.current().map(str::to_string),
            tip_progress:  self.tips.progress(),
            tip_count:     self.tips.len(),
        }
    }

    // ── Transitions ────────────────────────────────────────────

    fn lookup(&self, employee_id: &str) -> KioskResult<Employee> {
        self.directory
            .get(employee_id)
            .cloned()
            .ok_or_else(|| KioskError::UnknownEmployee { id: employee_id.to_string() })
    }

    fn mode_event(&self) -> KioskEvent {
        let mode = self.selection.mode();
        KioskEvent::ModeChanged {
            mode: mode.tag().to_string(),
            active_roles: mode.active_roles(),
        }
    }

    fn do_select_solo(&mut self) -> KioskResult<Vec<KioskEvent>> {
        let change = self.selection.select_solo();
        self.assignment.apply(&change);
        Ok(vec![self.mode_event()])
    }

    fn do_toggle_role(&mut self, role: Role) -> KioskResult<Vec<KioskEvent>> {
        let change = self.selection.toggle_role(role);
        self.assignment.apply(&change);
        Ok(vec![self.mode_event()])
    }

    fn do_assign_solo(&mut self, employee_id: &str) -> KioskResult<Vec<KioskEvent>> {
        let employee = self.lookup(employee_id)?;
        self.assignment.assign_solo(self.selection.mode(), employee.clone())?;
        Ok(vec![KioskEvent::SoloAssigned { employee }])
    }

    fn do_assign_role(&mut self, role: Role, employee_id: &str) -> KioskResult<Vec<KioskEvent>> {
        let employee = self.lookup(employee_id)?;
        self.assignment.assign_role(self.selection.mode(), role, employee.clone())?;
        Ok(vec![KioskEvent::RoleAssigned { role, employee }])
    }

    fn do_reset(&mut self) -> KioskResult<Vec<KioskEvent>> {
        self.clear_staffing();
        Ok(vec![KioskEvent::StaffingReset])
    }

    fn do_start(&mut self) -> KioskResult<Vec<KioskEvent>> {
        if let Some(session) = &self.session {
            return Ok(vec![KioskEvent::ShiftResumed {
                session_id:  session.session_id.clone(),
                clock_in_at: session.clock_in_at,
            }]);
        }
        if !self.is_ready() {
            return Err(KioskError::NotReady);
        }

        let refresh_interval = self.config.refresh_interval()?;
        let tip_interval = self.config.tip_interval()?;

        let now = self.clock.now();
        let session = ShiftSession::start(
            self.selection.mode().clone(),
            self.assignment.current().clone(),
            now,
        );
        log::info!("shift {} started at {now}: {}", session.session_id, session.summary());

        self.ticker = Some(SessionTicker::acquire(now, refresh_interval, tip_interval));
        self.tips.restart();

        let event = KioskEvent::ShiftStarted {
            session_id:  session.session_id.clone(),
            clock_in_at: now,
        };
        self.session = Some(session);
        Ok(vec![event])
    }

    fn do_change_staffing(&mut self) -> Vec<KioskEvent> {
        let mut events = Vec::new();
        self.ticker = None;
        if let Some(session) = self.session.take() {
            log::info!("shift {} abandoned without clock-out", session.session_id);
            events.push(KioskEvent::ShiftAbandoned {
                session_id: session.session_id,
                at:         self.clock.now(),
            });
        }
        self.clear_staffing();
        events.push(KioskEvent::StaffingReset);
        events
    }

    fn do_clock_out(&mut self) -> KioskResult<Vec<KioskEvent>> {
        let session = self.session.take().ok_or(KioskError::NoActiveSession)?;
        self.ticker = None;

        let now = self.clock.now();
        let record = session.finish(now, &self.config.device_id, &self.config.location_id);

        let delivered = match self.sink.deliver(&record) {
            Ok(()) => true,
            Err(e) => {
                log::error!(
                    "shift {}: {} sink failed to take completion record: {e}",
                    record.session_id,
                    self.sink.name(),
                );
                false
            }
        };
        log::info!(
            "shift {} clocked out after {}",
            record.session_id,
            format_elapsed(record.duration()),
        );

        self.clear_staffing();
        Ok(vec![
            KioskEvent::ShiftCompleted { record, delivered },
            KioskEvent::StaffingReset,
        ])
    }

    fn do_set_online(&mut self, online: bool) -> Vec<KioskEvent> {
        if self.online == online {
            return Vec::new();
        }
        self.online = online;
        log::info!("connectivity: {}", online_label(online));
        vec![KioskEvent::ConnectivityChanged { online }]
    }

    fn do_next_tip(&mut self) -> Vec<KioskEvent> {
        let index = self.tips.advance();
        vec![KioskEvent::TipRotated { index }]
    }

    fn do_tick(&mut self) -> Vec<KioskEvent> {
        let (Some(ticker), Some(session)) = (self.ticker.as_mut(), self.session.as_ref()) else {
            return Vec::new();
        };

        let now = self.clock.now();
        let outcome = ticker.on_tick(now);
        let mut events = Vec::new();

        if outcome.refresh {
            events.push(KioskEvent::ElapsedRefreshed {
                session_id: session.session_id.clone(),
                elapsed:    format_elapsed(session.elapsed(now)),
            });
        }
        let steps = match self.tips.len() {
            0 => 0,
            n => outcome.tip_rotations as usize % n,
        };
        if steps > 0 {
            for _ in 0..steps {
                self.tips.advance();
            }
            events.push(KioskEvent::TipRotated { index: self.tips.index() });
        }
        events
    }

    fn clear_staffing(&mut self) {
        self.selection.reset();
        self.assignment.clear();
    }

    // ── Event log ──────────────────────────────────────────────

    /// Append audited events to the store, if one is attached.
    /// Runs after the transition; the caller only logs a failure.
    fn persist(&self, events: &[KioskEvent]) -> KioskResult<()> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        let now = self.clock.now();
        for event in events.iter().filter(|e| e.is_audited()) {
            let entry = EventLogEntry {
                id:         None,
                device_id:  self.config.device_id.clone(),
                session_id: event_session(event).or_else(|| self.current_session_id()),
                event_type: event.type_name().to_string(),
                payload:    serde_json::to_string(event)?,
                created_at: now,
            };
            store.append_event(&entry)?;
        }
        Ok(())
    }

    fn current_session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.session_id.clone())
    }
}

/// The session an event belongs to, when the event names one itself.
fn event_session(event: &KioskEvent) -> Option<SessionId> {
    match event {
        KioskEvent::ShiftStarted { session_id, .. }
        | KioskEvent::ShiftResumed { session_id, .. }
        | KioskEvent::ShiftAbandoned { session_id, .. }
        | KioskEvent::ElapsedRefreshed { session_id, .. } => Some(session_id.clone()),
        KioskEvent::ShiftCompleted { record, .. } => Some(record.session_id.clone()),
        _ => None,
    }
}
