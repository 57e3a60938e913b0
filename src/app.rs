use crate::clipboard::ClipboardSink;
use crate::clock::{Clock, SystemClock};
use crate::domain::{
    complete, format_duration, summarize, Focus, IdleDisposition, IntervalEdit, IntervalFilter, PrimaryAction,
    StoreEvent, Summary, TimeWindow, TrackingEvent, TrackingState, UiMode, WorkedInterval, WorkedTimeStore,
};
use crate::error::StoreError;
use crate::idle::{IdleMonitor, IdleProbe, NoIdleProbe};
use crate::notifications::{idle_detected_message, interval_saved_message, NotificationSink};
use crate::persistence::{format_timestamp, parse_timestamp, save_tracking_state, Settings};
use crate::ticker::ElapsedTicker;
use chrono::{DateTime, Duration, Local};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Format used for editing interval timestamps
const EDIT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Line shown at the bottom of the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

/// Form for choosing the task and client
#[derive(Debug, Clone, Default)]
pub struct LabelForm {
    pub task: String,
    pub client: String,
    pub editing_field: usize, // 0 = task, 1 = client
}

impl LabelForm {
    fn active_mut(&mut self) -> &mut String {
        if self.editing_field == 0 {
            &mut self.task
        } else {
            &mut self.client
        }
    }
}

/// Form for editing a stored interval
#[derive(Debug, Clone)]
pub struct IntervalForm {
    pub id: Uuid,
    pub task: String,
    pub client: String,
    pub start: String,
    pub end: String,
    pub editing_field: usize, // 0 = task, 1 = client, 2 = start, 3 = end
}

impl IntervalForm {
    pub const FIELDS: usize = 4;

    fn from_interval(interval: &WorkedInterval) -> Self {
        Self {
            id: interval.id,
            task: interval.task.clone(),
            client: interval.client.clone(),
            start: interval.start.format(EDIT_TIME_FORMAT).to_string(),
            end: interval.end.format(EDIT_TIME_FORMAT).to_string(),
            editing_field: 0,
        }
    }

    fn active_mut(&mut self) -> &mut String {
        match self.editing_field {
            0 => &mut self.task,
            1 => &mut self.client,
            2 => &mut self.start,
            _ => &mut self.end,
        }
    }
}

/// Multi-select list of task or client names for the history filter
#[derive(Debug, Clone)]
pub struct FilterPicker {
    pub options: Vec<String>,
    pub selected: BTreeSet<String>,
    pub cursor: usize,
}

impl FilterPicker {
    fn new(options: Vec<String>, current: Option<&BTreeSet<String>>) -> Self {
        let selected = match current {
            Some(current) => current.clone(),
            None => options.iter().cloned().collect(),
        };
        Self {
            options,
            selected,
            cursor: 0,
        }
    }

    /// The filter dimension this selection amounts to (`None` = everything)
    fn into_constraint(self) -> Option<BTreeSet<String>> {
        if self.options.iter().all(|option| self.selected.contains(option)) {
            None
        } else {
            Some(self.selected)
        }
    }
}

/// The history browser: a time window, optional task/client filters and the
/// matching intervals
#[derive(Debug, Clone)]
pub struct HistoryView {
    pub window: TimeWindow,
    pub tasks: Option<BTreeSet<String>>,
    pub clients: Option<BTreeSet<String>>,
    pub rows: Vec<WorkedInterval>,
    pub selected: usize,
}

impl Default for HistoryView {
    fn default() -> Self {
        Self {
            window: TimeWindow::Today,
            tasks: None,
            clients: None,
            rows: Vec::new(),
            selected: 0,
        }
    }
}

impl HistoryView {
    pub fn filter(&self, now: DateTime<Local>) -> IntervalFilter {
        let mut filter = IntervalFilter::new().with_window(self.window, now);
        if let Some(tasks) = &self.tasks {
            filter = filter.with_tasks(tasks.iter().cloned());
        }
        if let Some(clients) = &self.clients {
            filter = filter.with_clients(clients.iter().cloned());
        }
        filter
    }

    pub fn selected_interval(&self) -> Option<&WorkedInterval> {
        self.rows.get(self.selected)
    }
}

/// Main application state
pub struct AppState {
    pub tracking: TrackingState,
    pub store: WorkedTimeStore,
    pub settings: Settings,
    pub ui_mode: UiMode,
    pub focus: Focus,
    pub label_form: Option<LabelForm>,
    pub interval_form: Option<IntervalForm>,
    pub filter_picker: Option<FilterPicker>,
    pub history: HistoryView,
    pub recent_selected: usize,
    /// When the user went idle, while the idle check is shown
    pub idle_since: Option<DateTime<Local>>,
    /// Interval awaiting delete confirmation
    pub pending_delete: Option<Uuid>,
    pub status: Option<StatusLine>,
    pub ticker: ElapsedTicker,
    state_file: Option<PathBuf>,
    tracking_needs_save: bool,
    clock: Box<dyn Clock>,
    idle_probe: Box<dyn IdleProbe>,
    idle_monitor: IdleMonitor,
    /// Mode the idle check interrupted, returned to once it is answered
    resume_mode: UiMode,
    notifier: Option<Box<dyn NotificationSink>>,
    clipboard: Option<Box<dyn ClipboardSink>>,
}

impl AppState {
    pub fn new(tracking: TrackingState, store: WorkedTimeStore, settings: Settings) -> Self {
        let idle_monitor = IdleMonitor::new(settings.idle_threshold(), settings.idle_poll_interval());
        let ticker = ElapsedTicker::new(tracking.is_tracking(), Instant::now());

        let mut app = Self {
            tracking,
            store,
            settings,
            ui_mode: UiMode::Normal,
            focus: Focus::Tracker,
            label_form: None,
            interval_form: None,
            filter_picker: None,
            history: HistoryView::default(),
            recent_selected: 0,
            idle_since: None,
            pending_delete: None,
            status: None,
            ticker,
            state_file: None,
            tracking_needs_save: false,
            clock: Box::new(SystemClock),
            idle_probe: Box::new(NoIdleProbe),
            idle_monitor,
            resume_mode: UiMode::Normal,
            notifier: None,
            clipboard: None,
        };
        // Loading is not a change worth reacting to
        app.store.take_events();
        app.refresh_history();
        app
    }

    /// Persist the tracking session to `path` after every change
    pub fn with_state_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_file = Some(path.into());
        self
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self.refresh_history();
        self
    }

    pub fn with_idle_probe(mut self, probe: Box<dyn IdleProbe>) -> Self {
        self.idle_probe = probe;
        self
    }

    pub fn with_notifier(mut self, notifier: Box<dyn NotificationSink>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardSink>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    // --- status line ---

    fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            is_error: false,
        });
    }

    fn set_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        debug!("Reporting error to user: {}", text);
        self.status = Some(StatusLine { text, is_error: true });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    // --- tracking actions ---

    pub fn start_tracking(&mut self) {
        let now = self.now();
        if let Err(e) = self.tracking.start_tracking(now) {
            self.set_error(e.to_string());
        }
        self.after_action();
    }

    pub fn stop_tracking(&mut self) {
        let now = self.now();
        match self.tracking.stop_tracking(now) {
            Ok(interval) => self.record_interval(interval),
            Err(e) => self.set_error(e.to_string()),
        }
        self.after_action();
    }

    pub fn abort_tracking(&mut self) {
        match self.tracking.abort_tracking() {
            Ok(()) => self.set_info("Tracking aborted, nothing recorded"),
            Err(e) => self.set_error(e.to_string()),
        }
        self.after_action();
    }

    /// Choose labels directly; starts tracking if no session is open
    pub fn set_task_and_client(&mut self, task: &str, client: &str) -> bool {
        let now = self.now();
        let result = self.tracking.set_task_and_client(task, client, now);
        let ok = match result {
            Ok(started) => {
                if started {
                    self.set_info(format!("Started {} for {}", self.tracking.task(), self.tracking.client()));
                }
                true
            }
            Err(e) => {
                self.set_error(e.to_string());
                false
            }
        };
        self.after_action();
        ok
    }

    /// What the single primary key does: start, stop or ask for labels
    pub fn primary_action(&mut self) {
        match self.tracking.primary_action() {
            PrimaryAction::Start => self.start_tracking(),
            PrimaryAction::Stop => self.stop_tracking(),
            PrimaryAction::OpenDialog => self.open_label_form(),
        }
    }

    /// Most recently used (task, client) pairs, newest first
    pub fn recent_pairs(&self) -> Vec<(String, String)> {
        self.store
            .most_recent_distinct_pairs(self.settings.recent_pairs)
            .map(|(task, client)| (task.to_string(), client.to_string()))
            .collect()
    }

    /// Use one of the recent pairs as the current labels
    pub fn select_recent_pair(&mut self, index: usize) {
        let Some((task, client)) = self.recent_pairs().into_iter().nth(index) else {
            return;
        };
        self.recent_selected = index;
        self.set_task_and_client(&task, &client);
    }

    pub fn move_recent_up(&mut self) {
        self.recent_selected = self.recent_selected.saturating_sub(1);
    }

    pub fn move_recent_down(&mut self) {
        let count = self.recent_pairs().len();
        if self.recent_selected + 1 < count {
            self.recent_selected += 1;
        }
    }

    /// Move a closed interval into the store, reporting write failures
    fn record_interval(&mut self, interval: WorkedInterval) {
        let duration = format_duration(interval.duration(), true);
        let (task, client) = (interval.task.clone(), interval.client.clone());

        match self.store.append(interval) {
            Ok(_) => {
                info!("Saved {} for {} ({})", task, client, duration);
                self.set_info(format!("Saved {} for {} ({})", task, client, duration));
                let (title, body) = interval_saved_message(&task, &client, &duration);
                self.notify(&title, &body);
            }
            Err(StoreError::Persistence(e)) => {
                self.set_error(format!("Recorded {} but could not write it: {}", task, e));
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    fn notify(&mut self, title: &str, body: &str) {
        if let Some(notifier) = self.notifier.as_mut() {
            notifier.notify(title, body);
        }
    }

    // --- label form ---

    pub fn open_label_form(&mut self) {
        if !self.tracking.can_set_task() {
            if self.tracking.can_stop() {
                self.set_error("Task and client are fixed until this session ends");
            } else {
                // Restored with only one label: neither settable nor stoppable
                self.set_error("Only one of task and client is set, so this session cannot be saved; abort it (a) to start over");
            }
            return;
        }
        self.label_form = Some(LabelForm {
            task: self.tracking.task().to_string(),
            client: self.tracking.client().to_string(),
            editing_field: 0,
        });
        self.ui_mode = UiMode::EditingLabels;
    }

    pub fn label_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.label_form {
            form.editing_field = (form.editing_field + 1) % 2;
        }
    }

    pub fn label_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.label_form {
            form.active_mut().push(c);
        }
    }

    pub fn label_form_backspace(&mut self) {
        if let Some(form) = &mut self.label_form {
            form.active_mut().pop();
        }
    }

    /// Completion for the field being edited, from previously used labels
    pub fn label_completion(&self) -> Option<String> {
        let form = self.label_form.as_ref()?;
        let (prefix, candidates) = if form.editing_field == 0 {
            (&form.task, self.store.distinct_tasks())
        } else {
            (&form.client, self.store.distinct_clients())
        };
        complete(prefix, candidates).map(str::to_string)
    }

    /// Accept the completion if there is one, otherwise move to the other field
    pub fn label_form_tab(&mut self) {
        match self.label_completion() {
            Some(completion) => {
                if let Some(form) = &mut self.label_form {
                    *form.active_mut() = completion;
                }
            }
            None => self.label_form_toggle_field(),
        }
    }

    pub fn submit_label_form(&mut self) {
        let Some(form) = self.label_form.clone() else {
            return;
        };
        // On failure the form stays open with the error shown
        if self.set_task_and_client(&form.task, &form.client) {
            self.label_form = None;
            self.ui_mode = UiMode::Normal;
        }
    }

    pub fn cancel_label_form(&mut self) {
        self.label_form = None;
        self.ui_mode = UiMode::Normal;
    }

    // --- idle check ---

    /// Answer the idle check
    pub fn resolve_idle(&mut self, disposition: IdleDisposition) {
        let now = self.now();
        let idle_since = self.idle_since.unwrap_or(now);

        if disposition.closes_interval() && !self.tracking.can_stop() {
            self.set_error("Choose a task and client before saving, or abort");
            return;
        }

        match disposition {
            IdleDisposition::Continue => {}
            IdleDisposition::StopAndSave => match self.tracking.stop_tracking(now) {
                Ok(interval) => self.record_interval(interval),
                Err(e) => self.set_error(e.to_string()),
            },
            IdleDisposition::StopAndDiscard => match self.tracking.stop_tracking_at(idle_since) {
                Ok(interval) => self.record_interval(interval),
                Err(e) => self.set_error(e.to_string()),
            },
            IdleDisposition::ContinueButDiscard => match self.tracking.stop_tracking_at(idle_since) {
                Ok(interval) => {
                    self.record_interval(interval);
                    if let Err(e) = self.tracking.start_tracking(now) {
                        self.set_error(e.to_string());
                    }
                }
                Err(e) => self.set_error(e.to_string()),
            },
        }
        debug!("Idle check answered: {}", disposition.name());

        self.leave_idle_check();
        self.after_action();
    }

    /// Drop the idle session entirely
    pub fn abort_from_idle(&mut self) {
        self.leave_idle_check();
        self.abort_tracking();
    }

    /// Back to whatever the idle check interrupted, open forms included
    fn leave_idle_check(&mut self) {
        self.idle_since = None;
        self.ui_mode = std::mem::replace(&mut self.resume_mode, UiMode::Normal);
    }

    // --- history ---

    /// Re-run the history selection against the store
    pub fn refresh_history(&mut self) {
        let filter = self.history.filter(self.now());
        self.history.rows = if filter == IntervalFilter::default() {
            self.store.all().cloned().collect()
        } else {
            self.store.subset(&filter)
        };
        if self.history.selected >= self.history.rows.len() {
            self.history.selected = self.history.rows.len().saturating_sub(1);
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    pub fn move_history_up(&mut self) {
        self.history.selected = self.history.selected.saturating_sub(1);
    }

    pub fn move_history_down(&mut self) {
        if self.history.selected + 1 < self.history.rows.len() {
            self.history.selected += 1;
        }
    }

    pub fn cycle_window(&mut self) {
        self.history.window = self.history.window.next();
        self.history.selected = 0;
        self.refresh_history();
    }

    pub fn clear_filters(&mut self) {
        self.history.tasks = None;
        self.history.clients = None;
        self.refresh_history();
    }

    /// Totals over the visible history
    pub fn summary(&self) -> Summary {
        summarize(&self.history.rows)
    }

    /// Put the visible totals on the clipboard as "task, HH:MM:SS" lines
    pub fn copy_summary(&mut self) {
        let summary = self.summary();
        if summary.by_task.is_empty() {
            self.set_error("Nothing to copy in this selection");
            return;
        }
        let text = summary.to_text();
        let Some(clipboard) = self.clipboard.as_mut() else {
            self.set_error("No clipboard available");
            return;
        };
        match clipboard.set_text(&text) {
            Ok(()) => {
                info!("Copied summary of {} task(s) to clipboard", summary.by_task.len());
                self.set_info(format!(
                    "Copied {} summary ({} task(s), {})",
                    self.history.window.name(),
                    summary.by_task.len(),
                    format_duration(summary.grand_total, true)
                ));
            }
            Err(e) => {
                warn!("Failed to copy summary: {:#}", e);
                self.set_error(format!("Could not copy summary: {:#}", e));
            }
        }
    }

    /// Elapsed time of the open session, shown beside the summary total
    pub fn running_elapsed(&self) -> Option<Duration> {
        self.tracking
            .is_tracking()
            .then(|| self.tracking.elapsed(self.now()))
    }

    pub fn open_task_filter(&mut self) {
        let options = self.store.distinct_tasks().into_iter().map(str::to_string).collect();
        self.filter_picker = Some(FilterPicker::new(options, self.history.tasks.as_ref()));
        self.ui_mode = UiMode::FilterTasks;
    }

    pub fn open_client_filter(&mut self) {
        let options = self.store.distinct_clients().into_iter().map(str::to_string).collect();
        self.filter_picker = Some(FilterPicker::new(options, self.history.clients.as_ref()));
        self.ui_mode = UiMode::FilterClients;
    }

    pub fn filter_move_up(&mut self) {
        if let Some(picker) = &mut self.filter_picker {
            picker.cursor = picker.cursor.saturating_sub(1);
        }
    }

    pub fn filter_move_down(&mut self) {
        if let Some(picker) = &mut self.filter_picker {
            if picker.cursor + 1 < picker.options.len() {
                picker.cursor += 1;
            }
        }
    }

    pub fn filter_toggle(&mut self) {
        if let Some(picker) = &mut self.filter_picker {
            if let Some(option) = picker.options.get(picker.cursor).cloned() {
                if !picker.selected.remove(&option) {
                    picker.selected.insert(option);
                }
            }
        }
    }

    pub fn filter_select_all(&mut self, select: bool) {
        if let Some(picker) = &mut self.filter_picker {
            picker.selected = if select {
                picker.options.iter().cloned().collect()
            } else {
                BTreeSet::new()
            };
        }
    }

    pub fn apply_filter(&mut self) {
        if let Some(picker) = self.filter_picker.take() {
            let constraint = picker.into_constraint();
            match self.ui_mode {
                UiMode::FilterTasks => self.history.tasks = constraint,
                UiMode::FilterClients => self.history.clients = constraint,
                _ => {}
            }
        }
        self.ui_mode = UiMode::Normal;
        self.refresh_history();
    }

    pub fn cancel_filter(&mut self) {
        self.filter_picker = None;
        self.ui_mode = UiMode::Normal;
    }

    // --- interval editing ---

    pub fn open_interval_editor(&mut self) {
        let Some(interval) = self.history.selected_interval() else {
            return;
        };
        self.interval_form = Some(IntervalForm::from_interval(interval));
        self.ui_mode = UiMode::EditingInterval;
    }

    pub fn interval_form_next_field(&mut self) {
        if let Some(form) = &mut self.interval_form {
            form.editing_field = (form.editing_field + 1) % IntervalForm::FIELDS;
        }
    }

    pub fn interval_form_prev_field(&mut self) {
        if let Some(form) = &mut self.interval_form {
            form.editing_field = (form.editing_field + IntervalForm::FIELDS - 1) % IntervalForm::FIELDS;
        }
    }

    pub fn interval_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.interval_form {
            form.active_mut().push(c);
        }
    }

    pub fn interval_form_backspace(&mut self) {
        if let Some(form) = &mut self.interval_form {
            form.active_mut().pop();
        }
    }

    pub fn submit_interval_form(&mut self) {
        let Some(form) = self.interval_form.clone() else {
            return;
        };

        let (start, end) = match (parse_timestamp(&form.start), parse_timestamp(&form.end)) {
            (Ok(start), Ok(end)) => (start, end),
            (Err(e), _) | (_, Err(e)) => {
                self.set_error(e.to_string());
                return;
            }
        };
        let edit = IntervalEdit {
            task: Some(form.task),
            client: Some(form.client),
            start: Some(start),
            end: Some(end),
        };

        match self.store.update(form.id, &edit) {
            Ok(()) => {
                self.set_info("Interval updated");
                self.interval_form = None;
                self.ui_mode = UiMode::Normal;
            }
            Err(StoreError::Persistence(e)) => {
                self.set_error(format!("Updated, but could not write it: {}", e));
                self.interval_form = None;
                self.ui_mode = UiMode::Normal;
            }
            // Invalid edits keep the form open
            Err(e) => self.set_error(e.to_string()),
        }
        self.after_action();
    }

    pub fn cancel_interval_form(&mut self) {
        self.interval_form = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn request_delete(&mut self) {
        if let Some(interval) = self.history.selected_interval() {
            self.pending_delete = Some(interval.id);
            self.ui_mode = UiMode::ConfirmDelete;
        }
    }

    /// The interval the delete confirmation is about, if it still exists
    pub fn pending_delete_interval(&self) -> Option<&WorkedInterval> {
        self.pending_delete.and_then(|id| self.store.get(id))
    }

    pub fn confirm_delete(&mut self) {
        self.ui_mode = UiMode::Normal;
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        match self.store.remove(id) {
            Ok(removed) => self.set_info(format!(
                "Deleted {} for {} started {}",
                removed.task,
                removed.client,
                format_timestamp(&removed.start)
            )),
            Err(StoreError::Persistence(e)) => {
                self.set_error(format!("Deleted, but could not write it: {}", e));
            }
            Err(e) => self.set_error(e.to_string()),
        }
        self.after_action();
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.ui_mode = UiMode::Normal;
    }

    // --- event plumbing ---

    /// React to whatever the last action changed
    fn after_action(&mut self) {
        let tracking_events = self.tracking.take_events();
        for event in &tracking_events {
            debug!("Tracking event: {:?}", event);
            match event {
                TrackingEvent::Started => self.ticker.arm(Instant::now()),
                TrackingEvent::Stopped(_) | TrackingEvent::Aborted => self.idle_monitor.reset(),
                TrackingEvent::LabelsChanged => {}
            }
        }
        if !tracking_events.is_empty() {
            self.tracking_needs_save = true;
        }
        if self.tracking_needs_save {
            self.persist_tracking();
        }

        let store_events = self.store.take_events();
        if store_events
            .iter()
            .any(|event| !matches!(event, StoreEvent::Loaded))
        {
            self.refresh_history();
        }
    }

    fn persist_tracking(&mut self) {
        let Some(path) = &self.state_file else {
            self.tracking_needs_save = false;
            return;
        };
        match save_tracking_state(path, &self.tracking) {
            Ok(()) => self.tracking_needs_save = false,
            Err(e) => {
                warn!("Failed to save tracking state: {}", e);
                self.set_error(format!("Could not save tracking state: {}", e));
            }
        }
    }

    /// Periodic work: elapsed redraw and idle detection
    ///
    /// Returns whether the screen needs redrawing.
    pub fn tick(&mut self) -> bool {
        let mut redraw = self.ticker.poll(Instant::now(), self.tracking.is_tracking());

        if self.ui_mode != UiMode::IdleCheck {
            let now = self.now();
            let tracking = self.tracking.is_tracking();
            if let Some(idle_since) = self.idle_monitor.poll(self.idle_probe.as_mut(), now, tracking) {
                info!("Idle since {}, asking what to do", idle_since);
                self.idle_since = Some(idle_since);
                self.resume_mode = self.ui_mode;
                self.ui_mode = UiMode::IdleCheck;
                let minutes = now.signed_duration_since(idle_since).num_minutes();
                let (title, body) = idle_detected_message(minutes);
                self.notify(&title, &body);
                redraw = true;
            }
        }
        redraw
    }

    /// Write anything still pending; used on quit
    pub fn save(&mut self) -> anyhow::Result<()> {
        if let Some(path) = &self.state_file {
            save_tracking_state(path, &self.tracking)?;
            self.tracking_needs_save = false;
        }
        self.store.flush()?;
        Ok(())
    }
}
