//! Error visibility for a date form.
//!
//! A [`ValidationSession`] owns the raw text of one form, re-runs every check
//! when a field is committed and reports which error messages should appear
//! or disappear. It never touches the UI itself; the host renders the
//! returned [`Transition`]s.
//!
//! Errors show up as soon as they are detected, with one exception: when day
//! and month are filled in but the year is still missing, the complaint is
//! held back for [`SessionConfig::year_missing_delay`] to give the user time
//! to type it. Every later edit cancels the pending complaint and, if the
//! year is still missing, starts the delay again.

use std::time::{Duration, Instant};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::consts::YEAR_MISSING_DELAY_MS;
use crate::prelude::*;
use crate::types::{DateInput, InputField};
use crate::validate::{Validation, ValidationKind, ValidationResult, validate_all, validate_year};

/// Source of the current time for deadlines.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Reads [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Timing settings for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long a missing year stays quiet after the last edit
    pub year_missing_delay_ms: u64,
}

impl SessionConfig {
    pub const fn year_missing_delay(&self) -> Duration {
        Duration::from_millis(self.year_missing_delay_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            year_missing_delay_ms: YEAR_MISSING_DELAY_MS,
        }
    }
}

/// Where an error message is shown. `Format` is the cross-field message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Field {
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "format")]
    Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Visibility {
    #[display(fmt = "hidden")]
    Hidden,
    #[display(fmt = "visible")]
    Visible,
}

/// A change the host has to render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub field: Field,
    pub visibility: Visibility,
    /// The message shown, or the one being taken away
    pub message: String,
}

impl Transition {
    fn visible(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            visibility: Visibility::Visible,
            message: message.into(),
        }
    }

    fn hidden(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            visibility: Visibility::Hidden,
            message: message.into(),
        }
    }
}

/// Identifies one scheduled reveal; stale handles are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// A reveal the host should trigger through [`ValidationSession::fire`]
/// once `deadline` has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduledTask {
    pub handle: TaskHandle,
    pub deadline: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldState {
    Hidden,
    Visible(String),
    /// Only the year field is ever pending
    PendingVisible { task: ScheduledTask, message: String },
}

impl FieldState {
    pub const fn is_visible(&self) -> bool {
        matches!(self, Self::Visible(_))
    }
}

/// Validation state of one date form.
#[derive(Debug)]
pub struct ValidationSession<C = SystemClock> {
    config: SessionConfig,
    clock: C,
    input: DateInput,
    validation: Validation,
    day: FieldState,
    month: FieldState,
    year: FieldState,
    format: FieldState,
    next_task: u64,
}

impl ValidationSession<SystemClock> {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for ValidationSession<SystemClock> {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl<C: Clock> ValidationSession<C> {
    pub fn with_clock(config: SessionConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            input: DateInput::default(),
            validation: Validation::default(),
            day: FieldState::Hidden,
            month: FieldState::Hidden,
            year: FieldState::Hidden,
            format: FieldState::Hidden,
            next_task: 0,
        }
    }

    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub const fn input(&self) -> &DateInput {
        &self.input
    }

    /// Results of the last commit
    pub const fn validation(&self) -> &Validation {
        &self.validation
    }

    pub const fn state(&self, field: Field) -> &FieldState {
        match field {
            Field::Day => &self.day,
            Field::Month => &self.month,
            Field::Year => &self.year,
            Field::Format => &self.format,
        }
    }

    pub const fn is_visible(&self, field: Field) -> bool {
        self.state(field).is_visible()
    }

    /// The pending year reveal, if one is scheduled
    pub const fn pending_task(&self) -> Option<ScheduledTask> {
        match &self.year {
            FieldState::PendingVisible { task, .. } => Some(*task),
            FieldState::Hidden | FieldState::Visible(_) => None,
        }
    }

    /// Whether the month field should hint that it is needed, i.e. a day was typed.
    pub fn month_hint_active(&self) -> bool {
        self.input.has(InputField::Day)
    }

    /// Records a keystroke without validating.
    ///
    /// A pending year reveal still counts the keystroke as an edit: it is
    /// restarted while the year is missing and cancelled otherwise.
    pub fn on_input(&mut self, field: InputField, raw: impl Into<String>) {
        self.input.set(field, raw);
        if self.pending_task().is_some() {
            self.refresh_pending_year();
        }
    }

    /// Records a committed field value and validates the whole form.
    pub fn on_field_change(
        &mut self,
        field: InputField,
        raw: impl Into<String>,
    ) -> Vec<Transition> {
        self.on_input(field, raw);
        self.commit()
    }

    /// Validates the current text and updates every field's visibility.
    pub fn commit(&mut self) -> Vec<Transition> {
        let validation = validate_all(&self.input);
        trace!(
            "validated day={} month={} year={} format={}",
            validation.day.kind(),
            validation.month.kind(),
            validation.year.kind(),
            validation.format.kind()
        );

        let mut transitions = Vec::new();

        let day = shown_message(&validation.day, self.input.has(InputField::Day));
        self.apply(Field::Day, day, &mut transitions);

        let month = shown_message(&validation.month, self.input.has(InputField::Month));
        self.apply(Field::Month, month, &mut transitions);

        let format = shown_message(&validation.format, true);
        self.apply(Field::Format, format, &mut transitions);

        if let Some(message) = self.deferred_year_message(&validation.year) {
            self.defer_year(message, &mut transitions);
        } else if validation.year.kind() == ValidationKind::YearTooLong {
            let message = validation.year.message().to_owned();
            self.apply(Field::Year, Some(message), &mut transitions);
        } else {
            self.apply(Field::Year, None, &mut transitions);
        }

        self.validation = validation;
        transitions
    }

    /// Reveals the pending year error if its deadline has passed.
    pub fn tick(&mut self) -> Vec<Transition> {
        match self.pending_task() {
            Some(task) if self.clock.now() >= task.deadline => self.fire(task.handle),
            _ => Vec::new(),
        }
    }

    /// Reveals the pending year error scheduled under `handle`.
    ///
    /// Does nothing when the handle was cancelled or superseded, or when the
    /// current text no longer lacks a year.
    pub fn fire(&mut self, handle: TaskHandle) -> Vec<Transition> {
        match &self.year {
            FieldState::PendingVisible { task, .. } if task.handle == handle => {}
            _ => {
                debug!("ignoring stale year reveal {handle:?}");
                return Vec::new();
            }
        }
        let Some(message) = self.deferred_year_message(&validate_year(self.input.year())) else {
            self.apply(Field::Year, None, &mut Vec::new());
            return Vec::new();
        };
        debug!("year error visible: {message}");
        self.year = FieldState::Visible(message.clone());
        vec![Transition::visible(Field::Year, message)]
    }

    /// Clears the form, hides every error and cancels a pending reveal.
    pub fn reset(&mut self) -> Vec<Transition> {
        self.input.clear();
        self.validation = Validation::default();

        let mut transitions = Vec::new();
        for field in [Field::Day, Field::Month, Field::Year, Field::Format] {
            self.apply(field, None, &mut transitions);
        }
        transitions
    }

    fn state_mut(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Day => &mut self.day,
            Field::Month => &mut self.month,
            Field::Year => &mut self.year,
            Field::Format => &mut self.format,
        }
    }

    /// Moves `field` to visible with `target`, or to hidden for `None`.
    fn apply(&mut self, field: Field, target: Option<String>, transitions: &mut Vec<Transition>) {
        let state = self.state_mut(field);
        let (next, transition) = match (&*state, target) {
            (FieldState::Visible(current), Some(message)) if *current == message => return,
            (_, Some(message)) => (
                FieldState::Visible(message.clone()),
                Some(Transition::visible(field, message)),
            ),
            (FieldState::Visible(current), None) => {
                (FieldState::Hidden, Some(Transition::hidden(field, current.clone())))
            }
            (FieldState::PendingVisible { task, .. }, None) => {
                debug!("{field} reveal {:?} cancelled", task.handle);
                (FieldState::Hidden, None)
            }
            (FieldState::Hidden, None) => return,
        };
        *state = next;

        if let Some(transition) = transition {
            debug!("{} error {}: {}", transition.field, transition.visibility, transition.message);
            transitions.push(transition);
        }
    }

    /// The missing-year message, if the form is in the state that delays it.
    fn deferred_year_message(&self, year: &ValidationResult) -> Option<String> {
        let deferred = year.kind() == ValidationKind::YearMissing
            && self.input.has(InputField::Day)
            && self.input.has(InputField::Month);
        deferred.then(|| year.message().to_owned())
    }

    /// Restarts or cancels a pending reveal after an unvalidated edit.
    fn refresh_pending_year(&mut self) {
        match self.deferred_year_message(&validate_year(self.input.year())) {
            Some(message) => self.defer_year(message, &mut Vec::new()),
            None => self.apply(Field::Year, None, &mut Vec::new()),
        }
    }

    /// Schedules the missing-year message, restarting any pending delay.
    fn defer_year(&mut self, message: String, transitions: &mut Vec<Transition>) {
        match std::mem::replace(&mut self.year, FieldState::Hidden) {
            FieldState::Visible(current) if current == message => {
                self.year = FieldState::Visible(current);
                return;
            }
            FieldState::Visible(current) => {
                debug!("year error hidden until the delay passes");
                transitions.push(Transition::hidden(Field::Year, current));
            }
            FieldState::PendingVisible { task, .. } => {
                debug!("year reveal {:?} superseded", task.handle);
            }
            FieldState::Hidden => {}
        }

        self.next_task += 1;
        let task = ScheduledTask {
            handle: TaskHandle(self.next_task),
            deadline: self.clock.now() + self.config.year_missing_delay(),
        };
        debug!("year reveal {:?} scheduled", task.handle);
        self.year = FieldState::PendingVisible { task, message };
    }
}

fn shown_message(result: &ValidationResult, has_text: bool) -> Option<String> {
    (has_text && !result.is_valid()).then(|| result.message().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ManualClock;

    fn session() -> (ValidationSession<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        (ValidationSession::with_clock(SessionConfig::default(), clock.clone()), clock)
    }

    fn enter_day_and_month(session: &mut ValidationSession<ManualClock>) -> Vec<Transition> {
        let mut transitions = session.on_field_change(InputField::Day, "15");
        transitions.extend(session.on_field_change(InputField::Month, "3"));
        transitions
    }

    #[test]
    fn test_config_default_and_serde() {
        let config = SessionConfig::default();
        assert_eq!(config.year_missing_delay(), Duration::from_millis(4500));

        let config: SessionConfig =
            serde_json::from_str(r#"{"year_missing_delay_ms": 1000}"#).unwrap();
        assert_eq!(config.year_missing_delay(), Duration::from_secs(1));

        let config: SessionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_day_error_shown_and_cleared_immediately() {
        let (mut session, _) = session();

        let transitions = session.on_field_change(InputField::Day, "32");
        assert_eq!(
            transitions,
            vec![Transition::visible(Field::Day, "There is no month with more than 31 days")]
        );
        assert!(session.is_visible(Field::Day));

        let transitions = session.on_field_change(InputField::Day, "3");
        assert_eq!(
            transitions,
            vec![Transition::hidden(Field::Day, "There is no month with more than 31 days")]
        );
        assert!(!session.is_visible(Field::Day));
    }

    #[test]
    fn test_empty_field_hides_error() {
        let (mut session, _) = session();
        session.on_field_change(InputField::Month, "13");
        assert!(session.is_visible(Field::Month));

        let transitions = session.on_field_change(InputField::Month, "");
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].visibility, Visibility::Hidden);
        assert!(!session.is_visible(Field::Month));
    }

    #[test]
    fn test_unchanged_error_emits_nothing() {
        let (mut session, _) = session();
        session.on_field_change(InputField::Day, "0");
        assert!(session.on_field_change(InputField::Month, "1").is_empty());
        assert!(session.is_visible(Field::Day));
    }

    #[test]
    fn test_day_error_message_follows_month() {
        let (mut session, _) = session();
        session.on_field_change(InputField::Year, "2023");
        session.on_field_change(InputField::Month, "4");
        let transitions = session.on_field_change(InputField::Day, "31");
        assert_eq!(transitions, vec![Transition::visible(Field::Day, "April only has 30 days")]);

        let transitions = session.on_field_change(InputField::Month, "2");
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].field, Field::Day);
        assert!(transitions[0].message.starts_with("February 2023"));
    }

    #[test]
    fn test_format_error_hides_once_month_typed() {
        let (mut session, _) = session();
        session.on_field_change(InputField::Year, "2024");
        let transitions = session.on_field_change(InputField::Day, "15");
        assert_eq!(
            transitions,
            vec![Transition::visible(Field::Format, "invalid format, enter a month")]
        );

        // An invalid month is still a month, so the format error goes away
        let transitions = session.on_field_change(InputField::Month, "13");
        let format_error = "invalid format, enter a month";
        assert!(transitions.contains(&Transition::hidden(Field::Format, format_error)));
        assert!(session.is_visible(Field::Month));

        let transitions = session.on_field_change(InputField::Month, "");
        assert!(transitions.contains(&Transition::visible(Field::Format, format_error)));
        assert!(session.is_visible(Field::Format));
    }

    #[test]
    fn test_year_too_long_shown_immediately() {
        let (mut session, _) = session();
        let transitions = session.on_field_change(InputField::Year, "12345");
        assert_eq!(
            transitions,
            vec![Transition::visible(Field::Year, "A year has at most 4 digits")]
        );
        assert_eq!(session.pending_task(), None);

        assert_eq!(session.on_field_change(InputField::Year, "-1234").len(), 1);
        assert!(!session.is_visible(Field::Year));
    }

    #[test]
    fn test_year_missing_needs_day_and_month() {
        let (mut session, clock) = session();
        session.on_field_change(InputField::Day, "15");
        assert_eq!(session.pending_task(), None);

        clock.advance(Duration::from_secs(10));
        assert!(session.tick().is_empty());
        assert!(!session.is_visible(Field::Year));
    }

    #[test]
    fn test_year_missing_is_deferred() {
        let (mut session, clock) = session();
        let transitions = enter_day_and_month(&mut session);
        assert!(transitions.is_empty());

        let task = session.pending_task().expect("year reveal should be pending");
        assert!(!session.is_visible(Field::Year));

        clock.advance(Duration::from_millis(4499));
        assert!(session.tick().is_empty());

        clock.advance(Duration::from_millis(1));
        assert_eq!(session.tick(), vec![Transition::visible(Field::Year, "Please enter a year")]);
        assert!(session.is_visible(Field::Year));
        assert_eq!(session.pending_task(), None);

        // Firing the same task again is a no-op
        assert!(session.fire(task.handle).is_empty());
    }

    #[test]
    fn test_valid_year_before_deadline_never_shows_error() {
        let (mut session, clock) = session();
        enter_day_and_month(&mut session);
        let task = session.pending_task().expect("year reveal should be pending");

        clock.advance(Duration::from_secs(2));
        assert!(session.on_field_change(InputField::Year, "-44").is_empty());
        assert_eq!(session.pending_task(), None);

        clock.advance(Duration::from_secs(10));
        assert!(session.tick().is_empty());
        assert!(session.fire(task.handle).is_empty());
        assert!(!session.is_visible(Field::Year));
    }

    #[test]
    fn test_new_edit_restarts_delay() {
        let (mut session, clock) = session();
        enter_day_and_month(&mut session);
        let first = session.pending_task().expect("year reveal should be pending");

        clock.advance(Duration::from_secs(3));
        session.on_field_change(InputField::Day, "16");
        let second = session.pending_task().expect("year reveal should be rescheduled");
        assert_ne!(first.handle, second.handle);
        assert!(second.deadline > first.deadline);

        // The old deadline passes without effect
        clock.advance(Duration::from_secs(2));
        assert!(session.tick().is_empty());
        assert!(session.fire(first.handle).is_empty());

        clock.advance(Duration::from_secs(3));
        assert_eq!(session.tick().len(), 1);
        assert!(session.is_visible(Field::Year));
    }

    #[test]
    fn test_lone_minus_counts_as_missing() {
        let (mut session, _) = session();
        enter_day_and_month(&mut session);
        session.on_field_change(InputField::Year, "-");
        let task = session.pending_task().expect("year reveal should be pending");
        assert_eq!(
            session.fire(task.handle),
            vec![Transition::visible(Field::Year, "Please enter a year")]
        );
    }

    #[test]
    fn test_visible_missing_year_stays_visible_on_other_edits() {
        let (mut session, _) = session();
        enter_day_and_month(&mut session);
        let task = session.pending_task().expect("year reveal should be pending");
        session.fire(task.handle);

        assert!(session.on_field_change(InputField::Day, "1").is_empty());
        assert!(session.is_visible(Field::Year));
        assert_eq!(session.pending_task(), None);
    }

    #[test]
    fn test_too_long_then_deleted_hides_and_defers() {
        let (mut session, _) = session();
        enter_day_and_month(&mut session);
        session.on_field_change(InputField::Year, "12345");
        assert!(session.is_visible(Field::Year));

        let transitions = session.on_field_change(InputField::Year, "");
        assert_eq!(
            transitions,
            vec![Transition::hidden(Field::Year, "A year has at most 4 digits")]
        );
        assert!(session.pending_task().is_some());
    }

    #[test]
    fn test_missing_year_hidden_when_day_cleared() {
        let (mut session, _) = session();
        enter_day_and_month(&mut session);
        let task = session.pending_task().expect("year reveal should be pending");
        session.fire(task.handle);

        let transitions = session.on_field_change(InputField::Day, "");
        assert_eq!(transitions, vec![Transition::hidden(Field::Year, "Please enter a year")]);
    }

    #[test]
    fn test_typed_year_cancels_pending_reveal() {
        let (mut session, clock) = session();
        enter_day_and_month(&mut session);
        let task = session.pending_task().expect("year reveal should be pending");

        session.on_input(InputField::Year, "1989");
        assert_eq!(session.pending_task(), None);

        clock.advance(Duration::from_secs(5));
        assert!(session.tick().is_empty());
        assert!(session.fire(task.handle).is_empty());
        assert!(!session.is_visible(Field::Year));
        assert_eq!(session.input().year(), "1989");
    }

    #[test]
    fn test_keystroke_restarts_pending_reveal() {
        let (mut session, clock) = session();
        enter_day_and_month(&mut session);
        let first = session.pending_task().expect("year reveal should be pending");

        clock.advance(Duration::from_secs(3));
        session.on_input(InputField::Year, "-");
        let second = session.pending_task().expect("year reveal should be rescheduled");
        assert_ne!(first.handle, second.handle);

        clock.advance(Duration::from_secs(2));
        assert!(session.tick().is_empty());

        clock.advance(Duration::from_secs(3));
        assert_eq!(session.tick(), vec![Transition::visible(Field::Year, "Please enter a year")]);
    }

    #[test]
    fn test_month_and_format_errors_are_exclusive() {
        // A month error needs month text and a format error needs none, so
        // the two messages never show at the same time.
        let (mut session, _) = session();
        let inputs = [("15", "", "2024"), ("15", "13", "2024"), ("", "0", "2024"), ("15", "", "")];
        for (day, month, year) in inputs {
            session.reset();
            session.on_input(InputField::Day, day);
            session.on_input(InputField::Month, month);
            session.on_input(InputField::Year, year);
            session.commit();
            assert!(
                !(session.is_visible(Field::Month) && session.is_visible(Field::Format)),
                "day {day:?} month {month:?} year {year:?}"
            );
        }
    }

    #[test]
    fn test_keystrokes_do_not_validate() {
        let (mut session, _) = session();
        session.on_input(InputField::Day, "99");
        assert!(!session.is_visible(Field::Day));
        assert_eq!(session.input().day(), "99");

        assert_eq!(session.commit().len(), 1);
        assert!(session.is_visible(Field::Day));
        assert_eq!(session.validation().day.kind(), ValidationKind::DayOutOfRange);
    }

    #[test]
    fn test_month_hint_follows_day() {
        let (mut session, _) = session();
        assert!(!session.month_hint_active());
        session.on_input(InputField::Day, "4");
        assert!(session.month_hint_active());
    }

    #[test]
    fn test_reset_hides_everything_and_cancels_pending() {
        let (mut session, clock) = session();
        session.on_field_change(InputField::Day, "40");
        session.on_field_change(InputField::Month, "3");
        let task = session.pending_task().expect("year reveal should be pending");

        let transitions = session.reset();
        assert_eq!(
            transitions,
            vec![Transition::hidden(Field::Day, "There is no month with more than 31 days")]
        );
        assert_eq!(session.pending_task(), None);
        assert_eq!(session.input(), &DateInput::default());

        clock.advance(Duration::from_secs(10));
        assert!(session.tick().is_empty());
        assert!(session.fire(task.handle).is_empty());
        for field in [Field::Day, Field::Month, Field::Year, Field::Format] {
            assert_eq!(session.state(field), &FieldState::Hidden);
        }
    }

    #[test]
    fn test_transition_serializes_for_host() {
        let transition = Transition::visible(Field::Year, "Please enter a year");
        let json = serde_json::to_string(&transition).unwrap();
        assert_eq!(
            json,
            r#"{"field":"Year","visibility":"Visible","message":"Please enter a year"}"#
        );
    }
}
