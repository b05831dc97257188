use std::fs::OpenOptions;
use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::RateClient;
use crate::config::Config;
use crate::convert;
use crate::format;
use crate::gate::{self, KeyDecision};
use crate::sanitize;
use crate::theme::{self, Theme};
use crate::types::*;

/// One editable field: its display string, the caret as a char offset, the
/// guard against self-inflicted change events, and the pending debounce
/// deadline for its conversion.
pub struct FieldState {
    pub text: String,
    pub caret: usize,
    pub suppressed: bool,
    pub deadline: Option<Instant>,
}

impl FieldState {
    fn new() -> Self {
        Self {
            text: String::new(),
            caret: 0,
            suppressed: false,
            deadline: None,
        }
    }

    pub fn insert(&mut self, ch: char) {
        let idx = byte_index(&self.text, self.caret);
        self.text.insert(idx, ch);
        self.caret += 1;
    }

    pub fn backspace(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        let idx = byte_index(&self.text, self.caret - 1);
        self.text.remove(idx);
        self.caret -= 1;
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.caret >= self.len() {
            return false;
        }
        let idx = byte_index(&self.text, self.caret);
        self.text.remove(idx);
        true
    }

    pub fn move_left(&mut self) {
        self.caret = self.caret.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.caret = (self.caret + 1).min(self.len());
    }

    pub fn move_home(&mut self) {
        self.caret = 0;
    }

    pub fn move_end(&mut self) {
        self.caret = self.len();
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }
}

fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(s.len())
}

pub struct App {
    pub sats: FieldState,
    pub eur: FieldState,
    pub focus: Field,
    pub last_active: Field,
    // EUR per whole BTC; never Some(v) with v <= 0.
    pub rate: Option<f64>,
    pub rate_display: String,
    pub status: String,
    pub status_kind: StatusKind,
    pub last_fetch: Option<Instant>,
    pub edits_handled: u64,
    pub config: Config,
    pub theme: Theme,
    pub quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let loaded_theme = theme::by_name(&config.theme);
        Self {
            sats: FieldState::new(),
            eur: FieldState::new(),
            focus: Field::Sats,
            last_active: Field::Sats,
            rate: None,
            rate_display: String::new(),
            status: String::new(),
            status_kind: StatusKind::Neutral,
            last_fetch: None,
            edits_handled: 0,
            config,
            theme: loaded_theme,
            quit: false,
        }
    }

    pub fn field(&self, field: Field) -> &FieldState {
        match field {
            Field::Sats => &self.sats,
            Field::Eur => &self.eur,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Sats => &mut self.sats,
            Field::Eur => &mut self.eur,
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }

        let focus = self.focus;
        let allow_decimal = focus.allows_decimal();
        match gate::decide(key, &self.field(focus).text, allow_decimal) {
            KeyDecision::Insert(ch) => {
                self.field_mut(focus).insert(ch);
                self.field_input(focus);
            }
            KeyDecision::Allow => self.handle_nav(key.code),
            KeyDecision::Reject => {}
        }
    }

    fn handle_nav(&mut self, code: KeyCode) {
        let focus = self.focus;
        match code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.focus = focus.other(),
            // Enter never "submits" anywhere; it just flushes the pending
            // conversion instead of waiting out the debounce.
            KeyCode::Enter => self.flush_pending(focus),
            KeyCode::Backspace => {
                if self.field_mut(focus).backspace() {
                    self.field_input(focus);
                }
            }
            KeyCode::Delete => {
                if self.field_mut(focus).delete() {
                    self.field_input(focus);
                }
            }
            KeyCode::Left => self.field_mut(focus).move_left(),
            KeyCode::Right => self.field_mut(focus).move_right(),
            KeyCode::Home => self.field_mut(focus).move_home(),
            KeyCode::End => self.field_mut(focus).move_end(),
            _ => {}
        }
    }

    /// Change handler for a field's content. Programmatic writes arrive here
    /// too but bail out on the suppression flag, so only hand edits
    /// sanitize, claim last-active, and arm the debounce.
    pub fn field_input(&mut self, field: Field) {
        if self.field(field).suppressed {
            return;
        }
        self.edits_handled += 1;

        let fs = self.field(field);
        let (clean, caret) = match field {
            Field::Sats => sanitize::sanitize_sats(&fs.text, fs.caret),
            Field::Eur => sanitize::sanitize_eur(&fs.text, fs.caret, MAX_EUR_DP),
        };

        let deadline = Instant::now() + Duration::from_millis(self.config.debounce_ms);
        let fs = self.field_mut(field);
        fs.text = clean;
        fs.caret = caret;
        fs.deadline = Some(deadline);
        self.last_active = field;
    }

    /// Runs any conversion whose debounce window has elapsed. Called every
    /// event-loop tick.
    pub fn poll_pending(&mut self) {
        let now = Instant::now();
        for field in [Field::Sats, Field::Eur] {
            if self.field(field).deadline.is_some_and(|d| d <= now) {
                self.field_mut(field).deadline = None;
                self.convert_from(field);
            }
        }
    }

    pub fn flush_pending(&mut self, field: Field) {
        if self.field_mut(field).deadline.take().is_some() {
            self.convert_from(field);
        }
    }

    /// Derives the other field from `source`. Unparseable input clears the
    /// other field; an unknown rate leaves it exactly as it was.
    pub fn convert_from(&mut self, source: Field) {
        match source {
            Field::Sats => {
                let Some(sats) = convert::parse_sats_display(&self.sats.text) else {
                    self.write_field(Field::Eur, String::new());
                    return;
                };
                let Some(rate) = self.rate else { return };
                self.write_field(Field::Eur, convert::sats_to_eur(sats, rate, MAX_EUR_DP));
            }
            Field::Eur => {
                let Some(amount) = convert::parse_eur_display(&self.eur.text) else {
                    self.write_field(Field::Sats, String::new());
                    return;
                };
                let Some(rate) = self.rate else { return };
                let sats = convert::eur_to_sats(amount, rate);
                self.write_field(Field::Sats, format::group_digits(&sats.to_string()));
            }
        }
    }

    /// Sets a field's value without triggering its change handling. The
    /// suppression flag is only ever true inside this method.
    pub fn write_field(&mut self, field: Field, value: String) {
        {
            let fs = self.field_mut(field);
            fs.suppressed = true;
            fs.caret = fs.caret.min(value.chars().count());
            fs.text = value;
        }
        self.field_input(field);
        self.field_mut(field).suppressed = false;
    }

    pub fn reconvert(&mut self) {
        self.convert_from(self.last_active);
    }

    /// Marks a fetch as started: re-arms the refresh timer and shows the
    /// neutral fetching status. The timer runs from trigger time, not
    /// completion time, so a slow response never delays the next cycle.
    pub fn begin_fetch(&mut self) {
        self.last_fetch = Some(Instant::now());
        self.set_status("Fetching rate...", StatusKind::Neutral);
    }

    pub async fn refresh_rate(&mut self, client: &RateClient) {
        self.begin_fetch();
        let result = client.fetch_eur_rate().await;
        self.apply_fetch(result);
    }

    /// Applies a fetch outcome. On success the rate and rate display update
    /// and the last-active field re-derives the other; on failure both
    /// fields and the held rate stay untouched.
    pub fn apply_fetch(&mut self, result: Result<f64>) {
        match result {
            Ok(rate) => {
                self.rate = Some(rate);
                self.rate_display = format!(
                    "1 BTC = \u{20ac}{}",
                    format::group_digits(&format!("{:.0}", rate))
                );
                let now = chrono::Local::now().format("%H:%M:%S");
                self.set_status(format!("Updated {}", now), StatusKind::Success);
                self.reconvert();
            }
            Err(e) => {
                self.set_error(format!("Update failed: {:#}", e));
                if self.rate.is_none() {
                    self.rate_display = "Rate unavailable".to_string();
                }
            }
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>, kind: StatusKind) {
        self.status = message.into();
        self.status_kind = kind;
    }

    pub fn set_error(&mut self, msg: String) {
        log_error(&msg);
        self.set_status(msg, StatusKind::Error);
    }
}

fn log_path() -> std::path::PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    path.push("satseur");
    path.push("errors.log");
    path
}

pub fn log_error(msg: &str) {
    let path = log_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&path) {
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let _ = writeln!(f, "[{}] {}", now, msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn test_app() -> App {
        App::new(Config::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(&KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn typing_sanitizes_and_groups_live() {
        let mut app = test_app();
        for ch in "1234567".chars() {
            press(&mut app, KeyCode::Char(ch));
        }
        assert_eq!(app.sats.text, "1 234 567");
        assert_eq!(app.sats.caret, 9);
        assert_eq!(app.last_active, Field::Sats);
        assert!(app.sats.deadline.is_some());
    }

    #[test]
    fn rejected_keys_leave_the_field_alone() {
        let mut app = test_app();
        let edits = app.edits_handled;
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.sats.text, "");
        assert_eq!(app.edits_handled, edits);
    }

    #[test]
    fn comma_inserts_a_decimal_point() {
        let mut app = test_app();
        app.focus = Field::Eur;
        press(&mut app, KeyCode::Char('9'));
        press(&mut app, KeyCode::Char(','));
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.eur.text, "9.5");
    }

    #[test]
    fn enter_flushes_the_pending_conversion() {
        let mut app = test_app();
        app.rate = Some(50_000.0);
        for ch in "1234567".chars() {
            press(&mut app, KeyCode::Char(ch));
        }
        assert_eq!(app.eur.text, "");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.eur.text, "617.28");
        assert!(app.sats.deadline.is_none());
    }

    #[test]
    fn programmatic_write_does_not_reenter_the_handler() {
        let mut app = test_app();
        let edits = app.edits_handled;
        app.write_field(Field::Sats, "1234567".to_string());
        // Had the handler run, the text would have been regrouped and a
        // debounce armed.
        assert_eq!(app.edits_handled, edits);
        assert_eq!(app.sats.text, "1234567");
        assert!(app.sats.deadline.is_none());
        assert!(!app.sats.suppressed);
    }

    #[test]
    fn eur_to_sats_conversion_writes_grouped_output() {
        let mut app = test_app();
        app.rate = Some(50_000.0);
        app.eur.text = "25000.00".to_string();
        app.convert_from(Field::Eur);
        assert_eq!(app.sats.text, "50 000 000");
    }

    #[test]
    fn parse_failure_clears_the_other_field() {
        let mut app = test_app();
        app.rate = Some(50_000.0);
        app.sats.text = "9 999".to_string();
        app.eur.text = String::new();
        app.convert_from(Field::Eur);
        assert_eq!(app.sats.text, "");
    }

    #[test]
    fn unknown_rate_leaves_the_other_field_untouched() {
        let mut app = test_app();
        app.sats.text = "100".to_string();
        app.eur.text = "7.77".to_string();
        app.convert_from(Field::Sats);
        assert_eq!(app.eur.text, "7.77");
    }

    #[test]
    fn successful_fetch_reconverts_from_last_active() {
        let mut app = test_app();
        app.sats.text = "100000000".to_string();
        app.last_active = Field::Sats;
        app.apply_fetch(Ok(50_000.0));
        assert_eq!(app.rate, Some(50_000.0));
        assert_eq!(app.eur.text, "50000.00");
        assert_eq!(app.status_kind, StatusKind::Success);
        assert_eq!(app.rate_display, "1 BTC = \u{20ac}50 000");
    }

    #[test]
    fn failed_fetch_keeps_rate_and_fields() {
        let mut app = test_app();
        app.rate = Some(42_000.0);
        app.sats.text = "123".to_string();
        app.eur.text = "51.66".to_string();
        app.apply_fetch(Err(anyhow!("boom")));
        assert_eq!(app.rate, Some(42_000.0));
        assert_eq!(app.sats.text, "123");
        assert_eq!(app.eur.text, "51.66");
        assert_eq!(app.status_kind, StatusKind::Error);
        assert!(app.status.contains("boom"));
    }

    #[test]
    fn failed_first_fetch_shows_rate_unavailable() {
        let mut app = test_app();
        app.apply_fetch(Err(anyhow!("timed out")));
        assert_eq!(app.rate, None);
        assert_eq!(app.rate_display, "Rate unavailable");
    }

    #[test]
    fn backspace_over_a_group_space_regroups() {
        let mut app = test_app();
        for ch in "1234".chars() {
            press(&mut app, KeyCode::Char(ch));
        }
        assert_eq!(app.sats.text, "1 234");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.sats.text, "123");
        assert_eq!(app.sats.caret, 3);
    }
}
