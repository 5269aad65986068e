use chrono::NaiveDate;
use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::components::date_input::DateInputState;
use crate::ui::components::popup::centered_rect;

/// Whether the modal creates a new record or edits the one with this id.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// Decimal typed as text, parsed on submit.
    Number(String),
    Toggle(bool),
    Date(DateInputState),
    Choice { options: Vec<Choice>, selected: Option<usize> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
    pub label: &'static str,
    pub value: FieldValue,
    pub required: bool,
    /// Shown but not editable.
    pub locked: bool,
}

impl FormField {
    pub fn text(label: &'static str, value: &str) -> Self {
        Self {
            label,
            value: FieldValue::Text(value.to_string()),
            required: false,
            locked: false,
        }
    }

    pub fn number(label: &'static str, value: &str) -> Self {
        Self {
            value: FieldValue::Number(value.to_string()),
            ..Self::text(label, "")
        }
    }

    pub fn toggle(label: &'static str, value: bool) -> Self {
        Self {
            value: FieldValue::Toggle(value),
            ..Self::text(label, "")
        }
    }

    pub fn date(label: &'static str, value: NaiveDate) -> Self {
        Self {
            value: FieldValue::Date(DateInputState::new(value)),
            ..Self::text(label, "")
        }
    }

    pub fn choice(label: &'static str, options: Vec<Choice>, selected_value: Option<&str>) -> Self {
        let selected = selected_value.and_then(|v| options.iter().position(|o| o.value == v));
        Self {
            value: FieldValue::Choice { options, selected },
            ..Self::text(label, "")
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    fn is_filled(&self) -> bool {
        match &self.value {
            FieldValue::Text(s) => !s.trim().is_empty(),
            FieldValue::Number(s) => s.trim().parse::<f64>().is_ok(),
            FieldValue::Toggle(_) | FieldValue::Date(_) => true,
            FieldValue::Choice { selected, .. } => selected.is_some(),
        }
    }

    fn display(&self) -> String {
        match &self.value {
            FieldValue::Text(s) | FieldValue::Number(s) => s.clone(),
            FieldValue::Toggle(true) => "[x] Oui".to_string(),
            FieldValue::Toggle(false) => "[ ] Non".to_string(),
            FieldValue::Date(date) => date.display(),
            FieldValue::Choice { options, selected } => match selected.and_then(|i| options.get(i)) {
                Some(choice) => format!("< {} >", choice.label),
                None => "< Sélectionner >".to_string(),
            },
        }
    }
}

pub enum FormAction {
    Cancel,
    Submit,
}

/// State of the create/edit modal shared by every list screen.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    pub title: String,
    pub mode: FormMode,
    pub fields: Vec<FormField>,
    pub current: usize,
    pub editing: bool,
    pub notice: Option<String>,
    pub error: Option<String>,
}

impl FormState {
    pub fn new(title: impl Into<String>, mode: FormMode, fields: Vec<FormField>) -> Self {
        Self {
            title: title.into(),
            mode,
            fields,
            current: 0,
            editing: false,
            notice: None,
            error: None,
        }
    }

    pub fn with_notice(mut self, notice: &str) -> Self {
        self.notice = Some(notice.to_string());
        self
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.current = (self.current + 1) % self.fields.len();
        }
    }

    pub fn previous_field(&mut self) {
        if !self.fields.is_empty() {
            self.current = (self.current + self.fields.len() - 1) % self.fields.len();
        }
    }

    fn current_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.current)
    }

    /// Enter on a field: start/stop typing, flip a toggle or advance a choice.
    pub fn activate_current(&mut self) {
        let editing = self.editing;
        let Some(field) = self.current_field_mut() else {
            return;
        };
        if field.locked {
            return;
        }
        let mut now_editing = editing;
        match &mut field.value {
            FieldValue::Text(_) | FieldValue::Number(_) => now_editing = !editing,
            FieldValue::Date(date) => {
                date.toggle_editing();
                now_editing = date.editing;
            }
            FieldValue::Toggle(on) => *on = !*on,
            FieldValue::Choice { options, selected } => cycle(options.len(), selected, true),
        }
        self.editing = now_editing;
    }

    pub fn stop_editing(&mut self) {
        if let Some(FormField { value: FieldValue::Date(date), .. }) = self.fields.get_mut(self.current) {
            if date.editing {
                date.toggle_editing();
            }
        }
        self.editing = false;
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }
        let Some(field) = self.current_field_mut() else {
            return;
        };
        match (&mut field.value, key) {
            (FieldValue::Text(value), KeyCode::Char(c)) => value.push(c),
            (FieldValue::Number(value), KeyCode::Char(c)) if c.is_ascii_digit() || c == '.' || c == ',' => {
                value.push(if c == ',' { '.' } else { c });
            }
            (FieldValue::Text(value) | FieldValue::Number(value), KeyCode::Backspace) => {
                value.pop();
            }
            (FieldValue::Date(date), key) => date.handle_input(key),
            _ => {}
        }
    }

    /// Left/Right outside typing mode move through a choice list.
    pub fn cycle_current(&mut self, forward: bool) {
        if let Some(field) = self.current_field_mut() {
            if field.locked {
                return;
            }
            if let FieldValue::Choice { options, selected } = &mut field.value {
                cycle(options.len(), selected, forward);
            }
        }
    }

    /// First required field left empty, if any. Locked fields are not the operator's to fill.
    pub fn missing_field(&self) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|f| f.required && !f.locked && !f.is_filled())
            .map(|f| f.label)
    }

    /// First date field whose typed parts do not form a real day.
    pub fn invalid_date(&self) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|f| matches!(&f.value, FieldValue::Date(date) if !date.is_valid()))
            .map(|f| f.label)
    }

    pub fn text(&self, index: usize) -> String {
        match self.fields.get(index).map(|f| &f.value) {
            Some(FieldValue::Text(s)) => s.trim().to_string(),
            _ => String::new(),
        }
    }

    pub fn number(&self, index: usize) -> Option<f64> {
        match self.fields.get(index).map(|f| &f.value) {
            Some(FieldValue::Number(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn toggle(&self, index: usize) -> bool {
        matches!(self.fields.get(index).map(|f| &f.value), Some(FieldValue::Toggle(true)))
    }

    pub fn date(&self, index: usize) -> Option<NaiveDate> {
        match self.fields.get(index).map(|f| &f.value) {
            Some(FieldValue::Date(state)) => Some(state.date),
            _ => None,
        }
    }

    pub fn choice(&self, index: usize) -> Option<&str> {
        match self.fields.get(index).map(|f| &f.value) {
            Some(FieldValue::Choice { options, selected }) => {
                selected.and_then(|i| options.get(i)).map(|c| c.value.as_str())
            }
            _ => None,
        }
    }
}

fn cycle(len: usize, selected: &mut Option<usize>, forward: bool) {
    if len == 0 {
        return;
    }
    *selected = Some(match (*selected, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    });
}

pub fn handle_key(state: &mut FormState, key: KeyCode) -> Option<FormAction> {
    match key {
        KeyCode::Esc => {
            if state.editing {
                state.stop_editing();
            } else {
                return Some(FormAction::Cancel);
            }
        }
        KeyCode::Enter => {
            if state.editing {
                state.stop_editing();
            } else {
                state.activate_current();
            }
        }
        _ if state.editing => state.edit_current_field(key),
        KeyCode::Up | KeyCode::BackTab => state.previous_field(),
        KeyCode::Down | KeyCode::Tab => state.next_field(),
        KeyCode::Left => state.cycle_current(false),
        KeyCode::Right => state.cycle_current(true),
        KeyCode::Char(' ') => state.activate_current(),
        KeyCode::Char('s') => {
            if let Some(label) = state.missing_field() {
                state.error = Some(format!("Champ obligatoire: {label}"));
            } else if let Some(label) = state.invalid_date() {
                state.error = Some(format!("Date invalide: {label}"));
            } else {
                state.error = None;
                return Some(FormAction::Submit);
            }
        }
        _ => {}
    }
    None
}

pub fn render_form<B: Backend>(frame: &mut Frame<B>, state: &FormState) {
    let area = centered_rect(70, 70, frame.size());
    frame.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if state.notice.is_some() { 3 } else { 0 }),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    if let Some(notice) = &state.notice {
        let notice = Paragraph::new(notice.as_str())
            .style(Style::default().fg(Color::Cyan))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(notice, chunks[0]);
    }

    let items: Vec<ListItem> = state
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = i == state.current;
            let label_style = if field.locked {
                Style::default().fg(Color::DarkGray)
            } else if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let mut value = field.display();
            if focused && state.editing && !matches!(field.value, FieldValue::Date(_)) {
                value.push('|');
            }
            let mut value_style = if focused && state.editing {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            if matches!(&field.value, FieldValue::Date(date) if !date.is_valid()) {
                value_style = value_style.fg(Color::Red);
            }
            let marker = if field.required { "*" } else { "" };

            ListItem::new(Spans::from(vec![
                Span::styled(format!("{}{}: ", field.label, marker), label_style),
                Span::styled(value, value_style),
            ]))
        })
        .collect();

    let form = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(state.title.as_str()),
    );
    frame.render_widget(form, chunks[1]);

    let help = match (&state.error, state.editing) {
        (Some(error), _) => Spans::from(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
        (None, true) => Spans::from("Entrée - Valider le champ | Esc - Arrêter la saisie"),
        (None, false) => Spans::from(
            "Entrée - Modifier | ←/→ - Choisir | ↑/↓ - Naviguer | S - Enregistrer | Esc - Annuler",
        ),
    };
    let help = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[2]);
}
