use chrono::{Datelike, NaiveDate};
use crossterm::event::KeyCode;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum DatePart {
    Day,
    Month,
    Year,
}

const YEARS: std::ops::RangeInclusive<i32> = 1900..=2100;

/// Keyboard date entry, typed part by part as JJ/MM/AAAA.
///
/// Each part is kept as typed; `date` follows whenever the three parts form a real day.
#[derive(Clone, Debug, PartialEq)]
pub struct DateInputState {
    pub date: NaiveDate,
    pub editing: bool,
    pub part: DatePart,
    day: u32,
    month: u32,
    year: i32,
    buffer: String,
}

impl DateInputState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            editing: false,
            part: DatePart::Day,
            day: date.day(),
            month: date.month(),
            year: date.year(),
            buffer: String::new(),
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        self.part = DatePart::Day;
        self.buffer.clear();
    }

    pub fn next_part(&mut self) {
        self.part = match self.part {
            DatePart::Day => DatePart::Month,
            DatePart::Month => DatePart::Year,
            DatePart::Year => DatePart::Day,
        };
        self.buffer.clear();
    }

    pub fn previous_part(&mut self) {
        self.part = match self.part {
            DatePart::Day => DatePart::Year,
            DatePart::Month => DatePart::Day,
            DatePart::Year => DatePart::Month,
        };
        self.buffer.clear();
    }

    fn width(&self) -> usize {
        match self.part {
            DatePart::Year => 4,
            _ => 2,
        }
    }

    /// False while the typed parts do not name a real day (31/02, year 0042).
    pub fn is_valid(&self) -> bool {
        self.resolve().is_some()
    }

    fn resolve(&self) -> Option<NaiveDate> {
        if !YEARS.contains(&self.year) {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn handle_input(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.buffer.push(c);
                if self.buffer.len() == self.width() {
                    self.commit();
                    self.next_part();
                }
            }
            KeyCode::Backspace => {
                self.buffer.pop();
            }
            KeyCode::Right => self.next_part(),
            KeyCode::Left => self.previous_part(),
            _ => {}
        }
    }

    fn commit(&mut self) {
        let Ok(value) = self.buffer.parse::<u32>() else {
            return;
        };
        match self.part {
            DatePart::Day => self.day = value,
            DatePart::Month => self.month = value,
            DatePart::Year => self.year = value as i32,
        }
        if let Some(date) = self.resolve() {
            self.date = date;
        }
    }

    pub fn display(&self) -> String {
        let day = format!("{:02}", self.day);
        let month = format!("{:02}", self.month);
        let year = format!("{:04}", self.year);
        if !self.editing {
            return format!("{day}/{month}/{year}");
        }

        let pending = if self.buffer.is_empty() {
            match self.part {
                DatePart::Day => "[JJ]".to_string(),
                DatePart::Month => "[MM]".to_string(),
                DatePart::Year => "[AAAA]".to_string(),
            }
        } else {
            format!("[{}]", self.buffer)
        };

        match self.part {
            DatePart::Day => format!("{pending}/{month}/{year}"),
            DatePart::Month => format!("{day}/{pending}/{year}"),
            DatePart::Year => format!("{day}/{month}/{pending}"),
        }
    }
}
