use crate::content::{
    example_labels, LIMITED_KNOWLEDGE_TEXT, LIMITED_KNOWLEDGE_TITLE, MORE_BELOW, THINKING,
};
use colored::Colorize;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{self, Clear, ClearType};
use domain::models::{Message, Sender};
use domain::scroll::{ScrollMetrics, SCROLLED_AWAY_THRESHOLD_PX};
use domain::session::Transcript;
use domain::state::ChatState;
use std::io::{self, Write};

/// Nominal height of one terminal row in the pixel model the scroll threshold
/// is expressed in.
pub const ROW_HEIGHT_PX: u32 = 20;
/// Rows kept free below the transcript for the status line and the prompt.
const RESERVED_ROWS: u16 = 4;
const MIN_VIEW_ROWS: u16 = 6;
const MIN_VIEW_COLS: u16 = 20;

pub fn scroll_threshold_rows() -> u32 {
    SCROLLED_AWAY_THRESHOLD_PX / ROW_HEIGHT_PX
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStyle {
    UserHeader,
    AssistantHeader,
    Body(Sender),
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    text: String,
    style: LineStyle,
}

impl Line {
    fn painted(&self) -> String {
        match self.style {
            LineStyle::UserHeader => self.text.cyan().bold().to_string(),
            LineStyle::AssistantHeader => self.text.green().bold().to_string(),
            LineStyle::Body(Sender::User) => self.text.clone(),
            LineStyle::Body(Sender::Assistant) => self.text.bright_white().to_string(),
            LineStyle::Blank => String::new(),
        }
    }
}

/// Scrollable window over the rendered transcript, measured in rows.
pub struct TranscriptView {
    lines: Vec<Line>,
    offset: u32,
    width: u16,
    height: u16,
}

impl TranscriptView {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            lines: Vec::new(),
            offset: 0,
            width: width.max(MIN_VIEW_COLS),
            height: height.max(MIN_VIEW_ROWS),
        }
    }

    pub fn from_terminal() -> Self {
        let (width, height) = terminal::size().unwrap_or((80, 24));
        Self::new(width, height.saturating_sub(RESERVED_ROWS))
    }

    /// Rebuilds the row list from the transcript. The offset is clamped but
    /// otherwise kept; snapping to the bottom is the tracker's decision.
    pub fn layout(&mut self, transcript: &Transcript) {
        self.lines = transcript
            .messages()
            .iter()
            .flat_map(|message| message_lines(message, self.width as usize))
            .collect();
        self.offset = self.offset.min(self.metrics().bottom_offset());
    }

    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            offset: self.offset,
            content_height: self.lines.len() as u32,
            viewport_height: self.height as u32,
        }
    }

    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(self.page_step());
    }

    pub fn scroll_down(&mut self) {
        let bottom = self.metrics().bottom_offset();
        self.offset = (self.offset + self.page_step()).min(bottom);
    }

    pub fn scroll_to(&mut self, offset: u32) {
        self.offset = offset.min(self.metrics().bottom_offset());
    }

    fn page_step(&self) -> u32 {
        (self.height as u32 / 2).max(1)
    }

    fn visible(&self) -> impl Iterator<Item = &Line> {
        self.lines
            .iter()
            .skip(self.offset as usize)
            .take(self.height as usize)
    }

    /// Clears the screen and paints the visible rows plus the status area.
    pub fn draw(&self, out: &mut impl Write, state: &ChatState, note: Option<&str>) -> io::Result<()> {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        if state.transcript.is_initial() {
            writeln!(out, "{}", format!("⚠ {}", LIMITED_KNOWLEDGE_TITLE).yellow().bold())?;
            for row in wrap(LIMITED_KNOWLEDGE_TEXT, self.width as usize) {
                writeln!(out, "{}", row.yellow())?;
            }
            writeln!(out)?;
        }
        for line in self.visible() {
            writeln!(out, "{}", line.painted())?;
        }
        if state.transcript.is_initial() {
            writeln!(out, "{}", "Contoh pertanyaan (/example N):".dimmed())?;
            for label in example_labels() {
                writeln!(out, "  {}", label)?;
            }
        }
        if state.scroll.is_scrolled_away() {
            writeln!(out, "{}", format!("↓ {}", MORE_BELOW).blue())?;
        }
        if state.busy {
            writeln!(out, "{}", THINKING.yellow())?;
        }
        if let Some(note) = note {
            writeln!(out, "{}", note)?;
        }
        out.flush()
    }
}

fn message_lines(message: &Message, width: usize) -> Vec<Line> {
    let header = match message.sender {
        Sender::User => Line {
            text: format!("Anda · {}", message.timestamp.format("%H:%M")),
            style: LineStyle::UserHeader,
        },
        Sender::Assistant => Line {
            text: format!("AI Nahwu · {}", message.timestamp.format("%H:%M")),
            style: LineStyle::AssistantHeader,
        },
    };
    let mut lines = vec![header];
    lines.extend(wrap(&message.text, width).into_iter().map(|text| Line {
        text,
        style: LineStyle::Body(message.sender),
    }));
    lines.push(Line {
        text: String::new(),
        style: LineStyle::Blank,
    });
    lines
}

/// Greedy word wrap by character count. Words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if current_len > 0 {
                    rows.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(width);
                rows.push(word.into_iter().collect());
                word = rest;
            }
            let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
            if needed > width {
                rows.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(word.iter());
            current_len += word.len();
        }
        rows.push(current);
    }
    rows
}
