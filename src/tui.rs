// ============================================
// src/tui.rs
// ターミナル UI (ratatui + crossterm)
// ============================================

use std::io::{Result, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use kornum::{QuizError, Session, Settings};

/// 範囲の入力欄に入れられる最大値（体系の上限で後から切る）
const RANGE_INPUT_MAX: i64 = 99_999;

// --------------------------------------------------
// データ構造
// --------------------------------------------------

/// 設定パネルの項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    System,
    Direction,
    Min,
    Max,
}

impl Field {
    const ALL: [Field; 4] = [Field::System, Field::Direction, Field::Min, Field::Max];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

/// 設定パネル（「適用」するまで反映しない）
struct SettingsPanel {
    pending: Settings,
    selected: Field,
}

/// アプリ全体の状態を管理する
struct AppState {
    session: Session,
    /// 入力中の回答
    input: String,
    /// 開いているときだけ Some
    panel: Option<SettingsPanel>,
    should_quit: bool,
}

impl AppState {
    fn new(session: Session) -> Self {
        Self {
            session,
            input: String::new(),
            panel: None,
            should_quit: false,
        }
    }

    /// 設定パネルの開閉。開くときは現在の設定を写す
    fn toggle_panel(&mut self) {
        self.panel = match self.panel {
            Some(_) => None,
            None => Some(SettingsPanel {
                pending: *self.session.settings(),
                selected: Field::System,
            }),
        };
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Tab => self.toggle_panel(),
            KeyCode::Esc if self.panel.is_some() => self.panel = None,
            KeyCode::Esc => self.should_quit = true,
            _ if self.panel.is_some() => self.handle_panel_key(key.code),
            _ => self.handle_quiz_key(key.code),
        }
    }

    /// 回答欄のキー入力
    fn handle_quiz_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => self.handle_enter(),
            // 回答済みの間は入力欄を読み取り専用にする
            KeyCode::Backspace if !self.session.has_answered() => {
                self.input.pop();
            }
            KeyCode::Char(c) if !self.session.has_answered() => self.input.push(c),
            _ => {}
        }
    }

    /// Enter: 未回答なら送信、回答済みなら次の問題へ
    fn handle_enter(&mut self) {
        if self.session.has_answered() {
            self.next_question();
            return;
        }
        match self.session.submit(&self.input, Instant::now()) {
            Ok(_) | Err(QuizError::EmptyAnswer) => {}
            Err(err) => tracing::debug!("submit ignored: {err}"),
        }
    }

    fn next_question(&mut self) {
        self.session.next_question();
        self.input.clear();
    }

    /// 設定パネルのキー入力
    fn handle_panel_key(&mut self, code: KeyCode) {
        if code == KeyCode::Enter {
            self.apply_settings();
            return;
        }
        let Some(panel) = self.panel.as_mut() else {
            return;
        };
        let pending = &mut panel.pending;
        match (code, panel.selected) {
            (KeyCode::Up, field) => panel.selected = field.prev(),
            (KeyCode::Down, field) => panel.selected = field.next(),
            (KeyCode::Left | KeyCode::Right | KeyCode::Char(' '), Field::System) => {
                pending.system = pending.system.toggled();
            }
            (KeyCode::Left | KeyCode::Right | KeyCode::Char(' '), Field::Direction) => {
                pending.direction = pending.direction.toggled();
            }
            (code, Field::Min) => edit_number(&mut pending.range.min, code),
            (code, Field::Max) => edit_number(&mut pending.range.max, code),
            _ => {}
        }
    }

    fn apply_settings(&mut self) {
        if let Some(panel) = self.panel.take() {
            self.session.apply_settings(panel.pending);
            self.input.clear();
        }
    }

    /// 自動送りの確認（ループごとに呼ぶ）
    fn on_tick(&mut self) {
        if self.session.tick(Instant::now()) {
            self.input.clear();
        }
    }
}

/// 数値欄の編集（数字キーで桁を足す、Backspace で 1 桁消す、左右で ±1）
fn edit_number(value: &mut i64, code: KeyCode) {
    // 設定ファイル由来の負の値は 0 として編集する
    let current = (*value).max(0);
    match code {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let digit = i64::from(c as u8 - b'0');
            *value = current.saturating_mul(10).saturating_add(digit).min(RANGE_INPUT_MAX);
        }
        KeyCode::Backspace => *value = current / 10,
        KeyCode::Left => *value = (current - 1).max(0),
        KeyCode::Right => *value = (current + 1).min(RANGE_INPUT_MAX),
        _ => {}
    }
}

// --------------------------------------------------
// TUIセットアップと実行ループ
// --------------------------------------------------

/// TUI を起動し、終了時のスコアを返す
pub fn run(session: Session) -> Result<kornum::Score> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, AppState::new(session));
    // 途中でエラーになっても端末は元に戻す
    restore_terminal()?;
    result
}

fn setup_terminal() -> Result<Terminal<impl Backend>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?; // 代替スクリーンを使用
    stdout().execute(Hide)?; // カーソルを非表示
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

fn restore_terminal() -> Result<()> {
    stdout().execute(Show)?; // カーソルを再表示
    stdout().execute(LeaveAlternateScreen)?; // 代替スクリーンを終了
    disable_raw_mode()?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<impl Backend>, mut app_state: AppState) -> Result<kornum::Score> {
    while !app_state.should_quit {
        app_state.on_tick();
        terminal.draw(|f| ui(f, &app_state))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app_state.handle_key(key);
                }
            }
        }
    }
    Ok(app_state.session.score())
}

// --------------------------------------------------
// UI描画
// --------------------------------------------------

fn ui(f: &mut Frame, app_state: &AppState) {
    let size = f.area();
    // 枠線を描画
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Korean Numbers Practice");
    let inner_area = block.inner(size);
    f.render_widget(block, size);

    let panel_height = if app_state.panel.is_some() { 8 } else { 0 };
    let chunks = Layout::vertical([
        Constraint::Length(1),            // [0] スコア
        Constraint::Length(1),            // [1] 説明
        Constraint::Length(2),            // [2] 問題
        Constraint::Length(1),            // [3] 回答欄
        Constraint::Length(3),            // [4] 正誤
        Constraint::Min(1),               // [5] 操作説明
        Constraint::Length(panel_height), // [6] 設定パネル
    ])
    .split(inner_area);

    let session = &app_state.session;
    let settings = session.settings();

    // 0. スコア
    f.render_widget(
        Paragraph::new(session.score().to_string())
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Right),
        chunks[0],
    );

    // 1. 説明
    f.render_widget(
        Paragraph::new(settings.direction.instruction())
            .style(Style::default().fg(Color::Gray))
            .centered(),
        chunks[1],
    );

    // 2. 問題
    f.render_widget(
        Paragraph::new(session.prompt())
            .style(Style::default().fg(Color::White).bold())
            .centered(),
        chunks[2],
    );

    // 3. 回答欄
    let mut spans = vec![
        Span::styled("> ", Style::default().fg(Color::DarkGray)),
        Span::raw(app_state.input.as_str()),
    ];
    if !session.has_answered() && app_state.panel.is_none() {
        // カーソル
        spans.push(Span::styled(" ", Style::default().bg(Color::White)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).centered(), chunks[3]);

    // 4. 正誤
    if let Some(feedback) = session.feedback() {
        let lines = if feedback.is_correct {
            vec![Line::from("✓ Correct!").style(Style::default().fg(Color::Green).bold())]
        } else {
            vec![
                Line::from("✗ Incorrect").style(Style::default().fg(Color::Red).bold()),
                Line::from(vec![
                    Span::raw("The correct answer is: "),
                    Span::styled(feedback.expected.as_str(), Style::default().bold()),
                ]),
                Line::from("Press Enter for the next question")
                    .style(Style::default().fg(Color::DarkGray)),
            ]
        };
        f.render_widget(Paragraph::new(lines).centered(), chunks[4]);
    }

    // 5. 操作説明
    let help = if app_state.panel.is_some() {
        "↑↓ select  ←→ change  Enter apply  Esc cancel"
    } else {
        "Enter submit/next  Tab settings  Esc quit"
    };
    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)).centered(),
        chunks[5],
    );

    // 6. 設定パネル
    if let Some(panel) = &app_state.panel {
        render_panel(f, panel, chunks[6]);
    }
}

fn render_panel(f: &mut Frame, panel: &SettingsPanel, area: Rect) {
    let pending = &panel.pending;
    let (lo, hi) = pending.range.bounds(pending.system);

    let row = |field: Field, label: &str, value: String| {
        let style = if field == panel.selected {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("{label:<15}"), Style::default().bold()),
            Span::styled(value, style),
        ])
    };

    let lines = vec![
        row(Field::System, "Number System:", pending.system.label().to_string()),
        row(Field::Direction, "Direction:", pending.direction.label().to_string()),
        row(Field::Min, "Range from:", pending.range.min.to_string()),
        row(Field::Max, "Range to:", pending.range.max.to_string()),
        Line::from(format!("Questions will be drawn from {lo} to {hi}"))
            .style(Style::default().fg(Color::DarkGray)),
    ];

    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Settings")),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_append_to_the_range_value() {
        let mut value = 1;
        edit_number(&mut value, KeyCode::Char('2'));
        edit_number(&mut value, KeyCode::Char('x'));
        assert_eq!(value, 12);
        edit_number(&mut value, KeyCode::Backspace);
        assert_eq!(value, 1);
    }

    #[test]
    fn negative_value_is_edited_as_zero() {
        let mut value = -5;
        edit_number(&mut value, KeyCode::Char('7'));
        assert_eq!(value, 7);

        let mut value = -42;
        edit_number(&mut value, KeyCode::Backspace);
        assert_eq!(value, 0);

        let mut value = -3;
        edit_number(&mut value, KeyCode::Left);
        assert_eq!(value, 0);
    }

    #[test]
    fn value_is_capped() {
        let mut value = RANGE_INPUT_MAX;
        edit_number(&mut value, KeyCode::Char('9'));
        assert_eq!(value, RANGE_INPUT_MAX);
        edit_number(&mut value, KeyCode::Right);
        assert_eq!(value, RANGE_INPUT_MAX);
    }
}
