// ============================================
// src/plain.rs
// 1 行ずつ回答するモード（TUI を使わない）
// ============================================

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Instant;

use console::style;

use crate::quiz::{Score, Session};

/// 入力コマンド
const CMD_QUIT: &str = ":q";
const CMD_NEXT: &str = ":n";

/// 入力が尽きるか `:q` まで出題を続け、最終スコアを返す
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, out: &mut W) -> io::Result<Score> {
    let settings = session.settings();
    writeln!(
        out,
        "{}",
        style(format!(
            "{} / {} ({CMD_NEXT} = next, {CMD_QUIT} = quit)",
            settings.system.label(),
            settings.direction.label()
        ))
        .dim()
    )?;

    let mut lines = input.lines();
    let mut show_question = true;

    loop {
        if show_question {
            writeln!(out)?;
            writeln!(out, "{}", style(session.settings().direction.instruction()).dim())?;
            writeln!(out, "  {}", style(session.prompt()).bold())?;
            show_question = false;
        }
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;

        match line.trim() {
            CMD_QUIT => break,
            CMD_NEXT => {
                session.next_question();
                show_question = true;
                continue;
            }
            _ => {}
        }

        // 回答済みなら Enter（何を入力しても）で次へ
        if session.has_answered() {
            session.next_question();
            show_question = true;
            continue;
        }

        match session.submit(&line, Instant::now()) {
            Ok(feedback) => {
                if feedback.is_correct {
                    writeln!(out, "{}", style("✓ Correct!").green().bold())?;
                } else {
                    writeln!(out, "{}", style("✗ Incorrect").red().bold())?;
                    writeln!(out, "The correct answer is: {}", style(&feedback.expected).bold())?;
                }
            }
            Err(_) => continue,
        }
        writeln!(out, "{}", style(session.score()).dim())?;

        // 正解なら少し待って自動で次へ
        if let Some(at) = session.pending_advance() {
            thread::sleep(at.saturating_duration_since(Instant::now()));
            if session.tick(Instant::now()) {
                show_question = true;
            }
        }
    }

    let score = session.score();
    writeln!(out, "{}", style(score).bold())?;
    Ok(score)
}
