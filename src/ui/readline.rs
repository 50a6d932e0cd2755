/* RPN-keypad (c) 2025 Nathaniel Clark
 *
 * This source code is subject to the terms of the GPL v2. See LICENCE file.
 */

use crate::{
    engine::CalculatorEngine,
    ui::{help_text, CalcDisplay, Info, Message},
};

use rustyline::{error::ReadlineError, DefaultEditor};
use std::error::Error;

const PROMPT: &str = ">> ";

pub struct ReadlineCalcUI {
    info: Info,
    editor: DefaultEditor,
    status: String,
    stack: Vec<String>,
    input: String,
    error: Option<String>,
}

impl CalcDisplay for ReadlineCalcUI {
    fn init(info: Info) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let editor = DefaultEditor::new()?;

        Ok(Self {
            info,
            editor,
            status: String::new(),
            stack: vec![],
            input: String::new(),
            error: None,
        })
    }

    /// Wait on next Message for event loop
    fn next(&mut self) -> Option<Message> {
        loop {
            println!("{}", self.status);
            if let Some(err) = self.error.as_ref() {
                println!("Error: {err}");
            }
            if self.stack.is_empty() {
                println!("   1:")
            } else {
                self.stack.iter().for_each(|s| println!("{s}"));
            }
            if !self.input.is_empty() {
                println!("      {}", self.input);
            }

            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        log::warn!("history entry not kept: {e}");
                    }
                    return Some(match line.trim() {
                        "q" | "quit" | "exit" => Message::Quit,
                        "?" | "help" => Message::Help,
                        _ => Message::Input(line),
                    });
                }
                Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => break,
                Err(ReadlineError::WindowResized) => {} // redraw
                Err(e) => {
                    self.error = Some(e.to_string());
                    continue;
                }
            }
        }
        None
    }

    fn render(&mut self, engine: &CalculatorEngine) {
        self.status = format!(
            "{:5}{}",
            engine.angle_unit().to_string(),
            if engine.inverse_mode() { "Inv" } else { "" }
        );
        self.stack = engine
            .display_lines(self.info.rows, &self.info.format)
            .into_iter()
            .map(|(level, v)| format!("{level:>4}: {v:>20}"))
            .collect();
        self.input = engine.input().to_string();
        self.error = match engine.error_message() {
            "" => None,
            msg => Some(msg.to_string()),
        };
    }

    /// Show Help Text
    fn help(&mut self) {
        println!("{}", help_text());
    }

    /// Cleanup and quit
    fn quit(&mut self) {}
}
