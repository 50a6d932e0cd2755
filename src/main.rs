/* RPN-keypad (c) 2025 Nathaniel Clark
 *
 * This source code is subject to the terms of the GPL v2. See LICENCE file.
 */

use clap::Parser;
use rpn_keypad::{
    layout::{self, Key},
    numbers::{Notation, NumberFormat},
    ui::{buttons_for_token, readline::ReadlineCalcUI, CalcDisplay, Info, Message},
    CalculatorEngine, EngineConfig,
};
use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Keypad RPN calculator")]
struct Cli {
    /// Significant digits shown for stack values
    #[arg(short, long, default_value_t = layout::DISPLAY_DECIMALS)]
    precision: usize,

    /// Number notation for stack values
    #[arg(short, long, value_enum, default_value_t)]
    notation: Notation,

    /// Stack levels shown
    #[arg(short, long, default_value_t = layout::DISPLAYED_STACK_SIZE)]
    rows: usize,

    /// Keep at most this many undo steps
    #[arg(long, value_name = "STEPS")]
    undo_limit: Option<usize>,

    /// Enter commits input even when inverse mode is on
    #[arg(long)]
    no_inverse_enter_undo: bool,

    /// Load calculator state from FILE and save it back on exit
    #[arg(short, long, value_name = "FILE")]
    state: Option<PathBuf>,
}

fn load_state(engine: &mut CalculatorEngine, path: &Path) {
    match fs::read_to_string(path) {
        Ok(text) => {
            if let Err(e) = engine.from_json(&text) {
                eprintln!("Ignoring {}: {e}", path.display());
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("no saved state at {}", path.display())
        }
        Err(e) => eprintln!("Failed to read {}: {e}", path.display()),
    }
}

/// Press the keys of one typed line. Stops at the first key that fails so
/// its error stays on display.
fn run_line(engine: &mut CalculatorEngine, line: &str) -> Result<(), String> {
    for token in line.split_whitespace() {
        let buttons = buttons_for_token(token).ok_or_else(|| format!("Unknown key: {token}"))?;
        // a space between two numbers works like Enter
        let starts_number = match buttons.first().map(|b| b.key) {
            Some(Key::Digit(c)) => c != 'E',
            Some(Key::Constant(_)) => true,
            _ => false,
        };
        if starts_number && !engine.input().is_empty() {
            engine.press(Key::Enter);
            if !engine.error_message().is_empty() {
                return Ok(());
            }
        }
        for b in buttons {
            engine.dispatch(layout::current_face(b, engine.inverse_mode()));
            if !engine.error_message().is_empty() {
                return Ok(());
            }
        }
    }
    // Return is the Enter key
    if line.trim().is_empty() || !engine.input().is_empty() {
        engine.press(Key::Enter);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut engine = CalculatorEngine::new(EngineConfig {
        undo_limit: cli.undo_limit,
        inverse_enter_undoes: !cli.no_inverse_enter_undo,
    });
    if let Some(path) = cli.state.as_ref() {
        load_state(&mut engine, path);
    }

    let mut ui = ReadlineCalcUI::init(Info {
        format: NumberFormat {
            precision: cli.precision,
            notation: cli.notation,
        },
        rows: cli.rows,
    })?;
    ui.render(&engine);

    while let Some(msg) = ui.next() {
        match msg {
            Message::Input(line) => {
                let rv = run_line(&mut engine, &line);
                ui.render(&engine);
                if let Err(e) = rv {
                    eprintln!("{e}");
                }
            }
            Message::Help => ui.help(),
            Message::Quit => break,
        }
    }
    ui.quit();

    if let Some(path) = cli.state.as_ref() {
        fs::write(path, engine.to_json()?)?;
        log::info!("saved state to {}", path.display());
    }
    Ok(())
}
