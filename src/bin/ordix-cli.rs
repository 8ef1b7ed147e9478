//! CLI для упорядоченного индекса ordix.
//!
//! Выполняет команды (`SET`, `GET`, `RANGE`, ...) над skip list или
//! красно-чёрным деревом. Режимы: `--eval` для одиночных команд,
//! интерактивный REPL на терминале и построчное чтение stdin в остальных
//! случаях.

use std::{
    io::{self, BufRead, IsTerminal},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use ordix::{
    init_logging, Command, CommandExecute, EngineKind, IndexEngine, KeyOrderKind, LogFormat,
    Reply, Settings, StackError,
};
use owo_colors::OwoColorize;
use rustyline::{error::ReadlineError, DefaultEditor};
use tracing::{debug, info};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (git ",
    env!("GIT_COMMIT"),
    ", built ",
    env!("BUILD_TIME"),
    ")"
);

/// Основная структура CLI аргументов.
///
/// Флаги перекрывают значения из файла настроек и переменных окружения.
#[derive(Parser, Debug)]
#[command(name = "ordix-cli")]
#[command(version = VERSION)]
#[command(about = "Ordered in-memory index: skip list or red-black tree", long_about = None)]
struct Cli {
    /// Реализация индекса
    #[arg(long, help = "Index engine: skiplist or rbtree")]
    engine: Option<EngineKind>,
    /// Порядок ключей
    #[arg(long, help = "Key order: natural or reverse")]
    order: Option<KeyOrderKind>,
    /// Зерно генератора уровней
    #[arg(long, help = "Seed for the skip list level generator")]
    seed: Option<u64>,
    /// Файл настроек (TOML)
    #[arg(short, long, env = "ORDIX_CONFIG", help = "Path to a TOML settings file")]
    config: Option<PathBuf>,
    /// Уровень логирования
    #[arg(long, help = "Log level (trace, debug, info, warn, error)")]
    log_level: Option<String>,
    /// Формат логов
    #[arg(long, help = "Log format: pretty, compact or json")]
    log_format: Option<LogFormat>,
    /// Отключить цвета
    #[arg(long, help = "Disable colored output")]
    no_color: bool,
    /// Команды для выполнения без REPL
    #[arg(
        short,
        long = "eval",
        value_name = "COMMAND",
        help = "Run a command and exit (repeatable), e.g. -e 'SET k v' -e 'GET k'"
    )]
    eval: Vec<String>,
}

impl Cli {
    /// Загружает настройки и применяет поверх них флаги командной строки.
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load_from(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?,
            None => Settings::load().context("failed to load settings")?,
        };

        if let Some(engine) = self.engine {
            settings.engine = engine;
        }
        if let Some(order) = self.order {
            settings.order = order;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if let Some(level) = &self.log_level {
            settings.logging.level = level.clone();
        }
        if let Some(format) = self.log_format {
            settings.logging.format = format;
        }
        if self.no_color {
            settings.logging.with_ansi = false;
        }

        Ok(settings)
    }
}

/// Результат обработки одной строки.
enum LineOutcome {
    Continue,
    Failed,
    Exit,
}

/// Точка входа в CLI.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings()?;

    init_logging(&settings.logging).context("failed to initialize logging")?;
    info!(
        engine = %settings.engine,
        order = %settings.order,
        seed = ?settings.seed,
        "ordix-cli started"
    );

    let color = !cli.no_color && io::stdout().is_terminal();
    let mut engine = IndexEngine::initialize(&settings);

    if !cli.eval.is_empty() {
        for line in &cli.eval {
            if let LineOutcome::Failed = run_line(&mut engine, line, color) {
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    if io::stdin().is_terminal() {
        interactive_mode(&mut engine, color)
    } else {
        let mut failed = false;
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            match run_line(&mut engine, &line, color) {
                LineOutcome::Exit => break,
                LineOutcome::Failed => failed = true,
                LineOutcome::Continue => {}
            }
        }
        if failed {
            std::process::exit(1);
        }
        Ok(())
    }
}

/// Интерактивный режим (REPL).
fn interactive_mode(
    engine: &mut IndexEngine,
    color: bool,
) -> Result<()> {
    print_banner(engine, color);

    let mut rl = DefaultEditor::new().context("failed to initialize line editor")?;
    let prompt = format!("ordix({})> ", engine.name());

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                if let LineOutcome::Exit = run_line(engine, &line, color) {
                    break;
                }
            }
            // Ctrl+C только сбрасывает текущую строку
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(e) => return Err(e).context("failed to read input"),
        }
    }

    debug!("REPL finished");
    Ok(())
}

/// Разбирает и выполняет одну строку, печатает ответ или ошибку.
fn run_line(
    engine: &mut IndexEngine,
    line: &str,
    color: bool,
) -> LineOutcome {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return LineOutcome::Continue;
    }
    if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
        return LineOutcome::Exit;
    }

    let result = Command::parse(trimmed)
        .map_err(StackError::from)
        .and_then(|command| command.execute(engine));

    match result {
        Ok(reply) => {
            print_reply(&reply, color);
            LineOutcome::Continue
        }
        Err(err) => {
            print_error(&err, color);
            LineOutcome::Failed
        }
    }
}

fn print_reply(
    reply: &Reply,
    color: bool,
) {
    if !color {
        println!("{reply}");
        return;
    }

    match reply {
        Reply::Ok => println!("{}", "OK".green()),
        Reply::Nil => println!("{}", reply.dimmed()),
        Reply::Entries(entries) if entries.is_empty() => println!("{}", reply.dimmed()),
        Reply::Integer(_) => println!("{}", reply.cyan()),
        Reply::Text(text) => println!("{}", text.trim_end().bright_blue()),
        _ => println!("{reply}"),
    }
}

fn print_error(
    err: &StackError,
    color: bool,
) {
    let message = format!("(error) {}", err.client_message());
    if color {
        eprintln!("{}", message.red());
    } else {
        eprintln!("{message}");
    }
    debug!(status = err.status_code().code(), error = ?err, "command error");
}

/// Баннер CLI.
fn print_banner(
    engine: &IndexEngine,
    color: bool,
) {
    let title = format!("ordix-cli {VERSION}");
    let hint = format!(
        "engine: {}. Type HELP for commands, QUIT to exit.",
        engine.name()
    );

    if color {
        println!("{}", title.bold().bright_blue());
        println!("{}", hint.dimmed());
    } else {
        println!("{title}");
        println!("{hint}");
    }
}
