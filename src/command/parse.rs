//! Разбор текстовых команд.
//!
//! Строка делится на токены по пробелам; одинарные и двойные кавычки
//! позволяют включать пробелы в ключи и значения. Внутри двойных кавычек
//! `\"` и `\\` экранируют символ. Имя команды нечувствительно к регистру.

use ordix_error::CommandError;

use super::{
    CheckCommand, ClearCommand, Command, DelCommand, EngineCommand, ExistsCommand, FirstCommand,
    GetCommand, HelpCommand, LastCommand, LenCommand, LowerCommand, RangeCommand, ScanCommand,
    SetCommand, UpperCommand,
};

impl Command {
    /// Разбирает строку вида `SET key value` в команду.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let tokens = tokenize(line)?;
        let (name, args) = tokens.split_first().ok_or(CommandError::Empty)?;

        let command = match name.to_ascii_uppercase().as_str() {
            "SET" => {
                let [key, value] = exact::<2>("SET", args)?;
                Command::Set(SetCommand { key, value })
            }
            "GET" => {
                let [key] = exact::<1>("GET", args)?;
                Command::Get(GetCommand { key })
            }
            "DEL" => {
                let [key] = exact::<1>("DEL", args)?;
                Command::Del(DelCommand { key })
            }
            "EXISTS" => {
                let [key] = exact::<1>("EXISTS", args)?;
                Command::Exists(ExistsCommand { key })
            }
            "LOWER" => {
                let [key] = exact::<1>("LOWER", args)?;
                Command::Lower(LowerCommand { key })
            }
            "UPPER" => {
                let [key] = exact::<1>("UPPER", args)?;
                Command::Upper(UpperCommand { key })
            }
            "RANGE" => {
                let [start, end] = exact::<2>("RANGE", args)?;
                Command::Range(RangeCommand { start, end })
            }
            "SCAN" => {
                let limit = match args {
                    [] => None,
                    [raw] => Some(raw.parse::<usize>().map_err(|_| {
                        CommandError::InvalidInteger { value: raw.clone() }
                    })?),
                    _ => {
                        return Err(CommandError::WrongArity {
                            command: "SCAN",
                            expected: "0 or 1",
                            actual: args.len(),
                        })
                    }
                };
                Command::Scan(ScanCommand { limit })
            }
            "FIRST" => no_args("FIRST", args, Command::First(FirstCommand))?,
            "LAST" => no_args("LAST", args, Command::Last(LastCommand))?,
            "LEN" => no_args("LEN", args, Command::Len(LenCommand))?,
            "CLEAR" => no_args("CLEAR", args, Command::Clear(ClearCommand))?,
            "CHECK" => no_args("CHECK", args, Command::Check(CheckCommand))?,
            "ENGINE" => no_args("ENGINE", args, Command::Engine(EngineCommand))?,
            "HELP" => Command::Help(HelpCommand),
            _ => return Err(CommandError::Unknown { name: name.clone() }),
        };

        Ok(command)
    }
}

/// Делит строку на токены с учётом кавычек.
pub fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' => {
                in_token = true;
                read_quoted(c, &mut chars, &mut current).ok_or_else(|| {
                    CommandError::UnbalancedQuotes {
                        line: line.to_string(),
                    }
                })?;
            }
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                in_token = true;
                current.push(c);
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

/// Читает содержимое кавычек до закрывающей; `None`, если её нет.
fn read_quoted(
    quote: char,
    chars: &mut std::str::Chars<'_>,
    out: &mut String,
) -> Option<()> {
    loop {
        match chars.next()? {
            c if c == quote => return Some(()),
            '\\' if quote == '"' => match chars.next()? {
                c @ ('"' | '\\') => out.push(c),
                c => {
                    out.push('\\');
                    out.push(c);
                }
            },
            c => out.push(c),
        }
    }
}

fn exact<const N: usize>(
    command: &'static str,
    args: &[String],
) -> Result<[String; N], CommandError> {
    <[String; N]>::try_from(args.to_vec()).map_err(|_| CommandError::WrongArity {
        command,
        expected: arity_label(N),
        actual: args.len(),
    })
}

fn no_args(
    command: &'static str,
    args: &[String],
    parsed: Command,
) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(parsed)
    } else {
        Err(CommandError::WrongArity {
            command,
            expected: "0",
            actual: args.len(),
        })
    }
}

fn arity_label(n: usize) -> &'static str {
    match n {
        0 => "0",
        1 => "1",
        2 => "2",
        _ => "more",
    }
}
