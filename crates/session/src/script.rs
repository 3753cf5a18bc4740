//! Intent scripts for headless replay.
//!
//! Either a JSON array of tagged intents, or one command per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! pick 1919-06-28
//! prev
//! next
//! click 3
//! close
//! escape
//! panel
//! resize 390 844
//! ```

use catalog::EventId;
use foundation::time::{CalendarDate, DateError};

use crate::intent::Intent;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command {command:?}")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: {command} expects {expected}")]
    Arguments {
        line: usize,
        command: String,
        expected: &'static str,
    },
    #[error("line {line}: {source}")]
    Date { line: usize, source: DateError },
    #[error("line {line}: not a number: {value:?}")]
    Number { line: usize, value: String },
    #[error("script json: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_script(text: &str) -> Result<Vec<Intent>, ScriptError> {
    if text.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(text)?);
    }

    let mut out = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        out.push(parse_line(line, content)?);
    }
    Ok(out)
}

fn parse_line(line: usize, content: &str) -> Result<Intent, ScriptError> {
    let mut parts = content.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    let arity = |n: usize, expected: &'static str| {
        if args.len() == n {
            Ok(())
        } else {
            Err(ScriptError::Arguments {
                line,
                command: command.to_string(),
                expected,
            })
        }
    };

    let intent = match command {
        "pick" | "date" => {
            arity(1, "a date (YYYY-MM-DD)")?;
            let date =
                CalendarDate::parse(args[0]).map_err(|source| ScriptError::Date { line, source })?;
            Intent::DatePicked { date }
        }
        "click" => {
            arity(1, "an event id")?;
            Intent::MarkerClicked {
                event: EventId(number(line, args[0])?),
            }
        }
        "prev" | "previous" => {
            arity(0, "no arguments")?;
            Intent::PreviousIncident
        }
        "next" => {
            arity(0, "no arguments")?;
            Intent::NextIncident
        }
        "close" => {
            arity(0, "no arguments")?;
            Intent::CloseCard
        }
        "escape" | "esc" => {
            arity(0, "no arguments")?;
            Intent::Escape
        }
        "panel" => {
            arity(0, "no arguments")?;
            Intent::TogglePanel
        }
        "resize" => {
            arity(2, "width and height")?;
            Intent::Resized {
                width: number(line, args[0])?,
                height: number(line, args[1])?,
            }
        }
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            });
        }
    };
    Ok(intent)
}

fn number(line: usize, value: &str) -> Result<u32, ScriptError> {
    value.parse().map_err(|_| ScriptError::Number {
        line,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{ScriptError, parse_script};
    use crate::intent::Intent;
    use catalog::EventId;
    use foundation::time::CalendarDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_line_script() {
        let script = "
            # Versailles walk-through
            pick 1919-06-28
            prev   # back to the conference
            click 0
            close
            panel
            esc
            next
            resize 390 844
        ";
        let intents = parse_script(script).expect("script");
        assert_eq!(
            intents,
            vec![
                Intent::DatePicked {
                    date: CalendarDate::from_ymd(1919, 6, 28).expect("date")
                },
                Intent::PreviousIncident,
                Intent::MarkerClicked { event: EventId(0) },
                Intent::CloseCard,
                Intent::TogglePanel,
                Intent::Escape,
                Intent::NextIncident,
                Intent::Resized {
                    width: 390,
                    height: 844
                },
            ]
        );
    }

    #[test]
    fn parses_json_script() {
        let intents =
            parse_script(r#"[{"type": "next_incident"}, {"type": "marker_clicked", "event": 1}]"#)
                .expect("script");
        assert_eq!(
            intents,
            vec![
                Intent::NextIncident,
                Intent::MarkerClicked { event: EventId(1) }
            ]
        );
    }

    #[test]
    fn reports_line_numbers() {
        let err = parse_script("next\njump 3\n").expect_err("unknown");
        assert!(matches!(err, ScriptError::UnknownCommand { line: 2, .. }));

        let err = parse_script("pick 1919/06/28").expect_err("bad date");
        assert!(matches!(err, ScriptError::Date { line: 1, .. }));

        let err = parse_script("click").expect_err("arity");
        assert!(err.to_string().contains("expects an event id"));

        let err = parse_script("click -1").expect_err("number");
        assert!(matches!(err, ScriptError::Number { line: 1, .. }));
    }
}
