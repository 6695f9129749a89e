//! Interactive form session: a line-oriented stand-in for the web form.

use std::io::Write;

use anyhow::bail;
use fraudlens_ai::{Analyzer, TextGenerator};
use fraudlens_core::{Field, FormState, Preset};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::display::{self, Style};

const HELP: &str = "\
Commands:
  set <field> <value>   set a field (also: <field>=<value>)
  preset normal|fraud   load an example transaction
  reset                 clear all fields and results
  submit                run the dual analysis
  show                  redraw the form and results
  presets               list example transactions
  help                  show this help
  quit                  leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(Field, String),
    Preset(Preset),
    Reset,
    Submit,
    Show,
    Presets,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    if let Some((field, value)) = word.split_once('=') {
        let value = if rest.is_empty() {
            value.to_string()
        } else {
            format!("{value} {rest}")
        };
        return Ok(Some(Command::Set(field.parse()?, value.trim().to_string())));
    }

    let cmd = match word.to_ascii_lowercase().as_str() {
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((f, v)) => (f, v.trim()),
                None if !rest.is_empty() => (rest, ""),
                None => bail!("usage: set <field> <value>"),
            };
            Command::Set(field.parse()?, value.to_string())
        }
        "preset" | "load" => {
            if rest.is_empty() {
                bail!("usage: preset normal|fraud");
            }
            Command::Preset(rest.parse()?)
        }
        "reset" | "clear" => Command::Reset,
        "submit" | "check" => Command::Submit,
        "show" => Command::Show,
        "presets" => Command::Presets,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => bail!("unknown command '{other}' (try 'help')"),
    };
    Ok(Some(cmd))
}

/// Whether the session should keep reading input.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Apply one command to the form, writing any output to `out`.
pub async fn execute<G: TextGenerator>(
    form: &mut FormState,
    analyzer: &Analyzer<G>,
    command: Command,
    style: Style,
    out: &mut impl Write,
) -> anyhow::Result<Flow> {
    match command {
        Command::Set(field, value) => form.update(field, value),
        Command::Preset(preset) => form.load_preset(preset),
        Command::Reset => form.reset(),
        Command::Show => {}
        Command::Presets => {
            write!(out, "{}", display::render_presets())?;
            return Ok(Flow::Continue);
        }
        Command::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(Flow::Continue);
        }
        Command::Quit => return Ok(Flow::Stop),
        Command::Submit => {
            let submission = match form.begin_submit() {
                Ok(s) => s,
                Err(e) => {
                    writeln!(out, "cannot submit: {e}")?;
                    return Ok(Flow::Continue);
                }
            };
            write!(out, "{}", display::render_status(form.status(), style))?;
            out.flush()?;

            match analyzer.analyze(&submission.request).await {
                Ok(verdict) => form.complete_success(submission.ticket, verdict),
                Err(e) => form.complete_error(submission.ticket, e.to_string()),
            };
        }
    }

    writeln!(out)?;
    write!(out, "{}", display::render_form(form.fields(), style))?;
    writeln!(out)?;
    write!(out, "{}", display::render_status(form.status(), style))?;
    Ok(Flow::Continue)
}

/// Read commands from stdin until `quit` or end of input.
pub async fn run<G: TextGenerator>(analyzer: &Analyzer<G>, style: Style) -> anyhow::Result<()> {
    let mut form = FormState::new();
    let mut stdout = std::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    writeln!(stdout, "fraudlens interactive form (type 'help' for commands)")?;
    execute(&mut form, analyzer, Command::Show, style, &mut stdout).await?;

    loop {
        write!(stdout, "\nfraudlens> ")?;
        stdout.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match parse_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                writeln!(stdout, "error: {e}")?;
                continue;
            }
        };
        if execute(&mut form, analyzer, command, style, &mut stdout).await? == Flow::Stop {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fraudlens_ai::{GenerateRequest, InferenceError};
    use fraudlens_core::{Label, PredictionStatus};

    struct Canned(Result<&'static str, u16>);

    impl TextGenerator for Canned {
        async fn generate(&self, _request: &GenerateRequest) -> Result<String, InferenceError> {
            match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(status) => Err(InferenceError::Server {
                    status,
                    body: String::new(),
                }),
            }
        }
    }

    const VERDICT: &str =
        r#"{"prediction": "Fraudulent", "confidence": 0.9, "reasoning": "Very negative V14."}"#;

    async fn run_commands(
        analyzer: &Analyzer<Canned>,
        form: &mut FormState,
        commands: &[&str],
    ) -> String {
        let mut out = Vec::new();
        for line in commands {
            let cmd = parse_command(line).unwrap().unwrap();
            execute(form, analyzer, cmd, Style::plain(), &mut out)
                .await
                .unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_set_forms() {
        assert_eq!(
            parse_command("set v10 -1.5").unwrap(),
            Some(Command::Set(Field::V10, "-1.5".into()))
        );
        assert_eq!(
            parse_command("  AMOUNT=12.00 ").unwrap(),
            Some(Command::Set(Field::Amount, "12.00".into()))
        );
        assert_eq!(
            parse_command("set v17").unwrap(),
            Some(Command::Set(Field::V17, String::new()))
        );
    }

    #[test]
    fn parses_other_commands() {
        assert_eq!(
            parse_command("preset fraud").unwrap(),
            Some(Command::Preset(Preset::Fraud))
        );
        assert_eq!(parse_command("submit").unwrap(), Some(Command::Submit));
        assert_eq!(parse_command("RESET").unwrap(), Some(Command::Reset));
        assert_eq!(parse_command("exit").unwrap(), Some(Command::Quit));
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command("set v99 1").is_err());
        assert!(parse_command("preset maybe").is_err());
        assert!(parse_command("preset").is_err());
        assert!(parse_command("set").is_err());
        assert!(parse_command("frobnicate").is_err());
    }

    #[tokio::test]
    async fn preset_then_submit_succeeds() {
        let analyzer = Analyzer::new(Canned(Ok(VERDICT)));
        let mut form = FormState::new();
        let out = run_commands(&analyzer, &mut form, &["preset fraud", "submit"]).await;

        assert!(out.contains("Analyzing Transaction..."));
        match form.status() {
            PredictionStatus::Success(c) => {
                assert_eq!(c.simulated_model.prediction, Label::Fraudulent);
                assert_eq!(c.ai_assistant.prediction, Label::Fraudulent);
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert!(out.contains("Simulated XGBoost Model"));
    }

    #[tokio::test]
    async fn submit_with_missing_fields_stays_idle() {
        let analyzer = Analyzer::new(Canned(Ok(VERDICT)));
        let mut form = FormState::new();
        let out = run_commands(&analyzer, &mut form, &["set v10 -1", "submit"]).await;

        assert!(out.contains("cannot submit: required fields are empty: v12, v14, v17, amount"));
        assert_eq!(form.status(), &PredictionStatus::Idle);
    }

    #[tokio::test]
    async fn failed_analysis_shows_generic_error() {
        let analyzer = Analyzer::new(Canned(Err(500)));
        let mut form = FormState::new();
        let out = run_commands(&analyzer, &mut form, &["preset normal", "submit"]).await;

        assert_eq!(
            form.status(),
            &PredictionStatus::Error("Failed to get a valid prediction from the AI models.".into())
        );
        assert!(out.contains("Analysis Failed"));
        assert!(!out.contains("500"));
    }

    #[tokio::test]
    async fn reset_after_result_returns_to_idle() {
        let analyzer = Analyzer::new(Canned(Ok(VERDICT)));
        let mut form = FormState::new();
        run_commands(&analyzer, &mut form, &["preset normal", "submit", "reset"]).await;

        assert_eq!(form.status(), &PredictionStatus::Idle);
        assert_eq!(form.missing_fields(), Field::ALL.to_vec());
    }

    #[tokio::test]
    async fn quit_stops_the_session() {
        let analyzer = Analyzer::new(Canned(Ok(VERDICT)));
        let mut form = FormState::new();
        let mut out = Vec::new();
        let flow = execute(&mut form, &analyzer, Command::Quit, Style::plain(), &mut out)
            .await
            .unwrap();
        assert_eq!(flow, Flow::Stop);
    }
}
