//! The `vocaquiz quiz` command: an interactive practice shell.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use vocaquiz_core::model::{Direction, Settings};
use vocaquiz_core::session::{QuizSession, StartOutcome};
use vocaquiz_core::traits::ItemSource;
use vocaquiz_sources::load_config_from;

use super::{open_source, resolve_scope};

pub async fn execute(
    source: Option<String>,
    deck: Option<PathBuf>,
    tag: Option<String>,
    direction: Option<Direction>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let item_source = open_source(&config, source.as_deref(), deck)?;

    let settings = Settings {
        direction: direction.unwrap_or(config.default_direction),
        scope: resolve_scope(item_source.as_ref(), tag.as_deref()).await,
    };

    let session = match seed {
        Some(seed) => QuizSession::with_seed(seed),
        None => QuizSession::new(),
    };

    let stdin = io::stdin();
    let mut shell = QuizShell::new(session, item_source.as_ref(), stdin.lock(), io::stdout());
    shell.run(settings).await
}

/// What the learner picked on the summary screen.
enum SummaryChoice {
    Repeat,
    NewQuiz,
    Quit,
}

/// Line-oriented front end over a [`QuizSession`].
pub struct QuizShell<'a, R, W> {
    session: QuizSession,
    source: &'a dyn ItemSource,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> QuizShell<'a, R, W> {
    pub fn new(session: QuizSession, source: &'a dyn ItemSource, input: R, output: W) -> Self {
        Self {
            session,
            source,
            input,
            output,
        }
    }

    /// Run quizzes until the learner quits or input ends.
    pub async fn run(&mut self, mut settings: Settings) -> Result<()> {
        loop {
            writeln!(
                self.output,
                "Loading {} from {}...",
                settings.scope,
                self.source.name()
            )?;

            match self.session.start_quiz(settings.clone(), self.source).await {
                StartOutcome::Started { total } => {
                    writeln!(
                        self.output,
                        "Practising {total} word(s), direction {}.",
                        settings.direction
                    )?;
                }
                StartOutcome::NoItems => {
                    let advisory = self.session.last_error().unwrap_or_default().to_string();
                    writeln!(self.output, "{advisory}. Try another tag.")?;
                    match self.setup(settings).await? {
                        Some(next) => {
                            settings = next;
                            continue;
                        }
                        None => return Ok(()),
                    }
                }
                StartOutcome::Failed(message) => {
                    writeln!(self.output, "Could not load words: {message}")?;
                    match self.prompt("[r] retry, [q] quit: ")?.as_deref() {
                        Some("r") => continue,
                        _ => anyhow::bail!("could not load words: {message}"),
                    }
                }
                StartOutcome::Stale => anyhow::bail!("quiz load was superseded"),
            }

            if !self.practice()? {
                writeln!(self.output, "\nQuiz ended.")?;
                return Ok(());
            }

            loop {
                match self.summary()? {
                    SummaryChoice::Repeat => {
                        self.session.repeat_quiz();
                        if !self.practice()? {
                            writeln!(self.output, "\nQuiz ended.")?;
                            return Ok(());
                        }
                    }
                    SummaryChoice::NewQuiz => {
                        self.session.reset_quiz();
                        match self.setup(settings).await? {
                            Some(next) => settings = next,
                            None => return Ok(()),
                        }
                        break;
                    }
                    SummaryChoice::Quit => return Ok(()),
                }
            }
        }
    }

    /// Ask questions until the pass completes. Returns `false` when the
    /// learner quit or input ended first.
    fn practice(&mut self) -> Result<bool> {
        while let Some(item) = self.session.current_question().cloned() {
            let direction = self.session.direction().unwrap_or_default();
            let progress = self.session.progress();

            writeln!(self.output)?;
            writeln!(
                self.output,
                "Progress: {} / {} ({}%)",
                progress.answered(),
                progress.total,
                progress.rounded_percent()
            )?;
            if progress.remaining > 1 {
                writeln!(
                    self.output,
                    "Question #{} in this session, {} words left",
                    progress.question_number, progress.remaining
                )?;
            } else {
                writeln!(
                    self.output,
                    "Question #{} in this session",
                    progress.question_number
                )?;
            }

            writeln!(self.output, "  {}", item.prompt(direction))?;
            if let Some(audio) = item.prompt_audio(direction) {
                writeln!(self.output, "  audio: {audio}")?;
            }

            match self.prompt("Press Enter to reveal (q to quit): ")?.as_deref() {
                None | Some("q") => return Ok(false),
                Some(_) => {}
            }

            writeln!(self.output, "  Answer: {}", item.answer(direction))?;
            if let Some(audio) = item.answer_audio(direction) {
                writeln!(self.output, "  audio: {audio}")?;
            }
            for example in &item.usage_examples {
                writeln!(self.output, "    - {example}")?;
            }

            let knew = loop {
                match self.prompt("Did you know it? [y/n]: ")?.as_deref() {
                    None | Some("q") => return Ok(false),
                    Some("y") | Some("yes") => break true,
                    Some("n") | Some("no") => break false,
                    Some(_) => writeln!(self.output, "Please answer y or n.")?,
                }
            };
            self.session.answer_question(knew);
        }

        Ok(self.session.progress().is_finished())
    }

    fn summary(&mut self) -> Result<SummaryChoice> {
        let progress = self.session.progress();
        writeln!(self.output)?;
        writeln!(
            self.output,
            "Quiz complete! You know all {} word(s) after {} answer(s).",
            progress.total, progress.question_number
        )?;

        loop {
            match self
                .prompt("[r] repeat this set, [n] new quiz, [q] quit: ")?
                .as_deref()
            {
                Some("r") => return Ok(SummaryChoice::Repeat),
                Some("n") => return Ok(SummaryChoice::NewQuiz),
                None | Some("q") => return Ok(SummaryChoice::Quit),
                Some(_) => writeln!(self.output, "Please choose r, n or q.")?,
            }
        }
    }

    /// Ask for the next quiz's direction and tag, keeping the current
    /// direction on an empty answer. `None` when input ends first.
    async fn setup(&mut self, current: Settings) -> Result<Option<Settings>> {
        let prompt = format!("Direction [en-pl/pl-en] (Enter keeps {}): ", current.direction);
        let direction = match self.prompt(&prompt)? {
            None => return Ok(None),
            Some(answer) if answer.is_empty() => current.direction,
            Some(answer) => match answer.parse::<Direction>() {
                Ok(direction) => direction,
                Err(e) => {
                    writeln!(self.output, "{e}, keeping {}", current.direction)?;
                    current.direction
                }
            },
        };

        let Some(tag) = self.prompt("Tag id or name (Enter for all words): ")? else {
            return Ok(None);
        };
        let scope = resolve_scope(self.source, Some(tag.as_str())).await;

        Ok(Some(Settings { direction, scope }))
    }

    /// Print `text` and read one trimmed, lowercased line. `None` at end of
    /// input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }
}
