use anyhow::{Context as AnyhowContext, Result};
use async_trait::async_trait;
use docbot_command::{Choice, CommandSource, DisplayMode, DocCommand, Invocation, Outcome, Reply};
use docbot_parsers::{integer, literal, phrase, ArgumentReader};
use std::sync::{Arc, Mutex, MutexGuard};

/// One line typed into the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    Command(Invocation),
    /// Press choice `column` of `row` in the last menu (both 1-based)
    Click { row: usize, column: usize },
    Quit,
    Empty,
    Unknown(String),
}

/// What became of one console line
#[derive(Debug)]
pub enum LineOutcome {
    /// The doc command ran
    Command(Outcome),
    /// Blank, unrecognised, or a click on a choice that isn't on screen
    Ignored,
    Quit,
}

#[derive(Default)]
struct ConsoleState {
    menu: Mutex<Vec<Vec<Choice>>>,
    output: Mutex<Vec<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A message typed into the console, seen as a chat message
struct ConsoleSource {
    id: String,
    state: Arc<ConsoleState>,
}

#[async_trait]
impl CommandSource for ConsoleSource {
    fn id(&self) -> &str {
        &self.id
    }

    async fn reply(&self, reply: Reply) -> Result<()> {
        if let Reply::Choices { rows, .. } = &reply {
            *lock(&self.state.menu) = rows.clone();
        }
        lock(&self.state.output).push(render(&reply));
        Ok(())
    }
}

/// Line-oriented chat stand-in: typed commands, `/doc` structured commands
/// and `click` for pressing offered choices.
pub struct Console {
    command: DocCommand,
    state: Arc<ConsoleState>,
    next_message: u64,
}

impl Console {
    pub fn new(command: DocCommand) -> Self {
        Self {
            command,
            state: Arc::default(),
            next_message: 1,
        }
    }

    /// Handles one input line
    pub async fn handle_line(&mut self, line: &str) -> Result<LineOutcome> {
        let invocation = match parse_line(&self.command, line) {
            ConsoleInput::Quit => return Ok(LineOutcome::Quit),
            ConsoleInput::Empty => return Ok(LineOutcome::Ignored),
            ConsoleInput::Unknown(text) => {
                self.print(format!("Unknown command: {text}"));
                return Ok(LineOutcome::Ignored);
            }
            ConsoleInput::Click { row, column } => match self.choice_payload(row, column) {
                Some(payload) => Invocation::follow_up(payload),
                None => {
                    self.print(format!("There is no choice {row}.{column}"));
                    return Ok(LineOutcome::Ignored);
                }
            },
            ConsoleInput::Command(invocation) => invocation,
        };

        let source = ConsoleSource {
            id: format!("msg-{}", self.next_message),
            state: Arc::clone(&self.state),
        };
        self.next_message += 1;

        let outcome = self
            .command
            .handle(&invocation, &source)
            .await
            .context("deliver reply")?;
        Ok(LineOutcome::Command(outcome))
    }

    /// Rendered replies since the last call
    pub fn take_output(&self) -> Vec<String> {
        std::mem::take(&mut *lock(&self.state.output))
    }

    fn choice_payload(&self, row: usize, column: usize) -> Option<String> {
        let menu = lock(&self.state.menu);
        let choice = menu
            .get(row.checked_sub(1)?)?
            .get(column.checked_sub(1)?)?;
        Some(choice.payload.clone())
    }

    fn print(&self, text: String) {
        lock(&self.state.output).push(text);
    }
}

/// Classifies a console line
pub fn parse_line(command: &DocCommand, line: &str) -> ConsoleInput {
    let line = line.trim();
    if line.is_empty() {
        return ConsoleInput::Empty;
    }
    if matches!(line, "quit" | "exit") {
        return ConsoleInput::Quit;
    }
    if let Some(click) = parse_click(line) {
        return click;
    }
    if let Some(invocation) = parse_structured(line) {
        return ConsoleInput::Command(invocation);
    }
    if command.matches(line) {
        return ConsoleInput::Command(Invocation::typed(line));
    }
    ConsoleInput::Unknown(line.to_string())
}

/// `click <row> <column>`
fn parse_click(line: &str) -> Option<ConsoleInput> {
    let mut reader = ArgumentReader::new(line);
    reader.shift(&literal("click")).ok()?;
    let row = reader.shift(&integer()).ok()?;
    let column = reader.shift(&integer()).ok()?;
    if !reader.is_exhausted() {
        return None;
    }
    Some(ConsoleInput::Click {
        row: usize::try_from(row).ok()?,
        column: usize::try_from(column).ok()?,
    })
}

/// `/doc <query words or "quoted phrase"> [--long] [--omit-tags]`
fn parse_structured(line: &str) -> Option<Invocation> {
    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let mut name = ArgumentReader::new(head);
    name.shift(&literal("/")).ok()?;
    name.shift(&DocCommand::keyword()).ok()?;
    if !name.is_exhausted() {
        return None;
    }

    let mut reader = ArgumentReader::new(rest.trim_start());
    let mut long = false;
    let mut omit_tags = false;
    let mut words = Vec::new();
    while !reader.is_exhausted() {
        let token = reader.shift(&phrase()).ok()?;
        match token.as_str() {
            "--long" => long = true,
            "--omit-tags" => omit_tags = true,
            _ => words.push(token),
        }
    }

    Some(Invocation::Structured {
        query: words.join(" "),
        long,
        omit_tags,
    })
}

/// Plain-text rendering of a reply
pub fn render(reply: &Reply) -> String {
    match reply {
        Reply::Element {
            element,
            origin,
            options,
        } => {
            let mut out = vec![element.declaration.clone()];
            if !element.summary.is_empty() {
                out.push(element.summary.clone());
            }
            if options.display == DisplayMode::Long {
                if let Some(description) = &element.description {
                    out.push(description.clone());
                }
            }
            if !options.omit_tags {
                out.extend(
                    element
                        .tags
                        .iter()
                        .map(|tag| format!("@{} {}", tag.name, tag.value)),
                );
            }
            out.push(format!("({origin})"));
            out.join("\n")
        }
        Reply::Choices { prompt, rows } => {
            let mut out = vec![prompt.trim_end().to_string()];
            for (r, row) in rows.iter().enumerate() {
                let line = row
                    .iter()
                    .enumerate()
                    .map(|(c, choice)| format!("[{}.{}] {}", r + 1, c + 1, choice.label))
                    .collect::<Vec<_>>()
                    .join("  ");
                out.push(line);
            }
            out.join("\n")
        }
        Reply::Preview { prompt, names } => {
            let mut out = vec![prompt.trim_end().to_string()];
            out.extend(names.iter().map(|name| format!("* `{name}`")));
            out.join("\n")
        }
        Reply::Notice(text) => text.clone(),
    }
}
