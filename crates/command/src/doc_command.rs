use crate::collaborators::{ElementLoader, NameShortener, QueryApi};
use crate::config::CommandConfig;
use crate::error::{CommandError, Result};
use crate::payload::FollowUpPayload;
use crate::protocol::{choice_rows, plan, preview, Disambiguation};
use crate::shortener::SuffixShortener;
use crate::source::{CommandSource, Invocation};
use crate::types::{DisplayMode, LoadedElement, QueryMatch, Reply, ReplyOptions};
use docbot_parsers::{
    literal, remaining, whitespace, ArgumentReader, Literal, Or, ParseError, ParseResult, Parser,
    TextCursor,
};
use docbot_session::{fresh_session_key, SessionEntry, SessionHandle, SessionRegistry};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Where a doc command ended up
#[derive(Debug)]
pub enum Outcome {
    /// Answered with the documentation of one element
    Resolved { qualified_name: String },
    /// Nothing matched the query
    Unresolved,
    /// Choices were offered and stored in this session
    AmbiguousSmall { session: SessionHandle },
    /// Too many matches; `shown` of `total` names were listed
    AmbiguousLarge { shown: usize, total: usize },
    /// A soft failure the user was told about
    Failed(CommandError),
}

struct Answer {
    reply: Reply,
    /// Follow-up answers replace the message that offered the choices
    edit: bool,
    outcome: Outcome,
}

/// The `doc` / `javadoc` command.
///
/// Shared between concurrently handled invocations; the session registry is
/// its only mutable state.
pub struct DocCommand {
    query_api: Arc<dyn QueryApi>,
    loader: Arc<dyn ElementLoader>,
    shortener: Arc<dyn NameShortener>,
    sessions: SessionRegistry,
    config: CommandConfig,
}

impl DocCommand {
    pub fn new(
        query_api: Arc<dyn QueryApi>,
        loader: Arc<dyn ElementLoader>,
        config: CommandConfig,
    ) -> Self {
        Self {
            query_api,
            loader,
            shortener: Arc::new(SuffixShortener),
            sessions: SessionRegistry::new(config.registry_capacity),
            config,
        }
    }

    pub fn with_shortener(mut self, shortener: Arc<dyn NameShortener>) -> Self {
        self.shortener = shortener;
        self
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Names the command answers to
    pub fn keyword() -> Or<Literal, Literal> {
        literal("doc").or(literal("javadoc"))
    }

    /// Whether a chat message is addressed to this command
    pub fn matches(&self, text: &str) -> bool {
        let mut reader = ArgumentReader::new(text.trim());
        self.shift_head(&mut reader).is_ok()
    }

    /// Runs one invocation and sends its answer to `source`.
    ///
    /// Bad input, expired choices and index trouble are answered with a
    /// notice and reported as [`Outcome::Failed`]; only a failure to send is
    /// an `Err`.
    pub async fn handle(
        &self,
        invocation: &Invocation,
        source: &dyn CommandSource,
    ) -> anyhow::Result<Outcome> {
        let answer = match self.execute(invocation, source.id()).await {
            Ok(answer) => answer,
            Err(err) => {
                match &err {
                    CommandError::AmbiguousLoad { .. } | CommandError::Index(_) => {
                        log::warn!("doc command for {} failed: {err}", source.id())
                    }
                    _ => log::info!("doc command for {} rejected: {err}", source.id()),
                }
                // Failures found while answering a lookup go out as a new
                // message; misses and bad input replace the original one.
                let edit = !matches!(
                    err,
                    CommandError::AmbiguousLoad { .. } | CommandError::PayloadTooLong { .. }
                );
                Answer {
                    reply: Reply::notice(err.user_message()),
                    edit,
                    outcome: Outcome::Failed(err),
                }
            }
        };

        if answer.edit {
            source.edit_or_reply(answer.reply).await?;
        } else {
            source.reply(answer.reply).await?;
        }
        Ok(answer.outcome)
    }

    async fn execute(&self, invocation: &Invocation, source_id: &str) -> Result<Answer> {
        match invocation {
            Invocation::Typed { text } => {
                let (query, options) = self.parse_typed(text)?;
                self.handle_query(source_id, &query, options).await
            }
            Invocation::Structured {
                query,
                long,
                omit_tags,
            } => {
                let query = remaining(self.config.min_query_chars).parse_str(query.trim())?;
                let display = if *long {
                    DisplayMode::Long
                } else {
                    DisplayMode::Short
                };
                let options = ReplyOptions::new(display, *omit_tags);
                self.handle_query(source_id, &query, options).await
            }
            Invocation::FollowUp { payload } => {
                let payload = FollowUpPayload::parse(payload)?;
                let qualified_name = self
                    .sessions
                    .resolve(&payload.session, payload.index)
                    .await?;
                log::info!(
                    "Choice {} of session {} resolved to {qualified_name}",
                    payload.index,
                    payload.session
                );
                let options = ReplyOptions::new(payload.display, false);
                self.handle_query(source_id, &qualified_name, options).await
            }
        }
    }

    /// `<prefix><keyword> [long] <query>`
    fn parse_typed(&self, text: &str) -> Result<(String, ReplyOptions)> {
        let mut reader = ArgumentReader::new(text.trim());
        self.shift_head(&mut reader)?;
        let display = reader.try_shift(&long_flag).unwrap_or_default();
        let query = reader.shift(&remaining(self.config.min_query_chars))?;
        Ok((query, ReplyOptions::new(display, false)))
    }

    fn shift_head(&self, reader: &mut ArgumentReader<'_>) -> ParseResult<String> {
        reader.shift(&literal(self.config.command_prefix.as_str()))?;
        reader.shift(&command_word)
    }

    async fn handle_query(
        &self,
        source_id: &str,
        query: &str,
        options: ReplyOptions,
    ) -> Result<Answer> {
        let query = query.trim();
        let matches = self
            .query_api
            .query(self.loader.as_ref(), query)
            .await
            .map_err(CommandError::Index)?;
        log::debug!("Query '{query}' matched {} names", matches.len());

        match plan(matches, self.config.choice_limit()) {
            Disambiguation::Resolved(found) => self.answer_for_match(found, options).await,
            Disambiguation::Unresolved => Ok(Answer {
                reply: Reply::notice(format!("I couldn't find any result for '{query}'")),
                edit: true,
                outcome: Outcome::Unresolved,
            }),
            Disambiguation::AmbiguousSmall(matches) => {
                self.offer_choices(source_id, matches, options.display).await
            }
            Disambiguation::AmbiguousLarge(matches) => {
                let names = preview(&matches, self.config.preview_limit);
                let shown = names.len();
                Ok(Answer {
                    reply: Reply::Preview {
                        prompt: "I found at least the following types:".to_string(),
                        names,
                    },
                    edit: false,
                    outcome: Outcome::AmbiguousLarge {
                        shown,
                        total: matches.len(),
                    },
                })
            }
        }
    }

    async fn answer_for_match(&self, found: QueryMatch, options: ReplyOptions) -> Result<Answer> {
        let qualified_name = found.qualified_name;
        let mut loaded = self
            .loader
            .find_by_qualified_name(&qualified_name)
            .await
            .map_err(CommandError::Index)?;

        if loaded.len() != 1 {
            return Err(CommandError::AmbiguousLoad {
                name: qualified_name,
                count: loaded.len(),
            });
        }

        let LoadedElement { element, origin } = loaded.remove(0);
        Ok(Answer {
            reply: Reply::Element {
                element,
                origin,
                options,
            },
            edit: true,
            outcome: Outcome::Resolved { qualified_name },
        })
    }

    async fn offer_choices(
        &self,
        source_id: &str,
        matches: Vec<QueryMatch>,
        display: DisplayMode,
    ) -> Result<Answer> {
        let entry = SessionEntry::new(matches.into_iter().map(|m| m.qualified_name));
        let key = self.session_key(source_id, display, entry.len().saturating_sub(1));
        let names: BTreeSet<String> = entry.candidates().iter().cloned().collect();
        let labels = self.shortener.shorten(&names);
        let rows = choice_rows(&entry, &labels, &key, display, &self.config)?;

        let session = self.sessions.create_session(Some(key), entry).await;
        if let Some(evicted) = &session.evicted {
            log::debug!("Session {evicted} dropped for {}", session.key);
        }

        Ok(Answer {
            reply: Reply::Choices {
                prompt: "I found multiple types:".to_string(),
                rows,
            },
            edit: false,
            outcome: Outcome::AmbiguousSmall { session },
        })
    }

    /// The source id when it fits in a payload as a single word, otherwise a
    /// fresh random key
    fn session_key(&self, source_id: &str, display: DisplayMode, max_index: usize) -> String {
        if source_id.is_empty() || source_id.contains(char::is_whitespace) {
            return fresh_session_key();
        }
        let longest = FollowUpPayload::new(display, max_index, source_id).encode();
        if longest.chars().count() > self.config.payload_max_chars {
            log::debug!("Source id of {} chars is too long for a session key", source_id.len());
            return fresh_session_key();
        }
        source_id.to_string()
    }
}

/// The keyword, followed by whitespace or the end of input
fn command_word(cursor: &mut TextCursor<'_>) -> ParseResult<String> {
    let keyword = DocCommand::keyword().parse(cursor)?;
    if cursor.peek_char().is_some_and(|ch| !ch.is_whitespace()) {
        return Err(ParseError::new(
            format!("Expected whitespace after <{keyword}>"),
            cursor.position(),
        ));
    }
    Ok(keyword)
}

/// `long` as a standalone flag in front of the query
fn long_flag(cursor: &mut TextCursor<'_>) -> ParseResult<DisplayMode> {
    literal("long").parse(cursor)?;
    whitespace().parse(cursor)?;
    Ok(DisplayMode::Long)
}
