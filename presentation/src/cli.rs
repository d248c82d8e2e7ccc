use crate::content::{
    example, example_labels, ABOUT_TEXT, ABOUT_TITLE, EMPTY_QUESTION, LIMITED_KNOWLEDGE_TEXT,
    LIMITED_KNOWLEDGE_TITLE, REPL_HELP, RESET_CONFIRMATION, THINKING,
};
use crate::viewport::{scroll_threshold_rows, TranscriptView};
use application::chat_service::{ChatService, SendOutcome};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};
use domain::backend::ChatBackend;
use domain::failure_policy::Liveness;
use domain::scroll::REPOSITION_DELAY;
use domain::state::{update, ChatEvent, ChatState, Effect};
use infrastructure::config::Config;
use infrastructure::connectivity::SystemConnectivity;
use infrastructure::http_backend::HttpChatBackend;
use shared::confirmation::ask_confirmation;
use shared::types::Result;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::info;

/// Ask questions about Arabic grammar (Nahwu) answered from Kitab Mukhtashor Jiddan Syarah.
#[derive(Parser, Debug)]
#[command(name = "nahwu")]
#[command(about = "Chat client for the AI Nahwu grammar service", long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides NAHWU_API_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides NAHWU_REQUEST_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactive conversation (default)
    Chat,
    /// Send a single question and print the answer
    Ask {
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Check that the backend is reachable and configured
    Health,
    /// List example questions
    Examples,
    /// About the book the answers are drawn from
    About,
}

/// One line typed at the chat prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Send(String),
    Reset,
    Examples,
    Example(usize),
    Up,
    Down,
    Bottom,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_repl_input(input: &str) -> ReplCommand {
    let trimmed = input.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return ReplCommand::Send(input.to_string());
    };
    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("reset"), None) => ReplCommand::Reset,
        (Some("examples"), None) => ReplCommand::Examples,
        (Some("example"), Some(n)) => match n.parse() {
            Ok(number) => ReplCommand::Example(number),
            Err(_) => ReplCommand::Unknown(trimmed.to_string()),
        },
        (Some("up"), None) => ReplCommand::Up,
        (Some("down"), None) => ReplCommand::Down,
        (Some("bottom"), None) => ReplCommand::Bottom,
        (Some("help"), None) => ReplCommand::Help,
        (Some("quit"), None) | (Some("exit"), None) => ReplCommand::Quit,
        _ => ReplCommand::Unknown(trimmed.to_string()),
    }
}

type HttpChatService = ChatService<HttpChatBackend, SystemConnectivity>;

pub struct CliApp {
    config: Config,
}

impl CliApp {
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = Config::load()?
            .with_base_url(cli.base_url.as_deref())
            .with_timeout_secs(cli.timeout);
        info!(base_url = %config.api_base_url, timeout = ?config.request_timeout, "configuration loaded");
        Ok(Self { config })
    }

    fn service(&self) -> Result<HttpChatService> {
        let backend = HttpChatBackend::new(&self.config)?;
        let connectivity = SystemConnectivity::new(self.config.assume_online);
        Ok(ChatService::new(backend, connectivity))
    }

    pub async fn run(&mut self, cli: Cli) -> Result<ExitCode> {
        match cli.command.unwrap_or(Commands::Chat) {
            Commands::Chat => self.handle_chat().await,
            Commands::Ask { text } => self.handle_ask(&text.join(" ")).await,
            Commands::Health => self.handle_health().await,
            Commands::Examples => {
                for label in example_labels() {
                    println!("{}", label);
                }
                Ok(ExitCode::SUCCESS)
            }
            Commands::About => {
                println!("{}\n", ABOUT_TITLE.bold());
                println!("{}\n", ABOUT_TEXT);
                println!("{}", LIMITED_KNOWLEDGE_TITLE.yellow().bold());
                println!("{}", LIMITED_KNOWLEDGE_TEXT.yellow());
                Ok(ExitCode::SUCCESS)
            }
        }
    }

    async fn handle_ask(&self, question: &str) -> Result<ExitCode> {
        let service = self.service()?;
        let mut state = ChatState::new();
        eprintln!("{}", THINKING.yellow());
        match service.send(&mut state, question).await {
            SendOutcome::Replied(message) => {
                println!("{}", message.text);
                Ok(ExitCode::SUCCESS)
            }
            SendOutcome::Failed(notice) => {
                println!("{}", notice.text.red());
                Ok(ExitCode::FAILURE)
            }
            SendOutcome::Ignored => {
                eprintln!("{}", EMPTY_QUESTION.red());
                Ok(ExitCode::FAILURE)
            }
        }
    }

    async fn handle_health(&self) -> Result<ExitCode> {
        let service = self.service()?;
        match service.check_health().await {
            Liveness::Ready => {
                println!("{} {}", "Siap:".green().bold(), service.backend().base_url());
                Ok(ExitCode::SUCCESS)
            }
            Liveness::CredentialsMissing => {
                println!(
                    "{} backend berjalan, tetapi GEMINI_API_KEY belum diatur.",
                    "Konfigurasi:".yellow().bold()
                );
                Ok(ExitCode::FAILURE)
            }
            Liveness::Unreachable(failure) => {
                println!("{} {}", "Tidak terjangkau:".red().bold(), failure);
                Ok(ExitCode::FAILURE)
            }
        }
    }

    async fn handle_chat(&self) -> Result<ExitCode> {
        let service = self.service()?;
        let mut state = ChatState::with_scroll_threshold(scroll_threshold_rows());
        let mut view = TranscriptView::from_terminal();
        let mut stdout = io::stdout();
        let mut prefill: Option<String> = None;
        let mut note: Option<String> = None;

        loop {
            settle_view(&mut state, &mut view).await;
            view.draw(&mut stdout, &state, note.take().as_deref())?;

            let input = read_turn(prefill.take())?;
            match parse_repl_input(&input) {
                ReplCommand::Send(text) => {
                    let Some(request) = service.submit(&mut state, &text) else {
                        continue;
                    };
                    settle_view(&mut state, &mut view).await;
                    view.draw(&mut stdout, &state, None)?;
                    let result = service.resolve(&request).await;
                    service.settle(&mut state, result);
                }
                ReplCommand::Reset => {
                    if state.transcript.len() > 1 && !ask_confirmation(RESET_CONFIRMATION, false)? {
                        continue;
                    }
                    service.reset(&mut state);
                }
                ReplCommand::Examples => note = Some(example_labels().join("\n")),
                ReplCommand::Example(number) => match example(number) {
                    Some(prompt) => prefill = Some(prompt.to_string()),
                    None => note = Some(format!("Contoh ke-{} tidak ada.", number)),
                },
                ReplCommand::Up => {
                    view.scroll_up();
                    update(&mut state, ChatEvent::Scrolled(view.metrics()));
                }
                ReplCommand::Down => {
                    view.scroll_down();
                    update(&mut state, ChatEvent::Scrolled(view.metrics()));
                }
                ReplCommand::Bottom => {
                    view.scroll_to(view.metrics().bottom_offset());
                    update(&mut state, ChatEvent::Scrolled(view.metrics()));
                }
                ReplCommand::Help => note = Some(REPL_HELP.to_string()),
                ReplCommand::Quit => break,
                ReplCommand::Unknown(command) => {
                    note = Some(format!("Perintah tidak dikenal: {} (lihat /help)", command))
                }
            }
        }

        stdout.flush()?;
        Ok(ExitCode::SUCCESS)
    }
}

/// Lays out the transcript and, when the state owes a reposition, waits for
/// the layout delay before snapping to the bottom.
async fn settle_view(state: &mut ChatState, view: &mut TranscriptView) {
    view.layout(&state.transcript);
    if !state.scroll.has_pending_reposition() {
        return;
    }
    tokio::time::sleep(REPOSITION_DELAY).await;
    if let Some(Effect::ScrollTo(offset)) = update(state, ChatEvent::RepositionElapsed(view.metrics())) {
        view.scroll_to(offset);
    }
}

fn read_turn(prefill: Option<String>) -> Result<String> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme)
        .with_prompt("Anda")
        .allow_empty(true);
    if let Some(text) = prefill {
        input = input.with_initial_text(text);
    }
    Ok(input.interact_text()?)
}
