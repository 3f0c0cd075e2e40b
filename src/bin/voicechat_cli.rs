//! voicechat-cli — AIVoiceChat 后端命令行工具
//!
//! Drives every client operation from the shell and prints the result as
//! pretty JSON on stdout. Logs go to stderr (`RUST_LOG`, default `warn`).

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use voicechat_client::config::CONFIG_PATH_ENV;
use voicechat_client::{
    Character, ClientConfig, FileUpload, HistoryType, VoiceChatClient, VoiceChatClientBuilder,
};

#[derive(Parser)]
#[command(name = "voicechat-cli")]
#[command(version)]
#[command(about = "Command-line client for the AIVoiceChat backend")]
#[command(long_about = "Command-line client for the AIVoiceChat backend.\n\n\
Environment Variables:\n\
  VOICECHAT_CONFIG             YAML config file (same as --config)\n\
  VOICECHAT_API_BASE_URL       Backend base URL (default http://localhost:8080)\n\
  VOICECHAT_HTTP_TIMEOUT_SECS  Request timeout in seconds (default 60)\n\
  VOICECHAT_PROXY_URL          Proxy for all requests\n\
  VOICECHAT_STRICT_ENVELOPE    Fail on non-success result codes (1/true)\n\
  RUST_LOG                     Log filter, e.g. voicechat_client=debug")]
struct Cli {
    /// Backend base URL (overrides config and environment)
    #[arg(short = 'u', long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// YAML config file
    #[arg(short, long, global = true, value_name = "PATH", env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Fail when the result envelope carries a non-success code
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a chat session for a character and print its chat id
    NewSession {
        character_id: i64,
    },
    /// List chat sessions
    Sessions {
        /// Only sessions with this chat name
        #[arg(long)]
        name: Option<String>,
    },
    /// Send a text prompt
    Chat {
        chat_id: String,
        prompt: String,
        /// Attach a file (repeatable)
        #[arg(short, long = "file", value_name = "PATH")]
        files: Vec<PathBuf>,
    },
    /// Send an audio file as the prompt
    Voice {
        chat_id: String,
        audio: PathBuf,
        /// Extra `path` query parameter passed to the backend
        #[arg(long)]
        path: Option<String>,
        /// Do not resend the request when it fails
        #[arg(long)]
        no_fallback: bool,
    },
    /// Chat history
    #[command(subcommand)]
    History(HistoryCommand),
    /// Character management
    #[command(subcommand)]
    Character(CharacterCommand),
    /// Upload a file to object storage and print its URL
    Upload {
        file: PathBuf,
    },
    /// Delete an uploaded file by URL
    DeleteFile {
        url: String,
    },
    /// TTS model and voice catalogue
    #[command(subcommand)]
    Tts(TtsCommand),
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// List chat ids
    List {
        #[arg(short = 't', long = "type", default_value = "chat")]
        kind: String,
    },
    /// Show one conversation
    Show {
        chat_id: String,
        #[arg(short = 't', long = "type", default_value = "chat")]
        kind: String,
    },
    /// Show the voice exchanges of a conversation
    Voice {
        chat_id: String,
    },
}

#[derive(Subcommand)]
enum CharacterCommand {
    /// List characters page by page
    List {
        #[arg(long, default_value_t = voicechat_client::client::DEFAULT_PAGE)]
        page: u32,
        #[arg(long, default_value_t = voicechat_client::client::DEFAULT_PAGE_SIZE)]
        size: u32,
    },
    /// Create a character
    Create(CharacterFields),
    /// Update a character (requires --id)
    Update(CharacterFields),
    /// Delete a character
    Delete {
        id: i64,
    },
}

#[derive(Args)]
struct CharacterFields {
    #[arg(long)]
    id: Option<i64>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Portrait URL
    #[arg(long)]
    image: Option<String>,
    /// Portrait file, uploaded first; its URL replaces --image
    #[arg(long, value_name = "PATH", conflicts_with = "image")]
    image_file: Option<PathBuf>,
    /// System prompt
    #[arg(long)]
    prompt: Option<String>,
    #[arg(long)]
    voice_model: Option<String>,
    #[arg(long)]
    voice: Option<String>,
}

#[derive(Subcommand)]
enum TtsCommand {
    /// List TTS models
    Models,
    /// List the voices of a model
    Voices {
        model: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let client = build_client(&cli)?;
    run(&client, cli.command).await
}

fn build_client(cli: &Cli) -> anyhow::Result<VoiceChatClient> {
    let config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ClientConfig::default(),
    }
    .apply_env();
    Ok(configure(cli, config).build()?)
}

/// Command-line flags win over the file and environment settings.
fn configure(cli: &Cli, config: ClientConfig) -> VoiceChatClientBuilder {
    let mut builder = VoiceChatClientBuilder::from_config(config);
    if let Some(url) = &cli.base_url {
        builder = builder.base_url(url.clone());
    }
    if cli.strict {
        builder = builder.strict_envelope(true);
    }
    if let Command::Voice { no_fallback: true, .. } = &cli.command {
        builder = builder.voice_fallback(false);
    }
    builder
}

async fn run(client: &VoiceChatClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::NewSession { character_id } => {
            let chat_id = client.generate_chat_id(character_id).await?;
            if chat_id.is_empty() {
                anyhow::bail!("backend did not return a chat id for character {character_id}");
            }
            print_json(&chat_id)
        }
        Command::Sessions { name } => {
            print_json(&client.get_chat_session_list(name.as_deref()).await?)
        }
        Command::Chat {
            chat_id,
            prompt,
            files,
        } => {
            let mut uploads = Vec::with_capacity(files.len());
            for path in &files {
                uploads.push(read_file(path).await?);
            }
            print_json(&client.send_message(&prompt, &chat_id, &uploads).await?)
        }
        Command::Voice {
            chat_id,
            audio,
            path,
            ..
        } => {
            let audio = read_file(&audio).await?;
            print_json(
                &client
                    .send_voice_message(&chat_id, &audio, path.as_deref())
                    .await?,
            )
        }
        Command::History(cmd) => run_history(client, cmd).await,
        Command::Character(cmd) => run_character(client, cmd).await,
        Command::Upload { file } => {
            let upload = read_file(&file).await?;
            print_json(&client.upload_file(&upload).await?)
        }
        Command::DeleteFile { url } => print_json(&client.delete_file(&url).await?),
        Command::Tts(TtsCommand::Models) => print_json(&client.get_tts_models().await?),
        Command::Tts(TtsCommand::Voices { model }) => {
            print_json(&client.get_voices_by_model(&model).await?)
        }
    }
}

async fn run_history(client: &VoiceChatClient, cmd: HistoryCommand) -> anyhow::Result<()> {
    match cmd {
        HistoryCommand::List { kind } => {
            print_json(&client.get_chat_history_list(&HistoryType::from(kind.as_str())).await?)
        }
        HistoryCommand::Show { chat_id, kind } => print_json(
            &client
                .get_chat_history(&HistoryType::from(kind.as_str()), &chat_id)
                .await?,
        ),
        HistoryCommand::Voice { chat_id } => {
            print_json(&client.get_voice_chat_history(&chat_id).await?)
        }
    }
}

async fn run_character(client: &VoiceChatClient, cmd: CharacterCommand) -> anyhow::Result<()> {
    match cmd {
        CharacterCommand::List { page, size } => {
            print_json(&client.get_character_page(page, size).await?)
        }
        CharacterCommand::Create(fields) => {
            let character = fields.into_character(client).await?;
            print_json(&client.create_character(&character).await?)
        }
        CharacterCommand::Update(fields) => {
            let character = fields.into_character(client).await?;
            print_json(&client.update_character(&character).await?)
        }
        CharacterCommand::Delete { id } => print_json(&client.delete_character(id).await?),
    }
}

impl CharacterFields {
    async fn into_character(self, client: &VoiceChatClient) -> anyhow::Result<Character> {
        let image = match &self.image_file {
            Some(path) => Some(client.upload_file(&read_file(path).await?).await?),
            None => self.image,
        };
        Ok(Character {
            id: self.id,
            name: self.name,
            description: self.description,
            image,
            prompt: self.prompt,
            voice_model: self.voice_model,
            voice: self.voice,
        })
    }
}

async fn read_file(path: &Path) -> anyhow::Result<FileUpload> {
    FileUpload::from_path(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
