use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the noticeboard binary.
#[derive(Debug, Parser)]
#[command(
    name = "noticeboard",
    version,
    about = "School announcement board client",
    long_about = None
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "NOTICEBOARD_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    /// How the resulting page is printed.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Show the current page: your dashboard when signed in, the login form otherwise.
    Show,
    /// Sign in and open your dashboard.
    Login(LoginArgs),
    /// Publish a post to a class.
    Post(PostArgs),
    /// Delete a post by id and reload the admin list.
    Delete(DeleteArgs),
    /// Sign out and forget the stored session.
    Logout,
    /// Switch between light and dark mode.
    Theme,
}

#[derive(Debug, Args, Clone)]
pub struct LoginArgs {
    /// Account e-mail address.
    #[arg(long, value_name = "EMAIL")]
    pub email: String,

    /// Path to a file holding the password (takes precedence over env).
    #[arg(
        long = "password-file",
        env = "NOTICEBOARD_PASSWORD_FILE",
        value_name = "PATH",
        value_hint = ValueHint::FilePath
    )]
    pub password_file: Option<PathBuf>,

    /// Password taken from `NOTICEBOARD_PASSWORD`; there is no plain flag.
    #[arg(hide = true, env = "NOTICEBOARD_PASSWORD", hide_env_values = true)]
    pub password_env: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct PostArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub content: Option<String>,

    /// Read the post content from a file instead of --content.
    #[arg(long = "content-file", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub content_file: Option<PathBuf>,

    /// Target class; defaults to `posts.default_class_id`.
    #[arg(long = "class-id", value_name = "ID")]
    pub class_id: Option<u64>,
}

#[derive(Debug, Args, Clone)]
pub struct DeleteArgs {
    #[arg(value_name = "POST_ID")]
    pub post_id: i64,
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Override the backend base URL.
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Override the request timeout; unset means requests may wait indefinitely.
    #[arg(long = "request-timeout-seconds", value_name = "SECONDS", global = true)]
    pub request_timeout_seconds: Option<u64>,

    /// Override where the session and preferences are stored.
    #[arg(long = "state-file", value_name = "PATH", value_hint = ValueHint::FilePath, global = true)]
    pub state_file: Option<PathBuf>,

    /// Override the time zone used for post timestamps (IANA name).
    #[arg(long = "timezone", value_name = "TZ", global = true)]
    pub timezone: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}
