use std::process;

use noticeboard::{
    application::{
        app::{App, DispatchOutcome, Event},
        error::AppError,
    },
    config::{self, Command, Settings},
    domain::session::Credentials,
    infra::{http::HttpGateway, storage::FileStore, telemetry},
    input,
    presentation::views,
};
use tracing::{Dispatch, Level, dispatcher, error};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(DispatchOutcome::Completed) => {}
        Ok(DispatchOutcome::Failed) => process::exit(1),
        Err(error) => {
            report_application_error(&error);
            process::exit(1);
        }
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<DispatchOutcome, AppError> {
    let (cli_args, settings) = config::load_with_cli()?;
    telemetry::init(&settings.logging)?;

    let command = cli_args.command.unwrap_or(Command::Show);
    // Input is read up front so a missing password fails before any request.
    let event = event_for(command, &settings)?;

    let gateway = HttpGateway::new(
        settings.api.base_url.clone(),
        settings.api.request_timeout,
    )?;
    let store = FileStore::new(settings.storage.state_file.clone());
    let mut app = App::bootstrap(gateway, store, settings.display.timezone).await?;

    let outcome = match event {
        Some(event) => app.dispatch(event).await?,
        None => DispatchOutcome::Completed,
    };

    let rendered = views::render_page(app.page(), cli_args.output)?;
    println!("{}", rendered.trim_end());
    Ok(outcome)
}

fn event_for(command: Command, settings: &Settings) -> Result<Option<Event>, AppError> {
    let event = match command {
        Command::Show => return Ok(None),
        Command::Login(args) => {
            let password = input::read_secret(args.password_env, args.password_file, "password")?;
            Event::SubmitLogin(Credentials {
                email: args.email,
                password,
            })
        }
        Command::Post(args) => Event::SubmitPost {
            title: args.title,
            content: input::read_value(args.content, args.content_file, "content")?,
            class_id: args
                .class_id
                .unwrap_or(settings.posts.default_class_id.get()),
        },
        Command::Delete(args) => Event::DeletePost {
            post_id: args.post_id,
        },
        Command::Logout => Event::Logout,
        Command::Theme => Event::ToggleTheme,
    };
    Ok(Some(event))
}
