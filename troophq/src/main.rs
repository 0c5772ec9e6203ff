mod api;
mod app_state;
mod http;
mod init_telemetry;
mod services;
mod settings;
mod stop_flag;

use http::setup_http_server;
use tokio::time::sleep;
use tracing::info;

use clap::Parser;

#[derive(Parser)]
#[command(name = "troophq")]
#[command(about = "Authentication and privilege service for troop management")]
#[clap(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser)]
enum Commands {
    /// Show current configuration and exit
    Config,
    /// Start the troophq server (default)
    Run,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.as_ref().unwrap_or(&Commands::Run) {
        Commands::Config => {
            let settings = settings::config::Settings::new()?;
            println!("{:#?}", &settings);
            return Ok(());
        }
        Commands::Run => {
            // Continue with the normal server startup
        }
    }

    let mut handles = vec![];

    let app_state = app_state::AppState::new().await?;
    init_telemetry::init_telemetry_and_tracing(app_state.settings.debug)?;

    // Setup http server.
    {
        let handle =
            setup_http_server(app_state.clone(), &app_state.settings.api.bind_address).await?;

        handles.push(handle);
    }

    // Periodic maintenance: drop expired sessions and stale lockout records
    {
        let state = app_state.clone();
        let handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval(std::time::Duration::from_secs(60));
            loop {
                tokio::select! {
                    _ = state.stop_flag.wait() => break,
                    _ = timer.tick() => {
                        state.sessions.cleanup_expired();
                        state.login_guard.purge_expired();
                    }
                }
            }
            anyhow::Ok(())
        });
        handles.push(handle);
    }

    sleep(std::time::Duration::from_millis(100)).await;

    loop {
        // Remove and await completed handles
        handles.retain(|handle| !handle.is_finished());

        // Break the loop if no more handles are running
        if handles.is_empty() {
            info!("All tasks are done");
            break;
        }

        // Sleep for a short duration to avoid busy-waiting
        tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;
    }

    Ok(())
}
