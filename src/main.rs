use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
mod config;
mod error;
mod events;
mod mappings;
mod protocol;
mod server;
mod services;
mod utils;

use config::{Config, LoggingConfig};
use server::ConnectionServer;
use services::{create_window_system, CommandRouter};

#[derive(Parser, Debug)]
#[command(name = "tcp-keyboard", version)]
#[command(about = "TCP-сервер: список окон, фокусировка окна по заголовку и нажатия клавиш")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "tcp-keyboard.toml")]
    config: String,

    /// Файл журнала (по умолчанию - stderr)
    #[arg(short = 'l', long)]
    log_file: Option<PathBuf>,

    /// Режим сухого запуска (эмуляция оконной системы)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования
    #[arg(long)]
    log_level: Option<String>,

    /// Адрес для прослушивания, например 0.0.0.0:9000
    #[arg(long)]
    bind: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Запустить сервер (по умолчанию)
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Args::command()
        .after_help(utils::protocol_reference())
        .get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    match args.command {
        None | Some(Commands::Serve) => run_server(args).await,
    }
}

async fn run_server(args: Args) -> Result<()> {
    let mut config = Config::load(&args.config)?;
    if let Some(path) = args.log_file {
        config.logging.file = Some(path);
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    config.validate()?;

    // Инициализация системы логирования
    init_tracing(&config.logging)?;

    info!("=== Запуск TCP Keyboard v{} ===", env!("CARGO_PKG_VERSION"));
    match &config.logging.file {
        Some(path) => info!("Файл журнала: {}", path.display()),
        None => info!("Журнал пишется в stderr"),
    }

    let window_system = create_window_system(&config, args.dry_run)?;
    if args.dry_run || config.is_dry_run() {
        warn!("Режим сухого запуска - реальные действия отключены");
    }
    info!("Оконная система: {}", window_system.name());

    let router = Arc::new(CommandRouter::new(window_system, &config));
    let server = ConnectionServer::bind(config.bind_addr()?, router)
        .await
        .with_context(|| format!("Не удалось занять адрес {}", config.server.bind))?;
    info!("(Запустите с параметром 'help' для справки по командам)");

    tokio::select! {
        result = server.run() => {
            if let Err(e) = result {
                error!("Сервер остановлен с ошибкой: {}", e);
                return Err(e.into());
            }
        }
        _ = shutdown_signal() => {
            info!("Завершение работы, сервер закрывается");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Получен сигнал завершения (Ctrl+C)"),
            Err(err) => {
                error!("Ошибка при ожидании сигнала завершения: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Получен сигнал завершения (SIGTERM)");
            }
            Err(err) => {
                error!("Не удалось подписаться на SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    use std::fs::OpenOptions;
    use std::sync::Mutex;
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&logging.level))?;
    let registry = tracing_subscriber::registry().with(filter);

    match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Не удалось открыть файл журнала {:?}", path))?;
            registry
                .with(fmt::layer().compact().with_writer(Mutex::new(file)))
                .init();
        }
        None => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
