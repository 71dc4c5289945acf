mod connection;

use crate::error::Result;
use crate::services::CommandRouter;
use dashmap::DashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};

use connection::handle_connection;

/// TCP-сервер: по задаче на каждое принятое соединение.
///
/// Число соединений не ограничено, очереди допуска нет. Команды разных
/// соединений не сериализуются между собой и могут перехватывать друг у
/// друга фокус ввода.
pub struct ConnectionServer {
    listener: TcpListener,
    router: Arc<CommandRouter>,
    connections: Arc<DashMap<u64, SocketAddr>>,
    next_id: AtomicU64,
}

impl ConnectionServer {
    pub async fn bind(addr: SocketAddr, router: Arc<CommandRouter>) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            router,
            connections: Arc::new(DashMap::new()),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub async fn run(self) -> Result<()> {
        info!("Сервер слушает {}", self.local_addr()?);
        info!("Ожидание подключений...");

        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!("Ошибка accept: {}", e);
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    continue;
                }
            };

            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            self.connections.insert(id, peer);
            info!(
                "Клиент подключён: {} (активных соединений: {})",
                peer,
                self.connections.len()
            );

            let router = Arc::clone(&self.router);
            let connections = Arc::clone(&self.connections);
            tokio::spawn(async move {
                handle_connection(stream, peer, router).await;
                connections.remove(&id);
                info!(
                    "Клиент отключён: {} (активных соединений: {})",
                    peer,
                    connections.len()
                );
            });
        }
    }
}
