use crate::services::CommandRouter;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{error, info, warn};

/// Предел длины одной строки запроса (без `\n`)
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Цикл одного соединения: строка запроса -> строка ответа, строго по очереди.
///
/// Строки читаются байтами: невалидный UTF-8 получает ответ `Invalid JSON`,
/// а соединение продолжает работу. Пустые строки пропускаются без ответа.
/// Строка длиннее `MAX_LINE_BYTES` закрывает соединение. Цикл завершается
/// при ошибке чтения (в том числе при отключении клиента) или записи. Начатая
/// команда всегда выполняется до конца, даже если клиент уже закрыл соединение.
pub async fn handle_connection(stream: TcpStream, peer: SocketAddr, router: Arc<CommandRouter>) {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();

    loop {
        line.clear();
        let limit = (MAX_LINE_BYTES + 1) as u64;
        match (&mut reader).take(limit).read_until(b'\n', &mut line).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("Ошибка чтения от клиента {}: {}", peer, e);
                break;
            }
        }

        if line.last() == Some(&b'\n') {
            line.pop();
        } else if line.len() > MAX_LINE_BYTES {
            warn!(
                "Клиент {} прислал строку длиннее {} байт, соединение закрывается",
                peer, MAX_LINE_BYTES
            );
            break;
        }

        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let response = router.route(&line).await;
        let json = response.to_json();
        let message = String::from_utf8_lossy(&line);
        if response.is_success() {
            info!("Получено от {}: {} -> {}", peer, message, json);
        } else {
            warn!("Получено от {}: {} -> {}", peer, message, json);
        }

        let mut payload = json.into_bytes();
        payload.push(b'\n');
        if let Err(e) = writer.write_all(&payload).await {
            error!("Ошибка записи клиенту {}: {}", peer, e);
            break;
        }
    }
}
