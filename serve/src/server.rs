use std::{io, sync::mpsc::Sender};

use log::{info, warn};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{TcpListener, TcpStream},
    sync::oneshot,
};

use crate::bot::Request;

/// Accept clients until the listener fails.
pub async fn serve(listener: TcpListener, tx: Sender<Request>) -> io::Result<()> {
    loop {
        let (stream, address) = listener.accept().await?;
        info!("{address} connected");
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Err(err) = handle_client(stream, tx).await {
                warn!("{address}: {err}");
            }
            info!("{address} disconnected");
        });
    }
}

/// One answer line for every request line.
async fn handle_client(stream: TcpStream, tx: Sender<Request>) -> io::Result<()> {
    let (read, mut write) = stream.into_split();
    let mut lines = BufReader::new(read).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let (reply_tx, reply_rx) = oneshot::channel();
        let reply = if tx.send(Request { line, reply: reply_tx }).is_err() {
            "error: bot is not running".to_string()
        } else {
            reply_rx
                .await
                .unwrap_or_else(|_| "error: bot is not running".to_string())
        };
        write.write_all(reply.as_bytes()).await?;
        write.write_all(b"\n").await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{sync::mpsc::channel, thread::spawn};

    use alpha_gomoku::{config::SearchConfig, model::uniform::UniformNet, rules::TicTacToe};

    use super::*;
    use crate::bot::run_bot;

    #[tokio::test]
    async fn answers_every_line() {
        let (tx, rx) = channel();
        let search = SearchConfig {
            simulations: 50,
            c_puct: 1.0,
            noise: None,
        };
        spawn(move || run_bot::<TicTacToe, UniformNet>(TicTacToe::default(), None, search, rx));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, tx));

        let stream = TcpStream::connect(address).await.unwrap();
        let (read, mut write) = stream.into_split();
        let mut lines = BufReader::new(read).lines();

        write.write_all(b"xx-/oo-/--- x\n").await.unwrap();
        assert_eq!(lines.next_line().await.unwrap().unwrap(), "2");

        write.write_all(b"xxx/oo-/--- o\n\nnonsense x\n").await.unwrap();
        assert!(lines.next_line().await.unwrap().unwrap().starts_with("error: "));
        assert!(lines.next_line().await.unwrap().unwrap().starts_with("error: "));
    }
}
