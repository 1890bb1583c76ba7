use crate::utils::error::{AppError, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub fn fizzbuzz(n: i64) -> String {
    match (n % 3 == 0, n % 5 == 0) {
        (true, true) => "FizzBuzz".to_string(),
        (true, false) => "Fizz".to_string(),
        (false, true) => "Buzz".to_string(),
        (false, false) => n.to_string(),
    }
}

/// One background task answering FizzBuzz questions over a pair of channels.
///
/// Both channels hold a single message, so every [`ask`](Self::ask) is a
/// send-then-wait handshake with the worker.
pub struct FizzBuzzWorker {
    count: mpsc::Sender<i64>,
    message: mpsc::Receiver<String>,
    handle: JoinHandle<()>,
}

impl FizzBuzzWorker {
    pub fn spawn() -> Self {
        let (count_tx, mut count_rx) = mpsc::channel::<i64>(1);
        let (message_tx, message_rx) = mpsc::channel::<String>(1);

        let handle = tokio::spawn(async move {
            while let Some(n) = count_rx.recv().await {
                if message_tx.send(fizzbuzz(n)).await.is_err() {
                    tracing::debug!("FizzBuzz reader dropped, worker stopping");
                    break;
                }
            }
            tracing::debug!("FizzBuzz worker finished");
        });

        Self {
            count: count_tx,
            message: message_rx,
            handle,
        }
    }

    pub async fn ask(&mut self, n: i64) -> Result<String> {
        self.count
            .send(n)
            .await
            .map_err(|_| AppError::ChannelClosed)?;
        self.message.recv().await.ok_or(AppError::ChannelClosed)
    }

    pub async fn run_range(&mut self, from: i64, to: i64) -> Result<Vec<String>> {
        let mut answers = Vec::new();
        if from > to {
            return Ok(answers);
        }
        for n in from..=to {
            answers.push(self.ask(n).await?);
        }
        Ok(answers)
    }

    /// 關閉輸入 channel 並等待 worker 結束
    pub async fn shutdown(self) {
        let Self {
            count,
            message,
            handle,
        } = self;
        drop(count);
        if let Err(e) = handle.await {
            tracing::warn!("FizzBuzz worker ended abnormally: {}", e);
        }
        drop(message);
    }
}
