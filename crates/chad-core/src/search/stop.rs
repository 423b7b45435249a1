//! 探索の中断
//!
//! 探索スレッドはノードごと・指し手ループごとに `StopHandle` を確認する。
//! 時間切れは別スレッドのタイマーがフラグを立てることで伝える。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// 探索停止フラグ
///
/// [`StopHandle::child`] で作ったハンドルは親の停止も見るが、自分の停止は親に伝えない。
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
    parent: Option<Arc<AtomicBool>>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// 停止を要求する
    #[inline]
    pub fn request_stop(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// 親の停止を引き継ぐ新しいハンドル
    pub fn child(&self) -> StopHandle {
        StopHandle {
            flag: Arc::new(AtomicBool::new(false)),
            parent: Some(Arc::clone(&self.flag)),
        }
    }

    /// 停止が要求されているか
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Acquire)
            || self.parent.as_ref().is_some_and(|p| p.load(Ordering::Acquire))
    }

    /// フラグを下ろす（次の探索に再利用する場合）
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// 一定時間後に `StopHandle` を立てるタイマー
///
/// drop されると待機中のスレッドを起こして終了させる（フラグは立てない）。
#[derive(Debug)]
pub struct SearchTimer {
    cancel_tx: Option<mpsc::Sender<()>>,
    join_handle: Option<JoinHandle<()>>,
}

impl SearchTimer {
    /// タイマースレッドを起動する
    pub fn start(budget: Duration, stop: StopHandle) -> Self {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let join_handle = thread::spawn(move || match cancel_rx.recv_timeout(budget) {
            Err(RecvTimeoutError::Timeout) => {
                log::debug!("search timer expired after {} ms", budget.as_millis());
                stop.request_stop();
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                log::trace!("search timer was not needed");
            }
        });
        SearchTimer {
            cancel_tx: Some(cancel_tx),
            join_handle: Some(join_handle),
        }
    }
}

impl Drop for SearchTimer {
    fn drop(&mut self) {
        // Sender を落とすと recv_timeout が Disconnected で戻る
        self.cancel_tx.take();
        if let Some(handle) = self.join_handle.take() {
            if handle.join().is_err() {
                log::warn!("search timer thread panicked");
            }
        }
    }
}
