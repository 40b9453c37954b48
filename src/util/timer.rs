use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

// 一度だけ実行される遅延処理
// cancelまたはdropされた場合, 待機中のスレッドは即座に終了してコールバックは呼ばれない
#[derive(Debug)]
pub struct Timer {
    cancel_tx: Option<Sender<()>>,
}

impl Timer {
    pub fn schedule<F>(delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (tx, rx) = channel::<()>();
        thread::spawn(move || {
            // Ok(()): cancel, Disconnected: drop
            if let Err(RecvTimeoutError::Timeout) = rx.recv_timeout(delay) {
                callback();
            }
        });

        Self {
            cancel_tx: Some(tx),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            tx.send(()).ok();
        }
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.cancel_tx.is_some()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[test]
fn test_timer_fires() {
    let (tx, rx) = channel();
    let _timer = Timer::schedule(Duration::from_millis(10), move || {
        tx.send(1).ok();
    });
    assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(1));
}

#[test]
fn test_timer_cancel() {
    let (tx, rx) = channel::<i32>();
    let mut timer = Timer::schedule(Duration::from_millis(50), move || {
        tx.send(1).ok();
    });
    timer.cancel();
    assert!(!timer.is_armed());
    // コールバックごとSenderが破棄されるのでDisconnectedになる
    assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
}
