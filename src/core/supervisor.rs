//! 会话监管：生命周期与计时任务
//!
//! 持有 CancellationToken 与 TaskTracker。切换阶段、延迟再生成与指标采样都在这里派生；
//! 会话拆除时统一取消并等待退出，保证拆除后没有悬挂的计时写入。

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use super::error::QuantumError;

#[derive(Debug, Clone)]
pub struct SessionSupervisor {
    cancel_token: CancellationToken,
    tracker: TaskTracker,
}

impl SessionSupervisor {
    pub fn new() -> Self {
        Self {
            cancel_token: CancellationToken::new(),
            tracker: TaskTracker::new(),
        }
    }

    pub fn is_shutdown(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// 派生受监管任务；拆除时在下一个挂起点被丢弃。拆除后派生返回 SessionClosed
    pub fn spawn<F>(&self, fut: F) -> Result<(), QuantumError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_shutdown() {
            return Err(QuantumError::SessionClosed);
        }
        let token = self.cancel_token.clone();
        self.tracker.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = fut => {}
            }
        });
        Ok(())
    }

    /// 延迟 delay 后执行 fut；延迟期间拆除则不执行
    pub fn spawn_after<F>(&self, delay: Duration, fut: F) -> Result<(), QuantumError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.spawn(async move {
            tokio::time::sleep(delay).await;
            fut.await;
        })
    }

    /// 取消全部任务并等待退出
    pub async fn shutdown(&self) {
        self.cancel_token.cancel();
        self.tracker.close();
        self.tracker.wait().await;
    }

    pub fn active_tasks(&self) -> usize {
        self.tracker.len()
    }
}

impl Default for SessionSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_spawn_after_runs_when_not_cancelled() {
        let sup = SessionSupervisor::new();
        let hit = Arc::new(AtomicBool::new(false));
        let h = hit.clone();
        sup.spawn_after(Duration::from_millis(100), async move {
            h.store(true, Ordering::SeqCst);
        })
        .unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(hit.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_drops_pending_timer() {
        let sup = SessionSupervisor::new();
        let hit = Arc::new(AtomicBool::new(false));
        let h = hit.clone();
        sup.spawn_after(Duration::from_secs(5), async move {
            h.store(true, Ordering::SeqCst);
        })
        .unwrap();
        sup.shutdown().await;
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(!hit.load(Ordering::SeqCst));
        assert_eq!(sup.active_tasks(), 0);
    }

    #[tokio::test]
    async fn test_spawn_after_shutdown_is_rejected() {
        let sup = SessionSupervisor::new();
        sup.shutdown().await;
        assert!(matches!(sup.spawn(async {}), Err(QuantumError::SessionClosed)));
        assert!(matches!(
            sup.spawn_after(Duration::from_millis(1), async {}),
            Err(QuantumError::SessionClosed)
        ));
        assert_eq!(sup.active_tasks(), 0);
    }
}
