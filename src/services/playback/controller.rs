//! 回放控制器
//!
//! 在 [`Playback`] 状态机外面加上自动播放：一个按固定周期 tick 的 tokio 任务。
//! 任务在到达最后一步时自行结束；手动导航、停止、重置以及控制器被丢弃时
//! 都会立即取消它。每次位置变化都会通过 `watch` 通道广播出去。

use log::{debug, info};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::config::PlaybackConfig;
use crate::core::{Trace, VizError, VizResult};
use crate::services::playback::state::{Playback, PlaybackPhase, PlaybackPosition};

/// 自动播放周期的下限，更短的周期会被抬到这个值
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

struct Shared<S> {
    state: Mutex<Playback<S>>,
    updates: watch::Sender<PlaybackPosition>,
}

impl<S> Shared<S> {
    /// 在锁内修改状态，释放锁后广播新位置
    fn update<R>(&self, f: impl FnOnce(&mut Playback<S>) -> R) -> R {
        let (result, position) = {
            let mut state = self.state.lock();
            let result = f(&mut *state);
            (result, state.position())
        };
        self.updates.send_if_modified(|current| {
            if *current == position {
                return false;
            }
            *current = position;
            true
        });
        result
    }
}

pub struct PlaybackController<S> {
    shared: Arc<Shared<S>>,
    ticker: Mutex<Option<JoinHandle<()>>>,
    tick_interval: Duration,
}

impl<S> PlaybackController<S>
where
    S: Send + Sync + 'static,
{
    pub fn new(tick_interval: Duration) -> Self {
        let (updates, _) = watch::channel(PlaybackPosition::default());
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(Playback::new()),
                updates,
            }),
            ticker: Mutex::new(None),
            tick_interval: tick_interval.max(MIN_TICK_INTERVAL),
        }
    }

    pub fn from_config(config: &PlaybackConfig) -> Self {
        Self::new(config.tick_interval())
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// 接收位置变化
    pub fn subscribe(&self) -> watch::Receiver<PlaybackPosition> {
        self.shared.updates.subscribe()
    }

    /// 加载新轨迹，取消正在进行的自动播放
    pub fn load(&self, trace: Trace<S>) {
        self.cancel_ticker();
        let len = trace.len();
        self.shared.update(|state| state.load(trace));
        info!("Loaded trace with {} steps", len);
    }

    pub fn next(&self) -> bool {
        self.cancel_ticker();
        self.shared.update(Playback::next)
    }

    pub fn previous(&self) -> bool {
        self.cancel_ticker();
        self.shared.update(Playback::previous)
    }

    /// 跳到 0 起始的位置，越界时不动
    pub fn seek(&self, position: usize) -> bool {
        self.cancel_ticker();
        self.shared.update(|state| state.seek(position))
    }

    /// 开始自动播放
    ///
    /// 必须在 tokio 运行时内调用。没有轨迹或已在最后一步时返回 `Ok(false)`；
    /// 已经在播放时返回 `Ok(true)` 且不重复启动任务。
    pub fn start_auto_play(&self) -> VizResult<bool> {
        let runtime = Handle::try_current()
            .map_err(|e| VizError::Runtime(format!("Auto-play needs a tokio runtime: {}", e)))?;

        let mut ticker = self.ticker.lock();
        if self.phase() == PlaybackPhase::Playing
            && ticker.as_ref().is_some_and(|task| !task.is_finished())
        {
            return Ok(true);
        }
        if let Some(stale) = ticker.take() {
            stale.abort();
        }
        if !self.shared.update(Playback::play) {
            return Ok(false);
        }

        let shared = Arc::clone(&self.shared);
        let period = self.tick_interval;
        debug!("Starting auto-play every {:?}", period);
        *ticker = Some(runtime.spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                let phase = shared.update(|state| {
                    state.tick();
                    state.phase()
                });
                if phase != PlaybackPhase::Playing {
                    debug!("Auto-play finished in phase {:?}", phase);
                    break;
                }
            }
        }));
        Ok(true)
    }

    /// 停止自动播放，停在当前步骤
    pub fn stop_auto_play(&self) -> bool {
        self.cancel_ticker();
        self.shared.update(Playback::pause)
    }

    /// 取消自动播放并丢弃轨迹
    pub fn reset(&self) {
        self.cancel_ticker();
        self.shared.update(Playback::reset);
        info!("Playback reset");
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.shared.state.lock().phase()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.shared.state.lock().current_index()
    }

    pub fn is_done(&self) -> bool {
        self.shared.state.lock().is_done()
    }

    pub fn is_auto_playing(&self) -> bool {
        self.phase() == PlaybackPhase::Playing
    }

    pub fn position(&self) -> PlaybackPosition {
        self.shared.state.lock().position()
    }

    pub fn len(&self) -> usize {
        self.shared.state.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.state.lock().is_empty()
    }

    /// 当前步骤的拷贝
    pub fn current_step(&self) -> Option<S>
    where
        S: Clone,
    {
        self.shared.state.lock().current_step().cloned()
    }

    /// 在锁内读取当前步骤，避免拷贝
    pub fn with_current_step<R>(&self, f: impl FnOnce(Option<&S>) -> R) -> R {
        f(self.shared.state.lock().current_step())
    }

    fn cancel_ticker(&self) {
        if let Some(task) = self.ticker.lock().take() {
            task.abort();
        }
    }
}

impl<S> Drop for PlaybackController<S> {
    fn drop(&mut self) {
        if let Some(task) = self.ticker.get_mut().take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TraceStep;
    use crate::services::playback::state::tests::frames;

    const PERIOD: Duration = Duration::from_millis(100);

    #[test]
    fn test_auto_play_requires_runtime() {
        let controller = PlaybackController::new(PERIOD);
        controller.load(frames(3));
        assert!(matches!(
            controller.start_auto_play(),
            Err(VizError::Runtime(_))
        ));
        assert_eq!(controller.phase(), PlaybackPhase::Paused);
    }

    #[test]
    fn test_manual_navigation() {
        let controller = PlaybackController::new(PERIOD);
        assert!(!controller.next());

        controller.load(frames(4));
        for _ in 0..3 {
            assert!(controller.next());
        }
        assert!(controller.is_done());
        assert!(!controller.next());
        assert_eq!(controller.current_index(), Some(3));
        assert_eq!(
            controller.current_step().map(|s| s.description().to_string()),
            Some("frame 4".to_string())
        );

        controller.reset();
        assert!(controller.is_empty());
        assert_eq!(controller.phase(), PlaybackPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_play_advances_one_step_per_tick() {
        let controller = PlaybackController::new(PERIOD);
        controller.load(frames(5));
        assert!(controller.start_auto_play().expect("Runtime should exist in test"));

        time::sleep(PERIOD * 2 + Duration::from_millis(10)).await;
        assert_eq!(controller.current_index(), Some(2));
        assert_eq!(controller.phase(), PlaybackPhase::Playing);

        time::sleep(PERIOD * 5).await;
        assert_eq!(controller.current_index(), Some(4));
        assert!(controller.is_done());
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_navigation_cancels_auto_play() {
        let controller = PlaybackController::new(PERIOD);
        controller.load(frames(10));
        controller
            .start_auto_play()
            .expect("Runtime should exist in test");

        time::sleep(PERIOD + Duration::from_millis(10)).await;
        assert!(controller.previous());
        assert_eq!(controller.current_index(), Some(0));
        assert_eq!(controller.phase(), PlaybackPhase::Paused);

        time::sleep(PERIOD * 5).await;
        assert_eq!(controller.current_index(), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_and_reset_cancel_auto_play() {
        let controller = PlaybackController::new(PERIOD);
        controller.load(frames(10));
        controller
            .start_auto_play()
            .expect("Runtime should exist in test");
        time::sleep(PERIOD + Duration::from_millis(10)).await;

        assert!(controller.stop_auto_play());
        assert!(!controller.stop_auto_play());
        time::sleep(PERIOD * 3).await;
        assert_eq!(controller.current_index(), Some(1));

        controller
            .start_auto_play()
            .expect("Runtime should exist in test");
        controller.reset();
        time::sleep(PERIOD * 3).await;
        assert_eq!(controller.current_index(), None);
        assert_eq!(controller.phase(), PlaybackPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_every_position() {
        let controller = PlaybackController::new(PERIOD);
        let mut updates = controller.subscribe();
        controller.load(frames(3));
        assert_eq!(updates.borrow_and_update().index, Some(0));

        controller
            .start_auto_play()
            .expect("Runtime should exist in test");
        let mut seen = Vec::new();
        while seen.last() != Some(&PlaybackPhase::Done) {
            updates
                .changed()
                .await
                .expect("Controller should be alive in test");
            seen.push(updates.borrow_and_update().phase);
        }
        assert_eq!(controller.current_index(), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_is_clamped() {
        let controller = PlaybackController::new(Duration::ZERO);
        assert_eq!(controller.tick_interval(), MIN_TICK_INTERVAL);

        controller.load(frames(3));
        assert!(controller.start_auto_play().expect("Runtime should exist in test"));
        time::sleep(MIN_TICK_INTERVAL * 5).await;
        assert_eq!(controller.current_index(), Some(2));
        assert!(controller.is_done());
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_play_at_last_step_does_nothing() {
        let controller = PlaybackController::new(PERIOD);
        controller.load(frames(2));
        controller.seek(1);
        assert!(!controller
            .start_auto_play()
            .expect("Runtime should exist in test"));
        assert!(controller.is_done());
    }
}
