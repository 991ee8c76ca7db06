//! 回放状态机
//!
//! 持有一条轨迹和当前位置（0 起始）。状态转换：
//!
//! ```text
//! Idle --load--> Paused --play--> Playing --tick 到最后一步--> Done
//!                  ^                 |
//!                  +---手动导航/暂停---+
//! ```
//!
//! 没有轨迹（或轨迹为空）时所有导航操作都是空操作。这里不涉及计时，
//! 周期推进由 [`super::PlaybackController`] 调用 [`Playback::tick`] 完成。

use log::debug;
use serde::Serialize;

use crate::core::Trace;

/// 回放阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackPhase {
    /// 没有可回放的轨迹
    #[default]
    Idle,
    /// 自动播放中
    Playing,
    /// 已加载，停在某一步
    Paused,
    /// 停在最后一步
    Done,
}

/// 对外发布的位置快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PlaybackPosition {
    /// 当前步骤的位置，没有轨迹时为 `None`
    pub index: Option<usize>,
    pub len: usize,
    pub phase: PlaybackPhase,
}

#[derive(Debug)]
pub struct Playback<S> {
    trace: Option<Trace<S>>,
    position: usize,
    phase: PlaybackPhase,
}

impl<S> Default for Playback<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Playback<S> {
    pub fn new() -> Self {
        Self {
            trace: None,
            position: 0,
            phase: PlaybackPhase::Idle,
        }
    }

    /// 加载轨迹并回到第一步；空轨迹等同于没有轨迹
    pub fn load(&mut self, trace: Trace<S>) {
        self.trace = if trace.is_empty() { None } else { Some(trace) };
        self.position = 0;
        self.settle();
    }

    /// 前进一步，已在最后一步时不动
    pub fn next(&mut self) -> bool {
        let Some(len) = self.len_if_loaded() else {
            return false;
        };
        let moved = self.position + 1 < len;
        if moved {
            self.position += 1;
        }
        self.settle();
        moved
    }

    /// 后退一步，已在第一步时不动
    pub fn previous(&mut self) -> bool {
        if self.trace.is_none() {
            return false;
        }
        let moved = self.position > 0;
        if moved {
            self.position -= 1;
        }
        self.settle();
        moved
    }

    /// 跳到指定位置，越界时不动
    pub fn seek(&mut self, position: usize) -> bool {
        let Some(len) = self.len_if_loaded() else {
            return false;
        };
        if position >= len {
            return false;
        }
        self.position = position;
        self.settle();
        true
    }

    /// 进入自动播放；没有轨迹或已在最后一步时返回 `false`
    pub fn play(&mut self) -> bool {
        if self.phase != PlaybackPhase::Paused {
            return self.phase == PlaybackPhase::Playing;
        }
        self.transition(PlaybackPhase::Playing);
        true
    }

    /// 退出自动播放
    pub fn pause(&mut self) -> bool {
        if self.phase != PlaybackPhase::Playing {
            return false;
        }
        self.settle();
        true
    }

    /// 自动播放的一拍：前进一步，到达最后一步时进入 `Done`
    ///
    /// 不在 `Playing` 阶段时什么都不做并返回 `false`。
    pub fn tick(&mut self) -> bool {
        if self.phase != PlaybackPhase::Playing {
            return false;
        }
        let Some(len) = self.len_if_loaded() else {
            self.settle();
            return false;
        };
        if self.position + 1 < len {
            self.position += 1;
        }
        if self.position + 1 == len {
            self.transition(PlaybackPhase::Done);
        }
        true
    }

    /// 丢弃轨迹与位置，回到初始状态
    pub fn reset(&mut self) {
        self.trace = None;
        self.position = 0;
        self.transition(PlaybackPhase::Idle);
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn current_index(&self) -> Option<usize> {
        self.trace.as_ref().map(|_| self.position)
    }

    pub fn current_step(&self) -> Option<&S> {
        self.trace.as_ref().and_then(|trace| trace.get(self.position))
    }

    pub fn is_done(&self) -> bool {
        self.phase == PlaybackPhase::Done
    }

    pub fn len(&self) -> usize {
        self.trace.as_ref().map(Trace::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.trace.is_none()
    }

    pub fn trace(&self) -> Option<&Trace<S>> {
        self.trace.as_ref()
    }

    pub fn position(&self) -> PlaybackPosition {
        PlaybackPosition {
            index: self.current_index(),
            len: self.len(),
            phase: self.phase,
        }
    }

    fn len_if_loaded(&self) -> Option<usize> {
        self.trace.as_ref().map(Trace::len)
    }

    /// 根据位置确定非播放阶段
    fn settle(&mut self) {
        let phase = match self.len_if_loaded() {
            None => PlaybackPhase::Idle,
            Some(len) if self.position + 1 >= len => PlaybackPhase::Done,
            Some(_) => PlaybackPhase::Paused,
        };
        self.transition(phase);
    }

    fn transition(&mut self, phase: PlaybackPhase) {
        if self.phase != phase {
            debug!("Playback phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }
}
