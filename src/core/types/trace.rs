//! 轨迹协议
//!
//! 一次算法运行产生的完整、有序、不可变的步骤序列。引擎在内部用
//! [`TraceRecorder`] 逐步记录，全部计算完成后才交出 [`Trace`]，
//! 因此调用方永远看不到构建了一半的轨迹。

use serde::Serialize;
use std::ops::Index;
use std::sync::Arc;

/// 所有步骤类型的公共视图
pub trait TraceStep {
    /// 从 1 开始、严格递增的步骤序号
    fn index(&self) -> usize;

    /// 这一步发生了什么
    fn description(&self) -> &str;
}

/// 不可变轨迹，克隆只增加引用计数
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct Trace<S> {
    steps: Arc<[S]>,
}

impl<S> Clone for Trace<S> {
    fn clone(&self) -> Self {
        Self {
            steps: Arc::clone(&self.steps),
        }
    }
}

impl<S> Trace<S> {
    /// 空轨迹，用于无法满足的输入
    pub fn empty() -> Self {
        Self {
            steps: Arc::from(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// 按 0 起始的位置读取
    pub fn get(&self, position: usize) -> Option<&S> {
        self.steps.get(position)
    }

    pub fn first(&self) -> Option<&S> {
        self.steps.first()
    }

    pub fn last(&self) -> Option<&S> {
        self.steps.last()
    }

    pub fn steps(&self) -> &[S] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.steps.iter()
    }
}

impl<S: TraceStep> Trace<S> {
    /// 所有步骤描述，按顺序
    pub fn descriptions(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.description()).collect()
    }
}

impl<S> Index<usize> for Trace<S> {
    type Output = S;

    fn index(&self, position: usize) -> &S {
        &self.steps[position]
    }
}

impl<'a, S> IntoIterator for &'a Trace<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// 引擎内部使用的轨迹记录器
///
/// 每次 `record` 都会拿到下一个序号，由调用方把当前状态的拷贝填进步骤里。
#[derive(Debug)]
pub struct TraceRecorder<S> {
    steps: Vec<S>,
}

impl<S> Default for TraceRecorder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> TraceRecorder<S> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn next_index(&self) -> usize {
        self.steps.len() + 1
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn record(&mut self, build: impl FnOnce(usize) -> S) {
        let index = self.next_index();
        self.steps.push(build(index));
    }

    pub fn finish(self) -> Trace<S> {
        Trace {
            steps: Arc::from(self.steps),
        }
    }
}
