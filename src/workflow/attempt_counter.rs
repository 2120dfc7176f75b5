//! 发布失败计数
//!
//! 只存在于进程内，每次运行从 0 开始

/// 一次运行中允许的发布失败次数上限
///
/// 连续多张照片都发不出去，通常是发布服务本身出了问题，
/// 达到上限后整次运行停止。
pub const MAX_FAILED_ATTEMPTS: u32 = 5;

/// 发布失败计数器（跨页共享）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttemptCounter {
    failed: u32,
}

impl AttemptCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次发布失败
    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// 已失败次数
    pub fn failed(&self) -> u32 {
        self.failed
    }

    /// 是否已达到上限
    pub fn is_exhausted(&self) -> bool {
        self.failed >= MAX_FAILED_ATTEMPTS
    }
}

impl std::fmt::Display for AttemptCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.failed, MAX_FAILED_ATTEMPTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_at_ceiling() {
        let mut counter = AttemptCounter::new();
        for _ in 0..MAX_FAILED_ATTEMPTS - 1 {
            counter.record_failure();
        }
        assert!(!counter.is_exhausted());

        counter.record_failure();
        assert!(counter.is_exhausted());
        assert_eq!(counter.to_string(), "5/5");
    }
}
