use serde::Serialize;

/// 单个分组的处理结局，成功时 message 为状态消息，失败时为错误链
#[derive(Debug, Clone, Serialize)]
pub struct GroupOutcome {
    pub group: String,
    pub success: bool,
    pub message: String,
}

impl GroupOutcome {
    pub fn success(group: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(group: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            success: false,
            message: message.into(),
        }
    }
}

/// 一次批量运行的汇总统计
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub finished_at: String,
    pub outcomes: Vec<GroupOutcome>,
}

impl BatchSummary {
    /// 从全部分组结局汇总统计数字
    pub fn from_outcomes(outcomes: Vec<GroupOutcome>) -> Self {
        let total = outcomes.len();
        let success = outcomes.iter().filter(|o| o.success).count();
        Self {
            total,
            success,
            failed: total - success,
            finished_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            outcomes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_success_and_failure() {
        let outcomes = vec![
            GroupOutcome::success("1", "ok"),
            GroupOutcome::failure("2", "boom"),
            GroupOutcome::success("3", "ok"),
        ];
        let summary = BatchSummary::from_outcomes(outcomes);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.success, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.outcomes.len(), 3);
    }
}
