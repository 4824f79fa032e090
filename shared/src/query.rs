//! 列表查询的代次追踪
//!
//! 每次 `(token, search)` 变化都开启一个新代次。旧代次的响应在到达时被丢弃，
//! 保证界面显示的总是最后一次查询的结果，而不是最后一个返回的响应。

/// 列表查询的键
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarQuery {
    pub token: String,
    pub search: String,
}

impl CarQuery {
    pub fn new(token: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            search: search.into(),
        }
    }
}

/// 一次已发出查询的凭据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    generation: u64,
    pub query: CarQuery,
}

#[derive(Debug, Clone, Default)]
pub struct QueryTracker {
    generation: u64,
}

impl QueryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开启新查询，之前发出的所有凭据随即失效
    pub fn begin(&mut self, query: CarQuery) -> QueryTicket {
        self.generation += 1;
        QueryTicket {
            generation: self.generation,
            query,
        }
    }

    /// 使当前查询失效但不开启新查询（例如登出时）
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn is_current(&self, ticket: &QueryTicket) -> bool {
        ticket.generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_is_current() {
        let mut tracker = QueryTracker::new();
        let t = tracker.begin(CarQuery::new("tok", "Honda"));
        assert!(tracker.is_current(&t));
        assert_eq!(t.query, CarQuery::new("tok", "Honda"));
    }

    #[test]
    fn test_out_of_order_response_is_superseded() {
        let mut tracker = QueryTracker::new();
        let slow = tracker.begin(CarQuery::new("tok", "H"));
        let fast = tracker.begin(CarQuery::new("tok", "Ho"));

        // "Ho" 先返回，随后 "H" 的旧响应到达
        assert!(tracker.is_current(&fast));
        assert!(!tracker.is_current(&slow));
    }

    #[test]
    fn test_same_query_twice_still_supersedes() {
        let mut tracker = QueryTracker::new();
        let first = tracker.begin(CarQuery::new("tok", ""));
        let second = tracker.begin(CarQuery::new("tok", ""));
        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&second));
    }

    #[test]
    fn test_invalidate_drops_inflight() {
        let mut tracker = QueryTracker::new();
        let t = tracker.begin(CarQuery::new("tok", "x"));
        tracker.invalidate();
        assert!(!tracker.is_current(&t));
    }
}
