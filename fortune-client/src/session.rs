//! In-memory history of the results produced in one session.
//!
//! Results are only ever appended. The active cursor always points at a valid
//! entry or at nothing.

use thiserror::Error;

/// Shown in place of content while no result is active.
pub const EMPTY_STATE_MESSAGE: &str = "왼쪽에서 정보를 입력하고 운세를 확인하세요.";

/// One generated fortune.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FortuneResult {
    /// 1-based, strictly increasing within a session.
    pub id: u64,
    /// Fortune type requested.
    pub fortune_type: String,
    /// Markdown returned by the server.
    pub content: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("result id {id} must be greater than {last}")]
    NonMonotonicId { id: u64, last: u64 },

    #[error("index {index} out of range for {len} results")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A tab in the result bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab<'a> {
    pub label: String,
    pub fortune_type: &'a str,
    pub active: bool,
}

#[derive(Debug, Default)]
pub struct SessionStore {
    results: Vec<FortuneResult>,
    active_index: Option<usize>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn results(&self) -> &[FortuneResult] {
        &self.results
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active(&self) -> Option<&FortuneResult> {
        self.active_index.and_then(|i| self.results.get(i))
    }

    /// Id for the next result: one past the last id.
    pub fn next_id(&self) -> u64 {
        self.results.last().map_or(1, |r| r.id + 1)
    }

    /// Append a result and return its index. The active entry is unchanged.
    pub fn append(&mut self, result: FortuneResult) -> Result<usize, SessionError> {
        if let Some(last) = self.results.last() {
            if result.id <= last.id {
                return Err(SessionError::NonMonotonicId {
                    id: result.id,
                    last: last.id,
                });
            }
        }

        self.results.push(result);
        Ok(self.results.len() - 1)
    }

    /// Focus the entry at `index`.
    pub fn set_active(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.results.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: self.results.len(),
            });
        }

        self.active_index = Some(index);
        Ok(())
    }

    /// Content of the entry at `index`.
    pub fn render(&self, index: usize) -> Option<&str> {
        self.results.get(index).map(|r| r.content.as_str())
    }

    /// Content of the active entry, or the empty-state placeholder.
    pub fn render_active(&self) -> &str {
        self.active()
            .map(|r| r.content.as_str())
            .unwrap_or(EMPTY_STATE_MESSAGE)
    }

    pub fn tabs(&self) -> Vec<Tab<'_>> {
        self.results
            .iter()
            .enumerate()
            .map(|(index, result)| Tab {
                label: format!("결과 {}", result.id),
                fortune_type: &result.fortune_type,
                active: self.active_index == Some(index),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: u64) -> FortuneResult {
        FortuneResult {
            id,
            fortune_type: "연애운".to_string(),
            content: format!("content {}", id),
        }
    }

    #[test]
    fn empty_session_shows_placeholder() {
        let store = SessionStore::new();
        assert!(store.is_empty());
        assert_eq!(store.active_index(), None);
        assert_eq!(store.render_active(), EMPTY_STATE_MESSAGE);
        assert_eq!(store.next_id(), 1);
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut store = SessionStore::new();
        assert_eq!(store.append(result(1)), Ok(0));
        assert_eq!(store.append(result(2)), Ok(1));
        assert_eq!(store.append(result(5)), Ok(2));

        let ids: Vec<u64> = store.results().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 5]);
        assert_eq!(store.active_index(), None);
    }

    #[test]
    fn append_rejects_reused_or_lower_ids() {
        let mut store = SessionStore::new();
        store.append(result(2)).unwrap();

        assert_eq!(
            store.append(result(2)),
            Err(SessionError::NonMonotonicId { id: 2, last: 2 })
        );
        assert_eq!(
            store.append(result(1)),
            Err(SessionError::NonMonotonicId { id: 1, last: 2 })
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn next_id_follows_the_last_id() {
        let mut store = SessionStore::new();
        store.append(result(5)).unwrap();

        let next = store.next_id();
        assert_eq!(next, 6);
        assert_eq!(store.append(result(next)), Ok(1));
    }

    #[test]
    fn set_active_checks_bounds() {
        let mut store = SessionStore::new();
        assert_eq!(
            store.set_active(0),
            Err(SessionError::IndexOutOfRange { index: 0, len: 0 })
        );

        store.append(result(1)).unwrap();
        store.append(result(2)).unwrap();
        store.set_active(1).unwrap();
        assert_eq!(store.render_active(), "content 2");

        assert!(store.set_active(2).is_err());
        assert_eq!(store.active_index(), Some(1));
    }

    #[test]
    fn render_by_index() {
        let mut store = SessionStore::new();
        store.append(result(1)).unwrap();

        assert_eq!(store.render(0), Some("content 1"));
        assert_eq!(store.render(1), None);
    }

    #[test]
    fn tabs_mark_the_active_result() {
        let mut store = SessionStore::new();
        store.append(result(1)).unwrap();
        store.append(result(2)).unwrap();
        store.set_active(0).unwrap();

        let tabs = store.tabs();
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[0].label, "결과 1");
        assert!(tabs[0].active);
        assert_eq!(tabs[1].label, "결과 2");
        assert!(!tabs[1].active);
    }
}
