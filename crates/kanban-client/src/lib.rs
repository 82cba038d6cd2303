pub mod api;
pub mod cache;
pub mod optimistic;
pub mod query;
pub mod state;
pub mod store;
pub mod workspace;

pub use api::{HttpKanbanApi, KanbanApi, RequestOptions};
pub use cache::{CacheEvent, QueryCache, QueryData, QueryKey};
pub use optimistic::{persist, MutationState, OptimisticMutation};
pub use query::{with_retry, RetryPolicy};
pub use state::{ActiveBoardStore, ChatState, ChatStore, Session, SessionStore};
pub use store::{PersistedState, StateFile};
pub use workspace::{BoardWorkspace, CHAT_ERROR_MESSAGE};
