pub mod atomic_writer;
pub mod state_file;

pub use atomic_writer::AtomicWriter;
pub use state_file::{PersistedState, StateFile};
