pub mod public;
pub mod session;

pub use public::{resolve_public, PublicPage};
pub use session::{EditorSession, SessionError};

// Re-export what callers need to drive a session
pub use vitrine_editor::{parse_form_event, ContentEdit, FormEvent, Mutation};
pub use vitrine_store::{MemoryStore, ObjectStore, PageStore, RestStore};
