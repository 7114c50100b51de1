pub mod conversation;
pub mod intent;
pub mod locale;
pub mod models;
pub mod status;

pub use conversation::{Conversation, ConversationEntry, ConversationError, HISTORY_WINDOW};
pub use intent::{
    classify, classify_intent, compose_reply, detect_language, normalize_text, run_agent,
    Classification, Intent, Signals,
};
pub use models::*;
pub use status::{apply_status_overlay, simulate_status, StatusReport, REPAIR_STAGES};
