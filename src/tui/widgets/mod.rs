mod input;
mod messages;

pub use input::CommandInput;
pub use messages::{MessageList, MessageListState};
