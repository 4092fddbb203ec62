//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Created fresh each frame from the data they display:
//! - `TitleBar`: Top status bar showing endpoint and status
//! - `MessageBubble`: One transcript message
//! - `InputBox`: The pending draft, borrowed from `App`
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `MessageList`: Scrollable transcript with layout caching; its scroll
//!   state (`MessageListState`) persists in `TuiState`
//!
//! Components receive external data as props, never by reaching into
//! `App` themselves:
//!
//! ```rust,ignore
//! TitleBar::new(&endpoint, &app.status_message, unseen).render(frame, area);
//! ```

pub mod input_box;
pub mod message;
pub mod message_list;
mod title_bar;

pub use input_box::{InputBox, input_action};
pub use message::MessageBubble;
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
