//! Cora: helpers for the Vapi voice-agent API
//!
//! Builds assistant configurations (voice, transcriber, analysis plan),
//! places calls and chats, and follows a call until it finishes.
//!
//! # Quick Start
//!
//! ```no_run
//! use cora::prelude::*;
//! use futures::StreamExt;
//!
//! # async fn example() -> cora::error::Result<()> {
//! let client = VapiClient::from_env()?;
//!
//! let assistant = client
//!     .create_assistant(
//!         &CreateAssistantRequest::builder()
//!             .name("demo-patient")
//!             .system_prompt("You are a helpful scheduling assistant.")
//!             .voice(VoiceCatalog::openai().voice("nova").unwrap())
//!             .transcriber(Deepgram::default().english())
//!             .build(),
//!     )
//!     .await?;
//!
//! let call = client
//!     .create_call(
//!         &CreateCallRequest::builder()
//!             .assistant_id(assistant.id.clone())
//!             .customer("+1 (956) 670-7155")
//!             .build(),
//!     )
//!     .await?;
//!
//! let mut updates = watch_call(&client, &call.id, cora::calls::DEFAULT_POLL_INTERVAL);
//! while let Some(snapshot) = updates.next().await {
//!     println!("{:?}", snapshot?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis_plan;
pub mod assistants;
pub mod calls;
pub mod chats;
pub mod client;
pub mod config;
pub mod error;
pub mod phone;
pub mod phone_numbers;
pub mod plain;
pub mod prelude;
pub mod transcribers;
pub mod voices;
