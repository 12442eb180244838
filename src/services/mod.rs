//! Services: the representative core and the delivery machinery around it.

pub mod connector_gate;
pub mod edit_scheduler;
pub mod event_bus;
pub mod handler_registry;
pub mod heartbeat;
pub mod job_worker;
pub mod message_renderer;
pub mod message_selector;
pub mod representative;
pub mod retry;

pub use connector_gate::ConnectorGate;
pub use edit_scheduler::EditScheduler;
pub use event_bus::{deliver, EventBus, RepresentativeSubscriber};
pub use handler_registry::{HandlerName, HandlerRegistry};
pub use heartbeat::{HeartbeatPayloadBuilder, TitleGroupingTextCreator};
pub use job_worker::{ChannelJobQueue, JobError, JobExecutor, JobWorkerPool};
pub use message_renderer::render_message;
pub use message_selector::MessageSelector;
pub use representative::{DispatchError, DispatchOutcome, Handler, Representative, SuppressReason};
