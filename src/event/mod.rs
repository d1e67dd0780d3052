mod bus;
mod events;

pub use bus::EventBus;
pub use events::EngineEvent;

pub trait EngineEventHandler: Send {
    fn handle_event(&mut self, event: &EngineEvent);
}
