use crate::controllers::pipeline::events::RenderEvent;

pub trait FrameSink: Send + Sync {
    fn submit(&self, event: RenderEvent);
}
